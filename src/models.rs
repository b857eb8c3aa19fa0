// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Income => write!(f, "income"),
            TxKind::Expense => write!(f, "expense"),
        }
    }
}

// Collections are persisted as JSON with camelCase field names, matching the
// record shape the store has always held.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(default)]
    pub description: Option<String>,
    /// None means cash.
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Allocation for a category, interpreted as "this calendar month".
/// Category is unique within the collection and immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub creditor: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Decimal,
    /// Percent per year.
    #[serde(default)]
    pub interest: Decimal,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub is_paid: bool,
}

/// Mirror of [`Loan`] with the opposite direction of money flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lending {
    pub id: i64,
    pub borrower: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub interest: Decimal,
    pub lending_date: NaiveDate,
    pub due_date: NaiveDate,
    pub is_repaid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(anyhow::anyhow!(
                "Invalid priority '{}', expected high|medium|low",
                other
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub priority: Priority,
    pub is_completed: bool,
}

/// A registered identity. The password is kept as a salted HMAC-SHA256
/// digest, never in plain form; see [`crate::auth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    #[serde(default)]
    pub otp: Option<String>,
    #[serde(default)]
    pub otp_expiry: Option<DateTime<Utc>>,
}

/// What a session carries about the signed-in user. Credential material
/// never leaves the users collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        PublicUser {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

/// Anything with a due date and a settled flag: loans, lendings, and
/// savings goals all partition into overdue/upcoming the same way.
pub trait Obligation {
    fn due_date(&self) -> NaiveDate;
    fn settled(&self) -> bool;
    fn principal(&self) -> Decimal;
}

impl Obligation for Loan {
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn settled(&self) -> bool {
        self.is_paid
    }
    fn principal(&self) -> Decimal {
        self.amount
    }
}

impl Obligation for Lending {
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn settled(&self) -> bool {
        self.is_repaid
    }
    fn principal(&self) -> Decimal {
        self.amount
    }
}

impl Obligation for SavingGoal {
    fn due_date(&self) -> NaiveDate {
        self.target_date
    }
    fn settled(&self) -> bool {
        self.is_completed
    }
    fn principal(&self) -> Decimal {
        self.target_amount
    }
}
