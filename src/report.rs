// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure rollups over record collections. Every function is total:
//! empty input yields zero or empty results, never an error.

use crate::models::{Obligation, Transaction, TxKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// How many upcoming obligations the status views show.
pub const UPCOMING_CAP: usize = 3;

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct TypeTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl TypeTotals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn sum_by_type(records: &[Transaction]) -> TypeTotals {
    let mut totals = TypeTotals::default();
    for t in records {
        match t.kind {
            TxKind::Income => totals.income += t.amount,
            TxKind::Expense => totals.expense += t.amount,
        }
    }
    totals
}

pub fn sum_by_category(records: &[Transaction], kind: Option<TxKind>) -> BTreeMap<String, Decimal> {
    let mut map = BTreeMap::new();
    for t in records {
        if let Some(k) = kind {
            if t.kind != k {
                continue;
            }
        }
        *map.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
    }
    map
}

pub fn top_category(totals: &BTreeMap<String, Decimal>) -> Option<(&str, Decimal)> {
    totals
        .iter()
        .max_by_key(|(_, amount)| **amount)
        .map(|(cat, amount)| (cat.as_str(), *amount))
}

/// Calendar-day grouping; equal days always map to the same key.
pub fn group_by_day(records: &[Transaction]) -> BTreeMap<NaiveDate, Vec<&Transaction>> {
    let mut map: BTreeMap<NaiveDate, Vec<&Transaction>> = BTreeMap::new();
    for t in records {
        map.entry(t.date).or_default().push(t);
    }
    map
}

/// Records whose date falls in the given month. Month is 1-indexed.
pub fn filter_by_month(records: &[Transaction], month: u32, year: i32) -> Vec<&Transaction> {
    records
        .iter()
        .filter(|t| t.date.month() == month && t.date.year() == year)
        .collect()
}

/// Integer percentage of `part` in `whole`, rounded to the nearest whole
/// number. A zero whole yields 0.
pub fn percent_of(part: Decimal, whole: Decimal) -> i64 {
    if whole.is_zero() {
        return 0;
    }
    (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Progress toward a savings target, capped at 100.
pub fn goal_progress(current: Decimal, target: Decimal) -> i64 {
    percent_of(current, target).min(100)
}

/// Signed whole days from `as_of` to `target`; negative when past.
pub fn days_until(target: NaiveDate, as_of: NaiveDate) -> i64 {
    (target - as_of).num_days()
}

/// Countdown for display; never below zero.
pub fn days_left(target: NaiveDate, as_of: NaiveDate) -> i64 {
    days_until(target, as_of).max(0)
}

#[derive(Debug)]
pub struct DuePartition<'a, T> {
    pub overdue: Vec<&'a T>,
    /// Unsettled, strictly after `as_of`, ascending by due date.
    pub upcoming: Vec<&'a T>,
}

impl<T: Obligation> DuePartition<'_, T> {
    pub fn upcoming_capped(&self, cap: usize) -> &[&T] {
        &self.upcoming[..self.upcoming.len().min(cap)]
    }

    pub fn overdue_total(&self) -> Decimal {
        self.overdue.iter().map(|o| o.principal()).sum()
    }
}

/// Splits obligations into overdue and upcoming as of a point in time.
/// Settled items land in neither bucket; so do items due exactly on
/// `as_of` (the comparisons are strict).
pub fn partition_by_due_status<T: Obligation>(
    obligations: &[T],
    as_of: NaiveDate,
) -> DuePartition<'_, T> {
    let mut overdue = Vec::new();
    let mut upcoming = Vec::new();
    for o in obligations {
        if o.settled() {
            continue;
        }
        if o.due_date() < as_of {
            overdue.push(o);
        } else if o.due_date() > as_of {
            upcoming.push(o);
        }
    }
    upcoming.sort_by_key(|o| o.due_date());
    DuePartition { overdue, upcoming }
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Twelve income/expense/balance rollups for a calendar year.
pub fn monthly_summary(records: &[Transaction], year: i32) -> Vec<MonthSummary> {
    (1..=12)
        .map(|month| {
            let in_month = filter_by_month(records, month, year);
            let mut income = Decimal::ZERO;
            let mut expense = Decimal::ZERO;
            for t in in_month {
                match t.kind {
                    TxKind::Income => income += t.amount,
                    TxKind::Expense => expense += t.amount,
                }
            }
            MonthSummary {
                month,
                income,
                expense,
                balance: income - expense,
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percent: i64,
}

/// Expense share per category for one month, largest first. Percentages
/// are of the month's expense total.
pub fn category_breakdown(records: &[Transaction], month: u32, year: i32) -> Vec<CategoryShare> {
    let in_month: Vec<Transaction> = filter_by_month(records, month, year)
        .into_iter()
        .cloned()
        .collect();
    let totals = sum_by_category(&in_month, Some(TxKind::Expense));
    let whole: Decimal = totals.values().copied().sum();
    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percent: percent_of(amount, whole),
        })
        .collect();
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

/// Newest-first view of the latest `n` transactions.
pub fn recent(records: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    sorted.truncate(n);
    sorted
}
