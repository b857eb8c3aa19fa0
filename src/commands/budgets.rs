// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Budget, PublicUser, Transaction, TxKind};
use crate::report;
use crate::store::{Store, keys};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &Store, user: &PublicUser, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, user, sub)?,
        Some(("edit", sub)) => edit(store, user, sub)?,
        Some(("rm", sub)) => rm(store, user, sub)?,
        Some(("report", sub)) => {
            let today = Local::now().date_naive();
            print_report(store, user, sub, today)?
        }
        _ => {}
    }
    Ok(())
}

fn set(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let key = keys::budgets(user.id);
    let mut budgets: Vec<Budget> = store.load(&key)?;
    if budgets.iter().any(|b| b.category == category) {
        return Err(anyhow::anyhow!(
            "Category '{}' already has a budget; edit the existing one",
            category
        ));
    }
    let budget = Budget {
        id: store.next_id(keys::RECORD_SEQ)?,
        category: category.clone(),
        amount,
    };
    budgets.push(budget);
    store.save(&key, &budgets)?;
    println!("Budget set: {} = {}", category, fmt_money(&amount));
    Ok(())
}

// Category is immutable after creation; only the allocation can change.
fn edit(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let key = keys::budgets(user.id);
    let mut budgets: Vec<Budget> = store.load(&key)?;
    let budget = budgets
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| anyhow::anyhow!("Budget {} not found", id))?;
    budget.amount = amount;
    let category = budget.category.clone();
    store.save(&key, &budgets)?;
    println!("Budget updated: {} = {}", category, fmt_money(&amount));
    Ok(())
}

fn rm(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::budgets(user.id);
    let mut budgets: Vec<Budget> = store.load(&key)?;
    let before = budgets.len();
    budgets.retain(|b| b.id != id);
    if budgets.len() == before {
        return Err(anyhow::anyhow!("Budget {} not found", id));
    }
    store.save(&key, &budgets)?;
    println!("Removed budget {}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetRow {
    pub id: i64,
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: i64,
}

/// Budget vs. spend for the calendar month containing `today`.
pub fn budget_rows(store: &Store, user_id: i64, today: NaiveDate) -> Result<Vec<BudgetRow>> {
    let budgets: Vec<Budget> = store.load(&keys::budgets(user_id))?;
    let records: Vec<Transaction> = store.load(&keys::transactions(user_id))?;
    let month_txs: Vec<Transaction> = report::filter_by_month(&records, today.month(), today.year())
        .into_iter()
        .cloned()
        .collect();
    let spending = report::sum_by_category(&month_txs, Some(TxKind::Expense));

    Ok(budgets
        .iter()
        .map(|b| {
            let spent = spending.get(&b.category).copied().unwrap_or(Decimal::ZERO);
            BudgetRow {
                id: b.id,
                category: b.category.clone(),
                budget: b.amount,
                spent,
                remaining: b.amount - spent,
                percent_used: report::percent_of(spent, b.amount),
            }
        })
        .collect())
}

fn print_report(
    store: &Store,
    user: &PublicUser,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = budget_rows(store, user.id, today)?;

    let total_budget: Decimal = rows.iter().map(|r| r.budget).sum();
    let total_spent: Decimal = rows.iter().map(|r| r.spent).sum();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.category.clone(),
                    fmt_money(&r.budget),
                    fmt_money(&r.spent),
                    fmt_money(&r.remaining),
                    format!("{}%", r.percent_used),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Category", "Budget", "Spent", "Remaining", "Used"],
                data
            )
        );
        println!(
            "Total: {} of {} ({}%)",
            fmt_money(&total_spent),
            fmt_money(&total_budget),
            report::percent_of(total_spent, total_budget)
        );
    }
    Ok(())
}
