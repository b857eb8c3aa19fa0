// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PublicUser, Transaction, TxKind};
use crate::report;
use crate::store::{Store, keys};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Local};
use rust_decimal::Decimal;

pub fn handle(store: &Store, user: &PublicUser, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(store, user, sub)?,
        Some(("monthly", sub)) => monthly(store, user, sub)?,
        Some(("categories", sub)) => categories(store, user, sub)?,
        Some(("calendar", sub)) => calendar(store, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn overview(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id))?;

    let totals = report::sum_by_type(&records);
    let expense_by_category = report::sum_by_category(&records, Some(TxKind::Expense));
    let top = report::top_category(&expense_by_category);
    let recent = report::recent(&records, 4);

    if json_flag || jsonl_flag {
        let summary = serde_json::json!({
            "income": totals.income,
            "expense": totals.expense,
            "balance": totals.balance(),
            "count": records.len(),
            "topCategory": top.map(|(name, amount)| serde_json::json!({
                "category": name, "amount": amount
            })),
            "recent": recent,
        });
        maybe_print_json(json_flag, jsonl_flag, &summary)?;
        return Ok(());
    }

    println!("Income:  {}", fmt_money(&totals.income));
    println!("Expense: {}", fmt_money(&totals.expense));
    println!("Balance: {}", fmt_money(&totals.balance()));
    println!("Transactions: {}", records.len());
    match top {
        Some((name, amount)) => println!("Top category: {} ({})", name, fmt_money(&amount)),
        None => println!("Top category: N/A"),
    }
    if !recent.is_empty() {
        let data: Vec<Vec<String>> = recent
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    fmt_money(&t.amount),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Description"], data)
        );
    }
    Ok(())
}

fn monthly(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = *sub.get_one::<i32>("year").unwrap();
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id))?;

    let summary = report::monthly_summary(&records, year);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let data: Vec<Vec<String>> = summary
            .iter()
            .map(|m| {
                vec![
                    format!("{}-{:02}", year, m.month),
                    fmt_money(&m.income),
                    fmt_money(&m.expense),
                    fmt_money(&m.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], data)
        );
    }
    Ok(())
}

fn categories(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = *sub.get_one::<u32>("month").unwrap();
    let year = *sub.get_one::<i32>("year").unwrap();
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id))?;

    let shares = report::category_breakdown(&records, month, year);
    if !maybe_print_json(json_flag, jsonl_flag, &shares)? {
        let data: Vec<Vec<String>> = shares
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_money(&s.amount),
                    format!("{}%", s.percent),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share"], data)
        );
    }
    Ok(())
}

fn calendar(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = Local::now().date_naive();
    let month = sub.get_one::<u32>("month").copied().unwrap_or(today.month());
    let year = sub.get_one::<i32>("year").copied().unwrap_or(today.year());
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id))?;

    let in_month: Vec<Transaction> = report::filter_by_month(&records, month, year)
        .into_iter()
        .cloned()
        .collect();
    let by_day = report::group_by_day(&in_month);
    let month_total: Decimal = in_month.iter().map(|t| t.amount).sum();

    if json_flag || jsonl_flag {
        let days: Vec<serde_json::Value> = by_day
            .iter()
            .map(|(day, txs)| {
                serde_json::json!({
                    "day": day,
                    "total": txs.iter().map(|t| t.amount).sum::<Decimal>(),
                    "transactions": txs,
                })
            })
            .collect();
        maybe_print_json(json_flag, jsonl_flag, &days)?;
        return Ok(());
    }

    let data: Vec<Vec<String>> = by_day
        .iter()
        .map(|(day, txs)| {
            let total: Decimal = txs.iter().map(|t| t.amount).sum();
            vec![day.to_string(), txs.len().to_string(), fmt_money(&total)]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Count", "Total"], data));
    println!(
        "{}-{:02} total: {}",
        year,
        month,
        fmt_money(&month_total)
    );
    Ok(())
}
