// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PublicUser, Transaction, TxKind};
use crate::store::{Store, keys};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use chrono::Datelike;

pub fn handle(store: &Store, user: &PublicUser, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, user, sub)?,
        Some(("list", sub)) => list(store, user, sub)?,
        Some(("edit", sub)) => edit(store, user, sub)?,
        Some(("rm", sub)) => rm(store, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let description = sub.get_one::<String>("description").map(|s| s.to_string());
    let payment_method = sub
        .get_one::<String>("payment-method")
        .map(|s| s.to_string());

    let tx = Transaction {
        id: store.next_id(keys::RECORD_SEQ)?,
        date,
        amount,
        category: category.clone(),
        kind,
        description,
        payment_method,
    };
    let key = keys::transactions(user.id);
    let mut records: Vec<Transaction> = store.load(&key)?;
    records.push(tx);
    store.save(&key, &records)?;
    println!(
        "Recorded {} {} '{}' on {}",
        kind,
        fmt_money(&amount),
        category,
        date
    );
    Ok(())
}

fn list(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(store, user.id, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    fmt_money(&t.amount),
                    t.payment_method.clone().unwrap_or_else(|| "cash".into()),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Amount", "Payment", "Description"],
                data,
            )
        );
    }
    Ok(())
}

/// Filtered, newest-first transaction view shared by `list` and the tests.
pub fn query_rows(store: &Store, user_id: i64, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let records: Vec<Transaction> = store.load(&keys::transactions(user_id))?;
    let month = sub.get_one::<u32>("month").copied();
    let year = sub.get_one::<i32>("year").copied();
    let category = sub.get_one::<String>("category");
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;

    let mut rows: Vec<Transaction> = records
        .into_iter()
        .filter(|t| month.is_none_or(|m| t.date.month() == m))
        .filter(|t| year.is_none_or(|y| t.date.year() == y))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn edit(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::transactions(user.id);
    let mut records: Vec<Transaction> = store.load(&key)?;
    let tx = records
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    if let Some(date) = sub.get_one::<String>("date") {
        tx.date = parse_date(date)?;
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        tx.amount = parse_amount(amount)?;
    }
    if let Some(category) = sub.get_one::<String>("category") {
        tx.category = category.to_string();
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        tx.kind = kind.parse()?;
    }
    // An empty value clears the field, like a form input left blank.
    if let Some(description) = sub.get_one::<String>("description") {
        tx.description = (!description.is_empty()).then(|| description.to_string());
    }
    if let Some(method) = sub.get_one::<String>("payment-method") {
        tx.payment_method = (!method.is_empty()).then(|| method.to_string());
    }
    store.save(&key, &records)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::transactions(user.id);
    let mut records: Vec<Transaction> = store.load(&key)?;
    let before = records.len();
    records.retain(|t| t.id != id);
    if records.len() == before {
        return Err(anyhow::anyhow!("Transaction {} not found", id));
    }
    store.save(&key, &records)?;
    println!("Removed transaction {}", id);
    Ok(())
}
