// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Lending, PublicUser};
use crate::report;
use crate::store::{Store, keys};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;

pub fn handle(store: &Store, user: &PublicUser, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, user, sub)?,
        Some(("list", sub)) => list(store, user, sub)?,
        Some(("edit", sub)) => edit(store, user, sub)?,
        Some(("rm", sub)) => rm(store, user, sub)?,
        Some(("settle", sub)) => settle(store, user, sub)?,
        Some(("status", sub)) => status(store, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let borrower = sub.get_one::<String>("borrower").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let lending_date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let due_date = parse_date(sub.get_one::<String>("due").unwrap())?;
    let interest = match sub.get_one::<String>("interest") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let lending = Lending {
        id: store.next_id(keys::RECORD_SEQ)?,
        borrower: borrower.clone(),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        amount,
        interest,
        lending_date,
        due_date,
        is_repaid: false,
    };
    let key = keys::lendings(user.id);
    let mut lendings: Vec<Lending> = store.load(&key)?;
    lendings.push(lending);
    store.save(&key, &lendings)?;
    println!(
        "Lent {} to '{}', due back {}",
        fmt_money(&amount),
        borrower,
        due_date
    );
    Ok(())
}

fn list(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let lendings: Vec<Lending> = store.load(&keys::lendings(user.id))?;
    if !maybe_print_json(json_flag, jsonl_flag, &lendings)? {
        let data: Vec<Vec<String>> = lendings
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.borrower.clone(),
                    fmt_money(&l.amount),
                    format!("{}%", l.interest.normalize()),
                    l.lending_date.to_string(),
                    l.due_date.to_string(),
                    if l.is_repaid { "repaid" } else { "open" }.into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Borrower", "Amount", "Interest", "Lent", "Due", "Status"],
                data
            )
        );
    }
    Ok(())
}

fn edit(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::lendings(user.id);
    let mut lendings: Vec<Lending> = store.load(&key)?;
    let lending = lendings
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow::anyhow!("Lending {} not found", id))?;

    if let Some(borrower) = sub.get_one::<String>("borrower") {
        lending.borrower = borrower.to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        lending.amount = parse_amount(amount)?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        lending.lending_date = parse_date(date)?;
    }
    if let Some(due) = sub.get_one::<String>("due") {
        lending.due_date = parse_date(due)?;
    }
    if let Some(interest) = sub.get_one::<String>("interest") {
        lending.interest = parse_amount(interest)?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        // Empty value clears the field
        lending.description = (!description.is_empty()).then(|| description.to_string());
    }
    store.save(&key, &lendings)?;
    println!("Updated lending {}", id);
    Ok(())
}

fn rm(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::lendings(user.id);
    let mut lendings: Vec<Lending> = store.load(&key)?;
    let before = lendings.len();
    lendings.retain(|l| l.id != id);
    if lendings.len() == before {
        return Err(anyhow::anyhow!("Lending {} not found", id));
    }
    store.save(&key, &lendings)?;
    println!("Removed lending {}", id);
    Ok(())
}

fn settle(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::lendings(user.id);
    let mut lendings: Vec<Lending> = store.load(&key)?;
    let lending = lendings
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow::anyhow!("Lending {} not found", id))?;
    lending.is_repaid = !lending.is_repaid;
    let state = if lending.is_repaid { "repaid" } else { "open" };
    store.save(&key, &lendings)?;
    println!("Lending {} marked {}", id, state);
    Ok(())
}

fn status(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let lendings: Vec<Lending> = store.load(&keys::lendings(user.id))?;
    let today = Local::now().date_naive();

    let total: Decimal = lendings.iter().map(|l| l.amount).sum();
    let partition = report::partition_by_due_status(&lendings, today);

    if json_flag || jsonl_flag {
        let summary = serde_json::json!({
            "total": total,
            "overdueCount": partition.overdue.len(),
            "overdueTotal": partition.overdue_total(),
            "upcoming": partition.upcoming_capped(report::UPCOMING_CAP),
        });
        maybe_print_json(json_flag, jsonl_flag, &summary)?;
        return Ok(());
    }

    println!("Total lent out: {}", fmt_money(&total));
    println!(
        "Overdue: {} lending(s), {}",
        partition.overdue.len(),
        fmt_money(&partition.overdue_total())
    );
    let upcoming = partition.upcoming_capped(report::UPCOMING_CAP);
    if upcoming.is_empty() {
        println!("No upcoming repayments");
    } else {
        let data: Vec<Vec<String>> = upcoming
            .iter()
            .map(|l| {
                vec![
                    l.borrower.clone(),
                    fmt_money(&l.amount),
                    l.due_date.to_string(),
                    format!("{} day(s)", report::days_left(l.due_date, today)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Borrower", "Amount", "Due", "Left"], data)
        );
    }
    Ok(())
}
