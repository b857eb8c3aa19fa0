// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Loan, PublicUser};
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
    let creditor = sub.get_one::<String>("creditor").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let loan_date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let due_date = parse_date(sub.get_one::<String>("due").unwrap())?;
    let interest = match sub.get_one::<String>("interest") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let loan = Loan {
        id: store.next_id(keys::RECORD_SEQ)?,
        creditor: creditor.clone(),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        amount,
        interest,
        loan_date,
        due_date,
        is_paid: false,
    };
    let key = keys::loans(user.id);
    let mut loans: Vec<Loan> = store.load(&key)?;
    loans.push(loan);
    store.save(&key, &loans)?;
    println!(
        "Added loan of {} from '{}', due {}",
        fmt_money(&amount),
        creditor,
        due_date
    );
    Ok(())
}

fn list(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let loans: Vec<Loan> = store.load(&keys::loans(user.id))?;
    if !maybe_print_json(json_flag, jsonl_flag, &loans)? {
        let data: Vec<Vec<String>> = loans
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.creditor.clone(),
                    fmt_money(&l.amount),
                    format!("{}%", l.interest.normalize()),
                    l.loan_date.to_string(),
                    l.due_date.to_string(),
                    if l.is_paid { "paid" } else { "open" }.into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Creditor", "Amount", "Interest", "Taken", "Due", "Status"],
                data
            )
        );
    }
    Ok(())
}

fn edit(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::loans(user.id);
    let mut loans: Vec<Loan> = store.load(&key)?;
    let loan = loans
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow::anyhow!("Loan {} not found", id))?;

    if let Some(creditor) = sub.get_one::<String>("creditor") {
        loan.creditor = creditor.to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        loan.amount = parse_amount(amount)?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        loan.loan_date = parse_date(date)?;
    }
    if let Some(due) = sub.get_one::<String>("due") {
        loan.due_date = parse_date(due)?;
    }
    if let Some(interest) = sub.get_one::<String>("interest") {
        loan.interest = parse_amount(interest)?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        // Empty value clears the field
        loan.description = (!description.is_empty()).then(|| description.to_string());
    }
    store.save(&key, &loans)?;
    println!("Updated loan {}", id);
    Ok(())
}

fn rm(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::loans(user.id);
    let mut loans: Vec<Loan> = store.load(&key)?;
    let before = loans.len();
    loans.retain(|l| l.id != id);
    if loans.len() == before {
        return Err(anyhow::anyhow!("Loan {} not found", id));
    }
    store.save(&key, &loans)?;
    println!("Removed loan {}", id);
    Ok(())
}

fn settle(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::loans(user.id);
    let mut loans: Vec<Loan> = store.load(&key)?;
    let loan = loans
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow::anyhow!("Loan {} not found", id))?;
    loan.is_paid = !loan.is_paid;
    let state = if loan.is_paid { "paid" } else { "open" };
    store.save(&key, &loans)?;
    println!("Loan {} marked {}", id, state);
    Ok(())
}

fn status(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let loans: Vec<Loan> = store.load(&keys::loans(user.id))?;
    let today = Local::now().date_naive();

    let total: Decimal = loans.iter().map(|l| l.amount).sum();
    let partition = report::partition_by_due_status(&loans, today);

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

    println!("Total borrowed: {}", fmt_money(&total));
    println!(
        "Overdue: {} loan(s), {}",
        partition.overdue.len(),
        fmt_money(&partition.overdue_total())
    );
    let upcoming = partition.upcoming_capped(report::UPCOMING_CAP);
    if upcoming.is_empty() {
        println!("No upcoming due dates");
    } else {
        let data: Vec<Vec<String>> = upcoming
            .iter()
            .map(|l| {
                vec![
                    l.creditor.clone(),
                    fmt_money(&l.amount),
                    l.due_date.to_string(),
                    format!("{} day(s)", report::days_left(l.due_date, today)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Creditor", "Amount", "Due", "Left"], data)
        );
    }
    Ok(())
}
