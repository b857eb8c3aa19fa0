// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Priority, PublicUser, SavingGoal};
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
        Some(("contribute", sub)) => contribute(store, user, sub)?,
        Some(("complete", sub)) => complete(store, user, sub)?,
        Some(("status", sub)) => status(store, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().to_string();
    let target_amount = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let start_date = parse_date(sub.get_one::<String>("start").unwrap())?;
    let target_date = parse_date(sub.get_one::<String>("due").unwrap())?;
    let current_amount = match sub.get_one::<String>("initial") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let priority = match sub.get_one::<String>("priority") {
        Some(s) => s.parse()?,
        None => Priority::Medium,
    };
    let goal = SavingGoal {
        id: store.next_id(keys::RECORD_SEQ)?,
        name: name.clone(),
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        target_amount,
        current_amount,
        start_date,
        target_date,
        priority,
        is_completed: false,
    };
    let key = keys::savings(user.id);
    let mut goals: Vec<SavingGoal> = store.load(&key)?;
    goals.push(goal);
    store.save(&key, &goals)?;
    println!(
        "Added goal '{}': {} by {}",
        name,
        fmt_money(&target_amount),
        target_date
    );
    Ok(())
}

fn list(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut goals: Vec<SavingGoal> = store.load(&keys::savings(user.id))?;
    // Open goals first, as the original listing orders them.
    goals.sort_by_key(|g| g.is_completed);
    if !maybe_print_json(json_flag, jsonl_flag, &goals)? {
        let data: Vec<Vec<String>> = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    fmt_money(&g.current_amount),
                    fmt_money(&g.target_amount),
                    format!(
                        "{}%",
                        report::goal_progress(g.current_amount, g.target_amount)
                    ),
                    g.target_date.to_string(),
                    g.priority.to_string(),
                    if g.is_completed { "done" } else { "open" }.into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Saved", "Target", "Progress", "By", "Priority", "Status"],
                data
            )
        );
    }
    Ok(())
}

fn edit(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::savings(user.id);
    let mut goals: Vec<SavingGoal> = store.load(&key)?;
    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("Saving goal {} not found", id))?;

    if let Some(name) = sub.get_one::<String>("name") {
        goal.name = name.to_string();
    }
    if let Some(target) = sub.get_one::<String>("target") {
        goal.target_amount = parse_amount(target)?;
    }
    if let Some(start) = sub.get_one::<String>("start") {
        goal.start_date = parse_date(start)?;
    }
    if let Some(due) = sub.get_one::<String>("due") {
        goal.target_date = parse_date(due)?;
    }
    if let Some(priority) = sub.get_one::<String>("priority") {
        goal.priority = priority.parse()?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        // Empty value clears the field
        goal.description = (!description.is_empty()).then(|| description.to_string());
    }
    store.save(&key, &goals)?;
    println!("Updated saving goal {}", id);
    Ok(())
}

fn rm(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::savings(user.id);
    let mut goals: Vec<SavingGoal> = store.load(&key)?;
    let before = goals.len();
    goals.retain(|g| g.id != id);
    if goals.len() == before {
        return Err(anyhow::anyhow!("Saving goal {} not found", id));
    }
    store.save(&key, &goals)?;
    println!("Removed saving goal {}", id);
    Ok(())
}

fn contribute(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let key = keys::savings(user.id);
    let mut goals: Vec<SavingGoal> = store.load(&key)?;
    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("Saving goal {} not found", id))?;
    goal.current_amount += amount;
    let progress = report::goal_progress(goal.current_amount, goal.target_amount);
    let name = goal.name.clone();
    store.save(&key, &goals)?;
    println!(
        "Added {} to '{}' ({}% of target)",
        fmt_money(&amount),
        name,
        progress
    );
    Ok(())
}

fn complete(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let key = keys::savings(user.id);
    let mut goals: Vec<SavingGoal> = store.load(&key)?;
    let goal = goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("Saving goal {} not found", id))?;
    goal.is_completed = !goal.is_completed;
    let state = if goal.is_completed { "done" } else { "open" };
    store.save(&key, &goals)?;
    println!("Saving goal {} marked {}", id, state);
    Ok(())
}

fn status(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals: Vec<SavingGoal> = store.load(&keys::savings(user.id))?;
    let today = Local::now().date_naive();

    let total_saved: Decimal = goals.iter().map(|g| g.current_amount).sum();
    let total_targets: Decimal = goals.iter().map(|g| g.target_amount).sum();
    let partition = report::partition_by_due_status(&goals, today);
    let upcoming = partition.upcoming_capped(report::UPCOMING_CAP);

    if json_flag || jsonl_flag {
        let summary = serde_json::json!({
            "totalSaved": total_saved,
            "totalTargets": total_targets,
            "progress": report::percent_of(total_saved, total_targets),
            "upcoming": upcoming,
        });
        maybe_print_json(json_flag, jsonl_flag, &summary)?;
        return Ok(());
    }

    println!(
        "Saved {} of {} ({}%)",
        fmt_money(&total_saved),
        fmt_money(&total_targets),
        report::percent_of(total_saved, total_targets)
    );
    if upcoming.is_empty() {
        println!("No upcoming target dates");
    } else {
        let data: Vec<Vec<String>> = upcoming
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    format!(
                        "{}%",
                        report::goal_progress(g.current_amount, g.target_amount)
                    ),
                    g.target_date.to_string(),
                    format!("{} day(s)", report::days_left(g.target_date, today)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Progress", "By", "Left"], data)
        );
    }
    Ok(())
}
