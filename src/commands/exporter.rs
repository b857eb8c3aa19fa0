// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PublicUser, Transaction};
use crate::store::{Store, keys};
use anyhow::Result;
use serde_json::json;

pub fn handle(store: &Store, user: &PublicUser, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, user, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &Store, user: &PublicUser, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut records: Vec<Transaction> = store.load(&keys::transactions(user.id))?;
    records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "category",
                "amount",
                "payment_method",
                "description",
            ])?;
            for t in &records {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.payment_method.clone().unwrap_or_else(|| "cash".into()),
                    t.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = records
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date, "type": t.kind, "category": t.category,
                        "amount": t.amount, "paymentMethod": t.payment_method,
                        "description": t.description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transaction(s) to {}", records.len(), out);
    Ok(())
}
