// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thriftbook::cli;
use thriftbook::commands::exporter;
use thriftbook::models::{PublicUser, Transaction, TxKind};
use thriftbook::store::{Store, keys};

fn setup() -> (Store, PublicUser) {
    let store = Store::open_in_memory().unwrap();
    let user = PublicUser {
        id: 1,
        name: "An".into(),
        email: "an@example.com".into(),
    };
    let records = vec![
        Transaction {
            id: 2,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            amount: Decimal::from(50),
            category: "Salary".into(),
            kind: TxKind::Income,
            description: Some("January pay".into()),
            payment_method: Some("bank transfer".into()),
        },
        Transaction {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            amount: Decimal::from(100),
            category: "Food".into(),
            kind: TxKind::Expense,
            description: None,
            payment_method: None,
        },
    ];
    store.save(&keys::transactions(user.id), &records).unwrap();
    (store, user)
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["thriftbook", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("export", m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    m.clone()
}

#[test]
fn csv_export_is_date_ordered_with_cash_default() {
    let (store, user) = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let m = export_matches(&[
        "transactions",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    exporter::handle(&store, &user, &m).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines[0],
        "date,type,category,amount,payment_method,description"
    );
    assert!(lines[1].starts_with("2024-01-05,expense,Food,100,cash,"));
    assert!(lines[2].starts_with("2024-01-10,income,Salary,50,bank transfer,"));
}

#[test]
fn json_export_uses_the_record_shape() {
    let (store, user) = setup();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let m = export_matches(&[
        "transactions",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    exporter::handle(&store, &user, &m).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["category"], "Food");
    assert_eq!(items[1]["paymentMethod"], "bank transfer");
}
