// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thriftbook::commands::budgets;
use thriftbook::models::{PublicUser, Transaction, TxKind};
use thriftbook::store::{Store, keys};
use thriftbook::{cli, report};

fn setup() -> (Store, PublicUser) {
    let store = Store::open_in_memory().unwrap();
    let user = PublicUser {
        id: 1,
        name: "An".into(),
        email: "an@example.com".into(),
    };
    (store, user)
}

fn budget_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["thriftbook", "budget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("budget", m)) = matches.subcommand() else {
        panic!("no budget subcommand");
    };
    m.clone()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn set_then_duplicate_category_rejected() {
    let (store, user) = setup();
    budgets::handle(
        &store,
        &user,
        &budget_matches(&["set", "--category", "Food", "--amount", "200"]),
    )
    .unwrap();

    let err = budgets::handle(
        &store,
        &user,
        &budget_matches(&["set", "--category", "Food", "--amount", "300"]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("already has a budget"));
}

#[test]
fn edit_changes_amount_but_never_category() {
    let (store, user) = setup();
    budgets::handle(
        &store,
        &user,
        &budget_matches(&["set", "--category", "Food", "--amount", "200"]),
    )
    .unwrap();
    let rows = budgets::budget_rows(&store, user.id, d(2024, 1, 15)).unwrap();
    let id = rows[0].id;

    budgets::handle(
        &store,
        &user,
        &budget_matches(&["edit", "--id", &id.to_string(), "--amount", "250"]),
    )
    .unwrap();

    let rows = budgets::budget_rows(&store, user.id, d(2024, 1, 15)).unwrap();
    assert_eq!(rows[0].category, "Food");
    assert_eq!(rows[0].budget, Decimal::from(250));
}

#[test]
fn negative_amount_rejected_at_the_mutation_path() {
    let (store, user) = setup();
    let err = budgets::handle(
        &store,
        &user,
        &budget_matches(&["set", "--category", "Food", "--amount=-5"]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
}

#[test]
fn report_compares_budget_with_current_month_spend() {
    let (store, user) = setup();
    budgets::handle(
        &store,
        &user,
        &budget_matches(&["set", "--category", "Food", "--amount", "200"]),
    )
    .unwrap();

    let txs = vec![
        Transaction {
            id: 10,
            date: d(2024, 1, 5),
            amount: Decimal::from(180),
            category: "Food".into(),
            kind: TxKind::Expense,
            description: None,
            payment_method: None,
        },
        // Different month: must not count
        Transaction {
            id: 11,
            date: d(2023, 12, 30),
            amount: Decimal::from(999),
            category: "Food".into(),
            kind: TxKind::Expense,
            description: None,
            payment_method: None,
        },
        // Income in the same category: must not count as spend
        Transaction {
            id: 12,
            date: d(2024, 1, 6),
            amount: Decimal::from(50),
            category: "Food".into(),
            kind: TxKind::Income,
            description: None,
            payment_method: None,
        },
    ];
    store.save(&keys::transactions(user.id), &txs).unwrap();

    let rows = budgets::budget_rows(&store, user.id, d(2024, 1, 15)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].spent, Decimal::from(180));
    assert_eq!(rows[0].remaining, Decimal::from(20));
    assert_eq!(rows[0].percent_used, 90);
    assert_eq!(
        rows[0].percent_used,
        report::percent_of(Decimal::from(180), Decimal::from(200))
    );
}

#[test]
fn unbudgeted_month_shows_zero_spend() {
    let (store, user) = setup();
    budgets::handle(
        &store,
        &user,
        &budget_matches(&["set", "--category", "Food", "--amount", "200"]),
    )
    .unwrap();
    let rows = budgets::budget_rows(&store, user.id, d(2024, 7, 1)).unwrap();
    assert_eq!(rows[0].spent, Decimal::ZERO);
    assert_eq!(rows[0].percent_used, 0);
}
