// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thriftbook::cli;
use thriftbook::commands::tx;
use thriftbook::models::{PublicUser, Transaction};
use thriftbook::store::{Store, keys};

fn setup() -> (Store, PublicUser) {
    let store = Store::open_in_memory().unwrap();
    let user = PublicUser {
        id: 1,
        name: "An".into(),
        email: "an@example.com".into(),
    };
    (store, user)
}

fn tx_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["thriftbook", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    m.clone()
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let m = tx_matches(&[&["list"], args].concat());
    let Some(("list", list_m)) = m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

fn add(store: &Store, user: &PublicUser, date: &str, amount: &str, category: &str, kind: &str) {
    let m = tx_matches(&[
        "add", "--date", date, "--amount", amount, "--category", category, "--type", kind,
    ]);
    tx::handle(store, user, &m).unwrap();
}

#[test]
fn add_assigns_increasing_ids() {
    let (store, user) = setup();
    add(&store, &user, "2024-01-05", "100", "Food", "expense");
    add(&store, &user, "2024-01-05", "200", "Food", "expense");
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[1].id > records[0].id);
}

#[test]
fn add_rejects_bad_input() {
    let (store, user) = setup();
    let m = tx_matches(&[
        "add", "--date", "2024-13-05", "--amount", "10", "--category", "Food", "--type", "expense",
    ]);
    assert!(tx::handle(&store, &user, &m).is_err());

    let m = tx_matches(&[
        "add", "--date", "2024-01-05", "--amount=-10", "--category", "Food", "--type", "expense",
    ]);
    assert!(tx::handle(&store, &user, &m).is_err());

    let m = tx_matches(&[
        "add", "--date", "2024-01-05", "--amount", "10", "--category", "Food", "--type", "other",
    ]);
    assert!(tx::handle(&store, &user, &m).is_err());
}

#[test]
fn list_is_newest_first_with_limit() {
    let (store, user) = setup();
    add(&store, &user, "2024-01-01", "10", "Food", "expense");
    add(&store, &user, "2024-01-03", "30", "Food", "expense");
    add(&store, &user, "2024-01-02", "20", "Food", "expense");

    let rows = tx::query_rows(&store, user.id, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2024-01-03");
    assert_eq!(rows[1].date.to_string(), "2024-01-02");
}

#[test]
fn list_filters_by_month_category_and_type() {
    let (store, user) = setup();
    add(&store, &user, "2024-01-05", "100", "Food", "expense");
    add(&store, &user, "2024-02-05", "200", "Food", "expense");
    add(&store, &user, "2024-01-10", "50", "Salary", "income");

    let rows = tx::query_rows(
        &store,
        user.id,
        &list_matches(&["--month", "1", "--year", "2024"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);

    let rows = tx::query_rows(&store, user.id, &list_matches(&["--category", "Salary"])).unwrap();
    assert_eq!(rows.len(), 1);

    let rows = tx::query_rows(&store, user.id, &list_matches(&["--type", "income"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Salary");
}

#[test]
fn edit_replaces_fields_in_place() {
    let (store, user) = setup();
    add(&store, &user, "2024-01-05", "100", "Food", "expense");
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    let id = records[0].id.to_string();

    let m = tx_matches(&["edit", "--id", &id, "--amount", "150", "--category", "Dining"]);
    tx::handle(&store, &user, &m).unwrap();

    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    assert_eq!(records[0].amount.to_string(), "150");
    assert_eq!(records[0].category, "Dining");
    // Untouched fields survive
    assert_eq!(records[0].date.to_string(), "2024-01-05");
}

#[test]
fn edit_clears_optional_fields_on_empty_value() {
    let (store, user) = setup();
    let m = tx_matches(&[
        "add",
        "--date",
        "2024-01-05",
        "--amount",
        "100",
        "--category",
        "Food",
        "--type",
        "expense",
        "--description",
        "lunch",
        "--payment-method",
        "card",
    ]);
    tx::handle(&store, &user, &m).unwrap();
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    let id = records[0].id.to_string();

    let m = tx_matches(&["edit", "--id", &id, "--description", "", "--payment-method", ""]);
    tx::handle(&store, &user, &m).unwrap();

    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    assert!(records[0].description.is_none());
    // Cleared payment method means cash again
    assert!(records[0].payment_method.is_none());
}

#[test]
fn rm_excludes_by_id() {
    let (store, user) = setup();
    add(&store, &user, "2024-01-05", "100", "Food", "expense");
    add(&store, &user, "2024-01-06", "200", "Food", "expense");
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    let id = records[0].id.to_string();

    tx::handle(&store, &user, &tx_matches(&["rm", "--id", &id])).unwrap();
    let records: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    assert_eq!(records.len(), 1);

    // Unknown id is an error
    assert!(tx::handle(&store, &user, &tx_matches(&["rm", "--id", "9999"])).is_err());
}

#[test]
fn collections_are_namespaced_per_user() {
    let (store, user) = setup();
    let other = PublicUser {
        id: 2,
        name: "Binh".into(),
        email: "binh@example.com".into(),
    };
    add(&store, &user, "2024-01-05", "100", "Food", "expense");

    let mine: Vec<Transaction> = store.load(&keys::transactions(user.id)).unwrap();
    let theirs: Vec<Transaction> = store.load(&keys::transactions(other.id)).unwrap();
    assert_eq!(mine.len(), 1);
    assert!(theirs.is_empty());
}
