// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thriftbook::models::{Loan, Transaction, TxKind};
use thriftbook::store::{Store, keys};

#[test]
fn missing_key_loads_as_empty_collection() {
    let store = Store::open_in_memory().unwrap();
    let records: Vec<Transaction> = store.load("nothing-here").unwrap();
    assert!(records.is_empty());
}

#[test]
fn save_load_roundtrip_preserves_records() {
    let store = Store::open_in_memory().unwrap();
    let records = vec![Transaction {
        id: 1,
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        amount: Decimal::new(12550, 2),
        category: "Food".into(),
        kind: TxKind::Expense,
        description: Some("lunch".into()),
        payment_method: None,
    }];
    store.save(keys::transactions(1).as_str(), &records).unwrap();

    let loaded: Vec<Transaction> = store.load(&keys::transactions(1)).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].amount, Decimal::new(12550, 2));
    assert_eq!(loaded[0].description.as_deref(), Some("lunch"));
    assert!(loaded[0].payment_method.is_none());
}

#[test]
fn collections_use_the_stores_record_shape() {
    let store = Store::open_in_memory().unwrap();
    let loans = vec![Loan {
        id: 1,
        creditor: "Bank".into(),
        description: None,
        amount: Decimal::from(1000),
        interest: Decimal::from(5),
        loan_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        is_paid: false,
    }];
    store.save(keys::loans(1).as_str(), &loans).unwrap();

    let raw = store.get_raw(&keys::loans(1)).unwrap().unwrap();
    // camelCase field names, as the persisted collections have always used
    assert!(raw.contains("\"isPaid\""));
    assert!(raw.contains("\"dueDate\""));
    assert!(raw.contains("\"loanDate\""));
}

#[test]
fn overwrite_replaces_the_whole_collection() {
    let store = Store::open_in_memory().unwrap();
    store.set_raw("k", "[1,2,3]").unwrap();
    store.set_raw("k", "[4]").unwrap();
    assert_eq!(store.get_raw("k").unwrap().unwrap(), "[4]");

    store.remove("k").unwrap();
    assert!(store.get_raw("k").unwrap().is_none());
}

#[test]
fn next_id_is_strictly_increasing() {
    let store = Store::open_in_memory().unwrap();
    let a = store.next_id(keys::RECORD_SEQ).unwrap();
    let b = store.next_id(keys::RECORD_SEQ).unwrap();
    let c = store.next_id(keys::RECORD_SEQ).unwrap();
    assert!(a < b && b < c);
    // Separate counters do not interfere
    let u = store.next_id(keys::USERS).unwrap();
    assert_eq!(u, 1);
}

#[test]
fn counters_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thriftbook.sqlite");
    {
        let store = Store::open_at(&path).unwrap();
        assert_eq!(store.next_id(keys::RECORD_SEQ).unwrap(), 1);
        assert_eq!(store.next_id(keys::RECORD_SEQ).unwrap(), 2);
    }
    let store = Store::open_at(&path).unwrap();
    assert_eq!(store.next_id(keys::RECORD_SEQ).unwrap(), 3);
}
