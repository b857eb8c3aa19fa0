// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use thriftbook::commands::account;
use thriftbook::models::User;
use thriftbook::store::{Store, keys};
use thriftbook::{auth, cli};

fn setup() -> Store {
    Store::open_in_memory().unwrap()
}

fn account_matches(name: &str, args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["thriftbook", name];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some((found, m)) = matches.subcommand() else {
        panic!("no subcommand");
    };
    assert_eq!(found, name);
    m.clone()
}

fn register(store: &Store, email: &str, password: &str) {
    let m = account_matches(
        "register",
        &[
            "--name",
            "An",
            "--email",
            email,
            "--password",
            password,
            "--confirm-password",
            password,
        ],
    );
    account::register(store, &m).unwrap();
}

#[test]
fn register_signs_the_user_in() {
    let store = setup();
    register(&store, "an@example.com", "pw");
    let user = auth::require_session(&store, Utc::now()).unwrap();
    assert_eq!(user.email, "an@example.com");
}

#[test]
fn register_rejects_mismatched_confirmation() {
    let store = setup();
    let m = account_matches(
        "register",
        &[
            "--name",
            "An",
            "--email",
            "an@example.com",
            "--password",
            "pw",
            "--confirm-password",
            "other",
        ],
    );
    let err = account::register(&store, &m).unwrap_err();
    assert!(err.to_string().contains("do not match"));
}

#[test]
fn forgot_password_persists_a_usable_code() {
    let store = setup();
    register(&store, "an@example.com", "old");

    let m = account_matches("forgot-password", &["--email", "an@example.com"]);
    account::forgot_password(&store, &m).unwrap();

    // The command hands the code to the mock sender; it is also persisted
    let users: Vec<User> = store.load(keys::USERS).unwrap();
    let code = users[0].otp.clone().unwrap();
    assert_eq!(code.len(), 6);

    let m = account_matches(
        "reset-password",
        &[
            "--email",
            "an@example.com",
            "--otp",
            &code,
            "--password",
            "new",
            "--confirm-password",
            "new",
        ],
    );
    account::reset_password(&store, &m).unwrap();

    let users: Vec<User> = store.load(keys::USERS).unwrap();
    assert!(auth::authenticate(&users, "an@example.com", "new").is_ok());
    assert!(auth::authenticate(&users, "an@example.com", "old").is_err());
}

#[test]
fn forgot_password_for_unknown_email_still_succeeds() {
    let store = setup();
    let m = account_matches("forgot-password", &["--email", "ghost@example.com"]);
    account::forgot_password(&store, &m).unwrap();
}

#[test]
fn reset_password_rejects_a_wrong_code() {
    let store = setup();
    register(&store, "an@example.com", "old");
    let m = account_matches("forgot-password", &["--email", "an@example.com"]);
    account::forgot_password(&store, &m).unwrap();

    let m = account_matches(
        "reset-password",
        &[
            "--email",
            "an@example.com",
            "--otp",
            "000000",
            "--password",
            "new",
            "--confirm-password",
            "new",
        ],
    );
    let err = account::reset_password(&store, &m).unwrap_err();
    assert!(err.to_string().contains("Invalid or expired reset code"));
}

#[test]
fn passwd_changes_the_signed_in_users_password() {
    let store = setup();
    register(&store, "an@example.com", "old");

    let m = account_matches("passwd", &["--current", "old", "--new", "new"]);
    account::passwd(&store, &m).unwrap();

    let users: Vec<User> = store.load(keys::USERS).unwrap();
    assert!(auth::authenticate(&users, "an@example.com", "new").is_ok());
}
