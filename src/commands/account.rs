// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use crate::store::Store;
use crate::utils::get_dev_mode;
use anyhow::Result;
use chrono::Utc;

pub fn register(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let confirm = sub.get_one::<String>("confirm-password").unwrap();
    if password != confirm {
        return Err(anyhow::anyhow!("Passwords do not match"));
    }
    let user = auth::register(store, name, email, password)?;
    println!("Registered '{}' <{}>", user.name, user.email);
    let signed_in = auth::login(store, email, password, Utc::now())?;
    println!("Logged in as {}", signed_in.email);
    Ok(())
}

pub fn login(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let user = auth::login(store, email, password, Utc::now())?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub fn logout(store: &Store) -> Result<()> {
    auth::logout(store)?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(store: &Store) -> Result<()> {
    let user = auth::require_session(store, Utc::now())?;
    println!("{} <{}>", user.name, user.email);
    Ok(())
}

pub fn passwd(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = auth::require_session(store, Utc::now())?;
    let current = sub.get_one::<String>("current").unwrap();
    let new = sub.get_one::<String>("new").unwrap();
    auth::change_password(store, user.id, current, new)?;
    println!("Password updated");
    Ok(())
}

pub fn forgot_password(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    if let Some(issue) = auth::issue_otp(store, email, Utc::now())? {
        auth::mock_send_otp_email(email, &issue.code);
        if get_dev_mode(store)? {
            println!("Reset code (dev): {}", issue.code);
        }
    }
    // Same message whether or not the email is registered.
    println!("If that email is registered, a reset code has been sent to it.");
    Ok(())
}

pub fn reset_password(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let otp = sub.get_one::<String>("otp").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    let confirm = sub.get_one::<String>("confirm-password").unwrap();
    if password != confirm {
        return Err(anyhow::anyhow!("Passwords do not match"));
    }
    if !auth::consume_otp_and_reset_password(store, email, otp, password, Utc::now())? {
        return Err(anyhow::anyhow!("Invalid or expired reset code"));
    }
    println!("Password has been reset. You can log in now.");
    Ok(())
}
