// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use thriftbook::{auth, cli, commands, store::Store};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = Store::open_or_init()?;

    match matches.subcommand() {
        Some(("register", sub)) => commands::account::register(&store, sub)?,
        Some(("login", sub)) => commands::account::login(&store, sub)?,
        Some(("logout", _)) => commands::account::logout(&store)?,
        Some(("whoami", _)) => commands::account::whoami(&store)?,
        Some(("passwd", sub)) => commands::account::passwd(&store, sub)?,
        Some(("forgot-password", sub)) => commands::account::forgot_password(&store, sub)?,
        Some(("reset-password", sub)) => commands::account::reset_password(&store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&store, sub)?,
        Some((cmd, sub)) => {
            // Everything else touches user data and needs a session.
            let user = auth::require_session(&store, Utc::now())?;
            match cmd {
                "tx" => commands::tx::handle(&store, &user, sub)?,
                "budget" => commands::budgets::handle(&store, &user, sub)?,
                "loan" => commands::loans::handle(&store, &user, sub)?,
                "lending" => commands::lendings::handle(&store, &user, sub)?,
                "saving" => commands::savings::handle(&store, &user, sub)?,
                "report" => commands::reports::handle(&store, &user, sub)?,
                "export" => commands::exporter::handle(&store, &user, sub)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
