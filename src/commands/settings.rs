// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{self, Store};
use crate::utils::{get_dev_mode, set_dev_mode};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dev-mode", sub)) => {
            let value = sub.get_one::<String>("value").unwrap().to_lowercase();
            match value.as_str() {
                "on" => set_dev_mode(store, true)?,
                "off" => set_dev_mode(store, false)?,
                other => {
                    return Err(anyhow::anyhow!(
                        "Invalid value '{}', expected on|off",
                        other
                    ));
                }
            }
            println!("Dev mode {}", value);
        }
        Some(("show", _)) => {
            println!("Store: {}", store::store_path()?.display());
            println!(
                "Dev mode: {}",
                if get_dev_mode(store)? { "on" } else { "off" }
            );
        }
        _ => {}
    }
    Ok(())
}
