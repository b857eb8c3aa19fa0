// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("io.thriftbook", "Thriftbook", "thriftbook"));

/// Fixed keys and per-user key builders. All user data lives under a
/// `user:{id}:` namespace so the store never mixes identities.
pub mod keys {
    pub const USERS: &str = "users";
    pub const SESSION: &str = "session";
    pub const TOKEN_SECRET: &str = "settings:token_secret";
    pub const DEV_MODE: &str = "settings:dev_mode";
    pub const RECORD_SEQ: &str = "records";

    pub fn transactions(user_id: i64) -> String {
        format!("user:{}:transactions", user_id)
    }
    pub fn budgets(user_id: i64) -> String {
        format!("user:{}:budgets", user_id)
    }
    pub fn loans(user_id: i64) -> String {
        format!("user:{}:loans", user_id)
    }
    pub fn lendings(user_id: i64) -> String {
        format!("user:{}:lendings", user_id)
    }
    pub fn savings(user_id: i64) -> String {
        format!("user:{}:savings", user_id)
    }
}

pub fn store_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("thriftbook.sqlite"))
}

/// String-keyed blob store. Each key holds one JSON-encoded collection (or a
/// single JSON value for snapshots like the session). The adapter only
/// serializes and deserializes; validation belongs to the mutation paths.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_or_init() -> Result<Self> {
        let path = store_path()?;
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).with_context(|| format!("Open store at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }

    /// Load a named collection. A missing key is an empty collection.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt collection under key '{}'", key)),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a named collection wholesale. Every mutation is a single
    /// load-modify-save cycle; there is no partial write.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)
            .with_context(|| format!("Serialize collection for key '{}'", key))?;
        self.set_raw(key, &raw)
    }

    /// Load a single JSON value (session snapshot, settings entry).
    pub fn load_one<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let v = serde_json::from_str(&raw)
                    .with_context(|| format!("Corrupt value under key '{}'", key))?;
                Ok(Some(v))
            }
            None => Ok(None),
        }
    }

    pub fn save_one<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Serialize value for key '{}'", key))?;
        self.set_raw(key, &raw)
    }

    /// Next value of a persisted monotonic counter. Record ids come from
    /// here rather than wall-clock milliseconds, which can collide under
    /// rapid successive creation.
    pub fn next_id(&self, counter: &str) -> Result<i64> {
        let key = format!("seq:{}", counter);
        let current: i64 = match self.get_raw(&key)? {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Corrupt counter under key '{}'", key))?,
            None => 0,
        };
        let next = current + 1;
        self.set_raw(&key, &next.to_string())?;
        Ok(next)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
