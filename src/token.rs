// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Signed session tokens: a base64 JSON claims payload plus an
//! HMAC-SHA256 signature over it. Expiry is checked lazily at
//! verification, never by a timer.

use crate::models::User;
use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sessions live for seven days.
pub const SESSION_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

fn sign(secret: &[u8], payload: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| anyhow::anyhow!("Invalid token secret length"))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn issue(secret: &[u8], user: &User, now: DateTime<Utc>) -> Result<String> {
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        iat: now.timestamp_millis(),
        exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp_millis(),
    };
    let payload = STANDARD.encode(serde_json::to_string(&claims)?);
    let sig = sign(secret, &payload)?;
    Ok(format!("{}.{}", payload, sig))
}

/// Returns the claims iff the signature matches (constant-time) and the
/// token has not expired.
pub fn verify(secret: &[u8], token: &str, now: DateTime<Utc>) -> Option<Claims> {
    let (payload, sig_hex) = token.split_once('.')?;
    let expected = hex::decode(sig_hex).ok()?;
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&expected).ok()?;

    let raw = STANDARD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&raw).ok()?;
    if claims.exp <= now.timestamp_millis() {
        return None;
    }
    Some(claims)
}
