// Copyright (c) 2025 Thriftbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Identity and OTP handling over the users collection. Passwords are
//! stored as salted HMAC-SHA256 digests and verified in constant time;
//! the reset flow issues a 6-digit code valid for ten minutes, checked
//! lazily at verification.

use crate::models::{PublicUser, User};
use crate::store::{Store, keys};
use crate::token;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// OTP codes expire this long after issuance.
pub const OTP_TTL_MINUTES: i64 = 10;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("This email is already registered")]
    DuplicateEmail,
    // One message for unknown email and wrong password, so login
    // failures never reveal which emails are registered.
    #[error("Invalid email or password")]
    AuthenticationFailed,
    #[error("Not logged in. Run 'thriftbook login' first")]
    NotLoggedIn,
    #[error("Session expired. Run 'thriftbook login' again")]
    SessionExpired,
}

#[derive(Debug)]
pub struct OtpIssue {
    pub code: String,
    pub expiry: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: PublicUser,
    pub token: String,
}

pub fn gen_salt() -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt);
    hex::encode(salt)
}

pub fn hash_password(password: &str, salt_hex: &str) -> Result<String> {
    let salt = hex::decode(salt_hex).context("Invalid password salt")?;
    let mut mac =
        HmacSha256::new_from_slice(&salt).map_err(|_| anyhow::anyhow!("Invalid salt length"))?;
    mac.update(password.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a candidate password against the stored digest.
pub fn verify_password(password: &str, salt_hex: &str, hash_hex: &str) -> bool {
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(hash_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(&salt) else {
        return false;
    };
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Linear scan by email, matched exactly as stored.
pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|u| u.email == email)
}

pub fn register(store: &Store, name: &str, email: &str, password: &str) -> Result<User> {
    let mut users: Vec<User> = store.load(keys::USERS)?;
    if find_by_email(&users, email).is_some() {
        return Err(AuthError::DuplicateEmail.into());
    }
    let salt = gen_salt();
    let user = User {
        id: store.next_id(keys::USERS)?,
        name: name.to_string(),
        email: email.to_string(),
        password_hash: hash_password(password, &salt)?,
        password_salt: salt,
        otp: None,
        otp_expiry: None,
    };
    users.push(user.clone());
    store.save(keys::USERS, &users)?;
    Ok(user)
}

pub fn authenticate<'a>(
    users: &'a [User],
    email: &str,
    password: &str,
) -> Result<&'a User, AuthError> {
    let user = find_by_email(users, email).ok_or(AuthError::AuthenticationFailed)?;
    if verify_password(password, &user.password_salt, &user.password_hash) {
        Ok(user)
    } else {
        Err(AuthError::AuthenticationFailed)
    }
}

/// Issues a fresh 6-digit code, overwriting any prior one. Returns `None`
/// for an unknown email; callers show the same success message either way.
pub fn issue_otp(store: &Store, email: &str, now: DateTime<Utc>) -> Result<Option<OtpIssue>> {
    let mut users: Vec<User> = store.load(keys::USERS)?;
    let Some(user) = users.iter_mut().find(|u| u.email == email) else {
        return Ok(None);
    };
    let code = format!("{}", rand::thread_rng().gen_range(100_000..=999_999));
    let expiry = now + Duration::minutes(OTP_TTL_MINUTES);
    user.otp = Some(code.clone());
    user.otp_expiry = Some(expiry);
    store.save(keys::USERS, &users)?;
    Ok(Some(OtpIssue { code, expiry }))
}

/// True iff the user exists, the code matches, and the expiry is strictly
/// in the future. Side-effect free; safe to call repeatedly.
pub fn verify_otp(users: &[User], email: &str, code: &str, now: DateTime<Utc>) -> bool {
    let Some(user) = find_by_email(users, email) else {
        return false;
    };
    match (&user.otp, user.otp_expiry) {
        (Some(stored), Some(expiry)) => stored == code && expiry > now,
        _ => false,
    }
}

/// Revalidates the code exactly as [`verify_otp`]; on success overwrites
/// the password and clears the code, making it single-use. Returns false
/// without mutation otherwise.
pub fn consume_otp_and_reset_password(
    store: &Store,
    email: &str,
    code: &str,
    new_password: &str,
    now: DateTime<Utc>,
) -> Result<bool> {
    let mut users: Vec<User> = store.load(keys::USERS)?;
    if !verify_otp(&users, email, code, now) {
        return Ok(false);
    }
    let Some(user) = users.iter_mut().find(|u| u.email == email) else {
        return Ok(false);
    };
    let salt = gen_salt();
    user.password_hash = hash_password(new_password, &salt)?;
    user.password_salt = salt;
    user.otp = None;
    user.otp_expiry = None;
    store.save(keys::USERS, &users)?;
    Ok(true)
}

/// Password change for a signed-in user; the current password must verify.
pub fn change_password(store: &Store, user_id: i64, current: &str, new: &str) -> Result<()> {
    let mut users: Vec<User> = store.load(keys::USERS)?;
    let user = users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or(AuthError::AuthenticationFailed)?;
    if !verify_password(current, &user.password_salt, &user.password_hash) {
        return Err(AuthError::AuthenticationFailed.into());
    }
    let salt = gen_salt();
    user.password_hash = hash_password(new, &salt)?;
    user.password_salt = salt;
    store.save(keys::USERS, &users)?;
    Ok(())
}

/// Signing secret for session tokens, generated once and persisted.
pub fn token_secret(store: &Store) -> Result<Vec<u8>> {
    if let Some(raw) = store.get_raw(keys::TOKEN_SECRET)? {
        return hex::decode(raw.trim()).context("Corrupt token secret");
    }
    let mut secret = [0u8; 32];
    rand::thread_rng().fill(&mut secret);
    store.set_raw(keys::TOKEN_SECRET, &hex::encode(secret))?;
    Ok(secret.to_vec())
}

pub fn login(store: &Store, email: &str, password: &str, now: DateTime<Utc>) -> Result<PublicUser> {
    let users: Vec<User> = store.load(keys::USERS)?;
    let user = authenticate(&users, email, password)?;
    let secret = token_secret(store)?;
    let session = Session {
        user: PublicUser::from(user),
        token: token::issue(&secret, user, now)?,
    };
    store.save_one(keys::SESSION, &session)?;
    Ok(session.user)
}

pub fn logout(store: &Store) -> Result<()> {
    store.remove(keys::SESSION)
}

/// Resolves the signed-in user, verifying the session token's signature
/// and expiry. Data commands call this before touching any collection.
pub fn require_session(store: &Store, now: DateTime<Utc>) -> Result<PublicUser> {
    let session: Session = store
        .load_one(keys::SESSION)?
        .ok_or(AuthError::NotLoggedIn)?;
    let secret = token_secret(store)?;
    match token::verify(&secret, &session.token, now) {
        Some(claims) if claims.sub == session.user.id => Ok(session.user),
        _ => Err(AuthError::SessionExpired.into()),
    }
}

/// Stand-in delivery channel for reset codes; a real deployment would
/// plug in an SMTP sender here.
pub fn mock_send_otp_email(email: &str, code: &str) {
    println!("[mock email] Password reset code for {}: {}", email, code);
}
