//! # Account flows
//!
//! Registration and login, written against the `AccountRepo` and
//! `AuthProvider` ports so the binary can swap storage and hashing freely.

use crate::error::{AppError, Result};
use crate::models::{Credentials, Registration, UserAccount};
use crate::traits::{AccountRepo, AuthProvider};
use chrono::Utc;
use uuid::Uuid;

/// Registers a new account and returns it.
///
/// The username check and the insert are two separate store calls. A store
/// that enforces uniqueness itself reports a lost race as `DuplicateUsername`.
pub async fn register(
    repo: &dyn AccountRepo,
    auth: &dyn AuthProvider,
    form: Registration,
) -> Result<UserAccount> {
    if form.password != form.confirm_password {
        return Err(AppError::PasswordMismatch);
    }
    if form.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required.".into()));
    }
    if form.password.is_empty() {
        return Err(AppError::Validation("Password is required.".into()));
    }

    if repo.find_by_username(&form.username).await?.is_some() {
        return Err(AppError::DuplicateUsername(form.username));
    }

    let account = UserAccount {
        id: Uuid::now_v7(),
        fullname: form.fullname,
        email: form.email,
        username: form.username,
        password_hash: auth.hash_password(&form.password).await?,
        created_at: Utc::now(),
    };
    repo.insert(account.clone()).await?;

    log::info!("registered account {}", account.username);
    Ok(account)
}

/// Checks credentials. Unknown users and wrong passwords fail identically.
pub async fn login(
    repo: &dyn AccountRepo,
    auth: &dyn AuthProvider,
    credentials: &Credentials,
) -> Result<UserAccount> {
    let Some(account) = repo.find_by_username(&credentials.username).await? else {
        return Err(AppError::AuthenticationFailure);
    };

    if auth.verify_password(&credentials.password, &account.password_hash).await {
        Ok(account)
    } else {
        Err(AppError::AuthenticationFailure)
    }
}
