//! # fw-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `fw-core` account model.

use async_trait::async_trait;
use fw_core::error::{AppError, Result};
use fw_core::models::UserAccount;
use fw_core::traits::AccountRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS user_accounts (
    id            BLOB PRIMARY KEY,
    fullname      TEXT NOT NULL,
    email         TEXT NOT NULL,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
)";

pub struct SqliteAccountRepo {
    pool: SqlitePool,
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

fn db_error(err: sqlx::Error) -> AppError {
    AppError::Internal(format!("database error: {err}"))
}

fn row_to_account(row: &SqliteRow) -> UserAccount {
    UserAccount {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        fullname: row.get("fullname"),
        email: row.get("email"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

impl SqliteAccountRepo {
    /// Opens (creating if needed) the database at `url` and ensures the schema exists.
    ///
    /// In-memory databases are pinned to one connection; each SQLite memory
    /// connection is otherwise its own empty database.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_error)?
            .create_if_missing(true);
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(db_error)?;

        sqlx::query(SCHEMA).execute(&pool).await.map_err(db_error)?;
        log::debug!("account store ready at {url}");

        Ok(Self { pool })
    }
}

#[async_trait]
impl AccountRepo for SqliteAccountRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        let row = sqlx::query(
            "SELECT id, fullname, email, username, password_hash, created_at FROM user_accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.as_ref().map(row_to_account))
    }

    /// The UNIQUE index catches a duplicate that raced past the caller's check.
    async fn insert(&self, account: UserAccount) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO user_accounts (id, fullname, email, username, password_hash, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(account.id))
        .bind(&account.fullname)
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::DuplicateUsername(account.username))
            }
            Err(e) => Err(db_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(username: &str) -> UserAccount {
        UserAccount {
            id: Uuid::now_v7(),
            fullname: "Jane Doe".into(),
            email: "jane@example.com".into(),
            username: username.into(),
            password_hash: "$argon2id$v=19$stub".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_username() {
        let repo = SqliteAccountRepo::new("sqlite::memory:").await.unwrap();
        let jane = account("jane");
        repo.insert(jane.clone()).await.expect("Failed to insert account");

        let found = repo.find_by_username("jane").await.unwrap().unwrap();
        assert_eq!(found.id, jane.id);
        assert_eq!(found.email, "jane@example.com");
        assert_eq!(found.password_hash, jane.password_hash);

        assert!(repo.find_by_username("JANE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unique_index_rejects_second_insert() {
        let repo = SqliteAccountRepo::new("sqlite::memory:").await.unwrap();
        repo.insert(account("jane")).await.unwrap();

        let err = repo.insert(account("jane")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUsername(name) if name == "jane"));
    }
}
