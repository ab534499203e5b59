//! Credential storage backed by the `user` table

use bcrypt::BcryptError;
use sqlx::SqlitePool;

use crate::auth::models::{User, UserId};
use crate::error::{Error, Result};

/// Persists usernames with bcrypt password hashes
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
    cost: u32,
}

impl CredentialStore {
    /// Create a store hashing with bcrypt's default cost
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_cost(pool, bcrypt::DEFAULT_COST)
    }

    /// Create a store with an explicit bcrypt cost
    pub fn with_cost(pool: SqlitePool, cost: u32) -> Self {
        Self { pool, cost }
    }

    /// Register a new user and return its id
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId> {
        if username.is_empty() {
            return Err(Error::Validation("Username is required.".to_string()));
        }
        if password.is_empty() {
            return Err(Error::Validation("Password is required.".to_string()));
        }

        let hash = hash_password(password, self.cost).await?;

        // The UNIQUE constraint decides races between concurrent registrations
        let result = sqlx::query("INSERT INTO user (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(&hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                tracing::info!("Registered user {} (id {})", username, id);
                Ok(id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!("Registration rejected, {} already exists", username);
                Err(Error::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair and return the matching user
    pub async fn verify(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

        if !verify_password(password, &user.password_hash).await? {
            tracing::debug!("Rejected password for {}", username);
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }

    /// Look up a user by id
    pub async fn get(&self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Look up a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// Hash off the async runtime, refusing passwords bcrypt would truncate
async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();
    let hashed =
        tokio::task::spawn_blocking(move || bcrypt::non_truncating_hash(password, cost)).await?;

    match hashed {
        Ok(hash) => Ok(hash),
        Err(BcryptError::Truncation(_)) => {
            Err(Error::Validation("Password is too long.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Compare against a stored hash off the async runtime
async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    let checked =
        tokio::task::spawn_blocking(move || bcrypt::non_truncating_verify(password, &hash))
            .await?;

    // Over-long input and malformed stored hashes are mismatches
    Ok(checked.unwrap_or(false))
}
