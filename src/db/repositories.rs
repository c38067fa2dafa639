//! User store: trait seam for the auth service plus the PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::DbPool;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub hash: String,
    pub hashed_rt: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persistence capabilities the auth service needs from a user store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. An email already in the store is `CredentialsTaken`.
    async fn create(&self, email: &str, nickname: &str, hash: &str) -> AppResult<UserRow>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRow>>;

    /// Overwrite the stored refresh-token hash. Errors if the user does not exist.
    async fn update_rt_hash(&self, id: Uuid, hashed_rt: &str) -> AppResult<()>;
}

/// `UserStore` backed by the `users` table.
#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, email: &str, nickname: &str, hash: &str) -> AppResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, nickname, hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, nickname, hash, hashed_rt, created_at
            "#,
        )
        .bind(email)
        .bind(nickname)
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::CredentialsTaken)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, nickname, hash, hashed_rt, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_rt_hash(&self, id: Uuid, hashed_rt: &str) -> AppResult<()> {
        let r = sqlx::query("UPDATE users SET hashed_rt = $1 WHERE id = $2")
            .bind(hashed_rt)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if r.rows_affected() == 0 {
            return Err(AppError::Internal(anyhow::anyhow!(
                "user {} not found",
                id
            )));
        }
        Ok(())
    }
}
