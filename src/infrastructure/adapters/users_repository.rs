//! SQLite-backed admin users

use crate::domain::users::{AdminRole, AdminUser};
use crate::shared::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct AdminUserRow {
    id: String,
    username: String,
    password_digest: String,
    salt: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl AdminUserRow {
    fn into_domain(self) -> AppResult<AdminUser> {
        let role: AdminRole = self.role.parse().map_err(AppError::Internal)?;
        Ok(AdminUser {
            id: self.id,
            username: self.username,
            password_digest: self.password_digest,
            salt: self.salt,
            role,
            created_at: self.created_at,
        })
    }
}

/// Repository for backoffice accounts
#[derive(Clone)]
pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, user: &AdminUser) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO admin_users (id, username, password_digest, salt, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_digest)
        .bind(&user.salt)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::Conflict(
                format!("username already exists: {}", user.username),
            )),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<AdminUser>> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, username, password_digest, salt, role, created_at FROM admin_users \
             WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(AdminUserRow::into_domain).transpose()
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
