use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::session::errors::UserStoreError;
use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::UserId;
use crate::domain::session::models::UserRecord;
use crate::domain::session::ports::UserStore;

/// Postgres-backed user store adapter.
///
/// Queries are runtime-checked so the crate builds without a live database.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    is_active: bool,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| UserStoreError::Database(format!("Invalid stored email: {}", e)))?;

        Ok(UserRecord {
            id: UserId(row.id),
            email,
            password_hash: row.password_hash,
            is_active: row.is_active,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Database(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Database(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }
}
