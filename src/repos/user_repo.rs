/*
 * Responsibility
 * - read-only user lookups the gates depend on (by username, by id)
 * - UserStore trait so gates never see sqlx directly
 * - PgUserStore: SQLx implementation over users JOIN roles
 */
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

/// A stored account as seen by the gates. The password hash is never loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub role_name: String,
}

/// Lookup-by-criteria interface onto user storage.
///
/// Returns:
/// - `Ok(Some(_))` => found
/// - `Ok(None)`    => no such user
/// - `Err(_)`      => storage failure (caller decides the response)
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn find_by_id(&self, user_id: i64) -> RepoResult<Option<User>>;
}

/// Bound a single lookup so a hung backend cannot hang the request.
pub async fn with_timeout<T, F>(limit: Duration, lookup: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    tokio::time::timeout(limit, lookup)
        .await
        .map_err(|_| RepoError::Timeout(limit))?
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.username, r.role_name
            FROM users u
            JOIN roles r ON r.role_id = u.role_id
            WHERE u.username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, user_id: i64) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.username, r.role_name
            FROM users u
            JOIN roles r ON r.role_id = u.role_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}
