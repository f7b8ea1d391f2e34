//! User repository for forumlist.

use chrono::{DateTime, Utc};

use super::user::{NewUser, Role, User};
use super::DbPool;
use crate::slug::slugify;
use crate::{ForumError, Result};

/// Repository for user lookups.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, slug, role, joined_on) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(slugify(&new_user.username))
        .bind(new_user.role.as_str())
        .bind(new_user.joined_on)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, slug, role, joined_on, is_active FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    /// Get an active user by ID.
    ///
    /// Deactivated accounts are treated as anonymous by the views.
    pub async fn get_active(&self, id: i64) -> Result<Option<User>> {
        Ok(self.get_by_id(id).await?.filter(|u| u.is_active))
    }

    /// Activate or deactivate an account.
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    slug: String,
    role: String,
    joined_on: DateTime<Utc>,
    is_active: bool,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            slug: self.slug,
            role: self.role.parse().unwrap_or(Role::Member),
            joined_on: self.joined_on,
            is_active: self.is_active,
        }
    }
}
