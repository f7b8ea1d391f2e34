//! Forum repository for forumlist.
//!
//! This module provides tree-aware operations for forums in the database.

use super::types::{Forum, ForumKind, NewForum};
use crate::db::DbPool;
use crate::slug::slugify;
use crate::{ForumError, Result};

const FORUM_COLUMNS: &str =
    "id, parent_id, kind, name, slug, description, redirect_url, lft, rght, level";

/// Repository for forum tree operations.
pub struct ForumRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ForumRepository<'a> {
    /// Create a new ForumRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new forum as the last child of its parent, or as the last
    /// top-level node when it has no parent.
    ///
    /// Nodes to the right of the insertion point are shifted by two so the
    /// nested set stays consistent.
    pub async fn create(&self, new_forum: &NewForum) -> Result<Forum> {
        let mut tx = self.pool.begin().await?;

        let (lft, level) = match new_forum.parent_id {
            Some(parent_id) => {
                let parent: Option<(i64, i64)> =
                    sqlx::query_as("SELECT rght, level FROM forums WHERE id = ?")
                        .bind(parent_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                let (parent_rght, parent_level) =
                    parent.ok_or_else(|| ForumError::NotFound("parent forum".to_string()))?;

                sqlx::query("UPDATE forums SET rght = rght + 2 WHERE rght >= ?")
                    .bind(parent_rght)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("UPDATE forums SET lft = lft + 2 WHERE lft > ?")
                    .bind(parent_rght)
                    .execute(&mut *tx)
                    .await?;

                (parent_rght, parent_level + 1)
            }
            None => {
                let max_rght: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(rght), 0) FROM forums")
                    .fetch_one(&mut *tx)
                    .await?;
                (max_rght + 1, 0)
            }
        };

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO forums (parent_id, kind, name, slug, description, redirect_url, lft, rght, level)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(new_forum.parent_id)
        .bind(new_forum.kind.as_str())
        .bind(&new_forum.name)
        .bind(slugify(&new_forum.name))
        .bind(&new_forum.description)
        .bind(&new_forum.redirect_url)
        .bind(lft)
        .bind(lft + 1)
        .bind(level)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("forum".to_string()))
    }

    /// Get a forum by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Forum>> {
        let query = format!("SELECT {FORUM_COLUMNS} FROM forums WHERE id = ?");
        let row: Option<ForumRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(ForumRow::into_forum))
    }

    /// Ancestors of a forum followed by the forum itself, root first.
    pub async fn path(&self, forum: &Forum) -> Result<Vec<Forum>> {
        let query = format!(
            "SELECT {FORUM_COLUMNS} FROM forums WHERE lft <= ? AND rght >= ? ORDER BY lft ASC"
        );
        let rows: Vec<ForumRow> = sqlx::query_as(&query)
            .bind(forum.lft)
            .bind(forum.rght)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(ForumRow::into_forum).collect())
    }

    /// Direct children of a forum in tree order.
    pub async fn children(&self, forum: &Forum) -> Result<Vec<Forum>> {
        if !forum.has_children() {
            return Ok(Vec::new());
        }

        let query =
            format!("SELECT {FORUM_COLUMNS} FROM forums WHERE parent_id = ? ORDER BY lft ASC");
        let rows: Vec<ForumRow> = sqlx::query_as(&query)
            .bind(forum.id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(ForumRow::into_forum).collect())
    }
}

#[derive(sqlx::FromRow)]
struct ForumRow {
    id: i64,
    parent_id: Option<i64>,
    kind: String,
    name: String,
    slug: String,
    description: Option<String>,
    redirect_url: Option<String>,
    lft: i64,
    rght: i64,
    level: i64,
}

impl ForumRow {
    fn into_forum(self) -> Forum {
        Forum {
            id: self.id,
            parent_id: self.parent_id,
            kind: self.kind.parse().unwrap_or(ForumKind::Forum),
            name: self.name,
            slug: self.slug,
            description: self.description,
            redirect_url: self.redirect_url,
            lft: self.lft,
            rght: self.rght,
            level: self.level,
        }
    }
}
