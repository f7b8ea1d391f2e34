//! Thread labels.
//!
//! Labels are managed elsewhere. This module only reads the labels attached
//! to a forum, plus the inserts used to seed them.

use serde::Serialize;

use crate::db::DbPool;
use crate::slug::slugify;
use crate::{ForumError, Result};

/// Label that can be put on threads of the forums it is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Unique label ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL slug, doubles as the filter key.
    pub slug: String,
    /// CSS class used when rendering the label.
    pub css_class: Option<String>,
}

/// Data for creating a new label.
#[derive(Debug, Clone)]
pub struct NewLabel {
    /// Display name.
    pub name: String,
    /// CSS class.
    pub css_class: Option<String>,
}

impl NewLabel {
    /// Create a new label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css_class: None,
        }
    }

    /// Set the CSS class.
    pub fn with_css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }
}

/// Repository for label lookups.
pub struct LabelRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> LabelRepository<'a> {
    /// Create a new LabelRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new label.
    pub async fn create(&self, new_label: &NewLabel) -> Result<Label> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO labels (name, slug, css_class) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_label.name)
        .bind(slugify(&new_label.name))
        .bind(&new_label.css_class)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("label".to_string()))
    }

    /// Get a label by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Label>> {
        let row: Option<LabelRow> =
            sqlx::query_as("SELECT id, name, slug, css_class FROM labels WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row.map(LabelRow::into_label))
    }

    /// Make a label usable in a forum.
    pub async fn attach(&self, forum_id: i64, label_id: i64) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO forum_labels (forum_id, label_id) VALUES (?, ?)")
            .bind(forum_id)
            .bind(label_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Labels attached to a forum, ordered by name.
    pub async fn get_forum_labels(&self, forum_id: i64) -> Result<Vec<Label>> {
        let rows: Vec<LabelRow> = sqlx::query_as(
            "SELECT l.id, l.name, l.slug, l.css_class
             FROM labels l
             JOIN forum_labels fl ON fl.label_id = l.id
             WHERE fl.forum_id = ?
             ORDER BY l.name ASC, l.id ASC",
        )
        .bind(forum_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(LabelRow::into_label).collect())
    }
}

#[derive(sqlx::FromRow)]
struct LabelRow {
    id: i64,
    name: String,
    slug: String,
    css_class: Option<String>,
}

impl LabelRow {
    fn into_label(self) -> Label {
        Label {
            id: self.id,
            name: self.name,
            slug: self.slug,
            css_class: self.css_class,
        }
    }
}
