//! Thread repository for forumlist.

use chrono::{DateTime, Utc};

use super::thread::{NewThread, Thread, ThreadWeight};
use crate::db::DbPool;
use crate::{ForumError, Result};

pub(super) const THREAD_COLUMNS: &str = "id, forum_id, label_id, title, slug, weight, starter_id, \
     starter_name, replies, started_on, last_post_on, last_poster_name, is_moderated, is_hidden, \
     is_closed, has_reported_posts, has_moderated_posts";

/// Repository for thread rows.
pub struct ThreadRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ThreadRepository<'a> {
    /// Create a new ThreadRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new thread.
    pub async fn create(&self, new_thread: &NewThread) -> Result<Thread> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO threads (forum_id, label_id, title, slug, weight, starter_id, starter_name,
                                  replies, started_on, last_post_on, last_poster_name,
                                  is_moderated, is_hidden, has_reported_posts, has_moderated_posts)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(new_thread.forum_id)
        .bind(new_thread.label_id)
        .bind(&new_thread.title)
        .bind(new_thread.slug())
        .bind(new_thread.weight.as_i64())
        .bind(new_thread.starter_id)
        .bind(&new_thread.starter_name)
        .bind(new_thread.replies)
        .bind(new_thread.started_on)
        .bind(new_thread.last_post_on)
        .bind(&new_thread.starter_name)
        .bind(new_thread.is_moderated)
        .bind(new_thread.is_hidden)
        .bind(new_thread.has_reported_posts)
        .bind(new_thread.has_moderated_posts)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("thread".to_string()))
    }

    /// Get a thread by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Thread>> {
        let query = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id = ?");
        let row: Option<ThreadRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(ThreadRow::into_thread))
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ThreadRow {
    id: i64,
    forum_id: i64,
    label_id: Option<i64>,
    title: String,
    slug: String,
    weight: i64,
    starter_id: Option<i64>,
    starter_name: String,
    replies: i64,
    started_on: DateTime<Utc>,
    last_post_on: DateTime<Utc>,
    last_poster_name: String,
    is_moderated: bool,
    is_hidden: bool,
    is_closed: bool,
    has_reported_posts: bool,
    has_moderated_posts: bool,
}

impl ThreadRow {
    pub(super) fn into_thread(self) -> Thread {
        Thread {
            id: self.id,
            forum_id: self.forum_id,
            label_id: self.label_id,
            title: self.title,
            slug: self.slug,
            weight: ThreadWeight::from_i64(self.weight),
            starter_id: self.starter_id,
            starter_name: self.starter_name,
            replies: self.replies,
            started_on: self.started_on,
            last_post_on: self.last_post_on,
            last_poster_name: self.last_poster_name,
            is_moderated: self.is_moderated,
            is_hidden: self.is_hidden,
            is_closed: self.is_closed,
            has_reported_posts: self.has_reported_posts,
            has_moderated_posts: self.has_moderated_posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::forum::{ForumRepository, NewForum};
    use crate::Database;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let forum = ForumRepository::new(db.pool())
            .create(&NewForum::new("General"))
            .await
            .unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice"))
            .await
            .unwrap();
        (db, forum.id, user.id)
    }

    #[tokio::test]
    async fn test_create_thread() {
        let (db, forum_id, user_id) = setup().await;
        let repo = ThreadRepository::new(db.pool());

        let thread = repo
            .create(
                &NewThread::new(forum_id, "First Thread", user_id, "alice")
                    .with_weight(ThreadWeight::Pinned)
                    .moderated(),
            )
            .await
            .unwrap();

        assert_eq!(thread.forum_id, forum_id);
        assert_eq!(thread.title, "First Thread");
        assert_eq!(thread.slug, "first-thread");
        assert_eq!(thread.weight, ThreadWeight::Pinned);
        assert_eq!(thread.starter_id, Some(user_id));
        assert_eq!(thread.last_poster_name, "alice");
        assert!(thread.is_moderated);
        assert!(!thread.is_hidden);
        assert!(!thread.is_closed);
    }

    #[tokio::test]
    async fn test_timestamps_round_trip() {
        let (db, forum_id, user_id) = setup().await;
        let repo = ThreadRepository::new(db.pool());

        let started = DateTime::parse_from_rfc3339("2024-01-10T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let thread = repo
            .create(&NewThread::new(forum_id, "Dated", user_id, "alice").started_on(started))
            .await
            .unwrap();

        assert_eq!(thread.started_on, started);
        assert_eq!(thread.last_post_on, started);
    }
}
