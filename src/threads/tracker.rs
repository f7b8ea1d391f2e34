//! Thread read tracking.
//!
//! Only reads are stored. A thread is unread when it has activity newer than
//! every reason to consider it read: the read cutoff, the user's join date,
//! the last "mark forum read" and the user's last visit of the thread.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::thread::Thread;
use crate::db::{DbPool, Viewer};
use crate::Result;

/// Read state lookups and updates for signed-in users.
pub struct ReadTracker<'a> {
    pool: &'a DbPool,
    cutoff_days: u32,
}

impl<'a> ReadTracker<'a> {
    /// Create a tracker. Activity older than `cutoff_days` always counts as read.
    pub fn new(pool: &'a DbPool, cutoff_days: u32) -> Self {
        Self { pool, cutoff_days }
    }

    /// Oldest activity that can still be unread.
    pub fn cutoff(&self) -> DateTime<Utc> {
        Utc::now()
            .checked_sub_signed(Duration::days(i64::from(self.cutoff_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Read flags for `threads` of one forum, in the same order.
    pub async fn read_states(
        &self,
        viewer: &Viewer,
        forum_id: i64,
        threads: &[Thread],
    ) -> Result<Vec<bool>> {
        let Some(user) = viewer.user() else {
            return Ok(vec![true; threads.len()]);
        };
        if threads.is_empty() {
            return Ok(Vec::new());
        }

        let cleared_on: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT last_cleared_on FROM forum_reads WHERE user_id = ? AND forum_id = ?",
        )
        .bind(user.id)
        .bind(forum_id)
        .fetch_optional(self.pool)
        .await?;

        let mut floor = self.cutoff().max(user.joined_on);
        if let Some(cleared_on) = cleared_on {
            floor = floor.max(cleared_on);
        }

        let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT thread_id, last_read_on FROM thread_reads WHERE user_id = ",
        );
        query.push_bind(user.id);
        query.push(" AND thread_id IN (");
        let mut separated = query.separated(", ");
        for thread in threads {
            separated.push_bind(thread.id);
        }
        separated.push_unseparated(")");

        let reads: HashMap<i64, DateTime<Utc>> = query
            .build_query_as::<(i64, DateTime<Utc>)>()
            .fetch_all(self.pool)
            .await?
            .into_iter()
            .collect();

        Ok(threads
            .iter()
            .map(|thread| {
                thread.last_post_on <= floor
                    || reads
                        .get(&thread.id)
                        .is_some_and(|read_on| *read_on >= thread.last_post_on)
            })
            .collect())
    }

    /// Record that a user has read a thread up to `read_on`.
    pub async fn mark_thread_read(
        &self,
        user_id: i64,
        thread: &Thread,
        read_on: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO thread_reads (user_id, thread_id, forum_id, last_read_on)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id, thread_id) DO UPDATE SET last_read_on = excluded.last_read_on",
        )
        .bind(user_id)
        .bind(thread.id)
        .bind(thread.forum_id)
        .bind(read_on)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Mark every thread in a forum read as of `cleared_on`.
    ///
    /// Per-thread records of the forum become redundant and are dropped.
    pub async fn clear_forum(
        &self,
        user_id: i64,
        forum_id: i64,
        cleared_on: DateTime<Utc>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO forum_reads (user_id, forum_id, last_cleared_on) VALUES (?, ?, ?)
             ON CONFLICT(user_id, forum_id) DO UPDATE SET last_cleared_on = excluded.last_cleared_on",
        )
        .bind(user_id)
        .bind(forum_id)
        .bind(cleared_on)
        .execute(&mut *tx)
        .await?;

        let removed = sqlx::query("DELETE FROM thread_reads WHERE user_id = ? AND forum_id = ?")
            .bind(user_id)
            .bind(forum_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        debug!(
            "Cleared forum {} for user {} ({} thread reads dropped)",
            forum_id, user_id, removed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, User, UserRepository};
    use crate::forum::{ForumRepository, NewForum};
    use crate::threads::{NewThread, ThreadRepository};
    use crate::Database;

    struct Fixture {
        db: Database,
        forum_id: i64,
        user: User,
    }

    async fn setup() -> Fixture {
        let db = Database::open_in_memory().await.unwrap();
        let forum = ForumRepository::new(db.pool())
            .create(&NewForum::new("General"))
            .await
            .unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice").with_joined_on(Utc::now() - Duration::days(400)))
            .await
            .unwrap();
        Fixture {
            db,
            forum_id: forum.id,
            user,
        }
    }

    async fn thread_at(fx: &Fixture, title: &str, last_post_on: DateTime<Utc>) -> Thread {
        let new_thread =
            NewThread::new(fx.forum_id, title, fx.user.id, "alice").started_on(last_post_on);
        ThreadRepository::new(fx.db.pool())
            .create(&new_thread)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_reads_everything() {
        let fx = setup().await;
        let thread = thread_at(&fx, "Fresh", Utc::now()).await;
        let tracker = ReadTracker::new(fx.db.pool(), 40);

        let states = tracker
            .read_states(&Viewer::Anonymous, fx.forum_id, &[thread])
            .await
            .unwrap();
        assert_eq!(states, vec![true]);
    }

    #[tokio::test]
    async fn test_cutoff_and_unread() {
        let fx = setup().await;
        let old = thread_at(&fx, "Old", Utc::now() - Duration::days(41)).await;
        let fresh = thread_at(&fx, "Fresh", Utc::now() - Duration::days(1)).await;
        let tracker = ReadTracker::new(fx.db.pool(), 40);
        let viewer = Viewer::User(fx.user.clone());

        let states = tracker
            .read_states(&viewer, fx.forum_id, &[old, fresh])
            .await
            .unwrap();
        assert_eq!(states, vec![true, false]);
    }

    #[tokio::test]
    async fn test_cutoff_out_of_range() {
        let fx = setup().await;
        let tracker = ReadTracker::new(fx.db.pool(), u32::MAX);
        assert_eq!(tracker.cutoff(), DateTime::<Utc>::MIN_UTC);

        let fresh = thread_at(&fx, "Fresh", Utc::now() - Duration::days(1)).await;
        let states = tracker
            .read_states(&Viewer::User(fx.user.clone()), fx.forum_id, &[fresh])
            .await
            .unwrap();
        assert_eq!(states, vec![false]);
    }

    #[tokio::test]
    async fn test_activity_before_join_is_read() {
        let fx = setup().await;
        let thread = thread_at(&fx, "Before", Utc::now() - Duration::days(10)).await;
        let newcomer = UserRepository::new(fx.db.pool())
            .create(&NewUser::new("bob"))
            .await
            .unwrap();
        let tracker = ReadTracker::new(fx.db.pool(), 40);

        let states = tracker
            .read_states(&Viewer::User(newcomer), fx.forum_id, &[thread])
            .await
            .unwrap();
        assert_eq!(states, vec![true]);
    }

    #[tokio::test]
    async fn test_mark_thread_read() {
        let fx = setup().await;
        let posted = Utc::now() - Duration::days(2);
        let thread = thread_at(&fx, "Thread", posted).await;
        let tracker = ReadTracker::new(fx.db.pool(), 40);
        let viewer = Viewer::User(fx.user.clone());

        tracker
            .mark_thread_read(fx.user.id, &thread, posted + Duration::hours(1))
            .await
            .unwrap();
        let states = tracker
            .read_states(&viewer, fx.forum_id, std::slice::from_ref(&thread))
            .await
            .unwrap();
        assert_eq!(states, vec![true]);

        // A newer reply makes it unread again.
        let replied = Thread {
            last_post_on: posted + Duration::hours(2),
            ..thread
        };
        let states = tracker
            .read_states(&viewer, fx.forum_id, &[replied])
            .await
            .unwrap();
        assert_eq!(states, vec![false]);
    }

    #[tokio::test]
    async fn test_clear_forum() {
        let fx = setup().await;
        let a = thread_at(&fx, "A", Utc::now() - Duration::days(3)).await;
        let b = thread_at(&fx, "B", Utc::now() - Duration::days(2)).await;
        let tracker = ReadTracker::new(fx.db.pool(), 40);
        let viewer = Viewer::User(fx.user.clone());

        tracker.mark_thread_read(fx.user.id, &a, Utc::now()).await.unwrap();
        tracker
            .clear_forum(fx.user.id, fx.forum_id, Utc::now())
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM thread_reads")
            .fetch_one(fx.db.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let states = tracker
            .read_states(&viewer, fx.forum_id, &[a, b])
            .await
            .unwrap();
        assert_eq!(states, vec![true, true]);
    }
}
