//! Thread list of one forum.
//!
//! Announcements are listed on every page. Pinned and regular threads are
//! paginated below them.

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::filtering::ThreadFilter;
use super::pagination::{Page, Paginator};
use super::repository::{ThreadRow, THREAD_COLUMNS};
use super::sorting::SortBy;
use super::thread::{Thread, ThreadWeight};
use super::tracker::ReadTracker;
use crate::config::ThreadsConfig;
use crate::db::{DbPool, Viewer};
use crate::forum::{Forum, ForumContext, Label};
use crate::{ForumError, Result};

/// Forum a listed thread belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumRef {
    /// Forum ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Thread list URL.
    pub url: String,
}

impl From<&Forum> for ForumRef {
    fn from(forum: &Forum) -> Self {
        Self {
            id: forum.id,
            name: forum.name.clone(),
            slug: forum.slug.clone(),
            url: forum.url(),
        }
    }
}

/// A thread decorated for display.
#[derive(Debug, Clone)]
pub struct ThreadListItem {
    /// The thread.
    pub thread: Thread,
    /// Its forum.
    pub forum: ForumRef,
    /// Its label, when the label is attached to the forum.
    pub label: Option<Label>,
    /// Whether the viewer has seen its latest activity.
    pub is_read: bool,
}

/// Query over the threads of one forum as seen by one viewer.
pub struct ForumThreads<'a> {
    pool: &'a DbPool,
    context: &'a ForumContext,
    viewer: &'a Viewer,
    config: &'a ThreadsConfig,
    filter_by: Option<ThreadFilter>,
    sort_by: SortBy,
    paginator: Option<Paginator>,
    page: Option<Page>,
}

impl<'a> ForumThreads<'a> {
    /// Create an unfiltered list in the default order.
    pub fn new(
        pool: &'a DbPool,
        context: &'a ForumContext,
        viewer: &'a Viewer,
        config: &'a ThreadsConfig,
    ) -> Self {
        Self {
            pool,
            context,
            viewer,
            config,
            filter_by: None,
            sort_by: SortBy::default(),
            paginator: None,
            page: None,
        }
    }

    /// Set the filter.
    pub fn filter(&mut self, filter_by: Option<ThreadFilter>) {
        self.filter_by = filter_by;
    }

    /// Set the ordering.
    pub fn sort(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Page resolved by the last `list` call.
    pub fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| ForumError::Internal("page requested before listing".to_string()))
    }

    /// Paginator built by the last `list` call.
    pub fn paginator(&self) -> Result<&Paginator> {
        self.paginator
            .as_ref()
            .ok_or_else(|| ForumError::Internal("paginator requested before listing".to_string()))
    }

    /// List announcements followed by the requested page of other threads.
    ///
    /// `None` is the first page. Page errors come back as
    /// `ForumError::Page`.
    pub async fn list(&mut self, page: Option<u32>) -> Result<Vec<ThreadListItem>> {
        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {THREAD_COLUMNS} FROM threads"));
        self.push_conditions(&mut query);
        query.push(" AND weight = ");
        query.push_bind(ThreadWeight::Announcement.as_i64());
        query.push(format!(" ORDER BY {}", self.sort_by.order_by_sql()));
        let announcements = query
            .build_query_as::<ThreadRow>()
            .fetch_all(self.pool)
            .await?;

        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM threads");
        self.push_conditions(&mut query);
        query.push(" AND weight < ");
        query.push_bind(ThreadWeight::Announcement.as_i64());
        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let paginator = Paginator::new(
            count.max(0) as u64,
            self.config.per_page,
            self.config.orphans,
        );
        let resolved = paginator.page(page)?;

        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {THREAD_COLUMNS} FROM threads"));
        self.push_conditions(&mut query);
        query.push(" AND weight < ");
        query.push_bind(ThreadWeight::Announcement.as_i64());
        query.push(format!(" ORDER BY {}", self.sort_by.order_by_sql()));
        query.push(" LIMIT ");
        query.push_bind(resolved.limit() as i64);
        query.push(" OFFSET ");
        query.push_bind(resolved.offset() as i64);
        let regular = query
            .build_query_as::<ThreadRow>()
            .fetch_all(self.pool)
            .await?;

        debug!(
            "Listed forum {}: {} announcements, page {} of {} ({} threads)",
            self.context.forum.id,
            announcements.len(),
            resolved.number(),
            paginator.num_pages(),
            regular.len()
        );

        self.paginator = Some(paginator);
        self.page = Some(resolved);

        let threads: Vec<Thread> = announcements
            .into_iter()
            .chain(regular)
            .map(ThreadRow::into_thread)
            .collect();
        self.decorate(threads).await
    }

    /// Scope to the forum, hide what the viewer may not see and apply the filter.
    fn push_conditions(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        let acl = &self.context.acl;
        let user_id = self.viewer.user_id();

        query.push(" WHERE forum_id = ");
        query.push_bind(self.context.forum.id);

        let mut hidden = Vec::new();
        if !acl.can_review_moderated_content {
            hidden.push("is_moderated = 0");
        }
        if !acl.can_hide_threads {
            hidden.push("is_hidden = 0");
        }
        if !hidden.is_empty() {
            match user_id {
                Some(user_id) => {
                    query.push(" AND (starter_id = ");
                    query.push_bind(user_id);
                    query.push(format!(" OR ({}))", hidden.join(" AND ")));
                }
                None => {
                    query.push(format!(" AND {}", hidden.join(" AND ")));
                }
            }
        }

        // Anonymous viewers have no ID; 0 matches no starter.
        let own_id = user_id.unwrap_or(0);
        match &self.filter_by {
            Some(ThreadFilter::MyThreads) => {
                query.push(" AND starter_id = ");
                query.push_bind(own_id);
            }
            other => {
                if acl.can_see_own_threads {
                    query.push(" AND starter_id = ");
                    query.push_bind(own_id);
                }
                match other {
                    Some(ThreadFilter::Reported) => {
                        query.push(" AND has_reported_posts = 1");
                    }
                    Some(ThreadFilter::ModeratedThreads) => {
                        query.push(" AND is_moderated = 1");
                    }
                    Some(ThreadFilter::ModeratedPosts) => {
                        query.push(" AND has_moderated_posts = 1");
                    }
                    Some(ThreadFilter::Label { id, .. }) => {
                        query.push(" AND label_id = ");
                        query.push_bind(*id);
                    }
                    Some(ThreadFilter::MyThreads) | None => {}
                }
            }
        }
    }

    async fn decorate(&self, threads: Vec<Thread>) -> Result<Vec<ThreadListItem>> {
        let forum = &self.context.forum;
        let read_states = ReadTracker::new(self.pool, self.config.read_cutoff_days)
            .read_states(self.viewer, forum.id, &threads)
            .await?;
        let forum_ref = ForumRef::from(forum);

        Ok(threads
            .into_iter()
            .zip(read_states)
            .map(|(thread, is_read)| ThreadListItem {
                label: thread
                    .label_id
                    .and_then(|id| self.context.label_by_id(id))
                    .cloned(),
                forum: forum_ref.clone(),
                is_read,
                thread,
            })
            .collect())
    }
}
