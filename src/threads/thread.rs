//! Thread model for forumlist.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::slug::slugify;

/// Listing weight of a thread.
///
/// Announcements are shown on every page, pinned threads sort ahead of
/// default threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadWeight {
    /// Regular thread.
    #[default]
    Default = 0,
    /// Pinned thread.
    Pinned = 1,
    /// Announcement.
    Announcement = 2,
}

impl ThreadWeight {
    /// Database value.
    pub fn as_i64(&self) -> i64 {
        *self as i64
    }

    /// Convert a database value. Unknown values count as default.
    pub fn from_i64(value: i64) -> Self {
        match value {
            2 => ThreadWeight::Announcement,
            1 => ThreadWeight::Pinned,
            _ => ThreadWeight::Default,
        }
    }
}

/// Thread entity.
#[derive(Debug, Clone)]
pub struct Thread {
    /// Unique thread ID.
    pub id: i64,
    /// ID of the forum this thread belongs to.
    pub forum_id: i64,
    /// Label ID, if labelled.
    pub label_id: Option<i64>,
    /// Thread title.
    pub title: String,
    /// URL slug of the title.
    pub slug: String,
    /// Listing weight.
    pub weight: ThreadWeight,
    /// ID of the user who started the thread.
    pub starter_id: Option<i64>,
    /// Display name of the starter.
    pub starter_name: String,
    /// Number of replies.
    pub replies: i64,
    /// When the thread was started.
    pub started_on: DateTime<Utc>,
    /// When the last post was made.
    pub last_post_on: DateTime<Utc>,
    /// Display name of the last poster.
    pub last_poster_name: String,
    /// Awaiting moderator approval.
    pub is_moderated: bool,
    /// Hidden from regular users.
    pub is_hidden: bool,
    /// Closed for replies.
    pub is_closed: bool,
    /// At least one post was reported.
    pub has_reported_posts: bool,
    /// At least one post awaits approval.
    pub has_moderated_posts: bool,
}

/// Data for creating a new thread.
#[derive(Debug, Clone)]
pub struct NewThread {
    /// Forum to create the thread in.
    pub forum_id: i64,
    /// Thread title.
    pub title: String,
    /// Starter user ID.
    pub starter_id: Option<i64>,
    /// Starter display name.
    pub starter_name: String,
    /// Label ID.
    pub label_id: Option<i64>,
    /// Listing weight.
    pub weight: ThreadWeight,
    /// Number of replies.
    pub replies: i64,
    /// Start timestamp (defaults to now).
    pub started_on: DateTime<Utc>,
    /// Last post timestamp (defaults to the start timestamp).
    pub last_post_on: DateTime<Utc>,
    /// Awaiting approval.
    pub is_moderated: bool,
    /// Hidden.
    pub is_hidden: bool,
    /// Has reported posts.
    pub has_reported_posts: bool,
    /// Has posts awaiting approval.
    pub has_moderated_posts: bool,
}

impl NewThread {
    /// Create a new thread started now.
    pub fn new(
        forum_id: i64,
        title: impl Into<String>,
        starter_id: i64,
        starter_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            forum_id,
            title: title.into(),
            starter_id: Some(starter_id),
            starter_name: starter_name.into(),
            label_id: None,
            weight: ThreadWeight::Default,
            replies: 0,
            started_on: now,
            last_post_on: now,
            is_moderated: false,
            is_hidden: false,
            has_reported_posts: false,
            has_moderated_posts: false,
        }
    }

    /// Title slug.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    /// Set the label.
    pub fn with_label(mut self, label_id: i64) -> Self {
        self.label_id = Some(label_id);
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: ThreadWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the reply count.
    pub fn with_replies(mut self, replies: i64) -> Self {
        self.replies = replies;
        self
    }

    /// Set both timestamps to `started_on`.
    pub fn started_on(mut self, started_on: DateTime<Utc>) -> Self {
        self.started_on = started_on;
        self.last_post_on = started_on;
        self
    }

    /// Set the last post timestamp.
    pub fn last_post_on(mut self, last_post_on: DateTime<Utc>) -> Self {
        self.last_post_on = last_post_on;
        self
    }

    /// Mark as awaiting approval.
    pub fn moderated(mut self) -> Self {
        self.is_moderated = true;
        self
    }

    /// Mark as hidden.
    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Mark as having reported posts.
    pub fn with_reported_posts(mut self) -> Self {
        self.has_reported_posts = true;
        self
    }

    /// Mark as having posts awaiting approval.
    pub fn with_moderated_posts(mut self) -> Self {
        self.has_moderated_posts = true;
        self
    }
}
