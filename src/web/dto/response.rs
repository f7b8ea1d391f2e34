//! Response DTOs for the web layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::forum::{Forum, Label};
use crate::threads::{
    FilterEntry, ForumRef, LinkParams, Page, Paginator, SortEntry, ThreadListItem, ThreadWeight,
};

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Forum DTOs
// ============================================================================

/// Forum response.
#[derive(Debug, Serialize)]
pub struct ForumResponse {
    /// Forum ID.
    pub id: i64,
    /// Forum name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Node kind.
    pub kind: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Depth in the forum tree.
    pub level: i64,
    /// Thread list URL.
    pub url: String,
}

impl From<&Forum> for ForumResponse {
    fn from(forum: &Forum) -> Self {
        Self {
            id: forum.id,
            name: forum.name.clone(),
            slug: forum.slug.clone(),
            kind: forum.kind.as_str().to_string(),
            description: forum.description.clone(),
            level: forum.level,
            url: forum.url(),
        }
    }
}

// ============================================================================
// Thread List DTOs
// ============================================================================

/// Thread list item response.
#[derive(Debug, Serialize)]
pub struct ThreadItemResponse {
    /// Thread ID.
    pub id: i64,
    /// Thread title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Listing weight.
    pub weight: ThreadWeight,
    /// Starter display name.
    pub starter_name: String,
    /// Reply count.
    pub replies: i64,
    /// Start timestamp.
    pub started_on: DateTime<Utc>,
    /// Last post timestamp.
    pub last_post_on: DateTime<Utc>,
    /// Last poster display name.
    pub last_poster_name: String,
    /// Awaiting approval.
    pub is_moderated: bool,
    /// Hidden.
    pub is_hidden: bool,
    /// Closed.
    pub is_closed: bool,
    /// Has reported posts.
    pub has_reported_posts: bool,
    /// Has posts awaiting approval.
    pub has_moderated_posts: bool,
    /// Thread label.
    pub label: Option<Label>,
    /// Forum the thread is in.
    pub forum: ForumRef,
    /// Read by the viewer.
    pub is_read: bool,
}

impl From<ThreadListItem> for ThreadItemResponse {
    fn from(item: ThreadListItem) -> Self {
        let thread = item.thread;
        Self {
            id: thread.id,
            title: thread.title,
            slug: thread.slug,
            weight: thread.weight,
            starter_name: thread.starter_name,
            replies: thread.replies,
            started_on: thread.started_on,
            last_post_on: thread.last_post_on,
            last_poster_name: thread.last_poster_name,
            is_moderated: thread.is_moderated,
            is_hidden: thread.is_hidden,
            is_closed: thread.is_closed,
            has_reported_posts: thread.has_reported_posts,
            has_moderated_posts: thread.has_moderated_posts,
            label: item.label,
            forum: item.forum,
            is_read: item.is_read,
        }
    }
}

/// Current page of the thread list.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// 1-based page number.
    pub number: u32,
    /// Index of the first regular thread on the page.
    pub start_index: u64,
    /// Index of the last regular thread on the page.
    pub end_index: u64,
    /// URL of the previous page.
    pub previous_url: Option<String>,
    /// URL of the next page.
    pub next_url: Option<String>,
}

impl PageResponse {
    /// Build from a resolved page. Page links keep sort and filter.
    pub fn new(page: &Page, params: &LinkParams) -> Self {
        Self {
            number: page.number(),
            start_index: page.start_index(),
            end_index: page.end_index(),
            // The first page has no page segment.
            previous_url: page
                .previous_page_number()
                .map(|n| params.url((n > 1).then_some(n))),
            next_url: page.next_page_number().map(|n| params.url(Some(n))),
        }
    }
}

/// Paginator summary.
#[derive(Debug, Serialize)]
pub struct PaginatorResponse {
    /// Regular threads matching the list.
    pub count: u64,
    /// Number of pages.
    pub num_pages: u32,
    /// Regular threads per page.
    pub per_page: u32,
}

impl From<&Paginator> for PaginatorResponse {
    fn from(paginator: &Paginator) -> Self {
        Self {
            count: paginator.count(),
            num_pages: paginator.num_pages(),
            per_page: paginator.per_page(),
        }
    }
}

/// Sort order menu.
#[derive(Debug, Serialize)]
pub struct SortingResponse {
    /// Active order.
    pub current: SortEntry,
    /// Other orders.
    pub choices: Vec<SortEntry>,
}

/// Filter menu.
#[derive(Debug, Serialize)]
pub struct FilteringResponse {
    /// Whether a filter is active.
    pub is_active: bool,
    /// Active filter.
    pub current: FilterEntry,
    /// Filters the viewer can switch to.
    pub choices: Vec<FilterEntry>,
}

/// Forum thread list page.
#[derive(Debug, Serialize)]
pub struct ForumThreadsResponse {
    /// Canonical link params of this list.
    pub link_params: LinkParams,
    /// The forum.
    pub forum: ForumResponse,
    /// Ancestors of the forum and the forum itself, root first.
    pub path: Vec<ForumResponse>,
    /// Visible child forums.
    pub subforums: Vec<ForumResponse>,
    /// Labels usable in the forum.
    pub labels: Vec<Label>,
    /// Announcements followed by the page's threads.
    pub threads: Vec<ThreadItemResponse>,
    /// Current page.
    pub page: PageResponse,
    /// Paginator summary.
    pub paginator: PaginatorResponse,
    /// Sort orders.
    pub sorting: SortingResponse,
    /// Filters.
    pub filtering: FilteringResponse,
}
