//! Thread listing for forumlist.
//!
//! This module lists the threads of a forum for one viewer, with the
//! viewer-selected filter and sort order applied and the result paginated.

mod filtering;
mod links;
mod list;
mod pagination;
mod repository;
mod sorting;
mod thread;
mod tracker;

pub use filtering::{available_filters, FilterEntry, FilterOption, Filtering, ThreadFilter};
pub use links::{ForumPath, LinkParams};
pub use list::{ForumRef, ForumThreads, ThreadListItem};
pub use pagination::{Page, PageError, Paginator};
pub use repository::ThreadRepository;
pub use sorting::{SortBy, SortColumn, SortEntry, SortOrder, Sorting, SORT_ORDERS};
pub use thread::{NewThread, Thread, ThreadWeight};
pub use tracker::ReadTracker;
