//! forumlist - forum thread lists
//!
//! Lists the threads of a forum as seen by one viewer, with ACL-gated
//! visibility, viewer-selected filters and sort orders, and pagination.

pub mod config;
pub mod db;
pub mod error;
pub mod forum;
pub mod logging;
pub mod slug;
pub mod threads;
pub mod web;

pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository, Viewer};
pub use error::{ForumError, Result};
pub use forum::{Forum, ForumAcl, ForumContext, ForumKind, ForumRepository};
pub use threads::{Filtering, ForumThreads, LinkParams, Paginator, Sorting, ThreadFilter};
