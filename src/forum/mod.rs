//! Forum module for forumlist.
//!
//! This module provides the forum tree, per-role forum ACLs and the labels
//! attached to forums.

mod acl;
mod label;
mod repository;
mod types;

pub use acl::{AclRepository, ForumAcl};
pub use label::{Label, LabelRepository, NewLabel};
pub use repository::ForumRepository;
pub use types::{Forum, ForumContext, ForumKind, NewForum};
