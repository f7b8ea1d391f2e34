//! Web module for forumlist.
//!
//! This module serves the forum thread list pages over HTTP as JSON.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
