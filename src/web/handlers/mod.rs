//! API handlers for the web layer.

pub mod forum;

pub use forum::*;

use std::sync::Arc;

use crate::config::ThreadsConfig;
use crate::Database;

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: SharedDatabase,
    /// Thread list settings.
    pub threads: ThreadsConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: SharedDatabase, threads: ThreadsConfig) -> Self {
        Self { db, threads }
    }
}
