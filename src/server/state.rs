//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned for each request
//! through Axum's state extraction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::cache::Cache;

/// Application state containing shared resources and dependencies.
///
/// Both fields are cheap to clone: `DatabaseConnection` is a connection pool and
/// the cache is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool holding the registered users.
    pub db: DatabaseConnection,

    /// Gateway cache of the Discord bot.
    ///
    /// Read for the bot's own name and the member count of each guild. Empty
    /// until the bot has connected.
    pub cache: Arc<Cache>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `cache` - Discord gateway cache shared with the bot
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, cache: Arc<Cache>) -> Self {
        Self { db, cache }
    }
}
