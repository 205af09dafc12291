use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind
/// an `Arc`. Nothing here is mutable, so requests share no in-memory state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ehome_db::DbPool,
    /// Server configuration (read by the auth extractors).
    pub config: Arc<ServerConfig>,
}
