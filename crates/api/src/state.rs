use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::{CatalogStore, ProfileStore, ProgressStore};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the bonus model constants.
    pub config: Arc<ServerConfig>,
    /// Current vehicle catalog snapshot.
    pub catalog: Arc<CatalogStore>,
    /// Per-user research progress.
    pub progress: Arc<ProgressStore>,
    /// Per-user bonus profiles, used when an estimate request omits one.
    pub profiles: Arc<ProfileStore>,
}
