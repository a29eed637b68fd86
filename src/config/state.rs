// Application state module
// Bundles the pieces every request handler needs

use crate::routing::RouteTable;
use crate::store::VersePool;

use super::types::Config;

/// Application state shared across requests
pub struct AppState {
    pub config: Config,
    pub store: VersePool,
    pub routes: RouteTable,
}

impl AppState {
    /// Build state from loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: VersePool::new(config.store.path.as_str(), config.store.max_idle),
            routes: RouteTable::kjv(),
        }
    }
}
