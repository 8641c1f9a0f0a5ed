pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod router;
pub mod topology;

use db::Store;
use topology::TopologyService;

/// Application state shared across handlers
pub struct AppState {
    pub topology: TopologyService,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            topology: TopologyService::new(store),
        }
    }
}
