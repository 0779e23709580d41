use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::store::{HrStore, StoreEvent};
use crate::ws::Hub;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Roster store, one per process
    pub store: Arc<HrStore>,
    /// Application configuration
    pub config: Arc<Config>,
    /// Connected WebSocket clients
    pub hub: Arc<Hub>,
}

impl AppState {
    /// Create new application state with an empty roster
    pub fn new(config: Config) -> Self {
        let store = HrStore::new(&config.roster);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            hub: Arc::new(Hub::new()),
        }
    }

    /// Subscribe to roster change events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }
}
