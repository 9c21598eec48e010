use std::sync::Arc;

use super::sessions::SessionStore;
use crate::locations::Location;
use crate::settings::Settings;

// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub registry: &'static [Location],
    pub sessions: SessionStore,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(registry: &'static [Location], settings: Settings) -> Self {
        Self {
            registry,
            sessions: SessionStore::new(),
            settings: Arc::new(settings),
        }
    }
}
