use std::sync::Arc;

use crate::service::CharacterService;
use crate::storage::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CharacterService>,
}

impl AppState {
    pub fn new(service: Arc<CharacterService>) -> Self {
        Self { service }
    }

    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(Arc::new(CharacterService::new(store)))
    }
}
