use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::Result;
use crate::domain::{Character, Document};
use crate::storage::DocumentStore;

/// Keeps the document in memory. Used by tests and by anything that does not
/// need the roster to outlive the process.
#[derive(Default)]
pub struct InMemoryStore {
    document: RwLock<Document>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    pub fn with_characters(characters: Vec<Character>) -> Self {
        Self::with_document(Document::new(characters))
    }

    pub async fn snapshot(&self) -> Document {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn load(&self) -> Result<Document> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &Document) -> Result<()> {
        *self.document.write().await = document.clone();
        Ok(())
    }
}
