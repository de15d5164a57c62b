//! Record operations over a [`DocumentStore`].
//!
//! Every call loads the document afresh. Writes hold a single async mutex for
//! their whole load-mutate-save cycle so two writers in this process never
//! overwrite each other. Reads take no lock; the store's atomic replace keeps
//! them consistent.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::core::{Result, RosterError};
use crate::domain::{
    Character, CharacterPatch, Document, NewCharacter, coerce_loose, coerce_strict,
};
use crate::storage::DocumentStore;

#[derive(Clone)]
pub struct CharacterService {
    store: Arc<dyn DocumentStore>,
    write_lock: Arc<Mutex<()>>,
}

impl CharacterService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list(&self) -> Result<Vec<Character>> {
        let document = self.load().await?;
        debug!(count = document.characters.len(), "listed characters");
        Ok(document.characters)
    }

    /// Looks a record up by the numeric value of `raw_id`.
    pub async fn get(&self, raw_id: &str) -> Result<Character> {
        let document = self.load().await?;
        let found = coerce_loose(raw_id).and_then(|id| document.find(id).cloned());
        match found {
            Some(character) => {
                debug!(id = character.id, "fetched character");
                Ok(character)
            }
            None => Err(RosterError::not_found(raw_id)),
        }
    }

    pub async fn create(&self, payload: NewCharacter) -> Result<Character> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let created = document.append(payload)?;
        self.save(&document).await?;

        debug!(id = created.id, name = %created.name, "created character");
        Ok(created)
    }

    /// Merges `patch` into the record addressed by the leading integer of `raw_id`.
    pub async fn update(&self, raw_id: &str, patch: CharacterPatch) -> Result<Character> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let Some(index) = coerce_strict(raw_id).and_then(|id| document.position(id)) else {
            return Err(RosterError::not_found(raw_id));
        };

        document.characters[index].merge(patch);
        let updated = document.characters[index].clone();
        self.save(&document).await?;

        debug!(id = updated.id, "updated character");
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<Character> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let Some(index) = coerce_strict(raw_id).and_then(|id| document.position(id)) else {
            return Err(RosterError::not_found(raw_id));
        };

        let removed = document.characters.remove(index);
        self.save(&document).await?;

        debug!(id = removed.id, "deleted character");
        Ok(removed)
    }

    async fn load(&self) -> Result<Document> {
        self.store.load().await.inspect_err(|err| {
            error!(error = %err, "failed to load roster document");
        })
    }

    async fn save(&self, document: &Document) -> Result<()> {
        self.store.save(document).await.inspect_err(|err| {
            error!(error = %err, "failed to save roster document");
        })
    }
}
