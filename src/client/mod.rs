//! Client side of the roster: an HTTP client plus the local list/filter/draft
//! state it keeps in sync.
//!
//! Local state only changes after the server acknowledged a write.

pub mod http;
pub mod view;

pub use http::{ClientError, ClientResult, RosterClient};
pub use view::{Draft, DraftRequest, RosterView, distinct_universes, filter_characters, matches_query};

use tracing::debug;

use crate::domain::{Character, CharacterId};

pub struct RosterSession {
    client: RosterClient,
    view: RosterView,
}

impl RosterSession {
    pub fn new(client: RosterClient) -> Self {
        Self {
            client,
            view: RosterView::new(),
        }
    }

    pub fn client(&self) -> &RosterClient {
        &self.client
    }

    pub fn view(&self) -> &RosterView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut RosterView {
        &mut self.view
    }

    /// Re-fetches the full list and re-applies the active search.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let characters = self.client.list().await?;
        debug!(count = characters.len(), "roster refreshed");
        self.view.replace_all(characters);
        Ok(())
    }

    /// Sends the open draft as a create or update. Returns `None` when no draft
    /// is open.
    pub async fn submit_draft(&mut self) -> ClientResult<Option<Character>> {
        let Some(draft) = self.view.draft() else {
            return Ok(None);
        };

        let saved = match draft.request() {
            DraftRequest::Create(payload) => self.client.create(&payload).await?,
            DraftRequest::Update { id, patch } => self.client.update(id, &patch).await?,
        };

        debug!(id = saved.id, "draft saved");
        self.view.apply_saved(saved.clone());
        Ok(Some(saved))
    }

    pub async fn delete(&mut self, id: CharacterId) -> ClientResult<Character> {
        let removed = self.client.delete(id).await?;
        self.view.apply_deleted(removed.id);
        Ok(removed)
    }
}
