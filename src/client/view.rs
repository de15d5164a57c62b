//! Local roster state kept by a client: the full list, the filtered view
//! derived from a search term, and the draft being edited.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::domain::{Character, CharacterId, CharacterPatch, NewCharacter};

/// Case-insensitive substring match on name, real name or universe.
pub fn matches_query(character: &Character, query: &str) -> bool {
    let needle = query.to_lowercase();
    character.name.to_lowercase().contains(&needle)
        || character.real_name.to_lowercase().contains(&needle)
        || character.universe.to_lowercase().contains(&needle)
}

pub fn filter_characters(characters: &[Character], query: &str) -> Vec<Character> {
    if query.is_empty() {
        return characters.to_vec();
    }
    characters
        .iter()
        .filter(|c| matches_query(c, query))
        .cloned()
        .collect()
}

pub fn distinct_universes(characters: &[Character]) -> usize {
    characters
        .iter()
        .map(|c| c.universe.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Editable copy of a record. A draft with an `id` is saved as an update,
/// one without as a create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub id: Option<CharacterId>,
    pub name: String,
    pub real_name: String,
    pub universe: String,
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftRequest {
    Create(NewCharacter),
    Update { id: CharacterId, patch: CharacterPatch },
}

impl Draft {
    pub fn request(&self) -> DraftRequest {
        match self.id {
            Some(id) => DraftRequest::Update {
                id,
                patch: CharacterPatch {
                    name: Some(self.name.clone()),
                    real_name: Some(self.real_name.clone()),
                    universe: Some(self.universe.clone()),
                    extra: self.extra.clone(),
                },
            },
            None => DraftRequest::Create(NewCharacter {
                name: self.name.clone(),
                real_name: self.real_name.clone(),
                universe: self.universe.clone(),
                extra: self.extra.clone(),
            }),
        }
    }
}

impl From<&Character> for Draft {
    fn from(character: &Character) -> Self {
        Self {
            id: Some(character.id),
            name: character.name.clone(),
            real_name: character.real_name.clone(),
            universe: character.universe.clone(),
            extra: character.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RosterView {
    characters: Vec<Character>,
    filtered: Vec<Character>,
    search_term: String,
    draft: Option<Draft>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the local list after a full fetch and re-applies the search.
    pub fn replace_all(&mut self, characters: Vec<Character>) {
        self.characters = characters;
        self.refilter();
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn filtered(&self) -> &[Character] {
        &self.filtered
    }

    /// Counted over the full list, not the filtered view.
    pub fn universe_count(&self) -> usize {
        distinct_universes(&self.characters)
    }

    pub fn begin_create(&mut self) -> &mut Draft {
        self.draft.insert(Draft::default())
    }

    /// Starts editing the record with `id`, pre-filled with its fields.
    pub fn begin_edit(&mut self, id: CharacterId) -> Option<&mut Draft> {
        let draft = self.characters.iter().find(|c| c.id == id).map(Draft::from)?;
        Some(self.draft.insert(draft))
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Applies a record the server acknowledged: replaces the entry with the
    /// same id or appends a new one, then closes the draft.
    pub fn apply_saved(&mut self, saved: Character) {
        match self.characters.iter_mut().find(|c| c.id == saved.id) {
            Some(existing) => *existing = saved,
            None => self.characters.push(saved),
        }
        self.draft = None;
        self.refilter();
    }

    /// Drops a record the server confirmed as deleted.
    pub fn apply_deleted(&mut self, id: CharacterId) {
        self.characters.retain(|c| c.id != id);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_characters(&self.characters, &self.search_term);
    }
}
