use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::character::{Character, CharacterId, NewCharacter};
use crate::core::{Result, RosterError};

/// The whole persisted roster.
///
/// `last_id` is the highest id ever handed out. It is absent from documents that
/// have never seen a create through this service and is not written until needed.
/// Top-level keys the roster does not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub characters: Vec<Character>,
    #[serde(rename = "lastId", default, skip_serializing_if = "Option::is_none")]
    pub last_id: Option<CharacterId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters,
            last_id: None,
            extra: Map::new(),
        }
    }

    /// Fails with `WriteError` once the id space is used up.
    pub fn next_id(&self) -> Result<CharacterId> {
        let max_existing = self.characters.iter().map(|c| c.id).max().unwrap_or(0);
        max_existing
            .max(self.last_id.unwrap_or(0))
            .checked_add(1)
            .ok_or_else(|| RosterError::WriteError("character id space exhausted".to_string()))
    }

    /// Assigns the next id to `payload`, appends it and returns the stored record.
    pub fn append(&mut self, payload: NewCharacter) -> Result<Character> {
        let id = self.next_id()?;
        let character = payload.into_character(id);
        self.characters.push(character.clone());
        self.last_id = Some(id);
        Ok(character)
    }

    pub fn position(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    pub fn find(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Checks the invariants serde cannot express: ids are positive and unique.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::with_capacity(self.characters.len());
        for character in &self.characters {
            if character.id == 0 {
                return Err("character id must be greater than zero".to_string());
            }
            if !seen.insert(character.id) {
                return Err(format!("duplicate character id {}", character.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(ids: &[CharacterId]) -> Document {
        Document::new(
            ids.iter()
                .map(|id| NewCharacter::new(format!("hero-{id}"), "", "Earth-616").into_character(*id))
                .collect(),
        )
    }

    #[test]
    fn next_id_starts_at_one_for_an_empty_roster() {
        assert_eq!(Document::default().next_id().unwrap(), 1);
    }

    #[test]
    fn next_id_follows_the_maximum_not_the_length() {
        assert_eq!(document(&[1, 7, 3]).next_id().unwrap(), 8);
    }

    #[test]
    fn last_id_prevents_reuse_after_deleting_the_top_record() {
        let mut doc = document(&[1]);
        let created = doc
            .append(NewCharacter::new("Iron Man", "Tony Stark", "Earth-616"))
            .unwrap();
        assert_eq!(created.id, 2);

        doc.characters.retain(|c| c.id != 2);
        assert_eq!(doc.next_id().unwrap(), 3);
    }

    #[test]
    fn exhausted_id_space_is_a_write_error_and_leaves_the_document_alone() {
        let mut doc = document(&[u64::MAX]);
        let err = doc
            .append(NewCharacter::new("Iron Man", "Tony Stark", "Earth-616"))
            .unwrap_err();
        assert!(matches!(err, RosterError::WriteError(_)), "got {err:?}");
        assert_eq!(doc.characters.len(), 1);
        assert_eq!(doc.last_id, None);

        let mut doc = Document {
            last_id: Some(u64::MAX),
            ..Document::default()
        };
        assert!(doc.next_id().is_err());
        assert!(doc.append(NewCharacter::new("a", "b", "c")).is_err());
        assert!(doc.characters.is_empty());
    }

    #[test]
    fn documents_without_last_id_serialize_with_a_single_field() {
        let doc = document(&[1]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value.as_object().map(|o| o.len()), Some(1));
        assert!(value.get("characters").is_some());

        let parsed: Document = serde_json::from_value(json!({ "characters": [] })).unwrap();
        assert_eq!(parsed.last_id, None);
    }

    #[test]
    fn unknown_top_level_keys_survive_a_round_trip() {
        let raw = json!({
            "characters": [],
            "lastId": 4,
            "owner": "Stan",
            "meta": { "version": 2 }
        });
        let parsed: Document = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed.last_id, Some(4));
        assert_eq!(parsed.extra.get("owner"), Some(&json!("Stan")));
        assert!(!parsed.extra.contains_key("lastId"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn validate_rejects_duplicate_and_zero_ids() {
        assert!(document(&[1, 2]).validate().is_ok());
        assert!(document(&[1, 1]).validate().is_err());
        assert!(document(&[0]).validate().is_err());
    }
}
