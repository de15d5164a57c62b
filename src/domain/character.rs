use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type CharacterId = u64;

/// One roster entry. Fields the roster does not know about are kept in `extra`
/// and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(rename = "realName")]
    pub real_name: String,
    pub universe: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Character {
    /// Merges `patch` over this record. The patch wins on every field it carries,
    /// except `id`, which never changes.
    pub fn merge(&mut self, patch: CharacterPatch) {
        let CharacterPatch {
            name,
            real_name,
            universe,
            mut extra,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(real_name) = real_name {
            self.real_name = real_name;
        }
        if let Some(universe) = universe {
            self.universe = universe;
        }

        extra.remove("id");
        self.extra.extend(extra);
    }
}

/// Create payload. A client-supplied `id` lands in `extra` and is dropped when
/// the record is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    #[serde(rename = "realName")]
    pub real_name: String,
    pub universe: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewCharacter {
    pub fn new(
        name: impl Into<String>,
        real_name: impl Into<String>,
        universe: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            real_name: real_name.into(),
            universe: universe.into(),
            extra: Map::new(),
        }
    }

    pub fn into_character(self, id: CharacterId) -> Character {
        let mut extra = self.extra;
        extra.remove("id");
        Character {
            id,
            name: self.name,
            real_name: self.real_name,
            universe: self.universe,
            extra,
        }
    }
}

/// Update payload: any subset of the record's fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "realName",
        skip_serializing_if = "Option::is_none"
    )]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CharacterPatch {
    pub fn universe(universe: impl Into<String>) -> Self {
        Self {
            universe: Some(universe.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spider_man() -> Character {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Spider-Man",
            "realName": "Peter Parker",
            "universe": "Earth-616"
        }))
        .unwrap()
    }

    #[test]
    fn extra_fields_survive_a_serde_round_trip() {
        let raw = json!({
            "id": 4,
            "name": "Storm",
            "realName": "Ororo Munroe",
            "universe": "Earth-616",
            "team": "X-Men",
            "powers": ["weather"]
        });
        let character: Character = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(character.extra.get("team"), Some(&json!("X-Men")));
        assert_eq!(serde_json::to_value(&character).unwrap(), raw);
    }

    #[test]
    fn merge_keeps_id_and_lets_patch_win() {
        let mut character = spider_man();
        let patch: CharacterPatch = serde_json::from_value(json!({
            "id": 99,
            "universe": "Earth-1610",
            "team": "Avengers"
        }))
        .unwrap();

        character.merge(patch);

        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Spider-Man");
        assert_eq!(character.universe, "Earth-1610");
        assert_eq!(character.extra.get("team"), Some(&json!("Avengers")));
        assert!(!character.extra.contains_key("id"));
    }

    #[test]
    fn null_known_fields_leave_the_old_value() {
        let mut character = spider_man();
        let patch: CharacterPatch = serde_json::from_value(json!({
            "name": null,
            "team": null
        }))
        .unwrap();

        character.merge(patch);

        assert_eq!(character.name, "Spider-Man");
        assert_eq!(character.extra.get("team"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn new_character_drops_client_supplied_id() {
        let payload: NewCharacter = serde_json::from_value(json!({
            "id": 42,
            "name": "Iron Man",
            "realName": "Tony Stark",
            "universe": "Earth-616"
        }))
        .unwrap();

        let stored = payload.into_character(2);
        assert_eq!(stored.id, 2);
        assert!(stored.extra.is_empty());
    }

    #[test]
    fn patch_omits_absent_fields_when_serialized() {
        let patch = CharacterPatch::universe("Earth-1610");
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "universe": "Earth-1610" })
        );
    }
}
