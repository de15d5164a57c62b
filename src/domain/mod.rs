pub mod character;
pub mod document;
pub mod id;

pub use character::{Character, CharacterId, CharacterPatch, NewCharacter};
pub use document::Document;
pub use id::{coerce_loose, coerce_strict};
