//! Whole-document persistence.
//!
//! A store only knows how to hand out a complete [`Document`] and how to replace
//! it completely. There is no incremental update primitive.

use async_trait::async_trait;

use crate::core::Result;
use crate::domain::Document;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the current document. `ReadError` if the medium is unreachable,
    /// `ParseError` if its content is not a roster document.
    async fn load(&self) -> Result<Document>;

    /// Replaces the stored document. A concurrent `load` observes either the old
    /// or the new document, never a mix.
    async fn save(&self, document: &Document) -> Result<()>;
}
