use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Read error: {0}")]
    ReadError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Write error: {0}")]
    WriteError(String),

    #[error("Character '{0}' not found")]
    NotFound(String),
}

impl RosterError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Storage-layer failures are reported identically at the API boundary.
    pub fn is_storage(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
