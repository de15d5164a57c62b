use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::{Result, RosterError};
use crate::domain::Document;
use crate::storage::DocumentStore;

/// Stores the roster as one pretty-printed JSON file.
///
/// Saves go to a temporary file in the same directory which is synced and then
/// renamed over the target, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty roster if the file does not exist yet. Returns whether a
    /// file was created.
    pub async fn ensure_exists(&self) -> Result<bool> {
        let exists = tokio::fs::try_exists(&self.path).await.map_err(|e| {
            RosterError::ReadError(format!("Failed to stat {}: {}", self.path.display(), e))
        })?;
        if exists {
            return Ok(false);
        }

        info!(path = %self.path.display(), "creating empty roster document");
        self.save(&Document::default()).await?;
        Ok(true)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RosterError::ReadError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let document: Document = serde_json::from_str(&raw).map_err(|e| {
            RosterError::ParseError(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;
        document.validate().map_err(|msg| {
            RosterError::ParseError(format!("Invalid document {}: {}", self.path.display(), msg))
        })?;

        debug!(path = %self.path.display(), count = document.characters.len(), "document loaded");
        Ok(document)
    }

    async fn save(&self, document: &Document) -> Result<()> {
        let serialized = serde_json::to_string_pretty(document)
            .map_err(|e| RosterError::WriteError(format!("Failed to serialize document: {}", e)))?;

        let path = self.path.clone();
        let dir = self.parent_dir();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &path, serialized.as_bytes()))
            .await
            .map_err(|e| RosterError::WriteError(format!("Write task failed: {}", e)))??;

        debug!(path = %self.path.display(), count = document.characters.len(), "document saved");
        Ok(())
    }
}

fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| RosterError::WriteError(format!("Failed to create temp file: {}", e)))?;
    temp.write_all(bytes)
        .map_err(|e| RosterError::WriteError(format!("Failed to write document: {}", e)))?;
    temp.flush()
        .map_err(|e| RosterError::WriteError(format!("Failed to flush document: {}", e)))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| RosterError::WriteError(format!("Failed to sync document: {}", e)))?;
    temp.persist(path).map_err(|e| {
        RosterError::WriteError(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewCharacter;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("user.json");
        let raw = json!({
            "characters": [
                { "id": 1, "name": "Spider-Man", "realName": "Peter Parker", "universe": "Earth-616" },
                { "id": 3, "name": "Storm", "realName": "Ororo Munroe", "universe": "Earth-616", "team": "X-Men" }
            ]
        });
        std::fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn load_reads_records_in_file_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(sample_file(&dir));

        let document = store.load().await.unwrap();
        let ids: Vec<_> = document.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(document.characters[1].extra.get("team"), Some(&json!("X-Men")));
    }

    #[tokio::test]
    async fn save_of_load_leaves_content_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = sample_file(&dir);
        let store = JsonFileStore::new(&path);

        let before: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let document = store.load().await.unwrap();
        store.save(&document).await.unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(before, after);
        assert_eq!(store.load().await.unwrap(), document);
    }

    #[tokio::test]
    async fn unknown_top_level_keys_are_written_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.json");
        let raw = json!({
            "characters": [
                { "id": 2, "name": "Thor", "realName": "Thor Odinson", "universe": "Earth-616" }
            ],
            "schema": "roster/1",
            "owner": { "team": "Avengers" }
        });
        std::fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();
        let store = JsonFileStore::new(&path);

        let mut document = store.load().await.unwrap();
        document
            .append(NewCharacter::new("Hulk", "Bruce Banner", "Earth-616"))
            .unwrap();
        store.save(&document).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["schema"], json!("roster/1"));
        assert_eq!(written["owner"], json!({ "team": "Avengers" }));
        assert_eq!(written["lastId"], json!(3));
        assert_eq!(written["characters"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, RosterError::ReadError(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn malformed_content_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("user.json"));

        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load().await.unwrap_err(), RosterError::ParseError(_)));

        std::fs::write(store.path(), r#"{"heroes": []}"#).unwrap();
        assert!(matches!(store.load().await.unwrap_err(), RosterError::ParseError(_)));

        std::fs::write(
            store.path(),
            r#"{"characters": [{"id": 1, "name": "a", "realName": "b", "universe": "c"},
                               {"id": 1, "name": "d", "realName": "e", "universe": "f"}]}"#,
        )
        .unwrap();
        assert!(matches!(store.load().await.unwrap_err(), RosterError::ParseError(_)));
    }

    #[tokio::test]
    async fn save_into_missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope").join("user.json"));

        let err = store.save(&Document::default()).await.unwrap_err();
        assert!(matches!(err, RosterError::WriteError(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn save_leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("user.json"));

        let mut document = Document::default();
        document
            .append(NewCharacter::new("Iron Man", "Tony Stark", "Earth-616"))
            .unwrap();
        store.save(&document).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("\n  \"characters\""), "expected two-space indent: {written}");
    }

    #[tokio::test]
    async fn ensure_exists_creates_an_empty_roster_once() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("user.json"));

        assert!(store.ensure_exists().await.unwrap());
        assert!(!store.ensure_exists().await.unwrap());
        assert!(store.load().await.unwrap().characters.is_empty());
    }
}
