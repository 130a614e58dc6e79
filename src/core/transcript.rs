//! Durable transcript storage.
//!
//! The transcript is serialized wholesale after every mutation as a small
//! versioned JSON document of `{sender, text}` records. Escaping is a
//! render-time concern; nothing display-shaped is ever written here. Loading
//! is best-effort: a missing, unreadable, or unrecognized file is treated as
//! an empty history, never as a fatal error.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::core::message::Message;

const TRANSCRIPT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u32,
    saved_at: DateTime<Utc>,
    messages: Vec<Message>,
}

pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Store at the platform data directory (`transcript.json`).
    pub fn open_default() -> Self {
        let proj_dirs = ProjectDirs::from("org", "healthassist", "healthassist")
            .expect("Failed to determine data directory");
        Self::at_path(proj_dirs.data_dir().join("transcript.json"))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted transcript. Absence is the expected fresh-install
    /// state; anything unreadable or unrecognized is logged and treated the
    /// same way.
    pub fn load(&self) -> Option<Vec<Message>> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("could not read transcript at {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<TranscriptFile>(&contents) {
            Ok(file) if file.version == TRANSCRIPT_VERSION => Some(file.messages),
            Ok(file) => {
                warn!(
                    "ignoring transcript with unsupported version {}",
                    file.version
                );
                None
            }
            Err(e) => {
                warn!("could not parse transcript at {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Write the whole transcript. The document is written to a temp file in
    /// the target directory and renamed into place, so a failed write never
    /// truncates the previous save.
    pub fn save(&self, messages: &[Message]) -> Result<(), Box<dyn std::error::Error>> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let file = TranscriptFile {
            version: TRANSCRIPT_VERSION,
            saved_at: Utc::now(),
            messages: messages.to_vec(),
        };

        let mut temp_file = NamedTempFile::new_in(parent)?;
        serde_json::to_writer(&mut temp_file, &file)?;
        temp_file.flush()?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&self.path)?;

        Ok(())
    }

    /// Delete the stored transcript. No-op if nothing was ever saved.
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TranscriptStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = TranscriptStore::at_path(temp_dir.path().join("transcript.json"));
        (temp_dir, store)
    }

    #[test]
    fn missing_file_loads_as_absent() {
        let (_dir, store) = temp_store();
        assert!(store.load().is_none());
    }

    #[test]
    fn save_then_load_round_trips_messages() {
        let (_dir, store) = temp_store();
        let messages = vec![
            Message::user("What is a fever?"),
            Message::assistant("A fever is..."),
        ];

        store.save(&messages).expect("save failed");
        assert_eq!(store.load(), Some(messages));
    }

    #[test]
    fn garbage_content_loads_as_absent() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "<div>not json</div>").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn unsupported_version_loads_as_absent() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            r#"{"version":2,"saved_at":"2025-01-01T00:00:00Z","messages":[]}"#,
        )
        .unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_the_entry() {
        let (_dir, store) = temp_store();
        store.save(&[Message::user("hi")]).expect("save failed");

        store.clear().expect("clear failed");
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_is_a_noop_when_absent() {
        let (_dir, store) = temp_store();
        store.clear().expect("clear of absent entry failed");
    }
}
