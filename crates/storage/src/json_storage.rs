//! JSON file storage implementation.
//!
//! Keeps the whole snapshot in one pretty-printed JSON file. Writes go to a
//! sibling temporary file that is then renamed over the target, so a failed
//! save never leaves a truncated snapshot behind.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use super::{Result, Snapshot, SnapshotProvider};

/// File-based JSON snapshot backend.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage for `path`. Nothing is touched until the first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for JsonFileStorage {
    async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        read_json(&self.path).await
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.temp_path();
        if let Err(e) = replace_file(&tmp, &self.path, json.as_bytes()).await {
            // Covers a partial write as well as a failed rename.
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!(path = %self.path.display(), habits = snapshot.habits.len(), "saved snapshot");
        Ok(())
    }
}

async fn replace_file(tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(tmp, bytes).await?;
    fs::rename(tmp, target).await
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot file yet");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
