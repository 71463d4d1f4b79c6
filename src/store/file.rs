use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::Utc;

use super::{Revision, StoreError};
use crate::models::AppState;

/// State document stored as a JSON file on the local filesystem.
///
/// The revision is the raw document as last read; a save re-reads the file
/// and refuses to overwrite bytes it has not seen. That is a best-effort
/// compare-and-swap for the single-host case, which is all this backend
/// serves.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform data directory (e.g.
    /// `~/.local/share/chorewheel/state.json`).
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs =
            directories::ProjectDirs::from("", "", "chorewheel").ok_or(StoreError::DataDir)?;
        Ok(Self::new(dirs.data_dir().join("state.json")))
    }

    pub async fn load(&self) -> Result<(AppState, Revision), StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        let state: AppState = serde_json::from_str(&raw)?;
        Ok((state, Revision(raw)))
    }

    pub async fn save(
        &self,
        state: &mut AppState,
        revision: &Revision,
        message: &str,
    ) -> Result<(), StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(current) => {
                if current != revision.0 {
                    return Err(StoreError::Conflict);
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Creating is only valid when the caller loaded nothing.
                if !revision.0.is_empty() {
                    return Err(StoreError::Conflict);
                }
            }
            Err(e) => return Err(e.into()),
        }

        state.last_updated = Utc::now();
        let raw = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so a crash mid-write never leaves a torn
        // document behind.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), message, "state saved");
        Ok(())
    }
}
