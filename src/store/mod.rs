//! The storage boundary: load/save of the persisted state document with
//! optimistic concurrency.
//!
//! Two backends exist: a JSON file on the local filesystem and a file in a
//! GitHub repository via the contents API. Both return an opaque [`Revision`]
//! from [`Store::load`] and refuse a [`Store::save`] whose revision is no
//! longer current, so two racing operations can never silently overwrite
//! each other. Retry policy, if any, belongs to the caller.

mod file;
mod github;

pub use file::FileStore;
pub use github::GitHubStore;

use thiserror::Error;

use crate::models::AppState;

/// Opaque optimistic-concurrency token paired with a loaded document.
///
/// For the file backend this is the raw document as last read; for the
/// GitHub backend it is the blob SHA. Callers never inspect it, they only
/// hand it back to [`Store::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(pub(crate) String);

impl Revision {
    /// The revision to pass on the first save, after [`Store::load`]
    /// reported [`StoreError::NotFound`]. Saving with it fails with
    /// [`StoreError::Conflict`] if a document has appeared in the meantime.
    pub fn initial() -> Self {
        Revision(String::new())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no state document exists yet")]
    NotFound,
    #[error("state document was modified by another writer")]
    Conflict,
    #[error("could not determine data directory")]
    DataDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed state document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed base64 content in storage response: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("storage api returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// The configured storage backend.
pub enum Store {
    File(FileStore),
    GitHub(GitHubStore),
}

impl Store {
    /// Pick a backend from the environment: GitHub when `GITHUB_TOKEN`,
    /// `GITHUB_OWNER`, and `GITHUB_REPO` are all set, otherwise the default
    /// local file.
    pub fn from_env() -> Result<Self, StoreError> {
        match GitHubStore::from_env()? {
            Some(github) => Ok(Store::GitHub(github)),
            None => Ok(Store::File(FileStore::open_default()?)),
        }
    }

    pub async fn load(&self) -> Result<(AppState, Revision), StoreError> {
        match self {
            Store::File(store) => store.load().await,
            Store::GitHub(store) => store.load().await,
        }
    }

    /// Persist the document, stamping `last_updated`. `message` describes
    /// the change (it becomes the commit message on the GitHub backend).
    pub async fn save(
        &self,
        state: &mut AppState,
        revision: &Revision,
        message: &str,
    ) -> Result<(), StoreError> {
        match self {
            Store::File(store) => store.save(state, revision, message).await,
            Store::GitHub(store) => store.save(state, revision, message).await,
        }
    }
}
