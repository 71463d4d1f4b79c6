use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use chrono::Utc;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{Revision, StoreError};
use crate::models::AppState;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const STATE_PATH: &str = "data/state.json";

/// State document stored as a file in a GitHub repository, accessed through
/// the contents API.
///
/// The revision is the blob SHA GitHub returned on load; a save sends it
/// back and GitHub rejects the write when the file moved on, which is a real
/// compare-and-swap. The change description becomes the commit message, so
/// the repository doubles as an audit log of every state transition.
pub struct GitHubStore {
    http: reqwest::Client,
    token: String,
    owner: String,
    repo: String,
    api_base: String,
}

impl GitHubStore {
    pub fn new(token: String, owner: String, repo: String) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("chorewheel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            token,
            owner,
            repo,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Build from `GITHUB_TOKEN` / `GITHUB_OWNER` / `GITHUB_REPO`. Returns
    /// `Ok(None)` when any of the three is unset.
    pub fn from_env() -> Result<Option<Self>, StoreError> {
        let (Ok(token), Ok(owner), Ok(repo)) = (
            std::env::var("GITHUB_TOKEN"),
            std::env::var("GITHUB_OWNER"),
            std::env::var("GITHUB_REPO"),
        ) else {
            return Ok(None);
        };

        Self::new(token, owner, repo).map(Some)
    }

    fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, STATE_PATH
        )
    }

    pub async fn load(&self) -> Result<(AppState, Revision), StoreError> {
        #[derive(Deserialize)]
        struct ContentsResponse {
            content: String,
            sha: String,
        }

        let response = self
            .http
            .get(self.contents_url())
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: ContentsResponse = response.json().await?;
        let raw = decode_content(&body.content)?;
        let state: AppState = serde_json::from_slice(&raw)?;

        Ok((state, Revision(body.sha)))
    }

    pub async fn save(
        &self,
        state: &mut AppState,
        revision: &Revision,
        message: &str,
    ) -> Result<(), StoreError> {
        #[derive(Serialize)]
        struct PutRequest<'a> {
            message: &'a str,
            content: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            sha: Option<&'a str>,
        }

        state.last_updated = Utc::now();
        let raw = serde_json::to_string_pretty(state)?;

        // An initial revision means "create"; the PUT carries no SHA and
        // GitHub rejects it if the file appeared in the meantime.
        let sha = (!revision.0.is_empty()).then_some(revision.0.as_str());

        let response = self
            .http
            .put(self.contents_url())
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&PutRequest {
                message,
                content: BASE64_STANDARD.encode(raw.as_bytes()),
                sha,
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Err(StoreError::Conflict),
            status if status.is_success() => {
                tracing::debug!(repo = %self.repo, message, "state saved");
                Ok(())
            }
            _ => Err(api_error(response).await),
        }
    }
}

/// The contents API returns base64 with embedded newlines; strip whitespace
/// before decoding.
fn decode_content(content: &str) -> Result<Vec<u8>, StoreError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(BASE64_STANDARD.decode(compact.as_bytes())?)
}

async fn api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StoreError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_newline_wrapped_base64() {
        let decoded = decode_content("aGVs\nbG8g\nd29y\nbGQ=\n").unwrap();
        assert_eq!(decoded, b"hello world");
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            decode_content("not base64!!!"),
            Err(StoreError::Base64(_))
        ));
    }
}
