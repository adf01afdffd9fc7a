//! GitHub contents API access.
//!
//! The [`RepoContents`] trait is the seam between the aggregation walk and
//! the network: real traffic goes through [`GithubClient`], tests plug in a
//! generated mock.

use std::fmt;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use reqwest::header;
use serde::Deserialize;
use tracing::debug;

const API_BASE: &str = "https://api.github.com";

/// Media type GitHub expects for contents-API requests.
pub const CONTENTS_ACCEPT: &str = "application/vnd.github.v3+json";

/// Fixed client identifier sent with every request.
pub const USER_AGENT: &str = "readme-gen";

/// One entry of a directory listing as returned by the contents endpoint.
///
/// `kind` is kept as the provider's raw string: besides "file" and "dir"
/// the API can report "symlink" or "submodule", which the walk skips.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64-encoded body, embedded only when the provider chooses to.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug)]
pub enum FetchError {
    NotFound,
    AccessDenied,
    BadCredential,
    Http(u16),
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(
                f,
                "repository not found; if it is private, make sure the token has access"
            ),
            FetchError::AccessDenied => {
                write!(f, "access denied; check token permissions or rate limits")
            }
            FetchError::BadCredential => write!(f, "bad credential; check the GitHub token"),
            FetchError::Http(status) => write!(f, "GitHub API error: HTTP {status}"),
            FetchError::Transport(e) => write!(f, "request failed: {e}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e)
    }
}

/// Read access to one repository's tree.
/// Implemented by real clients and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepoContents: Send + Sync {
    /// List the directory at `path` ("" for the repository root).
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentsEntry>, FetchError>;

    /// Fetch a file body as text from its raw-content URL.
    async fn fetch_raw(&self, url: &str) -> Result<String, FetchError>;
}

/// Contents-API client for a single repository.
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: API_BASE.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token,
        }
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            path
        )
    }
}

#[async_trait]
impl RepoContents for GithubClient {
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentsEntry>, FetchError> {
        let url = self.contents_url(path);
        debug!(url = %url, "Listing repository directory");

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, CONTENTS_ACCEPT)
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {}", token.trim()));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status.as_u16()));
        }

        let entries = response.json::<Vec<ContentsEntry>>().await?;
        debug!(path = path, count = entries.len(), "Directory listed");
        Ok(entries)
    }

    async fn fetch_raw(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching raw file content");
        let response = self
            .http
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

fn classify_status(status: u16) -> FetchError {
    match status {
        404 => FetchError::NotFound,
        403 => FetchError::AccessDenied,
        401 => FetchError::BadCredential,
        code => FetchError::Http(code),
    }
}
