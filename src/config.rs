use std::fmt;

use tracing::debug;

/// Environment variable consulted when no `--token` flag is given.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Whether the repository is reachable anonymously or needs a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAccess {
    Public,
    Private,
}

/// A single README generation request: which repository, and how to reach it.
#[derive(Debug, Clone)]
pub struct RepoRequest {
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub access: RepoAccess,
}

impl RepoRequest {
    /// Rejects malformed requests before any network call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::MissingOwner);
        }
        if self.repo.trim().is_empty() {
            return Err(ConfigError::MissingRepo);
        }
        let has_token = self
            .token
            .as_deref()
            .map_or(false, |t| !t.trim().is_empty());
        if self.access == RepoAccess::Private && !has_token {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }
}

/// Reads the GitHub token from the environment, treating blank values as absent.
pub fn github_token_from_env() -> Option<String> {
    match std::env::var(GITHUB_TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => {
            debug!(var = GITHUB_TOKEN_VAR, "Using GitHub token from environment");
            Some(token)
        }
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingOwner,
    MissingRepo,
    MissingToken,
    MissingApiKey(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingOwner => write!(f, "repository owner must not be empty"),
            ConfigError::MissingRepo => write!(f, "repository name must not be empty"),
            ConfigError::MissingToken => {
                write!(f, "a GitHub token is required for private repositories")
            }
            ConfigError::MissingApiKey(var) => {
                write!(f, "{var} environment variable not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
