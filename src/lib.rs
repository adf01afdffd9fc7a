pub mod aggregate;
pub mod cli;
pub mod config;
pub mod generate;
pub mod github;
pub mod pipeline;

pub use aggregate::{aggregate, Aggregate, FileWarning};
pub use config::{RepoAccess, RepoRequest};
pub use generate::{GeminiClient, ReadmeGenerator};
pub use github::{GithubClient, RepoContents};
pub use pipeline::{generate_readme, ReadmeReport};
