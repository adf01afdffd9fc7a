use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{github_token_from_env, RepoAccess, RepoRequest};
use crate::generate::GeminiClient;
use crate::github::GithubClient;
use crate::pipeline::generate_readme;

/// CLI for readme-gen: aggregate a repository and generate its README.
#[derive(Parser)]
#[clap(
    name = "readme-gen",
    version,
    about = "Generate a README.md for a GitHub repository from its source files"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the repository's eligible source files and generate a README
    Generate {
        /// Repository owner (user or organisation)
        #[clap(long)]
        owner: String,

        /// Repository name
        #[clap(long)]
        repo: String,

        /// GitHub personal access token; falls back to GITHUB_TOKEN
        #[clap(long)]
        token: Option<String>,

        /// Treat the repository as private (requires a token)
        #[clap(long)]
        private: bool,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            owner,
            repo,
            token,
            private,
        } => {
            let token = token
                .filter(|t| !t.trim().is_empty())
                .or_else(github_token_from_env);
            let request = RepoRequest {
                owner,
                repo,
                token: token.clone(),
                access: if private {
                    RepoAccess::Private
                } else {
                    RepoAccess::Public
                },
            };

            let provider = GithubClient::new(request.owner.clone(), request.repo.clone(), token);
            let generator = GeminiClient::from_env()?;

            match generate_readme(&provider, &generator, &request).await {
                Ok(report) => {
                    if !report.warnings.is_empty() {
                        info!(
                            skipped = report.warnings.len(),
                            "Some files were skipped during aggregation"
                        );
                    }
                    println!("{}", report.readme);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("[ERROR] README generation failed: {e}");
                    Err(anyhow::Error::msg(e.to_string()))
                }
            }
        }
    }
}
