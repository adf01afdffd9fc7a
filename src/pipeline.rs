//! Coordinating module for the aggregate-then-generate pipeline.

use std::fmt;

use tracing::{info, warn};

use crate::aggregate::{aggregate, FileWarning};
use crate::config::{ConfigError, RepoRequest};
use crate::generate::{GenerateError, ReadmeGenerator};
use crate::github::{FetchError, RepoContents};

/// Outcome of one generation request.
#[derive(Debug)]
pub struct ReadmeReport {
    pub readme: String,
    pub warnings: Vec<FileWarning>,
}

#[derive(Debug)]
pub enum PipelineError {
    Config(ConfigError),
    Fetch(FetchError),
    NoEligibleFiles,
    Generate(GenerateError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(e) => write!(f, "{e}"),
            PipelineError::Fetch(e) => write!(f, "{e}"),
            PipelineError::NoEligibleFiles => {
                write!(f, "no eligible source files found in the repository")
            }
            PipelineError::Generate(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Config(e) => Some(e),
            PipelineError::Fetch(e) => Some(e),
            PipelineError::Generate(e) => Some(e),
            PipelineError::NoEligibleFiles => None,
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Config(e)
    }
}

impl From<FetchError> for PipelineError {
    fn from(e: FetchError) -> Self {
        PipelineError::Fetch(e)
    }
}

impl From<GenerateError> for PipelineError {
    fn from(e: GenerateError) -> Self {
        PipelineError::Generate(e)
    }
}

/// Entrypoint: validate the request, aggregate the repository and generate
/// the README. The generator is never invoked when aggregation finds no
/// eligible files.
pub async fn generate_readme<P, G>(
    provider: &P,
    generator: &G,
    request: &RepoRequest,
) -> Result<ReadmeReport, PipelineError>
where
    P: RepoContents + ?Sized,
    G: ReadmeGenerator + ?Sized,
{
    request.validate()?;

    info!(
        owner = %request.owner,
        repo = %request.repo,
        access = ?request.access,
        "Aggregating repository contents"
    );
    let aggregated = aggregate(provider, request.access).await?;

    for warning in &aggregated.warnings {
        warn!(path = %warning.path, reason = %warning.reason, "File skipped during aggregation");
    }

    if aggregated.text.trim().is_empty() {
        return Err(PipelineError::NoEligibleFiles);
    }

    info!(
        chars = aggregated.text.len(),
        skipped = aggregated.warnings.len(),
        "Aggregation complete, requesting README generation"
    );
    let readme = generator.generate(&aggregated.text).await?;

    Ok(ReadmeReport {
        readme,
        warnings: aggregated.warnings,
    })
}
