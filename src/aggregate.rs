//! Recursive repository content aggregation.
//!
//! Walks the repository tree depth-first in provider listing order, fetches
//! every file whose extension is on the allow-list and concatenates the
//! bodies behind `--- name ---` separator lines. Each recursive call owns
//! its accumulator and returns it by value; the parent appends fragments in
//! traversal order, so the result is deterministic for a stable snapshot.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, warn};

use crate::config::RepoAccess;
use crate::github::{ContentsEntry, FetchError, RepoContents};

/// File extensions considered relevant source or documentation material.
const ELIGIBLE_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "html", "css", "scss", "md", "json", "txt", "py", "java", "cpp",
    "c", "go", "rs", "php", "rb", "swift", "kt", "dart", "vue",
];

/// Aggregated text plus the files that had to be skipped along the way.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub text: String,
    pub warnings: Vec<FileWarning>,
}

/// A file that failed to fetch or decode; never fatal for the run.
#[derive(Debug, Clone)]
pub struct FileWarning {
    pub path: String,
    pub reason: String,
}

/// Everything after the last `.`, lowercased. A name without dots counts
/// whole, matching how the listing names are filtered upstream.
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase()
}

pub fn is_eligible(name: &str) -> bool {
    ELIGIBLE_EXTENSIONS.contains(&file_extension(name).as_str())
}

/// Aggregate all eligible files reachable from the repository root.
///
/// Root-level listing failures abort the whole call; single-file failures
/// are logged, recorded as warnings and skipped.
pub async fn aggregate<P>(provider: &P, access: RepoAccess) -> Result<Aggregate, FetchError>
where
    P: RepoContents + ?Sized,
{
    aggregate_dir(provider, access, String::new()).await
}

fn aggregate_dir<'a, P>(
    provider: &'a P,
    access: RepoAccess,
    path: String,
) -> BoxFuture<'a, Result<Aggregate, FetchError>>
where
    P: RepoContents + ?Sized,
{
    async move {
        let entries = provider.list_dir(&path).await?;
        debug!(path = %path, entries = entries.len(), "Listed directory");

        let mut out = Aggregate::default();
        for entry in entries {
            match entry.kind.as_str() {
                "dir" => {
                    let sub = aggregate_dir(provider, access, entry.path.clone()).await?;
                    out.text.push_str(&sub.text);
                    out.warnings.extend(sub.warnings);
                }
                "file" => {
                    if !is_eligible(&entry.name) {
                        continue;
                    }
                    match file_text(provider, access, &entry).await {
                        Ok(body) => {
                            out.text.push_str("\n--- ");
                            out.text.push_str(&entry.name);
                            out.text.push_str(" ---\n");
                            out.text.push_str(&body);
                            out.text.push('\n');
                        }
                        Err(reason) => {
                            warn!(path = %entry.path, reason = %reason, "Skipping file after fetch failure");
                            out.warnings.push(FileWarning {
                                path: entry.path.clone(),
                                reason,
                            });
                        }
                    }
                }
                other => {
                    debug!(path = %entry.path, kind = other, "Skipping unsupported entry kind");
                }
            }
        }
        Ok(out)
    }
    .boxed()
}

/// Resolve a single file body. Private-mode listings may embed the content
/// inline as base64, saving the extra round trip; everything else goes
/// through the raw-content URL.
async fn file_text<P>(
    provider: &P,
    access: RepoAccess,
    entry: &ContentsEntry,
) -> Result<String, String>
where
    P: RepoContents + ?Sized,
{
    if access == RepoAccess::Private {
        if let Some(inline) = entry.content.as_deref().filter(|c| !c.is_empty()) {
            return decode_inline(inline);
        }
    }
    let url = entry
        .download_url
        .as_deref()
        .ok_or_else(|| "listing entry has no download URL".to_string())?;
    provider.fetch_raw(url).await.map_err(|e| e.to_string())
}

/// Inline listing content arrives base64-encoded with embedded line breaks.
fn decode_inline(content: &str) -> Result<String, String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64 content: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("inline content is not valid UTF-8: {e}"))
}
