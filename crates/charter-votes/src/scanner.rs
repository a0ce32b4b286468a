//! Recursive scan of the vote-record tree.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::record::ScannedVote;

/// Errors raised while scanning vote records. All of them abort the
/// build; there is no partial recovery for a malformed record.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("vote directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("failed to walk vote directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid vote record {path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Recursively scan `root` for `*.json` vote records.
///
/// Traversal is depth-first with entries sorted by file name, so the
/// result order is lexicographic per directory level and stable across
/// platforms. Each record's URL joins `base_uri` with its path relative
/// to `root`, swapping the extension for `.html`.
pub fn scan(root: &Path, base_uri: &str) -> Result<Vec<ScannedVote>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let mut votes = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("json")
        {
            continue;
        }

        let text = fs::read_to_string(path).map_err(|e| ScanError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let raw: serde_json::Value = serde_json::from_str(&text).map_err(|e| ScanError::Record {
            path: path.to_path_buf(),
            source: e,
        })?;

        let url = vote_url(root, path, base_uri);
        let vote = ScannedVote::from_value(&raw, url).map_err(|e| ScanError::Record {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("scanned vote record {}", path.display());
        votes.push(vote);
    }

    Ok(votes)
}

/// `<base>/<relative-dir>/<stem>.html`
fn vote_url(root: &Path, path: &Path, base_uri: &str) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path).with_extension("html");

    let mut url = base_uri.trim_end_matches('/').to_string();
    for part in rel.components() {
        url.push('/');
        url.push_str(&part.as_os_str().to_string_lossy());
    }
    url
}
