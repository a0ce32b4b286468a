//! The three auxiliary data sources merged onto foundation pages.
//!
//! - generated metadata (`foundation.json`): freshness and authorship,
//!   produced by tooling in the foundation repository;
//! - the page manifest (`foundation.yml`): hand-maintained descriptions,
//!   URL overrides, navigation grouping;
//! - the bylaws navigation list (`bylaws.yml`): ordinals for bylaws
//!   pages.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Generated freshness/authorship entry, keyed by `<src_key>.md`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MetaEntry {
    /// Last-modified timestamp, RFC 3339
    pub date: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Markdown source captured at generation time; replaces the page
    /// body when present
    #[serde(default)]
    pub content: Option<String>,
}

/// Hand-maintained page entry, keyed by `src_key`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ManifestEntry {
    pub description: String,
    /// Overrides the derived page URL when set
    #[serde(default)]
    pub url: Option<String>,
    /// Navigation grouping
    #[serde(default)]
    pub group: Option<String>,
}

/// One bylaws navigation reference.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NavRef {
    pub href: String,
    pub ord: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// The bylaws navigation list.
///
/// Always present for a foundation build: a missing or malformed file is
/// a configuration error and aborts the build before any page merges.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BylawsNav {
    #[serde(default)]
    pub nav: Vec<NavRef>,
}

pub type GeneratedMetadata = HashMap<String, MetaEntry>;
pub type PageManifest = HashMap<String, ManifestEntry>;

/// Errors raised while loading the data sources. All fatal.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load the generated metadata mapping.
pub fn load_metadata(path: &Path) -> Result<GeneratedMetadata, DataError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|e| DataError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the hand-maintained page manifest.
pub fn load_manifest(path: &Path) -> Result<PageManifest, DataError> {
    let text = read(path)?;
    serde_yaml::from_str(&text).map_err(|e| DataError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the bylaws navigation list.
pub fn load_bylaws(path: &Path) -> Result<BylawsNav, DataError> {
    let text = read(path)?;
    serde_yaml::from_str(&text).map_err(|e| DataError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|e| DataError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_generated_metadata() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("foundation.json");
        fs::write(
            &path,
            r#"{
                "bylaws/decision-making.md": {
                    "date": "2024-02-11T09:30:00Z",
                    "author": "council-bot"
                }
            }"#,
        )
        .unwrap();

        let metadata = load_metadata(&path).unwrap();

        let entry = &metadata["bylaws/decision-making.md"];
        assert_eq!(entry.date, "2024-02-11T09:30:00Z");
        assert_eq!(entry.author, Some("council-bot".to_string()));
        assert_eq!(entry.content, None);
    }

    #[test]
    fn loads_manifest_and_bylaws() {
        let temp = tempfile::tempdir().unwrap();
        let manifest_path = temp.path().join("foundation.yml");
        fs::write(
            &manifest_path,
            "bylaws/decision-making:\n  description: How decisions are made\n  group: bylaws\n",
        )
        .unwrap();

        let bylaws_path = temp.path().join("bylaws.yml");
        fs::write(
            &bylaws_path,
            "nav:\n  - href: /foundation/bylaws/decision-making.html\n    ord: 3\n",
        )
        .unwrap();

        let manifest = load_manifest(&manifest_path).unwrap();
        let bylaws = load_bylaws(&bylaws_path).unwrap();

        assert_eq!(
            manifest["bylaws/decision-making"].description,
            "How decisions are made"
        );
        assert_eq!(bylaws.nav.len(), 1);
        assert_eq!(bylaws.nav[0].ord, 3);
    }

    #[test]
    fn missing_bylaws_file_is_fatal() {
        let temp = tempfile::tempdir().unwrap();

        let result = load_bylaws(&temp.path().join("absent.yml"));

        assert!(matches!(result, Err(DataError::Read { .. })));
    }

    #[test]
    fn malformed_metadata_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("foundation.json");
        fs::write(&path, "{ nope").unwrap();

        let result = load_metadata(&path);

        assert!(matches!(result, Err(DataError::Json { .. })));
    }
}
