//! Foundation page model and markdown loading.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use walkdir::WalkDir;

/// Frontmatter accepted on a foundation source file.
///
/// Foundation documents are maintained in an external repository and
/// usually carry no frontmatter at all; a `title` is honored when
/// present.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageFrontmatter {
    #[serde(default)]
    pub title: Option<String>,
}

/// One page under the foundation section.
///
/// Built in two steps: loaded from its markdown source here, then
/// completed by [`crate::merge::PageMerger`] with the generated metadata
/// and the hand-maintained manifest. A page that never completes the
/// second step is excluded from the build.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundationPage {
    /// Path relative to the foundation directory, extension stripped.
    /// The lookup key into both data sources.
    pub src_key: String,
    /// File stem, the last-resort page title
    pub basename: String,
    pub url: String,
    /// Markdown body without frontmatter
    pub content: String,
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Navigation grouping from the manifest
    pub group: Option<String>,
    /// Ordinal copied from the bylaws navigation list
    pub ord: Option<u32>,
}

/// Errors raised while loading foundation pages. All fatal.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("foundation directory not found: {0}")]
    MissingRoot(PathBuf),

    #[error("failed to walk foundation directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frontmatter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },
}

impl FoundationPage {
    /// Load one page from its markdown source.
    ///
    /// Derives the lookup key and the default URL from the path relative
    /// to `root`; the manifest may override the URL later.
    pub fn load(root: &Path, path: &Path, base_uri: &str) -> Result<Self, PageError> {
        let text = fs::read_to_string(path).map_err(|e| PageError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let (frontmatter, body) =
            split_frontmatter(&text).map_err(|message| PageError::Frontmatter {
                path: path.to_path_buf(),
                message,
            })?;

        let rel = path.strip_prefix(root).unwrap_or(path);
        let src_key = key_for(rel);
        let basename = rel
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let url = format!("{}/{}.html", base_uri.trim_end_matches('/'), src_key);

        Ok(Self {
            src_key,
            basename,
            url,
            content: body.to_string(),
            title: frontmatter.and_then(|f| f.title),
            date: None,
            author: None,
            description: None,
            group: None,
            ord: None,
        })
    }
}

/// Load every markdown page under `root`, sorted by file name.
pub fn discover(root: &Path, base_uri: &str) -> Result<Vec<FoundationPage>, PageError> {
    if !root.exists() {
        return Err(PageError::MissingRoot(root.to_path_buf()));
    }

    let mut pages = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("md")
        {
            continue;
        }

        tracing::debug!("loading foundation page {}", path.display());
        pages.push(FoundationPage::load(root, path, base_uri)?);
    }

    Ok(pages)
}

/// Relative path with the extension stripped, `/`-joined.
fn key_for(rel: &Path) -> String {
    rel.with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Split an optional `---` fenced YAML frontmatter block off a markdown
/// source.
fn split_frontmatter(source: &str) -> Result<(Option<PageFrontmatter>, &str), String> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err("unclosed frontmatter block".to_string());
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: PageFrontmatter =
        serde_yaml::from_str(yaml_content).map_err(|e| e.to_string())?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_a_plain_markdown_page() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bylaws/decision-making.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "# Decision Making\n\nConsensus first.\n").unwrap();

        let page = FoundationPage::load(temp.path(), &path, "/foundation").unwrap();

        assert_eq!(page.src_key, "bylaws/decision-making");
        assert_eq!(page.basename, "decision-making");
        assert_eq!(page.url, "/foundation/bylaws/decision-making.html");
        assert!(page.content.starts_with("# Decision Making"));
        assert!(page.title.is_none());
    }

    #[test]
    fn honors_frontmatter_title() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("policies.md");
        fs::write(&path, "---\ntitle: Policies\n---\n\nBody.\n").unwrap();

        let page = FoundationPage::load(temp.path(), &path, "/foundation").unwrap();

        assert_eq!(page.title, Some("Policies".to_string()));
        assert_eq!(page.content, "Body.\n");
    }

    #[test]
    fn unclosed_frontmatter_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.md");
        fs::write(&path, "---\ntitle: Broken\n# never closed").unwrap();

        let result = FoundationPage::load(temp.path(), &path, "/foundation");

        assert!(matches!(result, Err(PageError::Frontmatter { .. })));
    }

    #[test]
    fn discover_walks_sorted_and_skips_non_markdown() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["zeta.md", "alpha.md", "notes.txt"] {
            fs::write(temp.path().join(name), "# Page\n").unwrap();
        }

        let pages = discover(temp.path(), "/foundation").unwrap();

        let keys: Vec<_> = pages.iter().map(|p| p.src_key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    #[test]
    fn discover_requires_the_root() {
        let temp = tempfile::tempdir().unwrap();

        let result = discover(&temp.path().join("absent"), "/foundation");

        assert!(matches!(result, Err(PageError::MissingRoot(_))));
    }
}
