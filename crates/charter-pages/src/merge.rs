//! Reconciliation of foundation pages with their auxiliary data.

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::data::{BylawsNav, GeneratedMetadata, PageManifest};
use crate::page::FoundationPage;

/// Errors raised while merging. Fatal: a page that matched both data
/// sources but carries unusable data aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("invalid date {value:?} for page {key}: {source}")]
    Date {
        key: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Joins the three per-page data sources.
///
/// All lookup tables are owned, read-only inputs passed at construction;
/// nothing is captured from the surrounding build.
#[derive(Debug, Clone)]
pub struct PageMerger {
    metadata: GeneratedMetadata,
    manifest: PageManifest,
    bylaws: BylawsNav,
}

impl PageMerger {
    pub fn new(metadata: GeneratedMetadata, manifest: PageManifest, bylaws: BylawsNav) -> Self {
        Self {
            metadata,
            manifest,
            bylaws,
        }
    }

    /// Merge every page that has both a metadata and a manifest entry.
    ///
    /// Pages missing either are dropped with a diagnostic and the rest of
    /// the set continues unaffected. Returns a new collection; the input
    /// is never mutated while being iterated.
    pub fn merge_all(
        &self,
        pages: Vec<FoundationPage>,
    ) -> Result<Vec<FoundationPage>, MergeError> {
        let mut merged = Vec::with_capacity(pages.len());

        for page in pages {
            if let Some(page) = self.merge(page)? {
                merged.push(page);
            }
        }

        Ok(merged)
    }

    /// Merge one page. `Ok(None)` means the page has no matching data
    /// and is excluded from the build.
    fn merge(&self, mut page: FoundationPage) -> Result<Option<FoundationPage>, MergeError> {
        let meta_key = format!("{}.md", page.src_key);
        let (Some(meta), Some(entry)) = (
            self.metadata.get(&meta_key),
            self.manifest.get(&page.src_key),
        ) else {
            tracing::warn!("ignoring {}: no matching page data", page.src_key);
            return Ok(None);
        };

        // Generated metadata first, manifest second: the hand-maintained
        // file wins on conflicts.
        if let Some(author) = &meta.author {
            page.author = Some(author.clone());
        }
        if let Some(content) = &meta.content {
            page.content = content.clone();
        }
        let date = DateTime::parse_from_rfc3339(&meta.date).map_err(|e| MergeError::Date {
            key: page.src_key.clone(),
            value: meta.date.clone(),
            source: e,
        })?;
        page.date = Some(date.with_timezone(&Utc));

        page.description = Some(entry.description.clone());
        if let Some(url) = &entry.url {
            page.url = url.clone();
        }
        if let Some(group) = &entry.group {
            page.group = Some(group.clone());
        }

        if page.title.is_none() {
            page.title =
                Some(first_heading(&page.content).unwrap_or_else(|| page.basename.clone()));
        }

        // Bylaws pages carry their navigation ordinal.
        if let Some(nav) = self.bylaws.nav.iter().find(|n| n.href == page.url) {
            page.ord = Some(nav.ord);
        }

        Ok(Some(page))
    }
}

/// First level-1 heading of a markdown body.
fn first_heading(content: &str) -> Option<String> {
    let re = Regex::new(r"(?m)^#\s(.*)$").ok()?;
    re.captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
}
