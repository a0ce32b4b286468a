//! Site build orchestration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use charter_badge::BadgePalette;
use charter_pages::{
    discover, load_bylaws, load_manifest, load_metadata, DataError, MergeError, PageError,
    PageMerger,
};
use charter_votes::{build_index, scan, ScanError, VoteAggregator};

use crate::assets::AssetPipeline;
use crate::templates::TemplateEngine;

/// Configuration for one site build.
///
/// All relative paths are resolved against `site_dir`.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source site directory
    pub site_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Vote record tree
    pub votes_dir: PathBuf,

    /// Foundation markdown tree
    pub foundation_dir: PathBuf,

    /// Generated foundation metadata (JSON)
    pub metadata_path: PathBuf,

    /// Hand-maintained foundation manifest (YAML)
    pub manifest_path: PathBuf,

    /// Bylaws navigation list (YAML)
    pub bylaws_path: PathBuf,

    /// Site title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            output_dir: PathBuf::from("public"),
            votes_dir: PathBuf::from("votes"),
            foundation_dir: PathBuf::from("foundation"),
            metadata_path: PathBuf::from("_includes/foundation.json"),
            manifest_path: PathBuf::from("_includes/foundation.yml"),
            bylaws_path: PathBuf::from("_data/bylaws.yml"),
            title: "Governance".to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Vote pages written, including the index
    pub vote_pages: usize,

    /// Foundation pages written after merging
    pub foundation_pages: usize,

    /// SVG badges written
    pub badges: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during a build. The first one aborts the build;
/// there is no partial-output guarantee.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("vote scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("foundation pages: {0}")]
    Pages(#[from] PageError),

    #[error("foundation data: {0}")]
    Data(#[from] DataError),

    #[error("foundation merge: {0}")]
    Merge(#[from] MergeError),

    #[error("template render failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    aggregator: VoteAggregator,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            aggregator: VoteAggregator::new(BadgePalette::default()),
            templates: TemplateEngine::new(),
        }
    }

    /// Run one build to completion.
    ///
    /// Single-threaded and synchronous: the steps run in a fixed order
    /// (scan, aggregate, index, foundation merge, render, write) and the
    /// first fatal error aborts the build.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir).map_err(|e| BuildError::Write {
            path: self.config.output_dir.clone(),
            source: e,
        })?;

        let (vote_pages, badges) = self.build_votes()?;
        let foundation_pages = self.build_foundation()?;
        self.write_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            vote_pages,
            foundation_pages,
            badges,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Scan, aggregate, and write the vote pages, badges, and index.
    fn build_votes(&self) -> Result<(usize, usize), BuildError> {
        let votes_root = self.config.site_dir.join(&self.config.votes_dir);
        let votes = scan(&votes_root, "/votes")?;
        tracing::info!("scanned {} vote records", votes.len());

        let mut pages = Vec::with_capacity(votes.len());
        let mut badges = self.aggregator.static_badges();

        for vote in &votes {
            let (page, badge) = self.aggregator.render(vote);
            badges.push(badge);
            pages.push(page);
        }

        for page in &pages {
            let html = self.templates.render_vote(page, &self.config.title)?;
            self.write_url(&page.url, &html)?;
        }

        let index = build_index(&pages);
        let html = self.templates.render_index(&index, &self.config.title)?;
        self.write_url(&index.url, &html)?;

        for badge in &badges {
            self.write_url(&badge.url, &badge.content)?;
        }

        Ok((pages.len() + 1, badges.len()))
    }

    /// Discover, merge, and write the foundation pages.
    fn build_foundation(&self) -> Result<usize, BuildError> {
        let root = self.config.site_dir.join(&self.config.foundation_dir);
        let pages = discover(&root, "/foundation")?;

        let metadata = load_metadata(&self.config.site_dir.join(&self.config.metadata_path))?;
        let manifest = load_manifest(&self.config.site_dir.join(&self.config.manifest_path))?;
        let bylaws = load_bylaws(&self.config.site_dir.join(&self.config.bylaws_path))?;

        let merger = PageMerger::new(metadata, manifest, bylaws);
        let merged = merger.merge_all(pages)?;
        tracing::info!("merged {} foundation pages", merged.len());

        for page in &merged {
            let body = render_markdown(&page.content);
            let html = self
                .templates
                .render_foundation(page, &body, &self.config.title)?;
            self.write_url(&page.url, &html)?;
        }

        Ok(merged.len())
    }

    /// Write the site stylesheet.
    fn write_assets(&self) -> Result<(), BuildError> {
        self.write_url("/assets/main.css", &AssetPipeline::generate_css())
    }

    /// Write one artifact under the output directory, mirroring its URL.
    fn write_url(&self, url: &str, content: &str) -> Result<(), BuildError> {
        let path = self.config.output_dir.join(url.trim_start_matches('/'));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(&path, content).map_err(|e| BuildError::Write { path, source: e })
    }
}

/// Render a markdown body with the site's standard options.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
