//! Site build command.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use charter_site::{BuildConfig, SiteBuilder};
use serde::Deserialize;

/// Configuration file structure (charter.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    votes: VotesConfig,
    #[serde(default)]
    foundation: FoundationConfig,
}

#[derive(Debug, Deserialize, Default)]
struct SiteConfig {
    #[serde(default = "default_site_dir")]
    dir: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_title")]
    title: String,
}

#[derive(Debug, Deserialize, Default)]
struct VotesConfig {
    #[serde(default = "default_votes_dir")]
    dir: String,
}

#[derive(Debug, Deserialize, Default)]
struct FoundationConfig {
    #[serde(default = "default_foundation_dir")]
    dir: String,
    #[serde(default = "default_metadata")]
    metadata: String,
    #[serde(default = "default_manifest")]
    manifest: String,
    #[serde(default = "default_bylaws")]
    bylaws: String,
}

fn default_site_dir() -> String {
    "site".to_string()
}
fn default_output() -> String {
    "public".to_string()
}
fn default_title() -> String {
    "Governance".to_string()
}
fn default_votes_dir() -> String {
    "votes".to_string()
}
fn default_foundation_dir() -> String {
    "foundation".to_string()
}
fn default_metadata() -> String {
    "_includes/foundation.json".to_string()
}
fn default_manifest() -> String {
    "_includes/foundation.yml".to_string()
}
fn default_bylaws() -> String {
    "_data/bylaws.yml".to_string()
}

/// Load configuration from charter.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config() -> Result<ConfigFile> {
    let config_path = PathBuf::from("charter.toml");
    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read charter.toml: {}", e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse charter.toml: {}", e))?;
        tracing::info!("Loaded config from charter.toml");
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the build command.
pub fn run(output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building site...");

    let file_config = load_config()?;

    let config = BuildConfig {
        site_dir: PathBuf::from(&file_config.site.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        votes_dir: PathBuf::from(&file_config.votes.dir),
        foundation_dir: PathBuf::from(&file_config.foundation.dir),
        metadata_path: PathBuf::from(&file_config.foundation.metadata),
        manifest_path: PathBuf::from(&file_config.foundation.manifest),
        bylaws_path: PathBuf::from(&file_config.foundation.bylaws),
        title: file_config.site.title,
    };

    let result = SiteBuilder::new(config).build()?;

    tracing::info!(
        "Built {} vote pages, {} foundation pages, and {} badges in {}ms",
        result.vote_pages,
        result.foundation_pages,
        result.badges,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
