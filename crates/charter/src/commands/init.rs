//! Initialize a site skeleton.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing charter site...");

    let site_dir = Path::new("site");

    // Check if the site already exists
    if site_dir.exists() {
        if !yes {
            tracing::warn!("site/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(site_dir).context("Failed to create site directory")?;
    }

    // Create default config
    write_if_absent(Path::new("charter.toml"), DEFAULT_CONFIG, yes)?;

    // Sample vote record
    write_if_absent(
        &site_dir.join("votes/notices/2024/42.json"),
        SAMPLE_VOTE,
        yes,
    )?;

    // Sample foundation page with its data entries
    write_if_absent(
        &site_dir.join("foundation/bylaws/decision-making.md"),
        SAMPLE_PAGE,
        yes,
    )?;
    write_if_absent(
        &site_dir.join("_includes/foundation.json"),
        SAMPLE_METADATA,
        yes,
    )?;
    write_if_absent(
        &site_dir.join("_includes/foundation.yml"),
        SAMPLE_MANIFEST,
        yes,
    )?;
    write_if_absent(&site_dir.join("_data/bylaws.yml"), SAMPLE_BYLAWS, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'charter build' to build the site.");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Charter Configuration

[site]
# Source directory for the site
dir = "site"

# Output directory for the built site
output = "public"

# Site title
title = "Governance"

[votes]
# Vote record tree, relative to the site directory
dir = "votes"

[foundation]
# Foundation markdown tree, relative to the site directory
dir = "foundation"

# Generated freshness/authorship metadata
metadata = "_includes/foundation.json"

# Hand-maintained page manifest
manifest = "_includes/foundation.yml"

# Bylaws navigation list
bylaws = "_data/bylaws.yml"
"#;

const SAMPLE_VOTE: &str = r#"{
  "repoName": "acme/governance",
  "number": 42,
  "date": "2024-03-05T20:45:48Z",
  "updated": "2024-03-19T16:10:02Z",
  "votingThreshold": "supermajority",
  "groupSize": 9,
  "groupVotes": 7,
  "hasQuorum": true,
  "voteType": "notice"
}
"#;

const SAMPLE_PAGE: &str = r#"# Decision Making

How the council reaches decisions: consensus first, votes when needed.
"#;

const SAMPLE_METADATA: &str = r#"{
  "bylaws/decision-making.md": {
    "date": "2024-02-11T09:30:00Z",
    "author": "council-bot"
  }
}
"#;

const SAMPLE_MANIFEST: &str = r#"bylaws/decision-making:
  description: How decisions are made
  group: bylaws
"#;

const SAMPLE_BYLAWS: &str = r#"nav:
  - href: /foundation/bylaws/decision-making.html
    ord: 1
"#;
