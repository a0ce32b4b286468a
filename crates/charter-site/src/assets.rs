//! Static asset generation.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the site stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }
}

const DEFAULT_CSS: &str = r#"/* Charter default theme */

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  color: #1a1a1a;
  background: #ffffff;
}

.main {
  max-width: 800px;
  margin: 0 auto;
  padding: 2rem 1rem;
}

h1 {
  margin-bottom: 1rem;
}

/* Vote result pages */
.vote-header {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  gap: 0.75rem;
  margin-bottom: 1.5rem;
}

.vote-badge {
  height: 20px;
}

.vote-dates {
  width: 100%;
  color: #555;
  font-size: 0.9rem;
}

.vote-record {
  background: #f6f6f6;
  border: 1px solid #ddd;
  border-radius: 4px;
  padding: 1rem;
  overflow-x: auto;
  font-size: 0.85rem;
}

/* Vote index */
.vote-index ul {
  list-style: none;
}

.vote-index li {
  padding: 0.25rem 0;
  border-bottom: 1px solid #eee;
}

.vote-index a + a {
  margin-left: 0.75rem;
  color: #555;
}

/* Foundation pages */
.foundation-page .description {
  color: #555;
  font-style: italic;
}

.foundation-page .byline {
  color: #777;
  font-size: 0.85rem;
  margin-bottom: 1.5rem;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_covers_both_page_families() {
        let css = AssetPipeline::generate_css();

        assert!(css.contains(".vote-record"));
        assert!(css.contains(".foundation-page"));
    }
}
