//! Template engine for rendering site pages.

use minijinja::{context, Environment};

use charter_pages::FoundationPage;
use charter_votes::{IndexPage, VotePage};

/// Template engine using minijinja with embedded layouts.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the default layouts.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("vote.html".to_string(), VOTE_TEMPLATE.to_string())
            .expect("Failed to add vote template");

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        Self { env }
    }

    /// Render one vote result page.
    pub fn render_vote(&self, page: &VotePage, site_title: &str) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("vote.html")?;

        tmpl.render(context! {
            title => &page.title,
            site_title => site_title,
            cssclasses => &page.cssclasses,
            noindex => !page.robots,
            badge_url => &page.badge_url,
            date => page.date.format("%Y-%m-%d").to_string(),
            updated => page.updated.format("%Y-%m-%d").to_string(),
            has_update => page.has_update,
            content => &page.content,
        })
    }

    /// Render the vote index page.
    pub fn render_index(
        &self,
        index: &IndexPage,
        site_title: &str,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &index.title,
            site_title => site_title,
            cssclasses => &index.cssclasses,
            noindex => false,
            content => &index.content,
        })
    }

    /// Render one merged foundation page around its markdown body.
    pub fn render_foundation(
        &self,
        page: &FoundationPage,
        body: &str,
        site_title: &str,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;

        tmpl.render(context! {
            title => page.title.clone().unwrap_or_else(|| page.basename.clone()),
            site_title => site_title,
            cssclasses => ["foundation"],
            noindex => false,
            description => page.description.clone().unwrap_or_default(),
            author => &page.author,
            date => page.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            content => body,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if noindex %}<meta name="robots" content="noindex">
  {% endif %}<link rel="stylesheet" href="/assets/main.css">
</head>
<body class="{{ cssclasses | join(' ') }}">
  <main class="main">
    {% block content %}{% endblock %}
  </main>
</body>
</html>
"##;

const VOTE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<header class="vote-header">
  <h1>{{ title }}</h1>
  <img class="vote-badge" src="{{ badge_url }}" alt="vote status">
  <p class="vote-dates">Opened {{ date }}{% if has_update %} &middot; updated {{ updated }}{% endif %}</p>
</header>
<pre class="vote-record">{{ content }}</pre>
{% endblock %}
"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<article class="foundation-page">
  <header>
    <h1>{{ title }}</h1>
    <p class="description">{{ description }}</p>
    <p class="byline">{% if author %}{{ author }} &middot; {% endif %}last modified {{ date }}</p>
  </header>
  {{ content | safe }}
</article>
{% endblock %}
"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<h1>{{ title }}</h1>
{{ content | safe }}
{% endblock %}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use charter_votes::{build_index, ScannedVote, VoteAggregator};

    fn vote_page() -> VotePage {
        let raw = serde_json::json!({
            "repoName": "acme/governance",
            "number": 42,
            "date": "2024-03-05T20:45:48Z",
            "updated": "2024-03-19T16:10:02Z",
            "votingThreshold": "supermajority",
            "groupSize": 9,
            "groupVotes": 7,
            "hasQuorum": true,
            "voteType": "notice"
        });
        let vote = ScannedVote::from_value(&raw, "/votes/42.html".to_string()).unwrap();
        VoteAggregator::default().render(&vote).0
    }

    #[test]
    fn vote_page_embeds_badge_and_record() {
        let engine = TemplateEngine::new();

        let html = engine.render_vote(&vote_page(), "Governance").unwrap();

        assert!(html.contains("<title>Vote results for acme/governance#42 - Governance</title>"));
        assert!(html.contains(r#"<img class="vote-badge" src="/votes/42.svg""#));
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert!(html.contains("Opened 2024-03-05 &middot; updated 2024-03-19"));
        // The raw record is escaped inside the <pre> block.
        assert!(html.contains("&quot;repoName&quot;"));
    }

    #[test]
    fn index_content_is_not_escaped() {
        let engine = TemplateEngine::new();
        let index = build_index(&[vote_page()]);

        let html = engine.render_index(&index, "Governance").unwrap();

        assert!(html.contains("<li><a href='/votes/42.html'>acme/governance#42</a></li>"));
        assert!(!html.contains(r#"<meta name="robots""#));
    }
}
