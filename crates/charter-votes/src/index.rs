//! The vote listing page.

use serde::Serialize;

use crate::aggregate::VotePage;

/// Fixed URL of the vote index.
pub const INDEX_URL: &str = "/votes/index.html";

/// The single page listing every vote result.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub url: String,
    pub title: String,
    pub description: String,
    pub cssclasses: Vec<String>,
    /// `<ul>` markup linking each vote page
    pub content: String,
}

/// Build the listing page, linking votes in input order.
pub fn build_index(pages: &[VotePage]) -> IndexPage {
    let mut items = String::new();
    for page in pages {
        items.push_str(&format!("<li><a href='{}'>{}</a>", page.url, page.vote_item));
        if let Some(item_title) = &page.item_title {
            items.push_str(&format!("<a href='{}'>{}</a>", page.url, item_title));
        }
        items.push_str("</li>");
    }

    IndexPage {
        url: INDEX_URL.to_string(),
        title: "Index of Vote results".to_string(),
        description: "Vote results".to_string(),
        cssclasses: vec!["vote-index".to_string()],
        content: format!("<ul>{items}</ul>"),
    }
}
