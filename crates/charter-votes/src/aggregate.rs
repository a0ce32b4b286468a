//! Quorum arithmetic and badge selection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use charter_badge::{Badge, BadgePalette};

use crate::record::ScannedVote;

/// Nominal size of every published badge.
const BADGE_WIDTH: u32 = 120;
const BADGE_HEIGHT: u32 = 20;

/// The rendered page emitted for one vote record.
#[derive(Debug, Clone, Serialize)]
pub struct VotePage {
    pub url: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// True when the last tally landed on a different day than the open
    /// date.
    pub has_update: bool,
    pub vote_item: String,
    /// Optional human title carried through from the record
    pub item_title: Option<String>,
    /// Pretty-printed record JSON shown on the page
    pub content: String,
    pub cssclasses: Vec<String>,
    /// Sibling badge, same base URL with an `.svg` suffix
    pub badge_url: String,
    /// Vote pages are excluded from search engines
    pub robots: bool,
}

/// A standalone SVG artifact keyed by its site URL.
#[derive(Debug, Clone)]
pub struct BadgeAsset {
    pub url: String,
    pub content: String,
}

/// Renders pages and badges for scanned votes.
///
/// The palette is injected at construction; this module holds no ambient
/// color tables.
#[derive(Debug, Clone, Default)]
pub struct VoteAggregator {
    palette: BadgePalette,
}

impl VoteAggregator {
    pub fn new(palette: BadgePalette) -> Self {
        Self { palette }
    }

    /// Produce the page and sibling badge for one scanned vote.
    ///
    /// A vote with quorum always gets the fixed quorum badge; otherwise
    /// the in-progress badge shows `group_votes / required_votes`,
    /// un-clamped above 1 so over-quorum overflows the bar.
    pub fn render(&self, vote: &ScannedVote) -> (VotePage, BadgeAsset) {
        let badge = if vote.record.has_quorum {
            Badge::new(BADGE_WIDTH, BADGE_HEIGHT, &self.palette.quorum, "quorum", 1.0)
        } else {
            let required = vote.record.required_votes();
            let progress = f64::from(vote.record.group_votes) / f64::from(required);
            Badge::new(
                BADGE_WIDTH,
                BADGE_HEIGHT,
                &self.palette.in_progress,
                "in progress",
                progress,
            )
        };

        let badge_url = svg_url(&vote.url);
        let page = VotePage {
            url: vote.url.clone(),
            title: vote.title.clone(),
            description: "vote result".to_string(),
            date: vote.record.date,
            updated: vote.record.updated,
            has_update: vote.record.date.date_naive() != vote.record.updated.date_naive(),
            vote_item: vote.vote_item.clone(),
            item_title: vote.record.item_title.clone(),
            content: vote.content.clone(),
            cssclasses: vote.cssclasses.clone(),
            badge_url: badge_url.clone(),
            robots: false,
        };

        let asset = BadgeAsset {
            url: badge_url,
            content: badge.render(),
        };

        (page, asset)
    }

    /// The fixed badges published for templates that cannot resolve a
    /// vote's state.
    pub fn static_badges(&self) -> Vec<BadgeAsset> {
        vec![
            BadgeAsset {
                url: "/votes/vote-unknown.svg".to_string(),
                content: Badge::new(
                    BADGE_WIDTH,
                    BADGE_HEIGHT,
                    &self.palette.unknown,
                    "unknown",
                    1.0,
                )
                .render(),
            },
            BadgeAsset {
                url: "/votes/vote-quorum.svg".to_string(),
                content: Badge::new(
                    BADGE_WIDTH,
                    BADGE_HEIGHT,
                    &self.palette.quorum,
                    "quorum",
                    1.0,
                )
                .render(),
            },
            // The closed badge keeps the "quorum" label; only the color
            // differs.
            BadgeAsset {
                url: "/votes/vote-closed.svg".to_string(),
                content: Badge::new(
                    BADGE_WIDTH,
                    BADGE_HEIGHT,
                    &self.palette.closed,
                    "quorum",
                    1.0,
                )
                .render(),
            },
            BadgeAsset {
                url: "/votes/vote-progress.svg".to_string(),
                content: Badge::new(
                    BADGE_WIDTH,
                    BADGE_HEIGHT,
                    &self.palette.in_progress,
                    "in progress",
                    0.6,
                )
                .render(),
            },
        ]
    }
}

/// Swap the page extension for the badge's.
fn svg_url(url: &str) -> String {
    match url.strip_suffix(".html") {
        Some(base) => format!("{base}.svg"),
        None => format!("{url}.svg"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ScannedVote;
    use pretty_assertions::assert_eq;

    fn vote(has_quorum: bool, group_votes: u32) -> ScannedVote {
        let raw = serde_json::json!({
            "repoName": "acme/governance",
            "number": 42,
            "date": "2024-03-05T20:45:48Z",
            "updated": "2024-03-05T22:01:13Z",
            "votingThreshold": "supermajority",
            "groupSize": 9,
            "groupVotes": group_votes,
            "hasQuorum": has_quorum,
            "voteType": "notice"
        });
        ScannedVote::from_value(&raw, "/votes/notices/2024/42.html".to_string()).unwrap()
    }

    #[test]
    fn quorum_always_wins_over_the_computed_badge() {
        let aggregator = VoteAggregator::default();

        // Even with zero ballots recorded, hasQuorum selects the fixed
        // quorum badge.
        let (_, badge) = aggregator.render(&vote(true, 0));

        assert!(badge.content.contains("#CCFFE0"));
        assert!(badge.content.contains(">quorum</text>"));
        assert!(badge.content.contains(r##"<rect x="40" width="80" height="20" fill="#CCFFE0"/>"##));
    }

    #[test]
    fn in_progress_badge_uses_the_vote_fraction() {
        let aggregator = VoteAggregator::default();

        // 3 of 6 required: half the status segment.
        let (_, badge) = aggregator.render(&vote(false, 3));

        assert!(badge.content.contains(">in progress</text>"));
        assert!(badge.content.contains(r##"<rect x="40" width="40" height="20" fill="#FFFACD"/>"##));
    }

    #[test]
    fn over_quorum_fraction_is_not_clamped() {
        let aggregator = VoteAggregator::default();

        // 9 of 6 required: the bar overflows the 80-unit segment.
        let (_, badge) = aggregator.render(&vote(false, 9));

        assert!(badge.content.contains(r##"<rect x="40" width="120" height="20" fill="#FFFACD"/>"##));
    }

    #[test]
    fn badge_url_is_the_page_url_sibling() {
        let aggregator = VoteAggregator::default();

        let (page, badge) = aggregator.render(&vote(true, 9));

        assert_eq!(page.url, "/votes/notices/2024/42.html");
        assert_eq!(page.badge_url, "/votes/notices/2024/42.svg");
        assert_eq!(badge.url, page.badge_url);
    }

    #[test]
    fn same_day_update_is_not_flagged() {
        let aggregator = VoteAggregator::default();

        let (page, _) = aggregator.render(&vote(true, 9));

        assert!(!page.has_update);
        assert!(!page.robots);
        assert_eq!(page.description, "vote result");
    }

    #[test]
    fn publishes_the_four_fixed_badges() {
        let badges = VoteAggregator::default().static_badges();

        let urls: Vec<_> = badges.iter().map(|b| b.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "/votes/vote-unknown.svg",
                "/votes/vote-quorum.svg",
                "/votes/vote-closed.svg",
                "/votes/vote-progress.svg",
            ]
        );

        // The closed badge carries the closed color with the quorum
        // label.
        let closed = &badges[2];
        assert!(closed.content.contains("#CCD1FF"));
        assert!(closed.content.contains(">quorum</text>"));
    }
}
