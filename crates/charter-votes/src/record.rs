//! Vote record schema and threshold arithmetic.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Voting rule determining how many ballots a vote needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteThreshold {
    Supermajority,
    Majority,
    All,
}

impl VoteThreshold {
    /// Number of votes required to satisfy this rule.
    ///
    /// Rounds up: whole humans.
    pub fn required_votes(self, group_size: u32) -> u32 {
        match self {
            Self::Supermajority => (group_size * 2).div_ceil(3),
            Self::Majority => group_size.div_ceil(2),
            Self::All => group_size,
        }
    }
}

/// One vote-result record as stored on disk.
///
/// Every field without a default is required; a record missing any of
/// them, or carrying an unrecognized threshold, fails the build.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    /// Repository the vote was held in, `org/name`
    pub repo_name: String,
    /// Issue or pull request id
    pub number: u64,
    /// When the vote opened
    pub date: DateTime<Utc>,
    /// Last tally
    pub updated: DateTime<Utc>,
    pub voting_threshold: VoteThreshold,
    /// Eligible voters
    pub group_size: u32,
    /// Ballots cast so far
    pub group_votes: u32,
    pub has_quorum: bool,
    /// Category, e.g. "notice"
    pub vote_type: String,
    /// Optional human title shown on the index listing
    #[serde(default)]
    pub item_title: Option<String>,
}

impl VoteRecord {
    /// Votes required for this record's rule and group size.
    pub fn required_votes(&self) -> u32 {
        self.voting_threshold.required_votes(self.group_size)
    }
}

/// A vote record plus the fields derived while scanning.
#[derive(Debug, Clone)]
pub struct ScannedVote {
    pub record: VoteRecord,
    /// Site path of the rendered page (`.html`)
    pub url: String,
    /// `Vote results for <repo>#<number>`
    pub title: String,
    /// `<repo>#<number>`, the link label on the index
    pub vote_item: String,
    /// Pretty-printed copy of the raw record, kept for display
    pub content: String,
    pub cssclasses: Vec<String>,
}

impl ScannedVote {
    /// Validate a parsed JSON record and attach the scan-time derivations.
    ///
    /// The schema is enforced here, at the boundary; everything
    /// downstream operates on the typed record.
    pub fn from_value(raw: &serde_json::Value, url: String) -> Result<Self, serde_json::Error> {
        let record = VoteRecord::deserialize(raw)?;
        let content = serde_json::to_string_pretty(raw)?;
        let title = format!("Vote results for {}#{}", record.repo_name, record.number);
        let vote_item = format!("{}#{}", record.repo_name, record.number);
        let cssclasses = vec!["vote-result".to_string(), record.vote_type.clone()];

        Ok(Self {
            record,
            url,
            title,
            vote_item,
            content,
            cssclasses,
        })
    }
}
