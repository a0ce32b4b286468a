//! Vote result ingestion and badge emission.
//!
//! Scans a directory tree of per-vote JSON records, computes the
//! quorum/threshold arithmetic, and emits one rendered page plus one SVG
//! badge per vote, along with a single listing page.

pub mod aggregate;
pub mod index;
pub mod record;
pub mod scanner;

pub use aggregate::{BadgeAsset, VoteAggregator, VotePage};
pub use index::{build_index, IndexPage, INDEX_URL};
pub use record::{ScannedVote, VoteRecord, VoteThreshold};
pub use scanner::{scan, ScanError};
