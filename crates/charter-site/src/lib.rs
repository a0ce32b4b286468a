//! Site build orchestration for the governance content pipeline.
//!
//! Runs the fixed build sequence: scan vote records, aggregate them into
//! pages and badges, build the vote index, merge foundation pages with
//! their auxiliary data, and write every artifact to the output
//! directory.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
