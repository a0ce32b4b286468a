//! Foundation page data merging.
//!
//! Pages under the foundation section are published only once three
//! independently maintained sources agree: the page's own markdown, the
//! generated freshness/authorship metadata, and the hand-maintained
//! manifest. This crate loads all three and reconciles them.

pub mod data;
pub mod merge;
pub mod page;

pub use data::{
    load_bylaws, load_manifest, load_metadata, BylawsNav, DataError, GeneratedMetadata,
    ManifestEntry, MetaEntry, NavRef, PageManifest,
};
pub use merge::{MergeError, PageMerger};
pub use page::{discover, FoundationPage, PageError};
