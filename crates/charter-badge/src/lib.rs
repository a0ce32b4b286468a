//! SVG status badge renderer for governance vote results.
//!
//! Badges are pure rendering requests: the same inputs always produce
//! byte-identical markup, which the site builder relies on for
//! reproducible output.

pub mod badge;
pub mod palette;

pub use badge::Badge;
pub use palette::BadgePalette;
