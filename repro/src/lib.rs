//! Fixture collections and scenarios for field hooks in rich-text blocks.
//!
//! [`fixtures`] defines a `posts` collection with a hooked relationship field,
//! an `articles` collection whose rich-text content embeds `category-block`,
//! and the block itself carrying the same hooked relationship field.
//! [`scenarios`] runs create, read and duplicate against both and reports
//! which hooks fired.

pub mod fixtures;
pub mod scenarios;

pub use scenarios::{Group, Report, ScenarioResult, run_all};
