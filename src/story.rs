//! The story record extracted from listing pages

use serde::{Deserialize, Serialize};

/// One entry of a listing page
///
/// A story is built entirely inside one extractor run and never mutated afterwards.
/// The title is never empty: rows without a title do not produce a story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Story headline
    pub title: String,

    /// Absolute link target, empty when the row had no link
    pub url: String,

    /// Score, zero when the row has no metadata
    pub points: u32,

    /// Comment count, zero when absent or unparseable
    pub comments: u32,

    /// Submitter name, empty when absent
    pub author: String,

    /// Site identifier of the row
    pub id: String,
}

impl Story {
    /// Returns true if the story carries any of author, points or comments
    pub fn has_metadata(&self) -> bool {
        !self.author.is_empty() || self.points > 0 || self.comments > 0
    }
}
