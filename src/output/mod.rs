//! Output module for rendering sweep results
//!
//! This module handles:
//! - The human-readable console listing
//! - JSON serialization of the full story list
//! - Selecting a renderer from the configured [`OutputFormat`]

mod console;
mod json;
mod traits;

pub use console::{format_console_listing, ConsoleRenderer, CONSOLE_LIMIT};
pub use json::JsonRenderer;
pub use traits::{OutputError, OutputFormat, OutputResult, StoryRenderer};

use crate::story::Story;
use std::io::Write;

/// Returns the renderer for `format`
pub fn renderer_for(format: OutputFormat) -> Box<dyn StoryRenderer> {
    match format {
        OutputFormat::Console => Box::new(ConsoleRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// Renders `stories` in `format` into `out`
///
/// # Example
///
/// ```
/// use hn_sweep::output::{render_stories, OutputFormat};
/// use hn_sweep::Story;
///
/// let mut out = Vec::new();
/// render_stories(&[Story::default()], OutputFormat::Json, &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with('['));
/// ```
pub fn render_stories(
    stories: &[Story],
    format: OutputFormat,
    out: &mut dyn Write,
) -> OutputResult<()> {
    renderer_for(format).render(stories, out)
}
