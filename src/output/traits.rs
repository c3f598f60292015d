//! Output renderer trait and types
//!
//! This module defines the renderer interface and the selectable output formats.

use crate::story::Story;
use serde::Deserialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize stories: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Selectable render mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable numbered list
    #[default]
    Console,

    /// Indented JSON array
    Json,
}

/// Trait for story renderers
///
/// A renderer writes the final story list to a sink, typically stdout.
pub trait StoryRenderer {
    /// Renders `stories` into `out`
    ///
    /// # Arguments
    ///
    /// * `stories` - The aggregated stories, in the order they should appear
    /// * `out` - Destination writer
    fn render(&self, stories: &[Story], out: &mut dyn Write) -> OutputResult<()>;
}
