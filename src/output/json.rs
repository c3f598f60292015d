//! JSON rendering of the full story list

use crate::output::traits::{OutputResult, StoryRenderer};
use crate::story::Story;
use std::io::Write;

/// Serializes every story as an indented JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl StoryRenderer for JsonRenderer {
    fn render(&self, stories: &[Story], out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, stories)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
