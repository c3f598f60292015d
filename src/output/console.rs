//! Human-readable console listing

use crate::output::traits::{OutputResult, StoryRenderer};
use crate::story::Story;
use std::io::Write;

/// Number of stories printed before the listing is truncated
pub const CONSOLE_LIMIT: usize = 20;

/// Prints a numbered list of stories, truncated after [`CONSOLE_LIMIT`] entries
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl StoryRenderer for ConsoleRenderer {
    fn render(&self, stories: &[Story], out: &mut dyn Write) -> OutputResult<()> {
        out.write_all(format_console_listing(stories).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Formats stories as a numbered listing
///
/// Each entry is the title, an `Author | Points | Comments` line when any of those is
/// set, a `URL` line when the story has one, and a blank line.
pub fn format_console_listing(stories: &[Story]) -> String {
    let mut text = String::new();

    text.push_str(&format!("\nFound {} stories:\n\n", stories.len()));

    for (i, story) in stories.iter().enumerate() {
        if i >= CONSOLE_LIMIT {
            text.push_str(&format!("...and {} more stories\n", stories.len() - i));
            break;
        }

        text.push_str(&format!("{}. {}\n", i + 1, story.title));
        if story.has_metadata() {
            text.push_str(&format!(
                "Author: {} | Points: {} | Comments: {}\n",
                story.author, story.points, story.comments
            ));
        }
        if !story.url.is_empty() {
            text.push_str(&format!("URL: {}\n", story.url));
        }
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(title: &str) -> Story {
        Story {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(format_console_listing(&[]), "\nFound 0 stories:\n\n");
    }

    #[test]
    fn test_entry_layout() {
        let stories = vec![
            Story {
                title: "Full".to_string(),
                url: "https://example.test/a".to_string(),
                points: 12,
                comments: 3,
                author: "ann".to_string(),
                id: "1".to_string(),
            },
            story("Bare"),
        ];

        let text = format_console_listing(&stories);
        assert_eq!(
            text,
            "\nFound 2 stories:\n\n\
             1. Full\n\
             Author: ann | Points: 12 | Comments: 3\n\
             URL: https://example.test/a\n\n\
             2. Bare\n\n"
        );
    }

    #[test]
    fn test_truncates_after_limit() {
        let stories: Vec<Story> = (0..25).map(|i| story(&format!("Story {}", i))).collect();
        let text = format_console_listing(&stories);

        assert!(text.contains("20. Story 19\n"));
        assert!(!text.contains("21. "));
        assert!(text.ends_with("...and 5 more stories\n"));
    }

    #[test]
    fn test_exactly_limit_is_not_truncated() {
        let stories: Vec<Story> = (0..20).map(|i| story(&format!("S{}", i))).collect();
        assert!(!format_console_listing(&stories).contains("more stories"));
    }

    #[test]
    fn test_render_writes_listing() {
        let mut out = Vec::new();
        ConsoleRenderer.render(&[story("One")], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1. One\n"));
    }
}
