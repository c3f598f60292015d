//! Story extraction from listing documents
//!
//! Each listing row yields at most one [`Story`]:
//! - rows without title text are skipped
//! - site-relative links are prefixed with the site origin
//! - score, author and comment count come from the row that follows, unless that
//!   row is itself a primary row (job posts have no metadata)
//!
//! Extraction never fails. Missing elements and unparseable numbers leave the
//! corresponding field at its default.

use crate::config::ListingLayout;
use crate::crawler::document::{Document, Node};
use crate::story::Story;
use crate::ConfigError;

/// Extracts stories from documents of type `D` using a compiled [`ListingLayout`]
pub struct Extractor<D: Document> {
    row: D::Selector,
    title_link: D::Selector,
    subtext: D::Selector,
    score: D::Selector,
    author: D::Selector,
    link: D::Selector,
    primary_row_class: String,
    origin: String,
}

impl<D: Document> Extractor<D> {
    /// Compiles the layout selectors
    ///
    /// # Arguments
    ///
    /// * `layout` - Selectors describing the listing markup
    /// * `origin` - Scheme and host that site-relative links are resolved against
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - A selector did not parse
    pub fn new(layout: &ListingLayout, origin: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            row: compile::<D>(&layout.row)?,
            title_link: compile::<D>(&layout.title_link)?,
            subtext: compile::<D>(&layout.subtext)?,
            score: compile::<D>(&layout.score)?,
            author: compile::<D>(&layout.author)?,
            link: compile::<D>(&layout.link)?,
            primary_row_class: layout.primary_row_class.clone(),
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    /// Extracts every story of the document, in document order
    pub fn extract(&self, document: &D) -> Vec<Story> {
        document
            .select(&self.row)
            .filter_map(|row| self.extract_row(row))
            .collect()
    }

    fn extract_row<'a>(&self, row: D::Node<'a>) -> Option<Story>
    where
        D: 'a,
    {
        let id = row.attr("id").unwrap_or_default().to_string();

        let title_link = row.select_first(&self.title_link)?;
        let title = title_link.text().trim().to_string();
        if title.is_empty() {
            return None;
        }

        let href = title_link.attr("href").unwrap_or_default();
        let mut story = Story {
            title,
            url: resolve_story_url(href, &self.origin),
            id,
            ..Default::default()
        };

        if let Some(meta_row) = row.next_element() {
            if !meta_row.has_class(&self.primary_row_class) {
                self.read_metadata(meta_row, &mut story);
            }
        }

        Some(story)
    }

    fn read_metadata<'a>(&self, meta_row: D::Node<'a>, story: &mut Story)
    where
        D: 'a,
    {
        let Some(subtext) = meta_row.select_first(&self.subtext) else {
            return;
        };

        if let Some(score) = subtext.select_first(&self.score) {
            story.points = leading_number(&score.text()).unwrap_or(0);
        }

        story.author = subtext
            .select_first(&self.author)
            .map(|author| author.text().trim().to_string())
            .unwrap_or_default();

        // The last link is the comment count unless it is the author link itself
        if let Some(last_link) = subtext.select_last(&self.link) {
            let text = last_link.text();
            let text = text.trim();
            if !text.is_empty() && text != story.author {
                story.comments = leading_number(text).unwrap_or(0);
            }
        }
    }
}

fn compile<D: Document>(css: &str) -> Result<D::Selector, ConfigError> {
    D::compile(css)
        .ok_or_else(|| ConfigError::InvalidSelector(format!("'{}' does not parse", css)))
}

/// Resolves a story link against the site origin
///
/// Links starting with `/` are site-relative and get the origin prepended; anything
/// else is used verbatim. An empty href yields an empty URL.
///
/// # Example
///
/// ```
/// use hn_sweep::crawler::resolve_story_url;
///
/// assert_eq!(
///     resolve_story_url("/item?id=1", "https://example.test"),
///     "https://example.test/item?id=1"
/// );
/// assert_eq!(
///     resolve_story_url("https://other.test/x", "https://example.test"),
///     "https://other.test/x"
/// );
/// ```
pub fn resolve_story_url(href: &str, origin: &str) -> String {
    if href.is_empty() {
        String::new()
    } else if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

/// Parses the leading decimal digits of `text`, ignoring leading whitespace
///
/// `"42 points"` gives 42, `"12\u{a0}comments"` gives 12, `"discuss"` gives None.
pub fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
