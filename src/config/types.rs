use crate::output::OutputFormat;
use serde::Deserialize;

/// Default listing origin
pub const DEFAULT_BASE_URL: &str = "https://news.ycombinator.com";

/// Main configuration structure for HN-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
}

/// Worker pool behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Number of listing pages to fetch (1..=10)
    pub pages: u32,

    /// Number of concurrent workers (1..=10)
    pub workers: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Pause after each page before a worker pulls its next job (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            pages: 1,
            workers: 3,
            timeout_secs: 30,
            politeness_delay_ms: 100,
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin of the listing; page 1 is its root
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Value of the User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Selectors describing the listing markup
    pub layout: ListingLayout,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("hn-sweep/{}", env!("CARGO_PKG_VERSION")),
            layout: ListingLayout::default(),
        }
    }
}

/// CSS selectors locating stories in a listing document
///
/// Defaults match the Hacker News front page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListingLayout {
    /// One primary row per story
    pub row: String,

    /// Title link inside a primary row (the first match is used)
    #[serde(rename = "title-link")]
    pub title_link: String,

    /// Metadata cell inside the row following a primary row
    pub subtext: String,

    /// Score element inside the metadata cell
    pub score: String,

    /// Author element inside the metadata cell
    pub author: String,

    /// Links inside the metadata cell; the last one carries the comment count
    pub link: String,

    /// Class marking a row as primary; a following row with it has no metadata
    #[serde(rename = "primary-row-class")]
    pub primary_row_class: String,
}

impl Default for ListingLayout {
    fn default() -> Self {
        Self {
            row: "tr.athing".to_string(),
            title_link: "span.titleline a".to_string(),
            subtext: "td.subtext".to_string(),
            score: "span.score".to_string(),
            author: "a.hnuser".to_string(),
            link: "a".to_string(),
            primary_row_class: "athing".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render mode for the final story list
    pub format: OutputFormat,

    /// Enable verbose logging
    pub verbose: bool,
}
