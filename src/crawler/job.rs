//! Per-page job: page index to URL, fetch, extract
//!
//! A [`PageJob`] is shared read-only by every worker. It holds no mutable state, so
//! concurrent calls for different page indices never interfere.

use crate::config::Config;
use crate::crawler::document::HtmlDocument;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::story::Story;
use crate::{ConfigError, PageError, SweepError};
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// 1-based listing page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(u32);

impl PageIndex {
    /// Returns None for 0
    pub fn new(page: u32) -> Option<Self> {
        (page >= 1).then_some(Self(page))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Every index from 1 through `count`, in order
    pub fn range(count: u32) -> impl Iterator<Item = PageIndex> {
        (1..=count).map(PageIndex)
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps page indices to listing URLs
#[derive(Debug, Clone)]
pub struct ListingSite {
    base: Url,
    origin: String,
}

impl ListingSite {
    /// Creates a site rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(format!(
                "base_url '{}' cannot have paths",
                base_url
            )));
        }
        let origin = base.origin().ascii_serialization();
        Ok(Self { base, origin })
    }

    /// Scheme, host and port of the site, without a trailing slash
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// URL of a listing page
    ///
    /// Page 1 is the root listing; page N > 1 is `news?p=N` under the root.
    pub fn page_url(&self, page: PageIndex) -> Url {
        let mut url = self.base.clone();
        if page.get() == 1 {
            return url;
        }

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("news");
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("p", &page.to_string());
        url
    }
}

/// Outcome of one page job
///
/// A failed page carries no stories: the outcome is either the stories or the error.
#[derive(Debug)]
pub struct PageResult {
    pub page: PageIndex,
    pub outcome: Result<Vec<Story>, PageError>,
}

impl PageResult {
    pub fn success(page: PageIndex, stories: Vec<Story>) -> Self {
        Self {
            page,
            outcome: Ok(stories),
        }
    }

    pub fn failure(page: PageIndex, error: PageError) -> Self {
        Self {
            page,
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Stories of a successful page, empty on failure
    pub fn stories(&self) -> &[Story] {
        match &self.outcome {
            Ok(stories) => stories,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&PageError> {
        self.outcome.as_ref().err()
    }
}

/// Fetch-then-extract pipeline for one listing page
pub struct PageJob {
    site: ListingSite,
    fetcher: Fetcher,
    extractor: Extractor<HtmlDocument>,
}

impl PageJob {
    pub fn new(site: ListingSite, fetcher: Fetcher, extractor: Extractor<HtmlDocument>) -> Self {
        Self {
            site,
            fetcher,
            extractor,
        }
    }

    /// Builds the site, HTTP client and extractor described by `config`
    pub fn from_config(config: &Config) -> Result<Self, SweepError> {
        let site = ListingSite::new(&config.site.base_url)?;
        let timeout = Duration::from_secs(config.scrape.timeout_secs);
        let client = build_http_client(&config.site, timeout)?;
        let extractor = Extractor::new(&config.site.layout, site.origin())?;
        Ok(Self::new(site, Fetcher::new(client), extractor))
    }

    pub fn site(&self) -> &ListingSite {
        &self.site
    }

    /// Fetches the raw document of `page`
    pub async fn fetch(
        &self,
        page: PageIndex,
        cancel: &CancellationToken,
    ) -> Result<String, PageError> {
        let url = self.site.page_url(page);
        self.fetcher.fetch(&url, cancel).await
    }

    /// Extracts stories from a fetched document
    pub fn parse(&self, body: &str) -> Vec<Story> {
        let document = HtmlDocument::parse(body);
        self.extractor.extract(&document)
    }

    /// Processes one page end to end, converting any failure into the result
    ///
    /// Returns `None` when `cancel` fires before the document arrives; an abandoned
    /// page has no result.
    pub async fn process(
        &self,
        page: PageIndex,
        cancel: &CancellationToken,
    ) -> Option<PageResult> {
        self.process_with(page, cancel, || {}).await
    }

    /// Like [`process`](Self::process), calling `on_fetched` once the document has
    /// arrived and extraction is about to start
    pub async fn process_with<F>(
        &self,
        page: PageIndex,
        cancel: &CancellationToken,
        on_fetched: F,
    ) -> Option<PageResult>
    where
        F: FnOnce(),
    {
        match self.fetch(page, cancel).await {
            Ok(body) => {
                on_fetched();
                Some(PageResult::success(page, self.parse(&body)))
            }
            Err(error) if error.is_cancellation() => None,
            Err(error) => Some(PageResult::failure(page, error)),
        }
    }
}
