use crate::config::types::{Config, ListingLayout, ScrapeConfig, SiteConfig};
use crate::crawler::{Document, HtmlDocument};
use crate::ConfigError;
use url::Url;

/// Upper bound for both the page count and the worker count
pub const MAX_PAGES: u32 = 10;
pub const MAX_WORKERS: u32 = 10;

/// Validates the entire configuration
///
/// Runs before any network I/O; a failure here is fatal to the whole run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrape_config(&config.scrape)?;
    validate_site_config(&config.site)?;
    Ok(())
}

/// Validates worker pool configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.pages < 1 || config.pages > MAX_PAGES {
        return Err(ConfigError::Validation(format!(
            "pages must be between 1 and {}, got {}",
            MAX_PAGES, config.pages
        )));
    }

    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be at least 1 second, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    validate_layout(&config.layout)
}

/// Checks that every layout selector compiles
fn validate_layout(layout: &ListingLayout) -> Result<(), ConfigError> {
    let selectors = [
        ("row", &layout.row),
        ("title-link", &layout.title_link),
        ("subtext", &layout.subtext),
        ("score", &layout.score),
        ("author", &layout.author),
        ("link", &layout.link),
    ];

    for (name, css) in selectors {
        if HtmlDocument::compile(css).is_none() {
            return Err(ConfigError::InvalidSelector(format!(
                "{} selector '{}' does not parse",
                name, css
            )));
        }
    }

    if layout.primary_row_class.trim().is_empty() {
        return Err(ConfigError::Validation(
            "primary-row-class cannot be empty".to_string(),
        ));
    }

    Ok(())
}
