//! Search executor driving one storefront search.
//!
//! The executor borrows a browser session from its caller; it never launches
//! or closes one. Each step awaits the previous one, with fixed settle delays
//! and bounded waits taken from [`SearchConfig`].

use crate::error::{Result, ScrapeError};
use crate::parser::{ResultParser, SearchResult};
use crate::url_builder::build_search_url;
use shopscout_browser::{BrowserActions, ScrollPosition};
use shopscout_core::{AppConfig, SearchConfig, SearchQuery, SiteConfig};
use std::time::Duration;

/// Outcome of a search that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Between one and `max_results` products were extracted
    Found(SearchResult),
    /// The listing rendered but contained no result items
    NoResults,
}

impl SearchOutcome {
    /// Collapse into a result, empty when nothing was found.
    #[must_use]
    pub fn into_result(self) -> SearchResult {
        match self {
            Self::Found(result) => result,
            Self::NoResults => SearchResult::default(),
        }
    }
}

/// Runs searches against one storefront.
#[derive(Debug)]
pub struct SearchExecutor {
    site: SiteConfig,
    timings: SearchConfig,
    parser: ResultParser,
}

impl SearchExecutor {
    /// Create an executor from the application configuration.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::from_parts(config.site.clone(), config.search.clone())
    }

    /// Create an executor from site and timing settings.
    ///
    /// # Errors
    /// Returns [`ScrapeError::Config`] if `max_results` is outside
    /// `1..=MAX_RESULTS`, and [`ScrapeError::ParseFailure`] if a selector does
    /// not compile.
    pub fn from_parts(site: SiteConfig, timings: SearchConfig) -> Result<Self> {
        let parser = ResultParser::new(&site, timings.max_results)?;
        Ok(Self {
            site,
            timings,
            parser,
        })
    }

    /// Run a search and report a distinguishable outcome.
    ///
    /// Steps: navigate, settle, wait for result items, scroll cycles to
    /// trigger lazy loading, wait for an image, settle, snapshot, extract.
    pub async fn search<B>(&self, browser: &B, query: &SearchQuery) -> Result<SearchOutcome>
    where
        B: BrowserActions + ?Sized,
    {
        let url = build_search_url(&self.site, query)?;
        tracing::info!("Searching for '{}' at {}", query, url);

        browser
            .navigate(&url)
            .await
            .map_err(|e| ScrapeError::from_wait("navigation", e))?;
        settle(self.timings.navigation_settle_ms).await;

        let selectors = &self.site.selectors;
        browser
            .wait_for_selector(&selectors.result_item, self.timings.results_timeout_ms())
            .await
            .map_err(|e| ScrapeError::from_wait("result items", e))?;

        for cycle in 0..self.timings.scroll_cycles {
            tracing::debug!("Scroll cycle {}/{}", cycle + 1, self.timings.scroll_cycles);
            browser.scroll(ScrollPosition::Bottom).await?;
            settle(self.timings.scroll_delay_ms).await;
            browser.scroll(ScrollPosition::Top).await?;
            settle(self.timings.scroll_delay_ms).await;
        }

        browser
            .wait_for_selector(&selectors.loaded_image, self.timings.images_timeout_ms())
            .await
            .map_err(|e| ScrapeError::from_wait("images", e))?;
        settle(self.timings.final_settle_ms).await;

        let html = browser.page_source().await?;
        let outcome = self.extract(&html)?;

        match &outcome {
            SearchOutcome::Found(result) => {
                tracing::info!("Extracted {} products for '{}'", result.len(), query);
            }
            SearchOutcome::NoResults => tracing::info!("No results found for '{}'", query),
        }

        Ok(outcome)
    }

    /// Run a search, reporting every failure as an empty result.
    ///
    /// Callers cannot tell "nothing matched" from a timeout or parse failure;
    /// the error is only logged. Prefer [`SearchExecutor::search`].
    pub async fn search_lenient<B>(&self, browser: &B, query: &SearchQuery) -> SearchResult
    where
        B: BrowserActions + ?Sized,
    {
        match self.search(browser, query).await {
            Ok(outcome) => outcome.into_result(),
            Err(e) => {
                tracing::error!("Search for '{}' failed: {}", query, e);
                SearchResult::default()
            }
        }
    }

    /// Extract products from a page snapshot.
    pub fn extract(&self, html: &str) -> Result<SearchOutcome> {
        let result = self.parser.parse(html)?;
        if result.is_empty() {
            Ok(SearchOutcome::NoResults)
        } else {
            Ok(SearchOutcome::Found(result))
        }
    }
}

async fn settle(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = AppConfig::default();
        let executor = SearchExecutor::new(&config).expect("default config is valid");
        assert_eq!(executor.timings.results_timeout_ms(), 15_000);
        assert_eq!(executor.timings.images_timeout_ms(), 10_000);
    }

    #[test]
    fn test_extract_empty_page() {
        let executor = SearchExecutor::new(&AppConfig::default()).expect("valid config");
        let outcome = executor.extract("<html><body></body></html>").expect("extract");
        assert_eq!(outcome, SearchOutcome::NoResults);
        assert!(outcome.into_result().is_empty());
    }

    #[test]
    fn test_extract_found() {
        let executor = SearchExecutor::new(&AppConfig::default()).expect("valid config");
        let html = r#"<ul><li class="wizzy-result-product"><p class="product-item-title">Kurta</p></li></ul>"#;
        match executor.extract(html).expect("extract") {
            SearchOutcome::Found(result) => assert_eq!(result.products()[0].name, "Kurta"),
            SearchOutcome::NoResults => panic!("expected products"),
        }
    }
}
