//! Error types for the search flow.

use shopscout_browser::BrowserError;
use shopscout_core::ConfigError;
use thiserror::Error;

/// Errors raised while scraping a search page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A bounded wait ran out before the page reached the expected state
    #[error("timed out waiting for {stage}: {reason}")]
    Timeout {
        /// Which wait expired
        stage: String,
        /// Underlying timeout message
        reason: String,
    },

    /// The page snapshot could not be turned into results
    #[error("failed to parse search results: {reason}")]
    ParseFailure {
        /// What went wrong
        reason: String,
    },

    /// The configured site location is unusable
    #[error("invalid site configuration: {reason}")]
    InvalidSite {
        /// What went wrong
        reason: String,
    },

    /// A search setting is out of range
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    /// Any other browser failure
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),
}

impl ScrapeError {
    /// Classify a failed wait: timeouts become [`ScrapeError::Timeout`] tagged
    /// with `stage`, everything else stays a browser error.
    #[must_use]
    pub fn from_wait(stage: &str, err: BrowserError) -> Self {
        match err {
            BrowserError::Timeout(reason) => Self::Timeout {
                stage: stage.to_string(),
                reason,
            },
            other => Self::Browser(other),
        }
    }

    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            reason: reason.into(),
        }
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
