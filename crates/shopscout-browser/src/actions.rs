use crate::error::{BrowserError, Result};

/// Where to scroll the viewport to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    /// Top of the document
    Top,
    /// Bottom of the document, which triggers lazy loading on most listings
    Bottom,
}

impl ScrollPosition {
    /// JavaScript that moves the viewport to this position.
    #[must_use]
    pub fn script(self) -> &'static str {
        match self {
            Self::Top => "window.scrollTo(0, 0);",
            Self::Bottom => "window.scrollTo(0, document.body.scrollHeight);",
        }
    }
}

/// Browser actions used by the search flow.
///
/// A session is exclusively owned by one caller; implementations are not
/// expected to serialize concurrent use.
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait for a selector to appear, failing with a timeout after `timeout_ms`
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Scroll the viewport
    async fn scroll(&self, position: ScrollPosition) -> Result<()>;

    /// Snapshot the rendered page as HTML
    async fn page_source(&self) -> Result<String>;
}

/// Helper to extract domain from URL
pub fn extract_domain(url: &str) -> Result<String> {
    let url = url::Url::parse(url)
        .map_err(|e| BrowserError::NavigationError(format!("Invalid URL: {}", e)))?;

    url.host_str()
        .ok_or_else(|| BrowserError::NavigationError("No host in URL".to_string()))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(
            extract_domain("https://www.westside.com/pages/search?q=shirt").unwrap(),
            "www.westside.com"
        );
        assert_eq!(
            extract_domain("http://localhost:8080/path").unwrap(),
            "localhost"
        );
    }

    #[test]
    fn test_extract_domain_invalid() {
        assert!(extract_domain("not-a-url").is_err());
    }

    #[test]
    fn test_scroll_scripts() {
        assert!(ScrollPosition::Bottom.script().contains("scrollHeight"));
        assert_eq!(ScrollPosition::Top.script(), "window.scrollTo(0, 0);");
    }
}
