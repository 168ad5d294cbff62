use crate::actions::{extract_domain, BrowserActions, ScrollPosition};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures_util::stream::StreamExt;
use shopscout_core::BrowserConfig;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Interval between DOM checks while waiting for a selector.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Whether a failed lookup only means the node is not in the DOM yet.
///
/// A query that matches nothing surfaces as a protocol error from the node
/// lookup; transport failures do not and end the wait immediately.
fn is_missing_node(err: &CdpError) -> bool {
    matches!(err, CdpError::Chrome(_) | CdpError::NotFound)
}

/// Browser automation engine owning one Chromium page.
pub struct BrowserEngine {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserEngine {
    /// Create a new browser engine with default configuration
    pub async fn new() -> Result<Self> {
        Self::with_config(&BrowserConfig::default()).await
    }

    /// Create a new browser engine from browser settings
    pub async fn with_config(config: &BrowserConfig) -> Result<Self> {
        let fingerprint = FingerprintConfig::from_config(config);
        Self::launch(config, fingerprint).await
    }

    /// Create a new browser engine with a specific fingerprint
    pub async fn launch(config: &BrowserConfig, fingerprint: FingerprintConfig) -> Result<Self> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .arg(format!("--user-agent={}", fingerprint.user_agent));

        if !config.headless {
            builder = builder.with_head();
        }

        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tracing::info!(
            "Browser launched ({}x{}, headless: {})",
            fingerprint.viewport_width,
            fingerprint.viewport_height,
            config.headless
        );

        Ok(Self {
            browser,
            page,
            handler,
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }

    /// Close the browser and stop the event handler.
    pub async fn shutdown(mut self) -> Result<()> {
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        self.handler.abort();
        tracing::info!("Browser closed");
        closed.map(|_| ())
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserEngine {
    async fn navigate(&self, url: &str) -> Result<()> {
        let domain = extract_domain(url)?;
        tracing::debug!("Navigating to {} ({})", url, domain);

        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::NavigationError(format!("{url}: {e}"))),
            Err(_) => Err(BrowserError::Timeout(format!(
                "navigation to {domain} exceeded {:?}",
                self.navigation_timeout
            ))),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Duration::from_millis(timeout_ms);
        let start = Instant::now();
        let timed_out = || {
            BrowserError::Timeout(format!(
                "selector '{selector}' not present after {timeout_ms}ms"
            ))
        };

        loop {
            let remaining = deadline.saturating_sub(start.elapsed());
            match tokio::time::timeout(remaining, self.page.find_element(selector)).await {
                Ok(Ok(_)) => {
                    tracing::debug!("Selector '{}' present after {:?}", selector, start.elapsed());
                    return Ok(());
                }
                Ok(Err(e)) if is_missing_node(&e) => {}
                Ok(Err(e)) => return Err(BrowserError::ChromiumError(e.to_string())),
                Err(_) => return Err(timed_out()),
            }

            if start.elapsed() >= deadline {
                return Err(timed_out());
            }

            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn scroll(&self, position: ScrollPosition) -> Result<()> {
        self.page
            .evaluate(position.script())
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}
