//! Configuration management for Shopscout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that relocates the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SHOPSCOUT_CONFIG_DIR";

/// Upper bound on products extracted per search.
pub const MAX_RESULTS: usize = 5;

/// Main application configuration.
///
/// This is loaded from `~/.config/shopscout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storefront location and CSS selectors
    pub site: SiteConfig,
    /// Search flow timings
    pub search: SearchConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Identity provider settings
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    /// - `search.max_results` is outside `1..=MAX_RESULTS`
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.search.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SHOPSCOUT_HEADLESS`: Override browser headless mode (true/false)
    /// - `SHOPSCOUT_BASE_URL`: Override the storefront origin
    /// - `SHOPSCOUT_CREDENTIAL_FILE`: Override the service-account file
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Unparsable values are ignored and the configured value is kept.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SHOPSCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("SHOPSCOUT_BASE_URL") {
            let base_url = val.trim_end_matches('/').to_string();
            if !base_url.is_empty() {
                tracing::debug!("Override site.base_url from env: {}", base_url);
                self.site.base_url = base_url;
            }
        }

        if let Some(val) = lookup("SHOPSCOUT_CREDENTIAL_FILE") {
            if !val.is_empty() {
                tracing::debug!("Override auth.credential_file from env: {}", val);
                self.auth.credential_file = PathBuf::from(val);
            }
        }
    }

    /// Get the configuration directory.
    ///
    /// `SHOPSCOUT_CONFIG_DIR` takes precedence over the XDG location
    /// (`~/.config/shopscout`).
    pub fn config_dir() -> ConfigResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let dirs =
            ProjectDirs::from("com", "shopscout", "shopscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().to_path_buf())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> ConfigResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve the service-account credential file against `config_dir`.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn credential_path_in(&self, config_dir: &Path) -> PathBuf {
        if self.auth.credential_file.is_absolute() {
            self.auth.credential_file.clone()
        } else {
            config_dir.join(&self.auth.credential_file)
        }
    }
}

/// Storefront location and the selectors used to read its search page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin prefixed to relative product links, without trailing slash
    pub base_url: String,
    /// Path of the search page, relative to `base_url`
    pub search_path: String,
    /// Name of the query-string parameter carrying the search text
    pub query_param: String,
    /// CSS selectors for the result listing
    pub selectors: SelectorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.westside.com".to_string(),
            search_path: "/pages/search".to_string(),
            query_param: "q".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// CSS selectors for the search result listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One product in the listing
    pub result_item: String,
    /// Product title, relative to the result item
    pub name: String,
    /// Brand line, relative to the result item
    pub brand: String,
    /// Raw price text, relative to the result item
    pub price: String,
    /// Product page anchor, relative to the result item
    pub link: String,
    /// Product image, relative to the result item
    pub image: String,
    /// Page-level selector signalling that images have started loading
    pub loaded_image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            result_item: "li.wizzy-result-product".to_string(),
            name: "p.product-item-title".to_string(),
            brand: "p.product-item-sub-title".to_string(),
            price: "div.wizzy-product-item-price".to_string(),
            link: "a.wizzy-result-product-item".to_string(),
            image: "img".to_string(),
            loaded_image: "img[data-src], img[src]".to_string(),
        }
    }
}

/// Search flow timings and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of products extracted per search
    pub max_results: usize,
    /// Settle delay after navigation, in milliseconds
    pub navigation_settle_ms: u64,
    /// Deadline for the first result item to appear, in seconds
    pub results_timeout_secs: u64,
    /// Number of scroll-to-bottom/scroll-to-top cycles
    pub scroll_cycles: u32,
    /// Delay after each scroll, in milliseconds
    pub scroll_delay_ms: u64,
    /// Deadline for an image element to appear, in seconds
    pub images_timeout_secs: u64,
    /// Settle delay before the page snapshot, in milliseconds
    pub final_settle_ms: u64,
}

impl SearchConfig {
    /// Check the limits that cannot be expressed in the type.
    pub fn validate(&self) -> ConfigResult<()> {
        check_max_results(self.max_results)
    }

    /// Result-item deadline in milliseconds.
    #[must_use]
    pub fn results_timeout_ms(&self) -> u64 {
        self.results_timeout_secs.saturating_mul(1000)
    }

    /// Image deadline in milliseconds.
    #[must_use]
    pub fn images_timeout_ms(&self) -> u64 {
        self.images_timeout_secs.saturating_mul(1000)
    }
}

/// Reject a per-search product limit outside `1..=MAX_RESULTS`.
pub fn check_max_results(max_results: usize) -> ConfigResult<()> {
    if (1..=MAX_RESULTS).contains(&max_results) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: "search.max_results".to_string(),
            reason: format!("{max_results} is outside 1..={MAX_RESULTS}"),
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            navigation_settle_ms: 1000,
            results_timeout_secs: 15,
            scroll_cycles: 3,
            scroll_delay_ms: 1000,
            images_timeout_secs: 10,
            final_settle_ms: 2000,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Randomize the user agent and viewport at launch
    pub randomize_fingerprint: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            randomize_fingerprint: true,
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Service-account credential file, relative to the config directory
    pub credential_file: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credential_file: PathBuf::from("service_account.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.site.base_url, "https://www.westside.com");
        assert_eq!(config.site.search_path, "/pages/search");
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.results_timeout_secs, 15);
        assert_eq!(config.search.images_timeout_secs, 10);
        assert_eq!(config.search.scroll_cycles, 3);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[site]"));
        assert!(toml_str.contains("[site.selectors]"));
        assert!(toml_str.contains("[search]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.site.selectors, config.site.selectors);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let config =
            AppConfig::load_from(&tmp.path().join("absent.toml")).expect("defaults when absent");
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.search.scroll_cycles = 1;
        config.browser.headless = false;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.search.scroll_cycles, 1);
        assert!(!loaded.browser.headless);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[search\nmax_results = ").expect("write config file");

        let err = AppConfig::load_from(&config_path).expect_err("invalid TOML must fail");
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SHOPSCOUT_HEADLESS", "false"),
            ("SHOPSCOUT_BASE_URL", "https://staging.westside.com/"),
            ("SHOPSCOUT_CREDENTIAL_FILE", "/etc/shopscout/sa.json"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert!(!config.browser.headless);
        assert_eq!(config.site.base_url, "https://staging.westside.com");
        assert_eq!(
            config.auth.credential_file,
            PathBuf::from("/etc/shopscout/sa.json")
        );
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| {
            (key == "SHOPSCOUT_HEADLESS").then(|| "maybe".to_string())
        });
        assert!(config.browser.headless);
    }

    #[test]
    fn test_credential_path_resolution() {
        let config = AppConfig::default();
        let dir = Path::new("/opt/shopscout/config");
        assert_eq!(
            config.credential_path_in(dir),
            dir.join("service_account.json")
        );

        let mut config = AppConfig::default();
        config.auth.credential_file = PathBuf::from("/secrets/sa.json");
        assert_eq!(
            config.credential_path_in(dir),
            PathBuf::from("/secrets/sa.json")
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[site]
base_url = "https://example.com"

[search]
max_results = 3
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.search.max_results, 3);
        // These should be defaults
        assert_eq!(config.site.selectors.result_item, "li.wizzy-result-product");
        assert_eq!(config.search.images_timeout_secs, 10);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_max_results_bounds() {
        assert!(check_max_results(1).is_ok());
        assert!(check_max_results(MAX_RESULTS).is_ok());

        for bad in [0, MAX_RESULTS + 1] {
            let err = check_max_results(bad).expect_err("out of range");
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref field, .. } if field == "search.max_results"
            ));
        }
    }

    #[test]
    fn test_load_from_rejects_oversized_limit() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[search]\nmax_results = 6\n").expect("write config file");

        let err = AppConfig::load_from(&config_path).expect_err("limit above 5 must fail");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_timeouts_in_millis_saturate() {
        let mut search = SearchConfig::default();
        assert_eq!(search.results_timeout_ms(), 15_000);
        assert_eq!(search.images_timeout_ms(), 10_000);

        search.results_timeout_secs = u64::MAX;
        assert_eq!(search.results_timeout_ms(), u64::MAX);
    }
}
