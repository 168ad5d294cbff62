//! Shopscout Core - Foundation crate for the Shopscout workspace.
//!
//! This crate provides shared types, error handling and configuration
//! management that the browser, search, auth and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Validated newtypes (`SearchQuery`, `EmailAddress`, `UserId`)
//!
//! # Example
//!
//! ```rust
//! use shopscout_core::{AppConfig, SearchQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.search.max_results, 5);
//!
//! let query = SearchQuery::new("linen shirt")?;
//! assert_eq!(query.as_str(), "linen shirt");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    check_max_results, AppConfig, AuthConfig, BrowserConfig, SearchConfig, SelectorConfig,
    SiteConfig, MAX_RESULTS,
};
pub use error::{ConfigError, ConfigResult, Result, ShopscoutError};
pub use types::{EmailAddress, SearchQuery, UserId};
