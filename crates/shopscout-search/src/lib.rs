//! Shopscout Search - storefront product search and extraction.
//!
//! This crate drives a browser session through the storefront's search page
//! and turns the rendered listing into a bounded [`SearchResult`]. Waiting,
//! scrolling and snapshotting go through the `BrowserActions` trait; field
//! extraction is a pure function of the page snapshot.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopscout_browser::BrowserEngine;
//! use shopscout_core::{AppConfig, SearchQuery};
//! use shopscout_search::{SearchExecutor, SearchOutcome};
//!
//! let config = AppConfig::load_with_env()?;
//! let engine = BrowserEngine::with_config(&config.browser).await?;
//! let executor = SearchExecutor::new(&config)?;
//!
//! match executor.search(&engine, &SearchQuery::new("linen shirt")?).await? {
//!     SearchOutcome::Found(result) => println!("{} products", result.len()),
//!     SearchOutcome::NoResults => println!("nothing matched"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod executor;
pub mod parser;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use error::{Result, ScrapeError};
pub use executor::{SearchExecutor, SearchOutcome};
pub use parser::{FieldColumns, Product, ResultParser, SearchResult};
pub use url_builder::build_search_url;
