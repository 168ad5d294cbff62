//! Browser automation engine for JavaScript-rendered storefront pages.
//!
//! Provides a single headless Chromium page with a randomized launch
//! fingerprint, driven through the [`BrowserActions`] trait so callers can
//! substitute their own session in tests.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fingerprint;

pub use actions::{BrowserActions, ScrollPosition};
pub use engine::BrowserEngine;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
