//! Shared types used across the Shopscout workspace.
//!
//! This module defines validated newtypes for the values that cross crate
//! boundaries: search queries typed by users and identifiers handed to the
//! identity provider.

use crate::error::ShopscoutError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Maximum accepted length of a search query, in characters.
const MAX_QUERY_LEN: usize = 200;

/// Maximum length of a provider user ID.
const MAX_UID_LEN: usize = 128;

/// Free-text product search query.
///
/// Surrounding whitespace is trimmed; the query must not be empty afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Create a new `SearchQuery` from user input.
    ///
    /// # Errors
    /// Returns error if the query is blank or longer than 200 characters.
    pub fn new(query: impl AsRef<str>) -> Result<Self, ShopscoutError> {
        let query = query.as_ref().trim();

        if query.is_empty() {
            return Err(ShopscoutError::Validation(
                "search query must not be empty".to_string(),
            ));
        }

        let len = query.chars().count();
        if len > MAX_QUERY_LEN {
            return Err(ShopscoutError::Validation(format!(
                "search query must be at most {MAX_QUERY_LEN} characters, got {len}"
            )));
        }

        Ok(Self(query.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address with a basic shape check.
///
/// Only the `local@domain.tld` shape is checked; deliverability is the
/// identity provider's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new `EmailAddress` from a string.
    ///
    /// # Errors
    /// Returns error if the address does not look like `local@domain.tld`.
    pub fn new(email: impl Into<String>) -> Result<Self, ShopscoutError> {
        let email = email.into();
        Self::validate(&email)?;
        Ok(Self(email))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(email: &str) -> Result<(), ShopscoutError> {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        if regex.is_match(email) {
            Ok(())
        } else {
            Err(ShopscoutError::Validation(format!(
                "malformed email address: '{email}'"
            )))
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity-provider user identifier.
///
/// Provider UIDs are opaque, non-empty and at most 128 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new `UserId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is empty or longer than 128 characters.
    pub fn new(uid: impl Into<String>) -> Result<Self, ShopscoutError> {
        let uid = uid.into();
        let len = uid.chars().count();

        if len == 0 || len > MAX_UID_LEN {
            return Err(ShopscoutError::Validation(format!(
                "invalid uid: must be 1-{MAX_UID_LEN} characters, got {len} characters"
            )));
        }

        Ok(Self(uid))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_trims() {
        let query = SearchQuery::new("  linen shirt \n").expect("valid query");
        assert_eq!(query.as_str(), "linen shirt");
    }

    #[test]
    fn test_search_query_invalid() {
        let too_long = "a".repeat(201);
        for query in ["", "   ", too_long.as_str()] {
            assert!(SearchQuery::new(query).is_err(), "Should fail for: {query:?}");
        }
    }

    #[test]
    fn test_email_valid() {
        let valid = ["jane@example.com", "a.b+tag@shop.co.in"];
        for email in valid {
            assert!(EmailAddress::new(email).is_ok(), "Failed for: {email}");
        }
    }

    #[test]
    fn test_email_invalid() {
        let invalid = ["", "jane", "jane@", "@example.com", "jane@example", "ja ne@example.com"];
        for email in invalid {
            assert!(EmailAddress::new(email).is_err(), "Should fail for: {email}");
        }
    }

    #[test]
    fn test_user_id_bounds() {
        assert!(UserId::new("uid-123").is_ok());
        assert!(UserId::new("").is_err());
        assert!(UserId::new("u".repeat(129)).is_err());
        assert!(UserId::new("u".repeat(128)).is_ok());
    }

    #[test]
    fn test_newtype_serialization() {
        let uid = UserId::new("abc").expect("valid uid");
        let json = serde_json::to_string(&uid).expect("serialize uid");
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn test_user_id_counts_characters() {
        let multibyte = "é".repeat(MAX_UID_LEN);
        assert_eq!(multibyte.len(), MAX_UID_LEN * 2);
        assert!(UserId::new(multibyte).is_ok());

        let err = UserId::new("é".repeat(MAX_UID_LEN + 1)).unwrap_err();
        assert!(err.to_string().contains("got 129 characters"));
    }
}
