//! Identity provider trait and the records it exchanges.

use crate::error::ProviderResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopscout_core::{EmailAddress, UserId};
use std::fmt;
use zeroize::Zeroizing;

/// External identity service.
///
/// Implementations own transport, retries and token-revocation bookkeeping.
/// Every failure must be reported as one of the [`ProviderError`] variants.
///
/// [`ProviderError`]: crate::error::ProviderError
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an ID token and decode its claims.
    async fn verify_id_token(&self, token: &str) -> ProviderResult<TokenClaims>;

    /// Create a user with email and password.
    async fn create_user(&self, email: &EmailAddress, password: &str)
        -> ProviderResult<UserRecord>;

    /// Fetch a user record.
    async fn get_user(&self, uid: &UserId) -> ProviderResult<UserRecord>;

    /// Apply the set fields of `update` to a user.
    async fn update_user(&self, uid: &UserId, update: &UserUpdate) -> ProviderResult<UserRecord>;

    /// Delete a user.
    async fn delete_user(&self, uid: &UserId) -> ProviderResult<()>;

    /// Generate an out-of-band password reset link.
    async fn generate_password_reset_link(&self, email: &EmailAddress) -> ProviderResult<String>;

    /// Generate an out-of-band email verification link.
    async fn generate_email_verification_link(
        &self,
        email: &EmailAddress,
    ) -> ProviderResult<String>;
}

/// User record as issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Decoded claims of a verified ID token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user ID
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    /// Custom claims
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TokenClaims {
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Fields to change on a user; unset fields are left alone.
#[derive(Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<Zeroizing<String>>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: Option<bool>,
    pub disabled: Option<bool>,
}

impl UserUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_email_verified(mut self, verified: bool) -> Self {
        self.email_verified = Some(verified);
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.display_name.is_none()
            && self.photo_url.is_none()
            && self.email_verified.is_none()
            && self.disabled.is_none()
    }
}

// Keeps the password out of logs.
impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("display_name", &self.display_name)
            .field("photo_url", &self.photo_url)
            .field("email_verified", &self.email_verified)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_deserialize_with_extras() {
        let claims: TokenClaims = serde_json::from_value(serde_json::json!({
            "uid": "user-1",
            "email": "jane@example.com",
            "email_verified": true,
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
            "role": "admin"
        }))
        .expect("deserialize claims");

        assert_eq!(claims.uid, "user-1");
        assert_eq!(claims.extra["role"], "admin");
        assert_eq!(
            claims.expires_at().map(|t| t.timestamp()),
            Some(1_700_003_600)
        );
        assert!(claims.issued_at() < claims.expires_at());
    }

    #[test]
    fn test_update_builder() {
        let update = UserUpdate::new()
            .with_display_name("Jane")
            .with_email_verified(true);
        assert!(!update.is_empty());
        assert_eq!(update.display_name.as_deref(), Some("Jane"));
        assert!(UserUpdate::new().is_empty());
    }

    #[test]
    fn test_update_debug_redacts_password() {
        let update = UserUpdate::new().with_password("hunter22");
        let debug = format!("{update:?}");
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("<redacted>"));
    }
}
