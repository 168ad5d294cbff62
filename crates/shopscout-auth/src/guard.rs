//! Bearer-token guard for protected handlers.
//!
//! [`AuthGuard::protect`] is the interceptor: it checks the request headers
//! and either short-circuits with an [`AuthError`] or calls the handler with
//! the verified [`AuthContext`].

use crate::error::{AuthError, Result};
use crate::provider::{IdentityProvider, TokenClaims};
use crate::translate::{translate, Operation};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use std::future::Future;
use std::sync::Arc;

/// Verified caller identity, passed to protected handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    claims: TokenClaims,
}

impl AuthContext {
    #[must_use]
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims }
    }

    /// Verified user ID.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.claims.uid
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref()
    }

    /// All decoded claims.
    #[must_use]
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(AuthError::missing_header)?;
    let value = value.to_str().map_err(|_| AuthError::malformed_header())?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::malformed_header()),
    }
}

/// Guard that validates bearer tokens against an identity provider.
pub struct AuthGuard<P: ?Sized> {
    provider: Arc<P>,
}

impl<P> AuthGuard<P>
where
    P: IdentityProvider + ?Sized,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Check the request headers and verify the bearer token.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let token = bearer_token(headers).inspect_err(|e| {
            tracing::debug!("Rejected request: {}", e);
        })?;

        match self.provider.verify_id_token(token).await {
            Ok(claims) => {
                tracing::debug!("Authenticated uid {}", claims.uid);
                Ok(AuthContext::new(claims))
            }
            Err(e) => {
                let err = translate(Operation::Authenticate, &e);
                tracing::warn!("Token rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Run `handler` only if the request carries a valid bearer token.
    pub async fn protect<F, Fut, T>(&self, headers: &HeaderMap, handler: F) -> Result<T>
    where
        F: FnOnce(AuthContext) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let context = self.authenticate(headers).await?;
        handler(context).await
    }
}

impl<P: ?Sized> Clone for AuthGuard<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}
