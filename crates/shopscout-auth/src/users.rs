//! User management passthrough.
//!
//! Each operation validates its input, forwards to the provider once and
//! translates a provider failure through [`translate`]. No batching, retries
//! or caching.

use crate::error::{AuthError, Result};
use crate::provider::{IdentityProvider, TokenClaims, UserRecord, UserUpdate};
use crate::translate::{translate, Operation};
use serde::Serialize;
use shopscout_core::{EmailAddress, UserId};
use std::sync::Arc;

/// Minimum password length accepted by the provider.
const MIN_PASSWORD_LEN: usize = 6;

/// Response of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetLink {
    pub reset_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationLink {
    pub verification_link: String,
}

/// User management wrapper around an identity provider.
pub struct UserManager<P: ?Sized> {
    provider: Arc<P>,
}

impl<P> UserManager<P>
where
    P: IdentityProvider + ?Sized,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Create a user.
    ///
    /// The email shape and password length are checked before the provider
    /// is called.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<UserRecord> {
        let email = parse_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }

        let user = self
            .provider
            .create_user(&email, password)
            .await
            .map_err(|e| failed(Operation::CreateUser, &e))?;

        tracing::info!("Created user {}", user.uid);
        Ok(user)
    }

    /// Verify an ID token; every failure is a 401.
    pub async fn verify_user(&self, token: &str) -> Result<TokenClaims> {
        self.provider
            .verify_id_token(token)
            .await
            .map_err(|e| failed(Operation::VerifyUser, &e))
    }

    pub async fn get_user(&self, uid: &str) -> Result<UserRecord> {
        let uid = parse_uid(uid)?;
        self.provider
            .get_user(&uid)
            .await
            .map_err(|e| failed(Operation::GetUser, &e))
    }

    /// Update the set fields of `update`.
    pub async fn update_user(&self, uid: &str, update: &UserUpdate) -> Result<UserRecord> {
        let uid = parse_uid(uid)?;
        if let Some(email) = &update.email {
            parse_email(email)?;
        }
        if let Some(password) = &update.password {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthError::validation(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters long"
                )));
            }
        }

        let user = self
            .provider
            .update_user(&uid, update)
            .await
            .map_err(|e| failed(Operation::UpdateUser, &e))?;

        tracing::info!("Updated user {}", user.uid);
        Ok(user)
    }

    pub async fn delete_user(&self, uid: &str) -> Result<DeleteResponse> {
        let uid = parse_uid(uid)?;
        self.provider
            .delete_user(&uid)
            .await
            .map_err(|e| failed(Operation::DeleteUser, &e))?;

        tracing::info!("Deleted user {}", uid);
        Ok(DeleteResponse { success: true })
    }

    pub async fn generate_password_reset_link(&self, email: &str) -> Result<PasswordResetLink> {
        let email = parse_email(email)?;
        let reset_link = self
            .provider
            .generate_password_reset_link(&email)
            .await
            .map_err(|e| failed(Operation::PasswordResetLink, &e))?;

        Ok(PasswordResetLink { reset_link })
    }

    pub async fn generate_email_verification_link(&self, email: &str) -> Result<VerificationLink> {
        let email = parse_email(email)?;
        let verification_link = self
            .provider
            .generate_email_verification_link(&email)
            .await
            .map_err(|e| failed(Operation::VerificationLink, &e))?;

        Ok(VerificationLink { verification_link })
    }
}

impl<P: ?Sized> Clone for UserManager<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

fn failed(op: Operation, err: &crate::error::ProviderError) -> AuthError {
    let translated = translate(op, err);
    tracing::warn!("{:?} failed ({}): {}", op, translated.code(), err);
    translated
}

fn parse_email(email: &str) -> Result<EmailAddress> {
    EmailAddress::new(email).map_err(|_| AuthError::validation(format!("Invalid email: '{email}'")))
}

fn parse_uid(uid: &str) -> Result<UserId> {
    UserId::new(uid).map_err(|e| AuthError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_rejects_garbage() {
        let err = parse_email("not-an-email").unwrap_err();
        assert_eq!(err.code(), 400);
        assert_eq!(err.message(), "Invalid email: 'not-an-email'");
    }

    #[test]
    fn test_parse_uid_rejects_empty() {
        let err = parse_uid("").unwrap_err();
        assert_eq!(err.code(), 400);
    }

    #[test]
    fn test_response_shapes() {
        let json = serde_json::to_value(DeleteResponse { success: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));

        let json = serde_json::to_value(PasswordResetLink {
            reset_link: "https://auth.example/reset".to_string(),
        })
        .unwrap();
        assert_eq!(json["reset_link"], "https://auth.example/reset");
    }
}
