//! Translation of provider errors into [`AuthError`]s.
//!
//! The outcome depends on which operation failed: token checks always answer
//! 401, user operations answer 404/400/500.

use crate::error::{AuthError, AuthErrorKind, ProviderError};

/// Operation whose provider error is being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Bearer-token check in front of a protected handler
    Authenticate,
    /// Explicit token verification through the user manager
    VerifyUser,
    /// Create a user
    CreateUser,
    /// Fetch a user
    GetUser,
    /// Update a user
    UpdateUser,
    /// Delete a user
    DeleteUser,
    /// Generate a password reset link
    PasswordResetLink,
    /// Generate an email verification link
    VerificationLink,
}

impl Operation {
    /// Message prefix for unclassified failures.
    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::Authenticate => "Authentication failed",
            Self::VerifyUser => "Token verification failed",
            Self::CreateUser => "User creation failed",
            Self::GetUser => "Failed to get user",
            Self::UpdateUser => "Failed to update user",
            Self::DeleteUser => "Failed to delete user",
            Self::PasswordResetLink => "Failed to generate reset link",
            Self::VerificationLink => "Failed to generate verification link",
        }
    }
}

/// Translate a provider error raised by `op`.
#[must_use]
pub fn translate(op: Operation, err: &ProviderError) -> AuthError {
    use AuthErrorKind as K;
    use ProviderError as P;

    let (kind, message): (AuthErrorKind, String) = match (op, err) {
        (Operation::Authenticate, P::ExpiredIdToken) => (K::TokenExpired, "Token has expired".into()),
        (Operation::Authenticate, P::RevokedIdToken) => {
            (K::TokenRevoked, "Token has been revoked".into())
        }
        (Operation::Authenticate, P::InvalidIdToken(_)) => (K::TokenInvalid, "Token is invalid".into()),
        (Operation::Authenticate | Operation::VerifyUser, other) => (
            K::AuthenticationFailed,
            format!("{}: {other}", op.failure_prefix()),
        ),
        (_, P::UserNotFound(_)) => (K::UserNotFound, "User not found".into()),
        (_, P::EmailAlreadyExists(_)) => (K::UserAlreadyExists, "Email already exists".into()),
        (_, P::InvalidArgument(message)) => (K::Validation, message.clone()),
        (_, other) => (K::Provider, format!("{}: {other}", op.failure_prefix())),
    };

    AuthError::new(kind, message)
}
