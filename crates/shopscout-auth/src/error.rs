//! Error types for authentication and user management.

use serde::Serialize;
use thiserror::Error;

/// Errors reported by an identity provider.
///
/// This is the complete set a provider may return; anything it cannot
/// classify goes into [`ProviderError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The ID token is past its expiry
    #[error("ID token has expired")]
    ExpiredIdToken,

    /// The ID token was revoked
    #[error("ID token has been revoked")]
    RevokedIdToken,

    /// The ID token is malformed or its signature does not verify
    #[error("invalid ID token: {0}")]
    InvalidIdToken(String),

    /// No user record matches the identifier
    #[error("no user record found for {0}")]
    UserNotFound(String),

    /// Another account already uses the email
    #[error("email already in use: {0}")]
    EmailAlreadyExists(String),

    /// An argument was rejected by the provider
    #[error("{0}")]
    InvalidArgument(String),

    /// The provider could not be reached
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// Any other provider failure
    #[error("{0}")]
    Unknown(String),
}

/// Result type alias for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Kind of an [`AuthError`]; determines its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    /// No `Authorization` header
    MissingHeader,
    /// `Authorization` header is not `Bearer <token>`
    MalformedHeader,
    /// Token past its expiry
    TokenExpired,
    /// Token revoked
    TokenRevoked,
    /// Token rejected as invalid
    TokenInvalid,
    /// Any other failure while verifying a token
    AuthenticationFailed,
    /// No such user
    UserNotFound,
    /// Email already taken
    UserAlreadyExists,
    /// Input rejected
    Validation,
    /// Provider failure outside the classified cases
    Provider,
}

impl AuthErrorKind {
    /// HTTP-style status code for this kind.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::MissingHeader
            | Self::MalformedHeader
            | Self::TokenExpired
            | Self::TokenRevoked
            | Self::TokenInvalid
            | Self::AuthenticationFailed => 401,
            Self::UserNotFound => 404,
            Self::UserAlreadyExists | Self::Validation => 400,
            Self::Provider => 500,
        }
    }
}

/// Uniform error returned by the guard and the user management wrapper.
///
/// Serializes as `{ "message": ..., "code": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct AuthError {
    #[serde(skip)]
    kind: AuthErrorKind,
    message: String,
    code: u16,
}

impl AuthError {
    /// Create an error; the code follows from `kind`.
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: kind.status(),
        }
    }

    /// Missing `Authorization` header.
    #[must_use]
    pub fn missing_header() -> Self {
        Self::new(AuthErrorKind::MissingHeader, "Authorization header is missing")
    }

    /// `Authorization` header without a bearer token.
    #[must_use]
    pub fn malformed_header() -> Self {
        Self::new(
            AuthErrorKind::MalformedHeader,
            "Invalid authorization header format",
        )
    }

    /// Input rejected before reaching the provider.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Validation, message)
    }

    /// Error kind.
    #[must_use]
    pub fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP-style status code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
