//! Shopscout Authentication Layer
//!
//! Thin wrapper around an external identity provider. The provider is reached
//! through the [`IdentityProvider`] trait and reports failures as the closed
//! [`ProviderError`] set; this crate turns those into uniform [`AuthError`]
//! values carrying an HTTP-style status code.
//!
//! # Components
//!
//! 1. **Guard**: [`AuthGuard`] checks `Authorization: Bearer <token>` and
//!    hands an [`AuthContext`] to the protected handler
//! 2. **User management**: [`UserManager`] forwards create/read/update/delete
//!    and link generation to the provider
//! 3. **Credentials**: [`ServiceAccount`] loads the service-account document
//!    at startup; a missing file is fatal
//!
//! # Status mapping
//!
//! | Provider error | Guard | User operations |
//! |---|---|---|
//! | expired / revoked / invalid token | 401 | 401 (verify) |
//! | user not found | 401 | 404 |
//! | duplicate email, invalid argument | 401 | 400 |
//! | anything else | 401 | 500 |

pub mod credentials;
pub mod error;
pub mod guard;
pub mod provider;
pub mod translate;
pub mod users;

pub use credentials::{CredentialError, ServiceAccount};
pub use error::{AuthError, AuthErrorKind, ProviderError, ProviderResult, Result};
pub use guard::{bearer_token, AuthContext, AuthGuard};
pub use provider::{IdentityProvider, TokenClaims, UserRecord, UserUpdate};
pub use translate::{translate, Operation};
pub use users::{DeleteResponse, PasswordResetLink, UserManager, VerificationLink};
