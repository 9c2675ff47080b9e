//! Credential primitives for the storefront backend.
//!
//! - Password hashing (Argon2id)
//! - Access token issuing and validation (HS256 JWT)
//! - Token lifetimes written the way operators write them (`"7d"`, `"12h"`)
//! - Single-use password reset tokens
//!
//! The service crate wraps these behind its own ports; nothing here knows
//! about users, storage or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims, TokenLifetime};
//!
//! let lifetime: TokenLifetime = "7d".parse().unwrap();
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", lifetime);
//!
//! let hash = auth.hash_password("password123").unwrap();
//!
//! let claims = auth.claims_for("user-1", "jane@example.com", "ROLE_MEMBER");
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//! assert!(result.bearer().starts_with("Bearer "));
//!
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.email, "jane@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod reset;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::BEARER_PREFIX;
pub use jwt::LifetimeError;
pub use jwt::TokenLifetime;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reset::ResetToken;
