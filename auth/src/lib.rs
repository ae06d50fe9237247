//! Authentication primitives for the HTTP backend.
//!
//! Provides the two security-sensitive building blocks:
//! - Password hashing and verification (Argon2id)
//! - Stateless session tokens: HS256-signed JWTs carrying an identity
//!   snapshot and a fixed eight-hour lifetime
//!
//! Both components take their inputs explicitly: the signing secret is
//! injected at construction and the clock is a parameter, so issuing and
//! decoding tokens are pure functions of (secret, clock, input).
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenCodec, TokenIdentity};
//! use chrono::Utc;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let identity = TokenIdentity {
//!     id: 1,
//!     email: "a@x.com".to_string(),
//!     name: "Alice".to_string(),
//! };
//! let token = codec.issue(identity, Utc::now()).unwrap();
//! let claims = codec.decode(&token, Utc::now()).unwrap();
//! assert_eq!(claims.user.id, 1);
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClaims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenIdentity;
