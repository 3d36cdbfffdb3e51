//! Stateless authentication engine
//!
//! Provides the credential-verification and token-lifecycle primitives for a
//! session-token login flow:
//! - Password hashing and verification (Argon2id, PHC string format)
//! - Signed session token minting and verification (access/refresh)
//!
//! The service layer composes these; this crate performs no I/O and holds no
//! shared mutable state, so every operation is safe to call concurrently.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth_core::{TokenCodec, TokenKind};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!!",
//!     "HS256",
//!     Duration::minutes(30),
//!     Duration::days(7),
//! )
//! .unwrap();
//!
//! let now = Utc::now();
//! let token = codec.mint(42, TokenKind::Access, now).unwrap();
//! let claims = codec.verify(&token, TokenKind::Access, now).unwrap();
//! assert_eq!(claims.subject().unwrap(), 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::ConfigError;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
