//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - JWT token generation and validation bound to an issuer and audience
//! - Authentication coordination
//!
//! Each service defines its own authentication traits and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!")
//!     .with_issuer("identity")
//!     .with_audience("localhost");
//! let claims = Claims::issued_for("42", Duration::minutes(15))
//!     .unwrap()
//!     .with_issuer("identity")
//!     .with_audience("localhost");
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("42"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, EMAIL_CLAIM};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!")
//!     .with_issuer("identity")
//!     .with_audience("localhost");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and sign a token
//! auth.verify_password("password123", &hash).unwrap();
//! let claims = auth
//!     .claims_for(42, Duration::minutes(15))
//!     .unwrap()
//!     .with_extra(EMAIL_CLAIM, "alice@example.com");
//! let token = auth.generate_token(&claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&token).unwrap();
//! assert_eq!(decoded.email(), Some("alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::EMAIL_CLAIM;
pub use jwt::REFRESH_TOKEN_ID_CLAIM;
pub use password::PasswordError;
pub use password::PasswordHasher;
