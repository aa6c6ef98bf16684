//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT bearer token issuance and verification
//! - Password reset token generation
//! - Authentication coordination
//!
//! Services define their own storage and HTTP concerns and adapt these implementations.
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
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::days(30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let subject = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```
//!
//! ## Password Reset Tokens
//! ```
//! use auth::ResetToken;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let reset = ResetToken::generate(now);
//! assert_eq!(reset.token().len(), 40);
//! assert!(reset.is_valid_at(now));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod reset;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use reset::ResetToken;
