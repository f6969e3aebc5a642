//! Authentication utilities for the todo service.
//!
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256 JWT)
//! - Authentication coordination (credential check + token issuance)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Secret123").unwrap();
//! assert!(hasher.verify("Secret123", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_account("3f1c", "alice@example.com", 1);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.email, "alice@example.com");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 1);
//! let hash = auth.hash_password("Secret123").unwrap();
//!
//! let session = auth
//!     .authenticate("Secret123", &hash, "3f1c", "alice@example.com")
//!     .unwrap();
//! let claims = auth.validate_token(&session.access_token).unwrap();
//! assert_eq!(claims.sub, "3f1c");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
