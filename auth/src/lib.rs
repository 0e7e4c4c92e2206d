//! Authentication utilities library
//!
//! Infrastructure pieces shared by the authentication service:
//! - Password hashing (Argon2id)
//! - Session-token generation and validation (signed JWT)
//! - Authentication coordination
//!
//! The service defines its own domain ports and adapts these implementations,
//! keeping domain logic free of cryptographic detail.
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
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Signin: verify and generate a session token
//! let claims = Claims::for_user(
//!     "user123",
//!     "alice".to_string(),
//!     "alice@example.com".to_string(),
//!     vec!["ROLE_USER".to_string()],
//!     24,
//! );
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Later requests: validate the token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.roles, vec!["ROLE_USER".to_string()]);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
