//! Authentication library for the social backend.
//!
//! Provides the pieces the HTTP service composes per request:
//! - Password hashing (Argon2id)
//! - Stateless bearer tokens (JWT, fixed 7-day expiry)
//! - An in-memory session store with lazy expiry
//! - An [`AuthResolver`] that resolves a caller identity under a
//!   configurable policy (JWT-only, session-only, or flexible)
//!
//! The session store and token issuer are constructed once at startup and
//! injected explicitly; nothing in this crate reads process environment or
//! holds hidden global state.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use auth::{AuthResolver, Policy, SessionStore, TokenIssuer};
//!
//! let issuer = Arc::new(TokenIssuer::new("secret_key_at_least_32_bytes_long!").unwrap());
//! let sessions = Arc::new(SessionStore::new());
//! let resolver = AuthResolver::new(Arc::clone(&issuer), Arc::clone(&sessions));
//!
//! let token = issuer.issue(42, "alice").unwrap();
//! let identity = resolver
//!     .resolve(Some(&token), None, Policy::Flexible)
//!     .unwrap();
//! assert_eq!(identity.user_id, 42);
//! ```

pub mod password;
pub mod resolver;
pub mod session;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use resolver::AuthMethod;
pub use resolver::AuthResolver;
pub use resolver::Identity;
pub use resolver::Policy;
pub use resolver::ResolveError;
pub use session::Session;
pub use session::SessionStore;
pub use session::SESSION_LIFETIME_DAYS;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
