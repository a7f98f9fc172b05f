use std::sync::Arc;

use thiserror::Error;

use crate::session::SessionStore;
use crate::token::TokenIssuer;

const MISSING_TOKEN: &str = "Access token required";
const INVALID_TOKEN: &str = "Invalid or expired token";
const MISSING_SESSION: &str = "Session cookie required";
const INVALID_SESSION: &str = "Invalid or expired session";
const MISSING_ANY: &str =
    "Authentication required. Provide either Bearer token or session cookie";

/// How a caller proved their identity on this request.
///
/// Logout consults this tag: only `Session` identities have server-side
/// state that can be destroyed; a JWT stays valid until its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Jwt,
    Session,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Jwt => "jwt",
            AuthMethod::Session => "session",
        }
    }
}

/// The caller identity resolved for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub method: AuthMethod,
}

/// Credential resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Bearer token only.
    Jwt,
    /// Session cookie only.
    Session,
    /// Bearer token first, session cookie as fallback.
    Flexible,
}

/// Error type for identity resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No usable credential on the request (HTTP 401).
    #[error("{0}")]
    MissingCredentials(&'static str),

    /// A credential was presented but failed verification (HTTP 403).
    #[error("{0}")]
    InvalidCredentials(&'static str),
}

/// Resolves an inbound request's caller identity from its credentials.
///
/// Composes the stateless [`TokenIssuer`] with the stateful
/// [`SessionStore`]; all expiry arithmetic lives in those two components,
/// so every policy path shares one implementation.
pub struct AuthResolver {
    issuer: Arc<TokenIssuer>,
    sessions: Arc<SessionStore>,
}

impl AuthResolver {
    pub fn new(issuer: Arc<TokenIssuer>, sessions: Arc<SessionStore>) -> Self {
        Self { issuer, sessions }
    }

    /// Resolve the caller identity under the given policy.
    ///
    /// `bearer` is the token extracted from the authorization header,
    /// `session_id` the value of the session cookie; either may be absent.
    ///
    /// # Errors
    /// * `MissingCredentials` - Policy's credential (or, for flexible, both
    ///   credentials) absent or unusable
    /// * `InvalidCredentials` - Credential present but failed verification
    pub fn resolve(
        &self,
        bearer: Option<&str>,
        session_id: Option<&str>,
        policy: Policy,
    ) -> Result<Identity, ResolveError> {
        match policy {
            Policy::Jwt => self.resolve_jwt(bearer),
            Policy::Session => self.resolve_session(session_id),
            Policy::Flexible => {
                // JWT first: stateless, no store access needed.
                if let Ok(identity) = self.resolve_jwt(bearer) {
                    return Ok(identity);
                }
                if let Ok(identity) = self.resolve_session(session_id) {
                    return Ok(identity);
                }
                Err(ResolveError::MissingCredentials(MISSING_ANY))
            }
        }
    }

    /// Flexible resolution that never fails: with no valid credential the
    /// request simply proceeds without an identity.
    pub fn resolve_optional(
        &self,
        bearer: Option<&str>,
        session_id: Option<&str>,
    ) -> Option<Identity> {
        self.resolve(bearer, session_id, Policy::Flexible).ok()
    }

    fn resolve_jwt(&self, bearer: Option<&str>) -> Result<Identity, ResolveError> {
        let token = bearer.ok_or(ResolveError::MissingCredentials(MISSING_TOKEN))?;

        let claims = self
            .issuer
            .verify(token)
            .map_err(|_| ResolveError::InvalidCredentials(INVALID_TOKEN))?;

        let user_id = claims
            .user_id()
            .ok_or(ResolveError::InvalidCredentials(INVALID_TOKEN))?;

        Ok(Identity {
            user_id,
            username: claims.username,
            method: AuthMethod::Jwt,
        })
    }

    fn resolve_session(&self, session_id: Option<&str>) -> Result<Identity, ResolveError> {
        let session_id =
            session_id.ok_or(ResolveError::MissingCredentials(MISSING_SESSION))?;

        let session = self
            .sessions
            .lookup(session_id)
            .ok_or(ResolveError::InvalidCredentials(INVALID_SESSION))?;

        Ok(Identity {
            user_id: session.user_id,
            username: session.username,
            method: AuthMethod::Session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> (AuthResolver, Arc<TokenIssuer>, Arc<SessionStore>) {
        let issuer = Arc::new(
            TokenIssuer::new("test-secret-key-for-jwt-signing-at-least-32-bytes").unwrap(),
        );
        let sessions = Arc::new(SessionStore::new());
        let resolver = AuthResolver::new(Arc::clone(&issuer), Arc::clone(&sessions));
        (resolver, issuer, sessions)
    }

    #[test]
    fn jwt_policy_requires_a_token() {
        let (resolver, _, _) = resolver();

        assert!(matches!(
            resolver.resolve(None, None, Policy::Jwt),
            Err(ResolveError::MissingCredentials(_))
        ));
        assert!(matches!(
            resolver.resolve(Some("garbage"), None, Policy::Jwt),
            Err(ResolveError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn jwt_policy_resolves_a_valid_token() {
        let (resolver, issuer, _) = resolver();
        let token = issuer.issue(42, "alice").unwrap();

        let identity = resolver.resolve(Some(&token), None, Policy::Jwt).unwrap();

        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.method, AuthMethod::Jwt);
    }

    #[test]
    fn session_policy_requires_a_cookie() {
        let (resolver, _, _) = resolver();

        assert!(matches!(
            resolver.resolve(None, None, Policy::Session),
            Err(ResolveError::MissingCredentials(_))
        ));
        assert!(matches!(
            resolver.resolve(None, Some("unknown-session"), Policy::Session),
            Err(ResolveError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn session_policy_resolves_a_live_session() {
        let (resolver, _, sessions) = resolver();
        let id = sessions.create(42, "alice");

        let identity = resolver.resolve(None, Some(&id), Policy::Session).unwrap();

        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.method, AuthMethod::Session);
    }

    #[test]
    fn flexible_prefers_jwt_over_a_bad_cookie() {
        let (resolver, issuer, _) = resolver();
        let token = issuer.issue(42, "alice").unwrap();

        let identity = resolver
            .resolve(Some(&token), Some("bogus-session"), Policy::Flexible)
            .unwrap();

        assert_eq!(identity.method, AuthMethod::Jwt);
    }

    #[test]
    fn flexible_falls_back_to_session() {
        let (resolver, _, sessions) = resolver();
        let id = sessions.create(42, "alice");

        let identity = resolver
            .resolve(Some("garbage-token"), Some(&id), Policy::Flexible)
            .unwrap();

        assert_eq!(identity.method, AuthMethod::Session);
    }

    #[test]
    fn flexible_with_no_credentials_is_unauthorized() {
        let (resolver, _, _) = resolver();

        let err = resolver.resolve(None, None, Policy::Flexible).unwrap_err();

        assert!(matches!(err, ResolveError::MissingCredentials(_)));
        assert!(err.to_string().contains("Bearer token"));
        assert!(err.to_string().contains("session cookie"));
    }

    #[test]
    fn destroyed_session_stops_resolving_but_jwt_survives() {
        let (resolver, issuer, sessions) = resolver();
        let token = issuer.issue(42, "alice").unwrap();
        let session_id = sessions.create(42, "alice");

        // Logout destroys the server-side session only
        sessions.destroy(&session_id);

        assert!(matches!(
            resolver.resolve(None, Some(&session_id), Policy::Session),
            Err(ResolveError::InvalidCredentials(_))
        ));
        let identity = resolver
            .resolve(Some(&token), None, Policy::Flexible)
            .unwrap();
        assert_eq!(identity.method, AuthMethod::Jwt);
    }

    #[test]
    fn optional_resolution_never_fails() {
        let (resolver, issuer, _) = resolver();

        assert!(resolver.resolve_optional(None, None).is_none());

        let token = issuer.issue(42, "alice").unwrap();
        let identity = resolver.resolve_optional(Some(&token), None).unwrap();
        assert_eq!(identity.user_id, 42);
    }
}
