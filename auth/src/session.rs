use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Absolute session lifetime. No sliding expiry: a session dies 7 days
/// after creation regardless of activity.
pub const SESSION_LIFETIME_DAYS: i64 = 7;

const SESSION_ID_LENGTH: usize = 32;

/// A server-side session record, keyed by an opaque unguessable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::days(SESSION_LIFETIME_DAYS)
    }
}

/// In-memory session store shared across all concurrently handled requests.
///
/// Local to one process: there is no cross-instance session sharing, which
/// bounds horizontal scalability. Records are immutable after creation and
/// removed by explicit [`destroy`](SessionStore::destroy), lazily on an
/// expired [`lookup`](SessionStore::lookup), or by a periodic
/// [`sweep`](SessionStore::sweep).
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for the given user and return its id.
    ///
    /// The id comes from a cryptographically secure generator; callers
    /// surface it to clients as an HTTP-only, same-site-strict cookie with
    /// a matching max-age.
    pub fn create(&self, user_id: i64, username: &str) -> String {
        self.create_at(user_id, username, Utc::now())
    }

    fn create_at(&self, user_id: i64, username: &str, now: DateTime<Utc>) -> String {
        let id = generate_session_id();

        self.lock().insert(
            id.clone(),
            Session {
                id: id.clone(),
                user_id,
                username: username.to_string(),
                created_at: now,
            },
        );

        id
    }

    /// Return the session for `session_id` if it exists and is still live.
    ///
    /// An expired record is deleted as a side effect, so a session never
    /// resolves again once it has aged out.
    pub fn lookup(&self, session_id: &str) -> Option<Session> {
        self.lookup_at(session_id, Utc::now())
    }

    fn lookup_at(&self, session_id: &str, now: DateTime<Utc>) -> Option<Session> {
        let mut sessions = self.lock();

        match sessions.get(session_id) {
            Some(session) if session.is_expired_at(now) => {
                sessions.remove(session_id);
                None
            }
            Some(session) => Some(session.clone()),
            None => None,
        }
    }

    /// Remove a session. Idempotent: unknown ids are a no-op.
    pub fn destroy(&self, session_id: &str) {
        self.lock().remove(session_id);
    }

    /// Delete every expired record and return how many were removed.
    ///
    /// Lazy expiry in `lookup` is the primary enforcement; this reclaims
    /// memory for sessions that are never looked up again.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::debug!(removed, "Swept expired sessions");
        }

        removed
    }

    /// Enumerate live records for diagnostics. No ordering guarantee.
    pub fn list_active(&self) -> Vec<Session> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // Recover from a poisoned mutex: the map itself stays consistent
        // because every critical section is a single insert/remove/read.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn generate_session_id() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn create_then_lookup_round_trips() {
        let store = SessionStore::new();

        let id = store.create(7, "alice");
        let session = store.lookup(&id).expect("session not found");

        assert_eq!(session.id, id);
        assert_eq!(session.user_id, 7);
        assert_eq!(session.username, "alice");
    }

    #[test]
    fn session_ids_are_long_alphanumeric() {
        let id = generate_session_id();

        assert_eq!(id.len(), SESSION_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn session_ids_do_not_collide() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn destroy_is_idempotent() {
        let store = SessionStore::new();
        let id = store.create(7, "alice");

        store.destroy(&id);
        assert!(store.lookup(&id).is_none());

        // Second destroy of the same id is a no-op
        store.destroy(&id);
        store.destroy("never-existed");
    }

    #[test]
    fn expired_session_is_deleted_on_lookup() {
        let store = SessionStore::new();
        let eight_days_ago = Utc::now() - Duration::days(8);
        let id = store.create_at(7, "alice", eight_days_ago);

        assert!(store.lookup(&id).is_none());
        // The record is gone, not merely hidden
        assert!(store.list_active().is_empty());
        assert!(store.lookup(&id).is_none());
    }

    #[test]
    fn lookup_at_exact_lifetime_is_consistent() {
        let store = SessionStore::new();
        let created = Utc::now();
        let id = store.create_at(7, "alice", created);
        let boundary = created + Duration::days(SESSION_LIFETIME_DAYS);

        // Repeated lookups at the same instant agree with each other
        let first = store.lookup_at(&id, boundary).is_some();
        let second = store.lookup_at(&id, boundary).is_some();
        assert_eq!(first, second);
    }

    #[test]
    fn sweep_removes_only_expired_sessions() {
        let store = SessionStore::new();
        let now = Utc::now();

        let stale = store.create_at(1, "old", now - Duration::days(9));
        let fresh = store.create_at(2, "new", now - Duration::days(1));

        assert_eq!(store.sweep_at(now), 1);
        assert!(store.lookup_at(&stale, now).is_none());
        assert!(store.lookup_at(&fresh, now).is_some());
        assert_eq!(store.list_active().len(), 1);
    }

    #[test]
    fn list_active_enumerates_all_live_sessions() {
        let store = SessionStore::new();
        store.create(1, "alice");
        store.create(2, "bob");

        let mut usernames: Vec<String> = store
            .list_active()
            .into_iter()
            .map(|s| s.username)
            .collect();
        usernames.sort();

        assert_eq!(usernames, vec!["alice", "bob"]);
    }
}
