use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::models::Session;

/// Thread-safe in-memory session store, keyed by the upstream-issued
/// session token.
///
/// Expiry is enforced twice: lazily on `get` (an expired entry is removed
/// and reported absent) and by a periodic sweep owned by `spawn_sweeper`.
/// A session handed out by `get` always has its expiry in the future.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Insert or replace the entry keyed by the session token.
    pub fn put(&self, session: Session) {
        self.sessions.insert(session.token.clone(), session);
    }

    /// Returns the session only while unexpired; an expired entry is
    /// deleted as a side effect (lazy expiry).
    pub fn get(&self, token: &str) -> Option<Session> {
        let entry = self.sessions.get(token)?;
        let session = entry.value().clone();

        if session.is_expired() {
            drop(entry); // release the shard lock before removing
            self.sessions.remove(token);
            debug!("session for {} expired, removed on read", session.username);
            return None;
        }

        Some(session)
    }

    /// Unconditional removal; absent tokens are fine.
    pub fn remove(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Removes every entry whose expiry has passed. Returns the count
    /// removed.
    pub fn sweep(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Starts the periodic sweep task. The returned handle aborts the task
    /// when dropped, tying the sweeper to the store's lifecycle.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> SweeperHandle {
        let store = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick fires immediately; skip it so sweeps start
            // one full interval after startup
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.sweep();
                if removed > 0 {
                    debug!("sweeper removed {} expired sessions", removed);
                }
            }
        });
        SweeperHandle { handle }
    }
}

/// Guard for the background sweep task; aborts it on drop.
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Environment;
    use chrono::{Duration as ChronoDuration, Utc};

    fn session(token: &str, expires_in_seconds: i64) -> Session {
        Session {
            token: token.to_string(),
            username: "manager".to_string(),
            environment: Environment::Hana,
            version: "10.0".to_string(),
            timeout_minutes: 30,
            expires_at: Utc::now() + ChronoDuration::seconds(expires_in_seconds),
        }
    }

    #[test]
    fn get_returns_unexpired_sessions() {
        let store = SessionStore::new();
        store.put(session("live", 600));

        let found = store.get("live").unwrap();
        assert_eq!(found.token, "live");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_removes_expired_sessions_on_read() {
        let store = SessionStore::new();
        store.put(session("stale", -1));

        assert!(store.get("stale").is_none());
        // the lazy delete means the entry is gone, not just hidden
        assert!(store.is_empty());
        assert!(store.get("stale").is_none());
    }

    #[test]
    fn get_on_unknown_token_is_absent() {
        let store = SessionStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn put_replaces_entry_with_same_token() {
        let store = SessionStore::new();
        store.put(session("tok", 60));
        let mut renewed = session("tok", 1200);
        renewed.username = "other".to_string();
        store.put(renewed);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("tok").unwrap().username, "other");
    }

    #[test]
    fn remove_is_unconditional_and_tolerates_absent() {
        let store = SessionStore::new();
        store.put(session("tok", 600));
        store.remove("tok");
        store.remove("tok");
        assert!(store.is_empty());
    }

    #[test]
    fn sweep_removes_exactly_the_expired_subset() {
        let store = SessionStore::new();
        store.put(session("dead-1", -120));
        store.put(session("dead-2", -1));
        store.put(session("live-1", 300));
        store.put(session("live-2", 3600));

        assert_eq!(store.sweep(), 2);
        assert_eq!(store.len(), 2);
        assert!(store.get("live-1").is_some());
        assert!(store.get("live-2").is_some());
        assert!(store.get("dead-1").is_none());
    }

    #[test]
    fn sweep_on_empty_store_is_a_noop() {
        let store = SessionStore::new();
        assert_eq!(store.sweep(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_task_cleans_up_on_its_interval() {
        let store = Arc::new(SessionStore::new());
        store.put(session("stale", -60));

        let _sweeper = store.spawn_sweeper(Duration::from_secs(300));
        // let the task start and register its interval before advancing
        tokio::task::yield_now().await;
        assert_eq!(store.len(), 1);

        tokio::time::advance(Duration::from_secs(301)).await;
        tokio::task::yield_now().await;

        assert!(store.is_empty());
    }
}
