//! services/dashboard/src/web/state.rs
//!
//! Defines the application's shared state and the per-session stores.

use crate::config::Config;
use crate::web::cookies::session_max_age;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use travel_portal_core::chat::ChatController;
use travel_portal_core::domain::{
    BlogPost, Commission, CommissionSummary, Document, GalleryItem, Package, Payment,
    Registration, Session, UserProfile,
};
use travel_portal_core::listing::ListController;
use travel_portal_core::ports::{
    AuthService, BlogService, ChatService, CommissionService, DocumentService, FinanceService,
    GalleryService, PackageService, PaymentService, RegistrationService, UserService,
};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub packages: Arc<dyn PackageService>,
    pub registrations: Arc<dyn RegistrationService>,
    pub payments: Arc<dyn PaymentService>,
    pub documents: Arc<dyn DocumentService>,
    pub commissions: Arc<dyn CommissionService>,
    pub chat: Arc<dyn ChatService>,
    pub blog: Arc<dyn BlogService>,
    pub gallery: Arc<dyn GalleryService>,
    pub finance: Arc<dyn FinanceService>,
    pub sessions: Arc<SessionStore>,
    pub views: Arc<ViewStore>,
}

impl AppState {
    /// Stores a session whose cookies are being (re)issued. Page state of any
    /// sessions that expired meanwhile is dropped along with them.
    pub async fn open_session(&self, session: Session) {
        for token in self.sessions.insert(session).await {
            self.views.remove(&token).await;
        }
    }

    /// Drops everything held for a token: the session and its page state.
    pub async fn end_session(&self, token: &str) -> Option<Session> {
        self.views.remove(token).await;
        self.sessions.remove(token).await
    }
}

//=========================================================================================
// SessionStore
//=========================================================================================

/// The single authoritative record of who is signed in, keyed by bearer token.
///
/// The `token` and `role` cookies are derived from these entries and never
/// read back as a source of truth for the role. An entry lives as long as the
/// cookies issued with it; after that it is treated as unknown.
pub struct SessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, StoredSession>>,
}

struct StoredSession {
    session: Session,
    issued_at: DateTime<Utc>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(session_max_age())
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a session issued now. Returns the tokens of expired entries
    /// pruned on the way.
    pub async fn insert(&self, session: Session) -> Vec<String> {
        self.insert_at(session, Utc::now()).await
    }

    pub async fn insert_at(&self, session: Session, issued_at: DateTime<Utc>) -> Vec<String> {
        let now = Utc::now();
        let mut sessions = self.inner.lock().await;
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, stored)| now - stored.issued_at >= self.ttl)
            .map(|(token, _)| token.clone())
            .collect();
        for token in &expired {
            sessions.remove(token);
        }
        sessions.insert(session.token.clone(), StoredSession { session, issued_at });
        expired
    }

    /// The live session for a token. An expired entry is removed and reported
    /// as unknown.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.inner.lock().await;
        let stored = sessions.get(token)?;
        if Utc::now() - stored.issued_at >= self.ttl {
            sessions.remove(token);
            return None;
        }
        Some(stored.session.clone())
    }

    pub async fn remove(&self, token: &str) -> Option<Session> {
        self.inner.lock().await.remove(token).map(|stored| stored.session)
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.inner.lock().await.contains_key(token)
    }

    pub async fn count(&self) -> usize {
        self.inner.lock().await.len()
    }
}

//=========================================================================================
// ViewStore (Page State Per Session)
//=========================================================================================

/// The commissions page also shows the agent's totals beside the list.
#[derive(Debug, Default)]
pub struct CommissionView {
    pub list: ListController<Commission>,
    pub summary: Option<CommissionSummary>,
}

/// Controller state for every page one session has visited.
#[derive(Debug, Default)]
pub struct PageViews {
    pub packages: ListController<Package>,
    pub registrations: ListController<Registration>,
    pub payments: ListController<Payment>,
    pub documents: ListController<Document>,
    pub commissions: CommissionView,
    pub jamaah: ListController<UserProfile>,
    pub users: ListController<UserProfile>,
    pub blog: ListController<BlogPost>,
    pub gallery: ListController<GalleryItem>,
    pub support: ChatController,
}

#[derive(Default)]
pub struct ViewStore {
    inner: Mutex<HashMap<String, PageViews>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the page state of one session, creating it on first use.
    ///
    /// The lock is released when `f` returns, so backend calls must happen
    /// outside of it.
    pub async fn with<R>(&self, token: &str, f: impl FnOnce(&mut PageViews) -> R) -> R {
        let mut views = self.inner.lock().await;
        f(views.entry(token.to_string()).or_default())
    }

    pub async fn remove(&self, token: &str) {
        self.inner.lock().await.remove(token);
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.inner.lock().await.contains_key(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_portal_core::domain::Role;

    fn session(token: &str) -> Session {
        Session::new(
            token,
            UserProfile {
                id: "u1".into(),
                name: "Ahmad".into(),
                email: "a@b.com".into(),
                phone: None,
                role: Role::Jamaah,
                referral_code: None,
                created_at: None,
            },
        )
    }

    #[tokio::test]
    async fn expired_session_is_unknown_and_evicted() {
        let store = SessionStore::new();
        store
            .insert_at(session("old"), Utc::now() - Duration::days(8))
            .await;
        assert!(store.contains("old").await);

        assert!(store.get("old").await.is_none());
        assert!(!store.contains("old").await);
    }

    #[tokio::test]
    async fn insert_prunes_expired_entries() {
        let store = SessionStore::with_ttl(Duration::hours(1));
        store
            .insert_at(session("stale"), Utc::now() - Duration::hours(2))
            .await;
        store
            .insert_at(session("fresh"), Utc::now() - Duration::minutes(5))
            .await;

        let pruned = store.insert(session("new")).await;
        assert_eq!(pruned, vec!["stale".to_string()]);
        assert_eq!(store.count().await, 2);
        assert_eq!(store.get("fresh").await.map(|s| s.token), Some("fresh".into()));
    }

    #[tokio::test]
    async fn reinsert_refreshes_the_issue_time() {
        let store = SessionStore::with_ttl(Duration::hours(1));
        store
            .insert_at(session("T"), Utc::now() - Duration::hours(2))
            .await;
        store.insert(session("T")).await;
        assert!(store.get("T").await.is_some());
    }
}
