//! Session lifecycle management.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{RwLock, broadcast};

use super::event::SessionEvent;
use super::gateway::AuthGateway;
use super::model::SessionState;
use super::store::TokenStore;
use crate::error::Result;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// State plus the write counter backing the stale-response guard.
///
/// `epoch` increments whenever the session is torn down (logout or
/// expiry); a login response that started under an older epoch is
/// discarded instead of resurrecting the session.
struct Inner {
    state: SessionState,
    epoch: u64,
}

/// Owns the authentication session lifecycle.
///
/// `SessionManager` is responsible for:
/// - Restoring a persisted token at startup
/// - Exchanging credentials for a token on login
/// - Tearing the session down on logout
/// - Reacting to authorization failures reported by the gateway
///
/// All session writes go through one lock, so the bearer header and the
/// state cannot drift apart.
pub struct SessionManager {
    inner: Arc<RwLock<Inner>>,
    token_store: Arc<dyn TokenStore>,
    gateway: Arc<dyn AuthGateway>,
    events: broadcast::Sender<SessionEvent>,
    watcher_started: AtomicBool,
}

impl SessionManager {
    /// Creates a new manager in the `Loading` state.
    ///
    /// # Arguments
    ///
    /// * `token_store` - Persistence backend for the session token
    /// * `gateway` - HTTP side of authentication (login, bearer header)
    pub fn new(token_store: Arc<dyn TokenStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: SessionState::Loading,
                epoch: 0,
            })),
            token_store,
            gateway,
            events,
            watcher_started: AtomicBool::new(false),
        }
    }

    /// Restores the session from persisted storage and starts the
    /// authorization-failure watcher.
    ///
    /// Always leaves the `Loading` state, even when the storage read
    /// fails; a startup error must not leave consumers waiting on a
    /// pending indicator forever.
    pub async fn initialize(self: &Arc<Self>) -> Result<()> {
        self.spawn_unauthorized_watcher();

        let restored = self.token_store.load().await;
        let mut inner = self.inner.write().await;
        match restored {
            Ok(Some(token)) => {
                self.gateway.set_bearer(&token).await;
                tracing::debug!("restored persisted session token");
                inner.state = SessionState::Authenticated { token };
                Ok(())
            }
            Ok(None) => {
                inner.state = SessionState::Unauthenticated;
                Ok(())
            }
            Err(e) => {
                inner.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Exchanges credentials for a token and activates the session.
    ///
    /// On success the token is persisted, the bearer header is set, and
    /// `SessionEvent::LoggedIn` is published. On rejection the error
    /// carries the backend's human-readable message and the session is
    /// left untouched; nothing is persisted.
    ///
    /// A response that arrives after the session was logged out in the
    /// meantime is discarded without side effects.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let started_epoch = self.inner.read().await.epoch;

        let token = self.gateway.login(username, password).await?;

        let mut inner = self.inner.write().await;
        if inner.epoch != started_epoch {
            tracing::warn!("discarding login response that arrived after logout");
            return Ok(());
        }
        self.token_store.save(&token).await?;
        self.gateway.set_bearer(&token).await;
        inner.state = SessionState::Authenticated { token };
        drop(inner);

        let _ = self.events.send(SessionEvent::LoggedIn);
        Ok(())
    }

    /// Tears the session down: clears the persisted token, removes the
    /// bearer header, and publishes `SessionEvent::LoggedOut`.
    ///
    /// Makes no network call and is idempotent. A failure to remove the
    /// persisted token is logged; the teardown and the event stand
    /// regardless, so subscribers never miss a logout that happened.
    pub async fn logout(&self) {
        let mut inner = self.inner.write().await;
        inner.epoch += 1;
        inner.state = SessionState::Unauthenticated;
        self.gateway.clear_bearer().await;
        if let Err(e) = self.token_store.clear().await {
            tracing::warn!("failed to clear persisted token: {}", e);
        }
        drop(inner);

        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Current session state.
    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.state.is_authenticated()
    }

    /// The held token, if authenticated.
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.state.token().map(String::from)
    }

    /// Subscribes to session lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Starts the background task that turns unauthorized notices from
    /// the gateway into session expiry. Spawns at most once per manager.
    fn spawn_unauthorized_watcher(self: &Arc<Self>) {
        if self.watcher_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let mut notices = self.gateway.subscribe_unauthorized();
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match notices.recv().await {
                    Ok(()) => manager.handle_unauthorized().await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("unauthorized watcher lagged, skipped {} notices", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Forced logout on an authorization failure.
    ///
    /// Publishes `SessionEvent::SessionExpired` at most once per
    /// authenticated period: repeated notices while already
    /// unauthenticated are swallowed.
    async fn handle_unauthorized(&self) {
        let mut inner = self.inner.write().await;
        if !inner.state.is_authenticated() {
            return;
        }
        inner.epoch += 1;
        inner.state = SessionState::Unauthenticated;
        self.gateway.clear_bearer().await;
        if let Err(e) = self.token_store.clear().await {
            tracing::warn!("failed to clear persisted token: {}", e);
        }
        drop(inner);

        tracing::info!("session expired, backend rejected the held token");
        let _ = self.events.send(SessionEvent::SessionExpired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    // Mock token store backed by an in-memory slot.
    struct MockTokenStore {
        stored: Mutex<Option<String>>,
        fail_load: bool,
        fail_clear: bool,
    }

    impl MockTokenStore {
        fn empty() -> Self {
            Self {
                stored: Mutex::new(None),
                fail_load: false,
                fail_clear: false,
            }
        }

        fn with_token(token: &str) -> Self {
            Self {
                stored: Mutex::new(Some(token.to_string())),
                ..Self::empty()
            }
        }

        fn failing() -> Self {
            Self {
                fail_load: true,
                ..Self::empty()
            }
        }

        fn failing_clear(token: &str) -> Self {
            Self {
                fail_clear: true,
                ..Self::with_token(token)
            }
        }

        fn stored(&self) -> Option<String> {
            self.stored.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenStore for MockTokenStore {
        async fn load(&self) -> Result<Option<String>> {
            if self.fail_load {
                return Err(FolioError::Io {
                    message: "storage unavailable".to_string(),
                });
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, token: &str) -> Result<()> {
            *self.stored.lock().unwrap() = Some(token.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            if self.fail_clear {
                return Err(FolioError::Io {
                    message: "permission denied".to_string(),
                });
            }
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    // Mock gateway accepting one fixed credential pair. When gated, a
    // login call signals entry and then waits until released, so tests
    // can interleave a logout with an in-flight login.
    struct MockGateway {
        bearer: Mutex<Option<String>>,
        unauthorized: broadcast::Sender<()>,
        gated: bool,
        login_entered: Notify,
        login_release: Notify,
    }

    impl MockGateway {
        fn new() -> Self {
            let (unauthorized, _) = broadcast::channel(8);
            Self {
                bearer: Mutex::new(None),
                unauthorized,
                gated: false,
                login_entered: Notify::new(),
                login_release: Notify::new(),
            }
        }

        fn gated() -> Self {
            Self {
                gated: true,
                ..Self::new()
            }
        }

        fn bearer(&self) -> Option<String> {
            self.bearer.lock().unwrap().clone()
        }

        fn send_unauthorized(&self) {
            let _ = self.unauthorized.send(());
        }
    }

    #[async_trait]
    impl AuthGateway for MockGateway {
        async fn login(&self, username: &str, password: &str) -> Result<String> {
            if self.gated {
                self.login_entered.notify_one();
                self.login_release.notified().await;
            }
            if username == "admin@example.com" && password == "hunter2" {
                Ok("jwt-token".to_string())
            } else {
                Err(FolioError::auth("Incorrect email or password"))
            }
        }

        async fn set_bearer(&self, token: &str) {
            *self.bearer.lock().unwrap() = Some(token.to_string());
        }

        async fn clear_bearer(&self) {
            *self.bearer.lock().unwrap() = None;
        }

        fn subscribe_unauthorized(&self) -> broadcast::Receiver<()> {
            self.unauthorized.subscribe()
        }
    }

    fn manager_with(
        store: Arc<MockTokenStore>,
        gateway: Arc<MockGateway>,
    ) -> Arc<SessionManager> {
        Arc::new(SessionManager::new(store, gateway))
    }

    #[tokio::test]
    async fn test_initialize_restores_persisted_token() {
        let store = Arc::new(MockTokenStore::with_token("persisted"));
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store, gateway.clone());

        assert!(manager.state().await.is_loading());
        manager.initialize().await.unwrap();

        assert_eq!(manager.token().await, Some("persisted".to_string()));
        assert_eq!(gateway.bearer(), Some("persisted".to_string()));
    }

    #[tokio::test]
    async fn test_initialize_without_token_ends_unauthenticated() {
        let store = Arc::new(MockTokenStore::empty());
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store, gateway.clone());

        manager.initialize().await.unwrap();

        assert_eq!(manager.state().await, SessionState::Unauthenticated);
        assert!(gateway.bearer().is_none());
    }

    #[tokio::test]
    async fn test_initialize_leaves_loading_even_on_storage_error() {
        let store = Arc::new(MockTokenStore::failing());
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store, gateway);

        let result = manager.initialize().await;

        assert!(result.is_err());
        assert!(!manager.state().await.is_loading());
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_success_persists_and_sets_bearer() {
        let store = Arc::new(MockTokenStore::empty());
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store.clone(), gateway.clone());
        manager.initialize().await.unwrap();
        let mut events = manager.subscribe();

        manager.login("admin@example.com", "hunter2").await.unwrap();

        assert!(manager.is_authenticated().await);
        assert_eq!(store.stored(), Some("jwt-token".to_string()));
        assert_eq!(gateway.bearer(), Some("jwt-token".to_string()));
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedIn);
    }

    #[tokio::test]
    async fn test_login_failure_changes_nothing() {
        let store = Arc::new(MockTokenStore::empty());
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store.clone(), gateway.clone());
        manager.initialize().await.unwrap();

        let err = manager
            .login("admin@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Incorrect email or password");
        assert!(!manager.is_authenticated().await);
        assert!(store.stored().is_none());
        assert!(gateway.bearer().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_everything_and_is_idempotent() {
        let store = Arc::new(MockTokenStore::with_token("persisted"));
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store.clone(), gateway.clone());
        manager.initialize().await.unwrap();
        let mut events = manager.subscribe();

        manager.logout().await;

        assert_eq!(manager.state().await, SessionState::Unauthenticated);
        assert!(store.stored().is_none());
        assert!(gateway.bearer().is_none());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);

        // Second logout still succeeds.
        manager.logout().await;
        assert_eq!(manager.state().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_logout_still_notifies_when_clearing_storage_fails() {
        let store = Arc::new(MockTokenStore::failing_clear("persisted"));
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store.clone(), gateway.clone());
        manager.initialize().await.unwrap();
        let mut events = manager.subscribe();

        manager.logout().await;

        // The stale token stays behind, but the session itself is torn
        // down and subscribers hear about it.
        assert_eq!(manager.state().await, SessionState::Unauthenticated);
        assert!(gateway.bearer().is_none());
        assert_eq!(events.recv().await.unwrap(), SessionEvent::LoggedOut);
        assert_eq!(store.stored(), Some("persisted".to_string()));
    }

    #[tokio::test]
    async fn test_session_expires_exactly_once() {
        let store = Arc::new(MockTokenStore::with_token("persisted"));
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store.clone(), gateway.clone());
        manager.initialize().await.unwrap();
        let mut events = manager.subscribe();

        // Two authorization failures in a row, as when several protected
        // calls fail during the same navigation.
        manager.handle_unauthorized().await;
        manager.handle_unauthorized().await;

        assert_eq!(events.recv().await.unwrap(), SessionEvent::SessionExpired);
        assert!(events.try_recv().is_err());
        assert!(!manager.is_authenticated().await);
        assert!(store.stored().is_none());
        assert!(gateway.bearer().is_none());
    }

    #[tokio::test]
    async fn test_watcher_reacts_to_gateway_notice() {
        let store = Arc::new(MockTokenStore::with_token("persisted"));
        let gateway = Arc::new(MockGateway::new());
        let manager = manager_with(store, gateway.clone());
        manager.initialize().await.unwrap();
        let mut events = manager.subscribe();

        gateway.send_unauthorized();

        let event = timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("watcher did not react")
            .unwrap();
        assert_eq!(event, SessionEvent::SessionExpired);
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_stale_login_response_after_logout_is_discarded() {
        let store = Arc::new(MockTokenStore::empty());
        let gateway = Arc::new(MockGateway::gated());
        let manager = manager_with(store.clone(), gateway.clone());
        manager.initialize().await.unwrap();

        let login_manager = manager.clone();
        let login = tokio::spawn(async move {
            login_manager.login("admin@example.com", "hunter2").await
        });

        // Wait until the login request is in flight, then log out under it.
        gateway.login_entered.notified().await;
        manager.logout().await;
        gateway.login_release.notify_one();

        login.await.unwrap().unwrap();

        assert!(!manager.is_authenticated().await);
        assert!(store.stored().is_none());
        assert!(gateway.bearer().is_none());
    }
}
