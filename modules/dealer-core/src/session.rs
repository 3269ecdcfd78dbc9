//! Session gate: holds the auth token and the manager flag.
//!
//! The token lives in the client's [`TokenStore`], so saving it here is what
//! makes every later request authenticated. The manager flag is re-derived
//! from the "who am I" endpoint after login and on restore.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use dealer_client::{DealerClient, DealerError, Profile, TokenStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token store error: {0}")]
    Store(#[from] DealerError),
}

/// The calls the gate needs from the backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn obtain_token(&self, username: &str, password: &str) -> dealer_client::Result<String>;
    async fn profile(&self) -> dealer_client::Result<Profile>;
    fn token_store(&self) -> Arc<dyn TokenStore>;
}

#[async_trait]
impl AuthBackend for DealerClient {
    async fn obtain_token(&self, username: &str, password: &str) -> dealer_client::Result<String> {
        DealerClient::obtain_token(self, username, password).await
    }

    async fn profile(&self) -> dealer_client::Result<Profile> {
        self.me().await
    }

    fn token_store(&self) -> Arc<dyn TokenStore> {
        self.tokens().clone()
    }
}

/// What is known about the signed-in user's role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleState {
    /// No profile yet, or the profile request failed.
    #[default]
    Unknown,
    Staff,
    Manager,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub username: Option<String>,
    pub role: RoleState,
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_manager(&self) -> bool {
        self.role == RoleState::Manager
    }
}

pub struct SessionGate<B: AuthBackend> {
    backend: B,
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl<B: AuthBackend> SessionGate<B> {
    /// Picks up any persisted token. Call [`restore_session`](Self::restore_session)
    /// before rendering protected views; until then the gate reports `loading`.
    pub fn new(backend: B) -> Result<Self, SessionError> {
        let store = backend.token_store();
        let token = store.load()?;
        let loading = token.is_some();

        Ok(Self {
            backend,
            store,
            state: RwLock::new(SessionState {
                token,
                loading,
                ..SessionState::default()
            }),
        })
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_manager(&self) -> bool {
        self.read().is_manager()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn role_state(&self) -> RoleState {
        self.read().role
    }

    pub fn username(&self) -> Option<String> {
        self.read().username.clone()
    }

    /// Log in and load the profile.
    ///
    /// Any failure of the token request is reported as
    /// [`SessionError::InvalidCredentials`]. A profile failure afterwards is
    /// only logged; the session keeps its token with [`RoleState::Unknown`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let token = match self.backend.obtain_token(username, password).await {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!(error = %e, "Token request failed");
                return Err(SessionError::InvalidCredentials);
            }
        };

        self.store.save(&token)?;
        {
            let mut state = self.write();
            state.token = Some(token);
            state.username = Some(username.to_string());
            state.role = RoleState::Unknown;
        }

        self.refresh_profile().await;
        tracing::info!(username, manager = self.is_manager(), "Signed in");
        Ok(())
    }

    /// Re-derive the role for a persisted token. `loading` stays set for the
    /// whole round-trip.
    pub async fn restore_session(&self) -> Result<(), SessionError> {
        let token = self.store.load()?;
        let Some(token) = token else {
            *self.write() = SessionState::default();
            return Ok(());
        };

        {
            let mut state = self.write();
            state.token = Some(token);
            state.loading = true;
        }

        self.refresh_profile().await;
        self.write().loading = false;
        Ok(())
    }

    /// Forget the token and role. Later requests go out without credentials.
    pub fn end_session(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        *self.write() = SessionState::default();
        tracing::info!("Signed out");
        Ok(())
    }

    async fn refresh_profile(&self) {
        match self.backend.profile().await {
            Ok(profile) => {
                let mut state = self.write();
                state.role = if profile.is_manager {
                    RoleState::Manager
                } else {
                    RoleState::Staff
                };
                state.username = Some(profile.username);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load profile; role unknown");
                self.write().role = RoleState::Unknown;
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_client::MemoryTokenStore;
    use std::sync::Mutex;

    struct FakeBackend {
        store: Arc<dyn TokenStore>,
        accept_password: &'static str,
        profile: Mutex<Option<Profile>>,
    }

    impl FakeBackend {
        fn new(store: Arc<dyn TokenStore>, profile: Option<Profile>) -> Self {
            Self {
                store,
                accept_password: "secret",
                profile: Mutex::new(profile),
            }
        }
    }

    #[async_trait]
    impl AuthBackend for FakeBackend {
        async fn obtain_token(&self, _username: &str, password: &str) -> dealer_client::Result<String> {
            if password == self.accept_password {
                Ok("tok-xyz".into())
            } else {
                Err(DealerError::InvalidCredentials)
            }
        }

        async fn profile(&self) -> dealer_client::Result<Profile> {
            self.profile
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| DealerError::Api {
                    status: 500,
                    message: "boom".into(),
                })
        }

        fn token_store(&self) -> Arc<dyn TokenStore> {
            self.store.clone()
        }
    }

    fn manager() -> Profile {
        Profile {
            username: "morgan".into(),
            is_manager: true,
            is_sales: true,
        }
    }

    #[tokio::test]
    async fn login_stores_token_and_role() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let gate = SessionGate::new(FakeBackend::new(store.clone(), Some(manager()))).unwrap();
        assert!(!gate.is_authenticated());
        assert!(!gate.is_loading());

        gate.authenticate("morgan", "secret").await.unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("tok-xyz"));
        assert!(gate.is_authenticated());
        assert!(gate.is_manager());
        assert_eq!(gate.username().as_deref(), Some("morgan"));
    }

    #[tokio::test]
    async fn bad_password_is_generic_error_and_leaves_state() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let gate = SessionGate::new(FakeBackend::new(store.clone(), Some(manager()))).unwrap();

        let err = gate.authenticate("morgan", "nope").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid username or password");
        assert!(!gate.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn profile_failure_keeps_token_with_unknown_role() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let gate = SessionGate::new(FakeBackend::new(store.clone(), None)).unwrap();

        gate.authenticate("morgan", "secret").await.unwrap();

        assert!(gate.is_authenticated());
        assert_eq!(gate.role_state(), RoleState::Unknown);
        assert!(!gate.is_manager());
    }

    #[tokio::test]
    async fn restore_without_token_is_unauthenticated() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let gate = SessionGate::new(FakeBackend::new(store, Some(manager()))).unwrap();

        gate.restore_session().await.unwrap();
        assert_eq!(gate.snapshot(), SessionState::default());
    }

    #[tokio::test]
    async fn restore_with_token_rederives_role() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("persisted"));
        let gate = SessionGate::new(FakeBackend::new(store, Some(manager()))).unwrap();
        assert!(gate.is_loading());
        assert!(!gate.is_manager());

        gate.restore_session().await.unwrap();

        let state = gate.snapshot();
        assert_eq!(state.token.as_deref(), Some("persisted"));
        assert!(!state.loading);
        assert!(state.is_manager());
    }

    struct GatedBackend {
        inner: FakeBackend,
        entered: Arc<tokio::sync::Notify>,
        release: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl AuthBackend for GatedBackend {
        async fn obtain_token(&self, username: &str, password: &str) -> dealer_client::Result<String> {
            self.inner.obtain_token(username, password).await
        }

        async fn profile(&self) -> dealer_client::Result<Profile> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.profile().await
        }

        fn token_store(&self) -> Arc<dyn TokenStore> {
            self.inner.token_store()
        }
    }

    #[tokio::test]
    async fn loading_holds_until_profile_settles() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("persisted"));
        let entered = Arc::new(tokio::sync::Notify::new());
        let release = Arc::new(tokio::sync::Notify::new());
        let backend = GatedBackend {
            inner: FakeBackend::new(store, Some(manager())),
            entered: entered.clone(),
            release: release.clone(),
        };
        let gate = Arc::new(SessionGate::new(backend).unwrap());

        let task = tokio::spawn({
            let gate = gate.clone();
            async move { gate.restore_session().await }
        });

        entered.notified().await;
        assert!(gate.is_loading());
        assert!(gate.is_authenticated());
        assert_eq!(gate.role_state(), RoleState::Unknown);

        release.notify_one();
        task.await.unwrap().unwrap();
        assert!(!gate.is_loading());
        assert!(gate.is_manager());
    }

    #[tokio::test]
    async fn end_session_clears_everything() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let gate = SessionGate::new(FakeBackend::new(store.clone(), Some(manager()))).unwrap();
        gate.authenticate("morgan", "secret").await.unwrap();

        gate.end_session().unwrap();

        assert_eq!(gate.snapshot(), SessionState::default());
        assert_eq!(store.load().unwrap(), None);
    }
}
