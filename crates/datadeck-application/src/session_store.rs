//! Session store: the authenticated identity and its lifecycle.
//!
//! Holds the identity in memory, mirrors it (together with the bearer token)
//! into durable credential storage, and keeps the gateway's bearer credential
//! in sync. The token and identity are persisted and removed together; there
//! is never a persisted token without an identity.

use datadeck_core::error::{DeckError, Result};
use datadeck_core::gateway::{CredentialStore, DataGateway, StoredCredentials};
use datadeck_core::identity::Identity;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Owns the authenticated identity and the login/signup/logout operations.
pub struct SessionStore {
    gateway: Arc<dyn DataGateway>,
    credentials: Arc<dyn CredentialStore>,
    identity: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn DataGateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
            identity: RwLock::new(None),
        }
    }

    /// Adopts persisted credentials at startup, without revalidating the
    /// token against the backend.
    ///
    /// This is an intentional tradeoff: a stale or revoked token yields an
    /// optimistic "authenticated" state until the first guarded request
    /// fails. Returns the adopted identity, if any.
    pub async fn init_from_storage(&self) -> Result<Option<Identity>> {
        let Some(stored) = self.credentials.load().await? else {
            return Ok(None);
        };
        self.gateway.set_bearer(Some(stored.token)).await;
        *self.identity.write().await = Some(stored.identity.clone());
        tracing::debug!(email = %stored.identity.email, "restored session from storage");
        Ok(Some(stored.identity))
    }

    /// Creates an account and immediately logs in with the same credentials.
    ///
    /// # Errors
    ///
    /// Fails with an `Auth` error if either call fails. No partial state is
    /// retained: if the login after signup fails, the store's identity
    /// remains unset.
    pub async fn signup(&self, email: &str, password: &str, role: &str) -> Result<Identity> {
        self.gateway.signup(email, password, role).await?;
        self.login(email, password).await
    }

    /// Exchanges credentials for a bearer token, fetches the caller's own
    /// profile, persists token and identity together, and holds the identity
    /// in memory.
    ///
    /// # Errors
    ///
    /// Fails with an `Auth` error on invalid credentials or network failure;
    /// nothing is persisted and the gateway credential is cleared on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let token = self.gateway.exchange_token(email, password).await?;
        self.gateway.set_bearer(Some(token.clone())).await;

        let identity = match self.gateway.current_user().await {
            Ok(identity) => identity,
            Err(err) => {
                self.gateway.set_bearer(None).await;
                return Err(err);
            }
        };

        if let Err(err) = self
            .credentials
            .save(&StoredCredentials {
                token,
                identity: identity.clone(),
            })
            .await
        {
            // Same cleanup as a failed profile fetch: a login that cannot
            // persist its session leaves no credential on the gateway.
            self.gateway.set_bearer(None).await;
            return Err(DeckError::auth(format!(
                "could not persist session: {err}"
            )));
        }
        *self.identity.write().await = Some(identity.clone());
        tracing::info!(email = %identity.email, "logged in");
        Ok(identity)
    }

    /// Clears the in-memory identity and removes the persisted token and
    /// identity. Requires no network call and always succeeds; a storage
    /// error is logged and otherwise ignored.
    pub async fn logout(&self) {
        *self.identity.write().await = None;
        self.gateway.set_bearer(None).await;
        if let Err(err) = self.credentials.clear().await {
            tracing::warn!(error = %err, "failed to clear persisted credentials");
        }
    }

    /// The current identity, if authenticated.
    pub async fn identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.identity.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryCredentialStore, MockGateway};
    use datadeck_core::error::DeckError;

    fn identity() -> Identity {
        Identity {
            email: "ada@example.com".to_string(),
            role: "Member".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_token_and_identity_together() {
        let gateway = Arc::new(MockGateway::new().with_identity(identity()));
        let store = Arc::new(MemoryCredentialStore::default());
        let session = SessionStore::new(gateway.clone(), store.clone());

        let logged_in = session.login("ada@example.com", "pw").await.unwrap();
        assert_eq!(logged_in, identity());
        assert_eq!(session.identity().await, Some(identity()));

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.token, "token-1");
        assert_eq!(stored.identity, identity());
        assert_eq!(gateway.bearer().await.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_no_state() {
        let gateway = Arc::new(
            MockGateway::new().failing_token(DeckError::auth("invalid credentials")),
        );
        let store = Arc::new(MemoryCredentialStore::default());
        let session = SessionStore::new(gateway.clone(), store.clone());

        let err = session.login("ada@example.com", "wrong").await.unwrap_err();
        assert!(err.is_auth());
        assert!(session.identity().await.is_none());
        assert!(store.load().await.unwrap().is_none());
        assert!(gateway.bearer().await.is_none());
    }

    #[tokio::test]
    async fn test_profile_fetch_failure_clears_bearer() {
        let gateway =
            Arc::new(MockGateway::new().failing_me(DeckError::auth("profile unavailable")));
        let store = Arc::new(MemoryCredentialStore::default());
        let session = SessionStore::new(gateway.clone(), store.clone());

        assert!(session.login("ada@example.com", "pw").await.is_err());
        assert!(gateway.bearer().await.is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persist_failure_clears_bearer_and_maps_to_auth() {
        let gateway = Arc::new(MockGateway::new().with_identity(identity()));
        let store = Arc::new(
            MemoryCredentialStore::default().failing_save(DeckError::io("disk full")),
        );
        let session = SessionStore::new(gateway.clone(), store.clone());

        let err = session.login("ada@example.com", "pw").await.unwrap_err();
        assert!(err.is_auth());
        assert!(session.identity().await.is_none());
        assert!(store.load().await.unwrap().is_none());
        assert!(gateway.bearer().await.is_none());
    }

    #[tokio::test]
    async fn test_signup_auto_logs_in() {
        let gateway = Arc::new(MockGateway::new().with_identity(identity()));
        let store = Arc::new(MemoryCredentialStore::default());
        let session = SessionStore::new(gateway.clone(), store.clone());

        session
            .signup("ada@example.com", "pw", "Member")
            .await
            .unwrap();
        assert!(session.is_authenticated().await);
        assert_eq!(gateway.signup_calls(), 1);
        assert_eq!(gateway.token_calls(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let gateway = Arc::new(MockGateway::new().with_identity(identity()));
        let store = Arc::new(MemoryCredentialStore::default());
        let session = SessionStore::new(gateway.clone(), store.clone());

        session.login("ada@example.com", "pw").await.unwrap();
        session.logout().await;

        assert!(session.identity().await.is_none());
        assert!(store.load().await.unwrap().is_none());
        assert!(gateway.bearer().await.is_none());
    }

    #[tokio::test]
    async fn test_startup_without_credentials_is_unauthenticated_offline() {
        let gateway = Arc::new(MockGateway::new());
        let store = Arc::new(MemoryCredentialStore::default());
        let session = SessionStore::new(gateway.clone(), store);

        assert!(session.init_from_storage().await.unwrap().is_none());
        assert!(!session.is_authenticated().await);
        // No network call of any kind happened.
        assert_eq!(gateway.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_startup_adopts_persisted_identity_without_revalidation() {
        let gateway = Arc::new(MockGateway::new());
        let store = Arc::new(MemoryCredentialStore::default());
        store
            .save(&StoredCredentials {
                token: "stale-token".to_string(),
                identity: identity(),
            })
            .await
            .unwrap();

        let session = SessionStore::new(gateway.clone(), store);
        let adopted = session.init_from_storage().await.unwrap();
        assert_eq!(adopted, Some(identity()));
        assert_eq!(gateway.bearer().await.as_deref(), Some("stale-token"));
        // Optimistic startup: the token is not validated against the backend.
        assert_eq!(gateway.total_calls(), 0);
    }
}
