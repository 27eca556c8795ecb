//! Shared wiring for every subcommand.

use datadeck_application::SessionStore;
use datadeck_core::error::Result;
use datadeck_core::gateway::{CredentialStore, DataGateway};
use datadeck_infrastructure::{ClientConfig, FileCredentialStore};
use datadeck_interaction::HttpGateway;
use std::sync::Arc;

pub struct AppContext {
    pub config: ClientConfig,
    pub gateway: Arc<dyn DataGateway>,
    pub session: SessionStore,
}

impl AppContext {
    /// Loads configuration, builds the HTTP gateway, and adopts any persisted
    /// session before the subcommand runs.
    pub async fn bootstrap() -> Result<Self> {
        let config = ClientConfig::load()?;
        let gateway: Arc<dyn DataGateway> = Arc::new(HttpGateway::new(config.base_url.clone()));
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::from_env()?);
        let session = SessionStore::new(gateway.clone(), credentials);
        session.init_from_storage().await?;
        Ok(Self {
            config,
            gateway,
            session,
        })
    }
}
