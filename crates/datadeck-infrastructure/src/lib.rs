//! Infrastructure crate for DataDeck.
//!
//! Provides the durable pieces of the client: persisted credential storage,
//! client configuration, and path management.

pub mod config;
pub mod credential_store;
pub mod paths;

pub use config::ClientConfig;
pub use credential_store::FileCredentialStore;
pub use paths::DeckPaths;
