//! Core domain crate for DataDeck.
//!
//! Contains the domain models (identity, dataset, chart), the shared error
//! type, client-side upload validation, the dataset view state machine, and
//! the trait seams (`DataGateway`, `CredentialStore`) implemented by the
//! infrastructure and interaction crates. This crate performs no I/O.

pub mod chart;
pub mod dataset;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod upload;
pub mod view;

// Re-export common error type
pub use error::{DeckError, Result};
