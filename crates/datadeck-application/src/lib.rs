//! Application crate for DataDeck.
//!
//! Use cases orchestrating the core state machine against the gateway and
//! credential storage: session lifecycle, the dashboard fetch pump, and
//! validated uploads.

pub mod dashboard;
pub mod session_store;
#[cfg(test)]
pub(crate) mod test_support;
pub mod upload;

pub use dashboard::DashboardUseCase;
pub use session_store::SessionStore;
pub use upload::UploadUseCase;
