//! Interaction crate for DataDeck.
//!
//! Houses the HTTP gateway talking to the DataDeck backend. This is the sole
//! network egress of the client.

pub mod http_gateway;

pub use http_gateway::HttpGateway;
