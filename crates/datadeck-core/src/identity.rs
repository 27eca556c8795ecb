//! Identity domain model.
//!
//! Represents the authenticated user as returned by the backend's profile
//! endpoint and mirrored into durable credential storage.

use serde::{Deserialize, Serialize};

/// The authenticated identity.
///
/// Created from a login/signup response, held in process memory by the
/// session store and mirrored into durable storage; destroyed on logout
/// (memory and storage both cleared).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User's email address (also the login name)
    pub email: String,
    /// Role assigned at signup (e.g. "Member")
    pub role: String,
}

/// Role given to new accounts when the caller does not pick one.
pub const DEFAULT_ROLE: &str = "Member";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_roundtrip() {
        let identity = Identity {
            email: "ada@example.com".to_string(),
            role: DEFAULT_ROLE.to_string(),
        };
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }
}
