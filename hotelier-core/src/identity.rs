use serde::{Deserialize, Serialize};
use async_trait::async_trait;

use crate::models::normalize_email;
use crate::CoreResult;

/// A requester whose credential has been checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    /// Case-insensitive comparison against a claimed email address.
    pub fn is(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify a bearer credential and return the identity it proves.
    /// Fails with `CoreError::Unauthorized`.
    async fn verify(&self, credential: &str) -> CoreResult<Identity>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matches_ignoring_case() {
        let identity = Identity { email: "Guest@Example.com".to_string() };
        assert!(identity.is("guest@example.com "));
        assert!(!identity.is("other@example.com"));
    }
}
