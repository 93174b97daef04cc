//! Requester identity

use crate::error::{Error, Result};

// TODO: replace with a provider backed by the auth session once the backend
// issues tokens; until then every request is attributed to this account.
pub const PLACEHOLDER_REQUESTER_ID: &str = "665f4cbd2ec4e59e2a257a9a";

/// Source of the id sent as `requester` when creating a request
pub trait IdentityProvider: Send + Sync {
    fn requester_id(&self) -> Result<String>;
}

/// Fixed requester id
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    id: String,
}

impl StaticIdentity {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }

    /// The shared placeholder account
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_REQUESTER_ID)
    }
}

impl IdentityProvider for StaticIdentity {
    fn requester_id(&self) -> Result<String> {
        if self.id.trim().is_empty() {
            return Err(Error::identity("requester id is empty"));
        }
        Ok(self.id.clone())
    }
}
