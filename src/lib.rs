//! FoodShare Rust Client Library
//!
//! Client-side core of the FoodShare receiver dashboard: typed access to the
//! backend, the listing and request stores, and the request submission flow.

pub mod api;
pub mod config;
mod decode;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod listings;
pub mod requests;
pub mod session;
pub mod submission;

use std::sync::Arc;

use crate::api::FoodShareClient;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::identity::IdentityProvider;
use crate::session::DashboardSession;

/// The main entry point for the FoodShare client
pub struct FoodShare {
    /// Client options
    pub options: ClientOptions,
    /// HTTP client for the backend
    client: FoodShareClient,
}

impl FoodShare {
    /// Create a new client with default options
    ///
    /// # Example
    ///
    /// ```
    /// use foodshare_client::FoodShare;
    ///
    /// let foodshare = FoodShare::new().unwrap();
    /// assert_eq!(foodshare.client().base_url().as_str(), "http://localhost:6069/api");
    /// ```
    pub fn new() -> Result<Self> {
        Self::new_with_options(ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use foodshare_client::{FoodShare, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_origin("https://foodshare.example.org");
    /// let foodshare = FoodShare::new_with_options(options).unwrap();
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Result<Self> {
        let client = FoodShareClient::new(&options)?;
        Ok(Self { options, client })
    }

    /// Create a client configured from `FOODSHARE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ClientOptions::from_env()?)
    }

    /// Get a reference to the backend client
    pub fn client(&self) -> &FoodShareClient {
        &self.client
    }

    /// Open a dashboard session for the given requester
    ///
    /// Call [`DashboardSession::mount`] to populate it.
    pub fn session(&self, identity: Arc<dyn IdentityProvider>) -> DashboardSession {
        DashboardSession::new(Arc::new(self.client.clone()), identity)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::FoodShare;
    pub use crate::api::{FoodBackend, FoodShareClient};
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, ValidationError};
    pub use crate::identity::{IdentityProvider, StaticIdentity};
    pub use crate::listings::{CategoryFilter, Listing, ListingId, ListingStore};
    pub use crate::requests::{Request, RequestStatus, RequestStore, StatusTone};
    pub use crate::session::DashboardSession;
    pub use crate::submission::{RequestForm, RequestSubmissionFlow, SubmissionOutcome};
}
