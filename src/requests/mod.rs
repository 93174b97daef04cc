//! Pickup requests made by the current receiver

pub mod types;

pub use types::{
    CreateRequestResponse, CreatedDonor, CreatedFood, CreatedRequest, NewRequest, Request,
    RequestStatus, StatusTone, JUST_NOW,
};

use crate::api::FoodBackend;
use crate::error::Result;

/// The receiver's requests, most recent first
#[derive(Debug, Clone, Default)]
pub struct RequestStore {
    requests: Vec<Request>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the receiver's requests and replace the held collection
    ///
    /// On failure the previous collection is kept and the error is logged.
    pub async fn load_mine<B: FoodBackend + ?Sized>(&mut self, backend: &B) -> &[Request] {
        let result = backend.list_my_requests().await;
        self.absorb(result);
        &self.requests
    }

    pub(crate) fn absorb(&mut self, result: Result<Vec<Request>>) {
        match result {
            Ok(requests) => {
                log::debug!("loaded {} requests", requests.len());
                self.requests = requests;
            }
            Err(e) => log::error!("Failed to fetch requests: {}", e),
        }
    }

    /// Insert at the head of the collection. No deduplication.
    pub fn prepend(&mut self, request: Request) {
        self.requests.insert(0, request);
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn first(&self) -> Option<&Request> {
        self.requests.first()
    }

    pub fn count_by_status(&self, status: &RequestStatus) -> usize {
        self.requests.iter().filter(|r| &r.status == status).count()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
