//! Dashboard session owning the listing and request stores

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::FoodBackend;
use crate::identity::IdentityProvider;
use crate::listings::{CategoryFilter, Listing, ListingId, ListingStore};
use crate::requests::{Request, RequestStatus, RequestStore};
use crate::submission::{RequestForm, RequestSubmissionFlow, SubmissionOutcome, SubmissionPhase};

struct SessionInner {
    backend: Arc<dyn FoodBackend>,
    identity: Arc<dyn IdentityProvider>,
    listings: RwLock<ListingStore>,
    requests: RwLock<RequestStore>,
    closed: AtomicBool,
}

/// State for one receiver dashboard, from mount to teardown
///
/// Clones share the same stores. Once [`DashboardSession::close`] has been
/// called, results of calls still in flight are dropped instead of written.
#[derive(Clone)]
pub struct DashboardSession {
    inner: Arc<SessionInner>,
}

impl DashboardSession {
    pub fn new(backend: Arc<dyn FoodBackend>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                backend,
                identity,
                listings: RwLock::new(ListingStore::new()),
                requests: RwLock::new(RequestStore::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Load listings and the receiver's requests concurrently
    pub async fn mount(&self) {
        tokio::join!(self.reload_listings(), self.reload_requests());
    }

    /// Fetch listings again, keeping the current ones on failure
    pub async fn reload_listings(&self) {
        let result = self.inner.backend.list_listings().await;
        let mut listings = self.inner.listings.write().await;
        if self.is_closed() {
            log::debug!("session closed, dropping listings result");
            return;
        }
        listings.absorb(result);
    }

    /// Fetch the receiver's requests again, keeping the current ones on failure
    pub async fn reload_requests(&self) {
        let result = self.inner.backend.list_my_requests().await;
        let mut requests = self.inner.requests.write().await;
        if self.is_closed() {
            log::debug!("session closed, dropping requests result");
            return;
        }
        requests.absorb(result);
    }

    /// Listings matching the search term and category, in fetch order
    pub async fn filtered_listings(&self, search_term: &str, category: &CategoryFilter) -> Vec<Listing> {
        self.inner
            .listings
            .read()
            .await
            .filter(search_term, category)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn listings(&self) -> Vec<Listing> {
        self.inner.listings.read().await.listings().to_vec()
    }

    pub async fn my_requests(&self) -> Vec<Request> {
        self.inner.requests.read().await.requests().to_vec()
    }

    /// Number of held requests with the given status
    pub async fn count_requests(&self, status: &RequestStatus) -> usize {
        self.inner.requests.read().await.count_by_status(status)
    }

    /// Submit a request for `listing_id` and record it on success
    pub async fn submit_request(&self, listing_id: &ListingId, form: &RequestForm) -> SubmissionOutcome {
        let flow = RequestSubmissionFlow::new(self.inner.backend.as_ref(), self.inner.identity.as_ref());
        let outcome = flow.send(listing_id, form).await;

        if let SubmissionOutcome::Succeeded(request) = &outcome {
            let mut requests = self.inner.requests.write().await;
            if self.is_closed() {
                log::debug!("session closed, dropping request {}", request.id);
                log::debug!("submission for listing {}: {} -> {}", listing_id, SubmissionPhase::Discarded, SubmissionPhase::Idle);
                return SubmissionOutcome::Discarded;
            }
            requests.prepend(request.clone());
        }

        log::debug!("submission for listing {}: {} -> {}", listing_id, outcome.phase(), SubmissionPhase::Idle);
        outcome
    }

    /// Tear the session down
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::identity::StaticIdentity;
    use crate::requests::{CreatedRequest, NewRequest};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedBackend {
        fail_requests: bool,
    }

    #[async_trait]
    impl FoodBackend for FixedBackend {
        async fn list_listings(&self) -> Result<Vec<Listing>> {
            Ok(vec![
                Listing::new("1").with_title("Bread").with_category("bakery"),
                Listing::new("2").with_title("Rice").with_category("canned"),
            ])
        }

        async fn list_my_requests(&self) -> Result<Vec<Request>> {
            if self.fail_requests {
                return Err(Error::rejection(500, Some("boom".to_string())));
            }
            Ok(vec![
                Request {
                    id: "a".to_string(),
                    post_title: "Soup".to_string(),
                    donor: "Kitchen Co".to_string(),
                    status: RequestStatus::Pending,
                    quantity: "1 pot".to_string(),
                    message: "Thanks".to_string(),
                    requested_at: "yesterday".to_string(),
                },
                Request {
                    id: "b".to_string(),
                    post_title: "Rice".to_string(),
                    donor: "ACME".to_string(),
                    status: RequestStatus::Completed,
                    quantity: "5kg".to_string(),
                    message: "Thanks".to_string(),
                    requested_at: "last week".to_string(),
                },
            ])
        }

        async fn create_request(&self, _listing_id: &ListingId, body: &NewRequest) -> Result<CreatedRequest> {
            Ok(CreatedRequest {
                id: "r1".to_string(),
                food: Default::default(),
                donor: Default::default(),
                status: RequestStatus::Pending,
                quantity_requested: body.quantity_requested.clone(),
                message: body.message.clone(),
            })
        }
    }

    fn session_with(fail_requests: bool) -> DashboardSession {
        DashboardSession::new(
            Arc::new(FixedBackend { fail_requests }),
            Arc::new(StaticIdentity::new("u1")),
        )
    }

    fn session() -> DashboardSession {
        session_with(true)
    }

    #[test]
    fn mount_loads_each_store_independently() {
        tokio_test::block_on(async {
            let session = session();
            session.mount().await;

            assert_eq!(session.listings().await.len(), 2);
            assert!(session.my_requests().await.is_empty());

            let canned = session.filtered_listings("", &"canned".into()).await;
            assert_eq!(canned.len(), 1);
            assert_eq!(canned[0].id.as_str(), "2");
        });
    }

    #[test]
    fn closed_session_discards_results() {
        tokio_test::block_on(async {
            let session = session_with(false);
            session.close();
            session.mount().await;

            let outcome = session.submit_request(&"1".into(), &RequestForm::new("1", "hi")).await;

            assert!(matches!(outcome, SubmissionOutcome::Discarded));
            assert_eq!(outcome.phase(), SubmissionPhase::Discarded);
            assert!(session.listings().await.is_empty());
            assert!(session.my_requests().await.is_empty());
        });
    }

    #[test]
    fn counts_requests_by_status() {
        tokio_test::block_on(async {
            let session = session_with(false);
            session.mount().await;

            assert_eq!(session.count_requests(&RequestStatus::Pending).await, 1);
            assert_eq!(session.count_requests(&RequestStatus::Completed).await, 1);
            assert_eq!(session.count_requests(&RequestStatus::Rejected).await, 0);
        });
    }

    #[tokio::test]
    async fn listings_reload_waiting_on_the_lock_is_dropped_after_close() {
        let session = session_with(false);
        let reader = session.inner.listings.read().await;

        let reload = {
            let session = session.clone();
            tokio::spawn(async move { session.reload_listings().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        session.close();
        drop(reader);
        reload.await.unwrap();

        assert!(session.listings().await.is_empty());
    }

    #[tokio::test]
    async fn requests_reload_waiting_on_the_lock_is_dropped_after_close() {
        let session = session_with(false);
        let reader = session.inner.requests.read().await;

        let reload = {
            let session = session.clone();
            tokio::spawn(async move { session.reload_requests().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        session.close();
        drop(reader);
        reload.await.unwrap();

        assert!(session.my_requests().await.is_empty());
    }
}
