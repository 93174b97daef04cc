//! Creating pickup requests
//!
//! One attempt moves through `Idle -> Validating -> {Rejected | Submitting}
//! -> {Succeeded | Failed} -> Idle`. Attempts share no state, so several may
//! be in flight at once. A result arriving after its session closed ends as
//! `Discarded`.

use std::fmt;

use crate::api::FoodBackend;
use crate::error::{Error, ValidationError};
use crate::identity::IdentityProvider;
use crate::listings::ListingId;
use crate::requests::{NewRequest, Request, RequestStore};

/// Values typed into the request form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    /// Free text, e.g. `5kg` or `10 items`
    pub quantity: String,
    /// Note to the donor
    pub message: String,
}

impl RequestForm {
    pub fn new(quantity: &str, message: &str) -> Self {
        Self {
            quantity: quantity.to_string(),
            message: message.to_string(),
        }
    }

    /// Both fields must be non-empty once surrounding whitespace is removed
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity.trim().is_empty() {
            return Err(ValidationError::EmptyQuantity);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }
}

/// Step of a single submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
    Discarded,
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Rejected => "rejected",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Succeeded => "succeeded",
            SubmissionPhase::Failed => "failed",
            SubmissionPhase::Discarded => "discarded",
        };
        f.write_str(name)
    }
}

/// How a submission attempt ended
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Blocked locally; the backend was never called
    Rejected(ValidationError),
    /// Created by the backend and recorded
    Succeeded(Request),
    /// The backend call failed; nothing was recorded
    Failed(Error),
    /// The session was torn down before the result arrived
    Discarded,
}

impl SubmissionOutcome {
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            SubmissionOutcome::Rejected(_) => SubmissionPhase::Rejected,
            SubmissionOutcome::Succeeded(_) => SubmissionPhase::Succeeded,
            SubmissionOutcome::Failed(_) => SubmissionPhase::Failed,
            SubmissionOutcome::Discarded => SubmissionPhase::Discarded,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }

    pub fn request(&self) -> Option<&Request> {
        match self {
            SubmissionOutcome::Succeeded(request) => Some(request),
            _ => None,
        }
    }
}

/// Turns a filled-in form into a backend request
pub struct RequestSubmissionFlow<'a> {
    backend: &'a dyn FoodBackend,
    identity: &'a dyn IdentityProvider,
}

impl<'a> RequestSubmissionFlow<'a> {
    pub fn new(backend: &'a dyn FoodBackend, identity: &'a dyn IdentityProvider) -> Self {
        Self { backend, identity }
    }

    /// Validate, send and record a request in `store`
    pub async fn submit(
        &self,
        store: &mut RequestStore,
        listing_id: &ListingId,
        form: &RequestForm,
    ) -> SubmissionOutcome {
        let outcome = self.send(listing_id, form).await;
        if let SubmissionOutcome::Succeeded(request) = &outcome {
            store.prepend(request.clone());
        }
        log::debug!("submission for listing {}: {} -> {}", listing_id, outcome.phase(), SubmissionPhase::Idle);
        outcome
    }

    /// Validate and send a request without recording it
    pub(crate) async fn send(&self, listing_id: &ListingId, form: &RequestForm) -> SubmissionOutcome {
        log::debug!("submission for listing {}: {} -> {}", listing_id, SubmissionPhase::Idle, SubmissionPhase::Validating);
        if let Err(reason) = form.validate() {
            log::debug!("submission for listing {} blocked: {}", listing_id, reason);
            return SubmissionOutcome::Rejected(reason);
        }

        let requester = match self.identity.requester_id() {
            Ok(id) => id,
            Err(e) => {
                log::error!("Error sending request: {}", e);
                return SubmissionOutcome::Failed(e);
            }
        };

        let body = NewRequest {
            requester,
            quantity_requested: form.quantity.clone(),
            message: form.message.clone(),
        };

        log::debug!("submission for listing {}: {} -> {}", listing_id, SubmissionPhase::Validating, SubmissionPhase::Submitting);
        match self.backend.create_request(listing_id, &body).await {
            Ok(created) => SubmissionOutcome::Succeeded(Request::from(created)),
            Err(e) => {
                match e.server_message() {
                    Some(message) => log::error!("Request failed: {}", message),
                    None => log::error!("Error sending request: {}", e),
                }
                SubmissionOutcome::Failed(e)
            }
        }
    }
}
