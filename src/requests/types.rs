//! Types for pickup requests

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::decode;
use crate::listings::Donor;

/// Label stored in `requested_at` for requests created in this session
pub const JUST_NOW: &str = "Just now";

/// Request lifecycle label
///
/// Values outside the four known ones are kept verbatim in `Other` and get
/// the neutral display treatment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Other(String),
}

/// Display classification of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Warning,
    Success,
    Danger,
    Info,
    Neutral,
}

impl RequestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Pending => StatusTone::Warning,
            Self::Approved => StatusTone::Success,
            Self::Rejected => StatusTone::Danger,
            Self::Completed => StatusTone::Info,
            Self::Other(_) => StatusTone::Neutral,
        }
    }

    /// Status with its first letter capitalized, e.g. `Pending`
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "completed" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RequestStatus> for String {
    fn from(value: RequestStatus) -> Self {
        match value {
            RequestStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A receiver's ask to claim quantity from a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRequest")]
pub struct Request {
    pub id: String,
    pub post_title: String,
    pub donor: String,
    pub status: RequestStatus,
    pub quantity: String,
    pub message: String,
    pub requested_at: String,
}

/// Request document as listed by the backend
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<Value>,
    #[serde(default)]
    post_title: Option<Value>,
    #[serde(default)]
    donor: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    requested_at: Option<Value>,
}

impl TryFrom<RawRequest> for Request {
    type Error = String;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        // A populated donor document is reduced to its display name.
        let donor = match raw.donor {
            Some(value @ Value::Object(_)) => serde_json::from_value::<Donor>(value)
                .map(|donor| donor.display_name())
                .unwrap_or_default(),
            other => decode::text(other).unwrap_or_default(),
        };

        Ok(Request {
            id: decode::document_id(raw.id, raw.mongo_id)?,
            post_title: decode::text(raw.post_title).unwrap_or_default(),
            donor,
            status: RequestStatus::from(decode::text(raw.status).unwrap_or_default()),
            quantity: decode::text(raw.quantity).unwrap_or_default(),
            message: decode::text(raw.message).unwrap_or_default(),
            requested_at: decode::text(raw.requested_at).unwrap_or_default(),
        })
    }
}

/// Body of the create-request call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub requester: String,
    pub quantity_requested: String,
    pub message: String,
}

/// Envelope returned by the create-request call
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestResponse {
    pub request: CreatedRequest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedFood {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDonor {
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CreatedDonor {
    /// Organization name, or the person's full name when there is none
    pub fn display_name(&self) -> String {
        if let Some(org) = self.organization_name.as_deref().filter(|o| !o.is_empty()) {
            return org.to_string();
        }

        [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Request document as echoed by the backend after creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub food: CreatedFood,
    #[serde(default)]
    pub donor: CreatedDonor,
    pub status: RequestStatus,
    #[serde(default)]
    pub quantity_requested: String,
    #[serde(default)]
    pub message: String,
}

impl From<CreatedRequest> for Request {
    fn from(created: CreatedRequest) -> Self {
        let donor = created.donor.display_name();
        Request {
            id: created.id,
            post_title: created.food.title.unwrap_or_default(),
            donor,
            status: created.status,
            quantity: created.quantity_requested,
            message: created.message,
            requested_at: JUST_NOW.to_string(),
        }
    }
}
