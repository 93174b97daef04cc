//! Types for food-donation listings

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::decode;

/// Opaque listing identifier
///
/// The backend hands out either strings or numbers; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ListingId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ListingId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Donor profile as embedded by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Who posted a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Donor {
    /// Populated donor document
    Profile(DonorProfile),
    /// Bare display label
    Label(String),
}

impl Donor {
    /// The `name` field searched by listing filters
    ///
    /// A bare label has no `name` field and therefore never matches a
    /// non-empty search term.
    pub fn search_name(&self) -> &str {
        match self {
            Donor::Profile(profile) => profile.name.as_deref().unwrap_or(""),
            Donor::Label(_) => "",
        }
    }

    /// Best available name for display
    pub fn display_name(&self) -> String {
        match self {
            Donor::Label(label) => label.clone(),
            Donor::Profile(profile) => profile
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .or_else(|| profile.organization_name.clone().filter(|n| !n.is_empty()))
                .unwrap_or_else(|| {
                    [profile.first_name.as_deref(), profile.last_name.as_deref()]
                        .iter()
                        .flatten()
                        .filter(|part| !part.is_empty())
                        .copied()
                        .collect::<Vec<_>>()
                        .join(" ")
                }),
        }
    }
}

/// Built-in categories and their display labels
pub const KNOWN_CATEGORIES: &[(&str, &str)] = &[
    ("vegetables", "Vegetables"),
    ("bakery", "Bakery Items"),
    ("cooked", "Cooked Meals"),
    ("canned", "Canned Food"),
];

/// Display label for a category value, falling back to the raw value
pub fn category_label(category: &str) -> &str {
    KNOWN_CATEGORIES
        .iter()
        .find(|(value, _)| *value == category)
        .map(|(_, label)| *label)
        .unwrap_or(category)
}

/// A donor-posted food-availability record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawListing")]
pub struct Listing {
    pub id: ListingId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub donor: Option<Donor>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub location: Option<String>,
    pub distance: Option<String>,
    pub expiry_time: Option<String>,
    pub posted_time: Option<String>,
    pub rating: Option<f64>,
    pub verified: Option<bool>,
}

/// Listing document as sent by the backend, before any field is checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListing {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    donor: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    distance: Option<Value>,
    #[serde(default)]
    expiry_time: Option<Value>,
    #[serde(default)]
    posted_time: Option<Value>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default)]
    verified: Option<Value>,
}

impl TryFrom<RawListing> for Listing {
    type Error = String;

    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        Ok(Listing {
            id: ListingId(decode::document_id(raw.id, raw.mongo_id)?),
            title: decode::text(raw.title),
            description: decode::text(raw.description),
            donor: raw.donor.and_then(|value| serde_json::from_value(value).ok()),
            category: decode::text(raw.category),
            quantity: decode::text(raw.quantity),
            location: decode::text(raw.location),
            distance: decode::text(raw.distance),
            expiry_time: decode::text(raw.expiry_time),
            posted_time: decode::text(raw.posted_time),
            rating: decode::number(raw.rating),
            verified: decode::flag(raw.verified),
        })
    }
}

impl Listing {
    /// Create a listing with only an id set
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            donor: None,
            category: None,
            quantity: None,
            location: None,
            distance: None,
            expiry_time: None,
            posted_time: None,
            rating: None,
            verified: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_donor_name(mut self, name: &str) -> Self {
        self.donor = Some(Donor::Profile(DonorProfile {
            name: Some(name.to_string()),
            ..Default::default()
        }));
        self
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn donor_display_name(&self) -> String {
        self.donor.as_ref().map(Donor::display_name).unwrap_or_default()
    }
}
