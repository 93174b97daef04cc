//! Search and category filtering over listings

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::types::Listing;

/// Value of the category selector that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

/// Category predicate for listing filters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every listing passes
    #[default]
    All,
    /// Only listings whose category equals this value exactly
    Only(String),
}

impl CategoryFilter {
    /// Check a listing's category against the filter
    ///
    /// Listings without a category never pass a specific filter.
    pub fn accepts(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive substring match against title, description and donor name
///
/// `needle` must already be lowercased. Missing fields count as empty.
fn matches_search(listing: &Listing, needle: &str) -> bool {
    let haystacks = [
        listing.title.as_deref().unwrap_or(""),
        listing.description.as_deref().unwrap_or(""),
        listing.donor.as_ref().map(|d| d.search_name()).unwrap_or(""),
    ];

    haystacks
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

/// Listings matching both the search term and the category, in source order
pub fn filter_listings<'a>(
    listings: &'a [Listing],
    search_term: &str,
    category: &CategoryFilter,
) -> Vec<&'a Listing> {
    let needle = search_term.to_lowercase();

    listings
        .iter()
        .filter(|listing| matches_search(listing, &needle))
        .filter(|listing| category.accepts(listing.category.as_deref()))
        .collect()
}
