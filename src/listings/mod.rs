//! Food-donation listings and the store holding them

pub mod filter;
pub mod types;

pub use filter::{filter_listings, CategoryFilter, ALL_CATEGORIES};
pub use types::{category_label, Donor, DonorProfile, Listing, ListingId, KNOWN_CATEGORIES};

use crate::api::FoodBackend;
use crate::error::Result;

/// Listings fetched from the backend for one dashboard session
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every listing and replace the held collection
    ///
    /// On failure the previous collection is kept and the error is logged.
    pub async fn load_all<B: FoodBackend + ?Sized>(&mut self, backend: &B) -> &[Listing] {
        let result = backend.list_listings().await;
        self.absorb(result);
        &self.listings
    }

    /// Apply the result of a listings fetch
    pub(crate) fn absorb(&mut self, result: Result<Vec<Listing>>) {
        match result {
            Ok(listings) => {
                log::debug!("loaded {} listings", listings.len());
                self.listings = listings;
            }
            Err(e) => log::error!("Failed to fetch foods: {}", e),
        }
    }

    /// Listings matching `search_term` and `category`, in fetch order
    pub fn filter(&self, search_term: &str, category: &CategoryFilter) -> Vec<&Listing> {
        filter_listings(&self.listings, search_term, category)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| &listing.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl From<Vec<Listing>> for ListingStore {
    fn from(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn failed_load_keeps_previous_collection() {
        let mut store = ListingStore::new();
        store.absorb(Ok(vec![Listing::new("1").with_title("Bread")]));
        store.absorb(Err(Error::rejection(500, None)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.listings()[0].title.as_deref(), Some("Bread"));
    }

    #[test]
    fn successful_load_replaces_collection() {
        let mut store = ListingStore::from(vec![Listing::new("1"), Listing::new("2")]);
        store.absorb(Ok(vec![Listing::new("3")]));

        assert_eq!(store.len(), 1);
        assert!(store.get(&ListingId::from("3")).is_some());
        assert!(store.get(&ListingId::from("1")).is_none());
    }

    #[test]
    fn filter_does_not_mutate_store() {
        let store = ListingStore::from(vec![
            Listing::new("1").with_title("Bread").with_category("bakery"),
            Listing::new("2").with_title("Rice").with_category("canned"),
        ]);

        let hits = store.filter("rice", &CategoryFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
