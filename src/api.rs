//! HTTP client for the FoodShare backend

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::listings::{Listing, ListingId};
use crate::requests::{CreateRequestResponse, CreatedRequest, NewRequest, Request};

/// The three backend calls the dashboard depends on
#[async_trait]
pub trait FoodBackend: Send + Sync {
    /// `GET /foods`
    async fn list_listings(&self) -> Result<Vec<Listing>>;

    /// `GET /foods/requests/my`
    async fn list_my_requests(&self) -> Result<Vec<Request>>;

    /// `POST /foods/{listing_id}/request`
    async fn create_request(&self, listing_id: &ListingId, body: &NewRequest) -> Result<CreatedRequest>;
}

/// Client for the FoodShare REST API
#[derive(Debug, Clone)]
pub struct FoodShareClient {
    /// Origin plus API prefix
    base_url: Url,

    /// HTTP client
    client: Client,
}

impl FoodShareClient {
    /// Create a new client from options
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_http_client(options, builder.build()?)
    }

    /// Create a new client reusing an existing HTTP client
    pub fn with_http_client(options: &ClientOptions, client: Client) -> Result<Self> {
        let base_url = Url::parse(&options.base_url())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", base_url)));
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl FoodBackend for FoodShareClient {
    async fn list_listings(&self) -> Result<Vec<Listing>> {
        let url = self.endpoint(&["foods"])?;
        Fetch::get(&self.client, url).execute().await
    }

    async fn list_my_requests(&self) -> Result<Vec<Request>> {
        let url = self.endpoint(&["foods", "requests", "my"])?;
        Fetch::get(&self.client, url).execute().await
    }

    async fn create_request(&self, listing_id: &ListingId, body: &NewRequest) -> Result<CreatedRequest> {
        let url = self.endpoint(&["foods", listing_id.as_str(), "request"])?;
        let response: CreateRequestResponse = Fetch::post(&self.client, url).json(body)?.execute().await?;
        Ok(response.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_prefix() {
        let client = FoodShareClient::new(&ClientOptions::default()).unwrap();
        let url = client.endpoint(&["foods", "requests", "my"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:6069/api/foods/requests/my");
    }

    #[test]
    fn listing_ids_are_encoded_as_one_segment() {
        let client = FoodShareClient::new(&ClientOptions::default()).unwrap();
        let url = client.endpoint(&["foods", "a/b c", "request"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:6069/api/foods/a%2Fb%20c/request");
    }

    #[test]
    fn rejects_non_base_origin() {
        let options = ClientOptions::default().with_origin("mailto:someone");
        assert!(matches!(FoodShareClient::new(&options), Err(Error::Config(_))));
    }
}
