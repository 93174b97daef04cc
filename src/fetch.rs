//! HTTP request helper for calls to the FoodShare backend

use reqwest::{Client, Method, RequestBuilder, header::{HeaderMap, HeaderValue}};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::Error;

/// Error body the backend sends alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: Url, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        Self {
            client,
            url,
            method,
            headers,
            body: None,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    fn build(&self) -> RequestBuilder {
        let mut req = self.client.request(self.method.clone(), self.url.clone());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        req
    }

    /// Execute the request and parse the response as JSON
    ///
    /// Non-success statuses become [`Error::ServerRejection`], carrying the
    /// body's `message` field when the server sent one. Bodies that do not
    /// parse become [`Error::Decode`].
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        log::debug!("{} {}", self.method, self.url);
        let response = self.build().send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message);
            return Err(Error::rejection(status.as_u16(), message));
        }

        Ok(serde_json::from_str::<T>(&text)?)
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get(client: &Client, url: Url) -> FetchBuilder<'_> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post(client: &Client, url: Url) -> FetchBuilder<'_> {
        FetchBuilder::new(client, url, Method::POST)
    }
}
