use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::clients::ClientError;

/// Client for the external dealer microservice
///
/// Exposes the `/fetchDealers`, `/fetchDealer/{id}`,
/// `/fetchReviews/dealer/{id}` and `/insert_review` endpoint family.
/// Payloads are passed through verbatim as JSON values; this service does
/// not own the dealer data model.
#[derive(Debug, Clone)]
pub struct DealerClient {
    client: Client,
    base_url: String,
}

impl DealerClient {
    /// Creates a new dealer client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching from dealer service");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(response.json::<Value>().await?)
    }

    /// Fetches all dealers, optionally filtered by state
    #[instrument(skip(self))]
    pub async fn fetch_dealers(&self, state: Option<&str>) -> Result<Value, ClientError> {
        let path = match state {
            Some(state) => format!("/fetchDealers/{}", state),
            None => "/fetchDealers".to_string(),
        };
        self.get_json(&path).await
    }

    /// Fetches the details of a single dealer
    #[instrument(skip(self))]
    pub async fn fetch_dealer(&self, dealer_id: u64) -> Result<Value, ClientError> {
        self.get_json(&format!("/fetchDealer/{}", dealer_id)).await
    }

    /// Fetches all reviews for a dealer
    ///
    /// The upstream returns a JSON array; anything else is surfaced as an
    /// empty list so the enrichment loop has a well-defined input.
    #[instrument(skip(self))]
    pub async fn fetch_reviews(&self, dealer_id: u64) -> Result<Vec<Value>, ClientError> {
        let payload = self
            .get_json(&format!("/fetchReviews/dealer/{}", dealer_id))
            .await?;

        match payload {
            Value::Array(reviews) => Ok(reviews),
            _ => Ok(Vec::new()),
        }
    }

    /// Posts a new review upstream, passing the body through verbatim
    #[instrument(skip(self, review))]
    pub async fn post_review(&self, review: &Value) -> Result<(), ClientError> {
        let url = format!("{}/insert_review", self.base_url);
        debug!(url = %url, "Posting review to dealer service");

        let response = self.client.post(&url).json(review).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(())
    }
}
