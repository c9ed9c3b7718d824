use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::clients::ClientError;

/// Response shape of the sentiment analyzer
#[derive(Debug, Deserialize)]
struct SentimentResponse {
    sentiment: String,
}

/// Client for the external sentiment-analysis microservice
///
/// A single endpoint: `GET /analyze/{text}` returning
/// `{"sentiment": "positive" | "neutral" | "negative"}`.
#[derive(Debug, Clone)]
pub struct SentimentClient {
    client: Client,
    base_url: String,
}

impl SentimentClient {
    /// Creates a new sentiment client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Classifies a piece of review text
    ///
    /// The text travels in the URL path, percent-encoded.
    #[instrument(skip(self, text))]
    pub async fn analyze(&self, text: &str) -> Result<String, ClientError> {
        let url = format!("{}/analyze/{}", self.base_url, urlencoding::encode(text));
        debug!(url = %url, "Requesting sentiment classification");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let parsed = response.json::<SentimentResponse>().await?;
        Ok(parsed.sentiment)
    }
}
