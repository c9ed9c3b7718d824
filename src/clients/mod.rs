/// Outbound service clients
///
/// This module wraps the two external microservices the backend proxies:
/// the dealer service (dealers and their reviews) and the sentiment
/// analyzer. Each client owns a `reqwest::Client` and a base URL taken from
/// configuration.

mod dealer;
pub use dealer::DealerClient;

mod sentiment;
pub use sentiment::SentimentClient;

use thiserror::Error;

/// Error returned by the outbound service clients
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the response body could not be read
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status
    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
