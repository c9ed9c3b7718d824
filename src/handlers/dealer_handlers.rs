use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};

use crate::AppState;
use crate::errors::ApiError;
use crate::session;

/// The embedded-status body for a missing/zero dealer id
fn bad_request() -> Json<Value> {
    Json(json!({"status": 400, "message": "Bad Request"}))
}

async fn fetch_dealers(state: &AppState, by_state: Option<&str>) -> Result<Json<Value>, ApiError> {
    let dealers = state.dealer.fetch_dealers(by_state).await?;
    Ok(Json(json!({"status": 200, "dealers": dealers})))
}

/// Handler for listing all dealerships
///
/// This function handles GET requests to `/dealers`, proxying the external
/// dealer service unfiltered.
#[instrument(skip(state))]
pub async fn get_dealerships_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    debug!("Fetching all dealerships");
    fetch_dealers(&state, None).await
}

/// Handler for listing dealerships in one state
///
/// This function handles GET requests to `/dealers/{state}`. The literal
/// segment "All" addresses the unfiltered listing, the same way the
/// frontend's state dropdown has always encoded it.
#[instrument(skip(state), fields(state_filter = %state_filter))]
pub async fn get_dealerships_by_state_handler(
    State(state): State<AppState>,
    Path(state_filter): Path<String>,
) -> Result<Json<Value>, ApiError> {
    debug!("Fetching dealerships by state");

    let filter = (state_filter != "All").then_some(state_filter);
    fetch_dealers(&state, filter.as_deref()).await
}

/// Handler for a single dealer's details
///
/// This function handles GET requests to `/dealer/{id}`. A zero id is the
/// falsy sentinel and yields the embedded 400 body; upstream failures
/// propagate as infrastructure errors.
#[instrument(skip(state))]
pub async fn get_dealer_handler(
    State(state): State<AppState>,
    Path(dealer_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    if dealer_id == 0 {
        debug!("Rejecting zero dealer id");
        return Ok(bad_request());
    }

    let dealer = state.dealer.fetch_dealer(dealer_id).await?;

    Ok(Json(json!({"status": 200, "dealer": dealer})))
}

/// Handler for a dealer's reviews, enriched with sentiment labels
///
/// This function handles GET requests to `/dealer/{id}/reviews`.
///
/// Each review is classified with one sequential call to the sentiment
/// service. A failed classification is captured per review: that entry gets
/// `"sentiment": null` and the loop carries on, so one bad classification
/// cannot abort the whole response.
#[instrument(skip(state))]
pub async fn get_dealer_reviews_handler(
    State(state): State<AppState>,
    Path(dealer_id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    if dealer_id == 0 {
        debug!("Rejecting zero dealer id");
        return Ok(bad_request());
    }

    let mut reviews = state.dealer.fetch_reviews(dealer_id).await?;

    info!("Classifying {} reviews", reviews.len());

    for review in &mut reviews {
        let sentiment = match review.get("review").and_then(Value::as_str) {
            Some(text) => match state.sentiment.analyze(text).await {
                Ok(label) => Value::String(label),
                Err(e) => {
                    warn!(error = %e, "Sentiment analysis failed for review");
                    Value::Null
                }
            },
            None => {
                warn!("Review carries no text to classify");
                Value::Null
            }
        };

        if let Value::Object(map) = review {
            map.insert("sentiment".to_string(), sentiment);
        }
    }

    Ok(Json(json!({"status": 200, "reviews": reviews})))
}

/// Handler for posting a new review
///
/// This function handles POST requests to `/reviews`.
///
/// The session is checked before the body is even parsed, so an anonymous
/// caller gets the embedded 403 regardless of body. With a live session the
/// body is passed through to the dealer service verbatim; an upstream
/// failure is logged and reported as the embedded 401 the frontend has
/// always received for this case.
#[instrument(skip(state, headers, body))]
pub async fn add_review_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let session = session::resolve_session(&state.pool, &headers)
        .map_err(ApiError::Database)?;

    let Some(session) = session else {
        debug!("Rejecting anonymous review");
        return Ok(Json(json!({"status": 403, "message": "Unauthorized"})));
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Rejecting malformed review payload");
            return Ok(bad_request());
        }
    };

    debug!(username = %session.get_username(), "Posting review upstream");

    match state.dealer.post_review(&payload).await {
        Ok(()) => Ok(Json(json!({"status": 200}))),
        Err(e) => {
            error!(error = %e, "Error in posting review");
            Ok(Json(json!({"status": 401, "message": "Error in posting review"})))
        }
    }
}
