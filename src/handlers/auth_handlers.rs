use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::AppState;
use crate::dto::{LoginDto, LoginResponse, RegistrationDto, RegistrationResponse};
use crate::errors::ApiError;
use crate::repo::{self, CreateUserError};
use crate::session;

/// Handler for sign-in requests
///
/// This function handles POST requests to `/login`.
///
/// On success a session is established and the response carries both the
/// `sessionid` cookie and `"status": "Authenticated"`. On bad credentials the
/// response echoes the user name with no `status` field, which is the
/// failure signal the frontend expects.
#[instrument(skip(state, payload), fields(username = %payload.user_name))]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<Response, ApiError> {
    debug!("Handling sign-in request");

    let user = repo::find_user_by_username(&state.pool, &payload.user_name)
        .map_err(ApiError::Database)?;

    let authenticated = user
        .map(|u| u.verify_password(&payload.password))
        .unwrap_or(false);

    if !authenticated {
        debug!("Sign-in failed");
        return Ok(Json(LoginResponse {
            user_name: payload.user_name,
            status: None,
        })
        .into_response());
    }

    let session = repo::create_session(&state.pool, &payload.user_name)
        .map_err(ApiError::Database)?;

    info!("User authenticated");

    Ok((
        [(SET_COOKIE, session::session_cookie(&session.get_token()))],
        Json(LoginResponse {
            user_name: payload.user_name,
            status: Some("Authenticated".to_string()),
        }),
    )
        .into_response())
}

/// Handler for logout requests
///
/// This function handles GET and POST requests to `/logout`.
///
/// The session named by the cookie is deleted if it exists; the response is
/// always `{"userName": ""}` with a cookie-clearing header. Logging out
/// twice is harmless.
#[instrument(skip(state, headers))]
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(token) = session::session_token(&headers) {
        repo::delete_session(&state.pool, &token).map_err(ApiError::Database)?;
        info!("Session cleared");
    }

    Ok((
        [(SET_COOKIE, session::clear_session_cookie())],
        Json(LoginResponse {
            user_name: String::new(),
            status: None,
        }),
    )
        .into_response())
}

/// Handler for sign-up requests
///
/// This function handles POST requests to `/register`.
///
/// A taken username yields `{"username": ..., "error": "Already Registered"}`
/// and writes nothing. Otherwise the account is created, a session is
/// established, and the response mirrors a successful login (with the
/// historical lower-case `username` key).
#[instrument(skip(state, payload), fields(username = %payload.user_name))]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationDto>,
) -> Result<Response, ApiError> {
    debug!("Handling sign-up request");

    let already_registered = Json(RegistrationResponse {
        username: payload.user_name.clone(),
        status: None,
        error: Some("Already Registered".to_string()),
    });

    let existing = repo::find_user_by_username(&state.pool, &payload.user_name)
        .map_err(ApiError::Database)?;

    if existing.is_some() {
        debug!("Username already registered");
        return Ok(already_registered.into_response());
    }

    match repo::create_user(
        &state.pool,
        payload.user_name.clone(),
        &payload.password,
        payload.first_name,
        payload.last_name,
        payload.email,
    ) {
        Ok(_) => {}
        // Lost a select-then-insert race; same outcome as the pre-check
        Err(CreateUserError::DuplicateUsername) => {
            return Ok(already_registered.into_response());
        }
        Err(CreateUserError::Other(e)) => return Err(ApiError::Database(e)),
    }

    let session = repo::create_session(&state.pool, &payload.user_name)
        .map_err(ApiError::Database)?;

    info!("New user registered");

    Ok((
        [(SET_COOKIE, session::session_cookie(&session.get_token()))],
        Json(RegistrationResponse {
            username: payload.user_name,
            status: Some("Authenticated".to_string()),
            error: None,
        }),
    )
        .into_response())
}
