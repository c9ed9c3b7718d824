/// Session cookie plumbing
///
/// Sessions are explicit context: handlers that care about authentication
/// take the request headers, pull the `sessionid` cookie out, and look the
/// token up in the sessions table. Nothing request-bound is stored globally.

use anyhow::Result;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use crate::db::DbPool;
use crate::models::Session;
use crate::repo;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sessionid";

/// Extracts the session token from a request's Cookie header, if present
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;

    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

/// Resolves the session named by the request's cookie, if any
///
/// Returns None both when no cookie is present and when the token is stale
/// (e.g. after logout).
pub fn resolve_session(pool: &DbPool, headers: &HeaderMap) -> Result<Option<Session>> {
    match session_token(headers) {
        Some(token) => repo::find_session(pool, &token),
        None => Ok(None),
    }
}

/// Builds the Set-Cookie value that establishes a session
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token)
}

/// Builds the Set-Cookie value that clears the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}
