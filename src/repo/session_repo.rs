use crate::db::DbPool;
use crate::models::Session;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new session for a username
///
/// ### Returns
///
/// A Result containing the newly created Session, whose token goes into the
/// client's `sessionid` cookie
#[instrument(skip(pool), fields(username = %username))]
pub fn create_session(pool: &DbPool, username: &str) -> Result<Session> {
    debug!("Creating new session");

    let conn = &mut pool.get()?;

    let new_session = Session::new(username.to_string());

    diesel::insert_into(crate::schema::sessions::table)
        .values(new_session.clone())
        .execute(conn)?;

    info!("Session established for {}", username);

    Ok(new_session)
}

/// Retrieves a session by its token
///
/// ### Returns
///
/// A Result containing an Option with the Session if the token is live, or
/// None if not
#[instrument(skip(pool, token))]
pub fn find_session(pool: &DbPool, token: &str) -> Result<Option<Session>> {
    let conn = &mut pool.get()?;

    let result = crate::schema::sessions::table
        .find(token)
        .first::<Session>(conn)
        .optional()?;

    Ok(result)
}

/// Deletes a session by its token
///
/// Deleting an unknown token is a no-op; logout is idempotent.
#[instrument(skip(pool, token))]
pub fn delete_session(pool: &DbPool, token: &str) -> Result<()> {
    let conn = &mut pool.get()?;

    let deleted = diesel::delete(crate::schema::sessions::table.find(token)).execute(conn)?;

    debug!("Deleted {} session(s)", deleted);

    Ok(())
}
