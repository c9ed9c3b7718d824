use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an active login session
///
/// The token is an opaque UUID v4 handed to the client in the `sessionid`
/// cookie. A session exists from login/registration until logout.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Session {
    /// The opaque session token (UUID v4 as string)
    token: String,

    /// The username this session authenticates
    username: String,

    /// When this session was established
    created_at: NaiveDateTime,
}

impl Session {
    /// Creates a new session for the given username
    pub fn new(username: String) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            username,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Gets the session token
    pub fn get_token(&self) -> String {
        self.token.clone()
    }

    /// Gets the username this session authenticates
    pub fn get_username(&self) -> String {
        self.username.clone()
    }
}
