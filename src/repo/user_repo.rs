use crate::db::DbPool;
use crate::models::User;
use anyhow::Result;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Error returned when creating a user account
#[derive(Error, Debug)]
pub enum CreateUserError {
    /// The username is already taken
    #[error("username already registered")]
    DuplicateUsername,

    /// Any other failure (pool, hashing, database)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Creates a new user account
///
/// The password is hashed before anything touches the database. Uniqueness
/// of the username is enforced by the schema; a violation maps to
/// [`CreateUserError::DuplicateUsername`] so a select-then-insert race still
/// produces the documented outcome.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `username` - The unique login name
/// * `password` - The clear-text password to hash and discard
/// * `first_name` - The user's first name
/// * `last_name` - The user's last name
/// * `email` - The user's email address
#[instrument(skip(pool, password), fields(username = %username))]
pub fn create_user(
    pool: &DbPool,
    username: String,
    password: &str,
    first_name: String,
    last_name: String,
    email: String,
) -> Result<User, CreateUserError> {
    debug!("Creating new user");

    let conn = &mut pool.get().map_err(anyhow::Error::from)?;

    let new_user = User::new(username, password, first_name, last_name, email)?;

    match diesel::insert_into(crate::schema::users::table)
        .values(new_user.clone())
        .execute(conn)
    {
        Ok(_) => {
            info!("Successfully created user with id: {}", new_user.get_id());
            Ok(new_user)
        }
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            debug!("Username already taken");
            Err(CreateUserError::DuplicateUsername)
        }
        Err(e) => Err(CreateUserError::Other(e.into())),
    }
}

/// Retrieves a user by username
///
/// ### Returns
///
/// A Result containing an Option with the User if found, or None if not found
#[instrument(skip(pool), fields(username = %username))]
pub fn find_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>> {
    debug!("Looking up user");

    let conn = &mut pool.get()?;

    let result = crate::schema::users::table
        .filter(crate::schema::users::username.eq(username))
        .first::<User>(conn)
        .optional()?;

    if result.is_some() {
        debug!("User found");
    } else {
        debug!("User not found");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::tests::setup_test_db;

    #[test]
    fn test_create_and_find_user() {
        let pool = setup_test_db();

        let user = create_user(
            &pool,
            "alice".to_string(),
            "s3cret",
            "Alice".to_string(),
            "Anderson".to_string(),
            "alice@example.com".to_string(),
        )
        .unwrap();

        let found = find_user_by_username(&pool, "alice").unwrap().unwrap();
        assert_eq!(found.get_id(), user.get_id());
        assert!(found.verify_password("s3cret"));

        assert!(find_user_by_username(&pool, "bob").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let pool = setup_test_db();

        create_user(
            &pool,
            "alice".to_string(),
            "first",
            "Alice".to_string(),
            "Anderson".to_string(),
            "alice@example.com".to_string(),
        )
        .unwrap();

        let second = create_user(
            &pool,
            "alice".to_string(),
            "second",
            "Other".to_string(),
            "Person".to_string(),
            "other@example.com".to_string(),
        );

        assert!(matches!(second, Err(CreateUserError::DuplicateUsername)));

        // The original account is untouched
        let found = find_user_by_username(&pool, "alice").unwrap().unwrap();
        assert!(found.verify_password("first"));
    }
}
