use anyhow::{Result, anyhow};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a registered user account
///
/// Passwords are never stored: only an argon2id hash is kept, and
/// verification goes through [`User::verify_password`]. The username is
/// unique, enforced by the schema.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Unique identifier for the user (UUID v4 as string)
    id: String,

    /// The unique login name
    username: String,

    /// argon2id hash of the user's password
    password_hash: String,

    /// The user's first name
    first_name: String,

    /// The user's last name
    last_name: String,

    /// The user's email address
    email: String,

    /// When this user registered
    created_at: NaiveDateTime,
}

impl User {
    /// Creates a new user, hashing the given password with argon2id
    ///
    /// ### Arguments
    ///
    /// * `username` - The unique login name
    /// * `password` - The clear-text password to hash
    /// * `first_name` - The user's first name
    /// * `last_name` - The user's last name
    /// * `email` - The user's email address
    ///
    /// ### Errors
    ///
    /// Returns an error if password hashing fails.
    pub fn new(
        username: String,
        password: &str,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("failed to hash password: {e}"))?
            .to_string();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            first_name,
            last_name,
            email,
            created_at: Utc::now().naive_utc(),
        })
    }

    /// Checks a clear-text password against the stored hash
    ///
    /// A malformed stored hash counts as a failed verification rather than an
    /// error: login must not 500 on a corrupt row.
    pub fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Gets the user's ID
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the username
    pub fn get_username(&self) -> String {
        self.username.clone()
    }

    /// Gets the user's first name
    pub fn get_first_name(&self) -> String {
        self.first_name.clone()
    }

    /// Gets the user's last name
    pub fn get_last_name(&self) -> String {
        self.last_name.clone()
    }

    /// Gets the user's email address
    pub fn get_email(&self) -> String {
        self.email.clone()
    }

    /// Gets the registration timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_hashes_password() {
        let user = User::new(
            "carol".to_string(),
            "hunter2",
            "Carol".to_string(),
            "Jones".to_string(),
            "carol@example.com".to_string(),
        )
        .unwrap();

        assert_eq!(user.get_username(), "carol");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_ne!(user.password_hash, "hunter2");
    }

    #[test]
    fn test_verify_password() {
        let user = User::new(
            "dave".to_string(),
            "correct horse",
            "Dave".to_string(),
            "Smith".to_string(),
            "dave@example.com".to_string(),
        )
        .unwrap();

        assert!(user.verify_password("correct horse"));
        assert!(!user.verify_password("battery staple"));
    }
}
