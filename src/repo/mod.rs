/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for interacting with the database: the car
/// reference catalog, user accounts, and login sessions.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod car_repo;
mod session_repo;
mod user_repo;

// Re-export all repository functions
pub use car_repo::*;
pub use session_repo::*;
pub use user_repo::*;
