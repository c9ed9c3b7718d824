use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

/// A pool of SQLite connections shared by the handlers and the repository
/// layer
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Builds a connection pool for the given database URL
///
/// ### Panics
///
/// This function will panic if the pool cannot be constructed.
pub fn init_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder().build(manager).expect("Failed to create pool.")
}
