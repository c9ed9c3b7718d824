/// DealerHub: A Car Dealership Review Backend
///
/// This library provides the backend for a car dealership review
/// application: user authentication with server-side sessions, a seeded
/// catalog of car makes and models, and a proxy over the external dealer
/// service that enriches reviews with sentiment labels from the external
/// analyzer.
///
/// ### Modules
///
/// - `clients`: Outbound clients for the dealer and sentiment services
/// - `config`: Layered application configuration
/// - `db`: Database connection management
/// - `dto`: Request and response data transfer objects
/// - `errors`: Infrastructure-level API errors
/// - `handlers`: Axum request handlers
/// - `models`: Data structures for cars, users, and sessions
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
/// - `seed`: One-time population of the car catalog
/// - `session`: Session cookie plumbing
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `POST /login`: Sign in, establishing a session
/// - `GET|POST /logout`: Clear the caller's session
/// - `POST /register`: Create an account and sign in
/// - `GET /cars`: List the car catalog (seeding it on first use)
/// - `GET /dealers[/{state}]`: List dealerships, optionally by state
/// - `GET /dealer/{id}`: Fetch one dealer's details
/// - `GET /dealer/{id}/reviews`: Fetch a dealer's reviews with sentiment
/// - `POST /reviews`: Post a review (requires a session)

pub mod clients;
pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod schema;
pub mod seed;
pub mod session;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use clients::{DealerClient, SentimentClient};
use handlers::*;

/// Shared application state handed to every handler
///
/// This is the explicit context that replaces any request-bound global:
/// the connection pool plus the two outbound clients, all cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool
    pub pool: Arc<db::DbPool>,
    /// Client for the external dealer service
    pub dealer: DealerClient,
    /// Client for the external sentiment analyzer
    pub sentiment: SentimentClient,
}

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `state` - The application state shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the state attached
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Authentication
        .route("/login", post(login_handler))
        .route("/logout", get(logout_handler).post(logout_handler))
        .route("/register", post(register_handler))
        // Car catalog
        .route("/cars", get(get_cars_handler))
        // Dealer proxy
        .route("/dealers", get(get_dealerships_handler))
        .route("/dealers/{state}", get(get_dealerships_by_state_handler))
        .route("/dealer/{id}", get(get_dealer_handler))
        .route("/dealer/{id}/reviews", get(get_dealer_reviews_handler))
        .route("/reviews", post(add_review_handler))
        // The frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use diesel::{Connection, RunQueryDsl, SqliteConnection};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let pool = crate::repo::tests::setup_test_db();
        // The clients point at closed ports; these tests never call out
        AppState {
            pool,
            dealer: DealerClient::new("http://127.0.0.1:9").unwrap(),
            sentiment: SentimentClient::new("http://127.0.0.1:9").unwrap(),
        }
    }

    /// Tests the run_migrations function
    ///
    /// This test verifies that:
    /// 1. Migrations can be run successfully
    /// 2. The expected tables are created in the database
    #[test]
    fn test_run_migrations() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();

        run_migrations(&mut conn);

        for table in ["car_makes", "car_models", "users", "sessions"] {
            let result = diesel::sql_query(format!(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='{}'",
                table
            ))
            .execute(&mut conn);
            assert!(result.is_ok());
        }
    }

    /// Tests that the cars route seeds an empty catalog and lists it
    #[tokio::test]
    async fn test_get_cars_seeds_empty_catalog() {
        let app = create_app(test_state());

        let request = Request::builder()
            .uri("/cars")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let cars: Value = serde_json::from_slice(&body).unwrap();

        assert!(!cars["CarModels"].as_array().unwrap().is_empty());
    }

    /// Tests that a failed login carries no status field
    #[tokio::test]
    async fn test_login_unknown_user_has_no_status() {
        let app = create_app(test_state());

        let request = Request::builder()
            .uri("/login")
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"userName":"nobody","password":"pw"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(payload["userName"], "nobody");
        assert!(payload.get("status").is_none());
    }
}
