use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dealerhub::clients::{DealerClient, SentimentClient};
use dealerhub::config::{CliArgs, get_config};
use dealerhub::{AppState, create_app, db, run_migrations};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    if std::fs::metadata(".env").is_ok() {
        info!("Loading .env file");
        dotenv::dotenv().ok();
    }

    let config = get_config(CliArgs::parse());

    // Initialize the database pool and bring the schema up to date
    let pool = Arc::new(db::init_pool(&config.database_url));
    {
        let mut conn = pool.get().expect("Failed to get database connection");
        run_migrations(&mut conn);
    }

    // Outbound clients for the two external services
    let dealer = DealerClient::new(config.dealer_url.clone())
        .expect("Failed to build dealer service client");
    let sentiment = SentimentClient::new(config.sentiment_url.clone())
        .expect("Failed to build sentiment client");

    let app = create_app(AppState { pool, dealer, sentiment });

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
