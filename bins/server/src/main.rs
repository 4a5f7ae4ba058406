//! Sarraf API Server
//!
//! Main entry point for the Sarraf backend service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sarraf_api::{AppState, create_router, rates::RateProvider};
use sarraf_db::{ExchangeRateRepository, connect};
use sarraf_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sarraf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Install seed rates on an empty table
    let rate_repo = ExchangeRateRepository::new(db.clone());
    if rate_repo.seed_defaults().await? {
        info!("Default exchange rates initialized");
    }

    // Start the periodic rate refresh
    let provider = RateProvider::new(db.clone(), config.rates.clone());
    let refresh_interval = Duration::from_secs(config.rates.refresh_interval_secs);
    tokio::spawn(provider.run(refresh_interval));

    // Create JWT service
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expiry_hours: config.jwt.token_expiry_hours,
    });

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
