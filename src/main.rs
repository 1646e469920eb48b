mod app;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::external::http_provider::HttpPricingProvider;
use crate::external::mock_provider::MockPricingProvider;
use crate::external::pricing_provider::PricingDataProvider;
use crate::logging::LoggingConfig;
use crate::state::{AppState, SessionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;

    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    // Select pricing data source based on PRICING_SOURCE env var (defaults to http)
    let source_name = std::env::var("PRICING_SOURCE").unwrap_or_else(|_| "http".to_string());

    let provider: Arc<dyn PricingDataProvider> = match source_name.to_lowercase().as_str() {
        "http" => {
            tracing::info!("📊 Using pricing source: ingestion service over HTTP");
            Arc::new(
                HttpPricingProvider::from_env()
                    .map_err(|e| anyhow::anyhow!("failed to create HttpPricingProvider: {}", e))?,
            )
        }
        "mock" => {
            tracing::info!("📊 Using pricing source: deterministic mock data");
            Arc::new(MockPricingProvider::new())
        }
        _ => {
            anyhow::bail!("Invalid PRICING_SOURCE: {}. Must be 'http' or 'mock'", source_name);
        }
    };

    let state = AppState {
        pool,
        pricing_provider: provider,
        sessions: SessionRegistry::new(),
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 RateCal backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
