use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use std::{env, time::Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};
use warp::{http::StatusCode, reject::Rejection, reply, reply::Reply, Filter};

use sheetdash::error::FetchError;
use sheetdash::shape::{shape, ShapedData};
use sheetdash::sheets;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "sheetdash",
    })))
}

/// The single data endpoint: fetch the worksheet, shape it, serve the split.
/// Every failure collapses to one 500 with a single message.
async fn get_data() -> Result<impl Reply, Rejection> {
    let start = Instant::now();

    match fetch_and_shape().await {
        Ok(data) => {
            info!(
                daily_rows = data.daily.len(),
                elapsed = ?start.elapsed(),
                "served dashboard data"
            );
            Ok(reply::with_status(reply::json(&data), StatusCode::OK))
        }
        Err(e) => {
            warn!("dashboard fetch failed after {:?}: {}", start.elapsed(), e);
            Ok(reply::with_status(
                reply::json(&ErrorResponse {
                    error: e.to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn fetch_and_shape() -> Result<ShapedData, FetchError> {
    let client = Client::new();
    let worksheet = sheets::fetch_worksheet(&client).await?;
    shape(&worksheet.rows, &worksheet.headers)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    info!("Starting sheetdash data service");

    // Health check endpoint
    let health = warp::path("health").and(warp::get()).and_then(health_check);

    // Dashboard data endpoint
    let data = warp::path!("api" / "getData")
        .and(warp::get())
        .and_then(get_data);

    // Combine routes
    let routes = health.or(data);

    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    info!("Server starting on port {}", port);
    info!("Health check: http://localhost:{}/health", port);
    info!("Data endpoint: GET http://localhost:{}/api/getData", port);

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let result = health_check().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[ignore] // Needs live credentials; remove this to run against the real sheet
    async fn test_get_data_live() {
        let result = fetch_and_shape().await;
        assert!(result.is_ok(), "fetch failed: {:?}", result.err());
    }
}
