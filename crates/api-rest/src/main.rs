//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, with OpenAPI/Swagger UI.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `pft-run` binary serves the same
//! router.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use pft_core::{config::enforce_limits_from_env_value, validation::InputLimits, CoreConfig};

/// Main entry point for the PFT REST API server
///
/// # Environment Variables
/// - `PFT_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PFT_ENFORCE_INPUT_LIMITS`: Validate report forms against input limits (default: true)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration cannot be parsed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("pft_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PFT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let enforce_limits =
        enforce_limits_from_env_value(std::env::var("PFT_ENFORCE_INPUT_LIMITS").ok())?;

    let cfg = Arc::new(CoreConfig::new(InputLimits::default(), enforce_limits));

    tracing::info!("-- Starting PFT REST API on {}", addr);

    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
