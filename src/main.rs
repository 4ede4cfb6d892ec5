use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use pft_core::{CoreConfig, config::enforce_limits_from_env_value, validation::InputLimits};

/// Main entry point for the PFT service
///
/// Resolves configuration once, then serves the REST API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `PFT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PFT_ENFORCE_INPUT_LIMITS`: Validate report forms against input limits (default: true)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pft=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PFT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let enforce_limits =
        enforce_limits_from_env_value(std::env::var("PFT_ENFORCE_INPUT_LIMITS").ok())?;

    let cfg = Arc::new(CoreConfig::new(InputLimits::default(), enforce_limits));
    tracing::info!(enforce_limits, "++ Starting PFT REST on {}", rest_addr);

    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
