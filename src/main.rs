use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use patientor_core::config::{enforce_diagnosis_codes_from_env_value, seed_dir_from_env_value};
use patientor_core::constants::{
    DEFAULT_REST_ADDR, ENFORCE_DIAGNOSIS_CODES_ENV, REST_ADDR_ENV, SEED_DIR_ENV,
};
use patientor_core::{CoreConfig, Services};

/// Main entry point for the Patientor application
///
/// Loads the seed data into an in-memory record store and serves the REST API.
///
/// # Environment Variables
/// - `PATIENTOR_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `PATIENTOR_SEED_DIR`: Directory holding replacement `patients.json` and `diagnoses.json`
/// - `PATIENTOR_ENFORCE_DIAGNOSIS_CODES`: Reject entries citing unknown diagnosis codes
/// - `RUST_LOG`: Log filter (default directives: `patientor_run`, `patientor_core` and `api_rest` at info)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, seed loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor_run=info".parse()?)
                .add_directive("patientor_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let seed_dir = seed_dir_from_env_value(std::env::var(SEED_DIR_ENV).ok());
    let enforce_diagnosis_codes =
        enforce_diagnosis_codes_from_env_value(std::env::var(ENFORCE_DIAGNOSIS_CODES_ENV).ok())?;

    let cfg = Arc::new(CoreConfig::new(seed_dir, enforce_diagnosis_codes)?);
    let services = Services::from_config(cfg)?;

    tracing::info!("++ Starting Patientor REST on {}", rest_addr);

    let app = api_rest::router(AppState::new(services));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
