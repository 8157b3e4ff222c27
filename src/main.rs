//! Credit Dashboard command-line session
//!
//! Checks the scoring API, analyzes one client and prints the analysis as
//! JSON. The client is read from the JSON file given as first argument,
//! or taken from the form defaults.
//!
//! ```text
//! credit-dashboard [client.json]
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use credit_dashboard::adapters::{HttpScoringClient, ScoringClientConfig};
use credit_dashboard::application::{
    AnalyzeClientCommand, AnalyzeClientHandler, CheckHealthCommand, CheckHealthHandler,
    DashboardError, DashboardSession,
};
use credit_dashboard::config::{AppConfig, ConfigError, LoggingConfig};
use credit_dashboard::domain::client::ClientRecord;
use credit_dashboard::ports::ApiError;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Scoring API unavailable: {0}")]
    Unavailable(String),

    #[error("{}", .0.user_message())]
    Dashboard(#[from] DashboardError),

    #[error("Failed to read client file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid client file: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        CliError::Dashboard(err.into())
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("credit_dashboard=info"));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_client(path: Option<String>) -> Result<ClientRecord, CliError> {
    let Some(path) = path else {
        return Ok(ClientRecord::default());
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

async fn run() -> Result<(), CliError> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate().map_err(ConfigError::from)?;

    tracing::info!(base_url = %config.api.base_url, "Credit dashboard starting");

    let client = HttpScoringClient::new(ScoringClientConfig::from(&config.api))?;
    let session = Arc::new(DashboardSession::new(Arc::new(client), config.cache.clone()));

    // A failed health check ends the session
    let health = CheckHealthHandler::new(session.clone())
        .handle(CheckHealthCommand::default())
        .await
        .map_err(|err| CliError::Unavailable(err.user_message()))?;
    tracing::info!(status = %health.status, "Scoring API reachable");

    let record = read_client(std::env::args().nth(1))?;
    let view = AnalyzeClientHandler::new(session)
        .handle(AnalyzeClientCommand { record })
        .await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Credit dashboard failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
