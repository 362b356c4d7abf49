mod advisor;
mod assessment;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::counselor::{Advisor, LlmAdvisor, TemplateAdvisor};
use crate::assessment::catalog::Catalog;
use crate::assessment::classifier::Classifier;
use crate::assessment::reference::reference_catalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPath API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (migrations applied on connect)
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Load the question catalog
    let catalog = load_catalog(&config).await?;
    info!(
        "Catalog '{}' loaded: {} questions, {} labels",
        catalog.revision(),
        catalog.questions().len(),
        catalog.labels().len()
    );
    let classifier = Classifier::new(catalog);

    // Pick the advisor backend
    let advisor: Arc<dyn Advisor> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM advisor enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmAdvisor(llm))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; using template advisor");
            Arc::new(TemplateAdvisor)
        }
    };

    let state = AppState {
        db,
        s3,
        config: config.clone(),
        classifier,
        advisor,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reads the catalog from `CATALOG_PATH`, or falls back to the reference catalog.
async fn load_catalog(config: &Config) -> Result<Catalog> {
    let Some(path) = &config.catalog_path else {
        return reference_catalog().context("Reference catalog failed validation");
    };

    let document = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    Catalog::from_json(&document)
        .with_context(|| format!("Invalid catalog file {}", path.display()))
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "careerpath-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
