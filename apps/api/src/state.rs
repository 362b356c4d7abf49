use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::advisor::counselor::Advisor;
use crate::assessment::classifier::Classifier;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Scores submissions against the catalog loaded at startup.
    pub classifier: Classifier,
    /// Pluggable advisor. `LlmAdvisor` when an API key is configured, else `TemplateAdvisor`.
    pub advisor: Arc<dyn Advisor>,
}
