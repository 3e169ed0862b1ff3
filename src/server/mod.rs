//! HTTP surface: router, handlers, and API error mapping
//!
//! Two POST endpoints mirror the public API: an ad-hoc single domain check
//! and the full naming pipeline. Provider credentials are read from the
//! environment per request, so a missing key is a request-time 500 rather
//! than a startup failure.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config_error;
use crate::domain::{AvailabilityCheck, DnsChecker};
use crate::error::NameForgeError;
use crate::llm::create_provider;
use crate::pipeline::{validate_request, NamingPipeline};
use crate::types::{LlmConfig, NamingOutcome, NamingRequest, PipelineConfig, ProviderKind};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<DnsChecker>,
    pub pipeline_config: PipelineConfig,
}

impl AppState {
    /// Build process-scoped state from the environment
    pub fn from_env() -> Self {
        let checker = match env::var("DNS_RESOLVER_URL") {
            Ok(url) if !url.is_empty() => DnsChecker::with_resolver(url),
            _ => DnsChecker::new(),
        };

        Self {
            checker: Arc::new(checker),
            pipeline_config: PipelineConfig::default(),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/check-domain", post(check_domain))
        .route("/api/generate-names", post(generate_names))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Ad-hoc domain check request
#[derive(Debug, Deserialize)]
struct CheckDomainRequest {
    domain: Option<String>,
}

/// Ad-hoc domain check response
#[derive(Debug, Serialize)]
struct CheckDomainResponse {
    domain: String,
    available: bool,
    status: u32,
}

/// Naming pipeline request; fields are optional so missing input maps to a
/// 400 with a descriptive message instead of a body-rejection error
#[derive(Debug, Deserialize)]
struct GenerateNamesRequest {
    industry: Option<String>,
    keywords: Option<String>,
    tone: Option<String>,
}

/// Naming pipeline response
#[derive(Debug, Serialize)]
struct GenerateNamesResponse {
    success: bool,
    #[serde(flatten)]
    outcome: NamingOutcome,
}

// ============================================================================
// Handlers
// ============================================================================

async fn check_domain(
    State(state): State<AppState>,
    Json(body): Json<CheckDomainRequest>,
) -> Result<Json<CheckDomainResponse>, ApiError> {
    let domain = body.domain.unwrap_or_default();
    if domain.trim().is_empty() {
        return Err(ApiError::bad_request("Domain is required"));
    }

    let lookup = state.checker.lookup(&domain).await.map_err(check_error)?;

    Ok(Json(CheckDomainResponse {
        domain: lookup.domain,
        available: lookup.availability.is_available(),
        status: lookup.status,
    }))
}

async fn generate_names(
    State(state): State<AppState>,
    Json(body): Json<GenerateNamesRequest>,
) -> Result<Json<GenerateNamesResponse>, ApiError> {
    let request = NamingRequest {
        industry: body.industry.unwrap_or_default(),
        keywords: body.keywords.unwrap_or_default(),
        tone: body.tone,
    };

    // Input validation first: a missing field is the caller's mistake even
    // when credentials are also absent.
    validate_request(&request).map_err(pipeline_error)?;

    let pipeline = build_pipeline(&state).map_err(pipeline_error)?;
    let outcome = pipeline.run(&request).await.map_err(pipeline_error)?;

    Ok(Json(GenerateNamesResponse {
        success: true,
        outcome,
    }))
}

/// Construct a request-scoped pipeline from environment credentials
fn build_pipeline(state: &AppState) -> Result<NamingPipeline, NameForgeError> {
    let (openai_config, gemini_config) = provider_configs_from_env()?;

    let openai: Arc<dyn crate::llm::ChatProvider> = Arc::from(create_provider(&openai_config)?);
    let gemini: Arc<dyn crate::llm::ChatProvider> = Arc::from(create_provider(&gemini_config)?);

    Ok(NamingPipeline::new(
        openai.clone(),
        (openai.clone(), gemini),
        openai,
        state.checker.clone() as Arc<dyn AvailabilityCheck>,
        state.pipeline_config.clone(),
    ))
}

fn provider_configs_from_env() -> Result<(LlmConfig, LlmConfig), NameForgeError> {
    let openai_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
    let gemini_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

    let (Some(openai_key), Some(gemini_key)) = (openai_key, gemini_key) else {
        return Err(config_error!("API keys for OpenAI and Gemini are required."));
    };

    let openai = LlmConfig {
        provider: ProviderKind::OpenAi,
        model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
        api_key: openai_key,
        base_url: env::var("OPENAI_BASE_URL").ok(),
    };

    let gemini = LlmConfig {
        provider: ProviderKind::Gemini,
        model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
        api_key: gemini_key,
        base_url: env::var("GEMINI_BASE_URL").ok(),
    };

    Ok((openai, gemini))
}

// ============================================================================
// Error mapping
// ============================================================================

/// API-facing error with the body shape `{error, details?}`
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

impl ApiError {
    fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: None,
        }
    }

    fn internal(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "error": self.error });
        if let Some(details) = self.details {
            body["details"] = serde_json::Value::String(details);
        }
        (self.status, Json(body)).into_response()
    }
}

/// Map a pipeline failure onto the generate-names wire contract
fn pipeline_error(err: NameForgeError) -> ApiError {
    match err {
        NameForgeError::Validation { message } => ApiError::bad_request(message),
        NameForgeError::Config { message } => ApiError::internal(message, None),
        other => {
            tracing::error!(error = %other, "Naming pipeline failed");
            ApiError::internal("Failed to generate names.", Some(other.to_string()))
        }
    }
}

/// Map a checker failure onto the check-domain wire contract
fn check_error(err: NameForgeError) -> ApiError {
    match err {
        NameForgeError::Validation { message } => ApiError::bad_request(message),
        other => {
            tracing::error!(error = %other, "Domain check failed");
            ApiError::internal("Failed to check domain availability", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let err = pipeline_error(NameForgeError::validation(
            "Industry and keywords are required",
        ));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "Industry and keywords are required");
        assert!(err.details.is_none());
    }

    #[test]
    fn missing_credentials_map_to_500_with_message() {
        let err = pipeline_error(NameForgeError::config(
            "API keys for OpenAI and Gemini are required.",
        ));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "API keys for OpenAI and Gemini are required.");
    }

    #[test]
    fn pipeline_failures_map_to_500_with_details() {
        let err = pipeline_error(NameForgeError::pipeline_exhausted(2));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Failed to generate names.");
        assert!(err.details.unwrap().contains("2 attempts"));
    }

    #[test]
    fn check_failures_hide_internals() {
        let err = check_error(NameForgeError::network("boom", None, None));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Failed to check domain availability");
        assert!(err.details.is_none());
    }
}
