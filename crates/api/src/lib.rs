use std::env;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use roam_agents::{PlannerOptions, TripPlannerAgent};
use roam_core::{SuggestForm, TripForm, ValidationError};
use roam_observability::AppMetrics;
use roam_providers::{
    ConfiguredBackends, GeminiClient, MakcorpsHotelClient, ProviderConfig, ProviderSet,
    UnsplashImageClient,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 16 * 1024;
const INDEX_HTML: &str = include_str!("../assets/index.html");

pub type Planner = TripPlannerAgent<GeminiClient, MakcorpsHotelClient, UnsplashImageClient>;

#[derive(Clone)]
pub struct ApiState {
    pub planner: Arc<Planner>,
    pub metrics: Arc<AppMetrics>,
    pub backends: ConfiguredBackends,
    pub allowed_origins: Arc<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: roam_observability::MetricsSnapshot,
    backends: ConfiguredBackends,
    concurrent_fanout: bool,
}

#[derive(Debug, Serialize)]
struct ValidationErrorResponse {
    error: &'static str,
    message: String,
    missing: Vec<&'static str>,
}

pub fn build_app() -> Result<Router> {
    let config = ProviderConfig::from_env()?;
    let options = PlannerOptions {
        concurrent_fanout: env::var("ROAM_CONCURRENT_FANOUT")
            .ok()
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false),
    };
    build_app_with(&config, options, parse_allowed_origins())
}

pub fn build_app_with(
    config: &ProviderConfig,
    options: PlannerOptions,
    allowed_origins: Vec<String>,
) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let providers = ProviderSet::from_config(config)?;
    let backends = config.configured_backends();

    tracing::info!(
        generator = backends.generator,
        hotels = backends.hotels,
        images = backends.images,
        concurrent_fanout = options.concurrent_fanout,
        "backends configured"
    );

    let planner = Arc::new(TripPlannerAgent::new(
        Arc::new(providers.generator),
        Arc::new(providers.hotels),
        Arc::new(providers.images),
        metrics.clone(),
        options,
    ));

    Ok(build_router(ApiState {
        planner,
        metrics,
        backends,
        allowed_origins: Arc::new(allowed_origins),
    }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/v1/plan", post(generate_plan))
        .route("/v1/suggest", post(suggest_destination))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        backends: state.backends,
        concurrent_fanout: state.planner.options().concurrent_fanout,
    };
    (StatusCode::OK, Json(payload))
}

async fn generate_plan(
    State(state): State<ApiState>,
    payload: Result<Json<TripForm>, JsonRejection>,
) -> Response {
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return rejected_body_response(&state, rejection),
    };
    match state.planner.generate_plan(&form).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => validation_error_response(&error),
    }
}

async fn suggest_destination(
    State(state): State<ApiState>,
    payload: Result<Json<SuggestForm>, JsonRejection>,
) -> Response {
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return rejected_body_response(&state, rejection),
    };
    match state.planner.suggest_destination(&form).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => validation_error_response(&error),
    }
}

fn validation_error_response(error: &ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationErrorResponse {
            error: "validation_failed",
            message: error.to_string(),
            missing: error.missing().iter().map(|field| field.as_str()).collect(),
        }),
    )
        .into_response()
}

/// Bodies axum cannot decode (wrong types, unknown selector values) get the
/// same JSON shape as a failed presence check.
fn rejected_body_response(state: &ApiState, rejection: JsonRejection) -> Response {
    state.metrics.inc_validation_failure();
    tracing::warn!(status = %rejection.status(), "request body rejected");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationErrorResponse {
            error: "validation_failed",
            message: rejection.body_text(),
            missing: Vec::new(),
        }),
    )
        .into_response()
}

fn parse_allowed_origins() -> Vec<String> {
    let default_origins = ["http://localhost:8080", "http://127.0.0.1:8080"];

    env::var("ROAM_ALLOWED_ORIGINS")
        .ok()
        .map(|value| {
            value
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|| default_origins.iter().map(ToString::to_string).collect())
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:8080")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // The form page runs one inline script and shows remote photos.
    headers.insert(
        header::HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(
            "default-src 'self'; img-src 'self' https:; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; frame-ancestors 'none'; base-uri 'none'",
        ),
    );

    response
}
