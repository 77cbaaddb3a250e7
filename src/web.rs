//! Dashboard web server: the embedded page plus the JSON endpoints it calls

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{NavMindError, catalog};
use crate::config::ServerConfig;
use crate::models::{ChatExchange, CitySuggestions, PreferenceSet, Season, TripPlan};
use crate::planner::TripPlanner;

const INDEX: &str = include_str!("../static/index.html");

type AppState = Arc<TripPlanner>;

#[derive(Debug, Deserialize)]
pub struct CitiesQuery {
    pub interest: String,
    #[serde(default)]
    pub season: Season,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub preferences: PreferenceSet,
    /// Defaults to the first suggested city
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub prompt: String,
}

/// Error response carrying the user-facing message
struct ApiError(NavMindError);

impl From<NavMindError> for ApiError {
    fn from(err: NavMindError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(NavMindError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(NavMindError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            NavMindError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            NavMindError::Api { .. } | NavMindError::NotFound { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(planner: AppState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/cities", get(get_cities))
        .route("/plan", post(post_plan))
        .route("/refine", post(post_refine));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds.into()),
        ))
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(cors)
        .with_state(planner)
}

pub async fn run(server: &ServerConfig, planner: AppState) -> Result<()> {
    let app = router(planner, server);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn index() -> Html<&'static str> {
    Html(INDEX)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_cities(
    query: Result<Query<CitiesQuery>, QueryRejection>,
) -> Result<Json<CitySuggestions>, ApiError> {
    let Query(query) = query?;
    Ok(Json(catalog::suggestions(&query.interest, query.season)))
}

async fn post_plan(
    State(planner): State<AppState>,
    request: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<TripPlan>, ApiError> {
    let Json(request) = request?;
    let preferences = request.preferences.validated()?;

    let city = match request.city.filter(|c| !c.trim().is_empty()) {
        Some(city) => city,
        None => planner
            .suggest(&preferences)
            .cities
            .into_iter()
            .next()
            .ok_or_else(|| NavMindError::general("No city available for this interest"))?,
    };

    let plan = planner.plan(&preferences, &city).await?;
    Ok(Json(plan))
}

async fn post_refine(
    State(planner): State<AppState>,
    request: Result<Json<RefineRequest>, JsonRejection>,
) -> Result<Json<ChatExchange>, ApiError> {
    let Json(request) = request?;
    Ok(Json(planner.refine(&request.prompt).await?))
}
