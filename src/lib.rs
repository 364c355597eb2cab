use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod analytics;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let analytics_routes = Router::new()
        .route(
            "/api/analytics/habits",
            post(handlers::analytics::habits_with_meta),
        )
        .route("/api/analytics/weekly", post(handlers::analytics::weekly))
        .route("/api/analytics/heatmap", post(handlers::analytics::heatmap))
        .route("/api/analytics/insights", post(handlers::analytics::insights))
        .route("/api/analytics/dashboard", post(handlers::analytics::dashboard))
        .route("/api/analytics/report", post(handlers::analytics::report))
        .route("/api/analytics/days/:date", post(handlers::analytics::day))
        .route("/api/analytics/moods", post(handlers::moods::report));

    Router::new()
        .merge(public_routes)
        .merge(analytics_routes)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(%origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
