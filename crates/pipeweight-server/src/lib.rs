//! HTTP endpoint for pipe weight and price aggregation

pub mod api;
pub mod error;
pub mod state;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use pipeweight_app::config::Config;
use pipeweight_types::{ConfigError, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Cross-origin policy: any origin when the list is empty or contains "*"
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidValue(format!("allowed origin '{}'", origin)))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(origins))
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/calculate-weight", post(api::calculate_weight))
        .route("/specs", get(api::list_specs))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
