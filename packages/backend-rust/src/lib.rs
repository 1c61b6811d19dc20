pub mod catalog;
pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;

use axum::http::HeaderValue;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::{CatalogError, ExerciseCatalog};
use crate::config::{Config, CorsOrigins};
use crate::state::AppState;

/// Loads the catalog named by `config` and builds the full application router
pub fn create_app(config: &Config) -> Result<axum::Router, CatalogError> {
    let catalog = ExerciseCatalog::load(&config.exercises_path)?;
    let state = AppState::new(catalog, config.validated_bkt_params());
    Ok(build_app(state, &config.cors_origins))
}

pub fn build_app(state: AppState, origins: &CorsOrigins) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
    }
}
