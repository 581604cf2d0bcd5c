// Server module - router assembly shared by main.rs and the integration tests

use axum::Router;
use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::domain::{DistanceProvider, FixedDistance};
use crate::infrastructure::AppState;
use crate::infrastructure::config::{Config, DistanceMode};
use crate::modules::integrations::{NominatimClient, NominatimDistance};

/// Build the full application router: `/api`, Swagger UI, tracing and CORS.
///
/// An empty `cors_origins` list allows any origin.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api::api_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Distance provider selected by configuration
pub fn distance_provider_from_config(
    config: &Config,
) -> Result<Arc<dyn DistanceProvider>, String> {
    match config.distance_mode {
        DistanceMode::Fixed(km) => {
            tracing::info!("Using fixed distance of {} km for every pair", km);
            Ok(Arc::new(FixedDistance(km)))
        }
        DistanceMode::Nominatim => {
            tracing::info!("Using Nominatim geocoder at {}", config.geocoder_url);
            let client = NominatimClient::new(&config.geocoder_url, &config.geocoder_user_agent)?;
            Ok(Arc::new(NominatimDistance::new(client)))
        }
    }
}
