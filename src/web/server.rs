use axum::{http::HeaderValue, http::Method, routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::geocode as geocode_handlers;
use super::api::health as health_handlers;
use super::api::satellite as satellite_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin(&state.config.web.cors_origin))
        .allow_methods([Method::GET]);

    Router::new()
        .route(
            "/api/satellite/{id}/{lat}/{lng}/{alt}/{seconds}",
            get(satellite_handlers::positions),
        )
        .route(
            "/api/reverse-geocode/{lat}/{lng}",
            get(geocode_handlers::reverse_geocode),
        )
        .route("/test", get(health_handlers::health))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_origin(origin: &str) -> AllowOrigin {
    match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(e) => {
            log::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    }
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();

    if config.n2yo_api_key().is_none() {
        log::warn!("N2YO_API_KEY is not set, satellite lookups will fail");
    }
    if config.opencage_api_key().is_none() {
        log::warn!("OPENCAGE_API_KEY is not set, reverse geocoding will fail");
    }

    let state = AppState::new(config).map_err(std::io::Error::other)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("Backend listening at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
