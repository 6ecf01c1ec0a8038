//! Router assembly and the listener lifecycle.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use seatwise_core::RequestId;

use crate::handlers;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the full route table over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/data/{table}", get(handlers::data::get_table))
        .route("/api/r129-consultant", post(handlers::consult::consult))
        .route(
            "/api/comprehensive-design",
            post(handlers::design::comprehensive_design),
        )
        .route(
            "/api/design-assistant",
            post(handlers::assistant::design_assistant),
        )
        .route("/api/local-advice", post(handlers::local_advice::local_advice))
        .route("/api/search", post(handlers::search::search))
        .route("/api/brand-search", post(handlers::brand_search::brand_search))
        .route("/api/audit-report", post(handlers::audit::audit_report))
        .route("/api/validate-data", post(handlers::validate::validate_data))
        .route("/api/generate-image", post(handlers::image::generate_image))
        .route("/api/dimensions", post(handlers::dimensions::dimensions))
        .layer(middleware::from_fn(request_tracing))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs every request inside a span carrying its request id, echoing the
/// id back in `x-request-id`. A client-supplied id is kept.
async fn request_tracing(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| RequestId::new().to_string(), str::to_string);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %request.method(),
        route = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Binds `addr` and serves until SIGINT or SIGTERM.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Seatwise listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = sigint.recv() => {},
                }
            }
            _ => {
                tracing::warn!("Could not install signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received; draining connections");
}
