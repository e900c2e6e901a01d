use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use hyper::Server;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::orchestrator::{Mode, Orchestrator};
use crate::types::FindRequest;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "event-finder",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn find_opportunities(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: Option<Json<FindRequest>>,
) -> impl IntoResponse {
    find(orchestrator, Mode::Business, body, "Failed to fetch opportunities").await
}

async fn find_public_events(
    State(orchestrator): State<Arc<Orchestrator>>,
    body: Option<Json<FindRequest>>,
) -> impl IntoResponse {
    find(orchestrator, Mode::Public, body, "Failed to fetch public events").await
}

async fn find(
    orchestrator: Arc<Orchestrator>,
    mode: Mode,
    body: Option<Json<FindRequest>>,
    failure_message: &'static str,
) -> axum::response::Response {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    match orchestrator.find_events(mode, &request).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => {
            error!(error = %e, "request failed");
            let envelope = serde_json::json!({
                "message": failure_message,
                "error": e.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
        }
    }
}

/// Create the HTTP router with permissive CORS. Non-POST methods on the API
/// routes get 405 from the router itself.
pub fn create_server(orchestrator: Arc<Orchestrator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", axum::routing::get(health))
        .route(
            "/api/find-opportunities",
            post(find_opportunities).options(preflight),
        )
        .route(
            "/api/find-public-events",
            post(find_public_events).options(preflight),
        )
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(orchestrator)
}

/// Start the HTTP server on the specified port
pub async fn start_server(orchestrator: Arc<Orchestrator>, port: u16) -> anyhow::Result<()> {
    let app = create_server(orchestrator);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("📅 Business:     POST http://localhost:{port}/api/find-opportunities");
    println!("🎪 Public:       POST http://localhost:{port}/api/find-public-events");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
