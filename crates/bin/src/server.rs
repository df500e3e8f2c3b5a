//! Read-only HTTP API over the exported artifact.
//!
//! The server never owns pipeline state: it re-reads the artifact file on
//! each request, so a fresh `pravasi fuse` run is picked up without a
//! restart, and a missing artifact is a descriptive error payload rather
//! than a process failure. Responses carry permissive CORS headers so the
//! map frontend can fetch the artifact from any origin.

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Debug, Clone)]
struct AppState {
    artifact_path: Arc<PathBuf>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/migration-data", get(migration_data))
        .route("/api/alerts", get(alerts))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub(crate) async fn serve(artifact: PathBuf, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState {
        artifact_path: Arc::new(artifact),
    });

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    println!("Serving on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "online", "model": "gbdt-v1" }))
}

async fn migration_data(State(state): State<AppState>) -> Json<Value> {
    match std::fs::read_to_string(state.artifact_path.as_ref()) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(value) => Json(value),
            Err(e) => Json(json!({ "error": format!("artifact is not valid JSON: {e}") })),
        },
        Err(_) => Json(json!({
            "error": "Migration master file not found. Run `pravasi fuse` first."
        })),
    }
}

/// Static sample alert feed for UI development; unrelated to the pipeline
/// output.
async fn alerts() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "district": "Bangalore",
            "alert": "High Inflow Predicted",
            "recommendation": "Increase urban infrastructure capacity."
        },
        {
            "id": 2,
            "district": "Rural District X",
            "alert": "Child Migration Spike",
            "recommendation": "Check school enrollment for ages 5-17."
        }
    ]))
}
