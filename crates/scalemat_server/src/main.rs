//! Scalemat sync/load API server
//!
//! Thin HTTP facade over the in-memory [`state::AppState`]: clients push
//! and pull whole matrix/scaling states and request export artifacts. All
//! real data-model logic lives in `scalemat_core`.

use std::path::PathBuf;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod error;
mod handlers;
mod state;

use handlers::{
    export_matrix_config, export_paths, generate_config_matrix, load_matrix, load_matrix_state,
    submit_values, sync_matrix, sync_matrix_state, update_form_labels, update_form_values,
};
use state::AppState;

fn router(state: state::SharedState) -> Router {
    Router::new()
        .route("/", get(|| async { "Scalemat API Server" }))
        // Whole-state sync and load
        .route("/api/sync-matrix", post(sync_matrix))
        .route("/api/sync-matrix-state", post(sync_matrix_state))
        .route("/api/load-matrix", get(load_matrix))
        .route("/api/load-matrix-state", get(load_matrix_state))
        // Partial patches
        .route("/api/update-form-labels", post(update_form_labels))
        .route("/api/update-form-values", post(update_form_values))
        .route("/api/submit-values/{version}", post(submit_values))
        // Export artifacts
        .route("/api/export-matrix-config", post(export_matrix_config))
        .route("/api/generate-config-matrix", post(generate_config_matrix))
        .route("/api/export-paths", post(export_paths))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scalemat_server=info,tower_http=warn")),
        )
        .init();

    let export_dir = std::env::var("SCALEMAT_EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("exports"));
    let state = AppState::shared(export_dir);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001")
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
