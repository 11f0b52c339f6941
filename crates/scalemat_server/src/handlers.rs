//! Request handlers for the sync/load API
//!
//! Every response carries a `success` flag; failures map to non-2xx status
//! codes through [`ApiError`]. Whole-state sync endpoints replace the
//! stored state in one assignment, never patch it incrementally.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scalemat_core::ParameterMatrix;
use scalemat_core::exchange::{self, ExportFile};
use scalemat_core::model::{ScalingState, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LoadMatrixResponse {
    pub success: bool,
    pub matrix: ParameterMatrix,
}

#[derive(Debug, Serialize)]
pub struct LoadScalingResponse {
    pub success: bool,
    pub state: ScalingState,
}

#[derive(Debug, Serialize)]
pub struct PatchResponse {
    pub success: bool,
    pub applied: usize,
    /// Ids that did not match any parameter and were skipped
    pub skipped: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub submission_id: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ExportPathsResponse {
    pub success: bool,
    pub paths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfigMatrixResponse {
    pub success: bool,
    pub rows: Vec<ConfigRow>,
}

#[derive(Debug, Serialize)]
pub struct ConfigRow {
    pub param: String,
    pub version: String,
    pub zone: String,
    pub value: Value,
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LabelPatchRequest {
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ValuePatchRequest {
    pub values: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportRequest {
    pub description: String,
    pub scaling_type: String,
}

// ============================================================================
// Sync / load
// ============================================================================

pub async fn sync_matrix(
    State(state): State<SharedState>,
    Json(matrix): Json<ParameterMatrix>,
) -> ApiResult<Json<StatusResponse>> {
    let mut state = state.lock()?;
    state.sync_matrix(matrix);
    tracing::info!("matrix synchronized");
    Ok(StatusResponse::ok("matrix synchronized"))
}

pub async fn sync_matrix_state(
    State(state): State<SharedState>,
    Json(scaling): Json<ScalingState>,
) -> ApiResult<Json<StatusResponse>> {
    let mut state = state.lock()?;
    state.sync_scaling(scaling);
    tracing::info!("scaling state synchronized");
    Ok(StatusResponse::ok("scaling state synchronized"))
}

pub async fn load_matrix(
    State(state): State<SharedState>,
) -> ApiResult<Json<LoadMatrixResponse>> {
    let state = state.lock()?;
    let matrix = state.matrix.clone().ok_or(ApiError::NotSynced)?;
    Ok(Json(LoadMatrixResponse {
        success: true,
        matrix,
    }))
}

pub async fn load_matrix_state(
    State(state): State<SharedState>,
) -> ApiResult<Json<LoadScalingResponse>> {
    let state = state.lock()?;
    let scaling = state.scaling.clone().ok_or(ApiError::NotSynced)?;
    Ok(Json(LoadScalingResponse {
        success: true,
        state: scaling,
    }))
}

// ============================================================================
// Partial patches
// ============================================================================

pub async fn update_form_labels(
    State(state): State<SharedState>,
    Json(req): Json<LabelPatchRequest>,
) -> ApiResult<Json<PatchResponse>> {
    let mut state = state.lock()?;
    let skipped = state.patch_labels(&req.labels)?;
    Ok(Json(PatchResponse {
        success: true,
        applied: req.labels.len() - skipped.len(),
        skipped,
    }))
}

pub async fn update_form_values(
    State(state): State<SharedState>,
    Json(req): Json<ValuePatchRequest>,
) -> ApiResult<Json<PatchResponse>> {
    let mut state = state.lock()?;
    let skipped = state.patch_values(&req.values)?;
    Ok(Json(PatchResponse {
        success: true,
        applied: req.values.len() - skipped.len(),
        skipped,
    }))
}

pub async fn submit_values(
    State(state): State<SharedState>,
    Path(version): Path<String>,
    Json(values): Json<serde_json::Value>,
) -> ApiResult<Json<SubmitResponse>> {
    let submission_id = Uuid::new_v4().to_string();
    let mut state = state.lock()?;
    state.submissions.insert(
        version.clone(),
        crate::state::Submission {
            values,
            received_at: jiff::Timestamp::now(),
        },
    );
    tracing::info!("values submitted for version {version}");
    Ok(Json(SubmitResponse {
        success: true,
        submission_id,
    }))
}

// ============================================================================
// Exports
// ============================================================================

pub async fn export_matrix_config(
    State(state): State<SharedState>,
    Json(req): Json<ExportRequest>,
) -> ApiResult<Json<ExportResponse>> {
    let mut state = state.lock()?;
    let scaling = state.scaling.clone().ok_or(ApiError::NotSynced)?;

    let file: ExportFile =
        exchange::export_state(&scaling, &[], &req.description, &req.scaling_type);
    let path = state
        .export_dir
        .join(format!("scalemat-export-{}.json", Uuid::new_v4()));

    std::fs::create_dir_all(&state.export_dir)
        .map_err(|e| ApiError::ExportError(e.to_string()))?;
    exchange::write_export(&path, &file)?;

    let path = path.display().to_string();
    state.export_paths.push(path.clone());
    tracing::info!("wrote export {path}");
    Ok(Json(ExportResponse {
        success: true,
        path,
    }))
}

pub async fn generate_config_matrix(
    State(state): State<SharedState>,
) -> ApiResult<Json<ConfigMatrixResponse>> {
    let state = state.lock()?;
    let matrix = state.matrix.as_ref().ok_or(ApiError::NotSynced)?;

    let mut rows = Vec::new();
    for param in matrix.parameters() {
        for version in matrix.versions() {
            for zone in matrix.zones() {
                if let Some(value) = param.cell(&version.id, &zone.id) {
                    rows.push(ConfigRow {
                        param: param.id.to_string(),
                        version: version.id.to_string(),
                        zone: zone.id.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
    }

    Ok(Json(ConfigMatrixResponse {
        success: true,
        rows,
    }))
}

pub async fn export_paths(
    State(state): State<SharedState>,
) -> ApiResult<Json<ExportPathsResponse>> {
    let state = state.lock()?;
    Ok(Json(ExportPathsResponse {
        success: true,
        paths: state.export_paths.clone(),
    }))
}
