//! In-memory server-side state
//!
//! The service is an opaque sync/load store: clients push whole states and
//! pull them back. Persistence beyond process lifetime is out of scope, so
//! the state lives behind one mutex and every handler works in a single
//! lock scope.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use jiff::Timestamp;
use scalemat_core::ParameterMatrix;
use scalemat_core::model::{ParamId, ScalingState, Value};

use crate::error::{ApiError, ApiResult};

/// One submitted value set for a version
#[derive(Debug, Clone)]
pub struct Submission {
    pub values: serde_json::Value,
    pub received_at: Timestamp,
}

#[derive(Debug, Default)]
pub struct AppState {
    /// Last fully synchronized matrix, if any
    pub matrix: Option<ParameterMatrix>,
    /// Last fully synchronized scaling state, if any
    pub scaling: Option<ScalingState>,
    /// Submitted value sets, keyed by version id string
    pub submissions: HashMap<String, Submission>,
    /// Directory export artifacts are written into
    pub export_dir: PathBuf,
    /// Paths of export artifacts written so far
    pub export_paths: Vec<String>,
}

pub type SharedState = Arc<Mutex<AppState>>;

impl AppState {
    #[must_use]
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            export_dir,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn shared(export_dir: PathBuf) -> SharedState {
        Arc::new(Mutex::new(Self::new(export_dir)))
    }

    /// Replace the stored matrix in one assignment
    pub fn sync_matrix(&mut self, matrix: ParameterMatrix) {
        self.matrix = Some(matrix);
    }

    /// Replace the stored scaling state in one assignment
    pub fn sync_scaling(&mut self, scaling: ScalingState) {
        self.scaling = Some(scaling);
    }

    /// Patch parameter labels on the stored matrix.
    ///
    /// Unknown ids are skipped and reported back, not treated as failures.
    pub fn patch_labels(&mut self, labels: &HashMap<String, String>) -> ApiResult<Vec<String>> {
        let matrix = self.matrix.as_mut().ok_or(ApiError::NotSynced)?;
        let mut skipped = Vec::new();
        for (id, label) in labels {
            if !matrix.set_label(&ParamId::new(id.clone()), label.clone()) {
                skipped.push(id.clone());
            }
        }
        Ok(skipped)
    }

    /// Patch active-cell values on the stored matrix
    pub fn patch_values(&mut self, values: &HashMap<String, Value>) -> ApiResult<Vec<String>> {
        let matrix = self.matrix.as_mut().ok_or(ApiError::NotSynced)?;
        let mut skipped = Vec::new();
        for (id, value) in values {
            if !matrix.set_value(&ParamId::new(id.clone()), value.clone(), None, None) {
                skipped.push(id.clone());
            }
        }
        Ok(skipped)
    }
}
