//! Parameter matrix and scaling pipeline library
//!
//! This crate models a set of named financial/engineering parameters that
//! take one value per (version, zone) pair and supports:
//! - Chained, reversible numeric scaling across ordered groups with
//!   cumulative propagation
//! - Partial value inheritance from a source version into dependents
//! - Time-windowed activation of scaled values (efficacy periods)
//! - Snapshot-based linear undo/redo history
//! - Per-parameter validation rules with accumulated failure messages
//! - A versioned JSON exchange format with legacy fallbacks
//!
//! # Store API
//!
//! All mutation flows through the store as discrete actions:
//!
//! ```ignore
//! use scalemat_core::{ParameterDef, ParameterMatrix, Store, StoreAction};
//!
//! let matrix = ParameterMatrix::new(vec![
//!     ParameterDef::number("laborCost", "Labor cost", 1_200.0),
//! ]);
//! let mut store = Store::new(matrix);
//! store.dispatch(StoreAction::AddVersion {
//!     label: "High demand".into(),
//!     base: Some("v1".into()),
//! })?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod efficacy;
pub mod error;
pub mod exchange;
pub mod history;
pub mod inheritance;
pub mod io;
pub mod matrix;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod validation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use matrix::ParameterMatrix;
pub use model::{
    CategoryGroup, CategoryTag, EfficacyPeriod, GroupId, Inheritance, ParamId, ParamKind,
    Parameter, ParameterDef, ScaleOp, ScalingGroup, ScalingItem, ScalingState, Value, Version,
    VersionId, Zone, ZoneId,
};
pub use store::{Dispatched, Store, StoreAction, StoreSnapshot};
