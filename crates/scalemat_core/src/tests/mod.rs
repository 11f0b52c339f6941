//! Integration tests for the scalemat core
//!
//! Tests are organized by topic:
//! - `matrix` - Parameter matrix store, version/zone creation, backfill
//! - `inheritance` - Partial value propagation between versions
//! - `pipeline` - Scaling math, cumulative propagation, group lifecycle
//! - `efficacy` - Activation windows and lifetime clamping
//! - `history` - Undo/redo log semantics
//! - `validation` - Rule accumulation and matrix sweeps
//! - `exchange` - Versioned import/export round-trips
//! - `store` - Action dispatch, history integration, summary output

mod efficacy;
mod history;
mod store;
mod validation;
