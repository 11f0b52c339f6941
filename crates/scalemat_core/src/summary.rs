//! Read-side summary of final parameter values
//!
//! Joins matrix base values with the scaling chain's final outputs and the
//! efficacy windows for one (version, zone, year) slice. Pure reads; the
//! state is never mutated.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::efficacy;
use crate::matrix::ParameterMatrix;
use crate::model::{ParamId, ScalingState, VersionId, ZoneId};

/// One parameter's resolved numbers for a summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub id: ParamId,
    pub label: String,
    pub base: f64,
    pub scaled: f64,
    /// `scaled` inside the efficacy window, `base` outside it
    pub effective: f64,
    pub active: bool,
}

/// Resolve every numeric parameter of a (version, zone) slice at `year`.
///
/// The scaled value is the last chain group's effective output for the
/// parameter; parameters absent from the chain pass their base through.
#[must_use]
pub fn generate_summary(
    matrix: &ParameterMatrix,
    scaling: &ScalingState,
    version: &VersionId,
    zone: &ZoneId,
    year: u32,
) -> Vec<SummaryRow> {
    let chain_output: FxHashMap<ParamId, f64> = scaling
        .groups
        .last()
        .map(|group| {
            group
                .items
                .iter()
                .map(|item| (item.id.clone(), item.effective_output()))
                .collect()
        })
        .unwrap_or_default();

    let lifetime = efficacy::plant_lifetime(matrix);

    matrix
        .parameters()
        .filter_map(|param| {
            let base = param.cell(version, zone)?.as_number()?;
            let scaled = chain_output.get(&param.id).copied().unwrap_or(base);
            let period = efficacy::clamped_period(param.efficacy.start, param.efficacy.end, lifetime);
            let active = efficacy::is_active(period, year);
            Some(SummaryRow {
                id: param.id.clone(),
                label: param.label.clone(),
                base,
                scaled,
                effective: efficacy::effective_value(base, scaled, period, year),
                active,
            })
        })
        .collect()
}
