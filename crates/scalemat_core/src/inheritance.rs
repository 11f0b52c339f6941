//! Partial value inheritance between versions
//!
//! When a cell is written, every other version configured to inherit from
//! the written version is nudged toward the new value for the same zone.
//! Propagation is one hop per write; a chain of inheriting versions only
//! updates transitively because each write re-triggers the rule.

use crate::model::{Parameter, Value, VersionId, ZoneId};

/// Blend a dependent's current value toward the source value.
///
/// `percentage` is the weight of the source: `blend(5.0, 10.0, 40.0)` is
/// `5·0.6 + 10·0.4 = 7`.
#[must_use]
pub fn blend(current: f64, source: f64, percentage: f64) -> f64 {
    let weight = percentage / 100.0;
    current * (1.0 - weight) + source * weight
}

/// Apply inheritance for a single cell write.
///
/// Every version other than `source_version` whose inheritance points at it
/// with a percentage below 100 gets its cell in the same zone updated.
/// Dependents that never initialized the zone cell are skipped; no cell is
/// implicitly created. Returns the ids of the versions that were updated.
pub fn propagate_write(
    param: &mut Parameter,
    source_version: &VersionId,
    zone: &ZoneId,
    value: &Value,
) -> Vec<VersionId> {
    let dependents: Vec<(VersionId, f64)> = param
        .inheritance
        .iter()
        .filter(|(version, config)| {
            *version != source_version
                && config.source.as_ref() == Some(source_version)
                && config.percentage < 100.0
        })
        .map(|(version, config)| (version.clone(), config.percentage))
        .collect();

    let mut updated = Vec::new();
    for (version, percentage) in dependents {
        let Some(cell) = param
            .matrix
            .get_mut(&version)
            .and_then(|row| row.get_mut(zone))
        else {
            continue;
        };
        *cell = match (cell.as_number(), value.as_number()) {
            (Some(current), Some(source)) => Value::Number(blend(current, source, percentage)),
            // Non-numeric on either side: the dependent just takes the
            // written value
            _ => value.clone(),
        };
        updated.push(version);
    }
    updated
}
