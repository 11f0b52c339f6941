//! Cumulative scaling pipeline
//!
//! Groups of one scaling type form an ordered chain. Each group transforms
//! its items' base values; the effective outputs cascade into the next
//! group's base values. Domain violations in the math never panic: guarded
//! operations fall back to the unchanged base, and non-finite results are
//! recorded in a [`ScaleErrors`] map and substituted with zero.

use rustc_hash::FxHashMap;

use crate::error::PipelineError;
use crate::model::{GroupId, ParamId, ScaleOp, ScalingGroup, ScalingItem, ScalingState};

/// Computation errors collected during scaling, keyed by the base value
/// that triggered them
#[derive(Debug, Clone, Default)]
pub struct ScaleErrors {
    entries: FxHashMap<String, String>,
}

impl ScaleErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, base: f64, op: ScaleOp, factor: f64) {
        self.entries.insert(
            format!("{base}"),
            format!("non-finite result applying {op:?} with factor {factor} to {base}"),
        );
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Message recorded for a triggering base value, if any
    #[must_use]
    pub fn message_for(&self, base: f64) -> Option<&str> {
        self.entries.get(&format!("{base}")).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Apply one scaling operation with domain guards.
///
/// Division by zero and log/exponential of a non-positive base return the
/// base unchanged rather than erroring; overflow to infinity or NaN is the
/// caller's concern (see [`calc`]).
#[must_use]
pub fn apply_op(base: f64, op: ScaleOp, factor: f64) -> f64 {
    match op {
        ScaleOp::Multiply => base * factor,
        ScaleOp::Add => base + factor,
        ScaleOp::Subtract => base - factor,
        ScaleOp::Divide => {
            if factor == 0.0 {
                base
            } else {
                base / factor
            }
        }
        ScaleOp::Power => base.powf(factor),
        ScaleOp::Log => {
            if base <= 0.0 {
                base
            } else {
                base.ln() * factor
            }
        }
        ScaleOp::Exponential => {
            if base <= 0.0 {
                base
            } else {
                (base.ln() * factor).exp()
            }
        }
    }
}

/// [`apply_op`] with the non-finite fallback: a result that is not finite is
/// recorded in `errors` and replaced with zero
#[must_use]
pub fn calc(base: f64, op: ScaleOp, factor: f64, errors: &mut ScaleErrors) -> f64 {
    let result = apply_op(base, op, factor);
    if result.is_finite() {
        result
    } else {
        errors.record(base, op, factor);
        0.0
    }
}

fn recompute_item(item: &mut ScalingItem, errors: &mut ScaleErrors) {
    item.scaled_value = if item.enabled {
        calc(item.base_value, item.operation, item.scaling_factor, errors)
    } else {
        item.base_value
    };
}

/// Cascade effective outputs forward through the chain, starting after
/// `from` and running to the end.
///
/// Each downstream item whose id appears in the previous group takes that
/// group's effective output as its new base value; items without an
/// upstream counterpart are left untouched. Idempotent: a second call with
/// no intervening edits changes nothing.
pub fn propagate(groups: &mut [ScalingGroup], from: usize, errors: &mut ScaleErrors) {
    for i in (from + 1)..groups.len() {
        let carry: FxHashMap<ParamId, f64> = groups[i - 1]
            .items
            .iter()
            .map(|item| (item.id.clone(), item.effective_output()))
            .collect();

        for item in &mut groups[i].items {
            let Some(&base) = carry.get(&item.id) else {
                continue;
            };
            item.base_value = base;
            recompute_item(item, errors);
        }
    }
}

/// Lowest unused `N` across existing `"Scaling Group N"` names, gap-filling
#[must_use]
pub fn next_group_number(groups: &[ScalingGroup]) -> u32 {
    let used: Vec<u32> = groups.iter().filter_map(|g| g.number()).collect();
    let mut n = 1;
    while used.contains(&n) {
        n += 1;
    }
    n
}

/// Index a group numbered `number` should be inserted at: before the first
/// group with a larger number, else at the end
fn insertion_index(groups: &[ScalingGroup], number: u32) -> usize {
    groups
        .iter()
        .position(|g| g.number().is_some_and(|n| n > number))
        .unwrap_or(groups.len())
}

/// Insert a new auto-numbered group into the chain.
///
/// `base_costs` anchors each item: the value before any group in the chain
/// touched it. Items seed their base value from the previous group's
/// effective output at the insertion point, or from the anchor when the
/// group lands first. The chain downstream of the insertion is then
/// re-propagated.
pub fn add_group(
    state: &mut ScalingState,
    scaling_type: &str,
    base_costs: &[(ParamId, f64)],
    errors: &mut ScaleErrors,
) -> GroupId {
    let number = next_group_number(&state.groups);
    let index = insertion_index(&state.groups, number);
    let id = state.next_group_id();

    let carry: FxHashMap<ParamId, f64> = if index > 0 {
        state.groups[index - 1]
            .items
            .iter()
            .map(|item| (item.id.clone(), item.effective_output()))
            .collect()
    } else {
        FxHashMap::default()
    };

    let items = base_costs
        .iter()
        .map(|(param, anchor)| {
            let mut item = ScalingItem::passthrough(param.clone(), *anchor);
            if let Some(&base) = carry.get(param) {
                item.base_value = base;
                recompute_item(&mut item, errors);
            }
            item
        })
        .collect();

    state.groups.insert(
        index,
        ScalingGroup {
            id: id.clone(),
            name: format!("Scaling Group {number}"),
            is_protected: false,
            scaling_type: scaling_type.to_string(),
            items,
        },
    );

    propagate(&mut state.groups, index, errors);
    state.selected_group = index;
    state.regenerate_derived();
    id
}

/// Remove the group at `index`.
///
/// Protected groups are rejected with the state left untouched. Removing
/// the first group re-anchors the new first group to the original base
/// values before propagating; removing an interior group re-propagates from
/// the position before the removal point.
pub fn remove_group(
    state: &mut ScalingState,
    index: usize,
    errors: &mut ScaleErrors,
) -> Result<ScalingGroup, PipelineError> {
    let len = state.groups.len();
    if index >= len {
        return Err(PipelineError::GroupIndexOutOfRange { index, len });
    }
    if state.groups[index].is_protected {
        return Err(PipelineError::ProtectedGroup(state.groups[index].id.clone()));
    }

    let removed = state.groups.remove(index);

    if !state.groups.is_empty() {
        if index == 0 {
            // The chain lost its head: re-anchor the new first group to the
            // true originals before cascading
            for item in &mut state.groups[0].items {
                item.base_value = item.original_base_value;
                recompute_item(item, errors);
            }
            propagate(&mut state.groups, 0, errors);
        } else if index < state.groups.len() {
            propagate(&mut state.groups, index - 1, errors);
        }
    }

    state.regenerate_derived();
    Ok(removed)
}

/// Replace the group at `index` with an edited copy and cascade the change.
///
/// The replacement's scaled values are recomputed from its own inputs
/// before downstream groups are re-propagated, so callers do not have to
/// pre-compute outputs.
pub fn update_group(
    state: &mut ScalingState,
    index: usize,
    mut group: ScalingGroup,
    errors: &mut ScaleErrors,
) -> Result<(), PipelineError> {
    let len = state.groups.len();
    if index >= len {
        return Err(PipelineError::GroupIndexOutOfRange { index, len });
    }

    for item in &mut group.items {
        recompute_item(item, errors);
    }
    state.groups[index] = group;
    propagate(&mut state.groups, index, errors);
    state.regenerate_derived();
    Ok(())
}
