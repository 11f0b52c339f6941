//! Scaling chain types: groups, items, and the per-tab state snapshot unit

use serde::{Deserialize, Serialize};

use super::ids::{GroupId, ParamId};

/// Numeric transformation applied by a scaling item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleOp {
    Multiply,
    Power,
    Divide,
    Log,
    Exponential,
    Add,
    Subtract,
}

/// One parameter's entry in a scaling group.
///
/// `original_base_value` anchors the chain: it is the value before any group
/// touched it and never changes while the item exists. `base_value` is the
/// chain input at this group's position and is rewritten by propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingItem {
    pub id: ParamId,
    pub original_base_value: f64,
    pub base_value: f64,
    pub operation: ScaleOp,
    pub scaling_factor: f64,
    pub enabled: bool,
    pub scaled_value: f64,
    #[serde(default)]
    pub notes: String,
}

impl ScalingItem {
    /// A fresh pass-through item anchored at `base`
    #[must_use]
    pub fn passthrough(id: ParamId, base: f64) -> Self {
        Self {
            id,
            original_base_value: base,
            base_value: base,
            operation: ScaleOp::Multiply,
            scaling_factor: 1.0,
            enabled: true,
            scaled_value: base,
            notes: String::new(),
        }
    }

    /// The value this item feeds into the next group: its output when
    /// enabled, its untouched input when disabled
    #[must_use]
    pub fn effective_output(&self) -> f64 {
        if self.enabled {
            self.scaled_value
        } else {
            self.base_value
        }
    }
}

/// One stage of a scaling chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingGroup {
    pub id: GroupId,
    /// Display name following the `"Scaling Group N"` convention
    pub name: String,
    #[serde(default)]
    pub is_protected: bool,
    /// The parameter category this group scales; legacy exports omit it
    #[serde(default)]
    pub scaling_type: String,
    pub items: Vec<ScalingItem>,
}

impl ScalingGroup {
    /// The `N` out of a `"Scaling Group N"` name, if the name follows the
    /// convention
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        group_number(&self.name)
    }
}

/// Parse the numeric suffix of a `"Scaling Group N"` name
#[must_use]
pub fn group_number(name: &str) -> Option<u32> {
    name.strip_prefix("Scaling Group ")
        .and_then(|s| s.parse().ok())
}

/// Derived per-group tab metadata, regenerated on every group mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfig {
    pub id: GroupId,
    pub label: String,
}

/// The scaling side of the application state: the group chain plus derived
/// tab/protection metadata. This is the unit the exchange format and the
/// history log snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingState {
    #[serde(default)]
    pub selected_group: usize,
    pub groups: Vec<ScalingGroup>,
    #[serde(default)]
    pub protected_tabs: Vec<GroupId>,
    #[serde(default)]
    pub tab_configs: Vec<TabConfig>,
}

impl ScalingState {
    /// Rebuild the derived tab and protection metadata from the groups.
    ///
    /// Called after every group mutation; the groups themselves are the
    /// only authoritative source.
    pub fn regenerate_derived(&mut self) {
        self.tab_configs = self
            .groups
            .iter()
            .map(|g| TabConfig {
                id: g.id.clone(),
                label: g.name.clone(),
            })
            .collect();
        self.protected_tabs = self
            .groups
            .iter()
            .filter(|g| g.is_protected)
            .map(|g| g.id.clone())
            .collect();
        if self.selected_group >= self.groups.len() {
            self.selected_group = self.groups.len().saturating_sub(1);
        }
    }

    /// Allocate the next unused `sgN` group id
    #[must_use]
    pub fn next_group_id(&self) -> GroupId {
        let max = self
            .groups
            .iter()
            .filter_map(|g| g.id.number())
            .max()
            .unwrap_or(0);
        GroupId::numbered(max + 1)
    }
}
