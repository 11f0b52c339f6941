//! Versioned JSON import/export of the scaling state
//!
//! Three wire shapes are accepted on import:
//! - current `"1.2.0"` files: `version` + `metadata` + `currentState` +
//!   `history`
//! - `"1.1.0"` files: same wrapper, no reliable scaling-type metadata
//! - legacy files: a root `groups` array plus `protectedTabs`, no wrapper
//!
//! Import is validate-then-commit: the whole file is parsed into an
//! [`ImportOutcome`] before any caller state changes, so a malformed file
//! aborts with nothing mutated. A `"1.2.0"` file whose scaling type does
//! not match the active context yields a warning, not a failure.

use std::path::Path;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;
use crate::history::HistoryEntry;
use crate::io::atomic_write;
use crate::model::{GroupId, ScalingGroup, ScalingState, TabConfig};

pub const CURRENT_FORMAT: &str = "1.2.0";
pub const PREVIOUS_FORMAT: &str = "1.1.0";

/// Scaling context under which mismatched imports are accepted silently
pub const MIXED_CONTEXT: &str = "mixed";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: Timestamp,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scaling_type: String,
}

/// Wire form of [`ScalingState`]; field names follow the exchange format,
/// not the in-memory state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeState {
    #[serde(default)]
    pub selected_group_index: usize,
    pub scaling_groups: Vec<ScalingGroup>,
    #[serde(default)]
    pub protected_tabs: Vec<GroupId>,
    #[serde(default)]
    pub tab_configs: Vec<TabConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub version: String,
    pub metadata: ExportMetadata,
    pub current_state: ExchangeState,
    #[serde(default)]
    pub history: Vec<HistoryEntry<ScalingState>>,
}

/// Pre-wrapper export layout: groups and protection at the root
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyFile {
    groups: Vec<ScalingGroup>,
    #[serde(default)]
    protected_tabs: Vec<GroupId>,
}

/// Fully parsed import, ready to be committed in one assignment
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub state: ScalingState,
    pub history: Vec<HistoryEntry<ScalingState>>,
    pub warnings: Vec<String>,
}

/// Build an export file from the live state
#[must_use]
pub fn export_state(
    state: &ScalingState,
    history: &[HistoryEntry<ScalingState>],
    description: &str,
    scaling_type: &str,
) -> ExportFile {
    ExportFile {
        version: CURRENT_FORMAT.to_string(),
        metadata: ExportMetadata {
            export_date: Timestamp::now(),
            description: description.to_string(),
            scaling_type: scaling_type.to_string(),
        },
        current_state: ExchangeState {
            selected_group_index: state.selected_group,
            scaling_groups: state.groups.clone(),
            protected_tabs: state.protected_tabs.clone(),
            tab_configs: state.tab_configs.clone(),
        },
        history: history.to_vec(),
    }
}

pub fn to_json(file: &ExportFile) -> Result<String, ExchangeError> {
    Ok(serde_json::to_string_pretty(file)?)
}

/// Serialize and atomically write an export file
pub fn write_export(path: &Path, file: &ExportFile) -> Result<(), ExchangeError> {
    let json = to_json(file)?;
    atomic_write(path, &json)?;
    Ok(())
}

fn state_from_groups(
    mut groups: Vec<ScalingGroup>,
    protected: &[GroupId],
    selected: usize,
) -> ScalingState {
    for group in &mut groups {
        if protected.contains(&group.id) {
            group.is_protected = true;
        }
    }
    let mut state = ScalingState {
        selected_group: selected,
        groups,
        protected_tabs: Vec::new(),
        tab_configs: Vec::new(),
    };
    state.regenerate_derived();
    state
}

/// Parse an import payload, branching on its top-level shape.
///
/// `active_context` is the scaling type currently in effect; legacy and
/// `"1.1.0"` files have their groups tagged with it (surfaced as a
/// warning), and `"1.2.0"` files warn on a mismatch unless the context is
/// `"mixed"`.
pub fn import_state(json: &str, active_context: &str) -> Result<ImportOutcome, ExchangeError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    let Some(obj) = raw.as_object() else {
        return Err(ExchangeError::UnknownFormat);
    };

    if obj.contains_key("groups") {
        let legacy: LegacyFile = serde_json::from_value(raw)?;
        let mut groups = legacy.groups;
        for group in &mut groups {
            group.scaling_type = active_context.to_string();
        }
        return Ok(ImportOutcome {
            state: state_from_groups(groups, &legacy.protected_tabs, 0),
            history: Vec::new(),
            warnings: vec![format!(
                "legacy export: groups tagged with the current scaling context {active_context:?}"
            )],
        });
    }

    let Some(version) = obj.get("version").and_then(|v| v.as_str()) else {
        return Err(ExchangeError::UnknownFormat);
    };
    if version != CURRENT_FORMAT && version != PREVIOUS_FORMAT {
        return Err(ExchangeError::UnsupportedVersion(version.to_string()));
    }

    let file: ExportFile = serde_json::from_value(raw)?;
    let mut warnings = Vec::new();
    let mut groups = file.current_state.scaling_groups;

    if file.version == PREVIOUS_FORMAT {
        for group in &mut groups {
            group.scaling_type = active_context.to_string();
        }
        warnings.push(format!(
            "1.1.0 export: groups tagged with the current scaling context {active_context:?}"
        ));
    } else if active_context != MIXED_CONTEXT
        && file.metadata.scaling_type != active_context
    {
        warnings.push(format!(
            "export was created for scaling type {:?} but the active context is {:?}",
            file.metadata.scaling_type, active_context
        ));
    }

    Ok(ImportOutcome {
        state: state_from_groups(
            groups,
            &file.current_state.protected_tabs,
            file.current_state.selected_group_index,
        ),
        history: file.history,
        warnings,
    })
}

/// Read and parse an import file
pub fn read_import(path: &Path, active_context: &str) -> Result<ImportOutcome, ExchangeError> {
    let json = std::fs::read_to_string(path)?;
    import_state(&json, active_context)
}
