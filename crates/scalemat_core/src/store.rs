//! Explicit application store and action dispatcher
//!
//! All mutation flows through [`Store::dispatch`] as discrete actions, each
//! applied synchronously and followed by a history snapshot, so the whole
//! state machine is drivable headlessly. Failures surface as errors plus a
//! recorded status message; nothing here panics.

use crate::efficacy;
use crate::error::StoreError;
use crate::exchange::ImportOutcome;
use crate::history::{HistoryAction, HistoryLog};
use crate::matrix::ParameterMatrix;
use crate::model::{ParamId, ScalingGroup, ScalingState, Value, VersionId, ZoneId};
use crate::pipeline::{self, ScaleErrors};

/// Combined state captured per history entry
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub matrix: ParameterMatrix,
    pub scaling: ScalingState,
}

/// One discrete user-driven mutation
#[derive(Debug, Clone)]
pub enum StoreAction {
    SetValue {
        param: ParamId,
        value: Value,
        version: Option<VersionId>,
        zone: Option<ZoneId>,
    },
    AddVersion {
        label: String,
        base: Option<VersionId>,
    },
    AddZone {
        label: String,
    },
    SetActiveVersion(VersionId),
    SetActiveZone(ZoneId),
    SetEfficacyPeriod {
        param: ParamId,
        start: u32,
        end: u32,
    },
    AddGroup {
        scaling_type: String,
        base_costs: Vec<(ParamId, f64)>,
    },
    RemoveGroup {
        index: usize,
    },
    UpdateGroup {
        index: usize,
        group: ScalingGroup,
    },
    SelectGroup {
        index: usize,
    },
    ApplyImport(ImportOutcome),
    Undo,
    Redo,
}

/// What a dispatch did, for callers that need the allocated id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Changed,
    /// The action was a recognized no-op (unknown active id, undo at the
    /// boundary)
    Unchanged,
    CreatedVersion(VersionId),
    CreatedZone(ZoneId),
    CreatedGroup(crate::model::GroupId),
}

pub struct Store {
    pub matrix: ParameterMatrix,
    pub scaling: ScalingState,
    pub scale_errors: ScaleErrors,
    history: HistoryLog<StoreSnapshot>,
    messages: Vec<String>,
}

impl Store {
    /// Build a store around an initialized matrix; the starting state is
    /// recorded as the first history entry
    #[must_use]
    pub fn new(matrix: ParameterMatrix) -> Self {
        let scaling = ScalingState::default();
        let mut history = HistoryLog::default();
        history.add_entry(
            HistoryAction::Initialize,
            "initial state",
            StoreSnapshot {
                matrix: matrix.clone(),
                scaling: scaling.clone(),
            },
        );
        Self {
            matrix,
            scaling,
            scale_errors: ScaleErrors::new(),
            history,
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog<StoreSnapshot> {
        &self.history
    }

    /// Status messages recorded since the last drain
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            matrix: self.matrix.clone(),
            scaling: self.scaling.clone(),
        }
    }

    fn record(&mut self, action: HistoryAction, description: String) {
        let snapshot = self.snapshot();
        self.history.add_entry(action, description, snapshot);
    }

    fn fail(&mut self, error: StoreError) -> Result<Dispatched, StoreError> {
        self.messages.push(error.to_string());
        Err(error)
    }

    /// Apply one action. Mutating actions append a history entry; failures
    /// record a status message and leave the state untouched.
    pub fn dispatch(&mut self, action: StoreAction) -> Result<Dispatched, StoreError> {
        match action {
            StoreAction::SetValue {
                param,
                value,
                version,
                zone,
            } => {
                let description = format!("set {param} = {value}");
                if self
                    .matrix
                    .set_value(&param, value, version.as_ref(), zone.as_ref())
                {
                    self.record(HistoryAction::SetValue, description);
                    Ok(Dispatched::Changed)
                } else {
                    self.fail(StoreError::UnknownParameter(param))
                }
            }

            StoreAction::AddVersion { label, base } => {
                let id = self.matrix.add_version(label.as_str(), base.as_ref());
                self.record(
                    HistoryAction::AddVersion,
                    format!("add version {id} ({label})"),
                );
                Ok(Dispatched::CreatedVersion(id))
            }

            StoreAction::AddZone { label } => {
                let id = self.matrix.add_zone(label.as_str());
                self.record(HistoryAction::AddZone, format!("add zone {id} ({label})"));
                Ok(Dispatched::CreatedZone(id))
            }

            StoreAction::SetActiveVersion(id) => {
                if self.matrix.set_active_version(&id) {
                    Ok(Dispatched::Changed)
                } else {
                    Ok(Dispatched::Unchanged)
                }
            }

            StoreAction::SetActiveZone(id) => {
                if self.matrix.set_active_zone(&id) {
                    Ok(Dispatched::Changed)
                } else {
                    Ok(Dispatched::Unchanged)
                }
            }

            StoreAction::SetEfficacyPeriod { param, start, end } => {
                let lifetime = efficacy::plant_lifetime(&self.matrix);
                if self.matrix.set_efficacy_period(&param, start, end, lifetime) {
                    self.record(
                        HistoryAction::SetEfficacy,
                        format!("set efficacy of {param} to {start}..={end}"),
                    );
                    Ok(Dispatched::Changed)
                } else {
                    self.fail(StoreError::UnknownParameter(param))
                }
            }

            StoreAction::AddGroup {
                scaling_type,
                base_costs,
            } => {
                let id = pipeline::add_group(
                    &mut self.scaling,
                    &scaling_type,
                    &base_costs,
                    &mut self.scale_errors,
                );
                self.record(HistoryAction::AddGroup, format!("add scaling group {id}"));
                Ok(Dispatched::CreatedGroup(id))
            }

            StoreAction::RemoveGroup { index } => {
                match pipeline::remove_group(&mut self.scaling, index, &mut self.scale_errors) {
                    Ok(removed) => {
                        self.record(
                            HistoryAction::RemoveGroup,
                            format!("remove scaling group {}", removed.id),
                        );
                        Ok(Dispatched::Changed)
                    }
                    Err(e) => self.fail(e.into()),
                }
            }

            StoreAction::UpdateGroup { index, group } => {
                let id = group.id.clone();
                match pipeline::update_group(&mut self.scaling, index, group, &mut self.scale_errors)
                {
                    Ok(()) => {
                        self.record(
                            HistoryAction::UpdateGroup,
                            format!("update scaling group {id}"),
                        );
                        Ok(Dispatched::Changed)
                    }
                    Err(e) => self.fail(e.into()),
                }
            }

            StoreAction::SelectGroup { index } => {
                if index < self.scaling.groups.len() {
                    self.scaling.selected_group = index;
                    Ok(Dispatched::Changed)
                } else {
                    Ok(Dispatched::Unchanged)
                }
            }

            StoreAction::ApplyImport(outcome) => {
                // Whole-state swap: the outcome was fully parsed up front,
                // so a failed import never reaches this point
                self.messages.extend(outcome.warnings);
                self.scaling = outcome.state;
                self.scale_errors.clear();
                self.record(HistoryAction::Import, "import scaling state".to_string());
                Ok(Dispatched::Changed)
            }

            StoreAction::Undo => match self.history.undo().cloned() {
                Some(snapshot) => {
                    self.matrix = snapshot.matrix;
                    self.scaling = snapshot.scaling;
                    Ok(Dispatched::Changed)
                }
                None => Ok(Dispatched::Unchanged),
            },

            StoreAction::Redo => match self.history.redo().cloned() {
                Some(snapshot) => {
                    self.matrix = snapshot.matrix;
                    self.scaling = snapshot.scaling;
                    Ok(Dispatched::Changed)
                }
                None => Ok(Dispatched::Unchanged),
            },
        }
    }
}
