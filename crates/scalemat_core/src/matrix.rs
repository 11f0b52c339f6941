//! Parameter matrix store
//!
//! Owns every parameter's value per (version, zone) pair, the ordered
//! version/zone lists, and the active selection. All cell access goes
//! through explicit lookups; a missing cell is `None`, never a silent
//! default.
//!
//! Invariant: for every (version, zone) pair present in the global lists,
//! every parameter has a populated cell. Cells are back-filled whenever a
//! version or zone is created.

use std::collections::HashMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::inheritance;
use crate::model::{
    Inheritance, ParamId, Parameter, ParameterDef, Value, Version, VersionId, Zone, ZoneId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterMatrix {
    parameters: HashMap<ParamId, Parameter>,
    /// Definition order, for stable iteration and summary output
    order: Vec<ParamId>,
    versions: Vec<Version>,
    zones: Vec<Zone>,
    active_version: VersionId,
    active_zone: ZoneId,
    /// Parameter whose active-cell value defines the plant lifetime used to
    /// clamp efficacy periods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lifetime_param: Option<ParamId>,
}

impl ParameterMatrix {
    /// Build a matrix from parameter definitions with one initial version
    /// and zone; every cell starts at the parameter's default.
    #[must_use]
    pub fn new(defs: Vec<ParameterDef>) -> Self {
        let version = Version::new(VersionId::numbered(1), "Base");
        let zone = Zone::new(ZoneId::numbered(1), "Default");

        let mut order = Vec::with_capacity(defs.len());
        let mut parameters = HashMap::with_capacity(defs.len());
        for def in defs {
            let mut param = Parameter::from_def(def);
            let row: HashMap<ZoneId, Value> =
                HashMap::from([(zone.id.clone(), param.default.clone())]);
            param.matrix.insert(version.id.clone(), row);
            param
                .inheritance
                .insert(version.id.clone(), Inheritance::independent());
            order.push(param.id.clone());
            parameters.insert(param.id.clone(), param);
        }

        Self {
            parameters,
            order,
            active_version: version.id.clone(),
            active_zone: zone.id.clone(),
            versions: vec![version],
            zones: vec![zone],
            lifetime_param: None,
        }
    }

    /// Designate the parameter that carries the plant lifetime
    #[must_use]
    pub fn with_lifetime_param(mut self, id: ParamId) -> Self {
        self.lifetime_param = Some(id);
        self
    }

    #[must_use]
    pub fn lifetime_param(&self) -> Option<&ParamId> {
        self.lifetime_param.as_ref()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.order.iter().filter_map(|id| self.parameters.get(id))
    }

    #[must_use]
    pub fn parameter(&self, id: &ParamId) -> Option<&Parameter> {
        self.parameters.get(id)
    }

    #[must_use]
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[must_use]
    pub fn active_version(&self) -> &VersionId {
        &self.active_version
    }

    #[must_use]
    pub fn active_zone(&self) -> &ZoneId {
        &self.active_zone
    }

    /// Derived selection flag; the active pointer is the only authority
    #[must_use]
    pub fn is_active_version(&self, id: &VersionId) -> bool {
        &self.active_version == id
    }

    #[must_use]
    pub fn is_active_zone(&self, id: &ZoneId) -> bool {
        &self.active_zone == id
    }

    fn resolve<'a>(
        &'a self,
        version: Option<&'a VersionId>,
        zone: Option<&'a ZoneId>,
    ) -> (&'a VersionId, &'a ZoneId) {
        (
            version.unwrap_or(&self.active_version),
            zone.unwrap_or(&self.active_zone),
        )
    }

    /// Cell value for a parameter; defaults to the active version/zone when
    /// not given. `None` when the parameter or the cell is unknown.
    #[must_use]
    pub fn value(
        &self,
        param: &ParamId,
        version: Option<&VersionId>,
        zone: Option<&ZoneId>,
    ) -> Option<&Value> {
        let (version, zone) = self.resolve(version, zone);
        self.parameters.get(param)?.cell(version, zone)
    }

    #[must_use]
    pub fn has_cell(&self, param: &ParamId, version: &VersionId, zone: &ZoneId) -> bool {
        self.parameters
            .get(param)
            .is_some_and(|p| p.has_cell(version, zone))
    }

    /// Write a cell and run inheritance propagation for its dependents.
    ///
    /// Returns false without touching anything when the parameter or the
    /// target cell is unknown.
    pub fn set_value(
        &mut self,
        param: &ParamId,
        value: Value,
        version: Option<&VersionId>,
        zone: Option<&ZoneId>,
    ) -> bool {
        let (version, zone) = {
            let (v, z) = self.resolve(version, zone);
            (v.clone(), z.clone())
        };
        let Some(p) = self.parameters.get_mut(param) else {
            return false;
        };
        let Some(cell) = p.matrix.get_mut(&version).and_then(|row| row.get_mut(&zone)) else {
            return false;
        };
        *cell = value.clone();

        inheritance::propagate_write(p, &version, &zone, &value);

        if let Some(v) = self.versions.iter_mut().find(|v| v.id == version) {
            v.modified = Timestamp::now();
        }
        true
    }

    /// Create a new version, optionally branched from an existing one.
    ///
    /// Branched versions copy the base's cells and inherit from it at the
    /// default strength; unbranched versions start at parameter defaults,
    /// fully independent.
    pub fn add_version(&mut self, label: impl Into<String>, base: Option<&VersionId>) -> VersionId {
        let base = base.filter(|b| self.versions.iter().any(|v| &v.id == *b)).cloned();
        let next = self
            .versions
            .iter()
            .filter_map(|v| v.id.number())
            .max()
            .unwrap_or(0)
            + 1;
        let id = VersionId::numbered(next);

        for param in self.parameters.values_mut() {
            let (row, inherit) = match &base {
                Some(base_id) => {
                    let row = param
                        .matrix
                        .get(base_id)
                        .cloned()
                        .unwrap_or_default();
                    (row, Inheritance::from_base(base_id.clone()))
                }
                None => {
                    let row = self
                        .zones
                        .iter()
                        .map(|z| (z.id.clone(), param.default.clone()))
                        .collect();
                    (row, Inheritance::independent())
                }
            };
            param.matrix.insert(id.clone(), row);
            param.inheritance.insert(id.clone(), inherit);
        }

        self.versions.push(Version::new(id.clone(), label));
        id
    }

    /// Create a new zone. Each version's new cell is seeded from that
    /// version's first existing zone, falling back to the parameter default.
    pub fn add_zone(&mut self, label: impl Into<String>) -> ZoneId {
        let next = self
            .zones
            .iter()
            .filter_map(|z| z.id.number())
            .max()
            .unwrap_or(0)
            + 1;
        let id = ZoneId::numbered(next);
        let first_zone = self.zones.first().map(|z| z.id.clone());

        for param in self.parameters.values_mut() {
            for version in &self.versions {
                let seed = first_zone
                    .as_ref()
                    .and_then(|z| param.cell(&version.id, z))
                    .cloned()
                    .unwrap_or_else(|| param.default.clone());
                param
                    .matrix
                    .entry(version.id.clone())
                    .or_default()
                    .insert(id.clone(), seed);
            }
        }

        self.zones.push(Zone::new(id.clone(), label));
        id
    }

    /// Rename a parameter's display label; false when the id is unknown
    pub fn set_label(&mut self, param: &ParamId, label: impl Into<String>) -> bool {
        match self.parameters.get_mut(param) {
            Some(p) => {
                p.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Reconfigure how a version of one parameter inherits.
    ///
    /// Returns false when the parameter or the version is unknown.
    pub fn set_inheritance(
        &mut self,
        param: &ParamId,
        version: &VersionId,
        inheritance: Inheritance,
    ) -> bool {
        if !self.versions.iter().any(|v| &v.id == version) {
            return false;
        }
        let Some(p) = self.parameters.get_mut(param) else {
            return false;
        };
        p.inheritance.insert(version.clone(), inheritance);
        true
    }

    /// Switch the active version; no-op when the id is unknown
    pub fn set_active_version(&mut self, id: &VersionId) -> bool {
        if self.versions.iter().any(|v| &v.id == id) {
            self.active_version = id.clone();
            true
        } else {
            false
        }
    }

    /// Switch the active zone; no-op when the id is unknown
    pub fn set_active_zone(&mut self, id: &ZoneId) -> bool {
        if self.zones.iter().any(|z| &z.id == id) {
            self.active_zone = id.clone();
            true
        } else {
            false
        }
    }

    /// Update a parameter's efficacy period, clamped against `lifetime`
    pub fn set_efficacy_period(
        &mut self,
        param: &ParamId,
        start: u32,
        end: u32,
        lifetime: u32,
    ) -> bool {
        let Some(p) = self.parameters.get_mut(param) else {
            return false;
        };
        p.efficacy = crate::efficacy::clamped_period(start, end, lifetime);
        true
    }
}
