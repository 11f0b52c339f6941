//! Parameter definitions and per-(version, zone) cell values

use std::collections::HashMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ids::{ParamId, VersionId, ZoneId};

/// A single matrix cell value.
///
/// Untagged so JSON numbers, strings and booleans map directly onto the
/// variants the exchange format uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Numeric view of the value, `None` for text and booleans
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Input widget class of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKind {
    Number { step: f64 },
    Text,
    Select { options: Vec<String> },
}

/// Classification group a parameter belongs to.
///
/// Set explicitly at definition time; no numeric-id range parsing is
/// involved in classifying a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryGroup {
    Variable,
    Rate,
    Factor,
    RateFactor,
    Scaling,
}

/// Classification tag: group plus a small display index used for toggling
/// related parameters together in a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryTag {
    pub group: CategoryGroup,
    pub index: u8,
}

/// Per-version inheritance configuration.
///
/// `percentage` is the blend weight toward the source version: 70 means a
/// write to the source moves this version 70% of the way to the new value.
/// 100 with `source: None` marks a fully independent version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inheritance {
    pub source: Option<VersionId>,
    pub percentage: f64,
}

impl Inheritance {
    /// An independent version: no source, full self-weight
    #[must_use]
    pub fn independent() -> Self {
        Self {
            source: None,
            percentage: 100.0,
        }
    }

    /// Default strength used when a version is branched from a base
    #[must_use]
    pub fn from_base(source: VersionId) -> Self {
        Self {
            source: Some(source),
            percentage: 70.0,
        }
    }
}

/// Inclusive year window during which a parameter's scaled value is in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficacyPeriod {
    pub start: u32,
    pub end: u32,
}

impl Default for EfficacyPeriod {
    fn default() -> Self {
        Self { start: 0, end: 20 }
    }
}

/// Static definition of a parameter, supplied at matrix construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDef {
    pub id: ParamId,
    pub label: String,
    pub kind: ParamKind,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
}

impl ParameterDef {
    pub fn number(id: impl Into<String>, label: impl Into<String>, default: f64) -> Self {
        Self {
            id: ParamId::new(id),
            label: label.into(),
            kind: ParamKind::Number { step: 1.0 },
            default: Value::Number(default),
            category: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>, default: &str) -> Self {
        Self {
            id: ParamId::new(id),
            label: label.into(),
            kind: ParamKind::Text,
            default: Value::Text(default.to_string()),
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, group: CategoryGroup, index: u8) -> Self {
        self.category = Some(CategoryTag { group, index });
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        if let ParamKind::Number { step: s } = &mut self.kind {
            *s = step;
        }
        self
    }
}

/// A parameter together with its full per-(version, zone) state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParamId,
    pub label: String,
    pub kind: ParamKind,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryTag>,
    /// Cell values, outer key version, inner key zone
    pub matrix: HashMap<VersionId, HashMap<ZoneId, Value>>,
    pub inheritance: HashMap<VersionId, Inheritance>,
    pub efficacy: EfficacyPeriod,
}

impl Parameter {
    /// Instantiate a parameter from its definition with no cells yet
    #[must_use]
    pub fn from_def(def: ParameterDef) -> Self {
        Self {
            id: def.id,
            label: def.label,
            kind: def.kind,
            default: def.default,
            category: def.category,
            matrix: HashMap::new(),
            inheritance: HashMap::new(),
            efficacy: EfficacyPeriod::default(),
        }
    }

    /// Cell value for a (version, zone) pair, if the cell exists
    #[must_use]
    pub fn cell(&self, version: &VersionId, zone: &ZoneId) -> Option<&Value> {
        self.matrix.get(version).and_then(|row| row.get(zone))
    }

    #[must_use]
    pub fn has_cell(&self, version: &VersionId, zone: &ZoneId) -> bool {
        self.cell(version, zone).is_some()
    }
}

/// A named scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub label: String,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl Version {
    pub fn new(id: VersionId, label: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            label: label.into(),
            created: now,
            modified: now,
        }
    }
}

/// A named market, orthogonal to versions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub label: String,
    pub created: Timestamp,
}

impl Zone {
    pub fn new(id: ZoneId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            created: Timestamp::now(),
        }
    }
}
