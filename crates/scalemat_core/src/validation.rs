//! Per-parameter rule checking
//!
//! Rules accumulate every failing message for a parameter rather than
//! stopping at the first, and one parameter's failures never block another
//! parameter's validation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::matrix::ParameterMatrix;
use crate::model::{ParamId, Value, VersionId, ZoneId};

/// Expected primitive type of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Integer,
    Text,
    Boolean,
}

/// Pattern rule with its custom failure message
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: Regex,
    pub message: String,
}

type Predicate = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Rule set for one parameter
#[derive(Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub kind: Option<ValueKind>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<PatternRule>,
    custom: Option<Predicate>,
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ValidationRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Pattern match against the text form of the value; `message` is
    /// reported verbatim on failure
    #[must_use]
    pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(PatternRule {
            regex,
            message: message.into(),
        });
        self
    }

    /// Arbitrary predicate; an `Err` string is reported as-is
    #[must_use]
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(predicate));
        self
    }
}

fn kind_matches(kind: ValueKind, value: &Value) -> bool {
    match (kind, value) {
        (ValueKind::Number, Value::Number(_)) => true,
        (ValueKind::Integer, Value::Number(n)) => n.fract() == 0.0,
        (ValueKind::Text, Value::Text(_)) => true,
        (ValueKind::Boolean, Value::Bool(_)) => true,
        _ => false,
    }
}

fn kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Number => "a number",
        ValueKind::Integer => "an integer",
        ValueKind::Text => "text",
        ValueKind::Boolean => "a boolean",
    }
}

/// Check one parameter's value against its rule set, accumulating every
/// failing message
#[must_use]
pub fn validate_parameter(rule: &ValidationRule, value: Option<&Value>) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(value) = value else {
        if rule.required {
            errors.push("value is required".to_string());
        }
        return errors;
    };

    if rule.required && value.as_text().is_some_and(str::is_empty) {
        errors.push("value is required".to_string());
    }

    if let Some(kind) = rule.kind {
        if !kind_matches(kind, value) {
            errors.push(format!("value must be {}", kind_name(kind)));
        }
    }

    if let Some(n) = value.as_number() {
        if let Some(min) = rule.min {
            if n < min {
                errors.push(format!("value {n} is below the minimum {min}"));
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                errors.push(format!("value {n} is above the maximum {max}"));
            }
        }
    }

    if let Some(text) = value.as_text() {
        if let Some(min) = rule.min_length {
            if text.chars().count() < min {
                errors.push(format!("value must be at least {min} characters"));
            }
        }
        if let Some(max) = rule.max_length {
            if text.chars().count() > max {
                errors.push(format!("value must be at most {max} characters"));
            }
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.regex.is_match(text) {
                errors.push(pattern.message.clone());
            }
        }
    }

    if let Some(custom) = &rule.custom {
        if let Err(message) = custom(value) {
            errors.push(message);
        }
    }

    errors
}

/// Outcome of validating a whole (version, zone) slice of the matrix
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: HashMap<ParamId, Vec<String>>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors_for(&self, param: &ParamId) -> &[String] {
        self.errors.get(param).map_or(&[], Vec::as_slice)
    }
}

/// Run every parameter's rule set against its cell in the given (version,
/// zone). Parameters without a rule always pass; one parameter's failures
/// never stop the sweep.
#[must_use]
pub fn validate_matrix(
    matrix: &ParameterMatrix,
    rules: &HashMap<ParamId, ValidationRule>,
    version: &VersionId,
    zone: &ZoneId,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for param in matrix.parameters() {
        let Some(rule) = rules.get(&param.id) else {
            continue;
        };
        let failures = validate_parameter(rule, param.cell(version, zone));
        if !failures.is_empty() {
            report.errors.insert(param.id.clone(), failures);
        }
    }
    report
}
