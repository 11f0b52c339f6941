//! Tests for the validation rule engine

use std::collections::HashMap;

use regex::Regex;

use crate::matrix::ParameterMatrix;
use crate::model::{ParamId, ParameterDef, Value, VersionId, ZoneId};
use crate::validation::{ValidationRule, ValueKind, validate_matrix, validate_parameter};

#[test]
fn test_all_failures_accumulate() {
    let rule = ValidationRule::new()
        .kind(ValueKind::Integer)
        .range(Some(10.0), Some(20.0));

    let errors = validate_parameter(&rule, Some(&Value::Number(3.5)));

    // Both the integer check and the minimum fail, and both are reported
    assert_eq!(errors.len(), 2, "expected both failures, got {errors:?}");
}

#[test]
fn test_passing_value_reports_nothing() {
    let rule = ValidationRule::new()
        .required()
        .kind(ValueKind::Number)
        .range(Some(0.0), None);

    assert!(validate_parameter(&rule, Some(&Value::Number(5.0))).is_empty());
}

#[test]
fn test_required_rejects_missing_and_empty() {
    let rule = ValidationRule::new().required();

    assert_eq!(validate_parameter(&rule, None).len(), 1);
    assert_eq!(
        validate_parameter(&rule, Some(&Value::Text(String::new()))).len(),
        1
    );
}

#[test]
fn test_pattern_reports_custom_message() {
    let rule = ValidationRule::new().pattern(
        Regex::new(r"^[A-Z]{3}$").unwrap(),
        "must be a three-letter currency code",
    );

    let errors = validate_parameter(&rule, Some(&Value::Text("usd".to_string())));
    assert_eq!(errors, vec!["must be a three-letter currency code"]);

    assert!(validate_parameter(&rule, Some(&Value::Text("USD".to_string()))).is_empty());
}

#[test]
fn test_length_bounds() {
    let rule = ValidationRule::new().length(Some(2), Some(4));

    assert_eq!(
        validate_parameter(&rule, Some(&Value::Text("a".to_string()))).len(),
        1
    );
    assert_eq!(
        validate_parameter(&rule, Some(&Value::Text("abcde".to_string()))).len(),
        1
    );
    assert!(validate_parameter(&rule, Some(&Value::Text("abc".to_string()))).is_empty());
}

#[test]
fn test_custom_predicate_message_passes_through() {
    let rule = ValidationRule::new().custom(|v| {
        if v.as_number().is_some_and(|n| n % 2.0 == 0.0) {
            Ok(())
        } else {
            Err("value must be even".to_string())
        }
    });

    assert!(validate_parameter(&rule, Some(&Value::Number(4.0))).is_empty());
    assert_eq!(
        validate_parameter(&rule, Some(&Value::Number(3.0))),
        vec!["value must be even"]
    );
}

#[test]
fn test_boolean_kind() {
    let rule = ValidationRule::new().kind(ValueKind::Boolean);
    assert!(validate_parameter(&rule, Some(&Value::Bool(true))).is_empty());
    assert_eq!(
        validate_parameter(&rule, Some(&Value::Number(1.0))).len(),
        1
    );
}

#[test]
fn test_matrix_sweep_collects_per_parameter_errors() {
    let mut matrix = ParameterMatrix::new(vec![
        ParameterDef::number("laborCost", "Labor cost", -5.0),
        ParameterDef::number("headcount", "Headcount", 12.0),
        ParameterDef::text("currency", "Currency", "usd"),
    ]);
    let v1 = VersionId::numbered(1);
    let z1 = ZoneId::numbered(1);
    matrix.set_value(&ParamId::new("headcount"), Value::Number(3.5), None, None);

    let mut rules = HashMap::new();
    rules.insert(
        ParamId::new("laborCost"),
        ValidationRule::new().range(Some(0.0), None),
    );
    rules.insert(
        ParamId::new("headcount"),
        ValidationRule::new().kind(ValueKind::Integer),
    );
    rules.insert(
        ParamId::new("currency"),
        ValidationRule::new().pattern(Regex::new(r"^[A-Z]{3}$").unwrap(), "uppercase code"),
    );

    let report = validate_matrix(&matrix, &rules, &v1, &z1);

    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 3);
    assert_eq!(report.errors_for(&ParamId::new("currency")), ["uppercase code"]);
}

#[test]
fn test_one_failure_does_not_block_other_parameters() {
    let matrix = ParameterMatrix::new(vec![
        ParameterDef::number("bad", "Bad", -1.0),
        ParameterDef::number("good", "Good", 1.0),
    ]);
    let v1 = VersionId::numbered(1);
    let z1 = ZoneId::numbered(1);

    let mut rules = HashMap::new();
    rules.insert(ParamId::new("bad"), ValidationRule::new().range(Some(0.0), None));
    rules.insert(ParamId::new("good"), ValidationRule::new().range(Some(0.0), None));

    let report = validate_matrix(&matrix, &rules, &v1, &z1);

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors_for(&ParamId::new("good")).is_empty());
}
