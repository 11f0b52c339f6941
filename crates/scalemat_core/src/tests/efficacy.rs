//! Tests for efficacy windows and lifetime clamping

use crate::efficacy::{
    DEFAULT_PLANT_LIFETIME, clamped_period, effective_value, is_active, plant_lifetime,
};
use crate::matrix::ParameterMatrix;
use crate::model::{EfficacyPeriod, ParamId, ParameterDef, Value};

fn matrix_with_lifetime(years: f64) -> ParameterMatrix {
    ParameterMatrix::new(vec![
        ParameterDef::number("plantLifetime", "Plant lifetime", years),
        ParameterDef::number("laborCost", "Labor cost", 100.0),
    ])
    .with_lifetime_param(ParamId::new("plantLifetime"))
}

#[test]
fn test_is_active_inclusive_bounds() {
    let period = EfficacyPeriod { start: 3, end: 7 };
    assert!(is_active(period, 3));
    assert!(is_active(period, 7));
    assert!(!is_active(period, 2));
    assert!(!is_active(period, 8));
}

#[test]
fn test_effective_value_switches_on_window() {
    let period = EfficacyPeriod { start: 0, end: 5 };
    assert_eq!(effective_value(10.0, 99.0, period, 5), 99.0);
    assert_eq!(effective_value(10.0, 99.0, period, 6), 10.0);
}

#[test]
fn test_clamp_orders_and_bounds_period() {
    // Swapped bounds are normalized first
    assert_eq!(clamped_period(9, 4, 20), EfficacyPeriod { start: 4, end: 9 });
    // Both bounds clamp to the lifetime
    assert_eq!(
        clamped_period(25, 30, 20),
        EfficacyPeriod { start: 20, end: 20 }
    );
    assert_eq!(
        clamped_period(5, 99, 20),
        EfficacyPeriod { start: 5, end: 20 }
    );
}

#[test]
fn test_plant_lifetime_reads_designated_parameter() {
    let matrix = matrix_with_lifetime(35.0);
    assert_eq!(plant_lifetime(&matrix), 35);
}

#[test]
fn test_plant_lifetime_defaults_without_designation() {
    let matrix = ParameterMatrix::new(vec![ParameterDef::number("x", "X", 1.0)]);
    assert_eq!(plant_lifetime(&matrix), DEFAULT_PLANT_LIFETIME);
}

#[test]
fn test_plant_lifetime_defaults_on_non_numeric_value() {
    let mut matrix = matrix_with_lifetime(35.0);
    matrix.set_value(
        &ParamId::new("plantLifetime"),
        Value::Text("n/a".to_string()),
        None,
        None,
    );
    assert_eq!(plant_lifetime(&matrix), DEFAULT_PLANT_LIFETIME);
}

#[test]
fn test_set_efficacy_period_clamps_through_matrix() {
    let mut matrix = matrix_with_lifetime(10.0);
    let labor = ParamId::new("laborCost");

    assert!(matrix.set_efficacy_period(&labor, 8, 25, 10));
    let param = matrix.parameter(&labor).unwrap();
    assert_eq!(param.efficacy, EfficacyPeriod { start: 8, end: 10 });
}
