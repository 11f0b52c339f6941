//! Tests for the action dispatcher, its history integration, and the
//! summary generator

use crate::error::StoreError;
use crate::exchange::{export_state, import_state, to_json};
use crate::matrix::ParameterMatrix;
use crate::model::{ParamId, ParameterDef, ScaleOp, Value, VersionId, ZoneId};
use crate::store::{Dispatched, Store, StoreAction};
use crate::summary::generate_summary;

fn sample_store() -> Store {
    let matrix = ParameterMatrix::new(vec![
        ParameterDef::number("plantLifetime", "Plant lifetime", 20.0),
        ParameterDef::number("laborCost", "Labor cost", 100.0),
        ParameterDef::number("materialCost", "Material cost", 40.0),
    ])
    .with_lifetime_param(ParamId::new("plantLifetime"));
    Store::new(matrix)
}

fn base_costs() -> Vec<(ParamId, f64)> {
    vec![
        (ParamId::new("laborCost"), 100.0),
        (ParamId::new("materialCost"), 40.0),
    ]
}

#[test]
fn test_set_value_dispatch_appends_history() {
    let mut store = sample_store();
    let before = store.history().len();

    store
        .dispatch(StoreAction::SetValue {
            param: ParamId::new("laborCost"),
            value: Value::Number(120.0),
            version: None,
            zone: None,
        })
        .unwrap();

    assert_eq!(store.history().len(), before + 1);
    assert_eq!(
        store.matrix.value(&ParamId::new("laborCost"), None, None),
        Some(&Value::Number(120.0))
    );
}

#[test]
fn test_unknown_parameter_records_message() {
    let mut store = sample_store();

    let result = store.dispatch(StoreAction::SetValue {
        param: ParamId::new("ghost"),
        value: Value::Number(1.0),
        version: None,
        zone: None,
    });

    assert!(matches!(result, Err(StoreError::UnknownParameter(_))));
    assert_eq!(store.messages().len(), 1);
}

#[test]
fn test_undo_redo_round_trip_through_store() {
    let mut store = sample_store();
    let labor = ParamId::new("laborCost");

    store
        .dispatch(StoreAction::SetValue {
            param: labor.clone(),
            value: Value::Number(500.0),
            version: None,
            zone: None,
        })
        .unwrap();

    assert_eq!(store.dispatch(StoreAction::Undo).unwrap(), Dispatched::Changed);
    assert_eq!(
        store.matrix.value(&labor, None, None),
        Some(&Value::Number(100.0))
    );

    assert_eq!(store.dispatch(StoreAction::Redo).unwrap(), Dispatched::Changed);
    assert_eq!(
        store.matrix.value(&labor, None, None),
        Some(&Value::Number(500.0))
    );
}

#[test]
fn test_undo_at_origin_is_silent_noop() {
    let mut store = sample_store();
    assert_eq!(
        store.dispatch(StoreAction::Undo).unwrap(),
        Dispatched::Unchanged
    );
    assert_eq!(
        store.dispatch(StoreAction::Redo).unwrap(),
        Dispatched::Unchanged
    );
    assert!(store.messages().is_empty());
}

#[test]
fn test_group_lifecycle_through_dispatch() {
    let mut store = sample_store();

    let created = store
        .dispatch(StoreAction::AddGroup {
            scaling_type: "process".to_string(),
            base_costs: base_costs(),
        })
        .unwrap();
    assert!(matches!(created, Dispatched::CreatedGroup(_)));

    store
        .dispatch(StoreAction::AddGroup {
            scaling_type: "process".to_string(),
            base_costs: base_costs(),
        })
        .unwrap();
    assert_eq!(store.scaling.groups.len(), 2);

    let mut g0 = store.scaling.groups[0].clone();
    g0.items[0].operation = ScaleOp::Multiply;
    g0.items[0].scaling_factor = 3.0;
    store
        .dispatch(StoreAction::UpdateGroup { index: 0, group: g0 })
        .unwrap();

    assert_eq!(store.scaling.groups[1].items[0].base_value, 300.0);

    store.dispatch(StoreAction::RemoveGroup { index: 1 }).unwrap();
    assert_eq!(store.scaling.groups.len(), 1);
}

#[test]
fn test_protected_removal_fails_with_message_and_no_change() {
    let mut store = sample_store();
    store
        .dispatch(StoreAction::AddGroup {
            scaling_type: "process".to_string(),
            base_costs: base_costs(),
        })
        .unwrap();
    store.scaling.groups[0].is_protected = true;
    let groups_before = store.scaling.groups.clone();

    let result = store.dispatch(StoreAction::RemoveGroup { index: 0 });

    assert!(matches!(result, Err(StoreError::Pipeline(_))));
    assert_eq!(store.scaling.groups, groups_before);
    assert_eq!(store.messages().len(), 1);
}

#[test]
fn test_group_undo_restores_previous_chain() {
    let mut store = sample_store();
    store
        .dispatch(StoreAction::AddGroup {
            scaling_type: "process".to_string(),
            base_costs: base_costs(),
        })
        .unwrap();

    let mut g0 = store.scaling.groups[0].clone();
    g0.items[0].scaling_factor = 9.0;
    store
        .dispatch(StoreAction::UpdateGroup { index: 0, group: g0 })
        .unwrap();
    assert_eq!(store.scaling.groups[0].items[0].scaled_value, 900.0);

    store.dispatch(StoreAction::Undo).unwrap();
    assert_eq!(store.scaling.groups[0].items[0].scaled_value, 100.0);
}

#[test]
fn test_import_swaps_state_and_surfaces_warnings() {
    let mut donor = sample_store();
    donor
        .dispatch(StoreAction::AddGroup {
            scaling_type: "installation".to_string(),
            base_costs: base_costs(),
        })
        .unwrap();
    let json = to_json(&export_state(&donor.scaling, &[], "", "installation")).unwrap();

    let mut store = sample_store();
    let outcome = import_state(&json, "process").unwrap();
    store.dispatch(StoreAction::ApplyImport(outcome)).unwrap();

    assert_eq!(store.scaling.groups.len(), 1);
    assert_eq!(store.messages().len(), 1, "mismatch warning surfaced");
}

#[test]
fn test_version_creation_through_dispatch() {
    let mut store = sample_store();

    let result = store
        .dispatch(StoreAction::AddVersion {
            label: "High demand".to_string(),
            base: Some(VersionId::numbered(1)),
        })
        .unwrap();

    let Dispatched::CreatedVersion(v2) = result else {
        panic!("expected a created version id");
    };
    assert_eq!(v2, VersionId::numbered(2));
    assert_eq!(store.matrix.versions().len(), 2);
}

#[test]
fn test_active_switch_unknown_id_is_unchanged() {
    let mut store = sample_store();
    assert_eq!(
        store
            .dispatch(StoreAction::SetActiveVersion(VersionId::numbered(99)))
            .unwrap(),
        Dispatched::Unchanged
    );
    assert_eq!(
        store
            .dispatch(StoreAction::SetActiveZone(ZoneId::numbered(99)))
            .unwrap(),
        Dispatched::Unchanged
    );
}

#[test]
fn test_efficacy_dispatch_clamps_to_lifetime() {
    let mut store = sample_store();
    let labor = ParamId::new("laborCost");

    store
        .dispatch(StoreAction::SetEfficacyPeriod {
            param: labor.clone(),
            start: 8,
            end: 25,
        })
        .unwrap();

    let period = store.matrix.parameter(&labor).unwrap().efficacy;
    assert_eq!(period.start, 8);
    assert_eq!(period.end, 20, "end clamped to plant lifetime");
}

#[test]
fn test_summary_joins_chain_and_efficacy() {
    let mut store = sample_store();
    let labor = ParamId::new("laborCost");

    store
        .dispatch(StoreAction::AddGroup {
            scaling_type: "process".to_string(),
            base_costs: base_costs(),
        })
        .unwrap();
    let mut g0 = store.scaling.groups[0].clone();
    g0.items[0].scaling_factor = 2.0;
    store
        .dispatch(StoreAction::UpdateGroup { index: 0, group: g0 })
        .unwrap();
    store
        .dispatch(StoreAction::SetEfficacyPeriod {
            param: labor.clone(),
            start: 0,
            end: 5,
        })
        .unwrap();

    let v1 = VersionId::numbered(1);
    let z1 = ZoneId::numbered(1);

    let rows = generate_summary(&store.matrix, &store.scaling, &v1, &z1, 3);
    let row = rows.iter().find(|r| r.id == labor).unwrap();
    assert_eq!(row.base, 100.0);
    assert_eq!(row.scaled, 200.0);
    assert!(row.active);
    assert_eq!(row.effective, 200.0);

    // Outside the window the base value takes over
    let rows = generate_summary(&store.matrix, &store.scaling, &v1, &z1, 9);
    let row = rows.iter().find(|r| r.id == labor).unwrap();
    assert!(!row.active);
    assert_eq!(row.effective, 100.0);
}
