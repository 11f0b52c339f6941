//! Tests for the linear undo/redo log

use crate::history::{HistoryAction, HistoryLog};

fn log_with(values: &[i32]) -> HistoryLog<i32> {
    let mut log = HistoryLog::default();
    for v in values {
        log.add_entry(HistoryAction::SetValue, format!("set {v}"), *v);
    }
    log
}

#[test]
fn test_empty_log_has_no_motion() {
    let mut log: HistoryLog<i32> = HistoryLog::default();
    assert!(!log.can_undo());
    assert!(!log.can_redo());
    assert_eq!(log.undo(), None);
    assert_eq!(log.redo(), None);
}

#[test]
fn test_undo_then_redo_restores_pre_undo_snapshot() {
    let mut log = log_with(&[1, 2, 3]);

    assert_eq!(log.undo(), Some(&2));
    assert_eq!(log.redo(), Some(&3));
    assert_eq!(log.current(), Some(&3));
}

#[test]
fn test_undo_at_origin_is_noop() {
    let mut log = log_with(&[1]);
    assert_eq!(log.undo(), None);
    assert_eq!(log.current(), Some(&1));
}

#[test]
fn test_redo_at_tail_is_noop() {
    let mut log = log_with(&[1, 2]);
    assert_eq!(log.redo(), None);
    assert_eq!(log.current(), Some(&2));
}

#[test]
fn test_new_entry_truncates_redo_branch() {
    let mut log = log_with(&[1, 2, 3]);
    log.undo();
    log.undo();
    assert_eq!(log.current(), Some(&1));

    log.add_entry(HistoryAction::SetValue, "set 9", 9);

    assert_eq!(log.len(), 2);
    assert_eq!(log.current(), Some(&9));
    assert_eq!(log.redo(), None, "forward branch must be gone");
}

#[test]
fn test_cap_evicts_oldest_entry() {
    let mut log: HistoryLog<i32> = HistoryLog::new(3);
    for v in 0..5 {
        log.add_entry(HistoryAction::SetValue, format!("set {v}"), v);
    }

    assert_eq!(log.len(), 3);
    assert_eq!(log.entries()[0].snapshot, 2, "oldest entries evicted first");
    assert_eq!(log.current(), Some(&4));

    // Cursor still walks the retained window
    assert_eq!(log.undo(), Some(&3));
    assert_eq!(log.undo(), Some(&2));
    assert_eq!(log.undo(), None);
}

#[test]
fn test_entry_ids_stay_unique_across_truncation() {
    let mut log = log_with(&[1, 2]);
    log.undo();
    log.add_entry(HistoryAction::SetValue, "set 7", 7);

    let ids: Vec<&str> = log.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
