use output_diff::{compare_record_sets, ItemStatus, RecordSet, RecordSetError};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_identical_sets_are_unchanged() {
    let mut set = RecordSet::new();
    set.insert("eth0", fields(&[("ip", "1.1.1.1"), ("mtu", "1500")]))
        .unwrap();
    set.insert("eth1", fields(&[("ip", "2.2.2.2")])).unwrap();

    let diff = compare_record_sets(&set, &set);

    assert_eq!(diff.len(), 2);
    assert!(!diff.has_changes());
    assert_eq!(diff.unchanged_items(), 2);

    for item in diff.items() {
        assert_eq!(item.status, ItemStatus::Unchanged);
        assert!(item.fields.iter().all(|f| !f.changed));
    }
}

#[test]
fn test_added_item() {
    let mut baseline = RecordSet::new();
    baseline.insert("A", fields(&[("ip", "1.1.1.1")])).unwrap();

    let mut snapshot = RecordSet::new();
    snapshot.insert("A", fields(&[("ip", "1.1.1.1")])).unwrap();
    snapshot.insert("B", fields(&[("ip", "2.2.2.2")])).unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    assert_eq!(diff.get("A").unwrap().status, ItemStatus::Unchanged);

    let added = diff.get("B").unwrap();
    assert_eq!(added.status, ItemStatus::Added);
    assert_eq!(added.fields.len(), 1);
    assert_eq!(added.fields[0].field_name, "ip");
    assert_eq!(added.fields[0].baseline_value, None);
    assert_eq!(added.fields[0].snapshot_value, Some("2.2.2.2".to_string()));
    assert!(added.fields[0].changed);
}

#[test]
fn test_removed_item() {
    let mut baseline = RecordSet::new();
    baseline.insert("A", fields(&[("ip", "1.1.1.1")])).unwrap();
    baseline
        .insert("B", fields(&[("ip", "2.2.2.2"), ("vlan", "10")]))
        .unwrap();

    let mut snapshot = RecordSet::new();
    snapshot.insert("A", fields(&[("ip", "1.1.1.1")])).unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    let removed = diff.get("B").unwrap();
    assert_eq!(removed.status, ItemStatus::Removed);
    assert_eq!(removed.fields.len(), 2);

    for field in &removed.fields {
        assert_eq!(field.snapshot_value, None);
        assert!(field.baseline_value.is_some());
        assert!(field.changed);
    }
}

#[test]
fn test_changed_field_flags_only_that_field() {
    let mut baseline = RecordSet::new();
    baseline
        .insert("A", fields(&[("ip", "1.1.1.1"), ("mtu", "1500")]))
        .unwrap();

    let mut snapshot = RecordSet::new();
    snapshot
        .insert("A", fields(&[("ip", "1.1.1.2"), ("mtu", "1500")]))
        .unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    let item = diff.get("A").unwrap();
    assert_eq!(item.status, ItemStatus::Changed);
    assert!(item.field("ip").unwrap().changed);
    assert!(!item.field("mtu").unwrap().changed);
    assert_eq!(
        item.field("ip").unwrap().baseline_value,
        Some("1.1.1.1".to_string())
    );
    assert_eq!(
        item.field("ip").unwrap().snapshot_value,
        Some("1.1.1.2".to_string())
    );
}

#[test]
fn test_absent_field_is_not_empty_string() {
    // A field present as "" on one side and absent on the other differs
    let mut baseline = RecordSet::new();
    baseline.insert("A", fields(&[("descr", "")])).unwrap();

    let mut snapshot = RecordSet::new();
    snapshot.insert("A", fields(&[])).unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    let item = diff.get("A").unwrap();
    assert_eq!(item.status, ItemStatus::Changed);

    let field = item.field("descr").unwrap();
    assert_eq!(field.baseline_value, Some(String::new()));
    assert_eq!(field.snapshot_value, None);
    assert!(field.changed);
}

#[test]
fn test_snapshot_only_field_marks_item_changed() {
    let mut baseline = RecordSet::new();
    baseline.insert("A", fields(&[("ip", "1.1.1.1")])).unwrap();

    let mut snapshot = RecordSet::new();
    snapshot
        .insert("A", fields(&[("ip", "1.1.1.1"), ("speed", "1000")]))
        .unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    let item = diff.get("A").unwrap();
    assert_eq!(item.status, ItemStatus::Changed);

    let field = item.field("speed").unwrap();
    assert_eq!(field.baseline_value, None);
    assert_eq!(field.snapshot_value, Some("1000".to_string()));
}

#[test]
fn test_item_order_is_baseline_first_then_snapshot_only() {
    let mut baseline = RecordSet::new();
    baseline.insert("eth2", fields(&[])).unwrap();
    baseline.insert("eth0", fields(&[])).unwrap();

    let mut snapshot = RecordSet::new();
    snapshot.insert("eth9", fields(&[])).unwrap();
    snapshot.insert("eth0", fields(&[])).unwrap();
    snapshot.insert("eth5", fields(&[])).unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    let keys: Vec<&str> = diff.items().iter().map(|i| i.item_key.as_str()).collect();
    assert_eq!(keys, vec!["eth2", "eth0", "eth9", "eth5"]);
}

#[test]
fn test_duplicate_key_fails_fast() {
    let mut set = RecordSet::new();
    set.insert("eth0", fields(&[("ip", "1.1.1.1")])).unwrap();

    let err = set
        .insert("eth0", fields(&[("ip", "9.9.9.9")]))
        .unwrap_err();

    assert_eq!(err, RecordSetError::DuplicateKey("eth0".to_string()));

    // The first row survives untouched
    assert_eq!(set.len(), 1);
    assert_eq!(set.get("eth0").unwrap().get("ip").unwrap(), "1.1.1.1");
}

#[test]
fn test_from_rows_rejects_duplicates() {
    let rows = vec![
        ("eth0".to_string(), fields(&[("ip", "1.1.1.1")])),
        ("eth1".to_string(), fields(&[("ip", "2.2.2.2")])),
        ("eth0".to_string(), fields(&[("ip", "3.3.3.3")])),
    ];

    let err = RecordSet::from_rows(rows).unwrap_err();
    assert_eq!(err, RecordSetError::DuplicateKey("eth0".to_string()));
}

#[test]
fn test_empty_sets_compare_empty() {
    let diff = compare_record_sets(&RecordSet::new(), &RecordSet::new());

    assert!(diff.is_empty());
    assert!(!diff.has_changes());
}

#[test]
fn test_counts() {
    let mut baseline = RecordSet::new();
    baseline.insert("same", fields(&[("v", "1")])).unwrap();
    baseline.insert("edit", fields(&[("v", "1")])).unwrap();
    baseline.insert("gone", fields(&[("v", "1")])).unwrap();

    let mut snapshot = RecordSet::new();
    snapshot.insert("same", fields(&[("v", "1")])).unwrap();
    snapshot.insert("edit", fields(&[("v", "2")])).unwrap();
    snapshot.insert("new", fields(&[("v", "1")])).unwrap();

    let diff = compare_record_sets(&baseline, &snapshot);

    assert_eq!(diff.unchanged_items(), 1);
    assert_eq!(diff.changed_items(), 1);
    assert_eq!(diff.removed_items(), 1);
    assert_eq!(diff.added_items(), 1);
    assert!(diff.has_changes());
}
