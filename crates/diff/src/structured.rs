use derive_more::Display;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors produced when assembling a record set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSetError {
    /// The same item key was supplied twice for one side
    #[error("duplicate item key '{0}' in record set")]
    DuplicateKey(String),
}

/// A parsed tabular view of command output, keyed by item identity.
///
/// Item keys (interface names, route prefixes, MAC addresses) are unique
/// within one set and iterate in insertion order. Field maps are per item;
/// the field names present may differ between items.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    /// Item keys in insertion order
    keys: Vec<String>,

    /// Field values per item key
    items: HashMap<String, BTreeMap<String, String>>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one item, rejecting duplicate keys
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) -> Result<(), RecordSetError> {
        let key = key.into();

        if self.items.contains_key(&key) {
            return Err(RecordSetError::DuplicateKey(key));
        }

        self.keys.push(key.clone());
        self.items.insert(key, fields);

        Ok(())
    }

    /// Build a record set from rows, failing fast on a duplicate key
    pub fn from_rows<I>(rows: I) -> Result<Self, RecordSetError>
    where
        I: IntoIterator<Item = (String, BTreeMap<String, String>)>,
    {
        let mut set = Self::new();

        for (key, fields) in rows {
            set.insert(key, fields)?;
        }

        Ok(set)
    }

    /// Iterate item keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Iterate items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.keys.iter().map(|key| (key.as_str(), &self.items[key]))
    }

    /// Get the fields of one item
    pub fn get(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        self.items.get(key)
    }

    /// Check if an item key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the set has no items
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Represents the classification of one item in a structured diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemStatus {
    /// The item exists in both versions with identical fields
    #[display(fmt = "Unchanged")]
    Unchanged,

    /// The item exists in both versions but at least one field differs
    #[display(fmt = "Changed")]
    Changed,

    /// The item only exists in the snapshot
    #[display(fmt = "Added")]
    Added,

    /// The item only exists in the baseline
    #[display(fmt = "Removed")]
    Removed,
}

/// One field of one item, compared across both versions.
///
/// `None` means the field (or the whole item) is absent on that side. Absent
/// is never equal to a present value, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDiff {
    /// The field name
    pub field_name: String,

    /// The baseline value, if present
    pub baseline_value: Option<String>,

    /// The snapshot value, if present
    pub snapshot_value: Option<String>,

    /// Whether the two values differ under exact string equality
    pub changed: bool,
}

/// One item of a structured diff with its classified fields
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemDiff {
    /// The item key
    pub item_key: String,

    /// The classification of this item
    pub status: ItemStatus,

    /// Per-field comparison over the union of both sides' field names
    pub fields: Vec<FieldDiff>,
}

impl ItemDiff {
    /// Check if this item carries a change
    pub fn has_changes(&self) -> bool {
        self.status != ItemStatus::Unchanged
    }

    /// Look up one field's diff by name
    pub fn field(&self, name: &str) -> Option<&FieldDiff> {
        self.fields.iter().find(|f| f.field_name == name)
    }
}

/// A structured diff between two record sets.
///
/// Items iterate in a stable order: baseline insertion order first, then
/// snapshot-only keys in snapshot order.
#[derive(Debug, Clone, Default)]
pub struct StructuredDiff {
    /// Item diffs in stable order
    items: Vec<ItemDiff>,

    /// Item key to position in `items`
    index: HashMap<String, usize>,
}

impl StructuredDiff {
    /// Iterate the item diffs in stable order
    pub fn items(&self) -> &[ItemDiff] {
        &self.items
    }

    /// Look up one item's diff by key
    pub fn get(&self, key: &str) -> Option<&ItemDiff> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    /// Get the number of items in the diff
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the diff covers no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if any item carries a change
    pub fn has_changes(&self) -> bool {
        self.items.iter().any(|i| i.has_changes())
    }

    /// Get the number of added items
    pub fn added_items(&self) -> usize {
        self.count_status(ItemStatus::Added)
    }

    /// Get the number of removed items
    pub fn removed_items(&self) -> usize {
        self.count_status(ItemStatus::Removed)
    }

    /// Get the number of changed items
    pub fn changed_items(&self) -> usize {
        self.count_status(ItemStatus::Changed)
    }

    /// Get the number of unchanged items
    pub fn unchanged_items(&self) -> usize {
        self.count_status(ItemStatus::Unchanged)
    }

    fn count_status(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }

    fn push(&mut self, item: ItemDiff) {
        self.index.insert(item.item_key.clone(), self.items.len());
        self.items.push(item);
    }
}

/// Compare two record sets item by item over the union of their keys.
///
/// Total over well-formed input: duplicate keys are rejected when the
/// [`RecordSet`] is built, so comparison itself cannot fail.
pub fn compare_record_sets(baseline: &RecordSet, snapshot: &RecordSet) -> StructuredDiff {
    let mut diff = StructuredDiff::default();

    // Baseline keys first, then snapshot-only keys in snapshot order
    for (key, baseline_fields) in baseline.iter() {
        let item = match snapshot.get(key) {
            Some(snapshot_fields) => compare_item(key, baseline_fields, snapshot_fields),
            None => one_sided_item(key, baseline_fields, ItemStatus::Removed),
        };
        diff.push(item);
    }

    for (key, snapshot_fields) in snapshot.iter() {
        if !baseline.contains_key(key) {
            diff.push(one_sided_item(key, snapshot_fields, ItemStatus::Added));
        }
    }

    diff
}

/// Compare one item present on both sides over the union of its field names
fn compare_item(
    key: &str,
    baseline_fields: &BTreeMap<String, String>,
    snapshot_fields: &BTreeMap<String, String>,
) -> ItemDiff {
    let mut fields = Vec::new();
    let mut any_changed = false;

    for name in baseline_fields.keys() {
        let baseline_value = baseline_fields.get(name).cloned();
        let snapshot_value = snapshot_fields.get(name).cloned();
        let changed = baseline_value != snapshot_value;
        any_changed |= changed;

        fields.push(FieldDiff {
            field_name: name.clone(),
            baseline_value,
            snapshot_value,
            changed,
        });
    }

    // Fields only present in the snapshot item
    for (name, value) in snapshot_fields {
        if !baseline_fields.contains_key(name) {
            any_changed = true;
            fields.push(FieldDiff {
                field_name: name.clone(),
                baseline_value: None,
                snapshot_value: Some(value.clone()),
                changed: true,
            });
        }
    }

    let status = if any_changed {
        ItemStatus::Changed
    } else {
        ItemStatus::Unchanged
    };

    ItemDiff {
        item_key: key.to_string(),
        status,
        fields,
    }
}

/// Build the diff for an item present on only one side
fn one_sided_item(
    key: &str,
    item_fields: &BTreeMap<String, String>,
    status: ItemStatus,
) -> ItemDiff {
    let fields = item_fields
        .iter()
        .map(|(name, value)| {
            let (baseline_value, snapshot_value) = match status {
                ItemStatus::Added => (None, Some(value.clone())),
                _ => (Some(value.clone()), None),
            };

            FieldDiff {
                field_name: name.clone(),
                baseline_value,
                snapshot_value,
                changed: true,
            }
        })
        .collect();

    ItemDiff {
        item_key: key.to_string(),
        status,
        fields,
    }
}
