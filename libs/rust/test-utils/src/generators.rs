//! Shared proptest generators for fixture tests.

use proptest::prelude::*;
use rust_fixture::Overrides;

/// Labels used by the sample fixture types.
pub const SAMPLE_LABELS: &[&str] = &[
    "id",
    "name",
    "created_at",
    "is_active",
    "title",
    "owner",
    "staff",
    "nickname",
    "tags",
    "scores",
    "value",
    "next",
];

/// Generate field-like labels.
pub fn label_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Generate labels that no sample fixture type requests.
pub fn unused_label_strategy() -> impl Strategy<Value = String> {
    label_strategy().prop_filter("label is used by a sample type", |label| {
        !SAMPLE_LABELS.contains(&label.as_str())
    })
}

/// Generate display names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,12})?"
}

/// Generate counts for repeated resolution.
pub fn count_strategy() -> impl Strategy<Value = usize> {
    0usize..16
}

/// Generate random generator seeds.
pub fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// A typed value for an override, kept alongside a description of its type.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideSample {
    /// An integer override
    Int(i64),
    /// A string override
    Text(String),
    /// A boolean override
    Flag(bool),
}

impl OverrideSample {
    /// Insert this value into `overrides` under `label`.
    pub fn insert_into(&self, overrides: &mut Overrides, label: &str) {
        match self {
            Self::Int(value) => overrides.insert(label, *value),
            Self::Text(value) => overrides.insert(label, value.clone()),
            Self::Flag(value) => overrides.insert(label, *value),
        }
    }
}

/// Generate override values of mixed types.
pub fn override_sample_strategy() -> impl Strategy<Value = OverrideSample> {
    prop_oneof![
        any::<i64>().prop_map(OverrideSample::Int),
        "[a-z]{0,20}".prop_map(OverrideSample::Text),
        any::<bool>().prop_map(OverrideSample::Flag),
    ]
}

/// Generate override sets with distinct unused labels.
pub fn unused_overrides_strategy() -> impl Strategy<Value = Vec<(String, OverrideSample)>> {
    prop::collection::btree_map(unused_label_strategy(), override_sample_strategy(), 1..4)
        .prop_map(|overrides| overrides.into_iter().collect())
}
