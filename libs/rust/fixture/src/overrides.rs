//! Per-call named overrides.

use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A type-erased override value that can be handed out repeatedly.
pub(crate) trait OverrideValue: Send + Sync {
    /// A fresh boxed copy of the stored value.
    fn clone_any(&self) -> Box<dyn Any>;

    /// The name of the stored value's type.
    fn type_name(&self) -> &'static str;
}

struct Entry<V>(V);

impl<V> OverrideValue for Entry<V>
where
    V: Any + Clone + Send + Sync,
{
    fn clone_any(&self) -> Box<dyn Any> {
        Box::new(self.0.clone())
    }

    fn type_name(&self) -> &'static str {
        type_name::<V>()
    }
}

/// Values supplied for named fields for a single resolution call.
///
/// Labels must match the labels passed to [`crate::ValueProvider::get`] by
/// whatever provider builds the requested type. Labels are kept sorted so
/// that unused-override reporting is deterministic.
///
/// ```
/// use rust_fixture::Overrides;
///
/// let overrides = Overrides::new().with("name", "John").with("is_active", true);
/// assert_eq!(overrides.labels().collect::<Vec<_>>(), ["is_active", "name"]);
/// ```
#[derive(Clone, Default)]
pub struct Overrides {
    values: BTreeMap<String, Arc<dyn OverrideValue>>,
}

impl Overrides {
    /// Create an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override, replacing any previous value for `label`.
    #[must_use]
    pub fn with<V>(mut self, label: impl Into<String>, value: V) -> Self
    where
        V: Any + Clone + Send + Sync,
    {
        self.insert(label, value);
        self
    }

    /// Insert an override, replacing any previous value for `label`.
    pub fn insert<V>(&mut self, label: impl Into<String>, value: V)
    where
        V: Any + Clone + Send + Sync,
    {
        self.values.insert(label.into(), Arc::new(Entry(value)));
    }

    /// Whether an override exists for `label`.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    /// Labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no overrides were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn get(&self, label: &str) -> Option<&dyn OverrideValue> {
        self.values.get(label).map(AsRef::as_ref)
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(label, value)| (label, value.type_name())))
            .finish()
    }
}

/// Build [`Overrides`] from `label => value` pairs.
///
/// ```
/// use rust_fixture::overrides;
///
/// let overrides = overrides! { "id" => 7_i64, "name" => "bar" };
/// assert_eq!(overrides.len(), 2);
/// ```
#[macro_export]
macro_rules! overrides {
    () => {
        $crate::Overrides::new()
    };
    ($($label:expr => $value:expr),+ $(,)?) => {
        $crate::Overrides::new()$(.with($label, $value))+
    };
}
