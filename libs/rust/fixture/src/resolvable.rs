//! Types that can be requested from a [`crate::Fixture`].

use crate::context::ValueProvider;
use crate::error::{ResolutionError, ResolutionResult};
use std::any::{Any, type_name};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use tracing::debug;

/// A type that can be requested from a [`crate::Fixture`].
///
/// Registered providers always take priority. When none is registered,
/// [`Resolvable::fallback`] decides how the type resolves itself; the
/// default fails with [`ResolutionError::NoProviderRegisteredForType`].
///
/// Self-describing types, closed-choice enums and raw-value wrappers pick a
/// fallback from [`crate::fallback`], usually through
/// [`crate::provide_fixture!`] or [`crate::closed_choice!`].
pub trait Resolvable: Sized + 'static {
    /// Produce a value when no provider is registered for `Self`.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::NoProviderRegisteredForType`] unless overridden.
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        let _ = values;
        Err(ResolutionError::no_provider::<Self>())
    }

    /// Interpret a type-erased override as `Self`.
    ///
    /// Returns the value back when it cannot be represented as `Self`.
    ///
    /// # Errors
    ///
    /// The original value, unchanged, when it is of another type.
    fn from_override(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>> {
        value.downcast::<Self>().map(|value| *value)
    }
}

macro_rules! resolvable {
    ($($ty:ty),* $(,)?) => {
        $(impl Resolvable for $ty {})*
    };
}

resolvable!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, bool, char, (),
    std::time::Duration,
    uuid::Uuid,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDate,
    url::Url,
);

impl Resolvable for String {
    fn from_override(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>> {
        value
            .downcast::<Self>()
            .map(|value| *value)
            .or_else(|value| value.downcast::<&'static str>().map(|value| (*value).to_owned()))
    }
}

impl<T: Resolvable> Resolvable for Option<T> {
    /// Resolves the wrapped type in the same context, or `None` when nothing
    /// can provide it.
    ///
    /// A missing provider for one of the wrapped type's own fields is not
    /// absorbed.
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        match values.resolve_in_place::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_no_provider_for::<T>() => {
                debug!(type_name = type_name::<T>(), "substituting None for unresolvable value");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Accepts either an `Option<T>` or a bare `T`.
    fn from_override(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>> {
        value
            .downcast::<Self>()
            .map(|value| *value)
            .or_else(|value| T::from_override(value).map(Some))
    }
}

impl<T: Resolvable> Resolvable for Box<T> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        match values.resolve_in_place::<T>() {
            Ok(value) => Ok(Box::new(value)),
            Err(err) if err.is_no_provider_for::<T>() => Err(ResolutionError::no_provider::<Self>()),
            Err(err) => Err(err),
        }
    }

    fn from_override(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>> {
        value
            .downcast::<Self>()
            .map(|value| *value)
            .or_else(|value| T::from_override(value).map(Box::new))
    }
}

/// Resolve one element for a collection, or nothing if the element type
/// itself has no provider.
fn one_element<T: Resolvable>(values: &mut ValueProvider<'_>) -> ResolutionResult<Option<T>> {
    match values.unlabeled::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_no_provider_for::<T>() => {
            debug!(type_name = type_name::<T>(), "substituting empty collection");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn one_entry<K: Resolvable, V: Resolvable>(
    values: &mut ValueProvider<'_>,
) -> ResolutionResult<Option<(K, V)>> {
    let Some(key) = one_element::<K>(values)? else {
        return Ok(None);
    };
    Ok(one_element::<V>(values)?.map(|value| (key, value)))
}

impl<T: Resolvable> Resolvable for Vec<T> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(one_element(values)?.into_iter().collect())
    }
}

impl<T: Resolvable> Resolvable for VecDeque<T> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(one_element(values)?.into_iter().collect())
    }
}

impl<T: Resolvable + Eq + Hash> Resolvable for HashSet<T> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(one_element(values)?.into_iter().collect())
    }
}

impl<T: Resolvable + Ord> Resolvable for BTreeSet<T> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(one_element(values)?.into_iter().collect())
    }
}

impl<K: Resolvable + Eq + Hash, V: Resolvable> Resolvable for HashMap<K, V> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(one_entry(values)?.into_iter().collect())
    }
}

impl<K: Resolvable + Ord, V: Resolvable> Resolvable for BTreeMap<K, V> {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(one_entry(values)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixtureConfig;
    use crate::fixture::Fixture;
    use crate::overrides::Overrides;

    struct Unregistered;

    impl Resolvable for Unregistered {}

    struct Failing;

    #[derive(Debug)]
    struct Named {
        label: String,
    }

    impl Resolvable for Named {
        fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
            Ok(Self {
                label: values.get("label")?,
            })
        }
    }

    impl Resolvable for Failing {
        fn fallback(_: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
            Err(ResolutionError::provider_failed::<Self>("broken"))
        }
    }

    fn fixture() -> Fixture {
        let fixture = Fixture::with_config(FixtureConfig::default().without_defaults());
        fixture.register_value(|| 42_i32);
        fixture.register_value(|| "foo".to_string());
        fixture
    }

    #[test]
    fn test_option_unwraps_registered_value() {
        assert_eq!(fixture().value::<Option<i32>>().ok(), Some(Some(42)));
    }

    #[test]
    fn test_option_falls_back_to_none() {
        assert!(matches!(fixture().value::<Option<Unregistered>>(), Ok(None)));
    }

    #[test]
    fn test_option_propagates_other_errors() {
        let err = fixture().value::<Option<Failing>>().err();
        assert!(matches!(err, Some(ResolutionError::ProviderFailed { .. })));
    }

    #[test]
    fn test_option_reports_missing_field_provider() {
        let fixture = Fixture::with_config(FixtureConfig::default().without_defaults());
        fixture.register_value(|| 42_i64);

        let err = fixture.value::<Option<Named>>().err();
        assert_eq!(
            err.as_ref().and_then(ResolutionError::type_name),
            Some(type_name::<String>())
        );
        assert!(err.is_some_and(|err| err.is_no_provider()));

        fixture.register_value(|| "foo".to_string());
        let named = fixture.value::<Option<Named>>();
        assert_eq!(named.ok().flatten().map(|named| named.label).as_deref(), Some("foo"));
    }

    #[test]
    fn test_option_of_box_falls_back_to_none() {
        assert!(matches!(fixture().value::<Option<Box<Unregistered>>>(), Ok(None)));
        let err = fixture().value::<Box<Unregistered>>().err();
        assert!(err.is_some_and(|err| err.is_no_provider_for::<Box<Unregistered>>()));
    }

    #[test]
    fn test_option_prefers_registered_optional_provider() {
        let fixture = fixture();
        fixture.register_value(|| None::<i32>);
        assert_eq!(fixture.value::<Option<i32>>().ok(), Some(None));
    }

    #[test]
    fn test_option_override_accepts_bare_value() {
        let value = Option::<i32>::from_override(Box::new(7_i32));
        assert_eq!(value.ok(), Some(Some(7)));
        let value = Option::<i32>::from_override(Box::new(None::<i32>));
        assert_eq!(value.ok(), Some(None));
        assert!(Option::<i32>::from_override(Box::new("7")).is_err());
    }

    #[test]
    fn test_string_override_accepts_str() {
        assert_eq!(String::from_override(Box::new("bar")).ok().as_deref(), Some("bar"));
        assert!(String::from_override(Box::new('b')).is_err());
    }

    #[test]
    fn test_box_resolves_inner() {
        assert_eq!(fixture().value::<Box<i32>>().ok().map(|value| *value), Some(42));
    }

    #[test]
    fn test_collections_with_provider_hold_one_element() {
        let fixture = fixture();
        assert_eq!(fixture.value::<Vec<i32>>().ok(), Some(vec![42]));
        assert_eq!(fixture.value::<VecDeque<i32>>().map(|v| v.len()).ok(), Some(1));
        assert_eq!(fixture.value::<HashSet<i32>>().map(|v| v.len()).ok(), Some(1));
        assert_eq!(fixture.value::<BTreeSet<i32>>().map(|v| v.len()).ok(), Some(1));

        let map = fixture.value::<BTreeMap<String, i32>>().unwrap_or_default();
        assert_eq!(map.get("foo"), Some(&42));
        assert_eq!(fixture.value::<HashMap<i32, String>>().map(|v| v.len()).ok(), Some(1));
    }

    #[test]
    fn test_collections_without_provider_are_empty() {
        let fixture = fixture();
        assert!(fixture.value::<Vec<Unregistered>>().is_ok_and(|v| v.is_empty()));
        assert!(fixture.value::<VecDeque<Unregistered>>().is_ok_and(|v| v.is_empty()));
        assert!(fixture.value::<BTreeMap<i32, Unregistered>>().is_ok_and(|v| v.is_empty()));
        assert!(fixture.value::<BTreeSet<u8>>().is_ok_and(|v| v.is_empty()));
    }

    #[test]
    fn test_collections_report_missing_field_provider() {
        let fixture = Fixture::with_config(FixtureConfig::default().without_defaults());
        fixture.register_value(|| 42_i64);

        let err = fixture.value::<Vec<Named>>().err();
        assert!(err.is_some_and(|err| err.is_no_provider_for::<String>()));
        let err = fixture.value::<BTreeMap<i64, Named>>().err();
        assert!(err.is_some_and(|err| err.is_no_provider_for::<String>()));
    }

    #[test]
    fn test_collections_propagate_other_errors() {
        assert!(fixture().value::<Vec<Failing>>().is_err());
    }

    #[test]
    fn test_collection_ignores_top_level_overrides() {
        let err = fixture()
            .resolve::<Vec<i32>>(&Overrides::new().with("0", 1_i32))
            .err();
        assert!(matches!(err, Some(ResolutionError::UnusedOverride { .. })));
    }

    #[test]
    fn test_primitive_without_provider_fails() {
        let err = fixture().value::<u16>().err();
        assert!(err.is_some_and(|err| err.is_no_provider()));
    }
}
