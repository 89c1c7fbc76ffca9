//! Fallback steps used by [`Resolvable::fallback`] implementations.
//!
//! Each function implements one way a type can resolve itself when no
//! provider is registered for it. Hand-written [`Resolvable`] impls combine
//! them in the order that suits the type.

use crate::context::ValueProvider;
use crate::error::{ResolutionError, ResolutionResult};
use crate::providing::{ClosedChoice, FixtureProviding, RawRepresentable};
use crate::resolvable::Resolvable;
use rand::Rng;
use std::any::type_name;
use tracing::trace;

/// Build `T` from its own field list.
///
/// # Errors
///
/// Any error raised by [`FixtureProviding::provide_fixture`].
pub fn self_described<T: FixtureProviding>(values: &mut ValueProvider<'_>) -> ResolutionResult<T> {
    trace!(type_name = type_name::<T>(), "resolving self-described value");
    T::provide_fixture(values)
}

/// Build `T` from a registered provider of its raw type.
///
/// Yields `None` when no provider is registered for the raw type or when the
/// raw value does not convert.
///
/// # Errors
///
/// Any error raised by the raw type's provider.
pub fn try_raw_value<T: RawRepresentable>(
    values: &mut ValueProvider<'_>,
) -> ResolutionResult<Option<T>> {
    if !values.fixture().is_registered::<T::Raw>() {
        return Ok(None);
    }
    let raw = values.unlabeled::<T::Raw>()?;
    let value = T::from_raw(raw);
    trace!(
        type_name = type_name::<T>(),
        converted = value.is_some(),
        "resolved raw value"
    );
    Ok(value)
}

/// Build `T` from a registered provider of its raw type, or fail.
///
/// # Errors
///
/// [`ResolutionError::NoProviderRegisteredForType`] when no raw value is
/// available or it does not convert.
pub fn raw_value<T: RawRepresentable>(values: &mut ValueProvider<'_>) -> ResolutionResult<T> {
    try_raw_value(values)?.ok_or_else(ResolutionError::no_provider::<T>)
}

/// Pick one of the cases of `T` uniformly at random.
///
/// # Errors
///
/// [`ResolutionError::NoProviderRegisteredForType`] when `T` has no cases.
pub fn any_case<T: ClosedChoice>(values: &mut ValueProvider<'_>) -> ResolutionResult<T> {
    let mut cases = T::all_cases();
    if cases.is_empty() {
        return Err(ResolutionError::no_provider::<T>());
    }
    let index = values.rng(|rng| rng.gen_range(0..cases.len()));
    Ok(cases.swap_remove(index))
}

/// Try the raw type's provider first, then pick a random case.
///
/// # Errors
///
/// Errors raised by the raw type's provider, or no provider when `T` has
/// no cases.
pub fn raw_value_or_any_case<T>(values: &mut ValueProvider<'_>) -> ResolutionResult<T>
where
    T: RawRepresentable + ClosedChoice,
{
    match try_raw_value(values)? {
        Some(value) => Ok(value),
        None => any_case(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixtureConfig;
    use crate::fixture::Fixture;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Suit {
        Hearts,
        Spades,
    }

    impl ClosedChoice for Suit {
        fn all_cases() -> Vec<Self> {
            vec![Self::Hearts, Self::Spades]
        }
    }

    impl RawRepresentable for Suit {
        type Raw = char;

        fn from_raw(raw: char) -> Option<Self> {
            match raw {
                'h' => Some(Self::Hearts),
                's' => Some(Self::Spades),
                _ => None,
            }
        }
    }

    impl Resolvable for Suit {
        fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
            raw_value_or_any_case(values)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Code(u16);

    impl RawRepresentable for Code {
        type Raw = u16;

        fn from_raw(raw: u16) -> Option<Self> {
            (raw < 1000).then_some(Self(raw))
        }
    }

    impl Resolvable for Code {
        fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
            raw_value(values)
        }
    }

    #[derive(Debug)]
    enum Never {}

    impl ClosedChoice for Never {
        fn all_cases() -> Vec<Self> {
            Vec::new()
        }
    }

    impl Resolvable for Never {
        fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
            any_case(values)
        }
    }

    fn empty_fixture() -> Fixture {
        Fixture::with_config(FixtureConfig::default().without_defaults().with_seed(11))
    }

    #[test]
    fn test_raw_value_converts() {
        let fixture = empty_fixture();
        fixture.register_value(|| 404_u16);
        assert_eq!(fixture.value::<Code>().ok(), Some(Code(404)));
    }

    #[test]
    fn test_raw_value_without_raw_provider() {
        let err = empty_fixture().value::<Code>().err();
        assert!(err.is_some_and(|err| err.is_no_provider()));
    }

    #[test]
    fn test_raw_value_conversion_failure() {
        let fixture = empty_fixture();
        fixture.register_value(|| 5000_u16);
        assert!(fixture.value::<Code>().is_err());
        assert!(matches!(fixture.value::<Option<Code>>(), Ok(None)));
    }

    #[test]
    fn test_raw_value_preferred_over_cases() {
        let fixture = empty_fixture();
        fixture.register_value(|| 's');
        for _ in 0..10 {
            assert_eq!(fixture.value::<Suit>().ok(), Some(Suit::Spades));
        }
    }

    #[test]
    fn test_unconvertible_raw_value_falls_back_to_cases() {
        let fixture = empty_fixture();
        fixture.register_value(|| 'x');
        assert!(fixture.value::<Suit>().is_ok());
    }

    #[test]
    fn test_registered_provider_beats_raw_value() {
        let fixture = empty_fixture();
        fixture.register_value(|| 's');
        fixture.register_value(|| Suit::Hearts);
        assert_eq!(fixture.value::<Suit>().ok(), Some(Suit::Hearts));
    }

    #[test]
    fn test_any_case_covers_all_cases() {
        let fixture = empty_fixture();
        let suits = fixture.resolve_many::<Suit>(64, &crate::Overrides::new());
        let suits = suits.unwrap_or_default();
        assert!(suits.contains(&Suit::Hearts));
        assert!(suits.contains(&Suit::Spades));
    }

    #[test]
    fn test_empty_choice_has_no_provider() {
        let fixture = empty_fixture();
        let err = fixture.value::<Never>().err();
        assert!(err.is_some_and(|err| err.is_no_provider()));
        assert!(matches!(fixture.value::<Option<Never>>(), Ok(None)));
    }
}
