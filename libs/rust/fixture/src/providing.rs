//! Capabilities a type can declare to resolve itself without registration.

use crate::context::ValueProvider;
use crate::error::ResolutionResult;
use crate::resolvable::Resolvable;

/// A type that can provide fixture instances of itself.
///
/// Implementations typically request one labelled child value per field so
/// that callers can override individual fields:
///
/// ```
/// use rust_fixture::{FixtureProviding, ResolutionResult, Resolvable, ValueProvider, fallback};
///
/// struct Location {
///     city: String,
///     postcode: Option<String>,
/// }
///
/// impl FixtureProviding for Location {
///     fn provide_fixture(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
///         Ok(Location {
///             city: values.get("city")?,
///             postcode: values.get("postcode")?,
///         })
///     }
/// }
///
/// impl Resolvable for Location {
///     fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
///         fallback::self_described(values)
///     }
/// }
/// ```
///
/// [`crate::provide_fixture!`] generates both impls from a field list.
pub trait FixtureProviding: Sized {
    /// Provide a fixture value, resolving child values through `values`.
    ///
    /// # Errors
    ///
    /// Any error raised while resolving a child value.
    fn provide_fixture(values: &mut ValueProvider<'_>) -> ResolutionResult<Self>;
}

/// A type with a finite, fixed set of values.
pub trait ClosedChoice: Sized {
    /// Every possible value.
    fn all_cases() -> Vec<Self>;
}

/// A type that can be built from a value of an underlying raw type.
pub trait RawRepresentable: Sized {
    /// The underlying raw type.
    type Raw: Resolvable;

    /// Convert a raw value, or `None` if it does not correspond to a value.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}
