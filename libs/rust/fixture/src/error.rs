//! Resolution error types using thiserror 2.0.
//!
//! Every failure raised while resolving a fixture value is surfaced to the
//! caller through [`ResolutionError`]. Nothing is logged in place of an error.

use std::any::type_name;
use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error produced by a provider that failed for its own reasons.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised while resolving fixture values.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// No provider, self-description or fallback could produce a value
    #[error(
        "A value could not be resolved for the type ‘{type_name}‘. \
         You can register it using the ‘register‘ method, \
         or file an issue if you believe that it should have been resolved automatically."
    )]
    NoProviderRegisteredForType {
        /// The type that could not be resolved
        type_name: &'static str,
    },

    /// An override was supplied with a value of the wrong type for its label
    #[error("An override was provided as {actual} for the argument ‘{label}‘ but {expected} was expected.")]
    OverrideTypeMismatch {
        /// The override label
        label: String,
        /// The type of the value that was supplied
        actual: &'static str,
        /// The type requested at that label
        expected: &'static str,
    },

    /// An override was supplied but never requested while building the value
    #[error("The argument ‘{label}‘ was specified but is not used by the fixture for {type_name}.")]
    UnusedOverride {
        /// The unused override label
        label: String,
        /// The top-level type that was requested
        type_name: &'static str,
    },

    /// Nested resolution went deeper than the configured limit
    #[error(
        "Resolution of ‘{requested}‘ exceeded the maximum depth of {limit} nested values \
         while resolving ‘{type_name}‘."
    )]
    RecursionLimitExceeded {
        /// The type being resolved when the limit was hit
        type_name: &'static str,
        /// The top-level type that was requested
        requested: &'static str,
        /// The configured depth limit
        limit: usize,
    },

    /// A registered provider or self-description failed
    #[error("The provider for ‘{type_name}‘ failed: {source}")]
    ProviderFailed {
        /// The type whose provider failed
        type_name: &'static str,
        /// The underlying failure
        #[source]
        source: BoxError,
    },
}

impl ResolutionError {
    /// Check if this error means that no value could be produced for a type.
    ///
    /// This is the only kind that the optional and collection fallbacks
    /// recover from.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_fixture::ResolutionError;
    ///
    /// assert!(ResolutionError::no_provider::<u8>().is_no_provider());
    /// assert!(!ResolutionError::unused_override::<u8>("id").is_no_provider());
    /// ```
    #[must_use]
    pub const fn is_no_provider(&self) -> bool {
        matches!(self, Self::NoProviderRegisteredForType { .. })
    }

    /// Check if this error means that no value could be produced for `T`
    /// itself, rather than for one of the values `T` is built from.
    ///
    /// ```
    /// use rust_fixture::ResolutionError;
    ///
    /// let err = ResolutionError::no_provider::<String>();
    /// assert!(err.is_no_provider_for::<String>());
    /// assert!(!err.is_no_provider_for::<u8>());
    /// ```
    #[must_use]
    pub fn is_no_provider_for<T: ?Sized>(&self) -> bool {
        matches!(self, Self::NoProviderRegisteredForType { type_name: name } if *name == type_name::<T>())
    }

    /// Check if this error was caused by the overrides the test author supplied.
    #[must_use]
    pub const fn is_author_error(&self) -> bool {
        matches!(
            self,
            Self::OverrideTypeMismatch { .. } | Self::UnusedOverride { .. }
        )
    }

    /// Create a no provider error for `T`.
    #[must_use]
    pub fn no_provider<T: ?Sized>() -> Self {
        Self::NoProviderRegisteredForType {
            type_name: type_name::<T>(),
        }
    }

    /// Create an override type mismatch error where `T` was expected.
    #[must_use]
    pub fn override_type_mismatch<T: ?Sized>(label: impl Into<String>, actual: &'static str) -> Self {
        Self::OverrideTypeMismatch {
            label: label.into(),
            actual,
            expected: type_name::<T>(),
        }
    }

    /// Create an unused override error for the top-level type `T`.
    #[must_use]
    pub fn unused_override<T: ?Sized>(label: impl Into<String>) -> Self {
        Self::UnusedOverride {
            label: label.into(),
            type_name: type_name::<T>(),
        }
    }

    /// Create a provider failure for `T`.
    #[must_use]
    pub fn provider_failed<T: ?Sized>(source: impl Into<BoxError>) -> Self {
        Self::ProviderFailed {
            type_name: type_name::<T>(),
            source: source.into(),
        }
    }

    /// The type name carried by this error, when there is one.
    #[must_use]
    pub const fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::NoProviderRegisteredForType { type_name }
            | Self::UnusedOverride { type_name, .. }
            | Self::RecursionLimitExceeded { type_name, .. }
            | Self::ProviderFailed { type_name, .. } => Some(type_name),
            Self::OverrideTypeMismatch { expected, .. } => Some(expected),
        }
    }
}

/// Result type for fixture resolution.
pub type ResolutionResult<T> = Result<T, ResolutionError>;
