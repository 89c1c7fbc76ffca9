//! The fixture: provider registration and value resolution.

use crate::config::FixtureConfig;
use crate::context::ValueProvider;
use crate::defaults;
use crate::error::{ResolutionError, ResolutionResult};
use crate::overrides::Overrides;
use crate::registry::{Provider, ProviderRegistry, TypeKey};
use crate::resolvable::Resolvable;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A factory for vending fixture values for use in tests.
///
/// Values are resolved in this order, first success wins:
///
/// 1. an override supplied for the requested label
/// 2. a provider registered for the exact type
/// 3. the type's own fallback: self-description, a raw value, a random
///    case, absence for `Option`, or a single-element or empty collection
///
/// ```
/// use rust_fixture::{Fixture, FixtureConfig, overrides, provide_fixture};
///
/// #[derive(Debug, PartialEq)]
/// struct Pair {
///     id: i64,
///     name: String,
/// }
///
/// provide_fixture!(Pair { id, name });
///
/// let fixture = Fixture::with_config(FixtureConfig::default().without_defaults());
/// fixture.register_value(|| 42_i64);
/// fixture.register_value(|| "foo".to_string());
///
/// let pair: Pair = fixture.value().unwrap();
/// assert_eq!(pair, Pair { id: 42, name: "foo".into() });
///
/// let pair: Pair = fixture.resolve(&overrides! { "name" => "bar" }).unwrap();
/// assert_eq!(pair.name, "bar");
///
/// assert!(fixture.resolve::<Pair>(&overrides! { "unused" => true }).is_err());
/// ```
pub struct Fixture {
    registry: ProviderRegistry,
    config: FixtureConfig,
    rng: Mutex<StdRng>,
}

impl Fixture {
    /// Create a fixture with the default configuration and default providers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FixtureConfig::default())
    }

    /// Create a fixture with the given configuration.
    #[must_use]
    pub fn with_config(config: FixtureConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let fixture = Self {
            registry: ProviderRegistry::new(),
            config,
            rng: Mutex::new(rng),
        };
        if fixture.config.register_defaults {
            defaults::register_default_providers(&fixture);
        }
        fixture
    }

    /// The configuration this fixture was created with.
    #[must_use]
    pub const fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Register a provider for `T` that resolves child values.
    ///
    /// If the same type is registered more than once, the last provider wins.
    pub fn register<T, F>(&self, provide: F)
    where
        T: 'static,
        F: Fn(&mut ValueProvider<'_>) -> ResolutionResult<T> + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        let provider: Provider = Arc::new(move |values: &mut ValueProvider<'_>| {
            provide(values).map(|value| Box::new(value) as Box<dyn Any>)
        });
        let replaced = self.registry.register(key, provider);
        debug!(type_name = key.name(), replaced, "registered fixture provider");
    }

    /// Register a plain value factory for `T`.
    pub fn register_value<T, F>(&self, provide: F)
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(move |_| Ok(provide()));
    }

    /// Whether a provider is registered for exactly `T`.
    #[must_use]
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(&TypeKey::of::<T>())
    }

    /// Number of registered providers.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    /// Resolve a value of `T` without overrides.
    ///
    /// # Errors
    ///
    /// Any [`ResolutionError`] raised while resolving `T`.
    pub fn value<T: Resolvable>(&self) -> ResolutionResult<T> {
        self.resolve(&Overrides::new())
    }

    /// Resolve a value of `T`, using `overrides` for the fields it requests.
    ///
    /// Every override must be consumed while building the value.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::UnusedOverride`] if an override was never
    /// requested, or any error raised while resolving `T`.
    pub fn resolve<T: Resolvable>(&self, overrides: &Overrides) -> ResolutionResult<T> {
        let mut values = ValueProvider::new(self, overrides, type_name::<T>(), 0);
        let value = values.resolve_in_place::<T>()?;
        values.ensure_overrides_consumed()?;
        Ok(value)
    }

    /// Resolve `count` independent values of `T` with the same overrides.
    ///
    /// # Errors
    ///
    /// The first error raised by any of the resolutions.
    pub fn resolve_many<T: Resolvable>(
        &self,
        count: usize,
        overrides: &Overrides,
    ) -> ResolutionResult<Vec<T>> {
        (0..count).map(|_| self.resolve(overrides)).collect()
    }

    pub(crate) fn resolve_nested<T: Resolvable>(
        &self,
        root_type: &'static str,
        depth: usize,
    ) -> ResolutionResult<T> {
        if depth > self.config.max_depth {
            return Err(ResolutionError::RecursionLimitExceeded {
                type_name: type_name::<T>(),
                requested: root_type,
                limit: self.config.max_depth,
            });
        }
        trace!(type_name = type_name::<T>(), depth, "resolving child value");
        let overrides = Overrides::new();
        let mut values =
            ValueProvider::new(self, &overrides, type_name::<T>(), depth).within(root_type);
        values.resolve_in_place()
    }

    pub(crate) fn registered<T: 'static>(
        &self,
        values: &mut ValueProvider<'_>,
    ) -> Option<ResolutionResult<T>> {
        let provider = self.registry.lookup(&TypeKey::of::<T>())?;
        Some(provider(values).and_then(|value| {
            value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| ResolutionError::no_provider::<T>())
        }))
    }

    pub(crate) fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        f(&mut self.rng.lock())
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixture")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
