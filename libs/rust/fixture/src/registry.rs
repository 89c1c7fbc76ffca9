//! Type-keyed provider storage.
//!
//! Providers are stored type-erased and keyed by [`TypeKey`]. The typed
//! layer in [`crate::Fixture`] captures the concrete type at registration
//! and downcasts on the way out.

use crate::context::ValueProvider;
use crate::error::ResolutionResult;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A type-erased provider closure.
pub type Provider =
    Arc<dyn Fn(&mut ValueProvider<'_>) -> ResolutionResult<Box<dyn Any>> + Send + Sync>;

/// Stable identity of a type.
///
/// Equality and hashing use only the [`TypeId`], so two nominally distinct
/// types with identical fields never collide. The name is kept for messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// The key for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The fully qualified type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying type id.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Mapping from [`TypeKey`] to [`Provider`].
///
/// Reads may happen concurrently; writes are serialized by the lock.
/// Re-registering a key replaces the previous provider.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<TypeKey, Provider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the provider for `key`.
    ///
    /// Returns `true` if a previous provider was replaced.
    pub fn register(&self, key: TypeKey, provider: Provider) -> bool {
        self.providers.write().insert(key, provider).is_some()
    }

    /// Look up the provider for `key`.
    ///
    /// The lock is released before the provider is returned, so callers may
    /// invoke it while it resolves other values through this registry.
    #[must_use]
    pub fn lookup(&self, key: &TypeKey) -> Option<Provider> {
        self.providers.read().get(key).cloned()
    }

    /// Check whether a provider exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.providers.read().contains_key(key)
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// Whether no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers = self.providers.read();
        let mut names: Vec<_> = providers.keys().map(TypeKey::name).collect();
        names.sort_unstable();
        f.debug_struct("ProviderRegistry")
            .field("types", &names)
            .finish()
    }
}
