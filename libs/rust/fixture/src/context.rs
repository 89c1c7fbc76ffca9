//! Resolution context handed to providers and self-describing types.

use crate::config::PreferredFormat;
use crate::error::{ResolutionError, ResolutionResult};
use crate::fixture::Fixture;
use crate::overrides::Overrides;
use crate::resolvable::Resolvable;
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use tracing::trace;

/// Provides child values while a provider or [`crate::FixtureProviding`]
/// implementation builds its value.
///
/// One context exists per requested value. The overrides it carries are
/// only visible to labelled requests made directly through it; every child
/// value that is not overridden is resolved in a fresh context with no
/// overrides.
pub struct ValueProvider<'a> {
    fixture: &'a Fixture,
    overrides: &'a Overrides,
    target_type: &'static str,
    root_type: &'static str,
    depth: usize,
    consumed: BTreeSet<String>,
}

impl<'a> ValueProvider<'a> {
    pub(crate) const fn new(
        fixture: &'a Fixture,
        overrides: &'a Overrides,
        target_type: &'static str,
        depth: usize,
    ) -> Self {
        Self {
            fixture,
            overrides,
            target_type,
            root_type: target_type,
            depth,
            consumed: BTreeSet::new(),
        }
    }

    /// Mark this context as part of resolving the top-level type `root_type`.
    pub(crate) fn within(mut self, root_type: &'static str) -> Self {
        self.root_type = root_type;
        self
    }

    /// Get a child value for the field named `label`.
    ///
    /// If an override was supplied for `label` it is used, otherwise the
    /// value is resolved by the fixture.
    ///
    /// ```
    /// use rust_fixture::{Fixture, ResolutionResult, ValueProvider};
    ///
    /// struct User {
    ///     name: String,
    ///     is_active: bool,
    /// }
    ///
    /// impl rust_fixture::Resolvable for User {}
    ///
    /// let fixture = Fixture::new();
    /// fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<User> {
    ///     Ok(User {
    ///         name: values.get("name")?,
    ///         is_active: values.get("is_active")?,
    ///     })
    /// });
    ///
    /// let user: User = fixture
    ///     .resolve(&rust_fixture::overrides! { "is_active" => true })
    ///     .unwrap();
    /// assert!(user.is_active);
    /// ```
    ///
    /// # Errors
    ///
    /// [`ResolutionError::OverrideTypeMismatch`] if the override cannot be
    /// represented as `T`, or any error raised while resolving `T`.
    pub fn get<T: Resolvable>(&mut self, label: &str) -> ResolutionResult<T> {
        if let Some(value) = self.overrides.get(label) {
            return match T::from_override(value.clone_any()) {
                Ok(value) => {
                    trace!(label, target = self.target_type, "using override");
                    self.consumed.insert(label.to_owned());
                    Ok(value)
                }
                Err(_) => Err(ResolutionError::override_type_mismatch::<T>(
                    label,
                    value.type_name(),
                )),
            };
        }

        self.unlabeled()
    }

    /// Get a child value that cannot be overridden.
    ///
    /// # Errors
    ///
    /// Any error raised while resolving `T`.
    pub fn unlabeled<T: Resolvable>(&mut self) -> ResolutionResult<T> {
        self.fixture.resolve_nested(self.root_type, self.depth + 1)
    }

    /// Resolve `T` in this context instead of a child context.
    ///
    /// Used by wrapper types whose value is their inner value, so that the
    /// overrides meant for the inner type stay visible to it.
    ///
    /// # Errors
    ///
    /// Any error raised while resolving `T`.
    pub fn resolve_in_place<T: Resolvable>(&mut self) -> ResolutionResult<T> {
        let fixture = self.fixture;
        if let Some(result) = fixture.registered::<T>(self) {
            trace!(type_name = std::any::type_name::<T>(), "resolved by registered provider");
            return result;
        }
        T::fallback(self)
    }

    /// Run `f` with the fixture's random generator.
    pub fn rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        self.fixture.with_rng(f)
    }

    /// The format preferred by the fixture's configuration.
    #[must_use]
    pub fn preferred_format(&self) -> PreferredFormat {
        self.fixture.config().preferred_format
    }

    /// The fixture that owns this context.
    #[must_use]
    pub const fn fixture(&self) -> &'a Fixture {
        self.fixture
    }

    /// The type this context was created for.
    #[must_use]
    pub const fn target_type(&self) -> &'static str {
        self.target_type
    }

    /// The top-level type whose resolution created this context.
    #[must_use]
    pub const fn root_type(&self) -> &'static str {
        self.root_type
    }

    /// Nesting depth; the top-level request is at depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn ensure_overrides_consumed(&self) -> ResolutionResult<()> {
        match self
            .overrides
            .labels()
            .find(|label| !self.consumed.contains(*label))
        {
            Some(label) => Err(ResolutionError::UnusedOverride {
                label: label.to_owned(),
                type_name: self.target_type,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixtureConfig;

    fn empty_fixture() -> Fixture {
        Fixture::with_config(FixtureConfig::default().without_defaults())
    }

    #[test]
    fn test_get_prefers_override() {
        let fixture = empty_fixture();
        fixture.register_value(|| 1_u32);
        let overrides = Overrides::new().with("count", 9_u32);
        let mut values = ValueProvider::new(&fixture, &overrides, "Test", 0);

        assert_eq!(values.get::<u32>("count").ok(), Some(9));
        assert_eq!(values.get::<u32>("other").ok(), Some(1));
        assert!(values.ensure_overrides_consumed().is_ok());
    }

    #[test]
    fn test_same_label_can_be_read_twice() {
        let fixture = empty_fixture();
        let overrides = Overrides::new().with("name", "bar".to_string());
        let mut values = ValueProvider::new(&fixture, &overrides, "Test", 0);

        assert_eq!(values.get::<String>("name").ok().as_deref(), Some("bar"));
        assert_eq!(values.get::<String>("name").ok().as_deref(), Some("bar"));
    }

    #[test]
    fn test_get_reports_mismatch() {
        let fixture = empty_fixture();
        let overrides = Overrides::new().with("name", 1_i32);
        let mut values = ValueProvider::new(&fixture, &overrides, "Test", 0);

        let err = values.get::<String>("name").err();
        assert!(matches!(
            err,
            Some(ResolutionError::OverrideTypeMismatch { actual: "i32", .. })
        ));
    }

    #[test]
    fn test_unused_override_is_lexicographically_first() {
        let fixture = empty_fixture();
        let overrides = Overrides::new().with("zeta", 1_u8).with("alpha", 2_u8);
        let values = ValueProvider::new(&fixture, &overrides, "Test", 0);

        match values.ensure_overrides_consumed() {
            Err(ResolutionError::UnusedOverride { label, type_name }) => {
                assert_eq!(label, "alpha");
                assert_eq!(type_name, "Test");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_children_are_one_level_deeper() {
        let fixture = empty_fixture();
        fixture.register(|values: &mut ValueProvider<'_>| Ok(values.depth()));
        let overrides = Overrides::new();
        let mut values = ValueProvider::new(&fixture, &overrides, "Test", 3);

        assert_eq!(values.unlabeled::<usize>().ok(), Some(4));
        assert_eq!(values.resolve_in_place::<usize>().ok(), Some(3));
    }

    #[test]
    fn test_children_remember_root_type() {
        let fixture = empty_fixture();
        fixture.register(|values: &mut ValueProvider<'_>| Ok(values.root_type().to_owned()));
        let overrides = Overrides::new();
        let mut values = ValueProvider::new(&fixture, &overrides, "Root", 0);

        assert_eq!(values.unlabeled::<String>().ok().as_deref(), Some("Root"));
        assert_eq!(values.root_type(), "Root");
    }
}
