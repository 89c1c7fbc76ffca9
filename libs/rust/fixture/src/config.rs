//! Fixture configuration.

/// Environment variable used to seed the random generator of a [`crate::Fixture`].
pub const SEED_ENV_VAR: &str = "FIXTURE_SEED";

/// The preferred format of values vended by the default providers.
///
/// Only the default providers are guaranteed to honor this; custom
/// providers are free to ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreferredFormat {
    /// Prefer random values
    #[default]
    Random,
    /// Prefer a constant value for each type
    Constant,
}

/// Fixture configuration.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Format used by the default providers
    pub preferred_format: PreferredFormat,
    /// Maximum depth of nested value requests before resolution fails
    pub max_depth: usize,
    /// Seed for the random generator; entropy is used when absent
    pub seed: Option<u64>,
    /// Whether default providers are registered at construction
    pub register_defaults: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            preferred_format: PreferredFormat::Random,
            max_depth: 64,
            seed: std::env::var(SEED_ENV_VAR)
                .ok()
                .and_then(|seed| seed.trim().parse().ok()),
            register_defaults: true,
        }
    }
}

impl FixtureConfig {
    /// Set the preferred format.
    #[must_use]
    pub const fn with_preferred_format(mut self, format: PreferredFormat) -> Self {
        self.preferred_format = format;
        self
    }

    /// Set the maximum nesting depth (at least 1).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Seed the random generator.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Skip registration of the default providers.
    #[must_use]
    pub const fn without_defaults(mut self) -> Self {
        self.register_defaults = false;
        self
    }
}
