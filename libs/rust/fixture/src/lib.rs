//! Type-keyed registry for resolving synthetic test fixture values.
//!
//! This crate provides:
//! - A per-instance registry of providers keyed by type
//! - Recursive resolution of child values with per-call named overrides
//! - Detection of overrides that were mistyped or never used
//! - Fallbacks for self-describing types, closed-choice enums, raw-value
//!   wrappers, optionals and collections
//! - Default providers for primitive, time, identifier and URL types
//! - Declarative macros that generate provider boilerplate
//!
//! ```
//! use rust_fixture::{Fixture, overrides, provide_fixture};
//!
//! struct User {
//!     id: uuid::Uuid,
//!     name: String,
//!     is_active: bool,
//! }
//!
//! provide_fixture!(User { id, name, is_active });
//!
//! let fixture = Fixture::new();
//! let user: User = fixture
//!     .resolve(&overrides! { "name" => "John Appleseed", "is_active" => true })
//!     .unwrap();
//! assert_eq!(user.name, "John Appleseed");
//! assert!(user.is_active);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod fallback;
pub mod fixture;
pub mod logging;
mod macros;
pub mod overrides;
pub mod providing;
pub mod registry;
pub mod resolvable;

pub use config::{FixtureConfig, PreferredFormat};
pub use context::ValueProvider;
pub use error::{ResolutionError, ResolutionResult};
pub use fixture::Fixture;
pub use overrides::Overrides;
pub use providing::{ClosedChoice, FixtureProviding, RawRepresentable};
pub use registry::{Provider, ProviderRegistry, TypeKey};
pub use resolvable::Resolvable;
