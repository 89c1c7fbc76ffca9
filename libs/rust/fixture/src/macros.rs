//! Declarative macros that save writing registration boilerplate.
//!
//! Every macro expands to the same public calls a hand-written
//! implementation would make: one [`crate::ValueProvider::get`] per named
//! argument, labelled with the argument's name.

/// Build a value by requesting one child value per argument.
///
/// Struct literal form, labelled by field name:
///
/// ```
/// use rust_fixture::{Fixture, ResolutionResult, ValueProvider, init_fixture};
///
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// fn provide(values: &mut ValueProvider<'_>) -> ResolutionResult<User> {
///     Ok(init_fixture!(values, User { id, name }))
/// }
/// ```
///
/// Constructor form, labelled by argument name; `_` requests a value that
/// cannot be overridden:
///
/// ```
/// use rust_fixture::{ResolutionResult, ValueProvider, init_fixture};
///
/// struct User {
///     id: u64,
///     name: String,
///     age: u8,
/// }
///
/// impl User {
///     fn new(name: String, id: u64, age: u8) -> Self {
///         Self { id, name, age }
///     }
/// }
///
/// fn provide(values: &mut ValueProvider<'_>) -> ResolutionResult<User> {
///     Ok(init_fixture!(values, User::new(name, _, age)))
/// }
/// ```
#[macro_export]
macro_rules! init_fixture {
    (@arg $values:ident, _) => {
        $values.unlabeled()?
    };
    (@arg $values:ident, $name:ident) => {
        $values.get(::core::stringify!($name))?
    };
    ($values:ident, $($ty:ident)::+ { $($field:ident),* $(,)? }) => {
        $($ty)::+ {
            $($field: $values.get(::core::stringify!($field))?),*
        }
    };
    ($values:ident, $($ctor:ident)::+ ( $($arg:tt),* $(,)? )) => {
        $($ctor)::+ ( $($crate::init_fixture!(@arg $values, $arg)),* )
    };
}

/// Implement [`crate::FixtureProviding`] and [`crate::Resolvable`] for a type.
///
/// ```
/// use rust_fixture::{Fixture, overrides, provide_fixture};
///
/// struct Group {
///     id: uuid::Uuid,
///     title: String,
/// }
///
/// provide_fixture!(Group { id, title });
///
/// let fixture = Fixture::new();
/// let group: Group = fixture.resolve(&overrides! { "title" => "Group Fixture" }).unwrap();
/// assert_eq!(group.title, "Group Fixture");
/// ```
///
/// A constructor may be named instead of a struct literal:
///
/// ```
/// use rust_fixture::provide_fixture;
///
/// struct Office {
///     name: String,
///     staff: Vec<String>,
/// }
///
/// impl Office {
///     fn new(name: String, staff: Vec<String>) -> Self {
///         Self { name, staff }
///     }
/// }
///
/// provide_fixture!(Office = Office::new(name, staff));
/// ```
#[macro_export]
macro_rules! provide_fixture {
    (@resolvable $ty:ident) => {
        impl $crate::Resolvable for $ty {
            fn fallback(
                values: &mut $crate::ValueProvider<'_>,
            ) -> $crate::ResolutionResult<Self> {
                $crate::fallback::self_described(values)
            }
        }
    };
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::FixtureProviding for $ty {
            fn provide_fixture(
                values: &mut $crate::ValueProvider<'_>,
            ) -> $crate::ResolutionResult<Self> {
                ::core::result::Result::Ok($crate::init_fixture!(values, $ty { $($field),* }))
            }
        }

        $crate::provide_fixture!(@resolvable $ty);
    };
    ($ty:ident = $($ctor:ident)::+ ( $($arg:tt),* $(,)? )) => {
        impl $crate::FixtureProviding for $ty {
            fn provide_fixture(
                values: &mut $crate::ValueProvider<'_>,
            ) -> $crate::ResolutionResult<Self> {
                ::core::result::Result::Ok($crate::init_fixture!(values, $($ctor)::+ ( $($arg),* )))
            }
        }

        $crate::provide_fixture!(@resolvable $ty);
    };
}

/// Register a provider on a fixture from a field or argument list.
///
/// ```
/// use rust_fixture::{Fixture, register};
///
/// struct Item {
///     title: String,
///     count: u32,
/// }
///
/// let fixture = Fixture::new();
/// register!(fixture, Item { title, count });
/// assert!(fixture.is_registered::<Item>());
/// ```
#[macro_export]
macro_rules! register {
    ($fixture:expr, $($ty:ident)::+ { $($field:ident),* $(,)? }) => {
        $fixture.register(|values: &mut $crate::ValueProvider<'_>| {
            ::core::result::Result::Ok($crate::init_fixture!(values, $($ty)::+ { $($field),* }))
        })
    };
    ($fixture:expr, $($ctor:ident)::+ ( $($arg:tt),* $(,)? )) => {
        $fixture.register(|values: &mut $crate::ValueProvider<'_>| {
            ::core::result::Result::Ok($crate::init_fixture!(values, $($ctor)::+ ( $($arg),* )))
        })
    };
}

/// Implement [`crate::ClosedChoice`] and [`crate::Resolvable`] for a
/// fieldless enum, so that unregistered requests pick a random case.
///
/// ```
/// use rust_fixture::{Fixture, closed_choice};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color {
///     Red,
///     Green,
///     Blue,
/// }
///
/// closed_choice!(Color { Red, Green, Blue });
///
/// let color: Color = Fixture::new().value().unwrap();
/// assert!([Color::Red, Color::Green, Color::Blue].contains(&color));
/// ```
#[macro_export]
macro_rules! closed_choice {
    ($ty:ident { $($case:ident),* $(,)? }) => {
        impl $crate::ClosedChoice for $ty {
            fn all_cases() -> ::std::vec::Vec<Self> {
                ::std::vec![$($ty::$case),*]
            }
        }

        impl $crate::Resolvable for $ty {
            fn fallback(
                values: &mut $crate::ValueProvider<'_>,
            ) -> $crate::ResolutionResult<Self> {
                $crate::fallback::any_case(values)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Fixture, FixtureConfig, Overrides, ResolutionResult, ValueProvider};

    #[derive(Debug, PartialEq)]
    struct User {
        id: i64,
        name: String,
        age: u8,
    }

    impl User {
        fn new(name: String, id: i64, age: u8) -> Self {
            Self { id, name, age }
        }
    }

    impl crate::Resolvable for User {}

    #[derive(Debug, PartialEq)]
    struct Team {
        name: String,
        lead: User,
    }

    crate::provide_fixture!(Team = Team::new_team(name, lead));

    impl Team {
        fn new_team(name: String, lead: User) -> Self {
            Self { name, lead }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Low,
        High,
    }

    crate::closed_choice!(Level { Low, High });

    fn fixture() -> Fixture {
        let fixture = Fixture::with_config(FixtureConfig::default().without_defaults());
        fixture.register_value(|| 1_i64);
        fixture.register_value(|| 2_u8);
        fixture.register_value(|| "foo".to_string());
        fixture
    }

    #[test]
    fn test_init_fixture_struct_literal() {
        let fixture = fixture();
        let overrides = Overrides::new().with("age", 30_u8);
        let mut values = ValueProvider::new(&fixture, &overrides, "User", 0);
        let build = |values: &mut ValueProvider<'_>| -> ResolutionResult<User> {
            Ok(crate::init_fixture!(values, User { id, name, age }))
        };
        assert_eq!(
            build(&mut values).ok(),
            Some(User {
                id: 1,
                name: "foo".to_string(),
                age: 30
            })
        );
    }

    #[test]
    fn test_init_fixture_unlabeled_argument_ignores_override() {
        let fixture = fixture();
        let overrides = Overrides::new().with("id", 9_i64);
        let mut values = ValueProvider::new(&fixture, &overrides, "User", 0);
        let build = |values: &mut ValueProvider<'_>| -> ResolutionResult<User> {
            Ok(crate::init_fixture!(values, User::new(name, _, age)))
        };
        assert_eq!(build(&mut values).map(|user| user.id).ok(), Some(1));
        assert!(values.ensure_overrides_consumed().is_err());
    }

    #[test]
    fn test_register_macro() {
        let fixture = fixture();
        crate::register!(fixture, User::new(name, id, age));
        let user = fixture.resolve::<User>(&Overrides::new().with("name", "John"));
        assert_eq!(user.map(|user| user.name).ok().as_deref(), Some("John"));
    }

    #[test]
    fn test_provide_fixture_constructor_form() {
        let fixture = fixture();
        crate::register!(fixture, User { id, name, age });
        let team = fixture.resolve::<Team>(&Overrides::new().with("name", "core"));
        let team = team.ok();
        assert_eq!(team.as_ref().map(|team| team.name.as_str()), Some("core"));
        assert_eq!(team.map(|team| team.lead.name), Some("foo".to_string()));
    }

    #[test]
    fn test_closed_choice_macro() {
        let level = fixture().value::<Level>();
        assert!(matches!(level, Ok(Level::Low | Level::High)));
    }
}
