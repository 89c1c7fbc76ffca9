//! Sample fixture types.
//!
//! Each type exercises one way a value can be resolved: registration,
//! self-description, closed choice, raw values, optionals, collections and
//! self-reference.

use chrono::{DateTime, Utc};
use rust_fixture::{
    ClosedChoice, Fixture, FixtureConfig, FixtureProviding, RawRepresentable, ResolutionResult,
    Resolvable, ValueProvider, closed_choice, fallback, provide_fixture, register,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Two fields resolved by self-description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

provide_fixture!(Pair { id, name });

/// A user registered explicitly with [`register_sample_providers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Whether the account is active
    pub is_active: bool,
}

impl Resolvable for User {}

/// An item owned by a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Title
    pub title: String,
    /// Owner
    pub owner: User,
}

impl Resolvable for Item {}

/// A group resolved by self-description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Identifier
    pub id: Uuid,
    /// Title
    pub title: String,
}

provide_fixture!(Group { id, title });

/// An office built through its constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Office {
    /// Identifier
    pub id: Uuid,
    /// Name
    pub name: String,
    /// Staff members
    pub staff: Vec<User>,
}

impl Office {
    /// Create an office.
    #[must_use]
    pub const fn new(id: Uuid, name: String, staff: Vec<User>) -> Self {
        Self { id, name, staff }
    }
}

provide_fixture!(Office = Office::new(id, name, staff));

/// A type nothing can provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisteredType;

impl Resolvable for UnregisteredType {}

/// A closed choice of colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
}

closed_choice!(Color { Red, Green, Blue });

/// A closed choice with no cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyChoice {}

impl ClosedChoice for EmptyChoice {
    fn all_cases() -> Vec<Self> {
        Vec::new()
    }
}

impl Resolvable for EmptyChoice {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        fallback::any_case(values)
    }
}

/// A string wrapper resolved from the registered `String` provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringRepresentable(pub String);

impl RawRepresentable for StringRepresentable {
    type Raw = String;

    fn from_raw(raw: String) -> Option<Self> {
        Some(Self(raw))
    }
}

impl Resolvable for StringRepresentable {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        fallback::raw_value(values)
    }
}

/// A wrapper whose raw type has no provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedUnregistered(pub UnregisteredType);

impl RawRepresentable for WrappedUnregistered {
    type Raw = UnregisteredType;

    fn from_raw(raw: UnregisteredType) -> Option<Self> {
        Some(Self(raw))
    }
}

impl Resolvable for WrappedUnregistered {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        fallback::raw_value(values)
    }
}

/// A card suit backed by a `char`, falling back to a random case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    /// Hearts
    Hearts,
    /// Spades
    Spades,
    /// Clubs
    Clubs,
    /// Diamonds
    Diamonds,
}

impl ClosedChoice for Suit {
    fn all_cases() -> Vec<Self> {
        vec![Self::Hearts, Self::Spades, Self::Clubs, Self::Diamonds]
    }
}

impl RawRepresentable for Suit {
    type Raw = char;

    fn from_raw(raw: char) -> Option<Self> {
        match raw {
            'h' => Some(Self::Hearts),
            's' => Some(Self::Spades),
            'c' => Some(Self::Clubs),
            'd' => Some(Self::Diamonds),
            _ => None,
        }
    }
}

impl Resolvable for Suit {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        fallback::raw_value_or_any_case(values)
    }
}

/// Optional and collection fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Optional nickname
    pub nickname: Option<String>,
    /// Optional field nothing can provide
    pub unregistered: Option<UnregisteredType>,
    /// Tags
    pub tags: Vec<String>,
    /// Colors that were picked
    pub colors: std::collections::BTreeSet<Color>,
    /// Scores by name
    pub scores: std::collections::HashMap<String, u32>,
    /// Things nothing can provide
    pub missing: Vec<UnregisteredType>,
}

provide_fixture!(Profile {
    nickname,
    unregistered,
    tags,
    colors,
    scores,
    missing,
});

/// A self-referential type with no registered provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Payload
    pub value: i32,
    /// Next node
    pub next: Option<Box<Node>>,
}

provide_fixture!(Node { value, next });

/// Wraps a [`Pair`] so that the pair's fields sit one level down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Label
    pub label: String,
    /// Nested pair
    pub pair: Pair,
}

impl FixtureProviding for Envelope {
    fn provide_fixture(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        Ok(Self {
            label: values.get("label")?,
            pair: values.get("pair")?,
        })
    }
}

impl Resolvable for Envelope {
    fn fallback(values: &mut ValueProvider<'_>) -> ResolutionResult<Self> {
        fallback::self_described(values)
    }
}

/// Register the providers for [`User`] and [`Item`].
pub fn register_sample_providers(fixture: &Fixture) {
    register!(fixture, User { id, name, created_at, is_active });
    register!(fixture, Item { title, owner });
}

/// A fixture without defaults that provides `i64 => 42` and `String => "foo"`.
#[must_use]
pub fn pair_fixture() -> Fixture {
    let fixture = Fixture::with_config(FixtureConfig::default().without_defaults());
    fixture.register_value(|| 42_i64);
    fixture.register_value(|| "foo".to_string());
    fixture
}

/// A fixture with default providers and the sample providers registered.
#[must_use]
pub fn sample_fixture() -> Fixture {
    let fixture = Fixture::new();
    register_sample_providers(&fixture);
    fixture
}
