//! Recording providers for testing.
//!
//! These wrap a value factory and count how often the fixture invokes it.

use parking_lot::Mutex;
use rust_fixture::{Fixture, ValueProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A provider that counts invocations and returns a fixed value.
#[derive(Debug, Clone)]
pub struct RecordingProvider<T> {
    value: T,
    calls: Arc<AtomicUsize>,
}

impl<T> RecordingProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a recording provider for `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Register this provider on `fixture`.
    pub fn install(&self, fixture: &Fixture) {
        let value = self.value.clone();
        let calls = Arc::clone(&self.calls);
        fixture.register_value(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            value.clone()
        });
    }

    /// Number of times the provider was invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A provider that returns the next value of a counter on each call.
#[derive(Debug, Clone, Default)]
pub struct SequenceProvider {
    next: Arc<AtomicUsize>,
}

impl SequenceProvider {
    /// Create a sequence starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this provider for `u64` on `fixture`.
    pub fn install(&self, fixture: &Fixture) {
        let next = Arc::clone(&self.next);
        fixture.register_value(move || next.fetch_add(1, Ordering::SeqCst) as u64);
    }
}

/// Records the depth and target type of every context a provider sees.
#[derive(Debug, Clone, Default)]
pub struct ContextRecorder {
    seen: Arc<Mutex<Vec<(usize, &'static str)>>>,
}

impl ContextRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recording provider for `T` that builds values with `build`.
    pub fn install<T, F>(&self, fixture: &Fixture, build: F)
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let seen = Arc::clone(&self.seen);
        fixture.register(move |values: &mut ValueProvider<'_>| {
            seen.lock().push((values.depth(), values.target_type()));
            Ok(build())
        });
    }

    /// Every recorded `(depth, target type)` pair in call order.
    #[must_use]
    pub fn seen(&self) -> Vec<(usize, &'static str)> {
        self.seen.lock().clone()
    }
}
