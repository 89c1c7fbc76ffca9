//! Default providers for common types.
//!
//! These are registered through the same public [`Fixture::register`] call
//! a test author would use, so any of them can be replaced.

use crate::config::PreferredFormat;
use crate::context::ValueProvider;
use crate::error::{ResolutionError, ResolutionResult};
use crate::fixture::Fixture;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

const CONSTANT_URL: &str = "https://www.example.com/";
const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

macro_rules! register_integers {
    ($fixture:expr, $($ty:ty),* $(,)?) => {
        $(
            $fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<$ty> {
                Ok(match values.preferred_format() {
                    PreferredFormat::Random => values.rng(|rng| rng.gen_range(0..=<$ty>::MAX)),
                    PreferredFormat::Constant => 0,
                })
            });
        )*
    };
}

/// Register providers for primitive, time, identifier and URL types.
pub fn register_default_providers(fixture: &Fixture) {
    register_integers!(
        fixture, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    );

    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<f32> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(|rng| rng.r#gen::<f32>() * f32::MAX),
            PreferredFormat::Constant => 0.0,
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<f64> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(|rng| rng.r#gen::<f64>() * f64::MAX),
            PreferredFormat::Constant => 0.0,
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<bool> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(|rng| rng.r#gen()),
            PreferredFormat::Constant => false,
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<char> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values
                .rng(|rng| char::from_digit(rng.gen_range(0..16), 16))
                .unwrap_or('0'),
            PreferredFormat::Constant => 'a',
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<String> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(random_uuid).to_string(),
            PreferredFormat::Constant => String::new(),
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<Uuid> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(random_uuid),
            PreferredFormat::Constant => Uuid::nil(),
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<DateTime<Utc>> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(random_instant),
            PreferredFormat::Constant => DateTime::default(),
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<NaiveDate> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => values.rng(random_instant).date_naive(),
            PreferredFormat::Constant => NaiveDate::default(),
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<Duration> {
        Ok(match values.preferred_format() {
            PreferredFormat::Random => {
                Duration::from_secs(values.rng(|rng| rng.gen_range(0..=MAX_DURATION_SECS)))
            }
            PreferredFormat::Constant => Duration::ZERO,
        })
    });
    fixture.register(|values: &mut ValueProvider<'_>| -> ResolutionResult<Url> {
        let url = match values.preferred_format() {
            PreferredFormat::Random => format!("https://www.{}.com/", values.rng(random_uuid)),
            PreferredFormat::Constant => CONSTANT_URL.to_string(),
        };
        Url::parse(&url).map_err(ResolutionError::provider_failed::<Url>)
    });
}

fn random_uuid(rng: &mut StdRng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

/// A whole-second instant between the epoch and now.
fn random_instant(rng: &mut StdRng) -> DateTime<Utc> {
    let now = Utc::now().timestamp().max(0);
    DateTime::from_timestamp(rng.gen_range(0..=now), 0).unwrap_or_default()
}
