//! Shared test utilities for rust-fixture.
//!
//! This crate provides:
//! - Proptest generators for override labels and values
//! - Recording providers for observing provider invocations
//! - Sample fixture types covering every resolution path

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod mocks;
pub mod fixtures;

pub use generators::*;
