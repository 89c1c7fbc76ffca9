//! Helpers shared by the end-to-end fixture tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_fixture::{ResolutionError, ResolutionResult};
use tracing::debug;

/// Install logging for a test and name the scenario being run.
pub fn scenario(name: &str) {
    rust_fixture::logging::init_test_logging();
    debug!(scenario = name, "starting fixture scenario");
}

/// The label of an [`ResolutionError::UnusedOverride`], if that is what `result` holds.
pub fn unused_label<T>(result: &ResolutionResult<T>) -> Option<&str> {
    match result {
        Err(ResolutionError::UnusedOverride { label, .. }) => Some(label.as_str()),
        _ => None,
    }
}

/// The label and supplied type of an [`ResolutionError::OverrideTypeMismatch`].
pub fn mismatch<T>(result: &ResolutionResult<T>) -> Option<(&str, &'static str)> {
    match result {
        Err(ResolutionError::OverrideTypeMismatch { label, actual, .. }) => {
            Some((label.as_str(), *actual))
        }
        _ => None,
    }
}

/// Whether `result` failed because no provider could produce a value.
pub fn is_no_provider<T>(result: &ResolutionResult<T>) -> bool {
    result.as_ref().is_err_and(ResolutionError::is_no_provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_match_their_variant() {
        let unused: ResolutionResult<()> = Err(ResolutionError::unused_override::<u8>("x"));
        assert_eq!(unused_label(&unused), Some("x"));
        assert_eq!(mismatch(&unused), None);
        assert!(!is_no_provider(&unused));

        let missing: ResolutionResult<()> = Err(ResolutionError::no_provider::<u8>());
        assert!(is_no_provider(&missing));
        assert_eq!(unused_label(&missing), None);
    }
}
