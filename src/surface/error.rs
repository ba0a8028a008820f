//! Errors of the surface calculation.

use std::collections::TryReserveError;
use std::fmt;

/// Error type for the surface calculation.
///
/// Running out of memory while allocating or growing scratch storage is the
/// only failure; degenerate geometry never produces an error.
#[derive(Debug)]
pub enum AccessibilityError {
    /// A scratch buffer could not be allocated or grown
    Allocation(TryReserveError),
}

impl fmt::Display for AccessibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessibilityError::Allocation(e) => write!(f, "Failed to allocate scratch space: {e}"),
        }
    }
}

impl std::error::Error for AccessibilityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccessibilityError::Allocation(e) => Some(e),
        }
    }
}

impl From<TryReserveError> for AccessibilityError {
    fn from(err: TryReserveError) -> Self {
        AccessibilityError::Allocation(err)
    }
}
