use std::fmt;

use pdbtbx::PDBError;
use polars::prelude::PolarsError;

use crate::radii::RadiiError;
use crate::surface::AccessibilityError;

/// Error type for structure-level calculations and output.
#[derive(Debug)]
pub enum Error {
    /// The surface calculation failed
    Surface(AccessibilityError),
    /// The radii table could not be loaded
    Radii(RadiiError),
    /// The structure file could not be parsed
    Structure(Vec<PDBError>),
    /// A result table could not be built or written
    DataFrame(PolarsError),
    /// An input or output file could not be accessed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Surface(e) => write!(f, "{e}"),
            Error::Radii(e) => write!(f, "{e}"),
            Error::Structure(errors) => {
                write!(f, "Failed to read structure")?;
                for e in errors {
                    write!(f, "\n  {e}")?;
                }
                Ok(())
            }
            Error::DataFrame(e) => write!(f, "Failed to build result table: {e}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Surface(e) => Some(e),
            Error::Radii(e) => Some(e),
            Error::Structure(_) => None,
            Error::DataFrame(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<AccessibilityError> for Error {
    fn from(err: AccessibilityError) -> Self {
        Error::Surface(err)
    }
}

impl From<RadiiError> for Error {
    fn from(err: RadiiError) -> Self {
        Error::Radii(err)
    }
}

impl From<PolarsError> for Error {
    fn from(err: PolarsError) -> Self {
        Error::DataFrame(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
