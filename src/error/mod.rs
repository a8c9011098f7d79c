//! This module contains the primary error type for the library's interface. It
//! also re-exports the more specific error types that are subsystem-specific.

pub mod container;
pub mod execution;
pub mod translation;

use thiserror::Error;

/// The interface result type for the library.
///
/// # Usage
///
/// Any function considered to be part of the public interface of the library
/// should return this result type. Subsystems should return the more-specific
/// child error types as appropriate.
pub type Result<T> = std::result::Result<T, LocatedError>;

/// The interface error type for the library.
///
/// All errors returned from the library interface (and hence encountered by the
/// clients of the library) should be members of this enum. Every one of them is
/// fatal to the translation that produced it.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Errors from the transition engine.
    #[error(transparent)]
    Execution(#[from] execution::Error),

    /// Errors from mapping program syntax onto symbolic terms.
    #[error(transparent)]
    Translation(#[from] translation::Error),
}

/// Make it possible to attach locations to these errors.
impl container::Locatable for Error {
    type Located = LocatedError;

    fn locate(self, node: usize) -> Self::Located {
        container::Located {
            location: node,
            payload:  self,
        }
    }
}

/// A library error with an associated execution tree location.
pub type LocatedError = container::Located<Error>;

/// Allow simple conversions from located execution errors by re-wrapping the
/// located error around the more general payload.
impl From<execution::LocatedError> for LocatedError {
    fn from(value: execution::LocatedError) -> Self {
        Self {
            location: value.location,
            payload:  Error::from(value.payload),
        }
    }
}

/// Allow simple conversions from located translation errors by re-wrapping the
/// located error around the more general payload.
impl From<translation::LocatedError> for LocatedError {
    fn from(value: translation::LocatedError) -> Self {
        Self {
            location: value.location,
            payload:  Error::from(value.payload),
        }
    }
}
