//! This module contains errors pertaining to stepping symbolic states with the
//! transition engine.

use thiserror::Error;

use crate::error::container;

/// Errors that occur when the [`crate::vm::VM`] computes successor states.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("The variable `{name}` is used before it is bound")]
    UnknownVariable { name: String },

    #[error("Expected a single successor state but the step produced {successors}")]
    UnexpectedBranching { successors: usize },
}

/// An execution error with an associated location in the execution tree.
pub type LocatedError = container::Located<Error>;

/// The result type for methods that may have execution errors.
pub type Result<T> = std::result::Result<T, Error>;

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
