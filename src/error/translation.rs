//! This module contains errors pertaining to turning program syntax into
//! symbolic terms.

use thiserror::Error;

use crate::error::container;

/// Errors that occur when the [`crate::translator::Translator`] maps an AST
/// node onto the term model.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("A `{kind}` node has no symbolic term in this position")]
    UnsupportedTerm { kind: &'static str },
}

/// A translation error with an associated location in the execution tree.
pub type LocatedError = container::Located<Error>;

/// The result type for methods that may have translation errors.
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
