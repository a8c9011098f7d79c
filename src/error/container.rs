//! This module contains the wrapper that attaches an execution tree location to
//! an error.

use std::fmt::Formatter;

use thiserror::Error;

/// An error that is localised to a particular node of the execution tree.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct Located<E>
where
    E: Clone,
{
    /// The index of the tree node that was being expanded when the error
    /// occurred.
    ///
    /// Nodes are numbered in the order they are created, so the root is `0`.
    pub location: usize,

    /// The error data
    pub payload: E,
}

/// Displays the error alongside the index of the node where it occurred.
impl<E> std::fmt::Display for Located<E>
where
    E: std::fmt::Display + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[node {}]: {}", self.location, self.payload)
    }
}

/// A trait for types that can have a tree location attached to them.
pub trait Locatable
where
    Self: Sized,
{
    /// The return type with the attached location.
    type Located;

    /// Attach the location described by `node` (the index of a node in the
    /// execution tree) to the error.
    fn locate(self, node: usize) -> Self::Located;
}

/// A blanket implementation that allows for attaching a location to any result.
impl<T, E> Locatable for Result<T, E>
where
    E: std::error::Error + Clone,
{
    type Located = Result<T, Located<E>>;

    fn locate(self, node: usize) -> Self::Located {
        self.map_err(|e| Located {
            location: node,
            payload:  e,
        })
    }
}
