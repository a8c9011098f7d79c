//! This module contains the definition of the path constraints accumulated by a
//! symbolic state.

use imbl::Vector;
use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::term::Term;

/// The ordered sequence of boolean terms whose conjunction is the path
/// condition of a state.
///
/// Constraints are only ever appended. Like [`super::storage::Storage`], the
/// sequence is persistent, so a fork appends to a shared prefix rather than
/// copying it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Constraints {
    data: Vector<Term>,
}

impl Constraints {
    /// Creates an empty constraint sequence, the path condition `true`.
    #[must_use]
    pub fn new() -> Self {
        let data = Vector::new();
        Self { data }
    }

    /// Appends `constraint` to the sequence.
    pub fn push(&mut self, constraint: Term) {
        self.data.push_back(constraint);
    }

    /// Gets the constraints in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.data.iter()
    }

    /// Gets the most recently added constraint, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Term> {
        self.data.last()
    }

    /// Gets the number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if there are no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if this sequence is a prefix of `other`, which is the case for
    /// the constraints of any ancestor of a node in an execution tree.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Constraints) -> bool {
        self.len() <= other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

/// Serializes as a sequence in the order the constraints were added.
impl Serialize for Constraints {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for constraint in self.iter() {
            seq.serialize_element(constraint)?;
        }
        seq.end()
    }
}
