//! The state representation for the symbolic virtual machine, and utilities for
//! deriving new states from existing ones.

pub mod constraints;
pub mod storage;

use serde::Serialize;

use crate::{
    term::Term,
    vm::state::{constraints::Constraints, storage::Storage},
};

/// An immutable snapshot of one program state: what every variable denotes,
/// and the path condition under which the state is reachable.
///
/// New states are only ever derived through a [`StateBuilder`], which shares
/// all unchanged structure with the state it started from.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SymbolicState {
    /// The variable bindings.
    storage: Storage,

    /// The accumulated path constraints.
    constraints: Constraints,
}

impl SymbolicState {
    /// Constructs a state from its parts.
    #[must_use]
    pub fn new(storage: Storage, constraints: Constraints) -> Self {
        Self {
            storage,
            constraints,
        }
    }

    /// Gets the variable bindings of this state.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Gets the path constraints of this state.
    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Starts deriving a new state from this one.
    #[must_use]
    pub fn builder(&self) -> StateBuilder {
        StateBuilder::from(self)
    }
}

/// A short-lived accumulator of changes to a [`SymbolicState`].
///
/// Starting a builder from a state is `O(1)`, as is finishing it. Only the
/// modified parts of the storage and constraints are copied.
#[derive(Clone, Debug, Default)]
pub struct StateBuilder {
    storage:     Storage,
    constraints: Constraints,
}

impl StateBuilder {
    /// Creates a builder for a state with no bindings and no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `variable` to `value`, replacing any existing binding.
    pub fn bind(&mut self, variable: impl Into<String>, value: Term) -> &mut Self {
        self.storage.insert(variable, value);
        self
    }

    /// Appends `constraint` to the path condition.
    pub fn constrain(&mut self, constraint: Term) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Drops every variable that is not bound in `scope`, returning the names
    /// of the dropped variables.
    pub fn retain_bound_in(&mut self, scope: &Storage) -> Vec<String> {
        self.storage.retain_bound_in(scope)
    }

    /// Finishes the builder, producing the immutable state.
    #[must_use]
    pub fn build(self) -> SymbolicState {
        SymbolicState::new(self.storage, self.constraints)
    }
}

impl From<&SymbolicState> for StateBuilder {
    fn from(value: &SymbolicState) -> Self {
        Self {
            storage:     value.storage.clone(),
            constraints: value.constraints.clone(),
        }
    }
}
