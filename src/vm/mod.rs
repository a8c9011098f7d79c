//! This module contains the symbolic virtual machine: the transition engine
//! that steps a symbolic state over a single term.

pub mod state;

use log::trace;

use crate::{
    error::execution::{Error, Result},
    simplify::DynSimplifier,
    term::{Jump, Term},
    vm::state::SymbolicState,
};

/// The virtual machine used to compute the symbolic successors of a state.
///
/// Its one operation is the stepping relation `state × term -> [state]`. It
/// holds no per-run data, so one instance can be shared by any number of
/// translations.
#[derive(Clone, Debug)]
pub struct VM {
    /// The rewriting pass applied to every term after substitution.
    simplifier: DynSimplifier,
}

impl VM {
    /// Constructs a new virtual machine that simplifies terms with
    /// `simplifier`.
    #[must_use]
    pub fn new(simplifier: DynSimplifier) -> Self {
        Self { simplifier }
    }

    /// Computes the states that follow from executing `term` in `state`.
    ///
    /// The term is first substituted with the bindings of `state` and then
    /// simplified. What happens next depends on the shape of the result:
    ///
    /// - A [`Term::If`] forks into exactly two successors. The first carries
    ///   the condition as a new constraint and is tagged with the "then" jump,
    ///   and the second carries its negation and is tagged with the "else"
    ///   jump. Storage is unchanged in both.
    /// - A [`Term::Let`] yields one successor with the variable rebound.
    /// - A [`Term::Jump`], which is what a branch on a decided condition
    ///   simplifies to, yields the unchanged state tagged with that jump.
    /// - Anything else yields the unchanged state with no tag.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `term` refers to a variable that is not bound in
    /// `state`.
    pub fn next_states(&self, state: &SymbolicState, term: &Term) -> Result<Vec<Successor>> {
        let substituted = term.substitute(state.storage())?;
        let simplified = self.simplifier.simplify(&substituted);
        trace!("Simplified `{term}` to `{simplified}`");

        let successors = match simplified {
            Term::If {
                condition,
                then_jump,
                else_jump,
            } => {
                let mut then_state = state.builder();
                then_state.constrain((*condition).clone());

                let mut else_state = state.builder();
                else_state.constrain(Term::negate(*condition));

                vec![
                    Successor::new(then_state.build(), Some(then_jump)),
                    Successor::new(else_state.build(), Some(else_jump)),
                ]
            }
            Term::Let { variable, value } => {
                let mut new_state = state.builder();
                new_state.bind(variable, *value);
                vec![Successor::new(new_state.build(), None)]
            }
            Term::Jump { jump } => vec![Successor::new(state.clone(), Some(jump))],
            _ => vec![Successor::new(state.clone(), None)],
        };

        trace!("Stepped `{term}` into {} successor(s)", successors.len());

        Ok(successors)
    }

    /// Computes the single state that follows from executing the non-branching
    /// `term` in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `term` refers to an unbound variable, or if stepping
    /// it produced anything other than exactly one successor.
    pub fn next_state(&self, state: &SymbolicState, term: &Term) -> Result<Successor> {
        let mut successors = self.next_states(state, term)?;
        match successors.len() {
            1 => Ok(successors.remove(0)),
            count => Err(Error::UnexpectedBranching { successors: count }),
        }
    }
}

/// A state produced by the [`VM`], together with the branch outcome it belongs
/// to if the step was a branch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Successor {
    /// The new state.
    state: SymbolicState,

    /// The branch outcome, if there was one.
    jump: Option<Jump>,
}

impl Successor {
    /// Constructs a successor of `state` tagged with `jump`.
    #[must_use]
    pub fn new(state: SymbolicState, jump: Option<Jump>) -> Self {
        Self { state, jump }
    }

    /// Gets the new state.
    #[must_use]
    pub fn state(&self) -> &SymbolicState {
        &self.state
    }

    /// Gets the branch outcome that this successor belongs to.
    #[must_use]
    pub fn jump(&self) -> Option<Jump> {
        self.jump
    }

    /// Splits the successor into its state and branch outcome.
    #[must_use]
    pub fn into_parts(self) -> (SymbolicState, Option<Jump>) {
        (self.state, self.jump)
    }
}

impl From<Successor> for SymbolicState {
    fn from(value: Successor) -> Self {
        value.state
    }
}
