//! This module contains the definition of the [`Term`], the symbolic
//! representation of everything the transition engine executes, and its
//! supporting types.

#[cfg(test)]
pub(crate) mod arbitrary;

use serde::{Deserialize, Serialize};

use crate::{
    constant::{ELSE_BRANCH_LOCAL_ID, THEN_BRANCH_LOCAL_ID},
    error::execution::{Error, Result},
    vm::state::storage::Storage,
};

/// The type of a boxed term, used wherever a term contains another.
pub type BoxedTerm = Box<Term>;

/// A marker that identifies which outcome of a branch a successor state
/// belongs to.
///
/// Jumps never appear in input programs. They are produced for the two outcomes
/// of a [`Term::If`], and a conditional whose condition simplifies to a
/// concrete value collapses into the jump for the outcome that is taken.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Jump {
    local_id: u32,
}

impl Jump {
    /// The jump taken when a condition holds.
    pub const THEN: Self = Self::new(THEN_BRANCH_LOCAL_ID);

    /// The jump taken when a condition does not hold.
    pub const ELSE: Self = Self::new(ELSE_BRANCH_LOCAL_ID);

    /// Constructs a jump to the child with the provided `local_id`.
    #[must_use]
    pub const fn new(local_id: u32) -> Self {
        Self { local_id }
    }

    /// Gets the identifier of the child this jump selects, local to the
    /// instruction that produced it.
    #[must_use]
    pub fn local_id(&self) -> u32 {
        self.local_id
    }
}

/// A symbolic term.
///
/// Terms are immutable trees compared structurally. Arithmetic is over `i64`
/// and wraps on overflow.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    /// An integer constant.
    Const { value: i64 },

    /// A reference to a variable, or an uninterpreted symbolic constant.
    Var { name: String },

    /// Binding of `variable` to `value`.
    Let { variable: String, value: BoxedTerm },

    /// Addition of terms.
    Plus { left: BoxedTerm, right: BoxedTerm },

    /// Subtraction of terms.
    Minus { left: BoxedTerm, right: BoxedTerm },

    /// Multiplication of terms.
    Mul { left: BoxedTerm, right: BoxedTerm },

    /// Equality of terms.
    Eq { left: BoxedTerm, right: BoxedTerm },

    /// Inequality of terms.
    #[serde(rename = "neq")]
    NEq { left: BoxedTerm, right: BoxedTerm },

    /// Boolean negation.
    Not { expr: BoxedTerm },

    /// A two-way branch on `condition`.
    If {
        condition: BoxedTerm,
        then_jump: Jump,
        else_jump: Jump,
    },

    /// The outcome of a branch that has already been decided.
    Jump { jump: Jump },

    /// Ends a path with the value of `expr`.
    Return { expr: BoxedTerm },

    /// Boolean truth.
    True,

    /// Boolean falsity.
    False,
}

impl Term {
    /// Constructs an integer constant.
    #[must_use]
    pub fn constant(value: i64) -> Self {
        Self::Const { value }
    }

    /// Constructs a reference to the variable `name`.
    pub fn var(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Var { name }
    }

    /// Constructs a binding of `variable` to `value`.
    pub fn bind(variable: impl Into<String>, value: Term) -> Self {
        let variable = variable.into();
        let value = Box::new(value);
        Self::Let { variable, value }
    }

    /// Constructs `left + right`.
    #[must_use]
    pub fn plus(left: Term, right: Term) -> Self {
        Self::Plus {
            left:  Box::new(left),
            right: Box::new(right),
        }
    }

    /// Constructs `left - right`.
    #[must_use]
    pub fn minus(left: Term, right: Term) -> Self {
        Self::Minus {
            left:  Box::new(left),
            right: Box::new(right),
        }
    }

    /// Constructs `left * right`.
    #[must_use]
    pub fn mul(left: Term, right: Term) -> Self {
        Self::Mul {
            left:  Box::new(left),
            right: Box::new(right),
        }
    }

    /// Constructs `left == right`.
    #[must_use]
    pub fn equal(left: Term, right: Term) -> Self {
        Self::Eq {
            left:  Box::new(left),
            right: Box::new(right),
        }
    }

    /// Constructs `left != right`.
    #[must_use]
    pub fn not_equal(left: Term, right: Term) -> Self {
        Self::NEq {
            left:  Box::new(left),
            right: Box::new(right),
        }
    }

    /// Constructs `!expr`.
    #[must_use]
    pub fn negate(expr: Term) -> Self {
        let expr = Box::new(expr);
        Self::Not { expr }
    }

    /// Constructs a branch on `condition` with the standard
    /// [`Jump::THEN`] and [`Jump::ELSE`] outcomes.
    #[must_use]
    pub fn branch(condition: Term) -> Self {
        Self::If {
            condition: Box::new(condition),
            then_jump: Jump::THEN,
            else_jump: Jump::ELSE,
        }
    }

    /// Constructs a decided branch outcome.
    #[must_use]
    pub fn jump(jump: Jump) -> Self {
        Self::Jump { jump }
    }

    /// Constructs `return expr`.
    #[must_use]
    pub fn ret(expr: Term) -> Self {
        let expr = Box::new(expr);
        Self::Return { expr }
    }

    /// Constructs the boolean constant `value`.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    /// Checks if the term is a concrete value: an integer constant or a boolean
    /// constant.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Const { .. } | Self::True | Self::False)
    }

    /// Replaces every variable in the term with the term bound to it in
    /// `storage`.
    ///
    /// The replacement is not itself substituted again, as everything held in
    /// storage was already substituted when it was bound. Jumps and constants
    /// are left as they are, and the branch targets of an [`Term::If`] are
    /// preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariable`] if the term refers to a variable that
    /// has no binding in `storage`.
    pub fn substitute(&self, storage: &Storage) -> Result<Term> {
        let sub = |term: &BoxedTerm| term.substitute(storage).map(Box::new);

        let result = match self {
            Self::Var { name } => storage
                .get(name)
                .cloned()
                .ok_or_else(|| Error::UnknownVariable { name: name.clone() })?,
            Self::Let { variable, value } => Self::Let {
                variable: variable.clone(),
                value:    sub(value)?,
            },
            Self::Plus { left, right } => Self::Plus {
                left:  sub(left)?,
                right: sub(right)?,
            },
            Self::Minus { left, right } => Self::Minus {
                left:  sub(left)?,
                right: sub(right)?,
            },
            Self::Mul { left, right } => Self::Mul {
                left:  sub(left)?,
                right: sub(right)?,
            },
            Self::Eq { left, right } => Self::Eq {
                left:  sub(left)?,
                right: sub(right)?,
            },
            Self::NEq { left, right } => Self::NEq {
                left:  sub(left)?,
                right: sub(right)?,
            },
            Self::Not { expr } => Self::Not { expr: sub(expr)? },
            Self::If {
                condition,
                then_jump,
                else_jump,
            } => Self::If {
                condition: sub(condition)?,
                then_jump: *then_jump,
                else_jump: *else_jump,
            },
            Self::Return { expr } => Self::Return { expr: sub(expr)? },
            Self::Const { .. } | Self::Jump { .. } | Self::True | Self::False => self.clone(),
        };

        Ok(result)
    }
}
