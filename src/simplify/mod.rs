//! This module contains the type definitions for the pluggable term simplifier
//! that the transition engine applies after substitution.
//!
//! # Idempotence
//!
//! Every [`Simplifier`] must be idempotent: simplifying an already-simplified
//! term must return it unchanged. The transition engine relies on this when it
//! simplifies terms whose subterms came out of earlier steps.

pub mod constant_folding;

use std::{fmt::Debug, rc::Rc};

pub use constant_folding::ConstantFolder;

use crate::term::Term;

/// A dynamically dispatched [`Simplifier`] instance.
pub type DynSimplifier = Rc<dyn Simplifier>;

/// The interface to a rewriting pass over terms.
pub trait Simplifier
where
    Self: Debug,
{
    /// Rewrites `term` into an equivalent, simpler, term.
    #[must_use]
    fn simplify(&self, term: &Term) -> Term;
}

/// An implementation of the [`Simplifier`] trait that leaves every term as it
/// is.
///
/// It is useful where the raw symbolic form of the terms is wanted, as no
/// branch is ever collapsed under it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NoopSimplifier;

impl NoopSimplifier {
    /// Wraps `self` into an [`Rc`].
    #[must_use]
    pub fn in_rc(self) -> DynSimplifier {
        Rc::new(self)
    }
}

impl Simplifier for NoopSimplifier {
    fn simplify(&self, term: &Term) -> Term {
        term.clone()
    }
}
