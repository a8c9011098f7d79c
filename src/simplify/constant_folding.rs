//! This module contains the constant-folding simplifier.

use std::rc::Rc;

use crate::{
    simplify::{DynSimplifier, Simplifier},
    term::{BoxedTerm, Term},
};

/// A [`Simplifier`] that evaluates every operation whose operands are concrete.
///
/// Simplification is a single bottom-up pass:
///
/// - `+`, `-` and `*` over two integer constants fold to their (wrapping)
///   result.
/// - `==` and `!=` over two concrete operands fold to a boolean by structural
///   equality, so `1 == true` is `false`.
/// - `!` flips a boolean constant.
/// - A branch on a boolean constant collapses to the jump of the outcome that
///   is taken.
///
/// Anything else is rebuilt from its simplified children. As no rule produces
/// a term that another rule could fire on, the pass is idempotent.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ConstantFolder;

impl ConstantFolder {
    /// Wraps `self` into an [`Rc`].
    #[must_use]
    pub fn in_rc(self) -> DynSimplifier {
        Rc::new(self)
    }

    /// Simplifies both operands of a binary operation.
    fn operands(&self, left: &BoxedTerm, right: &BoxedTerm) -> (Term, Term) {
        (self.simplify(left), self.simplify(right))
    }

    /// Folds an arithmetic operation when both operands are integer constants,
    /// and otherwise rebuilds it with `rebuild`.
    fn arithmetic(
        &self,
        left: &BoxedTerm,
        right: &BoxedTerm,
        fold: impl FnOnce(i64, i64) -> i64,
        rebuild: impl FnOnce(Term, Term) -> Term,
    ) -> Term {
        match self.operands(left, right) {
            (Term::Const { value: l }, Term::Const { value: r }) => Term::constant(fold(l, r)),
            (left, right) => rebuild(left, right),
        }
    }

    /// Folds a comparison when both operands are concrete, and otherwise
    /// rebuilds it with `rebuild`.
    ///
    /// The `equal` flag says whether equal operands make the comparison hold.
    fn comparison(
        &self,
        left: &BoxedTerm,
        right: &BoxedTerm,
        equal: bool,
        rebuild: impl FnOnce(Term, Term) -> Term,
    ) -> Term {
        let (left, right) = self.operands(left, right);
        if left.is_concrete() && right.is_concrete() {
            Term::boolean((left == right) == equal)
        } else {
            rebuild(left, right)
        }
    }
}

impl Simplifier for ConstantFolder {
    fn simplify(&self, term: &Term) -> Term {
        match term {
            Term::Plus { left, right } => {
                self.arithmetic(left, right, i64::wrapping_add, Term::plus)
            }
            Term::Minus { left, right } => {
                self.arithmetic(left, right, i64::wrapping_sub, Term::minus)
            }
            Term::Mul { left, right } => self.arithmetic(left, right, i64::wrapping_mul, Term::mul),
            Term::Eq { left, right } => self.comparison(left, right, true, Term::equal),
            Term::NEq { left, right } => self.comparison(left, right, false, Term::not_equal),
            Term::Not { expr } => match self.simplify(expr) {
                Term::True => Term::False,
                Term::False => Term::True,
                other => Term::negate(other),
            },
            Term::If {
                condition,
                then_jump,
                else_jump,
            } => match self.simplify(condition) {
                Term::True => Term::jump(*then_jump),
                Term::False => Term::jump(*else_jump),
                other => Term::If {
                    condition: Box::new(other),
                    then_jump: *then_jump,
                    else_jump: *else_jump,
                },
            },
            Term::Let { variable, value } => Term::bind(variable.clone(), self.simplify(value)),
            Term::Return { expr } => Term::ret(self.simplify(expr)),
            Term::Const { .. } | Term::Var { .. } | Term::Jump { .. } | Term::True | Term::False => {
                term.clone()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use quickcheck::{quickcheck, TestResult};

    use crate::{
        simplify::{ConstantFolder, Simplifier},
        term::{Jump, Term},
    };

    fn simplify(term: &Term) -> Term {
        ConstantFolder.simplify(term)
    }

    #[test]
    fn folds_nested_arithmetic() {
        // 2 * (3 + 1) - 5
        let term = Term::minus(
            Term::mul(
                Term::constant(2),
                Term::plus(Term::constant(3), Term::constant(1)),
            ),
            Term::constant(5),
        );
        assert_eq!(simplify(&term), Term::constant(3));
    }

    #[test]
    fn keeps_symbolic_arithmetic() {
        // 3 + x stays, but its folded operand is replaced.
        let term = Term::plus(
            Term::plus(Term::constant(1), Term::constant(2)),
            Term::var("x"),
        );
        assert_eq!(
            simplify(&term),
            Term::plus(Term::constant(3), Term::var("x"))
        );
    }

    #[test]
    fn wraps_on_overflow() {
        let term = Term::plus(Term::constant(i64::MAX), Term::constant(1));
        assert_eq!(simplify(&term), Term::constant(i64::MIN));
    }

    #[test]
    fn folds_comparisons_by_structure() {
        let one = Term::constant(1);
        let cases = [
            (Term::equal(one.clone(), one.clone()), Term::True),
            (Term::not_equal(one.clone(), one.clone()), Term::False),
            (Term::equal(one.clone(), Term::constant(2)), Term::False),
            (Term::not_equal(one.clone(), Term::constant(2)), Term::True),
            (Term::equal(one.clone(), Term::True), Term::False),
            (Term::equal(Term::False, Term::False), Term::True),
        ];

        for (term, expected) in cases {
            assert_eq!(simplify(&term), expected, "simplifying {term:?}");
        }
    }

    #[test]
    fn keeps_symbolic_comparisons() {
        let term = Term::not_equal(Term::var("@p0"), Term::minus(Term::constant(1), Term::constant(1)));
        assert_eq!(
            simplify(&term),
            Term::not_equal(Term::var("@p0"), Term::constant(0))
        );
    }

    #[test]
    fn flips_negated_constants() {
        assert_eq!(simplify(&Term::negate(Term::True)), Term::False);
        assert_eq!(
            simplify(&Term::negate(Term::equal(Term::constant(0), Term::constant(1)))),
            Term::True
        );

        let symbolic = Term::negate(Term::equal(Term::var("a"), Term::constant(1)));
        assert_eq!(simplify(&symbolic), symbolic);
    }

    #[test]
    fn collapses_decided_branches() {
        let taken = Term::branch(Term::equal(Term::constant(4), Term::constant(4)));
        let not_taken = Term::branch(Term::not_equal(Term::constant(4), Term::constant(4)));

        assert_eq!(simplify(&taken), Term::jump(Jump::THEN));
        assert_eq!(simplify(&not_taken), Term::jump(Jump::ELSE));
    }

    #[test]
    fn collapses_to_custom_branch_targets() {
        let term = Term::If {
            condition: Box::new(Term::False),
            then_jump: Jump::new(3),
            else_jump: Jump::new(8),
        };
        assert_eq!(simplify(&term), Term::jump(Jump::new(8)));
    }

    #[test]
    fn keeps_undecided_branches() {
        let term = Term::branch(Term::equal(
            Term::var("@p1"),
            Term::mul(Term::constant(0), Term::constant(9)),
        ));
        assert_eq!(
            simplify(&term),
            Term::branch(Term::equal(Term::var("@p1"), Term::constant(0)))
        );
    }

    #[test]
    fn simplifies_inside_bindings_and_returns() {
        let binding = Term::bind("y", Term::plus(Term::constant(3), Term::constant(1)));
        let ret = Term::ret(Term::minus(Term::constant(1), Term::constant(4)));

        assert_eq!(simplify(&binding), Term::bind("y", Term::constant(4)));
        assert_eq!(simplify(&ret), Term::ret(Term::constant(-3)));
    }

    quickcheck! {
        fn is_idempotent(term: Term) -> bool {
            let once = simplify(&term);
            simplify(&once) == once
        }

        fn folds_arithmetic_exactly(l: i64, r: i64) -> bool {
            let (cl, cr) = (Term::constant(l), Term::constant(r));
            simplify(&Term::plus(cl.clone(), cr.clone())) == Term::constant(l.wrapping_add(r))
                && simplify(&Term::minus(cl.clone(), cr.clone())) == Term::constant(l.wrapping_sub(r))
                && simplify(&Term::mul(cl, cr)) == Term::constant(l.wrapping_mul(r))
        }

        fn folds_comparisons_consistently(l: i64, r: i64) -> bool {
            let (cl, cr) = (Term::constant(l), Term::constant(r));
            simplify(&Term::equal(cl.clone(), cr.clone())) == Term::boolean(l == r)
                && simplify(&Term::not_equal(cl, cr)) == Term::boolean(l != r)
        }

        fn decided_branches_become_jumps(holds: bool) -> TestResult {
            let condition = if holds { Term::True } else { Term::False };
            match simplify(&Term::branch(condition)) {
                Term::Jump { jump } => TestResult::from_bool(
                    jump == if holds { Jump::THEN } else { Jump::ELSE },
                ),
                _ => TestResult::failed(),
            }
        }
    }
}
