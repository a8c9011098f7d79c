//! Random generation of terms and states for property-based tests.

use quickcheck::{Arbitrary, Gen};

use crate::{
    term::{Jump, Term},
    vm::state::{StateBuilder, SymbolicState},
};

/// The variables that generated terms may refer to.
pub const VARIABLES: [&str; 3] = ["a", "b", "x"];

/// The maximum nesting of generated terms.
const MAX_DEPTH: usize = 4;

impl Arbitrary for Jump {
    fn arbitrary(g: &mut Gen) -> Self {
        Jump::new(u32::from(u8::arbitrary(g) % 2))
    }
}

impl Arbitrary for Term {
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_term(g, MAX_DEPTH)
    }
}

/// A state that binds every one of [`VARIABLES`] to a generated term, so that
/// any generated term can be substituted in it.
#[derive(Clone, Debug)]
pub struct BoundState(pub SymbolicState);

impl Arbitrary for BoundState {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut builder = StateBuilder::new();
        for (index, variable) in VARIABLES.iter().enumerate() {
            let value = if bool::arbitrary(g) {
                Term::var(format!("@p{index}"))
            } else {
                arbitrary_value(g, 2)
            };
            builder.bind(*variable, value);
        }
        if bool::arbitrary(g) {
            builder.constrain(Term::not_equal(Term::var("@p0"), Term::constant(0)));
        }

        BoundState(builder.build())
    }
}

/// Generates a small integer constant, so that equal constants are common.
fn arbitrary_constant(g: &mut Gen) -> Term {
    Term::constant(i64::from(i8::arbitrary(g) % 4))
}

/// Generates a leaf term.
fn arbitrary_leaf(g: &mut Gen) -> Term {
    match u8::arbitrary(g) % 5 {
        0 | 1 => arbitrary_constant(g),
        2 => Term::var(*g.choose(&VARIABLES).unwrap_or(&"a")),
        3 => Term::True,
        _ => Term::False,
    }
}

/// Generates an integer-valued term of at most `depth` nesting.
fn arbitrary_value(g: &mut Gen, depth: usize) -> Term {
    if depth == 0 {
        return arbitrary_leaf(g);
    }
    let next = depth - 1;
    match u8::arbitrary(g) % 5 {
        0 => Term::plus(arbitrary_value(g, next), arbitrary_value(g, next)),
        1 => Term::minus(arbitrary_value(g, next), arbitrary_value(g, next)),
        2 => Term::mul(arbitrary_value(g, next), arbitrary_value(g, next)),
        _ => arbitrary_leaf(g),
    }
}

/// Generates a boolean-valued term of at most `depth` nesting.
fn arbitrary_condition(g: &mut Gen, depth: usize) -> Term {
    let next = depth.saturating_sub(1);
    match u8::arbitrary(g) % 5 {
        0 => Term::equal(arbitrary_value(g, next), arbitrary_value(g, next)),
        1 => Term::not_equal(arbitrary_value(g, next), arbitrary_value(g, next)),
        2 if depth > 0 => Term::negate(arbitrary_condition(g, next)),
        3 => Term::True,
        _ => Term::False,
    }
}

/// Generates any term of at most `depth` nesting.
pub fn arbitrary_term(g: &mut Gen, depth: usize) -> Term {
    let next = depth.saturating_sub(1);
    match u8::arbitrary(g) % 7 {
        0 => Term::branch(arbitrary_condition(g, next)),
        1 => Term::bind(*g.choose(&VARIABLES).unwrap_or(&"a"), arbitrary_value(g, next)),
        2 => Term::ret(arbitrary_value(g, next)),
        3 => Term::jump(Jump::arbitrary(g)),
        4 => arbitrary_condition(g, depth),
        _ => arbitrary_value(g, depth),
    }
}

/// Generates a branch whose condition stays symbolic after constant folding,
/// because it compares a parameter against a constant.
pub fn symbolic_branch(g: &mut Gen) -> Term {
    let condition = if bool::arbitrary(g) {
        Term::equal(Term::var("a"), arbitrary_constant(g))
    } else {
        Term::not_equal(Term::var("a"), arbitrary_constant(g))
    };
    Term::branch(condition)
}
