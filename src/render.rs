//! This module contains the text rendering of terms, states and execution
//! trees.
//!
//! # Format
//!
//! Every tree node is rendered as a separator line followed by three lines
//! giving the path condition, the storage and the executed term:
//!
//! ```text
//! ────────
//! Pi: (@p0 != 0)
//! S: {a ↦ @p0, x ↦ 1}
//! Expr: return x
//! ```
//!
//! A run of nodes with one child each is printed at the same indentation. The
//! children of a branching node are drawn with tree connectors, "then" first.

use std::fmt::{self, Display, Formatter, Write};

use itertools::Itertools;

use crate::{
    constant::{
        BINDING_SYMBOL,
        CHILD_CONNECTOR,
        CHILD_CONTINUATION,
        CONJUNCTION_SYMBOL,
        LAST_CHILD_CONNECTOR,
        LAST_CHILD_CONTINUATION,
        NODE_SEPARATOR,
    },
    term::Term,
    tree::ExecutionTree,
    vm::state::{constraints::Constraints, storage::Storage},
};

/// Renders `tree` into its textual form.
///
/// The output is a pure function of the tree, so identical trees always render
/// to identical text.
#[must_use]
pub fn render(tree: &ExecutionTree) -> String {
    tree.to_string()
}

/// Writes `term` in infix notation.
///
/// Binary operations are wrapped in parentheses when `nested` is set, which is
/// the case for operands of other binary operations and of `!`.
fn write_term(f: &mut impl Write, term: &Term, nested: bool) -> fmt::Result {
    match term {
        Term::Const { value } => write!(f, "{value}"),
        Term::Var { name } => f.write_str(name),
        Term::Let { variable, value } => write!(f, "{variable} = {value}"),
        Term::Plus { left, right } => write_operation(f, left, "+", right, nested),
        Term::Minus { left, right } => write_operation(f, left, "-", right, nested),
        Term::Mul { left, right } => write_operation(f, left, "*", right, nested),
        Term::Eq { left, right } => write_operation(f, left, "==", right, nested),
        Term::NEq { left, right } => write_operation(f, left, "!=", right, nested),
        Term::Not { expr } => write!(f, "!{}", Nested(expr)),
        Term::If { condition, .. } => write!(f, "if ({condition})"),
        Term::Jump { jump } => write!(f, "Jump child {}", jump.local_id()),
        Term::Return { expr } => write!(f, "return {expr}"),
        Term::True => f.write_str("true"),
        Term::False => f.write_str("false"),
    }
}

/// Writes the binary operation `left op right`.
fn write_operation(
    f: &mut impl Write,
    left: &Term,
    op: &str,
    right: &Term,
    nested: bool,
) -> fmt::Result {
    if nested {
        write!(f, "({} {op} {})", Nested(left), Nested(right))
    } else {
        write!(f, "{} {op} {}", Nested(left), Nested(right))
    }
}

/// A term displayed in operand position.
struct Nested<'a>(&'a Term);

impl Display for Nested<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_term(f, self.0, true)
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_term(f, self, false)
    }
}

/// Renders the bindings in the order they were made, as `{a ↦ @p0, x ↦ 1}`.
impl Display for Storage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bindings = self
            .iter()
            .map(|(name, term)| format!("{name} {BINDING_SYMBOL} {term}"))
            .join(", ");
        write!(f, "{{{bindings}}}")
    }
}

/// Renders the path condition as the conjunction of the constraints, or as
/// `true` if there are none.
impl Display for Constraints {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("true");
        }

        let separator = format!(" {CONJUNCTION_SYMBOL} ");
        write!(f, "{}", self.iter().map(Nested).join(&separator))
    }
}

impl Display for ExecutionTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_subtree(f, self, "", "")
    }
}

/// Writes `node` and everything below it.
///
/// The first line of the node is preceded by `prefix`, and every other line of
/// the subtree by `children_prefix`.
fn write_subtree(
    f: &mut impl Write,
    node: &ExecutionTree,
    prefix: &str,
    children_prefix: &str,
) -> fmt::Result {
    write_node(f, node, prefix, children_prefix)?;

    let mut last = node;
    while let [only] = last.children() {
        write_node(f, only, children_prefix, children_prefix)?;
        last = only;
    }

    let count = last.children().len();
    for (index, child) in last.children().iter().enumerate() {
        let (connector, continuation) = if index + 1 == count {
            (LAST_CHILD_CONNECTOR, LAST_CHILD_CONTINUATION)
        } else {
            (CHILD_CONNECTOR, CHILD_CONTINUATION)
        };
        write_subtree(
            f,
            child,
            &format!("{children_prefix}{connector}"),
            &format!("{children_prefix}{continuation}"),
        )?;
    }

    Ok(())
}

/// Writes the four lines describing a single node.
fn write_node(
    f: &mut impl Write,
    node: &ExecutionTree,
    prefix: &str,
    children_prefix: &str,
) -> fmt::Result {
    let state = node.state();
    writeln!(f, "{prefix}{NODE_SEPARATOR}")?;
    writeln!(f, "{children_prefix}Pi: {}", state.constraints())?;
    writeln!(f, "{children_prefix}S: {}", state.storage())?;
    match node.term() {
        Some(term) => writeln!(f, "{children_prefix}Expr: {term}"),
        None => writeln!(f, "{children_prefix}Expr: null"),
    }
}
