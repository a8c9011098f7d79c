//! This module contains the abstract syntax of the input programs that can be
//! translated into an execution tree.
//!
//! The syntax is deliberately small: sequences, assignments, conditionals on
//! (in)equality, integer arithmetic, and `return`. It can be built in code with
//! the constructor functions in this module, or loaded from JSON through its
//! [`serde`] representation, where each node is an object tagged by its
//! `kind`.
//!
//! ```
//! use symbolic_execution_tree::ast::{assign, block, constant, ret, var};
//!
//! // x = 1; return x
//! let program = block([assign("x", constant(1)), ret(var("x"))]);
//! assert_eq!(program.kind(), "block");
//! ```

use serde::{Deserialize, Serialize};

/// A node in the syntax tree of an input program.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// A sequence of sub-programs executed in order.
    ///
    /// A block is also a scope: variables first assigned inside it are dropped
    /// when it finishes.
    Block { exprs: Vec<Expr> },

    /// An integer literal.
    Const { value: i64 },

    /// A reference to a named variable.
    Var { name: String },

    /// Binds `variable` to the value of `value`.
    Let { variable: String, value: Box<Expr> },

    /// A conditional with a required "then" body and an optional "else" body.
    ///
    /// The `condition` must be an [`Expr::Eq`] or [`Expr::NEq`].
    If {
        condition:   Box<Expr>,
        then_branch: Box<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_branch: Option<Box<Expr>>,
    },

    /// Integer addition.
    Plus { left: Box<Expr>, right: Box<Expr> },

    /// Integer subtraction.
    Minus { left: Box<Expr>, right: Box<Expr> },

    /// Integer multiplication.
    Mul { left: Box<Expr>, right: Box<Expr> },

    /// Ends the current path, yielding the value of `expr`.
    Return { expr: Box<Expr> },

    /// Equality between two values.
    Eq { left: Box<Expr>, right: Box<Expr> },

    /// Inequality between two values.
    #[serde(rename = "neq")]
    NEq { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    /// Gets the name of this node's kind, matching its `kind` tag in the
    /// serialized form.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Block { .. } => "block",
            Self::Const { .. } => "const",
            Self::Var { .. } => "var",
            Self::Let { .. } => "let",
            Self::If { .. } => "if",
            Self::Plus { .. } => "plus",
            Self::Minus { .. } => "minus",
            Self::Mul { .. } => "mul",
            Self::Return { .. } => "return",
            Self::Eq { .. } => "eq",
            Self::NEq { .. } => "neq",
        }
    }

    /// Checks if this node is a condition that a conditional can branch on.
    #[must_use]
    pub fn is_condition(&self) -> bool {
        matches!(self, Self::Eq { .. } | Self::NEq { .. })
    }
}

/// Constructs a block from the sub-programs in `exprs`.
pub fn block(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    let exprs = exprs.into_iter().collect();
    Expr::Block { exprs }
}

/// Constructs an integer literal.
#[must_use]
pub fn constant(value: i64) -> Expr {
    Expr::Const { value }
}

/// Constructs a reference to the variable `name`.
pub fn var(name: impl Into<String>) -> Expr {
    let name = name.into();
    Expr::Var { name }
}

/// Constructs the assignment `variable = value`.
pub fn assign(variable: impl Into<String>, value: Expr) -> Expr {
    let variable = variable.into();
    let value = Box::new(value);
    Expr::Let { variable, value }
}

/// Constructs a conditional without an "else" body.
#[must_use]
pub fn if_then(condition: Expr, then_branch: Expr) -> Expr {
    Expr::If {
        condition:   Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
}

/// Constructs a conditional with both bodies.
#[must_use]
pub fn if_then_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    Expr::If {
        condition:   Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    }
}

/// Constructs `left + right`.
#[must_use]
pub fn plus(left: Expr, right: Expr) -> Expr {
    Expr::Plus {
        left:  Box::new(left),
        right: Box::new(right),
    }
}

/// Constructs `left - right`.
#[must_use]
pub fn minus(left: Expr, right: Expr) -> Expr {
    Expr::Minus {
        left:  Box::new(left),
        right: Box::new(right),
    }
}

/// Constructs `left * right`.
#[must_use]
pub fn mul(left: Expr, right: Expr) -> Expr {
    Expr::Mul {
        left:  Box::new(left),
        right: Box::new(right),
    }
}

/// Constructs `left == right`.
#[must_use]
pub fn eq(left: Expr, right: Expr) -> Expr {
    Expr::Eq {
        left:  Box::new(left),
        right: Box::new(right),
    }
}

/// Constructs `left != right`.
#[must_use]
pub fn neq(left: Expr, right: Expr) -> Expr {
    Expr::NEq {
        left:  Box::new(left),
        right: Box::new(right),
    }
}

/// Constructs `return expr`.
#[must_use]
pub fn ret(expr: Expr) -> Expr {
    Expr::Return {
        expr: Box::new(expr),
    }
}

#[cfg(test)]
mod test {
    use crate::ast::{assign, block, constant, if_then, neq, plus, ret, var, Expr};

    #[test]
    fn constructors_build_expected_nodes() {
        let program = block([assign("x", constant(1)), ret(var("x"))]);

        assert_eq!(
            program,
            Expr::Block {
                exprs: vec![
                    Expr::Let {
                        variable: "x".into(),
                        value:    Box::new(Expr::Const { value: 1 }),
                    },
                    Expr::Return {
                        expr: Box::new(Expr::Var { name: "x".into() }),
                    },
                ],
            }
        );
    }

    #[test]
    fn can_deserialize_tagged_program() -> anyhow::Result<()> {
        let json = r#"{
            "kind": "if",
            "condition": {
                "kind": "neq",
                "left": { "kind": "var", "name": "a" },
                "right": { "kind": "const", "value": 0 }
            },
            "then_branch": {
                "kind": "let",
                "variable": "a",
                "value": {
                    "kind": "plus",
                    "left": { "kind": "var", "name": "a" },
                    "right": { "kind": "const", "value": 1 }
                }
            }
        }"#;
        let program: Expr = serde_json::from_str(json)?;

        assert_eq!(
            program,
            if_then(
                neq(var("a"), constant(0)),
                assign("a", plus(var("a"), constant(1)))
            )
        );

        Ok(())
    }

    #[test]
    fn omits_missing_else_branch_when_serializing() -> anyhow::Result<()> {
        let program = if_then(neq(var("a"), constant(0)), ret(var("a")));
        let json = serde_json::to_value(&program)?;

        assert!(json.get("else_branch").is_none());
        assert_eq!(json["kind"], "if");

        Ok(())
    }

    #[test]
    fn only_comparisons_are_conditions() {
        assert!(neq(var("a"), constant(0)).is_condition());
        assert!(!plus(var("a"), constant(0)).is_condition());
        assert!(!block([]).is_condition());
    }
}
