//! This library builds the symbolic execution tree of a program written in a
//! small imperative language. Every path through the program is explored with
//! its inputs left symbolic, and the tree records, at each step, what every
//! variable denotes and under which path condition the step is reached.
//!
//! The language has integer constants and arithmetic, assignment, conditionals
//! on (in)equality with an optional "else", sequencing and `return`. It has no
//! loops or calls, so every tree is finite.
//!
//! # How it Works
//!
//! 1. A program is given as an [`ast::Expr`] along with the names of its
//!    parameters. Each parameter is bound to a fresh symbolic constant.
//! 2. The [`translator::Translator`] walks the program, mapping each statement
//!    onto a [`term::Term`].
//! 3. The [`vm::VM`] steps the current state over that term. It substitutes
//!    the bound variables, simplifies the result with a pluggable
//!    [`simplify::Simplifier`], and either updates the storage or forks on a
//!    conditional, appending the condition or its negation to the path
//!    constraints.
//! 4. The states reached are assembled into an [`tree::ExecutionTree`], which
//!    can be inspected directly or rendered as text with [`render::render`].
//!
//! # Basic Usage
//!
//! ```
//! use symbolic_execution_tree as set;
//! use symbolic_execution_tree::{
//!     ast::{assign, block, constant, if_then, neq, plus, ret, var},
//!     translator,
//! };
//!
//! // if (a != 0) { a = a + 1 }; return a
//! let program = block([
//!     if_then(neq(var("a"), constant(0)), assign("a", plus(var("a"), constant(1)))),
//!     ret(var("a")),
//! ]);
//!
//! let tree = set::new(translator::Config::default())
//!     .build_execution_tree(&program, &["a"])
//!     .unwrap();
//!
//! assert!(tree.is_branching());
//! assert_eq!(tree.leaves().len(), 2);
//! assert!(set::render(&tree).contains("Pi: !(@p0 != 0)"));
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod ast;
pub mod constant;
pub mod error;
pub mod render;
pub mod simplify;
pub mod term;
pub mod translator;
pub mod tree;
pub mod vm;

// Re-exports to provide the library interface.
pub use render::render;
pub use translator::new;
pub use tree::ExecutionTree;
