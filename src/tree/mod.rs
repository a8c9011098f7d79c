//! This module contains the execution tree: the product of translating a
//! program, recording every reachable symbolic state.

pub(crate) mod builder;

use serde::Serialize;

use crate::{term::Term, vm::state::SymbolicState};

/// A node of the execution tree, and through its children the whole subtree
/// below it.
///
/// Each node holds the state reached at that point of the program and the term
/// that is executed from it. The number of children describes what happened
/// next:
///
/// - none: the path ended, usually in a `return`;
/// - one: a step that did not branch, or a branch whose condition was decided;
/// - two: a branch, with the "then" outcome first and the "else" outcome
///   second.
///
/// Along any path from the root, the constraints of a node extend the
/// constraints of each of its ancestors.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ExecutionTree {
    /// The state at this node.
    state: SymbolicState,

    /// The term executed from this node's state, if any was.
    #[serde(skip_serializing_if = "Option::is_none")]
    term: Option<Term>,

    /// The nodes reached by executing `term`.
    children: Vec<ExecutionTree>,
}

impl ExecutionTree {
    /// Constructs a tree node from its parts.
    #[must_use]
    pub fn new(state: SymbolicState, term: Option<Term>, children: Vec<ExecutionTree>) -> Self {
        Self {
            state,
            term,
            children,
        }
    }

    /// Gets the state at this node.
    #[must_use]
    pub fn state(&self) -> &SymbolicState {
        &self.state
    }

    /// Gets the term executed from this node, which is [`None`] only for a
    /// leaf at the end of a program that does not return.
    #[must_use]
    pub fn term(&self) -> Option<&Term> {
        self.term.as_ref()
    }

    /// Gets the children of this node in order.
    #[must_use]
    pub fn children(&self) -> &[ExecutionTree] {
        self.children.as_slice()
    }

    /// Checks if no path continues past this node.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Checks if this node forks into two outcomes.
    #[must_use]
    pub fn is_branching(&self) -> bool {
        self.children.len() > 1
    }

    /// Gets the number of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ExecutionTree::node_count).sum::<usize>()
    }

    /// Gets the terminal nodes of this subtree, ordered with "then" outcomes
    /// before "else" outcomes.
    #[must_use]
    pub fn leaves(&self) -> Vec<&ExecutionTree> {
        self.nodes().filter(|node| node.is_terminal()).collect()
    }

    /// Gets the largest number of branching nodes on any path from this node
    /// to a leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        let below = self.children.iter().map(ExecutionTree::depth).max().unwrap_or(0);
        below + usize::from(self.is_branching())
    }

    /// Iterates over the nodes of this subtree in pre-order, visiting the
    /// "then" subtree of a branch before its "else" subtree.
    pub fn nodes(&self) -> impl Iterator<Item = &ExecutionTree> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
