//! This module contains the arena in which an execution tree is assembled
//! before it is frozen into an [`ExecutionTree`].

use crate::{
    term::Term,
    tree::ExecutionTree,
    vm::state::{StateBuilder, SymbolicState},
};

/// A handle to a node in a [`TreeBuilder`].
///
/// Handles are only produced by the builder that owns the node, and their
/// index is the order in which the node was created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    /// Gets the creation index of the node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node that is still being built.
#[derive(Debug, Default)]
struct PendingNode {
    state:    SymbolicState,
    term:     Option<Term>,
    children: Vec<NodeId>,
}

/// An arena of nodes addressed by [`NodeId`].
///
/// A node's state may be replaced while the node is still an open leaf, which
/// is how variables are dropped on leaving a scope. Once the tree is finished
/// nothing about it can change.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<PendingNode>,
}

impl TreeBuilder {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with `state` that has no parent.
    pub fn add_root(&mut self, state: SymbolicState) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PendingNode {
            state,
            ..PendingNode::default()
        });
        id
    }

    /// Adds a node with `state` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, state: SymbolicState) -> NodeId {
        let id = self.add_root(state);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Gets the current state of the node `id`.
    #[must_use]
    pub fn state(&self, id: NodeId) -> &SymbolicState {
        &self.nodes[id.0].state
    }

    /// Records `term` as the term executed at the node `id`.
    pub fn set_term(&mut self, id: NodeId, term: Term) {
        self.nodes[id.0].term = Some(term);
    }

    /// Replaces the state of the node `id` with the result of applying `update`
    /// to a builder started from it.
    pub fn update_state<R>(&mut self, id: NodeId, update: impl FnOnce(&mut StateBuilder) -> R) -> R {
        let node = &mut self.nodes[id.0];
        let mut builder = node.state.builder();
        let result = update(&mut builder);
        node.state = builder.build();
        result
    }

    /// Freezes the subtree rooted at `root` into an [`ExecutionTree`],
    /// consuming the arena.
    #[must_use]
    pub fn finish(mut self, root: NodeId) -> ExecutionTree {
        Self::assemble(&mut self.nodes, root)
    }

    /// Moves the node `id` and its descendants out of `nodes`.
    fn assemble(nodes: &mut [PendingNode], id: NodeId) -> ExecutionTree {
        let node = std::mem::take(&mut nodes[id.0]);
        let children = node
            .children
            .into_iter()
            .map(|child| Self::assemble(nodes, child))
            .collect();

        ExecutionTree::new(node.state, node.term, children)
    }
}
