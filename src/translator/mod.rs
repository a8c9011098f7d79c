//! This module contains the translator that walks an input program, drives the
//! [`VM`] over it, and assembles the resulting [`ExecutionTree`].

use itertools::Itertools;
use log::{debug, trace};

use crate::{
    ast::Expr,
    constant::DEFAULT_PARAMETER_PREFIX,
    error,
    error::{container::Locatable, translation},
    simplify::ConstantFolder,
    term::{Jump, Term},
    tree::{
        builder::{NodeId, TreeBuilder},
        ExecutionTree,
    },
    vm::{
        state::{storage::Storage, StateBuilder},
        Successor,
        VM,
    },
};

/// Creates a new translator that uses constant folding during execution.
#[must_use]
pub fn new(config: Config) -> Translator {
    Translator::new(VM::new(ConstantFolder.in_rc()), config)
}

/// The translator is responsible for turning a program into its execution
/// tree.
///
/// # Scopes
///
/// Every block and every conditional is a scope. When a scope finishes, each
/// of the open paths leaving it has its storage pruned back to the variables
/// that existed when the scope was entered. Variables that existed on entry
/// keep whatever value the scope gave them.
///
/// # Errors
///
/// Any error aborts the whole translation. Errors are located at the index of
/// the tree node being expanded when they occurred.
#[derive(Clone, Debug)]
pub struct Translator {
    /// The engine used to step states over terms.
    vm: VM,

    /// The configuration for the translation.
    config: Config,
}

impl Translator {
    /// Constructs a new translator that steps states with `vm`.
    #[must_use]
    pub fn new(vm: VM, config: Config) -> Self {
        Self { vm, config }
    }

    /// Builds the execution tree of `program`.
    ///
    /// The initial state binds each of the `parameters`, in order, to a fresh
    /// symbolic constant named after its position (`@p0`, `@p1`, and so on with
    /// the default configuration), and has no constraints.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the program uses a variable before binding it, or if
    /// it contains a node that cannot be translated in its position.
    pub fn build_execution_tree(
        &self,
        program: &Expr,
        parameters: &[impl AsRef<str>],
    ) -> error::Result<ExecutionTree> {
        debug!(
            "Building execution tree over parameters [{}]",
            parameters.iter().map(AsRef::as_ref).join(", ")
        );

        let mut initial = StateBuilder::new();
        for (index, parameter) in parameters.iter().enumerate() {
            initial.bind(
                parameter.as_ref(),
                Term::var(self.config.parameter_name(index)),
            );
        }

        let mut arena = TreeBuilder::new();
        let root = arena.add_root(initial.build());
        self.build_from(&mut arena, root, program)?;
        let tree = arena.finish(root);

        debug!(
            "Built execution tree with {} nodes and {} leaves",
            tree.node_count(),
            tree.leaves().len()
        );

        Ok(tree)
    }

    /// Maps `expr` onto its symbolic term.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `expr` is a block, or a conditional whose condition
    /// is not an equality or inequality test.
    pub fn translate(expr: &Expr) -> translation::Result<Term> {
        let binary = |left: &Expr, right: &Expr, make: fn(Term, Term) -> Term| {
            Self::translate(left).and_then(|l| Self::translate(right).map(|r| make(l, r)))
        };

        match expr {
            Expr::Const { value } => Ok(Term::constant(*value)),
            Expr::Var { name } => Ok(Term::var(name.clone())),
            Expr::Let { variable, value } => {
                Ok(Term::bind(variable.clone(), Self::translate(value)?))
            }
            Expr::If { condition, .. } if condition.is_condition() => {
                Ok(Term::branch(Self::translate(condition)?))
            }
            Expr::If { condition, .. } => Err(translation::Error::UnsupportedTerm {
                kind: condition.kind(),
            }),
            Expr::Plus { left, right } => binary(left, right, Term::plus),
            Expr::Minus { left, right } => binary(left, right, Term::minus),
            Expr::Mul { left, right } => binary(left, right, Term::mul),
            Expr::Eq { left, right } => binary(left, right, Term::equal),
            Expr::NEq { left, right } => binary(left, right, Term::not_equal),
            Expr::Return { expr } => Ok(Term::ret(Self::translate(expr)?)),
            Expr::Block { .. } => Err(translation::Error::UnsupportedTerm { kind: expr.kind() }),
        }
    }

    /// Expands the open leaf `node` by executing `expr` from its state,
    /// returning the open leaves that remain afterwards.
    fn build_from(
        &self,
        arena: &mut TreeBuilder,
        node: NodeId,
        expr: &Expr,
    ) -> error::Result<Vec<NodeId>> {
        match expr {
            Expr::Block { exprs } => self.build_from_block(arena, node, exprs),
            Expr::If {
                then_branch,
                else_branch,
                ..
            } => self.build_from_if(arena, node, expr, then_branch, else_branch.as_deref()),
            Expr::Return { .. } => Self::build_from_return(arena, node, expr).map(|()| vec![]),
            _ => self.build_from_step(arena, node, expr).map(|child| vec![child]),
        }
    }

    /// Runs `exprs` in order from `node`, feeding every open leaf produced by
    /// one expression to the next.
    fn build_from_block(
        &self,
        arena: &mut TreeBuilder,
        node: NodeId,
        exprs: &[Expr],
    ) -> error::Result<Vec<NodeId>> {
        let scope = arena.state(node).clone();

        let mut open = vec![node];
        for expr in exprs {
            open = open
                .into_iter()
                .map(|leaf| self.build_from(arena, leaf, expr))
                .flatten_ok()
                .collect::<error::Result<_>>()?;
        }

        Self::leave_scope(arena, scope.storage(), &open);
        Ok(open)
    }

    /// Forks `node` over the condition of `expr`, continuing each successor
    /// with the body of the outcome its jump selects.
    ///
    /// A successor whose outcome has no body is left as an open leaf.
    fn build_from_if(
        &self,
        arena: &mut TreeBuilder,
        node: NodeId,
        expr: &Expr,
        then_branch: &Expr,
        else_branch: Option<&Expr>,
    ) -> error::Result<Vec<NodeId>> {
        let term = Self::translate(expr).locate(node.index())?;
        let state = arena.state(node).clone();
        arena.set_term(node, term.clone());

        let mut successors = self.vm.next_states(&state, &term).locate(node.index())?;
        successors.sort_by_key(Successor::jump);

        let mut open = Vec::new();
        for successor in successors {
            let (successor, jump) = successor.into_parts();
            debug_assert!(jump.is_some(), "A branch produced an untagged successor");

            let child = arena.add_child(node, successor);
            let body = if jump == Some(Jump::ELSE) {
                else_branch
            } else {
                Some(then_branch)
            };

            match body {
                Some(body) => open.extend(self.build_from(arena, child, body)?),
                None => open.push(child),
            }
        }

        Self::leave_scope(arena, state.storage(), &open);
        Ok(open)
    }

    /// Records the `return` in `expr` as the final term of the path through
    /// `node`.
    ///
    /// The term is recorded as written and is not executed, so no successor is
    /// created and its variables are not looked up.
    fn build_from_return(arena: &mut TreeBuilder, node: NodeId, expr: &Expr) -> error::Result<()> {
        let term = Self::translate(expr).locate(node.index())?;
        arena.set_term(node, term);
        Ok(())
    }

    /// Executes the non-branching `expr` at `node`, attaching and returning its
    /// only successor.
    fn build_from_step(
        &self,
        arena: &mut TreeBuilder,
        node: NodeId,
        expr: &Expr,
    ) -> error::Result<NodeId> {
        let term = Self::translate(expr).locate(node.index())?;
        let successor = self.vm.next_state(arena.state(node), &term).locate(node.index())?;
        debug_assert!(
            successor.jump().is_none(),
            "A non-branching step produced a jump"
        );

        arena.set_term(node, term);
        Ok(arena.add_child(node, successor.into()))
    }

    /// Prunes every open leaf in `open` back to the variables bound in `scope`.
    fn leave_scope(arena: &mut TreeBuilder, scope: &Storage, open: &[NodeId]) {
        for &leaf in open {
            let removed = arena.update_state(leaf, |state| state.retain_bound_in(scope));
            if !removed.is_empty() {
                trace!(
                    "Dropped [{}] from node {} on leaving scope",
                    removed.join(", "),
                    leaf.index()
                );
            }
        }
    }
}

/// The configuration for the translator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The prefix of the symbolic constants bound to the program parameters.
    /// The parameter at index `n` is bound to the prefix followed by `n`.
    ///
    /// Defaults to [`DEFAULT_PARAMETER_PREFIX`].
    pub parameter_prefix: String,
}

impl Config {
    /// Sets the `parameter_prefix` config parameter to `value`.
    #[must_use]
    pub fn with_parameter_prefix(mut self, value: impl Into<String>) -> Self {
        self.parameter_prefix = value.into();
        self
    }

    /// Gets the name of the symbolic constant for the parameter at `index`.
    #[must_use]
    pub fn parameter_name(&self, index: usize) -> String {
        format!("{}{index}", self.parameter_prefix)
    }
}

impl Default for Config {
    fn default() -> Self {
        let parameter_prefix = DEFAULT_PARAMETER_PREFIX.into();
        Self { parameter_prefix }
    }
}
