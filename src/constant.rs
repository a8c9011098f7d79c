//! This module contains constants that are needed throughout the codebase.

/// The default prefix for the fresh symbolic constants that stand in for the
/// declared parameters of a program.
///
/// The `n`th parameter (zero-based) is bound to a variable named
/// `DEFAULT_PARAMETER_PREFIX` followed by `n`, so the first parameter becomes
/// `@p0`.
pub const DEFAULT_PARAMETER_PREFIX: &str = "@p";

/// The local identifier of the jump that selects the "then" outcome of a
/// conditional.
pub const THEN_BRANCH_LOCAL_ID: u32 = 0;

/// The local identifier of the jump that selects the "else" outcome of a
/// conditional.
pub const ELSE_BRANCH_LOCAL_ID: u32 = 1;

/// The line printed before each node when rendering an execution tree.
pub const NODE_SEPARATOR: &str = "────────";

/// The connector placed before every child of a branching node except the
/// last.
pub const CHILD_CONNECTOR: &str = "├── ";

/// The indentation continued below a child that is followed by a sibling.
pub const CHILD_CONTINUATION: &str = "│   ";

/// The connector placed before the last child of a branching node.
pub const LAST_CHILD_CONNECTOR: &str = "└── ";

/// The indentation continued below the last child of a branching node.
pub const LAST_CHILD_CONTINUATION: &str = "    ";

/// The symbol used to join the constraints of a path condition.
pub const CONJUNCTION_SYMBOL: &str = "∧";

/// The symbol used between a variable and its term when rendering storage.
pub const BINDING_SYMBOL: &str = "↦";
