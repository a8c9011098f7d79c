//! This module is an integration test that builds the execution tree of a
//! program loaded from its JSON representation on disk.
#![cfg(test)]

use symbolic_execution_tree::{ast::Expr, term::Term};

mod common;

#[test]
fn builds_tree_from_json_program() -> anyhow::Result<()> {
    let program = common::load_program("./asset/nested_program.json")?;
    assert!(matches!(program, Expr::Block { ref exprs } if exprs.len() == 4));

    let tree = common::build(&program, &["a", "b"])?;
    assert_eq!(tree.leaves().len(), 3);
    assert_eq!(tree.depth(), 2);

    let first = tree.leaves()[0];
    assert_eq!(
        first.state().storage().get("x"),
        Some(&Term::mul(
            Term::constant(2),
            Term::plus(Term::var("@p0"), Term::var("@p1"))
        ))
    );

    Ok(())
}

#[test]
fn exports_tree_as_json() -> anyhow::Result<()> {
    let program = common::load_program("./asset/nested_program.json")?;
    let tree = common::build(&program, &["a", "b"])?;
    let json = serde_json::to_value(&tree)?;

    // Only the parameters are bound at the root.
    let storage = &json["state"]["storage"];
    let names: Vec<_> = storage
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(json["term"]["kind"], "let");
    assert_eq!(json["children"].as_array().map(Vec::len), Some(1));

    Ok(())
}
