//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.

#![cfg(test)]

use std::{fs::File, io::Read};

use symbolic_execution_tree as set;
use symbolic_execution_tree::{ast::Expr, translator, ExecutionTree};

/// Builds the execution tree of `program` over `parameters` using the default
/// configuration.
#[allow(unused)] // It is actually
pub fn build(program: &Expr, parameters: &[&str]) -> anyhow::Result<ExecutionTree> {
    let translator = set::new(translator::Config::default());
    Ok(translator.build_execution_tree(program, parameters)?)
}

/// Builds and renders the execution tree of `program` over `parameters`.
#[allow(unused)] // It is actually
pub fn render(program: &Expr, parameters: &[&str]) -> anyhow::Result<String> {
    let tree = build(program, parameters)?;
    Ok(set::render(&tree))
}

/// Joins `lines` into the text that the renderer produces, with each line
/// terminated by a newline.
#[allow(unused)] // It is actually
pub fn lines(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Loads the JSON-encoded program at the provided `path`.
#[allow(unused)] // It is actually
pub fn load_program(path: impl Into<String>) -> anyhow::Result<Expr> {
    let mut file = File::open(path.into())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    Ok(serde_json::from_str(&contents)?)
}
