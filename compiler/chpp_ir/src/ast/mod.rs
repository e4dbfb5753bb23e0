//! The abstract syntax tree.
//!
//! An owned strict tree: [`Program`] is the root and transitively owns
//! every declaration, statement, expression, string, and [`TypeInfo`]
//! below it. Sharing between subtrees is forbidden — `Clone` (a deep
//! copy) is the only way to obtain a second independent subtree, and
//! release is ordinary `Drop`, which runs children-first by ownership.
//!
//! Node variants follow the grammar: a closed set, so they are sum types
//! and matches over them are exhaustive.

mod decl;
mod expr;
mod stmt;

pub use decl::{FunctionDecl, Param, Program, TypeNode};
pub use expr::{Expr, ExprKind};
pub use stmt::{Stmt, StmtKind};

#[cfg(test)]
mod tests;
