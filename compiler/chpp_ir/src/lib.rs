//! Shared front-end data structures for the Чпп compiler.
//!
//! Чпп is a minimalist C-like language with Serbian-Cyrillic keywords,
//! angle-bracket blocks, and a single machine-word value type. This crate
//! holds everything the pipeline stages exchange:
//!
//! - [`Span`] / [`SourceLoc`] — byte-offset spans and line/column pairs
//! - [`Token`] / [`TokenKind`] / [`TokenValue`] — the lexer's output
//! - [`TypeInfo`] — the recursive type descriptor filled in by semantic
//!   analysis
//! - the AST ([`Program`], [`FunctionDecl`], [`Stmt`], [`Expr`], ...)
//! - [`visit`] — read-only AST traversal with early stop
//! - [`pretty`] — the debug dump and the source echo printer
//!
//! The AST is an owned strict tree: every parent exclusively owns its
//! children, `Clone` is a deep copy, and release is ordinary `Drop`.
//! There is no interning and no arena — sharing between subtrees is
//! forbidden by construction.

mod ast;
pub mod pretty;
mod span;
mod token;
mod types;
pub mod visit;

pub use ast::{Expr, ExprKind, FunctionDecl, Param, Program, Stmt, StmtKind, TypeNode};
pub use span::{SourceLoc, Span};
pub use token::{Token, TokenKind, TokenValue};
pub use types::TypeInfo;
