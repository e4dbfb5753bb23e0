//! Expression nodes.

use std::fmt;

use crate::{SourceLoc, TokenKind, TypeInfo};

/// Expression node.
///
/// `ty` is empty after parsing; the semantic stage fills it in.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub loc: SourceLoc,
    pub ty: Option<TypeInfo>,
}

impl Expr {
    pub fn new(kind: ExprKind, loc: SourceLoc) -> Self {
        Expr {
            kind,
            loc,
            ty: None,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.loc)
    }
}

/// Expression variants.
///
/// Binary and unary nodes store the originating [`TokenKind`] verbatim as
/// their operator tag; interpretation is the semantic stage's job.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// Integer literal, target-word wide.
    Int(i64),
    /// Character literal (decoded codepoint).
    Char(char),
    /// String literal (owned UTF-8).
    Str(String),
    /// `тачно` / `нетачно`.
    Bool(bool),
    /// Variable or function reference.
    Ident(String),

    /// `left op right`. `op` is restricted to the binary-operator kinds.
    Binary {
        op: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `op operand`. `op` is restricted to the prefix-operator kinds.
    /// The grammar has no postfix unary forms, but the flag is part of
    /// the node so the semantic stage sees the full shape.
    Unary {
        op: TokenKind,
        operand: Box<Expr>,
        prefix: bool,
    },

    /// Colon subscript: `array:index:`.
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },

    /// Call: `callee(args...)`.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// Assignment: `target = value` (right-associative).
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
}

impl ExprKind {
    /// Wrap into an [`Expr`] at `loc` with no type annotation.
    pub fn at(self, loc: SourceLoc) -> Expr {
        debug_assert!(
            match &self {
                ExprKind::Binary { op, .. } => op.is_binary_op(),
                ExprKind::Unary { op, .. } => op.is_prefix_op(),
                _ => true,
            },
            "operator tag outside the operator subset"
        );
        Expr::new(self, loc)
    }
}
