//! Statement nodes.

use std::fmt;

use crate::{Expr, SourceLoc, TypeInfo};

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub loc: SourceLoc,
}

impl Stmt {
    pub fn new(kind: StmtKind, loc: SourceLoc) -> Self {
        Stmt { kind, loc }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.loc)
    }
}

/// Statement variants.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// Implicit variable declaration: `name = expr;`. The parser resolves
    /// first-assignment to a declaration without a symbol table; the
    /// semantic stage distinguishes declaration from re-assignment later.
    VarDecl {
        name: String,
        init: Option<Expr>,
        var_type: TypeInfo,
    },

    /// Array declaration: `name:N: = _e0, e1, ..._;`.
    /// Invariant: `inits.len() <= size` (enforced at parse time).
    ArrayDecl {
        name: String,
        size: i64,
        inits: Vec<Expr>,
        elem_type: TypeInfo,
    },

    /// `< statements >`
    Block(Vec<Stmt>),

    /// `ако (cond) then_branch [иначе else_branch]`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `док (cond) body`
    While { cond: Expr, body: Box<Stmt> },

    /// `ради body док (cond);`
    DoWhile { body: Box<Stmt>, cond: Expr },

    /// `за (init cond; step) body` — `init` is a full statement (with its
    /// own `;`) or absent; `cond` and `step` are optional expressions.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },

    /// `врати [expr];`
    Return(Option<Expr>),

    /// `прекини;`
    Break,

    /// Expression statement: `expr;`
    Expr(Expr),
}

impl StmtKind {
    /// Wrap into a [`Stmt`] at `loc`.
    pub fn at(self, loc: SourceLoc) -> Stmt {
        Stmt::new(self, loc)
    }
}
