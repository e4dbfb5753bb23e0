//! AST traversal.
//!
//! [`Visitor`] has one callback per node category, each returning
//! [`ControlFlow`]: `Continue` descends into the node's children,
//! `Break` aborts the whole traversal. The default callbacks do nothing
//! and continue, so a visitor only overrides what it cares about.
//!
//! [`accept`] drives the walk: callback first, then children in source
//! order, each node exactly once. The traversal borrows the tree
//! immutably — visitors mutate their own state, never the tree's
//! topology.

use std::ops::ControlFlow;

use crate::{Expr, ExprKind, FunctionDecl, Param, Program, Stmt, StmtKind, TypeNode};

/// Callbacks for AST traversal. All default to "continue".
pub trait Visitor {
    fn visit_program(&mut self, _program: &Program) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_function(&mut self, _function: &FunctionDecl) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_param(&mut self, _param: &Param) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_type(&mut self, _type_node: &TypeNode) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_stmt(&mut self, _stmt: &Stmt) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn visit_expr(&mut self, _expr: &Expr) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Walk a whole program: the program callback, then each declaration.
pub fn accept<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) -> ControlFlow<()> {
    visitor.visit_program(program)?;
    for decl in &program.decls {
        walk_function(visitor, decl)?;
    }
    ControlFlow::Continue(())
}

/// Walk a declaration: callback, parameters, return type, then the body.
pub fn walk_function<V: Visitor + ?Sized>(
    visitor: &mut V,
    function: &FunctionDecl,
) -> ControlFlow<()> {
    visitor.visit_function(function)?;
    for param in &function.params {
        visitor.visit_param(param)?;
    }
    visitor.visit_type(&function.return_type)?;
    if let Some(body) = &function.body {
        walk_stmt(visitor, body)?;
    }
    ControlFlow::Continue(())
}

/// Walk a statement: callback, then children in source order.
pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) -> ControlFlow<()> {
    visitor.visit_stmt(stmt)?;
    match &stmt.kind {
        StmtKind::VarDecl { init, .. } => {
            if let Some(init) = init {
                walk_expr(visitor, init)?;
            }
        }
        StmtKind::ArrayDecl { inits, .. } => {
            for init in inits {
                walk_expr(visitor, init)?;
            }
        }
        StmtKind::Block(stmts) => {
            for stmt in stmts {
                walk_stmt(visitor, stmt)?;
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            walk_expr(visitor, cond)?;
            walk_stmt(visitor, then_branch)?;
            if let Some(else_branch) = else_branch {
                walk_stmt(visitor, else_branch)?;
            }
        }
        StmtKind::While { cond, body } => {
            walk_expr(visitor, cond)?;
            walk_stmt(visitor, body)?;
        }
        StmtKind::DoWhile { body, cond } => {
            walk_stmt(visitor, body)?;
            walk_expr(visitor, cond)?;
        }
        StmtKind::For {
            init,
            cond,
            step,
            body,
        } => {
            if let Some(init) = init {
                walk_stmt(visitor, init)?;
            }
            if let Some(cond) = cond {
                walk_expr(visitor, cond)?;
            }
            if let Some(step) = step {
                walk_expr(visitor, step)?;
            }
            walk_stmt(visitor, body)?;
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                walk_expr(visitor, value)?;
            }
        }
        StmtKind::Break => {}
        StmtKind::Expr(expr) => walk_expr(visitor, expr)?,
    }
    ControlFlow::Continue(())
}

/// Walk an expression: callback, then children left to right.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) -> ControlFlow<()> {
    visitor.visit_expr(expr)?;
    match &expr.kind {
        ExprKind::Int(_)
        | ExprKind::Char(_)
        | ExprKind::Str(_)
        | ExprKind::Bool(_)
        | ExprKind::Ident(_) => {}
        ExprKind::Binary { left, right, .. } => {
            walk_expr(visitor, left)?;
            walk_expr(visitor, right)?;
        }
        ExprKind::Unary { operand, .. } => walk_expr(visitor, operand)?,
        ExprKind::Index { array, index } => {
            walk_expr(visitor, array)?;
            walk_expr(visitor, index)?;
        }
        ExprKind::Call { callee, args } => {
            walk_expr(visitor, callee)?;
            for arg in args {
                walk_expr(visitor, arg)?;
            }
        }
        ExprKind::Assign { target, value } => {
            walk_expr(visitor, target)?;
            walk_expr(visitor, value)?;
        }
    }
    ControlFlow::Continue(())
}
