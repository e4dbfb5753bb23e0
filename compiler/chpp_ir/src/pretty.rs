//! AST printers.
//!
//! Two printers with different jobs:
//!
//! - [`dump`] — deterministic indented debug dump: each node prints its
//!   variant name and key attributes, children indented two spaces per
//!   level. Used for golden tests and `--stop-after-parsing`.
//! - [`to_source`] — emits parseable Чпп source. Expressions are fully
//!   parenthesized so the echo reparses to the same shape; printing the
//!   parse of the echo reproduces the echo byte for byte.

use std::fmt::Write;

use crate::{Expr, ExprKind, FunctionDecl, Program, Stmt, StmtKind};

/// Render the indented variant-name dump of a program.
pub fn dump(program: &Program) -> String {
    let mut p = Dumper::default();
    p.line("Program");
    p.depth += 1;
    for decl in &program.decls {
        p.function(decl);
    }
    p.out
}

/// Render a program back to parseable source text.
pub fn to_source(program: &Program) -> String {
    let mut s = SourceWriter::default();
    for (i, decl) in program.decls.iter().enumerate() {
        if i > 0 {
            s.out.push('\n');
        }
        s.function(decl);
    }
    s.out
}

// ---------------------------------------------------------------------------
// Debug dump
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Dumper {
    out: String,
    depth: usize,
}

impl Dumper {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn function(&mut self, decl: &FunctionDecl) {
        self.line(&format!(
            "FunctionDecl name={} external={}",
            decl.name, decl.is_external
        ));
        self.nested(|p| {
            for param in &decl.params {
                p.line(&format!(
                    "VarDecl name={} type={}",
                    param.name, param.param_type
                ));
            }
            p.line(&format!("TypeNode type={}", decl.return_type.type_data));
            if let Some(body) = &decl.body {
                p.stmt(body);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl {
                name, init, var_type, ..
            } => {
                self.line(&format!("VarDecl name={name} type={var_type}"));
                if let Some(init) = init {
                    self.nested(|p| p.expr(init));
                }
            }
            StmtKind::ArrayDecl {
                name,
                size,
                inits,
                elem_type,
            } => {
                self.line(&format!("ArrayDecl name={name} size={size} type={elem_type}"));
                self.nested(|p| {
                    for init in inits {
                        p.expr(init);
                    }
                });
            }
            StmtKind::Block(stmts) => {
                self.line("Block");
                self.nested(|p| {
                    for stmt in stmts {
                        p.stmt(stmt);
                    }
                });
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.line(&format!("If else={}", else_branch.is_some()));
                self.nested(|p| {
                    p.expr(cond);
                    p.stmt(then_branch);
                    if let Some(else_branch) = else_branch {
                        p.stmt(else_branch);
                    }
                });
            }
            StmtKind::While { cond, body } => {
                self.line("While");
                self.nested(|p| {
                    p.expr(cond);
                    p.stmt(body);
                });
            }
            StmtKind::DoWhile { body, cond } => {
                self.line("DoWhile");
                self.nested(|p| {
                    p.stmt(body);
                    p.expr(cond);
                });
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                self.line(&format!(
                    "For init={} cond={} step={}",
                    init.is_some(),
                    cond.is_some(),
                    step.is_some()
                ));
                self.nested(|p| {
                    if let Some(init) = init {
                        p.stmt(init);
                    }
                    if let Some(cond) = cond {
                        p.expr(cond);
                    }
                    if let Some(step) = step {
                        p.expr(step);
                    }
                    p.stmt(body);
                });
            }
            StmtKind::Return(value) => {
                self.line("Return");
                if let Some(value) = value {
                    self.nested(|p| p.expr(value));
                }
            }
            StmtKind::Break => self.line("Break"),
            StmtKind::Expr(expr) => {
                self.line("ExprStmt");
                self.nested(|p| p.expr(expr));
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Int(value) => self.line(&format!("LiteralInt {value}")),
            ExprKind::Char(c) => self.line(&format!("LiteralChar {c:?}")),
            ExprKind::Str(s) => self.line(&format!("LiteralString {s:?}")),
            ExprKind::Bool(b) => self.line(&format!("LiteralBool {b}")),
            ExprKind::Ident(name) => self.line(&format!("Identifier {name}")),
            ExprKind::Binary { op, left, right } => {
                self.line(&format!("BinaryExpr op={}", op.op_str().unwrap_or("?")));
                self.nested(|p| {
                    p.expr(left);
                    p.expr(right);
                });
            }
            ExprKind::Unary {
                op,
                operand,
                prefix,
            } => {
                self.line(&format!(
                    "UnaryExpr op={} prefix={prefix}",
                    op.op_str().unwrap_or("?")
                ));
                self.nested(|p| p.expr(operand));
            }
            ExprKind::Index { array, index } => {
                self.line("ArrayAccess");
                self.nested(|p| {
                    p.expr(array);
                    p.expr(index);
                });
            }
            ExprKind::Call { callee, args } => {
                self.line("Call");
                self.nested(|p| {
                    p.expr(callee);
                    for arg in args {
                        p.expr(arg);
                    }
                });
            }
            ExprKind::Assign { target, value } => {
                self.line("Assignment");
                self.nested(|p| {
                    p.expr(target);
                    p.expr(value);
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Source echo
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SourceWriter {
    out: String,
}

impl SourceWriter {
    fn function(&mut self, decl: &FunctionDecl) {
        if decl.is_external {
            self.out.push_str("екстерно ");
        }
        self.out.push_str(&decl.name);
        self.out.push('(');
        for (i, param) in decl.params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(&param.name);
            if matches!(param.param_type, crate::TypeInfo::Array { .. }) {
                self.out.push_str("::");
            }
        }
        self.out.push(')');
        match &decl.body {
            Some(body) => {
                self.out.push(' ');
                self.stmt(body, 0);
                self.out.push('\n');
            }
            None => self.out.push_str(";\n"),
        }
    }

    fn stmt(&mut self, stmt: &Stmt, indent: usize) {
        match &stmt.kind {
            StmtKind::VarDecl { name, init, .. } => {
                self.out.push_str(name);
                self.out.push_str(" = ");
                match init {
                    Some(init) => self.expr(init),
                    None => self.out.push('0'),
                }
                self.out.push(';');
            }
            StmtKind::ArrayDecl {
                name, size, inits, ..
            } => {
                let _ = write!(self.out, "{name}:{size}: = _");
                for (i, init) in inits.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(init);
                }
                self.out.push_str("_;");
            }
            StmtKind::Block(stmts) => {
                self.out.push('<');
                for stmt in stmts {
                    self.out.push('\n');
                    self.pad(indent + 1);
                    self.stmt(stmt, indent + 1);
                }
                self.out.push('\n');
                self.pad(indent);
                self.out.push('>');
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("ако (");
                self.expr(cond);
                self.out.push_str(") ");
                self.stmt(then_branch, indent);
                if let Some(else_branch) = else_branch {
                    self.out.push_str(" иначе ");
                    self.stmt(else_branch, indent);
                }
            }
            StmtKind::While { cond, body } => {
                self.out.push_str("док (");
                self.expr(cond);
                self.out.push_str(") ");
                self.stmt(body, indent);
            }
            StmtKind::DoWhile { body, cond } => {
                self.out.push_str("ради ");
                self.stmt(body, indent);
                self.out.push_str(" док (");
                self.expr(cond);
                self.out.push_str(");");
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                self.out.push_str("за (");
                match init {
                    Some(init) => self.stmt(init, indent),
                    None => self.out.push(';'),
                }
                if let Some(cond) = cond {
                    self.out.push(' ');
                    self.expr(cond);
                }
                self.out.push(';');
                if let Some(step) = step {
                    self.out.push(' ');
                    self.expr(step);
                }
                self.out.push_str(") ");
                self.stmt(body, indent);
            }
            StmtKind::Return(value) => {
                self.out.push_str("врати");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.expr(value);
                }
                self.out.push(';');
            }
            StmtKind::Break => self.out.push_str("прекини;"),
            StmtKind::Expr(expr) => {
                self.expr(expr);
                self.out.push(';');
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Int(value) => {
                let _ = write!(self.out, "{value}");
            }
            ExprKind::Char(c) => {
                self.out.push('\'');
                self.push_char_escaped(*c, '\'');
                self.out.push('\'');
            }
            ExprKind::Str(s) => {
                self.out.push('"');
                for c in s.chars() {
                    self.push_char_escaped(c, '"');
                }
                self.out.push('"');
            }
            ExprKind::Bool(b) => self.out.push_str(if *b { "тачно" } else { "нетачно" }),
            ExprKind::Ident(name) => self.out.push_str(name),
            ExprKind::Binary { op, left, right } => {
                self.out.push('(');
                self.expr(left);
                let _ = write!(self.out, " {} ", op.op_str().unwrap_or("?"));
                self.expr(right);
                self.out.push(')');
            }
            ExprKind::Unary { op, operand, .. } => {
                self.out.push('(');
                self.out.push_str(op.op_str().unwrap_or("?"));
                self.expr(operand);
                self.out.push(')');
            }
            ExprKind::Index { array, index } => {
                self.expr(array);
                self.out.push(':');
                self.expr(index);
                self.out.push(':');
            }
            ExprKind::Call { callee, args } => {
                self.expr(callee);
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arg);
                }
                self.out.push(')');
            }
            ExprKind::Assign { target, value } => {
                self.out.push('(');
                self.expr(target);
                self.out.push_str(" = ");
                self.expr(value);
                self.out.push(')');
            }
        }
    }

    fn push_char_escaped(&mut self, c: char, quote: char) {
        match c {
            '\\' => self.out.push_str("\\\\"),
            '\n' => self.out.push_str("\\n"),
            '\t' => self.out.push_str("\\t"),
            '\r' => self.out.push_str("\\r"),
            '\0' => self.out.push_str("\\0"),
            c if c == quote => {
                self.out.push('\\');
                self.out.push(c);
            }
            c if (c as u32) < 0x20 => {
                let _ = write!(self.out, "\\u{:04X}", c as u32);
            }
            c => self.out.push(c),
        }
    }

    fn pad(&mut self, indent: usize) {
        for _ in 0..indent {
            self.out.push_str("    ");
        }
    }
}
