//! Top-level declaration nodes.

use std::fmt;

use crate::{SourceLoc, Stmt, TypeInfo};

/// A type slot in the tree, locatable for diagnostics.
#[derive(Clone, PartialEq, Debug)]
pub struct TypeNode {
    pub type_data: TypeInfo,
    pub loc: SourceLoc,
}

impl TypeNode {
    pub fn new(type_data: TypeInfo, loc: SourceLoc) -> Self {
        TypeNode { type_data, loc }
    }
}

/// A function parameter: `name` (one word) or `name::` (unsized array).
///
/// Parameters are declaration nodes with no initializer — the grammar
/// has nowhere to write one.
#[derive(Clone, PartialEq, Debug)]
pub struct Param {
    pub name: String,
    pub param_type: TypeInfo,
    pub loc: SourceLoc,
}

impl Param {
    pub fn new(name: impl Into<String>, param_type: TypeInfo, loc: SourceLoc) -> Self {
        Param {
            name: name.into(),
            param_type,
            loc,
        }
    }
}

/// A function declaration or external import.
///
/// Invariant: `is_external` implies `body` is absent; a missing body on a
/// non-external declaration is a parse error and never reaches the tree.
#[derive(Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    /// The body block; `None` only for `екстерно` imports.
    pub body: Option<Stmt>,
    pub return_type: TypeNode,
    pub is_external: bool,
    pub loc: SourceLoc,
}

impl FunctionDecl {
    /// The function's signature as a [`TypeInfo::Function`].
    pub fn signature(&self) -> TypeInfo {
        TypeInfo::function(
            self.return_type.type_data.clone(),
            self.params.iter().map(|p| p.param_type.clone()).collect(),
        )
    }
}

impl fmt::Debug for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FunctionDecl({}, params={}, external={}) @ {}",
            self.name,
            self.params.len(),
            self.is_external,
            self.loc
        )
    }
}

/// The root node: an ordered sequence of declarations.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub decls: Vec<FunctionDecl>,
}

impl Program {
    pub fn new(decls: Vec<FunctionDecl>) -> Self {
        Program { decls }
    }

    /// Find a declaration by name (first match in source order).
    pub fn find(&self, name: &str) -> Option<&FunctionDecl> {
        self.decls.iter().find(|d| d.name == name)
    }

    /// The entry point, if declared.
    pub fn entry_point(&self) -> Option<&FunctionDecl> {
        self.find("главна")
    }
}
