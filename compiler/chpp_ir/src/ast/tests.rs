use pretty_assertions::assert_eq;

use crate::{
    Expr, ExprKind, FunctionDecl, Param, Program, SourceLoc, Stmt, StmtKind, TokenKind, TypeInfo,
    TypeNode,
};

fn loc() -> SourceLoc {
    SourceLoc::new(3, 7)
}

fn ident(name: &str) -> Expr {
    ExprKind::Ident(name.to_string()).at(loc())
}

fn sample_function() -> FunctionDecl {
    // сабери(а, б) < врати а + б; >
    let sum = ExprKind::Binary {
        op: TokenKind::Plus,
        left: Box::new(ident("а")),
        right: Box::new(ident("б")),
    }
    .at(loc());
    FunctionDecl {
        name: "сабери".to_string(),
        params: vec![
            Param::new("а", TypeInfo::Int, loc()),
            Param::new("б", TypeInfo::Int, loc()),
        ],
        body: Some(StmtKind::Block(vec![StmtKind::Return(Some(sum)).at(loc())]).at(loc())),
        return_type: TypeNode::new(TypeInfo::Int, loc()),
        is_external: false,
        loc: loc(),
    }
}

#[test]
fn clone_is_structurally_equal() {
    let program = Program::new(vec![sample_function()]);
    let copy = program.clone();
    assert_eq!(program, copy);
}

#[test]
fn clone_is_independent() {
    let program = Program::new(vec![sample_function()]);
    let mut copy = program.clone();

    // Mutate deep inside the copy: rename the returned identifier.
    let Some(StmtKind::Block(stmts)) = copy.decls[0].body.as_mut().map(|b| &mut b.kind) else {
        panic!("body should be a block");
    };
    let StmtKind::Return(Some(value)) = &mut stmts[0].kind else {
        panic!("statement should be a return");
    };
    let ExprKind::Binary { left, .. } = &mut value.kind else {
        panic!("return value should be a binary expression");
    };
    left.kind = ExprKind::Ident("друго".to_string());

    // The original is untouched.
    assert_ne!(program, copy);
    let Some(StmtKind::Block(stmts)) = program.decls[0].body.as_ref().map(|b| &b.kind) else {
        panic!("body should be a block");
    };
    let StmtKind::Return(Some(value)) = &stmts[0].kind else {
        panic!("statement should be a return");
    };
    let ExprKind::Binary { left, .. } = &value.kind else {
        panic!("return value should be a binary expression");
    };
    assert_eq!(left.kind, ExprKind::Ident("а".to_string()));
}

#[test]
fn type_annotations_participate_in_equality() {
    let mut a = ident("x");
    let b = ident("x");
    assert_eq!(a, b);
    a.ty = Some(TypeInfo::Int);
    assert_ne!(a, b);
}

#[test]
fn signature_reflects_params_and_return() {
    let function = sample_function();
    assert_eq!(
        function.signature(),
        TypeInfo::function(TypeInfo::Int, vec![TypeInfo::Int, TypeInfo::Int])
    );
}

#[test]
fn entry_point_lookup() {
    let mut main = sample_function();
    main.name = "главна".to_string();
    let program = Program::new(vec![sample_function(), main]);
    assert_eq!(program.entry_point().map(|f| f.name.as_str()), Some("главна"));
    assert_eq!(program.find("непозната"), None);
}

#[test]
fn external_decl_has_no_body() {
    let external = FunctionDecl {
        name: "putchar".to_string(),
        params: vec![Param::new("c", TypeInfo::Int, loc())],
        body: None,
        return_type: TypeNode::new(TypeInfo::Int, loc()),
        is_external: true,
        loc: loc(),
    };
    assert!(external.is_external);
    assert!(external.body.is_none());
}

#[test]
fn release_drops_the_whole_tree() {
    // Ownership is exclusive, so dropping the root releases everything;
    // this is a smoke test that deep trees drop cleanly.
    let mut expr = ExprKind::Int(0).at(loc());
    for i in 1..200 {
        expr = ExprKind::Binary {
            op: TokenKind::Plus,
            left: Box::new(expr),
            right: Box::new(ExprKind::Int(i).at(loc())),
        }
        .at(loc());
    }
    let program = Program::new(vec![FunctionDecl {
        name: "дубоко".to_string(),
        params: vec![],
        body: Some(StmtKind::Block(vec![StmtKind::Expr(expr).at(loc())]).at(loc())),
        return_type: TypeNode::new(TypeInfo::Int, loc()),
        is_external: false,
        loc: loc(),
    }]);
    drop(program);
}
