//! Shared tree-construction helpers for the integration tests.
//!
//! Fragments are built with `create_node`/`create_token` in the same
//! arena as the tree under edit, the way a code factory would; whole
//! trees get their root installed so the edit engine sees them as
//! attached.

#![allow(dead_code)]

use arbor::prelude::*;

pub fn ws(tree: &mut Tree) -> ElementId {
    tree.create_token(TokenKind::Whitespace, " ").into()
}

pub fn ident(tree: &mut Tree, text: &str) -> ElementId {
    tree.create_token(TokenKind::Identifier, text).into()
}

pub fn empty_modifiers(tree: &mut Tree) -> ElementId {
    tree.create_node(NodeKind::ModifierList, vec![]).into()
}

/// Modifier list with the given keywords, space-separated.
pub fn modifiers(tree: &mut Tree, keywords: &[TokenKind]) -> ElementId {
    let mut children = Vec::new();
    for (i, &kw) in keywords.iter().enumerate() {
        if i > 0 {
            children.push(ws(tree));
        }
        children.push(tree.synth_token(kw).into());
    }
    tree.create_node(NodeKind::ModifierList, children).into()
}

/// `TypeElement` holding a primitive type keyword (`int`, `void`, ...).
pub fn primitive_type(tree: &mut Tree, text: &str) -> ElementId {
    let tok = tree.create_token(TokenKind::PrimitiveType, text);
    tree.create_node(NodeKind::TypeElement, vec![tok.into()])
        .into()
}

/// `TypeElement` holding a class reference (`T`, `String`, ...).
pub fn reference_type(tree: &mut Tree, name: &str) -> ElementId {
    let reference = code_reference(tree, name);
    tree.create_node(NodeKind::TypeElement, vec![reference])
        .into()
}

pub fn code_reference(tree: &mut Tree, name: &str) -> ElementId {
    let name = ident(tree, name);
    tree.create_node(NodeKind::CodeReference, vec![name]).into()
}

pub fn reference_expr(tree: &mut Tree, name: &str) -> ElementId {
    let name = ident(tree, name);
    tree.create_node(NodeKind::ReferenceExpression, vec![name])
        .into()
}

pub fn int_literal(tree: &mut Tree, text: &str) -> ElementId {
    let tok = tree.create_token(TokenKind::IntLiteral, text);
    tree.create_node(NodeKind::LiteralExpression, vec![tok.into()])
        .into()
}

/// `int a`-style parameter.
pub fn parameter(tree: &mut Tree, ty: &str, name: &str) -> ElementId {
    let mods = empty_modifiers(tree);
    let ty = primitive_type(tree, ty);
    let gap = ws(tree);
    let name = ident(tree, name);
    tree.create_node(NodeKind::Parameter, vec![mods, ty, gap, name])
        .into()
}

/// `b=2`-style annotation attribute.
pub fn name_value_pair(tree: &mut Tree, name: &str, value: &str) -> ElementId {
    let name = ident(tree, name);
    let eq = tree.synth_token(TokenKind::Eq).into();
    let value = int_literal(tree, value);
    tree.create_node(NodeKind::NameValuePair, vec![name, eq, value])
        .into()
}

pub fn enum_constant(tree: &mut Tree, name: &str) -> ElementId {
    let mods = empty_modifiers(tree);
    let name = ident(tree, name);
    tree.create_node(NodeKind::EnumConstant, vec![mods, name])
        .into()
}

pub fn empty_param_list(tree: &mut Tree) -> ElementId {
    let open = tree.synth_token(TokenKind::LParen).into();
    let close = tree.synth_token(TokenKind::RParen).into();
    tree.create_node(NodeKind::ParameterList, vec![open, close])
        .into()
}

pub fn empty_block(tree: &mut Tree) -> ElementId {
    let open = tree.synth_token(TokenKind::LBrace).into();
    let close = tree.synth_token(TokenKind::RBrace).into();
    tree.create_node(NodeKind::CodeBlock, vec![open, close])
        .into()
}

/// `void m(){}`, `C(){}` (no return type), with the given modifiers.
pub fn method(
    tree: &mut Tree,
    keywords: &[TokenKind],
    ret: Option<&str>,
    name: &str,
) -> ElementId {
    let mut children = vec![modifiers(tree, keywords)];
    if !keywords.is_empty() {
        children.push(ws(tree));
    }
    if let Some(ret) = ret {
        children.push(primitive_type(tree, ret));
        children.push(ws(tree));
    }
    children.push(ident(tree, name));
    children.push(empty_param_list(tree));
    children.push(empty_block(tree));
    tree.create_node(NodeKind::Method, children).into()
}

/// `void m();` — a declaration with no body.
pub fn abstract_method(
    tree: &mut Tree,
    keywords: &[TokenKind],
    ret: &str,
    name: &str,
) -> ElementId {
    let mut children = vec![modifiers(tree, keywords)];
    if !keywords.is_empty() {
        children.push(ws(tree));
    }
    children.push(primitive_type(tree, ret));
    children.push(ws(tree));
    children.push(ident(tree, name));
    children.push(empty_param_list(tree));
    children.push(tree.synth_token(TokenKind::Semicolon).into());
    tree.create_node(NodeKind::Method, children).into()
}

/// `T x;`-style field with a reference type.
pub fn field(tree: &mut Tree, keywords: &[TokenKind], ty: ElementId, name: &str) -> ElementId {
    let mut children = vec![modifiers(tree, keywords)];
    if !keywords.is_empty() {
        children.push(ws(tree));
    }
    children.push(ty);
    children.push(ws(tree));
    children.push(ident(tree, name));
    children.push(tree.synth_token(TokenKind::Semicolon).into());
    tree.create_node(NodeKind::Field, children).into()
}

/// `x;`-style expression statement.
pub fn expression_statement(tree: &mut Tree, name: &str) -> ElementId {
    let expr = reference_expr(tree, name);
    let semi = tree.synth_token(TokenKind::Semicolon).into();
    tree.create_node(NodeKind::ExpressionStatement, vec![expr, semi])
        .into()
}

/// Declarator for `T a, b;` chains; only the first carries the prefix.
pub fn local_variable(tree: &mut Tree, ty: Option<&str>, name: &str) -> ElementId {
    let mut children = Vec::new();
    if let Some(ty) = ty {
        children.push(empty_modifiers(tree));
        children.push(primitive_type(tree, ty));
        children.push(ws(tree));
    }
    children.push(ident(tree, name));
    tree.create_node(NodeKind::LocalVariable, children).into()
}

// ============================================================================
// WHOLE-TREE BUILDERS
// ============================================================================

/// `(int a, int b)` with the listed parameters, installed as root.
pub fn param_list_tree(params: &[(&str, &str)]) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let mut children = vec![tree.synth_token(TokenKind::LParen).into()];
    for (i, &(ty, name)) in params.iter().enumerate() {
        if i > 0 {
            children.push(tree.synth_token(TokenKind::Comma).into());
            children.push(ws(&mut tree));
        }
        children.push(parameter(&mut tree, ty, name));
    }
    children.push(tree.synth_token(TokenKind::RParen).into());
    let list = tree.create_node(NodeKind::ParameterList, children);
    tree.set_root(list);
    (tree, list)
}

/// An argument list with no children at all — not even brackets.
pub fn bare_expression_list_tree() -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let list = tree.create_node(NodeKind::ExpressionList, vec![]);
    tree.set_root(list);
    (tree, list)
}

/// `@A(1)` — single positional value, installed as root.
pub fn annotation_tree_positional(name: &str, value: &str) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let at = tree.synth_token(TokenKind::At).into();
    let reference = code_reference(&mut tree, name);
    let open = tree.synth_token(TokenKind::LParen).into();
    let lit = int_literal(&mut tree, value);
    let close = tree.synth_token(TokenKind::RParen).into();
    let params = tree.create_node(NodeKind::AnnotationParamList, vec![open, lit, close]);
    let annotation = tree.create_node(NodeKind::Annotation, vec![at, reference, params.into()]);
    tree.set_root(annotation);
    (tree, annotation, params)
}

fn class_header(tree: &mut Tree, keyword: TokenKind, name: &str) -> Vec<ElementId> {
    vec![
        empty_modifiers(tree),
        tree.synth_token(keyword).into(),
        ws(tree),
        ident(tree, name),
        ws(tree),
    ]
}

/// `class C { }` (or `interface`/`enum` via `keyword`), installed as root.
pub fn class_tree_with(keyword: TokenKind, name: &str) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let mut children = class_header(&mut tree, keyword, name);
    children.push(tree.synth_token(TokenKind::LBrace).into());
    children.push(ws(&mut tree));
    children.push(tree.synth_token(TokenKind::RBrace).into());
    let class = tree.create_node(NodeKind::Class, children);
    tree.set_root(class);
    (tree, class)
}

pub fn class_tree(name: &str) -> (Tree, NodeId) {
    class_tree_with(TokenKind::ClassKw, name)
}

/// `enum E { A, B }`, installed as root.
pub fn enum_tree(name: &str, constants: &[&str]) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let mut children = class_header(&mut tree, TokenKind::EnumKw, name);
    children.push(tree.synth_token(TokenKind::LBrace).into());
    children.push(ws(&mut tree));
    for (i, &constant) in constants.iter().enumerate() {
        if i > 0 {
            children.push(tree.synth_token(TokenKind::Comma).into());
            children.push(ws(&mut tree));
        }
        children.push(enum_constant(&mut tree, constant));
    }
    children.push(ws(&mut tree));
    children.push(tree.synth_token(TokenKind::RBrace).into());
    let class = tree.create_node(NodeKind::Class, children);
    tree.set_root(class);
    (tree, class)
}

/// `{ int a, b; }` — code block with one declaration statement.
pub fn block_with_declaration(ty: &str, names: &[&str]) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let mut declarators = Vec::new();
    for (i, &name) in names.iter().enumerate() {
        if i > 0 {
            declarators.push(tree.synth_token(TokenKind::Comma).into());
            declarators.push(ws(&mut tree));
        }
        let ty = if i == 0 { Some(ty) } else { None };
        declarators.push(local_variable(&mut tree, ty, name));
    }
    declarators.push(tree.synth_token(TokenKind::Semicolon).into());
    let stmt = tree.create_node(NodeKind::DeclarationStatement, declarators);
    let open = tree.synth_token(TokenKind::LBrace).into();
    let lead = ws(&mut tree);
    let trail = ws(&mut tree);
    let close = tree.synth_token(TokenKind::RBrace).into();
    let block = tree.create_node(
        NodeKind::CodeBlock,
        vec![open, lead, stmt.into(), trail, close],
    );
    tree.set_root(block);
    (tree, block, stmt)
}

pub fn import_statement(tree: &mut Tree, name: &str) -> ElementId {
    let kw = tree.synth_token(TokenKind::ImportKw).into();
    let gap = ws(tree);
    let reference = code_reference(tree, name);
    let semi = tree.synth_token(TokenKind::Semicolon).into();
    tree.create_node(NodeKind::ImportStatement, vec![kw, gap, reference, semi])
        .into()
}

/// A file holding an import list with the given (simple) names.
pub fn file_with_imports(names: &[&str]) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let mut imports = Vec::new();
    for (i, &name) in names.iter().enumerate() {
        if i > 0 {
            imports.push(ws(&mut tree));
        }
        imports.push(import_statement(&mut tree, name));
    }
    let list = tree.create_node(NodeKind::ImportList, imports);
    let file = tree.create_node(NodeKind::File, vec![list.into()]);
    tree.set_root(file);
    (tree, file, list)
}

/// `class C<T> { T x; }` — a generic class with one field, as root.
/// Returns (tree, class, field).
pub fn generic_class_with_field(name: &str, param: &str) -> (Tree, NodeId, NodeId) {
    let mut tree = Tree::new();
    let mods = empty_modifiers(&mut tree);
    let kw = tree.synth_token(TokenKind::ClassKw).into();
    let gap1 = ws(&mut tree);
    let class_name = ident(&mut tree, name);
    let lt = tree.synth_token(TokenKind::Lt).into();
    let param_name = ident(&mut tree, param);
    let type_param = tree.create_node(NodeKind::TypeParameter, vec![param_name]);
    let gt = tree.synth_token(TokenKind::Gt).into();
    let type_params =
        tree.create_node(NodeKind::TypeParameterList, vec![lt, type_param.into(), gt]);
    let gap2 = ws(&mut tree);
    let open = tree.synth_token(TokenKind::LBrace).into();
    let gap3 = ws(&mut tree);
    let ty = reference_type(&mut tree, param);
    let member = field(&mut tree, &[], ty, "x");
    let gap4 = ws(&mut tree);
    let close = tree.synth_token(TokenKind::RBrace).into();
    let class = tree.create_node(
        NodeKind::Class,
        vec![
            mods,
            kw,
            gap1,
            class_name,
            type_params.into(),
            gap2,
            open,
            gap3,
            member,
            gap4,
            close,
        ],
    );
    tree.set_root(class);
    let field_node = member.node().unwrap();
    (tree, class, field_node)
}

/// `if (c) x;` — an if statement with no else branch, as root.
pub fn if_statement_tree() -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let kw = tree.synth_token(TokenKind::IfKw).into();
    let gap1 = ws(&mut tree);
    let open = tree.synth_token(TokenKind::LParen).into();
    let condition = reference_expr(&mut tree, "c");
    let close = tree.synth_token(TokenKind::RParen).into();
    let gap2 = ws(&mut tree);
    let then = expression_statement(&mut tree, "x");
    let stmt = tree.create_node(
        NodeKind::IfStatement,
        vec![kw, gap1, open, condition, close, gap2, then],
    );
    tree.set_root(stmt);
    (tree, stmt)
}
