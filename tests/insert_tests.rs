//! Insert-path tests: anchors, separators, brackets, canonicalization,
//! and incoming-subtree normalization.

mod common;

use arbor::prelude::*;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn insert_parameter_synthesizes_one_comma() {
    let (mut tree, list) = param_list_tree(&[("int", "a")]);
    let b = parameter(&mut tree, "int", "b");
    let attached = tree.insert(list, &[b], None).unwrap();
    assert_eq!(attached, b);
    assert_eq!(tree.text(list), "(int a, int b)");
    assert_eq!(tree.children_by_role(list, Role::Comma).len(), 1);
}

#[test]
fn insert_into_bare_list_synthesizes_brackets() {
    let (mut tree, list) = bare_expression_list_tree();
    let x = reference_expr(&mut tree, "x");
    tree.insert(list, &[x], None).unwrap();
    assert_eq!(tree.text(list), "(x)");
    assert_eq!(tree.children_by_role(list, Role::Comma).len(), 0);
}

#[test]
fn insert_second_pair_canonicalizes_positional_value() {
    let (mut tree, annotation, params) = annotation_tree_positional("A", "1");
    let pair = name_value_pair(&mut tree, "b", "2");
    tree.insert(params, &[pair], None).unwrap();
    assert_eq!(tree.text(annotation), "@A(value=1, b=2)");
}

#[test]
fn insert_method_into_enum_synthesizes_delimiter() {
    let (mut tree, class) = enum_tree("E", &["A", "B"]);
    let m = method(&mut tree, &[], Some("void"), "m");
    tree.insert(class, &[m], None).unwrap();
    assert_eq!(tree.text(class), "enum E { A, B; void m(){}}");
    let delimiter = tree.child_by_role(class, Role::ConstantListDelimiter);
    assert!(delimiter.is_some());
}

#[test]
fn insert_constant_into_enum_with_members_stays_before_delimiter() {
    let (mut tree, class) = enum_tree("E", &["A"]);
    let m = method(&mut tree, &[], Some("void"), "m");
    tree.insert(class, &[m], None).unwrap();
    let b = enum_constant(&mut tree, "B");
    tree.insert(class, &[b], None).unwrap();
    assert_eq!(tree.text(class), "enum E { A, B; void m(){}}");
}

#[test]
fn insert_constant_appends_after_last_constant() {
    let (mut tree, class) = enum_tree("E", &["A"]);
    let b = enum_constant(&mut tree, "B");
    tree.insert(class, &[b], None).unwrap();
    assert_eq!(tree.text(class), "enum E { A, B }");
}

#[test]
fn insert_modifier_by_rank() {
    let mut tree = Tree::new();
    let list = tree.create_node(NodeKind::ModifierList, vec![]);
    tree.set_root(list);
    let public = tree.synth_token(TokenKind::PublicKw);
    tree.insert(list, &[public.into()], None).unwrap();
    let fin = tree.synth_token(TokenKind::FinalKw);
    tree.insert(list, &[fin.into()], None).unwrap();
    assert_eq!(tree.text(list), "public final");

    let stat = tree.synth_token(TokenKind::StaticKw);
    tree.insert(list, &[stat.into()], None).unwrap();
    assert_eq!(tree.text(list), "public static final");
}

#[test]
fn insert_import_alphabetically() {
    let (mut tree, _file, list) = file_with_imports(&["Alpha", "Charlie"]);
    let bravo = import_statement(&mut tree, "Bravo");
    tree.insert(list, &[bravo], None).unwrap();
    assert_eq!(
        tree.text(list),
        "import Alpha; import Bravo;import Charlie;"
    );
}

#[test]
fn insert_constructor_renames_to_enclosing_class() {
    let (mut tree, class) = class_tree("Widget");
    let ctor = method(&mut tree, &[], None, "Old");
    let attached = tree.insert(class, &[ctor], None).unwrap();
    assert_eq!(tree.text(class), "class Widget { Widget(){}}");
    let name = tree
        .child_by_role(attached.node().unwrap(), Role::Name)
        .unwrap();
    assert_eq!(tree.text(name), "Widget");
}

#[test]
fn insert_into_interface_strips_disallowed_modifiers() {
    let (mut tree, class) = class_tree_with(TokenKind::InterfaceKw, "I");
    let m = abstract_method(
        &mut tree,
        &[TokenKind::PublicKw, TokenKind::AbstractKw],
        "void",
        "m",
    );
    let attached = tree.insert(class, &[m], None).unwrap();
    assert_eq!(tree.text(class), "interface I { void m();}");
    let mods = tree
        .child_by_role(attached.node().unwrap(), Role::ModifierList)
        .unwrap()
        .node()
        .unwrap();
    assert!(!tree.has_modifier(mods, TokenKind::PublicKw));
    assert!(!tree.has_modifier(mods, TokenKind::AbstractKw));
}

#[test]
fn insert_body_deletes_trailing_semicolon() {
    let (mut tree, class) = class_tree("C");
    let m = abstract_method(&mut tree, &[], "void", "m");
    let attached = tree.insert(class, &[m], None).unwrap();
    let method_node = attached.node().unwrap();
    assert_eq!(tree.text(method_node), "void m();");

    let body = empty_block(&mut tree);
    tree.insert(method_node, &[body], None).unwrap();
    assert_eq!(tree.text(method_node), "void m(){}");
    assert!(tree.child_by_role(method_node, Role::Semicolon).is_none());
}

#[test]
fn insert_second_body_is_a_role_conflict() {
    let (mut tree, class) = class_tree("C");
    let m = method(&mut tree, &[], Some("void"), "m");
    let attached = tree.insert(class, &[m], None).unwrap();
    let method_node = attached.node().unwrap();

    let before = tree.text(method_node);
    let body = empty_block(&mut tree);
    let err = tree.insert(method_node, &[body], None).unwrap_err();
    assert_eq!(err.kind.category(), ErrorCategory::RoleConflict);
    assert!(matches!(err.kind, ErrorKind::RoleConflict { role: Role::Body, .. }));
    // Refused edits leave the parent unchanged.
    assert_eq!(tree.text(method_node), before);
}

#[test]
fn insert_with_no_slot_is_refused() {
    let mut tree = Tree::new();
    let block = empty_block(&mut tree);
    let block_node = block.node().unwrap();
    tree.set_root(block_node);
    let stray = parameter(&mut tree, "int", "a");
    let err = tree.insert(block_node, &[stray], None).unwrap_err();
    assert_eq!(err.kind.category(), ErrorCategory::StructuralPrecondition);
    assert!(matches!(err.kind, ErrorKind::NoAdmissibleRole { .. }));
}

#[test]
fn insert_attached_element_is_refused() {
    let (mut tree, list) = param_list_tree(&[("int", "a")]);
    let a = tree.child_by_role(list, Role::Parameter).unwrap();
    let err = tree.insert(list, &[a], None).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyAttached { .. }));
}

#[test]
fn insert_into_detached_parent_is_refused() {
    let mut tree = Tree::new();
    let open = tree.synth_token(TokenKind::LParen).into();
    let close = tree.synth_token(TokenKind::RParen).into();
    let list = tree.create_node(NodeKind::ParameterList, vec![open, close]);
    let a = parameter(&mut tree, "int", "a");
    let err = tree.insert(list, &[a], None).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DetachedParent { .. }));
}

#[test]
fn explicit_anchor_between_parameters() {
    let (mut tree, list) = param_list_tree(&[("int", "a"), ("int", "b")]);
    let a = tree.child_by_role(list, Role::Parameter).unwrap();
    let c = parameter(&mut tree, "int", "c");
    tree.insert(list, &[c], Some(Anchor::after(a))).unwrap();
    assert_eq!(tree.text(list), "(int a, int c, int b)");
}

#[test]
fn explicit_anchor_prepends_after_open_bracket() {
    let (mut tree, list) = param_list_tree(&[("int", "a"), ("int", "b")]);
    let open = tree.child_by_role(list, Role::LParen).unwrap();
    let c = parameter(&mut tree, "int", "c");
    tree.insert(list, &[c], Some(Anchor::after(open))).unwrap();
    assert_eq!(tree.text(list), "(int c, int a, int b)");
}

#[test]
fn insert_else_branch_synthesizes_keyword() {
    let (mut tree, stmt) = if_statement_tree();
    assert_eq!(tree.text(stmt), "if (c) x;");
    let alt = expression_statement(&mut tree, "y");
    tree.insert(stmt, &[alt], None).unwrap();
    assert_eq!(tree.text(stmt), "if (c) x; else y;");
    assert_eq!(tree.child_by_role(stmt, Role::ElseBranch), Some(alt));
}

#[test]
fn insert_reference_synthesizes_list_keyword() {
    let mut tree = Tree::new();
    let list = tree.create_node(NodeKind::ExtendsList, vec![]);
    tree.set_root(list);
    let base = code_reference(&mut tree, "Base");
    tree.insert(list, &[base], None).unwrap();
    assert_eq!(tree.text(list), "extends Base");

    let other = code_reference(&mut tree, "Other");
    tree.insert(list, &[other], None).unwrap();
    assert_eq!(tree.text(list), "extends Base, Other");
}

#[test]
fn insert_run_with_its_own_separators() {
    let (mut tree, list) = param_list_tree(&[("int", "a")]);
    let b = parameter(&mut tree, "int", "b");
    let comma = tree.synth_token(TokenKind::Comma).into();
    let gap = ws(&mut tree);
    let c = parameter(&mut tree, "int", "c");
    tree.insert(list, &[b, comma, gap, c], None).unwrap();
    assert_eq!(tree.text(list), "(int a, int b, int c)");
    assert_eq!(tree.children_by_role(list, Role::Comma).len(), 2);
}
