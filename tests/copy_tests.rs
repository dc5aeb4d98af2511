//! Copy/context-binder tests: structural fidelity and generic-scope
//! propagation onto detached copies.

mod common;

use arbor::prelude::*;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn copy_preserves_kind_and_child_structure() {
    let (mut tree, list) = param_list_tree(&[("int", "a"), ("int", "b")]);
    let duplicate = tree.copy(list);
    assert_ne!(duplicate, ElementId::Node(list));
    assert_eq!(dump(&tree, duplicate), dump(&tree, list.into()));
    assert_eq!(tree.text(duplicate), "(int a, int b)");
    // The copy is detached.
    assert_eq!(tree.parent_of(duplicate), None);
    assert!(!tree.is_attached(duplicate));
}

#[test]
fn copied_field_resolves_the_same_type_parameter() {
    let (mut tree, _class, field) = generic_class_with_field("C", "T");
    let in_place = resolve_type_parameter(&tree, field.into(), "T").unwrap();

    let duplicate = tree.copy(field);
    let in_copy = resolve_type_parameter(&tree, duplicate, "T").unwrap();
    assert_eq!(in_copy, in_place);
}

#[test]
fn copy_without_context_loses_resolution() {
    let (mut tree, _class, field) = generic_class_with_field("C", "T");
    let bare = tree.copy_with_context(field, None);
    assert_eq!(resolve_type_parameter(&tree, bare, "T"), None);
}

#[test]
fn explicit_context_overrides_the_inferred_scope() {
    let (mut tree, class, field) = generic_class_with_field("C", "T");
    let scope = tree
        .child_by_role(class, Role::TypeParameterList)
        .and_then(ElementId::node);
    let duplicate = tree.copy_with_context(field, scope);
    assert!(resolve_type_parameter(&tree, duplicate, "T").is_some());
    assert_eq!(resolve_type_parameter(&tree, duplicate, "U"), None);
}

#[test]
fn copied_member_can_be_inserted_elsewhere() {
    let (mut tree, class, field) = generic_class_with_field("C", "T");
    let before = tree.children_by_role(class, Role::Member).len();
    let duplicate = tree.copy(field);
    tree.insert(class, &[duplicate], None).unwrap();
    assert_eq!(tree.children_by_role(class, Role::Member).len(), before + 1);
    // Once attached, the copy resolves through its ancestors again.
    assert!(resolve_type_parameter(&tree, duplicate, "T").is_some());
}

#[test]
fn scopes_are_visible_innermost_first() {
    let (tree, class, field) = generic_class_with_field("C", "T");
    let scopes = type_parameter_scopes(&tree, field.into());
    assert_eq!(scopes.len(), 1);
    assert_eq!(
        Some(scopes[0]),
        tree.child_by_role(class, Role::TypeParameterList)
            .and_then(ElementId::node)
    );
}
