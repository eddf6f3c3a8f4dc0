//! Tests for structural project queries.

use movecheck_model::{
    Container, DeclFlags, Element, Platform, ProjectBuilder, ProjectSearch, RefFlags, UsageSearch,
    Visibility, collect_usages,
};

#[test]
fn test_fq_names_and_containers() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let root_dir = b.source_dir(app, "app/src", "");
    let file = b.file(dir, "A.kt");
    let top_file = b.file(root_dir, "Top.kt");
    let class_a = b.class(file, "A").build();
    let inner = b.class(class_a, "Inner").build();
    let f = b.function(inner, "f").build();
    let top = b.function(top_file, "top").build();
    let p = b.finish();

    assert_eq!(p.fq_name(f).as_str(), "a.A.Inner.f");
    assert_eq!(p.fq_name(top).as_str(), "top");
    assert_eq!(p.containing_class(f), Some(inner));
    assert_eq!(p.containing_class(class_a), None);

    let containers = p.containers(f);
    assert_eq!(containers.len(), 3);
    assert_eq!(containers[0], Container::Decl(inner));
    assert_eq!(containers[1], Container::Decl(class_a));
    assert!(containers[2].is_package());
    assert_eq!(p.container_fq_name(&containers[2]).as_str(), "a");

    assert_eq!(p.file_of_decl(f), Some(file));
    assert_eq!(p.module_of_decl(f), Some(app));
    assert_eq!(p.file_path(file), "app/src/a/A.kt");
    assert_eq!(p.find_decl("a.A.Inner"), Some(inner));
    assert_eq!(p.module_by_name("app"), Some(app));
}

#[test]
fn test_ancestry_of_references() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let class_a = b.class(file, "A").build();
    let f = b.function(class_a, "f").build();
    let g = b.function(file, "g").build();
    let in_f = b.reference(f, g);
    let import = b.file_reference(file, Some(class_a), RefFlags::IN_IMPORT);
    let p = b.finish();

    assert!(p.is_ancestor(Element::Decl(class_a), Element::Reference(in_f)));
    assert!(p.is_ancestor(Element::File(file), Element::Reference(import)));
    assert!(!p.is_ancestor(Element::Decl(class_a), Element::Reference(import)));
    assert!(p.is_ancestor(Element::Decl(f), Element::Decl(f)));

    assert_eq!(p.references_within(class_a), vec![in_f]);
    assert_eq!(p.references_to(g), &[in_f]);
    assert!(p.reference(import).is_in_import());
    assert_eq!(p.reference(in_f).text, "g");
}

#[test]
fn test_importable_names() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let class_a = b.class(file, "A").build();
    let ctor = b.primary_constructor(class_a).build();
    let method = b.function(class_a, "m").build();
    let nested = b.class(class_a, "N").build();
    let obj = b.object(file, "O").build();
    let obj_fun = b.function(obj, "f").build();
    let t = b.type_parameter(class_a, "T").build();
    let p = b.finish();

    assert_eq!(p.importable_fq_name(ctor).map(|n| n.to_string()), Some("a.A".into()));
    assert_eq!(p.importable_fq_name(method), None);
    assert_eq!(p.importable_fq_name(nested).map(|n| n.to_string()), Some("a.A.N".into()));
    assert_eq!(p.importable_fq_name(obj_fun).map(|n| n.to_string()), Some("a.O.f".into()));
    assert_eq!(p.importable_fq_name(t), None);
    assert_eq!(p.primary_constructor(class_a), Some(ctor));
    assert!(p.decl(ctor).flags.contains(DeclFlags::PRIMARY_CONSTRUCTOR));
}

#[test]
fn test_class_hierarchy_queries() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let root = b.class(file, "Root").open().build();
    let iface = b.interface(file, "I").build();
    let mid = b.class(file, "Mid").open().extends(root).build();
    let leaf = b.class(file, "Leaf").extends(mid).extends(iface).build();
    let p = b.finish();

    assert!(p.is_subclass_of(leaf, root));
    assert!(p.is_subclass_of(leaf, leaf));
    assert!(!p.is_subclass_of(root, leaf));
    assert_eq!(p.direct_inheritors(root), &[mid]);
    assert_eq!(p.direct_inheritors(iface), &[leaf]);
    assert_eq!(p.superclass_not_any(leaf), Some(mid));
    assert_eq!(p.super_interfaces(leaf), vec![iface]);
}

#[test]
fn test_cyclic_supertypes_terminate() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let x = b.class(file, "X").build();
    let y = b.class(file, "Y").extends(x).build();
    let z = b.class(file, "Z").build();
    let y_ty = b.class_type(y);
    b.add_supertype(x, y_ty);
    let p = b.finish();

    assert!(p.is_subclass_of(x, y));
    assert!(p.is_subclass_of(y, x));
    assert!(!p.is_subclass_of(x, z));
}

#[test]
fn test_overrides_and_member_scope() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let base = b.class(file, "Base").open().build();
    b.primary_constructor(base).build();
    let base_f = b.function(base, "f").open().build();
    let base_hidden = b.function(base, "hidden").private().build();
    let derived = b.class(file, "Derived").open().extends(base).build();
    let derived_f = b.function(derived, "f").open().overrides(base_f).build();
    let own_private = b.property(derived, "secret").private().build();
    let leaf = b.class(file, "Leaf").extends(derived).build();
    let leaf_f = b.function(leaf, "f").overrides(derived_f).build();
    let p = b.finish();

    assert_eq!(p.deepest_overridden(leaf_f), vec![base_f]);
    assert!(p.deepest_overridden(base_f).is_empty());

    let scope = p.class_member_scope(derived);
    assert!(scope.contains(&derived_f));
    assert!(scope.contains(&own_private));
    assert!(scope.contains(&base_f));
    assert!(!scope.contains(&base_hidden));
    assert!(scope.iter().all(|&m| p.decl(m).visibility != Visibility::Private || m == own_private));
    assert_eq!(p.constructors(derived), vec![]);
}

#[test]
fn test_package_members_follow_module_scope() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let lib = b.module("lib", Platform::Jvm);
    let other = b.module("other", Platform::Jvm);
    b.add_dependency(app, lib);
    let app_dir = b.source_dir(app, "app/src/p", "p");
    let lib_dir = b.source_dir(lib, "lib/src/p", "p");
    let other_dir = b.source_dir(other, "other/src/p", "p");
    let app_file = b.file(app_dir, "App.kt");
    let lib_file = b.file(lib_dir, "Lib.kt");
    let other_file = b.file(other_dir, "Other.kt");
    let x = b.class(app_file, "X").build();
    let y = b.class(lib_file, "Y").build();
    let z = b.class(other_file, "Z").build();
    let p = b.finish();

    let package = "p".into();
    assert_eq!(p.package_members(&package, Some(app)), vec![x, y]);
    assert_eq!(p.package_members(&package, Some(lib)), vec![y]);
    assert_eq!(p.package_members(&package, None), vec![x, y, z]);
    assert!(p.find_package(&package, app).is_some());
    assert!(p.find_package(&"q".into(), app).is_none());
}

#[test]
fn test_collect_usages_marks_internal_references() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let class_a = b.class(file, "A").build();
    let f = b.function(class_a, "f").build();
    let user = b.function(file, "user").build();
    let self_ref = b.reference(f, class_a);
    let outside_class = b.reference(user, class_a);
    let outside_member = b.reference(user, f);
    let p = b.finish();

    let search = ProjectSearch::new(&p);
    assert_eq!(search.references_to(class_a), vec![self_ref, outside_class]);

    let usages = collect_usages(&p, &search, &[Element::Decl(class_a)]);
    assert_eq!(usages.len(), 3);
    let internal: Vec<_> = usages.iter().filter(|u| u.is_internal).collect();
    assert_eq!(internal.len(), 1);
    assert_eq!(internal[0].reference, self_ref);
    assert!(
        usages
            .iter()
            .any(|u| u.reference == outside_member && u.referenced == f && !u.is_internal)
    );
}
