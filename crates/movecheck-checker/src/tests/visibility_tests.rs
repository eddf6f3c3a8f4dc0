use super::*;
use movecheck_model::{PackageFragment, Platform, ProjectBuilder};

#[test]
fn test_private_member_visible_within_class_only() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let class_a = b.class(file, "A").build();
    let secret = b.function(class_a, "secret").private().build();
    let nested = b.class(class_a, "Nested").build();
    let nested_fun = b.function(nested, "g").build();
    let class_b = b.class(file, "B").build();
    let p = b.finish();

    let what = PredictedDecl::original(secret);
    assert!(is_visible(&p, &what, &Container::Decl(class_a)));
    assert!(is_visible(&p, &what, &Container::Decl(nested_fun)));
    assert!(!is_visible(&p, &what, &Container::Decl(class_b)));
    assert!(!is_visible(&p, &what, &p.container(class_a)));
}

#[test]
fn test_companion_private_visible_in_owner() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let class_a = b.class(file, "A").build();
    let companion = b.object(class_a, "Companion").companion().build();
    let helper = b.function(companion, "helper").private().build();
    let method = b.function(class_a, "m").build();
    let p = b.finish();

    assert!(is_visible(
        &p,
        &PredictedDecl::original(helper),
        &Container::Decl(method)
    ));
}

#[test]
fn test_private_top_level_needs_same_file() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let other_file = b.file(dir, "B.kt");
    let helper = b.function(file, "helper").private().build();
    let same_file_user = b.function(file, "user").build();
    let other_user = b.function(other_file, "user2").build();
    let p = b.finish();

    let what = PredictedDecl::original(helper);
    assert!(is_visible(&p, &what, &Container::Decl(same_file_user)));
    assert!(!is_visible(&p, &what, &Container::Decl(other_user)));

    // A file that does not exist yet is never "the same file".
    let new_file = Container::Package(PackageFragment {
        module: Some(app),
        fq_name: "a".into(),
        file: None,
    });
    let moved = PredictedDecl::moved_to(&p, helper, new_file, None).unwrap();
    assert!(!is_visible(&p, &moved, &Container::Decl(same_file_user)));
}

#[test]
fn test_internal_visible_in_module_and_implementations() {
    let mut b = ProjectBuilder::new();
    let common = b.module("common", Platform::Common);
    let jvm = b.module("jvm", Platform::Jvm);
    let other = b.module("other", Platform::Jvm);
    b.add_implemented_module(jvm, common);
    b.add_dependency(other, common);
    let common_dir = b.source_dir(common, "common/src", "a");
    let jvm_dir = b.source_dir(jvm, "jvm/src", "a");
    let other_dir = b.source_dir(other, "other/src", "a");
    let common_file = b.file(common_dir, "A.kt");
    let jvm_file = b.file(jvm_dir, "B.kt");
    let other_file = b.file(other_dir, "C.kt");
    let internal = b.function(common_file, "shared").internal().build();
    let same_module = b.function(common_file, "f").build();
    let actual_side = b.function(jvm_file, "g").build();
    let outsider = b.function(other_file, "h").build();
    let p = b.finish();

    let what = PredictedDecl::original(internal);
    assert!(is_visible(&p, &what, &Container::Decl(same_module)));
    assert!(is_visible(&p, &what, &Container::Decl(actual_side)));
    assert!(!is_visible(&p, &what, &Container::Decl(outsider)));
}

#[test]
fn test_protected_visible_from_subclasses() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let base = b.class(file, "Base").open().build();
    let hook = b.function(base, "hook").protected().build();
    let derived = b.class(file, "Derived").extends(base).build();
    let derived_fun = b.function(derived, "run").build();
    let unrelated = b.class(file, "Unrelated").build();
    let p = b.finish();

    let what = PredictedDecl::original(hook);
    assert!(is_visible(&p, &what, &Container::Decl(derived_fun)));
    assert!(!is_visible(&p, &what, &Container::Decl(unrelated)));
    assert!(!is_visible(&p, &what, &p.container(base)));
}

#[test]
fn test_protected_companion_member_visible_from_owner_subclass() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let base = b.class(file, "Base").open().build();
    let companion = b.object(base, "Companion").companion().build();
    let factory = b.function(companion, "create").protected().build();
    let derived = b.class(file, "Derived").extends(base).build();
    let p = b.finish();

    assert!(is_visible(
        &p,
        &PredictedDecl::original(factory),
        &Container::Decl(derived)
    ));
}

#[test]
fn test_package_visibility_for_host_view() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let a_dir = b.source_dir(app, "app/src/a", "a");
    let b_dir = b.source_dir(app, "app/src/b", "b");
    let a_file = b.file(a_dir, "Util.java");
    let a_other = b.file(a_dir, "Other.java");
    let b_file = b.file(b_dir, "User.java");
    let util = b.class(a_file, "Util").build();
    let same_package = b.class(a_other, "Other").host().build();
    let other_package = b.class(b_file, "User").host().build();
    let p = b.finish();

    let what = PredictedDecl::original(util).with_visibility(Some(Visibility::Package));
    assert!(is_visible(&p, &what, &Container::Decl(same_package)));
    assert!(!is_visible(&p, &what, &Container::Decl(other_package)));
}

#[test]
fn test_protected_becomes_public_in_package() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let class_a = b.class(file, "A").open().build();
    let f = b.function(class_a, "f").protected().build();
    let holder = b.class(file, "Holder").build();
    let alias = b.type_alias(file, "Alias").build();
    let p = b.finish();

    let package = Container::Package(p.fragment_of_file(file));
    let to_package = PredictedDecl::moved_to(&p, f, package, None);
    assert_eq!(
        to_package.map(|d| d.visibility(&p)),
        Some(Visibility::Public)
    );
    let to_class = PredictedDecl::moved_to(&p, f, Container::Decl(holder), None);
    assert_eq!(
        to_class.map(|d| d.visibility(&p)),
        Some(Visibility::Protected)
    );
    assert!(PredictedDecl::moved_to(&p, alias, Container::Decl(holder), None).is_none());
}

#[test]
fn test_constructor_requires_visible_class() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let other_file = b.file(dir, "B.kt");
    let hidden = b.class(file, "Hidden").private().build();
    let ctor = b.primary_constructor(hidden).build();
    let user = b.function(other_file, "user").build();
    let p = b.finish();

    assert!(!is_visible(
        &p,
        &PredictedDecl::original(ctor),
        &Container::Decl(user)
    ));
}
