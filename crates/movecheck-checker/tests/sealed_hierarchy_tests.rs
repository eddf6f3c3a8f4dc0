//! Sealed hierarchy conflicts under both inheritor placement rules.

use movecheck_checker::{
    CheckerOptions, ConflictReport, MoveConflictChecker, Services, partition_usages,
};
use movecheck_common::{DiagnosticCategory, diagnostic_codes};
use movecheck_model::{
    DeclId, DirId, Element, FqName, LanguageSettings, MoveTarget, Platform, Project,
    ProjectBuilder, ProjectSearch, collect_usages,
};

fn check_with(
    project: &Project,
    elements: Vec<DeclId>,
    target: MoveTarget,
    same_package: bool,
) -> ConflictReport {
    let search = ProjectSearch::new(project);
    let roots: Vec<Element> = elements.iter().copied().map(Element::Decl).collect();
    let usages = collect_usages(project, &search, &roots);
    let (mut internal, mut external) = partition_usages(&usages);
    let options = CheckerOptions {
        language: LanguageSettings {
            sealed_inheritors_in_same_package: same_package,
        },
        ..CheckerOptions::default()
    };
    let mut report = ConflictReport::new();
    MoveConflictChecker::new(project, Services::uniform(&search), elements, target, options)
        .check_all_conflicts(&mut external, &mut internal, &mut report);
    report
}

fn into_directory(directory: DirId, package: &str) -> MoveTarget {
    MoveTarget::Directory {
        directory,
        package: FqName::new(package),
    }
}

/// `sealed class Root` with `Leaf1`, `Leaf2` in package `a`, a stray `Leaf3`
/// in package `b`, and an empty package `c`.
struct Hierarchy {
    project: Project,
    root: DeclId,
    leaf1: DeclId,
    leaf2: DeclId,
    dir_b: DirId,
    dir_c: DirId,
}

fn hierarchy() -> Hierarchy {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir_a = b.source_dir(app, "app/src/a", "a");
    let dir_b = b.source_dir(app, "app/src/b", "b");
    let dir_c = b.source_dir(app, "app/src/c", "c");
    let root_file = b.file(dir_a, "Root.kt");
    let leaves_file = b.file(dir_a, "Leaves.kt");
    let stray_file = b.file(dir_b, "Leaf3.kt");
    let root = b.class(root_file, "Root").sealed().build();
    let leaf1 = b.class(leaves_file, "Leaf1").extends(root).build();
    let leaf2 = b.class(leaves_file, "Leaf2").extends(root).build();
    b.class(stray_file, "Leaf3").extends(root).build();
    Hierarchy {
        project: b.finish(),
        root,
        leaf1,
        leaf2,
        dir_b,
        dir_c,
    }
}

// =============================================================================
// Same-package rule
// =============================================================================

#[test]
fn test_members_left_behind_in_source_package() {
    let h = hierarchy();
    let report = check_with(&h.project, vec![h.leaf1], into_directory(h.dir_b, "b"), true);

    let conflicts = report.get(Element::Decl(h.leaf1));
    assert_eq!(conflicts.len(), 1, "{report:?}");
    assert_eq!(
        conflicts[0].code,
        diagnostic_codes::SEALED_HIERARCHY_STILL_IN_SOURCE
    );
    assert_eq!(conflicts[0].category, DiagnosticCategory::Warning);
    assert_eq!(
        conflicts[0].message,
        "Moving 'Leaf1' leaves other members of its sealed hierarchy behind in package 'a' of module 'app': a.Root, a.Leaf2"
    );
}

#[test]
fn test_no_member_at_destination() {
    let h = hierarchy();
    let report = check_with(&h.project, vec![h.leaf1], into_directory(h.dir_c, "c"), true);

    let conflicts = report.get(Element::Decl(h.leaf1));
    assert_eq!(conflicts.len(), 1, "{report:?}");
    assert_eq!(conflicts[0].category, DiagnosticCategory::Error);
    assert_eq!(
        conflicts[0].message,
        "Sealed hierarchy of 'Leaf1' would be broken: none of its members reside in package 'c' of module 'app'. Hierarchy members: a.Leaf1, a.Root, a.Leaf2, b.Leaf3"
    );
}

#[test]
fn test_hierarchy_reported_once() {
    let h = hierarchy();
    let report = check_with(
        &h.project,
        vec![h.leaf1, h.leaf2],
        into_directory(h.dir_c, "c"),
        true,
    );
    assert!(report.contains(Element::Decl(h.leaf1)));
    assert!(!report.contains(Element::Decl(h.leaf2)));
    assert_eq!(report.len(), 1);
}

#[test]
fn test_moving_whole_hierarchy_is_fine() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir_a = b.source_dir(app, "app/src/a", "a");
    let dir_c = b.source_dir(app, "app/src/c", "c");
    let file = b.file(dir_a, "Shapes.kt");
    let shape = b.interface(file, "Shape").sealed().build();
    let circle = b.class(file, "Circle").extends(shape).build();
    let square = b.class(file, "Square").extends(shape).build();
    let p = b.finish();

    let report = check_with(&p, vec![shape, circle, square], into_directory(dir_c, "c"), true);
    assert!(report.is_empty(), "{report:?}");
}

#[test]
fn test_lone_sealed_class_is_fine() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir_a = b.source_dir(app, "app/src/a", "a");
    let dir_c = b.source_dir(app, "app/src/c", "c");
    let file = b.file(dir_a, "Lone.kt");
    let lone = b.class(file, "Lone").sealed().build();
    let p = b.finish();

    let report = check_with(&p, vec![lone], into_directory(dir_c, "c"), true);
    assert!(report.is_empty(), "{report:?}");
}

#[test]
#[should_panic(expected = "has no other members")]
fn test_hierarchy_without_source_members_is_a_bug() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir_a = b.source_dir(app, "app/src/a", "a");
    let dir_c = b.source_dir(app, "app/src/c", "c");
    let file = b.file(dir_a, "Root.kt");
    let java_file = b.file(dir_a, "Impl.java");
    let root = b.class(file, "Root").sealed().build();
    b.class(java_file, "Impl").host().extends(root).build();
    let p = b.finish();

    check_with(&p, vec![root], into_directory(dir_c, "c"), true);
}

// =============================================================================
// Same-file rule
// =============================================================================

#[test]
fn test_strict_subclass_without_parent() {
    let h = hierarchy();
    let report = check_with(&h.project, vec![h.leaf1], into_directory(h.dir_c, "c"), false);

    let conflicts = report.get(Element::Decl(h.leaf1));
    assert_eq!(conflicts.len(), 1, "{report:?}");
    assert_eq!(
        conflicts[0].code,
        diagnostic_codes::SEALED_MEMBER_MUST_MOVE_WITH_PARENT
    );
    assert_eq!(
        conflicts[0].message,
        "Class 'Leaf1' must be moved with sealed parent class 'Root' and all its subclasses"
    );
}

#[test]
fn test_strict_root_without_subclasses() {
    let h = hierarchy();
    let report = check_with(&h.project, vec![h.root], into_directory(h.dir_c, "c"), false);

    let conflicts = report.get(Element::Decl(h.root));
    assert_eq!(conflicts.len(), 1, "{report:?}");
    assert_eq!(
        conflicts[0].message,
        "Sealed class 'Root' must be moved with all its subclasses"
    );
}

#[test]
fn test_strict_reports_each_hierarchy_once() {
    let h = hierarchy();
    let report = check_with(
        &h.project,
        vec![h.leaf1, h.leaf2],
        into_directory(h.dir_c, "c"),
        false,
    );
    assert_eq!(report.len(), 1, "{report:?}");
}

#[test]
fn test_strict_descends_through_sealed_subclasses() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir_a = b.source_dir(app, "app/src/a", "a");
    let dir_c = b.source_dir(app, "app/src/c", "c");
    let file = b.file(dir_a, "Expr.kt");
    let expr = b.class(file, "Expr").sealed().build();
    let binary = b.class(file, "Binary").sealed().extends(expr).build();
    let plus = b.class(file, "Plus").extends(binary).build();
    let p = b.finish();

    let partial = check_with(&p, vec![expr, binary], into_directory(dir_c, "c"), false);
    assert!(partial.contains(Element::Decl(expr)), "{partial:?}");

    let complete = check_with(&p, vec![expr, binary, plus], into_directory(dir_c, "c"), false);
    assert!(complete.is_empty(), "{complete:?}");
}
