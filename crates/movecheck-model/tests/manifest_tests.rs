//! Tests for JSON project manifests.

use movecheck_model::{
    DeclKind, Element, ManifestError, Modality, MoveTarget, ProjectManifest, TypeData,
    TypeInterner, Visibility,
};

const MANIFEST: &str = r#"{
  "settings": { "sealedInheritorsInSamePackage": false },
  "sdks": [{ "name": "jdk", "kind": "jdk" }],
  "modules": [
    { "name": "core", "platform": "jvm", "sdks": ["jdk"] },
    { "name": "app", "platform": "jvm", "dependencies": ["core"] }
  ],
  "directories": [
    { "path": "core/src/a", "module": "core", "package": "a" },
    { "path": "app/src/b", "module": "app", "package": "b" },
    { "path": "app/test/b", "module": "app", "test": true, "package": "b" }
  ],
  "files": [
    {
      "directory": "core/src/a",
      "name": "Shapes.kt",
      "declarations": [
        {
          "kind": "class", "name": "Shape", "modality": "sealed",
          "members": [
            { "kind": "function", "name": "area", "visibility": "internal", "type": "Any?" }
          ]
        },
        { "kind": "class", "name": "Box", "members": [
            { "kind": "typeParameter", "name": "T", "bounds": ["a.Shape"] },
            { "kind": "constructor", "primary": true, "params": [{ "name": "item", "type": "T?" }] }
        ] },
        { "kind": "class", "name": "Circle", "supertypes": ["a.Shape"] },
        { "id": "f1", "kind": "function", "name": "f", "params": [{ "name": "x", "type": "a.Box<out a.Shape>" }] },
        { "id": "f2", "kind": "function", "name": "f", "params": [{ "name": "x", "type": "a.Box<*>" }] }
      ]
    },
    {
      "directory": "app/src/b",
      "name": "Use.kt",
      "declarations": [{ "kind": "function", "name": "use", "visibility": "private" }]
    }
  ],
  "references": [
    { "from": "b.use", "to": "a.Circle" },
    { "from": "b.use", "to": "f2" },
    { "file": "app/src/b/Use.kt", "to": "a.Circle", "inImport": true }
  ],
  "move": {
    "declarations": ["a.Circle"],
    "target": { "directory": { "path": "app/src/b" } }
  }
}"#;

#[test]
fn test_manifest_loads_structure() {
    let manifest = ProjectManifest::from_json(MANIFEST).expect("manifest parses");
    assert!(!manifest.settings.sealed_inheritors_in_same_package);
    let project = manifest.build_project().expect("manifest is consistent");

    let shape = project.find_decl("a.Shape").expect("Shape exists");
    assert_eq!(project.decl(shape).modality, Modality::Sealed);
    let area = project.find_decl("a.Shape.area").expect("area exists");
    assert_eq!(project.decl(area).visibility, Visibility::Internal);
    assert_eq!(project.decl(area).ty, Some(TypeInterner::NULLABLE_ANY));

    let circle = project.find_decl("a.Circle").expect("Circle exists");
    assert_eq!(project.direct_inheritors(shape), &[circle]);

    let app = project.module_by_name("app").expect("app module");
    let core = project.module_by_name("core").expect("core module");
    assert!(project.dependency_closure(app).contains(&core));

    let use_fn = project.find_decl("b.use").expect("use exists");
    assert_eq!(project.decl(use_fn).visibility, Visibility::Private);
    assert_eq!(project.references_to(circle).len(), 2);
}

#[test]
fn test_manifest_resolves_type_parameters_and_generics() {
    let project = ProjectManifest::from_json(MANIFEST)
        .and_then(|m| m.build_project())
        .expect("manifest loads");
    let box_class = project.find_decl("a.Box").expect("Box exists");
    let ctor = project.primary_constructor(box_class).expect("primary constructor");
    assert_eq!(project.decl(ctor).kind, DeclKind::Constructor);
    assert_eq!(project.decl(ctor).name, "Box");

    let param_ty = project.types.get(project.decl(ctor).params[0].ty);
    let TypeData::Param { param, nullable } = param_ty else {
        panic!("expected a type parameter type, got {param_ty:?}");
    };
    assert!(nullable);
    assert_eq!(project.decl(*param).name, "T");
    assert_eq!(project.decl(*param).bounds.len(), 1);

    let overloads: Vec<_> = project
        .decl_ids()
        .filter(|&d| project.fq_name(d).as_str() == "a.f")
        .collect();
    assert_eq!(overloads.len(), 2);
    let first = project.types.get(project.decl(overloads[0]).params[0].ty);
    assert_eq!(first.classifier(), Some(box_class));
    assert_eq!(first.arguments().len(), 1);
}

#[test]
fn test_move_request_resolves_elements_and_target() {
    let manifest = ProjectManifest::from_json(MANIFEST).expect("manifest parses");
    let project = manifest.build_project().expect("manifest loads");
    let request = manifest.move_request.as_ref().expect("move section");
    let (elements, target) = request.resolve(&project).expect("request resolves");

    let circle = project.find_decl("a.Circle").expect("Circle exists");
    assert_eq!(elements, vec![Element::Decl(circle)]);
    let MoveTarget::Directory { directory, package } = target else {
        panic!("expected a directory target");
    };
    assert_eq!(project.directory(directory).path, "app/src/b");
    assert_eq!(package.as_str(), "b");
}

#[test]
fn test_manifest_errors_name_the_offender() {
    let unknown_module = r#"{
      "modules": [{ "name": "app", "platform": "jvm", "dependencies": ["ghost"] }]
    }"#;
    let err = ProjectManifest::from_json(unknown_module)
        .and_then(|m| m.build_project())
        .expect_err("unknown dependency");
    assert!(matches!(err, ManifestError::UnknownModule(ref name) if name == "ghost"));
    assert_eq!(err.to_string(), "unknown module 'ghost'");

    let bad_type = r#"{
      "modules": [{ "name": "app", "platform": "jvm" }],
      "directories": [{ "path": "src", "module": "app", "package": "p" }],
      "files": [{ "directory": "src", "name": "P.kt", "declarations": [
        { "kind": "property", "name": "x", "type": "p.Missing" }
      ] }]
    }"#;
    let err = ProjectManifest::from_json(bad_type)
        .and_then(|m| m.build_project())
        .expect_err("unknown classifier");
    assert!(matches!(err, ManifestError::InvalidType { .. }));

    let two_roots = r#"{
      "sdks": [{ "name": "jdk", "kind": "jdk" }],
      "modules": [{ "name": "app", "platform": "jvm" }],
      "directories": [{ "path": "src", "module": "app", "sdk": "jdk" }]
    }"#;
    let err = ProjectManifest::from_json(two_roots)
        .and_then(|m| m.build_project())
        .expect_err("two roots");
    assert!(matches!(err, ManifestError::AmbiguousRoot(_)));

    let err = ProjectManifest::from_json("{ not json").expect_err("syntax error");
    assert!(matches!(err, ManifestError::Json(_)));
}
