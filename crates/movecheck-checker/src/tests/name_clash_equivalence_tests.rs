use super::*;
use movecheck_model::{Platform, ProjectBuilder, TypeArg, Variance};

#[test]
fn test_functions_match_on_parameter_prefix() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let any = b.any_type();
    let f1 = b.function(file, "f").param("x", any).build();
    let f2 = b.function(file, "f").param("y", any).param("z", any).build();
    let g = b.function(file, "g").param("x", any).build();
    let p = b.finish();

    assert!(declarations_equivalent(&p, f1, f2));
    assert!(declarations_equivalent(&p, f2, f1));
    assert!(!declarations_equivalent(&p, f1, g));
}

#[test]
fn test_function_never_matches_property() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let function = b.function(file, "value").build();
    let property = b.property(file, "value").build();
    let class_value = b.class(file, "value").build();
    let p = b.finish();

    assert!(!declarations_equivalent(&p, function, property));
    assert!(!declarations_equivalent(&p, property, function));
    assert!(declarations_equivalent(&p, property, class_value));
    assert!(declarations_equivalent(&p, class_value, property));
}

#[test]
fn test_type_equivalence_rules() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let i1 = b.interface(file, "I1").build();
    let i2 = b.interface(file, "I2").build();
    let both = b.class(file, "Both").extends(i1).extends(i2).build();
    let plain = b.class(file, "Plain").build();
    let other_plain = b.class(file, "OtherPlain").build();
    let list = b.interface(file, "List").build();
    let plain_ty = b.class_type(plain);
    let other_plain_ty = b.class_type(other_plain);
    let both_ty = b.class_type(both);
    let any = b.any_type();
    let nullable_any = b.nullable_any_type();
    let list_of_plain = b.generic_type(
        list,
        vec![TypeArg::Type {
            variance: Variance::Invariant,
            ty: plain_ty,
        }],
    );
    let list_of_star = b.generic_type(list, vec![TypeArg::Star]);
    let p = b.finish();

    assert!(types_equivalent(&p, any, nullable_any, 0));
    // A class without supertypes is compared through `Any`.
    assert!(types_equivalent(&p, plain_ty, other_plain_ty, 0));
    // Two supertypes on one side: only identity matches.
    assert!(!types_equivalent(&p, both_ty, plain_ty, 0));
    assert!(!types_equivalent(&p, plain_ty, both_ty, 0));
    assert!(types_equivalent(&p, list_of_plain, list_of_star, 0));
}

#[test]
fn test_cyclic_bounds_terminate() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let holder = b.class(file, "Holder").build();
    let x = b.type_parameter(holder, "X").build();
    let y = b.type_parameter(holder, "Y").build();
    let x_ty = b.param_type(x);
    let y_ty = b.param_type(y);
    b.add_bound(x, y_ty);
    b.add_bound(y, x_ty);
    let p = b.finish();

    assert!(!types_equivalent(&p, x_ty, y_ty, 0));
    assert!(types_equivalent(&p, x_ty, x_ty, 0));
}

#[test]
fn test_interface_implementors_are_distinct() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let i = b.interface(file, "I").build();
    let j = b.interface(file, "J").build();
    let foo = b.class(file, "Foo").extends(i).build();
    let bar = b.class(file, "Bar").extends(j).build();
    let baz = b.class(file, "Baz").extends(i).build();
    let base = b.class(file, "Base").open().build();
    let left = b.class(file, "Left").extends(base).build();
    let right = b.class(file, "Right").extends(base).build();
    let foo_ty = b.class_type(foo);
    let bar_ty = b.class_type(bar);
    let baz_ty = b.class_type(baz);
    let left_ty = b.class_type(left);
    let right_ty = b.class_type(right);
    let f_foo = b.function(file, "f").param("x", foo_ty).build();
    let f_bar = b.function(file, "f").param("x", bar_ty).build();
    let p = b.finish();

    // Implementing only interfaces leaves `Any` as a second supertype.
    assert!(!types_equivalent(&p, foo_ty, bar_ty, 0));
    assert!(!types_equivalent(&p, bar_ty, foo_ty, 0));
    assert!(!types_equivalent(&p, foo_ty, baz_ty, 0));
    assert!(types_equivalent(&p, foo_ty, foo_ty, 0));
    assert!(!declarations_equivalent(&p, f_foo, f_bar));
    assert!(!declarations_equivalent(&p, f_bar, f_foo));

    // A single superclass is still compared through.
    assert!(types_equivalent(&p, left_ty, right_ty, 0));
}

#[test]
fn test_type_equivalence_is_symmetric() {
    let mut b = ProjectBuilder::new();
    let app = b.module("app", Platform::Jvm);
    let dir = b.source_dir(app, "app/src/a", "a");
    let file = b.file(dir, "A.kt");
    let plain = b.class(file, "Plain").build();
    let other_plain = b.class(file, "OtherPlain").build();
    let i = b.interface(file, "I").build();
    let with_i = b.class(file, "WithI").extends(i).build();
    let list = b.interface(file, "List").build();
    let map = b.interface(file, "Map").build();
    let holder = b.class(file, "Holder").build();
    let t = b.type_parameter(holder, "T").build();
    let u = b.type_parameter(holder, "U").build();
    let free = b.type_parameter(holder, "V").build();

    let plain_ty = b.class_type(plain);
    let other_plain_ty = b.class_type(other_plain);
    let with_i_ty = b.class_type(with_i);
    b.add_bound(t, plain_ty);
    b.add_bound(u, other_plain_ty);
    let t_ty = b.param_type(t);
    let u_ty = b.param_type(u);
    let free_ty = b.param_type(free);
    let any = b.any_type();
    let nullable_any = b.nullable_any_type();
    let list_of_plain = b.generic_type(
        list,
        vec![TypeArg::Type {
            variance: Variance::Out,
            ty: plain_ty,
        }],
    );
    let list_of_star = b.generic_type(list, vec![TypeArg::Star]);
    let map_of_star = b.generic_type(map, vec![TypeArg::Star, TypeArg::Star]);
    let p = b.finish();

    assert!(types_equivalent(&p, any, nullable_any, 0));
    assert!(types_equivalent(&p, nullable_any, any, 0));
    assert!(types_equivalent(&p, list_of_plain, list_of_star, 0));
    assert!(types_equivalent(&p, list_of_star, list_of_plain, 0));
    assert!(types_equivalent(&p, t_ty, u_ty, 0));
    assert!(types_equivalent(&p, u_ty, t_ty, 0));

    let shapes = [
        plain_ty,
        other_plain_ty,
        with_i_ty,
        t_ty,
        u_ty,
        free_ty,
        any,
        nullable_any,
        list_of_plain,
        list_of_star,
        map_of_star,
    ];
    for &left in &shapes {
        for &right in &shapes {
            assert_eq!(
                types_equivalent(&p, left, right, 0),
                types_equivalent(&p, right, left, 0),
                "{left:?} vs {right:?}"
            );
        }
    }
}
