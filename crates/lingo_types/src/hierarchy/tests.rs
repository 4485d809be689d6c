use super::*;

fn users() -> TypeHierarchy {
    TypeHierarchy::standard_builder()
        .extends("Admin", "User")
        .extends("ArrayList", "List")
        .build()
}

#[test]
fn identity_and_object() {
    let h = users();
    let user = TypeDesc::named("User");
    assert!(h.is_supertype(&user, &user));
    assert!(h.is_supertype(&TypeDesc::object(), &user));
    assert!(h.is_supertype(&TypeDesc::object(), &TypeDesc::list(user.clone())));
    assert!(!h.is_supertype(&user, &TypeDesc::object()));
}

#[test]
fn declared_subtypes() {
    let h = users();
    let user = TypeDesc::named("User");
    let admin = TypeDesc::named("Admin");
    assert!(h.is_supertype(&user, &admin));
    assert!(!h.is_supertype(&admin, &user));
}

#[test]
fn transitive_builtin_edges() {
    let h = TypeHierarchy::standard();
    assert!(h.is_supertype(&TypeDesc::component_like(), &TypeDesc::message()));
    assert!(h.is_supertype(&TypeDesc::component(), &TypeDesc::message()));
    assert!(!h.is_supertype(&TypeDesc::message(), &TypeDesc::component()));
}

#[test]
fn raw_supertype_matches_any_parameterization() {
    let h = users();
    let strings = TypeDesc::list(TypeDesc::string());
    assert!(h.is_supertype(&TypeDesc::named("List"), &strings));
    assert!(h.is_supertype(&TypeDesc::named("Collection"), &strings));
}

#[test]
fn type_arguments_are_invariant() {
    let h = users();
    let strings = TypeDesc::list(TypeDesc::string());
    let objects = TypeDesc::list(TypeDesc::object());
    assert!(!h.is_supertype(&objects, &strings));
    assert!(!h.is_supertype(&strings, &objects));
    assert!(!h.is_supertype(
        &TypeDesc::list(TypeDesc::named("User")),
        &TypeDesc::list(TypeDesc::named("Admin"))
    ));
}

#[test]
fn wildcard_arguments() {
    let h = users();
    let any_list = TypeDesc::list(TypeDesc::wildcard());
    assert!(h.is_supertype(&any_list, &TypeDesc::list(TypeDesc::string())));
    assert!(!h.is_supertype(&any_list, &TypeDesc::set(TypeDesc::string())));
    assert!(!h.is_supertype(&TypeDesc::string(), &TypeDesc::wildcard()));
}

#[test]
fn edges_carry_arguments() {
    let h = users();
    let array_list = TypeDesc::generic("ArrayList", [TypeDesc::string()]);
    assert!(h.is_supertype(&TypeDesc::list(TypeDesc::string()), &array_list));
    assert!(h.is_supertype(&TypeDesc::collection(TypeDesc::string()), &array_list));
    assert!(!h.is_supertype(&TypeDesc::list(TypeDesc::named("User")), &array_list));
}

#[test]
fn cycles_terminate() {
    let h = TypeHierarchy::builder()
        .extends("A", "B")
        .extends("B", "A")
        .build();
    assert!(h.is_supertype(&TypeDesc::named("A"), &TypeDesc::named("B")));
    assert!(!h.is_supertype(&TypeDesc::named("C"), &TypeDesc::named("A")));
}

#[test]
fn assignability_is_erased() {
    let h = users();
    let declared = TypeDesc::list(TypeDesc::named("User"));
    let runtime = TypeDesc::list(TypeDesc::string());
    assert!(h.is_assignable(&declared, &runtime));
    assert!(!h.is_assignable(&TypeDesc::named("User"), &TypeDesc::string()));
}

#[test]
fn duplicate_edges_are_ignored() {
    let h = TypeHierarchy::builder()
        .extends("Admin", "User")
        .extends("Admin", "User")
        .build();
    assert_eq!(h.direct_supertypes("Admin").len(), 1);
    assert!(h.direct_supertypes("Nobody").is_empty());
}
