use super::*;
use pretty_assertions::assert_eq;

fn hierarchy() -> Arc<TypeHierarchy> {
    Arc::new(
        TypeHierarchy::standard_builder()
            .extends("Derived", "Base")
            .extends("Admin", "User")
            .build(),
    )
}

fn base() -> TypeDesc {
    TypeDesc::named("Base")
}

fn derived() -> TypeDesc {
    TypeDesc::named("Derived")
}

#[test]
fn higher_priority_wins_for_subtypes() {
    let mut builder = DispatchTableBuilder::new();
    builder.register(base(), "base", 0);
    builder.register(derived(), "derived", 10);
    let table = builder.build(hierarchy());

    assert_eq!(table.resolve(&derived()), Some(&"derived"));
    assert_eq!(table.resolve(&base()), Some(&"base"));
    assert_eq!(table.resolve(&TypeDesc::named("Unrelated")), None);
}

#[test]
fn broad_entry_with_higher_priority_shadows_narrow_one() {
    let mut builder = DispatchTableBuilder::new();
    builder.register(derived(), "derived", 0);
    builder.register(base(), "base", 10);
    let table = builder.build(hierarchy());

    assert_eq!(table.resolve(&derived()), Some(&"base"));
}

#[test]
fn ties_keep_registration_order() {
    let mut builder = DispatchTableBuilder::new();
    builder
        .register_default(TypeDesc::object(), "first")
        .register_default(TypeDesc::object(), "second")
        .register(TypeDesc::string(), "low", -1);
    let table = builder.build(hierarchy());

    let order: Vec<_> = table.entries().iter().map(|e| *e.handler()).collect();
    assert_eq!(order, vec!["first", "second", "low"]);
    assert_eq!(table.resolve(&TypeDesc::string()), Some(&"first"));
}

#[test]
fn misses_are_cached() {
    let mut builder = DispatchTableBuilder::new();
    builder.register_default(base(), 1_u8);
    let table = builder.build(hierarchy());

    assert_eq!(table.cached_queries(), 0);
    assert_eq!(table.resolve(&TypeDesc::string()), None);
    assert_eq!(table.cached_queries(), 1);
    assert_eq!(table.resolve(&TypeDesc::string()), None);
    assert_eq!(table.resolve(&derived()), Some(&1));
    assert_eq!(table.cached_queries(), 2);
}

#[test]
fn empty_table_never_caches() {
    let table = DispatchTableBuilder::<u8>::new().build(hierarchy());
    assert!(table.is_empty());
    assert_eq!(table.resolve(&base()), None);
    assert_eq!(table.cached_queries(), 0);
}

#[test]
fn generic_entries_match_by_argument() {
    let mut builder = DispatchTableBuilder::new();
    builder.register_default(TypeDesc::list(TypeDesc::string()), "strings");
    builder.register_default(TypeDesc::named("Collection"), "any collection");
    let table = builder.build(hierarchy());

    assert_eq!(
        table.resolve(&TypeDesc::list(TypeDesc::string())),
        Some(&"strings")
    );
    assert_eq!(
        table.resolve(&TypeDesc::list(TypeDesc::named("User"))),
        Some(&"any collection")
    );
    assert_eq!(
        table.resolve(&TypeDesc::set(TypeDesc::string())),
        Some(&"any collection")
    );
}

#[test]
fn resolve_entry_exposes_priority() {
    let mut builder = DispatchTableBuilder::new();
    builder.register(TypeDesc::named("User"), "user", 3);
    let table = builder.build(hierarchy());

    let entry = table.resolve_entry(&TypeDesc::named("Admin"));
    assert_eq!(entry.map(HandlerEntry::priority), Some(3));
    assert_eq!(entry.map(|e| e.ty().clone()), Some(TypeDesc::named("User")));
}

#[test]
fn concurrent_resolution_agrees() {
    let mut builder = DispatchTableBuilder::new();
    builder.register(base(), "base", 0);
    builder.register(derived(), "derived", 10);
    let table = builder.build(hierarchy());

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(table.resolve(&derived()), Some(&"derived"));
                    assert_eq!(table.resolve(&TypeDesc::string()), None);
                }
            });
        }
    });
    assert_eq!(table.cached_queries(), 2);
}
