use super::*;
use crate::TypeExpr;
use pretty_assertions::assert_eq;

fn func(name: &str, has_body: bool) -> FuncDecl {
    FuncDecl {
        name: name.to_string(),
        receiver: None,
        has_type_params: false,
        signature: Signature::default(),
        has_body,
        span: Span::DUMMY,
    }
}

fn file(kind: SourceKind, name: &str, funcs: Vec<FuncDecl>) -> SourceFile {
    SourceFile {
        path: PathBuf::from(format!("std/{name}.{}", kind.extension())),
        kind,
        package_name: "std".to_string(),
        imports: Imports::new(),
        funcs,
    }
}

#[test]
fn test_is_exported() {
    assert!(is_exported("Fn"));
    assert!(is_exported("X_t1"));
    assert!(!is_exported("t1"));
    assert!(!is_exported("_x"));
    assert!(!is_exported(""));
}

#[test]
fn test_bodyless_excludes_methods() {
    let mut method = func("Method", false);
    method.receiver = Some(Field::named("b", TypeExpr::ident("Banker")));
    assert!(!method.is_bodyless());
    assert!(func("Fn", false).is_bodyless());
    assert!(!func("Fn", true).is_bodyless());
}

#[test]
fn test_bodyless_gno_funcs_in_discovery_order() {
    let mut pkg = Package::new("std", "example.com/std", "std");
    pkg.add_file(file(
        SourceKind::Gno,
        "a",
        vec![func("B", false), func("helper", true), func("a", false)],
    ));
    pkg.add_file(file(SourceKind::Gno, "b", vec![func("C", false)]));

    let names: Vec<_> = pkg
        .bodyless_gno_funcs()
        .map(|(_, f)| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "a", "C"]);
}

#[test]
fn test_find_go_func() {
    let mut pkg = Package::new("std", "example.com/std", "std");
    pkg.add_file(file(
        SourceKind::Go,
        "native",
        vec![func("helper", true), func("X_t1", true), func("Fn", true)],
    ));

    assert_eq!(pkg.find_go_func("Fn").map(|(_, f)| f.name.as_str()), Some("Fn"));
    assert_eq!(
        pkg.find_go_func("X_t1").map(|(_, f)| f.name.as_str()),
        Some("X_t1")
    );
    // Unexported Go functions are never link targets.
    assert!(pkg.find_go_func("helper").is_none());
    assert!(pkg.find_go_func("Missing").is_none());
}
