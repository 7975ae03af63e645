use genstd_ir::{ImportSpec, Imports};
use genstd_parse::parse_type_expr;
use pretty_assertions::assert_eq;

use super::*;
use crate::LinkedType;

const GO_HOME: &str = "github.com/gnolang/gno/gnovm/stdlibs/std";

fn go_imports() -> Imports {
    [
        ImportSpec::aliased("gno", "github.com/gnolang/gno/gnovm/pkg/gnolang"),
        ImportSpec::new("github.com/gnolang/gno/tm2/pkg/crypto"),
    ]
    .into_iter()
    .collect()
}

fn gno_imports() -> Imports {
    [ImportSpec::new("std"), ImportSpec::new("math")]
        .into_iter()
        .collect()
}

fn merge(gno: &str, go: &str) -> Result<MergedType, MergeError> {
    let registry = LinkedTypeRegistry::stdlibs();
    let (gno_imports, go_imports) = (gno_imports(), go_imports());
    let unifier = Unifier::new(
        &registry,
        Side::new("std", &gno_imports),
        Side::new(GO_HOME, &go_imports),
    );
    unifier.merge(
        &parse_type_expr(gno).unwrap(),
        &parse_type_expr(go).unwrap(),
    )
}

#[test]
fn test_identical_builtin() {
    assert_eq!(merge("int", "int"), Ok(MergedType::Ident("int".into())));
}

#[test]
fn test_nested_composite() {
    assert_eq!(
        merge("*[11][]rune", "*[11][]rune"),
        Ok(MergedType::Pointer(Box::new(MergedType::Array {
            len: "11".into(),
            elem: Box::new(MergedType::Slice(Box::new(MergedType::Ident(
                "rune".into()
            )))),
        })))
    );
}

#[test]
fn test_linked_bare_gno_name() {
    assert_eq!(
        merge("Address", "crypto.Bech32Address"),
        Ok(MergedType::Linked(LinkedType::new(
            "std",
            "Address",
            "github.com/gnolang/gno/tm2/pkg/crypto",
            "Bech32Address"
        )))
    );
}

#[test]
fn test_linked_qualified_gno_name() {
    assert_eq!(
        merge("std.Realm", "Realm"),
        Ok(MergedType::Linked(LinkedType::new(
            "std",
            "Realm",
            GO_HOME,
            "Realm"
        )))
    );
}

#[test]
fn test_equal_names_prefer_registry() {
    assert_eq!(
        merge("Banker", "Banker"),
        Ok(MergedType::Linked(LinkedType::new(
            "std", "Banker", GO_HOME, "Banker"
        )))
    );
}

#[test]
fn test_linked_inside_composite() {
    let merged = merge("[]Address", "[]crypto.Bech32Address").unwrap();
    assert_eq!(merged.to_string(), "[]crypto.Bech32Address");
    assert!(matches!(merged.innermost(), MergedType::Linked(_)));
}

#[test]
fn test_mismatches() {
    for (gno, go) in [
        ("int", "string"),
        ("*int", "int"),
        ("string", "*string"),
        ("*string", "*int"),
        ("[]int", "[1]int"),
        ("[1]int", "[]int"),
        ("[2]int", "[2]string"),
        ("[(11)]int", "[(11)]string"),
        ("Address", "string"),
        ("math.X", "X"),
        ("[8]int", "[0x8]int"),
        ("[...]int", "[...]int"),
        ("[...]int", "[3]int"),
        ("Address", "Bech32Address"),
        ("unknown.T", "unknown.T"),
    ] {
        let result = merge(gno, go);
        assert!(
            matches!(result, Err(MergeError::Mismatch { .. })),
            "{gno} vs {go}: {result:?}"
        );
    }
}

#[test]
fn test_mismatch_reports_innermost_pair() {
    let err = merge("*[]int", "*[]string").unwrap_err();
    assert_eq!(err.to_string(), "gno type `int` does not match go type `string`");
    assert_eq!(err.code(), genstd_diagnostic::ErrorCode::E2003);
}

#[test]
fn test_unsupported() {
    for source in [
        "map[string]string",
        "func(s string)",
        "interface{}",
        "struct{}",
    ] {
        let err = merge(source, source).unwrap_err();
        assert!(
            matches!(err, MergeError::Unsupported { .. }),
            "{source}: {err:?}"
        );
        assert!(err.to_string().contains("not implemented"), "{err}");
    }
}

#[test]
fn test_invalid_expression() {
    for source in ["1 + 2", "chan int", "<-chan int", "[]chan int"] {
        let err = merge(source, source).unwrap_err();
        assert!(
            matches!(err, MergeError::InvalidExpression { .. }),
            "{source}: {err:?}"
        );
        assert!(err.to_string().contains("invalid expression"), "{err}");
        assert_eq!(err.code(), genstd_diagnostic::ErrorCode::E2005);
    }
}

#[test]
fn test_refusal_beats_mismatch() {
    assert!(matches!(
        merge("int", "map[string]int"),
        Err(MergeError::Unsupported { .. })
    ));
    assert!(matches!(
        merge("*struct{}", "*int"),
        Err(MergeError::Unsupported { .. })
    ));
    assert!(matches!(
        merge("[]int", "(int)"),
        Err(MergeError::InvalidExpression { .. })
    ));
}

#[test]
fn test_same_import_on_both_sides() {
    let registry = LinkedTypeRegistry::stdlibs();
    let imports: Imports = [ImportSpec::new("errors")].into_iter().collect();
    let unifier = Unifier::new(
        &registry,
        Side::new("io", &imports),
        Side::new("example.com/io", &imports),
    );
    let merged = unifier
        .merge(
            &TypeExpr::qualified("errors", "E"),
            &TypeExpr::qualified("errors", "E"),
        )
        .unwrap();
    assert_eq!(merged, MergedType::Qualified {
        path: "errors".into(),
        name: "E".into(),
    });
}
