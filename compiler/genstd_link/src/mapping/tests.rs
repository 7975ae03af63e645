use genstd_ir::TypeExpr;
use pretty_assertions::assert_eq;

use super::*;
use crate::LinkedType;

const GNOLANG: &str = "github.com/gnolang/gno/gnovm/pkg/gnolang";
const STD_HOME: &str = "github.com/gnolang/gno/gnovm/stdlibs/std";
const CRYPTO: &str = "github.com/gnolang/gno/tm2/pkg/crypto";

fn int_slot() -> MappingType {
    MappingType::merged(
        TypeExpr::ident("int"),
        MergedType::Ident("int".into()),
        STD_HOME,
    )
}

fn address_slot() -> MappingType {
    MappingType::merged(
        TypeExpr::pointer(TypeExpr::ident("Address")),
        MergedType::Pointer(Box::new(MergedType::Linked(LinkedType::new(
            "std",
            "Address",
            CRYPTO,
            "Bech32Address",
        )))),
        STD_HOME,
    )
}

fn boxed_slot() -> MappingType {
    MappingType::boxed(
        parse_type("struct{m1 map[string]interface{}}"),
        GNOLANG,
        "TypedValue",
        STD_HOME,
    )
}

fn parse_type(source: &str) -> TypeExpr {
    genstd_parse::parse_type_expr(source).unwrap()
}

fn mapping(name: &str, needs_context: bool, params: Vec<MappingType>) -> Mapping {
    Mapping::new(
        "std",
        name,
        STD_HOME,
        name,
        needs_context,
        params,
        vec![int_slot()],
        GNOLANG,
    )
}

#[test]
fn test_import_ident() {
    assert_eq!(
        import_ident(CRYPTO),
        "lib_github_com_gnolang_gno_tm2_pkg_crypto"
    );
    assert_eq!(import_ident("math/bits"), "lib_math_bits");
    assert_eq!(import_ident("a-b.c"), "lib_a_b_c");
}

#[test]
fn test_builtin_slot() {
    let slot = int_slot();
    assert_eq!(slot.gno_type_string(), "int");
    assert_eq!(slot.go_qualified_name(), "int");
    assert!(!slot.is_boxed());
    assert!(slot.merged_type().is_some());
}

#[test]
fn test_linked_slot() {
    let slot = address_slot();
    assert_eq!(slot.gno_type_string(), "*Address");
    assert_eq!(
        slot.go_qualified_name(),
        "*lib_github_com_gnolang_gno_tm2_pkg_crypto.Bech32Address"
    );
    assert_eq!(slot.go_type().to_string(), "*crypto.Bech32Address");
}

#[test]
fn test_home_package_ident_is_qualified() {
    let slot = MappingType::merged(
        TypeExpr::slice(TypeExpr::ident("Local")),
        MergedType::Slice(Box::new(MergedType::Ident("Local".into()))),
        STD_HOME,
    );
    assert_eq!(
        slot.go_qualified_name(),
        "[]lib_github_com_gnolang_gno_gnovm_stdlibs_std.Local"
    );
}

#[test]
fn test_boxed_slot() {
    let slot = boxed_slot();
    assert!(slot.is_boxed());
    assert!(slot.merged_type().is_none());
    assert_eq!(slot.gno_type_string(), "struct{m1 map[string]interface{}}");
    assert_eq!(
        slot.go_qualified_name(),
        "lib_github_com_gnolang_gno_gnovm_pkg_gnolang.TypedValue"
    );
}

#[test]
fn test_go_imports() {
    let plain = mapping("Fn", false, vec![int_slot()]);
    assert!(plain.go_imports().is_empty());

    let full = mapping("Full", true, vec![address_slot(), boxed_slot()]);
    assert_eq!(full.go_imports(), vec![
        (import_ident(GNOLANG), GNOLANG.to_owned()),
        (import_ident(CRYPTO), CRYPTO.to_owned()),
    ]);
    assert!(full.has_boxed());
    assert_eq!(full.param_count(), 2);
    assert_eq!(full.result_count(), 1);
}

#[test]
fn test_display() {
    let m = mapping("X_t2", true, vec![int_slot(), address_slot()]);
    assert_eq!(
        m.to_string(),
        format!("std.X_t2(int, *Address) int => {STD_HOME}.X_t2 [machine]")
    );
}

#[test]
fn test_serialize() {
    let m = mapping("Fn", false, vec![address_slot()]);
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "gno_import_path": "std",
            "gno_func": "Fn",
            "go_import_path": STD_HOME,
            "go_func": "Fn",
            "needs_context": false,
            "params": [{
                "gno_type": "*Address",
                "go_type": "*lib_github_com_gnolang_gno_tm2_pkg_crypto.Bech32Address",
                "is_boxed": false,
            }],
            "results": [{
                "gno_type": "int",
                "go_type": "int",
                "is_boxed": false,
            }],
        })
    );
}

#[test]
fn test_set_imports_and_grouping() {
    let mut math = mapping("Floor", false, vec![]);
    math.gno_import_path = "math".into();
    let set = MappingSet::new(vec![
        mapping("A", true, vec![]),
        math,
        mapping("B", false, vec![address_slot()]),
    ]);

    assert_eq!(set.imports(), vec![
        (import_ident(GNOLANG), GNOLANG.to_owned()),
        (import_ident(CRYPTO), CRYPTO.to_owned()),
    ]);

    let groups: Vec<_> = set
        .by_package()
        .into_iter()
        .map(|(pkg, ms)| (pkg, ms.iter().map(|m| m.gno_func.as_str()).collect::<Vec<_>>()))
        .collect();
    assert_eq!(groups, vec![("std", vec!["A", "B"]), ("math", vec!["Floor"])]);
    assert_eq!(set.len(), 3);
}
