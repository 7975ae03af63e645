use std::path::Path;

use genstd_diagnostic::ErrorCode;
use genstd_ir::Package;
use genstd_parse::parse_file;
use pretty_assertions::assert_eq;

use super::*;
use crate::{MergeError, MergedType};

const GO_STD: &str = "github.com/gnolang/gno/gnovm/stdlibs/std";

fn package(gno: &str, go: &str) -> Package {
    let mut pkg = Package::new("std", GO_STD, "std");
    pkg.add_file(parse_file(Path::new("std/std.gno"), gno).unwrap());
    pkg.add_file(parse_file(Path::new("std/std.go"), go).unwrap());
    pkg
}

fn link(packages: &[Package]) -> Result<Vec<Mapping>, LinkError> {
    let registry = LinkedTypeRegistry::stdlibs();
    let config = LinkerConfig::default();
    Linker::new(&registry, &config).link(packages)
}

const GNO_IMPORT: &str = "import gno \"github.com/gnolang/gno/gnovm/pkg/gnolang\"\n";

#[test]
fn test_all_shapes_in_order() {
    let gno = "package std

func Fn()
func FnRet() int
func FnParam(n int)
func FnParamRet(n int) int
func FnMachine()
func FnMachineRet() int
func FnMachineParam(n int)
func FnMachineParamRet(n int) int
";
    let go = format!(
        "package std

{GNO_IMPORT}
func Fn()                                               {{}}
func FnRet() int                                        {{ return 1 }}
func FnParam(n int)                                     {{}}
func FnParamRet(n int) int                              {{ return n }}
func FnMachine(m *gno.Machine)                          {{}}
func FnMachineRet(m *gno.Machine) int                   {{ return 1 }}
func FnMachineParam(m *gno.Machine, n int)              {{}}
func FnMachineParamRet(m *gno.Machine, n int) int       {{ return n }}
"
    );
    let mappings = link(&[package(gno, &go)]).unwrap();
    assert_eq!(mappings.len(), 8);

    const RET: usize = 1;
    const PARAM: usize = 2;
    const MACHINE: usize = 4;
    for (i, m) in mappings.iter().enumerate() {
        let mut expected = String::from("Fn");
        if i & MACHINE != 0 {
            expected.push_str("Machine");
        }
        if i & PARAM != 0 {
            expected.push_str("Param");
        }
        if i & RET != 0 {
            expected.push_str("Ret");
        }
        assert_eq!(m.gno_func, expected);
        assert_eq!(m.go_func, expected);
        assert_eq!(m.gno_import_path, "std");
        assert_eq!(m.go_import_path, GO_STD);
        assert_eq!(m.needs_context, i & MACHINE != 0, "{expected}");

        let expected_params = usize::from(i & PARAM != 0);
        let expected_results = usize::from(i & RET != 0);
        assert_eq!(m.param_count(), expected_params, "{expected}");
        assert_eq!(m.result_count(), expected_results, "{expected}");
        for slot in m.params.iter().chain(&m.results) {
            assert_eq!(slot.gno_type_string(), "int");
            assert_eq!(slot.go_qualified_name(), "int");
            assert!(!slot.is_boxed());
        }
    }
}

#[test]
fn test_unexported_names_get_prefix() {
    let gno = "package std\n\nfunc t1()\nfunc t2()\n";
    let go = format!(
        "package std\n\n{GNO_IMPORT}\nfunc X_t1() {{}}\nfunc X_t2(m *gno.Machine) {{}}\n"
    );
    let mappings = link(&[package(gno, &go)]).unwrap();
    let summary: Vec<_> = mappings
        .iter()
        .map(|m| (m.gno_func.as_str(), m.go_func.as_str(), m.needs_context))
        .collect();
    assert_eq!(summary, vec![("t1", "X_t1", false), ("t2", "X_t2", true)]);
}

#[test]
fn test_typed_value_slots() {
    let gno = "package std

func TVParam(p struct{m1 map[string]interface{}})
func TVResult() interface{S() map[int]Banker}
func TVFull(tv Banker) (Banker)
";
    let go = format!(
        "package std

{GNO_IMPORT}
func TVParam(p gno.TypedValue) {{}}
func TVResult() gno.TypedValue {{ return gno.TypedValue{{}} }}
func TVFull(m *gno.Machine, v gno.TypedValue) gno.TypedValue {{ return v }}
"
    );
    let mappings = link(&[package(gno, &go)]).unwrap();
    assert_eq!(mappings.len(), 3);

    let tv_param = &mappings[0];
    assert_eq!(tv_param.gno_func, "TVParam");
    assert!(!tv_param.needs_context);
    assert_eq!(tv_param.result_count(), 0);
    assert!(tv_param.params[0].is_boxed());
    assert_eq!(
        tv_param.params[0].gno_type_string(),
        "struct{m1 map[string]interface{}}"
    );

    let tv_result = &mappings[1];
    assert_eq!(tv_result.param_count(), 0);
    assert!(tv_result.results[0].is_boxed());
    assert_eq!(
        tv_result.results[0].gno_type_string(),
        "interface{S() map[int]Banker}"
    );

    let tv_full = &mappings[2];
    assert!(tv_full.needs_context);
    assert_eq!(tv_full.param_count(), 1);
    assert_eq!(tv_full.result_count(), 1);
}

#[test]
fn test_linked_types_in_signature() {
    let gno = "package std\n\nfunc GetCoins(addr Address) Coins\n";
    let go = "package std

import (
	\"github.com/gnolang/gno/tm2/pkg/crypto\"
	tm2std \"github.com/gnolang/gno/tm2/pkg/std\"
)

func GetCoins(addr crypto.Bech32Address) tm2std.Coins { return nil }
";
    let mappings = link(&[package(gno, go)]).unwrap();
    let m = &mappings[0];
    assert!(matches!(
        m.params[0].merged_type(),
        Some(MergedType::Linked(lt)) if lt.go_name == "Bech32Address"
    ));
    assert_eq!(
        m.results[0].go_qualified_name(),
        "lib_github_com_gnolang_gno_tm2_pkg_std.Coins"
    );
}

#[test]
fn test_no_match() {
    let gno = "package std\n\nfunc Fn()\n";
    let go = "package std\n\nfunc Other() {}\nfunc (r *T) Fn() {}\nfunc fn() {}\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert!(matches!(err, LinkError::Unresolved { ref go_name, .. } if go_name == "Fn"));
    assert!(err
        .to_string()
        .contains("no matching go function declaration"));
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn test_no_match_signature() {
    let gno = "package std\n\nfunc Fn(n int)\n";
    let go = "package std\n\nfunc Fn(n string) {}\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert!(err
        .to_string()
        .contains("doesn't match signature of go function"));
    assert!(matches!(
        err,
        LinkError::SignatureMismatch {
            reason: MismatchReason::Type {
                slot: Slot::Param(0),
                ..
            },
            ..
        }
    ));
    assert_eq!(err.code(), ErrorCode::E2002);
}

#[test]
fn test_arity_mismatch() {
    let gno = "package std\n\nfunc Fn(a, b int) int\n";
    let go = "package std\n\nfunc Fn(a int) int { return a }\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert_eq!(
        err,
        LinkError::SignatureMismatch {
            gno: FuncRef {
                package: "std".into(),
                name: "Fn".into(),
                path: "std/std.gno".into(),
                span: genstd_ir::Span::new(18, 20),
            },
            go: FuncRef {
                package: GO_STD.into(),
                name: "Fn".into(),
                path: "std/std.go".into(),
                span: genstd_ir::Span::new(18, 20),
            },
            reason: MismatchReason::Arity {
                what: "parameters",
                gno: 2,
                go: 1,
            },
        }
    );
}

#[test]
fn test_machine_param_requires_interpreter_import() {
    // `Machine` from another package is an ordinary parameter.
    let gno = "package std\n\nfunc Fn()\n";
    let go = "package std\n\nimport gno \"example.com/fake\"\n\nfunc Fn(m *gno.Machine) {}\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert!(matches!(
        err,
        LinkError::SignatureMismatch {
            reason: MismatchReason::Arity { .. },
            ..
        }
    ));
}

#[test]
fn test_unsupported_type_keeps_its_kind() {
    let gno = "package std\n\nfunc Fn(m map[string]int)\n";
    let go = "package std\n\nfunc Fn(m map[string]int) {}\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert!(matches!(
        err,
        LinkError::Merge {
            error: MergeError::Unsupported { .. },
            ..
        }
    ));
    assert!(err.to_string().contains("not implemented"));
    assert_eq!(err.code(), ErrorCode::E2004);
}

#[test]
fn test_variadic_parameter_is_invalid_expression() {
    let gno = "package std\n\nfunc Fn(args ...int)\n";
    let go = "package std\n\nfunc Fn(args ...int) {}\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert!(matches!(
        err,
        LinkError::Merge {
            error: MergeError::InvalidExpression { .. },
            ..
        }
    ));
    assert!(err.to_string().contains("invalid expression `...int`"), "{err}");
    assert_eq!(err.code(), ErrorCode::E2005);
}

#[test]
fn test_generic_functions_rejected() {
    let gno = "package std\n\nfunc Fn[T any](v T)\n";
    let go = "package std\n\nfunc Fn(v int) {}\n";
    let err = link(&[package(gno, go)]).unwrap_err();
    assert!(matches!(err, LinkError::Generic { .. }));
    assert_eq!(err.code(), ErrorCode::E2006);
}

#[test]
fn test_functions_with_bodies_and_methods_are_skipped() {
    let gno = "package std\n\nfunc helper() int { return 1 }\nfunc (b *Banker) Send()\n";
    let go = "package std\n";
    assert_eq!(link(&[package(gno, go)]).unwrap(), Vec::new());
}

#[test]
fn test_packages_link_in_order() {
    let first = package("package std\n\nfunc A()\n", "package std\n\nfunc A() {}\n");
    let mut second = Package::new("math", "github.com/gnolang/gno/gnovm/stdlibs/math", "math");
    second.add_file(parse_file(Path::new("math/math.gno"), "package math\n\nfunc B()\n").unwrap());
    second.add_file(parse_file(Path::new("math/math.go"), "package math\n\nfunc B() {}\n").unwrap());

    let mappings = link(&[second, first]).unwrap();
    let names: Vec<_> = mappings
        .iter()
        .map(|m| (m.gno_import_path.as_str(), m.gno_func.as_str()))
        .collect();
    assert_eq!(names, vec![("math", "B"), ("std", "A")]);
}

#[test]
fn test_diagnostic_has_both_locations() {
    let gno = "package std\n\nfunc Fn(n int)\n";
    let go = "package std\n\nfunc Fn(n string) {}\n";
    let diag = link(&[package(gno, go)]).unwrap_err().to_diagnostic();
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.labels[0].path.as_deref(), Some("std/std.gno"));
    assert_eq!(diag.labels[1].path.as_deref(), Some("std/std.go"));
}
