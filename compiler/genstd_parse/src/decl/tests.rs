use std::path::Path;

use genstd_diagnostic::ErrorCode;
use genstd_ir::{Field, ImportSpec, Signature, SourceKind, Span, TypeExpr};
use pretty_assertions::assert_eq;

use crate::{parse_file, ParseErrorKind};

const STD_GNO: &str = r#"// Package std exposes chain state.
package std

import (
	"math"
	gno "github.com/gnolang/gno/gnovm/pkg/gnolang"
	. "strings"
	_ "embed"
)

import "errors"

// Fn does nothing.
func Fn()
func FnRet() int
func fnBody(a, b int, c string) (x int, err error) {
	if a > b {
		return 1, nil
	}
	return 0, nil
}

type Banker interface {
	GetCoins(addr Address) (dst Coins)
}

var f = func() {
}

const (
	a = iota
	b
)

func (bk *banker) GetCoins(addr Address) Coins { return nil }
func Generic[T any](v T) T
"#;

fn parse(source: &str) -> genstd_ir::SourceFile {
    parse_file(Path::new("std/std.gno"), source).unwrap()
}

#[test]
fn test_package_and_imports() {
    let file = parse(STD_GNO);
    assert_eq!(file.package_name, "std");
    assert_eq!(file.kind, SourceKind::Gno);
    let specs: Vec<_> = file.imports.iter().cloned().collect();
    assert_eq!(specs, vec![
        ImportSpec::new("math"),
        ImportSpec::aliased("gno", "github.com/gnolang/gno/gnovm/pkg/gnolang"),
        ImportSpec::aliased(".", "strings"),
        ImportSpec::aliased("_", "embed"),
        ImportSpec::new("errors"),
    ]);
    assert_eq!(
        file.imports.resolve("gno"),
        Some("github.com/gnolang/gno/gnovm/pkg/gnolang")
    );
}

#[test]
fn test_function_outlines() {
    let file = parse(STD_GNO);
    let names: Vec<_> = file.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Fn", "FnRet", "fnBody", "GetCoins", "Generic"]);

    let bodyless: Vec<_> = file
        .funcs
        .iter()
        .filter(|f| f.is_bodyless())
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(bodyless, vec!["Fn", "FnRet", "Generic"]);
}

#[test]
fn test_signatures() {
    let file = parse(STD_GNO);
    assert_eq!(file.funcs[0].signature, Signature::default());
    assert_eq!(file.funcs[1].signature.results, vec![Field::unnamed(
        TypeExpr::ident("int")
    )]);
    assert_eq!(file.funcs[2].signature, Signature {
        params: vec![
            Field::named("a", TypeExpr::ident("int")),
            Field::named("b", TypeExpr::ident("int")),
            Field::named("c", TypeExpr::ident("string")),
        ],
        results: vec![
            Field::named("x", TypeExpr::ident("int")),
            Field::named("err", TypeExpr::ident("error")),
        ],
    });
}

#[test]
fn test_method_and_generic() {
    let file = parse(STD_GNO);
    let method = &file.funcs[3];
    assert!(method.is_method());
    assert!(method.has_body);
    assert_eq!(
        method.receiver,
        Some(Field::named("bk", TypeExpr::pointer(TypeExpr::ident("banker"))))
    );

    let generic = &file.funcs[4];
    assert!(generic.has_type_params);
    assert_eq!(generic.signature.params, vec![Field::named(
        "v",
        TypeExpr::ident("T")
    )]);
}

#[test]
fn test_name_span() {
    let file = parse(STD_GNO);
    let start = u32::try_from(STD_GNO.find("FnRet()").unwrap()).unwrap();
    assert_eq!(file.funcs[1].span, Span::new(start, start + 5));
}

#[test]
fn test_go_file_with_machine_param() {
    let source = "package std\n\nimport gno \"github.com/gnolang/gno/gnovm/pkg/gnolang\"\n\n\
                  func X_t2(m *gno.Machine, x int) (int, error) {\n\treturn x, nil\n}\n";
    let file = parse_file(Path::new("std/std.go"), source).unwrap();
    assert_eq!(file.kind, SourceKind::Go);
    let func = &file.funcs[0];
    assert_eq!(func.name, "X_t2");
    assert_eq!(func.signature.params, vec![
        Field::named(
            "m",
            TypeExpr::pointer(TypeExpr::qualified("gno", "Machine"))
        ),
        Field::named("x", TypeExpr::ident("int")),
    ]);
    assert_eq!(func.signature.results.len(), 2);
}

#[test]
fn test_multiline_parameters() {
    let source = "package p\nfunc F(\n\ta int,\n\tb []string,\n) (\n\tok bool,\n)\n";
    let file = parse(source);
    assert_eq!(file.funcs[0].signature.params.len(), 2);
    assert_eq!(file.funcs[0].signature.results, vec![Field::named(
        "ok",
        TypeExpr::ident("bool")
    )]);
}

#[test]
fn test_func_literal_inside_var_is_skipped() {
    let source = "package p\nvar handlers = map[string]func(){\n\t\"a\": func() {},\n}\nfunc G()\n";
    let file = parse(source);
    let names: Vec<_> = file.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["G"]);
}

#[test]
fn test_missing_package_clause() {
    let err = parse_file(Path::new("a.gno"), "func F()\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingPackageClause);
    assert_eq!(err.code(), ErrorCode::E1004);
}

#[test]
fn test_unclosed_body() {
    let err = parse_file(Path::new("a.gno"), "package a\nfunc F() {\n").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnclosedDelimiter { .. }));
    let diag = err.to_diagnostic(Some("a.gno"));
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.labels.len(), 2);
}

#[test]
fn test_lex_error_propagates() {
    let err = parse_file(Path::new("a.gno"), "package a\n#\n").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0001);
}

#[test]
fn test_stray_closing_delimiter() {
    let err = parse_file(Path::new("a.gno"), "package a\n}\n").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}
