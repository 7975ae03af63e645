//! Property-based tests for type unification.
//!
//! Trees built from predeclared identifiers, pointers, slices and arrays
//! exercise the structural part of `Unifier::merge` without the registry:
//! 1. Such a tree merges with itself into the same shape
//! 2. Two such trees merge exactly when they are equal
//! 3. Success does not depend on which side a tree is on
//! 4. A refused node wins over any mismatch below the same wrappers

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use genstd_ir::{ArrayLen, Imports, TypeExpr};
use genstd_link::{LinkedTypeRegistry, MergeError, MergedType, Side, Unifier};
use proptest::prelude::*;

const PREDECLARED: &[&str] = &["int", "string", "bool", "byte", "uint64", "float64", "error"];
const LENGTHS: &[&str] = &["1", "8", "0x8", "32"];

fn builtin_type() -> impl Strategy<Value = TypeExpr> {
    let leaf = prop::sample::select(PREDECLARED).prop_map(|name| TypeExpr::Ident(name.to_owned()));
    leaf.prop_recursive(4, 16, 1, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| TypeExpr::Pointer(Box::new(t))),
            inner.clone().prop_map(|t| TypeExpr::Slice(Box::new(t))),
            (prop::sample::select(LENGTHS), inner).prop_map(|(len, t)| TypeExpr::Array {
                len: ArrayLen::Literal(len.to_owned()),
                elem: Box::new(t),
            }),
        ]
    })
}

/// Wrapper kinds applied outside-in: 0 pointer, 1 slice, 2 array.
fn wrappers() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..3, 0..4)
}

fn wrap(mut ty: TypeExpr, wrappers: &[u8]) -> TypeExpr {
    for kind in wrappers.iter().rev() {
        let elem = Box::new(ty);
        ty = match kind {
            0 => TypeExpr::Pointer(elem),
            1 => TypeExpr::Slice(elem),
            _ => TypeExpr::Array {
                len: ArrayLen::Literal("4".to_owned()),
                elem,
            },
        };
    }
    ty
}

fn expected(ty: &TypeExpr) -> MergedType {
    match ty {
        TypeExpr::Ident(name) => MergedType::Ident(name.clone()),
        TypeExpr::Pointer(elem) => MergedType::Pointer(Box::new(expected(elem))),
        TypeExpr::Slice(elem) => MergedType::Slice(Box::new(expected(elem))),
        TypeExpr::Array {
            len: ArrayLen::Literal(len),
            elem,
        } => MergedType::Array {
            len: len.clone(),
            elem: Box::new(expected(elem)),
        },
        other => panic!("not generated: {other}"),
    }
}

fn merge(gno: &TypeExpr, go: &TypeExpr) -> Result<MergedType, MergeError> {
    let registry = LinkedTypeRegistry::stdlibs();
    let imports = Imports::new();
    let unifier = Unifier::new(
        &registry,
        Side::new("std", &imports),
        Side::new("github.com/gnolang/gno/gnovm/stdlibs/std", &imports),
    );
    unifier.merge(gno, go)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn merge_with_self_keeps_shape(ty in builtin_type()) {
        let merged = merge(&ty, &ty).unwrap();
        prop_assert_eq!(&merged, &expected(&ty));
        prop_assert_eq!(merged, merge(&ty, &ty).unwrap());
    }

    #[test]
    fn merge_succeeds_iff_equal(gno in builtin_type(), go in builtin_type()) {
        let result = merge(&gno, &go);
        prop_assert_eq!(result.is_ok(), gno == go);
        if let Err(error) = result {
            prop_assert!(error.is_mismatch());
        }
    }

    #[test]
    fn merge_success_is_symmetric(a in builtin_type(), b in builtin_type()) {
        prop_assert_eq!(merge(&a, &b).is_ok(), merge(&b, &a).is_ok());
    }

    #[test]
    fn refusal_beats_mismatch(
        outer in wrappers(),
        other in builtin_type(),
        refused_on_gno_side in any::<bool>(),
    ) {
        let map = TypeExpr::Map {
            key: Box::new(TypeExpr::Ident("string".to_owned())),
            value: Box::new(TypeExpr::Ident("int".to_owned())),
        };
        let refused = wrap(map, &outer);
        let other = wrap(other, &outer);
        let result = if refused_on_gno_side {
            merge(&refused, &other)
        } else {
            merge(&other, &refused)
        };
        let is_unsupported = matches!(result, Err(MergeError::Unsupported { .. }));
        prop_assert!(is_unsupported, "{:?}", result);
    }
}
