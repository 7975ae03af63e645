//! Type unification.
//!
//! `Unifier::merge` decides whether a Gno type and a Go type denote the same
//! thing across the language boundary and, if so, produces the single Go
//! type both sides agree on.
//!
//! # Equivalence
//!
//! Only a narrow relation is recognised:
//! - identical identifiers (`int` and `int`)
//! - a Gno named type and the Go type registered for it
//!   (`Address` and `crypto.Bech32Address`)
//! - the same imported named type on both sides
//! - pointers, slices and arrays of equivalent element types, where array
//!   lengths are literals with identical text (`[8]T` and `[0x8]T` differ)
//!
//! # Refusals
//!
//! Before any pair is compared, both nodes are classified. Maps, funcs,
//! interfaces and structs are `Unsupported`. Everything else outside the
//! supported shapes is an `InvalidExpression`: channels, variadics, literals
//! and operators. Either refusal wins over a mismatch at the same node.

mod error;
mod merged;

pub use error::MergeError;
pub use merged::MergedType;

use genstd_ir::{ArrayLen, Imports, TypeExpr, TypeShape};

use crate::LinkedTypeRegistry;

/// One side of a link: its home package and the importing file's table.
#[derive(Copy, Clone, Debug)]
pub struct Side<'a> {
    /// Import path of the package the file belongs to.
    pub package: &'a str,
    /// Imports of the file declaring the function.
    pub imports: &'a Imports,
}

impl<'a> Side<'a> {
    pub fn new(package: &'a str, imports: &'a Imports) -> Self {
        Side { package, imports }
    }

    /// Resolve a (possibly qualified) identifier to `(import path, name)`.
    fn resolve<'e>(&self, expr: &'e TypeExpr) -> Option<(&'e str, &'e str)>
    where
        'a: 'e,
    {
        match expr {
            TypeExpr::Ident(name) => Some((self.package, name)),
            TypeExpr::Qualified { package, name } => {
                Some((self.imports.resolve(package)?, name))
            }
            _ => None,
        }
    }
}

/// Unifies Gno types with Go types in the context of one function pair.
pub struct Unifier<'a> {
    registry: &'a LinkedTypeRegistry,
    gno: Side<'a>,
    go: Side<'a>,
}

impl<'a> Unifier<'a> {
    pub fn new(registry: &'a LinkedTypeRegistry, gno: Side<'a>, go: Side<'a>) -> Self {
        Unifier { registry, gno, go }
    }

    /// Merge a Gno type with a Go type.
    pub fn merge(&self, gno: &TypeExpr, go: &TypeExpr) -> Result<MergedType, MergeError> {
        let result = self.merge_inner(gno, go);
        tracing::trace!(%gno, %go, ok = result.is_ok(), "merge types");
        result
    }

    fn merge_inner(&self, gno: &TypeExpr, go: &TypeExpr) -> Result<MergedType, MergeError> {
        check_shape(gno)?;
        check_shape(go)?;

        match (gno, go) {
            (TypeExpr::Ident(gno_name), TypeExpr::Ident(go_name)) if gno_name == go_name => {
                Ok(self
                    .linked(gno, go)
                    .unwrap_or_else(|| MergedType::Ident(gno_name.clone())))
            }
            (
                TypeExpr::Ident(_) | TypeExpr::Qualified { .. },
                TypeExpr::Ident(_) | TypeExpr::Qualified { .. },
            ) => self.merge_names(gno, go),
            (TypeExpr::Pointer(gno_elem), TypeExpr::Pointer(go_elem)) => Ok(MergedType::Pointer(
                Box::new(self.merge_inner(gno_elem, go_elem)?),
            )),
            (TypeExpr::Slice(gno_elem), TypeExpr::Slice(go_elem)) => Ok(MergedType::Slice(
                Box::new(self.merge_inner(gno_elem, go_elem)?),
            )),
            (
                TypeExpr::Array {
                    len: ArrayLen::Literal(gno_len),
                    elem: gno_elem,
                },
                TypeExpr::Array {
                    len: ArrayLen::Literal(go_len),
                    elem: go_elem,
                },
            ) if gno_len == go_len => Ok(MergedType::Array {
                len: gno_len.clone(),
                elem: Box::new(self.merge_inner(gno_elem, go_elem)?),
            }),
            _ => Err(mismatch(gno, go)),
        }
    }

    /// Two names, at least one of them qualified or different.
    fn merge_names(&self, gno: &TypeExpr, go: &TypeExpr) -> Result<MergedType, MergeError> {
        if let Some(linked) = self.linked(gno, go) {
            return Ok(linked);
        }
        if let (TypeExpr::Qualified { .. }, TypeExpr::Qualified { .. }) = (gno, go) {
            if let (Some(gno_ref), Some(go_ref)) = (self.gno.resolve(gno), self.go.resolve(go)) {
                if gno_ref == go_ref {
                    return Ok(MergedType::Qualified {
                        path: go_ref.0.to_owned(),
                        name: go_ref.1.to_owned(),
                    });
                }
            }
        }
        Err(mismatch(gno, go))
    }

    /// The registry record linking these two names, if there is one.
    fn linked(&self, gno: &TypeExpr, go: &TypeExpr) -> Option<MergedType> {
        let (gno_path, gno_name) = self.gno.resolve(gno)?;
        let (go_path, go_name) = self.go.resolve(go)?;
        self.registry
            .lookup(gno_path, gno_name)
            .filter(|lt| lt.targets(go_path, go_name))
            .map(|lt| MergedType::Linked(lt.clone()))
    }
}

fn check_shape(expr: &TypeExpr) -> Result<(), MergeError> {
    match expr.shape() {
        TypeShape::Supported => Ok(()),
        TypeShape::Unsupported => Err(MergeError::Unsupported { expr: expr.clone() }),
        TypeShape::Invalid => Err(MergeError::InvalidExpression { expr: expr.clone() }),
    }
}

#[cold]
fn mismatch(gno: &TypeExpr, go: &TypeExpr) -> MergeError {
    MergeError::Mismatch {
        gno: gno.clone(),
        go: go.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
