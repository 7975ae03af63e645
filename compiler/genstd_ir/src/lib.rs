//! genstd IR - declarations and type expressions.
//!
//! This crate contains the data model shared by the genstd front end and
//! linker:
//! - Spans for source locations
//! - `TypeExpr`, the type expression tree found in parameter and result lists
//! - Import tables for resolving package qualifiers
//! - Function declarations, source files and packages
//!
//! Gno and Go share their declaration syntax, so a single model serves both
//! sides of a link. Everything here is immutable once the parser hands it
//! over; the linker only reads it.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod builtin;
mod decl;
mod imports;
mod span;
mod type_expr;

pub use builtin::is_predeclared_type;
pub use decl::{is_exported, FuncDecl, Package, SourceFile, SourceKind};
pub use imports::{ImportSpec, Imports};
pub use span::{Span, SpanError};
pub use type_expr::{ArrayLen, ChanDir, Field, InterfaceElem, Signature, TypeExpr, TypeShape};
