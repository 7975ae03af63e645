//! Unification errors.

use std::fmt;

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_ir::{Span, TypeExpr};

/// Why two types could not be merged.
///
/// `Mismatch` is an ordinary outcome (the types differ). The other two mean
/// the input contains something the unifier refuses to reason about, and are
/// reported as such even when the types would differ anyway.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeError {
    /// The innermost pair of types that differ.
    Mismatch { gno: TypeExpr, go: TypeExpr },
    /// A legal type shape the unifier does not handle (maps, funcs, ...).
    Unsupported { expr: TypeExpr },
    /// An expression where a type was expected.
    InvalidExpression { expr: TypeExpr },
}

impl MergeError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, MergeError::Mismatch { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MergeError::Mismatch { .. } => ErrorCode::E2003,
            MergeError::Unsupported { .. } => ErrorCode::E2004,
            MergeError::InvalidExpression { .. } => ErrorCode::E2005,
        }
    }

    pub fn to_diagnostic(&self, path: Option<&str>, span: Span) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(path.map(str::to_owned), span, "in this declaration");
        match self {
            MergeError::Mismatch { .. } => diag,
            MergeError::Unsupported { .. } => diag.with_note(
                "only identifiers, qualified identifiers, pointers, arrays and slices can be linked",
            ),
            MergeError::InvalidExpression { .. } => diag.with_note("a type is expected here"),
        }
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Mismatch { gno, go } => {
                write!(f, "gno type `{gno}` does not match go type `{go}`")
            }
            MergeError::Unsupported { expr } => {
                write!(f, "merging {} `{expr}` not implemented", expr.kind_name())
            }
            MergeError::InvalidExpression { expr } => {
                write!(f, "invalid expression `{expr}` in type position")
            }
        }
    }
}

impl std::error::Error for MergeError {}
