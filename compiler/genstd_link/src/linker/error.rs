//! Link errors.

use std::fmt;
use std::path::PathBuf;

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_ir::Span;

use crate::MergeError;

/// Where a function is declared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FuncRef {
    /// Import path of the declaring package.
    pub package: String,
    /// Function name.
    pub name: String,
    /// Source file.
    pub path: PathBuf,
    /// Span of the function name.
    pub span: Span,
}

impl FuncRef {
    fn path_string(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }
}

/// Which parameter or result a type error is about.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Slot {
    /// Zero-based parameter position, not counting the machine parameter.
    Param(usize),
    /// Zero-based result position.
    Result(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Param(i) => write!(f, "parameter {}", i + 1),
            Slot::Result(i) => write!(f, "result {}", i + 1),
        }
    }
}

/// Why two signatures do not match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MismatchReason {
    /// Different number of parameters or results.
    Arity {
        /// `"parameters"` or `"results"`.
        what: &'static str,
        gno: usize,
        go: usize,
    },
    /// A parameter or result type differs.
    Type { slot: Slot, error: MergeError },
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::Arity { what, gno, go } => {
                write!(f, "gno function has {gno} {what}, go function has {go}")
            }
            MismatchReason::Type { slot, error } => write!(f, "{slot}: {error}"),
        }
    }
}

/// A link failure. Linking stops at the first one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkError {
    /// No Go function implements a bodyless Gno function.
    Unresolved { gno: FuncRef, go_name: String },
    /// One side declares type parameters.
    Generic { func: FuncRef },
    /// The Go function exists but its signature differs.
    SignatureMismatch {
        gno: FuncRef,
        go: FuncRef,
        reason: MismatchReason,
    },
    /// A type could not be reasoned about at all.
    Merge {
        gno: FuncRef,
        go: FuncRef,
        slot: Slot,
        error: MergeError,
    },
}

impl LinkError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LinkError::Unresolved { .. } => ErrorCode::E2001,
            LinkError::Generic { .. } => ErrorCode::E2006,
            LinkError::SignatureMismatch { .. } => ErrorCode::E2002,
            LinkError::Merge { error, .. } => error.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            LinkError::Unresolved { gno, go_name } => diag
                .with_label(gno.path_string(), gno.span, "declared without a body here")
                .with_suggestion(format!(
                    "add `func {go_name}(...)` to a .go file of package {}",
                    gno.package
                )),
            LinkError::Generic { func } => {
                diag.with_label(func.path_string(), func.span, "generic function")
            }
            LinkError::SignatureMismatch { gno, go, .. } => diag
                .with_label(gno.path_string(), gno.span, "gno declaration")
                .with_secondary_label(go.path_string(), go.span, "go implementation"),
            LinkError::Merge { gno, go, .. } => diag
                .with_label(gno.path_string(), gno.span, "gno declaration")
                .with_secondary_label(go.path_string(), go.span, "go implementation"),
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Unresolved { gno, go_name } => write!(
                f,
                "no matching go function declaration ({go_name:?}) exists for function {:?} in package {:?}",
                gno.name, gno.package
            ),
            LinkError::Generic { func } => write!(
                f,
                "type parameters on function {:?} in package {:?} are not supported",
                func.name, func.package
            ),
            LinkError::SignatureMismatch { gno, go, reason } => write!(
                f,
                "gno function {:?} doesn't match signature of go function {:?}: {reason}",
                gno.name, go.name
            ),
            LinkError::Merge {
                gno,
                go,
                slot,
                error,
            } => write!(
                f,
                "{error} ({slot} of gno function {:?}, go function {:?})",
                gno.name, go.name
            ),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkError::SignatureMismatch {
                reason: MismatchReason::Type { error, .. },
                ..
            }
            | LinkError::Merge { error, .. } => Some(error),
            _ => None,
        }
    }
}
