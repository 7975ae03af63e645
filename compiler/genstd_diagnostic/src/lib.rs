//! Diagnostic system for linker error reporting.
//!
//! Every failure in genstd is fatal for the run, so a diagnostic is the last
//! thing the operator sees before the build breaks. Each one carries:
//! - An error code for searchability (`genstd explain E2002`)
//! - A message stating what went wrong
//! - Labels pointing at the declarations involved, possibly in two files
//! - Notes and suggestions

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
