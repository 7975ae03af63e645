//! The `explain` command: display documentation for error codes.

use std::process::ExitCode;

use genstd_diagnostic::{ErrorCode, ErrorDocs};

/// Print the documentation for an error code string.
pub fn explain_error(code_str: &str) -> ExitCode {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E1001, E2001, E2002, E3001");
        return ExitCode::FAILURE;
    };

    if let Some(doc) = ErrorDocs::get(code) {
        println!("{doc}");
        ExitCode::SUCCESS
    } else {
        eprintln!("No documentation available for {code}");
        eprintln!();
        eprintln!("Summary: {}", code.summary());
        ExitCode::FAILURE
    }
}
