//! Error codes for all linker diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the phase that raised it.

use std::fmt;

/// Error codes for all linker diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Link errors (matching and type unification)
/// - E3xxx: Package walker errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unexpected character in source
    E0001,
    /// Unterminated literal or comment
    E0002,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected type
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Missing package clause
    E1004,

    // Link Errors (E2xxx)
    /// No matching Go function declaration
    E2001,
    /// Signature mismatch between Gno and Go functions
    E2002,
    /// Types do not match
    E2003,
    /// Type construct not implemented
    E2004,
    /// Invalid type expression
    E2005,
    /// Type parameters not supported
    E2006,
    /// Duplicate linked type
    E2007,

    // Walker Errors (E3xxx)
    /// I/O error while reading sources
    E3001,
    /// Mixed package names in one directory
    E3002,
}

impl ErrorCode {
    /// Every error code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E3001,
        ErrorCode::E3002,
    ];

    /// The code as it appears in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
        }
    }

    /// One-line summary of what the code means.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected character",
            ErrorCode::E0002 => "unterminated literal or comment",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected type",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "missing package clause",
            ErrorCode::E2001 => "no matching go function declaration",
            ErrorCode::E2002 => "gno function doesn't match signature of go function",
            ErrorCode::E2003 => "types do not match",
            ErrorCode::E2004 => "type construct not implemented",
            ErrorCode::E2005 => "invalid expression in type position",
            ErrorCode::E2006 => "type parameters not supported",
            ErrorCode::E2007 => "duplicate linked type",
            ErrorCode::E3001 => "cannot read sources",
            ErrorCode::E3002 => "mixed package names in one directory",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002)
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Check if this is a link error (E2xxx range).
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
        )
    }

    /// Check if this is a walker error (E3xxx range).
    pub fn is_walk_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
