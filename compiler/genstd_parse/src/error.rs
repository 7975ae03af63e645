//! Parse error types.

use std::fmt;

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_ir::Span;
use genstd_lexer::{LexError, TokenKind};

/// What went wrong while parsing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// The source did not tokenize.
    Lex(LexError),
    /// A token that does not fit the grammar here.
    UnexpectedToken {
        /// What the parser wanted, in prose.
        expected: &'static str,
        /// What it got.
        found: TokenKind,
    },
    /// A type was required.
    ExpectedType { found: TokenKind },
    /// An opening delimiter reached end of file without its partner.
    UnclosedDelimiter { open: Span },
    /// The file does not start with `package <name>`.
    MissingPackageClause,
}

/// A parse error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub(crate) fn unexpected(expected: &'static str, found: TokenKind, span: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
        }
    }

    #[cold]
    pub(crate) fn expected_type(found: TokenKind, span: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::ExpectedType { found },
            span,
        }
    }

    #[cold]
    pub(crate) fn unclosed(open: Span, eof: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::UnclosedDelimiter { open },
            span: eof,
        }
    }

    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            ParseErrorKind::Lex(err) => err.code(),
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedType { .. } => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::MissingPackageClause => ErrorCode::E1004,
        }
    }

    /// Convert to a diagnostic, labelled with the file path when known.
    pub fn to_diagnostic(&self, path: Option<&str>) -> Diagnostic {
        if let ParseErrorKind::Lex(err) = &self.kind {
            return err.to_diagnostic(path);
        }
        let owned_path = path.map(str::to_owned);
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match &self.kind {
            ParseErrorKind::UnclosedDelimiter { open } => diag
                .with_label(owned_path.clone(), self.span, "file ends here")
                .with_secondary_label(owned_path, *open, "unclosed delimiter opened here"),
            ParseErrorKind::MissingPackageClause => diag
                .with_label(owned_path, self.span, "expected `package`")
                .with_note("every .gno and .go file starts with a package clause"),
            _ => diag.with_label(owned_path, self.span, "here"),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            span: err.span,
            kind: ParseErrorKind::Lex(err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Lex(err) => write!(f, "{err}"),
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::ExpectedType { found } => write!(f, "expected type, found {found}"),
            ParseErrorKind::UnclosedDelimiter { .. } => f.write_str("unclosed delimiter"),
            ParseErrorKind::MissingPackageClause => f.write_str("missing package clause"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Lex(err) => Some(err),
            _ => None,
        }
    }
}
