//! Declaration-level parser for Gno and Go sources.
//!
//! The linker only needs the outline of a file: its package clause, its
//! imports and the signatures of its top-level functions. Everything else
//! (function bodies, `type`/`var`/`const` declarations) is skipped by
//! delimiter balancing, so the parser never needs Go's statement grammar.
//!
//! Types, on the other hand, are parsed in full. Parameter types feed the
//! unifier, which must tell supported, unsupported and invalid shapes apart,
//! so the type grammar also accepts the expression forms that can appear in
//! type position (`[(11)]int`, `1 + 2`) instead of rejecting them.

mod cursor;
mod decl;
mod error;
mod types;

use std::path::Path;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use genstd_ir::{SourceFile, SourceKind, TypeExpr};
use genstd_lexer::TokenKind;

/// Parser state.
pub struct Parser<'a, 'src> {
    cursor: Cursor<'a, 'src>,
}

impl<'a, 'src> Parser<'a, 'src> {
    /// Create a parser over a lexed token list.
    pub fn new(tokens: &'a [genstd_lexer::Token<'src>]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Fail unless only separators remain.
    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.cursor.skip_separators();
        self.cursor.expect(TokenKind::Eof, "end of input").map(|_| ())
    }
}

/// Parse the outline of a source file.
///
/// The file kind comes from the extension: `.go` is Go, anything else Gno.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn parse_file(path: &Path, source: &str) -> Result<SourceFile, ParseError> {
    let kind = match path.extension().and_then(|ext| ext.to_str()) {
        Some("go") => SourceKind::Go,
        _ => SourceKind::Gno,
    };
    let tokens = genstd_lexer::lex(source)?;
    let mut parser = Parser::new(&tokens);
    let file = parser.parse_source_file(path.to_path_buf(), kind)?;
    tracing::debug!(
        package = %file.package_name,
        imports = file.imports.len(),
        funcs = file.funcs.len(),
        "parsed file"
    );
    Ok(file)
}

/// Parse a standalone type or expression.
///
/// Expression forms are returned as their own `TypeExpr` variants rather
/// than rejected, so callers can classify them.
pub fn parse_type_expr(source: &str) -> Result<TypeExpr, ParseError> {
    let tokens = genstd_lexer::lex(source)?;
    let mut parser = Parser::new(&tokens);
    parser.cursor.skip_separators();
    let expr = parser.parse_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

/// Minimum stack space to keep available (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Grow the stack if needed before recursing into a nested type.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
