//! Lexer for Gno and Go sources using logos.
//!
//! Gno is a Go dialect, so one token set covers both sides of a link. The
//! lexer only needs to be precise enough for declaration-level parsing:
//! every operator that is not a delimiter collapses into `Operator`, and
//! literals keep their text verbatim (array lengths are compared as written).
//!
//! Line comments are dropped. A block comment spanning lines produces a
//! single `Newline`, so the parser's line-start rule still sees the break.

use std::fmt;

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_ir::Span;
use logos::Logos;

/// Raw token from logos, before comments are folded away.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("\n")]
    Newline,

    // === Keywords ===
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("func")]
    Func,
    #[token("type")]
    Type,
    #[token("var")]
    Var,
    #[token("const")]
    Const,
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,

    // === Literals ===
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"0[oO][0-7_]+")]
    Int,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    Float,

    #[regex(r"[0-9][0-9_]*i")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?i")]
    Imaginary,

    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    Rune,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r"`[^`]*`")]
    String,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("*")]
    Star,
    #[token("<-")]
    Arrow,

    // === Other operators ===
    #[token("+")]
    #[token("-")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("&^")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("==")]
    #[token("!=")]
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("=")]
    #[token(":=")]
    #[token("!")]
    #[token("~")]
    #[token(":")]
    Operator,
}

/// Consume a block comment body up to and including `*/`.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// Token kinds seen by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident,
    Int,
    Float,
    Imaginary,
    Rune,
    /// Interpreted or raw string literal.
    String,

    // Keywords
    Package,
    Import,
    Func,
    Type,
    Var,
    Const,
    Map,
    Chan,
    Struct,
    Interface,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Dot,
    Ellipsis,
    Star,
    /// `<-`
    Arrow,
    /// Any other operator; the text tells which.
    Operator,

    Newline,
    Eof,
}

impl TokenKind {
    /// Whether this token is a literal usable as an expression operand.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Imaginary
                | TokenKind::Rune
                | TokenKind::String
        )
    }

    /// Short description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::Imaginary => "imaginary literal",
            TokenKind::Rune => "rune literal",
            TokenKind::String => "string literal",
            TokenKind::Package => "`package`",
            TokenKind::Import => "`import`",
            TokenKind::Func => "`func`",
            TokenKind::Type => "`type`",
            TokenKind::Var => "`var`",
            TokenKind::Const => "`const`",
            TokenKind::Map => "`map`",
            TokenKind::Chan => "`chan`",
            TokenKind::Struct => "`struct`",
            TokenKind::Interface => "`interface`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Star => "`*`",
            TokenKind::Arrow => "`<-`",
            TokenKind::Operator => "operator",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token borrowing its text from the source.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

/// What went wrong while lexing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character that starts no token.
    UnexpectedChar(char),
    /// Missing closing `"`.
    UnterminatedString,
    /// Missing closing `` ` ``.
    UnterminatedRawString,
    /// Missing closing `'`, or an empty rune literal.
    UnterminatedRune,
    /// `/*` without `*/`.
    UnterminatedComment,
    /// Source longer than a span can address.
    SourceTooLarge,
}

/// A lexer error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    fn classify(text: &str, span: Span, source: &str) -> Self {
        let first = text
            .chars()
            .next()
            .or_else(|| source.get(span.to_range().start..)?.chars().next());
        let kind = if text.starts_with("/*") {
            LexErrorKind::UnterminatedComment
        } else {
            match first {
                Some('"') => LexErrorKind::UnterminatedString,
                Some('`') => LexErrorKind::UnterminatedRawString,
                Some('\'') => LexErrorKind::UnterminatedRune,
                Some(c) => LexErrorKind::UnexpectedChar(c),
                None => LexErrorKind::UnexpectedChar('\0'),
            }
        };
        LexError { kind, span }
    }

    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnexpectedChar(_) | LexErrorKind::SourceTooLarge => ErrorCode::E0001,
            LexErrorKind::UnterminatedString
            | LexErrorKind::UnterminatedRawString
            | LexErrorKind::UnterminatedRune
            | LexErrorKind::UnterminatedComment => ErrorCode::E0002,
        }
    }

    /// Convert to a diagnostic, labelled with the file path when known.
    pub fn to_diagnostic(&self, path: Option<&str>) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(path.map(str::to_owned), self.span, "here")
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            LexErrorKind::UnterminatedRawString => {
                f.write_str("unterminated raw string literal")
            }
            LexErrorKind::UnterminatedRune => f.write_str("unterminated rune literal"),
            LexErrorKind::UnterminatedComment => f.write_str("unterminated block comment"),
            LexErrorKind::SourceTooLarge => {
                write!(f, "source exceeds {} bytes", u32::MAX)
            }
        }
    }
}

impl std::error::Error for LexError {}

const BOM: char = '\u{feff}';

/// Tokenize a source file.
///
/// The result always ends with an `Eof` token. Lexing stops at the first
/// error. A leading byte order mark is skipped; spans still count it.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let end = u32::try_from(source.len()).map_err(|_| LexError {
        kind: LexErrorKind::SourceTooLarge,
        span: Span::DUMMY,
    })?;

    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    let mut logos = RawToken::lexer(source);
    if source.starts_with(BOM) {
        logos.bump(BOM.len_utf8());
    }

    while let Some(result) = logos.next() {
        // Every offset fits: the source length was checked above.
        let span = Span::try_from_range(logos.span()).unwrap_or(Span::point(end));
        let text = logos.slice();
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => return Err(LexError::classify(text, span, source)),
        };
        let kind = match raw {
            RawToken::LineComment => continue,
            RawToken::BlockComment if text.contains('\n') => TokenKind::Newline,
            RawToken::BlockComment => continue,
            RawToken::Newline => TokenKind::Newline,
            RawToken::Package => TokenKind::Package,
            RawToken::Import => TokenKind::Import,
            RawToken::Func => TokenKind::Func,
            RawToken::Type => TokenKind::Type,
            RawToken::Var => TokenKind::Var,
            RawToken::Const => TokenKind::Const,
            RawToken::Map => TokenKind::Map,
            RawToken::Chan => TokenKind::Chan,
            RawToken::Struct => TokenKind::Struct,
            RawToken::Interface => TokenKind::Interface,
            RawToken::Ident => TokenKind::Ident,
            RawToken::Int => TokenKind::Int,
            RawToken::Float => TokenKind::Float,
            RawToken::Imaginary => TokenKind::Imaginary,
            RawToken::Rune => TokenKind::Rune,
            RawToken::String => TokenKind::String,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::Star => TokenKind::Star,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Operator => TokenKind::Operator,
        };
        tokens.push(Token { kind, text, span });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        span: Span::point(end),
    });
    Ok(tokens)
}
