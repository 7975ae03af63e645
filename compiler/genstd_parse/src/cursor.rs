//! Token cursor for navigating the token stream.

use genstd_ir::Span;
use genstd_lexer::{Token, TokenKind};

use crate::ParseError;

/// Cursor over a lexed token list.
///
/// Invariant: the list ends with `Eof` and the position never moves past it.
pub struct Cursor<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
}

impl<'a, 'src> Cursor<'a, 'src> {
    /// Create a cursor at the start of the token stream.
    pub fn new(tokens: &'a [Token<'src>]) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    /// The current token.
    #[inline]
    pub fn current(&self) -> Token<'src> {
        self.peek_at(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// The token `n` positions ahead, clamped to `Eof`.
    pub fn peek_at(&self, n: usize) -> Token<'src> {
        let idx = (self.pos + n).min(self.tokens.len().saturating_sub(1));
        self.tokens.get(idx).copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            text: "",
            span: Span::DUMMY,
        })
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.peek_at(1).kind
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Check for an operator token with the given text.
    pub fn check_op(&self, text: &str) -> bool {
        let token = self.current();
        token.kind == TokenKind::Operator && token.text == text
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Whether the current token begins a line: it is the first token, or
    /// the previous one is a newline or semicolon.
    pub fn at_line_start(&self) -> bool {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            None => true,
            Some(prev) => matches!(prev.kind, TokenKind::Newline | TokenKind::Semicolon),
        }
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind, or fail.
    pub fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token<'src>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                expected,
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    /// Skip newline tokens.
    pub fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skip newlines and semicolons.
    pub fn skip_separators(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Skip a delimited group starting at the current opening token,
    /// through its matching close.
    pub fn skip_balanced(&mut self) -> Result<(), ParseError> {
        let mut stack = Vec::new();
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::LParen => stack.push((TokenKind::RParen, token.span)),
                TokenKind::LBracket => stack.push((TokenKind::RBracket, token.span)),
                TokenKind::LBrace => stack.push((TokenKind::RBrace, token.span)),
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    match stack.pop() {
                        Some((close, _)) if close == token.kind => {}
                        popped => {
                            return Err(ParseError::unexpected(
                                close_name(popped.map(|(k, _)| k)),
                                token.kind,
                                token.span,
                            ))
                        }
                    }
                }
                TokenKind::Eof => {
                    let open = stack.last().map_or(token.span, |(_, span)| *span);
                    return Err(ParseError::unclosed(open, token.span));
                }
                _ => {}
            }
            if stack.is_empty() {
                return Ok(());
            }
        }
    }
}

fn close_name(kind: Option<TokenKind>) -> &'static str {
    match kind {
        Some(TokenKind::RParen) => "`)`",
        Some(TokenKind::RBracket) => "`]`",
        Some(TokenKind::RBrace) => "`}`",
        _ => "matching delimiter",
    }
}
