//! Type and expression grammar.
//!
//! Types follow Go's grammar. Expressions are only parsed far enough to
//! represent what can appear where a type or array length is expected:
//! literals, names, parentheses, unary and binary operators, and index
//! expressions.

use genstd_ir::{ArrayLen, ChanDir, Field, InterfaceElem, Signature, Span, TypeExpr};
use genstd_lexer::TokenKind;

use crate::{ensure_sufficient_stack, ParseError, Parser};

/// One comma-separated entry of a parameter list, before grouping.
struct ParamEntry<'src> {
    name: Option<&'src str>,
    ty: TypeExpr,
    span: Span,
}

/// Whether a token can begin a type.
fn starts_type(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Star
            | TokenKind::LBracket
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Func
            | TokenKind::Struct
            | TokenKind::Interface
            | TokenKind::Arrow
            | TokenKind::LParen
    )
}

/// Binding power of a binary operator; higher binds tighter.
fn precedence(op: &str) -> Option<u8> {
    match op {
        "||" => Some(1),
        "&&" => Some(2),
        "==" | "!=" | "<" | "<=" | ">" | ">=" => Some(3),
        "+" | "-" | "|" | "^" => Some(4),
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => Some(5),
        _ => None,
    }
}

impl<'src> Parser<'_, 'src> {
    /// Parse a type.
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> Result<TypeExpr, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Ident => self.parse_type_name(),
            TokenKind::Star => {
                self.cursor.advance();
                Ok(TypeExpr::pointer(self.parse_type()?))
            }
            TokenKind::LBracket => self.parse_array_or_slice(),
            TokenKind::Map => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::LBracket, "`[`")?;
                let key = self.parse_type()?;
                self.cursor.expect(TokenKind::RBracket, "`]`")?;
                let value = self.parse_type()?;
                Ok(TypeExpr::map(key, value))
            }
            TokenKind::Chan => {
                self.cursor.advance();
                let dir = if self.cursor.eat(TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = Box::new(self.parse_type()?);
                Ok(TypeExpr::Chan { dir, elem })
            }
            TokenKind::Arrow => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Chan, "`chan`")?;
                let elem = Box::new(self.parse_type()?);
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem,
                })
            }
            TokenKind::Func => {
                self.cursor.advance();
                Ok(TypeExpr::Func(Box::new(self.parse_signature()?)))
            }
            TokenKind::Struct => self.parse_struct(),
            TokenKind::Interface => self.parse_interface(),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_type()?;
                self.cursor.expect(TokenKind::RParen, "`)`")?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            kind => Err(ParseError::expected_type(kind, token.span)),
        }
    }

    /// `T`, `pkg.T`, optionally followed by type arguments.
    fn parse_type_name(&mut self) -> Result<TypeExpr, ParseError> {
        let base = self.parse_operand_name()?;
        if self.cursor.check(TokenKind::LBracket) {
            self.cursor.advance();
            let args = self.parse_list(TokenKind::RBracket, Self::parse_type)?;
            return Ok(TypeExpr::Index {
                base: Box::new(base),
                args,
            });
        }
        Ok(base)
    }

    /// An identifier, or `pkg.name`.
    fn parse_operand_name(&mut self) -> Result<TypeExpr, ParseError> {
        let name = self.cursor.expect(TokenKind::Ident, "identifier")?.text;
        if self.cursor.eat(TokenKind::Dot) {
            let selected = self.cursor.expect(TokenKind::Ident, "identifier")?.text;
            return Ok(TypeExpr::qualified(name, selected));
        }
        Ok(TypeExpr::ident(name))
    }

    fn parse_array_or_slice(&mut self) -> Result<TypeExpr, ParseError> {
        self.cursor.expect(TokenKind::LBracket, "`[`")?;
        if self.cursor.eat(TokenKind::RBracket) {
            return Ok(TypeExpr::slice(self.parse_type()?));
        }

        let len = if self.cursor.eat(TokenKind::Ellipsis) {
            ArrayLen::Inferred
        } else {
            match self.parse_expr()? {
                TypeExpr::BasicLit(text) => ArrayLen::Literal(text),
                other => ArrayLen::Expr(Box::new(other)),
            }
        };
        self.cursor.expect(TokenKind::RBracket, "`]`")?;
        let elem = Box::new(self.parse_type()?);
        Ok(TypeExpr::Array { len, elem })
    }

    /// Parse `(params) results`, the part of a func after the name.
    pub(crate) fn parse_signature(&mut self) -> Result<Signature, ParseError> {
        let params = self.parse_parameters()?;
        let results = self.parse_results()?;
        Ok(Signature { params, results })
    }

    /// Parse a parenthesized parameter list, flattening `a, b int` into one
    /// field per name.
    pub(crate) fn parse_parameters(&mut self) -> Result<Vec<Field>, ParseError> {
        self.cursor.expect(TokenKind::LParen, "`(`")?;
        let entries = self.parse_list(TokenKind::RParen, Self::parse_param_entry)?;
        let close = self.cursor.previous_span();
        group_params(entries, close)
    }

    fn parse_param_entry(&mut self) -> Result<ParamEntry<'src>, ParseError> {
        let span = self.cursor.current_span();
        let named = self.cursor.check(TokenKind::Ident)
            && !matches!(
                self.cursor.peek_kind(),
                TokenKind::Comma | TokenKind::RParen | TokenKind::Dot | TokenKind::Newline
            );
        let name = if named {
            Some(self.cursor.advance().text)
        } else {
            None
        };
        let ty = if self.cursor.eat(TokenKind::Ellipsis) {
            TypeExpr::Ellipsis(Box::new(self.parse_type()?))
        } else {
            self.parse_type()?
        };
        Ok(ParamEntry { name, ty, span })
    }

    fn parse_results(&mut self) -> Result<Vec<Field>, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LParen => self.parse_parameters(),
            kind if starts_type(kind) => Ok(vec![Field::unnamed(self.parse_type()?)]),
            _ => Ok(Vec::new()),
        }
    }

    /// Parse a comma-separated list through the closing token. Newlines
    /// between elements are allowed; a trailing comma is accepted.
    fn parse_list<T>(
        &mut self,
        close: TokenKind,
        mut parse_item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(close) {
                return Ok(items);
            }
            items.push(parse_item(self)?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.cursor.expect(close, close_name(close))?;
                return Ok(items);
            }
        }
    }

    fn parse_struct(&mut self) -> Result<TypeExpr, ParseError> {
        self.cursor.expect(TokenKind::Struct, "`struct`")?;
        self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.eat(TokenKind::RBrace) {
                return Ok(TypeExpr::Struct(fields));
            }
            self.parse_field_decl(&mut fields)?;
            self.cursor.eat(TokenKind::String);
            self.expect_member_end()?;
        }
    }

    fn parse_field_decl(&mut self, fields: &mut Vec<Field>) -> Result<(), ParseError> {
        let embedded = self.cursor.check(TokenKind::Star)
            || (self.cursor.check(TokenKind::Ident)
                && matches!(
                    self.cursor.peek_kind(),
                    TokenKind::Dot
                        | TokenKind::Semicolon
                        | TokenKind::Newline
                        | TokenKind::RBrace
                        | TokenKind::String
                ));
        if embedded {
            fields.push(Field::unnamed(self.parse_type()?));
            return Ok(());
        }

        let mut names = vec![self.cursor.expect(TokenKind::Ident, "field name")?.text];
        while self.cursor.eat(TokenKind::Comma) {
            names.push(self.cursor.expect(TokenKind::Ident, "field name")?.text);
        }
        let ty = self.parse_type()?;
        fields.extend(names.into_iter().map(|name| Field::named(name, ty.clone())));
        Ok(())
    }

    fn parse_interface(&mut self) -> Result<TypeExpr, ParseError> {
        self.cursor.expect(TokenKind::Interface, "`interface`")?;
        self.cursor.expect(TokenKind::LBrace, "`{`")?;
        let mut elems = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.eat(TokenKind::RBrace) {
                return Ok(TypeExpr::Interface(elems));
            }
            if self.cursor.check(TokenKind::Ident) && self.cursor.peek_kind() == TokenKind::LParen
            {
                let name = self.cursor.advance().text.to_owned();
                let sig = self.parse_signature()?;
                elems.push(InterfaceElem::Method { name, sig });
            } else {
                elems.push(InterfaceElem::Embed(self.parse_union()?));
            }
            self.expect_member_end()?;
        }
    }

    /// A constraint union: `~int | string`.
    fn parse_union(&mut self) -> Result<TypeExpr, ParseError> {
        let mut lhs = self.parse_union_term()?;
        while self.cursor.check_op("|") {
            self.cursor.advance();
            let rhs = self.parse_union_term()?;
            lhs = TypeExpr::Binary {
                op: "|".to_owned(),
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_union_term(&mut self) -> Result<TypeExpr, ParseError> {
        if self.cursor.check_op("~") {
            self.cursor.advance();
            let operand = Box::new(self.parse_type()?);
            return Ok(TypeExpr::Unary {
                op: "~".to_owned(),
                operand,
            });
        }
        self.parse_type()
    }

    /// Struct fields and interface elements end at a separator or the
    /// closing brace.
    fn expect_member_end(&mut self) -> Result<(), ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Semicolon | TokenKind::Newline | TokenKind::RBrace => Ok(()),
            kind => Err(ParseError::unexpected(
                "`;` or `}`",
                kind,
                self.cursor.current_span(),
            )),
        }
    }

    /// Parse an expression in type position.
    pub(crate) fn parse_expr(&mut self) -> Result<TypeExpr, ParseError> {
        self.parse_binary(1)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut lhs = self.parse_unary()?;
            loop {
                let token = self.cursor.current();
                let prec = match token.kind {
                    TokenKind::Star | TokenKind::Operator => precedence(token.text),
                    _ => None,
                };
                let Some(prec) = prec.filter(|p| *p >= min_prec) else {
                    return Ok(lhs);
                };
                self.cursor.advance();
                let rhs = self.parse_binary(prec + 1)?;
                lhs = TypeExpr::Binary {
                    op: token.text.to_owned(),
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                };
            }
        })
    }

    fn parse_unary(&mut self) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::Star => {
                    self.cursor.advance();
                    Ok(TypeExpr::pointer(self.parse_unary()?))
                }
                TokenKind::Arrow if self.cursor.peek_kind() == TokenKind::Chan => self.parse_type(),
                TokenKind::Arrow => {
                    self.cursor.advance();
                    let operand = Box::new(self.parse_unary()?);
                    Ok(TypeExpr::Unary {
                        op: token.text.to_owned(),
                        operand,
                    })
                }
                TokenKind::Operator if matches!(token.text, "-" | "+" | "!" | "^" | "~" | "&") => {
                    self.cursor.advance();
                    let operand = Box::new(self.parse_unary()?);
                    Ok(TypeExpr::Unary {
                        op: token.text.to_owned(),
                        operand,
                    })
                }
                _ => self.parse_primary(),
            }
        })
    }

    fn parse_primary(&mut self) -> Result<TypeExpr, ParseError> {
        let token = self.cursor.current();
        let mut expr = match token.kind {
            kind if kind.is_literal() => {
                self.cursor.advance();
                TypeExpr::BasicLit(token.text.to_owned())
            }
            TokenKind::Ident => self.parse_operand_name()?,
            TokenKind::LParen => {
                self.cursor.advance();
                self.cursor.skip_newlines();
                let inner = self.parse_expr()?;
                self.cursor.skip_newlines();
                self.cursor.expect(TokenKind::RParen, "`)`")?;
                TypeExpr::Paren(Box::new(inner))
            }
            TokenKind::LBracket
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Func
            | TokenKind::Struct
            | TokenKind::Interface => self.parse_type()?,
            kind => return Err(ParseError::expected_type(kind, token.span)),
        };

        while self.cursor.eat(TokenKind::LBracket) {
            let args = self.parse_list(TokenKind::RBracket, Self::parse_expr)?;
            expr = TypeExpr::Index {
                base: Box::new(expr),
                args,
            };
        }
        Ok(expr)
    }
}

fn close_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::RParen => "`,` or `)`",
        TokenKind::RBracket => "`,` or `]`",
        _ => "closing delimiter",
    }
}

/// Apply Go's grouping rule: if any entry is named, every entry is a name
/// and bare identifiers take the type of the next named entry.
fn group_params(entries: Vec<ParamEntry<'_>>, close: Span) -> Result<Vec<Field>, ParseError> {
    if entries.iter().all(|entry| entry.name.is_none()) {
        return Ok(entries.into_iter().map(|e| Field::unnamed(e.ty)).collect());
    }

    let mut fields = Vec::with_capacity(entries.len());
    let mut pending: Vec<String> = Vec::new();
    for entry in entries {
        match (entry.name, entry.ty) {
            (Some(name), ty) => {
                fields.extend(pending.drain(..).map(|p| Field::named(p, ty.clone())));
                fields.push(Field::named(name, ty));
            }
            (None, TypeExpr::Ident(name)) => pending.push(name),
            (None, _) => {
                return Err(ParseError::unexpected(
                    "parameter name",
                    TokenKind::Ident,
                    entry.span,
                ))
            }
        }
    }
    if pending.is_empty() {
        Ok(fields)
    } else {
        Err(ParseError::expected_type(TokenKind::RParen, close))
    }
}
