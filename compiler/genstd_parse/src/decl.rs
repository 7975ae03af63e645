//! File-level grammar: package clause, imports and function outlines.

use std::path::PathBuf;

use genstd_ir::{FuncDecl, ImportSpec, Imports, SourceFile, SourceKind};
use genstd_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_, '_> {
    /// Parse a whole file into its outline.
    pub(crate) fn parse_source_file(
        &mut self,
        path: PathBuf,
        kind: SourceKind,
    ) -> Result<SourceFile, ParseError> {
        self.cursor.skip_separators();
        if !self.cursor.eat(TokenKind::Package) {
            return Err(ParseError {
                kind: ParseErrorKind::MissingPackageClause,
                span: self.cursor.current_span(),
            });
        }
        let package_name = self
            .cursor
            .expect(TokenKind::Ident, "package name")?
            .text
            .to_owned();

        let mut imports = Imports::new();
        let mut funcs = Vec::new();
        loop {
            self.cursor.skip_separators();
            match self.cursor.current_kind() {
                TokenKind::Eof => break,
                TokenKind::Import => self.parse_import_decl(&mut imports)?,
                TokenKind::Func if self.cursor.at_line_start() => {
                    funcs.push(self.parse_func_decl()?);
                }
                _ => self.skip_declaration()?,
            }
        }

        Ok(SourceFile {
            path,
            kind,
            package_name,
            imports,
            funcs,
        })
    }

    /// `import "p"` or `import ( ... )`.
    fn parse_import_decl(&mut self, imports: &mut Imports) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Import, "`import`")?;
        if !self.cursor.eat(TokenKind::LParen) {
            imports.push(self.parse_import_spec()?);
            return Ok(());
        }
        loop {
            self.cursor.skip_separators();
            if self.cursor.eat(TokenKind::RParen) {
                return Ok(());
            }
            imports.push(self.parse_import_spec()?);
        }
    }

    fn parse_import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let name = match self.cursor.current_kind() {
            TokenKind::Ident | TokenKind::Dot => Some(self.cursor.advance().text),
            _ => None,
        };
        let path = unquote(self.cursor.expect(TokenKind::String, "import path")?.text);
        Ok(match name {
            Some(name) => ImportSpec::aliased(name, path),
            None => ImportSpec::new(path),
        })
    }

    /// `func [(recv)] name [type params] (params) results [body]`
    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        self.cursor.expect(TokenKind::Func, "`func`")?;

        let receiver = if self.cursor.check(TokenKind::LParen) {
            let open = self.cursor.current_span();
            let mut params = self.parse_parameters()?;
            match (params.pop(), params.is_empty()) {
                (Some(receiver), true) => Some(receiver),
                _ => {
                    return Err(ParseError::unexpected(
                        "exactly one receiver",
                        TokenKind::LParen,
                        open,
                    ))
                }
            }
        } else {
            None
        };

        let name = self.cursor.expect(TokenKind::Ident, "function name")?;

        let has_type_params = self.cursor.check(TokenKind::LBracket);
        if has_type_params {
            self.cursor.skip_balanced()?;
        }

        let signature = self.parse_signature()?;

        let has_body = self.cursor.check(TokenKind::LBrace);
        if has_body {
            self.cursor.skip_balanced()?;
        }

        Ok(FuncDecl {
            name: name.text.to_owned(),
            receiver,
            has_type_params,
            signature,
            has_body,
            span: name.span,
        })
    }

    /// Skip a declaration the outline does not record, up to the next
    /// separator at nesting depth 0.
    fn skip_declaration(&mut self) -> Result<(), ParseError> {
        loop {
            match self.cursor.current_kind() {
                TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof => return Ok(()),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.cursor.skip_balanced()?;
                }
                kind @ (TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace) => {
                    return Err(ParseError::unexpected(
                        "declaration",
                        kind,
                        self.cursor.current_span(),
                    ));
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }
}

/// Strip the quotes from an import path literal.
fn unquote(literal: &str) -> &str {
    let mut chars = literal.chars();
    match (chars.next(), chars.next_back()) {
        (Some('"'), Some('"')) | (Some('`'), Some('`')) => chars.as_str(),
        _ => literal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
