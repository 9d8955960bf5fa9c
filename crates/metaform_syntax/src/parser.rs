//! Parser for host-language declarations.
//!
//! The parser converts a token buffer into owned [`DeclSyntax`] trees.
//! It works over a borrowed slice so it can parse straight out of the
//! durable token storage of a [`SourceMap`](crate::SourceMap).

use metaform_foundation::{Error, Result, SourceId};

use crate::ast::{
    Access, AliasKind, DeclSyntax, DeclSyntaxKind, Initializer, InitializerKind, MetaName,
    Parameter, PassingStyle, ThisSpecifier, TypeId,
};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Returned by [`Parser::current`] when the buffer has no tokens at all.
static EOF: Token = Token::new(TokenKind::Eof, Span::new(SourceId::UNKNOWN, 0, 0, 0, 0));

/// Parser for host-language source code.
pub struct Parser<'t> {
    /// The token buffer (trivia included; skipped on the fly).
    tokens: &'t [Token],
    /// Index of the current (non-trivia) token.
    position: usize,
    /// Span of the last consumed token.
    previous: Span,
    /// Source text (for error messages).
    source: &'t str,
}

impl<'t> Parser<'t> {
    /// Creates a parser over `tokens`, which were lexed from `source`.
    #[must_use]
    pub fn new(tokens: &'t [Token], source: &'t str) -> Self {
        let mut parser = Self {
            tokens,
            position: 0,
            previous: tokens.first().map_or(EOF.span, |t| t.span),
            source,
        };
        parser.skip_trivia();
        parser
    }

    /// Parses every declaration up to the end of input.
    ///
    /// # Errors
    /// Returns an error if any declaration cannot be parsed.
    pub fn parse_all(&mut self) -> Result<Vec<DeclSyntax>> {
        let mut decls = Vec::new();
        while !self.at_eof() {
            decls.push(self.parse_declaration()?);
        }
        Ok(decls)
    }

    /// Parses exactly one declaration; anything after it is an error.
    ///
    /// # Errors
    /// Returns an error if the input is empty, malformed, or holds more
    /// than one declaration.
    pub fn parse_one_declaration(&mut self) -> Result<DeclSyntax> {
        if self.at_eof() {
            return Err(self.error("expected a declaration, found end of input"));
        }
        let decl = self.parse_declaration()?;
        if !self.at_eof() {
            return Err(self.error(&format!(
                "unexpected {} after the declaration",
                self.current().kind.name()
            )));
        }
        Ok(decl)
    }

    /// Parses one declaration: `access? name ':' ('@' meta)* tail`.
    fn parse_declaration(&mut self) -> Result<DeclSyntax> {
        let start = self.current().span;

        let access = match &self.current().kind {
            TokenKind::Identifier(word) if matches!(self.peek_kind(1), TokenKind::Identifier(_)) => {
                match Access::from_keyword(word) {
                    Some(access) => {
                        self.advance();
                        access
                    }
                    None => Access::Default,
                }
            }
            _ => Access::Default,
        };

        let name = self.expect_identifier("a declaration name")?;
        self.expect(&TokenKind::Colon)?;

        let mut meta_functions = Vec::new();
        while self.current().kind == TokenKind::At {
            self.advance();
            let span = self.current().span;
            let name = self.expect_identifier("a meta function name")?;
            meta_functions.push(MetaName { name, span });
        }

        let (kind, initializer) = if self.current().is_identifier("type") {
            self.parse_type_tail()?
        } else if self.current().is_identifier("namespace") {
            self.parse_namespace_tail()?
        } else if self.current().kind == TokenKind::LParen {
            self.parse_function_tail()?
        } else {
            self.parse_object_tail()?
        };

        if let Some(meta) = meta_functions.first() {
            if !matches!(kind, DeclSyntaxKind::Type { .. }) {
                return Err(self.error_at(
                    meta.span,
                    "meta functions may only be applied to type declarations",
                ));
            }
        }

        Ok(DeclSyntax {
            name,
            access,
            meta_functions,
            kind,
            initializer,
            span: start.to(self.previous),
        })
    }

    /// Parses `type = { members }` or `type == target;`.
    fn parse_type_tail(&mut self) -> Result<(DeclSyntaxKind, Option<Initializer>)> {
        self.advance(); // consume 'type'
        match self.current().kind {
            TokenKind::Assign => {
                self.advance();
                let members = self.parse_member_block()?;
                Ok((DeclSyntaxKind::Type { members }, None))
            }
            TokenKind::EqualEqual => {
                self.advance();
                let target = self.parse_alias_target()?;
                Ok((
                    DeclSyntaxKind::Alias {
                        of: AliasKind::Type,
                        target,
                        ty: None,
                    },
                    None,
                ))
            }
            _ => Err(self.unexpected("'=' or '==' after 'type'")),
        }
    }

    /// Parses `namespace = { members }` or `namespace == target;`.
    fn parse_namespace_tail(&mut self) -> Result<(DeclSyntaxKind, Option<Initializer>)> {
        self.advance(); // consume 'namespace'
        match self.current().kind {
            TokenKind::Assign => {
                self.advance();
                let members = self.parse_member_block()?;
                Ok((DeclSyntaxKind::Namespace { members }, None))
            }
            TokenKind::EqualEqual => {
                self.advance();
                let target = self.parse_alias_target()?;
                Ok((
                    DeclSyntaxKind::Alias {
                        of: AliasKind::Namespace,
                        target,
                        ty: None,
                    },
                    None,
                ))
            }
            _ => Err(self.unexpected("'=' or '==' after 'namespace'")),
        }
    }

    /// Parses `'{' declaration* '}' ';'?`.
    fn parse_member_block(&mut self) -> Result<Vec<DeclSyntax>> {
        let open = self.current().span;
        self.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        while self.current().kind != TokenKind::RBrace {
            if self.at_eof() {
                return Err(self.error_at(open, "unterminated declaration body"));
            }
            members.push(self.parse_declaration()?);
        }
        self.expect(&TokenKind::RBrace)?;
        self.eat(&TokenKind::Semicolon);
        Ok(members)
    }

    /// Parses `'(' params ')' ('->' type)? ('=' init | ';')`.
    fn parse_function_tail(&mut self) -> Result<(DeclSyntaxKind, Option<Initializer>)> {
        let open = self.current().span;
        self.expect(&TokenKind::LParen)?;

        let mut params = Vec::new();
        while self.current().kind != TokenKind::RParen {
            if self.at_eof() {
                return Err(self.error_at(open, "unterminated parameter list"));
            }
            params.push(self.parse_parameter()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let returns = if self.eat(&TokenKind::Arrow) {
            Some(self.parse_type_id(&[TokenKind::Assign, TokenKind::Semicolon])?)
        } else {
            None
        };

        let initializer = if self.eat(&TokenKind::Assign) {
            Some(self.parse_initializer()?)
        } else {
            self.expect(&TokenKind::Semicolon)?;
            None
        };

        Ok((DeclSyntaxKind::Function { params, returns }, initializer))
    }

    /// Parses one parameter: `specifier? pass? name (':' type)? ('=' default)?`.
    fn parse_parameter(&mut self) -> Result<Parameter> {
        let start = self.current().span;

        let specifier = self
            .keyword_before_identifier()
            .and_then(ThisSpecifier::from_keyword);
        if specifier.is_some() {
            self.advance();
        }

        let pass = self
            .keyword_before_identifier()
            .and_then(PassingStyle::from_keyword);
        if pass.is_some() {
            self.advance();
        }

        let name = self.expect_identifier("a parameter name")?;
        let mut param = Parameter::new(name, start);
        param.specifier = specifier;
        param.pass = pass.unwrap_or_default();

        if self.eat(&TokenKind::Colon) {
            param.ty = Some(self.parse_type_id(&[
                TokenKind::Comma,
                TokenKind::RParen,
                TokenKind::Assign,
            ])?);
        }
        if self.eat(&TokenKind::Assign) {
            let tokens = self.collect_until(&[TokenKind::Comma, TokenKind::RParen], false)?;
            if tokens.is_empty() {
                return Err(self.unexpected("a default argument"));
            }
            param.default = Some(render_compact(&tokens));
        }

        param.span = start.to(self.previous);
        Ok(param)
    }

    /// Parses an object tail: `type? ('=' init | '==' target ';' | ';')`.
    fn parse_object_tail(&mut self) -> Result<(DeclSyntaxKind, Option<Initializer>)> {
        let ty = match self.current().kind {
            TokenKind::Assign | TokenKind::EqualEqual | TokenKind::Semicolon => None,
            _ => Some(self.parse_type_id(&[
                TokenKind::Assign,
                TokenKind::EqualEqual,
                TokenKind::Semicolon,
            ])?),
        };

        match self.current().kind {
            TokenKind::Assign => {
                self.advance();
                let init = self.parse_initializer()?;
                Ok((DeclSyntaxKind::Object { ty }, Some(init)))
            }
            TokenKind::EqualEqual => {
                self.advance();
                let target = self.parse_alias_target()?;
                Ok((
                    DeclSyntaxKind::Alias {
                        of: AliasKind::Object,
                        target,
                        ty,
                    },
                    None,
                ))
            }
            TokenKind::Semicolon if ty.is_some() => {
                self.advance();
                Ok((DeclSyntaxKind::Object { ty }, None))
            }
            TokenKind::Semicolon => {
                Err(self.error("an object declared without a type needs an initializer"))
            }
            _ => Err(self.unexpected("'=', '==' or ';'")),
        }
    }

    /// Parses a type id up to one of `stops` at nesting depth zero.
    fn parse_type_id(&mut self, stops: &[TokenKind]) -> Result<TypeId> {
        let is_const = self.current().is_identifier("const");
        if is_const {
            self.advance();
        }
        let tokens = self.collect_until(stops, true)?;
        if tokens.is_empty() {
            return Err(self.unexpected("a type"));
        }
        Ok(TypeId::new(render_compact(&tokens), is_const))
    }

    /// Parses the target of an alias, up to and including `;`.
    fn parse_alias_target(&mut self) -> Result<String> {
        let tokens = self.collect_until(&[TokenKind::Semicolon], false)?;
        if tokens.is_empty() {
            return Err(self.unexpected("an alias target"));
        }
        self.expect(&TokenKind::Semicolon)?;
        Ok(render_compact(&tokens))
    }

    /// Parses an initializer: a braced block with optional `;`, or an
    /// expression terminated by `;`.
    fn parse_initializer(&mut self) -> Result<Initializer> {
        let start = self.current().span;

        if self.current().kind == TokenKind::LBrace {
            let tokens = self.collect_block()?;
            let span = start.to(self.previous);
            self.eat(&TokenKind::Semicolon);
            return Ok(Initializer {
                kind: InitializerKind::Block,
                text: render_spaced(&tokens),
                span,
            });
        }

        let tokens = self.collect_until(&[TokenKind::Semicolon], false)?;
        if tokens.is_empty() {
            return Err(self.unexpected("an initializer"));
        }
        let span = start.to(self.previous);
        self.expect(&TokenKind::Semicolon)?;
        Ok(Initializer {
            kind: InitializerKind::Expression,
            text: render_spaced(&tokens),
            span,
        })
    }

    /// Consumes a balanced `{ ... }` block, returning all of its tokens.
    fn collect_block(&mut self) -> Result<Vec<&'t Token>> {
        let open = self.current().span;
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let token = self.current();
            match &token.kind {
                TokenKind::Eof => return Err(self.error_at(open, "unterminated block")),
                TokenKind::Error(msg) => return Err(self.error(msg)),
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            tokens.push(token);
            self.advance();
            if depth == 0 {
                return Ok(tokens);
            }
        }
    }

    /// Collects tokens up to (not including) one of `stops` at depth zero.
    ///
    /// When `angles` is set, `<` and `>` nest like brackets (type ids).
    fn collect_until(&mut self, stops: &[TokenKind], angles: bool) -> Result<Vec<&'t Token>> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let token = self.current();
            if depth == 0 && stops.contains(&token.kind) {
                return Ok(tokens);
            }
            match &token.kind {
                TokenKind::Eof => return Ok(tokens),
                TokenKind::Error(msg) => return Err(self.error(msg)),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::Less if angles => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return Ok(tokens);
                    }
                    depth -= 1;
                }
                TokenKind::Greater if angles && depth > 0 => depth -= 1,
                _ => {}
            }
            tokens.push(token);
            self.advance();
        }
    }

    /// Returns the current identifier's text if the token after it is
    /// also an identifier (so a keyword-looking name is still a name).
    fn keyword_before_identifier(&self) -> Option<&'t str> {
        match (&self.current().kind, self.peek_kind(1)) {
            (TokenKind::Identifier(word), TokenKind::Identifier(_)) => Some(word.as_str()),
            _ => None,
        }
    }

    /// Returns the current token.
    fn current(&self) -> &'t Token {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    /// Returns the kind of the `n`th non-trivia token after the current one.
    fn peek_kind(&self, n: usize) -> &'t TokenKind {
        self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map_or(&EOF.kind, |t| &t.kind)
    }

    /// Returns true at the end of input.
    fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Advances to the next non-trivia token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.previous = self.tokens[self.position].span;
            self.position += 1;
        }
        self.skip_trivia();
    }

    /// Skips comment tokens.
    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.position)
            .is_some_and(|t| t.kind.is_trivia())
        {
            self.position += 1;
        }
    }

    /// Consumes the current token if it has the given kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.current().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected(expected.name()))
        }
    }

    /// Expects an identifier and returns its text.
    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        if let TokenKind::Identifier(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Creates an "expected X, found Y" error, preferring a lexer message.
    fn unexpected(&self, what: &str) -> Error {
        match &self.current().kind {
            TokenKind::Error(msg) => self.error(msg),
            other => self.error(&format!("expected {what}, found {}", other.name())),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current().span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::parse_error(message, span.line, span.column, self.context_at(span))
    }

    /// Gets the source line containing a span for error messages.
    fn context_at(&self, span: Span) -> String {
        let start = span.start.min(self.source.len());
        let (Some(before), Some(after)) = (self.source.get(..start), self.source.get(start..))
        else {
            return String::new();
        };
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = after.find('\n').map_or(self.source.len(), |i| start + i);
        self.source[line_start..line_end].to_string()
    }
}

/// Returns true for tokens that need a space between them.
fn is_wordlike(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Char(_)
    )
}

/// Renders tokens with spaces only between adjacent words (`std::vector<int>`).
fn render_compact(tokens: &[&Token]) -> String {
    let mut out = String::new();
    let mut previous_wordlike = false;
    for token in tokens {
        let wordlike = is_wordlike(&token.kind);
        if wordlike && previous_wordlike {
            out.push(' ');
        }
        out.push_str(&token.kind.to_string());
        previous_wordlike = wordlike;
    }
    out
}

/// Renders tokens separated by single spaces (`{ return x ; }`).
fn render_spaced(tokens: &[&Token]) -> String {
    tokens
        .iter()
        .map(|t| t.kind.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses source code into declarations.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Vec<DeclSyntax>> {
    let tokens = Lexer::tokenize_all(source, SourceId::UNKNOWN);
    Parser::new(&tokens, source).parse_all()
}

/// Parses exactly one declaration from source.
///
/// # Errors
/// Returns an error if the source is not exactly one declaration.
pub fn parse_one(source: &str) -> Result<DeclSyntax> {
    let tokens = Lexer::tokenize_all(source, SourceId::UNKNOWN);
    Parser::new(&tokens, source).parse_one_declaration()
}
