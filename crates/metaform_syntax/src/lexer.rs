//! Lexer for the host language.
//!
//! The lexer converts source text into a stream of tokens. Every token
//! span is stamped with the [`SourceId`] of the source being lexed.

use metaform_foundation::SourceId;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Operator spellings that may directly follow the `operator` keyword,
/// longest first so that `operator==` is not read as `operator=` `=`.
const OPERATOR_NAMES: &[&str] = &[
    "<=>", "==", "!=", "<=", ">=", "()", "[]", "=", "<", ">", "+", "-", "*", "/",
];

/// Lexer for host-language source code.
///
/// The lexer iterates through source text and produces tokens.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Id stamped on every span.
    source_id: SourceId,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str, source_id: SourceId) -> Self {
        Self {
            source,
            rest: source,
            source_id,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(self.source_id, start, start, start_line, start_column),
            );
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '.' => self.single(TokenKind::Dot),
            '@' => self.single(TokenKind::At),
            '<' => self.single(TokenKind::Less),
            '>' => self.single(TokenKind::Greater),
            '+' => self.single(TokenKind::Plus),
            '*' => self.single(TokenKind::Star),
            '%' => self.single(TokenKind::Percent),
            '&' => self.single(TokenKind::Ampersand),
            '|' => self.single(TokenKind::Pipe),
            '!' => self.single(TokenKind::Bang),
            ':' => {
                self.advance();
                if self.peek_char() == Some(':') {
                    self.advance();
                    TokenKind::ColonColon
                } else {
                    TokenKind::Colon
                }
            }
            '=' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Assign
                }
            }
            '-' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '/' => match self.peek_char_n(1) {
                Some('/') => self.scan_line_comment(),
                Some('*') => self.scan_block_comment(),
                _ => self.single(TokenKind::Slash),
            },
            '"' => self.scan_string(),
            '\'' => self.scan_char(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            c => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(
            kind,
            Span::new(
                self.source_id,
                start,
                self.position,
                start_line,
                start_column,
            ),
        )
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    ///
    /// Comments are included in the output.
    #[must_use]
    pub fn tokenize_all(source: &str, source_id: SourceId) -> Vec<Token> {
        let mut lexer = Lexer::new(source, source_id);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Consumes one character and returns `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks `n` characters ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Advances past `n` characters.
    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scans a `//` comment up to the end of the line.
    fn scan_line_comment(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        TokenKind::Comment(self.source[start..self.position].to_string())
    }

    /// Scans a `/* ... */` comment.
    fn scan_block_comment(&mut self) -> TokenKind {
        let start = self.position;
        self.advance_n(2);
        loop {
            match self.peek_char() {
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance_n(2);
                    break;
                }
                Some(_) => self.advance(),
                None => return TokenKind::Error("unterminated block comment".into()),
            }
        }
        TokenKind::Comment(self.source[start..self.position].to_string())
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening '"'
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape() {
                        Ok(c) => text.push(c),
                        Err(kind) => return kind,
                    }
                }
                Some('\n') | None => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::String(text)
    }

    /// Scans a character literal.
    fn scan_char(&mut self) -> TokenKind {
        self.advance(); // consume opening '\''
        let c = match self.peek_char() {
            Some('\\') => {
                self.advance();
                match self.scan_escape() {
                    Ok(c) => c,
                    Err(kind) => return kind,
                }
            }
            Some('\'' | '\n') | None => {
                return TokenKind::Error("empty or unterminated character literal".into());
            }
            Some(c) => {
                self.advance();
                c
            }
        };
        if self.peek_char() == Some('\'') {
            self.advance();
            TokenKind::Char(c)
        } else {
            TokenKind::Error("unterminated character literal".into())
        }
    }

    /// Scans the character after a backslash.
    fn scan_escape(&mut self) -> Result<char, TokenKind> {
        let c = match self.peek_char() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some(c) => {
                return Err(TokenKind::Error(format!("invalid escape sequence: \\{c}")));
            }
            None => {
                return Err(TokenKind::Error(
                    "unexpected end of input in escape sequence".into(),
                ));
            }
        };
        self.advance();
        Ok(c)
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        let mut has_dot = false;

        while let Some(c) = self.peek_char() {
            // `'` is a digit separator when followed by another digit
            if c.is_ascii_digit()
                || (c == '\'' && self.peek_char_n(1).is_some_and(|d| d.is_ascii_digit()))
            {
                self.advance();
            } else if c == '.'
                && !has_dot
                && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
            {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[start..self.position]
            .chars()
            .filter(|&c| c != '\'')
            .collect();

        if has_dot {
            match text.parse::<f64>() {
                Ok(n) => TokenKind::Float(n),
                Err(e) => TokenKind::Error(format!("invalid float: {e}")),
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => TokenKind::Int(n),
                Err(e) => TokenKind::Error(format!("invalid integer: {e}")),
            }
        }
    }

    /// Scans an identifier, gluing `operator` to the operator it names.
    fn scan_identifier(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if is_identifier_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        let mut name = self.source[start..self.position].to_string();

        if name == "operator" {
            if let Some(op) = OPERATOR_NAMES.iter().find(|op| self.rest.starts_with(**op)) {
                self.advance_n(op.chars().count());
                name.push_str(op);
            }
        }

        TokenKind::Identifier(name)
    }
}

/// Returns true if `c` can start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
