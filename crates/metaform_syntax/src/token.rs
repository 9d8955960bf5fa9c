//! Token types for the host language.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token is an opening delimiter.
    #[must_use]
    pub const fn is_open_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// Returns true if this token is a closing delimiter.
    #[must_use]
    pub const fn is_close_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    /// Returns true if this token is the identifier `word`.
    #[must_use]
    pub fn is_identifier(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name == word)
    }
}

/// Token types for the host language.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    // Punctuation
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `@` introducing a meta-function name
    At,
    /// `=`
    Assign,
    /// `==`
    EqualEqual,
    /// `->`
    Arrow,

    // Operators
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `!`
    Bang,

    // Literals and names
    /// Identifier like `draw`, or a glued operator name like `operator=`
    Identifier(String),
    /// Integer literal like `42`
    Int(i64),
    /// Float literal like `3.14`
    Float(f64),
    /// String literal like `"hello"`
    String(String),
    /// Character literal like `'x'`
    Char(char),

    // Meta
    /// Comment text (including the `//` or `/*` markers)
    Comment(String),
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Colon => "':'",
            Self::ColonColon => "'::'",
            Self::Semicolon => "';'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::At => "'@'",
            Self::Assign => "'='",
            Self::EqualEqual => "'=='",
            Self::Arrow => "'->'",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Ampersand => "'&'",
            Self::Pipe => "'|'",
            Self::Bang => "'!'",
            Self::Identifier(_) => "identifier",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Char(_) => "character",
            Self::Comment(_) => "comment",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    /// Renders the token back to source text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::LBracket => f.write_str("["),
            Self::RBracket => f.write_str("]"),
            Self::LBrace => f.write_str("{"),
            Self::RBrace => f.write_str("}"),
            Self::Colon => f.write_str(":"),
            Self::ColonColon => f.write_str("::"),
            Self::Semicolon => f.write_str(";"),
            Self::Comma => f.write_str(","),
            Self::Dot => f.write_str("."),
            Self::At => f.write_str("@"),
            Self::Assign => f.write_str("="),
            Self::EqualEqual => f.write_str("=="),
            Self::Arrow => f.write_str("->"),
            Self::Less => f.write_str("<"),
            Self::Greater => f.write_str(">"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Ampersand => f.write_str("&"),
            Self::Pipe => f.write_str("|"),
            Self::Bang => f.write_str("!"),
            Self::Identifier(name) => f.write_str(name),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => {
                let s = n.to_string();
                if s.contains('.') || s.contains('e') {
                    f.write_str(&s)
                } else {
                    write!(f, "{s}.0")
                }
            }
            Self::String(s) => write!(f, "{s:?}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Comment(text) => f.write_str(text),
            Self::Eof => Ok(()),
            Self::Error(msg) => write!(f, "<error: {msg}>"),
        }
    }
}
