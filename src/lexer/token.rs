use logos::{FilterResult, Logos};

use std::fmt;

/// 1-based source location of the first character of a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Failures raised by the scanner callbacks. `InvalidToken` is what logos
/// produces for input no rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    InvalidToken,
    LeadingZero,
    IntegerOutOfRange,
    UnterminatedString,
    UnterminatedComment,
}

impl LexError {
    pub fn message(&self, slice: &str) -> String {
        match self {
            LexError::InvalidToken => match slice.chars().next() {
                Some(c) => format!("unrecognized character '{}'", c.escape_debug()),
                None => "unrecognized input".to_string(),
            },
            LexError::LeadingZero => format!("integer literal {} has a leading zero", slice),
            LexError::IntegerOutOfRange => format!("integer literal {} is out of range", slice),
            LexError::UnterminatedString => "unterminated string literal".to_string(),
            LexError::UnterminatedComment => "unterminated block comment".to_string(),
        }
    }
}

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // value types
    #[token("int")]
    IntType,

    #[token("string")]
    StringType,

    #[token("bool")]
    BoolType,

    // literals
    #[regex(r"[0-9]+", integer_literal)]
    IntLiteral(i64),

    #[regex(r#""([^"\\\n\r]|\\[^\n\r]?)*"?"#, string_literal)]
    StringLiteral(String),

    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // operators
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Multiply,

    #[token("/")]
    Divide,

    #[token("<")]
    Less,

    #[token("=")]
    Equal,

    #[token("&")]
    And,

    #[token("!")]
    Not,

    #[token(":=")]
    Assign,

    #[token("..")]
    Range,

    // punctuation
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    // never produced; only carries the callback that skips the comment
    #[token("/*", block_comment)]
    BlockComment,

    // keywords
    #[token("var")]
    KeywordVar,

    #[token("for")]
    KeywordFor,

    #[token("end")]
    KeywordEnd,

    #[token("in")]
    KeywordIn,

    #[token("do")]
    KeywordDo,

    #[token("read")]
    KeywordRead,

    #[token("print")]
    KeywordPrint,

    #[token("assert")]
    KeywordAssert,

    Eof,

    /// A lexical failure; the payload is the diagnostic message.
    Error(String),
}

fn integer_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<i64, LexError> {
    let digits = lex.slice();
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(LexError::LeadingZero);
    }
    digits.parse::<i64>().map_err(|_| LexError::IntegerOutOfRange)
}

fn string_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexError> {
    let mut chars = lex.slice()[1..].chars();
    let mut value = String::new();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(value),
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some(other) => value.push(other),
                None => break,
            },
            c => value.push(c),
        }
    }

    Err(LexError::UnterminatedString)
}

// comments do not nest; the first `*/` closes
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexError> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexError::UnterminatedComment)
        }
    }
}

impl TokenKind {
    /// Tokens that can start a statement.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::KeywordVar
                | TokenKind::Ident(_)
                | TokenKind::KeywordFor
                | TokenKind::KeywordRead
                | TokenKind::KeywordPrint
                | TokenKind::KeywordAssert
        )
    }

    /// Kind name without the payload, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::IntType => "INT",
            TokenKind::StringType => "STRING",
            TokenKind::BoolType => "BOOL",
            TokenKind::IntLiteral(_) => "INT_LITERAL",
            TokenKind::StringLiteral(_) => "STRING_LITERAL",
            TokenKind::Ident(_) => "IDENT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Less => "LT",
            TokenKind::Equal => "EQ",
            TokenKind::And => "AND",
            TokenKind::Not => "NOT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Range => "RANGE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Semicolon => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::BlockComment => "COMMENT",
            TokenKind::KeywordVar => "VAR",
            TokenKind::KeywordFor => "FOR",
            TokenKind::KeywordEnd => "END",
            TokenKind::KeywordIn => "IN",
            TokenKind::KeywordDo => "DO",
            TokenKind::KeywordRead => "READ",
            TokenKind::KeywordPrint => "PRINT",
            TokenKind::KeywordAssert => "ASSERT",
            TokenKind::Eof => "EOF",
            TokenKind::Error(_) => "ERROR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token { kind, position }
    }
}
