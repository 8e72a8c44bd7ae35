pub mod expression;
pub mod statement;


use crate::ast::{Ident, Program};
use crate::diagnostic::Diagnostic;
use crate::lexer::{Position, Token, TokenKind};

use ftlog::debug;

/// Parses a whole token stream, returning the tree and every syntax (and
/// lexical) error found on the way.
pub fn parse<I>(tokens: I) -> (Program, Vec<Diagnostic>)
where
    I: IntoIterator<Item = Token>,
{
    let mut parser = Parser::new(tokens.into_iter());
    let program = parser.parse_program();
    (program, parser.errors)
}

/// LL(1) parser. Holds exactly one token of lookahead in `current`; a
/// failed production records one error and resynchronises.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
    current: Token,
    errors: Vec<Diagnostic>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(mut tokens: I) -> Self {
        let current = tokens
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Position::default()));

        Parser {
            tokens,
            current,
            errors: vec![],
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        // a program has at least one statement
        statements.extend(self.parse_statement());

        loop {
            while self.current.kind.starts_statement() {
                statements.extend(self.parse_statement());
            }

            if self.at(&TokenKind::Eof) {
                break;
            }

            self.unexpected("EOF");
            // a stray `end` is not consumed by `skip_statement`
            if self.at(&TokenKind::KeywordEnd) {
                self.advance();
            }
            self.skip_statement();
        }

        debug!(
            "parsed {} top-level statements with {} errors",
            statements.len(),
            self.errors.len()
        );

        Program { statements }
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current.kind == *kind
    }

    fn advance(&mut self) -> Token {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => Token::new(TokenKind::Eof, self.current.position),
        };
        std::mem::replace(&mut self.current, next)
    }

    /// Consumes the current token if it is `kind`, otherwise records an
    /// error and leaves the token in place.
    fn expect(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            self.unexpected(kind.name());
            false
        }
    }

    fn expect_ident(&mut self) -> Option<Ident> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let ident = Ident::new(name.clone(), self.current.position);
            self.advance();
            Some(ident)
        } else {
            self.unexpected("IDENT");
            None
        }
    }

    /// Records an error for the current token. Lexer failures are reported
    /// with the lexer's own message.
    fn unexpected(&mut self, expected: &str) {
        let position = self.current.position;
        let error = match &self.current.kind {
            TokenKind::Error(message) => Diagnostic::lexical(position, message.clone()),
            found => Diagnostic::syntax(position, format!("expected {}, got {}", expected, found)),
        };
        self.errors.push(error);
    }

    /// Skips past the next `;`, stopping early in front of an `end` so the
    /// enclosing loop can still close.
    fn skip_statement(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof | TokenKind::KeywordEnd => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skips past the `end for ;` that closes the loop being parsed,
    /// stepping over any nested loops.
    fn skip_for_block(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::KeywordFor => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::KeywordEnd => {
                    self.advance();
                    if !self.at(&TokenKind::KeywordFor) {
                        continue;
                    }
                    self.advance();
                    if !self.at(&TokenKind::Semicolon) {
                        continue;
                    }
                    self.advance();
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}
