pub mod token;

#[cfg(test)]
pub mod test;

pub use token::{LexError, Position, Token, TokenKind};

use logos::Logos;

/// Scanner over a source buffer. Wraps the logos lexer and attaches
/// line/column positions; scan failures come out as `TokenKind::Error`
/// tokens instead of stopping the scan.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    line_starts: Vec<usize>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Lexer {
            inner: TokenKind::lexer(source),
            source,
            line_starts,
            finished: false,
        }
    }

    /// Returns the next token. Once the input is exhausted this keeps
    /// returning `Eof` at the end-of-input position.
    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.inner.next() else {
            return Token::new(TokenKind::Eof, self.position_of(self.source.len()));
        };

        let position = self.position_of(self.inner.span().start);
        match result {
            Ok(kind) => Token::new(kind, position),
            Err(err) => Token::new(
                TokenKind::Error(err.message(self.inner.slice())),
                position,
            ),
        }
    }

    fn position_of(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;
        Position::new(line, column)
    }
}

/// Yields every token up to and including the first `Eof`.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}
