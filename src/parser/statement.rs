use crate::ast::{Expr, Ident, Stmt, StmtKind, Type};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

impl<I: Iterator<Item = Token>> Parser<I> {
    /// stmt := "var" IDENT ":" type [":=" expr]
    ///       | IDENT ":=" expr
    ///       | "for" IDENT "in" expr ".." expr "do" stmt* "end" "for"
    ///       | "read" IDENT | "print" expr | "assert" "(" expr ")"
    ///
    /// Returns `None` when the statement was malformed; the error has been
    /// recorded and the parser has skipped past it.
    pub fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current.kind {
            TokenKind::KeywordVar => self.parse_declaration(),
            TokenKind::Ident(_) => self.parse_assignment(),
            TokenKind::KeywordFor => self.parse_for(),
            TokenKind::KeywordRead => self.parse_read(),
            TokenKind::KeywordPrint => self.parse_print(),
            TokenKind::KeywordAssert => self.parse_assert(),
            _ => {
                self.unexpected("a statement");
                if !matches!(self.current.kind, TokenKind::Eof | TokenKind::KeywordEnd) {
                    self.skip_statement();
                }
                None
            }
        }
    }

    fn parse_declaration(&mut self) -> Option<Stmt> {
        let Token { position, .. } = self.advance();

        let Some(name) = self.expect_ident() else {
            self.skip_statement();
            return None;
        };

        if !self.expect(&TokenKind::Colon) {
            self.skip_statement();
            return None;
        }

        let ty = match self.current.kind {
            TokenKind::IntType => Type::Int,
            TokenKind::StringType => Type::String,
            TokenKind::BoolType => Type::Bool,
            _ => {
                self.unexpected("a type");
                self.skip_statement();
                return None;
            }
        };
        self.advance();

        let init = if self.at(&TokenKind::Assign) {
            self.advance();
            let Some(expr) = self.parse_expression() else {
                self.skip_statement();
                return None;
            };
            Some(expr)
        } else {
            None
        };

        self.end_statement();
        Some(Stmt::new(StmtKind::Declare { name, ty, init }, position))
    }

    fn parse_assignment(&mut self) -> Option<Stmt> {
        let position = self.current.position;
        let target = self.expect_ident()?;

        if !self.expect(&TokenKind::Assign) {
            self.skip_statement();
            return None;
        }

        let Some(value) = self.parse_expression() else {
            self.skip_statement();
            return None;
        };

        self.end_statement();
        Some(Stmt::new(StmtKind::Assign { target, value }, position))
    }

    fn parse_for(&mut self) -> Option<Stmt> {
        let Token { position, .. } = self.advance();

        let Some((index, low, high)) = self.parse_for_header() else {
            self.skip_for_block();
            return None;
        };

        let mut body = vec![];
        while self.current.kind.starts_statement() {
            body.extend(self.parse_statement());
        }

        if !self.expect(&TokenKind::KeywordEnd) {
            self.skip_for_block();
            return None;
        }

        if !self.expect(&TokenKind::KeywordFor) {
            // the body is already closed; only this statement is broken
            self.skip_statement();
            return None;
        }

        self.end_statement();
        Some(Stmt::new(
            StmtKind::For {
                index,
                low,
                high,
                body,
            },
            position,
        ))
    }

    fn parse_for_header(&mut self) -> Option<(Ident, Expr, Expr)> {
        let index = self.expect_ident()?;
        if !self.expect(&TokenKind::KeywordIn) {
            return None;
        }
        let low = self.parse_expression()?;
        if !self.expect(&TokenKind::Range) {
            return None;
        }
        let high = self.parse_expression()?;
        if !self.expect(&TokenKind::KeywordDo) {
            return None;
        }
        Some((index, low, high))
    }

    fn parse_read(&mut self) -> Option<Stmt> {
        let Token { position, .. } = self.advance();

        let Some(target) = self.expect_ident() else {
            self.skip_statement();
            return None;
        };

        self.end_statement();
        Some(Stmt::new(StmtKind::Read { target }, position))
    }

    fn parse_print(&mut self) -> Option<Stmt> {
        let Token { position, .. } = self.advance();

        let Some(expr) = self.parse_expression() else {
            self.skip_statement();
            return None;
        };

        self.end_statement();
        Some(Stmt::new(StmtKind::Print(expr), position))
    }

    fn parse_assert(&mut self) -> Option<Stmt> {
        let Token { position, .. } = self.advance();

        if !self.expect(&TokenKind::LParen) {
            self.skip_statement();
            return None;
        }

        let Some(expr) = self.parse_expression() else {
            self.skip_statement();
            return None;
        };

        if !self.expect(&TokenKind::RParen) {
            self.skip_statement();
            return None;
        }

        self.end_statement();
        Some(Stmt::new(StmtKind::Assert(expr), position))
    }

    // A missing `;` is reported but the statement itself is kept. Leftover
    // tokens up to the next `;` belong to this statement and are dropped.
    fn end_statement(&mut self) {
        if self.expect(&TokenKind::Semicolon) {
            return;
        }
        let resumable = self.current.kind.starts_statement()
            || matches!(self.current.kind, TokenKind::KeywordEnd | TokenKind::Eof);
        if !resumable {
            self.skip_statement();
        }
    }
}
