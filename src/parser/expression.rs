use crate::ast::{BinOp, Expr, ExprKind, UnOp};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

fn binary_operator(kind: &TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Multiply => BinOp::Mul,
        TokenKind::Divide => BinOp::Div,
        TokenKind::Less => BinOp::Less,
        TokenKind::Equal => BinOp::Eq,
        TokenKind::And => BinOp::And,
        _ => return None,
    };
    Some(op)
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// expr := ["!"] opnd | opnd binop opnd
    ///
    /// At most one operator; anything after the right operand is left for
    /// the caller, which will reject it.
    pub fn parse_expression(&mut self) -> Option<Expr> {
        let position = self.current.position;

        if self.at(&TokenKind::Not) {
            self.advance();
            let operand = self.parse_operand()?;
            return Some(Expr::new(
                ExprKind::Unary {
                    operator: UnOp::Not,
                    operand: Box::new(operand),
                },
                position,
            ));
        }

        let left = self.parse_operand()?;

        let Some(operator) = binary_operator(&self.current.kind) else {
            return Some(Expr::new(ExprKind::Nullary(Box::new(left)), position));
        };
        self.advance();

        let right = self.parse_operand()?;
        Some(Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            position,
        ))
    }

    /// opnd := INT | STRING | IDENT | "(" expr ")"
    fn parse_operand(&mut self) -> Option<Expr> {
        let position = self.current.position;

        let kind = match &self.current.kind {
            TokenKind::IntLiteral(value) => ExprKind::Number(*value),
            TokenKind::StringLiteral(value) => ExprKind::Str(value.clone()),
            TokenKind::Ident(name) => ExprKind::Identifier(name.clone()),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                if !self.expect(&TokenKind::RParen) {
                    return None;
                }
                return Some(inner);
            }
            _ => {
                self.unexpected("an operand");
                return None;
            }
        };

        self.advance();
        Some(Expr::new(kind, position))
    }
}
