use crate::lexer::Position;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    Declare {
        name: Ident,
        ty: Type,
        init: Option<Expr>,
    },
    Assign {
        target: Ident,
        value: Expr,
    },
    For {
        index: Ident,
        low: Expr,
        high: Expr,
        body: Vec<Stmt>,
    },
    Read {
        target: Ident,
    },
    Print(Expr),
    Assert(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Binary {
        left: Box<Expr>,
        operator: BinOp,
        right: Box<Expr>,
    },
    Unary {
        operator: UnOp,
        operand: Box<Expr>,
    },
    // a lone operand; evaluates exactly like its child
    Nullary(Box<Expr>),

    Number(i64),
    Str(String),
    Identifier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    Eq,
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
}

/// The three declarable value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    String,
    Bool,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Stmt { kind, position }
    }
}

impl Ident {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Ident {
            name: name.into(),
            position,
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position) -> Self {
        Expr { kind, position }
    }

    /// Strips any `Nullary` wrappers.
    pub fn unwrap_nullary(&self) -> &Expr {
        match &self.kind {
            ExprKind::Nullary(inner) => inner.unwrap_nullary(),
            _ => self,
        }
    }
}

// Display uses the token-kind spelling so diagnostics read like the lexer's.
impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinOp::Add => "PLUS",
            BinOp::Sub => "MINUS",
            BinOp::Mul => "MULTIPLY",
            BinOp::Div => "DIVIDE",
            BinOp::Less => "LT",
            BinOp::Eq => "EQ",
            BinOp::And => "AND",
        };
        f.write_str(name)
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Not => f.write_str("NOT"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "INT",
            Type::String => "STRING",
            Type::Bool => "BOOL",
        };
        f.write_str(name)
    }
}
