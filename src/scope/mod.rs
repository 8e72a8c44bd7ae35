
use crate::ast::{Expr, ExprKind, Ident, Program, Stmt, StmtKind, Type};
use crate::diagnostic::Diagnostic;
use crate::lexer::Position;

use ftlog::debug;

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ty: Type,
    pub declared_at: Position,
}

/// Declared variables and their types. Built once by `ScopeAnalyzer` and
/// only read afterwards.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the table unchanged, if `name` already exists.
    pub fn insert(&mut self, name: &str, ty: Type, declared_at: Position) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols
            .insert(name.to_string(), Symbol { ty, declared_at });
        true
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn type_of(&self, name: &str) -> Option<Type> {
        self.symbols.get(name).map(|symbol| symbol.ty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Builds the symbol table for `program` and reports declaration errors.
pub fn build(program: &Program) -> (SymbolTable, Vec<Diagnostic>) {
    let mut analyzer = ScopeAnalyzer::new();
    analyzer.analyze(program);
    debug!(
        "scope analysis declared {} symbols with {} errors",
        analyzer.symbols.len(),
        analyzer.errors.len()
    );
    (analyzer.symbols, analyzer.errors)
}

#[derive(Debug, Default)]
pub struct ScopeAnalyzer {
    symbols: SymbolTable,
    // indices of the loops currently being walked
    locked: HashSet<String>,
    errors: Vec<Diagnostic>,
}

impl ScopeAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Declare { name, ty, init } => {
                // the initializer cannot see the variable it initializes
                if let Some(init) = init {
                    self.visit_expr(init);
                }
                if !self.symbols.insert(&name.name, *ty, stmt.position) {
                    self.errors.push(Diagnostic::scope(
                        stmt.position,
                        format!("redeclaration of variable {}", name.name),
                    ));
                }
            }
            StmtKind::Assign { target, value } => {
                self.visit_ident(target);
                if self.locked.contains(&target.name) {
                    self.errors.push(Diagnostic::scope(
                        stmt.position,
                        format!("cannot modify loop index {} during loop", target.name),
                    ));
                }
                self.visit_expr(value);
            }
            StmtKind::For {
                index,
                low,
                high,
                body,
            } => {
                self.visit_ident(index);
                let newly_locked = self.locked.insert(index.name.clone());
                if !newly_locked {
                    self.errors.push(Diagnostic::scope(
                        index.position,
                        format!("loop index {} is already in use by an enclosing loop", index.name),
                    ));
                }

                self.visit_expr(low);
                self.visit_expr(high);
                for stmt in body {
                    self.visit_stmt(stmt);
                }

                // an inner loop over an already locked index must not unlock it
                if newly_locked {
                    self.locked.remove(&index.name);
                }
            }
            StmtKind::Read { target } => {
                self.visit_ident(target);
                if self.locked.contains(&target.name) {
                    self.errors.push(Diagnostic::scope(
                        stmt.position,
                        format!("cannot read into loop index {} during loop", target.name),
                    ));
                }
            }
            StmtKind::Print(expr) | StmtKind::Assert(expr) => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Nullary(operand) => self.visit_expr(operand),
            ExprKind::Identifier(name) => self.check_declared(name, expr.position),
            ExprKind::Number(_) | ExprKind::Str(_) => {}
        }
    }

    fn visit_ident(&mut self, ident: &Ident) {
        self.check_declared(&ident.name, ident.position);
    }

    fn check_declared(&mut self, name: &str, position: Position) {
        if !self.symbols.contains(name) {
            self.errors.push(Diagnostic::scope(
                position,
                format!("variable {} used before declaration", name),
            ));
        }
    }
}
