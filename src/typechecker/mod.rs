pub mod expression;


use crate::ast::{Program, Stmt, StmtKind, Type};
use crate::diagnostic::Diagnostic;
use crate::scope::SymbolTable;

use ftlog::debug;

/// Type checks every statement of `program` against the declared types.
pub fn check(program: &Program, symbols: &SymbolTable) -> Vec<Diagnostic> {
    let mut checker = TypeChecker::new(symbols);
    checker.check_program(program);
    debug!("type checking found {} errors", checker.errors.len());
    checker.errors
}

/// Second pass over the tree. Never mutates the symbol table; expects it to
/// hold every name the program uses.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    symbols: &'a SymbolTable,
    errors: Vec<Diagnostic>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        TypeChecker {
            symbols,
            errors: vec![],
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn check_program(&mut self, program: &Program) {
        for stmt in &program.statements {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Declare { name, ty, init } => {
                let Some(init) = init else {
                    return;
                };
                let init_ty = self.infer(init);
                if init_ty != *ty {
                    self.error(
                        stmt,
                        format!(
                            "cannot assign type {} to variable {} of type {}",
                            init_ty, name.name, ty
                        ),
                    );
                }
            }
            StmtKind::Assign { target, value } => {
                let target_ty = self.declared_type(&target.name);
                let value_ty = self.infer(value);
                if value_ty != target_ty {
                    self.error(
                        stmt,
                        format!(
                            "cannot assign type {} to variable {} of type {}",
                            value_ty, target.name, target_ty
                        ),
                    );
                }
            }
            StmtKind::For {
                index,
                low,
                high,
                body,
            } => {
                let index_ty = self.declared_type(&index.name);
                let low_ty = self.infer(low);
                let high_ty = self.infer(high);

                if index_ty != Type::Int {
                    self.error(
                        stmt,
                        format!("loop index must be {}, not {}", Type::Int, index_ty),
                    );
                }
                if low_ty != Type::Int {
                    self.error(
                        stmt,
                        format!("loop lower bound must be {}, not {}", Type::Int, low_ty),
                    );
                }
                if high_ty != Type::Int {
                    self.error(
                        stmt,
                        format!("loop upper bound must be {}, not {}", Type::Int, high_ty),
                    );
                }

                for stmt in body {
                    self.check_stmt(stmt);
                }
            }
            StmtKind::Read { target } => {
                let target_ty = self.declared_type(&target.name);
                if target_ty == Type::Bool {
                    self.error(
                        stmt,
                        format!(
                            "cannot read into variable {} of type {}",
                            target.name, target_ty
                        ),
                    );
                }
            }
            StmtKind::Print(expr) => {
                self.infer(expr);
            }
            StmtKind::Assert(expr) => {
                let ty = self.infer(expr);
                if ty != Type::Bool {
                    self.error(
                        stmt,
                        format!("assert is only defined for type {}, not {}", Type::Bool, ty),
                    );
                }
            }
        }
    }

    fn declared_type(&self, name: &str) -> Type {
        match self.symbols.type_of(name) {
            Some(ty) => ty,
            None => panic!(
                "type checker found variable {} missing from the symbol table",
                name
            ),
        }
    }

    fn error(&mut self, stmt: &Stmt, message: String) {
        self.errors.push(Diagnostic::type_error(stmt.position, message));
    }
}
