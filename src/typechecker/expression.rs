use crate::ast::{BinOp, Expr, ExprKind, Type, UnOp};
use crate::diagnostic::Diagnostic;
use crate::typechecker::TypeChecker;

const NUMERIC_OR_TEXT: &[Type] = &[Type::Int, Type::String];
const NUMERIC: &[Type] = &[Type::Int];
const BOOLEAN: &[Type] = &[Type::Bool];

/// Operand types an operator accepts. `None` means any type, as long as
/// both sides agree.
fn accepted_types(operator: BinOp) -> Option<&'static [Type]> {
    match operator {
        BinOp::Add => Some(NUMERIC_OR_TEXT),
        BinOp::Sub | BinOp::Mul | BinOp::Div => Some(NUMERIC),
        BinOp::And => Some(BOOLEAN),
        BinOp::Less | BinOp::Eq => None,
    }
}

impl TypeChecker<'_> {
    /// Infers the type of `expr`, left operand before right, recording
    /// every rule violation found on the way.
    pub fn infer(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Number(_) => Type::Int,
            ExprKind::Str(_) => Type::String,
            ExprKind::Identifier(name) => self.declared_type(name),
            ExprKind::Nullary(operand) => self.infer(operand),
            ExprKind::Unary { operator, operand } => {
                let operand_ty = self.infer(operand);
                match operator {
                    UnOp::Not => {
                        if operand_ty != Type::Bool {
                            self.errors.push(Diagnostic::type_error(
                                expr.position,
                                format!(
                                    "unary operator {} not defined for type {}",
                                    operator, operand_ty
                                ),
                            ));
                        }
                        Type::Bool
                    }
                }
            }
            ExprKind::Binary {
                left,
                operator,
                right,
            } => {
                let left_ty = self.infer(left);
                let right_ty = self.infer(right);

                if left_ty != right_ty {
                    self.errors.push(Diagnostic::type_error(
                        expr.position,
                        format!(
                            "unmatched types {} and {} for binary expression {}",
                            left_ty, right_ty, operator
                        ),
                    ));
                }

                if let Some(accepted) = accepted_types(*operator) {
                    if !accepted.contains(&left_ty) {
                        self.errors.push(Diagnostic::type_error(
                            expr.position,
                            format!("operator {} not defined for type {}", operator, left_ty),
                        ));
                    }
                }

                match operator {
                    BinOp::Less | BinOp::Eq => Type::Bool,
                    _ => left_ty,
                }
            }
        }
    }
}
