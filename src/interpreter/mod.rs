pub mod error;
pub mod value;

#[cfg(test)]
pub mod test;

pub use error::RuntimeError;
pub use value::Value;

use crate::ast::{BinOp, Expr, ExprKind, Ident, Program, Stmt, StmtKind, UnOp};
use crate::lexer::Position;

use ftlog::{debug, trace};

use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Executes a checked program, reading `read` input from `input` and writing
/// `print` output to `output`. The output is flushed before returning,
/// whether or not the run failed.
pub fn run<R: BufRead, W: Write>(
    program: &Program,
    input: R,
    output: W,
) -> Result<(), RuntimeError> {
    let mut interpreter = Interpreter::new(input, output);
    let result = interpreter.run(program);
    let flushed = interpreter.flush(Position::default());
    result.and(flushed)
}

/// Tree-walking executor. Owns the environment and both streams for the
/// whole run.
pub struct Interpreter<R, W> {
    variables: HashMap<String, Value>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Interpreter {
            variables: HashMap::new(),
            input,
            output,
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        debug!("executing {} top-level statements", program.statements.len());
        self.execute_block(&program.statements)
    }

    fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        trace!("{}: {:?}", stmt.position, stmt.kind);
        match &stmt.kind {
            StmtKind::Declare { name, ty, init } => {
                let value = match init {
                    Some(init) => self.evaluate(init)?,
                    None => Value::zero(*ty),
                };
                self.variables.insert(name.name.clone(), value);
            }
            StmtKind::Assign { target, value } => {
                let value = self.evaluate(value)?;
                self.variables.insert(target.name.clone(), value);
            }
            StmtKind::For {
                index,
                low,
                high,
                body,
            } => {
                let low = self.evaluate_int(low)?;
                let high = self.evaluate_int(high)?;
                for i in low..high {
                    self.variables.insert(index.name.clone(), Value::Int(i));
                    self.execute_block(body)?;
                }
            }
            StmtKind::Read { target } => self.read(target, stmt.position)?,
            StmtKind::Print(expr) => {
                let value = self.evaluate(expr)?;
                write!(self.output, "{}", value).map_err(|source| RuntimeError::Io {
                    source,
                    position: stmt.position,
                })?;
            }
            StmtKind::Assert(expr) => match self.evaluate(expr)? {
                Value::Bool(true) => {}
                Value::Bool(false) => {
                    return Err(RuntimeError::AssertionFailed {
                        position: stmt.position,
                    });
                }
                other => panic!("assert reached the interpreter with {:?}", other),
            },
        }
        Ok(())
    }

    fn read(&mut self, target: &Ident, position: Position) -> Result<(), RuntimeError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|source| RuntimeError::Io { source, position })?;
        if read == 0 {
            return Err(RuntimeError::InputExhausted { position });
        }

        // the current value decides how the line is parsed
        let value = match self.lookup(&target.name) {
            Value::Int(_) => {
                let trimmed = line.trim();
                match trimmed.parse::<i64>() {
                    Ok(n) => Value::Int(n),
                    Err(_) => {
                        return Err(RuntimeError::InvalidInput {
                            input: trimmed.to_string(),
                            position,
                        });
                    }
                }
            }
            Value::Str(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Value::Str(line)
            }
            Value::Bool(_) => {
                panic!("read into boolean {} reached the interpreter", target.name)
            }
        };
        self.variables.insert(target.name.clone(), value);
        Ok(())
    }

    fn evaluate_int(&mut self, expr: &Expr) -> Result<i64, RuntimeError> {
        match self.evaluate(expr)? {
            Value::Int(n) => Ok(n),
            other => panic!("expected an integer at {}, found {:?}", expr.position, other),
        }
    }

    /// Evaluates `expr` left operand first.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Int(*n)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Identifier(name) => Ok(self.lookup(name).clone()),
            ExprKind::Nullary(operand) => self.evaluate(operand),
            ExprKind::Unary { operator, operand } => match (operator, self.evaluate(operand)?) {
                (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                (operator, value) => {
                    panic!("unsupported operand {:?} for unary {}", value, operator)
                }
            },
            ExprKind::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(*operator, left, right, expr.position)
            }
        }
    }

    fn lookup(&self, name: &str) -> &Value {
        match self.variables.get(name) {
            Some(value) => value,
            None => panic!("variable {} is not bound at run time", name),
        }
    }

    fn flush(&mut self, position: Position) -> Result<(), RuntimeError> {
        self.output
            .flush()
            .map_err(|source| RuntimeError::Io { source, position })
    }
}

fn binary(
    operator: BinOp,
    left: Value,
    right: Value,
    position: Position,
) -> Result<Value, RuntimeError> {
    let overflow = || RuntimeError::Overflow { position };
    let value = match (operator, left, right) {
        (BinOp::Add, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_add(b).ok_or_else(overflow)?)
        }
        (BinOp::Add, Value::Str(a), Value::Str(b)) => Value::Str(a + &b),
        (BinOp::Sub, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_sub(b).ok_or_else(overflow)?)
        }
        (BinOp::Mul, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_mul(b).ok_or_else(overflow)?)
        }
        (BinOp::Div, Value::Int(_), Value::Int(0)) => {
            return Err(RuntimeError::DivisionByZero { position });
        }
        // i64::MIN / -1 is the only other failing division
        (BinOp::Div, Value::Int(a), Value::Int(b)) => {
            Value::Int(a.checked_div(b).ok_or_else(overflow)?)
        }
        (BinOp::And, Value::Bool(a), Value::Bool(b)) => Value::Bool(a && b),
        (BinOp::Eq, left, right) if left.ty() == right.ty() => Value::Bool(left == right),
        (BinOp::Less, left, right) => match left.compare(&right) {
            Some(ordering) => Value::Bool(ordering.is_lt()),
            None => panic!("cannot compare {:?} with {:?}", left, right),
        },
        (operator, left, right) => panic!(
            "unsupported operands {:?} and {:?} for binary {}",
            left, right, operator
        ),
    };
    Ok(value)
}
