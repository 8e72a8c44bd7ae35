use crate::lexer::Position;

use std::fmt;
use std::io;

#[derive(Debug)]
/// Everything that can stop a type-correct program while it runs.
pub enum RuntimeError {
    /// An `assert` condition evaluated to false.
    AssertionFailed {
        position: Position,
    },
    /// Integer division with a zero divisor.
    DivisionByZero {
        position: Position,
    },
    /// `+`, `-` or `*` left the 64-bit signed range.
    Overflow {
        position: Position,
    },
    /// A `read` into an integer got a line that is not a decimal integer.
    InvalidInput {
        input: String,
        position: Position,
    },
    /// A `read` found the input already exhausted.
    InputExhausted {
        position: Position,
    },
    /// Reading input or writing output failed.
    Io {
        source: io::Error,
        position: Position,
    },
}

impl RuntimeError {
    pub fn position(&self) -> Position {
        match self {
            Self::AssertionFailed { position }
            | Self::DivisionByZero { position }
            | Self::Overflow { position }
            | Self::InvalidInput { position, .. }
            | Self::InputExhausted { position }
            | Self::Io { position, .. } => *position,
        }
    }

    /// The message without the position prefix.
    pub fn message(&self) -> String {
        match self {
            Self::AssertionFailed { .. } => "assert failed".to_string(),
            Self::DivisionByZero { .. } => "division by zero".to_string(),
            Self::Overflow { .. } => "integer overflow".to_string(),
            Self::InvalidInput { input, .. } => {
                format!("expected an integer as input, got {:?}", input)
            }
            Self::InputExhausted { .. } => "unexpected end of input".to_string(),
            Self::Io { source, .. } => format!("i/o failure: {}", source),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: runtime error: {}", self.position(), self.message())
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
