use miette::Diagnostic;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("Cannot {op} {left} and {right}")]
    #[diagnostic(
        code(yar::type_mismatch),
        help("arithmetic and comparison operators expect numbers; `+` also joins two strings")
    )]
    BinaryMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("Cannot {op} {operand}")]
    #[diagnostic(code(yar::type_mismatch))]
    UnaryMismatch {
        op: &'static str,
        operand: &'static str,
    },
    #[error("len() requires string, got {found}")]
    #[diagnostic(code(yar::type_mismatch), help("only strings have a length"))]
    LenMismatch { found: &'static str },
    #[error("Division by zero")]
    #[diagnostic(code(yar::division_by_zero))]
    DivisionByZero,
    #[error("{message}")]
    #[diagnostic(code(yar::user))]
    User { message: String },
}

impl RuntimeError {
    pub fn binary(op: &'static str, left: &'static str, right: &'static str) -> Self {
        RuntimeError::BinaryMismatch { op, left, right }
    }

    pub fn unary(op: &'static str, operand: &'static str) -> Self {
        RuntimeError::UnaryMismatch { op, operand }
    }

    pub fn user(message: impl Into<String>) -> Self {
        RuntimeError::User {
            message: message.into(),
        }
    }
}
