use thiserror::Error;

/// Runtime failures. They travel as data inside `Value::Error`, never as a
/// panic, and are rendered by the printer as `Error: <message>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LispErr {
    #[error("invalid number")]
    InvalidNumber,
    #[error("Cannot operate on non-number")]
    NonNumberOperand,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("S-expression does not start with symbol.")]
    MissingLeadingSymbol,
    #[error("Invalid operator")]
    InvalidOperator,
    #[error("Missing operand")]
    MissingOperand,
    #[error("Integer overflow")]
    Overflow,
}

pub type LispResult<T> = Result<T, LispErr>;

/// A source text that does not match the grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}:{line}:{col}: error: expected {expected} at {found}")]
pub struct SyntaxError {
    pub name: String,
    pub line: usize,
    pub col: usize,
    pub expected: &'static str,
    pub found: String,
}
