/// Errors raised by unit construction, conversion and quantity arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("Invalid converter: {reason}")]
    InvalidConverter { reason: String },
    #[error("Incompatible dimensions: cannot combine {lhs} with {rhs}")]
    IncompatibleDimension { lhs: String, rhs: String },
    #[error("Cannot convert {from} to {to}: dimensions {from_dimension} and {to_dimension} differ")]
    Unconvertible {
        from: String,
        to: String,
        from_dimension: String,
        to_dimension: String,
    },
    #[error("{from} ({from_dimension}) and {to} ({to_dimension}) are incommensurable")]
    Incommensurable {
        from: String,
        to: String,
        from_dimension: String,
        to_dimension: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Arithmetic overflow while {operation}")]
    Overflow { operation: &'static str },
    #[error("Invalid number {number}")]
    InvalidNumber { number: String },
    #[error("Unit {unit} has dimension {actual}, but {kind} requires {expected}")]
    KindMismatch {
        unit: String,
        kind: &'static str,
        expected: String,
        actual: String,
    },
    #[error("Unknown unit '{symbol}'")]
    UnknownUnit { symbol: String },
    #[error("Unit '{symbol}' is already registered")]
    DuplicateUnit { symbol: String },
    #[error("The process-wide unit system is already initialised")]
    SystemAlreadyInstalled,
}

