/// Errors raised when a value does not have the shape a caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// A strict accessor was used on a value of another variant.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// A JSON document that should describe a collection is a scalar.
    #[error("expected a JSON array or object, got {found}")]
    NotACollection { found: String },

    /// A JSON number that fits neither `i64` nor `Decimal`.
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}
