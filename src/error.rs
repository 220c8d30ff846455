use thiserror::Error;

/// Diagnostics produced while parsing one statement.
///
/// Every variant renders as `Parse error: <reason> at token '<text>'`, where
/// `<text>` is the literal text of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parse error: Expected {expected} at token '{found}'")]
    MissingExpectedToken {
        expected: &'static str,
        found: String,
    },
    #[error("Parse error: Unexpected token at token '{found}'")]
    UnexpectedToken { found: String },
    #[error("Parse error: Expected identifier or literal at token '{found}'")]
    ExpectedOperand { found: String },
    #[error("Parse error: Expected expression at token '{found}'")]
    ExpectedExpression { found: String },
}

/// Failures raised while evaluating a parsed statement against a context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("Database '{0}' already exists")]
    DatabaseExists(String),
    #[error("Database '{0}' not found")]
    DatabaseNotFound(String),
    #[error("Table '{0}' already exists")]
    TableExists(String),
    #[error("Table '{0}' not found")]
    TableNotFound(String),
    #[error("Column '{0}' already exists")]
    ColumnExists(String),
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),
    #[error("Invalid identifier '{0}'")]
    InvalidName(String),
    #[error("{0} capacity reached")]
    CapacityExceeded(&'static str),
    #[error("Column count does not match value count")]
    ColumnValueMismatch,
    #[error("No matching rows found")]
    NoRows,
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}
