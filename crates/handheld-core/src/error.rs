//! Error types for parsing, execution and repair.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid instruction: unrecognized opcode '{0}'")]
    InvalidInstruction(String),

    #[error("Program counter out of bounds: {pc} is outside [0, {len}]")]
    ProgramCounterOutOfBounds { pc: i64, len: usize },

    #[error("Step limit exceeded: more than {limit} steps executed")]
    StepLimitExceeded { limit: usize },

    #[error("No repair found: none of {candidates} candidates terminated")]
    NoRepairFound { candidates: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Returns true for errors raised while a program was executing, as opposed
    /// to errors about the input or the search itself.
    pub fn is_execution_fault(&self) -> bool {
        matches!(
            self,
            Error::ProgramCounterOutOfBounds { .. } | Error::StepLimitExceeded { .. }
        )
    }
}
