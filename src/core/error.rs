use crate::core::footer::Footer;
use crate::core::record::RecordKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Field '{field}' exceeds {limit} characters (got {actual})")]
    FieldTooLong {
        field: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("Malformed field '{field}': {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("Malformed {record} record: {reason}")]
    MalformedRecord { record: RecordKind, reason: String },

    #[error("Truncated input: ledger needs at least a header and a footer line, found {lines}")]
    TruncatedInput { lines: usize },

    #[error("Capacity exceeded: no more than {limit} auto-assigned transactions")]
    CapacityExceeded { limit: u32 },

    #[error("Transaction counter has not been assigned")]
    UnassignedCounter,

    #[error("Footer mismatch: stored {stored}, derived {derived}")]
    FooterMismatch { stored: Footer, derived: Footer },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Attach a 1-based line number to a record parse failure.
    ///
    /// Other variants pass through untouched.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            LedgerError::MalformedRecord { record, reason } => LedgerError::MalformedRecord {
                record,
                reason: format!("line {}: {}", line, reason),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
