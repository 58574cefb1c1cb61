//! Error - Failure modes of the sorting engine

use thiserror::Error;

/// Errors raised by the race sorter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// An order statistic was requested from an empty sequence
    #[error("cannot select a median from an empty racer sequence")]
    EmptyInput,

    /// A mode name or code did not match any known sort mode
    #[error("unknown sort mode `{0}`")]
    InvalidMode(String),
}

pub type Result<T> = std::result::Result<T, SortError>;
