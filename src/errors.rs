use crate::core::Move;

/// Error kinds the core distinguishes, per the error-handling design.
///
/// Every variant leaves the caller's state untouched; none of these interrupt a
/// worker thread, they are only ever returned to the caller for reporting.
#[derive(thiserror::Error, Debug)]
pub enum ContrastError {
    #[error("move {0:?} is not legal in this position")]
    InvalidMove(Move),

    #[error("coordinate out of range: {0}")]
    OutOfRangeCoord(String),

    #[error("expected a 29-element state array, received {0}")]
    ArraySize(usize),

    #[error("weights file has {found} pattern(s), expected {expected}")]
    WeightsMismatch { found: u64, expected: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContrastError>;
