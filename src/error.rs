use thiserror::Error;

/// Malformed or out-of-domain input. Always reported to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rows must have length 5, got {0}")]
    RowCount(usize),

    #[error("rows must consist of digits in 0..5, row at index {index} is {value}")]
    RowOutOfRange { index: usize, value: u8 },

    #[error("row at index {index} must contain <= {} matches, got {value}", .index + 1)]
    RowOverCapacity { index: usize, value: u8 },

    #[error("rows must contain at least 1 match")]
    NoMatches,

    #[error("rows must be digits, found {0:?}")]
    NotADigit(char),

    #[error("level must be an integer in 0..2, got {0}")]
    Level(u8),

    #[error("{0:?} is not a permutation")]
    NotAPermutation(Vec<usize>),

    #[error("permutation of length {permutation} cannot be applied to a list of length {list}")]
    PermutationTooLong { permutation: usize, list: usize },

    #[error("a move takes 1..3 matches from a row in 0..4, got row {row_index} count {match_count}")]
    Move { row_index: usize, match_count: u8 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A logic defect: a derived move or lookup broke its own contract.
    #[error("internal consistency violated: {0}")]
    Internal(String),

    #[error("state of size {size} lies outside a tree rooted at size {root_size}")]
    OutsideTree { size: usize, root_size: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Error::Internal` with the given message unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Internal(message()))
    }
}
