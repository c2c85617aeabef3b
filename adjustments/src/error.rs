use thiserror::Error;

use strand_types::IdError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    #[error("{column} column has {found} entries, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("more than {max} adjustments in one list")]
    TooManyAdjustments { max: usize },

    #[error(transparent)]
    Id(#[from] IdError),
}
