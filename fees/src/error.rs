use thiserror::Error;

use strand_types::IdError;

/// Construction-time validation failures of fee rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("fraction divides by zero")]
    DivisionByZero,

    #[error("invalid range: {field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("invalid range: maximum {max} is below minimum {min}")]
    MaximumBelowMinimum { min: i64, max: i64 },

    #[error("royalty fraction {numerator}/{denominator} exceeds one")]
    RoyaltyFractionExceedsOne { numerator: i64, denominator: i64 },

    #[error("fixed fee must collect a positive amount, got {0}")]
    MustBePositive(i64),

    #[error("custom fee has no fee collector")]
    MissingCollector,

    #[error("custom fee specifies no fee type")]
    NotFullySpecified,

    #[error("{len} effective payers exceed the limit of {max}")]
    TooManyEffectivePayers { len: usize, max: usize },

    #[error(transparent)]
    Id(#[from] IdError),
}

impl FeeError {
    /// Whether this is one of the numeric range failures.
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            Self::NegativeValue { .. } | Self::MaximumBelowMinimum { .. }
        )
    }
}
