use thiserror::Error;

use strand_adjustments::AdjustmentError;
use strand_evm::EvmError;
use strand_fees::FeeError;
use strand_types::IdError;

/// Errors rebuilding a record from its wire form or validating a new one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("pseudorandom output of {len} bytes exceeds {max}")]
    PseudorandomTooLong { len: usize, max: usize },

    #[error("running hash of {len} bytes exceeds {max}")]
    RunningHashTooLong { len: usize, max: usize },

    #[error("{what} has {len} entries, at most {max} allowed")]
    TooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{what} {value} is negative")]
    Negative { what: &'static str, value: i64 },

    #[error("{what} {value} does not fit a signed 64-bit amount")]
    OutOfRange { what: &'static str, value: u64 },

    #[error("no receipt builder to revert")]
    NothingToRevert,

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Evm(#[from] EvmError),

    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),

    #[error(transparent)]
    Fee(#[from] FeeError),
}

/// Accept a count or amount the wire carries unsigned.
pub(crate) fn non_negative(what: &'static str, value: i64) -> Result<i64, RecordError> {
    if value < 0 {
        return Err(RecordError::Negative { what, value });
    }
    Ok(value)
}

/// Read an unsigned wire amount into the signed in-memory form.
pub(crate) fn signed(what: &'static str, value: u64) -> Result<i64, RecordError> {
    i64::try_from(value).map_err(|_| RecordError::OutOfRange { what, value })
}

/// Errors building the class-id table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("class id {class_id:#018x} claimed by both {first} and {second}")]
    DuplicateClassId {
        class_id: u64,
        first: &'static str,
        second: &'static str,
    },
}
