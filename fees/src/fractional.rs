//! Proportional fees.

use strand_codec::{CodecError, DataReader, DataWriter};
use strand_wire::{Fraction, FractionalFee};

use crate::FeeError;

/// Version of [`FcCustomFee`](crate::FcCustomFee) that added `net_of_transfers`.
pub(crate) const RELEASE_WITH_NET_OF_TRANSFERS: u32 = 2;

/// Internal representation of an unbounded maximum.
pub const UNBOUNDED_MAXIMUM: i64 = i64::MAX;

/// Wire representation of an unbounded maximum.
const WIRE_UNBOUNDED_MAXIMUM: i64 = 0;

pub(crate) fn validate_fraction(numerator: i64, denominator: i64) -> Result<(), FeeError> {
    if denominator == 0 {
        return Err(FeeError::DivisionByZero);
    }
    non_negative("numerator", numerator)?;
    non_negative("denominator", denominator)
}

fn non_negative(field: &'static str, value: i64) -> Result<(), FeeError> {
    if value < 0 {
        return Err(FeeError::NegativeValue { field, value });
    }
    Ok(())
}

/// A fraction of each transferred amount, clamped to `[minimum, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FractionalFeeSpec {
    numerator: i64,
    denominator: i64,
    minimum_amount: i64,
    maximum_amount: i64,
    net_of_transfers: bool,
}

impl FractionalFeeSpec {
    pub fn new(
        numerator: i64,
        denominator: i64,
        minimum_amount: i64,
        maximum_amount: i64,
        net_of_transfers: bool,
    ) -> Result<Self, FeeError> {
        validate_fraction(numerator, denominator)?;
        non_negative("minimum amount", minimum_amount)?;
        non_negative("maximum amount", maximum_amount)?;
        if maximum_amount < minimum_amount {
            return Err(FeeError::MaximumBelowMinimum {
                min: minimum_amount,
                max: maximum_amount,
            });
        }
        Ok(Self {
            numerator,
            denominator,
            minimum_amount,
            maximum_amount,
            net_of_transfers,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn minimum_amount(&self) -> i64 {
        self.minimum_amount
    }

    pub fn maximum_amount(&self) -> i64 {
        self.maximum_amount
    }

    pub fn is_unbounded(&self) -> bool {
        self.maximum_amount == UNBOUNDED_MAXIMUM
    }

    /// Whether the fee is charged on top of the transfer rather than deducted from it.
    pub fn is_net_of_transfers(&self) -> bool {
        self.net_of_transfers
    }

    /// Build from the wire form, where a maximum of zero means unbounded.
    pub fn from_wire(fee: &FractionalFee) -> Result<Self, FeeError> {
        let fraction = fee.fractional_amount.unwrap_or_default();
        let maximum = match fee.maximum_amount {
            WIRE_UNBOUNDED_MAXIMUM => UNBOUNDED_MAXIMUM,
            max => max,
        };
        Self::new(
            fraction.numerator,
            fraction.denominator,
            fee.minimum_amount,
            maximum,
            fee.net_of_transfers,
        )
    }

    pub fn to_wire(&self) -> FractionalFee {
        let maximum_amount = match self.maximum_amount {
            UNBOUNDED_MAXIMUM => WIRE_UNBOUNDED_MAXIMUM,
            max => max,
        };
        FractionalFee {
            fractional_amount: Some(Fraction {
                numerator: self.numerator,
                denominator: self.denominator,
            }),
            minimum_amount: self.minimum_amount,
            maximum_amount,
            net_of_transfers: self.net_of_transfers,
        }
    }

    pub(crate) fn write_payload(&self, out: &mut DataWriter) {
        out.write_i64(self.numerator);
        out.write_i64(self.denominator);
        out.write_i64(self.minimum_amount);
        out.write_i64(self.maximum_amount);
        out.write_bool(self.net_of_transfers);
    }

    pub(crate) fn read_payload(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let numerator = input.read_i64()?;
        let denominator = input.read_i64()?;
        let minimum = input.read_i64()?;
        let maximum = input.read_i64()?;
        let net_of_transfers = if version >= RELEASE_WITH_NET_OF_TRANSFERS {
            input.read_bool()?
        } else {
            false
        };
        Self::new(numerator, denominator, minimum, maximum, net_of_transfers)
            .map_err(CodecError::rejected)
    }
}
