//! Royalty fees on unique-asset value exchange.

use strand_codec::{CodecError, DataReader, DataWriter};
use strand_wire::{Fraction, RoyaltyFee};

use crate::fractional::validate_fraction;
use crate::{FeeError, FixedFeeSpec};

/// A fraction of the fungible value exchanged for a unique asset.
///
/// When no fungible value changes hands the fallback fee, if any, is charged
/// to the receiver instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoyaltyFeeSpec {
    numerator: i64,
    denominator: i64,
    fallback_fee: Option<FixedFeeSpec>,
}

impl RoyaltyFeeSpec {
    pub fn new(
        numerator: i64,
        denominator: i64,
        fallback_fee: Option<FixedFeeSpec>,
    ) -> Result<Self, FeeError> {
        validate_fraction(numerator, denominator)?;
        if numerator > denominator {
            return Err(FeeError::RoyaltyFractionExceedsOne {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
            fallback_fee,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn fallback_fee(&self) -> Option<&FixedFeeSpec> {
        self.fallback_fee.as_ref()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback_fee.is_some()
    }

    pub fn from_wire(fee: &RoyaltyFee) -> Result<Self, FeeError> {
        let fraction = fee.exchange_value_fraction.unwrap_or_default();
        let fallback = fee
            .fallback_fee
            .as_ref()
            .map(FixedFeeSpec::from_wire)
            .transpose()?;
        Self::new(fraction.numerator, fraction.denominator, fallback)
    }

    pub fn to_wire(&self) -> RoyaltyFee {
        RoyaltyFee {
            exchange_value_fraction: Some(Fraction {
                numerator: self.numerator,
                denominator: self.denominator,
            }),
            fallback_fee: self.fallback_fee.map(|f| f.to_wire()),
        }
    }

    pub(crate) fn write_payload(&self, out: &mut DataWriter) {
        out.write_i64(self.numerator);
        out.write_i64(self.denominator);
        out.write_bool(self.fallback_fee.is_some());
        if let Some(fallback) = &self.fallback_fee {
            fallback.write_payload(out);
        }
    }

    pub(crate) fn read_payload(input: &mut DataReader<'_>) -> Result<Self, CodecError> {
        let numerator = input.read_i64()?;
        let denominator = input.read_i64()?;
        let fallback = if input.read_bool()? {
            Some(FixedFeeSpec::read_payload(input)?)
        } else {
            None
        };
        Self::new(numerator, denominator, fallback).map_err(CodecError::rejected)
    }
}
