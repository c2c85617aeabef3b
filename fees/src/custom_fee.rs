//! Configured custom fee rules.

use std::fmt;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_types::EntityId;
use strand_wire::{custom_fee, CustomFee};

use crate::{FeeError, FixedFeeSpec, FractionalFeeSpec, RoyaltyFeeSpec};

/// Discriminant bytes written ahead of each fee payload.
pub const FIXED_CODE: u8 = 1;
pub const FRACTIONAL_CODE: u8 = 2;
pub const ROYALTY_CODE: u8 = 3;

const RELEASE_WITH_ROYALTY: u32 = 2;
const RELEASE_WITH_EXEMPT_COLLECTORS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeeType {
    Fixed,
    Fractional,
    Royalty,
}

impl FeeType {
    pub fn code(self) -> u8 {
        match self {
            Self::Fixed => FIXED_CODE,
            Self::Fractional => FRACTIONAL_CODE,
            Self::Royalty => ROYALTY_CODE,
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Fractional => write!(f, "fractional"),
            Self::Royalty => write!(f, "royalty"),
        }
    }
}

/// Exactly one populated fee computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeeSpec {
    Fixed(FixedFeeSpec),
    Fractional(FractionalFeeSpec),
    Royalty(RoyaltyFeeSpec),
}

impl FeeSpec {
    pub fn fee_type(&self) -> FeeType {
        match self {
            Self::Fixed(_) => FeeType::Fixed,
            Self::Fractional(_) => FeeType::Fractional,
            Self::Royalty(_) => FeeType::Royalty,
        }
    }
}

impl From<FixedFeeSpec> for FeeSpec {
    fn from(spec: FixedFeeSpec) -> Self {
        Self::Fixed(spec)
    }
}

impl From<FractionalFeeSpec> for FeeSpec {
    fn from(spec: FractionalFeeSpec) -> Self {
        Self::Fractional(spec)
    }
}

impl From<RoyaltyFeeSpec> for FeeSpec {
    fn from(spec: RoyaltyFeeSpec) -> Self {
        Self::Royalty(spec)
    }
}

/// A fee rule attached to a token: one fee spec plus the account collecting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FcCustomFee {
    spec: FeeSpec,
    fee_collector: EntityId,
    all_collectors_are_exempt: bool,
}

impl FcCustomFee {
    /// Attach `spec` to `fee_collector`; a fee without a collector is never built.
    pub fn new(spec: impl Into<FeeSpec>, fee_collector: Option<EntityId>) -> Result<Self, FeeError> {
        let fee_collector = fee_collector.ok_or(FeeError::MissingCollector)?;
        Ok(Self {
            spec: spec.into(),
            fee_collector,
            all_collectors_are_exempt: false,
        })
    }

    pub(crate) fn from_parts(spec: FeeSpec, fee_collector: EntityId) -> Self {
        Self {
            spec,
            fee_collector,
            all_collectors_are_exempt: false,
        }
    }

    /// Exempt every fee collector of the token from this fee.
    pub fn with_all_collectors_exempt(mut self, exempt: bool) -> Self {
        self.all_collectors_are_exempt = exempt;
        self
    }

    pub fn spec(&self) -> &FeeSpec {
        &self.spec
    }

    pub fn fee_type(&self) -> FeeType {
        self.spec.fee_type()
    }

    pub fn fee_collector(&self) -> EntityId {
        self.fee_collector
    }

    pub fn all_collectors_are_exempt(&self) -> bool {
        self.all_collectors_are_exempt
    }

    pub fn fixed_fee_spec(&self) -> Option<&FixedFeeSpec> {
        match &self.spec {
            FeeSpec::Fixed(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn fractional_fee_spec(&self) -> Option<&FractionalFeeSpec> {
        match &self.spec {
            FeeSpec::Fractional(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn royalty_fee_spec(&self) -> Option<&RoyaltyFeeSpec> {
        match &self.spec {
            FeeSpec::Royalty(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn from_wire(fee: &CustomFee) -> Result<Self, FeeError> {
        let collector = fee
            .fee_collector_account_id
            .as_ref()
            .map(EntityId::from)
            .ok_or(FeeError::MissingCollector)?;
        let spec: FeeSpec = match &fee.fee {
            Some(custom_fee::Fee::FixedFee(f)) => FixedFeeSpec::from_wire(f)?.into(),
            Some(custom_fee::Fee::FractionalFee(f)) => FractionalFeeSpec::from_wire(f)?.into(),
            Some(custom_fee::Fee::RoyaltyFee(f)) => RoyaltyFeeSpec::from_wire(f)?.into(),
            None => return Err(FeeError::NotFullySpecified),
        };
        Ok(Self::new(spec, Some(collector))?.with_all_collectors_exempt(fee.all_collectors_are_exempt))
    }

    pub fn to_wire(&self) -> CustomFee {
        let fee = match &self.spec {
            FeeSpec::Fixed(spec) => custom_fee::Fee::FixedFee(spec.to_wire()),
            FeeSpec::Fractional(spec) => custom_fee::Fee::FractionalFee(spec.to_wire()),
            FeeSpec::Royalty(spec) => custom_fee::Fee::RoyaltyFee(spec.to_wire()),
        };
        CustomFee {
            fee: Some(fee),
            fee_collector_account_id: Some(self.fee_collector.to_account_id()),
            all_collectors_are_exempt: self.all_collectors_are_exempt,
        }
    }
}

impl Versioned for FcCustomFee {
    const CLASS_ID: u64 = 0xf65b_aa43_3940_f137;
    const CURRENT_VERSION: u32 = RELEASE_WITH_EXEMPT_COLLECTORS;
}

impl SelfSerializable for FcCustomFee {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_u8(self.fee_type().code());
        match &self.spec {
            FeeSpec::Fixed(spec) => spec.write_payload(out),
            FeeSpec::Fractional(spec) => spec.write_payload(out),
            FeeSpec::Royalty(spec) => spec.write_payload(out),
        }
        out.write_serializable(&self.fee_collector);
        out.write_bool(self.all_collectors_are_exempt);
    }
}

impl SelfDeserializable for FcCustomFee {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let code = input.read_u8()?;
        let spec: FeeSpec = match code {
            FIXED_CODE => FixedFeeSpec::read_payload(input)?.into(),
            FRACTIONAL_CODE => FractionalFeeSpec::read_payload(input, version)?.into(),
            ROYALTY_CODE if version >= RELEASE_WITH_ROYALTY => {
                RoyaltyFeeSpec::read_payload(input)?.into()
            }
            other => {
                return Err(CodecError::InvalidDiscriminant {
                    what: "custom fee",
                    value: i64::from(other),
                })
            }
        };
        let collector = input.read_serializable()?;
        let exempt = if version >= RELEASE_WITH_EXEMPT_COLLECTORS {
            input.read_bool()?
        } else {
            false
        };
        Ok(Self {
            spec,
            fee_collector: collector,
            all_collectors_are_exempt: exempt,
        })
    }
}
