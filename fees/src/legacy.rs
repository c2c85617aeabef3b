//! The two-variant fee rule that predates royalty fees.
//!
//! Kept only so persisted state from before royalties can be imported. It
//! decodes but never encodes, and converts one way into [`FcCustomFee`].

use strand_codec::{CodecError, DataReader, SelfDeserializable, Versioned};
use strand_types::EntityId;
use tracing::debug;

use crate::custom_fee::{FeeSpec, FIXED_CODE, FRACTIONAL_CODE};
use crate::{FcCustomFee, FixedFeeSpec, FractionalFeeSpec};

/// Payloads in this layout match the first release of [`FcCustomFee`].
const FIRST_FEE_RELEASE: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegacyFeeSpec {
    Fixed(FixedFeeSpec),
    Fractional(FractionalFeeSpec),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LegacyCustomFee {
    spec: LegacyFeeSpec,
    fee_collector: EntityId,
}

impl LegacyCustomFee {
    pub fn spec(&self) -> &LegacyFeeSpec {
        &self.spec
    }

    pub fn fee_collector(&self) -> EntityId {
        self.fee_collector
    }
}

impl Versioned for LegacyCustomFee {
    const CLASS_ID: u64 = 0xf65b_aa43_3940_f136;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfDeserializable for LegacyCustomFee {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        let spec = match input.read_u8()? {
            FIXED_CODE => LegacyFeeSpec::Fixed(FixedFeeSpec::read_payload(input)?),
            FRACTIONAL_CODE => LegacyFeeSpec::Fractional(FractionalFeeSpec::read_payload(
                input,
                FIRST_FEE_RELEASE,
            )?),
            other => {
                return Err(CodecError::InvalidDiscriminant {
                    what: "legacy custom fee",
                    value: i64::from(other),
                })
            }
        };
        let fee_collector = input.read_serializable()?;
        Ok(Self {
            spec,
            fee_collector,
        })
    }
}

impl From<LegacyCustomFee> for FcCustomFee {
    fn from(legacy: LegacyCustomFee) -> Self {
        let spec = match legacy.spec {
            LegacyFeeSpec::Fixed(spec) => FeeSpec::Fixed(spec),
            LegacyFeeSpec::Fractional(spec) => FeeSpec::Fractional(spec),
        };
        FcCustomFee::from_parts(spec, legacy.fee_collector)
    }
}

/// Read a persisted list of legacy fees and migrate each into the current model.
pub fn read_migrated_fees(input: &mut DataReader<'_>) -> Result<Vec<FcCustomFee>, CodecError> {
    let max = input.limits().max_custom_fees;
    let legacy: Vec<LegacyCustomFee> = input.read_required_list("legacy custom fees", max)?;
    debug!(count = legacy.len(), "migrating legacy custom fees");
    Ok(legacy.into_iter().map(FcCustomFee::from).collect())
}
