//! Flat fees.

use strand_codec::{CodecError, DataReader, DataWriter};
use strand_types::{EntityId, MISSING_ENTITY_ID};
use strand_wire::FixedFee;

use crate::FeeError;

/// A flat amount, in the native currency when `token_denomination` is `None`.
///
/// A denomination of `0.0.0` is the wildcard for "the token this fee is
/// attached to", resolved once that token's id is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedFeeSpec {
    units_to_collect: i64,
    token_denomination: Option<EntityId>,
}

impl FixedFeeSpec {
    pub fn new(units_to_collect: i64, token_denomination: Option<EntityId>) -> Result<Self, FeeError> {
        if units_to_collect <= 0 {
            return Err(FeeError::MustBePositive(units_to_collect));
        }
        Ok(Self {
            units_to_collect,
            token_denomination,
        })
    }

    pub fn units_to_collect(&self) -> i64 {
        self.units_to_collect
    }

    pub fn token_denomination(&self) -> Option<EntityId> {
        self.token_denomination
    }

    pub fn is_for_hbar(&self) -> bool {
        self.token_denomination.is_none()
    }

    pub fn uses_denom_wildcard(&self) -> bool {
        self.token_denomination == Some(MISSING_ENTITY_ID)
    }

    /// Replace the wildcard denomination with `token`; other specs are returned unchanged.
    pub fn resolve_denom_wildcard(&self, token: EntityId) -> Self {
        if self.uses_denom_wildcard() {
            Self {
                token_denomination: Some(token),
                ..*self
            }
        } else {
            *self
        }
    }

    pub fn from_wire(fee: &FixedFee) -> Result<Self, FeeError> {
        Self::new(
            fee.amount,
            fee.denominating_token_id.as_ref().map(EntityId::from),
        )
    }

    pub fn to_wire(&self) -> FixedFee {
        FixedFee {
            amount: self.units_to_collect,
            denominating_token_id: self.token_denomination.map(|t| t.to_token_id()),
        }
    }

    pub(crate) fn write_payload(&self, out: &mut DataWriter) {
        out.write_i64(self.units_to_collect);
        out.write_nullable_serializable(self.token_denomination.as_ref());
    }

    pub(crate) fn read_payload(input: &mut DataReader<'_>) -> Result<Self, CodecError> {
        let units = input.read_i64()?;
        let denomination = input.read_nullable_serializable()?;
        Self::new(units, denomination).map_err(CodecError::rejected)
    }
}
