//! Realized custom fee charges.

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
    DEFAULT_MAX_EFFECTIVE_PAYERS,
};
use strand_types::EntityId;
use strand_wire::AssessedCustomFee;

use crate::FeeError;

const RELEASE_WITH_EFFECTIVE_PAYERS: u32 = 2;

/// What one collector actually received because of one transaction.
///
/// Unlike [`FcCustomFee`](crate::FcCustomFee) this is a fact, not a rule.
/// An absent token means the charge was in the native currency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FcAssessedCustomFee {
    account: EntityId,
    token: Option<EntityId>,
    units: i64,
    effective_payers: Vec<EntityId>,
}

impl FcAssessedCustomFee {
    pub fn new(account: EntityId, token: Option<EntityId>, units: i64) -> Self {
        Self {
            account,
            token,
            units,
            effective_payers: Vec::new(),
        }
    }

    /// Record the accounts that ended up paying this charge.
    pub fn with_effective_payers(mut self, payers: Vec<EntityId>) -> Result<Self, FeeError> {
        if payers.len() > DEFAULT_MAX_EFFECTIVE_PAYERS {
            return Err(FeeError::TooManyEffectivePayers {
                len: payers.len(),
                max: DEFAULT_MAX_EFFECTIVE_PAYERS,
            });
        }
        self.effective_payers = payers;
        Ok(self)
    }

    pub fn account(&self) -> EntityId {
        self.account
    }

    pub fn token(&self) -> Option<EntityId> {
        self.token
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn effective_payers(&self) -> &[EntityId] {
        &self.effective_payers
    }

    pub fn is_for_hbar(&self) -> bool {
        self.token.is_none()
    }

    pub fn from_wire(fee: &AssessedCustomFee) -> Result<Self, FeeError> {
        let account = EntityId::from_account_id(fee.fee_collector_account_id.as_ref())?;
        let token = fee.token_id.as_ref().map(EntityId::from);
        let payers = fee
            .effective_payer_account_id
            .iter()
            .map(EntityId::from)
            .collect();
        Self::new(account, token, fee.amount).with_effective_payers(payers)
    }

    pub fn to_wire(&self) -> AssessedCustomFee {
        AssessedCustomFee {
            amount: self.units,
            token_id: self.token.map(|t| t.to_token_id()),
            fee_collector_account_id: Some(self.account.to_account_id()),
            effective_payer_account_id: self
                .effective_payers
                .iter()
                .map(EntityId::to_account_id)
                .collect(),
        }
    }
}

impl Versioned for FcAssessedCustomFee {
    const CLASS_ID: u64 = 0x0ac0_4e96_e8c3_be8b;
    const CURRENT_VERSION: u32 = RELEASE_WITH_EFFECTIVE_PAYERS;
}

impl SelfSerializable for FcAssessedCustomFee {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_serializable(&self.account);
        out.write_nullable_serializable(self.token.as_ref());
        out.write_i64(self.units);
        out.write_serializable_list(Some(self.effective_payers.as_slice()));
    }
}

impl SelfDeserializable for FcAssessedCustomFee {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let account = input.read_serializable()?;
        let token = input.read_nullable_serializable()?;
        let units = input.read_i64()?;
        let effective_payers = if version >= RELEASE_WITH_EFFECTIVE_PAYERS {
            let max = input.limits().max_effective_payers;
            input.read_required_list("effective payers", max)?
        } else {
            Vec::new()
        };
        Ok(Self {
            account,
            token,
            units,
            effective_payers,
        })
    }
}
