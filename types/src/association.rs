//! Automatic token associations reported on a record.

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_wire::TokenAssociation;

use crate::{EntityId, IdError};

/// A token that was associated to an account as a side effect of a transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FcTokenAssociation {
    token: EntityId,
    account: EntityId,
}

impl FcTokenAssociation {
    pub fn new(token: EntityId, account: EntityId) -> Self {
        Self { token, account }
    }

    pub fn token(&self) -> EntityId {
        self.token
    }

    pub fn account(&self) -> EntityId {
        self.account
    }

    pub fn from_wire(association: &TokenAssociation) -> Result<Self, IdError> {
        Ok(Self::new(
            EntityId::from_token_id(association.token_id.as_ref())?,
            EntityId::from_account_id(association.account_id.as_ref())?,
        ))
    }

    pub fn to_wire(&self) -> TokenAssociation {
        TokenAssociation {
            token_id: Some(self.token.to_token_id()),
            account_id: Some(self.account.to_account_id()),
        }
    }
}

impl Versioned for FcTokenAssociation {
    const CLASS_ID: u64 = 0x41a2_5691_30b0_1d2f;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for FcTokenAssociation {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_serializable(&self.token);
        out.write_serializable(&self.account);
    }
}

impl SelfDeserializable for FcTokenAssociation {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        Ok(Self::new(input.read_serializable()?, input.read_serializable()?))
    }
}
