//! Transaction identity.

use std::fmt;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_wire::TransactionId;

use crate::{EntityId, IdError, RichInstant};

/// Nonce of a user-submitted (non-child) transaction.
pub const USER_TRANSACTION_NONCE: i32 = 0;

const RELEASE_WITH_SCHEDULED: u32 = 2;
const RELEASE_WITH_NONCE: u32 = 3;

/// Payer, valid start, scheduled flag and child nonce of a transaction.
///
/// A nonce of [`USER_TRANSACTION_NONCE`] identifies the user transaction
/// itself and is held as `None`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TxnId {
    payer: EntityId,
    valid_start: RichInstant,
    scheduled: bool,
    nonce: Option<i32>,
}

impl TxnId {
    pub fn new(payer: EntityId, valid_start: RichInstant) -> Self {
        Self {
            payer,
            valid_start,
            scheduled: false,
            nonce: None,
        }
    }

    pub fn with_scheduled(mut self, scheduled: bool) -> Self {
        self.scheduled = scheduled;
        self
    }

    pub fn with_nonce(mut self, nonce: i32) -> Self {
        self.nonce = (nonce != USER_TRANSACTION_NONCE).then_some(nonce);
        self
    }

    pub fn payer(&self) -> EntityId {
        self.payer
    }

    pub fn valid_start(&self) -> RichInstant {
        self.valid_start
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn nonce(&self) -> Option<i32> {
        self.nonce
    }

    /// The same id without the scheduled flag.
    pub fn unscheduled(&self) -> Self {
        Self {
            scheduled: false,
            ..*self
        }
    }

    pub fn from_wire(id: &TransactionId) -> Result<Self, IdError> {
        let payer = EntityId::from_account_id(id.account_id.as_ref())?;
        let valid_start = RichInstant::from_wire(id.transaction_valid_start.as_ref());
        Ok(Self::new(payer, valid_start)
            .with_scheduled(id.scheduled)
            .with_nonce(id.nonce))
    }

    pub fn to_wire(&self) -> TransactionId {
        TransactionId {
            transaction_valid_start: Some(self.valid_start.to_wire()),
            account_id: Some(self.payer.to_account_id()),
            scheduled: self.scheduled,
            nonce: self.nonce.unwrap_or(USER_TRANSACTION_NONCE),
        }
    }
}

impl Versioned for TxnId {
    const CLASS_ID: u64 = 0x061a_52df_b3a1_8d9b;
    const CURRENT_VERSION: u32 = RELEASE_WITH_NONCE;
}

impl SelfSerializable for TxnId {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_serializable(&self.payer);
        out.write_serializable(&self.valid_start);
        out.write_bool(self.scheduled);
        out.write_bool(self.nonce.is_some());
        if let Some(nonce) = self.nonce {
            out.write_i32(nonce);
        }
    }
}

impl SelfDeserializable for TxnId {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let payer = input.read_serializable()?;
        let valid_start = input.read_serializable()?;
        let mut id = Self::new(payer, valid_start);
        if version >= RELEASE_WITH_SCHEDULED {
            id.scheduled = input.read_bool()?;
        }
        if version >= RELEASE_WITH_NONCE && input.read_bool()? {
            id = id.with_nonce(input.read_i32()?);
        }
        Ok(id)
    }
}

impl fmt::Debug for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxnId")
            .field("payer", &self.payer)
            .field("valid_start", &self.valid_start)
            .field("scheduled", &self.scheduled)
            .field("nonce", &self.nonce)
            .finish()
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.payer, self.valid_start)?;
        if self.scheduled {
            write!(f, "?scheduled")?;
        }
        if let Some(nonce) = self.nonce {
            write!(f, "/{nonce}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_codec::{decode, encode, DecodeLimits};
    use strand_wire::AccountId;

    fn sample() -> TxnId {
        TxnId::new(EntityId::from_num(2), RichInstant::new(1_600_000_000, 123))
            .with_scheduled(true)
            .with_nonce(4)
    }

    #[test]
    fn user_nonce_is_absent() {
        let id = sample().with_nonce(USER_TRANSACTION_NONCE);
        assert_eq!(id.nonce(), None);
        assert_eq!(id.to_wire().nonce, 0);
    }

    #[test]
    fn wire_roundtrip() {
        let id = sample();
        assert_eq!(TxnId::from_wire(&id.to_wire()).unwrap(), id);
    }

    #[test]
    fn wire_without_payer_is_rejected() {
        let wire = TransactionId {
            account_id: None,
            ..Default::default()
        };
        assert_eq!(
            TxnId::from_wire(&wire),
            Err(IdError::ArgumentRequired("account id"))
        );
        let wire = TransactionId {
            account_id: Some(AccountId::default()),
            ..Default::default()
        };
        assert!(TxnId::from_wire(&wire).is_ok());
    }

    #[test]
    fn binary_roundtrip() {
        let limits = DecodeLimits::default();
        let id = sample();
        assert_eq!(decode::<TxnId>(&encode(&id), &limits).unwrap(), id);
        let plain = TxnId::new(EntityId::from_num(3), RichInstant::new(1, 1));
        assert_eq!(decode::<TxnId>(&encode(&plain), &limits).unwrap(), plain);
    }

    #[test]
    fn first_release_has_no_scheduled_flag_or_nonce() {
        let limits = DecodeLimits::default();
        let mut out = DataWriter::new();
        out.write_u64(TxnId::CLASS_ID);
        out.write_i32(1);
        out.write_serializable(&EntityId::from_num(2));
        out.write_serializable(&RichInstant::new(10, 0));
        let bytes = out.into_bytes();

        let id = decode::<TxnId>(&bytes, &limits).unwrap();
        assert!(!id.is_scheduled());
        assert_eq!(id.nonce(), None);
        assert_eq!(id.payer(), EntityId::from_num(2));
    }

    #[test]
    fn unscheduled_clears_only_the_flag() {
        let id = sample().unscheduled();
        assert!(!id.is_scheduled());
        assert_eq!(id.nonce(), Some(4));
    }
}
