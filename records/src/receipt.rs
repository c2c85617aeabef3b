//! Transaction status and the entities a transaction created.

use std::fmt;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
    DEFAULT_MAX_SERIAL_NUMBERS,
};
use strand_types::{EntityId, TxnId};
use strand_wire::{ResponseCode, TransactionReceipt};

use crate::error::{non_negative, signed};
use crate::{ExchangeRates, RecordError};

/// Longest topic running hash a receipt can carry.
pub const MAX_RUNNING_HASH_BYTES: usize = 48;

fn bounded_serials(serials: &[i64]) -> Result<(), RecordError> {
    if serials.len() > DEFAULT_MAX_SERIAL_NUMBERS {
        return Err(RecordError::TooLong {
            what: "receipt serial numbers",
            len: serials.len(),
            max: DEFAULT_MAX_SERIAL_NUMBERS,
        });
    }
    Ok(())
}

/// Outcome of one transaction.
///
/// Topic counters and the new total supply are never negative, since the
/// wire carries them unsigned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TxnReceipt {
    status: i32,
    exchange_rates: Option<ExchangeRates>,
    account_id: Option<EntityId>,
    file_id: Option<EntityId>,
    contract_id: Option<EntityId>,
    topic_id: Option<EntityId>,
    token_id: Option<EntityId>,
    schedule_id: Option<EntityId>,
    scheduled_txn_id: Option<TxnId>,
    topic_sequence_number: i64,
    topic_running_hash: Option<Vec<u8>>,
    topic_running_hash_version: i64,
    new_total_supply: i64,
    serial_numbers: Option<Vec<i64>>,
}

impl Default for TxnReceipt {
    fn default() -> Self {
        Self::new(ResponseCode::Unknown)
    }
}

impl TxnReceipt {
    pub fn new(status: ResponseCode) -> Self {
        Self {
            status: status as i32,
            exchange_rates: None,
            account_id: None,
            file_id: None,
            contract_id: None,
            topic_id: None,
            token_id: None,
            schedule_id: None,
            scheduled_txn_id: None,
            topic_sequence_number: 0,
            topic_running_hash: None,
            topic_running_hash_version: 0,
            new_total_supply: 0,
            serial_numbers: None,
        }
    }

    pub fn with_status(mut self, status: ResponseCode) -> Self {
        self.status = status as i32;
        self
    }

    pub fn with_exchange_rates(mut self, rates: ExchangeRates) -> Self {
        self.exchange_rates = Some(rates);
        self
    }

    pub fn with_account_id(mut self, id: EntityId) -> Self {
        self.account_id = Some(id);
        self
    }

    pub fn with_file_id(mut self, id: EntityId) -> Self {
        self.file_id = Some(id);
        self
    }

    pub fn with_contract_id(mut self, id: EntityId) -> Self {
        self.contract_id = Some(id);
        self
    }

    pub fn with_topic_id(mut self, id: EntityId) -> Self {
        self.topic_id = Some(id);
        self
    }

    pub fn with_token_id(mut self, id: EntityId) -> Self {
        self.token_id = Some(id);
        self
    }

    pub fn with_schedule_id(mut self, id: EntityId) -> Self {
        self.schedule_id = Some(id);
        self
    }

    pub fn with_scheduled_txn_id(mut self, id: TxnId) -> Self {
        self.scheduled_txn_id = Some(id);
        self
    }

    pub fn with_topic_running_hash(
        mut self,
        sequence_number: i64,
        running_hash: Vec<u8>,
        running_hash_version: i64,
    ) -> Result<Self, RecordError> {
        if running_hash.len() > MAX_RUNNING_HASH_BYTES {
            return Err(RecordError::RunningHashTooLong {
                len: running_hash.len(),
                max: MAX_RUNNING_HASH_BYTES,
            });
        }
        self.topic_sequence_number = non_negative("topic sequence number", sequence_number)?;
        self.topic_running_hash_version =
            non_negative("topic running hash version", running_hash_version)?;
        self.topic_running_hash = Some(running_hash);
        Ok(self)
    }

    pub fn with_new_total_supply(mut self, supply: i64) -> Result<Self, RecordError> {
        self.new_total_supply = non_negative("new total supply", supply)?;
        Ok(self)
    }

    pub fn with_serial_numbers(mut self, serials: Vec<i64>) -> Result<Self, RecordError> {
        bounded_serials(&serials)?;
        self.serial_numbers = Some(serials);
        Ok(self)
    }

    /// Raw status code, which may be one this build has no name for.
    pub fn status_code(&self) -> i32 {
        self.status
    }

    /// Status as a known code; unrecognized codes read as `Unknown`.
    pub fn status(&self) -> ResponseCode {
        ResponseCode::try_from(self.status).unwrap_or(ResponseCode::Unknown)
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseCode::Success as i32
    }

    pub fn exchange_rates(&self) -> Option<&ExchangeRates> {
        self.exchange_rates.as_ref()
    }

    pub fn account_id(&self) -> Option<EntityId> {
        self.account_id
    }

    pub fn file_id(&self) -> Option<EntityId> {
        self.file_id
    }

    pub fn contract_id(&self) -> Option<EntityId> {
        self.contract_id
    }

    pub fn topic_id(&self) -> Option<EntityId> {
        self.topic_id
    }

    pub fn token_id(&self) -> Option<EntityId> {
        self.token_id
    }

    pub fn schedule_id(&self) -> Option<EntityId> {
        self.schedule_id
    }

    pub fn scheduled_txn_id(&self) -> Option<&TxnId> {
        self.scheduled_txn_id.as_ref()
    }

    pub fn topic_sequence_number(&self) -> i64 {
        self.topic_sequence_number
    }

    pub fn topic_running_hash(&self) -> Option<&[u8]> {
        self.topic_running_hash.as_deref()
    }

    pub fn topic_running_hash_version(&self) -> i64 {
        self.topic_running_hash_version
    }

    pub fn new_total_supply(&self) -> i64 {
        self.new_total_supply
    }

    pub fn serial_numbers(&self) -> Option<&[i64]> {
        self.serial_numbers.as_deref()
    }

    /// This receipt with status `REVERTED_SUCCESS` and every created-entity
    /// section cleared. Exchange rates are kept.
    pub fn reverted(&self) -> Self {
        Self {
            exchange_rates: self.exchange_rates,
            ..Self::new(ResponseCode::RevertedSuccess)
        }
    }

    pub fn to_wire(&self) -> TransactionReceipt {
        TransactionReceipt {
            status: self.status,
            account_id: self.account_id.map(|id| id.to_account_id()),
            file_id: self.file_id.map(|id| id.to_file_id()),
            contract_id: self.contract_id.map(|id| id.to_contract_id()),
            exchange_rate: self.exchange_rates.map(|r| r.to_wire()),
            topic_id: self.topic_id.map(|id| id.to_topic_id()),
            topic_sequence_number: self.topic_sequence_number.unsigned_abs(),
            topic_running_hash: self.topic_running_hash.clone().unwrap_or_default(),
            topic_running_hash_version: self.topic_running_hash_version.unsigned_abs(),
            token_id: self.token_id.map(|id| id.to_token_id()),
            new_total_supply: self.new_total_supply.unsigned_abs(),
            schedule_id: self.schedule_id.map(|id| id.to_schedule_id()),
            scheduled_transaction_id: self.scheduled_txn_id.map(|id| id.to_wire()),
            serial_numbers: self.serial_numbers.clone().unwrap_or_default(),
        }
    }

    /// Rebuild from the wire form. Empty hash and serial sections read as absent.
    pub fn from_wire(wire: &TransactionReceipt) -> Result<Self, RecordError> {
        if wire.topic_running_hash.len() > MAX_RUNNING_HASH_BYTES {
            return Err(RecordError::RunningHashTooLong {
                len: wire.topic_running_hash.len(),
                max: MAX_RUNNING_HASH_BYTES,
            });
        }
        bounded_serials(&wire.serial_numbers)?;
        Ok(Self {
            status: wire.status,
            exchange_rates: wire.exchange_rate.as_ref().map(ExchangeRates::from_wire),
            account_id: wire.account_id.as_ref().map(EntityId::from),
            file_id: wire.file_id.as_ref().map(EntityId::from),
            contract_id: wire.contract_id.as_ref().map(EntityId::from),
            topic_id: wire.topic_id.as_ref().map(EntityId::from),
            token_id: wire.token_id.as_ref().map(EntityId::from),
            schedule_id: wire.schedule_id.as_ref().map(EntityId::from),
            scheduled_txn_id: wire
                .scheduled_transaction_id
                .as_ref()
                .map(TxnId::from_wire)
                .transpose()?,
            topic_sequence_number: signed("topic sequence number", wire.topic_sequence_number)?,
            topic_running_hash: (!wire.topic_running_hash.is_empty())
                .then(|| wire.topic_running_hash.clone()),
            topic_running_hash_version: signed(
                "topic running hash version",
                wire.topic_running_hash_version,
            )?,
            new_total_supply: signed("new total supply", wire.new_total_supply)?,
            serial_numbers: (!wire.serial_numbers.is_empty()).then(|| wire.serial_numbers.clone()),
        })
    }
}

impl Versioned for TxnReceipt {
    const CLASS_ID: u64 = 0x65ef_569a_77dc_f125;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for TxnReceipt {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_i32(self.status);
        out.write_nullable_serializable(self.exchange_rates.as_ref());
        for id in [
            &self.account_id,
            &self.file_id,
            &self.contract_id,
            &self.topic_id,
            &self.token_id,
            &self.schedule_id,
        ] {
            out.write_nullable_serializable(id.as_ref());
        }
        out.write_nullable_serializable(self.scheduled_txn_id.as_ref());
        out.write_i64(self.topic_sequence_number);
        out.write_bool(self.topic_running_hash.is_some());
        if let Some(hash) = &self.topic_running_hash {
            out.write_byte_array(hash);
        }
        out.write_i64(self.topic_running_hash_version);
        out.write_i64(self.new_total_supply);
        out.write_bool(self.serial_numbers.is_some());
        if let Some(serials) = &self.serial_numbers {
            out.write_i64_array(serials);
        }
    }
}

impl SelfDeserializable for TxnReceipt {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        let max_serials = input.limits().max_serial_numbers;
        let receipt = Self {
            status: input.read_i32()?,
            exchange_rates: input.read_nullable_serializable()?,
            account_id: input.read_nullable_serializable()?,
            file_id: input.read_nullable_serializable()?,
            contract_id: input.read_nullable_serializable()?,
            topic_id: input.read_nullable_serializable()?,
            token_id: input.read_nullable_serializable()?,
            schedule_id: input.read_nullable_serializable()?,
            scheduled_txn_id: input.read_nullable_serializable()?,
            topic_sequence_number: input.read_i64()?,
            topic_running_hash: if input.read_bool()? {
                Some(input.read_byte_array("topic running hash", MAX_RUNNING_HASH_BYTES)?)
            } else {
                None
            },
            topic_running_hash_version: input.read_i64()?,
            new_total_supply: input.read_i64()?,
            serial_numbers: if input.read_bool()? {
                Some(input.read_i64_array("receipt serial numbers", max_serials)?)
            } else {
                None
            },
        };
        for (what, value) in [
            ("topic sequence number", receipt.topic_sequence_number),
            ("topic running hash version", receipt.topic_running_hash_version),
            ("new total supply", receipt.new_total_supply),
        ] {
            non_negative(what, value).map_err(CodecError::rejected)?;
        }
        Ok(receipt)
    }
}

impl fmt::Display for TxnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxnReceipt{{status={:?}", self.status())?;
        let created = [
            ("account", self.account_id),
            ("file", self.file_id),
            ("contract", self.contract_id),
            ("topic", self.topic_id),
            ("token", self.token_id),
            ("schedule", self.schedule_id),
        ];
        for (what, id) in created {
            if let Some(id) = id {
                write!(f, ", {what}={id}")?;
            }
        }
        if let Some(hash) = &self.topic_running_hash {
            write!(
                f,
                ", topic_seq={}, running_hash=0x{}",
                self.topic_sequence_number,
                hex::encode(hash)
            )?;
        }
        write!(f, "}}")
    }
}
