//! Outcome of one EVM call or contract creation.

use std::fmt;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
    DEFAULT_MAX_CALL_DATA_BYTES, DEFAULT_MAX_CREATED_CONTRACTS, DEFAULT_MAX_EVM_ERROR_BYTES,
    DEFAULT_MAX_EVM_RESULT_BYTES, DEFAULT_MAX_LOGS,
};
use strand_types::{EntityId, EVM_ADDRESS_LEN};
use strand_wire::ContractFunctionResult;
use tracing::debug;

use crate::log::MAX_BLOOM_BYTES;
use crate::{EvmError, EvmLog};

const RELEASE_WITH_EVM_ADDRESS: u32 = 2;
/// The only release that wrote per-contract storage changes.
const RELEASE_WITH_STORAGE_CHANGES: u32 = 2;
const RELEASE_WITH_CALL_INPUTS: u32 = 3;
const RELEASE_WITH_SENDER: u32 = 4;

const MAX_STORAGE_WORD_BYTES: usize = 32;

/// Everything an EVM execution left behind for the record stream.
///
/// Success is the absence of an error message. Every constructor and setter
/// enforces the default decode bounds, so a built value always reads back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EvmFnResult {
    contract_id: Option<EntityId>,
    result: Vec<u8>,
    error: Option<String>,
    bloom: Vec<u8>,
    gas_used: u64,
    logs: Vec<EvmLog>,
    created_contract_ids: Vec<EntityId>,
    evm_address: Option<[u8; EVM_ADDRESS_LEN]>,
    gas: i64,
    amount: i64,
    function_parameters: Vec<u8>,
    sender_id: Option<EntityId>,
}

impl EvmFnResult {
    pub fn success(
        contract_id: Option<EntityId>,
        result: Vec<u8>,
        gas_used: u64,
    ) -> Result<Self, EvmError> {
        Self {
            contract_id,
            result,
            gas_used,
            ..Self::default()
        }
        .checked()
    }

    pub fn failure(
        contract_id: Option<EntityId>,
        error: impl Into<String>,
        gas_used: u64,
    ) -> Result<Self, EvmError> {
        Self {
            contract_id,
            error: Some(error.into()),
            gas_used,
            ..Self::default()
        }
        .checked()
    }

    pub fn with_bloom(mut self, bloom: Vec<u8>) -> Result<Self, EvmError> {
        self.bloom = bloom;
        self.checked()
    }

    pub fn with_logs(mut self, logs: Vec<EvmLog>) -> Result<Self, EvmError> {
        self.logs = logs;
        self.checked()
    }

    pub fn with_created_contract_ids(mut self, ids: Vec<EntityId>) -> Result<Self, EvmError> {
        self.created_contract_ids = ids;
        self.checked()
    }

    pub fn with_evm_address(mut self, address: [u8; EVM_ADDRESS_LEN]) -> Self {
        self.evm_address = Some(address);
        self
    }

    /// Gas offered, value sent and call data of the originating call.
    pub fn with_call_inputs(
        mut self,
        gas: i64,
        amount: i64,
        function_parameters: Vec<u8>,
    ) -> Result<Self, EvmError> {
        self.gas = gas;
        self.amount = amount;
        self.function_parameters = function_parameters;
        self.checked()
    }

    pub fn with_sender_id(mut self, sender_id: EntityId) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    fn checked(self) -> Result<Self, EvmError> {
        if self.bloom.len() > MAX_BLOOM_BYTES {
            return Err(EvmError::BloomTooLong(self.bloom.len()));
        }
        let error_len = self.error.as_ref().map_or(0, String::len);
        for (what, len, max) in [
            ("evm result", self.result.len(), DEFAULT_MAX_EVM_RESULT_BYTES),
            ("evm error", error_len, DEFAULT_MAX_EVM_ERROR_BYTES),
            ("evm logs", self.logs.len(), DEFAULT_MAX_LOGS),
            ("created contracts", self.created_contract_ids.len(), DEFAULT_MAX_CREATED_CONTRACTS),
            ("function parameters", self.function_parameters.len(), DEFAULT_MAX_CALL_DATA_BYTES),
        ] {
            if len > max {
                return Err(EvmError::TooLong { what, len, max });
            }
        }
        Ok(self)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn contract_id(&self) -> Option<EntityId> {
        self.contract_id
    }

    pub fn result(&self) -> &[u8] {
        &self.result
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn bloom(&self) -> &[u8] {
        &self.bloom
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    pub fn logs(&self) -> &[EvmLog] {
        &self.logs
    }

    pub fn created_contract_ids(&self) -> &[EntityId] {
        &self.created_contract_ids
    }

    pub fn evm_address(&self) -> Option<&[u8; EVM_ADDRESS_LEN]> {
        self.evm_address.as_ref()
    }

    pub fn gas(&self) -> i64 {
        self.gas
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn function_parameters(&self) -> &[u8] {
        &self.function_parameters
    }

    pub fn sender_id(&self) -> Option<EntityId> {
        self.sender_id
    }

    pub fn to_wire(&self) -> ContractFunctionResult {
        ContractFunctionResult {
            contract_id: self.contract_id.map(|id| id.to_contract_id()),
            contract_call_result: self.result.clone(),
            error_message: self.error.clone().unwrap_or_default(),
            bloom: self.bloom.clone(),
            gas_used: self.gas_used,
            log_info: self.logs.iter().map(EvmLog::to_wire).collect(),
            created_contract_ids: self
                .created_contract_ids
                .iter()
                .map(EntityId::to_contract_id)
                .collect(),
            evm_address: self.evm_address.map(|a| a.to_vec()).unwrap_or_default(),
            gas: self.gas,
            amount: self.amount,
            function_parameters: self.function_parameters.clone(),
            sender_id: self.sender_id.map(|id| id.to_account_id()),
        }
    }

    /// Rebuild from the wire form. An empty error message reads as success.
    pub fn from_wire(wire: &ContractFunctionResult) -> Result<Self, EvmError> {
        let evm_address = match wire.evm_address.len() {
            0 => None,
            EVM_ADDRESS_LEN => {
                let mut address = [0u8; EVM_ADDRESS_LEN];
                address.copy_from_slice(&wire.evm_address);
                Some(address)
            }
            other => return Err(EvmError::BadEvmAddress(other)),
        };
        Self {
            contract_id: wire.contract_id.as_ref().map(EntityId::from),
            result: wire.contract_call_result.clone(),
            error: (!wire.error_message.is_empty()).then(|| wire.error_message.clone()),
            bloom: wire.bloom.clone(),
            gas_used: wire.gas_used,
            logs: wire
                .log_info
                .iter()
                .map(EvmLog::from_wire)
                .collect::<Result<_, _>>()?,
            created_contract_ids: wire.created_contract_ids.iter().map(EntityId::from).collect(),
            evm_address,
            gas: wire.gas,
            amount: wire.amount,
            function_parameters: wire.function_parameters.clone(),
            sender_id: wire.sender_id.as_ref().map(EntityId::from),
        }
        .checked()
    }
}

/// Read and drop the storage-change section written by one historical
/// release: per contract an address and its slots, per slot a key, the value
/// read, and an optional value written.
fn skip_storage_changes(input: &mut DataReader<'_>) -> Result<(), CodecError> {
    let limits = input.limits();
    let contracts = input.read_length("storage change contracts", limits.max_storage_change_contracts)?;
    let mut slots_skipped = 0usize;
    for _ in 0..contracts {
        input.read_byte_array("storage change address", EVM_ADDRESS_LEN)?;
        let slots = input.read_length("storage change slots", limits.max_storage_change_slots)?;
        for _ in 0..slots {
            input.read_byte_array("storage slot key", MAX_STORAGE_WORD_BYTES)?;
            input.read_byte_array("storage value read", MAX_STORAGE_WORD_BYTES)?;
            if input.read_bool()? {
                input.read_byte_array("storage value written", MAX_STORAGE_WORD_BYTES)?;
            }
        }
        slots_skipped += slots;
    }
    debug!(contracts, slots = slots_skipped, "skipped historical storage changes");
    Ok(())
}

impl Versioned for EvmFnResult {
    const CLASS_ID: u64 = 0x2055_c5c0_3ff8_4eb4;
    const CURRENT_VERSION: u32 = RELEASE_WITH_SENDER;
}

impl SelfSerializable for EvmFnResult {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_nullable_serializable(self.contract_id.as_ref());
        out.write_byte_array(&self.result);
        out.write_nullable_string(self.error.as_deref());
        out.write_byte_array(&self.bloom);
        out.write_u64(self.gas_used);
        out.write_serializable_list(Some(self.logs.as_slice()));
        out.write_serializable_list(Some(self.created_contract_ids.as_slice()));
        out.write_byte_array(self.evm_address.as_ref().map_or(&[][..], |a| &a[..]));
        out.write_i64(self.gas);
        out.write_i64(self.amount);
        out.write_byte_array(&self.function_parameters);
        out.write_nullable_serializable(self.sender_id.as_ref());
    }
}

impl SelfDeserializable for EvmFnResult {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let limits = input.limits();
        let mut value = Self {
            contract_id: input.read_nullable_serializable()?,
            result: input.read_byte_array("evm result", limits.max_evm_result_bytes)?,
            error: input.read_nullable_string("evm error", limits.max_evm_error_bytes)?,
            bloom: input.read_byte_array("evm bloom", MAX_BLOOM_BYTES)?,
            gas_used: input.read_u64()?,
            logs: input
                .read_serializable_list("evm logs", limits.max_logs)?
                .unwrap_or_default(),
            created_contract_ids: input
                .read_serializable_list("created contracts", limits.max_created_contracts)?
                .unwrap_or_default(),
            ..Self::default()
        };

        if version >= RELEASE_WITH_EVM_ADDRESS {
            let address = input.read_byte_array("evm address", EVM_ADDRESS_LEN)?;
            value.evm_address = match address.len() {
                0 => None,
                EVM_ADDRESS_LEN => {
                    let mut fixed = [0u8; EVM_ADDRESS_LEN];
                    fixed.copy_from_slice(&address);
                    Some(fixed)
                }
                other => return Err(CodecError::rejected(EvmError::BadEvmAddress(other))),
            };
        }
        if version == RELEASE_WITH_STORAGE_CHANGES {
            skip_storage_changes(input)?;
        }
        if version >= RELEASE_WITH_CALL_INPUTS {
            value.gas = input.read_i64()?;
            value.amount = input.read_i64()?;
            value.function_parameters =
                input.read_byte_array("function parameters", limits.max_call_data_bytes)?;
        }
        if version >= RELEASE_WITH_SENDER {
            value.sender_id = input.read_nullable_serializable()?;
        }
        Ok(value)
    }
}

impl fmt::Display for EvmFnResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EvmFnResult{{")?;
        if let Some(id) = self.contract_id {
            write!(f, "contract={id}, ")?;
        }
        match &self.error {
            Some(error) => write!(f, "error={error:?}, ")?,
            None => write!(f, "result=0x{}, ", hex::encode(&self.result))?,
        }
        write!(f, "gas_used={}, logs={}", self.gas_used, self.logs.len())?;
        if let Some(address) = &self.evm_address {
            write!(f, ", evm_address=0x{}", hex::encode(address))?;
        }
        if let Some(sender) = self.sender_id {
            write!(f, ", sender={sender}")?;
        }
        write!(f, "}}")
    }
}
