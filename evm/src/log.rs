//! One emitted EVM event.

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
    DEFAULT_MAX_LOG_DATA_BYTES,
};
use strand_types::EntityId;
use strand_wire::ContractLoginfo;

use crate::EvmError;

pub const MAX_BLOOM_BYTES: usize = 256;
pub const MAX_TOPICS: usize = 4;
pub const MAX_TOPIC_BYTES: usize = 32;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EvmLog {
    contract_id: Option<EntityId>,
    bloom: Vec<u8>,
    topics: Vec<Vec<u8>>,
    data: Vec<u8>,
}

impl EvmLog {
    pub fn new(
        contract_id: Option<EntityId>,
        bloom: Vec<u8>,
        topics: Vec<Vec<u8>>,
        data: Vec<u8>,
    ) -> Result<Self, EvmError> {
        if bloom.len() > MAX_BLOOM_BYTES {
            return Err(EvmError::BloomTooLong(bloom.len()));
        }
        if topics.len() > MAX_TOPICS {
            return Err(EvmError::TooManyTopics(topics.len()));
        }
        if let Some(topic) = topics.iter().find(|t| t.len() > MAX_TOPIC_BYTES) {
            return Err(EvmError::TopicTooLong(topic.len()));
        }
        if data.len() > DEFAULT_MAX_LOG_DATA_BYTES {
            return Err(EvmError::TooLong {
                what: "log data",
                len: data.len(),
                max: DEFAULT_MAX_LOG_DATA_BYTES,
            });
        }
        Ok(Self {
            contract_id,
            bloom,
            topics,
            data,
        })
    }

    pub fn contract_id(&self) -> Option<EntityId> {
        self.contract_id
    }

    pub fn bloom(&self) -> &[u8] {
        &self.bloom
    }

    pub fn topics(&self) -> &[Vec<u8>] {
        &self.topics
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_wire(&self) -> ContractLoginfo {
        ContractLoginfo {
            contract_id: self.contract_id.map(|id| id.to_contract_id()),
            bloom: self.bloom.clone(),
            topic: self.topics.clone(),
            data: self.data.clone(),
        }
    }

    pub fn from_wire(log: &ContractLoginfo) -> Result<Self, EvmError> {
        Self::new(
            log.contract_id.as_ref().map(EntityId::from),
            log.bloom.clone(),
            log.topic.clone(),
            log.data.clone(),
        )
    }
}

impl Versioned for EvmLog {
    const CLASS_ID: u64 = 0x2af0_5aa9_c7ff_917a;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for EvmLog {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_nullable_serializable(self.contract_id.as_ref());
        out.write_byte_array(&self.bloom);
        out.write_i32(self.topics.len() as i32);
        for topic in &self.topics {
            out.write_byte_array(topic);
        }
        out.write_byte_array(&self.data);
    }
}

impl SelfDeserializable for EvmLog {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        let contract_id = input.read_nullable_serializable()?;
        let bloom = input.read_byte_array("log bloom", MAX_BLOOM_BYTES)?;
        let count = input.read_length("log topics", MAX_TOPICS)?;
        let mut topics = Vec::with_capacity(count);
        for _ in 0..count {
            topics.push(input.read_byte_array("log topic", MAX_TOPIC_BYTES)?);
        }
        let data = input.read_byte_array("log data", input.limits().max_log_data_bytes)?;
        Ok(Self {
            contract_id,
            bloom,
            topics,
            data,
        })
    }
}
