//! Shard/realm/number address of any ledger entity.
//!
//! No flavor tag is stored: the same triple can be projected as an account,
//! token, topic, file, schedule, or contract id depending on what the caller
//! knows about the context.

use std::fmt;
use std::str::FromStr;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_wire::{AccountId, ContractId, FileId, ScheduleId, TokenId, TopicId};

use crate::IdError;

/// The reserved all-zero id meaning "missing".
pub const MISSING_ENTITY_ID: EntityId = EntityId::new(0, 0, 0);

/// Length of the EVM-style address form of an id.
pub const EVM_ADDRESS_LEN: usize = 20;

/// Address of a ledger entity. Ordering is lexicographic over (shard, realm, num).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    shard: i64,
    realm: i64,
    num: i64,
}

impl EntityId {
    pub const MISSING: Self = MISSING_ENTITY_ID;

    pub const fn new(shard: i64, realm: i64, num: i64) -> Self {
        Self { shard, realm, num }
    }

    /// An id in shard 0, realm 0.
    pub const fn from_num(num: i64) -> Self {
        Self::new(0, 0, num)
    }

    pub fn shard(&self) -> i64 {
        self.shard
    }

    pub fn realm(&self) -> i64 {
        self.realm
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn is_missing(&self) -> bool {
        *self == MISSING_ENTITY_ID
    }

    /// The 20-byte EVM address form: shard (4) ‖ realm (8) ‖ num (8), big-endian.
    ///
    /// Fails when the shard does not fit the four-byte slot.
    pub fn to_evm_address(&self) -> Result<[u8; EVM_ADDRESS_LEN], IdError> {
        let shard = i32::try_from(self.shard).map_err(|_| IdError::ShardOutOfRange(self.shard))?;
        let mut out = [0u8; EVM_ADDRESS_LEN];
        out[..4].copy_from_slice(&shard.to_be_bytes());
        out[4..12].copy_from_slice(&self.realm.to_be_bytes());
        out[12..].copy_from_slice(&self.num.to_be_bytes());
        Ok(out)
    }

    pub fn from_evm_address(address: &[u8; EVM_ADDRESS_LEN]) -> Self {
        let mut shard = [0u8; 4];
        let mut realm = [0u8; 8];
        let mut num = [0u8; 8];
        shard.copy_from_slice(&address[..4]);
        realm.copy_from_slice(&address[4..12]);
        num.copy_from_slice(&address[12..]);
        Self::new(
            i64::from(i32::from_be_bytes(shard)),
            i64::from_be_bytes(realm),
            i64::from_be_bytes(num),
        )
    }
}

/// Generates the conversions between `EntityId` and one wire id flavor.
macro_rules! wire_flavor {
    ($flavor:ident, $num_field:ident, $from_fn:ident, $to_fn:ident, $what:literal) => {
        impl From<&$flavor> for EntityId {
            fn from(id: &$flavor) -> Self {
                Self::new(id.shard_num, id.realm_num, id.$num_field)
            }
        }

        impl EntityId {
            #[doc = concat!("Convert from a possibly absent wire ", $what, " id.")]
            pub fn $from_fn(id: Option<&$flavor>) -> Result<Self, IdError> {
                id.map(Self::from)
                    .ok_or(IdError::ArgumentRequired(concat!($what, " id")))
            }

            pub fn $to_fn(&self) -> $flavor {
                $flavor {
                    shard_num: self.shard,
                    realm_num: self.realm,
                    $num_field: self.num,
                }
            }
        }
    };
}

wire_flavor!(AccountId, account_num, from_account_id, to_account_id, "account");
wire_flavor!(TokenId, token_num, from_token_id, to_token_id, "token");
wire_flavor!(TopicId, topic_num, from_topic_id, to_topic_id, "topic");
wire_flavor!(FileId, file_num, from_file_id, to_file_id, "file");
wire_flavor!(ScheduleId, schedule_num, from_schedule_id, to_schedule_id, "schedule");
wire_flavor!(ContractId, contract_num, from_contract_id, to_contract_id, "contract");

impl Versioned for EntityId {
    const CLASS_ID: u64 = 0xf35b_a643_324e_fa37;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for EntityId {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_i64(self.shard);
        out.write_i64(self.realm);
        out.write_i64(self.num);
    }
}

impl SelfDeserializable for EntityId {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        Ok(Self::new(input.read_i64()?, input.read_i64()?, input.read_i64()?))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({self})")
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [shard, realm, num] = parts.as_slice() else {
            return Err(IdError::Malformed(s.to_string()));
        };
        let parse = |part: &str| {
            part.parse::<i64>()
                .map_err(|_| IdError::Malformed(s.to_string()))
        };
        Ok(Self::new(parse(shard)?, parse(realm)?, parse(num)?))
    }
}
