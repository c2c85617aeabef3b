//! Transaction outcomes as versioned state records.
//!
//! [`ExpirableTxnRecord`] is the aggregate the ledger keeps for every handled
//! transaction until it expires; [`RecordHistory`] is the hash-bearing queue
//! that holds them. [`registry`] maps class ids to decoders for every state
//! record type in the workspace.

pub mod builder;
pub mod error;
pub mod exchange;
pub mod hash;
pub mod history;
pub mod receipt;
pub mod record;
pub mod registry;

pub use builder::ExpirableTxnRecordBuilder;
pub use error::{RecordError, RegistryError};
pub use exchange::ExchangeRates;
pub use hash::{blake2b_256, HASH_LEN};
pub use history::{record_hash, RecordHistory};
pub use receipt::{TxnReceipt, MAX_RUNNING_HASH_BYTES};
pub use record::{ExpirableTxnRecord, PrngOutput, MAX_PSEUDORANDOM_BYTES, UNKNOWN_SUBMITTING_MEMBER};
pub use registry::{RecordKind, StateRecord, TypeRegistry};
