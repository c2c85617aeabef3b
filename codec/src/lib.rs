//! Deterministic binary codec for versioned ledger state records.
//!
//! Every record carries a stable 64-bit class id and a schema version. The
//! bytes a record writes are part of the consensus contract: two nodes must
//! produce identical output from identical values, and every read from
//! untrusted input is bounded by [`DecodeLimits`].

pub mod error;
pub mod io;
pub mod limits;
pub mod versioned;

pub use error::CodecError;
pub use io::{DataReader, DataWriter, ABSENT_LENGTH};
pub use limits::*;
pub use versioned::{check_version, decode, encode, SelfDeserializable, SelfSerializable, Versioned};
