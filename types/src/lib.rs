//! Fundamental identifier types for ledger state records.
//!
//! Entity ids, consensus instants, transaction ids and token associations,
//! each with its binary record form and its wire projection.

pub mod association;
pub mod entity_id;
pub mod error;
pub mod instant;
pub mod legacy;
pub mod txn_id;

pub use association::FcTokenAssociation;
pub use entity_id::{EntityId, EVM_ADDRESS_LEN, MISSING_ENTITY_ID};
pub use error::IdError;
pub use instant::RichInstant;
pub use txn_id::{TxnId, USER_TRANSACTION_NONCE};
