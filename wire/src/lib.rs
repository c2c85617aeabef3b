//! External request/response representation of ledger state records.
//!
//! These are the messages state records project to when answering queries
//! and are rebuilt from when accepting externally supplied values. Absent
//! sections are left unset so they cost nothing in the encoded payload.

pub mod basic;
pub mod contract;
pub mod fees;
pub mod record;

pub use basic::{
    AccountAmount, AccountId, ContractId, FileId, NftTransfer, ScheduleId, Timestamp,
    TimestampSeconds, TokenAssociation, TokenId, TokenTransferList, TopicId, TransactionId,
    TransferList,
};
pub use contract::{ContractFunctionResult, ContractLoginfo};
pub use fees::{custom_fee, AssessedCustomFee, CustomFee, FixedFee, Fraction, FractionalFee, RoyaltyFee};
pub use prost::Message;
pub use record::{
    transaction_record, ExchangeRate, ExchangeRateSet, ResponseCode, TransactionReceipt,
    TransactionRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_sections_cost_nothing() {
        assert_eq!(TransactionRecord::default().encoded_len(), 0);
        let with_ref = TransactionRecord {
            schedule_ref: Some(ScheduleId::default()),
            ..Default::default()
        };
        assert!(with_ref.encoded_len() > 0);
    }

    #[test]
    fn record_survives_protobuf_roundtrip() {
        let record = TransactionRecord {
            memo: "memo".to_string(),
            transaction_fee: 100,
            entropy: Some(transaction_record::Entropy::PrngNumber(7)),
            ..Default::default()
        };
        let bytes = record.encode_to_vec();
        assert_eq!(TransactionRecord::decode(bytes.as_slice()).unwrap(), record);
    }
}
