//! Receipts and transaction records.

use crate::basic::{
    AccountAmount, AccountId, ContractId, FileId, ScheduleId, Timestamp, TimestampSeconds,
    TokenAssociation, TokenId, TokenTransferList, TopicId, TransactionId, TransferList,
};
use crate::contract::ContractFunctionResult;
use crate::fees::AssessedCustomFee;

/// Outcome codes carried by a receipt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ResponseCode {
    Ok = 0,
    InvalidTransaction = 1,
    PayerAccountNotFound = 2,
    InsufficientTxFee = 9,
    InsufficientPayerBalance = 10,
    Unknown = 21,
    Success = 22,
    FailInvalid = 23,
    ContractRevertExecuted = 33,
    RevertedSuccess = 284,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ExchangeRate {
    #[prost(int32, tag = "1")]
    pub hbar_equiv: i32,
    #[prost(int32, tag = "2")]
    pub cent_equiv: i32,
    #[prost(message, optional, tag = "3")]
    pub expiration_time: Option<TimestampSeconds>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ExchangeRateSet {
    #[prost(message, optional, tag = "1")]
    pub current_rate: Option<ExchangeRate>,
    #[prost(message, optional, tag = "2")]
    pub next_rate: Option<ExchangeRate>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TransactionReceipt {
    #[prost(enumeration = "ResponseCode", tag = "1")]
    pub status: i32,
    #[prost(message, optional, tag = "2")]
    pub account_id: Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub file_id: Option<FileId>,
    #[prost(message, optional, tag = "4")]
    pub contract_id: Option<ContractId>,
    #[prost(message, optional, tag = "5")]
    pub exchange_rate: Option<ExchangeRateSet>,
    #[prost(message, optional, tag = "6")]
    pub topic_id: Option<TopicId>,
    #[prost(uint64, tag = "7")]
    pub topic_sequence_number: u64,
    #[prost(bytes = "vec", tag = "8")]
    pub topic_running_hash: Vec<u8>,
    #[prost(uint64, tag = "9")]
    pub topic_running_hash_version: u64,
    #[prost(message, optional, tag = "10")]
    pub token_id: Option<TokenId>,
    #[prost(uint64, tag = "11")]
    pub new_total_supply: u64,
    #[prost(message, optional, tag = "12")]
    pub schedule_id: Option<ScheduleId>,
    #[prost(message, optional, tag = "13")]
    pub scheduled_transaction_id: Option<TransactionId>,
    #[prost(int64, repeated, tag = "14")]
    pub serial_numbers: Vec<i64>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TransactionRecord {
    #[prost(message, optional, tag = "1")]
    pub receipt: Option<TransactionReceipt>,
    #[prost(bytes = "vec", tag = "2")]
    pub transaction_hash: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub consensus_timestamp: Option<Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub transaction_id: Option<TransactionId>,
    #[prost(string, tag = "5")]
    pub memo: String,
    #[prost(uint64, tag = "6")]
    pub transaction_fee: u64,
    #[prost(oneof = "transaction_record::Body", tags = "7, 8")]
    pub body: Option<transaction_record::Body>,
    #[prost(message, optional, tag = "10")]
    pub transfer_list: Option<TransferList>,
    #[prost(message, repeated, tag = "11")]
    pub token_transfer_lists: Vec<TokenTransferList>,
    #[prost(message, optional, tag = "12")]
    pub schedule_ref: Option<ScheduleId>,
    #[prost(message, repeated, tag = "13")]
    pub assessed_custom_fees: Vec<AssessedCustomFee>,
    #[prost(message, repeated, tag = "14")]
    pub automatic_token_associations: Vec<TokenAssociation>,
    #[prost(message, optional, tag = "15")]
    pub parent_consensus_timestamp: Option<Timestamp>,
    #[prost(bytes = "vec", tag = "16")]
    pub alias: Vec<u8>,
    #[prost(bytes = "vec", tag = "17")]
    pub ethereum_hash: Vec<u8>,
    #[prost(message, repeated, tag = "18")]
    pub paid_staking_rewards: Vec<AccountAmount>,
    #[prost(oneof = "transaction_record::Entropy", tags = "19, 20")]
    pub entropy: Option<transaction_record::Entropy>,
}

pub mod transaction_record {
    #[derive(Clone, PartialEq, Eq, Hash, ::prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "7")]
        ContractCallResult(super::ContractFunctionResult),
        #[prost(message, tag = "8")]
        ContractCreateResult(super::ContractFunctionResult),
    }

    #[derive(Clone, PartialEq, Eq, Hash, ::prost::Oneof)]
    pub enum Entropy {
        #[prost(bytes = "vec", tag = "19")]
        PrngBytes(Vec<u8>),
        #[prost(int32, tag = "20")]
        PrngNumber(i32),
    }
}
