//! EVM call results and event logs.

use crate::basic::{AccountId, ContractId};

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ContractLoginfo {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
    #[prost(bytes = "vec", tag = "2")]
    pub bloom: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub topic: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ContractFunctionResult {
    #[prost(message, optional, tag = "1")]
    pub contract_id: Option<ContractId>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_call_result: Vec<u8>,
    #[prost(string, tag = "3")]
    pub error_message: String,
    #[prost(bytes = "vec", tag = "4")]
    pub bloom: Vec<u8>,
    #[prost(uint64, tag = "5")]
    pub gas_used: u64,
    #[prost(message, repeated, tag = "6")]
    pub log_info: Vec<ContractLoginfo>,
    #[prost(message, repeated, tag = "7")]
    pub created_contract_ids: Vec<ContractId>,
    #[prost(bytes = "vec", tag = "9")]
    pub evm_address: Vec<u8>,
    #[prost(int64, tag = "10")]
    pub gas: i64,
    #[prost(int64, tag = "11")]
    pub amount: i64,
    #[prost(bytes = "vec", tag = "12")]
    pub function_parameters: Vec<u8>,
    #[prost(message, optional, tag = "13")]
    pub sender_id: Option<AccountId>,
}
