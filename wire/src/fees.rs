//! Custom fee rules and assessed charges.

use crate::basic::{AccountId, TokenId};

#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Fraction {
    #[prost(int64, tag = "1")]
    pub numerator: i64,
    #[prost(int64, tag = "2")]
    pub denominator: i64,
}

/// A flat fee; an absent denomination means the native currency.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct FixedFee {
    #[prost(int64, tag = "1")]
    pub amount: i64,
    #[prost(message, optional, tag = "2")]
    pub denominating_token_id: Option<TokenId>,
}

/// A proportional fee; a `maximum_amount` of zero means unbounded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct FractionalFee {
    #[prost(message, optional, tag = "1")]
    pub fractional_amount: Option<Fraction>,
    #[prost(int64, tag = "2")]
    pub minimum_amount: i64,
    #[prost(int64, tag = "3")]
    pub maximum_amount: i64,
    #[prost(bool, tag = "4")]
    pub net_of_transfers: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct RoyaltyFee {
    #[prost(message, optional, tag = "1")]
    pub exchange_value_fraction: Option<Fraction>,
    #[prost(message, optional, tag = "2")]
    pub fallback_fee: Option<FixedFee>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct CustomFee {
    #[prost(oneof = "custom_fee::Fee", tags = "1, 2, 4")]
    pub fee: Option<custom_fee::Fee>,
    #[prost(message, optional, tag = "3")]
    pub fee_collector_account_id: Option<AccountId>,
    #[prost(bool, tag = "5")]
    pub all_collectors_are_exempt: bool,
}

pub mod custom_fee {
    #[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Oneof)]
    pub enum Fee {
        #[prost(message, tag = "1")]
        FixedFee(super::FixedFee),
        #[prost(message, tag = "2")]
        FractionalFee(super::FractionalFee),
        #[prost(message, tag = "4")]
        RoyaltyFee(super::RoyaltyFee),
    }
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct AssessedCustomFee {
    #[prost(int64, tag = "1")]
    pub amount: i64,
    #[prost(message, optional, tag = "2")]
    pub token_id: Option<TokenId>,
    #[prost(message, optional, tag = "3")]
    pub fee_collector_account_id: Option<AccountId>,
    #[prost(message, repeated, tag = "4")]
    pub effective_payer_account_id: Vec<AccountId>,
}
