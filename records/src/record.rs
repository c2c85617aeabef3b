//! The full, immutable outcome of one handled transaction.

use std::fmt;
use std::hash::{Hash, Hasher};

use strand_adjustments::{CurrencyAdjustments, NftAdjustments};
use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_evm::EvmFnResult;
use strand_fees::FcAssessedCustomFee;
use strand_types::{EntityId, FcTokenAssociation, RichInstant, TxnId};
use strand_wire::{transaction_record, TokenTransferList, TransactionRecord};

use crate::error::{non_negative, signed};
use crate::{ExpirableTxnRecordBuilder, RecordError, TxnReceipt};

pub const UNKNOWN_SUBMITTING_MEMBER: i64 = -1;
pub const MAX_PSEUDORANDOM_BYTES: usize = 48;

const RELEASE_WITH_TOKENS: u32 = 2;
const RELEASE_WITH_SCHEDULE_REF: u32 = 3;
const RELEASE_WITH_NFTS_AND_FEES: u32 = 4;
const RELEASE_WITH_ASSOCIATIONS: u32 = 5;
const RELEASE_WITH_CHILD_RECORDS: u32 = 6;
/// The only release that wrote three (always empty) allowance map sizes.
const RELEASE_WITH_ALLOWANCE_SIZES: u32 = 6;
const RELEASE_WITH_ETHEREUM_HASH: u32 = 7;
const RELEASE_WITH_STAKING_REWARDS: u32 = 8;
const RELEASE_WITH_PRNG: u32 = 9;

const NO_PRNG_OUTPUT: u8 = 0;
const PRNG_NUMBER_OUTPUT: u8 = 1;
const PRNG_BYTES_OUTPUT: u8 = 2;

/// Output of a pseudorandom-number transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrngOutput {
    Number(i32),
    Bytes(Vec<u8>),
}

impl PrngOutput {
    fn code(&self) -> u8 {
        match self {
            Self::Number(_) => PRNG_NUMBER_OUTPUT,
            Self::Bytes(_) => PRNG_BYTES_OUTPUT,
        }
    }
}

/// Everything the ledger remembers about one transaction until it expires.
///
/// Built only through [`ExpirableTxnRecordBuilder`]. Optional sections are
/// `None` when the transaction never touched them, which is distinct from
/// an empty list.
#[derive(Clone, Debug)]
pub struct ExpirableTxnRecord {
    pub(crate) receipt: Option<TxnReceipt>,
    pub(crate) txn_hash: Vec<u8>,
    pub(crate) txn_id: Option<TxnId>,
    pub(crate) consensus_time: Option<RichInstant>,
    pub(crate) memo: Option<String>,
    pub(crate) fee: i64,
    pub(crate) hbar_adjustments: Option<CurrencyAdjustments>,
    pub(crate) contract_call_result: Option<EvmFnResult>,
    pub(crate) contract_create_result: Option<EvmFnResult>,
    pub(crate) expiry: i64,
    pub(crate) submitting_member: i64,
    pub(crate) tokens: Option<Vec<EntityId>>,
    pub(crate) token_adjustments: Option<Vec<CurrencyAdjustments>>,
    pub(crate) schedule_ref: Option<EntityId>,
    pub(crate) nft_token_adjustments: Option<Vec<NftAdjustments>>,
    pub(crate) assessed_custom_fees: Option<Vec<FcAssessedCustomFee>>,
    pub(crate) new_token_associations: Option<Vec<FcTokenAssociation>>,
    pub(crate) num_child_records: Option<i16>,
    pub(crate) parent_consensus_time: Option<RichInstant>,
    pub(crate) alias: Vec<u8>,
    pub(crate) ethereum_hash: Vec<u8>,
    pub(crate) staking_rewards_paid: Option<CurrencyAdjustments>,
    pub(crate) prng_output: Option<PrngOutput>,
}

impl Default for ExpirableTxnRecord {
    fn default() -> Self {
        Self {
            receipt: None,
            txn_hash: Vec::new(),
            txn_id: None,
            consensus_time: None,
            memo: None,
            fee: 0,
            hbar_adjustments: None,
            contract_call_result: None,
            contract_create_result: None,
            expiry: 0,
            submitting_member: UNKNOWN_SUBMITTING_MEMBER,
            tokens: None,
            token_adjustments: None,
            schedule_ref: None,
            nft_token_adjustments: None,
            assessed_custom_fees: None,
            new_token_associations: None,
            num_child_records: None,
            parent_consensus_time: None,
            alias: Vec::new(),
            ethereum_hash: Vec::new(),
            staking_rewards_paid: None,
            prng_output: None,
        }
    }
}

impl ExpirableTxnRecord {
    pub fn builder() -> ExpirableTxnRecordBuilder {
        ExpirableTxnRecordBuilder::default()
    }

    pub fn receipt(&self) -> Option<&TxnReceipt> {
        self.receipt.as_ref()
    }

    pub fn txn_hash(&self) -> &[u8] {
        &self.txn_hash
    }

    pub fn txn_id(&self) -> Option<&TxnId> {
        self.txn_id.as_ref()
    }

    pub fn consensus_time(&self) -> Option<RichInstant> {
        self.consensus_time
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn fee(&self) -> i64 {
        self.fee
    }

    pub fn hbar_adjustments(&self) -> Option<&CurrencyAdjustments> {
        self.hbar_adjustments.as_ref()
    }

    pub fn contract_call_result(&self) -> Option<&EvmFnResult> {
        self.contract_call_result.as_ref()
    }

    pub fn contract_create_result(&self) -> Option<&EvmFnResult> {
        self.contract_create_result.as_ref()
    }

    pub fn expiry(&self) -> i64 {
        self.expiry
    }

    pub fn submitting_member(&self) -> i64 {
        self.submitting_member
    }

    pub fn tokens(&self) -> Option<&[EntityId]> {
        self.tokens.as_deref()
    }

    pub fn token_adjustments(&self) -> Option<&[CurrencyAdjustments]> {
        self.token_adjustments.as_deref()
    }

    pub fn schedule_ref(&self) -> Option<EntityId> {
        self.schedule_ref
    }

    pub fn nft_token_adjustments(&self) -> Option<&[NftAdjustments]> {
        self.nft_token_adjustments.as_deref()
    }

    pub fn assessed_custom_fees(&self) -> Option<&[FcAssessedCustomFee]> {
        self.assessed_custom_fees.as_deref()
    }

    pub fn new_token_associations(&self) -> Option<&[FcTokenAssociation]> {
        self.new_token_associations.as_deref()
    }

    pub fn num_child_records(&self) -> Option<i16> {
        self.num_child_records
    }

    pub fn parent_consensus_time(&self) -> Option<RichInstant> {
        self.parent_consensus_time
    }

    pub fn alias(&self) -> &[u8] {
        &self.alias
    }

    pub fn ethereum_hash(&self) -> &[u8] {
        &self.ethereum_hash
    }

    pub fn staking_rewards_paid(&self) -> Option<&CurrencyAdjustments> {
        self.staking_rewards_paid.as_ref()
    }

    pub fn prng_output(&self) -> Option<&PrngOutput> {
        self.prng_output.as_ref()
    }

    /// Project to the wire form, leaving every absent section unset.
    ///
    /// Expiry and submitting member have no wire counterpart.
    pub fn as_wire(&self) -> TransactionRecord {
        let mut wire = TransactionRecord {
            receipt: self.receipt.as_ref().map(TxnReceipt::to_wire),
            transaction_hash: self.txn_hash.clone(),
            consensus_timestamp: self.consensus_time.map(|t| t.to_wire()),
            transaction_id: self.txn_id.map(|id| id.to_wire()),
            memo: self.memo.clone().unwrap_or_default(),
            transaction_fee: self.fee.unsigned_abs(),
            transfer_list: self.hbar_adjustments.as_ref().map(CurrencyAdjustments::to_wire),
            schedule_ref: self.schedule_ref.map(|id| id.to_schedule_id()),
            parent_consensus_timestamp: self.parent_consensus_time.map(|t| t.to_wire()),
            alias: self.alias.clone(),
            ethereum_hash: self.ethereum_hash.clone(),
            ..Default::default()
        };

        // A create result wins when both are set; the wire holds only one.
        if let Some(result) = &self.contract_call_result {
            wire.body = Some(transaction_record::Body::ContractCallResult(result.to_wire()));
        }
        if let Some(result) = &self.contract_create_result {
            wire.body = Some(transaction_record::Body::ContractCreateResult(result.to_wire()));
        }
        if let Some(tokens) = &self.tokens {
            wire.token_transfer_lists = self.token_transfer_lists(tokens);
        }
        if let Some(fees) = &self.assessed_custom_fees {
            wire.assessed_custom_fees = fees.iter().map(FcAssessedCustomFee::to_wire).collect();
        }
        if let Some(associations) = &self.new_token_associations {
            wire.automatic_token_associations =
                associations.iter().map(FcTokenAssociation::to_wire).collect();
        }
        if let Some(rewards) = &self.staking_rewards_paid {
            wire.paid_staking_rewards = rewards.to_account_amounts();
        }
        wire.entropy = self.prng_output.as_ref().map(|output| match output {
            PrngOutput::Number(n) => transaction_record::Entropy::PrngNumber(*n),
            PrngOutput::Bytes(bytes) => transaction_record::Entropy::PrngBytes(bytes.clone()),
        });
        wire
    }

    fn token_transfer_lists(&self, tokens: &[EntityId]) -> Vec<TokenTransferList> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| TokenTransferList {
                token: Some(token.to_token_id()),
                transfers: self
                    .token_adjustments
                    .as_ref()
                    .and_then(|all| all.get(i))
                    .map(CurrencyAdjustments::to_account_amounts)
                    .unwrap_or_default(),
                nft_transfers: self
                    .nft_token_adjustments
                    .as_ref()
                    .and_then(|all| all.get(i))
                    .map(NftAdjustments::to_nft_transfers)
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Rebuild from the wire form.
    ///
    /// Empty wire sections read as absent. When token transfer lists are
    /// present, the token, fungible and NFT columns are all rebuilt.
    pub fn from_wire(wire: &TransactionRecord) -> Result<Self, RecordError> {
        let fee = signed("transaction fee", wire.transaction_fee)?;
        let mut builder = ExpirableTxnRecordBuilder::default();
        builder
            .txn_hash(wire.transaction_hash.clone())?
            .fee(fee)?
            .alias(wire.alias.clone())?
            .ethereum_hash(wire.ethereum_hash.clone())?;
        if let Some(receipt) = &wire.receipt {
            builder.receipt(TxnReceipt::from_wire(receipt)?);
        }
        if let Some(id) = &wire.transaction_id {
            builder.txn_id(TxnId::from_wire(id)?);
        }
        if let Some(ts) = &wire.consensus_timestamp {
            builder.consensus_time(RichInstant::from(ts));
        }
        if !wire.memo.is_empty() {
            builder.memo(wire.memo.clone())?;
        }
        if let Some(transfers) = &wire.transfer_list {
            builder.hbar_adjustments(CurrencyAdjustments::from_wire(transfers)?)?;
        }
        match &wire.body {
            Some(transaction_record::Body::ContractCallResult(result)) => {
                builder.contract_call_result(EvmFnResult::from_wire(result)?);
            }
            Some(transaction_record::Body::ContractCreateResult(result)) => {
                builder.contract_create_result(EvmFnResult::from_wire(result)?);
            }
            None => {}
        }
        if !wire.token_transfer_lists.is_empty() {
            let mut tokens = Vec::with_capacity(wire.token_transfer_lists.len());
            let mut fungible = Vec::with_capacity(wire.token_transfer_lists.len());
            let mut nfts = Vec::with_capacity(wire.token_transfer_lists.len());
            for list in &wire.token_transfer_lists {
                tokens.push(EntityId::from_token_id(list.token.as_ref())?);
                fungible.push(CurrencyAdjustments::from_account_amounts(&list.transfers)?);
                nfts.push(NftAdjustments::from_nft_transfers(&list.nft_transfers)?);
            }
            builder
                .tokens(tokens)?
                .token_adjustments(fungible)?
                .nft_token_adjustments(nfts)?;
        }
        if let Some(id) = &wire.schedule_ref {
            builder.schedule_ref(EntityId::from(id));
        }
        if !wire.assessed_custom_fees.is_empty() {
            let fees = wire
                .assessed_custom_fees
                .iter()
                .map(FcAssessedCustomFee::from_wire)
                .collect::<Result<Vec<_>, _>>()?;
            builder.assessed_custom_fees(fees)?;
        }
        if !wire.automatic_token_associations.is_empty() {
            let associations = wire
                .automatic_token_associations
                .iter()
                .map(FcTokenAssociation::from_wire)
                .collect::<Result<Vec<_>, _>>()?;
            builder.new_token_associations(associations)?;
        }
        if let Some(ts) = &wire.parent_consensus_timestamp {
            builder.parent_consensus_time(RichInstant::from(ts));
        }
        if !wire.paid_staking_rewards.is_empty() {
            builder.staking_rewards_paid(CurrencyAdjustments::from_account_amounts(
                &wire.paid_staking_rewards,
            )?)?;
        }
        match &wire.entropy {
            Some(transaction_record::Entropy::PrngNumber(n)) => {
                builder.pseudorandom_number(*n);
            }
            Some(transaction_record::Entropy::PrngBytes(bytes)) => {
                builder.pseudorandom_bytes(bytes.clone())?;
            }
            None => {}
        }
        Ok(builder.build())
    }
}

impl PartialEq for ExpirableTxnRecord {
    fn eq(&self, other: &Self) -> bool {
        self.receipt == other.receipt
            && self.txn_hash == other.txn_hash
            && self.txn_id == other.txn_id
            && self.consensus_time == other.consensus_time
            && self.memo == other.memo
            && self.fee == other.fee
            && self.hbar_adjustments == other.hbar_adjustments
            && self.contract_call_result == other.contract_call_result
            && self.contract_create_result == other.contract_create_result
            && self.expiry == other.expiry
            && self.submitting_member == other.submitting_member
            && self.tokens == other.tokens
            && self.token_adjustments == other.token_adjustments
            && self.schedule_ref == other.schedule_ref
            && self.nft_token_adjustments == other.nft_token_adjustments
            && self.assessed_custom_fees == other.assessed_custom_fees
            && self.new_token_associations == other.new_token_associations
            && self.num_child_records == other.num_child_records
            && self.parent_consensus_time == other.parent_consensus_time
            && self.alias == other.alias
            && self.ethereum_hash == other.ethereum_hash
            && self.staking_rewards_paid == other.staking_rewards_paid
            && self.prng_output == other.prng_output
    }
}

impl Eq for ExpirableTxnRecord {}

impl Hash for ExpirableTxnRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.receipt.hash(state);
        self.txn_hash.hash(state);
        self.txn_id.hash(state);
        self.consensus_time.hash(state);
        self.memo.hash(state);
        self.fee.hash(state);
        self.hbar_adjustments.hash(state);
        self.contract_call_result.hash(state);
        self.contract_create_result.hash(state);
        self.expiry.hash(state);
        self.submitting_member.hash(state);
        self.tokens.hash(state);
        self.token_adjustments.hash(state);
        self.schedule_ref.hash(state);
        self.nft_token_adjustments.hash(state);
        self.assessed_custom_fees.hash(state);
        self.new_token_associations.hash(state);
        self.num_child_records.hash(state);
        self.parent_consensus_time.hash(state);
        self.alias.hash(state);
        self.ethereum_hash.hash(state);
        self.staking_rewards_paid.hash(state);
        self.prng_output.hash(state);
    }
}

impl Versioned for ExpirableTxnRecord {
    const CLASS_ID: u64 = 0x8b9e_de7c_a8d8_db93;
    const CURRENT_VERSION: u32 = RELEASE_WITH_PRNG;
}

impl SelfSerializable for ExpirableTxnRecord {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_nullable_serializable(self.receipt.as_ref());
        out.write_byte_array(&self.txn_hash);
        out.write_nullable_serializable(self.txn_id.as_ref());
        out.write_nullable_serializable(self.consensus_time.as_ref());
        out.write_nullable_string(self.memo.as_deref());
        out.write_i64(self.fee);
        out.write_nullable_serializable(self.hbar_adjustments.as_ref());
        out.write_nullable_serializable(self.contract_call_result.as_ref());
        out.write_nullable_serializable(self.contract_create_result.as_ref());
        out.write_i64(self.expiry);
        out.write_i64(self.submitting_member);

        out.write_serializable_list(self.tokens.as_deref());
        out.write_serializable_list(self.token_adjustments.as_deref());
        out.write_nullable_serializable(self.schedule_ref.as_ref());
        out.write_serializable_list(self.nft_token_adjustments.as_deref());
        out.write_serializable_list(self.assessed_custom_fees.as_deref());
        out.write_serializable_list(self.new_token_associations.as_deref());

        out.write_bool(self.num_child_records.is_some());
        if let Some(count) = self.num_child_records {
            out.write_i16(count);
        }
        out.write_nullable_serializable(self.parent_consensus_time.as_ref());
        out.write_byte_array(&self.alias);
        out.write_byte_array(&self.ethereum_hash);
        out.write_nullable_serializable(self.staking_rewards_paid.as_ref());

        match &self.prng_output {
            None => out.write_u8(NO_PRNG_OUTPUT),
            Some(output) => {
                out.write_u8(output.code());
                match output {
                    PrngOutput::Number(n) => out.write_i32(*n),
                    PrngOutput::Bytes(bytes) => out.write_byte_array(bytes),
                }
            }
        }
    }
}

impl SelfDeserializable for ExpirableTxnRecord {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let limits = input.limits();
        let mut record = Self {
            receipt: input.read_nullable_serializable()?,
            txn_hash: input.read_byte_array("txn hash", limits.max_txn_hash_bytes)?,
            txn_id: input.read_nullable_serializable()?,
            consensus_time: input.read_nullable_serializable()?,
            memo: input.read_nullable_string("memo", limits.max_memo_bytes)?,
            fee: input.read_i64()?,
            hbar_adjustments: input.read_nullable_serializable()?,
            contract_call_result: input.read_nullable_serializable()?,
            contract_create_result: input.read_nullable_serializable()?,
            expiry: input.read_i64()?,
            submitting_member: input.read_i64()?,
            ..Self::default()
        };

        non_negative("transaction fee", record.fee).map_err(CodecError::rejected)?;
        if version >= RELEASE_WITH_TOKENS {
            record.tokens = input.read_serializable_list("tokens", limits.max_involved_tokens)?;
            record.token_adjustments =
                input.read_serializable_list("token adjustments", limits.max_involved_tokens)?;
        }
        if version >= RELEASE_WITH_SCHEDULE_REF {
            record.schedule_ref = input.read_nullable_serializable()?;
        }
        if version >= RELEASE_WITH_NFTS_AND_FEES {
            record.nft_token_adjustments =
                input.read_serializable_list("nft adjustments", limits.max_involved_tokens)?;
            record.assessed_custom_fees =
                input.read_serializable_list("assessed fees", limits.max_assessed_fees)?;
        }
        if version >= RELEASE_WITH_ASSOCIATIONS {
            record.new_token_associations = input
                .read_serializable_list("token associations", limits.max_token_associations)?;
        }
        if version >= RELEASE_WITH_CHILD_RECORDS {
            if input.read_bool()? {
                record.num_child_records = Some(input.read_i16()?);
            }
            record.parent_consensus_time = input.read_nullable_serializable()?;
            record.alias = input.read_byte_array("alias", limits.max_txn_hash_bytes)?;
        }
        if version == RELEASE_WITH_ALLOWANCE_SIZES {
            for _ in 0..3 {
                input.read_i32()?;
            }
        }
        if version >= RELEASE_WITH_ETHEREUM_HASH {
            record.ethereum_hash =
                input.read_byte_array("ethereum hash", limits.max_txn_hash_bytes)?;
        }
        if version >= RELEASE_WITH_STAKING_REWARDS {
            record.staking_rewards_paid = input.read_nullable_serializable()?;
        }
        if version >= RELEASE_WITH_PRNG {
            record.prng_output = match input.read_u8()? {
                NO_PRNG_OUTPUT => None,
                PRNG_NUMBER_OUTPUT => Some(PrngOutput::Number(input.read_i32()?)),
                PRNG_BYTES_OUTPUT => Some(PrngOutput::Bytes(
                    input.read_byte_array("pseudorandom bytes", MAX_PSEUDORANDOM_BYTES)?,
                )),
                other => {
                    return Err(CodecError::InvalidDiscriminant {
                        what: "prng output",
                        value: i64::from(other),
                    })
                }
            };
        }
        Ok(record)
    }
}

impl fmt::Display for ExpirableTxnRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpirableTxnRecord{{")?;
        if let Some(receipt) = &self.receipt {
            write!(f, "receipt={receipt}, ")?;
        }
        write!(f, "fee={}, txn_hash=0x{}", self.fee, hex::encode(&self.txn_hash))?;
        if let Some(id) = &self.txn_id {
            write!(f, ", txn_id={id}")?;
        }
        if let Some(time) = self.consensus_time {
            write!(f, ", consensus_time={time}")?;
        }
        write!(f, ", expiry={}, submitting_member={}", self.expiry, self.submitting_member)?;
        if let Some(memo) = &self.memo {
            write!(f, ", memo={memo:?}")?;
        }
        if let Some(result) = &self.contract_call_result {
            write!(f, ", call_result={result}")?;
        }
        if let Some(result) = &self.contract_create_result {
            write!(f, ", create_result={result}")?;
        }
        if let Some(adjustments) = &self.hbar_adjustments {
            write!(f, ", hbar_adjustments={}", adjustments.len())?;
        }
        if let Some(tokens) = &self.tokens {
            write!(f, ", tokens={}", tokens.len())?;
        }
        if let Some(schedule) = self.schedule_ref {
            write!(f, ", schedule_ref={schedule}")?;
        }
        if let Some(parent) = self.parent_consensus_time {
            write!(f, ", parent_consensus_time={parent}")?;
        }
        if !self.alias.is_empty() {
            write!(f, ", alias=0x{}", hex::encode(&self.alias))?;
        }
        if !self.ethereum_hash.is_empty() {
            write!(f, ", ethereum_hash=0x{}", hex::encode(&self.ethereum_hash))?;
        }
        match &self.prng_output {
            Some(PrngOutput::Number(n)) => write!(f, ", prng_number={n}")?,
            Some(PrngOutput::Bytes(bytes)) => write!(f, ", prng_bytes=0x{}", hex::encode(bytes))?,
            None => {}
        }
        write!(f, "}}")
    }
}
