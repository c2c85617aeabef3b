//! Accumulates a record while a transaction is handled.

use strand_adjustments::{CurrencyAdjustments, NftAdjustments};
use strand_codec::{
    DEFAULT_MAX_ASSESSED_FEES, DEFAULT_MAX_CURRENCY_ADJUSTMENTS, DEFAULT_MAX_EFFECTIVE_PAYERS,
    DEFAULT_MAX_INVOLVED_TOKENS, DEFAULT_MAX_MEMO_BYTES, DEFAULT_MAX_NFT_ADJUSTMENTS,
    DEFAULT_MAX_TOKEN_ASSOCIATIONS, DEFAULT_MAX_TXN_HASH_BYTES,
};
use strand_evm::EvmFnResult;
use strand_fees::FcAssessedCustomFee;
use strand_types::{EntityId, FcTokenAssociation, RichInstant, TxnId};
use crate::error::non_negative;
use crate::record::{PrngOutput, MAX_PSEUDORANDOM_BYTES};
use crate::{ExpirableTxnRecord, RecordError, TxnReceipt};

fn bounded(what: &'static str, len: usize, max: usize) -> Result<(), RecordError> {
    if len > max {
        return Err(RecordError::TooLong { what, len, max });
    }
    Ok(())
}

fn bounded_adjustments(what: &'static str, adjustments: &CurrencyAdjustments) -> Result<(), RecordError> {
    bounded(what, adjustments.len(), DEFAULT_MAX_CURRENCY_ADJUSTMENTS)
}

/// Reusable builder for [`ExpirableTxnRecord`].
///
/// Setters chain on `&mut self`; [`build`](Self::build) snapshots the
/// current state, so a builder can keep accumulating after a build.
///
/// Sized sections are held to the default decode limits, so every record
/// built here reads back under [`DecodeLimits::default`](strand_codec::DecodeLimits).
#[derive(Clone, Debug, Default)]
pub struct ExpirableTxnRecordBuilder {
    pub(crate) record: ExpirableTxnRecord,
    only_externalized_if_successful: bool,
}

impl ExpirableTxnRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipt(&mut self, receipt: TxnReceipt) -> &mut Self {
        self.record.receipt = Some(receipt);
        self
    }

    pub fn txn_hash(&mut self, hash: Vec<u8>) -> Result<&mut Self, RecordError> {
        bounded("txn hash", hash.len(), DEFAULT_MAX_TXN_HASH_BYTES)?;
        self.record.txn_hash = hash;
        Ok(self)
    }

    pub fn txn_id(&mut self, id: TxnId) -> &mut Self {
        self.record.txn_id = Some(id);
        self
    }

    pub fn consensus_time(&mut self, time: RichInstant) -> &mut Self {
        self.record.consensus_time = Some(time);
        self
    }

    /// The memo, bounded in UTF-8 bytes.
    pub fn memo(&mut self, memo: impl Into<String>) -> Result<&mut Self, RecordError> {
        let memo = memo.into();
        bounded("memo", memo.len(), DEFAULT_MAX_MEMO_BYTES)?;
        self.record.memo = Some(memo);
        Ok(self)
    }

    pub fn fee(&mut self, fee: i64) -> Result<&mut Self, RecordError> {
        self.record.fee = non_negative("transaction fee", fee)?;
        Ok(self)
    }

    pub fn hbar_adjustments(
        &mut self,
        adjustments: CurrencyAdjustments,
    ) -> Result<&mut Self, RecordError> {
        bounded_adjustments("hbar adjustments", &adjustments)?;
        self.record.hbar_adjustments = Some(adjustments);
        Ok(self)
    }

    pub fn contract_call_result(&mut self, result: EvmFnResult) -> &mut Self {
        self.record.contract_call_result = Some(result);
        self
    }

    pub fn contract_create_result(&mut self, result: EvmFnResult) -> &mut Self {
        self.record.contract_create_result = Some(result);
        self
    }

    pub fn expiry(&mut self, expiry: i64) -> &mut Self {
        self.record.expiry = expiry;
        self
    }

    pub fn submitting_member(&mut self, member: i64) -> &mut Self {
        self.record.submitting_member = member;
        self
    }

    pub fn tokens(&mut self, tokens: Vec<EntityId>) -> Result<&mut Self, RecordError> {
        bounded("tokens", tokens.len(), DEFAULT_MAX_INVOLVED_TOKENS)?;
        self.record.tokens = Some(tokens);
        Ok(self)
    }

    pub fn token_adjustments(
        &mut self,
        adjustments: Vec<CurrencyAdjustments>,
    ) -> Result<&mut Self, RecordError> {
        bounded("token adjustments", adjustments.len(), DEFAULT_MAX_INVOLVED_TOKENS)?;
        for list in &adjustments {
            bounded_adjustments("token adjustments", list)?;
        }
        self.record.token_adjustments = Some(adjustments);
        Ok(self)
    }

    pub fn schedule_ref(&mut self, schedule: EntityId) -> &mut Self {
        self.record.schedule_ref = Some(schedule);
        self
    }

    pub fn nft_token_adjustments(
        &mut self,
        adjustments: Vec<NftAdjustments>,
    ) -> Result<&mut Self, RecordError> {
        bounded("nft adjustments", adjustments.len(), DEFAULT_MAX_INVOLVED_TOKENS)?;
        for list in &adjustments {
            bounded("nft adjustments", list.len(), DEFAULT_MAX_NFT_ADJUSTMENTS)?;
        }
        self.record.nft_token_adjustments = Some(adjustments);
        Ok(self)
    }

    pub fn assessed_custom_fees(
        &mut self,
        fees: Vec<FcAssessedCustomFee>,
    ) -> Result<&mut Self, RecordError> {
        bounded("assessed fees", fees.len(), DEFAULT_MAX_ASSESSED_FEES)?;
        for fee in &fees {
            bounded("effective payers", fee.effective_payers().len(), DEFAULT_MAX_EFFECTIVE_PAYERS)?;
        }
        self.record.assessed_custom_fees = Some(fees);
        Ok(self)
    }

    pub fn new_token_associations(
        &mut self,
        associations: Vec<FcTokenAssociation>,
    ) -> Result<&mut Self, RecordError> {
        bounded("token associations", associations.len(), DEFAULT_MAX_TOKEN_ASSOCIATIONS)?;
        self.record.new_token_associations = Some(associations);
        Ok(self)
    }

    pub fn num_child_records(&mut self, count: i16) -> &mut Self {
        self.record.num_child_records = Some(count);
        self
    }

    pub fn parent_consensus_time(&mut self, time: RichInstant) -> &mut Self {
        self.record.parent_consensus_time = Some(time);
        self
    }

    pub fn alias(&mut self, alias: Vec<u8>) -> Result<&mut Self, RecordError> {
        bounded("alias", alias.len(), DEFAULT_MAX_TXN_HASH_BYTES)?;
        self.record.alias = alias;
        Ok(self)
    }

    pub fn ethereum_hash(&mut self, hash: Vec<u8>) -> Result<&mut Self, RecordError> {
        bounded("ethereum hash", hash.len(), DEFAULT_MAX_TXN_HASH_BYTES)?;
        self.record.ethereum_hash = hash;
        Ok(self)
    }

    pub fn staking_rewards_paid(
        &mut self,
        rewards: CurrencyAdjustments,
    ) -> Result<&mut Self, RecordError> {
        bounded_adjustments("staking rewards", &rewards)?;
        self.record.staking_rewards_paid = Some(rewards);
        Ok(self)
    }

    pub fn pseudorandom_number(&mut self, number: i32) -> &mut Self {
        self.record.prng_output = Some(PrngOutput::Number(number));
        self
    }

    pub fn pseudorandom_bytes(&mut self, bytes: Vec<u8>) -> Result<&mut Self, RecordError> {
        if bytes.len() > MAX_PSEUDORANDOM_BYTES {
            return Err(RecordError::PseudorandomTooLong {
                len: bytes.len(),
                max: MAX_PSEUDORANDOM_BYTES,
            });
        }
        self.record.prng_output = Some(PrngOutput::Bytes(bytes));
        Ok(self)
    }

    /// Mark the record as one to drop from the record stream unless it succeeds.
    pub fn only_externalize_if_successful(&mut self) -> &mut Self {
        self.only_externalized_if_successful = true;
        self
    }

    pub fn should_not_be_externalized(&self) -> bool {
        self.only_externalized_if_successful
            && !self.record.receipt.as_ref().is_some_and(TxnReceipt::is_success)
    }

    /// The record as accumulated so far.
    pub fn peek(&self) -> &ExpirableTxnRecord {
        &self.record
    }

    pub fn build(&self) -> ExpirableTxnRecord {
        self.record.clone()
    }

    /// Clear every field so the builder can serve the next transaction.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Revert the receipt and drop every side effect, keeping the call result.
    pub fn revert(&mut self) -> Result<(), RecordError> {
        let receipt = self
            .record
            .receipt
            .as_ref()
            .ok_or(RecordError::NothingToRevert)?;
        self.record.receipt = Some(receipt.reverted());

        let record = &mut self.record;
        record.hbar_adjustments = None;
        record.staking_rewards_paid = None;
        record.contract_create_result = None;
        record.tokens = None;
        record.token_adjustments = None;
        record.nft_token_adjustments = None;
        record.schedule_ref = None;
        record.assessed_custom_fees = None;
        record.new_token_associations = None;
        record.alias.clear();
        record.ethereum_hash.clear();
        record.prng_output = None;
        Ok(())
    }

    /// Net a child transaction's native-currency changes out of this record's.
    ///
    /// The result is ordered by account and drops accounts that net to zero.
    /// Fails, leaving this record untouched, when the netted list would exceed
    /// the adjustment bound.
    pub fn exclude_hbar_changes_from(
        &mut self,
        child: &ExpirableTxnRecordBuilder,
    ) -> Result<(), RecordError> {
        let Some(theirs) = &child.record.hbar_adjustments else {
            return Ok(());
        };
        let netted = match &self.record.hbar_adjustments {
            Some(ours) => ours.net_of(theirs)?,
            None => CurrencyAdjustments::default().net_of(theirs)?,
        };
        self.record.hbar_adjustments = Some(netted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_wire::ResponseCode;

    fn adjustments(pairs: &[(i64, i64)]) -> CurrencyAdjustments {
        CurrencyAdjustments::from_pairs(pairs.iter().map(|(n, a)| (EntityId::from_num(*n), *a)))
            .unwrap()
    }

    fn busy_builder() -> ExpirableTxnRecordBuilder {
        let mut builder = ExpirableTxnRecordBuilder::new();
        builder
            .receipt(TxnReceipt::new(ResponseCode::Success).with_account_id(EntityId::from_num(9)))
            .contract_call_result(EvmFnResult::success(None, vec![1], 10).unwrap())
            .contract_create_result(EvmFnResult::success(None, vec![2], 20).unwrap())
            .schedule_ref(EntityId::from_num(7))
            .pseudorandom_number(4);
        builder
            .fee(100)
            .and_then(|b| b.memo("hi"))
            .and_then(|b| b.hbar_adjustments(adjustments(&[(2, -100), (98, 100)])))
            .and_then(|b| b.tokens(vec![EntityId::from_num(1001)]))
            .and_then(|b| b.token_adjustments(vec![adjustments(&[(3, -1), (4, 1)])]))
            .and_then(|b| b.alias(vec![1, 2, 3]))
            .unwrap();
        builder
    }

    #[test]
    fn build_snapshots_and_keeps_accumulating() {
        let mut builder = busy_builder();
        let first = builder.build();
        builder.fee(200).unwrap();
        assert_eq!(first.fee(), 100);
        assert_eq!(builder.build().fee(), 200);
    }

    #[test]
    fn reset_clears_everything() {
        let mut builder = busy_builder();
        builder.only_externalize_if_successful().reset();
        assert_eq!(builder.build(), ExpirableTxnRecord::default());
        assert!(!builder.should_not_be_externalized());
    }

    #[test]
    fn revert_keeps_call_result_only() {
        let mut builder = busy_builder();
        builder.revert().unwrap();
        let record = builder.build();
        let receipt = record.receipt().unwrap();
        assert_eq!(receipt.status(), ResponseCode::RevertedSuccess);
        assert_eq!(receipt.account_id(), None);
        assert!(record.contract_call_result().is_some());
        assert!(record.contract_create_result().is_none());
        assert!(record.hbar_adjustments().is_none());
        assert!(record.tokens().is_none());
        assert!(record.schedule_ref().is_none());
        assert!(record.alias().is_empty());
        assert!(record.prng_output().is_none());
        assert_eq!(record.memo(), Some("hi"));
        assert_eq!(record.fee(), 100);
    }

    #[test]
    fn revert_without_receipt_fails() {
        let mut builder = ExpirableTxnRecordBuilder::new();
        assert_eq!(builder.revert(), Err(RecordError::NothingToRevert));
    }

    #[test]
    fn child_hbar_changes_are_netted_out() {
        let mut parent = ExpirableTxnRecordBuilder::new();
        parent
            .hbar_adjustments(adjustments(&[(2, -300), (3, 200), (98, 100)]))
            .unwrap();
        let mut child = ExpirableTxnRecordBuilder::new();
        child
            .hbar_adjustments(adjustments(&[(2, -200), (3, 200), (5, 0)]))
            .unwrap();

        parent.exclude_hbar_changes_from(&child).unwrap();
        assert_eq!(
            parent.peek().hbar_adjustments(),
            Some(&adjustments(&[(2, -100), (98, 100)]))
        );

        let unchanged = parent.build();
        parent
            .exclude_hbar_changes_from(&ExpirableTxnRecordBuilder::new())
            .unwrap();
        assert_eq!(parent.build(), unchanged);
    }

    #[test]
    fn netting_that_overflows_the_list_leaves_parent_untouched() {
        let spread = |from: i64| -> CurrencyAdjustments {
            CurrencyAdjustments::from_pairs((from..from + 25).map(|n| (EntityId::from_num(n), 1)))
                .unwrap()
        };
        let mut parent = ExpirableTxnRecordBuilder::new();
        parent.hbar_adjustments(spread(1)).unwrap();
        let mut child = ExpirableTxnRecordBuilder::new();
        child.hbar_adjustments(spread(100)).unwrap();

        let before = parent.build();
        assert!(matches!(
            parent.exclude_hbar_changes_from(&child),
            Err(RecordError::Adjustment(_))
        ));
        assert_eq!(parent.build(), before);
    }

    #[test]
    fn sized_sections_are_held_to_decode_bounds() {
        let mut builder = ExpirableTxnRecordBuilder::new();
        assert_eq!(
            builder.memo("x".repeat(DEFAULT_MAX_MEMO_BYTES + 1)).err(),
            Some(RecordError::TooLong {
                what: "memo",
                len: DEFAULT_MAX_MEMO_BYTES + 1,
                max: DEFAULT_MAX_MEMO_BYTES,
            })
        );
        assert!(matches!(
            builder.alias(vec![0; DEFAULT_MAX_TXN_HASH_BYTES + 1]),
            Err(RecordError::TooLong { what: "alias", .. })
        ));
        assert!(matches!(
            builder.new_token_associations(vec![
                FcTokenAssociation::default();
                DEFAULT_MAX_TOKEN_ASSOCIATIONS + 1
            ]),
            Err(RecordError::TooLong { what: "token associations", .. })
        ));
        assert!(matches!(
            builder.tokens(vec![EntityId::from_num(1); DEFAULT_MAX_INVOLVED_TOKENS + 1]),
            Err(RecordError::TooLong { what: "tokens", .. })
        ));
        assert!(matches!(
            builder.assessed_custom_fees(vec![
                FcAssessedCustomFee::new(EntityId::from_num(8), None, 1);
                DEFAULT_MAX_ASSESSED_FEES + 1
            ]),
            Err(RecordError::TooLong { what: "assessed fees", .. })
        ));
        assert_eq!(builder.build(), ExpirableTxnRecord::default());

        builder
            .memo("x".repeat(DEFAULT_MAX_MEMO_BYTES))
            .and_then(|b| b.alias(vec![0; DEFAULT_MAX_TXN_HASH_BYTES]))
            .unwrap();
        assert_eq!(builder.peek().alias().len(), DEFAULT_MAX_TXN_HASH_BYTES);
    }

    #[test]
    fn negative_fee_rejected() {
        let mut builder = ExpirableTxnRecordBuilder::new();
        assert_eq!(
            builder.fee(-1).err(),
            Some(RecordError::Negative {
                what: "transaction fee",
                value: -1
            })
        );
        assert_eq!(builder.fee(0).map(|b| b.peek().fee()), Ok(0));
    }

    #[test]
    fn oversized_prng_bytes_rejected() {
        let mut builder = ExpirableTxnRecordBuilder::new();
        assert!(matches!(
            builder.pseudorandom_bytes(vec![0; 49]),
            Err(RecordError::PseudorandomTooLong { len: 49, max: 48 })
        ));
        assert!(builder.pseudorandom_bytes(vec![0; 48]).is_ok());
    }

    #[test]
    fn externalization_follows_status() {
        let mut builder = ExpirableTxnRecordBuilder::new();
        builder.only_externalize_if_successful();
        assert!(builder.should_not_be_externalized());
        builder.receipt(TxnReceipt::new(ResponseCode::InvalidTransaction));
        assert!(builder.should_not_be_externalized());
        builder.receipt(TxnReceipt::new(ResponseCode::Success));
        assert!(!builder.should_not_be_externalized());
    }
}
