use proptest::prelude::*;

use strand_adjustments::{CurrencyAdjustments, NftAdjustments};
use strand_codec::{
    decode, encode, DecodeLimits, DEFAULT_MAX_ASSESSED_FEES, DEFAULT_MAX_CURRENCY_ADJUSTMENTS,
    DEFAULT_MAX_EFFECTIVE_PAYERS, DEFAULT_MAX_INVOLVED_TOKENS, DEFAULT_MAX_MEMO_BYTES,
    DEFAULT_MAX_NFT_ADJUSTMENTS, DEFAULT_MAX_SERIAL_NUMBERS, DEFAULT_MAX_TOKEN_ASSOCIATIONS,
    DEFAULT_MAX_TXN_HASH_BYTES,
};
use strand_evm::{EvmFnResult, EvmLog, MAX_BLOOM_BYTES, MAX_TOPICS, MAX_TOPIC_BYTES};
use strand_fees::FcAssessedCustomFee;
use strand_records::{
    ExpirableTxnRecord, ExpirableTxnRecordBuilder, RecordError, RecordHistory, StateRecord,
    TxnReceipt, TypeRegistry, MAX_PSEUDORANDOM_BYTES, MAX_RUNNING_HASH_BYTES,
};
use strand_types::{EntityId, FcTokenAssociation, RichInstant, TxnId};
use strand_wire::ResponseCode;

fn entity_id() -> impl Strategy<Value = EntityId> {
    (0i64..100_000).prop_map(EntityId::from_num)
}

fn record() -> impl Strategy<Value = ExpirableTxnRecord> {
    (
        0..=i64::MAX,
        prop::option::of("[ -~]{0,40}"),
        prop::collection::vec(any::<u8>(), 0..48),
        prop::option::of(prop::collection::vec((entity_id(), any::<i64>()), 0..=25)),
        prop::option::of(entity_id()),
        prop::option::of(any::<i32>()),
        any::<bool>(),
    )
        .prop_map(|(fee, memo, hash, adjustments, schedule, prng, success)| {
            let mut builder = ExpirableTxnRecord::builder();
            let status = if success { ResponseCode::Success } else { ResponseCode::InvalidTransaction };
            builder
                .receipt(TxnReceipt::new(status))
                .txn_id(TxnId::new(EntityId::from_num(2), RichInstant::new(fee / 2, 0)));
            builder.fee(fee).and_then(|b| b.txn_hash(hash)).unwrap();
            if let Some(memo) = memo {
                builder.memo(memo).unwrap();
            }
            if let Some(pairs) = adjustments {
                builder
                    .hbar_adjustments(CurrencyAdjustments::from_pairs(pairs).unwrap())
                    .unwrap();
            }
            if let Some(schedule) = schedule {
                builder.schedule_ref(schedule);
            }
            if let Some(n) = prng {
                builder.pseudorandom_number(n);
            }
            builder.build()
        })
}

fn spread(first: i64, count: usize) -> CurrencyAdjustments {
    CurrencyAdjustments::from_pairs(
        (first..).take(count).map(|n| (EntityId::from_num(n), if n == first { -1 } else { 1 })),
    )
    .unwrap()
}

fn ids(first: i64, count: usize) -> Vec<EntityId> {
    (first..).take(count).map(EntityId::from_num).collect()
}

fn largest_evm_result(error: Option<&str>) -> EvmFnResult {
    let log = EvmLog::new(
        Some(EntityId::from_num(1001)),
        vec![0xb1; MAX_BLOOM_BYTES],
        vec![vec![0x70; MAX_TOPIC_BYTES]; MAX_TOPICS],
        vec![0xda; 512],
    )
    .unwrap();
    let base = match error {
        Some(error) => EvmFnResult::failure(Some(EntityId::from_num(1001)), error, 90_000),
        None => EvmFnResult::success(Some(EntityId::from_num(1001)), vec![0xce; 1024], 90_000),
    };
    base.and_then(|r| r.with_bloom(vec![0xb0; MAX_BLOOM_BYTES]))
        .and_then(|r| r.with_logs(vec![log; 8]))
        .and_then(|r| r.with_created_contract_ids(ids(2_000, 8)))
        .and_then(|r| r.with_call_inputs(100_000, 5, vec![0xa9; 256]))
        .unwrap()
        .with_evm_address([0x11; 20])
        .with_sender_id(EntityId::from_num(2))
}

/// Every sized section filled to its construction bound.
fn largest_record() -> ExpirableTxnRecordBuilder {
    let receipt = TxnReceipt::new(ResponseCode::Success)
        .with_topic_running_hash(9, vec![0x3c; MAX_RUNNING_HASH_BYTES], 3)
        .and_then(|r| r.with_new_total_supply(1_000_000))
        .and_then(|r| r.with_serial_numbers((1..).take(DEFAULT_MAX_SERIAL_NUMBERS).collect()))
        .unwrap();
    let nfts = NftAdjustments::new(
        (1..).take(DEFAULT_MAX_NFT_ADJUSTMENTS).collect(),
        ids(10_000, DEFAULT_MAX_NFT_ADJUSTMENTS),
        ids(20_000, DEFAULT_MAX_NFT_ADJUSTMENTS),
    )
    .unwrap();
    let fees = (0..DEFAULT_MAX_ASSESSED_FEES as i64)
        .map(|n| {
            FcAssessedCustomFee::new(EntityId::from_num(500 + n), Some(EntityId::from_num(1002)), n)
                .with_effective_payers(ids(600, DEFAULT_MAX_EFFECTIVE_PAYERS))
                .unwrap()
        })
        .collect();
    let associations = (0..DEFAULT_MAX_TOKEN_ASSOCIATIONS as i64)
        .map(|n| FcTokenAssociation::new(EntityId::from_num(1002 + n), EntityId::from_num(4)))
        .collect();

    let mut builder = ExpirableTxnRecord::builder();
    builder
        .receipt(receipt)
        .txn_id(TxnId::new(EntityId::from_num(2), RichInstant::new(100, 1)))
        .consensus_time(RichInstant::new(105, 7))
        .contract_call_result(largest_evm_result(None))
        .contract_create_result(largest_evm_result(Some("CONTRACT_REVERT_EXECUTED")))
        .expiry(1_800)
        .submitting_member(3)
        .schedule_ref(EntityId::from_num(77))
        .num_child_records(i16::MAX)
        .parent_consensus_time(RichInstant::new(104, 0));
    builder
        .txn_hash(vec![0xaa; DEFAULT_MAX_TXN_HASH_BYTES])
        .and_then(|b| b.memo("m".repeat(DEFAULT_MAX_MEMO_BYTES)))
        .and_then(|b| b.fee(i64::MAX))
        .and_then(|b| b.hbar_adjustments(spread(1, DEFAULT_MAX_CURRENCY_ADJUSTMENTS)))
        .and_then(|b| b.tokens(ids(1_002, DEFAULT_MAX_INVOLVED_TOKENS)))
        .and_then(|b| {
            b.token_adjustments(
                (0..DEFAULT_MAX_INVOLVED_TOKENS as i64)
                    .map(|n| spread(100 * (n + 1), DEFAULT_MAX_CURRENCY_ADJUSTMENTS))
                    .collect(),
            )
        })
        .and_then(|b| b.nft_token_adjustments(vec![nfts; DEFAULT_MAX_INVOLVED_TOKENS]))
        .and_then(|b| b.assessed_custom_fees(fees))
        .and_then(|b| b.new_token_associations(associations))
        .and_then(|b| b.alias(vec![0x12; DEFAULT_MAX_TXN_HASH_BYTES]))
        .and_then(|b| b.ethereum_hash(vec![0xee; DEFAULT_MAX_TXN_HASH_BYTES]))
        .and_then(|b| b.staking_rewards_paid(spread(800, DEFAULT_MAX_CURRENCY_ADJUSTMENTS)))
        .and_then(|b| b.pseudorandom_bytes(vec![0x5a; MAX_PSEUDORANDOM_BYTES]))
        .unwrap();
    builder
}

#[test]
fn largest_buildable_record_decodes_under_default_limits() {
    let limits = DecodeLimits::default();
    let record = largest_record().build();
    let bytes = encode(&record);

    let decoded = decode::<ExpirableTxnRecord>(&bytes, &limits).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(decoded.hbar_adjustments().map(CurrencyAdjustments::len), Some(25));
    let log = &decoded.contract_call_result().unwrap().logs()[0];
    assert_eq!(log.bloom().len(), MAX_BLOOM_BYTES);
    assert_eq!(log.topics().len(), MAX_TOPICS);

    let registry = TypeRegistry::global().unwrap();
    assert_eq!(
        registry.decode_bytes(&bytes, &limits).unwrap(),
        StateRecord::ExpirableTxnRecord(record.clone())
    );

    let history = RecordHistory::from_records([record.clone(), record]).unwrap();
    assert_eq!(decode::<RecordHistory>(&encode(&history), &limits).unwrap(), history);
}

#[test]
fn one_past_each_bound_is_refused_at_construction() {
    let mut builder = largest_record();
    let before = builder.build();

    let extra = CurrencyAdjustments::from_pairs(
        ids(1, DEFAULT_MAX_CURRENCY_ADJUSTMENTS + 1).into_iter().map(|id| (id, 1)),
    );
    assert!(extra.is_err());
    assert!(matches!(
        builder.tokens(ids(1_002, DEFAULT_MAX_INVOLVED_TOKENS + 1)),
        Err(RecordError::TooLong { what: "tokens", .. })
    ));
    assert!(matches!(
        builder.memo("m".repeat(DEFAULT_MAX_MEMO_BYTES + 1)),
        Err(RecordError::TooLong { what: "memo", .. })
    ));
    assert!(matches!(
        builder.ethereum_hash(vec![0; DEFAULT_MAX_TXN_HASH_BYTES + 1]),
        Err(RecordError::TooLong { what: "ethereum hash", .. })
    ));
    assert!(matches!(
        builder.new_token_associations(vec![
            FcTokenAssociation::default();
            DEFAULT_MAX_TOKEN_ASSOCIATIONS + 1
        ]),
        Err(RecordError::TooLong { what: "token associations", .. })
    ));
    assert!(EvmFnResult::default()
        .with_bloom(vec![0; MAX_BLOOM_BYTES + 1])
        .is_err());
    assert_eq!(builder.build(), before);
}

proptest! {
    #[test]
    fn record_roundtrip(value in record()) {
        let limits = DecodeLimits::default();
        prop_assert_eq!(decode::<ExpirableTxnRecord>(&encode(&value), &limits).unwrap(), value);
    }

    #[test]
    fn registry_agrees_with_direct_decode(value in record()) {
        let limits = DecodeLimits::default();
        let registry = TypeRegistry::global().unwrap();
        let bytes = encode(&value);
        let decoded = registry.decode_bytes(&bytes, &limits).unwrap();
        prop_assert_eq!(decoded.encode(), Some(bytes));
        prop_assert_eq!(decoded, StateRecord::ExpirableTxnRecord(value));
    }

    #[test]
    fn schedule_ref_presence_survives_wire(value in record()) {
        let wire = value.as_wire();
        prop_assert_eq!(wire.schedule_ref.is_some(), value.schedule_ref().is_some());
        prop_assert_eq!(wire.transfer_list.is_some(), value.hbar_adjustments().is_some());
    }

    #[test]
    fn history_push_pop_restores_hash(
        base in prop::collection::vec(record(), 0..6),
        extra in record(),
    ) {
        let mut history = RecordHistory::from_records(base.iter().cloned()).unwrap();
        let before = history.running_hash();
        let mut shifted = RecordHistory::from_records(base.iter().skip(1).cloned()).unwrap();
        shifted.push(extra.clone()).unwrap();
        history.push(extra).unwrap();
        if !base.is_empty() {
            history.pop_front();
            prop_assert_eq!(history.running_hash(), shifted.running_hash());
        } else {
            prop_assert_ne!(history.running_hash(), before);
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let limits = DecodeLimits::default();
        let registry = TypeRegistry::global().unwrap();
        let _ = registry.decode_bytes(&bytes, &limits);
        let _ = decode::<ExpirableTxnRecord>(&bytes, &limits);
    }
}
