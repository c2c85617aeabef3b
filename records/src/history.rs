//! Ordered, hash-bearing queue of transaction records.
//!
//! Each record contributes the Blake2b-256 digest of its tagged bytes. The
//! running hash treats the digest as four big-endian `u64` lanes and keeps,
//! per lane, the polynomial `Σ hᵢ·3^(n-1-i)` in wrapping arithmetic. Pushing
//! multiplies by three and adds; popping the head subtracts its term, so
//! removal is exact without rehashing the remaining records.

use std::collections::VecDeque;

use strand_codec::{
    encode, CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
    DEFAULT_MAX_HISTORY_RECORDS,
};
use tracing::trace;

use crate::hash::{blake2b_256, HASH_LEN};
use crate::{ExpirableTxnRecord, RecordError};

const LANES: usize = HASH_LEN / 8;
const MULTIPLIER: u64 = 3;

type Lanes = [u64; LANES];

fn lanes_of(digest: &[u8; HASH_LEN]) -> Lanes {
    let mut lanes = [0u64; LANES];
    for (lane, chunk) in lanes.iter_mut().zip(digest.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane = u64::from_be_bytes(word);
    }
    lanes
}

/// Digest of one record's canonical tagged encoding.
pub fn record_hash(record: &ExpirableTxnRecord) -> [u8; HASH_LEN] {
    blake2b_256(&encode(record))
}

#[derive(Clone, Debug, Default)]
pub struct RecordHistory {
    records: VecDeque<ExpirableTxnRecord>,
    hashes: VecDeque<Lanes>,
    running: Lanes,
}

impl RecordHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect records in arrival order, failing past the default history bound.
    pub fn from_records(
        records: impl IntoIterator<Item = ExpirableTxnRecord>,
    ) -> Result<Self, RecordError> {
        let mut history = Self::new();
        for record in records {
            history.push(record)?;
        }
        Ok(history)
    }

    /// Append a record, keeping the history readable under the default limits.
    pub fn push(&mut self, record: ExpirableTxnRecord) -> Result<(), RecordError> {
        self.push_within(record, DEFAULT_MAX_HISTORY_RECORDS)
    }

    fn push_within(&mut self, record: ExpirableTxnRecord, max: usize) -> Result<(), RecordError> {
        if self.records.len() >= max {
            return Err(RecordError::TooLong {
                what: "history records",
                len: self.records.len() + 1,
                max,
            });
        }
        self.append(record);
        Ok(())
    }

    fn append(&mut self, record: ExpirableTxnRecord) {
        let lanes = lanes_of(&record_hash(&record));
        for (acc, h) in self.running.iter_mut().zip(lanes) {
            *acc = acc.wrapping_mul(MULTIPLIER).wrapping_add(h);
        }
        self.hashes.push_back(lanes);
        self.records.push_back(record);
        trace!(len = self.records.len(), "pushed record onto history");
    }

    pub fn pop_front(&mut self) -> Option<ExpirableTxnRecord> {
        let lanes = self.hashes.pop_front()?;
        let record = self.records.pop_front()?;
        // The head's term carries 3^(n-1) with n the length before popping.
        let weight = MULTIPLIER.wrapping_pow(self.records.len() as u32);
        for (acc, h) in self.running.iter_mut().zip(lanes) {
            *acc = acc.wrapping_sub(h.wrapping_mul(weight));
        }
        trace!(len = self.records.len(), "popped record from history");
        Some(record)
    }

    pub fn front(&self) -> Option<&ExpirableTxnRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ExpirableTxnRecord> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn running_hash(&self) -> [u8; HASH_LEN] {
        let mut out = [0u8; HASH_LEN];
        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.running) {
            chunk.copy_from_slice(&lane.to_be_bytes());
        }
        out
    }
}

impl PartialEq for RecordHistory {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for RecordHistory {}

impl Versioned for RecordHistory {
    const CLASS_ID: u64 = 0x139f_37e6_c1f2_d0a4;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for RecordHistory {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_serializable_seq(self.records.iter());
    }
}

impl SelfDeserializable for RecordHistory {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        let max = input.limits().max_history_records;
        let records: Vec<ExpirableTxnRecord> = input.read_required_list("history records", max)?;
        let mut history = Self::new();
        for record in records {
            history.append(record);
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_codec::{decode, DecodeLimits};
    use strand_types::{EntityId, RichInstant, TxnId};

    fn record(n: i64) -> ExpirableTxnRecord {
        let mut builder = ExpirableTxnRecord::builder();
        builder
            .txn_id(TxnId::new(EntityId::from_num(2), RichInstant::new(n, 0)))
            .consensus_time(RichInstant::new(n, 1))
            .fee(n)
            .unwrap();
        builder.build()
    }

    fn history(records: impl IntoIterator<Item = i64>) -> RecordHistory {
        RecordHistory::from_records(records.into_iter().map(record)).unwrap()
    }

    #[test]
    fn empty_history_has_zero_hash() {
        assert_eq!(RecordHistory::new().running_hash(), [0u8; HASH_LEN]);
    }

    #[test]
    fn push_then_pop_restores_hash() {
        let mut history = history(1..=3);
        let before = history.running_hash();
        history.push(record(4)).unwrap();
        assert_ne!(history.running_hash(), before);

        let mut expected = self::history(2..=4);
        assert_eq!(history.pop_front(), Some(record(1)));
        assert_eq!(history.running_hash(), expected.running_hash());

        while expected.pop_front().is_some() {}
        assert_eq!(expected.running_hash(), [0u8; HASH_LEN]);
    }

    #[test]
    fn hash_is_order_sensitive() {
        let forward = history([1, 2]);
        let backward = history([2, 1]);
        assert_ne!(forward.running_hash(), backward.running_hash());
    }

    #[test]
    fn front_and_iter_follow_fifo_order() {
        let history = history(1..=3);
        assert_eq!(history.front(), Some(&record(1)));
        let fees: Vec<i64> = history.iter().map(ExpirableTxnRecord::fee).collect();
        assert_eq!(fees, vec![1, 2, 3]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn binary_roundtrip_restores_hash() {
        let limits = DecodeLimits::default();
        let history = history(1..=5);
        let decoded = decode::<RecordHistory>(&encode(&history), &limits).unwrap();
        assert_eq!(decoded, history);
        assert_eq!(decoded.running_hash(), history.running_hash());
    }

    #[test]
    fn push_stops_at_the_bound() {
        let mut full = history(1..=2);
        let hash = full.running_hash();
        assert_eq!(
            full.push_within(record(3), 2),
            Err(RecordError::TooLong {
                what: "history records",
                len: 3,
                max: 2,
            })
        );
        assert_eq!(full.len(), 2);
        assert_eq!(full.running_hash(), hash);
        full.pop_front();
        assert!(full.push_within(record(3), 2).is_ok());
        assert_eq!(full, history(2..=3));
    }

    #[test]
    fn history_length_is_bounded() {
        let limits = DecodeLimits {
            max_history_records: 2,
            ..DecodeLimits::default()
        };
        let history = history(1..=3);
        assert!(matches!(
            decode::<RecordHistory>(&encode(&history), &limits),
            Err(CodecError::LengthExceeded { what: "history records", len: 3, max: 2 })
        ));
    }
}
