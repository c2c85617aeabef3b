//! Non-fungible token ownership changes.

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_types::EntityId;
use strand_wire::NftTransfer;

use crate::AdjustmentError;

/// Most entries one list may hold; also the capacity of a default builder.
pub use strand_codec::DEFAULT_MAX_NFT_ADJUSTMENTS;

/// Parallel columns of `(serial number, sender, receiver)`.
///
/// Immutable once built; appending goes through [`NftAdjustmentsBuilder`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NftAdjustments {
    serial_nums: Vec<i64>,
    senders: Vec<EntityId>,
    receivers: Vec<EntityId>,
}

impl NftAdjustments {
    pub fn new(
        serial_nums: Vec<i64>,
        senders: Vec<EntityId>,
        receivers: Vec<EntityId>,
    ) -> Result<Self, AdjustmentError> {
        if serial_nums.len() > DEFAULT_MAX_NFT_ADJUSTMENTS {
            return Err(AdjustmentError::TooManyAdjustments {
                max: DEFAULT_MAX_NFT_ADJUSTMENTS,
            });
        }
        Self::from_columns(serial_nums, senders, receivers)
    }

    fn from_columns(
        serial_nums: Vec<i64>,
        senders: Vec<EntityId>,
        receivers: Vec<EntityId>,
    ) -> Result<Self, AdjustmentError> {
        for (column, found) in [("senders", senders.len()), ("receivers", receivers.len())] {
            if found != serial_nums.len() {
                return Err(AdjustmentError::ColumnLengthMismatch {
                    column,
                    expected: serial_nums.len(),
                    found,
                });
            }
        }
        Ok(Self {
            serial_nums,
            senders,
            receivers,
        })
    }

    pub fn serial_nums(&self) -> &[i64] {
        &self.serial_nums
    }

    pub fn senders(&self) -> &[EntityId] {
        &self.senders
    }

    pub fn receivers(&self) -> &[EntityId] {
        &self.receivers
    }

    pub fn len(&self) -> usize {
        self.serial_nums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serial_nums.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, EntityId, EntityId)> + '_ {
        self.serial_nums
            .iter()
            .zip(&self.senders)
            .zip(&self.receivers)
            .map(|((serial, sender), receiver)| (*serial, *sender, *receiver))
    }

    /// A builder seeded with a copy of these entries.
    pub fn to_builder(&self) -> NftAdjustmentsBuilder {
        NftAdjustmentsBuilder {
            inner: self.clone(),
            max: DEFAULT_MAX_NFT_ADJUSTMENTS,
        }
    }

    pub fn to_nft_transfers(&self) -> Vec<NftTransfer> {
        self.iter()
            .map(|(serial_number, sender, receiver)| NftTransfer {
                sender_account_id: Some(sender.to_account_id()),
                receiver_account_id: Some(receiver.to_account_id()),
                serial_number,
                is_approval: false,
            })
            .collect()
    }

    pub fn from_nft_transfers(transfers: &[NftTransfer]) -> Result<Self, AdjustmentError> {
        if transfers.len() > DEFAULT_MAX_NFT_ADJUSTMENTS {
            return Err(AdjustmentError::TooManyAdjustments {
                max: DEFAULT_MAX_NFT_ADJUSTMENTS,
            });
        }
        let mut out = Self {
            serial_nums: Vec::with_capacity(transfers.len()),
            senders: Vec::with_capacity(transfers.len()),
            receivers: Vec::with_capacity(transfers.len()),
        };
        for transfer in transfers {
            out.serial_nums.push(transfer.serial_number);
            out.senders
                .push(EntityId::from_account_id(transfer.sender_account_id.as_ref())?);
            out.receivers
                .push(EntityId::from_account_id(transfer.receiver_account_id.as_ref())?);
        }
        Ok(out)
    }
}

impl Versioned for NftAdjustments {
    const CLASS_ID: u64 = 0xd7a0_2bf4_5e10_3466;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for NftAdjustments {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_i64_array(&self.serial_nums);
        out.write_serializable_list(Some(self.senders.as_slice()));
        out.write_serializable_list(Some(self.receivers.as_slice()));
    }
}

impl SelfDeserializable for NftAdjustments {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        let max = input.limits().max_nft_adjustments;
        let serial_nums = input.read_i64_array("nft serial numbers", max)?;
        let senders = input.read_required_list("nft senders", max)?;
        let receivers = input.read_required_list("nft receivers", max)?;
        Self::from_columns(serial_nums, senders, receivers).map_err(CodecError::rejected)
    }
}

/// Accumulates ownership changes up to a fixed capacity.
#[derive(Clone, Debug)]
pub struct NftAdjustmentsBuilder {
    inner: NftAdjustments,
    max: usize,
}

impl Default for NftAdjustmentsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NftAdjustmentsBuilder {
    pub fn new() -> Self {
        Self::with_max(DEFAULT_MAX_NFT_ADJUSTMENTS)
    }

    /// A builder holding at most `max` entries, never more than
    /// [`DEFAULT_MAX_NFT_ADJUSTMENTS`].
    pub fn with_max(max: usize) -> Self {
        Self {
            inner: NftAdjustments::default(),
            max: max.min(DEFAULT_MAX_NFT_ADJUSTMENTS),
        }
    }

    pub fn append(
        &mut self,
        serial_num: i64,
        sender: EntityId,
        receiver: EntityId,
    ) -> Result<(), AdjustmentError> {
        if self.inner.len() >= self.max {
            return Err(AdjustmentError::TooManyAdjustments { max: self.max });
        }
        self.inner.serial_nums.push(serial_num);
        self.inner.senders.push(sender);
        self.inner.receivers.push(receiver);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn build(self) -> NftAdjustments {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_codec::{decode, encode, DecodeLimits};

    fn sample() -> NftAdjustments {
        let mut builder = NftAdjustmentsBuilder::new();
        builder
            .append(1, EntityId::from_num(0), EntityId::from_num(1001))
            .unwrap();
        builder
            .append(2, EntityId::from_num(1001), EntityId::from_num(1002))
            .unwrap();
        builder.build()
    }

    #[test]
    fn builder_preserves_order() {
        let nfts = sample();
        let entries: Vec<_> = nfts.iter().collect();
        assert_eq!(
            entries,
            vec![
                (1, EntityId::from_num(0), EntityId::from_num(1001)),
                (2, EntityId::from_num(1001), EntityId::from_num(1002)),
            ]
        );
    }

    #[test]
    fn builder_is_bounded() {
        let mut builder = NftAdjustmentsBuilder::with_max(1);
        builder.append(1, EntityId::from_num(1), EntityId::from_num(2)).unwrap();
        assert_eq!(
            builder.append(2, EntityId::from_num(1), EntityId::from_num(2)),
            Err(AdjustmentError::TooManyAdjustments { max: 1 })
        );
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn appending_to_a_copy_leaves_original_untouched() {
        let original = sample();
        let mut builder = original.to_builder();
        builder.append(3, EntityId::from_num(5), EntityId::from_num(6)).unwrap();
        assert_eq!(builder.build().len(), 3);
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn mismatched_columns_rejected() {
        let err = NftAdjustments::new(vec![1, 2], vec![EntityId::from_num(1)], vec![]).unwrap_err();
        assert!(matches!(
            err,
            AdjustmentError::ColumnLengthMismatch { column: "senders", expected: 2, found: 1 }
        ));
    }

    #[test]
    fn binary_roundtrip() {
        let limits = DecodeLimits::default();
        let nfts = sample();
        assert_eq!(decode::<NftAdjustments>(&encode(&nfts), &limits).unwrap(), nfts);
        let empty = NftAdjustments::default();
        assert_eq!(decode::<NftAdjustments>(&encode(&empty), &limits).unwrap(), empty);
    }

    #[test]
    fn mismatched_columns_in_bytes_rejected() {
        let limits = DecodeLimits::default();
        let mut out = DataWriter::new();
        out.write_u64(NftAdjustments::CLASS_ID);
        out.write_i32(1);
        out.write_i64_array(&[1, 2]);
        out.write_serializable_list(Some(&[EntityId::from_num(1)][..]));
        out.write_serializable_list(Some(&[EntityId::from_num(2)][..]));
        assert!(matches!(
            decode::<NftAdjustments>(&out.into_bytes(), &limits),
            Err(CodecError::Rejected { .. })
        ));
    }

    #[test]
    fn wire_roundtrip() {
        let nfts = sample();
        let transfers = nfts.to_nft_transfers();
        assert_eq!(transfers[1].serial_number, 2);
        assert_eq!(NftAdjustments::from_nft_transfers(&transfers).unwrap(), nfts);

        let mut broken = transfers;
        broken[0].receiver_account_id = None;
        assert_eq!(
            NftAdjustments::from_nft_transfers(&broken),
            Err(AdjustmentError::Id(strand_types::IdError::ArgumentRequired("account id")))
        );
    }

    #[test]
    fn capacity_never_exceeds_the_decode_bound() {
        let mut builder = NftAdjustmentsBuilder::with_max(usize::MAX);
        for serial in 0..DEFAULT_MAX_NFT_ADJUSTMENTS as i64 {
            builder.append(serial, EntityId::from_num(1), EntityId::from_num(2)).unwrap();
        }
        assert_eq!(
            builder.append(-1, EntityId::from_num(1), EntityId::from_num(2)),
            Err(AdjustmentError::TooManyAdjustments { max: DEFAULT_MAX_NFT_ADJUSTMENTS })
        );
        let full = builder.build();
        let limits = DecodeLimits::default();
        assert_eq!(decode::<NftAdjustments>(&encode(&full), &limits).unwrap(), full);

        let mut copy = full.to_builder();
        assert!(copy.append(-1, EntityId::from_num(1), EntityId::from_num(2)).is_err());

        let serials = vec![0i64; DEFAULT_MAX_NFT_ADJUSTMENTS + 1];
        let ids = vec![EntityId::from_num(1); DEFAULT_MAX_NFT_ADJUSTMENTS + 1];
        assert_eq!(
            NftAdjustments::new(serials, ids.clone(), ids),
            Err(AdjustmentError::TooManyAdjustments { max: DEFAULT_MAX_NFT_ADJUSTMENTS })
        );
    }
}
