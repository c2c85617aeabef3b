//! Net native-currency balance deltas.

use std::collections::BTreeMap;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
    DEFAULT_MAX_CURRENCY_ADJUSTMENTS,
};
use strand_types::EntityId;
use strand_wire::{AccountAmount, TransferList};

use crate::AdjustmentError;

/// Layout with account ids as a nested record list.
const RELEASE_WITH_ID_LIST: u32 = 1;
/// Packed columnar layout.
const RELEASE_WITH_PACKED_IDS: u32 = 2;

/// Parallel columns of accounts and signed amounts.
///
/// Value conservation (amounts summing to zero) is a business rule of the
/// code building these lists; [`is_balanced`](Self::is_balanced) reports it
/// but nothing here enforces it.
///
/// Constructors reject more than [`DEFAULT_MAX_CURRENCY_ADJUSTMENTS`] entries,
/// so every value built in memory decodes under the default limits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CurrencyAdjustments {
    accounts: Vec<EntityId>,
    amounts: Vec<i64>,
}

impl CurrencyAdjustments {
    pub fn new(accounts: Vec<EntityId>, amounts: Vec<i64>) -> Result<Self, AdjustmentError> {
        Self::with_max(accounts, amounts, DEFAULT_MAX_CURRENCY_ADJUSTMENTS)
    }

    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (EntityId, i64)>,
    ) -> Result<Self, AdjustmentError> {
        let (accounts, amounts) = pairs.into_iter().unzip();
        Self::new(accounts, amounts)
    }

    fn with_max(
        accounts: Vec<EntityId>,
        amounts: Vec<i64>,
        max: usize,
    ) -> Result<Self, AdjustmentError> {
        if accounts.len() != amounts.len() {
            return Err(AdjustmentError::ColumnLengthMismatch {
                column: "amounts",
                expected: accounts.len(),
                found: amounts.len(),
            });
        }
        if accounts.len() > max {
            return Err(AdjustmentError::TooManyAdjustments { max });
        }
        Ok(Self { accounts, amounts })
    }

    /// Columns already bounded by a decoder's configured limit.
    pub(crate) fn from_decoded(
        accounts: Vec<EntityId>,
        amounts: Vec<i64>,
    ) -> Result<Self, AdjustmentError> {
        Self::with_max(accounts, amounts, usize::MAX)
    }

    pub fn accounts(&self) -> &[EntityId] {
        &self.accounts
    }

    pub fn amounts(&self) -> &[i64] {
        &self.amounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, i64)> + '_ {
        self.accounts.iter().copied().zip(self.amounts.iter().copied())
    }

    /// Sum of all amounts, widened so it cannot overflow.
    pub fn net_sum(&self) -> i128 {
        self.amounts.iter().map(|a| i128::from(*a)).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.net_sum() == 0
    }

    /// Per-account difference `self - other`, ordered by account, zeros dropped.
    ///
    /// Used to exclude a child transaction's changes from its parent's. Fails
    /// when the two lists touch more distinct accounts than one list may hold.
    pub fn net_of(&self, other: &CurrencyAdjustments) -> Result<Self, AdjustmentError> {
        let mut net: BTreeMap<EntityId, i64> = BTreeMap::new();
        for (account, amount) in self.iter() {
            let entry = net.entry(account).or_default();
            *entry = entry.saturating_add(amount);
        }
        for (account, amount) in other.iter() {
            let entry = net.entry(account).or_default();
            *entry = entry.saturating_sub(amount);
        }
        Self::from_pairs(net.into_iter().filter(|(_, amount)| *amount != 0))
    }

    pub fn to_account_amounts(&self) -> Vec<AccountAmount> {
        self.iter()
            .map(|(account, amount)| AccountAmount {
                account_id: Some(account.to_account_id()),
                amount,
                is_approval: false,
            })
            .collect()
    }

    pub fn from_account_amounts(entries: &[AccountAmount]) -> Result<Self, AdjustmentError> {
        let pairs = entries
            .iter()
            .map(|aa| -> Result<_, AdjustmentError> {
                Ok((EntityId::from_account_id(aa.account_id.as_ref())?, aa.amount))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_pairs(pairs)
    }

    pub fn to_wire(&self) -> TransferList {
        TransferList {
            account_amounts: self.to_account_amounts(),
        }
    }

    pub fn from_wire(list: &TransferList) -> Result<Self, AdjustmentError> {
        Self::from_account_amounts(&list.account_amounts)
    }
}

impl Versioned for CurrencyAdjustments {
    const CLASS_ID: u64 = 0xd8b0_6bd4_6e12_a466;
    const CURRENT_VERSION: u32 = RELEASE_WITH_PACKED_IDS;
}

impl SelfSerializable for CurrencyAdjustments {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_i32(self.len() as i32);
        for account in &self.accounts {
            out.write_i64(account.shard());
            out.write_i64(account.realm());
            out.write_i64(account.num());
        }
        for amount in &self.amounts {
            out.write_i64(*amount);
        }
    }
}

impl SelfDeserializable for CurrencyAdjustments {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError> {
        let max = input.limits().max_currency_adjustments;
        if version == RELEASE_WITH_ID_LIST {
            let accounts = input.read_required_list("adjustment accounts", max)?;
            let amounts = input.read_i64_array("adjustment amounts", max)?;
            return Self::from_decoded(accounts, amounts).map_err(CodecError::rejected);
        }

        let count = input.read_length("currency adjustments", max)?;
        let mut accounts = Vec::with_capacity(count.min(input.remaining() / 24));
        for _ in 0..count {
            accounts.push(EntityId::new(input.read_i64()?, input.read_i64()?, input.read_i64()?));
        }
        let mut amounts = Vec::with_capacity(count.min(input.remaining() / 8));
        for _ in 0..count {
            amounts.push(input.read_i64()?);
        }
        Ok(Self { accounts, amounts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_codec::{decode, encode, DecodeLimits};

    fn sample() -> CurrencyAdjustments {
        CurrencyAdjustments::from_pairs([
            (EntityId::from_num(2), -300),
            (EntityId::from_num(98), 200),
            (EntityId::from_num(800), 100),
        ])
        .unwrap()
    }

    fn spread(count: i64) -> Vec<(EntityId, i64)> {
        (1..=count).map(|n| (EntityId::from_num(n), n)).collect()
    }

    #[test]
    fn columns_must_match() {
        let err = CurrencyAdjustments::new(vec![EntityId::from_num(2)], vec![1, 2]).unwrap_err();
        assert_eq!(
            err,
            AdjustmentError::ColumnLengthMismatch {
                column: "amounts",
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn balance_is_reported_not_enforced() {
        assert!(sample().is_balanced());
        let lopsided = CurrencyAdjustments::from_pairs([(EntityId::from_num(2), 5)]).unwrap();
        assert_eq!(lopsided.net_sum(), 5);
        assert!(!lopsided.is_balanced());
        let limits = DecodeLimits::default();
        assert_eq!(decode::<CurrencyAdjustments>(&encode(&lopsided), &limits).unwrap(), lopsided);
    }

    #[test]
    fn net_of_subtracts_per_account() {
        let child = CurrencyAdjustments::from_pairs([
            (EntityId::from_num(2), -100),
            (EntityId::from_num(800), 100),
        ])
        .unwrap();
        let net = sample().net_of(&child).unwrap();
        assert_eq!(
            net,
            CurrencyAdjustments::from_pairs([
                (EntityId::from_num(2), -200),
                (EntityId::from_num(98), 200),
            ])
            .unwrap()
        );
    }

    #[test]
    fn construction_is_bounded_like_decoding() {
        let limits = DecodeLimits::default();
        let full = CurrencyAdjustments::from_pairs(spread(25)).unwrap();
        assert_eq!(decode::<CurrencyAdjustments>(&encode(&full), &limits).unwrap(), full);

        assert_eq!(
            CurrencyAdjustments::from_pairs(spread(26)),
            Err(AdjustmentError::TooManyAdjustments { max: 25 })
        );
        let (accounts, amounts): (Vec<_>, Vec<_>) = spread(26).into_iter().unzip();
        assert_eq!(
            CurrencyAdjustments::new(accounts, amounts),
            Err(AdjustmentError::TooManyAdjustments { max: 25 })
        );
    }

    #[test]
    fn netting_disjoint_full_lists_overflows() {
        let ours = CurrencyAdjustments::from_pairs(spread(25)).unwrap();
        let theirs = CurrencyAdjustments::from_pairs(
            (100..125).map(|n| (EntityId::from_num(n), 1)),
        )
        .unwrap();
        assert_eq!(
            ours.net_of(&theirs),
            Err(AdjustmentError::TooManyAdjustments { max: 25 })
        );
    }

    #[test]
    fn current_layout_roundtrip() {
        let limits = DecodeLimits::default();
        let value = sample();
        let bytes = encode(&value);
        assert_eq!(bytes.len(), 12 + 4 + 3 * 24 + 3 * 8);
        assert_eq!(decode::<CurrencyAdjustments>(&bytes, &limits).unwrap(), value);
    }

    #[test]
    fn id_list_layout_still_decodes() {
        let limits = DecodeLimits::default();
        let value = sample();
        let mut out = DataWriter::new();
        out.write_u64(CurrencyAdjustments::CLASS_ID);
        out.write_i32(1);
        out.write_serializable_list(Some(value.accounts()));
        out.write_i64_array(value.amounts());
        let bytes = out.into_bytes();
        assert_eq!(decode::<CurrencyAdjustments>(&bytes, &limits).unwrap(), value);
    }

    #[test]
    fn oversized_count_rejected_before_allocation() {
        let limits = DecodeLimits::default();
        let mut out = DataWriter::new();
        out.write_u64(CurrencyAdjustments::CLASS_ID);
        out.write_i32(CurrencyAdjustments::CURRENT_VERSION as i32);
        out.write_i32(i32::MAX);
        let bytes = out.into_bytes();
        assert_eq!(
            decode::<CurrencyAdjustments>(&bytes, &limits).unwrap_err(),
            CodecError::LengthExceeded {
                what: "currency adjustments",
                len: i32::MAX as usize,
                max: 25
            }
        );
    }

    #[test]
    fn configured_bound_applies() {
        let limits = DecodeLimits {
            max_currency_adjustments: 2,
            ..DecodeLimits::default()
        };
        assert!(matches!(
            decode::<CurrencyAdjustments>(&encode(&sample()), &limits),
            Err(CodecError::LengthExceeded { len: 3, max: 2, .. })
        ));
    }

    #[test]
    fn wire_roundtrip_and_missing_account() {
        let value = sample();
        assert_eq!(CurrencyAdjustments::from_wire(&value.to_wire()).unwrap(), value);

        let list = TransferList {
            account_amounts: vec![AccountAmount {
                account_id: None,
                amount: 1,
                is_approval: false,
            }],
        };
        assert!(matches!(
            CurrencyAdjustments::from_wire(&list),
            Err(AdjustmentError::Id(_))
        ));

        let oversized = TransferList {
            account_amounts: CurrencyAdjustments::from_pairs(spread(13))
                .unwrap()
                .to_account_amounts()
                .into_iter()
                .cycle()
                .take(26)
                .collect(),
        };
        assert_eq!(
            CurrencyAdjustments::from_wire(&oversized),
            Err(AdjustmentError::TooManyAdjustments { max: 25 })
        );
    }
}
