use proptest::prelude::*;

use strand_codec::{decode, encode, DecodeLimits};
use strand_fees::{
    FcAssessedCustomFee, FcCustomFee, FeeError, FeeSpec, FixedFeeSpec, FractionalFeeSpec,
    RoyaltyFeeSpec,
};
use strand_types::EntityId;

fn entity_id() -> impl Strategy<Value = EntityId> {
    (0i64..4, 0i64..4, 0i64..100_000).prop_map(|(s, r, n)| EntityId::new(s, r, n))
}

fn fixed_spec() -> impl Strategy<Value = FixedFeeSpec> {
    (1i64..i64::MAX, prop::option::of(entity_id()))
        .prop_map(|(units, denom)| FixedFeeSpec::new(units, denom).unwrap())
}

fn fractional_spec() -> impl Strategy<Value = FractionalFeeSpec> {
    (0i64..1_000, 1i64..1_000, 0i64..1_000, 0i64..1_000, any::<bool>())
        .prop_map(|(n, d, min, extra, net)| FractionalFeeSpec::new(n, d, min, min + extra, net).unwrap())
}

fn royalty_spec() -> impl Strategy<Value = RoyaltyFeeSpec> {
    (1i64..1_000, 0i64..1_000, prop::option::of(fixed_spec()))
        .prop_map(|(d, n, fallback)| RoyaltyFeeSpec::new(n.min(d), d, fallback).unwrap())
}

fn custom_fee() -> impl Strategy<Value = FcCustomFee> {
    (
        prop_oneof![
            fixed_spec().prop_map(FeeSpec::Fixed),
            fractional_spec().prop_map(FeeSpec::Fractional),
            royalty_spec().prop_map(FeeSpec::Royalty),
        ],
        entity_id(),
        any::<bool>(),
    )
        .prop_map(|(spec, collector, exempt)| {
            FcCustomFee::new(spec, Some(collector))
                .unwrap()
                .with_all_collectors_exempt(exempt)
        })
}

proptest! {
    /// Custom fees roundtrip through both the binary and the wire form.
    #[test]
    fn custom_fee_roundtrip(fee in custom_fee()) {
        let decoded: FcCustomFee = decode(&encode(&fee), &DecodeLimits::default()).unwrap();
        prop_assert_eq!(decoded, fee);
        prop_assert_eq!(FcCustomFee::from_wire(&fee.to_wire()).unwrap(), fee);
    }

    /// Fractional specs reject every negative input.
    #[test]
    fn fractional_rejects_negatives(n in i64::MIN..0, d in 1i64..100) {
        prop_assert!(FractionalFeeSpec::new(n, d, 0, 10, false).unwrap_err().is_invalid_range());
        prop_assert!(FractionalFeeSpec::new(d, d, n, 10, false).unwrap_err().is_invalid_range());
    }

    /// A maximum below the minimum is always rejected.
    #[test]
    fn fractional_rejects_inverted_bounds(min in 1i64..1_000_000, gap in 1i64..1_000) {
        let max = min - gap;
        prop_assert!(FractionalFeeSpec::new(1, 2, min, max, false).is_err());
    }

    /// Zero denominators are rejected regardless of the other inputs.
    #[test]
    fn zero_denominator_always_rejected(n in 0i64..1_000, min in 0i64..10, max in 10i64..100) {
        prop_assert_eq!(
            FractionalFeeSpec::new(n, 0, min, max, false),
            Err(FeeError::DivisionByZero)
        );
        prop_assert_eq!(RoyaltyFeeSpec::new(n, 0, None), Err(FeeError::DivisionByZero));
    }

    /// Assessed fees roundtrip, and the native-currency flag tracks the token.
    #[test]
    fn assessed_fee_roundtrip(
        account in entity_id(),
        token in prop::option::of(entity_id()),
        units in any::<i64>(),
        payers in prop::collection::vec(entity_id(), 0..5),
    ) {
        let fee = FcAssessedCustomFee::new(account, token, units).with_effective_payers(payers).unwrap();
        prop_assert_eq!(fee.is_for_hbar(), token.is_none());
        prop_assert_eq!(fee.to_wire().token_id.is_none(), token.is_none());
        let decoded: FcAssessedCustomFee = decode(&encode(&fee), &DecodeLimits::default()).unwrap();
        prop_assert_eq!(decoded, fee);
    }
}
