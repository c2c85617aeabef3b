use proptest::prelude::*;

use strand_codec::{decode, encode, DecodeLimits};
use strand_types::{EntityId, FcTokenAssociation, RichInstant, TxnId};

fn entity_id() -> impl Strategy<Value = EntityId> {
    (any::<i64>(), any::<i64>(), any::<i64>()).prop_map(|(s, r, n)| EntityId::new(s, r, n))
}

fn instant() -> impl Strategy<Value = RichInstant> {
    (any::<i64>(), 0i32..1_000_000_000).prop_map(|(s, n)| RichInstant::new(s, n))
}

proptest! {
    /// EntityId binary roundtrip.
    #[test]
    fn entity_id_roundtrip(id in entity_id()) {
        let decoded: EntityId = decode(&encode(&id), &DecodeLimits::default()).unwrap();
        prop_assert_eq!(decoded, id);
    }

    /// Every wire flavor projects and converts back losslessly.
    #[test]
    fn entity_id_flavor_roundtrip(id in entity_id()) {
        prop_assert_eq!(EntityId::from_account_id(Some(&id.to_account_id())).unwrap(), id);
        prop_assert_eq!(EntityId::from_token_id(Some(&id.to_token_id())).unwrap(), id);
        prop_assert_eq!(EntityId::from_topic_id(Some(&id.to_topic_id())).unwrap(), id);
        prop_assert_eq!(EntityId::from_file_id(Some(&id.to_file_id())).unwrap(), id);
        prop_assert_eq!(EntityId::from_schedule_id(Some(&id.to_schedule_id())).unwrap(), id);
        prop_assert_eq!(EntityId::from_contract_id(Some(&id.to_contract_id())).unwrap(), id);
    }

    /// Display output parses back to the same id.
    #[test]
    fn entity_id_display_parse(id in entity_id()) {
        prop_assert_eq!(id.to_string().parse::<EntityId>().unwrap(), id);
    }

    /// Ordering agrees with tuple ordering of the triple.
    #[test]
    fn entity_id_ordering(a in entity_id(), b in entity_id()) {
        let ta = (a.shard(), a.realm(), a.num());
        let tb = (b.shard(), b.realm(), b.num());
        prop_assert_eq!(a.cmp(&b), ta.cmp(&tb));
    }

    /// RichInstant binary and wire roundtrip.
    #[test]
    fn instant_roundtrip(at in instant()) {
        let decoded: RichInstant = decode(&encode(&at), &DecodeLimits::default()).unwrap();
        prop_assert_eq!(decoded, at);
        prop_assert_eq!(RichInstant::from_wire(Some(&at.to_wire())), at);
    }

    /// TxnId binary and wire roundtrip.
    #[test]
    fn txn_id_roundtrip(payer in entity_id(), start in instant(), scheduled in any::<bool>(), nonce in any::<i32>()) {
        let id = TxnId::new(payer, start).with_scheduled(scheduled).with_nonce(nonce);
        let decoded: TxnId = decode(&encode(&id), &DecodeLimits::default()).unwrap();
        prop_assert_eq!(decoded, id);
        prop_assert_eq!(TxnId::from_wire(&id.to_wire()).unwrap(), id);
    }

    /// Token association roundtrip.
    #[test]
    fn association_roundtrip(token in entity_id(), account in entity_id()) {
        let association = FcTokenAssociation::new(token, account);
        let decoded: FcTokenAssociation = decode(&encode(&association), &DecodeLimits::default()).unwrap();
        prop_assert_eq!(decoded, association);
    }
}
