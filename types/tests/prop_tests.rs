use proptest::prelude::*;

use dao_types::{Address, ChainId, ProposalId, RawAmount, Timestamp, TokenId, TxHash};

proptest! {
    /// Address display/parse roundtrip.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed = Address::parse(&addr.to_string()).unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// TxHash display/parse roundtrip.
    #[test]
    fn tx_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        let parsed = TxHash::parse(&hash.to_string()).unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Address::is_zero is true only for the all-zero address.
    #[test]
    fn address_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        prop_assert_eq!(Address::new(bytes).is_zero(), bytes == [0u8; 20]);
    }

    /// RawAmount displays as the exact decimal string of its raw value.
    #[test]
    fn amount_display_is_exact(raw in any::<u128>()) {
        let amount = RawAmount::new(raw);
        prop_assert_eq!(amount.to_string(), raw.to_string());
        prop_assert_eq!(amount.to_string().parse::<RawAmount>().unwrap(), amount);
    }

    /// to_display_units never loses the whole part.
    #[test]
    fn amount_display_units_whole_part(raw in any::<u128>(), decimals in 0u32..30) {
        let rendered = RawAmount::new(raw).to_display_units(decimals);
        let whole = rendered.split('.').next().unwrap();
        prop_assert_eq!(whole.parse::<u128>().unwrap(), raw / 10u128.pow(decimals));
    }

    /// Ledger epoch-seconds scale to milliseconds without overflow.
    #[test]
    fn timestamp_from_secs_scales(secs in 0u64..=u64::MAX / 1000) {
        let ts = Timestamp::from_epoch_secs(secs);
        prop_assert_eq!(ts.as_millis(), secs * 1000);
        prop_assert_eq!(ts.as_secs(), secs);
    }

    /// Timestamp ordering matches the underlying integers.
    #[test]
    fn timestamp_ordering(a in any::<u64>(), b in any::<u64>()) {
        let (ta, tb) = (Timestamp::from_millis(a), Timestamp::from_millis(b));
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// ProposalId and ChainId are transparent over u64.
    #[test]
    fn ids_are_transparent(id in any::<u64>()) {
        prop_assert_eq!(ProposalId::new(id).as_u64(), id);
        prop_assert_eq!(ChainId::new(id).as_u64(), id);
    }

    /// Any decimal rendering of a u128 is a valid TokenId.
    #[test]
    fn token_id_accepts_decimal(raw in any::<u128>()) {
        let id = TokenId::new(raw.to_string()).unwrap();
        let rendered = raw.to_string();
        prop_assert_eq!(id.as_str(), rendered.as_str());
    }
}
