use proptest::prelude::*;

use shade_types::Amount;

proptest! {
    /// Lo/hi addition must agree exactly with native 128-bit addition.
    #[test]
    fn add_matches_u128(
        lo_a in 0u64..=u64::MAX,
        hi_a in 0u64..u64::MAX / 2,
        lo_b in 0u64..=u64::MAX,
        hi_b in 0u64..u64::MAX / 2,
    ) {
        let a = Amount::new(lo_a, hi_a);
        let b = Amount::new(lo_b, hi_b);
        let sum = a + b;
        prop_assert_eq!(sum.as_u128(), a.as_u128() + b.as_u128());
    }

    /// checked_add is None exactly when the native u128 sum would overflow.
    #[test]
    fn checked_add_matches_u128_overflow(
        lo_a in 0u64..=u64::MAX,
        hi_a in 0u64..=u64::MAX,
        lo_b in 0u64..=u64::MAX,
        hi_b in 0u64..=u64::MAX,
    ) {
        let a = Amount::new(lo_a, hi_a);
        let b = Amount::new(lo_b, hi_b);
        prop_assert_eq!(
            a.checked_add(b).map(|s| s.as_u128()),
            a.as_u128().checked_add(b.as_u128())
        );
    }

    /// Word-splitting round-trips every 128-bit value.
    #[test]
    fn word_split_round_trips(value in 0u128..=u128::MAX) {
        prop_assert_eq!(Amount::from_u128(value).as_u128(), value);
    }

    /// Ordering agrees with the numeric value, not the word layout.
    #[test]
    fn ordering_matches_u128(
        a in 0u128..=u128::MAX,
        b in 0u128..=u128::MAX,
    ) {
        prop_assert_eq!(
            Amount::from_u128(a).cmp(&Amount::from_u128(b)),
            a.cmp(&b)
        );
    }
}
