#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the voting-weight arithmetic.
//!
//! Invariants tested:
//! - Weight is monotone in the staked balance.
//! - Weight never exceeds the eligible-count cap.
//! - Anything below the minimum stake gets zero weight, anything at or
//!   above it gets at least one vote.
//! - Both quorum figures are at least 1 and cover at least a third.

use common::votes::{is_eligible, one_third_ceil, votes_for};
use common::{MIN_STAKE, VOTE_UNIT};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_votes_monotone_in_balance(
        a in 0i128..10_000_000_000,
        b in 0i128..10_000_000_000,
        eligible in 0u32..200,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(votes_for(lo, eligible) <= votes_for(hi, eligible));
    }

    #[test]
    fn prop_votes_respect_cap(balance in 0i128..10_000_000_000, eligible in 0u32..200) {
        let cap = u64::from(1u32.max(eligible.saturating_sub(1)));
        prop_assert!(votes_for(balance, eligible) <= cap);
    }

    #[test]
    fn prop_eligibility_threshold(balance in 0i128..10_000_000_000, eligible in 0u32..200) {
        let votes = votes_for(balance, eligible);
        if balance < MIN_STAKE {
            prop_assert!(!is_eligible(balance));
            prop_assert_eq!(votes, 0);
        } else {
            prop_assert!(is_eligible(balance));
            prop_assert!(votes >= 1);
        }
    }

    #[test]
    fn prop_votes_never_exceed_vote_units(balance in 0i128..10_000_000_000, eligible in 0u32..200) {
        prop_assert!(i128::from(votes_for(balance, eligible)) <= balance / VOTE_UNIT);
    }

    #[test]
    fn prop_one_third_ceil_bounds(n in 0u64..1_000_000) {
        let q = one_third_ceil(n);
        prop_assert!(q >= 1);
        prop_assert!(q * 3 >= n);
        // Tight: one less no longer covers a third (except at the floor).
        if q > 1 {
            prop_assert!((q - 1) * 3 < n);
        }
    }
}
