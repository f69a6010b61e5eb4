//! Voting-weight arithmetic shared by the tracker and the voting contract.

use crate::{MIN_STAKE, VOTE_UNIT};

/// Whether a validator's aggregate balance makes it eligible for votes.
pub fn is_eligible(balance: i128) -> bool {
    balance >= MIN_STAKE
}

/// Votes granted to a validator holding `balance`, out of `eligible_count`
/// eligible validators.
///
/// One vote per [`VOTE_UNIT`] of stake, capped at one less than the number
/// of eligible validators so that no single validator can outvote the rest.
/// The cap never falls below 1.
pub fn votes_for(balance: i128, eligible_count: u32) -> u64 {
    if !is_eligible(balance) {
        return 0;
    }
    let cap = i128::from(core::cmp::max(1, eligible_count.saturating_sub(1)));
    core::cmp::min(balance / VOTE_UNIT, cap) as u64
}

/// Smallest count that is at least a third of `n`, never below 1.
///
/// Used for both quorum figures: the minimum number of distinct voters and
/// the minimum total voting power that must be cast.
pub fn one_third_ceil(n: u64) -> u64 {
    core::cmp::max(1, n.div_ceil(3))
}
