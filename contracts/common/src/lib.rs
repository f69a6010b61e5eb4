//! Shared types and helpers for the valset governance contract suite.
//!
//! This crate provides:
//! - [`votes`] — the voting-weight and quorum arithmetic used by the
//!   staking tracker and the voting contract.
//! - [`interfaces`] — typed cross-contract clients for the registry,
//!   the per-validator staking contracts, and the tracker.
//! - The protocol constants every contract agrees on.

#![no_std]

pub mod interfaces;
pub mod votes;

/// Numeric identity of a validator in the registry.
pub type ValidatorId = u64;

/// Stake granting one vote. Also the eligibility threshold.
pub const VOTE_UNIT: i128 = 5_000_000;

/// Minimum aggregate stake for a validator to be eligible for votes.
pub const MIN_STAKE: i128 = 5_000_000;

/// Seconds an approved withdrawal must wait before it can be paid out,
/// and the width of the window after which it lapses.
pub const STAKE_LOCKUP: u64 = 604_800;

/// Hard cap on the admin set of a staking contract.
pub const MAX_ADMIN: u32 = 50;
