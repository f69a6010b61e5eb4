#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when a new tracker snapshot is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreateTrackerEvent {
    pub tracker_id: u64,
    pub track_start: u32,
    pub track_end: u32,
    pub eligible_count: u32,
    pub total_votes: u64,
}

/// Fired when an expired tracker is dropped from the live list.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetireTrackerEvent {
    pub tracker_id: u64,
}

/// Fired for every live tracker patched by a stake refresh.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefreshStakeEvent {
    pub tracker_id: u64,
    pub validator_id: u64,
    pub staking: Address,
    pub staking_balance: i128,
    pub validator_balance: i128,
    pub votes: u64,
    pub total_votes: u64,
}

/// Fired when a validator's voter mapping changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefreshVoterEvent {
    pub validator_id: u64,
    pub staking: Address,
    pub voter: Option<Address>,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub old_owner: Address,
    pub new_owner: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_create_tracker(
    env: &Env,
    tracker_id: u64,
    track_start: u32,
    track_end: u32,
    eligible_count: u32,
    total_votes: u64,
) {
    env.events().publish(
        (symbol_short!("NEW_TRK"), tracker_id),
        CreateTrackerEvent {
            tracker_id,
            track_start,
            track_end,
            eligible_count,
            total_votes,
        },
    );
}

pub fn publish_retire_tracker(env: &Env, tracker_id: u64) {
    env.events().publish(
        (symbol_short!("RET_TRK"), tracker_id),
        RetireTrackerEvent { tracker_id },
    );
}

#[allow(clippy::too_many_arguments)]
pub fn publish_refresh_stake(
    env: &Env,
    tracker_id: u64,
    validator_id: u64,
    staking: Address,
    staking_balance: i128,
    validator_balance: i128,
    votes: u64,
    total_votes: u64,
) {
    env.events().publish(
        (symbol_short!("REF_STAKE"), tracker_id, validator_id),
        RefreshStakeEvent {
            tracker_id,
            validator_id,
            staking,
            staking_balance,
            validator_balance,
            votes,
            total_votes,
        },
    );
}

pub fn publish_refresh_voter(
    env: &Env,
    validator_id: u64,
    staking: Address,
    voter: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("REF_VOTER"), validator_id),
        RefreshVoterEvent {
            validator_id,
            staking,
            voter,
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWNER"),),
        OwnershipTransferredEvent {
            old_owner,
            new_owner,
        },
    );
}
