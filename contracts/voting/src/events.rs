#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, String};

use crate::{AccessRule, TimingRule, VoteChoice};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when a proposal is created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposeEvent {
    pub proposal_id: u64,
    pub proposer: Address,
    pub description: String,
    pub vote_start: u32,
    pub vote_end: u32,
    pub tracker_id: u64,
    pub quorum_count: u32,
    pub quorum_power: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub proposal_id: u64,
    pub voter: Address,
    pub validator_id: u64,
    pub choice: VoteChoice,
    pub votes: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueueEvent {
    pub proposal_id: u64,
    pub eta: u32,
    pub exec_deadline: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecuteEvent {
    pub proposal_id: u64,
    pub caller: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CancelEvent {
    pub proposal_id: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateAccessRuleEvent {
    pub old_rule: AccessRule,
    pub new_rule: AccessRule,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateTimingRuleEvent {
    pub old_rule: TimingRule,
    pub new_rule: TimingRule,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateSecretaryEvent {
    pub old_secretary: Option<Address>,
    pub new_secretary: Option<Address>,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateStakingTrackerEvent {
    pub old_tracker: Address,
    pub new_tracker: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn publish_propose(
    env: &Env,
    proposal_id: u64,
    proposer: Address,
    description: String,
    vote_start: u32,
    vote_end: u32,
    tracker_id: u64,
    quorum_count: u32,
    quorum_power: u64,
) {
    env.events().publish(
        (symbol_short!("PROPOSE"), proposal_id),
        ProposeEvent {
            proposal_id,
            proposer,
            description,
            vote_start,
            vote_end,
            tracker_id,
            quorum_count,
            quorum_power,
        },
    );
}

pub fn publish_vote_cast(
    env: &Env,
    proposal_id: u64,
    voter: Address,
    validator_id: u64,
    choice: VoteChoice,
    votes: u64,
) {
    env.events().publish(
        (symbol_short!("VOTE"), proposal_id, validator_id),
        VoteCastEvent {
            proposal_id,
            voter,
            validator_id,
            choice,
            votes,
        },
    );
}

pub fn publish_queue(env: &Env, proposal_id: u64, eta: u32, exec_deadline: u32) {
    env.events().publish(
        (symbol_short!("QUEUE"), proposal_id),
        QueueEvent {
            proposal_id,
            eta,
            exec_deadline,
        },
    );
}

pub fn publish_execute(env: &Env, proposal_id: u64, caller: Address) {
    env.events().publish(
        (symbol_short!("EXECUTE"), proposal_id),
        ExecuteEvent {
            proposal_id,
            caller,
        },
    );
}

pub fn publish_cancel(env: &Env, proposal_id: u64) {
    env.events().publish(
        (symbol_short!("CANCEL"), proposal_id),
        CancelEvent { proposal_id },
    );
}

pub fn publish_update_access_rule(env: &Env, old_rule: AccessRule, new_rule: AccessRule) {
    env.events().publish(
        (symbol_short!("UPD_ACC"),),
        UpdateAccessRuleEvent { old_rule, new_rule },
    );
}

pub fn publish_update_timing_rule(env: &Env, old_rule: TimingRule, new_rule: TimingRule) {
    env.events().publish(
        (symbol_short!("UPD_TIME"),),
        UpdateTimingRuleEvent { old_rule, new_rule },
    );
}

pub fn publish_update_secretary(
    env: &Env,
    old_secretary: Option<Address>,
    new_secretary: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("UPD_SEC"),),
        UpdateSecretaryEvent {
            old_secretary,
            new_secretary,
        },
    );
}

pub fn publish_update_staking_tracker(env: &Env, old_tracker: Address, new_tracker: Address) {
    env.events().publish(
        (symbol_short!("UPD_TRK"),),
        UpdateStakingTrackerEvent {
            old_tracker,
            new_tracker,
        },
    );
}
