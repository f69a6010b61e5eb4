//! Cross-contract interfaces.
//!
//! Each trait generates a typed client. Callers use the `try_` variants when
//! probing addresses that may not implement the interface at all, and the
//! plain variants when the callee is a trusted collaborator.

use soroban_sdk::{contractclient, contracttype, Address, Env, Symbol, Vec};

/// Aggregate view of one tracker's snapshot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackerSummary {
    pub track_start: u32,
    pub track_end: u32,
    pub validator_ids: Vec<u64>,
    pub total_votes: u64,
    pub eligible_count: u32,
}

/// One validator's position inside a tracker.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrackedValidator {
    pub validator_id: u64,
    pub balance: i128,
    pub votes: u64,
}

/// Validator directory shared by the staking contracts and the tracker.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn validator_ids(env: Env) -> Vec<u64>;
    fn staking_contracts(env: Env, validator_id: u64) -> Vec<Address>;
    fn reward_address(env: Env, validator_id: u64) -> Option<Address>;
    fn validator_of(env: Env, staking: Address) -> Option<u64>;
    fn revise_reward_address(env: Env, staking: Address, reward: Address);
}

/// Surface a per-validator staking contract exposes to the tracker.
#[contractclient(name = "StakingClient")]
pub trait StakingInterface {
    fn contract_type(env: Env) -> Symbol;
    fn version(env: Env) -> u32;
    fn validator_id(env: Env) -> u64;
    fn staking_tracker(env: Env) -> Option<Address>;
    fn staked_balance(env: Env) -> i128;
    fn voter_address(env: Env) -> Option<Address>;
}

/// Surface of the staking tracker used by staking contracts and voting.
#[contractclient(name = "TrackerClient")]
pub trait TrackerInterface {
    fn contract_type(env: Env) -> Symbol;
    fn version(env: Env) -> u32;
    fn create_tracker(env: Env, track_start: u32, track_end: u32) -> u64;
    fn refresh_stake(env: Env, staking: Option<Address>);
    fn refresh_voter(env: Env, staking: Address);
    fn notify_stake_changed(env: Env, staking: Address, new_balance: i128);
    fn notify_voter_changed(env: Env, staking: Address, voter: Option<Address>);
    fn get_live_tracker_ids(env: Env) -> Vec<u64>;
    fn get_tracker_summary(env: Env, tracker_id: u64) -> TrackerSummary;
    fn get_tracked_validator(env: Env, tracker_id: u64, validator_id: u64) -> TrackedValidator;
    fn voter_to_validator(env: Env, voter: Address) -> Option<u64>;
}
