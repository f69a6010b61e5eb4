//! Staking tracker.
//!
//! Takes snapshots ("trackers") of every recognized staking contract's
//! balance over a window of ledger sequences, keeps them current while the
//! window is open, and maintains the global voter-account mapping. The
//! voting contract owns this one and creates a tracker per proposal.

#![no_std]


mod events;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Map, Symbol, Vec,
};

use common::interfaces::{RegistryClient, StakingClient, TrackedValidator, TrackerSummary};
use common::votes;

// ── Storage keys ────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const TR_CNT: Symbol = symbol_short!("TR_CNT");
const LIVE_IDS: Symbol = symbol_short!("LIVE_IDS");
const TRACKER: Symbol = symbol_short!("TRACKER");
const VOTER_VAL: Symbol = symbol_short!("VOTER_VAL");
const VAL_VOTER: Symbol = symbol_short!("VAL_VOTER");

// ── Types ───────────────────────────────────────────────────────────────────

/// One snapshot over `[track_start, track_end)` ledger sequences.
///
/// `eligible_count` is frozen at creation; later refreshes recompute votes
/// against it even when a balance crosses the eligibility threshold.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tracker {
    pub id: u64,
    pub track_start: u32,
    pub track_end: u32,
    pub validator_ids: Vec<u64>,
    pub stakings: Map<u64, Vec<Address>>,
    pub staking_balances: Map<Address, i128>,
    pub staking_validator: Map<Address, u64>,
    pub balances: Map<u64, i128>,
    pub votes: Map<u64, u64>,
    pub total_votes: u64,
    pub eligible_count: u32,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TrackerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidTrackerWindow = 3,
    TrackerNotFound = 4,
    ValidatorNotTracked = 5,
    NotStakingContract = 6,
    InvalidStakingContract = 7,
    VoterAlreadyTaken = 8,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn owner_of(env: &Env) -> Result<Address, TrackerError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(TrackerError::NotInitialized)
}

fn registry_of(env: &Env) -> Result<Address, TrackerError> {
    env.storage()
        .instance()
        .get(&REGISTRY)
        .ok_or(TrackerError::NotInitialized)
}

fn tracker_key(id: u64) -> (Symbol, u64) {
    (TRACKER, id)
}

fn voter_key(voter: &Address) -> (Symbol, Address) {
    (VOTER_VAL, voter.clone())
}

fn validator_voter_key(validator_id: u64) -> (Symbol, u64) {
    (VAL_VOTER, validator_id)
}

fn load_tracker(env: &Env, id: u64) -> Option<Tracker> {
    env.storage().persistent().get(&tracker_key(id))
}

fn save_tracker(env: &Env, tracker: &Tracker) {
    env.storage().persistent().set(&tracker_key(tracker.id), tracker);
}

fn tracker_count(env: &Env) -> u64 {
    env.storage().instance().get(&TR_CNT).unwrap_or(0)
}

fn live_ids(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&LIVE_IDS)
        .unwrap_or(Vec::new(env))
}

/// Probes a registered address and returns its tracked balance when it is a
/// recognized staking contract for `validator_id` linked back to this
/// tracker. Anything else is skipped silently.
fn probe_staking(env: &Env, addr: &Address, validator_id: u64) -> Option<i128> {
    let client = StakingClient::new(env, addr);
    let contract_type = match client.try_contract_type() {
        Ok(Ok(t)) => t,
        _ => return None,
    };
    if contract_type != Symbol::new(env, "CnStakingContract") {
        return None;
    }
    match client.try_version() {
        Ok(Ok(2)) => {}
        _ => return None,
    }
    match client.try_staking_tracker() {
        Ok(Ok(Some(tracker))) if tracker == env.current_contract_address() => {}
        _ => return None,
    }
    match client.try_validator_id() {
        Ok(Ok(id)) if id == validator_id => {}
        _ => return None,
    }
    match client.try_staked_balance() {
        Ok(Ok(balance)) => Some(balance),
        _ => None,
    }
}

/// Type-and-version recognition used by the strict voter path.
fn is_staking(env: &Env, addr: &Address) -> bool {
    let client = StakingClient::new(env, addr);
    let contract_type = match client.try_contract_type() {
        Ok(Ok(t)) => t,
        _ => return false,
    };
    let version = match client.try_version() {
        Ok(Ok(v)) => v,
        _ => return false,
    };
    contract_type == Symbol::new(env, "CnStakingContract") && version == 2
}

/// Applies a staking contract's new balance to every live tracker that
/// contains it, recomputing the validator's votes against the frozen
/// eligible count.
fn patch_live_trackers(env: &Env, live: &Vec<u64>, addr: &Address, new_balance: i128) {
    for tid in live.iter() {
        let mut tracker = match load_tracker(env, tid) {
            Some(t) => t,
            None => continue,
        };
        let validator_id = match tracker.staking_validator.get(addr.clone()) {
            Some(v) => v,
            None => continue,
        };

        let old_balance = tracker.staking_balances.get(addr.clone()).unwrap_or(0);
        tracker.staking_balances.set(addr.clone(), new_balance);

        let validator_balance =
            tracker.balances.get(validator_id).unwrap_or(0) - old_balance + new_balance;
        tracker.balances.set(validator_id, validator_balance);

        let old_votes = tracker.votes.get(validator_id).unwrap_or(0);
        let new_votes = votes::votes_for(validator_balance, tracker.eligible_count);
        tracker.votes.set(validator_id, new_votes);
        tracker.total_votes = tracker.total_votes - old_votes + new_votes;

        save_tracker(env, &tracker);
        events::publish_refresh_stake(
            env,
            tid,
            validator_id,
            addr.clone(),
            new_balance,
            validator_balance,
            new_votes,
            tracker.total_votes,
        );
    }
}

/// Installs `voter` as `validator_id`'s voting account in the global
/// mapping. A voter already claimed by another validator is refused;
/// `None` unmaps.
fn install_voter(
    env: &Env,
    validator_id: u64,
    staking: Address,
    voter: Option<Address>,
) -> Result<(), TrackerError> {
    if let Some(v) = &voter {
        if let Some(existing) = env.storage().persistent().get::<_, u64>(&voter_key(v)) {
            if existing != validator_id {
                return Err(TrackerError::VoterAlreadyTaken);
            }
        }
    }

    // Unmap the validator's previous voter before installing the new one.
    if let Some(old) = env
        .storage()
        .persistent()
        .get::<_, Address>(&validator_voter_key(validator_id))
    {
        env.storage().persistent().remove(&voter_key(&old));
    }
    match &voter {
        Some(v) => {
            env.storage().persistent().set(&voter_key(v), &validator_id);
            env.storage()
                .persistent()
                .set(&validator_voter_key(validator_id), v);
        }
        None => {
            env.storage()
                .persistent()
                .remove(&validator_voter_key(validator_id));
        }
    }

    events::publish_refresh_voter(env, validator_id, staking, voter);
    Ok(())
}

/// Drops every expired tracker from the live list (swap-remove; order of the
/// live list is not meaningful) and returns what remains.
fn sweep_expired(env: &Env) -> Vec<u64> {
    let now = env.ledger().sequence();
    let mut live = live_ids(env);
    let mut i = 0;
    while i < live.len() {
        let tid = live.get_unchecked(i);
        let expired = match load_tracker(env, tid) {
            Some(t) => t.track_end <= now,
            None => true,
        };
        if expired {
            let last = live.len() - 1;
            let last_id = live.get_unchecked(last);
            live.set(i, last_id);
            live.pop_back();
            events::publish_retire_tracker(env, tid);
        } else {
            i += 1;
        }
    }
    env.storage().instance().set(&LIVE_IDS, &live);
    live
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingTracker;

#[contractimpl]
impl StakingTracker {
    pub fn initialize(env: Env, owner: Address, registry: Address) -> Result<(), TrackerError> {
        if env.storage().instance().has(&OWNER) {
            return Err(TrackerError::AlreadyInitialized);
        }
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&REGISTRY, &registry);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), TrackerError> {
        let owner = owner_of(&env)?;
        owner.require_auth();
        env.storage().instance().set(&OWNER, &new_owner);
        events::publish_ownership_transferred(&env, owner, new_owner);
        Ok(())
    }

    /// Snapshots every recognized staking contract into a new tracker over
    /// `[track_start, track_end)`. Registry entries that are not recognized
    /// staking contracts linked back to this tracker are skipped; validators
    /// without any recognized contract do not appear at all.
    pub fn create_tracker(
        env: Env,
        track_start: u32,
        track_end: u32,
    ) -> Result<u64, TrackerError> {
        let owner = owner_of(&env)?;
        owner.require_auth();
        if track_end <= track_start {
            return Err(TrackerError::InvalidTrackerWindow);
        }

        let registry = RegistryClient::new(&env, &registry_of(&env)?);

        let mut validator_ids: Vec<u64> = Vec::new(&env);
        let mut stakings: Map<u64, Vec<Address>> = Map::new(&env);
        let mut staking_balances: Map<Address, i128> = Map::new(&env);
        let mut staking_validator: Map<Address, u64> = Map::new(&env);
        let mut balances: Map<u64, i128> = Map::new(&env);

        for validator_id in registry.validator_ids().iter() {
            let mut recognized: Vec<Address> = Vec::new(&env);
            let mut aggregate: i128 = 0;
            for staking in registry.staking_contracts(&validator_id).iter() {
                if let Some(balance) = probe_staking(&env, &staking, validator_id) {
                    staking_balances.set(staking.clone(), balance);
                    staking_validator.set(staking.clone(), validator_id);
                    recognized.push_back(staking);
                    aggregate += balance;
                }
            }
            if recognized.is_empty() {
                continue;
            }
            validator_ids.push_back(validator_id);
            stakings.set(validator_id, recognized);
            balances.set(validator_id, aggregate);
        }

        // The eligible count freezes here for the life of the tracker.
        let mut eligible_count: u32 = 0;
        for validator_id in validator_ids.iter() {
            if votes::is_eligible(balances.get(validator_id).unwrap_or(0)) {
                eligible_count += 1;
            }
        }

        let mut vote_map: Map<u64, u64> = Map::new(&env);
        let mut total_votes: u64 = 0;
        for validator_id in validator_ids.iter() {
            let v = votes::votes_for(balances.get(validator_id).unwrap_or(0), eligible_count);
            vote_map.set(validator_id, v);
            total_votes += v;
        }

        let id = tracker_count(&env) + 1;
        env.storage().instance().set(&TR_CNT, &id);
        save_tracker(
            &env,
            &Tracker {
                id,
                track_start,
                track_end,
                validator_ids,
                stakings,
                staking_balances,
                staking_validator,
                balances,
                votes: vote_map,
                total_votes,
                eligible_count,
            },
        );

        let mut live = live_ids(&env);
        live.push_back(id);
        env.storage().instance().set(&LIVE_IDS, &live);

        events::publish_create_tracker(
            &env,
            id,
            track_start,
            track_end,
            eligible_count,
            total_votes,
        );
        Ok(id)
    }

    /// Retires expired trackers, then re-reads `staking`'s balance into
    /// every remaining live tracker that contains it. `None` only sweeps.
    /// Anyone may call; the data read is the staking contract's own. A
    /// staking contract reporting its own change must use
    /// `notify_stake_changed` instead: the host refuses the read-back while
    /// the contract is still on the invocation stack.
    pub fn refresh_stake(env: Env, staking: Option<Address>) {
        let live = sweep_expired(&env);
        let addr = match staking {
            Some(a) => a,
            None => return,
        };
        let new_balance = match StakingClient::new(&env, &addr).try_staked_balance() {
            Ok(Ok(b)) => b,
            _ => return,
        };
        patch_live_trackers(&env, &live, &addr, new_balance);
    }

    /// Balance change pushed by a staking contract about itself. The new
    /// balance travels as an argument so this never calls back into the
    /// notifier; `require_auth` holds because the notifier is the invoker.
    pub fn notify_stake_changed(env: Env, staking: Address, new_balance: i128) {
        staking.require_auth();
        let live = sweep_expired(&env);
        patch_live_trackers(&env, &live, &staking, new_balance);
    }

    /// Re-reads `staking`'s voter address into the global mapping. Strict:
    /// a voter already claimed by another validator is refused.
    pub fn refresh_voter(env: Env, staking: Address) -> Result<(), TrackerError> {
        let registry = RegistryClient::new(&env, &registry_of(&env)?);
        let validator_id = registry
            .validator_of(&staking)
            .ok_or(TrackerError::NotStakingContract)?;
        if !is_staking(&env, &staking) {
            return Err(TrackerError::InvalidStakingContract);
        }
        let voter = StakingClient::new(&env, &staking).voter_address();
        install_voter(&env, validator_id, staking, voter)
    }

    /// Voter change pushed by a staking contract about itself. Like
    /// `notify_stake_changed`, the value travels as an argument; the
    /// type-and-version probe is skipped because probing would call back
    /// into the notifier, and `require_auth` plus registry membership
    /// already pin the caller down.
    pub fn notify_voter_changed(
        env: Env,
        staking: Address,
        voter: Option<Address>,
    ) -> Result<(), TrackerError> {
        staking.require_auth();
        let registry = RegistryClient::new(&env, &registry_of(&env)?);
        let validator_id = registry
            .validator_of(&staking)
            .ok_or(TrackerError::NotStakingContract)?;
        install_voter(&env, validator_id, staking, voter)
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_all_tracker_ids(env: Env) -> Vec<u64> {
        let mut ids = Vec::new(&env);
        let count = tracker_count(&env);
        let mut id = 1;
        while id <= count {
            ids.push_back(id);
            id += 1;
        }
        ids
    }

    /// Live means the window has not closed, whether or not the id has been
    /// swept from the internal list yet.
    pub fn get_live_tracker_ids(env: Env) -> Vec<u64> {
        let now = env.ledger().sequence();
        let mut out = Vec::new(&env);
        for tid in live_ids(&env).iter() {
            if let Some(tracker) = load_tracker(&env, tid) {
                if tracker.track_end > now {
                    out.push_back(tid);
                }
            }
        }
        out
    }

    pub fn get_last_tracker_id(env: Env) -> u64 {
        tracker_count(&env)
    }

    pub fn get_tracker_summary(env: Env, tracker_id: u64) -> Result<TrackerSummary, TrackerError> {
        let tracker = load_tracker(&env, tracker_id).ok_or(TrackerError::TrackerNotFound)?;
        Ok(TrackerSummary {
            track_start: tracker.track_start,
            track_end: tracker.track_end,
            validator_ids: tracker.validator_ids,
            total_votes: tracker.total_votes,
            eligible_count: tracker.eligible_count,
        })
    }

    pub fn get_all_tracked_validators(
        env: Env,
        tracker_id: u64,
    ) -> Result<Vec<TrackedValidator>, TrackerError> {
        let tracker = load_tracker(&env, tracker_id).ok_or(TrackerError::TrackerNotFound)?;
        let mut out = Vec::new(&env);
        for validator_id in tracker.validator_ids.iter() {
            out.push_back(TrackedValidator {
                validator_id,
                balance: tracker.balances.get(validator_id).unwrap_or(0),
                votes: tracker.votes.get(validator_id).unwrap_or(0),
            });
        }
        Ok(out)
    }

    pub fn get_tracked_validator(
        env: Env,
        tracker_id: u64,
        validator_id: u64,
    ) -> Result<TrackedValidator, TrackerError> {
        let tracker = load_tracker(&env, tracker_id).ok_or(TrackerError::TrackerNotFound)?;
        if !tracker.validator_ids.contains(validator_id) {
            return Err(TrackerError::ValidatorNotTracked);
        }
        Ok(TrackedValidator {
            validator_id,
            balance: tracker.balances.get(validator_id).unwrap_or(0),
            votes: tracker.votes.get(validator_id).unwrap_or(0),
        })
    }

    pub fn staking_to_validator(env: Env, tracker_id: u64, staking: Address) -> Option<u64> {
        let tracker = load_tracker(&env, tracker_id)?;
        tracker.staking_validator.get(staking)
    }

    pub fn voter_to_validator(env: Env, voter: Address) -> Option<u64> {
        env.storage().persistent().get(&voter_key(&voter))
    }

    pub fn validator_to_voter(env: Env, validator_id: u64) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&validator_voter_key(validator_id))
    }

    pub fn owner(env: Env) -> Result<Address, TrackerError> {
        owner_of(&env)
    }

    pub fn contract_type(env: Env) -> Symbol {
        Symbol::new(&env, "StakingTracker")
    }

    pub fn version(_env: Env) -> u32 {
        1
    }
}
