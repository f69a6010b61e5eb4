//! Validator directory.
//!
//! Maps numeric validator ids to their staking contracts and reward
//! addresses, and answers reverse lookups from a staking contract address to
//! the validator that owns it. Staking contracts push reward-address
//! revisions here through [`ValidatorRegistry::revise_reward_address`].

#![no_std]


mod events;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use common::ValidatorId;

// ── Storage keys ────────────────────────────────────────────────────────────

const IDS: Symbol = symbol_short!("IDS");
const STAKINGS: Symbol = symbol_short!("STAKINGS");
const REWARD: Symbol = symbol_short!("REWARD");
const OWNER_OF: Symbol = symbol_short!("OWNER_OF");

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    LengthMismatch = 1,
    NotRegistered = 2,
}

fn stakings_key(validator_id: ValidatorId) -> (Symbol, u64) {
    (STAKINGS, validator_id)
}

fn reward_key(validator_id: ValidatorId) -> (Symbol, u64) {
    (REWARD, validator_id)
}

fn owner_key(staking: &Address) -> (Symbol, Address) {
    (OWNER_OF, staking.clone())
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct ValidatorRegistry;

#[contractimpl]
impl ValidatorRegistry {
    /// Register validators in bulk. The three vectors are zipped; repeating a
    /// validator id attaches several staking contracts to one validator (the
    /// last reward address for an id wins).
    pub fn register(
        env: Env,
        validator_ids: Vec<ValidatorId>,
        stakings: Vec<Address>,
        rewards: Vec<Address>,
    ) -> Result<(), RegistryError> {
        if validator_ids.len() != stakings.len() || validator_ids.len() != rewards.len() {
            return Err(RegistryError::LengthMismatch);
        }

        let mut ids: Vec<ValidatorId> = env.storage().instance().get(&IDS).unwrap_or(Vec::new(&env));
        for i in 0..validator_ids.len() {
            let id = validator_ids.get_unchecked(i);
            let staking = stakings.get_unchecked(i);
            let reward = rewards.get_unchecked(i);

            if !ids.contains(id) {
                ids.push_back(id);
            }
            let mut contracts: Vec<Address> = env
                .storage()
                .persistent()
                .get(&stakings_key(id))
                .unwrap_or(Vec::new(&env));
            if !contracts.contains(&staking) {
                contracts.push_back(staking.clone());
            }
            env.storage().persistent().set(&stakings_key(id), &contracts);
            env.storage().persistent().set(&reward_key(id), &reward);
            env.storage().persistent().set(&owner_key(&staking), &id);
        }
        env.storage().instance().set(&IDS, &ids);
        Ok(())
    }

    /// Reward-address revision pushed by a staking contract for its own
    /// validator. Only the staking contract itself may call this.
    pub fn revise_reward_address(
        env: Env,
        staking: Address,
        reward: Address,
    ) -> Result<(), RegistryError> {
        staking.require_auth();

        let validator_id: ValidatorId = env
            .storage()
            .persistent()
            .get(&owner_key(&staking))
            .ok_or(RegistryError::NotRegistered)?;

        let old: Option<Address> = env.storage().persistent().get(&reward_key(validator_id));
        env.storage()
            .persistent()
            .set(&reward_key(validator_id), &reward);

        events::publish_revise_reward_address(&env, validator_id, old, reward);
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn validator_ids(env: Env) -> Vec<ValidatorId> {
        env.storage().instance().get(&IDS).unwrap_or(Vec::new(&env))
    }

    pub fn staking_contracts(env: Env, validator_id: ValidatorId) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&stakings_key(validator_id))
            .unwrap_or(Vec::new(&env))
    }

    pub fn reward_address(env: Env, validator_id: ValidatorId) -> Option<Address> {
        env.storage().persistent().get(&reward_key(validator_id))
    }

    pub fn validator_of(env: Env, staking: Address) -> Option<ValidatorId> {
        env.storage().persistent().get(&owner_key(&staking))
    }
}
