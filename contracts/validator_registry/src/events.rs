#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

/// Fired when a staking contract revises its validator's reward address.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReviseRewardAddressEvent {
    pub validator_id: u64,
    pub old_reward: Option<Address>,
    pub new_reward: Address,
    pub timestamp: u64,
}

pub fn publish_revise_reward_address(
    env: &Env,
    validator_id: u64,
    old_reward: Option<Address>,
    new_reward: Address,
) {
    env.events().publish(
        (symbol_short!("REV_RWD"), validator_id),
        ReviseRewardAddressEvent {
            validator_id,
            old_reward,
            new_reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}
