//! Approved free-stake withdrawals.
//!
//! A withdrawal approved by the multisig waits out [`common::STAKE_LOCKUP`]
//! seconds, is payable during the following window of the same width, and
//! lapses after that.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const WITHDRAWAL: Symbol = symbol_short!("WDRAWAL");
const WD_CNT: Symbol = symbol_short!("WD_CNT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WithdrawalState {
    /// Approved and pending.
    Unknown,
    Transferred,
    Canceled,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub id: u64,
    pub recipient: Address,
    pub amount: i128,
    /// Earliest payout time; payable until this plus `STAKE_LOCKUP`.
    pub withdrawable_from: u64,
    pub state: WithdrawalState,
}

fn withdrawal_key(id: u64) -> (Symbol, u64) {
    (WITHDRAWAL, id)
}

pub fn withdrawal_count(env: &Env) -> u64 {
    env.storage().instance().get(&WD_CNT).unwrap_or(0)
}

pub fn next_withdrawal_id(env: &Env) -> u64 {
    let id = withdrawal_count(env);
    env.storage().instance().set(&WD_CNT, &(id + 1));
    id
}

pub fn load_withdrawal(env: &Env, id: u64) -> Option<Withdrawal> {
    env.storage().persistent().get(&withdrawal_key(id))
}

pub fn save_withdrawal(env: &Env, withdrawal: &Withdrawal) {
    env.storage()
        .persistent()
        .set(&withdrawal_key(withdrawal.id), withdrawal);
}

/// Withdrawal ids in `[from, to)` whose state matches `state` (`None`
/// matches all). Same range convention as the request ledger.
pub fn withdrawal_ids(env: &Env, from: u64, to: u64, state: Option<WithdrawalState>) -> Vec<u64> {
    let count = withdrawal_count(env);
    let end = if to == 0 || to > count { count } else { to };
    let mut ids = Vec::new(env);
    let mut id = from;
    while id < end {
        if let Some(withdrawal) = load_withdrawal(env, id) {
            let keep = match &state {
                None => true,
                Some(s) => *s == withdrawal.state,
            };
            if keep {
                ids.push_back(id);
            }
        }
        id += 1;
    }
    ids
}
