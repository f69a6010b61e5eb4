//! Lockup vesting schedule.
//!
//! The initial stake vests along a fixed table of (unlock time, amount)
//! pairs agreed at deployment. Withdrawing never reorders the table; only
//! the cumulative `withdrawn` figure moves.

use soroban_sdk::{contracttype, Vec};

use crate::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockupSchedule {
    pub unlock_times: Vec<u64>,
    pub unlock_amounts: Vec<i128>,
    /// Sum of all scheduled amounts.
    pub initial: i128,
    /// Total withdrawn from the lockup so far.
    pub withdrawn: i128,
}

impl LockupSchedule {
    /// Total amount whose unlock time has passed at `now`.
    pub fn unlocked_at(&self, now: u64) -> i128 {
        let mut unlocked: i128 = 0;
        for i in 0..self.unlock_times.len() {
            if self.unlock_times.get_unchecked(i) <= now {
                unlocked += self.unlock_amounts.get_unchecked(i);
            }
        }
        unlocked
    }

    /// Unlocked but not yet withdrawn.
    pub fn withdrawable(&self, now: u64) -> i128 {
        self.unlocked_at(now) - self.withdrawn
    }

    /// Still held by the lockup (vested or not).
    pub fn remaining(&self) -> i128 {
        self.initial - self.withdrawn
    }
}

/// Validates a schedule against `now` and returns its total.
///
/// Times must be strictly ascending and lie in the future; amounts must be
/// positive; the two tables must be the same nonzero length.
pub fn validate_schedule(
    unlock_times: &Vec<u64>,
    unlock_amounts: &Vec<i128>,
    now: u64,
) -> Result<i128, ContractError> {
    if unlock_times.is_empty() || unlock_times.len() != unlock_amounts.len() {
        return Err(ContractError::InvalidLockup);
    }
    let mut total: i128 = 0;
    let mut prev = now;
    for i in 0..unlock_times.len() {
        let time = unlock_times.get_unchecked(i);
        if time <= prev {
            return Err(ContractError::UnlockTimeNotAscending);
        }
        prev = time;

        let amount = unlock_amounts.get_unchecked(i);
        if amount <= 0 {
            return Err(ContractError::AmountNotPositive);
        }
        total += amount;
    }
    Ok(total)
}
