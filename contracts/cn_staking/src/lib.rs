//! Per-validator staking contract.
//!
//! Holds a validator's locked-up stake behind an N-of-M admin multisig.
//! Deployment is a two-phase handshake: the deployer configures the contract
//! and an optional tracker link, every party reviews the initial conditions,
//! and the contract goes live when the exact lockup total is deposited.
//! After that every administrative action flows through the request ledger
//! in [`multisig`].

#![no_std]

#[cfg(test)]
mod test_admin;
#[cfg(test)]
mod test_link;
#[cfg(test)]
mod test_multisig;
#[cfg(test)]
mod test_stake;

mod events;
pub mod lockup;
pub mod multisig;
pub mod withdrawal;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use common::interfaces::{RegistryClient, TrackerClient};
use common::{MAX_ADMIN, STAKE_LOCKUP};

use lockup::LockupSchedule;
use multisig::{AdminOp, Request, RequestState};
use withdrawal::{Withdrawal, WithdrawalState};

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const ADMINS: Symbol = symbol_short!("ADMINS");
const REQUIRE: Symbol = symbol_short!("REQUIRE");
const REWARD: Symbol = symbol_short!("REWARD");
const TRACKER: Symbol = symbol_short!("TRACKER");
const VOTER: Symbol = symbol_short!("VOTER");
const CVALID: Symbol = symbol_short!("CVALID");
const REVIEWS: Symbol = symbol_short!("REVIEWS");
const LIVE: Symbol = symbol_short!("LIVE");
const LOCKUP: Symbol = symbol_short!("LOCKUP");
const STAKING: Symbol = symbol_short!("STAKING");
const UNSTAKING: Symbol = symbol_short!("UNSTAKING");

// ── Types ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    pub validator_id: u64,
    pub token: Address,
    pub registry: Option<Address>,
}

/// Pre- and post-initialization summary, mainly for reviewers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractState {
    pub contract_validator: Option<Address>,
    pub validator_id: u64,
    pub reward_address: Address,
    pub admins: Vec<Address>,
    pub requirement: u32,
    pub unlock_times: Vec<u64>,
    pub unlock_amounts: Vec<i128>,
    pub all_reviewed: bool,
    pub initialized: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockupInfo {
    pub unlock_times: Vec<u64>,
    pub unlock_amounts: Vec<i128>,
    pub initial: i128,
    pub remaining: i128,
    pub withdrawable: i128,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    NotAdmin = 4,
    AdminExists = 5,
    AdminNotUnique = 6,
    AdminLimitReached = 7,
    InvalidRequirement = 8,
    InvalidLockup = 9,
    UnlockTimeNotAscending = 10,
    AmountNotPositive = 11,
    ReviewNotFinished = 12,
    AlreadyReviewed = 13,
    ValueMismatch = 14,
    RequestNotConfirmable = 15,
    RequestMismatch = 16,
    AlreadyConfirmed = 17,
    HasNotConfirmed = 18,
    InvalidValue = 19,
    TooMuchWithdrawal = 20,
    WithdrawalNotFound = 21,
    InvalidState = 22,
    NotWithdrawableYet = 23,
    TransferFailed = 24,
    InvalidAmount = 25,
    InvalidContract = 26,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn is_live(env: &Env) -> bool {
    env.storage().instance().get(&LIVE).unwrap_or(false)
}

fn require_live(env: &Env) -> Result<(), ContractError> {
    if !is_live(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

fn require_not_live(env: &Env) -> Result<(), ContractError> {
    if is_live(env) {
        return Err(ContractError::AlreadyInitialized);
    }
    Ok(())
}

fn admin_list(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&ADMINS)
        .unwrap_or(Vec::new(env))
}

fn requirement_of(env: &Env) -> u32 {
    env.storage().instance().get(&REQUIRE).unwrap_or(0)
}

fn require_admin(env: &Env, who: &Address) -> Result<(), ContractError> {
    if !admin_list(env).contains(who) {
        return Err(ContractError::NotAdmin);
    }
    Ok(())
}

fn contract_validator(env: &Env) -> Option<Address> {
    env.storage().instance().get(&CVALID)
}

fn lockup_of(env: &Env) -> Result<LockupSchedule, ContractError> {
    env.storage()
        .instance()
        .get(&LOCKUP)
        .ok_or(ContractError::NotInitialized)
}

fn free_staking(env: &Env) -> i128 {
    env.storage().instance().get(&STAKING).unwrap_or(0)
}

fn unstaking(env: &Env) -> i128 {
    env.storage().instance().get(&UNSTAKING).unwrap_or(0)
}

/// Recognizes a staking tracker by its self-reported type and version.
fn is_tracker(env: &Env, addr: &Address) -> bool {
    let client = TrackerClient::new(env, addr);
    let contract_type = match client.try_contract_type() {
        Ok(Ok(t)) => t,
        _ => return false,
    };
    let version = match client.try_version() {
        Ok(Ok(v)) => v,
        _ => return false,
    };
    contract_type == Symbol::new(env, "StakingTracker") && version == 1
}

/// Pushes the current staked balance to the linked tracker. The balance is
/// passed by value because the tracker cannot read it back while this
/// contract is still on the invocation stack. Failures are swallowed: a
/// broken tracker must never block staking operations.
fn refresh_stake_best_effort(env: &Env) {
    if let Some(tracker) = env.storage().instance().get::<_, Address>(&TRACKER) {
        let lockup_remaining = lockup_of(env).map(|l| l.remaining()).unwrap_or(0);
        let balance = lockup_remaining + free_staking(env) - unstaking(env);
        let _ = TrackerClient::new(env, &tracker)
            .try_notify_stake_changed(&env.current_contract_address(), &balance);
    }
}

fn transfer_or_fail(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: &i128,
) -> Result<(), ContractError> {
    let config = load_config(env)?;
    match token::Client::new(env, &config.token).try_transfer(from, to, amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

// ── Request execution ───────────────────────────────────────────────────────

fn dispatch(env: &Env, op: &AdminOp) -> Result<(), ContractError> {
    match op {
        AdminOp::AddAdmin(admin) => handle_add_admin(env, admin),
        AdminOp::DeleteAdmin(admin) => handle_delete_admin(env, admin),
        AdminOp::UpdateRequirement(requirement) => handle_update_requirement(env, *requirement),
        AdminOp::ClearRequest => Ok(()),
        AdminOp::WithdrawLockupStaking(to, amount) => {
            handle_withdraw_lockup_staking(env, to, *amount)
        }
        AdminOp::ApproveStakingWithdrawal(to, amount) => {
            handle_approve_staking_withdrawal(env, to, *amount)
        }
        AdminOp::CancelApprovedStakingWithdrawal(id) => {
            handle_cancel_approved_staking_withdrawal(env, *id)
        }
        AdminOp::UpdateRewardAddress(reward) => handle_update_reward_address(env, reward),
        AdminOp::UpdateStakingTracker(tracker) => handle_update_staking_tracker(env, tracker),
        AdminOp::UpdateVoterAddress(voter) => handle_update_voter_address(env, voter),
    }
}

/// Runs a fully-confirmed request. A handler error marks the request
/// `ExecutionFailed` without failing the enclosing confirmation; handlers
/// validate before they mutate, so a failed request leaves no side effects.
fn execute_request(env: &Env, mut request: Request) {
    match dispatch(env, &request.op) {
        Ok(()) => {
            request.state = RequestState::Executed;
            multisig::save_request(env, &request);
            events::publish_execute_request_success(env, request.id, request.op.clone());
            if request.op.clears_outstanding() {
                cancel_outstanding(env, request.id);
            }
        }
        Err(e) => {
            request.state = RequestState::ExecutionFailed;
            multisig::save_request(env, &request);
            events::publish_execute_request_failure(env, request.id, request.op.clone(), e as u32);
        }
    }
}

/// Cancels every outstanding request other than `except`. Runs after any
/// successful change to the admin set or the confirmation requirement.
fn cancel_outstanding(env: &Env, except: u64) {
    let count = multisig::request_count(env);
    let mut id = 0;
    while id < count {
        if id != except {
            if let Some(mut request) = multisig::load_request(env, id) {
                if request.state == RequestState::NotConfirmed {
                    request.state = RequestState::Canceled;
                    multisig::save_request(env, &request);
                    events::publish_cancel_request(env, request.id, request.op);
                }
            }
        }
        id += 1;
    }
}

fn confirm_inner(env: &Env, confirmer: Address, mut request: Request) {
    request.confirmers.push_back(confirmer.clone());
    multisig::save_request(env, &request);
    events::publish_confirm_request(env, request.id, confirmer, request.confirmers.clone());

    if request.confirmers.len() >= requirement_of(env) {
        execute_request(env, request);
    }
}

// ── Handlers ────────────────────────────────────────────────────────────────

fn handle_add_admin(env: &Env, admin: &Address) -> Result<(), ContractError> {
    let mut admins = admin_list(env);
    if admins.contains(admin) {
        return Err(ContractError::AdminExists);
    }
    if admins.len() >= MAX_ADMIN {
        return Err(ContractError::AdminLimitReached);
    }
    admins.push_back(admin.clone());
    env.storage().instance().set(&ADMINS, &admins);
    events::publish_add_admin(env, admin.clone());
    Ok(())
}

fn handle_delete_admin(env: &Env, admin: &Address) -> Result<(), ContractError> {
    let mut admins = admin_list(env);
    let index = admins
        .first_index_of(admin)
        .ok_or(ContractError::NotAdmin)?;
    if admins.len() - 1 < requirement_of(env) {
        return Err(ContractError::InvalidRequirement);
    }
    admins.remove(index);
    env.storage().instance().set(&ADMINS, &admins);
    events::publish_delete_admin(env, admin.clone());
    Ok(())
}

fn handle_update_requirement(env: &Env, requirement: u32) -> Result<(), ContractError> {
    if requirement == 0 || requirement > admin_list(env).len() {
        return Err(ContractError::InvalidRequirement);
    }
    env.storage().instance().set(&REQUIRE, &requirement);
    events::publish_update_requirement(env, requirement);
    Ok(())
}

fn handle_withdraw_lockup_staking(
    env: &Env,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let mut lockup = lockup_of(env)?;
    let now = env.ledger().timestamp();
    if amount <= 0 || amount > lockup.withdrawable(now) {
        return Err(ContractError::InvalidValue);
    }

    transfer_or_fail(env, &env.current_contract_address(), to, &amount)?;

    lockup.withdrawn += amount;
    env.storage().instance().set(&LOCKUP, &lockup);
    events::publish_withdraw_lockup_staking(env, to.clone(), amount, lockup.remaining());
    refresh_stake_best_effort(env);
    Ok(())
}

fn handle_approve_staking_withdrawal(
    env: &Env,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let staking = free_staking(env);
    if amount <= 0 || amount > staking {
        return Err(ContractError::InvalidValue);
    }
    let outstanding = unstaking(env);
    if outstanding + amount > staking {
        return Err(ContractError::TooMuchWithdrawal);
    }

    let id = withdrawal::next_withdrawal_id(env);
    let withdrawable_from = env.ledger().timestamp() + STAKE_LOCKUP;
    withdrawal::save_withdrawal(
        env,
        &Withdrawal {
            id,
            recipient: to.clone(),
            amount,
            withdrawable_from,
            state: WithdrawalState::Unknown,
        },
    );
    env.storage().instance().set(&UNSTAKING, &(outstanding + amount));
    events::publish_approve_staking_withdrawal(env, id, to.clone(), amount, withdrawable_from);
    refresh_stake_best_effort(env);
    Ok(())
}

fn handle_cancel_approved_staking_withdrawal(env: &Env, id: u64) -> Result<(), ContractError> {
    let mut wd = withdrawal::load_withdrawal(env, id).ok_or(ContractError::WithdrawalNotFound)?;
    if wd.state != WithdrawalState::Unknown {
        return Err(ContractError::InvalidState);
    }

    wd.state = WithdrawalState::Canceled;
    withdrawal::save_withdrawal(env, &wd);
    env.storage()
        .instance()
        .set(&UNSTAKING, &(unstaking(env) - wd.amount));
    events::publish_cancel_approved_staking_withdrawal(env, id, wd.recipient, wd.amount);
    refresh_stake_best_effort(env);
    Ok(())
}

fn handle_update_reward_address(env: &Env, reward: &Address) -> Result<(), ContractError> {
    env.storage().instance().set(&REWARD, reward);
    events::publish_update_reward_address(env, reward.clone());

    // Push the revision to the registry when one is linked. The registry may
    // be absent or refuse; the local update stands either way.
    let config = load_config(env)?;
    if let Some(registry) = config.registry {
        let _ = RegistryClient::new(env, &registry)
            .try_revise_reward_address(&env.current_contract_address(), reward);
    }
    Ok(())
}

fn handle_update_staking_tracker(env: &Env, tracker: &Address) -> Result<(), ContractError> {
    if !is_tracker(env, tracker) {
        return Err(ContractError::InvalidContract);
    }
    env.storage().instance().set(&TRACKER, tracker);
    events::publish_update_staking_tracker(env, tracker.clone());
    Ok(())
}

fn handle_update_voter_address(env: &Env, voter: &Option<Address>) -> Result<(), ContractError> {
    match voter {
        Some(addr) => env.storage().instance().set(&VOTER, addr),
        None => env.storage().instance().remove(&VOTER),
    }
    events::publish_update_voter_address(env, voter.clone());

    // Best effort: a tracker conflict must not unwind the executed request.
    // The new voter is pushed as an argument for the same stack reason as
    // `refresh_stake_best_effort`.
    if let Some(tracker) = env.storage().instance().get::<_, Address>(&TRACKER) {
        let _ = TrackerClient::new(env, &tracker)
            .try_notify_voter_changed(&env.current_contract_address(), voter);
    }
    Ok(())
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct CnStaking;

#[contractimpl]
impl CnStaking {
    // ── Deployment handshake ────────────────────────────────────────────────

    /// Configures the contract. The contract is not live until every party
    /// has reviewed the conditions and the lockup total has been deposited.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        contract_validator: Address,
        validator_id: u64,
        reward_address: Address,
        admins: Vec<Address>,
        requirement: u32,
        unlock_times: Vec<u64>,
        unlock_amounts: Vec<i128>,
        token: Address,
        registry: Option<Address>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        if requirement == 0 || requirement > admins.len() {
            return Err(ContractError::InvalidRequirement);
        }
        if admins.len() > MAX_ADMIN {
            return Err(ContractError::AdminLimitReached);
        }
        for i in 0..admins.len() {
            for j in (i + 1)..admins.len() {
                if admins.get_unchecked(i) == admins.get_unchecked(j) {
                    return Err(ContractError::AdminNotUnique);
                }
            }
        }

        let now = env.ledger().timestamp();
        let initial = lockup::validate_schedule(&unlock_times, &unlock_amounts, now)?;

        env.storage().instance().set(
            &CONFIG,
            &StakingConfig {
                validator_id,
                token,
                registry,
            },
        );
        env.storage().instance().set(&CVALID, &contract_validator);
        env.storage().instance().set(&REWARD, &reward_address);
        env.storage().instance().set(&ADMINS, &admins);
        env.storage().instance().set(&REQUIRE, &requirement);
        env.storage().instance().set(
            &LOCKUP,
            &LockupSchedule {
                unlock_times,
                unlock_amounts,
                initial,
                withdrawn: 0,
            },
        );
        Ok(())
    }

    /// Links the staking tracker. Only possible before the contract is live;
    /// afterwards the link changes through an `UpdateStakingTracker` request.
    pub fn set_staking_tracker(
        env: Env,
        caller: Address,
        tracker: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        load_config(&env)?;
        require_not_live(&env)?;

        let is_validator = contract_validator(&env).as_ref() == Some(&caller);
        if !is_validator && !admin_list(&env).contains(&caller) {
            return Err(ContractError::NotAuthorized);
        }
        if !is_tracker(&env, &tracker) {
            return Err(ContractError::InvalidContract);
        }
        env.storage().instance().set(&TRACKER, &tracker);
        events::publish_update_staking_tracker(&env, tracker);
        Ok(())
    }

    /// Sign-off on the initial conditions by the contract validator or an
    /// admin. Each reviewer signs once.
    pub fn review_initial_conditions(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        load_config(&env)?;
        require_not_live(&env)?;

        let is_validator = contract_validator(&env).as_ref() == Some(&caller);
        let admins = admin_list(&env);
        if !is_validator && !admins.contains(&caller) {
            return Err(ContractError::NotAuthorized);
        }

        let mut reviews: Vec<Address> = env
            .storage()
            .instance()
            .get(&REVIEWS)
            .unwrap_or(Vec::new(&env));
        if reviews.contains(&caller) {
            return Err(ContractError::AlreadyReviewed);
        }
        reviews.push_back(caller.clone());
        env.storage().instance().set(&REVIEWS, &reviews);
        events::publish_review_initial_conditions(&env, caller);

        if reviews.len() == admins.len() + 1 {
            events::publish_complete_review(&env);
        }
        Ok(())
    }

    /// Deposits the exact lockup total and brings the contract live. The
    /// contract-validator role ends here.
    pub fn deposit_lockup_stakes(
        env: Env,
        from: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        from.require_auth();
        load_config(&env)?;
        require_not_live(&env)?;

        let reviews: Vec<Address> = env
            .storage()
            .instance()
            .get(&REVIEWS)
            .unwrap_or(Vec::new(&env));
        if reviews.len() != admin_list(&env).len() + 1 {
            return Err(ContractError::ReviewNotFinished);
        }

        let lockup = lockup_of(&env)?;
        if amount != lockup.initial {
            return Err(ContractError::ValueMismatch);
        }

        transfer_or_fail(&env, &from, &env.current_contract_address(), &amount)?;

        env.storage().instance().set(&LIVE, &true);
        env.storage().instance().remove(&CVALID);
        events::publish_deposit_lockup_stakes(&env, from, amount);
        refresh_stake_best_effort(&env);
        Ok(())
    }

    // ── Multisig requests ───────────────────────────────────────────────────

    /// Submits a request and counts the proposer as its first confirmer.
    /// With a requirement of 1 the request executes immediately.
    pub fn submit_request(env: Env, caller: Address, op: AdminOp) -> Result<u64, ContractError> {
        caller.require_auth();
        require_live(&env)?;
        require_admin(&env, &caller)?;

        let id = multisig::next_request_id(&env);
        let request = Request {
            id,
            op: op.clone(),
            proposer: caller.clone(),
            confirmers: Vec::new(&env),
            state: RequestState::NotConfirmed,
        };
        multisig::save_request(&env, &request);
        events::publish_submit_request(&env, id, caller.clone(), op);

        confirm_inner(&env, caller, request);
        Ok(id)
    }

    /// Confirms a request. The full operation is passed again and must match
    /// the stored one. Meeting the requirement triggers execution.
    pub fn confirm_request(
        env: Env,
        caller: Address,
        id: u64,
        op: AdminOp,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_live(&env)?;
        require_admin(&env, &caller)?;

        let request = multisig::load_request(&env, id)
            .filter(|r| r.state == RequestState::NotConfirmed)
            .ok_or(ContractError::RequestNotConfirmable)?;
        if request.op != op {
            return Err(ContractError::RequestMismatch);
        }
        if request.confirmers.contains(&caller) {
            return Err(ContractError::AlreadyConfirmed);
        }

        confirm_inner(&env, caller, request);
        Ok(())
    }

    /// Withdraws a confirmation. When the proposer revokes, the whole
    /// request is canceled.
    pub fn revoke_confirmation(
        env: Env,
        caller: Address,
        id: u64,
        op: AdminOp,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_live(&env)?;
        require_admin(&env, &caller)?;

        let mut request = multisig::load_request(&env, id)
            .filter(|r| r.state == RequestState::NotConfirmed)
            .ok_or(ContractError::RequestNotConfirmable)?;
        if request.op != op {
            return Err(ContractError::RequestMismatch);
        }
        let index = request
            .confirmers
            .first_index_of(&caller)
            .ok_or(ContractError::HasNotConfirmed)?;

        if request.proposer == caller {
            request.state = RequestState::Canceled;
            multisig::save_request(&env, &request);
            events::publish_cancel_request(&env, request.id, request.op);
        } else {
            request.confirmers.remove(index);
            multisig::save_request(&env, &request);
            events::publish_revoke_confirmation(&env, request.id, caller, request.confirmers);
        }
        Ok(())
    }

    // ── Free stake ──────────────────────────────────────────────────────────

    /// Deposits free stake on top of the lockup.
    pub fn stake(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        require_live(&env)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        transfer_or_fail(&env, &from, &env.current_contract_address(), &amount)?;

        let staking = free_staking(&env) + amount;
        env.storage().instance().set(&STAKING, &staking);
        events::publish_stake(&env, from, amount, staking);
        refresh_stake_best_effort(&env);
        Ok(())
    }

    /// Pays out an approved withdrawal inside its window. Before the window
    /// it fails; after the window it lapses and the withdrawal is canceled
    /// without error.
    pub fn withdraw_approved_staking(
        env: Env,
        caller: Address,
        id: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_live(&env)?;
        require_admin(&env, &caller)?;

        let mut wd =
            withdrawal::load_withdrawal(&env, id).ok_or(ContractError::WithdrawalNotFound)?;
        if wd.state != WithdrawalState::Unknown {
            return Err(ContractError::InvalidState);
        }

        let now = env.ledger().timestamp();
        if now < wd.withdrawable_from {
            return Err(ContractError::NotWithdrawableYet);
        }
        if now > wd.withdrawable_from + STAKE_LOCKUP {
            wd.state = WithdrawalState::Canceled;
            withdrawal::save_withdrawal(&env, &wd);
            env.storage()
                .instance()
                .set(&UNSTAKING, &(unstaking(&env) - wd.amount));
            events::publish_cancel_approved_staking_withdrawal(
                &env,
                id,
                wd.recipient,
                wd.amount,
            );
            refresh_stake_best_effort(&env);
            return Ok(());
        }

        transfer_or_fail(&env, &env.current_contract_address(), &wd.recipient, &wd.amount)?;

        wd.state = WithdrawalState::Transferred;
        withdrawal::save_withdrawal(&env, &wd);
        env.storage()
            .instance()
            .set(&STAKING, &(free_staking(&env) - wd.amount));
        env.storage()
            .instance()
            .set(&UNSTAKING, &(unstaking(&env) - wd.amount));
        events::publish_withdraw_approved_staking(&env, id, wd.recipient, wd.amount);
        refresh_stake_best_effort(&env);
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn get_request_ids(
        env: Env,
        from: u64,
        to: u64,
        state: Option<RequestState>,
    ) -> Vec<u64> {
        multisig::request_ids(&env, from, to, state)
    }

    pub fn get_request(env: Env, id: u64) -> Option<Request> {
        multisig::load_request(&env, id)
    }

    pub fn get_withdrawal_ids(
        env: Env,
        from: u64,
        to: u64,
        state: Option<WithdrawalState>,
    ) -> Vec<u64> {
        withdrawal::withdrawal_ids(&env, from, to, state)
    }

    pub fn get_withdrawal(env: Env, id: u64) -> Option<Withdrawal> {
        withdrawal::load_withdrawal(&env, id)
    }

    /// Reviewer roster in canonical order: contract validator first, then
    /// admins. Meaningless once live.
    pub fn get_reviewers(env: Env) -> Result<Vec<Address>, ContractError> {
        load_config(&env)?;
        require_not_live(&env)?;

        let mut reviewers = Vec::new(&env);
        if let Some(cv) = contract_validator(&env) {
            reviewers.push_back(cv);
        }
        for admin in admin_list(&env).iter() {
            reviewers.push_back(admin);
        }
        Ok(reviewers)
    }

    pub fn get_state(env: Env) -> Result<ContractState, ContractError> {
        let config = load_config(&env)?;
        let lockup = lockup_of(&env)?;
        let admins = admin_list(&env);
        let reviews: Vec<Address> = env
            .storage()
            .instance()
            .get(&REVIEWS)
            .unwrap_or(Vec::new(&env));
        let reward: Address = env
            .storage()
            .instance()
            .get(&REWARD)
            .ok_or(ContractError::NotInitialized)?;

        Ok(ContractState {
            contract_validator: contract_validator(&env),
            validator_id: config.validator_id,
            reward_address: reward,
            requirement: requirement_of(&env),
            all_reviewed: reviews.len() == admins.len() + 1,
            admins,
            unlock_times: lockup.unlock_times,
            unlock_amounts: lockup.unlock_amounts,
            initialized: is_live(&env),
        })
    }

    pub fn get_lockup_info(env: Env) -> Result<LockupInfo, ContractError> {
        require_live(&env)?;
        let lockup = lockup_of(&env)?;
        let now = env.ledger().timestamp();
        Ok(LockupInfo {
            initial: lockup.initial,
            remaining: lockup.remaining(),
            withdrawable: lockup.withdrawable(now),
            unlock_times: lockup.unlock_times,
            unlock_amounts: lockup.unlock_amounts,
        })
    }

    pub fn is_initialized(env: Env) -> bool {
        is_live(&env)
    }

    pub fn admins(env: Env) -> Vec<Address> {
        admin_list(&env)
    }

    pub fn is_admin(env: Env, who: Address) -> bool {
        admin_list(&env).contains(&who)
    }

    pub fn requirement(env: Env) -> u32 {
        requirement_of(&env)
    }

    pub fn validator_id(env: Env) -> u64 {
        load_config(&env).map(|c| c.validator_id).unwrap_or(0)
    }

    pub fn reward_address(env: Env) -> Option<Address> {
        env.storage().instance().get(&REWARD)
    }

    pub fn voter_address(env: Env) -> Option<Address> {
        env.storage().instance().get(&VOTER)
    }

    pub fn staking_tracker(env: Env) -> Option<Address> {
        env.storage().instance().get(&TRACKER)
    }

    /// Balance the tracker counts: remaining lockup plus free stake, minus
    /// stake earmarked by pending withdrawals.
    pub fn staked_balance(env: Env) -> i128 {
        let lockup_remaining = lockup_of(&env).map(|l| l.remaining()).unwrap_or(0);
        lockup_remaining + free_staking(&env) - unstaking(&env)
    }

    pub fn free_stake(env: Env) -> i128 {
        free_staking(&env)
    }

    pub fn unstaking_amount(env: Env) -> i128 {
        unstaking(&env)
    }

    pub fn contract_type(env: Env) -> Symbol {
        Symbol::new(&env, "CnStakingContract")
    }

    pub fn version(_env: Env) -> u32 {
        2
    }
}
