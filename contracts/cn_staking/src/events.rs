#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Vec};

use crate::multisig::AdminOp;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the lockup deposit completes and the contract goes live.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositLockupStakesEvent {
    pub from: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired each time a reviewer signs off on the initial conditions.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReviewInitialConditionsEvent {
    pub reviewer: Address,
    pub timestamp: u64,
}

/// Fired when the last reviewer signs off.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompleteReviewEvent {
    pub timestamp: u64,
}

/// Fired when an admin submits a new request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitRequestEvent {
    pub request_id: u64,
    pub proposer: Address,
    pub op: AdminOp,
    pub timestamp: u64,
}

/// Fired for every confirmation, including the proposer's automatic one.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmRequestEvent {
    pub request_id: u64,
    pub confirmer: Address,
    pub confirmers: Vec<Address>,
    pub timestamp: u64,
}

/// Fired when a non-proposer withdraws a confirmation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevokeConfirmationEvent {
    pub request_id: u64,
    pub revoker: Address,
    pub confirmers: Vec<Address>,
    pub timestamp: u64,
}

/// Fired when a request is canceled, either by its proposer or by a
/// successful admin-set change sweeping outstanding requests.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CancelRequestEvent {
    pub request_id: u64,
    pub op: AdminOp,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecuteRequestSuccessEvent {
    pub request_id: u64,
    pub op: AdminOp,
    pub timestamp: u64,
}

/// Fired when a fully-confirmed request's handler fails. The enclosing
/// confirmation still succeeds.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecuteRequestFailureEvent {
    pub request_id: u64,
    pub op: AdminOp,
    pub error: u32,
    pub timestamp: u64,
}

/// Fired when free stake is deposited.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeEvent {
    pub from: Address,
    pub amount: i128,
    pub staking_total: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawLockupStakingEvent {
    pub recipient: Address,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApproveStakingWithdrawalEvent {
    pub withdrawal_id: u64,
    pub recipient: Address,
    pub amount: i128,
    pub withdrawable_from: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CancelApprovedStakingWithdrawalEvent {
    pub withdrawal_id: u64,
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawApprovedStakingEvent {
    pub withdrawal_id: u64,
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateRewardAddressEvent {
    pub reward_address: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateStakingTrackerEvent {
    pub tracker: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateVoterAddressEvent {
    pub voter: Option<Address>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddAdminEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeleteAdminEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpdateRequirementEvent {
    pub requirement: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_deposit_lockup_stakes(env: &Env, from: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"),),
        DepositLockupStakesEvent {
            from,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_review_initial_conditions(env: &Env, reviewer: Address) {
    env.events().publish(
        (symbol_short!("REVIEW"), reviewer.clone()),
        ReviewInitialConditionsEvent {
            reviewer,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_complete_review(env: &Env) {
    env.events().publish(
        (symbol_short!("REVIEWED"),),
        CompleteReviewEvent {
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_submit_request(env: &Env, request_id: u64, proposer: Address, op: AdminOp) {
    env.events().publish(
        (symbol_short!("SUBMIT"), request_id),
        SubmitRequestEvent {
            request_id,
            proposer,
            op,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_confirm_request(
    env: &Env,
    request_id: u64,
    confirmer: Address,
    confirmers: Vec<Address>,
) {
    env.events().publish(
        (symbol_short!("CONFIRM"), request_id),
        ConfirmRequestEvent {
            request_id,
            confirmer,
            confirmers,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_revoke_confirmation(
    env: &Env,
    request_id: u64,
    revoker: Address,
    confirmers: Vec<Address>,
) {
    env.events().publish(
        (symbol_short!("REVOKE"), request_id),
        RevokeConfirmationEvent {
            request_id,
            revoker,
            confirmers,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_cancel_request(env: &Env, request_id: u64, op: AdminOp) {
    env.events().publish(
        (symbol_short!("CANCELREQ"), request_id),
        CancelRequestEvent {
            request_id,
            op,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_execute_request_success(env: &Env, request_id: u64, op: AdminOp) {
    env.events().publish(
        (symbol_short!("EXEC_OK"), request_id),
        ExecuteRequestSuccessEvent {
            request_id,
            op,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_execute_request_failure(env: &Env, request_id: u64, op: AdminOp, error: u32) {
    env.events().publish(
        (symbol_short!("EXEC_FAIL"), request_id),
        ExecuteRequestFailureEvent {
            request_id,
            op,
            error,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake(env: &Env, from: Address, amount: i128, staking_total: i128) {
    env.events().publish(
        (symbol_short!("STAKE"), from.clone()),
        StakeEvent {
            from,
            amount,
            staking_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_lockup_staking(
    env: &Env,
    recipient: Address,
    amount: i128,
    remaining: i128,
) {
    env.events().publish(
        (symbol_short!("WD_LOCKUP"), recipient.clone()),
        WithdrawLockupStakingEvent {
            recipient,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_approve_staking_withdrawal(
    env: &Env,
    withdrawal_id: u64,
    recipient: Address,
    amount: i128,
    withdrawable_from: u64,
) {
    env.events().publish(
        (symbol_short!("APPROVE_W"), withdrawal_id),
        ApproveStakingWithdrawalEvent {
            withdrawal_id,
            recipient,
            amount,
            withdrawable_from,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_cancel_approved_staking_withdrawal(
    env: &Env,
    withdrawal_id: u64,
    recipient: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("CANCEL_W"), withdrawal_id),
        CancelApprovedStakingWithdrawalEvent {
            withdrawal_id,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw_approved_staking(
    env: &Env,
    withdrawal_id: u64,
    recipient: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("WD_STAKE"), withdrawal_id),
        WithdrawApprovedStakingEvent {
            withdrawal_id,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_update_reward_address(env: &Env, reward_address: Address) {
    env.events().publish(
        (symbol_short!("UPD_RWD"),),
        UpdateRewardAddressEvent {
            reward_address,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_update_staking_tracker(env: &Env, tracker: Address) {
    env.events().publish(
        (symbol_short!("UPD_TRK"),),
        UpdateStakingTrackerEvent {
            tracker,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_update_voter_address(env: &Env, voter: Option<Address>) {
    env.events().publish(
        (symbol_short!("UPD_VOTER"),),
        UpdateVoterAddressEvent {
            voter,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_add_admin(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("ADD_ADM"), admin.clone()),
        AddAdminEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delete_admin(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("DEL_ADM"), admin.clone()),
        DeleteAdminEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_update_requirement(env: &Env, requirement: u32) {
    env.events().publish(
        (symbol_short!("UPD_REQ"),),
        UpdateRequirementEvent {
            requirement,
            timestamp: env.ledger().timestamp(),
        },
    );
}
