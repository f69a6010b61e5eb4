extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::multisig::{AdminOp, RequestState};
use crate::test::{balance, live_setup, mint, set_time, Setup, LOCKUP_TOTAL, START};
use crate::withdrawal::WithdrawalState;
use crate::ContractError;
use common::STAKE_LOCKUP;

fn pass(s: &Setup, op: AdminOp) -> u64 {
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.confirm_request(&s.admins[1], &id, &op);
    id
}

fn stake(s: &Setup, amount: i128) -> Address {
    let staker = Address::generate(&s.env);
    mint(&s.env, &s.token, &staker, amount);
    s.client.stake(&staker, &amount);
    staker
}

/// Passes an approval request and returns the withdrawal id it allocated.
fn approve(s: &Setup, recipient: &Address, amount: i128) -> u64 {
    let before = s.client.get_withdrawal_ids(&0, &0, &None).len();
    let rid = pass(
        s,
        AdminOp::ApproveStakingWithdrawal(recipient.clone(), amount),
    );
    assert_eq!(
        s.client.get_request(&rid).unwrap().state,
        RequestState::Executed
    );
    u64::from(before)
}

#[test]
fn test_stake_adds_to_tracked_balance() {
    let s = live_setup();
    stake(&s, 1_000);

    assert_eq!(s.client.free_stake(), 1_000);
    assert_eq!(s.client.staked_balance(), LOCKUP_TOTAL + 1_000);
    assert_eq!(balance(&s.env, &s.token, &s.contract_id), LOCKUP_TOTAL + 1_000);
}

#[test]
fn test_stake_rejects_bad_amounts() {
    let s = live_setup();
    let staker = Address::generate(&s.env);

    for amount in [0i128, -1i128] {
        let result = s.client.try_stake(&staker, &amount);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
            _ => unreachable!("Expected InvalidAmount error"),
        }
    }

    // No token balance: the transfer itself fails.
    let result = s.client.try_stake(&staker, &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TransferFailed),
        _ => unreachable!("Expected TransferFailed error"),
    }
}

#[test]
fn test_approve_reserves_stake() {
    let s = live_setup();
    stake(&s, 1_000);

    let recipient = Address::generate(&s.env);
    let wid = approve(&s, &recipient, 400);

    let wd = s.client.get_withdrawal(&wid).unwrap();
    assert_eq!(wd.state, WithdrawalState::Unknown);
    assert_eq!(wd.amount, 400);
    assert_eq!(wd.withdrawable_from, START + STAKE_LOCKUP);

    // Reserved stake leaves the tracked balance, not the free stake.
    assert_eq!(s.client.free_stake(), 1_000);
    assert_eq!(s.client.unstaking_amount(), 400);
    assert_eq!(s.client.staked_balance(), LOCKUP_TOTAL + 600);
}

#[test]
fn test_approve_beyond_free_stake_fails() {
    let s = live_setup();
    stake(&s, 1_000);
    let recipient = Address::generate(&s.env);

    let rid = pass(
        &s,
        AdminOp::ApproveStakingWithdrawal(recipient.clone(), 1_001),
    );
    assert_eq!(
        s.client.get_request(&rid).unwrap().state,
        RequestState::ExecutionFailed
    );
}

#[test]
fn test_concurrent_approvals_cannot_overbook() {
    let s = live_setup();
    stake(&s, 1_000);
    let recipient = Address::generate(&s.env);

    approve(&s, &recipient, 700);

    // A second approval for 700 would reserve 1400 of 1000. It fails softly
    // while the first reservation stays intact.
    let rid = pass(&s, AdminOp::ApproveStakingWithdrawal(recipient.clone(), 700));
    assert_eq!(
        s.client.get_request(&rid).unwrap().state,
        RequestState::ExecutionFailed
    );
    assert_eq!(s.client.unstaking_amount(), 700);

    // Whatever still fits can be reserved.
    approve(&s, &recipient, 300);
    assert_eq!(s.client.unstaking_amount(), 1_000);
}

#[test]
fn test_withdraw_window() {
    let s = live_setup();
    stake(&s, 1_000);
    let recipient = Address::generate(&s.env);
    let wid = approve(&s, &recipient, 400);

    // Too early.
    let result = s.client.try_withdraw_approved_staking(&s.admins[0], &wid);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotWithdrawableYet),
        _ => unreachable!("Expected NotWithdrawableYet error"),
    }

    set_time(&s.env, START + STAKE_LOCKUP);
    s.client.withdraw_approved_staking(&s.admins[0], &wid);

    assert_eq!(balance(&s.env, &s.token, &recipient), 400);
    assert_eq!(s.client.free_stake(), 600);
    assert_eq!(s.client.unstaking_amount(), 0);
    assert_eq!(
        s.client.get_withdrawal(&wid).unwrap().state,
        WithdrawalState::Transferred
    );

    // A paid-out withdrawal cannot be paid again.
    let result = s.client.try_withdraw_approved_staking(&s.admins[0], &wid);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidState),
        _ => unreachable!("Expected InvalidState error"),
    }
}

#[test]
fn test_stale_withdrawal_lapses_without_error() {
    let s = live_setup();
    stake(&s, 1_000);
    let recipient = Address::generate(&s.env);
    let wid = approve(&s, &recipient, 400);

    // One past the end of the payout window.
    set_time(&s.env, START + 2 * STAKE_LOCKUP + 1);
    s.client.withdraw_approved_staking(&s.admins[0], &wid);

    assert_eq!(balance(&s.env, &s.token, &recipient), 0);
    assert_eq!(s.client.free_stake(), 1_000);
    assert_eq!(s.client.unstaking_amount(), 0);
    assert_eq!(
        s.client.get_withdrawal(&wid).unwrap().state,
        WithdrawalState::Canceled
    );
}

#[test]
fn test_cancel_approved_withdrawal() {
    let s = live_setup();
    stake(&s, 1_000);
    let recipient = Address::generate(&s.env);
    let wid = approve(&s, &recipient, 400);

    let rid = pass(&s, AdminOp::CancelApprovedStakingWithdrawal(wid));
    assert_eq!(
        s.client.get_request(&rid).unwrap().state,
        RequestState::Executed
    );
    assert_eq!(
        s.client.get_withdrawal(&wid).unwrap().state,
        WithdrawalState::Canceled
    );
    assert_eq!(s.client.unstaking_amount(), 0);

    // Canceling twice fails softly.
    let rid = pass(&s, AdminOp::CancelApprovedStakingWithdrawal(wid));
    assert_eq!(
        s.client.get_request(&rid).unwrap().state,
        RequestState::ExecutionFailed
    );

    // So does canceling a withdrawal that never existed.
    let rid = pass(&s, AdminOp::CancelApprovedStakingWithdrawal(99));
    assert_eq!(
        s.client.get_request(&rid).unwrap().state,
        RequestState::ExecutionFailed
    );
}

#[test]
fn test_withdrawal_id_pagination() {
    let s = live_setup();
    stake(&s, 1_000);
    let recipient = Address::generate(&s.env);

    for amount in [100i128, 200, 300] {
        approve(&s, &recipient, amount);
    }
    pass(&s, AdminOp::CancelApprovedStakingWithdrawal(1));

    assert_eq!(s.client.get_withdrawal_ids(&0, &0, &None).len(), 3);
    assert_eq!(
        s.client
            .get_withdrawal_ids(&0, &0, &Some(WithdrawalState::Unknown))
            .len(),
        2
    );
    assert_eq!(
        s.client
            .get_withdrawal_ids(&0, &0, &Some(WithdrawalState::Canceled))
            .len(),
        1
    );
    assert_eq!(s.client.get_withdrawal_ids(&1, &2, &None).len(), 1);
}
