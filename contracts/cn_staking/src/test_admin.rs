extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::multisig::{AdminOp, RequestState};
use crate::test::{live_setup, Setup};

fn pass(s: &Setup, op: AdminOp) -> u64 {
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.confirm_request(&s.admins[1], &id, &op);
    id
}

fn state_of(s: &Setup, id: u64) -> RequestState {
    s.client.get_request(&id).unwrap().state
}

#[test]
fn test_add_admin() {
    let s = live_setup();

    let new_admin = Address::generate(&s.env);
    let id = pass(&s, AdminOp::AddAdmin(new_admin.clone()));
    assert_eq!(state_of(&s, id), RequestState::Executed);
    assert_eq!(s.client.admins().len(), 4);
    assert!(s.client.is_admin(&new_admin));

    // The new admin participates in the multisig right away.
    let op = AdminOp::UpdateRequirement(4);
    let rid = s.client.submit_request(&new_admin, &op);
    s.client.confirm_request(&s.admins[0], &rid, &op);
    assert_eq!(s.client.requirement(), 4);
}

#[test]
fn test_delete_admin() {
    let s = live_setup();

    let id = pass(&s, AdminOp::DeleteAdmin(s.admins[2].clone()));
    assert_eq!(state_of(&s, id), RequestState::Executed);
    assert_eq!(s.client.admins().len(), 2);
    assert!(!s.client.is_admin(&s.admins[2]));
}

#[test]
fn test_delete_admin_cannot_break_requirement() {
    let s = live_setup();

    // 2-of-3: dropping to 2 admins is fine, dropping to 1 is not.
    pass(&s, AdminOp::DeleteAdmin(s.admins[2].clone()));

    let id = pass(&s, AdminOp::DeleteAdmin(s.admins[1].clone()));
    assert_eq!(state_of(&s, id), RequestState::ExecutionFailed);
    assert_eq!(s.client.admins().len(), 2);
}

#[test]
fn test_delete_unknown_admin_fails() {
    let s = live_setup();

    let id = pass(&s, AdminOp::DeleteAdmin(Address::generate(&s.env)));
    assert_eq!(state_of(&s, id), RequestState::ExecutionFailed);
}

#[test]
fn test_update_requirement_bounds() {
    let s = live_setup();

    let id = pass(&s, AdminOp::UpdateRequirement(0));
    assert_eq!(state_of(&s, id), RequestState::ExecutionFailed);

    let id = pass(&s, AdminOp::UpdateRequirement(4));
    assert_eq!(state_of(&s, id), RequestState::ExecutionFailed);

    assert_eq!(s.client.requirement(), 2);
}

#[test]
fn test_clear_request_sweeps_outstanding() {
    let s = live_setup();

    let stale_a = s
        .client
        .submit_request(&s.admins[0], &AdminOp::UpdateRequirement(3));
    let stale_b = s
        .client
        .submit_request(&s.admins[1], &AdminOp::DeleteAdmin(s.admins[2].clone()));

    let id = pass(&s, AdminOp::ClearRequest);
    assert_eq!(state_of(&s, id), RequestState::Executed);
    assert_eq!(state_of(&s, stale_a), RequestState::Canceled);
    assert_eq!(state_of(&s, stale_b), RequestState::Canceled);
}

#[test]
fn test_update_reward_address() {
    let s = live_setup();

    let new_reward = Address::generate(&s.env);
    let id = pass(&s, AdminOp::UpdateRewardAddress(new_reward.clone()));
    assert_eq!(state_of(&s, id), RequestState::Executed);
    assert_eq!(s.client.reward_address(), Some(new_reward));
}

#[test]
fn test_update_voter_address() {
    let s = live_setup();
    assert_eq!(s.client.voter_address(), None);

    let voter = Address::generate(&s.env);
    pass(&s, AdminOp::UpdateVoterAddress(Some(voter.clone())));
    assert_eq!(s.client.voter_address(), Some(voter));

    // Unsetting maps back to no voter.
    pass(&s, AdminOp::UpdateVoterAddress(None));
    assert_eq!(s.client.voter_address(), None);
}
