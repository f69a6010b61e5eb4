extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::multisig::{AdminOp, RequestState};
use crate::test::{live_setup, Setup};
use crate::ContractError;

fn pass(s: &Setup, op: AdminOp) -> u64 {
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.confirm_request(&s.admins[1], &id, &op);
    id
}

#[test]
fn test_submit_auto_confirms_proposer() {
    let s = live_setup();

    let op = AdminOp::UpdateRequirement(3);
    let id = s.client.submit_request(&s.admins[0], &op);
    assert_eq!(id, 0);

    let request = s.client.get_request(&id).unwrap();
    assert_eq!(request.state, RequestState::NotConfirmed);
    assert_eq!(request.proposer, s.admins[0]);
    assert_eq!(request.confirmers, vec![&s.env, s.admins[0].clone()]);
    assert_eq!(request.op, op);
}

#[test]
fn test_meeting_requirement_executes() {
    let s = live_setup();

    let id = pass(&s, AdminOp::UpdateRequirement(3));
    let request = s.client.get_request(&id).unwrap();
    assert_eq!(request.state, RequestState::Executed);
    assert_eq!(s.client.requirement(), 3);
}

#[test]
fn test_requirement_of_one_executes_on_submit() {
    let s = live_setup();
    pass(&s, AdminOp::UpdateRequirement(1));

    let op = AdminOp::UpdateRequirement(2);
    let id = s.client.submit_request(&s.admins[2], &op);
    assert_eq!(
        s.client.get_request(&id).unwrap().state,
        RequestState::Executed
    );
    assert_eq!(s.client.requirement(), 2);
}

#[test]
fn test_only_admins_touch_the_ledger() {
    let s = live_setup();
    let stranger = Address::generate(&s.env);
    let op = AdminOp::ClearRequest;

    let result = s.client.try_submit_request(&stranger, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAdmin),
        _ => unreachable!("Expected NotAdmin error"),
    }

    let id = s.client.submit_request(&s.admins[0], &op);
    let result = s.client.try_confirm_request(&stranger, &id, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAdmin),
        _ => unreachable!("Expected NotAdmin error"),
    }
}

#[test]
fn test_confirm_preconditions() {
    let s = live_setup();

    let op = AdminOp::UpdateRequirement(3);
    let id = s.client.submit_request(&s.admins[0], &op);

    // Unknown id.
    let result = s.client.try_confirm_request(&s.admins[1], &99, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RequestNotConfirmable),
        _ => unreachable!("Expected RequestNotConfirmable error"),
    }

    // The payload must match the stored request exactly.
    let result = s
        .client
        .try_confirm_request(&s.admins[1], &id, &AdminOp::UpdateRequirement(2));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RequestMismatch),
        _ => unreachable!("Expected RequestMismatch error"),
    }

    // Double confirm by the proposer.
    let result = s.client.try_confirm_request(&s.admins[0], &id, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyConfirmed),
        _ => unreachable!("Expected AlreadyConfirmed error"),
    }

    // Once executed, the request is no longer confirmable.
    s.client.confirm_request(&s.admins[1], &id, &op);
    let result = s.client.try_confirm_request(&s.admins[2], &id, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RequestNotConfirmable),
        _ => unreachable!("Expected RequestNotConfirmable error"),
    }
}

#[test]
fn test_revoke_by_confirmer_reopens_slot() {
    let s = live_setup();
    pass(&s, AdminOp::UpdateRequirement(3));

    let op = AdminOp::ClearRequest;
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.confirm_request(&s.admins[1], &id, &op);

    // A non-confirmer cannot revoke.
    let result = s.client.try_revoke_confirmation(&s.admins[2], &id, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::HasNotConfirmed),
        _ => unreachable!("Expected HasNotConfirmed error"),
    }

    s.client.revoke_confirmation(&s.admins[1], &id, &op);
    let request = s.client.get_request(&id).unwrap();
    assert_eq!(request.state, RequestState::NotConfirmed);
    assert_eq!(request.confirmers, vec![&s.env, s.admins[0].clone()]);

    // The freed slot can be filled again, completing the request.
    s.client.confirm_request(&s.admins[2], &id, &op);
    s.client.confirm_request(&s.admins[1], &id, &op);
    assert_eq!(
        s.client.get_request(&id).unwrap().state,
        RequestState::Executed
    );
}

#[test]
fn test_proposer_revoke_cancels_request() {
    let s = live_setup();

    let op = AdminOp::UpdateRequirement(3);
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.revoke_confirmation(&s.admins[0], &id, &op);

    let request = s.client.get_request(&id).unwrap();
    assert_eq!(request.state, RequestState::Canceled);

    let result = s.client.try_confirm_request(&s.admins[1], &id, &op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RequestNotConfirmable),
        _ => unreachable!("Expected RequestNotConfirmable error"),
    }
}

#[test]
fn test_handler_failure_is_soft() {
    let s = live_setup();

    // Adding an existing admin cannot succeed, but confirming the request
    // must: the failure lands in the request state, not the transaction.
    let op = AdminOp::AddAdmin(s.admins[2].clone());
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.confirm_request(&s.admins[1], &id, &op);

    let request = s.client.get_request(&id).unwrap();
    assert_eq!(request.state, RequestState::ExecutionFailed);
    assert_eq!(s.client.admins().len(), 3);
}

#[test]
fn test_admin_set_change_sweeps_outstanding() {
    let s = live_setup();

    let stale_op = AdminOp::UpdateRequirement(3);
    let stale = s.client.submit_request(&s.admins[0], &stale_op);

    let new_admin = Address::generate(&s.env);
    pass(&s, AdminOp::AddAdmin(new_admin));

    // The outstanding request died with the admin-set change.
    assert_eq!(
        s.client.get_request(&stale).unwrap().state,
        RequestState::Canceled
    );
    let result = s.client.try_confirm_request(&s.admins[1], &stale, &stale_op);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::RequestNotConfirmable),
        _ => unreachable!("Expected RequestNotConfirmable error"),
    }
}

#[test]
fn test_request_id_pagination() {
    let s = live_setup();

    for _ in 0..4 {
        s.client.submit_request(&s.admins[0], &AdminOp::ClearRequest);
    }
    let op = AdminOp::UpdateRequirement(3);
    let executed = s.client.submit_request(&s.admins[1], &op);
    s.client.confirm_request(&s.admins[0], &executed, &op);

    // The executed requirement change swept the four outstanding requests.
    assert_eq!(s.client.get_request_ids(&0, &0, &None).len(), 5);
    assert_eq!(
        s.client
            .get_request_ids(&0, &0, &Some(RequestState::Canceled))
            .len(),
        4
    );
    assert_eq!(
        s.client
            .get_request_ids(&0, &0, &Some(RequestState::Executed)),
        vec![&s.env, executed]
    );

    // Half-open range; zero or oversized `to` runs to the end.
    assert_eq!(s.client.get_request_ids(&1, &3, &None), vec![&s.env, 1u64, 2u64]);
    assert_eq!(s.client.get_request_ids(&3, &100, &None), vec![&s.env, 3u64, 4u64]);
}
