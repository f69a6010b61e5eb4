extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec, Address, Env,
};
use validator_registry::{ValidatorRegistry, ValidatorRegistryClient};

use crate::multisig::{AdminOp, RequestState};
use crate::test::{
    go_live, mint, setup, MockTracker, MockTrackerClient, Setup, WrongVersionTracker, LOCKUP_TOTAL,
    START, UNLOCK_1,
};
use crate::{CnStaking, CnStakingClient};

fn pass(s: &Setup, op: AdminOp) -> u64 {
    let id = s.client.submit_request(&s.admins[0], &op);
    s.client.confirm_request(&s.admins[1], &id, &op);
    id
}

fn linked_setup() -> (Setup, MockTrackerClient<'static>) {
    let s = setup();
    let tracker_id = s.env.register(MockTracker, ());
    s.client.set_staking_tracker(&s.admins[0], &tracker_id);
    go_live(&s);
    let tracker = MockTrackerClient::new(&s.env, &tracker_id);
    (s, tracker)
}

#[test]
fn test_balance_changes_notify_tracker() {
    let (s, tracker) = linked_setup();

    // The lockup deposit already pushed the full balance once.
    assert_eq!(
        tracker.stake_calls(),
        vec![&s.env, (s.contract_id.clone(), LOCKUP_TOTAL)]
    );

    let staker = Address::generate(&s.env);
    mint(&s.env, &s.token, &staker, 500);
    s.client.stake(&staker, &500);
    assert_eq!(
        tracker.stake_calls().get_unchecked(1),
        (s.contract_id.clone(), LOCKUP_TOTAL + 500)
    );

    crate::test::set_time(&s.env, UNLOCK_1);
    pass(
        &s,
        AdminOp::WithdrawLockupStaking(Address::generate(&s.env), 100),
    );
    assert_eq!(
        tracker.stake_calls().get_unchecked(2),
        (s.contract_id.clone(), LOCKUP_TOTAL + 500 - 100)
    );
}

#[test]
fn test_voter_update_notifies_tracker() {
    let (s, tracker) = linked_setup();

    let voter = Address::generate(&s.env);
    pass(&s, AdminOp::UpdateVoterAddress(Some(voter.clone())));
    assert_eq!(s.client.voter_address(), Some(voter.clone()));
    assert_eq!(
        tracker.voter_calls(),
        vec![&s.env, (s.contract_id.clone(), Some(voter))]
    );
}

#[test]
fn test_voter_update_survives_tracker_rejection() {
    let (s, tracker) = linked_setup();
    tracker.set_reject_voter(&true);

    // The tracker refuses the mapping; the request still executes and the
    // local voter is set.
    let voter = Address::generate(&s.env);
    let id = pass(&s, AdminOp::UpdateVoterAddress(Some(voter.clone())));
    assert_eq!(
        s.client.get_request(&id).unwrap().state,
        RequestState::Executed
    );
    assert_eq!(s.client.voter_address(), Some(voter));
    assert_eq!(tracker.voter_calls().len(), 0);
}

#[test]
fn test_update_staking_tracker_reroutes_notifications() {
    let (s, old_tracker) = linked_setup();

    let new_tracker_id = s.env.register(MockTracker, ());
    let id = pass(&s, AdminOp::UpdateStakingTracker(new_tracker_id.clone()));
    assert_eq!(
        s.client.get_request(&id).unwrap().state,
        RequestState::Executed
    );
    assert_eq!(s.client.staking_tracker(), Some(new_tracker_id.clone()));

    let calls_before = old_tracker.stake_calls().len();
    let staker = Address::generate(&s.env);
    mint(&s.env, &s.token, &staker, 500);
    s.client.stake(&staker, &500);

    let new_tracker = MockTrackerClient::new(&s.env, &new_tracker_id);
    assert_eq!(old_tracker.stake_calls().len(), calls_before);
    assert_eq!(new_tracker.stake_calls().len(), 1);
}

#[test]
fn test_update_staking_tracker_probes_target() {
    let (s, _tracker) = linked_setup();

    let wrong = s.env.register(WrongVersionTracker, ());
    let id = pass(&s, AdminOp::UpdateStakingTracker(wrong));
    assert_eq!(
        s.client.get_request(&id).unwrap().state,
        RequestState::ExecutionFailed
    );
}

#[test]
fn test_reward_revision_reaches_registry() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|l| l.timestamp = START);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let registry_id = env.register(ValidatorRegistry, ());
    let registry = ValidatorRegistryClient::new(&env, &registry_id);

    let contract_id = env.register(CnStaking, ());
    let client = CnStakingClient::new(&env, &contract_id);

    let cv = Address::generate(&env);
    let reward = Address::generate(&env);
    let a1 = Address::generate(&env);
    let a2 = Address::generate(&env);

    client.initialize(
        &cv,
        &700u64,
        &reward,
        &vec![&env, a1.clone(), a2.clone()],
        &2u32,
        &vec![&env, UNLOCK_1],
        &vec![&env, LOCKUP_TOTAL],
        &token,
        &Some(registry_id.clone()),
    );
    registry.register(
        &vec![&env, 700u64],
        &vec![&env, contract_id.clone()],
        &vec![&env, reward.clone()],
    );

    client.review_initial_conditions(&cv);
    client.review_initial_conditions(&a1);
    client.review_initial_conditions(&a2);
    mint(&env, &token, &cv, LOCKUP_TOTAL);
    client.deposit_lockup_stakes(&cv, &LOCKUP_TOTAL);

    let new_reward = Address::generate(&env);
    let op = AdminOp::UpdateRewardAddress(new_reward.clone());
    let id = client.submit_request(&a1, &op);
    client.confirm_request(&a2, &id, &op);

    assert_eq!(client.reward_address(), Some(new_reward.clone()));
    assert_eq!(registry.reward_address(&700), Some(new_reward));
}
