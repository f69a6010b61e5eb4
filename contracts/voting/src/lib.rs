//! Proposal-based governance weighted by tracker snapshots.
//!
//! A proposal pins its quorum figures to a fresh tracker snapshot created at
//! propose time, collects votes from mapped voter accounts while the voting
//! window is open, and, once passed and queued, executes its actions after a
//! delay. Proposal state is derived on demand from the ledger sequence and
//! the stored flags, never stored directly.

#![no_std]

use common::interfaces::TrackerClient;
use common::votes;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, token, Address, Env,
    String, Symbol, TryFromVal, Val, Vec,
};

pub mod events;


// Execution scheduling constants, in ledger sequences.
pub const QUEUE_TIMEOUT: u32 = 604_800;
pub const EXEC_DELAY: u32 = 172_800;
pub const EXEC_TIMEOUT: u32 = 604_800;

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const ACCESS: Symbol = symbol_short!("ACCESS");
const TIMING: Symbol = symbol_short!("TIMING");
const PROP_CNT: Symbol = symbol_short!("PROP_CNT");

// ── Types ───────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotingConfig {
    pub tracker: Address,
    pub secretary: Option<Address>,
    pub fund_token: Address,
}

/// Which of the two principals may propose and which may queue/execute.
/// At least one propose path and one execute path must stay enabled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRule {
    pub secretary_propose: bool,
    pub voter_propose: bool,
    pub secretary_execute: bool,
    pub voter_execute: bool,
}

/// Bounds on the voting delay and period a proposer may pick, in ledgers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimingRule {
    pub min_voting_delay: u32,
    pub max_voting_delay: u32,
    pub min_voting_period: u32,
    pub max_voting_period: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteChoice {
    No = 0,
    Yes = 1,
    Abstain = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalState {
    Pending = 0,
    Active = 1,
    Canceled = 2,
    Failed = 3,
    Passed = 4,
    Queued = 5,
    Expired = 6,
    Executed = 7,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionCall {
    pub function: Symbol,
    pub args: Vec<Val>,
}

/// One governance action. `Transfer(target, value)` sends `value` fund
/// tokens; `Call(target, value, call)` sends the tokens and then invokes
/// `call` on the target.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Transfer(Address, i128),
    Call(Address, i128, ActionCall),
}

impl Action {
    pub fn target(&self) -> Address {
        match self {
            Action::Transfer(target, _) => target.clone(),
            Action::Call(target, _, _) => target.clone(),
        }
    }

    pub fn value(&self) -> i128 {
        match self {
            Action::Transfer(_, value) => *value,
            Action::Call(_, value, _) => *value,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub description: String,
    pub actions: Vec<Action>,
    pub vote_start: u32,
    pub vote_end: u32,
    pub queue_deadline: u32,
    pub eta: u32,
    pub exec_deadline: u32,
    pub canceled: bool,
    pub queued: bool,
    pub executed: bool,
    pub tracker_id: u64,
    pub total_yes: u64,
    pub total_no: u64,
    pub total_abstain: u64,
    pub quorum_count: u32,
    pub quorum_power: u64,
    // Validator ids that already voted; dedup is by validator identity, so
    // rebinding a voter address mid-proposal cannot double-vote.
    pub voters: Vec<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    pub has_voted: bool,
    pub choice: VoteChoice,
    pub votes: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalContent {
    pub id: u64,
    pub proposer: Address,
    pub description: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalSchedule {
    pub vote_start: u32,
    pub vote_end: u32,
    pub queue_deadline: u32,
    pub eta: u32,
    pub exec_deadline: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalTally {
    pub total_yes: u64,
    pub total_no: u64,
    pub total_abstain: u64,
    pub quorum_count: u32,
    pub quorum_power: u64,
    pub voters: Vec<u64>,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VotingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NoSuchProposal = 3,
    NotSecretary = 4,
    NotRegisteredVoter = 5,
    NotEligible = 6,
    NotExecutor = 7,
    NotProposer = 8,
    NotGovernance = 9,
    NotGovernanceOrSecretary = 10,
    IncorrectState = 11,
    AlreadyVoted = 12,
    InvalidVotingDelay = 14,
    InvalidVotingPeriod = 15,
    InvalidTimingRule = 16,
    NoProposeAccess = 17,
    NoExecuteAccess = 18,
    NoAction = 19,
    NotYetExecutable = 20,
    TransactionFailed = 21,
    ActiveTrackerExists = 22,
    InvalidContract = 23,
    InvalidAction = 24,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<VotingConfig, VotingError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(VotingError::NotInitialized)
}

fn access_rule_of(env: &Env) -> AccessRule {
    env.storage().instance().get(&ACCESS).unwrap_or(AccessRule {
        secretary_propose: true,
        voter_propose: false,
        secretary_execute: true,
        voter_execute: false,
    })
}

fn timing_rule_of(env: &Env) -> TimingRule {
    env.storage().instance().get(&TIMING).unwrap_or(TimingRule {
        min_voting_delay: 86_400,
        max_voting_delay: 2_419_200,
        min_voting_period: 86_400,
        max_voting_period: 2_419_200,
    })
}

fn proposal_count(env: &Env) -> u64 {
    env.storage().instance().get(&PROP_CNT).unwrap_or(0)
}

fn load_proposal(env: &Env, proposal_id: u64) -> Result<Proposal, VotingError> {
    env.storage()
        .persistent()
        .get(&(symbol_short!("PROPOSAL"), proposal_id))
        .ok_or(VotingError::NoSuchProposal)
}

fn save_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&(symbol_short!("PROPOSAL"), proposal.id), proposal);
}

fn save_receipt(env: &Env, proposal_id: u64, validator_id: u64, receipt: &Receipt) {
    env.storage()
        .persistent()
        .set(&(symbol_short!("RECEIPT"), (proposal_id, validator_id)), receipt);
}

fn receipt_of(env: &Env, proposal_id: u64, validator_id: u64) -> Receipt {
    env.storage()
        .persistent()
        .get(&(symbol_short!("RECEIPT"), (proposal_id, validator_id)))
        .unwrap_or(Receipt {
            has_voted: false,
            choice: VoteChoice::No,
            votes: 0,
        })
}

// ── State machine ───────────────────────────────────────────────────────────

fn quorum_reached(proposal: &Proposal) -> bool {
    let cast = proposal.total_yes + proposal.total_no + proposal.total_abstain;
    proposal.total_yes > proposal.total_no + proposal.total_abstain
        && (proposal.voters.len() >= proposal.quorum_count || cast >= proposal.quorum_power)
}

fn state_of(env: &Env, proposal: &Proposal) -> ProposalState {
    if proposal.executed {
        return ProposalState::Executed;
    }
    if proposal.canceled {
        return ProposalState::Canceled;
    }
    let now = env.ledger().sequence();
    if proposal.queued {
        if now >= proposal.exec_deadline {
            return ProposalState::Expired;
        }
        return ProposalState::Queued;
    }
    if now < proposal.vote_start {
        return ProposalState::Pending;
    }
    if now < proposal.vote_end {
        return ProposalState::Active;
    }
    if !quorum_reached(proposal) {
        return ProposalState::Failed;
    }
    // A zero-action proposal has nothing to queue, so it never expires.
    if !proposal.actions.is_empty() && now >= proposal.queue_deadline {
        return ProposalState::Expired;
    }
    ProposalState::Passed
}

// ── Access checks ───────────────────────────────────────────────────────────

/// Weight the proposal's snapshot assigns to the validator that `account`
/// currently maps to. Zero when unmapped or untracked.
fn snapshot_votes(env: &Env, tracker: &Address, tracker_id: u64, account: &Address) -> (Option<u64>, u64) {
    let client = TrackerClient::new(env, tracker);
    let validator_id = match client.voter_to_validator(account) {
        Some(id) => id,
        None => return (None, 0),
    };
    let weight = match client.try_get_tracked_validator(&tracker_id, &validator_id) {
        Ok(Ok(tracked)) => tracked.votes,
        _ => 0,
    };
    (Some(validator_id), weight)
}

fn check_propose_access(
    env: &Env,
    config: &VotingConfig,
    rule: &AccessRule,
    proposer: &Address,
    tracker_id: u64,
) -> Result<(), VotingError> {
    if rule.secretary_propose && config.secretary.as_ref() == Some(proposer) {
        return Ok(());
    }
    if !rule.voter_propose {
        return Err(VotingError::NotSecretary);
    }
    match snapshot_votes(env, &config.tracker, tracker_id, proposer) {
        (None, _) => Err(VotingError::NotRegisteredVoter),
        (Some(_), 0) => Err(VotingError::NotEligible),
        _ => Ok(()),
    }
}

fn check_execute_access(
    env: &Env,
    config: &VotingConfig,
    caller: &Address,
    tracker_id: u64,
) -> Result<(), VotingError> {
    let rule = access_rule_of(env);
    if rule.secretary_execute && config.secretary.as_ref() == Some(caller) {
        return Ok(());
    }
    if rule.voter_execute {
        if let (Some(_), weight) = snapshot_votes(env, &config.tracker, tracker_id, caller) {
            if weight > 0 {
                return Ok(());
            }
        }
    }
    Err(VotingError::NotExecutor)
}

// ── Rule application ────────────────────────────────────────────────────────

// The apply_* helpers hold the real logic for governance-managed settings.
// They are reached two ways: through the public entry points (secretary or
// governance caller) and through self-targeted proposal actions dispatched
// from `execute`.

fn apply_update_access_rule(env: &Env, rule: &AccessRule) -> Result<(), VotingError> {
    if !rule.secretary_propose && !rule.voter_propose {
        return Err(VotingError::NoProposeAccess);
    }
    if !rule.secretary_execute && !rule.voter_execute {
        return Err(VotingError::NoExecuteAccess);
    }
    let old = access_rule_of(env);
    env.storage().instance().set(&ACCESS, rule);
    events::publish_update_access_rule(env, old, rule.clone());
    Ok(())
}

fn apply_update_timing_rule(env: &Env, rule: &TimingRule) -> Result<(), VotingError> {
    if rule.min_voting_delay == 0
        || rule.min_voting_delay > rule.max_voting_delay
        || rule.min_voting_period == 0
        || rule.min_voting_period > rule.max_voting_period
    {
        return Err(VotingError::InvalidTimingRule);
    }
    let old = timing_rule_of(env);
    env.storage().instance().set(&TIMING, rule);
    events::publish_update_timing_rule(env, old, rule.clone());
    Ok(())
}

fn apply_update_secretary(env: &Env, new_secretary: &Option<Address>) -> Result<(), VotingError> {
    let rule = access_rule_of(env);
    if new_secretary.is_none() {
        // Removing the secretary must not strand either access path.
        if !rule.voter_propose {
            return Err(VotingError::NoProposeAccess);
        }
        if !rule.voter_execute {
            return Err(VotingError::NoExecuteAccess);
        }
    }
    let mut config = load_config(env)?;
    let old = config.secretary.clone();
    config.secretary = new_secretary.clone();
    env.storage().instance().set(&CONFIG, &config);
    events::publish_update_secretary(env, old, new_secretary.clone());
    Ok(())
}

fn apply_update_staking_tracker(env: &Env, new_tracker: &Address) -> Result<(), VotingError> {
    let mut config = load_config(env)?;
    let old_client = TrackerClient::new(env, &config.tracker);
    if !old_client.get_live_tracker_ids().is_empty() {
        return Err(VotingError::ActiveTrackerExists);
    }
    if !is_tracker(env, new_tracker) {
        return Err(VotingError::InvalidContract);
    }
    let old = config.tracker.clone();
    config.tracker = new_tracker.clone();
    env.storage().instance().set(&CONFIG, &config);
    events::publish_update_staking_tracker(env, old, new_tracker.clone());
    Ok(())
}

fn is_tracker(env: &Env, address: &Address) -> bool {
    let client = TrackerClient::new(env, address);
    match client.try_contract_type() {
        Ok(Ok(tag)) if tag == Symbol::new(env, "StakingTracker") => {}
        _ => return false,
    }
    matches!(client.try_version(), Ok(Ok(1)))
}

/// Routes an action that targets this contract itself. Proposal actions are
/// the only way to reach the governance-gated settings without a secretary,
/// and the contract cannot re-enter itself through the host.
fn dispatch_self_call(env: &Env, call: &ActionCall) -> Result<(), VotingError> {
    fn arg<T: TryFromVal<Env, Val>>(env: &Env, call: &ActionCall, i: u32) -> Result<T, VotingError> {
        let raw = call.args.get(i).ok_or(VotingError::InvalidAction)?;
        T::try_from_val(env, &raw).map_err(|_| VotingError::InvalidAction)
    }

    // Arg 0 mirrors the public entry points' `caller` and is ignored here;
    // the passed proposal itself is the authorization.
    if call.function == Symbol::new(env, "update_access_rule") {
        apply_update_access_rule(env, &arg(env, call, 1)?)
    } else if call.function == Symbol::new(env, "update_timing_rule") {
        apply_update_timing_rule(env, &arg(env, call, 1)?)
    } else if call.function == Symbol::new(env, "update_secretary") {
        apply_update_secretary(env, &arg(env, call, 1)?)
    } else if call.function == Symbol::new(env, "update_staking_tracker") {
        apply_update_staking_tracker(env, &arg(env, call, 1)?)
    } else {
        Err(VotingError::InvalidAction)
    }
}

fn move_tokens(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: &i128,
) -> Result<(), VotingError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(from, to, amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VotingError::TransactionFailed),
    }
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct Voting;

#[contractimpl]
impl Voting {
    pub fn initialize(
        env: Env,
        staking_tracker: Address,
        secretary: Option<Address>,
        fund_token: Address,
    ) -> Result<(), VotingError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(VotingError::AlreadyInitialized);
        }
        if !is_tracker(&env, &staking_tracker) {
            return Err(VotingError::InvalidContract);
        }
        env.storage().instance().set(
            &CONFIG,
            &VotingConfig {
                tracker: staking_tracker,
                secretary,
                fund_token,
            },
        );
        Ok(())
    }

    /// Creates a proposal and the tracker snapshot that fixes its quorum.
    /// The snapshot spans `[now, vote_start)`, so voting weights are settled
    /// before the first vote can be cast.
    pub fn propose(
        env: Env,
        proposer: Address,
        description: String,
        actions: Vec<Action>,
        voting_delay: u32,
        voting_period: u32,
    ) -> Result<u64, VotingError> {
        proposer.require_auth();
        let config = load_config(&env)?;

        let timing = timing_rule_of(&env);
        if voting_delay < timing.min_voting_delay || voting_delay > timing.max_voting_delay {
            return Err(VotingError::InvalidVotingDelay);
        }
        if voting_period < timing.min_voting_period || voting_period > timing.max_voting_period {
            return Err(VotingError::InvalidVotingPeriod);
        }

        let tracker = TrackerClient::new(&env, &config.tracker);
        if !tracker.get_live_tracker_ids().is_empty() {
            return Err(VotingError::ActiveTrackerExists);
        }

        let now = env.ledger().sequence();
        let vote_start = now + voting_delay;
        let vote_end = vote_start + voting_period;

        // The tracker's owner is this contract, so invoker auth covers the
        // privileged call.
        let tracker_id = tracker.create_tracker(&now, &vote_start);
        let summary = tracker.get_tracker_summary(&tracker_id);

        let rule = access_rule_of(&env);
        check_propose_access(&env, &config, &rule, &proposer, tracker_id)?;

        let id = proposal_count(&env) + 1;
        env.storage().instance().set(&PROP_CNT, &id);

        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            description: description.clone(),
            actions,
            vote_start,
            vote_end,
            queue_deadline: vote_end + QUEUE_TIMEOUT,
            eta: 0,
            exec_deadline: 0,
            canceled: false,
            queued: false,
            executed: false,
            tracker_id,
            total_yes: 0,
            total_no: 0,
            total_abstain: 0,
            quorum_count: votes::one_third_ceil(u64::from(summary.eligible_count)) as u32,
            quorum_power: votes::one_third_ceil(summary.total_votes),
            voters: Vec::new(&env),
        };
        save_proposal(&env, &proposal);

        events::publish_propose(
            &env,
            id,
            proposer,
            description,
            vote_start,
            vote_end,
            tracker_id,
            proposal.quorum_count,
            proposal.quorum_power,
        );
        Ok(id)
    }

    pub fn cast_vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        choice: VoteChoice,
    ) -> Result<(), VotingError> {
        voter.require_auth();
        let config = load_config(&env)?;
        let mut proposal = load_proposal(&env, proposal_id)?;
        if state_of(&env, &proposal) != ProposalState::Active {
            return Err(VotingError::IncorrectState);
        }

        let (validator_id, weight) =
            snapshot_votes(&env, &config.tracker, proposal.tracker_id, &voter);
        let validator_id = validator_id.ok_or(VotingError::NotRegisteredVoter)?;
        if weight == 0 {
            return Err(VotingError::NotEligible);
        }
        if proposal.voters.contains(validator_id) {
            return Err(VotingError::AlreadyVoted);
        }

        match choice {
            VoteChoice::Yes => proposal.total_yes += weight,
            VoteChoice::No => proposal.total_no += weight,
            VoteChoice::Abstain => proposal.total_abstain += weight,
        }
        proposal.voters.push_back(validator_id);
        save_proposal(&env, &proposal);
        save_receipt(
            &env,
            proposal_id,
            validator_id,
            &Receipt {
                has_voted: true,
                choice,
                votes: weight,
            },
        );

        events::publish_vote_cast(&env, proposal_id, voter, validator_id, choice, weight);
        Ok(())
    }

    pub fn queue(env: Env, caller: Address, proposal_id: u64) -> Result<(), VotingError> {
        caller.require_auth();
        let config = load_config(&env)?;
        let mut proposal = load_proposal(&env, proposal_id)?;
        check_execute_access(&env, &config, &caller, proposal.tracker_id)?;
        if state_of(&env, &proposal) != ProposalState::Passed {
            return Err(VotingError::IncorrectState);
        }
        if proposal.actions.is_empty() {
            return Err(VotingError::NoAction);
        }

        let now = env.ledger().sequence();
        proposal.queued = true;
        proposal.eta = now + EXEC_DELAY;
        proposal.exec_deadline = proposal.eta + EXEC_TIMEOUT;
        save_proposal(&env, &proposal);

        events::publish_queue(&env, proposal_id, proposal.eta, proposal.exec_deadline);
        Ok(())
    }

    /// Runs a queued proposal's actions. `attached_value` fund tokens are
    /// pulled from the caller first; together with tokens left over from
    /// earlier attempts they must cover the sum of action values, so an
    /// underfunded attempt can be retried with a top-up.
    pub fn execute(
        env: Env,
        caller: Address,
        proposal_id: u64,
        attached_value: i128,
    ) -> Result<(), VotingError> {
        caller.require_auth();
        let config = load_config(&env)?;
        let mut proposal = load_proposal(&env, proposal_id)?;
        check_execute_access(&env, &config, &caller, proposal.tracker_id)?;
        if state_of(&env, &proposal) != ProposalState::Queued {
            return Err(VotingError::IncorrectState);
        }
        let now = env.ledger().sequence();
        if now < proposal.eta {
            return Err(VotingError::NotYetExecutable);
        }

        let this = env.current_contract_address();
        if attached_value > 0 {
            move_tokens(&env, &config.fund_token, &caller, &this, &attached_value)?;
        }
        let mut total: i128 = 0;
        for action in proposal.actions.iter() {
            total += action.value();
        }
        if token::Client::new(&env, &config.fund_token).balance(&this) < total {
            return Err(VotingError::TransactionFailed);
        }

        // Committed before any outward call; a failing target aborts the
        // whole invocation and rolls this back with it.
        proposal.executed = true;
        save_proposal(&env, &proposal);

        for action in proposal.actions.iter() {
            let value = action.value();
            if value > 0 {
                move_tokens(&env, &config.fund_token, &this, &action.target(), &value)?;
            }
            if let Action::Call(target, _, call) = action {
                if target == this {
                    dispatch_self_call(&env, &call)?;
                } else {
                    env.invoke_contract::<Val>(&target, &call.function, call.args.clone());
                }
            }
        }

        events::publish_execute(&env, proposal_id, caller);
        Ok(())
    }

    pub fn cancel(env: Env, caller: Address, proposal_id: u64) -> Result<(), VotingError> {
        caller.require_auth();
        load_config(&env)?;
        let mut proposal = load_proposal(&env, proposal_id)?;
        if proposal.proposer != caller {
            return Err(VotingError::NotProposer);
        }
        if state_of(&env, &proposal) != ProposalState::Pending {
            return Err(VotingError::IncorrectState);
        }
        proposal.canceled = true;
        save_proposal(&env, &proposal);
        events::publish_cancel(&env, proposal_id);
        Ok(())
    }

    // ── Governance-managed settings ─────────────────────────────────────────
    //
    // The governance path is a proposal action targeting this contract;
    // `execute` routes it through `dispatch_self_call` without touching
    // these entry points. A direct call only succeeds for the secretary
    // (where allowed), since no external caller can authenticate as the
    // contract's own address.

    pub fn update_access_rule(
        env: Env,
        caller: Address,
        rule: AccessRule,
    ) -> Result<(), VotingError> {
        caller.require_auth();
        let config = load_config(&env)?;
        if caller != env.current_contract_address() && config.secretary != Some(caller) {
            return Err(VotingError::NotGovernanceOrSecretary);
        }
        apply_update_access_rule(&env, &rule)
    }

    pub fn update_timing_rule(
        env: Env,
        caller: Address,
        rule: TimingRule,
    ) -> Result<(), VotingError> {
        caller.require_auth();
        let config = load_config(&env)?;
        if caller != env.current_contract_address() && config.secretary != Some(caller) {
            return Err(VotingError::NotGovernanceOrSecretary);
        }
        apply_update_timing_rule(&env, &rule)
    }

    pub fn update_secretary(
        env: Env,
        caller: Address,
        new_secretary: Option<Address>,
    ) -> Result<(), VotingError> {
        caller.require_auth();
        let config = load_config(&env)?;
        if caller != env.current_contract_address() && config.secretary != Some(caller) {
            return Err(VotingError::NotGovernanceOrSecretary);
        }
        apply_update_secretary(&env, &new_secretary)
    }

    /// Governance-transaction only; the secretary has no direct path here.
    pub fn update_staking_tracker(
        env: Env,
        caller: Address,
        new_tracker: Address,
    ) -> Result<(), VotingError> {
        caller.require_auth();
        load_config(&env)?;
        if caller != env.current_contract_address() {
            return Err(VotingError::NotGovernance);
        }
        apply_update_staking_tracker(&env, &new_tracker)
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn last_proposal_id(env: Env) -> u64 {
        proposal_count(&env)
    }

    pub fn get_proposal_content(env: Env, proposal_id: u64) -> Result<ProposalContent, VotingError> {
        let p = load_proposal(&env, proposal_id)?;
        Ok(ProposalContent {
            id: p.id,
            proposer: p.proposer,
            description: p.description,
        })
    }

    pub fn get_proposal_schedule(
        env: Env,
        proposal_id: u64,
    ) -> Result<ProposalSchedule, VotingError> {
        let p = load_proposal(&env, proposal_id)?;
        Ok(ProposalSchedule {
            vote_start: p.vote_start,
            vote_end: p.vote_end,
            queue_deadline: p.queue_deadline,
            eta: p.eta,
            exec_deadline: p.exec_deadline,
        })
    }

    pub fn get_actions(env: Env, proposal_id: u64) -> Result<Vec<Action>, VotingError> {
        Ok(load_proposal(&env, proposal_id)?.actions)
    }

    pub fn get_proposal_tally(env: Env, proposal_id: u64) -> Result<ProposalTally, VotingError> {
        let p = load_proposal(&env, proposal_id)?;
        Ok(ProposalTally {
            total_yes: p.total_yes,
            total_no: p.total_no,
            total_abstain: p.total_abstain,
            quorum_count: p.quorum_count,
            quorum_power: p.quorum_power,
            voters: p.voters,
        })
    }

    pub fn get_receipt(env: Env, proposal_id: u64, validator_id: u64) -> Receipt {
        receipt_of(&env, proposal_id, validator_id)
    }

    /// The weight `voter` carries in the proposal's snapshot, through its
    /// current validator mapping. Zero when unmapped or untracked.
    pub fn get_votes(env: Env, proposal_id: u64, voter: Address) -> Result<u64, VotingError> {
        let config = load_config(&env)?;
        let proposal = load_proposal(&env, proposal_id)?;
        let (_, weight) = snapshot_votes(&env, &config.tracker, proposal.tracker_id, &voter);
        Ok(weight)
    }

    pub fn state(env: Env, proposal_id: u64) -> Result<ProposalState, VotingError> {
        let proposal = load_proposal(&env, proposal_id)?;
        Ok(state_of(&env, &proposal))
    }

    pub fn check_quorum(env: Env, proposal_id: u64) -> Result<bool, VotingError> {
        let proposal = load_proposal(&env, proposal_id)?;
        Ok(quorum_reached(&proposal))
    }

    pub fn access_rule(env: Env) -> AccessRule {
        access_rule_of(&env)
    }

    pub fn timing_rule(env: Env) -> TimingRule {
        timing_rule_of(&env)
    }

    pub fn secretary(env: Env) -> Result<Option<Address>, VotingError> {
        Ok(load_config(&env)?.secretary)
    }

    pub fn staking_tracker(env: Env) -> Result<Address, VotingError> {
        Ok(load_config(&env)?.tracker)
    }
}
