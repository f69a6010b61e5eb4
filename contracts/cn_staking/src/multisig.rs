//! Request ledger for the N-of-M admin multisig.
//!
//! Every administrative operation is an [`AdminOp`] wrapped in a [`Request`].
//! Requests are confirmed by admins and executed once the confirmation
//! requirement is met; the argument payload travels with every confirm and
//! revoke so a stale client can never act on a request it did not read.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const REQUEST: Symbol = symbol_short!("REQUEST");
const REQ_CNT: Symbol = symbol_short!("REQ_CNT");

/// An administrative operation together with its arguments.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AdminOp {
    AddAdmin(Address),
    DeleteAdmin(Address),
    UpdateRequirement(u32),
    ClearRequest,
    WithdrawLockupStaking(Address, i128),
    ApproveStakingWithdrawal(Address, i128),
    CancelApprovedStakingWithdrawal(u64),
    UpdateRewardAddress(Address),
    UpdateStakingTracker(Address),
    UpdateVoterAddress(Option<Address>),
}

impl AdminOp {
    /// Ops whose successful execution invalidates every other outstanding
    /// request: they change who may confirm, or how many confirmations count.
    pub fn clears_outstanding(&self) -> bool {
        matches!(
            self,
            AdminOp::AddAdmin(_)
                | AdminOp::DeleteAdmin(_)
                | AdminOp::UpdateRequirement(_)
                | AdminOp::ClearRequest
        )
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestState {
    NotConfirmed,
    Executed,
    ExecutionFailed,
    Canceled,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub id: u64,
    pub op: AdminOp,
    pub proposer: Address,
    pub confirmers: Vec<Address>,
    pub state: RequestState,
}

fn request_key(id: u64) -> (Symbol, u64) {
    (REQUEST, id)
}

/// Total number of requests ever submitted. Ids are `0..count`.
pub fn request_count(env: &Env) -> u64 {
    env.storage().instance().get(&REQ_CNT).unwrap_or(0)
}

/// Allocates the next request id (sequential from 0).
pub fn next_request_id(env: &Env) -> u64 {
    let id = request_count(env);
    env.storage().instance().set(&REQ_CNT, &(id + 1));
    id
}

pub fn load_request(env: &Env, id: u64) -> Option<Request> {
    env.storage().persistent().get(&request_key(id))
}

pub fn save_request(env: &Env, request: &Request) {
    env.storage().persistent().set(&request_key(request.id), request);
}

/// Request ids in `[from, to)` whose state matches `state` (`None` matches
/// all). `to == 0` or `to` past the end both mean "to the end".
pub fn request_ids(env: &Env, from: u64, to: u64, state: Option<RequestState>) -> Vec<u64> {
    let count = request_count(env);
    let end = if to == 0 || to > count { count } else { to };
    let mut ids = Vec::new(env);
    let mut id = from;
    while id < end {
        if let Some(request) = load_request(env, id) {
            let keep = match &state {
                None => true,
                Some(s) => *s == request.state,
            };
            if keep {
                ids.push_back(id);
            }
        }
        id += 1;
    }
    ids
}
