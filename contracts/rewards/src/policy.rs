use common::access;
use soroban_sdk::{Address, Env};

/// Privileged actions on the reward engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Withdraw excess or drain the pool.
    ManagePool,
    RecordCycle,
}

/// Single authorisation policy, evaluated before every privileged entry point.
pub fn authorize(env: &Env, caller: &Address, action: Action) -> bool {
    match action {
        Action::ManagePool | Action::RecordCycle => access::is_owner(env, caller),
    }
}
