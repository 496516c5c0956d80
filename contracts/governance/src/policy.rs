use common::access;
use soroban_sdk::{Address, Env};

use crate::GOVERNANCE_ACTIVE;

/// Privileged or gated actions on the governance process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Open a proposal. Anyone with enough stake, while governance is active.
    Propose,
    /// Direct parameter change or proposal execution.
    ChangeParameter,
    UpdateStats,
    ManageAdmins,
    /// Emergency shutdown and resume.
    ToggleGovernance,
}

/// Single authorisation policy, evaluated before every gated entry point.
///
/// A shut-down process rejects proposals and parameter changes for every
/// caller, the owner included.
pub fn authorize(env: &Env, caller: &Address, action: Action) -> bool {
    match action {
        Action::Propose => is_active(env),
        Action::ChangeParameter => is_active(env) && access::is_owner_or_admin(env, caller),
        Action::UpdateStats => access::is_owner_or_admin(env, caller),
        Action::ManageAdmins | Action::ToggleGovernance => access::is_owner(env, caller),
    }
}

pub fn is_active(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&GOVERNANCE_ACTIVE)
        .unwrap_or(false)
}
