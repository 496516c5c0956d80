use common::access;
use soroban_sdk::{Address, Env, Symbol};

use crate::AUTHORIZED;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Lock toggling and allow-list changes.
    ManageVault,
    /// Crediting a user balance from an allow-listed contract.
    Credit,
}

pub fn authorize(env: &Env, caller: &Address, action: Action) -> bool {
    match action {
        Action::ManageVault => access::is_owner(env, caller),
        Action::Credit => is_allow_listed(env, caller),
    }
}

pub fn is_allow_listed(env: &Env, contract: &Address) -> bool {
    env.storage()
        .persistent()
        .get::<(Symbol, Address), bool>(&(AUTHORIZED, contract.clone()))
        .unwrap_or(false)
}
