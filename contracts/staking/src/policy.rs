use common::access;
use soroban_sdk::{Address, Env};

use crate::REWARD_ENGINE;

/// Privileged actions on the staking ledger.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Pause or resume new stakes.
    TogglePool,
    /// Settle or compound a position on behalf of the reward engine.
    SettlePosition,
}

/// Single authorisation policy, evaluated before every privileged entry point.
pub fn authorize(env: &Env, caller: &Address, action: Action) -> bool {
    match action {
        Action::TogglePool => access::is_owner(env, caller),
        Action::SettlePosition => env
            .storage()
            .instance()
            .get::<_, Address>(&REWARD_ENGINE)
            .map_or(false, |engine| engine == *caller),
    }
}
