//! Cross-contract capabilities.
//!
//! Each contract holds the address of its collaborator and talks to it
//! through one of the clients generated here, never through its storage.
//! Tests can register any contract exposing the same functions as a fake.

use soroban_sdk::{contractclient, Address, Env};

use crate::types::StakePosition;

/// What the reward engine and governance need from the staking ledger.
///
/// `settle_rewards` and `compound_stake` only accept the registered reward
/// engine as `caller`; a rejected call traps and reverts the whole
/// invocation.
#[contractclient(name = "StakingLedgerClient")]
pub trait StakingLedgerInterface {
    fn get_stake(env: Env, staker: Address) -> Option<StakePosition>;

    fn get_user_stake_amount(env: Env, staker: Address) -> i128;

    /// Marks rewards as settled up to the current block. Returns that block.
    fn settle_rewards(env: Env, caller: Address, staker: Address) -> u32;

    /// Adds `amount` to the position and settles it. Returns the new amount.
    fn compound_stake(env: Env, caller: Address, staker: Address, amount: i128) -> i128;
}

/// Governance-owned protocol parameters read by the staking ledger.
#[contractclient(name = "ParameterStoreClient")]
pub trait ParameterStoreInterface {
    fn get_min_stake_required(env: Env) -> i128;

    fn get_max_stake_allowed(env: Env) -> i128;
}
