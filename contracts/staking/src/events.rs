#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub parameters: Address,
    pub reward_engine: Address,
    pub block: u32,
}

/// Fired when a participant opens a position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeCreatedEvent {
    pub staker: Address,
    pub amount: i128,
    pub lock_period: u32,
    pub unlock_block: u32,
    pub new_total_staked: i128,
    pub block: u32,
}

/// Fired when a position grows, either by deposit or by compounding.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeIncreasedEvent {
    pub staker: Address,
    pub added: i128,
    pub new_amount: i128,
    pub new_total_staked: i128,
    pub compounded: bool,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockExtendedEvent {
    pub staker: Address,
    pub lock_period: u32,
    pub unlock_block: u32,
    pub block: u32,
}

/// Fired when a position is closed and its tokens returned.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsSettledEvent {
    pub staker: Address,
    pub block: u32,
}

/// Fired when the owner pauses or resumes new stakes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStatusEvent {
    pub active: bool,
    pub changed_by: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    token: Address,
    parameters: Address,
    reward_engine: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            parameters,
            reward_engine,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_stake_created(
    env: &Env,
    staker: Address,
    amount: i128,
    lock_period: u32,
    unlock_block: u32,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakeCreatedEvent {
            staker,
            amount,
            lock_period,
            unlock_block,
            new_total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_stake_increased(
    env: &Env,
    staker: Address,
    added: i128,
    new_amount: i128,
    new_total_staked: i128,
    compounded: bool,
) {
    let topic = if compounded {
        symbol_short!("COMPOUND")
    } else {
        symbol_short!("INCREASED")
    };
    env.events().publish(
        (topic, staker.clone()),
        StakeIncreasedEvent {
            staker,
            added,
            new_amount,
            new_total_staked,
            compounded,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_lock_extended(env: &Env, staker: Address, lock_period: u32, unlock_block: u32) {
    env.events().publish(
        (symbol_short!("EXTENDED"), staker.clone()),
        LockExtendedEvent {
            staker,
            lock_period,
            unlock_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        StakeWithdrawnEvent {
            staker,
            amount,
            new_total_staked,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_rewards_settled(env: &Env, staker: Address) {
    env.events().publish(
        (symbol_short!("SETTLED"), staker.clone()),
        RewardsSettledEvent {
            staker,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_status(env: &Env, active: bool, changed_by: Address) {
    env.events().publish(
        (symbol_short!("POOL"),),
        PoolStatusEvent {
            active,
            changed_by,
            block: env.ledger().sequence(),
        },
    );
}
