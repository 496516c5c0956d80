#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub staking_ledger: Address,
    pub block: u32,
}

/// Fired when pending rewards leave the pool, either paid out or folded
/// back into the staker's position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsPaidEvent {
    pub staker: Address,
    pub amount: i128,
    pub compounded: bool,
    pub pool_balance: i128,
    pub total_distributed: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub pool_balance: i128,
    pub block: u32,
}

/// Fired when the owner takes tokens out of the pool. `drained` marks an
/// emergency drain of the whole balance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
    pub drained: bool,
    pub pool_balance: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CycleRecordedEvent {
    pub cycle_id: u32,
    pub total_distributed: i128,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address, staking_ledger: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            staking_ledger,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_rewards_paid(
    env: &Env,
    staker: Address,
    amount: i128,
    compounded: bool,
    pool_balance: i128,
    total_distributed: i128,
) {
    let topic = if compounded {
        symbol_short!("COMPOUND")
    } else {
        symbol_short!("CLAIMED")
    };
    env.events().publish(
        (topic, staker.clone()),
        RewardsPaidEvent {
            staker,
            amount,
            compounded,
            pool_balance,
            total_distributed,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_funded(env: &Env, funder: Address, amount: i128, pool_balance: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        PoolFundedEvent {
            funder,
            amount,
            pool_balance,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_withdrawn(
    env: &Env,
    owner: Address,
    amount: i128,
    drained: bool,
    pool_balance: i128,
) {
    let topic = if drained {
        symbol_short!("DRAINED")
    } else {
        symbol_short!("WITHDRAWN")
    };
    env.events().publish(
        (topic,),
        PoolWithdrawnEvent {
            owner,
            amount,
            drained,
            pool_balance,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_cycle_recorded(env: &Env, cycle_id: u32, total_distributed: i128) {
    env.events().publish(
        (symbol_short!("CYCLE"), cycle_id),
        CycleRecordedEvent {
            cycle_id,
            total_distributed,
            block: env.ledger().sequence(),
        },
    );
}
