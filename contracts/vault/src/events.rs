#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub block: u32,
}

/// Fired for deposits, withdrawals and credits. `delta` is negative for
/// withdrawals.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceChangedEvent {
    pub user: Address,
    pub delta: i128,
    pub new_balance: i128,
    pub total_balance: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationEvent {
    pub contract: Address,
    pub authorized: bool,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockEvent {
    pub locked: bool,
    pub block: u32,
}

pub fn publish_initialized(env: &Env, owner: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(env: &Env, user: Address, amount: i128, new_balance: i128, total_balance: i128) {
    publish_balance(env, symbol_short!("DEPOSIT"), user, amount, new_balance, total_balance);
}

pub fn publish_withdraw(env: &Env, user: Address, amount: i128, new_balance: i128, total_balance: i128) {
    publish_balance(env, symbol_short!("WITHDRAW"), user, -amount, new_balance, total_balance);
}

pub fn publish_credit(env: &Env, user: Address, amount: i128, new_balance: i128, total_balance: i128) {
    publish_balance(env, symbol_short!("CREDIT"), user, amount, new_balance, total_balance);
}

fn publish_balance(
    env: &Env,
    topic: Symbol,
    user: Address,
    delta: i128,
    new_balance: i128,
    total_balance: i128,
) {
    env.events().publish(
        (topic, user.clone()),
        BalanceChangedEvent {
            user,
            delta,
            new_balance,
            total_balance,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_authorization(env: &Env, contract: Address, authorized: bool) {
    env.events().publish(
        (symbol_short!("AUTH"), contract.clone()),
        AuthorizationEvent {
            contract,
            authorized,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_lock(env: &Env, locked: bool) {
    env.events().publish(
        (symbol_short!("LOCK"),),
        LockEvent {
            locked,
            block: env.ledger().sequence(),
        },
    );
}
