#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::GovernedParameter;

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub staking_ledger: Address,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreatedEvent {
    pub proposal_id: u32,
    pub proposer: Address,
    pub parameter: GovernedParameter,
    pub new_value: i128,
    pub end_block: u32,
    pub block: u32,
}

/// Fired for every accepted vote. `weight` is the voter's stake at the
/// time of voting.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub proposal_id: u32,
    pub voter: Address,
    pub support: bool,
    pub weight: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExecutedEvent {
    pub proposal_id: u32,
    pub executed_by: Address,
    pub passed: bool,
    pub votes_for: i128,
    pub votes_against: i128,
    pub block: u32,
}

/// Fired whenever a protocol parameter changes, by setter or by proposal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterChangedEvent {
    pub parameter: GovernedParameter,
    pub old_value: i128,
    pub new_value: i128,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub admin: Address,
    pub granted: bool,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatUpdatedEvent {
    pub key: Symbol,
    pub value: i128,
    pub updated_by: Address,
    pub block: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceStatusEvent {
    pub active: bool,
    pub changed_by: Address,
    pub block: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, staking_ledger: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            staking_ledger,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_proposal_created(
    env: &Env,
    proposal_id: u32,
    proposer: Address,
    parameter: GovernedParameter,
    new_value: i128,
    end_block: u32,
) {
    env.events().publish(
        (symbol_short!("PROPOSED"), proposal_id),
        ProposalCreatedEvent {
            proposal_id,
            proposer,
            parameter,
            new_value,
            end_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_vote_cast(env: &Env, proposal_id: u32, voter: Address, support: bool, weight: i128) {
    env.events().publish(
        (symbol_short!("VOTED"), proposal_id),
        VoteCastEvent {
            proposal_id,
            voter,
            support,
            weight,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_proposal_executed(
    env: &Env,
    proposal_id: u32,
    executed_by: Address,
    passed: bool,
    votes_for: i128,
    votes_against: i128,
) {
    env.events().publish(
        (symbol_short!("EXECUTED"), proposal_id),
        ProposalExecutedEvent {
            proposal_id,
            executed_by,
            passed,
            votes_for,
            votes_against,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_parameter_changed(
    env: &Env,
    parameter: GovernedParameter,
    old_value: i128,
    new_value: i128,
) {
    env.events().publish(
        (symbol_short!("PARAM"),),
        ParameterChangedEvent {
            parameter,
            old_value,
            new_value,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_changed(env: &Env, admin: Address, granted: bool) {
    let topic = if granted {
        symbol_short!("ADM_ADD")
    } else {
        symbol_short!("ADM_REM")
    };
    env.events().publish(
        (topic, admin.clone()),
        AdminChangedEvent {
            admin,
            granted,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_stat_updated(env: &Env, key: Symbol, value: i128, updated_by: Address) {
    env.events().publish(
        (symbol_short!("STAT"), key.clone()),
        StatUpdatedEvent {
            key,
            value,
            updated_by,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_governance_status(env: &Env, active: bool, changed_by: Address) {
    env.events().publish(
        (symbol_short!("GOV"),),
        GovernanceStatusEvent {
            active,
            changed_by,
            block: env.ledger().sequence(),
        },
    );
}
