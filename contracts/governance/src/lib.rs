#![no_std]

pub mod events;
pub mod policy;

use common::interfaces::StakingLedgerClient;
use common::{access, ttl};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, String, Symbol, Vec,
};

use policy::Action;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKING_LEDGER: Symbol = symbol_short!("STK_LDG");
pub(crate) const GOVERNANCE_ACTIVE: Symbol = symbol_short!("GOV_ACT");
const PROPOSAL_CTR: Symbol = symbol_short!("PR_CTR");

const FEE_RATE: Symbol = symbol_short!("FEE_RATE");
const MIN_STAKE: Symbol = symbol_short!("MIN_STK");
const MAX_STAKE: Symbol = symbol_short!("MAX_STK");

// Persistent tuple keys
const PROPOSAL: Symbol = symbol_short!("PROPOSAL");
const VOTE: Symbol = symbol_short!("VOTE");
const STAT: Symbol = symbol_short!("STAT");

// ── Protocol constants ───────────────────────────────────────────────────────

/// Blocks a proposal stays open for voting (~70 days).
pub const VOTING_WINDOW_BLOCKS: u32 = 10_080;
/// Stake required to open a proposal.
pub const MIN_PROPOSAL_STAKE: i128 = 1_000_000;
/// Ceiling for the platform fee, in basis points (10%).
pub const MAX_PLATFORM_FEE_RATE: i128 = 1_000;

pub const DEFAULT_PLATFORM_FEE_RATE: i128 = 100;
pub const DEFAULT_MIN_STAKE_REQUIRED: i128 = 100_000;
pub const DEFAULT_MAX_STAKE_ALLOWED: i128 = 1_000_000_000_000;

// ── Types ────────────────────────────────────────────────────────────────────

/// Protocol parameters a proposal can change.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GovernedParameter {
    PlatformFeeRate,
    MinStakeRequired,
    MaxStakeAllowed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u32,
    pub proposer: Address,
    pub title: String,
    pub description: String,
    pub parameter: GovernedParameter,
    pub new_value: i128,
    pub votes_for: i128,
    pub votes_against: i128,
    pub start_block: u32,
    /// `start_block + VOTING_WINDOW_BLOCKS`. Votes are accepted strictly
    /// before this block; execution at or after it.
    pub end_block: u32,
    pub executed: bool,
    pub passed: bool,
}

/// One entry per voter per proposal. Its presence is the voted flag.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    pub support: bool,
    pub weight: i128,
}

/// Named counter for off-chain dashboards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformStat {
    pub value: i128,
    pub last_updated: u32,
}

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    OwnerOnly = 400,
    NotAuthorized = 401,
    InvalidParameter = 402,
    AlreadyExecuted = 403,
    ProposalNotFound = 404,
    AlreadyVoted = 405,
    VotingEnded = 406,
    InsufficientStake = 407,
    NotYetExecutable = 408,
    NotInitialized = 409,
    AlreadyInitialized = 410,
    ArithmeticOverflow = 411,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct GovernanceContract;

#[contractimpl]
impl GovernanceContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap governance with the default parameters. `staking_ledger` is
    /// read for proposal thresholds and vote weights.
    pub fn initialize(env: Env, owner: Address, staking_ledger: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        access::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKING_LEDGER, &staking_ledger);
        env.storage().instance().set(&GOVERNANCE_ACTIVE, &true);
        env.storage().instance().set(&FEE_RATE, &DEFAULT_PLATFORM_FEE_RATE);
        env.storage().instance().set(&MIN_STAKE, &DEFAULT_MIN_STAKE_REQUIRED);
        env.storage().instance().set(&MAX_STAKE, &DEFAULT_MAX_STAKE_ALLOWED);
        ttl::bump_instance(&env);

        events::publish_initialized(&env, owner, staking_ledger);

        Ok(())
    }

    // ── Proposals ───────────────────────────────────────────────────────────

    /// Open a proposal to set `parameter` to `new_value`. Returns its id.
    ///
    /// The value is validated when the proposal is executed, not here.
    pub fn create_proposal(
        env: Env,
        proposer: Address,
        title: String,
        description: String,
        parameter: GovernedParameter,
        new_value: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        proposer.require_auth();
        Self::require_action(&env, &proposer, Action::Propose, ContractError::NotAuthorized)?;

        if Self::stake_of(&env, &proposer)? < MIN_PROPOSAL_STAKE {
            return Err(ContractError::InsufficientStake);
        }

        let start_block = env.ledger().sequence();
        let end_block = start_block
            .checked_add(VOTING_WINDOW_BLOCKS)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let id = next_proposal_id(&env);

        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            title,
            description,
            parameter,
            new_value,
            votes_for: 0,
            votes_against: 0,
            start_block,
            end_block,
            executed: false,
            passed: false,
        };
        store_proposal(&env, &proposal);

        events::publish_proposal_created(&env, id, proposer, parameter, new_value, end_block);

        Ok(id)
    }

    /// Cast a vote weighted by the voter's stake at this moment.
    pub fn vote_on_proposal(
        env: Env,
        voter: Address,
        proposal_id: u32,
        support: bool,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        let weight = Self::stake_of(&env, &voter)?;
        if weight <= 0 {
            return Err(ContractError::InsufficientStake);
        }
        let mut proposal = load_proposal(&env, proposal_id)?;
        let key = vote_key(proposal_id, &voter);
        if env.storage().persistent().has(&key) {
            return Err(ContractError::AlreadyVoted);
        }
        if env.ledger().sequence() >= proposal.end_block {
            return Err(ContractError::VotingEnded);
        }

        if support {
            proposal.votes_for = proposal
                .votes_for
                .checked_add(weight)
                .ok_or(ContractError::ArithmeticOverflow)?;
        } else {
            proposal.votes_against = proposal
                .votes_against
                .checked_add(weight)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        store_proposal(&env, &proposal);
        env.storage()
            .persistent()
            .set(&key, &VoteRecord { support, weight });
        ttl::bump_persistent(&env, &key);

        events::publish_vote_cast(&env, proposal_id, voter, support, weight);

        Ok(true)
    }

    /// Live tally preview: `votes_for > votes_against`, open or closed.
    pub fn has_proposal_passed(env: Env, proposal_id: u32) -> Result<bool, ContractError> {
        let proposal = load_proposal(&env, proposal_id)?;
        Ok(proposal.votes_for > proposal.votes_against)
    }

    /// Close out a proposal once its voting window has ended.
    ///
    /// A passing proposal's value goes through the same bounds as the
    /// setters; if it no longer fits, the call fails with
    /// `InvalidParameter` and the proposal stays unexecuted. Returns whether
    /// the proposal passed.
    pub fn execute_proposal(env: Env, caller: Address, proposal_id: u32) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::ChangeParameter, ContractError::NotAuthorized)?;

        let mut proposal = load_proposal(&env, proposal_id)?;
        if proposal.executed {
            return Err(ContractError::AlreadyExecuted);
        }
        if env.ledger().sequence() < proposal.end_block {
            return Err(ContractError::NotYetExecutable);
        }

        let passed = proposal.votes_for > proposal.votes_against;
        if passed {
            apply_parameter(&env, proposal.parameter, proposal.new_value)?;
        }
        proposal.executed = true;
        proposal.passed = passed;
        store_proposal(&env, &proposal);

        events::publish_proposal_executed(
            &env,
            proposal_id,
            caller,
            passed,
            proposal.votes_for,
            proposal.votes_against,
        );

        Ok(passed)
    }

    // ── Parameter store ─────────────────────────────────────────────────────

    /// Fee in basis points, at most `MAX_PLATFORM_FEE_RATE`.
    pub fn set_platform_fee_rate(env: Env, caller: Address, rate: i128) -> Result<bool, ContractError> {
        Self::change_parameter(&env, caller, GovernedParameter::PlatformFeeRate, rate)
    }

    /// Must be positive and no greater than the current maximum.
    pub fn set_min_stake_required(env: Env, caller: Address, amount: i128) -> Result<bool, ContractError> {
        Self::change_parameter(&env, caller, GovernedParameter::MinStakeRequired, amount)
    }

    /// Must be no smaller than the current minimum.
    pub fn set_max_stake_allowed(env: Env, caller: Address, amount: i128) -> Result<bool, ContractError> {
        Self::change_parameter(&env, caller, GovernedParameter::MaxStakeAllowed, amount)
    }

    pub fn get_platform_fee_rate(env: Env) -> i128 {
        read_parameter(&env, GovernedParameter::PlatformFeeRate)
    }

    pub fn get_min_stake_required(env: Env) -> i128 {
        read_parameter(&env, GovernedParameter::MinStakeRequired)
    }

    pub fn get_max_stake_allowed(env: Env) -> i128 {
        read_parameter(&env, GovernedParameter::MaxStakeAllowed)
    }

    // ── Administration ──────────────────────────────────────────────────────

    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::ManageAdmins, ContractError::OwnerOnly)?;

        access::add_admin(&env, &admin);
        events::publish_admin_changed(&env, admin, true);

        Ok(true)
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::ManageAdmins, ContractError::OwnerOnly)?;

        access::remove_admin(&env, &admin);
        events::publish_admin_changed(&env, admin, false);

        Ok(true)
    }

    /// Stop proposals and parameter changes for everyone.
    pub fn emergency_shutdown(env: Env, caller: Address) -> Result<bool, ContractError> {
        Self::set_governance_active(&env, caller, false)
    }

    pub fn emergency_resume(env: Env, caller: Address) -> Result<bool, ContractError> {
        Self::set_governance_active(&env, caller, true)
    }

    /// Store a dashboard counter stamped with the current block.
    pub fn update_platform_stat(
        env: Env,
        caller: Address,
        key: Symbol,
        value: i128,
    ) -> Result<PlatformStat, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::UpdateStats, ContractError::NotAuthorized)?;

        let stat = PlatformStat {
            value,
            last_updated: env.ledger().sequence(),
        };
        let storage_key = (STAT, key.clone());
        env.storage().persistent().set(&storage_key, &stat);
        ttl::bump_persistent(&env, &storage_key);

        events::publish_stat_updated(&env, key, value, caller);

        Ok(stat)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_proposal(env: Env, proposal_id: u32) -> Result<Proposal, ContractError> {
        load_proposal(&env, proposal_id)
    }

    pub fn get_proposal_count(env: Env) -> u32 {
        env.storage().instance().get(&PROPOSAL_CTR).unwrap_or(0)
    }

    pub fn get_user_vote(env: Env, proposal_id: u32, voter: Address) -> Option<VoteRecord> {
        env.storage().persistent().get(&vote_key(proposal_id, &voter))
    }

    pub fn get_platform_stat(env: Env, key: Symbol) -> Option<PlatformStat> {
        env.storage().persistent().get(&(STAT, key))
    }

    pub fn is_admin(env: Env, who: Address) -> bool {
        access::is_admin(&env, &who)
    }

    pub fn get_admins(env: Env) -> Vec<Address> {
        access::list_admins(&env)
    }

    pub fn is_governance_active(env: Env) -> bool {
        policy::is_active(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        access::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Every guarded entry point passes through here, so this is also where
    /// the instance TTL gets extended.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        ttl::bump_instance(env);
        Ok(())
    }

    fn require_action(
        env: &Env,
        caller: &Address,
        action: Action,
        denied: ContractError,
    ) -> Result<(), ContractError> {
        if policy::authorize(env, caller, action) {
            return Ok(());
        }
        log!(env, "governance: action rejected", caller.clone());
        Err(denied)
    }

    fn change_parameter(
        env: &Env,
        caller: Address,
        parameter: GovernedParameter,
        value: i128,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_action(env, &caller, Action::ChangeParameter, ContractError::NotAuthorized)?;

        apply_parameter(env, parameter, value)?;

        Ok(true)
    }

    fn set_governance_active(env: &Env, caller: Address, active: bool) -> Result<bool, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_action(env, &caller, Action::ToggleGovernance, ContractError::OwnerOnly)?;

        env.storage().instance().set(&GOVERNANCE_ACTIVE, &active);
        events::publish_governance_status(env, active, caller);

        Ok(true)
    }

    fn stake_of(env: &Env, who: &Address) -> Result<i128, ContractError> {
        let ledger: Address = env
            .storage()
            .instance()
            .get(&STAKING_LEDGER)
            .ok_or(ContractError::NotInitialized)?;
        Ok(StakingLedgerClient::new(env, &ledger).get_user_stake_amount(who))
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn parameter_key(parameter: GovernedParameter) -> Symbol {
    match parameter {
        GovernedParameter::PlatformFeeRate => FEE_RATE,
        GovernedParameter::MinStakeRequired => MIN_STAKE,
        GovernedParameter::MaxStakeAllowed => MAX_STAKE,
    }
}

fn read_parameter(env: &Env, parameter: GovernedParameter) -> i128 {
    let default = match parameter {
        GovernedParameter::PlatformFeeRate => DEFAULT_PLATFORM_FEE_RATE,
        GovernedParameter::MinStakeRequired => DEFAULT_MIN_STAKE_REQUIRED,
        GovernedParameter::MaxStakeAllowed => DEFAULT_MAX_STAKE_ALLOWED,
    };
    env.storage()
        .instance()
        .get(&parameter_key(parameter))
        .unwrap_or(default)
}

/// Validate `value` against the current bounds and store it.
///
/// Keeps `0 <= fee <= MAX_PLATFORM_FEE_RATE` and `0 < min <= max`.
fn apply_parameter(env: &Env, parameter: GovernedParameter, value: i128) -> Result<(), ContractError> {
    let valid = match parameter {
        GovernedParameter::PlatformFeeRate => (0..=MAX_PLATFORM_FEE_RATE).contains(&value),
        GovernedParameter::MinStakeRequired => {
            value > 0 && value <= read_parameter(env, GovernedParameter::MaxStakeAllowed)
        }
        GovernedParameter::MaxStakeAllowed => {
            value > 0 && value >= read_parameter(env, GovernedParameter::MinStakeRequired)
        }
    };
    if !valid {
        return Err(ContractError::InvalidParameter);
    }

    let old_value = read_parameter(env, parameter);
    env.storage().instance().set(&parameter_key(parameter), &value);

    events::publish_parameter_changed(env, parameter, old_value, value);

    Ok(())
}

fn next_proposal_id(env: &Env) -> u32 {
    let current: u32 = env.storage().instance().get(&PROPOSAL_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&PROPOSAL_CTR, &next);
    next
}

fn proposal_key(id: u32) -> (Symbol, u32) {
    (PROPOSAL, id)
}

fn vote_key(proposal_id: u32, voter: &Address) -> (Symbol, u32, Address) {
    (VOTE, proposal_id, voter.clone())
}

fn load_proposal(env: &Env, id: u32) -> Result<Proposal, ContractError> {
    env.storage()
        .persistent()
        .get(&proposal_key(id))
        .ok_or(ContractError::ProposalNotFound)
}

fn store_proposal(env: &Env, proposal: &Proposal) {
    let key = proposal_key(proposal.id);
    env.storage().persistent().set(&key, proposal);
    ttl::bump_persistent(env, &key);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test;
