extern crate std;

use common::testutils::{advance_blocks, long_lived_env};
use soroban_sdk::{
    contract, contractimpl, symbol_short, testutils::Address as _, vec, Address, Env, String,
};

use crate::{
    ContractError, GovernanceContract, GovernanceContractClient, GovernedParameter, PlatformStat,
    VoteRecord, DEFAULT_MAX_STAKE_ALLOWED, DEFAULT_MIN_STAKE_REQUIRED, DEFAULT_PLATFORM_FEE_RATE,
    VOTING_WINDOW_BLOCKS,
};

const START_BLOCK: u32 = 100;

// ── Fake staking ledger ──────────────────────────────────────────────────────

/// Reports whatever stake amounts the test sets.
#[contract]
pub struct FakeStakes;

#[contractimpl]
impl FakeStakes {
    pub fn set_amount(env: Env, who: Address, amount: i128) {
        env.storage().instance().set(&who, &amount);
    }

    pub fn get_user_stake_amount(env: Env, staker: Address) -> i128 {
        env.storage().instance().get(&staker).unwrap_or(0)
    }
}

// ── Test helpers ─────────────────────────────────────────────────────────────

struct Setup {
    env: Env,
    client: GovernanceContractClient<'static>,
    stakes: FakeStakesClient<'static>,
    owner: Address,
}

fn setup() -> Setup {
    let env = long_lived_env(START_BLOCK);

    let stakes_id = env.register(FakeStakes, ());
    let stakes = FakeStakesClient::new(&env, &stakes_id);

    let contract_id = env.register(GovernanceContract, ());
    let client = GovernanceContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &stakes_id);

    Setup {
        env,
        client,
        stakes,
        owner,
    }
}

fn staked(s: &Setup, amount: i128) -> Address {
    let who = Address::generate(&s.env);
    s.stakes.set_amount(&who, &amount);
    who
}

fn propose(s: &Setup, proposer: &Address, parameter: GovernedParameter, value: i128) -> u32 {
    s.client.create_proposal(
        proposer,
        &String::from_str(&s.env, "Adjust parameter"),
        &String::from_str(&s.env, "Routine tuning"),
        &parameter,
        &value,
    )
}

// ── Initialisation ────────────────────────────────────────────────────────────

#[test]
fn test_initial_state() {
    let s = setup();

    assert!(s.client.is_initialized());
    assert!(s.client.is_governance_active());
    assert_eq!(s.client.get_owner(), s.owner);
    assert_eq!(s.client.get_platform_fee_rate(), DEFAULT_PLATFORM_FEE_RATE);
    assert_eq!(s.client.get_min_stake_required(), DEFAULT_MIN_STAKE_REQUIRED);
    assert_eq!(s.client.get_max_stake_allowed(), DEFAULT_MAX_STAKE_ALLOWED);
    assert_eq!(s.client.get_proposal_count(), 0);
}

#[test]
fn test_initialize_twice_fails() {
    let s = setup();
    match s.client.try_initialize(&s.owner, &s.stakes.address) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
}

// ── Proposal creation ─────────────────────────────────────────────────────────

#[test]
fn test_create_proposal() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);

    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);
    assert_eq!(id, 1);
    assert_eq!(s.client.get_proposal_count(), 1);

    let proposal = s.client.get_proposal(&id);
    assert_eq!(proposal.proposer, proposer);
    assert_eq!(proposal.parameter, GovernedParameter::PlatformFeeRate);
    assert_eq!(proposal.new_value, 200);
    assert_eq!(proposal.start_block, START_BLOCK);
    assert_eq!(proposal.end_block, START_BLOCK + VOTING_WINDOW_BLOCKS);
    assert_eq!(proposal.votes_for, 0);
    assert_eq!(proposal.votes_against, 0);
    assert!(!proposal.executed);
    assert!(!proposal.passed);

    assert_eq!(propose(&s, &proposer, GovernedParameter::MinStakeRequired, 5), 2);
}

#[test]
fn test_create_proposal_requires_stake() {
    let s = setup();
    let small = staked(&s, 999_999);

    match s.client.try_create_proposal(
        &small,
        &String::from_str(&s.env, "t"),
        &String::from_str(&s.env, "d"),
        &GovernedParameter::PlatformFeeRate,
        &200,
    ) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientStake),
        _ => unreachable!("Expected InsufficientStake error"),
    }
    assert_eq!(s.client.get_proposal_count(), 0);

    // Exactly the threshold is enough.
    let enough = staked(&s, 1_000_000);
    assert_eq!(propose(&s, &enough, GovernedParameter::PlatformFeeRate, 200), 1);
}

#[test]
fn test_shutdown_blocks_proposals() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);

    assert!(s.client.emergency_shutdown(&s.owner));
    assert!(!s.client.is_governance_active());

    match s.client.try_create_proposal(
        &proposer,
        &String::from_str(&s.env, "t"),
        &String::from_str(&s.env, "d"),
        &GovernedParameter::PlatformFeeRate,
        &200,
    ) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    assert!(s.client.emergency_resume(&s.owner));
    assert_eq!(propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200), 1);
}

#[test]
fn test_emergency_controls_owner_only() {
    let s = setup();
    let stranger = Address::generate(&s.env);

    match s.client.try_emergency_shutdown(&stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::OwnerOnly),
        _ => unreachable!("Expected OwnerOnly error"),
    }
    match s.client.try_emergency_resume(&stranger) {
        Err(Ok(e)) => assert_eq!(e, ContractError::OwnerOnly),
        _ => unreachable!("Expected OwnerOnly error"),
    }
    assert!(s.client.is_governance_active());
}

// ── Voting ────────────────────────────────────────────────────────────────────

#[test]
fn test_votes_are_stake_weighted() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let whale = staked(&s, 10_000_000);
    let minnow = staked(&s, 2_000_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);

    assert!(s.client.vote_on_proposal(&whale, &id, &true));
    assert!(s.client.vote_on_proposal(&minnow, &id, &false));

    let proposal = s.client.get_proposal(&id);
    assert_eq!(proposal.votes_for, 10_000_000);
    assert_eq!(proposal.votes_against, 2_000_000);
    assert!(s.client.has_proposal_passed(&id));

    assert_eq!(
        s.client.get_user_vote(&id, &whale),
        Some(VoteRecord {
            support: true,
            weight: 10_000_000,
        })
    );
    assert_eq!(s.client.get_user_vote(&id, &proposer), None);
}

#[test]
fn test_weight_is_read_at_vote_time() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let voter = staked(&s, 1_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);

    s.stakes.set_amount(&voter, &7_000);
    s.client.vote_on_proposal(&voter, &id, &true);

    assert_eq!(s.client.get_proposal(&id).votes_for, 7_000);
}

#[test]
fn test_vote_without_stake_fails() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);
    let nobody = Address::generate(&s.env);

    match s.client.try_vote_on_proposal(&nobody, &id, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientStake),
        _ => unreachable!("Expected InsufficientStake error"),
    }
}

#[test]
fn test_vote_on_unknown_proposal_fails() {
    let s = setup();
    let voter = staked(&s, 1_000);

    match s.client.try_vote_on_proposal(&voter, &42, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotFound),
        _ => unreachable!("Expected ProposalNotFound error"),
    }
}

#[test]
fn test_duplicate_vote_fails() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let voter = staked(&s, 5_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);

    s.client.vote_on_proposal(&voter, &id, &true);
    // Switching sides is a duplicate too.
    match s.client.try_vote_on_proposal(&voter, &id, &false) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyVoted),
        _ => unreachable!("Expected AlreadyVoted error"),
    }

    let proposal = s.client.get_proposal(&id);
    assert_eq!(proposal.votes_for, 5_000);
    assert_eq!(proposal.votes_against, 0);
}

#[test]
fn test_voting_window_boundary() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let early = staked(&s, 10);
    let late = staked(&s, 10);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);

    // Last open block.
    advance_blocks(&s.env, VOTING_WINDOW_BLOCKS - 1);
    assert!(s.client.vote_on_proposal(&early, &id, &true));

    advance_blocks(&s.env, 1);
    match s.client.try_vote_on_proposal(&late, &id, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::VotingEnded),
        _ => unreachable!("Expected VotingEnded error"),
    }
}

#[test]
fn test_tally_overflow_is_rejected() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let whale = staked(&s, i128::MAX);
    let late = staked(&s, 1);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);

    s.client.vote_on_proposal(&whale, &id, &true);
    match s.client.try_vote_on_proposal(&late, &id, &true) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArithmeticOverflow),
        _ => unreachable!("Expected ArithmeticOverflow error"),
    }

    assert_eq!(s.client.get_proposal(&id).votes_for, i128::MAX);
    assert_eq!(s.client.get_user_vote(&id, &late), None);
}

#[test]
fn test_has_passed_is_strict_majority() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let yes = staked(&s, 500);
    let no = staked(&s, 500);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 200);

    assert!(!s.client.has_proposal_passed(&id));
    s.client.vote_on_proposal(&yes, &id, &true);
    assert!(s.client.has_proposal_passed(&id));
    s.client.vote_on_proposal(&no, &id, &false);
    assert!(!s.client.has_proposal_passed(&id));

    match s.client.try_has_proposal_passed(&9) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotFound),
        _ => unreachable!("Expected ProposalNotFound error"),
    }
}

// ── Execution ─────────────────────────────────────────────────────────────────

#[test]
fn test_execute_lifecycle() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let voter = staked(&s, 10_000_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 250);
    s.client.vote_on_proposal(&voter, &id, &true);

    match s.client.try_execute_proposal(&s.owner, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotYetExecutable),
        _ => unreachable!("Expected NotYetExecutable error"),
    }

    advance_blocks(&s.env, VOTING_WINDOW_BLOCKS);
    assert!(s.client.has_proposal_passed(&id));
    assert!(s.client.execute_proposal(&s.owner, &id));
    assert_eq!(s.client.get_platform_fee_rate(), 250);

    let proposal = s.client.get_proposal(&id);
    assert!(proposal.executed);
    assert!(proposal.passed);
    assert!(s.client.has_proposal_passed(&id));

    match s.client.try_execute_proposal(&s.owner, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyExecuted),
        _ => unreachable!("Expected AlreadyExecuted error"),
    }
}

#[test]
fn test_execute_rejected_proposal() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let voter = staked(&s, 10_000_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 250);
    s.client.vote_on_proposal(&voter, &id, &false);

    advance_blocks(&s.env, VOTING_WINDOW_BLOCKS);
    assert!(!s.client.has_proposal_passed(&id));
    assert!(!s.client.execute_proposal(&s.owner, &id));
    assert_eq!(s.client.get_platform_fee_rate(), DEFAULT_PLATFORM_FEE_RATE);

    let proposal = s.client.get_proposal(&id);
    assert!(proposal.executed);
    assert!(!proposal.passed);
    assert!(!s.client.has_proposal_passed(&id));
}

#[test]
fn test_execute_requires_owner_or_admin() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let admin = Address::generate(&s.env);
    let id = propose(&s, &proposer, GovernedParameter::MinStakeRequired, 200_000);
    s.client.vote_on_proposal(&proposer, &id, &true);
    advance_blocks(&s.env, VOTING_WINDOW_BLOCKS);

    match s.client.try_execute_proposal(&proposer, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    s.client.add_admin(&s.owner, &admin);
    assert!(s.client.execute_proposal(&admin, &id));
    assert_eq!(s.client.get_min_stake_required(), 200_000);
}

#[test]
fn test_execute_unknown_proposal_fails() {
    let s = setup();
    match s.client.try_execute_proposal(&s.owner, &3) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotFound),
        _ => unreachable!("Expected ProposalNotFound error"),
    }
}

#[test]
fn test_execute_blocked_while_shut_down() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    let id = propose(&s, &proposer, GovernedParameter::PlatformFeeRate, 250);
    s.client.vote_on_proposal(&proposer, &id, &true);
    advance_blocks(&s.env, VOTING_WINDOW_BLOCKS);

    s.client.emergency_shutdown(&s.owner);
    match s.client.try_execute_proposal(&s.owner, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    assert!(!s.client.get_proposal(&id).executed);
}

#[test]
fn test_execute_out_of_bounds_value_stays_pending() {
    let s = setup();
    let proposer = staked(&s, 2_000_000);
    // Raising the minimum above the maximum would break min <= max.
    let id = propose(&s, &proposer, GovernedParameter::MinStakeRequired, 5_000_000);
    s.client.vote_on_proposal(&proposer, &id, &true);
    s.client.set_max_stake_allowed(&s.owner, &4_000_000);
    advance_blocks(&s.env, VOTING_WINDOW_BLOCKS);

    match s.client.try_execute_proposal(&s.owner, &id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameter),
        _ => unreachable!("Expected InvalidParameter error"),
    }
    assert!(!s.client.get_proposal(&id).executed);
    assert_eq!(s.client.get_min_stake_required(), DEFAULT_MIN_STAKE_REQUIRED);

    // Once the bounds allow it, the same proposal executes.
    s.client.set_max_stake_allowed(&s.owner, &10_000_000);
    assert!(s.client.execute_proposal(&s.owner, &id));
    assert_eq!(s.client.get_min_stake_required(), 5_000_000);
}

// ── Parameter setters ─────────────────────────────────────────────────────────

#[test]
fn test_fee_rate_bounds() {
    let s = setup();

    assert!(s.client.set_platform_fee_rate(&s.owner, &1_000));
    assert_eq!(s.client.get_platform_fee_rate(), 1_000);
    assert!(s.client.set_platform_fee_rate(&s.owner, &0));

    for rate in [1_001i128, -1] {
        match s.client.try_set_platform_fee_rate(&s.owner, &rate) {
            Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameter),
            _ => unreachable!("Expected InvalidParameter error"),
        }
    }
    assert_eq!(s.client.get_platform_fee_rate(), 0);
}

#[test]
fn test_stake_bounds_stay_ordered() {
    let s = setup();

    assert!(s.client.set_max_stake_allowed(&s.owner, &500_000));
    match s.client.try_set_min_stake_required(&s.owner, &500_001) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameter),
        _ => unreachable!("Expected InvalidParameter error"),
    }
    match s.client.try_set_min_stake_required(&s.owner, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameter),
        _ => unreachable!("Expected InvalidParameter error"),
    }
    match s.client.try_set_max_stake_allowed(&s.owner, &(DEFAULT_MIN_STAKE_REQUIRED - 1)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidParameter),
        _ => unreachable!("Expected InvalidParameter error"),
    }

    // min == max is allowed.
    assert!(s.client.set_min_stake_required(&s.owner, &500_000));
    assert_eq!(s.client.get_min_stake_required(), 500_000);
    assert_eq!(s.client.get_max_stake_allowed(), 500_000);
}

#[test]
fn test_setters_require_owner_or_admin() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    let admin = Address::generate(&s.env);

    match s.client.try_set_platform_fee_rate(&stranger, &50) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    s.client.add_admin(&s.owner, &admin);
    assert!(s.client.set_platform_fee_rate(&admin, &50));
    assert_eq!(s.client.get_platform_fee_rate(), 50);
}

#[test]
fn test_setters_blocked_while_shut_down() {
    let s = setup();
    s.client.emergency_shutdown(&s.owner);

    match s.client.try_set_platform_fee_rate(&s.owner, &50) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    assert_eq!(s.client.get_platform_fee_rate(), DEFAULT_PLATFORM_FEE_RATE);
}

// ── Admins and stats ──────────────────────────────────────────────────────────

#[test]
fn test_admin_management() {
    let s = setup();
    let admin = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);

    match s.client.try_add_admin(&stranger, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::OwnerOnly),
        _ => unreachable!("Expected OwnerOnly error"),
    }
    assert!(!s.client.is_admin(&admin));

    assert!(s.client.add_admin(&s.owner, &admin));
    assert!(s.client.is_admin(&admin));
    assert_eq!(s.client.get_admins(), vec![&s.env, admin.clone()]);

    match s.client.try_remove_admin(&admin, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::OwnerOnly),
        _ => unreachable!("Expected OwnerOnly error"),
    }

    assert!(s.client.remove_admin(&s.owner, &admin));
    assert!(!s.client.is_admin(&admin));
    assert_eq!(s.client.get_admins().len(), 0);
}

#[test]
fn test_platform_stats() {
    let s = setup();
    let admin = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);
    s.client.add_admin(&s.owner, &admin);

    let key = symbol_short!("tvl");
    assert_eq!(s.client.get_platform_stat(&key), None);

    advance_blocks(&s.env, 5);
    let stat = s.client.update_platform_stat(&admin, &key, &42_000);
    assert_eq!(
        stat,
        PlatformStat {
            value: 42_000,
            last_updated: START_BLOCK + 5,
        }
    );
    assert_eq!(s.client.get_platform_stat(&key), Some(stat));

    match s.client.try_update_platform_stat(&stranger, &key, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
}
