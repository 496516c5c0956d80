#![no_main]

use arbitrary::Arbitrary;
use common::testutils::{advance_blocks, long_lived_env};
use governance::{GovernanceContract, GovernanceContractClient};
use libfuzzer_sys::fuzz_target;
use rewards::{RewardsContract, RewardsContractClient};
use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address};
use staking::{StakingContract, StakingContractClient};

const PERIODS: [u32; 4] = [4_320, 8_640, 12_960, 1];

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64, period: u8 },
    Increase { amount: u64 },
    Extend { period: u8 },
    Withdraw,
    Claim,
    Compound,
    Mine { blocks: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = long_lived_env(1);
    let owner = Address::generate(&env);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let staking_id = env.register(StakingContract, ());
    let rewards_id = env.register(RewardsContract, ());
    let governance_id = env.register(GovernanceContract, ());

    let staking = StakingContractClient::new(&env, &staking_id);
    let rewards = RewardsContractClient::new(&env, &rewards_id);
    let governance = GovernanceContractClient::new(&env, &governance_id);
    staking.initialize(&owner, &token, &governance_id, &rewards_id);
    rewards.initialize(&owner, &token, &staking_id);
    governance.initialize(&owner, &staking_id);

    let minter = StellarAssetClient::new(&env, &token);
    minter.mint(&owner, &1_000_000_000);
    rewards.fund_reward_pool(&owner, &1_000_000_000);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        minter.mint(&user, &(u64::MAX as i128));
        users.push(user);
    }

    // Failed calls must revert cleanly; the invariants below catch any
    // partial write.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount, period } => {
                let period = PERIODS[period as usize % PERIODS.len()];
                let _ = staking.try_create_stake(caller, &(amount as i128), &period);
            }
            FuzzAction::Increase { amount } => {
                let _ = staking.try_increase_stake(caller, &(amount as i128));
            }
            FuzzAction::Extend { period } => {
                let period = PERIODS[period as usize % PERIODS.len()];
                let _ = staking.try_extend_lock_period(caller, &period);
            }
            FuzzAction::Withdraw => {
                let _ = staking.try_withdraw_stake(caller);
            }
            FuzzAction::Claim => {
                let _ = rewards.try_claim_rewards(caller);
            }
            FuzzAction::Compound => {
                let _ = rewards.try_compound_rewards(caller);
            }
            FuzzAction::Mine { blocks } => advance_blocks(&env, u32::from(blocks)),
        }

        let mut sum = 0i128;
        let mut live = 0u32;
        for user in users.iter() {
            if let Some(position) = staking.get_stake(user) {
                assert_eq!(position.unlock_block, position.start_block + position.lock_period);
                sum += position.amount;
                live += 1;
            }
        }
        assert_eq!(staking.get_total_staked(), sum);
        assert_eq!(staking.get_total_stakers(), live);
        assert_eq!(
            rewards.get_reward_pool_balance() + rewards.get_total_rewards_distributed(),
            1_000_000_000
        );
    }
});
