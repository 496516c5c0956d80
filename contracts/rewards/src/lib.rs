#![no_std]

pub mod accrual;
pub mod events;
pub mod policy;

use common::interfaces::StakingLedgerClient;
use common::{access, ttl};
use soroban_sdk::{contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol};

use policy::Action;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const STAKING_LEDGER: Symbol = symbol_short!("STK_LDG");
const POOL_BALANCE: Symbol = symbol_short!("POOL_BAL");
const TOTAL_DISTRIBUTED: Symbol = symbol_short!("TOT_DIST");
const CURRENT_CYCLE: Symbol = symbol_short!("CUR_CYC");

// Persistent tuple keys: (prefix, user) and (prefix, cycle_id)
const USER_CLAIMED: Symbol = symbol_short!("CLAIMED");
const CYCLE: Symbol = symbol_short!("CYCLE");

// ── Types ────────────────────────────────────────────────────────────────────

/// Audit snapshot of cumulative payout at a point in time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionCycle {
    pub cycle_id: u32,
    pub total_distributed: i128,
    pub block_height: u32,
    /// Ledger close time in unix seconds.
    pub timestamp: u64,
}

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    OwnerOnly = 300,
    NotFound = 301,
    NoRewards = 302,
    InvalidPeriod = 303,
    InvalidAmount = 304,
    NotInitialized = 305,
    AlreadyInitialized = 306,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardsContract;

#[contractimpl]
impl RewardsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the engine.
    ///
    /// * `token`          – SAC address the pool is funded and paid in. It
    ///                      must be the staking ledger's token for
    ///                      compounding to work.
    /// * `staking_ledger` – ledger read for positions and settled on payout.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        staking_ledger: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        access::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &token);
        env.storage().instance().set(&STAKING_LEDGER, &staking_ledger);
        ttl::bump_instance(&env);

        events::publish_initialized(&env, owner, token, staking_ledger);

        Ok(())
    }

    // ── Accrual ─────────────────────────────────────────────────────────────

    /// Yield in basis points for a lock duration.
    pub fn calculate_effective_apy(_env: Env, lock_period: u32) -> Result<u32, ContractError> {
        accrual::effective_apy(lock_period).ok_or(ContractError::InvalidPeriod)
    }

    /// Rewards the staker could collect right now, capped at the pool
    /// balance. Zero without a position.
    pub fn calculate_pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;

        let ledger = StakingLedgerClient::new(&env, &Self::staking_ledger(&env)?);
        let Some(position) = ledger.get_stake(&staker) else {
            return Ok(0);
        };

        let apy = accrual::effective_apy(position.lock_period).ok_or(ContractError::InvalidPeriod)?;
        let elapsed = position.blocks_since_claim(env.ledger().sequence());
        let raw = accrual::accrued(position.amount, apy, elapsed).ok_or(ContractError::InvalidAmount)?;

        Ok(accrual::capped(raw, Self::read_pool_balance(&env)))
    }

    // ── Payout ──────────────────────────────────────────────────────────────

    /// Pay pending rewards to the staker and settle the position.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let amount = Self::pending_or_fail(&env, &staker)?;
        let ledger = StakingLedgerClient::new(&env, &Self::staking_ledger(&env)?);
        let (pool_balance, total_distributed) = Self::debit_pool(&env, &staker, amount)?;

        Self::reward_token_client(&env)?.transfer(&env.current_contract_address(), &staker, &amount);
        ledger.settle_rewards(&env.current_contract_address(), &staker);

        events::publish_rewards_paid(&env, staker, amount, false, pool_balance, total_distributed);

        Ok(amount)
    }

    /// Fold pending rewards into the staker's position.
    ///
    /// The tokens move to the staking ledger, which grows the position
    /// through its own increase path. If the ledger rejects the call the
    /// whole invocation reverts.
    pub fn compound_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let amount = Self::pending_or_fail(&env, &staker)?;
        let ledger_address = Self::staking_ledger(&env)?;
        let (pool_balance, total_distributed) = Self::debit_pool(&env, &staker, amount)?;

        Self::reward_token_client(&env)?.transfer(
            &env.current_contract_address(),
            &ledger_address,
            &amount,
        );
        StakingLedgerClient::new(&env, &ledger_address).compound_stake(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_rewards_paid(&env, staker, amount, true, pool_balance, total_distributed);

        Ok(amount)
    }

    // ── Pool management ─────────────────────────────────────────────────────

    /// Anyone may add tokens to the pool.
    pub fn fund_reward_pool(env: Env, funder: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let new_balance = Self::read_pool_balance(&env)
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;

        Self::reward_token_client(&env)?.transfer(&funder, &env.current_contract_address(), &amount);
        env.storage().instance().set(&POOL_BALANCE, &new_balance);

        events::publish_pool_funded(&env, funder, amount, new_balance);

        Ok(amount)
    }

    pub fn withdraw_excess_rewards(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::ManagePool)?;

        let balance = Self::read_pool_balance(&env);
        if amount <= 0 || amount > balance {
            return Err(ContractError::InvalidAmount);
        }

        let new_balance = balance - amount;
        env.storage().instance().set(&POOL_BALANCE, &new_balance);
        Self::reward_token_client(&env)?.transfer(&env.current_contract_address(), &caller, &amount);

        events::publish_pool_withdrawn(&env, caller, amount, false, new_balance);

        Ok(amount)
    }

    /// Empty the pool to the owner. Returns the drained amount, which may
    /// be zero.
    pub fn emergency_drain(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::ManagePool)?;

        let drained = Self::read_pool_balance(&env);
        env.storage().instance().set(&POOL_BALANCE, &0i128);
        if drained > 0 {
            Self::reward_token_client(&env)?.transfer(
                &env.current_contract_address(),
                &caller,
                &drained,
            );
        }

        log!(&env, "rewards: pool drained", drained);
        events::publish_pool_withdrawn(&env, caller, drained, true, 0);

        Ok(drained)
    }

    /// Append a cycle entry stamped with the current block and ledger time.
    /// Returns its id.
    pub fn record_distribution_cycle(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::RecordCycle)?;

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let cycle_id = Self::get_current_cycle(env.clone()).saturating_add(1);
        let entry = DistributionCycle {
            cycle_id,
            total_distributed: amount,
            block_height: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        };
        let key = (CYCLE, cycle_id);
        env.storage().persistent().set(&key, &entry);
        ttl::bump_persistent(&env, &key);
        env.storage().instance().set(&CURRENT_CYCLE, &cycle_id);

        events::publish_cycle_recorded(&env, cycle_id, amount);

        Ok(cycle_id)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_reward_pool_balance(env: Env) -> i128 {
        Self::read_pool_balance(&env)
    }

    pub fn get_total_rewards_distributed(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_DISTRIBUTED).unwrap_or(0)
    }

    pub fn get_current_cycle(env: Env) -> u32 {
        env.storage().instance().get(&CURRENT_CYCLE).unwrap_or(0)
    }

    /// Cumulative rewards paid to or compounded for the staker.
    pub fn get_user_claimed_rewards(env: Env, staker: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_CLAIMED, staker))
            .unwrap_or(0)
    }

    pub fn get_distribution_cycle(env: Env, cycle_id: u32) -> Result<DistributionCycle, ContractError> {
        env.storage()
            .persistent()
            .get(&(CYCLE, cycle_id))
            .ok_or(ContractError::NotFound)
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

    fn require_action(env: &Env, caller: &Address, action: Action) -> Result<(), ContractError> {
        if policy::authorize(env, caller, action) {
            return Ok(());
        }
        log!(env, "rewards: action rejected", caller.clone());
        Err(ContractError::OwnerOnly)
    }

    fn pending_or_fail(env: &Env, staker: &Address) -> Result<i128, ContractError> {
        let amount = Self::calculate_pending_rewards(env.clone(), staker.clone())?;
        if amount <= 0 {
            return Err(ContractError::NoRewards);
        }
        Ok(amount)
    }

    /// Move `amount` out of the pool and into the distribution counters.
    /// Returns the new pool balance and cumulative total.
    fn debit_pool(env: &Env, staker: &Address, amount: i128) -> Result<(i128, i128), ContractError> {
        let pool_balance = Self::read_pool_balance(env)
            .checked_sub(amount)
            .filter(|balance| *balance >= 0)
            .ok_or(ContractError::InvalidAmount)?;
        let total_distributed = Self::get_total_rewards_distributed(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;
        let claimed = Self::get_user_claimed_rewards(env.clone(), staker.clone())
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;

        env.storage().instance().set(&POOL_BALANCE, &pool_balance);
        env.storage().instance().set(&TOTAL_DISTRIBUTED, &total_distributed);
        let key = (USER_CLAIMED, staker.clone());
        env.storage().persistent().set(&key, &claimed);
        ttl::bump_persistent(env, &key);

        Ok((pool_balance, total_distributed))
    }

    fn read_pool_balance(env: &Env) -> i128 {
        env.storage().instance().get(&POOL_BALANCE).unwrap_or(0)
    }

    fn staking_ledger(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKING_LEDGER)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_token_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(token::Client::new(env, &token))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
