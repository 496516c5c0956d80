#![no_std]

pub mod events;
pub mod policy;

use common::interfaces::ParameterStoreClient;
use common::{access, lock, ttl, StakePosition};
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Symbol};

use policy::Action;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const PARAMETERS: Symbol = symbol_short!("PARAMS");
pub(crate) const REWARD_ENGINE: Symbol = symbol_short!("RWD_ENG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const TOTAL_STAKERS: Symbol = symbol_short!("TOT_STKRS");
const POOL_ACTIVE: Symbol = symbol_short!("POOL_ACT");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER_STAKE: Symbol = symbol_short!("STK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    OwnerOnly = 200,
    NotFound = 201,
    AlreadyExists = 202,
    InvalidAmount = 203,
    StakeLocked = 204,
    PoolInactive = 205,
    NotAuthorized = 206,
    InvalidPeriod = 207,
    NotInitialized = 208,
    AlreadyInitialized = 209,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `token`         – SAC address of the staked token.
    /// * `parameters`    – parameter store read for the min/max stake bounds.
    /// * `reward_engine` – the only contract allowed to settle or compound
    ///                     positions.
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        parameters: Address,
        reward_engine: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        access::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &token);
        env.storage().instance().set(&PARAMETERS, &parameters);
        env.storage().instance().set(&REWARD_ENGINE, &reward_engine);
        env.storage().instance().set(&POOL_ACTIVE, &true);
        // TOTAL_STAKED and TOTAL_STAKERS start at zero; unwrap_or(0) handles
        // absent keys.
        ttl::bump_instance(&env);

        events::publish_initialized(&env, owner, token, parameters, reward_engine);

        Ok(())
    }

    // ── Positions ───────────────────────────────────────────────────────────

    /// Open a position of `amount` tokens locked for `lock_period` blocks.
    ///
    /// Returns the staked amount.
    pub fn create_stake(
        env: Env,
        staker: Address,
        amount: i128,
        lock_period: u32,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let params = ParameterStoreClient::new(&env, &Self::parameter_store(&env)?);
        if amount <= 0
            || amount < params.get_min_stake_required()
            || amount > params.get_max_stake_allowed()
        {
            return Err(ContractError::InvalidAmount);
        }
        if !lock::is_valid_lock_period(lock_period) {
            return Err(ContractError::InvalidPeriod);
        }
        if Self::load_position(&env, &staker).is_some() {
            return Err(ContractError::AlreadyExists);
        }
        if !Self::is_pool_active(env.clone()) {
            return Err(ContractError::PoolInactive);
        }

        let now = env.ledger().sequence();
        let unlock_block = now
            .checked_add(lock_period)
            .ok_or(ContractError::InvalidPeriod)?;
        let new_total = Self::read_total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;
        let new_stakers = Self::get_total_stakers(env.clone()).saturating_add(1);

        Self::stake_token_client(&env)?.transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let position = StakePosition {
            amount,
            lock_period,
            start_block: now,
            unlock_block,
            last_claim_block: now,
        };
        Self::store_position(&env, &staker, &position);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        env.storage().instance().set(&TOTAL_STAKERS, &new_stakers);

        events::publish_stake_created(&env, staker, amount, lock_period, unlock_block, new_total);

        Ok(amount)
    }

    /// Add `extra` tokens to an existing position.
    ///
    /// `last_claim_block` is left untouched: rewards pending on the old
    /// amount stay pending until the next claim or compound.
    pub fn increase_stake(env: Env, staker: Address, extra: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let position = Self::load_position(&env, &staker).ok_or(ContractError::NotFound)?;
        if extra <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        Self::stake_token_client(&env)?.transfer(
            &staker,
            &env.current_contract_address(),
            &extra,
        );
        Self::apply_increase(&env, &staker, position, extra, false)?;

        Ok(extra)
    }

    /// Restart the lock window from now with a strictly longer duration.
    pub fn extend_lock_period(
        env: Env,
        staker: Address,
        new_period: u32,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut position = Self::load_position(&env, &staker).ok_or(ContractError::NotFound)?;
        if !lock::is_valid_lock_period(new_period) || new_period <= position.lock_period {
            return Err(ContractError::InvalidPeriod);
        }

        let now = env.ledger().sequence();
        position.lock_period = new_period;
        position.start_block = now;
        position.unlock_block = now
            .checked_add(new_period)
            .ok_or(ContractError::InvalidPeriod)?;
        Self::store_position(&env, &staker, &position);

        events::publish_lock_extended(&env, staker, new_period, position.unlock_block);

        Ok(true)
    }

    /// Close the position and return every staked token.
    ///
    /// Partial withdrawal is not supported. Unclaimed rewards are not
    /// settled here; claim or compound first.
    pub fn withdraw_stake(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let position = Self::load_position(&env, &staker).ok_or(ContractError::NotFound)?;
        if !position.is_unlocked(env.ledger().sequence()) {
            return Err(ContractError::StakeLocked);
        }

        let new_total = Self::read_total_staked(&env).saturating_sub(position.amount);
        let new_stakers = Self::get_total_stakers(env.clone()).saturating_sub(1);

        // Remove the position before the transfer (checks-effects-interactions).
        env.storage().persistent().remove(&stake_key(&staker));
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        env.storage().instance().set(&TOTAL_STAKERS, &new_stakers);

        Self::stake_token_client(&env)?.transfer(
            &env.current_contract_address(),
            &staker,
            &position.amount,
        );

        events::publish_withdrawn(&env, staker, position.amount, new_total);

        Ok(position.amount)
    }

    // ── Reward-engine capability ────────────────────────────────────────────

    /// Mark the staker's rewards as settled up to the current block.
    ///
    /// Only the registered reward engine may call this.
    pub fn settle_rewards(env: Env, caller: Address, staker: Address) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::SettlePosition, ContractError::NotAuthorized)?;

        let mut position = Self::load_position(&env, &staker).ok_or(ContractError::NotFound)?;
        let now = env.ledger().sequence();
        position.last_claim_block = now;
        Self::store_position(&env, &staker, &position);

        events::publish_rewards_settled(&env, staker);

        Ok(now)
    }

    /// Fold `amount` of already-transferred reward tokens into the position
    /// and settle it.
    ///
    /// Only the registered reward engine may call this. Returns the new
    /// position amount.
    pub fn compound_stake(
        env: Env,
        caller: Address,
        staker: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::SettlePosition, ContractError::NotAuthorized)?;

        let position = Self::load_position(&env, &staker).ok_or(ContractError::NotFound)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        Self::apply_increase(&env, &staker, position, amount, true)
    }

    // ── Administration ──────────────────────────────────────────────────────

    /// Stop accepting new positions. Existing positions are unaffected.
    pub fn pause(env: Env, caller: Address) -> Result<bool, ContractError> {
        Self::set_pool_active(&env, caller, false)
    }

    pub fn resume(env: Env, caller: Address) -> Result<bool, ContractError> {
        Self::set_pool_active(&env, caller, true)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_stake(env: Env, staker: Address) -> Option<StakePosition> {
        Self::load_position(&env, &staker)
    }

    /// Return the staker's current amount, or zero without a position.
    pub fn get_user_stake_amount(env: Env, staker: Address) -> i128 {
        Self::load_position(&env, &staker).map_or(0, |p| p.amount)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        Self::read_total_staked(&env)
    }

    pub fn get_total_stakers(env: Env) -> u32 {
        env.storage().instance().get(&TOTAL_STAKERS).unwrap_or(0)
    }

    pub fn is_pool_active(env: Env) -> bool {
        env.storage().instance().get(&POOL_ACTIVE).unwrap_or(false)
    }

    /// True once the current block has reached the position's unlock block.
    /// False when there is no position.
    pub fn is_stake_unlocked(env: Env, staker: Address) -> bool {
        let now = env.ledger().sequence();
        Self::load_position(&env, &staker).map_or(false, |p| p.is_unlocked(now))
    }

    /// Return the percent-of-100 multiplier for a lock duration.
    pub fn calculate_lock_multiplier(_env: Env, lock_period: u32) -> Result<u32, ContractError> {
        lock::lock_multiplier(lock_period).ok_or(ContractError::InvalidPeriod)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        access::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
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
        log!(env, "staking: action rejected", caller.clone());
        Err(denied)
    }

    fn set_pool_active(env: &Env, caller: Address, active: bool) -> Result<bool, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_action(env, &caller, Action::TogglePool, ContractError::OwnerOnly)?;

        env.storage().instance().set(&POOL_ACTIVE, &active);
        events::publish_pool_status(env, active, caller);

        Ok(true)
    }

    /// Shared increase path for deposits and compounding. Totals and the
    /// position are written together.
    fn apply_increase(
        env: &Env,
        staker: &Address,
        mut position: StakePosition,
        added: i128,
        settle: bool,
    ) -> Result<i128, ContractError> {
        let new_amount = position
            .amount
            .checked_add(added)
            .ok_or(ContractError::InvalidAmount)?;
        let new_total = Self::read_total_staked(env)
            .checked_add(added)
            .ok_or(ContractError::InvalidAmount)?;

        position.amount = new_amount;
        if settle {
            position.last_claim_block = env.ledger().sequence();
        }
        Self::store_position(env, staker, &position);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        events::publish_stake_increased(env, staker.clone(), added, new_amount, new_total, settle);

        Ok(new_amount)
    }

    fn load_position(env: &Env, staker: &Address) -> Option<StakePosition> {
        env.storage().persistent().get(&stake_key(staker))
    }

    fn store_position(env: &Env, staker: &Address, position: &StakePosition) {
        let key = stake_key(staker);
        env.storage().persistent().set(&key, position);
        ttl::bump_persistent(env, &key);
    }

    fn read_total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    fn parameter_store(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&PARAMETERS)
            .ok_or(ContractError::NotInitialized)
    }

    fn stake_token_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(token::Client::new(env, &token))
    }
}

fn stake_key(staker: &Address) -> (Symbol, Address) {
    (USER_STAKE, staker.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
