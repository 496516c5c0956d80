#![no_std]

pub mod events;
pub mod policy;

use common::{access, ttl};
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Symbol};

use policy::Action;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const VAULT_TOKEN: Symbol = symbol_short!("VLT_TOK");
const LOCKED: Symbol = symbol_short!("LOCKED");
const TOTAL_BALANCE: Symbol = symbol_short!("TOT_BAL");

// Persistent tuple keys: (prefix, address)
const USER_BALANCE: Symbol = symbol_short!("BAL");
pub(crate) const AUTHORIZED: Symbol = symbol_short!("AUTH");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    OwnerOnly = 100,
    NotAuthorized = 101,
    InsufficientBalance = 102,
    NotInitialized = 103,
    InvalidAmount = 104,
    AlreadyInitialized = 105,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Custody ledger: per-user token balances, fully backed by the tokens the
/// contract holds.
#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        access::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&VAULT_TOKEN, &token);
        env.storage().instance().set(&LOCKED, &false);
        ttl::bump_instance(&env);

        events::publish_initialized(&env, owner, token);

        Ok(())
    }

    // ── Balances ────────────────────────────────────────────────────────────

    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_unlocked(&env)?;
        user.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        Self::token_client(&env)?.transfer(&user, &env.current_contract_address(), &amount);
        let (balance, total) = Self::adjust(&env, &user, amount)?;

        events::publish_deposit(&env, user, amount, balance, total);

        Ok(amount)
    }

    pub fn withdraw(env: Env, user: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_unlocked(&env)?;
        user.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount > Self::get_user_balance(env.clone(), user.clone()) {
            return Err(ContractError::InsufficientBalance);
        }

        let (balance, total) = Self::adjust(&env, &user, -amount)?;
        Self::token_client(&env)?.transfer(&env.current_contract_address(), &user, &amount);

        events::publish_withdraw(&env, user, amount, balance, total);

        Ok(amount)
    }

    /// Credit `user` with tokens pulled from `caller`, which must be on the
    /// allow-list.
    pub fn credit_user(
        env: Env,
        caller: Address,
        user: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::Credit, ContractError::NotAuthorized)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        Self::token_client(&env)?.transfer(&caller, &env.current_contract_address(), &amount);
        let (balance, total) = Self::adjust(&env, &user, amount)?;

        events::publish_credit(&env, user, amount, balance, total);

        Ok(amount)
    }

    // ── Administration ──────────────────────────────────────────────────────

    pub fn authorize_contract(env: Env, caller: Address, contract: Address) -> Result<bool, ContractError> {
        Self::set_authorization(&env, caller, contract, true)
    }

    pub fn revoke_authorization(env: Env, caller: Address, contract: Address) -> Result<bool, ContractError> {
        Self::set_authorization(&env, caller, contract, false)
    }

    /// While locked, deposits and withdrawals fail with `NotAuthorized`.
    pub fn set_vault_lock(env: Env, caller: Address, locked: bool) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_action(&env, &caller, Action::ManageVault, ContractError::OwnerOnly)?;

        env.storage().instance().set(&LOCKED, &locked);
        events::publish_lock(&env, locked);

        Ok(true)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_authorized(env: Env, contract: Address) -> bool {
        policy::is_allow_listed(&env, &contract)
    }

    pub fn is_vault_locked(env: Env) -> bool {
        env.storage().instance().get(&LOCKED).unwrap_or(false)
    }

    pub fn get_user_balance(env: Env, user: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_BALANCE, user))
            .unwrap_or(0)
    }

    pub fn get_total_balance(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_BALANCE).unwrap_or(0)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        access::get_owner(&env).ok_or(ContractError::NotInitialized)
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

    fn require_unlocked(env: &Env) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        if Self::is_vault_locked(env.clone()) {
            return Err(ContractError::NotAuthorized);
        }
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
        log!(env, "vault: action rejected", caller.clone());
        Err(denied)
    }

    fn set_authorization(
        env: &Env,
        caller: Address,
        contract: Address,
        authorized: bool,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        Self::require_action(env, &caller, Action::ManageVault, ContractError::OwnerOnly)?;

        let key = (AUTHORIZED, contract.clone());
        if authorized {
            env.storage().persistent().set(&key, &true);
            ttl::bump_persistent(env, &key);
        } else {
            env.storage().persistent().remove(&key);
        }
        events::publish_authorization(env, contract, authorized);

        Ok(true)
    }

    /// Apply `delta` to the user's balance and the total together.
    fn adjust(env: &Env, user: &Address, delta: i128) -> Result<(i128, i128), ContractError> {
        let balance = Self::get_user_balance(env.clone(), user.clone())
            .checked_add(delta)
            .filter(|b| *b >= 0)
            .ok_or(ContractError::InsufficientBalance)?;
        let total = Self::get_total_balance(env.clone())
            .checked_add(delta)
            .filter(|t| *t >= 0)
            .ok_or(ContractError::InvalidAmount)?;

        let key = (USER_BALANCE, user.clone());
        env.storage().persistent().set(&key, &balance);
        ttl::bump_persistent(env, &key);
        env.storage().instance().set(&TOTAL_BALANCE, &total);

        Ok((balance, total))
    }

    fn token_client(env: &Env) -> Result<token::Client<'_>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&VAULT_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(token::Client::new(env, &token))
    }
}
