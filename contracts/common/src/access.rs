use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::ttl;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const ADMIN_PREFIX: Symbol = symbol_short!("ADMIN");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");

fn admin_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_PREFIX, admin.clone())
}

// ── Owner ────────────────────────────────────────────────────────────────────

/// Records the contract owner. Only callable internally, during
/// initialisation.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns true if `caller` is the stored owner. An uninitialised contract
/// has no owner, so nobody passes.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *caller,
        None => false,
    }
}

// ── Admin set ────────────────────────────────────────────────────────────────

/// Grants admin rights to `admin`. Callers must verify the owner beforehand.
pub fn add_admin(env: &Env, admin: &Address) {
    let key = admin_key(admin);
    env.storage().persistent().set(&key, &true);
    ttl::bump_persistent(env, &key);
    track_admin(env, admin);
}

/// Revokes admin rights. Removing an address that is not an admin is a no-op.
pub fn remove_admin(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&admin_key(admin));
    untrack_admin(env, admin);
}

pub fn is_admin(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&admin_key(who))
        .unwrap_or(false)
}

pub fn is_owner_or_admin(env: &Env, who: &Address) -> bool {
    is_owner(env, who) || is_admin(env, who)
}

/// Returns every address currently holding admin rights.
pub fn list_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

fn track_admin(env: &Env, admin: &Address) {
    let mut admins = list_admins(env);
    if !admins.contains(admin) {
        admins.push_back(admin.clone());
        env.storage().persistent().set(&ADMIN_LIST, &admins);
        ttl::bump_persistent(env, &ADMIN_LIST);
    }
}

fn untrack_admin(env: &Env, admin: &Address) {
    let admins = list_admins(env);
    if let Some(index) = admins.first_index_of(admin) {
        let mut admins = admins;
        admins.remove(index);
        env.storage().persistent().set(&ADMIN_LIST, &admins);
    }
}
