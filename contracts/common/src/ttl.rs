use soroban_sdk::{Env, IntoVal, Val};

pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 34_560;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 259_200;

/// Extends the TTL of the contract instance (and with it every instance key).
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Extends the TTL of a single persistent entry. The entry must exist.
pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
