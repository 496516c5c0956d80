//! Time-weighted reward arithmetic.
//!
//! All amounts are integer token units. Every division truncates toward
//! zero and no remainder is carried between calls, so many short claim
//! intervals can distribute slightly less than one long interval.

use common::lock;

/// Base yield in basis points (5%).
pub const BASE_APY_BPS: u32 = 500;
pub const BASIS_POINTS: i128 = 10_000;
/// One year at ~144 blocks per day.
pub const BLOCKS_PER_YEAR: i128 = 52_560;

/// `BASE_APY_BPS * multiplier / 100` for a recognised lock duration.
pub fn effective_apy(lock_period: u32) -> Option<u32> {
    let multiplier = lock::lock_multiplier(lock_period)?;
    BASE_APY_BPS
        .checked_mul(multiplier)
        .map(|scaled| scaled / lock::MULTIPLIER_SCALE)
}

/// Rewards earned by `amount` at `apy_bps` over `elapsed_blocks`.
///
/// Returns `None` on overflow or a negative amount.
pub fn accrued(amount: i128, apy_bps: u32, elapsed_blocks: u32) -> Option<i128> {
    if amount < 0 {
        return None;
    }
    let numerator = amount
        .checked_mul(i128::from(apy_bps))?
        .checked_mul(i128::from(elapsed_blocks))?;
    Some(numerator / (BLOCKS_PER_YEAR * BASIS_POINTS))
}

/// Cap `raw` at what the pool can pay.
pub fn capped(raw: i128, pool_balance: i128) -> i128 {
    raw.min(pool_balance.max(0))
}
