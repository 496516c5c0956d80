//! Lock durations accepted by the staking ledger.
//!
//! The multiplier is a lookup over a closed set of durations, expressed as an
//! integer percent-of-100 (`110` means 1.10x), so reward math stays integral.

/// ~30 days at 144 blocks per day.
pub const LOCK_PERIOD_SHORT: u32 = 4_320;
/// ~60 days.
pub const LOCK_PERIOD_MEDIUM: u32 = 8_640;
/// ~90 days.
pub const LOCK_PERIOD_LONG: u32 = 12_960;

pub const MULTIPLIER_SHORT: u32 = 110;
pub const MULTIPLIER_MEDIUM: u32 = 125;
pub const MULTIPLIER_LONG: u32 = 150;

/// Denominator of the percent-of-100 multipliers.
pub const MULTIPLIER_SCALE: u32 = 100;

/// Returns the multiplier for `lock_period`, or `None` for an unrecognised
/// duration.
pub fn lock_multiplier(lock_period: u32) -> Option<u32> {
    match lock_period {
        LOCK_PERIOD_SHORT => Some(MULTIPLIER_SHORT),
        LOCK_PERIOD_MEDIUM => Some(MULTIPLIER_MEDIUM),
        LOCK_PERIOD_LONG => Some(MULTIPLIER_LONG),
        _ => None,
    }
}

pub fn is_valid_lock_period(lock_period: u32) -> bool {
    lock_multiplier(lock_period).is_some()
}
