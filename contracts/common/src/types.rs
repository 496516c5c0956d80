use soroban_sdk::contracttype;

/// A participant's locked balance plus its lock metadata.
///
/// Block heights are ledger sequence numbers. `unlock_block` always equals
/// `start_block + lock_period`; `last_claim_block` is the height up to which
/// rewards have been settled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    pub lock_period: u32,
    pub start_block: u32,
    pub unlock_block: u32,
    pub last_claim_block: u32,
}

impl StakePosition {
    /// Blocks elapsed since the last reward settlement, clamped at zero.
    pub fn blocks_since_claim(&self, now: u32) -> u32 {
        now.saturating_sub(self.last_claim_block)
    }

    pub fn is_unlocked(&self, now: u32) -> bool {
        now >= self.unlock_block
    }
}
