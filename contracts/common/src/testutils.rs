//! Test-only ledger helpers shared by the contract test suites.

use soroban_sdk::testutils::Ledger as _;
use soroban_sdk::Env;

/// Minimum TTL given to new entries. Larger than any block jump the suites
/// make, so positions and contract instances never get archived mid-test.
pub const TEST_ENTRY_TTL: u32 = 1_000_000;

/// Builds an environment with all auths mocked, the ledger at `start_block`,
/// and entry TTLs long enough to survive multi-window block jumps.
///
/// Call before registering any contract: new entries take their initial TTL
/// from the ledger settings at creation time.
pub fn long_lived_env(start_block: u32) -> Env {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| {
        li.sequence_number = start_block;
        li.min_temp_entry_ttl = TEST_ENTRY_TTL;
        li.min_persistent_entry_ttl = TEST_ENTRY_TTL;
        li.max_entry_ttl = TEST_ENTRY_TTL * 3;
    });
    env
}

/// Mines `blocks` empty blocks.
pub fn advance_blocks(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| {
        li.sequence_number = li.sequence_number.saturating_add(blocks);
    });
}

pub fn set_block(env: &Env, block: u32) {
    env.ledger().set_sequence_number(block);
}
