//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for generating valid and adversarial
//! inputs across the vault's operation surface.
//!
//! ## Design Decisions
//!
//! - Generators produce *semantic* values (durations, amounts, nullifiers,
//!   action sequences), not raw bytes, so tests exercise real code paths
//!   rather than hitting deserialization errors.
//! - Edge-case weights are tuned: boundary durations (1 second, exactly one
//!   interval) appear often enough to probe the inclusive-deadline logic.
//! - Action sequences model realistic lifecycles — heartbeats interleaved
//!   with lapses, disputes and claims — rather than uniform random noise.

extern crate std;

use proptest::prelude::*;
use std::vec::Vec;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Strategy for vault durations (heartbeat interval / challenge window).
/// Strictly positive: zero durations are rejected at construction.
pub fn duration_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(1u64),
        2 => (1u64..=3_600u64),         // up to 1 hour
        3 => (1u64..=86_400u64),        // up to 1 day
        3 => (86_400u64..=604_800u64),  // 1 day to 1 week
        1 => Just(31_536_000u64),       // 1 year
    ]
}

/// Strategy for claim amounts against a vault funded with 10^9 units.
pub fn claim_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(1i128),
        8 => (1i128..=1_000_000i128),
        1 => Just(1_000_000_000i128),
    ]
}

/// Strategy for elapsed-time deltas, biased toward the interesting
/// neighbourhood of vault deadlines.
pub fn elapsed_strategy(interval: u64) -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        1 => Just(interval),            // exactly on the deadline
        1 => Just(interval + 1),        // one past it
        7 => (0u64..=interval.saturating_mul(3)),
    ]
}

/// Strategy for 32-byte nullifier tokens. Never all-zero: a real nullifier
/// is a field element output by the circuit.
pub fn nullifier_strategy() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>().prop_map(|mut bytes| {
        if bytes.iter().all(|&b| b == 0) {
            bytes[0] = 1;
        }
        bytes
    })
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Enumeration of vault actions for lifecycle exploration.
///
/// Each variant carries the minimal data needed to execute the action; the
/// harness resolves indices against its pool of test identities. Every
/// action is attempted via `try_` calls — rejections are part of the
/// explored behaviour, not test failures.
#[derive(Debug, Clone)]
pub enum VaultAction {
    /// Owner heartbeat.
    KeepAlive,
    /// Third party opens the challenge window.
    StartExpiry,
    /// Owner disputes an in-progress expiry.
    RevokeExpiry,
    /// Claim with a fresh or previously-seen nullifier.
    Claim { nullifier_index: usize, amount: i128 },
    /// Owner replaces the heir-set commitment.
    SetRoot { seed: u8 },
    /// Advance time.
    AdvanceTime { delta: u64 },
}

/// Strategy for a single vault action.
pub fn vault_action_strategy(interval: u64) -> impl Strategy<Value = VaultAction> {
    prop_oneof![
        3 => Just(VaultAction::KeepAlive),
        2 => Just(VaultAction::StartExpiry),
        2 => Just(VaultAction::RevokeExpiry),
        2 => ((0usize..8), 1i128..=1_000i128)
            .prop_map(|(nullifier_index, amount)| VaultAction::Claim { nullifier_index, amount }),
        1 => (1u8..=255).prop_map(|seed| VaultAction::SetRoot { seed }),
        4 => elapsed_strategy(interval).prop_map(|delta| VaultAction::AdvanceTime { delta }),
    ]
}

/// Strategy for a sequence of `min..=max` vault actions.
pub fn vault_action_sequence(
    interval: u64,
    min: usize,
    max: usize,
) -> impl Strategy<Value = Vec<VaultAction>> {
    prop::collection::vec(vault_action_strategy(interval), min..=max)
}
