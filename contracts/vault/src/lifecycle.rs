//! Pure phase computation for the vault lifecycle.
//!
//! The phase is never stored — it is derived from `(now, last_heartbeat_at,
//! challenge_window_end)` on every read, so two observers querying at the
//! same ledger timestamp always agree and no transition can leave a stale
//! phase behind.

use soroban_sdk::contracttype;

/// Sentinel for "no expiry in progress". Ledger timestamps are strictly
/// positive, so zero can never collide with a real window end.
pub const NO_EXPIRY: u64 = 0;

/// Derived lifecycle phase of the vault.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VaultPhase {
    /// The owner's last heartbeat is still fresh.
    Alive,
    /// The heartbeat deadline has passed but nobody has started expiry.
    DeadPending,
    /// Expiry has been started and the dispute window is still open.
    Challenge,
    /// The dispute window has elapsed; claims are open.
    Claimable,
}

/// `true` while the owner's liveness signal is fresh.
pub fn is_alive(now: u64, last_heartbeat_at: u64, heartbeat_interval: u64) -> bool {
    now <= last_heartbeat_at.saturating_add(heartbeat_interval)
}

/// Compute the current phase.
///
/// A non-zero `challenge_window_end` dominates: once expiry has been started
/// the heartbeat deadline is irrelevant until the owner revokes (`keep_alive`
/// is unreachable in that state, so `last_heartbeat_at` cannot move).
pub fn phase(
    now: u64,
    last_heartbeat_at: u64,
    heartbeat_interval: u64,
    challenge_window_end: u64,
) -> VaultPhase {
    if challenge_window_end != NO_EXPIRY {
        if now <= challenge_window_end {
            VaultPhase::Challenge
        } else {
            VaultPhase::Claimable
        }
    } else if is_alive(now, last_heartbeat_at, heartbeat_interval) {
        VaultPhase::Alive
    } else {
        VaultPhase::DeadPending
    }
}
