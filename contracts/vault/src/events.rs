//! Structured event publishing for the vault contract.
//!
//! Events are audit/indexing surface only — nothing in the vault consumes
//! them. Each payload carries the ledger timestamp so off-chain indexers can
//! order the lifecycle without re-reading contract state.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired on every successful heartbeat.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LivenessExtendedEvent {
    pub owner: Address,
    pub new_deadline: u64,
    pub timestamp: u64,
}

/// Fired when a third party starts the expiry process.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpiryStartedEvent {
    pub triggered_by: Address,
    pub started_at: u64,
    pub challenge_window_end: u64,
}

/// Fired when the owner revokes an in-progress expiry and re-arms liveness.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpiryRevokedEvent {
    pub owner: Address,
    pub new_deadline: u64,
    pub timestamp: u64,
}

/// Fired on a successful claim. The nullifier and signal let off-chain
/// auditors correlate the claim with the proof that authorised it without
/// learning which heir claimed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub nullifier: BytesN<32>,
    pub recipient: Address,
    pub amount: i128,
    pub signal: BytesN<32>,
    pub timestamp: u64,
}

/// Fired when the owner replaces the heir-set commitment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RootUpdatedEvent {
    pub old_root: BytesN<32>,
    pub new_root: BytesN<32>,
    pub timestamp: u64,
}

/// Fired when the owner swaps the proof-verifier capability.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifierUpdatedEvent {
    pub old_verifier: Address,
    pub new_verifier: Address,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn publish_liveness_extended(env: &Env, owner: Address, new_deadline: u64) {
    env.events().publish(
        (symbol_short!("ALIVE"), owner.clone()),
        LivenessExtendedEvent {
            owner,
            new_deadline,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_expiry_started(env: &Env, triggered_by: Address, challenge_window_end: u64) {
    let started_at = env.ledger().timestamp();
    env.events().publish(
        (symbol_short!("EXP_STRT"), triggered_by.clone()),
        ExpiryStartedEvent {
            triggered_by,
            started_at,
            challenge_window_end,
        },
    );
}

pub fn publish_expiry_revoked(env: &Env, owner: Address, new_deadline: u64) {
    env.events().publish(
        (symbol_short!("EXP_RVK"), owner.clone()),
        ExpiryRevokedEvent {
            owner,
            new_deadline,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(
    env: &Env,
    nullifier: BytesN<32>,
    recipient: Address,
    amount: i128,
    signal: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), nullifier.clone()),
        ClaimedEvent {
            nullifier,
            recipient,
            amount,
            signal,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_root_updated(env: &Env, old_root: BytesN<32>, new_root: BytesN<32>) {
    env.events().publish(
        (symbol_short!("ROOT_SET"),),
        RootUpdatedEvent {
            old_root,
            new_root,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_verifier_updated(env: &Env, old_verifier: Address, new_verifier: Address) {
    env.events().publish(
        (symbol_short!("VRF_SET"),),
        VerifierUpdatedEvent {
            old_verifier,
            new_verifier,
            timestamp: env.ledger().timestamp(),
        },
    );
}
