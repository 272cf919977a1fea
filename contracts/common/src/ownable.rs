//! Single-owner access control with two-phase ownership transfer.
//!
//! Storage-only capability module: it tracks the current authority and an
//! optional pending transfer, but performs **no** `require_auth` of its own —
//! callers are responsible for enforcing authorization before invoking the
//! mutating functions, keeping the module reusable across contracts with
//! different admin models.
//!
//! Transfer is two-phase (propose → accept) so that ownership can never be
//! handed to an address that cannot sign for itself.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::CommonError;

const OWNER: Symbol = symbol_short!("OWNER");
const PEND_OWN: Symbol = symbol_short!("PEND_OWN");

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired when an ownership transfer is proposed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when a proposed transfer is accepted by the new owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending transfer is cancelled by the current owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── State access ─────────────────────────────────────────────────────────────

/// Install `owner` as the current authority. Unconditional write; intended
/// for one-shot use from a contract's `initialize`.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Current authority, if one has been installed.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Address of a proposed-but-unaccepted transfer, if any.
pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PEND_OWN)
}

/// `true` when `who` is the current authority.
pub fn is_owner(env: &Env, who: &Address) -> bool {
    owner(env).is_some_and(|o| o == *who)
}

/// Guard — returns `CommonError::Unauthorized` unless `caller` is the
/// current authority.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    if !is_owner(env, caller) {
        return Err(CommonError::Unauthorized);
    }
    Ok(())
}

// ── Two-phase transfer ───────────────────────────────────────────────────────

/// Propose `proposed` as the next authority. Overwrites any earlier
/// unaccepted proposal. Emits an `OwnershipProposedEvent`.
pub fn propose_owner(env: &Env, proposed: &Address) -> Result<(), CommonError> {
    let current = owner(env).ok_or(CommonError::OwnerNotSet)?;
    env.storage().instance().set(&PEND_OWN, proposed);
    env.events().publish(
        (symbol_short!("OWN_PROP"), current.clone()),
        OwnershipProposedEvent {
            current_owner: current,
            proposed_owner: proposed.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}

/// Cancel the pending proposal. Emits an `OwnershipCancelledEvent`.
pub fn cancel_proposed_owner(env: &Env) -> Result<(), CommonError> {
    let current = owner(env).ok_or(CommonError::OwnerNotSet)?;
    let proposed: Address = pending_owner(env).ok_or(CommonError::NoPendingOwner)?;
    env.storage().instance().remove(&PEND_OWN);
    env.events().publish(
        (symbol_short!("OWN_CNCL"), current.clone()),
        OwnershipCancelledEvent {
            owner: current,
            cancelled_proposed: proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}

/// Complete a transfer: `caller` must be the pending owner. On success the
/// pending slot is cleared and `caller` becomes the authority. Emits an
/// `OwnershipAcceptedEvent`.
pub fn accept_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    let old = owner(env).ok_or(CommonError::OwnerNotSet)?;
    let proposed: Address = pending_owner(env).ok_or(CommonError::NoPendingOwner)?;
    if proposed != *caller {
        return Err(CommonError::Unauthorized);
    }
    env.storage().instance().set(&OWNER, caller);
    env.storage().instance().remove(&PEND_OWN);
    env.events().publish(
        (symbol_short!("OWN_ACPT"), caller.clone()),
        OwnershipAcceptedEvent {
            old_owner: old,
            new_owner: caller.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}
