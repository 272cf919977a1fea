//! Structured event publishing for the heir verifier contract.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Fired when the verification key is installed or replaced.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationKeyUpdatedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

pub fn publish_verification_key_updated(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("VK_SET"), admin.clone()),
        VerificationKeyUpdatedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
