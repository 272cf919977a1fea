#![no_std]

//! # Heir Membership Verifier
//!
//! Verification capability consumed by the custody vault: a stateless
//! predicate deciding whether a Groth16 proof demonstrates membership in the
//! heir set committed to by a Merkle root.
//!
//! The contract stores nothing per proof — replay protection (nullifier
//! bookkeeping) belongs to the vault, which is the only component with the
//! authority to consume a claim. Swapping this contract for another
//! implementation of `verify_proof` (including an accept-all test double) is
//! a vault admin operation and requires no vault code change.

pub mod events;
pub mod groth16;


use common::{ownable, CommonError};
use groth16::{MembershipVerifier, Proof, VerificationKey};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, Symbol};

const INITIALIZED: Symbol = symbol_short!("INIT");
const VKEY: Symbol = symbol_short!("VKEY");

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerifierError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidKey = 4,
    NoPendingAdmin = 5,
}

fn from_common(err: CommonError) -> VerifierError {
    match err {
        CommonError::Unauthorized => VerifierError::Unauthorized,
        CommonError::NoPendingOwner => VerifierError::NoPendingAdmin,
        CommonError::OwnerNotSet => VerifierError::NotInitialized,
    }
}

#[contract]
pub struct HeirVerifierContract;

#[contractimpl]
impl HeirVerifierContract {
    /// Install the admin and the circuit's verification key.
    pub fn initialize(env: Env, admin: Address, vk: VerificationKey) -> Result<(), VerifierError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VerifierError::AlreadyInitialized);
        }
        admin.require_auth();

        if MembershipVerifier::validate_key(&vk).is_err() {
            return Err(VerifierError::InvalidKey);
        }

        ownable::set_owner(&env, &admin);
        env.storage().instance().set(&VKEY, &vk);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// Decide the membership predicate.
    ///
    /// Pure view: reads only the verification key, records nothing. Returns
    /// `false` — never an error — for malformed or non-verifying proofs, so
    /// callers see a plain boolean capability.
    pub fn verify_proof(
        env: Env,
        proof: Proof,
        root: BytesN<32>,
        nullifier_hash: BytesN<32>,
        external_nullifier: BytesN<32>,
        signal: BytesN<32>,
    ) -> bool {
        let Some(vk) = env.storage().instance().get::<_, VerificationKey>(&VKEY) else {
            return false;
        };
        MembershipVerifier::verify(
            &env,
            &vk,
            &proof,
            &root,
            &nullifier_hash,
            &external_nullifier,
            &signal,
        )
    }

    /// Replace the verification key (admin only, e.g. after a circuit
    /// upgrade and fresh ceremony).
    pub fn set_verification_key(env: Env, caller: Address, vk: VerificationKey) -> Result<(), VerifierError> {
        Self::require_admin(&env, &caller)?;
        if MembershipVerifier::validate_key(&vk).is_err() {
            return Err(VerifierError::InvalidKey);
        }
        env.storage().instance().set(&VKEY, &vk);
        events::publish_verification_key_updated(&env, caller);
        Ok(())
    }

    /// Poseidon fold of the circuit's public signals; exported so provers and
    /// off-chain tooling agree with the contract on the binding value.
    pub fn public_input_binding(
        env: Env,
        root: BytesN<32>,
        nullifier_hash: BytesN<32>,
        external_nullifier: BytesN<32>,
        signal: BytesN<32>,
    ) -> BytesN<32> {
        MembershipVerifier::public_input_binding(&env, &root, &nullifier_hash, &external_nullifier, &signal)
    }

    // ── Admin transfer (two-phase) ────────────────────────────────────────────

    /// Propose a new admin. Takes effect only when the proposed admin calls
    /// `accept_admin`.
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), VerifierError> {
        Self::require_admin(&env, &caller)?;
        ownable::propose_owner(&env, &new_admin).map_err(from_common)
    }

    /// Complete a proposed admin transfer; `caller` must be the pending
    /// admin.
    pub fn accept_admin(env: Env, caller: Address) -> Result<(), VerifierError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::accept_owner(&env, &caller).map_err(from_common)
    }

    /// Withdraw a pending admin proposal.
    pub fn cancel_admin_transfer(env: Env, caller: Address) -> Result<(), VerifierError> {
        Self::require_admin(&env, &caller)?;
        ownable::cancel_proposed_owner(&env).map_err(from_common)
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn get_verification_key(env: Env) -> Result<VerificationKey, VerifierError> {
        env.storage()
            .instance()
            .get(&VKEY)
            .ok_or(VerifierError::NotInitialized)
    }

    pub fn get_admin(env: Env) -> Result<Address, VerifierError> {
        ownable::owner(&env).ok_or(VerifierError::NotInitialized)
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        ownable::pending_owner(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), VerifierError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        ownable::require_owner(env, caller).map_err(from_common)
    }

    fn require_initialized(env: &Env) -> Result<(), VerifierError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VerifierError::NotInitialized);
        }
        Ok(())
    }
}
