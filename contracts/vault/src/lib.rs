#![no_std]

//! # Dead-Man's-Switch Custody Vault
//!
//! An owner periodically proves liveness; if the heartbeats stop, anyone may
//! start an expiry process, and once a fixed challenge window has elapsed a
//! member of the committed heir set may claim custody by presenting a
//! zero-knowledge membership proof — without revealing which heir is
//! claiming.
//!
//! - **Liveness**: `keep_alive` pushes the heartbeat deadline forward.
//! - **Expiry**: `start_expiry` (anyone) opens the challenge window after the
//!   deadline lapses; `revoke_expiry` (owner) closes it and re-arms liveness.
//! - **Claims**: `claim` is gated by an injected proof-verifier capability
//!   and a one-way nullifier set, so each membership proof is consumable
//!   exactly once for the life of the vault.
//! - **Administration**: heir-root and verifier are owner-replaceable;
//!   ownership itself moves via two-phase transfer.
//!
//! The lifecycle phase is derived, never stored — see [`lifecycle`].

pub mod events;
pub mod lifecycle;


use common::{ownable, CommonError};
use heir_verifier::groth16::Proof;
use heir_verifier::HeirVerifierContractClient;
use lifecycle::{VaultPhase, NO_EXPIRY};
use soroban_sdk::{
    contract, contractimpl, symbol_short, token, xdr::ToXdr, Address, BytesN, Env, Symbol,
};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const VERIFIER: Symbol = symbol_short!("VERIFIER");
const TOKEN: Symbol = symbol_short!("TOKEN");
const HEIR_ROOT: Symbol = symbol_short!("ROOT");
const HB_INTERVAL: Symbol = symbol_short!("HB_INT");
const CH_WINDOW: Symbol = symbol_short!("CH_WIN");
const LAST_HB: Symbol = symbol_short!("LAST_HB");
const CH_END: Symbol = symbol_short!("CH_END");
const EXT_NUL: Symbol = symbol_short!("EXT_NUL");
/// Prefix for the append-only nullifier set (persistent storage).
const NUL: Symbol = symbol_short!("NUL");

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// The heir-set commitment may never be the zero value.
    ZeroRoot = 4,
    /// Heartbeat interval and challenge window must be positive.
    ZeroDuration = 5,
    InvalidAmount = 6,
    /// Operation requires the vault to be alive, and it is not.
    NotAlive = 7,
    /// Expiry cannot start while the owner's heartbeat is fresh.
    StillAlive = 8,
    /// No expiry process has been started.
    ExpiryNotStarted = 9,
    /// An expiry process is already underway (challenge or claimable).
    ExpiryAlreadyActive = 10,
    /// The challenge window has elapsed; revocation is no longer possible.
    ChallengeWindowOver = 11,
    /// The challenge window is still running; claims are not open yet.
    ClaimNotOpen = 12,
    NullifierAlreadyUsed = 13,
    InvalidProof = 14,
    NoPendingOwner = 15,
}

fn from_common(err: CommonError) -> VaultError {
    match err {
        CommonError::Unauthorized => VaultError::Unauthorized,
        CommonError::NoPendingOwner => VaultError::NoPendingOwner,
        CommonError::OwnerNotSet => VaultError::NotInitialized,
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    // ── Construction ──────────────────────────────────────────────────────────

    /// Create the vault. `heartbeat_interval` and `challenge_window` are
    /// immutable afterwards; `heir_root` and `verifier` remain
    /// owner-replaceable. The heartbeat starts armed at the current ledger
    /// time, and the vault-scoped external nullifier is derived from the
    /// contract's own address so proofs cannot be replayed against another
    /// deployment sharing the same heir set.
    pub fn initialize(
        env: Env,
        owner: Address,
        verifier: Address,
        token: Address,
        heir_root: BytesN<32>,
        heartbeat_interval: u64,
        challenge_window: u64,
    ) -> Result<(), VaultError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::AlreadyInitialized);
        }
        owner.require_auth();

        if heir_root == BytesN::from_array(&env, &[0u8; 32]) {
            return Err(VaultError::ZeroRoot);
        }
        if heartbeat_interval == 0 || challenge_window == 0 {
            return Err(VaultError::ZeroDuration);
        }

        let external_nullifier = Self::derive_external_nullifier(&env);

        ownable::set_owner(&env, &owner);
        env.storage().instance().set(&VERIFIER, &verifier);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&HEIR_ROOT, &heir_root);
        env.storage().instance().set(&HB_INTERVAL, &heartbeat_interval);
        env.storage().instance().set(&CH_WINDOW, &challenge_window);
        env.storage().instance().set(&LAST_HB, &env.ledger().timestamp());
        env.storage().instance().set(&CH_END, &NO_EXPIRY);
        env.storage().instance().set(&EXT_NUL, &external_nullifier);
        env.storage().instance().set(&INITIALIZED, &true);

        Ok(())
    }

    // ── Liveness & expiry transitions ─────────────────────────────────────────

    /// Owner heartbeat. Only admissible while the vault is alive; once the
    /// deadline has lapsed, liveness can only be re-armed through
    /// `revoke_expiry` during the challenge window.
    pub fn keep_alive(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;

        if Self::current_phase(&env)? != VaultPhase::Alive {
            return Err(VaultError::NotAlive);
        }

        let now = env.ledger().timestamp();
        env.storage().instance().set(&LAST_HB, &now);
        let new_deadline = now.saturating_add(Self::read_u64(&env, &HB_INTERVAL)?);
        events::publish_liveness_extended(&env, caller, new_deadline);
        Ok(())
    }

    /// Open the challenge window. Callable by anyone once the heartbeat
    /// deadline has lapsed; rejected while the owner is alive and, with a
    /// distinct code, while a window is already open or elapsed.
    pub fn start_expiry(env: Env, caller: Address) -> Result<u64, VaultError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        match Self::current_phase(&env)? {
            VaultPhase::Alive => return Err(VaultError::StillAlive),
            VaultPhase::Challenge | VaultPhase::Claimable => {
                return Err(VaultError::ExpiryAlreadyActive)
            }
            VaultPhase::DeadPending => {}
        }

        let now = env.ledger().timestamp();
        let window_end = now.saturating_add(Self::read_u64(&env, &CH_WINDOW)?);
        env.storage().instance().set(&CH_END, &window_end);
        events::publish_expiry_started(&env, caller, window_end);
        Ok(window_end)
    }

    /// Owner disputes an in-progress expiry. Only admissible while the
    /// challenge window is open; closes the window and re-arms liveness as if
    /// a heartbeat had just been sent.
    pub fn revoke_expiry(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;

        match Self::current_phase(&env)? {
            VaultPhase::Alive | VaultPhase::DeadPending => {
                return Err(VaultError::ExpiryNotStarted)
            }
            VaultPhase::Claimable => return Err(VaultError::ChallengeWindowOver),
            VaultPhase::Challenge => {}
        }

        let now = env.ledger().timestamp();
        env.storage().instance().set(&CH_END, &NO_EXPIRY);
        env.storage().instance().set(&LAST_HB, &now);
        let new_deadline = now.saturating_add(Self::read_u64(&env, &HB_INTERVAL)?);
        events::publish_expiry_revoked(&env, caller, new_deadline);
        Ok(())
    }

    // ── Claim authorization ───────────────────────────────────────────────────

    /// Claim custody of `amount` for `recipient`, authorised by a
    /// zero-knowledge membership proof.
    ///
    /// The nullifier is recorded **before** the transfer is invoked, so a
    /// re-entrant transfer callback replaying the same proof hits
    /// `NullifierAlreadyUsed` instead of double-spending. Nullifier gating is
    /// proof-scoped, not recipient-scoped: one proof authorises exactly one
    /// claim regardless of the recipient it names.
    pub fn claim(
        env: Env,
        claimant: Address,
        proof: Proof,
        nullifier: BytesN<32>,
        signal: BytesN<32>,
        recipient: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        Self::require_initialized(&env)?;
        claimant.require_auth();

        match Self::current_phase(&env)? {
            VaultPhase::Alive | VaultPhase::DeadPending => {
                return Err(VaultError::ExpiryNotStarted)
            }
            VaultPhase::Challenge => return Err(VaultError::ClaimNotOpen),
            VaultPhase::Claimable => {}
        }

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if Self::used_nullifier(env.clone(), nullifier.clone()) {
            return Err(VaultError::NullifierAlreadyUsed);
        }

        let verifier: Address = env
            .storage()
            .instance()
            .get(&VERIFIER)
            .ok_or(VaultError::NotInitialized)?;
        let heir_root: BytesN<32> = env
            .storage()
            .instance()
            .get(&HEIR_ROOT)
            .ok_or(VaultError::NotInitialized)?;
        let external_nullifier: BytesN<32> = env
            .storage()
            .instance()
            .get(&EXT_NUL)
            .ok_or(VaultError::NotInitialized)?;

        let verified = HeirVerifierContractClient::new(&env, &verifier).verify_proof(
            &proof,
            &heir_root,
            &nullifier,
            &external_nullifier,
            &signal,
        );
        if !verified {
            return Err(VaultError::InvalidProof);
        }

        // Consume the proof before any external effect.
        env.storage()
            .persistent()
            .set(&(NUL, nullifier.clone()), &true);

        let asset: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(VaultError::NotInitialized)?;
        token::Client::new(&env, &asset).transfer(
            &env.current_contract_address(),
            &recipient,
            &amount,
        );

        events::publish_claimed(&env, nullifier, recipient, amount, signal);
        Ok(())
    }

    // ── Owner administration ──────────────────────────────────────────────────

    /// Replace the heir-set commitment. Only admissible while alive, so the
    /// heir set cannot be swapped out from under a succession already in
    /// progress.
    pub fn set_root(env: Env, caller: Address, new_root: BytesN<32>) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;

        if Self::current_phase(&env)? != VaultPhase::Alive {
            return Err(VaultError::NotAlive);
        }
        if new_root == BytesN::from_array(&env, &[0u8; 32]) {
            return Err(VaultError::ZeroRoot);
        }

        let old_root: BytesN<32> = env
            .storage()
            .instance()
            .get(&HEIR_ROOT)
            .ok_or(VaultError::NotInitialized)?;
        env.storage().instance().set(&HEIR_ROOT, &new_root);
        events::publish_root_updated(&env, old_root, new_root);
        Ok(())
    }

    /// Swap the proof-verifier capability.
    pub fn set_verifier(env: Env, caller: Address, new_verifier: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;

        let old_verifier: Address = env
            .storage()
            .instance()
            .get(&VERIFIER)
            .ok_or(VaultError::NotInitialized)?;
        env.storage().instance().set(&VERIFIER, &new_verifier);
        events::publish_verifier_updated(&env, old_verifier, new_verifier);
        Ok(())
    }

    // ── Ownership transfer (two-phase) ────────────────────────────────────────

    /// Propose a new owner. Takes effect only when the proposed owner calls
    /// `accept_ownership`. No lifecycle precondition: ownership may move in
    /// any phase.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        ownable::propose_owner(&env, &new_owner).map_err(from_common)
    }

    /// Complete a proposed ownership transfer; `caller` must be the pending
    /// owner.
    pub fn accept_ownership(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::accept_owner(&env, &caller).map_err(from_common)
    }

    /// Withdraw a pending ownership proposal.
    pub fn cancel_ownership_transfer(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_owner(&env, &caller)?;
        ownable::cancel_proposed_owner(&env).map_err(from_common)
    }

    // ── Queries (pure) ────────────────────────────────────────────────────────

    /// `true` while the owner's heartbeat is fresh.
    pub fn is_alive(env: Env) -> Result<bool, VaultError> {
        Ok(Self::current_phase(&env)? == VaultPhase::Alive)
    }

    /// `true` while an expiry process is underway (challenge or claimable).
    pub fn in_expiry(env: Env) -> Result<bool, VaultError> {
        Ok(Self::read_u64(&env, &CH_END)? != NO_EXPIRY)
    }

    /// `true` while the challenge window is open.
    pub fn in_challenge_window(env: Env) -> Result<bool, VaultError> {
        Ok(Self::current_phase(&env)? == VaultPhase::Challenge)
    }

    /// `true` once the challenge window has elapsed and claims are open.
    pub fn claim_open(env: Env) -> Result<bool, VaultError> {
        Ok(Self::current_phase(&env)? == VaultPhase::Claimable)
    }

    /// Derived lifecycle phase.
    pub fn get_phase(env: Env) -> Result<VaultPhase, VaultError> {
        Self::current_phase(&env)
    }

    /// The heartbeat deadline: `last_heartbeat_at + heartbeat_interval`.
    pub fn next_deadline(env: Env) -> Result<u64, VaultError> {
        let last = Self::read_u64(&env, &LAST_HB)?;
        Ok(last.saturating_add(Self::read_u64(&env, &HB_INTERVAL)?))
    }

    /// End of the dispute window, or `0` while no expiry is in progress.
    pub fn get_challenge_window_end(env: Env) -> Result<u64, VaultError> {
        Self::read_u64(&env, &CH_END)
    }

    /// `true` once `nullifier` has been consumed by a claim. One-way: there
    /// is no path, administrative or otherwise, that clears an entry.
    pub fn used_nullifier(env: Env, nullifier: BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .get(&(NUL, nullifier))
            .unwrap_or(false)
    }

    pub fn get_owner(env: Env) -> Result<Address, VaultError> {
        ownable::owner(&env).ok_or(VaultError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownable::pending_owner(&env)
    }

    pub fn get_verifier(env: Env) -> Result<Address, VaultError> {
        env.storage()
            .instance()
            .get(&VERIFIER)
            .ok_or(VaultError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, VaultError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(VaultError::NotInitialized)
    }

    pub fn get_heir_root(env: Env) -> Result<BytesN<32>, VaultError> {
        env.storage()
            .instance()
            .get(&HEIR_ROOT)
            .ok_or(VaultError::NotInitialized)
    }

    pub fn get_heartbeat_interval(env: Env) -> Result<u64, VaultError> {
        Self::read_u64(&env, &HB_INTERVAL)
    }

    pub fn get_challenge_window(env: Env) -> Result<u64, VaultError> {
        Self::read_u64(&env, &CH_WINDOW)
    }

    /// Vault-scoped constant mixed into every proof verification.
    pub fn external_nullifier(env: Env) -> Result<BytesN<32>, VaultError> {
        env.storage()
            .instance()
            .get(&EXT_NUL)
            .ok_or(VaultError::NotInitialized)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn current_phase(env: &Env) -> Result<VaultPhase, VaultError> {
        let last = Self::read_u64(env, &LAST_HB)?;
        let interval = Self::read_u64(env, &HB_INTERVAL)?;
        let window_end = Self::read_u64(env, &CH_END)?;
        Ok(lifecycle::phase(
            env.ledger().timestamp(),
            last,
            interval,
            window_end,
        ))
    }

    fn derive_external_nullifier(env: &Env) -> BytesN<32> {
        let address_bytes = env.current_contract_address().to_xdr(env);
        env.crypto().sha256(&address_bytes).into()
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), VaultError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        ownable::require_owner(env, caller).map_err(from_common)
    }

    fn read_u64(env: &Env, key: &Symbol) -> Result<u64, VaultError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(VaultError::NotInitialized)
    }

    fn require_initialized(env: &Env) -> Result<(), VaultError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }
}
