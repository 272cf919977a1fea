//! # Vault Contract Testing Framework
//!
//! A reusable testing harness for the custody vault suite supporting
//! property-based testing and invariant checking across the liveness /
//! expiry / claim lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             — Core TestEnv, harness, snapshots
//! ├── generators.rs      — Property-based test value generators
//! └── invariants.rs      — Lifecycle invariant definitions & verification
//! ```

extern crate std;

pub mod generators;

use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, BytesN, Env,
};

use heir_verifier::groth16::{G1Point, G2Point, Proof};
use vault::lifecycle::VaultPhase;
use vault::{VaultContract, VaultContractClient};

// ── Core Test Environment ────────────────────────────────────────────────────

/// A high-level test environment that wraps the Soroban `Env` and provides
/// contract deployment, time control, and address management.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked and the clock set
    /// to a realistic (strictly positive) epoch.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_700_000_000);
        Self { env }
    }

    /// Generate a fresh Soroban address.
    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }

    /// Set the ledger timestamp.
    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a SAC token contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    /// Mint tokens from a SAC token to a recipient.
    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Verifier test double ─────────────────────────────────────────────────────

/// Accept-all implementation of the verification capability, for tests that
/// exercise the vault state machine rather than proof soundness.
#[contract]
pub struct AcceptAllVerifier;

#[contractimpl]
impl AcceptAllVerifier {
    pub fn verify_proof(
        _env: Env,
        _proof: Proof,
        _root: BytesN<32>,
        _nullifier_hash: BytesN<32>,
        _external_nullifier: BytesN<32>,
        _signal: BytesN<32>,
    ) -> bool {
        true
    }
}

/// A structurally well-formed proof whose contents the accept-all double
/// never inspects.
pub fn placeholder_proof(env: &Env) -> Proof {
    Proof {
        a: G1Point {
            x: BytesN::from_array(env, &[1u8; 32]),
            y: BytesN::from_array(env, &[2u8; 32]),
        },
        b: G2Point {
            x: (
                BytesN::from_array(env, &[3u8; 32]),
                BytesN::from_array(env, &[4u8; 32]),
            ),
            y: (
                BytesN::from_array(env, &[5u8; 32]),
                BytesN::from_array(env, &[6u8; 32]),
            ),
        },
        c: G1Point {
            x: BytesN::from_array(env, &[7u8; 32]),
            y: BytesN::from_array(env, &[8u8; 32]),
        },
    }
}

// ── Vault-Specific Harness ───────────────────────────────────────────────────

/// Pre-wired vault fixture: vault + verifier double + funded custody token.
pub struct VaultTestHarness<'a> {
    pub env: &'a mut TestEnv,
    pub client: VaultContractClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
    pub verifier: Address,
    pub token: Address,
    pub heir_root: BytesN<32>,
    pub heartbeat_interval: u64,
    pub challenge_window: u64,
}

impl<'a> VaultTestHarness<'a> {
    /// Deploy and initialize a vault with an accept-all verifier double and
    /// `funding` units of custody asset.
    pub fn new(
        env: &'a mut TestEnv,
        heartbeat_interval: u64,
        challenge_window: u64,
        funding: i128,
    ) -> Self {
        let verifier = env.env.register(AcceptAllVerifier, ());
        Self::with_verifier(env, verifier, heartbeat_interval, challenge_window, funding)
    }

    /// Same as [`VaultTestHarness::new`] but against a caller-supplied
    /// verifier contract (e.g. the real `heir_verifier`).
    pub fn with_verifier(
        env: &'a mut TestEnv,
        verifier: Address,
        heartbeat_interval: u64,
        challenge_window: u64,
        funding: i128,
    ) -> Self {
        let token = env.deploy_token();
        let contract_id = env.env.register(VaultContract, ());
        let client = VaultContractClient::new(&env.env, &contract_id);
        let owner = env.generate_address();
        let heir_root = BytesN::from_array(&env.env, &[0x42; 32]);

        client.initialize(
            &owner,
            &verifier,
            &token,
            &heir_root,
            &heartbeat_interval,
            &challenge_window,
        );
        if funding > 0 {
            env.mint_tokens(&token, &contract_id, funding);
        }

        Self {
            env,
            client,
            contract_id,
            owner,
            verifier,
            token,
            heir_root,
            heartbeat_interval,
            challenge_window,
        }
    }

    /// Lapse the heartbeat and open the challenge window.
    pub fn trigger_expiry(&self) -> u64 {
        self.env.advance_time(self.heartbeat_interval + 1);
        let anyone = Address::generate(&self.env.env);
        self.client.start_expiry(&anyone)
    }

    /// Drive the vault all the way into the Claimable phase.
    pub fn reach_claimable(&self) {
        self.trigger_expiry();
        self.env.advance_time(self.challenge_window + 1);
    }

    /// Claim with the placeholder proof and fresh claimant.
    pub fn claim(&self, nullifier: &BytesN<32>, recipient: &Address, amount: i128) {
        let claimant = Address::generate(&self.env.env);
        let signal = BytesN::from_array(&self.env.env, &[0xCD; 32]);
        self.client.claim(
            &claimant,
            &placeholder_proof(&self.env.env),
            nullifier,
            &signal,
            recipient,
            &amount,
        );
    }

    /// Snapshot of the full query surface for invariant checking.
    pub fn snapshot(&self, tracked_nullifiers: &[BytesN<32>]) -> VaultSnapshot {
        let used: std::vec::Vec<(BytesN<32>, bool)> = tracked_nullifiers
            .iter()
            .map(|n| (n.clone(), self.client.used_nullifier(n)))
            .collect();

        VaultSnapshot {
            timestamp: self.env.timestamp(),
            phase: self.client.get_phase(),
            is_alive: self.client.is_alive(),
            in_expiry: self.client.in_expiry(),
            in_challenge_window: self.client.in_challenge_window(),
            claim_open: self.client.claim_open(),
            next_deadline: self.client.next_deadline(),
            challenge_window_end: self.client.get_challenge_window_end(),
            heartbeat_interval: self.client.get_heartbeat_interval(),
            challenge_window: self.client.get_challenge_window(),
            used_nullifiers: used,
        }
    }
}

/// Immutable snapshot of the vault's observable state at a point in time.
#[derive(Debug, Clone)]
pub struct VaultSnapshot {
    pub timestamp: u64,
    pub phase: VaultPhase,
    pub is_alive: bool,
    pub in_expiry: bool,
    pub in_challenge_window: bool,
    pub claim_open: bool,
    pub next_deadline: u64,
    pub challenge_window_end: u64,
    pub heartbeat_interval: u64,
    pub challenge_window: u64,
    pub used_nullifiers: std::vec::Vec<(BytesN<32>, bool)>,
}
