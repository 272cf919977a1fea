#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger},
    Address, BytesN, Env,
};
use vault::{VaultContract, VaultContractClient};

use heir_verifier::groth16::{G1Point, G2Point, Proof};

/// Actions modelling all vault entry points plus time control.
///
/// Each variant carries the minimal data needed for execution. Values are
/// bounded to realistic ranges to avoid wasting fuzz cycles on trivially
/// rejected inputs.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    KeepAlive,
    StartExpiry,
    RevokeExpiry,
    Claim { nullifier_tag: u8, amount: u16 },
    SetRoot { seed: u8 },
    SetVerifier,
    TransferOwnership { accept: bool },
    AdvanceTime { delta: u32 },
}

#[contract]
struct AcceptAllVerifier;

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

fn placeholder_proof(env: &Env) -> Proof {
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

const INTERVAL: u64 = 3_600;
const WINDOW: u64 = 86_400;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let mut owner = Address::generate(&env);
    let verifier = env.register(AcceptAllVerifier, ());

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(VaultContract, ());
    let client = VaultContractClient::new(&env, &contract_id);

    let root = BytesN::from_array(&env, &[0x42u8; 32]);
    if client
        .try_initialize(&owner, &verifier, &token.address(), &root, &INTERVAL, &WINDOW)
        .is_err()
    {
        return;
    }

    // Fund the vault so Claim actions can settle.
    soroban_sdk::token::StellarAssetClient::new(&env, &token.address())
        .mint(&contract_id, &1_000_000_000i128);

    // ── Invariants checked after every action ──
    // 1. Used nullifiers never revert to unused.
    // 2. in_expiry iff challenge_window_end != 0.
    // 3. next_deadline never decreases.

    let mut burned: Vec<BytesN<32>> = Vec::new();
    let mut last_deadline = client.next_deadline();

    for action in actions {
        match action {
            FuzzAction::KeepAlive => {
                let _ = client.try_keep_alive(&owner);
            }
            FuzzAction::StartExpiry => {
                let anyone = Address::generate(&env);
                let _ = client.try_start_expiry(&anyone);
            }
            FuzzAction::RevokeExpiry => {
                let _ = client.try_revoke_expiry(&owner);
            }
            FuzzAction::Claim { nullifier_tag, amount } => {
                let claimant = Address::generate(&env);
                let nullifier = BytesN::from_array(&env, &[nullifier_tag; 32]);
                let signal = BytesN::from_array(&env, &[0xCD; 32]);
                let amt = (amount as i128).max(1);
                if client
                    .try_claim(
                        &claimant,
                        &placeholder_proof(&env),
                        &nullifier,
                        &signal,
                        &claimant,
                        &amt,
                    )
                    .is_ok()
                {
                    burned.push(nullifier);
                }
            }
            FuzzAction::SetRoot { seed } => {
                let new_root = BytesN::from_array(&env, &[seed; 32]);
                let _ = client.try_set_root(&owner, &new_root);
            }
            FuzzAction::SetVerifier => {
                let _ = client.try_set_verifier(&owner, &verifier);
            }
            FuzzAction::TransferOwnership { accept } => {
                let candidate = Address::generate(&env);
                let _ = client.try_transfer_ownership(&owner, &candidate);
                if accept && client.try_accept_ownership(&candidate).is_ok() {
                    owner = candidate;
                } else {
                    let _ = client.try_cancel_ownership_transfer(&owner);
                }
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        for nullifier in &burned {
            assert!(
                client.used_nullifier(nullifier),
                "INVARIANT VIOLATION: consumed nullifier reverted to unused"
            );
        }

        let window_end = client.get_challenge_window_end();
        assert_eq!(
            client.in_expiry(),
            window_end != 0,
            "INVARIANT VIOLATION: in_expiry disagrees with window sentinel"
        );

        let deadline = client.next_deadline();
        assert!(
            deadline >= last_deadline,
            "INVARIANT VIOLATION: next_deadline went backwards: {} -> {}",
            last_deadline,
            deadline
        );
        last_deadline = deadline;
    }
});
