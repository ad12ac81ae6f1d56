// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Fixtures for zkauth tests: a small login circuit, a deterministic trusted
//! setup and helpers that render keys and proofs the way clients send them.

pub mod circuit;
pub mod export;

use ark_bn254::{Bn254, Fr};
use ark_groth16::ProvingKey;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use zka_types::{ProofRequest, ProofType, SnarkProof, VerifyingKeyArtifact};

pub use circuit::{prove, setup, LoginCircuit, PublicInputs};
pub use export::{attach_commitment, decimal_signals, snarkjs_proof, tamper_pi_a, vk_artifact};

/// Nonce that passes the default 16..=256 length bound.
pub const TEST_NONCE: &str = "AAAAAAAAAAAAAAAA";

/// One setup plus one valid proof, all derived from a seed.
pub struct LoginFixture {
    pub pk: ProvingKey<Bn254>,
    pub artifact: VerifyingKeyArtifact,
    pub proof: SnarkProof,
    pub inputs: PublicInputs,
    pub signals: Vec<String>,
    rng: StdRng,
}

impl LoginFixture {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (pk, _) = setup(&mut rng);
        let (proof, inputs) = prove(
            &pk,
            Fr::from(1001u64),
            Fr::from(7919u64),
            Fr::from(123_456_789u64),
            &mut rng,
        );
        Self {
            artifact: vk_artifact(&pk),
            proof: snarkjs_proof(&proof),
            signals: decimal_signals(&inputs.to_vec()),
            inputs,
            pk,
            rng,
        }
    }

    /// Same key, with a Pedersen commitment grafted onto key and proof.
    pub fn with_commitment(seed: u64) -> Self {
        let mut fx = Self::new(seed);
        attach_commitment(
            &mut fx.artifact,
            &mut fx.proof,
            Fr::from(31u64),
            Fr::from(37u64),
            Fr::from(41u64),
        );
        fx
    }

    pub fn artifact_json(&self) -> String {
        serde_json::to_string_pretty(&self.artifact).expect("artifact serializes")
    }

    /// A fresh proof for different inputs under the same key.
    pub fn prove(&mut self, identity: u64, salt: u64, password: u64) -> (SnarkProof, Vec<String>) {
        let (proof, inputs) = prove(
            &self.pk,
            Fr::from(identity),
            Fr::from(salt),
            Fr::from(password),
            &mut self.rng,
        );
        (snarkjs_proof(&proof), decimal_signals(&inputs.to_vec()))
    }

    /// Complete login request carrying this fixture's proof.
    pub fn request(&self, username: &str, nonce: &str, timestamp: i64) -> ProofRequest {
        ProofRequest {
            username: username.to_string(),
            proof: Some(self.proof.clone()),
            public_signals: self.signals.clone(),
            nonce: nonce.to_string(),
            timestamp: Some(timestamp),
            proof_type: Some(ProofType::Login),
            session_id: None,
        }
    }
}
