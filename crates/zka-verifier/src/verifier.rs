// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::{Bn254, G1Projective};
use ark_ec::pairing::Pairing;
use ark_ec::{CurveGroup, VariableBaseMSM};

use crate::error::VerificationError;
use crate::key::{VerifyingKey, VerifyingKeyStore};
use crate::pedersen::verify_knowledge;
use crate::proof::{Groth16Proof, PublicWitness};

/// Verify a Groth16 proof against `vk` for the given public inputs.
///
/// Checks run in a fixed order and stop at the first failure: witness
/// length, point validity, commitment count, pairing equation, commitment
/// knowledge.
pub fn verify(
    proof: &Groth16Proof,
    vk: &VerifyingKey,
    witness: &PublicWitness,
) -> Result<(), VerificationError> {
    let k = vk.k();
    let expected = k.len() - 1;
    if witness.len() != expected {
        return Err(VerificationError::WitnessSizeMismatch {
            got: witness.len(),
            expected,
        });
    }

    if let Some(point) = proof.first_invalid_point() {
        return Err(VerificationError::InvalidProofPoint(point));
    }

    // Every commitment folded into K_sum must be covered by a key's PoK.
    let keys = vk.commitment_keys().len();
    if proof.commitments.len() != keys {
        return Err(VerificationError::CommitmentVerificationFailed(format!(
            "proof carries {} commitments, key expects {keys}",
            proof.commitments.len()
        )));
    }

    // K_sum = K[0] + Σ wᵢ·K[i+1] + Σ commitments
    let mut k_sum = if witness.is_empty() {
        G1Projective::from(k[0])
    } else {
        let acc = G1Projective::msm(&k[1..], witness.as_slice()).map_err(|got| {
            VerificationError::WitnessSizeMismatch { got, expected }
        })?;
        acc + k[0]
    };
    for c in &proof.commitments {
        k_sum += c;
    }
    let k_sum = k_sum.into_affine();

    let lhs = Bn254::multi_pairing(
        [proof.ar, proof.krs, k_sum],
        [proof.bs, vk.delta_neg(), vk.gamma_neg()],
    );
    if lhs != *vk.alpha_beta() {
        return Err(VerificationError::PairingCheckFailed);
    }

    if keys > 0 {
        verify_knowledge(
            vk.commitment_keys(),
            &proof.commitments,
            &proof.commitment_pok,
        )?;
    }

    Ok(())
}

/// Seam between the login flow and the pairing engine.
pub trait ProofVerifier: Send + Sync {
    fn verify(&self, proof: &Groth16Proof, witness: &PublicWitness)
        -> Result<(), VerificationError>;

    /// Number of public signals the loaded circuit expects.
    fn num_public_inputs(&self) -> usize;

    /// Fingerprint of the loaded key.
    fn key_id(&self) -> &str;
}

/// [`ProofVerifier`] backed by the process-wide verifying key.
#[derive(Debug, Clone)]
pub struct Groth16Verifier {
    keys: VerifyingKeyStore,
}

impl Groth16Verifier {
    pub fn new(keys: VerifyingKeyStore) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &VerifyingKeyStore {
        &self.keys
    }
}

impl ProofVerifier for Groth16Verifier {
    fn verify(
        &self,
        proof: &Groth16Proof,
        witness: &PublicWitness,
    ) -> Result<(), VerificationError> {
        verify(proof, self.keys.key(), witness)
    }

    fn num_public_inputs(&self) -> usize {
        self.keys.key().num_public_inputs()
    }

    fn key_id(&self) -> &str {
        self.keys.key_id()
    }
}
