// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Pedersen commitment proof-of-knowledge.
//!
//! A single PoK point covers every commitment in the proof. The commitments
//! are folded with powers of a Fiat-Shamir challenge `r`:
//!
//! `e(pok, G) · Π e(rⁱ·Cᵢ, G·(−1/σᵢ)) == 1`

use ark_bn254::{Bn254, Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::CurveGroup;
use ark_ff::{One, PrimeField, Zero};
use sha2::{Digest, Sha256};

use crate::error::VerificationError;
use crate::key::absorb_g1;

const CHALLENGE_DOMAIN: &[u8] = b"zkauth/pedersen-pok/v1";

/// Verifying half of one Pedersen commitment key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedersenVerifyingKey {
    pub g: G2Affine,
    pub g_root_sigma_neg: G2Affine,
}

/// Folding challenge derived from the commitments themselves.
pub fn commitment_challenge(commitments: &[G1Affine]) -> Fr {
    let mut hasher = Sha256::new();
    hasher.update(CHALLENGE_DOMAIN);
    for c in commitments {
        absorb_g1(&mut hasher, c);
    }
    Fr::from_be_bytes_mod_order(&hasher.finalize())
}

/// Check the folded proof-of-knowledge for `commitments` under `keys`.
///
/// Keys must share `g`; the key loader enforces this.
pub fn verify_knowledge(
    keys: &[PedersenVerifyingKey],
    commitments: &[G1Affine],
    pok: &G1Affine,
) -> Result<(), VerificationError> {
    if keys.len() != commitments.len() {
        return Err(VerificationError::CommitmentVerificationFailed(format!(
            "proof carries {} commitments, key expects {}",
            commitments.len(),
            keys.len()
        )));
    }
    let Some(first) = keys.first() else {
        return Ok(());
    };

    let r = commitment_challenge(commitments);
    let mut g1_terms = Vec::with_capacity(keys.len() + 1);
    let mut g2_terms = Vec::with_capacity(keys.len() + 1);
    g1_terms.push(*pok);
    g2_terms.push(first.g);

    let mut power = Fr::one();
    let folded: Vec<G1Projective> = commitments
        .iter()
        .map(|c| {
            let term = *c * power;
            power *= r;
            term
        })
        .collect();
    g1_terms.extend(G1Projective::normalize_batch(&folded));
    g2_terms.extend(keys.iter().map(|k| k.g_root_sigma_neg));

    if Bn254::multi_pairing(g1_terms, g2_terms).is_zero() {
        Ok(())
    } else {
        Err(VerificationError::CommitmentVerificationFailed(
            "proof of knowledge does not open the commitments".into(),
        ))
    }
}
