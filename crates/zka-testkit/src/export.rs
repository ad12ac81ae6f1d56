// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Convert arkworks setup/proof output into the documents a real deployment
//! exchanges: the verification key artifact and snarkjs-style proofs.

use ark_bn254::{Bn254, Fr, G1Projective, G2Projective};
use ark_ec::{CurveGroup, PrimeGroup};
use ark_groth16::{Proof, ProvingKey};
use zka_types::codec::{g1_from_snarkjs, g1_to_snarkjs, g2_to_snarkjs, to_decimal};
use zka_types::{
    Curve, G1Artifact, G1Coords, G2Artifact, G2Coords, PedersenKeyArtifact, Protocol, SnarkProof,
    VerifyingKeyArtifact,
};

/// Verification key artifact for a proving key. `K` is arkworks'
/// `gamma_abc_g1`.
pub fn vk_artifact(pk: &ProvingKey<Bn254>) -> VerifyingKeyArtifact {
    let vk = &pk.vk;
    VerifyingKeyArtifact {
        g1: G1Artifact {
            alpha: G1Coords::from_affine(&vk.alpha_g1),
            beta: G1Coords::from_affine(&pk.beta_g1),
            delta: G1Coords::from_affine(&pk.delta_g1),
            k: vk.gamma_abc_g1.iter().map(G1Coords::from_affine).collect(),
        },
        g2: G2Artifact {
            beta: G2Coords::from_affine(&vk.beta_g2),
            delta: G2Coords::from_affine(&vk.delta_g2),
            gamma: G2Coords::from_affine(&vk.gamma_g2),
        },
        commitment_keys: Vec::new(),
        committed_index_groups: Vec::new(),
    }
}

pub fn snarkjs_proof(proof: &Proof<Bn254>) -> SnarkProof {
    SnarkProof {
        pi_a: g1_to_snarkjs(&proof.a),
        pi_b: g2_to_snarkjs(&proof.b),
        pi_c: g1_to_snarkjs(&proof.c),
        protocol: Protocol::Groth16,
        curve: Curve::Bn128,
        commitments: Vec::new(),
        commitment_pok: None,
    }
}

pub fn decimal_signals(values: &[Fr]) -> Vec<String> {
    values.iter().map(to_decimal).collect()
}

/// Graft a single Pedersen commitment onto an existing key/proof pair.
///
/// The commitment `C` is subtracted from `K[0]` so the verifier's
/// `K_sum + C` still satisfies the pairing equation, and the key gains a
/// commitment key `(G, −σ·G)` with `pok = σ·C`.
pub fn attach_commitment(
    artifact: &mut VerifyingKeyArtifact,
    proof: &mut SnarkProof,
    commitment_scalar: Fr,
    sigma: Fr,
    g_scalar: Fr,
) {
    let c = (G1Projective::generator() * commitment_scalar).into_affine();
    let g = (G2Projective::generator() * g_scalar).into_affine();

    let k0 = artifact.g1.k[0]
        .to_affine_unchecked("g1.k[0]")
        .expect("k[0] decodes");
    artifact.g1.k[0] = G1Coords::from_affine(&(G1Projective::from(k0) - c).into_affine());
    artifact.commitment_keys = vec![PedersenKeyArtifact {
        g: G2Coords::from_affine(&g),
        g_root_sigma_neg: G2Coords::from_affine(&(-(g * sigma)).into_affine()),
    }];
    artifact.committed_index_groups = vec![vec![1]];

    proof.commitments = vec![g1_to_snarkjs(&c)];
    proof.commitment_pok = Some(g1_to_snarkjs(&(c * sigma).into_affine()));
}

/// Same proof with `Ar` moved to a different valid point, so decoding and
/// subgroup checks pass and only the pairing equation fails.
pub fn tamper_pi_a(proof: &SnarkProof) -> SnarkProof {
    let mut out = proof.clone();
    let a = g1_from_snarkjs("pi_a", &proof.pi_a).expect("pi_a decodes");
    let shifted = (G1Projective::from(a) + G1Projective::generator()).into_affine();
    out.pi_a = g1_to_snarkjs(&shifted);
    out
}
