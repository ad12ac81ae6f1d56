// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Verifying key: parsed once from the trusted-setup artifact, never mutated.

use std::path::Path;
use std::sync::Arc;

use ark_bn254::{Bn254, G1Affine, G2Affine};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ff::{BigInteger, PrimeField};
use sha2::{Digest, Sha256};
use zka_types::{
    G1Artifact, G1Coords, G2Artifact, G2Coords, PedersenKeyArtifact, VerifyingKeyArtifact,
};

use crate::error::KeyLoadError;
use crate::pedersen::PedersenVerifyingKey;

/// G1 half of the key. `beta` and `delta` are only used by provers but are
/// kept so the key round-trips the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G1Key {
    pub alpha: G1Affine,
    pub beta: G1Affine,
    pub delta: G1Affine,
    /// K\[0\] is the constant term, K\[1..\] pair with public inputs
    pub k: Vec<G1Affine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G2Key {
    pub beta: G2Affine,
    pub delta: G2Affine,
    pub gamma: G2Affine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    g1: G1Key,
    g2: G2Key,
    delta_neg: G2Affine,
    gamma_neg: G2Affine,
    alpha_beta: PairingOutput<Bn254>,
    commitment_keys: Vec<PedersenVerifyingKey>,
    committed_index_groups: Vec<Vec<usize>>,
}

impl VerifyingKey {
    /// Validate every point and precompute `−δ`, `−γ` and `e(α, β)`.
    pub fn new(
        g1: G1Key,
        g2: G2Key,
        commitment_keys: Vec<PedersenVerifyingKey>,
        committed_index_groups: Vec<Vec<usize>>,
    ) -> Result<Self, KeyLoadError> {
        if g1.k.is_empty() {
            return Err(KeyLoadError::EmptyK);
        }

        check_g1("g1.alpha", &g1.alpha)?;
        check_g1("g1.beta", &g1.beta)?;
        check_g1("g1.delta", &g1.delta)?;
        for (i, k) in g1.k.iter().enumerate() {
            check_g1(&format!("g1.k[{i}]"), k)?;
        }
        check_g2("g2.beta", &g2.beta)?;
        check_g2("g2.delta", &g2.delta)?;
        check_g2("g2.gamma", &g2.gamma)?;
        for (i, ck) in commitment_keys.iter().enumerate() {
            check_g2(&format!("commitmentKeys[{i}].g"), &ck.g)?;
            check_g2(&format!("commitmentKeys[{i}].gRootSigmaNeg"), &ck.g_root_sigma_neg)?;
        }

        check_commitment_layout(&commitment_keys, &committed_index_groups, g1.k.len() - 1)?;

        let delta_neg = -g2.delta;
        let gamma_neg = -g2.gamma;
        let alpha_beta = Bn254::pairing(g1.alpha, g2.beta);

        Ok(Self {
            g1,
            g2,
            delta_neg,
            gamma_neg,
            alpha_beta,
            commitment_keys,
            committed_index_groups,
        })
    }

    pub fn from_artifact(artifact: &VerifyingKeyArtifact) -> Result<Self, KeyLoadError> {
        let g1 = G1Key {
            alpha: artifact.g1.alpha.to_affine_unchecked("g1.alpha")?,
            beta: artifact.g1.beta.to_affine_unchecked("g1.beta")?,
            delta: artifact.g1.delta.to_affine_unchecked("g1.delta")?,
            k: artifact
                .g1
                .k
                .iter()
                .enumerate()
                .map(|(i, p)| p.to_affine_unchecked(&format!("g1.k[{i}]")))
                .collect::<Result<_, _>>()?,
        };
        let g2 = G2Key {
            beta: artifact.g2.beta.to_affine_unchecked("g2.beta")?,
            delta: artifact.g2.delta.to_affine_unchecked("g2.delta")?,
            gamma: artifact.g2.gamma.to_affine_unchecked("g2.gamma")?,
        };
        let commitment_keys = artifact
            .commitment_keys
            .iter()
            .enumerate()
            .map(|(i, ck)| -> Result<PedersenVerifyingKey, KeyLoadError> {
                Ok(PedersenVerifyingKey {
                    g: ck.g.to_affine_unchecked(&format!("commitmentKeys[{i}].g"))?,
                    g_root_sigma_neg: ck
                        .g_root_sigma_neg
                        .to_affine_unchecked(&format!("commitmentKeys[{i}].gRootSigmaNeg"))?,
                })
            })
            .collect::<Result<_, _>>()?;

        Self::new(
            g1,
            g2,
            commitment_keys,
            artifact.committed_index_groups.clone(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, KeyLoadError> {
        let artifact: VerifyingKeyArtifact = serde_json::from_str(json)?;
        Self::from_artifact(&artifact)
    }

    pub fn to_artifact(&self) -> VerifyingKeyArtifact {
        VerifyingKeyArtifact {
            g1: G1Artifact {
                alpha: G1Coords::from_affine(&self.g1.alpha),
                beta: G1Coords::from_affine(&self.g1.beta),
                delta: G1Coords::from_affine(&self.g1.delta),
                k: self.g1.k.iter().map(G1Coords::from_affine).collect(),
            },
            g2: G2Artifact {
                beta: G2Coords::from_affine(&self.g2.beta),
                delta: G2Coords::from_affine(&self.g2.delta),
                gamma: G2Coords::from_affine(&self.g2.gamma),
            },
            commitment_keys: self
                .commitment_keys
                .iter()
                .map(|ck| PedersenKeyArtifact {
                    g: G2Coords::from_affine(&ck.g),
                    g_root_sigma_neg: G2Coords::from_affine(&ck.g_root_sigma_neg),
                })
                .collect(),
            committed_index_groups: self.committed_index_groups.clone(),
        }
    }

    pub fn g1(&self) -> &G1Key {
        &self.g1
    }

    pub fn g2(&self) -> &G2Key {
        &self.g2
    }

    pub fn k(&self) -> &[G1Affine] {
        &self.g1.k
    }

    /// Number of public inputs the circuit expects, `len(K) − 1`.
    pub fn num_public_inputs(&self) -> usize {
        self.g1.k.len() - 1
    }

    pub fn delta_neg(&self) -> G2Affine {
        self.delta_neg
    }

    pub fn gamma_neg(&self) -> G2Affine {
        self.gamma_neg
    }

    /// Precomputed `e(α, β)`.
    pub fn alpha_beta(&self) -> &PairingOutput<Bn254> {
        &self.alpha_beta
    }

    pub fn commitment_keys(&self) -> &[PedersenVerifyingKey] {
        &self.commitment_keys
    }

    pub fn committed_index_groups(&self) -> &[Vec<usize>] {
        &self.committed_index_groups
    }

    /// key_id = sha256(alpha ++ beta_g2 ++ gamma ++ delta_g2 ++ k[0..n] ++ commitment keys),
    /// coordinates big-endian.
    pub fn key_id(&self) -> String {
        let mut hasher = Sha256::new();
        absorb_g1(&mut hasher, &self.g1.alpha);
        absorb_g2(&mut hasher, &self.g2.beta);
        absorb_g2(&mut hasher, &self.g2.gamma);
        absorb_g2(&mut hasher, &self.g2.delta);
        for k in &self.g1.k {
            absorb_g1(&mut hasher, k);
        }
        for ck in &self.commitment_keys {
            absorb_g2(&mut hasher, &ck.g);
            absorb_g2(&mut hasher, &ck.g_root_sigma_neg);
        }
        hex::encode(hasher.finalize())
    }
}

/// Process-wide handle to the loaded key. Cloning shares the same key.
#[derive(Debug, Clone)]
pub struct VerifyingKeyStore {
    key: Arc<VerifyingKey>,
    key_id: Arc<str>,
}

impl VerifyingKeyStore {
    pub fn new(key: VerifyingKey) -> Self {
        let key_id = key.key_id().into();
        Self {
            key: Arc::new(key),
            key_id,
        }
    }

    /// Read and validate the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeyLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| KeyLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, KeyLoadError> {
        VerifyingKey::from_json(json).map(Self::new)
    }

    pub fn key(&self) -> &VerifyingKey {
        &self.key
    }

    pub fn shared(&self) -> Arc<VerifyingKey> {
        Arc::clone(&self.key)
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

fn check_g1(name: &str, p: &G1Affine) -> Result<(), KeyLoadError> {
    if g1_in_subgroup(p) {
        Ok(())
    } else {
        Err(KeyLoadError::InvalidPoint(name.to_string()))
    }
}

fn check_g2(name: &str, p: &G2Affine) -> Result<(), KeyLoadError> {
    if g2_in_subgroup(p) {
        Ok(())
    } else {
        Err(KeyLoadError::InvalidPoint(name.to_string()))
    }
}

fn check_commitment_layout(
    keys: &[PedersenVerifyingKey],
    groups: &[Vec<usize>],
    num_public: usize,
) -> Result<(), KeyLoadError> {
    if keys.is_empty() {
        if groups.is_empty() {
            return Ok(());
        }
        return Err(KeyLoadError::CommitmentLayout(format!(
            "{} committed index groups but no commitment keys",
            groups.len()
        )));
    }
    if groups.len() != keys.len() {
        return Err(KeyLoadError::CommitmentLayout(format!(
            "{} committed index groups for {} commitment keys",
            groups.len(),
            keys.len()
        )));
    }
    // The folded knowledge proof is checked against a single e(pok, G) term.
    if keys.iter().any(|k| k.g != keys[0].g) {
        return Err(KeyLoadError::CommitmentLayout(
            "commitment keys do not share the base G".into(),
        ));
    }
    for (i, group) in groups.iter().enumerate() {
        if let Some(bad) = group.iter().find(|&&idx| idx == 0 || idx > num_public) {
            return Err(KeyLoadError::CommitmentLayout(format!(
                "committedIndexGroups[{i}] references input {bad}, circuit has {num_public}"
            )));
        }
    }
    Ok(())
}

pub(crate) fn g1_in_subgroup(p: &G1Affine) -> bool {
    p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()
}

pub(crate) fn g2_in_subgroup(p: &G2Affine) -> bool {
    p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()
}

pub(crate) fn absorb_g1(hasher: &mut Sha256, p: &G1Affine) {
    if p.infinity {
        hasher.update([0u8]);
        return;
    }
    hasher.update([1u8]);
    hasher.update(p.x.into_bigint().to_bytes_be());
    hasher.update(p.y.into_bigint().to_bytes_be());
}

pub(crate) fn absorb_g2(hasher: &mut Sha256, p: &G2Affine) {
    if p.infinity {
        hasher.update([0u8]);
        return;
    }
    hasher.update([1u8]);
    for c in [p.x.c0, p.x.c1, p.y.c0, p.y.c1] {
        hasher.update(c.into_bigint().to_bytes_be());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};

    fn g1(n: u64) -> G1Affine {
        (G1Projective::generator() * Fr::from(n)).into_affine()
    }

    fn g2(n: u64) -> G2Affine {
        (G2Projective::generator() * Fr::from(n)).into_affine()
    }

    fn sample_parts(inputs: usize) -> (G1Key, G2Key) {
        let g1_key = G1Key {
            alpha: g1(2),
            beta: g1(3),
            delta: g1(5),
            k: (0..=inputs as u64).map(|i| g1(11 + i)).collect(),
        };
        let g2_key = G2Key {
            beta: g2(3),
            delta: g2(5),
            gamma: g2(7),
        };
        (g1_key, g2_key)
    }

    #[test]
    fn precomputes_negations_and_pairing() {
        let (a, b) = sample_parts(4);
        let vk = VerifyingKey::new(a, b, vec![], vec![]).unwrap();
        assert_eq!(vk.num_public_inputs(), 4);
        assert_eq!(vk.delta_neg(), -g2(5));
        assert_eq!(vk.gamma_neg(), -g2(7));
        assert_eq!(*vk.alpha_beta(), Bn254::pairing(g1(2), g2(3)));
    }

    #[test]
    fn rejects_empty_k() {
        let (mut a, b) = sample_parts(0);
        a.k.clear();
        assert!(matches!(
            VerifyingKey::new(a, b, vec![], vec![]),
            Err(KeyLoadError::EmptyK)
        ));
    }

    #[test]
    fn rejects_off_curve_point() {
        let (mut a, b) = sample_parts(1);
        let p = a.k[1];
        a.k[1] = G1Affine::new_unchecked(p.x, p.y + ark_bn254::Fq::from(1u64));
        match VerifyingKey::new(a, b, vec![], vec![]) {
            Err(KeyLoadError::InvalidPoint(name)) => assert_eq!(name, "g1.k[1]"),
            other => panic!("expected InvalidPoint, got {other:?}"),
        }
    }

    #[test]
    fn artifact_round_trip_preserves_key() {
        let (a, b) = sample_parts(2);
        let vk = VerifyingKey::new(a, b, vec![], vec![]).unwrap();
        let json = serde_json::to_string(&vk.to_artifact()).unwrap();
        let reloaded = VerifyingKey::from_json(&json).unwrap();
        assert_eq!(reloaded, vk);
        assert_eq!(reloaded.key_id(), vk.key_id());
    }

    #[test]
    fn key_id_depends_on_k() {
        let (a, b) = sample_parts(2);
        let vk = VerifyingKey::new(a.clone(), b.clone(), vec![], vec![]).unwrap();
        let mut a2 = a;
        a2.k[2] = g1(99);
        let other = VerifyingKey::new(a2, b, vec![], vec![]).unwrap();
        assert_ne!(vk.key_id(), other.key_id());
        assert_eq!(vk.key_id().len(), 64);
    }

    #[test]
    fn commitment_groups_must_match_keys() {
        let (a, b) = sample_parts(4);
        let ck = PedersenVerifyingKey {
            g: g2(1),
            g_root_sigma_neg: -g2(9),
        };
        let err = VerifyingKey::new(a.clone(), b.clone(), vec![ck.clone()], vec![]).unwrap_err();
        assert!(matches!(err, KeyLoadError::CommitmentLayout(_)));

        let err = VerifyingKey::new(a.clone(), b.clone(), vec![ck.clone()], vec![vec![5]]).unwrap_err();
        assert!(matches!(err, KeyLoadError::CommitmentLayout(_)));

        let err = VerifyingKey::new(a.clone(), b.clone(), vec![], vec![vec![1]]).unwrap_err();
        assert!(matches!(err, KeyLoadError::CommitmentLayout(_)));

        VerifyingKey::new(a, b, vec![ck], vec![vec![1, 4]]).unwrap();
    }

    #[test]
    fn commitment_keys_must_share_base() {
        let (a, b) = sample_parts(2);
        let keys = vec![
            PedersenVerifyingKey {
                g: g2(1),
                g_root_sigma_neg: -g2(9),
            },
            PedersenVerifyingKey {
                g: g2(2),
                g_root_sigma_neg: -g2(18),
            },
        ];
        let err = VerifyingKey::new(a, b, keys, vec![vec![1], vec![2]]).unwrap_err();
        assert!(matches!(err, KeyLoadError::CommitmentLayout(_)));
    }

    #[test]
    fn store_shares_one_key() {
        let (a, b) = sample_parts(1);
        let store = VerifyingKeyStore::new(VerifyingKey::new(a, b, vec![], vec![]).unwrap());
        let clone = store.clone();
        assert!(Arc::ptr_eq(&store.shared(), &clone.shared()));
        assert_eq!(store.key_id(), store.key().key_id());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = VerifyingKeyStore::load("/nonexistent/verification_key.json").unwrap_err();
        assert!(matches!(err, KeyLoadError::Io { .. }));
        assert_eq!(err.code(), "KEY_LOAD_FAILURE");
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            VerifyingKeyStore::from_json("{\"g1\": 1}"),
            Err(KeyLoadError::Json(_))
        ));
    }
}
