// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::{Fr, G1Affine, G2Affine};
use zka_types::codec::{
    g1_from_snarkjs, g1_to_snarkjs, g2_from_snarkjs, g2_to_snarkjs, parse_decimal, to_decimal,
};
use zka_types::{CodecError, Curve, Protocol, SnarkProof};

use crate::key::{g1_in_subgroup, g2_in_subgroup};

/// A decoded Groth16 proof. Points are not yet validated; the verifier does
/// that before any pairing work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groth16Proof {
    pub ar: G1Affine,
    pub bs: G2Affine,
    pub krs: G1Affine,
    pub commitments: Vec<G1Affine>,
    pub commitment_pok: G1Affine,
}

impl Groth16Proof {
    /// Proof without commitments. The PoK slot holds the identity.
    pub fn new(ar: G1Affine, bs: G2Affine, krs: G1Affine) -> Self {
        Self {
            ar,
            bs,
            krs,
            commitments: Vec::new(),
            commitment_pok: G1Affine::identity(),
        }
    }

    pub fn from_snarkjs(proof: &SnarkProof) -> Result<Self, CodecError> {
        let commitments = proof
            .commitments
            .iter()
            .enumerate()
            .map(|(i, c)| g1_from_snarkjs(&format!("commitments[{i}]"), c))
            .collect::<Result<_, _>>()?;
        let commitment_pok = match &proof.commitment_pok {
            Some(pok) => g1_from_snarkjs("commitmentPok", pok)?,
            None => G1Affine::identity(),
        };
        Ok(Self {
            ar: g1_from_snarkjs("pi_a", &proof.pi_a)?,
            bs: g2_from_snarkjs("pi_b", &proof.pi_b)?,
            krs: g1_from_snarkjs("pi_c", &proof.pi_c)?,
            commitments,
            commitment_pok,
        })
    }

    pub fn to_snarkjs(&self) -> SnarkProof {
        SnarkProof {
            pi_a: g1_to_snarkjs(&self.ar),
            pi_b: g2_to_snarkjs(&self.bs),
            pi_c: g1_to_snarkjs(&self.krs),
            protocol: Protocol::Groth16,
            curve: Curve::Bn128,
            commitments: self.commitments.iter().map(g1_to_snarkjs).collect(),
            commitment_pok: (!self.commitments.is_empty())
                .then(|| g1_to_snarkjs(&self.commitment_pok)),
        }
    }

    /// Name of the first point that is off the curve or outside the
    /// prime-order subgroup.
    pub fn first_invalid_point(&self) -> Option<&'static str> {
        if !g1_in_subgroup(&self.ar) {
            return Some("Ar");
        }
        if !g2_in_subgroup(&self.bs) {
            return Some("Bs");
        }
        if !g1_in_subgroup(&self.krs) {
            return Some("Krs");
        }
        if !self.commitments.iter().all(g1_in_subgroup) {
            return Some("commitment");
        }
        if !g1_in_subgroup(&self.commitment_pok) {
            return Some("commitmentPok");
        }
        None
    }
}

/// Public signals in circuit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicWitness(Vec<Fr>);

impl PublicWitness {
    pub fn new(values: Vec<Fr>) -> Self {
        Self(values)
    }

    /// Decode the request's decimal public signals.
    pub fn from_signals<S: AsRef<str>>(signals: &[S]) -> Result<Self, CodecError> {
        signals
            .iter()
            .enumerate()
            .map(|(i, s)| parse_decimal(&format!("publicSignals[{i}]"), s.as_ref()))
            .collect::<Result<Vec<Fr>, _>>()
            .map(Self)
    }

    pub fn to_signals(&self) -> Vec<String> {
        self.0.iter().map(to_decimal).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Fr] {
        &self.0
    }
}

impl From<Vec<Fr>> for PublicWitness {
    fn from(values: Vec<Fr>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fq, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};

    fn sample() -> Groth16Proof {
        Groth16Proof::new(
            (G1Projective::generator() * Fr::from(3u64)).into_affine(),
            (G2Projective::generator() * Fr::from(5u64)).into_affine(),
            (G1Projective::generator() * Fr::from(7u64)).into_affine(),
        )
    }

    #[test]
    fn snarkjs_encoding_preserves_points() {
        let proof = sample();
        let enc = proof.to_snarkjs();
        assert!(enc.commitments.is_empty());
        assert!(enc.commitment_pok.is_none());
        assert_eq!(Groth16Proof::from_snarkjs(&enc).unwrap(), proof);
    }

    #[test]
    fn valid_points_pass_subgroup_check() {
        assert_eq!(sample().first_invalid_point(), None);
    }

    #[test]
    fn reports_off_curve_point_by_name() {
        let mut proof = sample();
        proof.krs = G1Affine::new_unchecked(proof.krs.x, proof.krs.y + Fq::from(1u64));
        assert_eq!(proof.first_invalid_point(), Some("Krs"));
    }

    #[test]
    fn reports_bad_commitment() {
        let mut proof = sample();
        let p = proof.ar;
        proof.commitments = vec![G1Affine::new_unchecked(p.x + Fq::from(1u64), p.y)];
        assert_eq!(proof.first_invalid_point(), Some("commitment"));
    }

    #[test]
    fn witness_from_signals() {
        let w = PublicWitness::from_signals(&["1", "2", "3"]).unwrap();
        assert_eq!(w.len(), 3);
        assert_eq!(w.as_slice()[2], Fr::from(3u64));
        assert_eq!(w.to_signals(), vec!["1", "2", "3"]);
    }

    #[test]
    fn witness_rejects_bad_signal() {
        let err = PublicWitness::from_signals(&["1", "x"]).unwrap_err();
        match err {
            CodecError::NotAnInteger { field, .. } => assert_eq!(field, "publicSignals[1]"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
