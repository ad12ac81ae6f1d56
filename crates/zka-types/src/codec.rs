// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Decimal big-integer codec for BN254 (bn128) field elements and points.
//!
//! Both the trusted-setup artifact and snarkjs proofs carry every coordinate
//! as a base-10 string. Parsing is lossless: a value at or above the field
//! modulus is rejected rather than silently reduced, and so is anything with
//! a sign, whitespace or leading zeroes.
//!
//! Points come out of this module *unchecked*: on-curve and subgroup
//! membership are the caller's job (key loader / verifier).

use std::str::FromStr;

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ff::{PrimeField, Zero};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("{field}: not a base-10 integer: {value:?}")]
    NotAnInteger { field: String, value: String },

    #[error("{field}: value is not below the field modulus")]
    NonCanonical { field: String },

    #[error("{field}: unsupported projective z coordinate {z:?}")]
    UnsupportedProjective { field: String, z: String },
}

/// Parse a canonical decimal string into a prime field element.
pub fn parse_decimal<F: PrimeField + FromStr>(field: &str, value: &str) -> Result<F, CodecError> {
    let not_an_integer = || CodecError::NotAnInteger {
        field: field.to_string(),
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_an_integer());
    }
    let element = F::from_str(value).map_err(|_| not_an_integer())?;
    // from_str reduces mod p; a round trip that changes the digits means the
    // input was out of range.
    if to_decimal(&element) != value {
        return Err(CodecError::NonCanonical {
            field: field.to_string(),
        });
    }
    Ok(element)
}

/// Canonical base-10 rendering of a prime field element.
pub fn to_decimal<F: PrimeField>(element: &F) -> String {
    element.into_bigint().to_string()
}

// ── Artifact encoding (gnark-style affine coordinates) ──────────────────

/// G1 point as `{"X": dec, "Y": dec}`. `(0, 0)` is the point at infinity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Coords {
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "Y")]
    pub y: String,
}

/// Element of Fq2 as `{"A0": dec, "A1": dec}` meaning `A0 + A1·u`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fq2Coords {
    #[serde(rename = "A0")]
    pub a0: String,
    #[serde(rename = "A1")]
    pub a1: String,
}

/// G2 point as `{"X": Fq2, "Y": Fq2}`. All-zero coordinates encode infinity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Coords {
    #[serde(rename = "X")]
    pub x: Fq2Coords,
    #[serde(rename = "Y")]
    pub y: Fq2Coords,
}

impl G1Coords {
    pub fn from_affine(point: &G1Affine) -> Self {
        if point.infinity {
            return Self {
                x: "0".into(),
                y: "0".into(),
            };
        }
        Self {
            x: to_decimal(&point.x),
            y: to_decimal(&point.y),
        }
    }

    pub fn to_affine_unchecked(&self, field: &str) -> Result<G1Affine, CodecError> {
        let x: Fq = parse_decimal(&format!("{field}.X"), &self.x)?;
        let y: Fq = parse_decimal(&format!("{field}.Y"), &self.y)?;
        Ok(g1_unchecked(x, y))
    }
}

impl Fq2Coords {
    pub fn from_fq2(value: &Fq2) -> Self {
        Self {
            a0: to_decimal(&value.c0),
            a1: to_decimal(&value.c1),
        }
    }

    pub fn to_fq2(&self, field: &str) -> Result<Fq2, CodecError> {
        let c0: Fq = parse_decimal(&format!("{field}.A0"), &self.a0)?;
        let c1: Fq = parse_decimal(&format!("{field}.A1"), &self.a1)?;
        Ok(Fq2::new(c0, c1))
    }
}

impl G2Coords {
    pub fn from_affine(point: &G2Affine) -> Self {
        if point.infinity {
            let zero = Fq2Coords::from_fq2(&Fq2::zero());
            return Self {
                x: zero.clone(),
                y: zero,
            };
        }
        Self {
            x: Fq2Coords::from_fq2(&point.x),
            y: Fq2Coords::from_fq2(&point.y),
        }
    }

    pub fn to_affine_unchecked(&self, field: &str) -> Result<G2Affine, CodecError> {
        let x = self.x.to_fq2(&format!("{field}.X"))?;
        let y = self.y.to_fq2(&format!("{field}.Y"))?;
        Ok(g2_unchecked(x, y))
    }
}

fn g1_unchecked(x: Fq, y: Fq) -> G1Affine {
    if x.is_zero() && y.is_zero() {
        G1Affine::identity()
    } else {
        G1Affine::new_unchecked(x, y)
    }
}

fn g2_unchecked(x: Fq2, y: Fq2) -> G2Affine {
    if x.is_zero() && y.is_zero() {
        G2Affine::identity()
    } else {
        G2Affine::new_unchecked(x, y)
    }
}

// ── snarkjs encoding (projective triples) ──────────────────────────────

/// Decode a snarkjs G1 triple `[x, y, z]`; `z` must be `1` (affine) or `0`
/// (infinity).
pub fn g1_from_snarkjs(field: &str, coords: &[String; 3]) -> Result<G1Affine, CodecError> {
    match coords[2].as_str() {
        "1" => {
            let x: Fq = parse_decimal(&format!("{field}[0]"), &coords[0])?;
            let y: Fq = parse_decimal(&format!("{field}[1]"), &coords[1])?;
            Ok(g1_unchecked(x, y))
        }
        "0" => Ok(G1Affine::identity()),
        other => Err(CodecError::UnsupportedProjective {
            field: field.to_string(),
            z: other.to_string(),
        }),
    }
}

/// Decode a snarkjs G2 triple `[[x0, x1], [y0, y1], [z0, z1]]`.
pub fn g2_from_snarkjs(field: &str, coords: &[[String; 2]; 3]) -> Result<G2Affine, CodecError> {
    let z = &coords[2];
    match (z[0].as_str(), z[1].as_str()) {
        ("1", "0") => {
            let x = fq2_from_pair(&format!("{field}[0]"), &coords[0])?;
            let y = fq2_from_pair(&format!("{field}[1]"), &coords[1])?;
            Ok(g2_unchecked(x, y))
        }
        ("0", "0") => Ok(G2Affine::identity()),
        _ => Err(CodecError::UnsupportedProjective {
            field: field.to_string(),
            z: format!("[{}, {}]", z[0], z[1]),
        }),
    }
}

fn fq2_from_pair(field: &str, pair: &[String; 2]) -> Result<Fq2, CodecError> {
    let c0: Fq = parse_decimal(&format!("{field}[0]"), &pair[0])?;
    let c1: Fq = parse_decimal(&format!("{field}[1]"), &pair[1])?;
    Ok(Fq2::new(c0, c1))
}

pub fn g1_to_snarkjs(point: &G1Affine) -> [String; 3] {
    if point.infinity {
        return ["0".into(), "1".into(), "0".into()];
    }
    [to_decimal(&point.x), to_decimal(&point.y), "1".into()]
}

pub fn g2_to_snarkjs(point: &G2Affine) -> [[String; 2]; 3] {
    if point.infinity {
        return [
            ["0".into(), "0".into()],
            ["1".into(), "0".into()],
            ["0".into(), "0".into()],
        ];
    }
    [
        [to_decimal(&point.x.c0), to_decimal(&point.x.c1)],
        [to_decimal(&point.y.c0), to_decimal(&point.y.c1)],
        ["1".into(), "0".into()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_ff::UniformRand;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    // r - 1 and r for the BN254 scalar field
    const FR_MAX: &str =
        "21888242871839275222246405745257275088548364400416034343698204186575808495616";
    const FR_MODULUS: &str =
        "21888242871839275222246405745257275088548364400416034343698204186575808495617";

    #[test]
    fn parses_largest_scalar() {
        let x: Fr = parse_decimal("s", FR_MAX).unwrap();
        assert_eq!(x, -Fr::from(1u64));
        assert_eq!(to_decimal(&x), FR_MAX);
    }

    #[test]
    fn rejects_modulus() {
        let err = parse_decimal::<Fr>("s", FR_MODULUS).unwrap_err();
        assert!(matches!(err, CodecError::NonCanonical { .. }));
    }

    #[test]
    fn rejects_non_digits() {
        for bad in ["", "-1", "+1", " 1", "0x10", "1e3", "12a"] {
            let err = parse_decimal::<Fr>("s", bad).unwrap_err();
            assert!(matches!(err, CodecError::NotAnInteger { .. }), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_leading_zeroes() {
        assert!(parse_decimal::<Fr>("s", "007").is_err());
        assert_eq!(parse_decimal::<Fr>("s", "0").unwrap(), Fr::from(0u64));
    }

    #[test]
    fn g1_coords_preserve_point() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = (G1Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let coords = G1Coords::from_affine(&p);
        assert_eq!(coords.to_affine_unchecked("p").unwrap(), p);
    }

    #[test]
    fn g2_coords_preserve_point() {
        let mut rng = StdRng::seed_from_u64(8);
        let p = (G2Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let coords = G2Coords::from_affine(&p);
        assert_eq!(coords.to_affine_unchecked("p").unwrap(), p);
    }

    #[test]
    fn zero_coords_are_infinity() {
        let coords = G1Coords {
            x: "0".into(),
            y: "0".into(),
        };
        assert!(coords.to_affine_unchecked("p").unwrap().infinity);
        assert_eq!(G1Coords::from_affine(&G1Affine::identity()), coords);
    }

    #[test]
    fn snarkjs_rejects_unnormalized_z() {
        let coords = ["1".to_string(), "2".to_string(), "5".to_string()];
        let err = g1_from_snarkjs("pi_a", &coords).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedProjective { .. }));
    }

    #[test]
    fn snarkjs_g2_layout_is_c0_first() {
        let mut rng = StdRng::seed_from_u64(9);
        let p = (G2Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let enc = g2_to_snarkjs(&p);
        assert_eq!(enc[0][0], to_decimal(&p.x.c0));
        assert_eq!(enc[0][1], to_decimal(&p.x.c1));
        assert_eq!(g2_from_snarkjs("pi_b", &enc).unwrap(), p);
    }

    #[test]
    fn snarkjs_infinity() {
        let enc = g1_to_snarkjs(&G1Affine::identity());
        assert!(g1_from_snarkjs("pi_a", &enc).unwrap().infinity);
    }
}
