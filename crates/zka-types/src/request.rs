// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Inbound proof request as produced by the browser client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the proof is being presented for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofType {
    Login,
    Auth,
}

impl ProofType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofType::Login => "login",
            ProofType::Auth => "auth",
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Groth16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    #[serde(rename = "bn128")]
    Bn128,
}

/// Groth16 proof in snarkjs layout.
///
/// `pi_a` is Ar, `pi_b` is Bs and `pi_c` is Krs. Commitment fields are only
/// present for circuits compiled with Pedersen commitments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnarkProof {
    pub pi_a: [String; 3],
    pub pi_b: [[String; 2]; 3],
    pub pi_c: [String; 3],
    pub protocol: Protocol,
    pub curve: Curve,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commitments: Vec<[String; 3]>,
    #[serde(
        default,
        rename = "commitmentPok",
        skip_serializing_if = "Option::is_none"
    )]
    pub commitment_pok: Option<[String; 3]>,
}

/// A login/auth attempt.
///
/// Every field is optional at the serde level so that a missing field surfaces
/// as a validation error with a useful message rather than an opaque decode
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub proof: Option<SnarkProof>,
    #[serde(default)]
    pub public_signals: Vec<String>,
    #[serde(default)]
    pub nonce: String,
    /// Unix seconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub proof_type: Option<ProofType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}
