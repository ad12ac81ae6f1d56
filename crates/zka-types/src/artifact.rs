// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Verification key artifact as written by the trusted-setup tooling.
//!
//! ```json
//! {
//!   "g1": { "alpha": P1, "beta": P1, "delta": P1, "k": [P1, ...] },
//!   "g2": { "beta": P2, "delta": P2, "gamma": P2 },
//!   "commitmentKeys": [ { "g": P2, "gRootSigmaNeg": P2 } ],
//!   "committedIndexGroups": [[1, 3]]
//! }
//! ```
//!
//! These are plain wire structs; validation lives in `zka-verifier`.

use serde::{Deserialize, Serialize};

use crate::codec::{G1Coords, G2Coords};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyingKeyArtifact {
    pub g1: G1Artifact,
    pub g2: G2Artifact,
    #[serde(default)]
    pub commitment_keys: Vec<PedersenKeyArtifact>,
    /// One group per commitment key: 1-based public input positions the
    /// commitment covers.
    #[serde(default)]
    pub committed_index_groups: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Artifact {
    pub alpha: G1Coords,
    pub beta: G1Coords,
    pub delta: G1Coords,
    /// K\[0\] is the constant term, K\[1..\] pair with public inputs.
    pub k: Vec<G1Coords>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Artifact {
    pub beta: G2Coords,
    pub delta: G2Coords,
    pub gamma: G2Coords,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedersenKeyArtifact {
    pub g: G2Coords,
    pub g_root_sigma_neg: G2Coords,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_sections_default_to_empty() {
        let p1 = serde_json::json!({ "X": "1", "Y": "2" });
        let f2 = serde_json::json!({ "A0": "1", "A1": "0" });
        let p2 = serde_json::json!({ "X": f2, "Y": f2 });
        let doc = serde_json::json!({
            "g1": { "alpha": p1, "beta": p1, "delta": p1, "k": [p1, p1] },
            "g2": { "beta": p2, "delta": p2, "gamma": p2 },
        });
        let artifact: VerifyingKeyArtifact = serde_json::from_value(doc).unwrap();
        assert_eq!(artifact.g1.k.len(), 2);
        assert!(artifact.commitment_keys.is_empty());
        assert!(artifact.committed_index_groups.is_empty());
    }

    #[test]
    fn commitment_key_field_names() {
        let f2 = serde_json::json!({ "A0": "0", "A1": "0" });
        let p2 = serde_json::json!({ "X": f2, "Y": f2 });
        let doc = serde_json::json!({ "g": p2, "gRootSigmaNeg": p2 });
        let key: PedersenKeyArtifact = serde_json::from_value(doc).unwrap();
        assert_eq!(key.g, key.g_root_sigma_neg);
    }
}
