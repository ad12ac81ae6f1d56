// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::Path;

use anyhow::Result;
use zka_types::ProofRequest;
use zka_verifier::{verify, Groth16Proof, PublicWitness, VerifyingKey, VerifyingKeyStore};

use crate::output;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Rejected { code: &'static str, error: String },
}

/// Decode and pairing-check one request. Freshness and nonce rules are the
/// server's business and are not applied here.
pub fn check(key: &VerifyingKey, request: &ProofRequest) -> Outcome {
    let Some(snark) = request.proof.as_ref() else {
        return Outcome::Rejected {
            code: "MALFORMED_REQUEST",
            error: "proof is required".into(),
        };
    };
    let decoded = Groth16Proof::from_snarkjs(snark).and_then(|proof| {
        PublicWitness::from_signals(&request.public_signals).map(|witness| (proof, witness))
    });
    let (proof, witness) = match decoded {
        Ok(parts) => parts,
        Err(e) => {
            return Outcome::Rejected {
                code: "MALFORMED_REQUEST",
                error: e.to_string(),
            }
        }
    };
    match verify(&proof, key, &witness) {
        Ok(()) => Outcome::Valid,
        Err(e) => Outcome::Rejected {
            code: e.code(),
            error: e.to_string(),
        },
    }
}

pub fn run(vk_path: &Path, request_path: &Path) -> Result<()> {
    let store = VerifyingKeyStore::load(vk_path).map_err(|e| {
        output::fail_with_hint(
            &format!("{}: {e}", e.code()),
            "run `zka inspect <vk>` to check the artifact",
        )
    })?;
    let request = super::load_request(request_path)?;

    match check(store.key(), &request) {
        Outcome::Valid => {
            output::Report::accepted("proof valid")
                .field("username", request.username.as_str())
                .field("key_id", store.key_id())
                .emit();
            Ok(())
        }
        Outcome::Rejected { code, error } => {
            output::Report::rejected("proof rejected")
                .field("code", code)
                .field("error", error.as_str())
                .emit();
            Err(anyhow::anyhow!("{code}: {error}"))
        }
    }
}
