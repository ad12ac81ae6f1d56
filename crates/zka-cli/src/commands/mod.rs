// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

pub mod inspect;
pub mod login;
pub mod verify;

use std::path::Path;

use anyhow::Context;
use zka_types::ProofRequest;

use crate::output;

pub(crate) fn load_request(path: &Path) -> anyhow::Result<ProofRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| {
        output::fail_with_hint(
            &format!("{} is not a login request: {e}", path.display()),
            "expected {username, proof, publicSignals, nonce, timestamp, proofType}",
        )
    })
}
