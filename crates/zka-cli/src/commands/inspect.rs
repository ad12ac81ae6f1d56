// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::Path;

use anyhow::Result;
use zka_verifier::VerifyingKeyStore;

use crate::output;

#[derive(Debug)]
pub struct KeySummary {
    pub key_id: String,
    pub public_inputs: usize,
    pub commitment_keys: usize,
    pub committed_index_groups: Vec<Vec<usize>>,
}

pub fn summarize(path: &Path) -> Result<KeySummary> {
    let store = VerifyingKeyStore::load(path).map_err(|e| {
        output::fail_with_hint(
            &format!("{}: {e}", e.code()),
            "the artifact must come from the trusted setup for this circuit",
        )
    })?;
    let key = store.key();
    Ok(KeySummary {
        key_id: store.key_id().to_string(),
        public_inputs: key.num_public_inputs(),
        commitment_keys: key.commitment_keys().len(),
        committed_index_groups: key.committed_index_groups().to_vec(),
    })
}

pub fn run(path: &Path) -> Result<()> {
    let summary = summarize(path)?;

    let groups = (!summary.committed_index_groups.is_empty())
        .then(|| serde_json::json!(summary.committed_index_groups));
    output::Report::accepted("verifying key valid")
        .field("key_id", summary.key_id.as_str())
        .field("public_inputs", summary.public_inputs)
        .field("commitment_keys", summary.commitment_keys)
        .field("committed_index_groups", groups)
        .emit();
    Ok(())
}
