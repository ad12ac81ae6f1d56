// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use zka_types::CodecError;

/// Why a proof was rejected. The first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("proof point {0} is not on the curve or not in the prime-order subgroup")]
    InvalidProofPoint(&'static str),

    #[error("invalid witness size, got {got}, expected {expected}")]
    WitnessSizeMismatch { got: usize, expected: usize },

    #[error("pairing check failed")]
    PairingCheckFailed,

    #[error("commitment verification failed: {0}")]
    CommitmentVerificationFailed(String),
}

impl VerificationError {
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::InvalidProofPoint(_) => "INVALID_PROOF_POINT",
            VerificationError::WitnessSizeMismatch { .. } => "WITNESS_SIZE_MISMATCH",
            VerificationError::PairingCheckFailed => "PAIRING_CHECK_FAILED",
            VerificationError::CommitmentVerificationFailed(_) => {
                "COMMITMENT_VERIFICATION_FAILED"
            }
        }
    }
}

/// Startup-only failure: without a key nothing can be verified.
#[derive(Debug, thiserror::Error)]
pub enum KeyLoadError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse verifying key: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("verifying key point {0} is not on the curve or not in the prime-order subgroup")]
    InvalidPoint(String),

    #[error("verifying key has an empty K vector")]
    EmptyK,

    #[error("commitment keys: {0}")]
    CommitmentLayout(String),
}

impl KeyLoadError {
    pub fn code(&self) -> &'static str {
        "KEY_LOAD_FAILURE"
    }
}
