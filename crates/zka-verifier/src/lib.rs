// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! zka-verifier: Groth16 verification over BN254.
//!
//! Checks `e(Ar, Bs) · e(Krs, −δ) · e(K_sum, −γ) == e(α, β)` where
//! `K_sum = K[0] + Σ wᵢ·K[i+1] + Σ commitments`, plus the Pedersen
//! proof-of-knowledge for circuits that carry commitments.
//!
//! Verification is a pure, synchronous function of `(proof, key, witness)`.
//! It does no I/O and no logging, so it can run on any worker thread against
//! a shared key.

mod error;
mod key;
mod pedersen;
mod proof;
mod verifier;

pub use error::{KeyLoadError, VerificationError};
pub use key::{G1Key, G2Key, VerifyingKey, VerifyingKeyStore};
pub use pedersen::{commitment_challenge, verify_knowledge, PedersenVerifyingKey};
pub use proof::{Groth16Proof, PublicWitness};
pub use verifier::{verify, Groth16Verifier, ProofVerifier};
