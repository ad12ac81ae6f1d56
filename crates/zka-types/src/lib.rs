// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Shared wire types for zkauth.
//!
//! `request` holds the inbound proof request as clients send it (snarkjs
//! layout), `artifact` the verification key document produced by the
//! trusted setup. `codec` turns the decimal coordinates inside both into
//! BN254 field elements and points.

pub mod artifact;
pub mod codec;
pub mod request;

pub use artifact::{G1Artifact, G2Artifact, PedersenKeyArtifact, VerifyingKeyArtifact};
pub use codec::{CodecError, Fq2Coords, G1Coords, G2Coords};
pub use request::{Curve, ProofRequest, ProofType, Protocol, SnarkProof};
