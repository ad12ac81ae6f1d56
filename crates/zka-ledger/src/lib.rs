// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! zka-ledger: makes every accepted proof single-use and time-bounded.
//!
//! [`ProofValidator`] runs the cheap structural and timing checks, then
//! atomically reserves the request nonce in the [`ProofStore`]. A nonce stays
//! reserved for the store TTL whether or not the proof later verifies.
//!
//! The ledger lives in memory only and starts empty on every restart.

pub mod clock;
pub mod store;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{ClientContext, ProofRecord, ProofStore};
pub use validator::{ProofValidator, ValidationError, ValidatorConfig};
