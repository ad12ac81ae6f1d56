// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::sync::Arc;

use chrono::{DateTime, TimeDelta};
use zka_types::ProofRequest;

use crate::store::{ClientContext, ProofStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("proof has expired")]
    Expired,

    #[error("proof timestamp is too far in the future")]
    ClockSkewOrForged,

    #[error("nonce must be between {min} and {max} characters")]
    MalformedNonce { min: usize, max: usize },

    #[error("proof replay detected - nonce already used")]
    ReplayDetected,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MalformedRequest(_) => "MALFORMED_REQUEST",
            ValidationError::Expired => "PROOF_EXPIRED",
            ValidationError::ClockSkewOrForged => "CLOCK_SKEW_OR_FORGED",
            ValidationError::MalformedNonce { .. } => "MALFORMED_NONCE",
            ValidationError::ReplayDetected => "REPLAY_DETECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Oldest accepted proof timestamp, relative to now.
    pub max_age: TimeDelta,
    /// How far ahead of now a timestamp may be.
    pub future_allowance: TimeDelta,
    pub nonce_min_len: usize,
    pub nonce_max_len: usize,
    /// Public signals the circuit produces.
    pub public_signal_count: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_age: TimeDelta::minutes(5),
            future_allowance: TimeDelta::seconds(30),
            nonce_min_len: 16,
            nonce_max_len: 256,
            public_signal_count: 4,
        }
    }
}

/// Structural, freshness and replay checks for an inbound proof request.
#[derive(Debug, Clone)]
pub struct ProofValidator {
    store: Arc<ProofStore>,
    config: ValidatorConfig,
}

impl ProofValidator {
    pub fn new(store: Arc<ProofStore>, config: ValidatorConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<ProofStore> {
        &self.store
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every check in order; the first failure is returned.
    ///
    /// On success the nonce is consumed for the ledger TTL, before any
    /// cryptographic verification has happened.
    pub fn validate(
        &self,
        request: &ProofRequest,
        client: &ClientContext,
    ) -> Result<(), ValidationError> {
        let result = self.check(request, client);
        match &result {
            Err(ValidationError::ReplayDetected) => tracing::warn!(
                username = %request.username,
                nonce = %request.nonce,
                ip = %client.ip_address,
                "replayed nonce rejected"
            ),
            Err(e) => tracing::debug!(username = %request.username, code = e.code(), "request rejected: {e}"),
            Ok(()) => {}
        }
        result
    }

    fn check(&self, request: &ProofRequest, client: &ClientContext) -> Result<(), ValidationError> {
        let (timestamp, proof_type) = self.check_fields(request)?;
        self.check_timestamp(timestamp)?;
        self.check_nonce(&request.nonce)?;

        if !self
            .store
            .add_proof(&request.nonce, &request.username, proof_type, client)
        {
            return Err(ValidationError::ReplayDetected);
        }
        Ok(())
    }

    fn check_fields(
        &self,
        request: &ProofRequest,
    ) -> Result<(i64, zka_types::ProofType), ValidationError> {
        let missing = |field: &str| ValidationError::MalformedRequest(format!("{field} is required"));

        if request.username.is_empty() {
            return Err(missing("username"));
        }
        if request.nonce.is_empty() {
            return Err(missing("nonce"));
        }
        let timestamp = match request.timestamp {
            Some(ts) if ts != 0 => ts,
            _ => return Err(missing("timestamp")),
        };
        if request.proof.is_none() {
            return Err(missing("proof"));
        }
        let proof_type = request.proof_type.ok_or_else(|| missing("proofType"))?;
        if request.public_signals.len() != self.config.public_signal_count {
            return Err(ValidationError::MalformedRequest(format!(
                "expected {} public signals, got {}",
                self.config.public_signal_count,
                request.public_signals.len()
            )));
        }
        Ok((timestamp, proof_type))
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<(), ValidationError> {
        let proof_time = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
            ValidationError::MalformedRequest(format!("timestamp {timestamp} out of range"))
        })?;
        let now = self.store.clock().now();

        // An allowance past the calendar range admits every future timestamp.
        let latest = now.checked_add_signed(self.config.future_allowance);
        if latest.is_some_and(|latest| proof_time > latest) {
            return Err(ValidationError::ClockSkewOrForged);
        }
        if now - proof_time > self.config.max_age {
            return Err(ValidationError::Expired);
        }
        Ok(())
    }

    fn check_nonce(&self, nonce: &str) -> Result<(), ValidationError> {
        let (min, max) = (self.config.nonce_min_len, self.config.nonce_max_len);
        if nonce.len() < min || nonce.len() > max {
            return Err(ValidationError::MalformedNonce { min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use zka_types::{Curve, ProofType, Protocol, SnarkProof};

    const NOW: i64 = 1_700_000_000;
    const NONCE: &str = "AAAAAAAAAAAAAAAA";

    fn validator() -> ProofValidator {
        let clock = Arc::new(ManualClock::at_unix(NOW));
        let store = Arc::new(ProofStore::with_clock(TimeDelta::minutes(5), clock));
        ProofValidator::new(store, ValidatorConfig::default())
    }

    fn dummy_proof() -> SnarkProof {
        SnarkProof {
            pi_a: ["1".into(), "2".into(), "1".into()],
            pi_b: [
                ["1".into(), "2".into()],
                ["3".into(), "4".into()],
                ["1".into(), "0".into()],
            ],
            pi_c: ["1".into(), "2".into(), "1".into()],
            protocol: Protocol::Groth16,
            curve: Curve::Bn128,
            commitments: vec![],
            commitment_pok: None,
        }
    }

    fn request(nonce: &str, timestamp: i64) -> ProofRequest {
        ProofRequest {
            username: "alice".into(),
            proof: Some(dummy_proof()),
            public_signals: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            nonce: nonce.into(),
            timestamp: Some(timestamp),
            proof_type: Some(ProofType::Login),
            session_id: None,
        }
    }

    fn ctx() -> ClientContext {
        ClientContext::new("127.0.0.1", "unit-test")
    }

    #[test]
    fn accepts_fresh_request_once() {
        let v = validator();
        v.validate(&request(NONCE, NOW), &ctx()).unwrap();
        assert_eq!(
            v.validate(&request(NONCE, NOW), &ctx()),
            Err(ValidationError::ReplayDetected)
        );
    }

    #[test]
    fn missing_fields_are_malformed() {
        let v = validator();
        let cases: Vec<(&str, Box<dyn Fn(&mut ProofRequest)>)> = vec![
            ("username", Box::new(|r: &mut ProofRequest| r.username.clear())),
            ("nonce", Box::new(|r: &mut ProofRequest| r.nonce.clear())),
            ("timestamp", Box::new(|r: &mut ProofRequest| r.timestamp = None)),
            ("timestamp", Box::new(|r: &mut ProofRequest| r.timestamp = Some(0))),
            ("proof", Box::new(|r: &mut ProofRequest| r.proof = None)),
            ("proofType", Box::new(|r: &mut ProofRequest| r.proof_type = None)),
        ];
        for (field, mutate) in cases {
            let mut req = request(NONCE, NOW);
            mutate(&mut req);
            match v.validate(&req, &ctx()) {
                Err(ValidationError::MalformedRequest(msg)) => assert!(msg.contains(field), "{msg}"),
                other => panic!("{field}: expected MalformedRequest, got {other:?}"),
            }
        }
        assert!(v.store().is_empty());
    }

    #[test]
    fn wrong_signal_count_is_malformed() {
        let v = validator();
        let mut req = request(NONCE, NOW);
        req.public_signals.pop();
        let err = v.validate(&req, &ctx()).unwrap_err();
        assert_eq!(err.code(), "MALFORMED_REQUEST");
    }

    #[test]
    fn future_allowance_boundary() {
        let v = validator();
        v.validate(&request("future-boundary-0001", NOW + 30), &ctx())
            .unwrap();
        assert_eq!(
            v.validate(&request("future-boundary-0002", NOW + 31), &ctx()),
            Err(ValidationError::ClockSkewOrForged)
        );
    }

    #[test]
    fn max_age_boundary() {
        let v = validator();
        v.validate(&request("max-age-boundary-01", NOW - 300), &ctx())
            .unwrap();
        assert_eq!(
            v.validate(&request("max-age-boundary-02", NOW - 301), &ctx()),
            Err(ValidationError::Expired)
        );
    }

    #[test]
    fn huge_future_allowance_does_not_overflow() {
        let clock = Arc::new(ManualClock::at_unix(NOW));
        let store = Arc::new(ProofStore::with_clock(TimeDelta::minutes(5), clock));
        let config = ValidatorConfig {
            future_allowance: TimeDelta::MAX,
            ..ValidatorConfig::default()
        };
        let v = ProofValidator::new(store, config);
        v.validate(&request(NONCE, NOW + 86_400), &ctx()).unwrap();
        assert_eq!(
            v.validate(&request("max-age-still-applies", NOW - 301), &ctx()),
            Err(ValidationError::Expired)
        );
    }

    #[test]
    fn nonce_length_bounds() {
        let v = validator();
        let short = "A".repeat(15);
        let long = "A".repeat(257);
        assert!(matches!(
            v.validate(&request(&short, NOW), &ctx()),
            Err(ValidationError::MalformedNonce { min: 16, max: 256 })
        ));
        assert!(matches!(
            v.validate(&request(&long, NOW), &ctx()),
            Err(ValidationError::MalformedNonce { .. })
        ));
        v.validate(&request(&"A".repeat(256), NOW), &ctx()).unwrap();
    }

    #[test]
    fn rejected_requests_do_not_consume_nonce() {
        let v = validator();
        let err = v.validate(&request(NONCE, NOW - 1_000), &ctx()).unwrap_err();
        assert_eq!(err, ValidationError::Expired);
        assert!(!v.store().has_proof(NONCE));
        v.validate(&request(NONCE, NOW), &ctx()).unwrap();
    }

    #[test]
    fn timing_checked_before_nonce() {
        let v = validator();
        assert_eq!(
            v.validate(&request("short", NOW + 3_600), &ctx()),
            Err(ValidationError::ClockSkewOrForged)
        );
    }
}
