// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::TimeDelta;
use zka_ledger::{ClientContext, ManualClock, ProofStore, ProofValidator, ValidationError, ValidatorConfig};
use zka_types::{Curve, ProofRequest, ProofType, Protocol, SnarkProof};

const THREADS: usize = 32;
const NOW: i64 = 1_700_000_000;

fn request(nonce: &str) -> ProofRequest {
    ProofRequest {
        username: "alice".into(),
        proof: Some(SnarkProof {
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
        }),
        public_signals: vec!["1".into(); 4],
        nonce: nonce.into(),
        timestamp: Some(NOW),
        proof_type: Some(ProofType::Login),
        session_id: None,
    }
}

#[test]
fn concurrent_adds_admit_exactly_one() {
    let store = ProofStore::new(TimeDelta::minutes(5));
    let barrier = Barrier::new(THREADS);
    let accepted = AtomicUsize::new(0);

    thread::scope(|s| {
        for i in 0..THREADS {
            let (store, barrier, accepted) = (&store, &barrier, &accepted);
            s.spawn(move || {
                let ctx = ClientContext::new(format!("10.0.0.{i}"), "racer");
                barrier.wait();
                if store.add_proof("shared-nonce-0001", "alice", ProofType::Login, &ctx) {
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(accepted.load(Ordering::SeqCst), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn concurrent_distinct_nonces_all_admitted() {
    let store = ProofStore::new(TimeDelta::minutes(5));
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        for i in 0..THREADS {
            let (store, barrier) = (&store, &barrier);
            s.spawn(move || {
                barrier.wait();
                assert!(store.add_proof(
                    &format!("distinct-nonce-{i:04}"),
                    "alice",
                    ProofType::Login,
                    &ClientContext::default(),
                ));
            });
        }
    });

    assert_eq!(store.len(), THREADS);
}

#[test]
fn concurrent_validation_reports_replays() {
    let clock = Arc::new(ManualClock::at_unix(NOW));
    let store = Arc::new(ProofStore::with_clock(TimeDelta::minutes(5), clock));
    let validator = ProofValidator::new(store, ValidatorConfig::default());
    let barrier = Barrier::new(THREADS);
    let req = request("AAAAAAAAAAAAAAAA");

    let results: Vec<Result<(), ValidationError>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let (validator, barrier, req) = (&validator, &barrier, &req);
                s.spawn(move || {
                    barrier.wait();
                    validator.validate(req, &ClientContext::default())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == ValidationError::ReplayDetected));
}

#[test]
fn nonce_reusable_after_ttl() {
    let clock = Arc::new(ManualClock::at_unix(NOW));
    let store = Arc::new(ProofStore::with_clock(TimeDelta::minutes(5), clock.clone()));
    let config = ValidatorConfig {
        max_age: TimeDelta::hours(1),
        ..ValidatorConfig::default()
    };
    let validator = ProofValidator::new(store, config);
    let req = request("AAAAAAAAAAAAAAAA");

    validator.validate(&req, &ClientContext::default()).unwrap();
    clock.advance(TimeDelta::minutes(5));
    assert_eq!(
        validator.validate(&req, &ClientContext::default()),
        Err(ValidationError::ReplayDetected)
    );
    clock.advance(TimeDelta::seconds(1));
    validator.validate(&req, &ClientContext::default()).unwrap();
}
