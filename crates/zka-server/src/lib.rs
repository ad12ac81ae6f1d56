// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! zka-server: HTTP front for zero-knowledge password login.

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod session;

use std::sync::Arc;

use anyhow::bail;
use tokio::task::JoinHandle;
use zka_ledger::{ProofStore, ProofValidator};
use zka_verifier::{Groth16Verifier, ProofVerifier, VerifyingKeyStore};

use api::AppState;
use audit::SecurityMonitor;
use auth::Authenticator;
use config::ServerConfig;
use session::RandomSessionIssuer;

/// Wire the login stack for a loaded key.
///
/// Fails if the configured public signal count disagrees with the key.
pub fn build_state(
    config: &ServerConfig,
    keys: VerifyingKeyStore,
) -> anyhow::Result<(AppState, Arc<ProofStore>)> {
    let verifier: Arc<dyn ProofVerifier> = Arc::new(Groth16Verifier::new(keys));
    build_state_with(config, verifier, Arc::new(ProofStore::new(config.proof_ttl)))
}

pub fn build_state_with(
    config: &ServerConfig,
    verifier: Arc<dyn ProofVerifier>,
    store: Arc<ProofStore>,
) -> anyhow::Result<(AppState, Arc<ProofStore>)> {
    let arity = verifier.num_public_inputs();
    if arity != config.validator.public_signal_count {
        bail!(
            "verifying key expects {arity} public inputs but ZKA_PUBLIC_SIGNALS is {}",
            config.validator.public_signal_count
        );
    }

    let audit = Arc::new(SecurityMonitor::new(config.audit_capacity));
    let sessions = Arc::new(RandomSessionIssuer::new(
        config.session_ttl,
        Arc::clone(store.clock()),
    ));
    let validator = ProofValidator::new(Arc::clone(&store), config.validator.clone());
    let auth = Authenticator::new(validator, verifier, sessions, audit.clone());

    let state = AppState {
        auth: Arc::new(auth),
        audit,
        admin_token: config.admin_token.as_deref().map(Arc::from),
        trust_proxy_headers: config.trust_proxy_headers,
    };
    Ok((state, store))
}

/// Sweep expired nonces every `interval` until the runtime shuts down.
pub fn spawn_cleanup(store: Arc<ProofStore>, interval: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = store.cleanup();
            if removed > 0 {
                tracing::debug!(removed, live = store.len(), "nonce ledger swept");
            }
        }
    })
}
