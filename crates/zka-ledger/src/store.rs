// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Nonce-indexed replay ledger with TTL expiry.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use zka_types::ProofType;

use crate::clock::{Clock, SystemClock};

/// Where a request came from, for audit only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContext {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientContext {
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// One consumed nonce. Immutable once admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    pub nonce: String,
    pub username: String,
    pub proof_type: ProofType,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Ledger {
    records: HashMap<String, ProofRecord>,
    // oldest creation time on top
    expiry: BinaryHeap<Reverse<(DateTime<Utc>, String)>>,
}

impl Ledger {
    /// Drop every record whose age is strictly greater than `ttl`.
    fn sweep(&mut self, now: DateTime<Utc>, ttl: TimeDelta) -> usize {
        let mut removed = 0;
        while let Some(Reverse((created_at, _))) = self.expiry.peek() {
            if now - *created_at <= ttl {
                break;
            }
            let Some(Reverse((created_at, nonce))) = self.expiry.pop() else {
                break;
            };
            if self
                .records
                .get(&nonce)
                .is_some_and(|r| r.created_at == created_at)
            {
                self.records.remove(&nonce);
                removed += 1;
            }
        }
        removed
    }
}

pub struct ProofStore {
    ledger: RwLock<Ledger>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl ProofStore {
    pub fn new(ttl: TimeDelta) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: RwLock::new(Ledger::default()),
            ttl,
            clock,
        }
    }

    /// Reserve `nonce`. Returns `false` if it is already live (replay).
    ///
    /// Expiry, lookup and insert happen under one write lock, so concurrent
    /// callers racing on the same nonce see exactly one `true`.
    pub fn add_proof(
        &self,
        nonce: &str,
        username: &str,
        proof_type: ProofType,
        client: &ClientContext,
    ) -> bool {
        let now = self.clock.now();
        let mut ledger = self.ledger.write();
        let swept = ledger.sweep(now, self.ttl);
        if swept > 0 {
            tracing::debug!(swept, "expired nonces removed");
        }

        if ledger.records.contains_key(nonce) {
            return false;
        }
        ledger.records.insert(
            nonce.to_string(),
            ProofRecord {
                nonce: nonce.to_string(),
                username: username.to_string(),
                proof_type,
                ip_address: client.ip_address.clone(),
                user_agent: client.user_agent.clone(),
                created_at: now,
            },
        );
        ledger.expiry.push(Reverse((now, nonce.to_string())));
        true
    }

    /// Whether `nonce` is currently on the ledger. Advisory only: replay
    /// decisions go through [`ProofStore::add_proof`].
    pub fn has_proof(&self, nonce: &str) -> bool {
        self.ledger.read().records.contains_key(nonce)
    }

    pub fn proof_metadata(&self, nonce: &str) -> Option<ProofRecord> {
        self.ledger.read().records.get(nonce).cloned()
    }

    /// Live records for `username`, oldest first.
    pub fn proofs_by_username(&self, username: &str) -> Vec<ProofRecord> {
        let mut records: Vec<ProofRecord> = self
            .ledger
            .read()
            .records
            .values()
            .filter(|r| r.username == username)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        records
    }

    /// Remove expired records now. Returns how many were dropped.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now();
        self.ledger.write().sweep(now, self.ttl)
    }

    pub fn len(&self) -> usize {
        self.ledger.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl std::fmt::Debug for ProofStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofStore")
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish()
    }
}
