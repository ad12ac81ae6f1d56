// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Security audit trail: a bounded in-memory ring of login decisions.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use zka_ledger::ClientContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    InvalidJson,
    LoginAttempt,
    LoginFailed,
    ProofVerificationFailed,
    LoginSuccess,
    AdminAccessDenied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    pub ip_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nonce: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
}

impl SecurityEvent {
    pub fn new(kind: EventKind, severity: Severity, details: impl Into<String>) -> Self {
        Self {
            kind,
            username: String::new(),
            ip_address: String::new(),
            user_agent: String::new(),
            session_id: None,
            nonce: String::new(),
            details: details.into(),
            timestamp: Utc::now(),
            severity,
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn client(mut self, client: &ClientContext) -> Self {
        self.ip_address = client.ip_address.clone();
        self.user_agent = client.user_agent.clone();
        self
    }

    pub fn nonce(mut self, nonce: &str) -> Self {
        self.nonce = nonce.to_string();
        self
    }

    pub fn session_id(mut self, session_id: Option<&str>) -> Self {
        self.session_id = session_id.map(str::to_string);
        self
    }
}

/// Receives every login decision.
pub trait AuditSink: Send + Sync + fmt::Debug {
    fn record(&self, event: SecurityEvent);

    /// Events at or after `since`, oldest first.
    fn events_since(&self, since: DateTime<Utc>) -> Vec<SecurityEvent>;
}

/// Ring buffer sink. Once full, the oldest event is dropped for each new one.
#[derive(Debug)]
pub struct SecurityMonitor {
    events: RwLock<VecDeque<SecurityEvent>>,
    capacity: usize,
}

impl SecurityMonitor {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for SecurityMonitor {
    fn record(&self, event: SecurityEvent) {
        match event.severity {
            Severity::Info => tracing::info!(
                kind = ?event.kind, user = %event.username, ip = %event.ip_address,
                nonce = %event.nonce, "{}", event.details
            ),
            Severity::Warn => tracing::warn!(
                kind = ?event.kind, user = %event.username, ip = %event.ip_address,
                nonce = %event.nonce, "{}", event.details
            ),
            Severity::Error | Severity::Critical => tracing::error!(
                kind = ?event.kind, user = %event.username, ip = %event.ip_address,
                nonce = %event.nonce, "{}", event.details
            ),
        }

        let mut events = self.events.write();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    fn events_since(&self, since: DateTime<Utc>) -> Vec<SecurityEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.timestamp >= since)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn event(details: &str, at: DateTime<Utc>) -> SecurityEvent {
        let mut e = SecurityEvent::new(EventKind::LoginAttempt, Severity::Info, details);
        e.timestamp = at;
        e
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let monitor = SecurityMonitor::new(2);
        let t = Utc::now();
        monitor.record(event("a", t));
        monitor.record(event("b", t));
        monitor.record(event("c", t));
        let details: Vec<String> = monitor
            .events_since(t - TimeDelta::hours(1))
            .into_iter()
            .map(|e| e.details)
            .collect();
        assert_eq!(details, vec!["b", "c"]);
    }

    #[test]
    fn filters_by_time() {
        let monitor = SecurityMonitor::new(10);
        let t = Utc::now();
        monitor.record(event("old", t - TimeDelta::hours(2)));
        monitor.record(event("new", t));
        let recent = monitor.events_since(t - TimeDelta::hours(1));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].details, "new");
        assert_eq!(monitor.len(), 2);
    }

    #[test]
    fn serializes_like_audit_log() {
        let e = SecurityEvent::new(EventKind::ProofVerificationFailed, Severity::Error, "bad proof")
            .username("alice")
            .client(&ClientContext::new("1.2.3.4", "ua"))
            .nonce("AAAAAAAAAAAAAAAA");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "PROOF_VERIFICATION_FAILED");
        assert_eq!(json["severity"], "ERROR");
        assert_eq!(json["ipAddress"], "1.2.3.4");
        assert!(json.get("sessionId").is_none());
    }
}
