// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use zka_ledger::Clock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
#[error("session issuance failed: {0}")]
pub struct SessionError(pub String);

/// Issues a session once a proof has been accepted.
pub trait SessionIssuer: Send + Sync + fmt::Debug {
    fn issue(&self, username: &str) -> Result<Session, SessionError>;
}

/// Opaque 256-bit random bearer tokens, hex encoded.
#[derive(Debug)]
pub struct RandomSessionIssuer {
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl RandomSessionIssuer {
    pub fn new(ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self { ttl, clock }
    }
}

impl SessionIssuer for RandomSessionIssuer {
    fn issue(&self, username: &str) -> Result<Session, SessionError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| SessionError(format!("ttl {} overflows", self.ttl)))?;
        Ok(Session {
            token: hex::encode(rand::random::<[u8; 32]>()),
            username: username.to_string(),
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zka_ledger::ManualClock;

    #[test]
    fn tokens_are_unique_and_expire() {
        let clock = Arc::new(ManualClock::at_unix(1_700_000_000));
        let issuer = RandomSessionIssuer::new(TimeDelta::hours(24), clock);
        let a = issuer.issue("alice").unwrap();
        let b = issuer.issue("alice").unwrap();
        assert_eq!(a.token.len(), 64);
        assert_ne!(a.token, b.token);
        assert_eq!(a.expires_at - a.issued_at, TimeDelta::hours(24));
        assert_eq!(a.issued_at.timestamp(), 1_700_000_000);
    }
}
