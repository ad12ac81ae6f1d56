// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Login orchestration: validate, reserve the nonce, verify, issue a session.

use std::sync::Arc;

use zka_ledger::{ClientContext, ProofValidator, ValidationError};
use zka_types::{CodecError, ProofRequest, ProofType};
use zka_verifier::{Groth16Proof, ProofVerifier, PublicWitness, VerificationError};

use crate::audit::{AuditSink, EventKind, SecurityEvent, Severity};
use crate::session::{Session, SessionError, SessionIssuer};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed proof: {0}")]
    Decode(#[from] CodecError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(e) => e.code(),
            AuthError::Decode(_) => "MALFORMED_REQUEST",
            AuthError::Verification(e) => e.code(),
            AuthError::Session(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The request itself is unusable, independent of who sent it.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            AuthError::Validation(ValidationError::MalformedRequest(_))
                | AuthError::Validation(ValidationError::MalformedNonce { .. })
                | AuthError::Decode(_)
        )
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AuthError::Session(_) | AuthError::Internal(_))
    }
}

pub struct Authenticator {
    validator: ProofValidator,
    verifier: Arc<dyn ProofVerifier>,
    sessions: Arc<dyn SessionIssuer>,
    audit: Arc<dyn AuditSink>,
}

impl Authenticator {
    pub fn new(
        validator: ProofValidator,
        verifier: Arc<dyn ProofVerifier>,
        sessions: Arc<dyn SessionIssuer>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            validator,
            verifier,
            sessions,
            audit,
        }
    }

    pub fn validator(&self) -> &ProofValidator {
        &self.validator
    }

    pub fn verifier(&self) -> &Arc<dyn ProofVerifier> {
        &self.verifier
    }

    /// Run one login attempt end to end. Every outcome is audited.
    ///
    /// Once validation passes the nonce stays consumed, even if decoding or
    /// verification fails afterwards.
    pub async fn login(
        &self,
        mut request: ProofRequest,
        client: ClientContext,
    ) -> Result<Session, AuthError> {
        request.proof_type.get_or_insert(ProofType::Login);

        let event = |kind, severity, details: String| {
            SecurityEvent::new(kind, severity, details)
                .username(&request.username)
                .client(&client)
                .nonce(&request.nonce)
                .session_id(request.session_id.as_deref())
        };

        self.audit.record(event(
            EventKind::LoginAttempt,
            Severity::Info,
            "login attempt initiated".into(),
        ));

        if let Err(e) = self.validator.validate(&request, &client) {
            self.audit.record(event(
                EventKind::LoginFailed,
                Severity::Warn,
                format!("proof validation failed: {e}"),
            ));
            return Err(e.into());
        }

        let decoded = decode(&request);
        let (proof, witness) = match decoded {
            Ok(parts) => parts,
            Err(e) => {
                self.audit.record(event(
                    EventKind::LoginFailed,
                    Severity::Warn,
                    format!("proof decoding failed: {e}"),
                ));
                return Err(e);
            }
        };

        let verifier = Arc::clone(&self.verifier);
        let verdict = tokio::task::spawn_blocking(move || verifier.verify(&proof, &witness))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))?;
        if let Err(e) = verdict {
            self.audit.record(event(
                EventKind::ProofVerificationFailed,
                Severity::Error,
                format!("zk proof verification failed: {e}"),
            ));
            return Err(e.into());
        }

        let session = self.sessions.issue(&request.username)?;
        self.audit.record(event(
            EventKind::LoginSuccess,
            Severity::Info,
            "user authenticated with zk proof".into(),
        ));
        Ok(session)
    }
}

fn decode(request: &ProofRequest) -> Result<(Groth16Proof, PublicWitness), AuthError> {
    let proof = request
        .proof
        .as_ref()
        .ok_or_else(|| ValidationError::MalformedRequest("proof is required".into()))?;
    Ok((
        Groth16Proof::from_snarkjs(proof)?,
        PublicWitness::from_signals(&request.public_signals)?,
    ))
}
