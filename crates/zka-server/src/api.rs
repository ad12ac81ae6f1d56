// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Query, State},
    http::{header, Extensions, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::json;
use subtle::ConstantTimeEq;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use zka_ledger::ClientContext;
use zka_types::ProofRequest;

use crate::audit::{AuditSink, EventKind, SecurityEvent, Severity};
use crate::auth::{AuthError, Authenticator};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
    pub audit: Arc<dyn AuditSink>,
    pub admin_token: Option<Arc<str>>,
    pub trust_proxy_headers: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/login", post(login))
        .route("/v1/security/events", get(security_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `{"error", "code"}` with a status.
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.message, "code": self.code })),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = if err.is_internal() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else if err.is_malformed() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::UNAUTHORIZED
        };
        if err.is_internal() {
            tracing::error!(error = %err, "login failed internally");
            // details stay in the log
            return Self::new(status, err.code(), "internal error");
        }
        Self::new(status, err.code(), err.to_string())
    }
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "keyId": state.auth.verifier().key_id(),
        "services": {
            "authentication": "operational",
            "proof_verification": "operational",
            "security_monitoring": "operational",
        },
    }))
}

async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let client = client_context(&headers, &extensions, state.trust_proxy_headers);
    let request: ProofRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            state.audit.record(
                SecurityEvent::new(
                    EventKind::InvalidJson,
                    Severity::Warn,
                    format!("invalid JSON in login: {e}"),
                )
                .client(&client),
            );
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "MALFORMED_REQUEST",
                "invalid JSON format",
            ));
        }
    };

    let session = state.auth.login(request, client).await?;
    Ok(Json(json!({
        "token": session.token,
        "user": session.username,
        "expiresAt": session.expires_at,
    })))
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    since: Option<String>,
}

async fn security_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err(ApiError::new(
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "admin endpoint disabled",
        ));
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if !presented.is_some_and(|t| tokens_match(t, expected)) {
        state.audit.record(
            SecurityEvent::new(
                EventKind::AdminAccessDenied,
                Severity::Warn,
                "security events requested without a valid admin token",
            )
            .client(&client_context(
                &headers,
                &extensions,
                state.trust_proxy_headers,
            )),
        );
        return Err(ApiError::new(
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "access denied",
        ));
    }

    let since = query
        .since
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| Utc::now() - TimeDelta::hours(1));
    let events = state.audit.events_since(since);
    Ok(Json(json!({
        "events": events,
        "count": events.len(),
        "since": since,
    })))
}

/// Client address and user agent for the audit trail.
///
/// With `trust_proxy` the first forwarded hop wins, then `x-real-ip`. Those
/// headers are client-controlled unless a reverse proxy overwrites them, so
/// without it only the socket peer is used.
fn client_context(
    headers: &HeaderMap,
    extensions: &Extensions,
    trust_proxy: bool,
) -> ClientContext {
    let header_str = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let forwarded = trust_proxy
        .then(|| {
            header_str("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .or_else(|| header_str("x-real-ip"))
        })
        .flatten()
        .map(str::to_string);
    let ip = forwarded.or(peer).unwrap_or_else(|| "unknown".into());
    let user_agent = header_str(header::USER_AGENT.as_str()).unwrap_or_default();
    ClientContext::new(ip, user_agent)
}

fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
