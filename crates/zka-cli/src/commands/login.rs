// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use zka_types::ProofRequest;

use crate::output;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

fn server_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("ZKA_SERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.into())
        .trim_end_matches('/')
        .to_string()
}

/// Stamp a request for a new attempt: current time, random 32-char nonce.
pub fn refresh(request: &mut ProofRequest) {
    request.timestamp = Some(Utc::now().timestamp());
    request.nonce = hex::encode(rand::random::<[u8; 16]>());
}

pub async fn run(request_path: &Path, server: Option<String>, fresh: bool) -> Result<()> {
    let mut request = super::load_request(request_path)?;
    if fresh {
        refresh(&mut request);
    }
    let base = server_url(server);

    let pb = output::spinner("submitting proof...");
    let resp = reqwest::Client::new()
        .post(format!("{base}/v1/login"))
        .json(&request)
        .timeout(std::time::Duration::from_secs(30))
        .send()
        .await;
    pb.finish_and_clear();
    let resp = resp.map_err(|e| {
        output::fail_with_hint(
            &format!("cannot reach {base}: {e}"),
            "start zka-server or pass --server",
        )
    })?;

    let status = resp.status();
    let body: serde_json::Value = resp
        .json()
        .await
        .context("server returned a non-JSON body")?;

    if status.is_success() {
        output::Report::accepted("login accepted")
            .field("status", status.as_u16())
            .field("user", body["user"].clone())
            .field("token", body["token"].clone())
            .field("expires_at", body["expiresAt"].clone())
            .field("nonce", request.nonce.as_str())
            .emit();
        return Ok(());
    }

    let code = body["code"].as_str().unwrap_or("UNKNOWN");
    let error = body["error"].as_str().unwrap_or("login rejected");
    output::Report::rejected(format!("login rejected ({status})"))
        .field("status", status.as_u16())
        .field("code", code)
        .field("nonce", request.nonce.as_str())
        .emit();
    let hint = match code {
        "REPLAY_DETECTED" => "each proof request is single-use; retry with --fresh",
        "PROOF_EXPIRED" | "CLOCK_SKEW_OR_FORGED" => "check the clock or retry with --fresh",
        _ => "run `zka verify` against the server's key to check the proof offline",
    };
    Err(output::fail_with_hint(&format!("{code}: {error}"), hint))
}
