// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::TimeDelta;
use zka_ledger::ValidatorConfig;

// ── Defaults ─────────────────────────────────────────────────────────
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_VK_PATH: &str = "circuits/build/verification_key.json";
const DEFAULT_PROOF_TTL_SECS: u64 = 300;
const DEFAULT_MAX_AGE_SECS: u64 = 300;
const DEFAULT_FUTURE_ALLOWANCE_SECS: u64 = 30;
const DEFAULT_NONCE_MIN_LEN: usize = 16;
const DEFAULT_NONCE_MAX_LEN: usize = 256;
const DEFAULT_PUBLIC_SIGNALS: usize = 4;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;
const DEFAULT_AUDIT_CAPACITY: usize = 10_000;
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub vk_path: PathBuf,
    pub proof_ttl: TimeDelta,
    pub validator: ValidatorConfig,
    pub cleanup_interval: Duration,
    pub audit_capacity: usize,
    pub session_ttl: TimeDelta,
    /// Bearer token for the audit endpoint. Unset disables the endpoint.
    pub admin_token: Option<String>,
    /// Take the client IP from `x-forwarded-for` / `x-real-ip`. Only safe
    /// behind a reverse proxy that overwrites them.
    pub trust_proxy_headers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.into(),
            vk_path: DEFAULT_VK_PATH.into(),
            proof_ttl: TimeDelta::seconds(DEFAULT_PROOF_TTL_SECS as i64),
            validator: ValidatorConfig {
                max_age: TimeDelta::seconds(DEFAULT_MAX_AGE_SECS as i64),
                future_allowance: TimeDelta::seconds(DEFAULT_FUTURE_ALLOWANCE_SECS as i64),
                nonce_min_len: DEFAULT_NONCE_MIN_LEN,
                nonce_max_len: DEFAULT_NONCE_MAX_LEN,
                public_signal_count: DEFAULT_PUBLIC_SIGNALS,
            },
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
            session_ttl: TimeDelta::seconds(DEFAULT_SESSION_TTL_SECS as i64),
            admin_token: None,
            trust_proxy_headers: true,
        }
    }
}

impl ServerConfig {
    /// Read `ZKA_*` environment variables, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let config = Self {
            listen_addr: env_or("ZKA_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            vk_path: env_or("ZKA_VK_PATH", DEFAULT_VK_PATH).into(),
            proof_ttl: seconds(&lookup, "ZKA_PROOF_TTL_SECS", DEFAULT_PROOF_TTL_SECS)?,
            validator: ValidatorConfig {
                max_age: seconds(&lookup, "ZKA_MAX_AGE_SECS", DEFAULT_MAX_AGE_SECS)?,
                future_allowance: seconds(
                    &lookup,
                    "ZKA_FUTURE_ALLOWANCE_SECS",
                    DEFAULT_FUTURE_ALLOWANCE_SECS,
                )?,
                nonce_min_len: parsed(&lookup, "ZKA_NONCE_MIN_LEN", DEFAULT_NONCE_MIN_LEN)?,
                nonce_max_len: parsed(&lookup, "ZKA_NONCE_MAX_LEN", DEFAULT_NONCE_MAX_LEN)?,
                public_signal_count: parsed(&lookup, "ZKA_PUBLIC_SIGNALS", DEFAULT_PUBLIC_SIGNALS)?,
            },
            cleanup_interval: Duration::from_secs(parsed(
                &lookup,
                "ZKA_CLEANUP_INTERVAL_SECS",
                DEFAULT_CLEANUP_INTERVAL_SECS,
            )?),
            audit_capacity: parsed(&lookup, "ZKA_AUDIT_CAPACITY", DEFAULT_AUDIT_CAPACITY)?,
            session_ttl: seconds(&lookup, "ZKA_SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            admin_token: lookup("ZKA_ADMIN_TOKEN").filter(|t| !t.is_empty()),
            trust_proxy_headers: parsed(&lookup, "ZKA_TRUST_PROXY_HEADERS", true)?,
        };

        if config.validator.nonce_min_len > config.validator.nonce_max_len {
            bail!(
                "ZKA_NONCE_MIN_LEN ({}) exceeds ZKA_NONCE_MAX_LEN ({})",
                config.validator.nonce_min_len,
                config.validator.nonce_max_len
            );
        }
        if config.cleanup_interval.is_zero() {
            bail!("ZKA_CLEANUP_INTERVAL_SECS must be positive");
        }
        if config.audit_capacity == 0 {
            bail!("ZKA_AUDIT_CAPACITY must be positive");
        }
        Ok(config)
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key}: invalid value {raw:?}")),
        None => Ok(default),
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> anyhow::Result<TimeDelta> {
    let secs: u64 = parsed(lookup, key, default)?;
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .with_context(|| format!("{key}: {secs} seconds is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.proof_ttl, TimeDelta::minutes(5));
        assert_eq!(config.validator, ValidatorConfig::default());
        assert_eq!(config.cleanup_interval, Duration::from_secs(60));
        assert_eq!(config.session_ttl, TimeDelta::hours(24));
        assert!(config.admin_token.is_none());
        assert!(config.trust_proxy_headers);
        assert_eq!(config.vk_path, ServerConfig::default().vk_path);
    }

    #[test]
    fn overrides() {
        let config = from_pairs(&[
            ("ZKA_PROOF_TTL_SECS", "60"),
            ("ZKA_FUTURE_ALLOWANCE_SECS", "5"),
            ("ZKA_PUBLIC_SIGNALS", "2"),
            ("ZKA_ADMIN_TOKEN", "secret"),
            ("ZKA_TRUST_PROXY_HEADERS", "false"),
        ])
        .unwrap();
        assert!(!config.trust_proxy_headers);
        assert_eq!(config.proof_ttl, TimeDelta::seconds(60));
        assert_eq!(config.validator.future_allowance, TimeDelta::seconds(5));
        assert_eq!(config.validator.public_signal_count, 2);
        assert_eq!(config.admin_token.as_deref(), Some("secret"));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = from_pairs(&[("ZKA_MAX_AGE_SECS", "five")]).unwrap_err();
        assert!(err.to_string().contains("ZKA_MAX_AGE_SECS"));
    }

    #[test]
    fn inverted_nonce_bounds_rejected() {
        assert!(from_pairs(&[("ZKA_NONCE_MIN_LEN", "64"), ("ZKA_NONCE_MAX_LEN", "32")]).is_err());
    }

    #[test]
    fn empty_admin_token_is_unset() {
        let config = from_pairs(&[("ZKA_ADMIN_TOKEN", "")]).unwrap();
        assert!(config.admin_token.is_none());
    }
}
