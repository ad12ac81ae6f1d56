// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zka_server::config::ServerConfig;
use zka_verifier::VerifyingKeyStore;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zka_server=info,zka_ledger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    tracing::info!(vk = %config.vk_path.display(), "zka-server starting");

    // 1. Load the verifying key; nothing works without it
    let keys = VerifyingKeyStore::load(&config.vk_path)
        .with_context(|| format!("failed to load verifying key {}", config.vk_path.display()))?;
    tracing::info!(
        key_id = keys.key_id(),
        public_inputs = keys.key().num_public_inputs(),
        commitment_keys = keys.key().commitment_keys().len(),
        "verifying key loaded"
    );

    // 2. Login stack + background ledger sweep
    let (state, store) = zka_server::build_state(&config, keys)?;
    tracing::info!(
        ttl_secs = store.ttl().num_seconds(),
        "nonce ledger is in-memory and starts empty"
    );
    zka_server::spawn_cleanup(store, config.cleanup_interval);

    // 3. Serve
    let router = zka_server::api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(
        addr = %config.listen_addr,
        trust_proxy_headers = config.trust_proxy_headers,
        "listening"
    );
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;
    Ok(())
}
