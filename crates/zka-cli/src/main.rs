// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zka", about = "Zero-knowledge login tooling")]
struct Cli {
    /// Machine-readable output on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate a verification key artifact and print its fingerprint
    Inspect {
        /// Path to verification_key.json
        vk: PathBuf,
    },
    /// Verify a login request offline (no nonce ledger)
    Verify {
        /// Path to verification_key.json
        #[arg(long)]
        vk: PathBuf,
        /// Path to a login request JSON document
        #[arg(long)]
        request: PathBuf,
    },
    /// Submit a login request to a running server
    Login {
        /// Path to a login request JSON document
        #[arg(long)]
        request: PathBuf,
        /// Server base URL [env: ZKA_SERVER_URL, default: http://localhost:8080]
        #[arg(long)]
        server: Option<String>,
        /// Replace timestamp with now and nonce with a random one
        #[arg(long)]
        fresh: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);
    match cli.command {
        Cmd::Inspect { vk } => commands::inspect::run(&vk)?,
        Cmd::Verify { vk, request } => commands::verify::run(&vk, &request)?,
        Cmd::Login {
            request,
            server,
            fresh,
        } => commands::login::run(&request, server, fresh).await?,
    }
    Ok(())
}
