//! `fincoach` binary: runs the edge storage service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fincoach_rs_server::{EdgeState, FileKv, MemoryKv, serve};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fincoach", version, about = "Advice record edge store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the edge storage service.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8787")]
        addr: SocketAddr,
        /// Directory backing the key-value namespace.
        #[arg(long, default_value = ".fincoach/edge", conflicts_with = "in_memory")]
        data_dir: PathBuf,
        /// Keep all records in memory instead of on disk.
        #[arg(long)]
        in_memory: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fincoach_rs::init_logging();

    match Cli::parse().command {
        Command::Serve {
            addr,
            data_dir,
            in_memory,
        } => {
            let state = if in_memory {
                Arc::new(EdgeState::new(MemoryKv::new()))
            } else {
                let kv = FileKv::new(&data_dir)
                    .with_context(|| format!("failed to open data dir {}", data_dir.display()))?;
                Arc::new(EdgeState::new(kv))
            };
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            serve(listener, state).await.context("edge server failed")?;
        }
    }
    Ok(())
}
