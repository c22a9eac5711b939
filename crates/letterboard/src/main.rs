//! Letterboard command-line entry point
//!
//! `serve` runs the synchronization service over an in-memory store;
//! `watch` runs a headless reconciliation session against a remote board.

use anyhow::Context;
use clap::{value_parser, Arg, Command};
use letterboard_client::{HttpTransport, Session, SessionConfig};
use letterboard_repo::{RepoConfig, TileRepository, WriteMode};
use letterboard_service::{routes, BoardService};
use letterboard_store::MemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Command::new("letterboard")
        .version(letterboard_service::VERSION)
        .about("Shared letter-tile board")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the synchronization service over an in-memory store")
                .arg(
                    Arg::new("port")
                        .long("port")
                        .default_value("3001")
                        .value_parser(value_parser!(u16))
                        .help("Port to listen on"),
                )
                .arg(
                    Arg::new("write-mode")
                        .long("write-mode")
                        .default_value("sequential")
                        .value_parser(["sequential", "batched"])
                        .help("How two-field partial updates reach the store"),
                )
                .arg(
                    Arg::new("store-timeout-ms")
                        .long("store-timeout-ms")
                        .default_value("30000")
                        .value_parser(value_parser!(u64))
                        .help("Upper bound in milliseconds for a single store call"),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Run a headless reconciliation session against a remote board")
                .arg(
                    Arg::new("url")
                        .long("url")
                        .default_value("http://localhost:3001")
                        .help("Base URL of the board service"),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .default_value("2000")
                        .value_parser(value_parser!(u64))
                        .help("Poll interval in milliseconds"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("serve", matches)) => {
            let port = *matches.get_one::<u16>("port").expect("defaulted");
            let write_mode = match matches.get_one::<String>("write-mode").map(String::as_str) {
                Some("batched") => WriteMode::Batched,
                _ => WriteMode::Sequential,
            };
            let store_timeout = Duration::from_millis(
                *matches.get_one::<u64>("store-timeout-ms").expect("defaulted"),
            );
            serve(port, write_mode, store_timeout).await
        }
        Some(("watch", matches)) => {
            let url = matches.get_one::<String>("url").expect("defaulted").clone();
            let interval = Duration::from_millis(
                *matches.get_one::<u64>("interval-ms").expect("defaulted"),
            );
            watch_board(url, interval).await
        }
        _ => unreachable!("arg_required_else_help"),
    }
}

async fn serve(port: u16, write_mode: WriteMode, store_timeout: Duration) -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let repo = TileRepository::with_config(
        store,
        RepoConfig {
            write_mode,
            store_timeout,
        },
    );
    let service = Arc::new(BoardService::new(repo));
    service
        .ensure_seeded()
        .await
        .context("failed to seed the board")?;

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    tracing::info!(%addr, version = letterboard_service::VERSION, "letterboard listening");
    warp::serve(routes(service)).run(addr).await;
    Ok(())
}

async fn watch_board(url: String, poll_interval: Duration) -> anyhow::Result<()> {
    let session = Arc::new(Session::with_config(
        HttpTransport::new(url.clone()),
        SessionConfig { poll_interval },
    ));
    session
        .initialize()
        .await
        .with_context(|| format!("failed to reach the board at {url}"))?;
    let tiles = session.tiles().await.len();
    tracing::info!(url = %url, tiles, "watching board");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let loop_handle = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.run(shutdown_rx).await })
    };

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    let _ = shutdown_tx.send(true);
    loop_handle.await?;
    tracing::info!("session closed");
    Ok(())
}
