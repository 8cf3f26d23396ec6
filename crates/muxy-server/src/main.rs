//! muxy-server: demo HTTP server
//!
//! Wires a handful of fixed routes onto a [`Mux`] and serves it:
//!
//! | Path                      | Handler                                    |
//! |---------------------------|--------------------------------------------|
//! | `/health`                 | `healthy`, wrapped by the request logger   |
//! | `/hello`                  | `bye`                                      |
//! | `/bye`                    | `bye`                                      |
//! | `/video/stranger-things`  | `<static-dir>/stranger-things.mp4`         |
//! | `/poster/stranger-things` | `<static-dir>/poster.jpeg`                 |
//!
//! Every other path answers `404 Page not found`.

use clap::Parser;
use muxy_core::{logger, Health, Mux, ServeFile, Server, ServerConfig, Text};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "muxy-server", version, about = "Exact-match HTTP multiplexer demo server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Directory holding the video and poster files
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Runtime worker threads (defaults to the number of CPUs)
    #[arg(long)]
    workers: Option<usize>,
}

fn routes(static_dir: &std::path::Path) -> muxy_core::Result<Mux> {
    let mux = Mux::new();

    mux.register("/health", logger(Health::new()))?;
    mux.register("/hello", Text::new("bye"))?;
    mux.register("/bye", Text::new("bye"))?;
    mux.register(
        "/video/stranger-things",
        ServeFile::with_type(static_dir.join("stranger-things.mp4"), "video/mp4"),
    )?;
    mux.register(
        "/poster/stranger-things",
        ServeFile::with_type(static_dir.join("poster.jpeg"), "image/jpeg"),
    )?;

    Ok(mux)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muxy_server=info,muxy_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ServerConfig::new().hostname(args.host).port(args.port);
    if let Some(workers) = args.workers {
        config = config.workers(workers);
    }

    let mux = routes(&args.static_dir)?;
    tracing::info!(
        address = %config.addr()?,
        workers = config.workers,
        static_dir = %args.static_dir.display(),
        routes = ?mux.paths(),
        "server starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()?;

    runtime.block_on(Server::new(config, Arc::new(mux)).run())?;
    Ok(())
}
