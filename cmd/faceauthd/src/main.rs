//! faceauthd - Face-descriptor registry and verification server.
//!
//! Clients register named descriptors (feature vectors computed by an
//! external face-recognition model) and later verify a fresh descriptor
//! against the roster. State lives in a single JSON file next to the
//! server.

mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use faceauth_registry::{Config, Registry, DEFAULT_THRESHOLD};

/// Face-descriptor registry and verification server.
#[derive(Parser, Debug)]
#[command(name = "faceauthd")]
#[command(about = "Face-descriptor registry and verification server")]
#[command(version)]
struct Args {
    /// Listen address (e.g. :3000 or 127.0.0.1:3000)
    #[arg(short, long, default_value = ":3000")]
    listen: String,

    /// Backing file for registered descriptors
    #[arg(long, default_value = "embeddings.json")]
    data_file: PathBuf,

    /// Maximum accepted match distance
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f32,

    /// Directory with the web UI to serve at /
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let registry = Registry::with_file_store(
        Config {
            threshold: args.threshold,
        },
        &args.data_file,
    );

    server::serve(&args.listen, registry, args.static_dir).await
}
