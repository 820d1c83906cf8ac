mod commands;

use clap::{Parser, Subcommand};
use commands::EXIT_FAILURE;
use std::path::PathBuf;
use std::process::ExitCode;

/// Compose directory listing this build tracks.
const DEFAULT_BASE_URL: &str = "https://kojipkgs.fedoraproject.org/compose/branched";

/// How many of the newest composes `sync` fetches by default.
const DEFAULT_KEEP: usize = 3;

/// Default pair for `compare` when no argument is given.
const DEFAULT_OLD_COMPOSE: &str = "Fedora-41-20241023.n.0";
const DEFAULT_NEW_COMPOSE: &str = "Fedora-41-20241024.n.0";

#[derive(Debug, Parser)]
#[command(
    name = "composedrift",
    version,
    about = "Track package drift between nightly Fedora composes"
)]
struct Cli {
    /// Directory holding cached compose manifests.
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Base URL of the compose directory listing.
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover the newest composes and download any missing manifests.
    Sync {
        /// Number of newest composes to fetch.
        #[arg(long, default_value_t = DEFAULT_KEEP)]
        keep: usize,
    },
    /// Diff two cached composes, given as `<old>:<new>`.
    Compare {
        /// Compose pair, colon-separated.
        pair: Option<String>,
    },
    /// Serve compose diffs over HTTP (`GET /<old>:<new>`).
    Daemon {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on.
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("COMPOSEDRIFT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        // Keep stdout clean for --json consumers; diagnostics go to stderr.
        .with_writer(std::io::stderr)
        .init();

    let store = composedrift_store::FsStore::new(&cli.data_dir);

    let result = match cli.command {
        Commands::Sync { keep } => {
            let config = composedrift_remote::SourceConfig::new(&cli.base_url);
            let client = composedrift_remote::ComposeClient::new(config);
            commands::sync::run(&client, &store, keep, cli.json)
        }
        Commands::Compare { pair } => {
            let pair =
                pair.unwrap_or_else(|| format!("{DEFAULT_OLD_COMPOSE}:{DEFAULT_NEW_COMPOSE}"));
            commands::compare::run(&store, &pair, cli.json)
        }
        Commands::Daemon { bind, port } => commands::daemon::run(&cli.data_dir, &bind, port),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
