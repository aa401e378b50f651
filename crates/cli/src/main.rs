use clap::{Parser, Subcommand};
use compact_proofs_cli::commands::{build, inspect, reconcile};
use compact_proofs_cli::telemetry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compact-proofs")]
#[command(about = "Build, inspect and reconcile compact proof announcements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a list of hex proof payloads as a compact announcement.
    Build {
        /// Newline-separated hex payloads, in announcement order.
        #[arg(long, short)]
        input: PathBuf,

        /// Positions to send in full.
        #[arg(long, value_delimiter = ',')]
        prefill: Vec<u32>,

        /// Output file for the encoded announcement.
        #[arg(long, short)]
        out: PathBuf,

        /// Seed for reproducible keys.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decode an announcement and show its layout.
    Inspect {
        path: PathBuf,

        /// JSON file with decode limits.
        #[arg(long)]
        limits: Option<PathBuf>,

        /// Print a JSON summary instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Match an announcement against local proofs and build the request.
    Reconcile {
        message: PathBuf,

        /// Newline-separated hex payloads held locally.
        #[arg(long, short)]
        local: PathBuf,

        /// Output file for the encoded proofs request.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            prefill,
            out,
            seed,
        } => build::run(&input, &prefill, &out, seed),
        Commands::Inspect { path, limits, json } => {
            inspect::run(&path, limits.as_deref(), json).map(|_| ())
        }
        Commands::Reconcile { message, local, out } => {
            reconcile::run(&message, &local, out.as_deref()).map(|_| ())
        }
    }
}
