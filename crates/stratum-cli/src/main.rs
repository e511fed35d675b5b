//! Stratum CLI: run collision scenarios, size margins, validate inputs.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod scenarios;

#[derive(Parser)]
#[command(name = "stratum")]
#[command(version, about = "Stratum: adaptive penalty layers for collision-free timesteps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a number of steps of a scenario.
    Simulate {
        /// Built-in scenario (vertex_over_triangle, crossing_edges,
        /// stacked_sheets) or a path to a JSON scenario file.
        #[arg(short, long, default_value = "vertex_over_triangle")]
        scenario: String,

        /// Layer config (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of steps to resolve.
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,

        /// Write telemetry events as JSON lines to this file.
        #[arg(long)]
        json_events: Option<String>,
    },

    /// Print the closest distance between non-adjacent primitives.
    Closest {
        /// Built-in scenario name or JSON scenario file.
        #[arg(short, long, default_value = "vertex_over_triangle")]
        scenario: String,
    },

    /// Validate a layer config (.toml) or a mesh / scenario (.json).
    Validate {
        /// Path to the file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            config,
            steps,
            json_events,
        } => commands::simulate(&scenario, config.as_deref(), steps, json_events.as_deref()),
        Commands::Closest { scenario } => commands::closest(&scenario),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
