//! Scenario replay for the infinite carousel engine.
//!
//! Drives an `InfiniCarousel` through scripted input against a simulated
//! host with a 60 Hz frame clock, and prints one JSON line per settled
//! checkpoint.
//!
//! Usage:
//!   cargo run -p infini-replay -- crates/infini-replay/scenarios/five_nexts.toml
//!   cargo run -p infini-replay -- --pretty a.toml b.toml

mod scenario;
mod sim;

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use scenario::Scenario;
use sim::Checkpoint;

// ---------------------------------------------------------------------------
// CLI parsing
// ---------------------------------------------------------------------------

struct Args {
    paths: Vec<PathBuf>,
    /// Pretty-print each checkpoint instead of one line per checkpoint.
    pretty: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        paths: Vec::new(),
        pretty: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pretty" => args.pretty = true,
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: infini-replay [--pretty] SCENARIO.toml...");
                std::process::exit(1);
            }
            path => args.paths.push(PathBuf::from(path)),
        }
    }
    if args.paths.is_empty() {
        eprintln!("Usage: infini-replay [--pretty] SCENARIO.toml...");
        std::process::exit(1);
    }
    args
}

#[derive(Serialize)]
struct Line<'a> {
    scenario: &'a str,
    #[serde(flatten)]
    checkpoint: &'a Checkpoint,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();

    for path in &args.paths {
        let scenario = Scenario::load(path)?;
        log::info!(
            "Replaying '{}' ({} items, {} steps)",
            scenario.name,
            scenario.item_widths.len(),
            scenario.steps.len()
        );

        let checkpoints = sim::run(&scenario)?;
        for checkpoint in &checkpoints {
            let line = Line {
                scenario: &scenario.name,
                checkpoint,
            };
            let text = if args.pretty {
                serde_json::to_string_pretty(&line)?
            } else {
                serde_json::to_string(&line)?
            };
            println!("{text}");
        }
        log::info!("'{}': {} checkpoints", scenario.name, checkpoints.len());
    }

    Ok(())
}
