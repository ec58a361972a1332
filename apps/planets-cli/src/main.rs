mod scenario;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::scenario::{Scenario, ScenarioReport};

#[derive(Parser)]
#[command(name = "planets", about = "Headless driver for the planets front-end")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Place a planet into orbit around a star and let it run
    Demo {
        /// Frames to run after placing
        #[arg(short, long, default_value = "100")]
        frames: u32,
        #[arg(short, long, default_value = "42")]
        seed: u64,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Replay a YAML scenario
    Run {
        path: PathBuf,
        /// Override the number of trailing frames
        #[arg(short, long)]
        frames: Option<u32>,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn print_report(report: &ScenarioReport, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => {
            print!("{}", report.last_frame);
            println!("{}", report.summary);
            for body in &report.bodies {
                println!("  {body}");
            }
            println!("step: {}", report.step);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("planets v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", planets_render::crate_info());
            println!("author: {}", planets_author::crate_info());
            println!("input: {}", planets_input::crate_info());
            println!("tools: {}", planets_tools::crate_info());
            let units = [
                ("gravity", planets_common::units::GRAVITY_CONSTANT),
                ("velocity factor", planets_common::units::VELOCITY_FACTOR),
            ];
            for (name, value) in units {
                println!("{name}: {value:e}");
            }
        }
        Commands::Demo {
            frames,
            seed,
            format,
        } => {
            let report = Scenario::demo(frames, seed).run()?;
            print_report(&report, format)?;
        }
        Commands::Run {
            path,
            frames,
            format,
        } => {
            let mut scenario = Scenario::load(&path)?;
            if let Some(frames) = frames {
                scenario.frames = frames;
            }
            let report = scenario.run()?;
            print_report(&report, format)?;
        }
    }

    Ok(())
}
