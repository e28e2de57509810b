//! Roomba CLI - drive the vacuum robot's behavior tree.
//!
//! - `roomba run` - run a number of control cycles and print the activity log
//! - `roomba tree` - print the tree outline

use std::path::PathBuf;

use anyhow::{Context, Result};
use bt_core::{Clock, NullClock, SystemClock};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use bt_roomba::{driver, run_driver, RoombaConfig};

#[derive(Parser)]
#[command(name = "roomba")]
#[command(about = "Vacuum robot driven by a behavior tree", version)]
struct Cli {
    /// Driver configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run control cycles
    Run {
        /// Number of cycles (overrides the config file)
        #[arg(long)]
        cycles: Option<u32>,

        /// Initial battery level, clamped to 0-100
        #[arg(long, allow_negative_numbers = true)]
        battery: Option<i64>,

        /// Request a spot clean
        #[arg(long)]
        spot: bool,

        /// Request a general clean
        #[arg(long)]
        general: bool,

        /// Report a dusty spot
        #[arg(long)]
        dusty_spot: bool,

        /// Charge requested each time the robot docks
        #[arg(long)]
        charge: Option<u32>,

        /// Wait in real time for simulated work
        #[arg(long)]
        realtime: bool,

        /// Activity log output format
        #[arg(long, value_enum, default_value_t = LogFormat::Text)]
        format: LogFormat,
    },

    /// Print the tree outline
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = RoombaConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Run {
            cycles,
            battery,
            spot,
            general,
            dusty_spot,
            charge,
            realtime,
            format,
        }) => {
            if let Some(cycles) = cycles {
                config.cycles = cycles;
            }
            if let Some(level) = battery {
                config.blackboard.battery_level = level;
            }
            for (name, requested) in [
                ("spot", spot),
                ("general", general),
                ("dusty_spot", dusty_spot),
            ] {
                if requested {
                    config.blackboard.flags.insert(name.to_string(), true);
                }
            }
            if let Some(amount) = charge {
                config.charge = vec![amount];
            }
            config.realtime |= realtime;

            run(&config, format)
        }
        Some(Commands::Tree) => show_tree(&config),
        None => {
            println!("Roomba - behavior tree vacuum robot");
            println!();
            println!("Usage: roomba <COMMAND>");
            println!();
            println!("Commands:");
            println!("  run   Run control cycles");
            println!("  tree  Print the tree outline");
            println!();
            println!("Run 'roomba --help' for more information.");
            Ok(())
        }
    }
}

fn run(config: &RoombaConfig, format: LogFormat) -> Result<()> {
    let mut clock: Box<dyn Clock> = if config.realtime {
        Box::new(SystemClock)
    } else {
        Box::new(NullClock)
    };

    let report = run_driver(config, clock.as_mut())?;

    match format {
        LogFormat::Text => {
            println!("{}", report.log().render());
            println!();
            println!(
                "Battery: {}  Home path: {}",
                report.blackboard.battery(),
                report.blackboard.home_path()
            );
        }
        LogFormat::Json => {
            let json = serde_json::to_string_pretty(report.log())
                .context("Failed to serialize activity log")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn show_tree(config: &RoombaConfig) -> Result<()> {
    let tree = driver::build(config).context("Failed to build behavior tree")?;
    print!("{}", tree.outline());
    println!();
    println!("{} nodes", tree.node_count());
    Ok(())
}
