use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    alloy::{self, AlloyArgs},
    database::{self, DatabaseArgs},
    mobility::{self, MobilityArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "mobility-sim",
    about = "Alloy interpolation and 2D carrier-gas mobility CLI"
)]
struct Cli {
    /// Verbosity of the diagnostic log written to stderr.
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the material database as JSON.
    Database(DatabaseArgs),
    /// Interpolate alloy parameters for the configured compositions.
    Alloy(AlloyArgs),
    /// Run a mobility scan and write its artefacts.
    Mobility(MobilityArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    match cli.command {
        Command::Database(args) => database::run(&args),
        Command::Alloy(args) => alloy::run(&args),
        Command::Mobility(args) => mobility::run(&args),
    }
}

pub(crate) fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = mobility_core::serde::to_pretty_json_bytes(value)?;
    fs::write(path, bytes)?;
    Ok(())
}
