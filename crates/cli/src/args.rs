use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the Intcode runner
#[derive(Parser, Debug, Clone)]
#[command(
    name = "intcode",
    version = env!("CARGO_PKG_VERSION"),
    about = "Run, chain and disassemble Intcode programs",
    long_about = "Runs Intcode programs to completion, chains several copies of a program into a feedback pipeline, or prints a static disassembly. Program outputs go to stdout; logs go to stderr."
)]
pub struct CliArgs {
    /// Specifies the config file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// The verbose log level (overrides the config file)
    #[arg(long = "verbose", value_enum, global = true)]
    pub verbose: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a program until it halts and print its outputs
    Run(RunArgs),

    /// Run one copy of a program per stage input, chained in a feedback loop
    Pipeline(PipelineArgs),

    /// Print a disassembly listing
    Disasm(DisasmArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Program file (comma-separated integers)
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    /// Values queued on the input device before running
    #[arg(
        short = 'i',
        long = "input",
        value_name = "VALUES",
        value_delimiter = ',',
        allow_hyphen_values = true
    )]
    pub input: Vec<i64>,

    /// Maximum number of instructions to execute
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,

    /// Print the final memory image after the outputs
    #[arg(long = "dump-memory")]
    pub dump_memory: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Program file (comma-separated integers)
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    /// First input of each stage, one stage per value
    #[arg(
        long = "stage-input",
        value_name = "VALUES",
        value_delimiter = ',',
        allow_hyphen_values = true,
        required = true
    )]
    pub stage_input: Vec<i64>,

    /// Value handed to the first stage to start the loop
    #[arg(long = "seed", default_value_t = 0, allow_hyphen_values = true)]
    pub seed: i64,

    /// Maximum number of instructions each stage may execute
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct DisasmArgs {
    /// Program file (comma-separated integers)
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl From<LogLevel> for intcode_config::LogLevel {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => intcode_config::LogLevel::Trace,
            LogLevel::Debug => intcode_config::LogLevel::Debug,
            LogLevel::Info => intcode_config::LogLevel::Info,
            LogLevel::Warn => intcode_config::LogLevel::Warn,
            LogLevel::Error => intcode_config::LogLevel::Error,
        }
    }
}
