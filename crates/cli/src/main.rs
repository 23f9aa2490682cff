use anyhow::Result;
use clap::Parser;
use intcode_cli::args::CliArgs;
use intcode_cli::{commands, config};
use intcode_config::LogLevel;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = CliArgs::parse();
    let runner_config = config::load_config(cli.config.as_deref())?;

    let level = cli
        .verbose
        .map(LogLevel::from)
        .unwrap_or(runner_config.logger.level);
    init_tracing(level);
    tracing::debug!(version = intcode_cli::VERSION, config = ?runner_config, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(&cli.command, &runner_config, &mut out)
}

fn init_tracing(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}
