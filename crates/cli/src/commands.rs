//! Subcommand implementations.
//!
//! Each command writes its results to the given writer so the binary can
//! hand it stdout and tests can hand it a buffer.

use crate::args::{Command, DisasmArgs, PipelineArgs, RunArgs};
use crate::config::execution_settings;
use anyhow::{bail, Context, Result};
use intcode_config::RunnerConfig;
use intcode_vm::{disassemble, ExecutionEngine, ExecutionEngineLimits, Pipeline, Program};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Runs `command` and writes its output to `out`.
pub fn execute<W: Write>(command: &Command, config: &RunnerConfig, out: &mut W) -> Result<()> {
    match command {
        Command::Run(args) => run(args, config, out),
        Command::Pipeline(args) => pipeline(args, config, out),
        Command::Disasm(args) => disasm(args, out),
    }
}

/// Reads and parses a program file.
pub fn load_program(path: &Path) -> Result<Program> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read program {}", path.display()))?;
    let program: Program = text
        .parse()
        .with_context(|| format!("failed to parse program {}", path.display()))?;
    debug!(path = %path.display(), cells = program.len(), "loaded program");
    Ok(program)
}

fn run<W: Write>(args: &RunArgs, config: &RunnerConfig, out: &mut W) -> Result<()> {
    let program = load_program(&args.program)?;
    let limits = ExecutionEngineLimits::from(execution_settings(config, args.max_steps));

    let mut engine = ExecutionEngine::new_with_limits(&program, None, None, limits);
    let result = engine.run(args.input.iter().copied());

    // Print whatever was produced before a fault.
    for value in engine.take_output() {
        writeln!(out, "{}", value)?;
    }
    result.with_context(|| {
        format!(
            "program {} faulted after {} steps",
            args.program.display(),
            engine.steps()
        )
    })?;

    info!(steps = engine.steps(), "program halted");
    if args.dump_memory {
        writeln!(out, "{}", engine.memory())?;
    }
    Ok(())
}

fn pipeline<W: Write>(args: &PipelineArgs, config: &RunnerConfig, out: &mut W) -> Result<()> {
    let program = load_program(&args.program)?;
    let limits = ExecutionEngineLimits::from(execution_settings(config, args.max_steps));

    let engines = args.stage_input.iter().map(|&setting| {
        let mut engine = ExecutionEngine::new_with_limits(&program, None, None, limits);
        engine.push_input(setting);
        engine
    });
    let mut pipeline = Pipeline::new(engines);

    let outputs = pipeline
        .run_feedback(args.seed)
        .context("pipeline stage faulted")?;
    info!(
        stages = pipeline.len(),
        rounds = pipeline.rounds(),
        "pipeline finished"
    );

    match outputs.last() {
        Some(value) => writeln!(out, "{}", value)?,
        None => bail!("final pipeline stage produced no output"),
    }
    Ok(())
}

fn disasm<W: Write>(args: &DisasmArgs, out: &mut W) -> Result<()> {
    let program = load_program(&args.program)?;
    for line in disassemble(&program) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
