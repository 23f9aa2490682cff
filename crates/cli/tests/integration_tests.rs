//! End-to-end tests for the `intcode` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FEEDBACK_PROGRAM: &str = "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,\
1001,28,-1,28,1005,28,6,99,0,0,5\n";

fn intcode() -> Command {
    let mut cmd = Command::cargo_bin("intcode").expect("binary should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_program(dir: &TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write program");
    path.to_str().expect("utf-8 path").to_string()
}

#[test]
fn test_run_echoes_input() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "echo.txt", "3,0,4,0,99\n");

    intcode()
        .args(["run", &program, "--input", "-17"])
        .assert()
        .success()
        .stdout("-17\n");
}

#[test]
fn test_run_dump_memory() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "add.txt", "1,1,1,4,99,5,6,0,99");

    intcode()
        .args(["run", &program, "--dump-memory"])
        .assert()
        .success()
        .stdout("30,1,1,4,2,5,6,0,99\n");
}

#[test]
fn test_run_fault_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "bad.txt", "1,0,0,0,42");

    intcode()
        .args(["run", &program])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown opcode 42"));
}

#[test]
fn test_config_file_sets_step_limit() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "loop.txt", "1105,1,0");
    let config = dir.path().join("intcode.toml");
    fs::write(&config, "[execution]\nmax_steps = 25\n").unwrap();

    intcode()
        .args(["run", &program, "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step limit of 25"));
}

#[test]
fn test_pipeline_feedback() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "amp.txt", FEEDBACK_PROGRAM);

    intcode()
        .args(["pipeline", &program, "--stage-input", "9,8,7,6,5", "--seed", "0"])
        .assert()
        .success()
        .stdout("139629729\n");
}

#[test]
fn test_disasm() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "quine.txt", "109,1,204,-1,99");

    intcode()
        .args(["disasm", &program])
        .assert()
        .success()
        .stdout("0000: ARB 1\n0002: OUT [rb-1]\n0004: HALT\n");
}

#[test]
fn test_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let program = write_program(&dir, "out.txt", "104,5,99");

    intcode()
        .args(["run", &program, "--verbose", "debug"])
        .assert()
        .success()
        .stdout("5\n")
        .stderr(predicate::str::contains("program halted"));
}

#[test]
fn test_missing_program_file() {
    intcode()
        .args(["disasm", "/no/such/program.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read program"));
}
