//! Development automation tasks for the recency workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::Context;

mod features;

/// Package every task targets
pub const PACKAGE: &str = "recency-cache";

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("doc") => run_doc(),
        Some("bench") => run_bench(),
        Some("audit") => run_audit(),
        Some("test-features") => features::test_feature_matrix(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Recency Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci             Run all CI checks (fmt, clippy, test-features, test, doc)");
    println!("    fmt            Check Rust code formatting");
    println!("    clippy         Run Clippy lints on every target with all features");
    println!("    test           Run all tests with all features");
    println!("    doc            Build documentation and fail on warnings");
    println!("    bench          Run the criterion benchmarks");
    println!("    audit          Audit dependencies for security vulnerabilities");
    println!("    test-features  Verify every {PACKAGE} feature tier compiles on its own");
    println!("    help           Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    let steps: [(&str, fn() -> anyhow::Result<()>); 5] = [
        ("Checking Rust format", run_fmt),
        ("Running Clippy", run_clippy),
        ("Checking feature tiers", features::test_feature_matrix),
        ("Running tests", run_test),
        ("Building docs", run_doc),
    ];

    println!("==> Running CI checks...");
    for (index, (label, step)) in steps.iter().enumerate() {
        println!("\n==> Step {}/{}: {label}...", index + 1, steps.len());
        step()?;
    }

    println!("\n✓ All CI checks passed!");
    Ok(())
}

/// Run `cargo` with `args`, failing with `hint` when it exits unsuccessfully
fn cargo(args: &[&str], hint: &str) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("{hint}");
    }

    Ok(())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"], "Format check failed. Run 'cargo fmt --all' to fix.")
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    cargo(
        &["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"],
        "Clippy run failed. See output above.",
    )
}

/// Run all workspace tests, doctests included
fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace", "--all-features"], "Tests failed")
}

/// Build the API docs with warnings denied
fn run_doc() -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(["doc", "-p", PACKAGE, "--all-features", "--no-deps"])
        .env("RUSTDOCFLAGS", "-D warnings")
        .status()
        .context("Failed to run cargo doc")?;

    if !status.success() {
        anyhow::bail!("Documentation build failed");
    }

    Ok(())
}

/// Run the criterion benchmarks
fn run_bench() -> anyhow::Result<()> {
    cargo(&["bench", "-p", PACKAGE, "--features", "runtime"], "Benchmarks failed")
}

/// Audit dependencies for security vulnerabilities
fn run_audit() -> anyhow::Result<()> {
    let check_installed = Command::new("cargo").args(["audit", "--version"]).output();

    if !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-audit is not installed.");
        eprintln!("Install it with: cargo install cargo-audit");
        anyhow::bail!("cargo-audit not found");
    }

    cargo(&["audit"], "cargo-audit found vulnerabilities")
}
