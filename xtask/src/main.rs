// Desktop tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod flash;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Embedded target triple of the STM32F405.
pub const TARGET: &str = "thumbv7em-none-eabihf";
/// probe-rs chip name.
pub const CHIP: &str = "STM32F405VGTx";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "DMR handheld firmware development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and flash the firmware via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
    },
    /// Check the embedded build, no_std library crates, clippy and formatting
    Check,
    /// Run host tests
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { release } => flash::run(release),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
    }
}

/// Run `cargo` with `args`, printing a timed status line.
///
/// Returns the captured output on success and fails with stderr otherwise.
pub fn cargo_step(label: &str, args: &[&str]) -> Result<Output> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if !output.status.success() {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{label} failed");
    }

    println!(
        "{}",
        format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
    );
    Ok(output)
}
