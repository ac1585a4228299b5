use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::{cargo_step, CHIP, TARGET};

fn binary_path(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/firmware")
}

pub fn run(release: bool) -> Result<()> {
    let mode = if release { "release" } else { "debug" };

    println!();
    println!(
        "{}",
        format!("🔨 Building firmware ({mode} mode)...").cyan().bold()
    );
    println!();

    let mut args = vec![
        "build", "-p", "firmware", "--target", TARGET, "--features", "hardware",
    ];
    if release {
        args.push("--release");
    }
    cargo_step("Firmware build", &args)?;
    println!();

    show_binary_size(release);
    println!();

    println!("{}", format!("📡 Flashing to {CHIP}...").cyan().bold());
    println!("   {}", "Connecting to probe...".dimmed());

    // `probe-rs run` keeps streaming RTT (defmt) output until interrupted.
    let flash_start = Instant::now();
    let status = Command::new("probe-rs")
        .arg("run")
        .arg(binary_path(release))
        .args(["--chip", CHIP, "--probe-index", "0"])
        .status()
        .context("Failed to run probe-rs. Is probe-rs installed? (cargo install probe-rs-tools)")?;

    if !status.success() {
        eprintln!("{}", "✗ Flash failed".red().bold());
        anyhow::bail!(
            "Flash failed - check that the probe is connected and the radio is powered"
        );
    }

    println!(
        "{}",
        format!(
            "✓ Session ended after {:.2}s",
            flash_start.elapsed().as_secs_f64()
        )
        .green()
    );
    println!();

    Ok(())
}

/// Print section sizes if `rust-size` (cargo-binutils) is installed.
fn show_binary_size(release: bool) {
    let output = Command::new("rust-size")
        .arg(binary_path(release))
        .arg("-A")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            println!("{}", "📊 Binary size:".cyan());
            for line in String::from_utf8_lossy(&out.stdout).lines() {
                println!("   {}", line.dimmed());
            }
        }
        _ => println!(
            "   {}",
            "rust-size not found (cargo install cargo-binutils)".dimmed()
        ),
    }
}
