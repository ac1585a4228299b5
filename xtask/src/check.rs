use anyhow::Result;
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::{cargo_step, TARGET};

/// Library crates that must build for the bare-metal target without std.
const NO_STD_CRATES: [&str; 3] = ["platform", "input", "ui"];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking firmware builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    cargo_step(
        "Hardware build (STM32F405)",
        &["check", "-p", "firmware", "--target", TARGET, "--features", "hardware"],
    )?;

    for krate in NO_STD_CRATES {
        cargo_step(
            &format!("{krate} (no_std)"),
            &["check", "-p", krate, "--target", TARGET, "--features", "defmt"],
        )?;
    }

    cargo_step("Host build", &["check", "--workspace", "--all-targets"])?;

    // Clippy and formatting only warn.
    println!("{}", "  Running clippy lints...".cyan());
    let clippy = Command::new("cargo")
        .args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
        .output()?;
    if clippy.status.success() {
        println!("{}", "  ✓ Clippy passed".green());
    } else {
        eprintln!("{}", "  ⚠ Clippy warnings found".yellow().bold());
        eprintln!("{}", String::from_utf8_lossy(&clippy.stderr));
    }

    let fmt = Command::new("cargo").args(["fmt", "--all", "--check"]).output()?;
    if fmt.status.success() {
        println!("{}", "  ✓ Formatting check passed".green());
    } else {
        eprintln!("{}", "  ⚠ Formatting issues found".yellow().bold());
        eprintln!("     Run 'cargo fmt --all' to fix");
    }
    println!();

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
