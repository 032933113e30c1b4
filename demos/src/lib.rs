//! Demo programs for the qsweep crates.
//!
//! The headline demo is the stabilizer timing sweep in [`runners::sweep`]: a
//! Clifford-only circuit and the same circuit plus one `t` gate are run for a
//! range of register sizes, and their wall-clock times compared. The other
//! binaries cover transpilation against restricted devices, Trotterised time
//! evolution, and VQE for a toy problem and for H₂ in a minimal basis.
//!
//! ```no_run
//! use qsweep_demos::runners::{SimulatorSession, collect_sweep, render_timing_table, run_sweep};
//!
//! let session = SimulatorSession::new()?;
//! let report = collect_sweep(run_sweep(&session, [2, 3, 4], 1024))?;
//! println!("{}", render_timing_table(&report.records));
//! # Ok::<(), qsweep_demos::DemoError>(())
//! ```

pub mod circuits;
pub mod error;
pub mod optimizers;
pub mod problems;
pub mod render;
pub mod runners;
pub mod target;

pub use error::{DemoError, DemoResult};

use std::fmt::Display;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

const HEADER_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;

/// Install the `tracing` subscriber for a binary. `RUST_LOG` overrides the
/// level picked from the number of `-v` flags.
pub fn init_tracing(verbose: u8) {
    let default = ["warn", "info", "debug"]
        .get(usize::from(verbose))
        .copied()
        .unwrap_or("trace");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

/// Bar for `len` units of work, labelled with `message`.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} {elapsed:>4} {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("=> "));
    ProgressBar::new(len)
        .with_style(style)
        .with_message(message.to_string())
}

pub fn print_header(title: &str) {
    let rule = "═".repeat(HEADER_WIDTH);
    println!(
        "\n{}\n{}\n{}\n",
        style(&rule).cyan(),
        style(format!("  {title}")).cyan().bold(),
        style(&rule).cyan()
    );
}

pub fn print_section(title: &str) {
    println!("\n{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(SECTION_WIDTH)).dim());
}

/// `  label: value`, with the label dimmed.
pub fn print_result(label: &str, value: impl Display) {
    println!("  {} {value}", style(format!("{label}:")).dim());
}

pub fn print_success(message: &str) {
    println!("{} {message}", style("✓").green().bold());
}

pub fn print_info(message: &str) {
    println!("{} {message}", style("ℹ").blue());
}

/// Indent every line of `text` to sit under the current section.
pub fn print_block(text: &str) {
    text.lines().for_each(|line| println!("  {line}"));
}
