//! Clifford vs non-Clifford timing sweep.
//!
//! For each qubit count the sweep builds the stabilizer circuit and its
//! one-`t` variant, simulates both through a [`SimulatorSession`] and
//! records the wall-clock time of each submit/await span. With the
//! automatic simulation method the first runs on a stabilizer tableau and
//! the second on a dense statevector, so the two timing curves separate as
//! the register grows.
//!
//! Records are produced lazily by [`Sweep`]; rendering is a separate step.

use std::fmt::Write as _;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Instant;

use qsweep_hal::Counts;
use qsweep_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub use crate::circuits::clifford::{build_nonstabilizer_circuit, build_stabilizer_circuit};
use crate::error::{DemoError, DemoResult};
use crate::render::{self, Series};
use crate::runners::session::{SimulatorOptions, SimulatorSession};

/// Default shots per simulation.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Simulate `circuit` and time the submit/await span.
///
/// Returns the counts and the elapsed wall-clock seconds.
#[instrument(
    skip(session, circuit),
    fields(circuit = circuit.name(), qubits = circuit.num_qubits())
)]
pub fn simulate(
    session: &SimulatorSession,
    circuit: &Circuit,
    shots: u32,
) -> DemoResult<(Counts, f64)> {
    let start = Instant::now();
    let result = session.execute(circuit, shots)?;
    let elapsed = start.elapsed().as_secs_f64();
    Ok((result.counts, elapsed))
}

/// Timings and outcomes for one qubit count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecord {
    pub num_qubits: u32,
    pub stabilizer_secs: f64,
    pub nonstabilizer_secs: f64,
    pub stabilizer_counts: Counts,
    pub nonstabilizer_counts: Counts,
}

/// Lazy iterator over sweep records.
///
/// Each `next` builds and simulates both circuits for the next qubit count.
/// The first error is yielded and ends the iteration.
pub struct Sweep<'a> {
    session: &'a SimulatorSession,
    qubit_counts: std::vec::IntoIter<u32>,
    shots: u32,
    failed: bool,
}

impl Sweep<'_> {
    fn step(&self, num_qubits: u32) -> DemoResult<SweepRecord> {
        let stabilizer = build_stabilizer_circuit(num_qubits)?;
        let nonstabilizer = build_nonstabilizer_circuit(num_qubits)?;

        let (stabilizer_counts, stabilizer_secs) = simulate(self.session, &stabilizer, self.shots)?;
        let (nonstabilizer_counts, nonstabilizer_secs) =
            simulate(self.session, &nonstabilizer, self.shots)?;

        info!(num_qubits, stabilizer_secs, nonstabilizer_secs, "sweep step");
        Ok(SweepRecord {
            num_qubits,
            stabilizer_secs,
            nonstabilizer_secs,
            stabilizer_counts,
            nonstabilizer_counts,
        })
    }
}

impl Iterator for Sweep<'_> {
    type Item = DemoResult<SweepRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let num_qubits = self.qubit_counts.next()?;
        let record = self.step(num_qubits);
        self.failed = record.is_err();
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.qubit_counts.len()))
        }
    }
}

/// Sweep over `qubit_counts` in order, `shots` per simulation.
pub fn run_sweep(
    session: &SimulatorSession,
    qubit_counts: impl IntoIterator<Item = u32>,
    shots: u32,
) -> Sweep<'_> {
    Sweep {
        session,
        qubit_counts: qubit_counts.into_iter().collect::<Vec<_>>().into_iter(),
        shots,
        failed: false,
    }
}

/// All records of a finished sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepReport {
    pub records: Vec<SweepRecord>,
}

impl SweepReport {
    pub fn last(&self) -> Option<&SweepRecord> {
        self.records.last()
    }

    /// Ratio of non-stabilizer to stabilizer time at the largest qubit count.
    pub fn final_slowdown(&self) -> Option<f64> {
        self.last()
            .filter(|r| r.stabilizer_secs > 0.0)
            .map(|r| r.nonstabilizer_secs / r.stabilizer_secs)
    }
}

/// Drain a sweep, stopping at the first error.
pub fn collect_sweep(
    sweep: impl IntoIterator<Item = DemoResult<SweepRecord>>,
) -> DemoResult<SweepReport> {
    let records = sweep.into_iter().collect::<DemoResult<Vec<_>>>()?;
    Ok(SweepReport { records })
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Sweep settings, from CLI flags or a YAML file.
///
/// ```yaml
/// min_qubits: 2
/// max_qubits: 16
/// shots: 1024
/// simulator:
///   method: automatic
///   seed: 7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub min_qubits: u32,
    pub max_qubits: u32,
    pub shots: u32,
    pub simulator: SimulatorOptions,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_qubits: 2,
            max_qubits: 20,
            shots: DEFAULT_SHOTS,
            simulator: SimulatorOptions::default(),
        }
    }
}

impl SweepConfig {
    pub fn from_yaml(yaml: &str) -> DemoResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> DemoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn validate(&self) -> DemoResult<()> {
        if self.min_qubits < 2 {
            return Err(DemoError::TooFewQubits(self.min_qubits));
        }
        if self.min_qubits > self.max_qubits {
            return Err(DemoError::Config(format!(
                "min_qubits ({}) exceeds max_qubits ({})",
                self.min_qubits, self.max_qubits
            )));
        }
        if self.shots == 0 {
            return Err(DemoError::Config("shots must be at least 1".into()));
        }
        Ok(())
    }

    pub fn qubit_range(&self) -> RangeInclusive<u32> {
        self.min_qubits..=self.max_qubits
    }

    /// Simulator options with the qubit limit raised to cover the sweep.
    pub fn simulator_options(&self) -> SimulatorOptions {
        let mut options = self.simulator.clone();
        let limit = options.max_qubits.unwrap_or(0).max(self.max_qubits);
        options.max_qubits = Some(limit);
        options
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// One row per qubit count with both times and their ratio.
pub fn render_timing_table(records: &[SweepRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:>14}  {:>14}  {:>8}",
        "qubits", "clifford (s)", "non-cliff (s)", "ratio"
    );
    for r in records {
        let ratio = if r.stabilizer_secs > 0.0 {
            format!("{:.2}x", r.nonstabilizer_secs / r.stabilizer_secs)
        } else {
            "-".into()
        };
        let _ = writeln!(
            out,
            "{:>6}  {:>14.6}  {:>14.6}  {:>8}",
            r.num_qubits, r.stabilizer_secs, r.nonstabilizer_secs, ratio
        );
    }
    out
}

/// ASCII line chart of both timing series against the qubit count.
pub fn render_timing_chart(records: &[SweepRecord]) -> String {
    let series = [
        Series {
            label: "Clifford",
            marker: 'o',
            points: records
                .iter()
                .map(|r| (f64::from(r.num_qubits), r.stabilizer_secs))
                .collect(),
        },
        Series {
            label: "Non-Clifford",
            marker: '*',
            points: records
                .iter()
                .map(|r| (f64::from(r.num_qubits), r.nonstabilizer_secs))
                .collect(),
        },
    ];
    let mut chart = render::line_chart(&series, 60, 16, "Simulation time (s)");
    let _ = writeln!(chart, "{:>8}Number of qubits", "");
    chart
}

/// Side-by-side outcome histograms of each record.
pub fn render_histograms(records: &[SweepRecord]) -> String {
    let mut out = String::new();
    for r in records {
        let _ = writeln!(out, "Measurement results, {} qubits", r.num_qubits);
        out.push_str(&render::paired_histogram(
            ("clifford", &r.stabilizer_counts),
            ("non-clifford", &r.nonstabilizer_counts),
            40,
        ));
        out.push('\n');
    }
    out
}

/// Boxed timing summary of one record.
pub fn render_timing_summary(record: &SweepRecord) -> String {
    let lines = [
        format!("Clifford:     {:.6}s", record.stabilizer_secs),
        format!("Non-Clifford: {:.6}s", record.nonstabilizer_secs),
    ];
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = format!("┌{}┐\n", "─".repeat(width + 2));
    for line in &lines {
        let _ = writeln!(out, "│ {line:<width$} │");
    }
    let _ = writeln!(out, "└{}┘", "─".repeat(width + 2));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32, stab: f64, non: f64) -> SweepRecord {
        SweepRecord {
            num_qubits: n,
            stabilizer_secs: stab,
            nonstabilizer_secs: non,
            stabilizer_counts: Counts::from_pairs([("0".repeat(n as usize), 2)]),
            nonstabilizer_counts: Counts::from_pairs([("1".repeat(n as usize), 2)]),
        }
    }

    #[test]
    fn test_config_yaml() {
        let config = SweepConfig::from_yaml(
            "min_qubits: 3\nmax_qubits: 5\nsimulator:\n  method: statevector\n  seed: 4\n",
        )
        .unwrap();
        assert_eq!(config.qubit_range(), 3..=5);
        assert_eq!(config.shots, DEFAULT_SHOTS);
        assert_eq!(config.simulator.seed, Some(4));
        assert_eq!(config.simulator_options().max_qubits, Some(5));
    }

    #[test]
    fn test_config_rejects_bad_ranges() {
        assert!(matches!(
            SweepConfig::from_yaml("min_qubits: 1\n"),
            Err(DemoError::TooFewQubits(1))
        ));
        assert!(matches!(
            SweepConfig::from_yaml("min_qubits: 6\nmax_qubits: 4\n"),
            Err(DemoError::Config(_))
        ));
        assert!(matches!(
            SweepConfig::from_yaml("simulator:\n  method: tensor\n"),
            Err(DemoError::Yaml(_))
        ));
    }

    #[test]
    fn test_timing_table_rows() {
        let table = render_timing_table(&[record(2, 0.001, 0.002), record(3, 0.0, 0.004)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_end().ends_with("2.00x"));
        assert!(lines[2].trim_end().ends_with('-'));
    }

    #[test]
    fn test_final_slowdown() {
        let report = SweepReport {
            records: vec![record(2, 1.0, 1.0), record(3, 0.5, 2.0)],
        };
        assert_eq!(report.final_slowdown(), Some(4.0));
        assert_eq!(SweepReport::default().final_slowdown(), None);
    }

    #[test]
    fn test_render_histograms_and_summary() {
        let records = [record(2, 0.1, 0.2)];
        let text = render_histograms(&records);
        assert!(text.contains("2 qubits"));
        assert!(text.contains("00 clifford"));
        assert!(text.contains("11 non-clifford"));

        let summary = render_timing_summary(&records[0]);
        assert!(summary.contains("0.100000s"));
        assert_eq!(summary.lines().count(), 4);
    }

    #[test]
    fn test_chart_has_both_series() {
        let chart = render_timing_chart(&[record(2, 0.1, 0.2), record(4, 0.1, 0.8)]);
        assert!(chart.contains("o Clifford"));
        assert!(chart.contains("* Non-Clifford"));
    }
}
