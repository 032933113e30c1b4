//! Demo runners.

pub mod excited;
pub mod session;
pub mod sweep;
pub mod vqe;

pub use excited::{EnergyLevel, ExcitedStatesResult, ExcitedStatesSolver};
pub use session::{SimulatorOptions, SimulatorSession};
pub use sweep::{
    Sweep, SweepConfig, SweepRecord, SweepReport, collect_sweep, render_histograms,
    render_timing_chart, render_timing_summary, render_timing_table, run_sweep, simulate,
};
pub use vqe::{VqeResult, VqeRunner};
