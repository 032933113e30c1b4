//! Simulator backend implementation.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use qsweep_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qsweep_ir::{Circuit, InstructionKind, StandardGate};
use qsweep_sim::Statevector;

use crate::stabilizer::Tableau;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// How the simulator represents the quantum state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMethod {
    /// Stabilizer for Clifford-only circuits, statevector otherwise.
    #[default]
    Automatic,
    /// Dense 2ⁿ amplitudes. Any gate.
    Statevector,
    /// Aaronson-Gottesman tableau. Clifford gates only.
    Stabilizer,
}

impl SimulationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Statevector => "statevector",
            Self::Stabilizer => "stabilizer",
        }
    }

    /// The concrete method used for `circuit`.
    pub fn resolve(self, circuit: &Circuit) -> Self {
        match self {
            Self::Automatic if circuit.is_clifford() => Self::Stabilizer,
            Self::Automatic => Self::Statevector,
            method => method,
        }
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationMethod {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "automatic" | "auto" => Ok(Self::Automatic),
            "statevector" => Ok(Self::Statevector),
            "stabilizer" | "clifford" => Ok(Self::Stabilizer),
            other => Err(HalError::Configuration(format!(
                "unknown simulation method '{other}'"
            ))),
        }
    }
}

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Jobs run to completion inside `submit`, so a subsequent `status` call
/// already reports a terminal state.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<JobId, SimJob>>>,
    max_qubits: u32,
    method: SimulationMethod,
    /// Draws one seed per job, so a seeded backend replays the same sequence.
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            SimulationMethod::Automatic,
            None,
        )
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            max_qubits,
            SimulationMethod::Automatic,
            None,
        )
    }

    #[must_use]
    pub fn with_method(mut self, method: SimulationMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn method(&self) -> SimulationMethod {
        self.method
    }

    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    fn build(
        config: BackendConfig,
        max_qubits: u32,
        method: SimulationMethod,
        seed: Option<u64>,
    ) -> Self {
        let mut capabilities = Capabilities::simulator(max_qubits);
        capabilities.name.clone_from(&config.name);
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
            method,
            rng: Mutex::new(rng),
            seed,
        }
    }

    /// Reasons `circuit` cannot run here, empty if it can.
    fn rejection_reasons(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = Vec::new();
        if circuit.num_qubits() > self.max_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            ));
        }
        if !circuit.instructions().iter().any(|inst| inst.is_measure()) {
            reasons.push("circuit has no measurements".into());
        }
        if self.method == SimulationMethod::Stabilizer && !circuit.is_clifford() {
            reasons.push("stabilizer method requires a Clifford-only circuit".into());
        }
        reasons
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit, rng), fields(qubits = circuit.num_qubits()))]
    fn run_simulation(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut StdRng,
    ) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        let program = Program::compile(circuit);
        let method = self.method.resolve(circuit);
        let terminal = circuit.has_terminal_measurements_only() && !program.has_reset();
        debug!(
            %method,
            terminal,
            ops = program.ops.len(),
            "starting simulation"
        );

        let counts = match method {
            SimulationMethod::Stabilizer => {
                program.run(Tableau::new(circuit.num_qubits()), shots, terminal, rng)?
            }
            _ => program.run(Statevector::new(circuit.num_qubits()), shots, terminal, rng)?,
        };

        let elapsed = start.elapsed();
        debug!(?elapsed, outcomes = counts.len(), "simulation completed");

        let metadata = serde_json::json!({
            "method": method.as_str(),
            "seed": self.seed,
            "terminal_measurements": terminal,
        });
        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .with_metadata(metadata))
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<JobId, SimJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let reasons = self.rejection_reasons(circuit);
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        let max_shots = self.capabilities.max_shots;
        if !(1..=max_shots).contains(&shots) {
            return Err(HalError::InvalidShots {
                shots,
                max: max_shots,
            });
        }
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge {
                qubits: circuit.num_qubits(),
                max: self.max_qubits,
            });
        }
        let reasons = self.rejection_reasons(circuit);
        if !reasons.is_empty() {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots);
        self.lock_jobs()
            .insert(job_id.clone(), SimJob { job, result: None });
        debug!(job = %job_id, "submitted job");

        let job_seed: u64 = self.rng.lock().unwrap_or_else(PoisonError::into_inner).r#gen();
        let mut rng = StdRng::seed_from_u64(job_seed);

        if let Some(sim_job) = self.lock_jobs().get_mut(&job_id) {
            sim_job.job.transition(JobStatus::Running);
        }
        let outcome = self.run_simulation(circuit, shots, &mut rng);

        let mut jobs = self.lock_jobs();
        if let Some(sim_job) = jobs.get_mut(&job_id) {
            match outcome {
                Ok(result) => {
                    sim_job.result = Some(result);
                    sim_job.job.transition(JobStatus::Completed);
                }
                Err(e) => {
                    warn!(job = %job_id, error = %e, "simulation failed");
                    sim_job.job.transition(JobStatus::Failed(e.to_string()));
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(job_id)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::UnknownJob(job_id.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.lock_jobs();
        let sim_job = jobs
            .get(job_id)
            .ok_or_else(|| HalError::UnknownJob(job_id.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::ResultUnavailable {
                job: job_id.clone(),
                status: status.to_string(),
            }),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.lock_jobs();
        let sim_job = jobs
            .get_mut(job_id)
            .ok_or_else(|| HalError::UnknownJob(job_id.clone()))?;
        sim_job.job.transition(JobStatus::Cancelled);
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    /// Reads the `max_qubits`, `max_shots`, `method` and `seed` options.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = option_u32(&config, "max_qubits")?.unwrap_or(DEFAULT_MAX_QUBITS);
        let max_shots = option_u32(&config, "max_shots")?;
        let method = config
            .option_str("method")?
            .map(SimulationMethod::from_str)
            .transpose()?
            .unwrap_or_default();
        let seed = config.option_u64("seed")?;

        let mut backend = Self::build(config, max_qubits, method, seed);
        if !backend.capabilities.supports_method(method.as_str()) {
            return Err(HalError::Configuration(format!(
                "method {method} is not offered by {}",
                backend.capabilities.name
            )));
        }
        if let Some(max_shots) = max_shots {
            if max_shots == 0 {
                return Err(HalError::Configuration("max_shots must be at least 1".into()));
            }
            backend.capabilities.max_shots = max_shots;
        }
        Ok(backend)
    }
}

fn option_u32(config: &BackendConfig, key: &str) -> HalResult<Option<u32>> {
    config
        .option_u64(key)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| HalError::Configuration(format!("{key} {v} is too large")))
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// Shot execution
// ---------------------------------------------------------------------------

/// A quantum state the shot loop can drive.
trait ShotState: Clone {
    fn apply(&mut self, gate: &StandardGate, qubits: &[usize]) -> HalResult<()>;
    fn measure(&mut self, qubit: usize, rng: &mut StdRng) -> bool;
    fn reset(&mut self, qubit: usize, rng: &mut StdRng);

    /// Sample terminal measurements of this (already evolved) state.
    fn sample_terminal(
        &self,
        measured: &[(usize, usize)],
        num_clbits: usize,
        shots: u32,
        rng: &mut StdRng,
    ) -> Counts {
        let mut counts = Counts::new();
        for _ in 0..shots {
            let mut state = self.clone();
            let mut clbits = vec![false; num_clbits];
            for &(q, c) in measured {
                clbits[c] = state.measure(q, rng);
            }
            counts.insert(bitstring(&clbits), 1);
        }
        counts
    }
}

impl ShotState for Statevector {
    fn apply(&mut self, gate: &StandardGate, qubits: &[usize]) -> HalResult<()> {
        self.apply_gate(gate, qubits);
        Ok(())
    }

    fn measure(&mut self, qubit: usize, rng: &mut StdRng) -> bool {
        Statevector::measure(self, qubit, rng)
    }

    fn reset(&mut self, qubit: usize, rng: &mut StdRng) {
        Statevector::reset(self, qubit, rng);
    }

    /// Born-rule sampling of the whole register at once.
    fn sample_terminal(
        &self,
        measured: &[(usize, usize)],
        num_clbits: usize,
        shots: u32,
        rng: &mut StdRng,
    ) -> Counts {
        let mut counts = Counts::new();
        let mut clbits = vec![false; num_clbits];
        for index in self.sample_many(shots as usize, rng) {
            for &(q, c) in measured {
                clbits[c] = (index >> q) & 1 == 1;
            }
            counts.insert(bitstring(&clbits), 1);
        }
        counts
    }
}

impl ShotState for Tableau {
    fn apply(&mut self, gate: &StandardGate, qubits: &[usize]) -> HalResult<()> {
        if self.apply_gate(gate, qubits) {
            Ok(())
        } else {
            Err(HalError::InvalidCircuit(format!(
                "gate '{}' is not supported by the stabilizer method",
                gate.name()
            )))
        }
    }

    fn measure(&mut self, qubit: usize, rng: &mut StdRng) -> bool {
        Tableau::measure(self, qubit, rng)
    }

    fn reset(&mut self, qubit: usize, rng: &mut StdRng) {
        Tableau::reset(self, qubit, rng);
    }
}

enum Op {
    Gate(StandardGate, Vec<usize>),
    /// (qubit, clbit) pairs.
    Measure(Vec<(usize, usize)>),
    Reset(usize),
}

/// A circuit flattened to index form.
struct Program {
    ops: Vec<Op>,
    num_clbits: usize,
}

impl Program {
    fn compile(circuit: &Circuit) -> Self {
        let ops = circuit
            .instructions()
            .into_iter()
            .filter_map(|inst| {
                let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
                match inst.kind {
                    InstructionKind::Gate(gate) => Some(Op::Gate(gate, qubits)),
                    InstructionKind::Measure => Some(Op::Measure(
                        qubits
                            .into_iter()
                            .zip(inst.clbits.iter().map(|c| c.0 as usize))
                            .collect(),
                    )),
                    InstructionKind::Reset => Some(Op::Reset(qubits[0])),
                    InstructionKind::Barrier => None,
                }
            })
            .collect();
        Self {
            ops,
            num_clbits: circuit.num_clbits(),
        }
    }

    fn has_reset(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, Op::Reset(_)))
    }

    /// With `terminal` set, the unitary prefix is evolved once and sampled;
    /// otherwise every shot replays the whole program.
    fn run<S: ShotState>(
        &self,
        initial: S,
        shots: u32,
        terminal: bool,
        rng: &mut StdRng,
    ) -> HalResult<Counts> {
        if terminal {
            let mut state = initial;
            let mut measured = Vec::new();
            for op in &self.ops {
                match op {
                    Op::Gate(gate, qubits) => state.apply(gate, qubits)?,
                    Op::Measure(pairs) => measured.extend_from_slice(pairs),
                    Op::Reset(_) => {}
                }
            }
            return Ok(state.sample_terminal(&measured, self.num_clbits, shots, rng));
        }

        let mut counts = Counts::new();
        for _ in 0..shots {
            let mut state = initial.clone();
            let mut clbits = vec![false; self.num_clbits];
            for op in &self.ops {
                match op {
                    Op::Gate(gate, qubits) => state.apply(gate, qubits)?,
                    Op::Measure(pairs) => {
                        for &(q, c) in pairs {
                            clbits[c] = state.measure(q, rng);
                        }
                    }
                    Op::Reset(q) => state.reset(*q, rng),
                }
            }
            counts.insert(bitstring(&clbits), 1);
        }
        Ok(counts)
    }
}

/// Classical bits as a bitstring with clbit 0 rightmost.
fn bitstring(clbits: &[bool]) -> String {
    clbits
        .iter()
        .rev()
        .map(|&bit| if bit { '1' } else { '0' })
        .collect()
}
