//! Simulation time of the sweep circuits per method.
//!
//! Run with: cargo bench -p qsweep-demos

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use qsweep_adapter_sim::SimulationMethod;
use qsweep_demos::runners::sweep::{build_nonstabilizer_circuit, build_stabilizer_circuit};
use qsweep_demos::runners::{SimulatorOptions, SimulatorSession, simulate};

const SHOTS: u32 = 256;

fn seeded_session(method: SimulationMethod, max_qubits: u32) -> SimulatorSession {
    SimulatorSession::with_options(&SimulatorOptions {
        method,
        seed: Some(0),
        max_qubits: Some(max_qubits),
    })
    .unwrap()
}

fn bench_clifford(c: &mut Criterion) {
    let mut group = c.benchmark_group("clifford");

    for method in [SimulationMethod::Stabilizer, SimulationMethod::Statevector] {
        let session = seeded_session(method, 16);
        for n in [4u32, 8, 12, 16] {
            let circuit = build_stabilizer_circuit(n).unwrap();
            group.bench_with_input(BenchmarkId::new(method.as_str(), n), &circuit, |b, circuit| {
                b.iter(|| simulate(&session, black_box(circuit), SHOTS).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_non_clifford(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_clifford");
    let session = seeded_session(SimulationMethod::Automatic, 16);

    for n in [4u32, 8, 12, 16] {
        let circuit = build_nonstabilizer_circuit(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            b.iter(|| simulate(&session, black_box(circuit), SHOTS).unwrap());
        });
    }

    group.finish();
}

fn bench_stabilizer_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("stabilizer_scaling");
    group.sample_size(20);
    let session = seeded_session(SimulationMethod::Stabilizer, 128);

    for n in [32u32, 64, 128] {
        let circuit = build_stabilizer_circuit(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            b.iter(|| simulate(&session, black_box(circuit), 64).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clifford, bench_non_clifford, bench_stabilizer_scaling);
criterion_main!(benches);
