//! Benchmarks for circuit construction and DAG queries.
//!
//! Run with: cargo bench -p qsweep-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsweep_ir::{Circuit, QubitId};

/// H, CX chain, S (and optionally T) on qubit 1, then measure_all.
fn chain_circuit(n: u32, with_t: bool) -> Circuit {
    let mut circuit = Circuit::with_size("chain", n, 0);
    circuit.h(QubitId(0)).unwrap();
    for i in 0..n - 1 {
        circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
    }
    circuit.s(QubitId(1)).unwrap();
    if with_t {
        circuit.t(QubitId(1)).unwrap();
    }
    circuit.measure_all().unwrap();
    circuit
}

fn bench_chain_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_construction");
    for n in [2_u32, 8, 32, 128] {
        group.bench_with_input(BenchmarkId::new("clifford", n), &n, |b, &n| {
            b.iter(|| black_box(chain_circuit(black_box(n), false)));
        });
        group.bench_with_input(BenchmarkId::new("non_clifford", n), &n, |b, &n| {
            b.iter(|| black_box(chain_circuit(black_box(n), true)));
        });
    }
    group.finish();
}

fn bench_dag_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("dag_queries");
    for n in [8_u32, 32, 128] {
        let circuit = chain_circuit(n, true);
        group.bench_with_input(BenchmarkId::new("depth", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.depth()));
        });
        group.bench_with_input(BenchmarkId::new("instructions", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.instructions()));
        });
        group.bench_with_input(BenchmarkId::new("draw", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.draw()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain_construction, bench_dag_queries);
criterion_main!(benches);
