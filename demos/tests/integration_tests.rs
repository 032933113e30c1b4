//! End-to-end tests for the sweep, the transpilation targets and the
//! variational chemistry runners, all against the local simulator.

use proptest::prelude::*;

use qsweep_adapter_sim::SimulationMethod;
use qsweep_compile::transpile;
use qsweep_demos::DemoError;
use qsweep_demos::circuits::{
    NUM_UCCSD_PARAMS, bell_measured, hadamard_sample, long_range_cx, uccsd_ansatz,
};
use qsweep_demos::optimizers::Slsqp;
use qsweep_demos::problems::h2_sto3g;
use qsweep_demos::runners::sweep::{build_nonstabilizer_circuit, build_stabilizer_circuit};
use qsweep_demos::runners::{
    ExcitedStatesSolver, SimulatorOptions, SimulatorSession, VqeRunner, collect_sweep,
    render_timing_table, run_sweep, simulate,
};
use qsweep_demos::target::{coupling_map, transpile_options_for};
use qsweep_hal::Backend;

fn seeded_session(seed: u64) -> SimulatorSession {
    SimulatorSession::with_options(&SimulatorOptions {
        seed: Some(seed),
        ..SimulatorOptions::default()
    })
    .unwrap()
}

#[test]
fn test_small_sweep_records() {
    let session = seeded_session(1);
    let report = collect_sweep(run_sweep(&session, [2, 3, 4], 1024)).unwrap();

    assert_eq!(report.records.len(), 3);
    for (record, n) in report.records.iter().zip([2u32, 3, 4]) {
        assert_eq!(record.num_qubits, n);
        assert!(record.stabilizer_secs >= 0.0);
        assert!(record.nonstabilizer_secs >= 0.0);
        for counts in [&record.stabilizer_counts, &record.nonstabilizer_counts] {
            assert_eq!(counts.total_shots(), 1024);
            assert!(counts.iter().all(|(k, _)| k.len() == n as usize));
        }
    }

    let table = render_timing_table(&report.records);
    assert_eq!(table.lines().count(), 4);
}

#[test]
fn test_sweep_stops_at_first_error() {
    let session = seeded_session(2);
    let mut sweep = run_sweep(&session, [2, 1, 3], 16);

    assert!(sweep.next().unwrap().is_ok());
    assert!(matches!(
        sweep.next(),
        Some(Err(DemoError::TooFewQubits(1)))
    ));
    assert!(sweep.next().is_none());

    let err = collect_sweep(run_sweep(&session, [1], 16)).unwrap_err();
    assert!(matches!(err, DemoError::TooFewQubits(1)));
}

#[test]
fn test_clifford_pair_outcomes() {
    // H on 0 plus a CX chain: all zeros or all ones, whatever the phases.
    let session = seeded_session(3);
    for circuit in [
        build_stabilizer_circuit(5).unwrap(),
        build_nonstabilizer_circuit(5).unwrap(),
    ] {
        let (counts, _) = simulate(&session, &circuit, 2000).unwrap();
        assert_eq!(counts.total_shots(), 2000);
        assert_eq!(counts.get("00000") + counts.get("11111"), 2000);
        assert!(counts.get("00000") > 800);
        assert!(counts.get("11111") > 800);
    }
}

#[test]
fn test_single_qubit_sampling() {
    let session = seeded_session(4);
    let circuit = transpile(
        &hadamard_sample().unwrap(),
        &transpile_options_for(session.backend().capabilities()),
    )
    .unwrap();

    let result = session.execute(&circuit, 100_000).unwrap();
    let counts = &result.counts;
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get("0") + counts.get("1"), 100_000);
    assert!((counts.get("0") as i64 - 50_000).abs() < 2_000);
}

#[test]
fn test_transpiled_bell_runs() {
    let session = seeded_session(5);
    let circuit = transpile(
        &bell_measured().unwrap(),
        &transpile_options_for(session.backend().capabilities()),
    )
    .unwrap();

    let result = session.execute(&circuit, 1000).unwrap();
    assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
}

#[test]
fn test_routed_circuit_simulates() {
    let routed = transpile(
        &long_range_cx(3).unwrap(),
        &qsweep_compile::TranspileOptions::new()
            .with_coupling_map(coupling_map(&[[0, 1], [1, 2]]))
            .with_optimization_level(0),
    )
    .unwrap();
    assert!(routed.gate_names().contains(&"swap"));

    // cx on |000⟩ is the identity, with or without SWAPs.
    let session = seeded_session(6);
    let result = session.execute(&routed, 100).unwrap();
    assert_eq!(result.counts.get("000"), 100);
}

#[test]
fn test_statevector_method_matches_stabilizer() {
    let circuit = build_stabilizer_circuit(4).unwrap();
    for method in [SimulationMethod::Statevector, SimulationMethod::Stabilizer] {
        let session = SimulatorSession::with_options(&SimulatorOptions {
            method,
            seed: Some(7),
            ..SimulatorOptions::default()
        })
        .unwrap();
        let (counts, _) = simulate(&session, &circuit, 500).unwrap();
        assert_eq!(counts.get("0000") + counts.get("1111"), 500, "{method}");
    }
}

#[test]
fn test_h2_vqe_ground_state() {
    let problem = h2_sto3g().unwrap();
    let runner = VqeRunner::new(
        problem.hamiltonian.clone(),
        uccsd_ansatz,
        Slsqp::new(),
        vec![0.0; NUM_UCCSD_PARAMS],
    );
    let result = runner.run().unwrap();
    let total = problem.total_energy(result.energy);
    assert!((total - (-1.137_306_035_753_4)).abs() < 1e-5);
}

#[test]
fn test_h2_excited_spectrum() {
    let result = ExcitedStatesSolver::new(h2_sto3g().unwrap())
        .solve()
        .unwrap();
    let expected = [
        -1.137_306_035_753_4,
        -0.524_615_555_364_346,
        -0.162_753_155_795_883,
        0.495_057_741_618_113,
    ];

    assert_eq!(result.levels.len(), expected.len());
    for (level, e) in result.levels.iter().zip(expected) {
        assert!((level.total_energy - e).abs() < 1e-5, "E{}", level.index);
    }
    assert!(result.excited().iter().all(|l| l.excitation_energy > 0.0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_counts_cover_every_shot(n in 2u32..7, shots in 1u32..300, seed in any::<u64>()) {
        let session = seeded_session(seed);
        for circuit in [
            build_stabilizer_circuit(n).unwrap(),
            build_nonstabilizer_circuit(n).unwrap(),
        ] {
            let (counts, secs) = simulate(&session, &circuit, shots).unwrap();
            prop_assert!(secs >= 0.0);
            prop_assert_eq!(counts.total_shots(), u64::from(shots));
            prop_assert!(counts.iter().all(|(k, _)| k.len() == n as usize));
        }
    }
}
