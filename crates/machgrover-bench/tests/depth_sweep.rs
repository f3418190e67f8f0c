//! End-to-end depth sweeps driven by configuration files.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use machgrover_bench::{
    BenchError, DepthBenchConfig, DepthReport, benchmark_diffuser, benchmark_grover,
};
use machgrover_ir::McxMode;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `contents` to a per-test file in the system temp directory.
fn temp_config(name: &str, contents: &str) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!(
        "machgrover-bench-{}-{name}",
        std::process::id()
    ));
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn default_sweeps_are_monotonic() -> Result<()> {
    init_tracing();
    let config = DepthBenchConfig::default();

    let diffuser = benchmark_diffuser(&config)?;
    ensure!(diffuser.records.len() == 4);
    ensure!(diffuser.is_depth_monotonic());
    ensure!(diffuser.is_decomposed_depth_monotonic());
    for r in &diffuser.records {
        ensure!(r.num_qubits_reported == r.n_qubits as usize);
        ensure!(r.depth == 7, "diffuser_{}q has depth {}", r.n_qubits, r.depth);
        ensure!(r.decomposed_depth > r.depth);
    }

    let grover = benchmark_grover(&config)?;
    ensure!(grover.skipped.is_empty(), "{grover}");
    ensure!(grover.is_depth_monotonic());
    ensure!(grover.is_decomposed_depth_monotonic());
    for r in &grover.records {
        ensure!(r.num_qubits_reported == r.n_qubits as usize + 1);
    }
    Ok(())
}

#[test]
fn yaml_config_file_drives_the_sweep() -> Result<()> {
    let path = temp_config(
        "vchain.yaml",
        "qubit_counts: [3, 5]\noracle_ancillas: 4\nmcx_mode: v_chain\noptimization_level: 2\n",
    )?;
    let config = DepthBenchConfig::from_file(&path)?;
    std::fs::remove_file(&path)?;
    ensure!(config.mcx_mode == McxMode::VChain);
    ensure!(config.iterations == 1);

    let report = benchmark_grover(&config)?;
    ensure!(report.optimization_level == 2);
    let r5 = report.record(5).context("n = 5 measured")?;
    ensure!(r5.num_qubits_reported == 9);
    ensure!(report.skipped.is_empty());
    Ok(())
}

#[test]
fn json_config_file_drives_the_sweep() -> Result<()> {
    let path = temp_config(
        "iters.json",
        r#"{"qubit_counts": [2, 3, 4], "iterations": 2, "key_seed": 9}"#,
    )?;
    let config = DepthBenchConfig::from_file(&path)?;
    std::fs::remove_file(&path)?;
    ensure!(config.key_seed == Some(9));

    // Same seed, same keys, same circuits.
    let a = benchmark_grover(&config)?;
    let b = benchmark_grover(&config)?;
    ensure!(a.records == b.records);

    let one = benchmark_grover(&DepthBenchConfig {
        iterations: 1,
        ..config
    })?;
    for (two, one) in a.records.iter().zip(&one.records) {
        ensure!(two.depth > one.depth);
        ensure!(two.num_ops > one.num_ops);
    }
    Ok(())
}

#[test]
fn missing_config_file_is_an_io_error() {
    let result = DepthBenchConfig::from_file("/nonexistent/machgrover/bench.yaml");
    assert!(matches!(result, Err(BenchError::Io(_))));
}

#[test]
fn report_survives_json() -> Result<()> {
    let config = DepthBenchConfig {
        qubit_counts: vec![0, 3, 4],
        ..Default::default()
    };
    let report = benchmark_diffuser(&config)?;
    let back = DepthReport::from_json(&report.to_json()?)?;
    ensure!(back.records == report.records);
    ensure!(back.skipped == report.skipped);
    ensure!(back.name == "diffuser");
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sorted_sizes_give_monotonic_diffuser_depth(
        mut counts in prop::collection::vec(1u32..=7, 1..6),
        level in 0u8..=2,
    ) {
        counts.sort_unstable();
        let config = DepthBenchConfig {
            qubit_counts: counts,
            optimization_level: level,
            ..Default::default()
        };
        let report = benchmark_diffuser(&config).unwrap();
        prop_assert!(report.is_depth_monotonic());
        prop_assert!(report.is_decomposed_depth_monotonic());
    }
}
