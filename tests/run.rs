use std::io::Write;

use twill::{data, Builder, Kernel, RunConfig, RunMode};
use twill_utils::Matrix;

fn scalar_matrix(values: &[f64]) -> Matrix<f64> {
    Matrix::from_vecs(values.iter().map(|&x| vec![x]).collect())
}

fn two_triples() -> Matrix<f64> {
    scalar_matrix(&[0.0, 0.1, 0.2, 10.0, 10.1, 10.2])
}

fn separates_the_triples(asgn: &[usize]) -> bool {
    asgn[0] == asgn[1]
        && asgn[1] == asgn[2]
        && asgn[3] == asgn[4]
        && asgn[4] == asgn[5]
        && asgn[0] != asgn[3]
}

#[test]
fn two_well_separated_triples_are_recovered() {
    // the run is stochastic, so assert over a majority of seeds
    let n_hits = (0..10_u64)
        .filter(|&seed| {
            let mut engine = Builder::new(two_triples())
                .with_alpha(1.0)
                .with_seed(seed)
                .with_config(RunConfig {
                    n_sweeps: 100,
                    ..RunConfig::default()
                })
                .build()
                .unwrap();
            engine.run().unwrap();
            let (best, _) = engine.best_sample().unwrap();
            separates_the_triples(best)
        })
        .count();

    assert!(n_hits >= 7, "only {n_hits}/10 seeds recovered the triples");
}

#[test]
fn single_observation_terminates_with_one_singleton() {
    let mut engine = Builder::new(scalar_matrix(&[3.2]))
        .with_seed(0)
        .with_config(RunConfig {
            n_sweeps: 50,
            ..RunConfig::default()
        })
        .build()
        .unwrap();

    let summary = engine.run().unwrap();
    assert_eq!(summary.cluster_counts.len(), 1);
    assert_eq!(summary.cluster_counts[0].1, 1);
}

#[test]
fn partition_counts_always_cover_all_observations() {
    let mut engine = Builder::new(two_triples())
        .with_seed(5)
        .with_config(RunConfig {
            n_sweeps: 25,
            record_best: false,
            ..RunConfig::default()
        })
        .build()
        .unwrap();

    let summary = engine.run().unwrap();
    let n: usize = summary.cluster_counts.iter().map(|(_, ct)| ct).sum();
    assert_eq!(n, 6);
}

#[test]
fn host_and_loopy_strategies_agree_for_a_shared_seed() {
    let init = vec![0, 1, 0, 1, 0, 1];
    let config = RunConfig {
        n_sweeps: 20,
        record_best: false,
        ..RunConfig::default()
    };

    let mut host = Builder::new(two_triples())
        .with_seed(42)
        .with_init_labels(init.clone())
        .with_config(config)
        .build()
        .unwrap();
    host.run().unwrap();

    let mut loopy = Builder::new(two_triples())
        .with_seed(42)
        .with_init_labels(init)
        .with_kernel(Kernel::Loopy)
        .with_config(config)
        .build()
        .unwrap();
    loopy.run().unwrap();

    assert_eq!(host.asgn(), loopy.asgn());
}

#[test]
fn host_and_accelerated_strategies_agree_for_a_shared_seed() {
    let init = vec![3, 3, 1, 1, 0, 0];
    let config = RunConfig {
        n_sweeps: 20,
        record_best: false,
        ..RunConfig::default()
    };

    let mut host = Builder::new(two_triples())
        .with_seed(7)
        .with_init_labels(init.clone())
        .with_config(config)
        .build()
        .unwrap();
    host.run().unwrap();

    // the device picks whichever kernel it prefers
    let mut accel = Builder::new(two_triples())
        .with_seed(7)
        .with_init_labels(init)
        .with_mode(RunMode::Accelerated)
        .with_config(config)
        .build()
        .unwrap();
    accel.run().unwrap();

    assert_eq!(host.asgn(), accel.asgn());
}

#[test]
fn vector_strategies_agree_for_a_shared_seed() {
    let data = Matrix::from_vecs(vec![
        vec![0.0, 0.0],
        vec![0.1, -0.1],
        vec![8.0, 8.0],
        vec![8.1, 7.9],
    ]);
    let config = RunConfig {
        n_sweeps: 15,
        record_best: false,
        ..RunConfig::default()
    };

    let mut host = Builder::new(data.clone())
        .with_seed(11)
        .with_init_labels(vec![0, 1, 2, 3])
        .with_config(config)
        .build()
        .unwrap();
    host.run().unwrap();

    let mut loopy = Builder::new(data)
        .with_seed(11)
        .with_init_labels(vec![0, 1, 2, 3])
        .with_kernel(Kernel::Loopy)
        .with_config(config)
        .build()
        .unwrap();
    loopy.run().unwrap();

    assert_eq!(host.asgn(), loopy.asgn());
}

#[test]
fn vector_clusters_are_recovered_without_best_tracking() {
    let rows: Vec<Vec<f64>> = vec![
        vec![0.0, 0.0],
        vec![0.1, 0.1],
        vec![-0.1, 0.1],
        vec![10.0, 10.0],
        vec![10.1, 9.9],
        vec![9.9, 10.1],
    ];

    let n_hits = (0..10_u64)
        .filter(|&seed| {
            let mut engine = Builder::new(Matrix::from_vecs(rows.clone()))
                .with_seed(seed)
                .with_config(RunConfig {
                    n_sweeps: 50,
                    record_best: false,
                    ..RunConfig::default()
                })
                .build()
                .unwrap();
            engine.run().unwrap();
            separates_the_triples(engine.asgn())
        })
        .count();

    assert!(n_hits >= 7, "only {n_hits}/10 seeds recovered the clusters");
}

#[test]
fn trace_without_best_tracking_keeps_every_post_burnin_sweep() {
    let mut engine = Builder::new(two_triples())
        .with_seed(3)
        .with_config(RunConfig {
            n_sweeps: 10,
            burnin: 4,
            record_best: false,
            ..RunConfig::default()
        })
        .build()
        .unwrap();

    let mut buf: Vec<u8> = Vec::new();
    engine.run_with_trace(&mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // header plus one row per retained sweep
    assert_eq!(lines.len(), 1 + (10 - 4));
    assert_eq!(lines[0], "0,1,2,3,4,5");
    for row in &lines[1..] {
        assert_eq!(row.split(',').count(), 6);
    }
}

#[test]
fn trace_with_best_tracking_keeps_only_the_final_best_row() {
    let mut engine = Builder::new(two_triples())
        .with_seed(3)
        .with_config(RunConfig {
            n_sweeps: 30,
            ..RunConfig::default()
        })
        .build()
        .unwrap();

    let mut buf: Vec<u8> = Vec::new();
    engine.run_with_trace(&mut buf).unwrap();

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);

    let (best, _) = engine.best_sample().unwrap();
    let best_row: Vec<String> =
        best.iter().map(|z| z.to_string()).collect();
    assert_eq!(lines[1], best_row.join(","));
}

#[test]
fn csv_round_trip_through_the_engine() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "x").unwrap();
    for x in [0.0, 0.05, 0.1, 20.0, 20.05, 20.1] {
        writeln!(csv, "{x}").unwrap();
    }
    csv.flush().unwrap();

    let data = data::read_csv(csv.path(), true).unwrap();
    assert_eq!(data.n_rows(), 6);
    assert_eq!(data.n_cols(), 1);

    let mut engine = Builder::new(data)
        .with_seed(17)
        .with_config(RunConfig {
            n_sweeps: 50,
            ..RunConfig::default()
        })
        .build()
        .unwrap();
    let summary = engine.run().unwrap();

    let n: usize = summary.cluster_counts.iter().map(|(_, ct)| ct).sum();
    assert_eq!(n, 6);
    assert!(summary.total_time > std::time::Duration::ZERO);
}

#[test]
fn accelerated_runs_report_device_time() {
    let mut engine = Builder::new(two_triples())
        .with_seed(23)
        .with_kernel(Kernel::Loopy)
        .with_config(RunConfig {
            n_sweeps: 10,
            record_best: false,
            ..RunConfig::default()
        })
        .build()
        .unwrap();

    let summary = engine.run().unwrap();
    assert!(summary.accel_time > std::time::Duration::ZERO);
    assert!(summary.accel_time <= summary.total_time);
}
