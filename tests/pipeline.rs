//! End-to-end runs over files on disk.

use std::fs;
use std::path::Path;

use snpclust::{run, ClusterError, ClusterOptions, InputFormat, RunConfig};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn config(input: &Path, format: InputFormat, dir: &Path, options: ClusterOptions) -> RunConfig {
    RunConfig {
        input: input.to_path_buf(),
        input_format: format,
        matrix_output: Some(dir.join("matrix.csv")),
        output: dir.join("clusters.csv"),
        options,
    }
}

#[test]
fn test_sparse_input_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "pairs.distances.tsv",
        "Sample 1\tSample 2\tMash-like distance\tSNPs\n\
         S1\tS2\t0.01\t3\n\
         S1\tS3\t0.01\t4\n\
         S2\tS3\t0.01\t2\n\
         S1\tS4\t0.2\t90\n\
         S2\tS4\t0.2\t95\n\
         S3\tS4\t0.2\t91\n",
    );
    let cfg = config(&input, InputFormat::SparseEdges, dir.path(), ClusterOptions::default());

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.n_samples, 4);
    assert_eq!(summary.n_clusters, 1);
    assert_eq!(summary.n_clustered, 3);

    let clusters = fs::read_to_string(dir.path().join("clusters.csv")).unwrap();
    assert_eq!(clusters, "Sample,Cluster\nS1,A\nS2,A\nS3,A\n");

    let matrix = fs::read_to_string(dir.path().join("matrix.csv")).unwrap();
    assert!(matrix.starts_with(",S1,S2,S3,S4\n"));
    assert!(matrix.contains("S4,90.0,95.0,91.0,0.0\n"));
}

#[test]
fn test_written_matrix_reclusters_identically() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "pairs.tsv",
        "Sample 1\tSample 2\tSNPs\n\
         a\tb\t1\n\
         a\tc\t30\n\
         b\tc\t30\n\
         a\td\t30\n\
         b\td\t30\n\
         c\td\t2\n",
    );
    let options = ClusterOptions::new("complete", 10.0).unwrap();
    let sparse = config(&input, InputFormat::SparseEdges, dir.path(), options.clone());
    run(&sparse).unwrap();
    let first = fs::read_to_string(dir.path().join("clusters.csv")).unwrap();
    assert_eq!(first, "Sample,Cluster\na,A\nb,A\nc,B\nd,B\n");

    let dense_out = dir.path().join("clusters_dense.csv");
    let dense = RunConfig {
        input: dir.path().join("matrix.csv"),
        input_format: InputFormat::DenseMatrix,
        matrix_output: None,
        output: dense_out.clone(),
        options,
    };
    let summary = run(&dense).unwrap();
    assert_eq!(summary.matrix_output, None);
    assert_eq!(fs::read_to_string(dense_out).unwrap(), first);
}

#[test]
fn test_no_clusters_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "m.csv", ",x,y\nx,0,50\ny,50,0\n");
    let cfg = config(&input, InputFormat::DenseMatrix, dir.path(), ClusterOptions::default());

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.n_clusters, 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("clusters.csv")).unwrap(),
        "Sample,Cluster\n"
    );
    assert!(!dir.path().join("matrix.csv").exists());
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "bad.tsv",
        "Sample 1\tSample 2\tSNPs\nS1\tS2\t4\nS2\tS3\tmany\n",
    );
    let cfg = config(&input, InputFormat::SparseEdges, dir.path(), ClusterOptions::default());

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, ClusterError::MalformedInput { .. }));
    assert!(!dir.path().join("clusters.csv").exists());
    assert!(!dir.path().join("matrix.csv").exists());
}

#[test]
fn test_unwritable_output_leaves_no_matrix_behind() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "pairs.tsv",
        "Sample 1\tSample 2\tSNPs\nS1\tS2\t4\nS2\tS3\t5\nS1\tS3\t6\n",
    );
    let mut cfg = config(&input, InputFormat::SparseEdges, dir.path(), ClusterOptions::default());
    cfg.output = dir.path().join("no_such_dir").join("clusters.csv");

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, ClusterError::Io { .. }));
    assert!(!dir.path().join("matrix.csv").exists());
    assert!(!cfg.output.exists());
}

#[test]
fn test_missing_columns_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "bad.tsv", "Sample 1\tSample 2\n S1\tS2\n");
    let cfg = config(&input, InputFormat::SparseEdges, dir.path(), ClusterOptions::default());
    assert!(matches!(
        run(&cfg),
        Err(ClusterError::MalformedInput { .. })
    ));
}

#[test]
fn test_missing_input_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let cfg = config(
        &dir.path().join("absent.csv"),
        InputFormat::DenseMatrix,
        dir.path(),
        ClusterOptions::default(),
    );
    assert!(matches!(run(&cfg), Err(ClusterError::Io { .. })));
}

#[test]
fn test_twenty_seven_clusters_reach_aa() {
    let dir = TempDir::new().unwrap();
    let mut tsv = String::from("Sample 1\tSample 2\tSNPs\n");
    let names: Vec<String> = (0..54).map(|i| format!("s{i:02}")).collect();
    for i in 0..names.len() {
        for j in i + 1..names.len() {
            let d = if i / 2 == j / 2 { 1 } else { 500 };
            tsv.push_str(&format!("{}\t{}\t{}\n", names[i], names[j], d));
        }
    }
    let input = write(dir.path(), "pairs.tsv", &tsv);
    let cfg = config(&input, InputFormat::SparseEdges, dir.path(), ClusterOptions::default());

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.n_clusters, 27);
    assert_eq!(summary.n_clustered, 54);

    let out = fs::read_to_string(dir.path().join("clusters.csv")).unwrap();
    let labels: std::collections::BTreeSet<&str> = out
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap())
        .collect();
    assert_eq!(labels.len(), 27);
    assert!(labels.contains("Z"));
    assert!(labels.contains("AA"));
}
