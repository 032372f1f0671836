//! End-to-end run: read input, build or load the matrix, cluster, write.
//!
//! Nothing is written until clustering has succeeded, and the output files
//! are committed together: a failed run leaves no output behind.

use std::path::PathBuf;

use crate::error::ClusterResult;
use crate::extract::{ClusterExtractor, ClusterOptions};
use crate::io::{self, StagedFile};
use crate::matrix::DistanceMatrix;

/// Default path of the dense matrix written in sparse-input mode.
pub const DEFAULT_MATRIX_OUTPUT: &str = "matrix.csv";

/// Shape of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Tab-separated "Sample 1" / "Sample 2" / "SNPs" edge list.
    SparseEdges,
    /// Comma-separated dense matrix.
    #[default]
    DenseMatrix,
}

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub input_format: InputFormat,
    /// Where the built matrix goes in sparse mode. Ignored for dense input.
    pub matrix_output: Option<PathBuf>,
    pub output: PathBuf,
    pub options: ClusterOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            input_format: InputFormat::default(),
            matrix_output: Some(PathBuf::from(DEFAULT_MATRIX_OUTPUT)),
            output: PathBuf::from("clusters.csv"),
            options: ClusterOptions::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub n_samples: usize,
    pub n_clusters: usize,
    pub n_clustered: usize,
    /// The matrix file written, if any.
    pub matrix_output: Option<PathBuf>,
}

/// Run the full pipeline.
pub fn run(config: &RunConfig) -> ClusterResult<RunSummary> {
    log::info!(
        "Clustering {} ({:?}) with {} linkage at threshold {}",
        config.input.display(),
        config.input_format,
        config.options.method,
        config.options.threshold
    );

    let matrix = load_matrix(config)?;
    let result = ClusterExtractor::new().extract(&matrix, &config.options)?;

    let mut outputs = Vec::with_capacity(2);
    let matrix_output = match (config.input_format, &config.matrix_output) {
        (InputFormat::SparseEdges, Some(path)) => {
            let mut buf = Vec::new();
            io::write_dense_matrix_to(&mut buf, &matrix)?;
            outputs.push(StagedFile::new(path, buf));
            Some(path.clone())
        }
        _ => None,
    };
    let mut buf = Vec::new();
    io::write_assignments_to(&mut buf, &result.assignments)?;
    outputs.push(StagedFile::new(&config.output, buf));

    io::write_staged(&outputs)?;

    Ok(RunSummary {
        n_samples: matrix.len(),
        n_clusters: result.n_clusters,
        n_clustered: result.assignments.len(),
        matrix_output,
    })
}

fn load_matrix(config: &RunConfig) -> ClusterResult<DistanceMatrix> {
    match config.input_format {
        InputFormat::SparseEdges => {
            let edges = io::read_sparse_edges(&config.input)?;
            Ok(DistanceMatrix::from_edges(edges))
        }
        InputFormat::DenseMatrix => io::read_dense_matrix(&config.input),
    }
}
