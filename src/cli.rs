use clap::Parser;
use std::path::PathBuf;

use snpclust::pipeline::DEFAULT_MATRIX_OUTPUT;
use snpclust::{ClusterOptions, ClusterResult, InputFormat, RunConfig};

#[derive(Parser, Debug)]
#[command(
    name = "snpclust",
    version,
    about = "Cluster samples from pairwise SNP distances",
    long_about = r#"
Cluster samples from pairwise SNP distances using hierarchical
agglomerative clustering cut at a distance threshold.

Input is either a dense comma-separated distance matrix (sample ids in the
first row and column) or, with --from-ska, a tab-separated pairwise list
with columns "Sample 1", "Sample 2" and "SNPs". Pairs missing from the list
are treated as distance 0.

Output is a CSV with columns "Sample" and "Cluster", one row per sample in a
cluster of two or more, labelled A, B, ..., Z, AA, AB, ...

Example:
  snpclust --from-ska -i sample.distances.tsv -t 20 -m average -o clusters.csv
"#
)]
pub struct Args {
    /// Input distance file (pairwise list or dense matrix)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Linkage method: average, single or complete
    #[arg(short = 'm', long = "method", value_name = "METHOD", default_value = "average")]
    pub method: String,

    /// Input is a tab-separated pairwise list with a SNPs column
    #[arg(long = "from-ska", alias = "from_ska")]
    pub from_ska: bool,

    /// Distance threshold for cutting the dendrogram (inclusive)
    #[arg(short = 't', long = "threshold", value_name = "SNPS", default_value_t = 20.0)]
    pub threshold: f64,

    /// Output CSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Where to write the dense matrix built from a pairwise list
    #[arg(long = "matrix-output", value_name = "FILE", default_value = DEFAULT_MATRIX_OUTPUT)]
    pub matrix_output: PathBuf,
}

impl Args {
    /// Validate the clustering options and assemble the run configuration.
    pub fn to_config(&self) -> ClusterResult<RunConfig> {
        let options = ClusterOptions::new(&self.method, self.threshold)?;
        let input_format = if self.from_ska {
            InputFormat::SparseEdges
        } else {
            InputFormat::DenseMatrix
        };
        Ok(RunConfig {
            input: self.input.clone(),
            input_format,
            matrix_output: Some(self.matrix_output.clone()),
            output: self.output.clone(),
            options,
        })
    }
}
