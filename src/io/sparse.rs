//! Sparse pairwise distance list (tab-separated).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::na::is_na;
use crate::error::{ClusterError, ClusterResult};
use crate::matrix::DistanceEdge;

pub const SAMPLE_A_COLUMN: &str = "Sample 1";
pub const SAMPLE_B_COLUMN: &str = "Sample 2";
pub const SNPS_COLUMN: &str = "SNPs";

/// Read distance edges from a tab-separated file.
pub fn read_sparse_edges(path: &Path) -> ClusterResult<Vec<DistanceEdge>> {
    log::info!("Reading pairwise distances from {}", path.display());
    let file = File::open(path).map_err(|e| ClusterError::io(path, e))?;
    read_edges(file, &path.display().to_string(), Some(path))
}

/// Read distance edges from any tab-separated source.
pub fn read_sparse_edges_from<R: Read>(reader: R) -> ClusterResult<Vec<DistanceEdge>> {
    read_edges(reader, "sparse distance input", None)
}

fn read_edges<R: Read>(
    reader: R,
    context: &str,
    path: Option<&Path>,
) -> ClusterResult<Vec<DistanceEdge>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ClusterError::csv(context, path, e))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (a_idx, b_idx, snp_idx) = match (
        column(SAMPLE_A_COLUMN),
        column(SAMPLE_B_COLUMN),
        column(SNPS_COLUMN),
    ) {
        (Some(a), Some(b), Some(s)) => (a, b, s),
        _ => {
            return Err(ClusterError::malformed(
                context,
                format!(
                    "input must contain columns '{SAMPLE_A_COLUMN}', '{SAMPLE_B_COLUMN}', '{SNPS_COLUMN}'"
                ),
            ))
        }
    };

    let mut edges = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| ClusterError::csv(context, path, e))?;
        let field = |idx: usize| record.get(idx).filter(|cell| !is_na(cell));

        let (Some(sample_a), Some(sample_b), Some(snps)) =
            (field(a_idx), field(b_idx), field(snp_idx))
        else {
            dropped += 1;
            continue;
        };

        let distance: f64 = snps.trim().parse().map_err(|_| {
            let line = record.position().map_or(0, |p| p.line());
            ClusterError::malformed(
                context,
                format!("line {line}: could not convert '{SNPS_COLUMN}' value '{snps}' to a number"),
            )
        })?;

        edges.push(DistanceEdge::new(sample_a, sample_b, distance));
    }

    if dropped > 0 {
        log::warn!("Dropped {dropped} row(s) with missing values in {context}");
    }
    log::info!("Read {} pairwise distance(s)", edges.len());

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_edges_basic() {
        let tsv = "Sample 1\tSample 2\tSNPs\nS1\tS2\t5\nS2\tS3\t7.5\n";
        let edges = read_sparse_edges_from(tsv.as_bytes()).unwrap();
        assert_eq!(
            edges,
            vec![
                DistanceEdge::new("S1", "S2", 5.0),
                DistanceEdge::new("S2", "S3", 7.5),
            ]
        );
    }

    #[test]
    fn test_read_edges_ignores_extra_columns() {
        let tsv = "Mash\tSample 2\tSNPs\tSample 1\tNotes\n0.1\tB\t3\tA\tx\n";
        let edges = read_sparse_edges_from(tsv.as_bytes()).unwrap();
        assert_eq!(edges, vec![DistanceEdge::new("A", "B", 3.0)]);
    }

    #[test]
    fn test_read_edges_missing_column() {
        let tsv = "Sample 1\tSample 2\tDistance\nS1\tS2\t5\n";
        let err = read_sparse_edges_from(tsv.as_bytes()).unwrap_err();
        assert!(matches!(err, ClusterError::MalformedInput { .. }));
        assert!(err.to_string().contains("SNPs"));
    }

    #[test]
    fn test_read_edges_unparseable_distance() {
        let tsv = "Sample 1\tSample 2\tSNPs\nS1\tS2\t5\nS2\tS3\tlots\n";
        let err = read_sparse_edges_from(tsv.as_bytes()).unwrap_err();
        assert!(matches!(err, ClusterError::MalformedInput { .. }));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_read_edges_drops_missing_values() {
        let tsv = "Sample 1\tSample 2\tSNPs\nS1\t\t5\nNA\tS2\t1\nS1\tS2\tNaN\nS3\n\tS4\t2\nS1\tS3\t4\n";
        let edges = read_sparse_edges_from(tsv.as_bytes()).unwrap();
        assert_eq!(edges, vec![DistanceEdge::new("S1", "S3", 4.0)]);
    }

    #[test]
    fn test_read_edges_empty_body() {
        let tsv = "Sample 1\tSample 2\tSNPs\n";
        assert!(read_sparse_edges_from(tsv.as_bytes()).unwrap().is_empty());
    }
}
