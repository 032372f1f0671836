//! Flat cluster extraction from a dense distance matrix.
//!
//! Runs agglomerative linkage, cuts the dendrogram at a distance threshold,
//! drops singleton clusters and labels the rest A, B, ..., Z, AA, ... in
//! ascending order of their flat cluster id.

use std::collections::BTreeMap;

use numr::ops::DistanceOps;
use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;
use serde::Serialize;

use crate::cluster::{cluster_label, validate_threshold, HierarchyAlgorithms, LinkageMethod};
use crate::error::{ClusterError, ClusterResult};
use crate::matrix::DistanceMatrix;

/// Default cut height, in SNPs.
pub const DEFAULT_THRESHOLD: f64 = 20.0;

/// Options for cluster extraction.
#[derive(Debug, Clone)]
pub struct ClusterOptions {
    /// Linkage criterion.
    pub method: LinkageMethod,
    /// Dendrogram cut height (inclusive).
    pub threshold: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            method: LinkageMethod::Average,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ClusterOptions {
    /// Build options from a method name, rejecting unknown methods and
    /// negative or non-finite thresholds.
    pub fn new(method: &str, threshold: f64) -> ClusterResult<Self> {
        let method = LinkageMethod::from_name(method)?;
        validate_threshold(threshold, "cluster extraction")?;
        Ok(Self { method, threshold })
    }
}

/// One output row: a sample and the label of its cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterAssignment {
    #[serde(rename = "Sample")]
    pub sample: String,
    #[serde(rename = "Cluster")]
    pub cluster: String,
}

/// Result of cluster extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Clustered samples, sorted by (cluster label, sample).
    pub assignments: Vec<ClusterAssignment>,
    /// Number of clusters with at least two members.
    pub n_clusters: usize,
    /// Number of samples left in singleton clusters.
    pub n_unclustered: usize,
}

impl ExtractionResult {
    /// True when no cluster reached two members.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Cluster extractor on the CPU backend.
pub struct ClusterExtractor {
    client: CpuClient,
    device: CpuDevice,
}

impl Default for ClusterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterExtractor {
    pub fn new() -> Self {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        Self { client, device }
    }

    /// Cluster the samples of `matrix`.
    pub fn extract(
        &self,
        matrix: &DistanceMatrix,
        options: &ClusterOptions,
    ) -> ClusterResult<ExtractionResult> {
        extract_clusters_impl::<CpuRuntime, _>(&self.client, &self.device, matrix, options)
    }
}

/// Generic cluster extraction over any runtime providing linkage and
/// squareform conversion.
pub fn extract_clusters_impl<R, C>(
    client: &C,
    device: &R::Device,
    matrix: &DistanceMatrix,
    options: &ClusterOptions,
) -> ClusterResult<ExtractionResult>
where
    R: Runtime,
    C: HierarchyAlgorithms<R> + DistanceOps<R> + RuntimeClient<R>,
{
    validate_threshold(options.threshold, "cluster extraction")?;

    let n = matrix.len();
    if n < 2 {
        log::info!("{n} sample(s) in matrix, nothing to cluster");
        return Ok(ExtractionResult {
            n_unclustered: n,
            ..Default::default()
        });
    }

    let values = sanitize(matrix)?;
    let square = Tensor::<R>::from_slice(&values, &[n, n], device);
    let condensed = client.squareform_inverse(&square)?;

    log::debug!(
        "Linking {n} samples with {} linkage",
        options.method.name()
    );
    let z = client.linkage(&condensed, n, options.method)?;
    let flat: Vec<i64> = client.fcluster(&z, options.threshold)?.to_vec();

    let result = label_clusters(matrix.samples(), &flat);
    log::info!(
        "Found {} cluster(s) covering {} sample(s) at threshold {} ({} unclustered)",
        result.n_clusters,
        result.assignments.len(),
        options.threshold,
        result.n_unclustered
    );
    Ok(result)
}

/// Undefined cells become 0 and the diagonal is forced to 0. The result must
/// be finite and symmetric.
fn sanitize(matrix: &DistanceMatrix) -> ClusterResult<Vec<f64>> {
    let n = matrix.len();
    let mut values: Vec<f64> = matrix
        .values()
        .iter()
        .map(|&v| if v.is_nan() { 0.0 } else { v })
        .collect();
    for i in 0..n {
        values[i * n + i] = 0.0;
    }

    let samples = matrix.samples();
    for i in 0..n {
        for j in i + 1..n {
            let (upper, lower) = (values[i * n + j], values[j * n + i]);
            if !upper.is_finite() {
                return Err(ClusterError::malformed(
                    "distance matrix",
                    format!(
                        "non-finite distance {upper} between '{}' and '{}'",
                        samples[i], samples[j]
                    ),
                ));
            }
            if upper != lower {
                return Err(ClusterError::malformed(
                    "distance matrix",
                    format!(
                        "matrix is not symmetric: d('{}', '{}') = {upper} but d('{}', '{}') = {lower}",
                        samples[i], samples[j], samples[j], samples[i]
                    ),
                ));
            }
        }
    }

    Ok(values)
}

/// Keep flat clusters with more than one member and label them in ascending
/// order of their id.
fn label_clusters(samples: &[String], flat: &[i64]) -> ExtractionResult {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &id in flat {
        *counts.entry(id).or_insert(0) += 1;
    }

    let labels: BTreeMap<i64, String> = counts
        .iter()
        .filter(|&(_, &count)| count > 1)
        .enumerate()
        .map(|(i, (&id, _))| (id, cluster_label(i)))
        .collect();

    let mut assignments: Vec<ClusterAssignment> = samples
        .iter()
        .zip(flat)
        .filter_map(|(sample, id)| {
            labels.get(id).map(|label| ClusterAssignment {
                sample: sample.clone(),
                cluster: label.clone(),
            })
        })
        .collect();
    assignments.sort_by(|a, b| (&a.cluster, &a.sample).cmp(&(&b.cluster, &b.sample)));

    ExtractionResult {
        n_unclustered: samples.len() - assignments.len(),
        n_clusters: labels.len(),
        assignments,
    }
}
