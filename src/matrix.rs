//! Dense distance matrix built from sparse pairwise edges.
//!
//! The sample index is the sorted, deduplicated union of every name seen in
//! either position of the edges. Pairs without an edge are 0, the diagonal
//! is always 0, and a repeated pair keeps the value of its last edge.

use std::collections::{BTreeSet, HashMap};

use crate::error::{ClusterError, ClusterResult};

/// One pairwise distance between two samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceEdge {
    pub sample_a: String,
    pub sample_b: String,
    pub distance: f64,
}

impl DistanceEdge {
    pub fn new(sample_a: impl Into<String>, sample_b: impl Into<String>, distance: f64) -> Self {
        Self {
            sample_a: sample_a.into(),
            sample_b: sample_b.into(),
            distance,
        }
    }
}

/// Square distance matrix over named samples, stored row-major.
///
/// Matrices built with [`DistanceMatrix::from_edges`] are symmetric with a
/// zero diagonal. Matrices read from elsewhere ([`DistanceMatrix::from_square`])
/// are kept as given, including NaN for undefined cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    samples: Vec<String>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a dense matrix from sparse edges.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = DistanceEdge>,
    {
        let edges: Vec<DistanceEdge> = edges.into_iter().collect();

        let names: BTreeSet<&str> = edges
            .iter()
            .flat_map(|e| [e.sample_a.as_str(), e.sample_b.as_str()])
            .collect();
        let samples: Vec<String> = names.into_iter().map(str::to_owned).collect();
        let index: HashMap<&str, usize> = samples
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), i))
            .collect();

        let n = samples.len();
        let mut values = vec![0.0; n * n];
        for edge in &edges {
            let i = index[edge.sample_a.as_str()];
            let j = index[edge.sample_b.as_str()];
            set_symmetric(&mut values, n, i, j, edge.distance);
        }
        for i in 0..n {
            values[i * n + i] = 0.0;
        }

        log::debug!(
            "Built {n}x{n} distance matrix from {} edges",
            edges.len()
        );

        Self { samples, values }
    }

    /// Wrap an existing square matrix. `values` is row-major, `n * n` long.
    pub fn from_square(samples: Vec<String>, values: Vec<f64>) -> ClusterResult<Self> {
        let n = samples.len();
        if values.len() != n * n {
            return Err(ClusterError::malformed(
                "distance matrix",
                format!(
                    "expected {} values for {n} samples, got {}",
                    n * n,
                    values.len()
                ),
            ));
        }
        Ok(Self { samples, values })
    }

    /// Sample identifiers in row/column order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    /// Position of a sample in the index.
    pub fn index_of(&self, sample: &str) -> Option<usize> {
        self.samples.iter().position(|s| s == sample)
    }

    /// Distance between two named samples.
    pub fn distance(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.get(self.index_of(a)?, self.index_of(b)?))
    }
}

/// Write `d` at (i, j) and (j, i) together.
fn set_symmetric(values: &mut [f64], n: usize, i: usize, j: usize, d: f64) {
    values[i * n + j] = d;
    values[j * n + i] = d;
}
