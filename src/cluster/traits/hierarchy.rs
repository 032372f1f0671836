//! Hierarchical clustering trait.

use std::fmt;
use std::str::FromStr;

use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkageMethod {
    /// Minimum distance between clusters.
    Single,
    /// Maximum distance between clusters.
    Complete,
    /// Average distance between all pairs (UPGMA).
    #[default]
    Average,
}

impl LinkageMethod {
    /// All accepted methods.
    pub const ALL: [LinkageMethod; 3] = [Self::Average, Self::Single, Self::Complete];

    /// Parse a method name. Only "average", "single" and "complete" are accepted.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "average" => Ok(Self::Average),
            "single" => Ok(Self::Single),
            "complete" => Ok(Self::Complete),
            _ => Err(Error::InvalidArgument {
                arg: "method",
                reason: format!(
                    "unsupported linkage method '{name}', expected one of: average, single, complete"
                ),
            }),
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Complete => "complete",
            Self::Average => "average",
        }
    }

    /// Lance-Williams update: distance from the union of clusters x and y to
    /// cluster k, given `d_xk`, `d_yk` and the cluster sizes.
    #[inline]
    pub(crate) fn update(&self, d_xk: f64, d_yk: f64, n_x: usize, n_y: usize) -> f64 {
        match self {
            Self::Single => d_xk.min(d_yk),
            Self::Complete => d_xk.max(d_yk),
            Self::Average => {
                let (n_x, n_y) = (n_x as f64, n_y as f64);
                (n_x * d_xk + n_y * d_yk) / (n_x + n_y)
            }
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Linkage matrix [n-1, 4]: each row is [id1, id2, distance, count].
///
/// Leaves are numbered 0..n; the merge in row k creates node n + k.
/// Rows are ordered by merge distance and id1 < id2 in every row.
#[derive(Debug, Clone)]
pub struct LinkageMatrix<R: Runtime> {
    /// The linkage matrix tensor [n-1, 4].
    pub z: Tensor<R>,
}

impl<R: Runtime> LinkageMatrix<R> {
    /// Number of observations (leaves) in the dendrogram.
    pub fn n_observations(&self) -> usize {
        self.z.shape()[0] + 1
    }
}

/// Hierarchical (agglomerative) clustering algorithms.
pub trait HierarchyAlgorithms<R: Runtime> {
    /// Compute linkage from a condensed distance vector of `n` observations.
    fn linkage(
        &self,
        distances: &Tensor<R>,
        n: usize,
        method: LinkageMethod,
    ) -> Result<LinkageMatrix<R>>;

    /// Cut the dendrogram at height `t` to form flat clusters.
    ///
    /// Two observations share a cluster when they are joined by a subtree
    /// whose merge heights are all <= `t`. Returns 1-based I64 cluster ids
    /// numbered in dendrogram (left-to-right) order.
    fn fcluster(&self, z: &LinkageMatrix<R>, t: f64) -> Result<Tensor<R>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkage_method_from_name() {
        assert_eq!(LinkageMethod::from_name("average").unwrap(), LinkageMethod::Average);
        assert_eq!(LinkageMethod::from_name("single").unwrap(), LinkageMethod::Single);
        assert_eq!("complete".parse::<LinkageMethod>().unwrap(), LinkageMethod::Complete);
        assert!(LinkageMethod::from_name("ward").is_err());
        assert!(LinkageMethod::from_name("Average").is_err());
        assert!(LinkageMethod::from_name("").is_err());
    }

    #[test]
    fn test_linkage_method_name_roundtrip() {
        for method in LinkageMethod::ALL {
            assert_eq!(LinkageMethod::from_name(method.name()).unwrap(), method);
        }
        assert_eq!(LinkageMethod::default(), LinkageMethod::Average);
    }

    #[test]
    fn test_lance_williams_update() {
        assert_eq!(LinkageMethod::Single.update(3.0, 7.0, 1, 1), 3.0);
        assert_eq!(LinkageMethod::Complete.update(3.0, 7.0, 1, 1), 7.0);
        // size-weighted mean: (2*3 + 1*6) / 3
        assert!((LinkageMethod::Average.update(3.0, 6.0, 2, 1) - 4.0).abs() < 1e-12);
    }
}
