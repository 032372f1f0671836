//! snpclust - Cluster samples by pairwise SNP distance
//!
//! snpclust turns a sparse list of pairwise SNP distances into a dense,
//! symmetric distance matrix, runs agglomerative hierarchical clustering on
//! it, cuts the dendrogram at a distance threshold, and labels every
//! multi-sample cluster A, B, ..., Z, AA, AB, ...
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐   edges   ┌──────────────────┐  matrix  ┌──────────────────┐
//! │ io (TSV / CSV) ├──────────►│ matrix (builder) ├─────────►│ extract          │
//! └────────────────┘           └──────────────────┘          │  └─ cluster      │
//!                                                            │     (numr linkage│
//!                                                            │      + fcluster) │
//!                                                            └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`matrix`] - Dense distance matrix built from sparse edges
//! - [`cluster`] - Linkage, dendrogram cuts and cluster labels on numr tensors
//! - [`extract`] - Flat, labelled clusters from a distance matrix
//! - [`io`] - Sparse edge list, dense matrix and assignment files
//! - [`pipeline`] - One end-to-end run
//!
//! # Example
//!
//! ```ignore
//! use snpclust::{ClusterExtractor, ClusterOptions, DistanceEdge, DistanceMatrix};
//!
//! let matrix = DistanceMatrix::from_edges(vec![
//!     DistanceEdge::new("S1", "S2", 5.0),
//!     DistanceEdge::new("S2", "S3", 5.0),
//!     DistanceEdge::new("S1", "S3", 6.0),
//! ]);
//!
//! let options = ClusterOptions::new("average", 10.0)?;
//! let result = ClusterExtractor::new().extract(&matrix, &options)?;
//! for row in &result.assignments {
//!     println!("{}\t{}", row.sample, row.cluster);
//! }
//! ```

pub mod cluster;
pub mod error;
pub mod extract;
pub mod io;
pub mod matrix;
pub mod pipeline;

pub use cluster::{cluster_index, cluster_label, HierarchyAlgorithms, LinkageMatrix, LinkageMethod};
pub use error::{ClusterError, ClusterResult};
pub use extract::{
    ClusterAssignment, ClusterExtractor, ClusterOptions, ExtractionResult, DEFAULT_THRESHOLD,
};
pub use matrix::{DistanceEdge, DistanceMatrix};
pub use pipeline::{run, InputFormat, RunConfig, RunSummary};
