//! Tabular file formats.
//!
//! - sparse edge list (tab-separated, "Sample 1" / "Sample 2" / "SNPs")
//! - dense distance matrix (comma-separated, sample ids on both axes)
//! - cluster assignments (comma-separated, "Sample" / "Cluster")

mod assignments;
mod dense;
mod na;
mod sparse;
mod staged;

pub use assignments::{write_assignments, write_assignments_to};
pub use dense::{
    read_dense_matrix, read_dense_matrix_from, write_dense_matrix, write_dense_matrix_to,
};
pub use na::is_na;
pub use sparse::{
    read_sparse_edges, read_sparse_edges_from, SAMPLE_A_COLUMN, SAMPLE_B_COLUMN, SNPS_COLUMN,
};
pub use staged::{write_staged, StagedFile};
