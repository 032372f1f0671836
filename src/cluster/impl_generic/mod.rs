//! Generic clustering algorithm implementations.

pub mod hierarchy;

pub use hierarchy::{fcluster_impl, linkage_impl};
