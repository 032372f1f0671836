//! Clustering algorithm traits.

pub mod hierarchy;
