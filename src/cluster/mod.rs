//! Hierarchical clustering.
//!
//! Agglomerative linkage over a condensed distance vector, distance-threshold
//! cuts of the resulting dendrogram, and spreadsheet-style labels for the
//! flat clusters. Algorithms are generic over numr's `Runtime`; the CPU
//! backend is implemented for `CpuClient`.
//!
//! ```ignore
//! use snpclust::cluster::{HierarchyAlgorithms, LinkageMethod};
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! // Condensed distances for 3 samples: d(0,1), d(0,2), d(1,2)
//! let d = Tensor::from_slice(&[2.0, 40.0, 38.0], &[3], &device);
//! let z = client.linkage(&d, 3, LinkageMethod::Average)?;
//! let labels = client.fcluster(&z, 20.0)?; // [1, 1, 2]
//! ```

mod cpu;
pub mod impl_generic;
pub mod labels;
pub mod traits;
mod validation;

pub use labels::{cluster_index, cluster_label};
pub use traits::hierarchy::{HierarchyAlgorithms, LinkageMatrix, LinkageMethod};
pub use validation::*;
