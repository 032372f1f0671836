//! CPU implementation of hierarchical clustering.

use crate::cluster::impl_generic::{fcluster_impl, linkage_impl};
use crate::cluster::traits::hierarchy::{HierarchyAlgorithms, LinkageMatrix, LinkageMethod};
use numr::error::Result;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl HierarchyAlgorithms<CpuRuntime> for CpuClient {
    fn linkage(
        &self,
        distances: &Tensor<CpuRuntime>,
        n: usize,
        method: LinkageMethod,
    ) -> Result<LinkageMatrix<CpuRuntime>> {
        linkage_impl(self, distances, n, method)
    }

    fn fcluster(&self, z: &LinkageMatrix<CpuRuntime>, t: f64) -> Result<Tensor<CpuRuntime>> {
        fcluster_impl(self, z, t)
    }
}
