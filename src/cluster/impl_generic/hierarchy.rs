//! Generic hierarchical clustering implementation.
//!
//! Agglomeration is inherently sequential, so the condensed distances are
//! pulled to the host once and merged with the nearest-neighbour chain
//! algorithm (O(n^2) time, one condensed buffer of memory). The resulting
//! linkage matrix and flat labels are handed back as tensors on the
//! input's device.

use crate::cluster::traits::hierarchy::{LinkageMatrix, LinkageMethod};
use crate::cluster::validation::{
    validate_condensed, validate_distance_dtype, validate_finite, validate_linkage,
    validate_threshold,
};
use numr::error::{Error, Result};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Index of pair (i, j), i != j, in a condensed vector of `n` observations.
#[inline]
pub(crate) fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

/// A merge of two active slots, before relabelling.
#[derive(Debug, Clone, Copy)]
struct Merge {
    x: usize,
    y: usize,
    distance: f64,
}

/// Compute linkage from condensed distance vector.
pub fn linkage_impl<R, C>(
    _client: &C,
    distances: &Tensor<R>,
    n: usize,
    method: LinkageMethod,
) -> Result<LinkageMatrix<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    validate_distance_dtype(distances.dtype(), "linkage")?;
    validate_condensed(distances.shape(), n, "linkage")?;

    let mut dists: Vec<f64> = distances.to_vec();
    validate_finite(&dists, "linkage")?;

    let mut merges = nn_chain(&mut dists, n, method)?;
    // Stable: equal heights keep the order the chain produced them in.
    merges.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let z_data = label_merges(&merges, n);
    let z = Tensor::<R>::from_slice(&z_data, &[n - 1, 4], distances.device());

    Ok(LinkageMatrix { z })
}

/// Nearest-neighbour chain agglomeration over a condensed matrix.
///
/// Valid for reducible linkages (single, complete, average). The surviving
/// cluster of a merge always occupies the larger slot index.
fn nn_chain(dists: &mut [f64], n: usize, method: LinkageMethod) -> Result<Vec<Merge>> {
    let mut size = vec![1usize; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    let mut merges = Vec::with_capacity(n - 1);

    for _ in 0..n - 1 {
        if chain.is_empty() {
            let start = size.iter().position(|&s| s > 0).ok_or_else(|| Error::InvalidArgument {
                arg: "distances",
                reason: "no active clusters left to merge".to_string(),
            })?;
            chain.push(start);
        }

        let (x, y, distance) = loop {
            let x = chain[chain.len() - 1];
            let prev = (chain.len() > 1).then(|| chain[chain.len() - 2]);

            // The previous chain element wins ties.
            let mut best = prev.map(|p| (p, dists[condensed_index(n, x, p)]));
            for i in 0..n {
                if size[i] == 0 || i == x {
                    continue;
                }
                let d = dists[condensed_index(n, x, i)];
                if best.map_or(true, |(_, current)| d < current) {
                    best = Some((i, d));
                }
            }

            let (y, d) = best.ok_or_else(|| Error::InvalidArgument {
                arg: "distances",
                reason: "no nearest neighbour found".to_string(),
            })?;
            if prev == Some(y) {
                break (x, y, d);
            }
            chain.push(y);
        };

        chain.truncate(chain.len() - 2);

        let (x, y) = if x > y { (y, x) } else { (x, y) };
        let (n_x, n_y) = (size[x], size[y]);
        merges.push(Merge { x, y, distance });

        size[x] = 0;
        size[y] = n_x + n_y;

        for k in 0..n {
            if size[k] == 0 || k == y {
                continue;
            }
            let d_xk = dists[condensed_index(n, x, k)];
            let d_yk = dists[condensed_index(n, y, k)];
            dists[condensed_index(n, y, k)] = method.update(d_xk, d_yk, n_x, n_y);
        }
    }

    Ok(merges)
}

/// Union-find that hands out node ids n, n+1, ... as merges are applied.
struct LinkageUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    next_label: usize,
}

impl LinkageUnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..2 * n - 1).collect(),
            size: vec![1; 2 * n - 1],
            next_label: n,
        }
    }

    fn merge(&mut self, x: usize, y: usize) -> usize {
        let label = self.next_label;
        self.parent[x] = label;
        self.parent[y] = label;
        let size = self.size[x] + self.size[y];
        self.size[label] = size;
        self.next_label += 1;
        size
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }
}

/// Turn slot-index merges (sorted by height) into linkage rows using
/// dendrogram node ids.
fn label_merges(merges: &[Merge], n: usize) -> Vec<f64> {
    let mut uf = LinkageUnionFind::new(n);
    let mut z = Vec::with_capacity(merges.len() * 4);

    for merge in merges {
        let x_root = uf.find(merge.x);
        let y_root = uf.find(merge.y);
        let (lo, hi) = if x_root < y_root {
            (x_root, y_root)
        } else {
            (y_root, x_root)
        };
        let size = uf.merge(x_root, y_root);
        z.extend_from_slice(&[lo as f64, hi as f64, merge.distance, size as f64]);
    }

    z
}

/// Cut dendrogram at height `t` to form flat clusters.
pub fn fcluster_impl<R, C>(_client: &C, z: &LinkageMatrix<R>, t: f64) -> Result<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    validate_linkage(z.z.shape(), "fcluster")?;
    validate_threshold(t, "fcluster")?;

    let n = z.n_observations();
    let device = z.z.device();
    let z_data: Vec<f64> = z.z.to_vec();

    let children = |k: usize| (z_data[k * 4] as usize, z_data[k * 4 + 1] as usize);

    // Largest merge height inside each subtree. Children always precede
    // their parent in the linkage rows.
    let mut max_height = vec![0.0f64; n - 1];
    for k in 0..n - 1 {
        let (left, right) = children(k);
        let mut h = z_data[k * 4 + 2];
        for child in [left, right] {
            if child >= n {
                h = h.max(max_height[child - n]);
            }
        }
        max_height[k] = h;
    }

    // Pre-order walk from the root, left child first. The first node at or
    // below the cut claims all its leaves; leaves reached above the cut are
    // singletons.
    let mut labels = vec![0i64; n];
    let mut next_id = 0i64;
    let mut stack = vec![2 * n - 2];

    while let Some(node) = stack.pop() {
        if node < n {
            next_id += 1;
            labels[node] = next_id;
            continue;
        }
        let k = node - n;
        let (left, right) = children(k);
        if max_height[k] <= t {
            next_id += 1;
            let mut members = vec![left, right];
            while let Some(member) = members.pop() {
                if member < n {
                    labels[member] = next_id;
                } else {
                    let (l, r) = children(member - n);
                    members.push(l);
                    members.push(r);
                }
            }
        } else {
            stack.push(right);
            stack.push(left);
        }
    }

    Ok(Tensor::<R>::from_slice(&labels, &[n], device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condensed_index() {
        // n = 4: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        assert_eq!(condensed_index(4, 0, 1), 0);
        assert_eq!(condensed_index(4, 0, 3), 2);
        assert_eq!(condensed_index(4, 1, 2), 3);
        assert_eq!(condensed_index(4, 3, 2), 5);
    }

    #[test]
    fn test_nn_chain_merge_heights() {
        // Points on a line at 0, 1, 5, 6
        let mut dists = vec![1.0, 5.0, 6.0, 4.0, 5.0, 1.0];
        let mut merges = nn_chain(&mut dists, 4, LinkageMethod::Single).unwrap();
        merges.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        let heights: Vec<f64> = merges.iter().map(|m| m.distance).collect();
        assert_eq!(heights, vec![1.0, 1.0, 4.0]);
    }

    #[test]
    fn test_label_merges_node_ids() {
        let merges = [
            Merge { x: 0, y: 1, distance: 1.0 },
            Merge { x: 2, y: 3, distance: 1.0 },
            Merge { x: 1, y: 3, distance: 5.0 },
        ];
        let z = label_merges(&merges, 4);
        assert_eq!(
            z,
            vec![
                0.0, 1.0, 1.0, 2.0, //
                2.0, 3.0, 1.0, 2.0, //
                4.0, 5.0, 5.0, 4.0,
            ]
        );
    }
}
