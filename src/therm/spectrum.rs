//! Block diagonalization of a sparse Hamiltonian

use itertools::Itertools;
use log::{debug, trace, warn};

use fermed_core::eig::eigh;
use fermed_core::reps::dense::{block_to_dense, DenseOp};
use fermed_core::Op;

use crate::config::SpectrumMode;

/// Eigenvalues in ascending order and the matching eigenvectors as the
/// columns of a (Fock dimension x kept states) matrix
#[derive(Clone, Debug)]
pub struct Spectrum{
    pub energies: Vec<f64>,
    pub vectors: DenseOp,
    /// Number of connected blocks the Hamiltonian was split into
    pub n_blocks: usize,
}

/// Disjoint-set forest over basis states
struct UnionFind{
    parent: Vec<usize>,
}

impl UnionFind{
    fn new(n: usize) -> Self{
        UnionFind{parent: (0..n).collect()}
    }

    fn find(&mut self, mut i: usize) -> usize{
        while self.parent[i] != i{
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, i: usize, j: usize){
        let (ri, rj) = (self.find(i), self.find(j));
        if ri != rj{
            let (lo, hi) = if ri < rj { (ri, rj) } else { (rj, ri) };
            self.parent[hi] = lo;
        }
    }
}

/// Partition the basis into the connected components of the sparsity graph of `h`.
/// Blocks are ordered by their smallest basis state and each block lists its
/// states in ascending order.
pub fn connected_blocks(h: &Op) -> Vec<Vec<usize>>{
    let n = h.rows();
    let mut uf = UnionFind::new(n);
    for (v, (i, j)) in h.iter(){
        if i != j && v.norm() > 0.0{
            uf.union(i, j);
        }
    }
    (0..n).map(|i| (uf.find(i), i))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(root, _)| *root)
        .map(|(_, states)| states)
        .collect()
}

/// Diagonalize `h`, either as a whole or block by block, and keep the
/// eigenpairs selected by `mode`
pub fn diagonalize(h: &Op, use_blocks: bool, mode: SpectrumMode) -> Spectrum{
    let dim = h.rows();
    let blocks = if use_blocks {
        connected_blocks(h)
    } else {
        vec![(0..dim).collect()]
    };

    // (energy, block, column within the block)
    let mut levels: Vec<(f64, usize, usize)> = Vec::with_capacity(dim);
    let mut block_vecs = Vec::with_capacity(blocks.len());
    for (b, states) in blocks.iter().enumerate(){
        let (vals, vecs) = eigh(&block_to_dense(h, states));
        trace!("block {} of size {}: lowest energy {:?}", b, states.len(), vals.first());
        levels.extend(vals.into_iter().enumerate().map(|(k, e)| (e, b, k)));
        block_vecs.push(vecs);
    }
    levels.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n_keep = match mode{
        SpectrumMode::Full => dim,
        SpectrumMode::Lowest(n) => {
            if n < dim {
                warn!("Keeping only the {} lowest of {} eigenstates", n, dim);
            }
            n.min(dim)
        }
    };
    levels.truncate(n_keep);

    let mut vectors = DenseOp::zeros(dim, n_keep);
    for (col, &(_, b, k)) in levels.iter().enumerate(){
        for (row, &s) in blocks[b].iter().enumerate(){
            vectors[(s, col)] = block_vecs[b][(row, k)];
        }
    }
    debug!("Diagonalized {} states in {} blocks, kept {}", dim, blocks.len(), n_keep);

    Spectrum{
        energies: levels.into_iter().map(|(e, _, _)| e).collect(),
        vectors,
        n_blocks: blocks.len(),
    }
}
