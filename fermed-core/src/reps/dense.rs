use nalgebra::DMatrix;
use num_traits::Zero;

use crate::reps::sparse::Op;
use crate::util::scalar::c64;

pub type DenseOp = DMatrix<c64>;

pub fn to_dense(op: &Op) -> DenseOp {
    let (rows, cols) = op.shape();
    let mut m = DenseOp::zeros(rows, cols);
    for (&v, (i, j)) in op.iter() {
        m[(i, j)] += v;
    }
    m
}

/// Dense sub-matrix of `op` restricted to the basis states in `idxs` (rows and columns)
pub fn block_to_dense(op: &Op, idxs: &[usize]) -> DenseOp {
    let n = op.rows();
    let mut pos = vec![usize::MAX; n];
    for (k, &i) in idxs.iter().enumerate() {
        pos[i] = k;
    }
    let mut m = DenseOp::zeros(idxs.len(), idxs.len());
    for (&v, (i, j)) in op.iter() {
        let (pi, pj) = (pos[i], pos[j]);
        if pi != usize::MAX && pj != usize::MAX {
            m[(pi, pj)] += v;
        }
    }
    m
}

#[allow(non_snake_case)]
/// Performs U^dag A U
pub fn change_basis(A: &DenseOp, U: &DenseOp) -> DenseOp {
    U.ad_mul(&(A * U))
}

#[allow(non_snake_case)]
/// Sparse times dense product A U
pub fn sparse_mul_dense(A: &Op, U: &DenseOp) -> DenseOp {
    let (n, k) = U.shape();
    let mut AU = DenseOp::zeros(A.rows(), k);
    debug_assert_eq!(A.cols(), n);
    for (&v, (i, j)) in A.iter() {
        if v.is_zero() {
            continue;
        }
        for col in 0..k {
            AU[(i, col)] += v * U[(j, col)];
        }
    }
    AU
}

#[allow(non_snake_case)]
/// Performs U^dag A U for a sparse A without densifying it first
pub fn change_basis_sparse(A: &Op, U: &DenseOp) -> DenseOp {
    U.ad_mul(&sparse_mul_dense(A, U))
}

#[allow(non_snake_case)]
/// Performs U A U^dag
pub fn unchange_basis(A: &DenseOp, U: &DenseOp) -> DenseOp {
    U * A * U.adjoint()
}

/// Trace of a square dense operator
pub fn trace(a: &DenseOp) -> c64 {
    a.diagonal().iter().fold(c64::zero(), |acc, &x| acc + x)
}
