use sprs::{CsMat, TriMat};

use crate::algebra::AlgebraTarget;
use crate::util::scalar::{c64, real};

/// Sparse operator on the Fock space, stored as CSR.
pub type Op = CsMat<c64>;

impl AlgebraTarget<c64> for Op {
    fn add_ref(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        self * rhs
    }

    fn scale_ref(&self, t: &c64) -> Self {
        let t = *t;
        self.map(|&x| x * t)
    }
}

pub fn identity(dim: usize) -> Op {
    CsMat::eye(dim)
}

pub fn zero(dim: usize) -> Op {
    CsMat::zero((dim, dim))
}

/// Build a CSR operator from (row, col, value) triplets; duplicates are summed
pub fn from_triplets<I>(dim: usize, triplets: I) -> Op
    where I: IntoIterator<Item = (usize, usize, c64)>
{
    let mut tri = TriMat::new((dim, dim));
    for (i, j, v) in triplets {
        tri.add_triplet(i, j, v);
    }
    tri.to_csr()
}

/// Hermitian adjoint
pub fn adjoint(op: &Op) -> Op {
    let (rows, _cols) = op.shape();
    from_triplets(rows, op.iter().map(|(&v, (i, j))| (j, i, v.conj())))
}

/// [a, b] = ab - ba
pub fn commutator(a: &Op, b: &Op) -> Op {
    &(a * b) - &(b * a)
}

/// [a, b]_xi = ab - xi ba
///
/// xi = -1 gives the anticommutator.
pub fn xi_commutator(a: &Op, b: &Op, xi: f64) -> Op {
    let ba = (b * a).scale_ref(&real(xi));
    &(a * b) - &ba
}

/// Largest entry of |A - A^dag|
pub fn hermitian_deviation(op: &Op) -> f64 {
    let diff = op - &adjoint(op);
    diff.iter().map(|(v, _)| v.norm()).fold(0.0, f64::max)
}

pub fn is_hermitian(op: &Op, tol: f64) -> bool {
    hermitian_deviation(op) <= tol
}
