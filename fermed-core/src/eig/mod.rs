//! Dense Hermitian eigensolver for the diagonal blocks of a Hamiltonian

use log::{trace, warn};
use nalgebra::SymmetricEigen;

use crate::reps::dense::{change_basis, DenseOp};
use crate::util::scalar::c64;

/// Off-diagonal tolerance of U^dag H U, relative to max(1, max |H_ij|)
const EIG_RTOL: f64 = 16.0 * f64::EPSILON;
const MAX_JACOBI_SWEEPS: usize = 12;

/// Largest off-diagonal modulus of a square matrix
fn max_off_diagonal(a: &DenseOp) -> f64{
    let n = a.nrows();
    let mut m: f64 = 0.0;
    for j in 0..n{
        for i in 0..n{
            if i != j{
                m = m.max(a[(i, j)].norm());
            }
        }
    }
    m
}

/// Rotate columns p, q of `m` by the 2x2 unitary [[c, s], [-s e^{-iφ}, c e^{-iφ}]]
fn rotate_cols(m: &mut DenseOp, p: usize, q: usize, c: f64, s: f64, phase: c64){
    for i in 0..m.nrows(){
        let (mp, mq) = (m[(i, p)], m[(i, q)]);
        m[(i, p)] = mp * c - mq * phase * s;
        m[(i, q)] = mp * s + mq * phase * c;
    }
}

/// Cyclic complex Jacobi sweeps on the nearly diagonal `a = U^dag H U`,
/// accumulating the rotations into `u`
fn jacobi_refine(a: &mut DenseOp, u: &mut DenseOp, tol: f64){
    let n = a.nrows();
    for sweep in 0..MAX_JACOBI_SWEEPS{
        let off = max_off_diagonal(a);
        trace!("eigh: Jacobi sweep {}, max off-diagonal {:e}", sweep, off);
        if off <= tol{
            return;
        }
        for p in 0..n{
            for q in p + 1..n{
                let b = a[(p, q)];
                let bn = b.norm();
                if bn <= tol * 1e-3{
                    continue;
                }
                let theta = 0.5 * (2.0 * bn).atan2(a[(q, q)].re - a[(p, p)].re);
                let (s, c) = theta.sin_cos();
                // e^{-iφ}, b = |b| e^{iφ}
                let phase = (b / bn).conj();

                rotate_cols(a, p, q, c, s, phase);
                let pc = phase.conj();
                for j in 0..n{
                    let (ap, aq) = (a[(p, j)], a[(q, j)]);
                    a[(p, j)] = ap * c - aq * pc * s;
                    a[(q, j)] = ap * s + aq * pc * c;
                }
                a[(p, q)] = c64::new(0.0, 0.0);
                a[(q, p)] = c64::new(0.0, 0.0);
                rotate_cols(u, p, q, c, s, phase);
            }
        }
    }
    let off = max_off_diagonal(a);
    if off > tol{
        warn!("eigh: off-diagonal residual {:e} above {:e} after {} Jacobi sweeps", off, tol, MAX_JACOBI_SWEEPS);
    }
}

/// Diagonalize a Hermitian matrix.
///
/// The QR iteration of nalgebra is followed by a residual check on
/// U^dag H U. When an off-diagonal element exceeds the tolerance, the
/// eigenvectors are re-orthonormalized and refined by Jacobi rotations.
/// Eigenvalues are returned in ascending order.
pub fn eigh(op: &DenseOp) -> (Vec<f64>, DenseOp){
    let n = op.nrows();
    if n == 0{
        return (Vec::new(), DenseOp::zeros(0, 0));
    }
    let eig = SymmetricEigen::new(op.clone());
    let scale = op.iter().map(|v| v.norm()).fold(1.0, f64::max);
    let tol = EIG_RTOL * scale;

    let mut u = eig.eigenvectors;
    let mut a = change_basis(op, &u);
    let mut vals: Vec<f64> = eig.eigenvalues.iter().copied().collect();
    if max_off_diagonal(&a) > tol{
        u = u.qr().q();
        a = change_basis(op, &u);
        jacobi_refine(&mut a, &mut u, tol);
        vals = (0..n).map(|i| a[(i, i)].re).collect();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| vals[x].total_cmp(&vals[y]));
    let sorted: Vec<f64> = order.iter().map(|&i| vals[i]).collect();
    let mut vecs = DenseOp::zeros(n, n);
    for (k, &i) in order.iter().enumerate(){
        vecs.set_column(k, &u.column(i));
    }

    (sorted, vecs)
}
