#![allow(dead_code)]

use nalgebra::DMatrix;

use fermed::{c, c_dag, c64, n, OpExpr};
use fermed_core::reps::dense::to_dense;
use fermed_core::Op;

pub const UP: usize = 0;
pub const DO: usize = 1;

/// Hubbard atom (site 0) hybridized with two bath sites (1 and 2)
#[derive(Copy, Clone, Debug)]
pub struct HubbardAtom{
    pub beta: f64,
    pub v1: f64,
    pub v2: f64,
    pub eps1: f64,
    pub eps2: f64,
    pub mu: f64,
    pub u: f64,
}

impl Default for HubbardAtom{
    fn default() -> Self{
        HubbardAtom{beta: 2.0, v1: 2.0, v2: 5.0, eps1: 0.0, eps2: 4.0, mu: 2.0, u: 1.0}
    }
}

fn hop(a: usize, b: usize) -> OpExpr{
    c_dag(UP, a) * c(UP, b) + c_dag(UP, b) * c(UP, a)
        + c_dag(DO, a) * c(DO, b) + c_dag(DO, b) * c(DO, a)
}

fn occ(site: usize) -> OpExpr{
    n(UP, site) + n(DO, site)
}

impl HubbardAtom{
    pub fn hamiltonian(&self) -> OpExpr{
        let docc = n(UP, 0) * n(DO, 0);
        -self.mu * occ(0) + self.eps1 * occ(1) + self.eps2 * occ(2) + self.u * docc
            + self.v1 * hop(0, 1) + self.v2 * hop(0, 2)
    }

    pub fn fundamental_operators(&self) -> Vec<OpExpr>{
        vec![c(UP, 0), c(DO, 0), c(UP, 1), c(DO, 1), c(UP, 2), c(DO, 2)]
    }
}

/// Dense reference evaluator. Never diagonalizes: propagators are Taylor
/// series of the full Fock-space matrix with scaling and squaring, and
/// operator strings are time-ordered by explicit adjacent transpositions.
pub struct BruteForce{
    h: DMatrix<c64>,
    /// Gershgorin lower bound of the spectrum, subtracted from H
    shift: f64,
    beta: f64,
}

impl BruteForce{
    pub fn new(h: &Op, beta: f64) -> Self{
        let h = to_dense(h);
        let shift = (0..h.nrows()).map(|i|{
            let radius: f64 = (0..h.ncols()).filter(|&j| j != i).map(|j| h[(i, j)].norm()).sum();
            h[(i, i)].re - radius
        }).fold(f64::INFINITY, f64::min);
        BruteForce{h, shift, beta}
    }

    /// exp(-tau (H - shift))
    pub fn propagator(&self, tau: f64) -> DMatrix<c64>{
        let dim = self.h.nrows();
        let mut a = &self.h - DMatrix::<c64>::identity(dim, dim) * c64::from(self.shift);
        a *= c64::from(-tau);
        let norm = a.row_iter().map(|r| r.iter().map(|v| v.norm()).sum::<f64>()).fold(0.0, f64::max);
        let mut squarings = 0;
        while norm / 2f64.powi(squarings) > 0.25{
            squarings += 1;
        }
        a /= c64::from(2f64.powi(squarings));

        let mut term = DMatrix::<c64>::identity(dim, dim);
        let mut sum = term.clone();
        for k in 1..=20{
            term = &term * &a / c64::from(k as f64);
            sum += &term;
        }
        for _ in 0..squarings{
            sum = &sum * &sum;
        }
        sum
    }

    /// Tr exp(-beta (H - shift))
    pub fn partition_function(&self) -> f64{
        self.propagator(self.beta).trace().re
    }

    pub fn free_energy(&self) -> f64{
        self.shift - self.partition_function().ln() / self.beta
    }

    /// ⟨T O_1(τ_1) ... O_m(τ_m)⟩ for arbitrary, unordered times. Each entry is
    /// (operator, time, fermionic). Equal times keep the written order.
    pub fn time_ordered(&self, ops: &[(Op, f64, bool)]) -> c64{
        let mut order: Vec<usize> = (0..ops.len()).collect();
        let mut sign = 1.0;
        // bubble sort, latest time first
        for pass in 0..order.len(){
            for k in 0..order.len() - 1 - pass{
                let (a, b) = (order[k], order[k + 1]);
                if ops[b].1 > ops[a].1{
                    order.swap(k, k + 1);
                    if ops[a].2 && ops[b].2{
                        sign = -sign;
                    }
                }
            }
        }

        let dim = self.h.nrows();
        let mut prod = self.propagator(self.beta - ops[order[0]].1);
        for (k, &i) in order.iter().enumerate(){
            prod = &prod * to_dense(&ops[i].0);
            let next_t = order.get(k + 1).map(|&j| ops[j].1).unwrap_or(0.0);
            prod = &prod * self.propagator(ops[i].1 - next_t);
        }
        let tr = (0..dim).fold(c64::new(0.0, 0.0), |acc, i| acc + prod[(i, i)]);
        tr * sign / self.partition_function()
    }
}
