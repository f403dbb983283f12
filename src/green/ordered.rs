//! Time-ordered n-point thermal correlators in the Lehmann representation.
//!
//! For operators `O_1 .. O_m` and times `β ≥ τ_1 ≥ ... ≥ τ_{m-1} ≥ 0`
//! (the last operator sits at τ = 0) the kernel evaluates
//!
//! `Tr[e^{-(β-τ_1)H} O_1 e^{-(τ_1-τ_2)H} O_2 ... e^{-τ_{m-1}H} O_m] / Z`
//!
//! as a chain of dense products in the energy eigenbasis. Every exponent is a
//! non-positive multiple of a ground-state-shifted energy.

use log::trace;
use num_traits::Zero;

use fermed_core::reps::dense::DenseOp;
use fermed_core::Op;

use crate::therm::SparseExactDiagonalization;
use crate::{c64, EdError, Result};

/// Scale row i of `a` by exp(-dt E_i)
fn propagate_rows(a: &DenseOp, energies: &[f64], dt: f64) -> DenseOp{
    let mut out = a.clone();
    for (i, mut row) in out.row_iter_mut().enumerate(){
        row *= c64::from((-dt * energies[i]).exp());
    }
    out
}

/// Scale column j of `a` by exp(-dt E_j)
fn propagate_cols(a: &mut DenseOp, energies: &[f64], dt: f64){
    for (j, mut col) in a.column_iter_mut().enumerate(){
        col *= c64::from((-dt * energies[j]).exp());
    }
}

/// Tr(a b) without forming the product
fn trace_of_product(a: &DenseOp, b: &DenseOp) -> c64{
    let mut acc = c64::zero();
    for i in 0..a.nrows(){
        for k in 0..a.ncols(){
            acc += a[(i, k)] * b[(k, i)];
        }
    }
    acc
}

impl SparseExactDiagonalization{
    fn check_ordered_times(&self, taus: &[f64]) -> Result<()>{
        let beta = self.beta();
        let mut prev = beta;
        for &t in taus{
            if !(0.0..=beta).contains(&t){
                return Err(EdError::precondition(format!("time {} lies outside [0, {}]", t, beta)));
            }
            if t > prev{
                return Err(EdError::precondition(
                    format!("times {:?} are not in non-increasing order", taus)));
            }
            prev = t;
        }
        Ok(())
    }

    /// Time-ordered correlator of operators already expressed in the eigenbasis,
    /// one value per time tuple. `ops.len()` must be `N + 1`.
    pub fn timeordered_greens_function_eigenbasis<const N: usize>(
        &self, taus: &[[f64; N]], ops: &[&DenseOp]) -> Result<Vec<c64>>
    {
        if N == 0{
            return Err(EdError::unsupported("time-ordered correlators need at least one time argument"));
        }
        if ops.len() != N + 1{
            return Err(EdError::precondition(
                format!("{} time arguments need {} operators, got {}", N, N + 1, ops.len())));
        }
        let k = self.n_states();
        if let Some(op) = ops.iter().find(|op| op.shape() != (k, k)){
            return Err(EdError::precondition(
                format!("eigenbasis operator of shape {:?}, expected {:?}", op.shape(), (k, k))));
        }
        for t in taus{
            self.check_ordered_times(t)?;
        }

        let beta = self.beta();
        let energies = self.shifted_energies();
        let z = self.partition_function();

        let values = taus.iter().map(|t|{
            // Imaginary-time intervals between consecutive operators, from the left
            let mut m = propagate_rows(ops[0], energies, beta - t[0]);
            for j in 1..N{
                propagate_cols(&mut m, energies, t[j - 1] - t[j]);
                m = &m * ops[j];
            }
            propagate_cols(&mut m, energies, t.last().map_or(0.0, |&last| last));
            trace_of_product(&m, ops[N]) / z
        }).collect();
        trace!("time-ordered {}-point kernel evaluated at {} time tuples", N + 1, taus.len());

        Ok(values)
    }

    /// Time-ordered correlator of Fock-space operators
    pub fn timeordered_greens_function<const N: usize>(
        &self, taus: &[[f64; N]], ops: &[&Op]) -> Result<Vec<c64>>
    {
        let eig_ops = ops.iter().map(|op| self.to_eigenbasis(op)).collect::<Result<Vec<_>>>()?;
        let refs: Vec<&DenseOp> = eig_ops.iter().collect();
        self.timeordered_greens_function_eigenbasis(taus, &refs)
    }

    /// `⟨T O1(τ1) O2(τ2) O3(0)⟩` for `τ1 ≥ τ2`
    pub fn timeordered_two_tau_greens_function(&self, taus: &[[f64; 2]], ops: [&Op; 3]) -> Result<Vec<c64>>{
        self.timeordered_greens_function(taus, &ops)
    }

    /// `⟨T O1(τ1) O2(τ2) O3(τ3) O4(0)⟩` for `τ1 ≥ τ2 ≥ τ3`
    pub fn timeordered_three_tau_greens_function(&self, taus: &[[f64; 3]], ops: [&Op; 4]) -> Result<Vec<c64>>{
        self.timeordered_greens_function(taus, &ops)
    }
}
