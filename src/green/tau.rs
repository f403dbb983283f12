use log::debug;

use fermed_core::Op;

use crate::therm::SparseExactDiagonalization;
use crate::{c64, EdError, Result};

impl SparseExactDiagonalization{
    /// Imaginary-time Green's function `G(τ) = -⟨T A(τ) B(0)⟩`.
    ///
    /// For τ in [0, β] this is `-Tr[e^{-(β-τ)H} A e^{-τH} B] / Z`. Negative
    /// times in [-β, 0) use `G(τ) = ξ G(τ + β)`, ξ = -1 for fermions and
    /// +1 for bosons. Times outside [-β, β] are rejected.
    pub fn tau_greens_function_component(&self, taus: &[f64], a: &Op, b: &Op, xi: f64) -> Result<Vec<c64>>{
        let beta = self.beta();
        let mut shifted = Vec::with_capacity(taus.len());
        let mut factors = Vec::with_capacity(taus.len());
        for &t in taus{
            if !(-beta..=beta).contains(&t){
                return Err(EdError::precondition(format!("time {} lies outside [-{}, {}]", t, beta, beta)));
            }
            if t < 0.0{
                shifted.push([t + beta]);
                factors.push(-xi);
            } else {
                shifted.push([t]);
                factors.push(-1.0);
            }
        }
        let g = self.timeordered_greens_function(&shifted, &[a, b])?;
        debug!("G(tau) evaluated at {} times", taus.len());

        Ok(g.into_iter().zip(factors).map(|(v, f)| v * f).collect())
    }
}
