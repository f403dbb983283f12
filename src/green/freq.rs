//! Matsubara-frequency Green's functions and their high-frequency expansion

use log::debug;
use num_traits::Zero;

use fermed_core::reps::sparse::{commutator, xi_commutator};
use fermed_core::Op;

use crate::therm::SparseExactDiagonalization;
use crate::{c64, EdError, Result};

impl SparseExactDiagonalization{
    /// Lehmann representation
    ///
    /// `G(z) = 1/Z Σ_{nm} A_nm B_mn (e^{-βE_n} - ξ e^{-βE_m}) / (z + E_n - E_m)`
    ///
    /// The bosonic zero-frequency term of a degenerate pair is the limit
    /// `-β e^{-βE_n} A_nm B_mn / Z`. Any other vanishing denominator with a
    /// non-zero matrix element is a [`EdError::NumericalDegeneracy`].
    pub fn frequency_greens_function_component(&self, zs: &[c64], a: &Op, b: &Op, xi: f64) -> Result<Vec<c64>>{
        let a_eig = self.to_eigenbasis(a)?;
        let b_eig = self.to_eigenbasis(b)?;
        let energies = self.shifted_energies();
        let weights = self.boltzmann_weights();
        let z_part = self.partition_function();
        let tol = self.config().degeneracy_tol;
        let beta = self.beta();
        let k = energies.len();

        // Non-vanishing products A_nm B_mn
        let mut terms = Vec::new();
        for n in 0..k{
            for m in 0..k{
                let ab = a_eig[(n, m)] * b_eig[(m, n)];
                if ab.norm() > tol{
                    terms.push((n, m, ab));
                }
            }
        }

        let mut values = Vec::with_capacity(zs.len());
        for &z in zs{
            let mut acc = c64::zero();
            for &(n, m, ab) in terms.iter(){
                let de = energies[n] - energies[m];
                let denom = z + de;
                if denom.norm() < tol{
                    if xi > 0.0 && de.abs() < tol{
                        acc -= ab * beta * weights[n];
                        continue;
                    }
                    return Err(EdError::NumericalDegeneracy{n, m, denominator: denom.norm(), tol});
                }
                acc += ab * (weights[n] - xi * weights[m]) / denom;
            }
            values.push(acc / z_part);
        }
        debug!("G(iw) evaluated at {} frequencies over {} Lehmann terms", zs.len(), terms.len());

        Ok(values)
    }

    /// Coefficients `c_k` of `G(iω) ≈ Σ_k c_k / (iω)^k` for k = 1..=n_order,
    /// `c_k = ⟨[[A, H]_{k-1}, B]_{-ξ}⟩` with `[A, H]_0 = A`,
    /// `[A, H]_{j+1} = [[A, H]_j, H]` and `[X, B]_{-ξ} = XB - ξ BX`.
    pub fn high_frequency_tail_coeff_component(&self, a: &Op, b: &Op, xi: f64, n_order: usize) -> Result<Vec<c64>>{
        self.check_shape(a)?;
        self.check_shape(b)?;
        let h = self.hamiltonian();
        let mut nested = a.clone();
        let mut coeffs = Vec::with_capacity(n_order);
        for k in 1..=n_order{
            if k > 1{
                nested = commutator(&nested, h);
            }
            coeffs.push(self.expectation_value(&xi_commutator(&nested, b, xi))?);
        }
        Ok(coeffs)
    }
}
