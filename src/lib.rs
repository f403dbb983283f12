//! Exact diagonalization of small fermionic Hamiltonians and the thermal
//! one-, two- and three-particle Green's functions they define.
//!
//! Hamiltonians are written as polynomials in ladder operators over an ordered
//! list of fundamental modes, mapped to sparse Fock-space matrices, and
//! diagonalized block by block. Correlators are evaluated in the Lehmann
//! representation and written into imaginary-time or Matsubara containers.

#[cfg(test)]
#[macro_use]
extern crate approx;

pub use fermed_core::{c, c_dag, n, c64, EdError, LadderOp, Mode, OpExpr, Result, Statistic};

pub mod config;
pub mod ed;
pub mod gf;
pub mod green;
pub mod therm;
pub mod util;

pub use config::{EdConfig, SpectrumMode};
pub use ed::{ExactDiagonalization, GfTauTarget};
pub use therm::SparseExactDiagonalization;
