//! Core building blocks for exact diagonalization of small fermionic systems:
//! a free operator algebra over ladder operators, its sparse Fock-space
//! representation, and a dense Hermitian eigensolver.

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod algebra;
pub mod eig;
pub mod error;
pub mod reps;
pub mod util;

pub use error::{EdError, Result};
pub use util::scalar::c64;
pub use util::statistic::Statistic;
pub use algebra::ladder::{c, c_dag, n, LadderOp, Mode, OpExpr};
pub use reps::fermionic::{FockBasis, FundamentalOperators, SparseMatrixRepresentation};
pub use reps::sparse::Op;
