//! Correlator kernels of [`crate::therm::SparseExactDiagonalization`]:
//! two-point functions in imaginary time and frequency, high-frequency
//! tails, and time-ordered n-point functions.

pub mod freq;
pub mod ordered;
pub mod tau;
