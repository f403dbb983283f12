pub mod gibbs;
pub mod sparse_ed;
pub mod spectrum;

pub use sparse_ed::SparseExactDiagonalization;
