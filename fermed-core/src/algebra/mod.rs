pub mod free_algebra;
pub mod ladder;

pub use free_algebra::{AlgebraTarget, DynFreeAlgebra};
