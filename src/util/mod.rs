pub mod degen;
pub mod interp_fn;

pub use fermed_core::util::scalar;
pub use interp_fn::LinearInterpFn;
