pub mod dense;
pub mod fermionic;
pub mod sparse;
