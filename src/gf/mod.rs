//! Interfaces of the Green's function containers filled by
//! [`crate::ExactDiagonalization`], and a minimal realization of them.

pub mod container;
pub mod mesh;

pub use container::{GfImFreq, GfImTime, GfProduct, Tail};
pub use mesh::{ImTimeMesh, MatsubaraMesh, Mesh};

use crate::c64;

/// A correlator on a single mesh, addressable by the linear mesh index
pub trait GfContainer{
    type Mesh: Mesh;

    fn mesh(&self) -> &Self::Mesh;
    fn target_shape(&self) -> [usize; 2];
    /// Assign the (0, 0) target component at mesh point i
    fn set(&mut self, i: usize, v: c64);
    fn get(&self, i: usize) -> c64;
}

pub trait TailContainer{
    fn tail(&self) -> &Tail;
    fn tail_mut(&mut self) -> &mut Tail;
}

/// A correlator on a product of N imaginary-time meshes, addressable by a
/// multi-index
pub trait ProductGfContainer<const N: usize>{
    fn meshes(&self) -> &[ImTimeMesh; N];
    fn target_shape(&self) -> [usize; 2];
    fn set(&mut self, idx: [usize; N], v: c64);
    fn get(&self, idx: [usize; N]) -> c64;
}
