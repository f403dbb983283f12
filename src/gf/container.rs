use ndarray::{Array3, ArrayD, IxDyn};
use num_traits::Zero;

use crate::gf::mesh::{ImTimeMesh, MatsubaraMesh, Mesh};
use crate::gf::{GfContainer, ProductGfContainer, TailContainer};
use crate::util::interp_fn::LinearInterpFn;
use crate::{c64, EdError, Result};

/// High-frequency expansion `Σ_k data[k] / (iω)^k`, k = 1..=order_max.
/// `data[0]` is unused and stays zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Tail{
    order_max: usize,
    data: Vec<c64>,
}

impl Tail{
    pub fn new(order_max: usize) -> Self{
        Tail{order_max, data: vec![c64::zero(); order_max + 1]}
    }

    pub fn order_max(&self) -> usize{
        self.order_max
    }

    pub fn coefficient(&self, k: usize) -> Option<c64>{
        self.data.get(k).copied()
    }

    pub fn coefficients(&self) -> &[c64]{
        &self.data
    }

    pub fn set(&mut self, k: usize, v: c64) -> Result<()>{
        if k == 0 || k > self.order_max{
            return Err(EdError::precondition(
                format!("tail order {} outside 1..={}", k, self.order_max)));
        }
        self.data[k] = v;
        Ok(())
    }

    /// Value of the truncated expansion at z
    pub fn evaluate(&self, z: c64) -> c64{
        let inv = z.inv();
        let mut zk = c64::from(1.0);
        let mut acc = c64::zero();
        for &c in self.data.iter().skip(1){
            zk *= inv;
            acc += c * zk;
        }
        acc
    }
}

fn target_data(n: usize, target_shape: [usize; 2]) -> Array3<c64>{
    Array3::zeros((n, target_shape[0], target_shape[1]))
}

/// Imaginary-time Green's function with a high-frequency tail
#[derive(Clone, Debug)]
pub struct GfImTime{
    mesh: ImTimeMesh,
    data: Array3<c64>,
    tail: Tail,
}

impl GfImTime{
    pub fn new(mesh: ImTimeMesh, target_shape: [usize; 2], tail_order: usize) -> Self{
        GfImTime{data: target_data(mesh.len(), target_shape), mesh, tail: Tail::new(tail_order)}
    }

    /// Mesh point, then target indices
    pub fn data(&self) -> &Array3<c64>{
        &self.data
    }

    /// Linear interpolation of the (0, 0) component, extended to [-β, 0) with
    /// the periodicity of the mesh statistic
    pub fn interpolator(&self) -> Result<LinearInterpFn>{
        let values = (0..self.mesh.len()).map(|i| self.get(i)).collect();
        LinearInterpFn::new(values, 0.0, self.mesh.beta(), self.mesh.statistic().xi())
            .ok_or_else(|| EdError::precondition("imaginary time mesh too small to interpolate"))
    }
}

impl GfContainer for GfImTime{
    type Mesh = ImTimeMesh;

    fn mesh(&self) -> &ImTimeMesh{
        &self.mesh
    }

    fn target_shape(&self) -> [usize; 2]{
        let s = self.data.shape();
        [s[1], s[2]]
    }

    fn set(&mut self, i: usize, v: c64){
        self.data[[i, 0, 0]] = v;
    }

    fn get(&self, i: usize) -> c64{
        self.data[[i, 0, 0]]
    }
}

impl TailContainer for GfImTime{
    fn tail(&self) -> &Tail{
        &self.tail
    }

    fn tail_mut(&mut self) -> &mut Tail{
        &mut self.tail
    }
}

/// Matsubara-frequency Green's function with a high-frequency tail
#[derive(Clone, Debug)]
pub struct GfImFreq{
    mesh: MatsubaraMesh,
    data: Array3<c64>,
    tail: Tail,
}

impl GfImFreq{
    pub fn new(mesh: MatsubaraMesh, target_shape: [usize; 2], tail_order: usize) -> Self{
        GfImFreq{data: target_data(mesh.len(), target_shape), mesh, tail: Tail::new(tail_order)}
    }

    pub fn data(&self) -> &Array3<c64>{
        &self.data
    }
}

impl GfContainer for GfImFreq{
    type Mesh = MatsubaraMesh;

    fn mesh(&self) -> &MatsubaraMesh{
        &self.mesh
    }

    fn target_shape(&self) -> [usize; 2]{
        let s = self.data.shape();
        [s[1], s[2]]
    }

    fn set(&mut self, i: usize, v: c64){
        self.data[[i, 0, 0]] = v;
    }

    fn get(&self, i: usize) -> c64{
        self.data[[i, 0, 0]]
    }
}

impl TailContainer for GfImFreq{
    fn tail(&self) -> &Tail{
        &self.tail
    }

    fn tail_mut(&mut self) -> &mut Tail{
        &mut self.tail
    }
}

/// Correlator on a product of N imaginary-time meshes
#[derive(Clone, Debug)]
pub struct GfProduct<const N: usize>{
    meshes: [ImTimeMesh; N],
    target_shape: [usize; 2],
    data: ArrayD<c64>,
}

impl<const N: usize> GfProduct<N>{
    pub fn new(meshes: [ImTimeMesh; N], target_shape: [usize; 2]) -> Self{
        let mut shape: Vec<usize> = meshes.iter().map(|m| m.len()).collect();
        shape.extend_from_slice(&target_shape);
        GfProduct{meshes, target_shape, data: ArrayD::zeros(IxDyn(&shape))}
    }

    /// Mesh indices, then target indices
    pub fn data(&self) -> &ArrayD<c64>{
        &self.data
    }

    fn full_index(idx: [usize; N]) -> Vec<usize>{
        let mut full = idx.to_vec();
        full.extend_from_slice(&[0, 0]);
        full
    }
}

impl<const N: usize> ProductGfContainer<N> for GfProduct<N>{
    fn meshes(&self) -> &[ImTimeMesh; N]{
        &self.meshes
    }

    fn target_shape(&self) -> [usize; 2]{
        self.target_shape
    }

    fn set(&mut self, idx: [usize; N], v: c64){
        self.data[IxDyn(&Self::full_index(idx))] = v;
    }

    fn get(&self, idx: [usize; N]) -> c64{
        self.data[IxDyn(&Self::full_index(idx))]
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::Statistic;

    #[test]
    fn test_tail(){
        let mut t = Tail::new(2);
        t.set(1, c64::from(1.0)).unwrap();
        t.set(2, c64::from(0.5)).unwrap();
        assert!(t.set(0, c64::from(1.0)).is_err());
        assert!(t.set(3, c64::from(1.0)).is_err());
        let z = c64::new(0.0, 2.0);
        assert_abs_diff_eq!(t.evaluate(z), 1.0 / z + 0.5 / (z * z), epsilon = 1e-15);
        assert_eq!(t.coefficient(0), Some(c64::zero()));
    }

    #[test]
    fn test_containers(){
        let m = ImTimeMesh::new(1.0, Statistic::Fermion, 3).unwrap();
        let mut g = GfImTime::new(m, [1, 1], 4);
        g.set(2, c64::from(-0.25));
        assert_eq!(g.get(2), c64::from(-0.25));
        assert_eq!(g.target_shape(), [1, 1]);
        assert_eq!(g.tail().order_max(), 4);

        let mut g3 = GfProduct::new([m, m], [1, 1]);
        g3.set([1, 2], c64::new(0.0, 1.0));
        assert_eq!(g3.get([1, 2]), c64::new(0.0, 1.0));
        assert_eq!(g3.data().shape(), &[3, 3, 1, 1]);
    }
}
