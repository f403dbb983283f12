//! Two-time grids, used by three-point correlators `⟨T O1(τ1) O2(τ2) O3(0)⟩`.
//! The square [0, β]² splits into the two triangles τ1 ≥ τ2 and τ2 > τ1.

use fermed_core::{Result, Statistic};

use crate::simplex::{enumerate_product, SimplexMesh};

pub type SquareTrianglesMesh = SimplexMesh<2>;

pub fn square_triangles(tau1: &[f64], tau2: &[f64], beta: f64,
                        statistics: [Statistic; 2]) -> Result<SquareTrianglesMesh>{
    SimplexMesh::new([tau1, tau2], beta, statistics)
}

pub fn enumerate_tau2<'a>(tau1: &'a [f64], tau2: &'a [f64])
        -> impl Iterator<Item=([usize; 2], [f64; 2])> + 'a{
    enumerate_product([tau1, tau2])
}
