//! Three-time grids, used by four-point correlators
//! `⟨T O1(τ1) O2(τ2) O3(τ3) O4(0)⟩`. The cube [0, β]³ splits into six
//! tetrahedra, one per ordering of (τ1, τ2, τ3).

use fermed_core::{Result, Statistic};

use crate::simplex::{enumerate_product, SimplexMesh};

pub type CubeTetrasMesh = SimplexMesh<3>;

pub fn cube_tetras(tau1: &[f64], tau2: &[f64], tau3: &[f64], beta: f64,
                   statistics: [Statistic; 3]) -> Result<CubeTetrasMesh>{
    SimplexMesh::new([tau1, tau2, tau3], beta, statistics)
}

pub fn enumerate_tau3<'a>(tau1: &'a [f64], tau2: &'a [f64], tau3: &'a [f64])
        -> impl Iterator<Item=([usize; 3], [f64; 3])> + 'a{
    enumerate_product([tau1, tau2, tau3])
}
