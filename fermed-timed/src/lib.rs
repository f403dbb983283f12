//! Time-ordering simplices of multi-time imaginary-time grids

pub mod simplex;
pub mod square_triangles;
pub mod cube_tetras;

pub use simplex::{enumerate_product, Permutation, SimplexMesh, SimplexPoint, TimeSimplex};
pub use square_triangles::{square_triangles, enumerate_tau2, SquareTrianglesMesh};
pub use cube_tetras::{cube_tetras, enumerate_tau3, CubeTetrasMesh};
