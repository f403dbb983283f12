use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{c64, EdError, Result, Statistic};

/// An ordered grid of imaginary times or frequencies at inverse temperature beta
pub trait Mesh{
    type Point: Copy;

    fn beta(&self) -> f64;
    fn statistic(&self) -> Statistic;
    fn len(&self) -> usize;
    fn point(&self, i: usize) -> Self::Point;

    fn is_empty(&self) -> bool{
        self.len() == 0
    }

    fn points(&self) -> Vec<Self::Point>{
        (0..self.len()).map(|i| self.point(i)).collect()
    }
}

fn check_beta(beta: f64) -> Result<()>{
    if !(beta > 0.0 && beta.is_finite()){
        return Err(EdError::precondition(format!("mesh inverse temperature must be positive, got {}", beta)));
    }
    Ok(())
}

/// τ_k = β k / (n - 1), k = 0..n, both ends included
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImTimeMesh{
    beta: f64,
    statistic: Statistic,
    n_points: usize,
}

impl ImTimeMesh{
    pub fn new(beta: f64, statistic: Statistic, n_points: usize) -> Result<Self>{
        check_beta(beta)?;
        if n_points < 2{
            return Err(EdError::precondition(
                format!("an imaginary time mesh needs at least 2 points, got {}", n_points)));
        }
        Ok(ImTimeMesh{beta, statistic, n_points})
    }

    /// Spacing between consecutive times
    pub fn delta(&self) -> f64{
        self.beta / (self.n_points - 1) as f64
    }
}

impl Mesh for ImTimeMesh{
    type Point = f64;

    fn beta(&self) -> f64{
        self.beta
    }

    fn statistic(&self) -> Statistic{
        self.statistic
    }

    fn len(&self) -> usize{
        self.n_points
    }

    fn point(&self, i: usize) -> f64{
        // The last point is exactly β
        if i + 1 == self.n_points { self.beta } else { self.beta * i as f64 / (self.n_points - 1) as f64 }
    }
}

/// Non-negative Matsubara frequencies iω_n, n = 0..n_points:
/// (2n + 1)π/β for fermions and 2nπ/β for bosons
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatsubaraMesh{
    beta: f64,
    statistic: Statistic,
    n_points: usize,
}

impl MatsubaraMesh{
    pub fn new(beta: f64, statistic: Statistic, n_points: usize) -> Result<Self>{
        check_beta(beta)?;
        Ok(MatsubaraMesh{beta, statistic, n_points})
    }

    /// Real frequency ω_n
    pub fn omega(&self, n: usize) -> f64{
        match self.statistic{
            Statistic::Fermion => (2 * n + 1) as f64 * PI / self.beta,
            Statistic::Boson => (2 * n) as f64 * PI / self.beta,
        }
    }
}

impl Mesh for MatsubaraMesh{
    type Point = c64;

    fn beta(&self) -> f64{
        self.beta
    }

    fn statistic(&self) -> Statistic{
        self.statistic
    }

    fn len(&self) -> usize{
        self.n_points
    }

    fn point(&self, i: usize) -> c64{
        c64::new(0.0, self.omega(i))
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_im_time_mesh(){
        let m = ImTimeMesh::new(2.0, Statistic::Fermion, 5).unwrap();
        assert_eq!(m.points(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(m.delta(), 0.5);
        assert!(ImTimeMesh::new(2.0, Statistic::Fermion, 1).is_err());
        assert!(ImTimeMesh::new(-2.0, Statistic::Fermion, 10).is_err());
    }

    #[test]
    fn test_matsubara_mesh(){
        let f = MatsubaraMesh::new(PI, Statistic::Fermion, 3).unwrap();
        let b = MatsubaraMesh::new(PI, Statistic::Boson, 3).unwrap();
        assert_abs_diff_eq!(f.point(2).im, 5.0, epsilon = 1e-14);
        assert_abs_diff_eq!(b.point(2).im, 4.0, epsilon = 1e-14);
        assert_eq!(b.point(0), c64::new(0.0, 0.0));
        assert_eq!(f.len(), 3);
    }
}
