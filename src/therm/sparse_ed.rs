//! Thermal state of a Hamiltonian given as a sparse Fock-space matrix

use std::sync::OnceLock;

use log::{debug, info, warn};
use num_traits::Zero;

use fermed_core::reps::dense::{change_basis_sparse, sparse_mul_dense, unchange_basis, DenseOp};
use fermed_core::reps::sparse::{hermitian_deviation, is_hermitian};
use fermed_core::Op;

use crate::config::EdConfig;
use crate::therm::gibbs::{gibbs_state, GibbsResult};
use crate::therm::spectrum::{diagonalize, Spectrum};
use crate::util::degen::degeneracy_detect;
use crate::{c64, EdError, Result};

/// Exact diagonalization of a sparse Hamiltonian at inverse temperature beta.
///
/// Energies are stored relative to the ground state energy `E0`. Boltzmann
/// weights, the partition function and the density matrix are computed on
/// first use and cached for the lifetime of the object.
pub struct SparseExactDiagonalization{
    h: Op,
    beta: f64,
    config: EdConfig,
    e0: f64,
    /// E_n - E0, ascending
    energies: Vec<f64>,
    /// Eigenvectors as columns, Fock dimension x kept states
    u: DenseOp,
    n_blocks: usize,
    gibbs: OnceLock<GibbsResult>,
    rho: OnceLock<DenseOp>,
}

impl SparseExactDiagonalization{
    pub fn new(h: Op, beta: f64) -> Result<Self>{
        Self::with_config(h, beta, EdConfig::default())
    }

    pub fn with_config(h: Op, beta: f64, config: EdConfig) -> Result<Self>{
        config.validate()?;
        if !(beta > 0.0 && beta.is_finite()){
            return Err(EdError::precondition(format!("inverse temperature must be positive and finite, got {}", beta)));
        }
        if h.rows() != h.cols(){
            return Err(EdError::precondition(format!("Hamiltonian must be square, got {:?}", h.shape())));
        }
        if h.rows() == 0{
            return Err(EdError::precondition("Hamiltonian acts on an empty space"));
        }
        if !is_hermitian(&h, config.hermitian_tol){
            return Err(EdError::precondition(
                format!("Hamiltonian is not Hermitian: max |H - H^dag| = {:e}", hermitian_deviation(&h))));
        }

        let Spectrum{energies, vectors, n_blocks} = diagonalize(&h, config.use_blocks, config.spectrum);
        let e0 = energies[0];
        let energies: Vec<f64> = energies.into_iter().map(|e| e - e0).collect();

        let degens = degeneracy_detect(&energies, config.degeneracy_tol);
        if let Some(g) = degens.first().filter(|g| g[0] == 0){
            warn!("Ground state is {}-fold degenerate", g.len());
        }
        debug!("ED: {} degenerate multiplets", degens.len());
        info!("ED: dimension {}, {} blocks, {} states kept, E0 = {}", h.rows(), n_blocks, energies.len(), e0);

        Ok(SparseExactDiagonalization{
            h, beta, config, e0, energies, u: vectors, n_blocks,
            gibbs: OnceLock::new(), rho: OnceLock::new()
        })
    }

    pub fn beta(&self) -> f64{
        self.beta
    }

    pub fn config(&self) -> &EdConfig{
        &self.config
    }

    pub fn hamiltonian(&self) -> &Op{
        &self.h
    }

    /// Dimension of the Fock space
    pub fn dim(&self) -> usize{
        self.h.rows()
    }

    /// Number of eigenstates entering thermal traces
    pub fn n_states(&self) -> usize{
        self.energies.len()
    }

    pub fn n_blocks(&self) -> usize{
        self.n_blocks
    }

    /// Eigenenergies relative to the ground state energy, ascending
    pub fn shifted_energies(&self) -> &[f64]{
        &self.energies
    }

    pub fn eigenvectors(&self) -> &DenseOp{
        &self.u
    }

    pub fn ground_state_energy(&self) -> f64{
        self.e0
    }

    fn gibbs(&self) -> &GibbsResult{
        self.gibbs.get_or_init(||{
            let (g, _) = gibbs_state(&self.energies, self.beta);
            info!("ED: Z = {} (relative to exp(-beta E0))", g.partition_z);
            g
        })
    }

    /// `exp(-beta (E_n - E0))` for every kept eigenstate
    pub fn boltzmann_weights(&self) -> &[f64]{
        // Array1 built from a Vec is contiguous
        self.gibbs().boltz_weights.as_slice().unwrap_or(&[])
    }

    /// Z = sum_n exp(-beta (E_n - E0))
    pub fn partition_function(&self) -> f64{
        self.gibbs().partition_z
    }

    /// F = -ln(Z) / beta + E0
    pub fn free_energy(&self) -> f64{
        -self.partition_function().ln() / self.beta + self.e0
    }

    /// rho = exp(-beta (H - E0)) / Z in the Fock basis
    pub fn density_matrix(&self) -> &DenseOp{
        self.rho.get_or_init(||{
            let z = self.partition_function();
            let weights = self.boltzmann_weights();
            let w = DenseOp::from_fn(weights.len(), weights.len(),
                |i, j| if i == j { c64::from(weights[i] / z) } else { c64::zero() });
            unchange_basis(&w, &self.u)
        })
    }

    /// Operator in the eigenbasis of the kept states, U^dag O U
    pub fn to_eigenbasis(&self, op: &Op) -> Result<DenseOp>{
        self.check_shape(op)?;
        Ok(change_basis_sparse(op, &self.u))
    }

    pub fn check_shape(&self, op: &Op) -> Result<()>{
        let d = self.dim();
        if op.shape() != (d, d){
            return Err(EdError::precondition(
                format!("operator of shape {:?} does not act on the Fock space of dimension {}", op.shape(), d)));
        }
        Ok(())
    }

    /// Tr(rho O)
    pub fn expectation_value(&self, op: &Op) -> Result<c64>{
        self.check_shape(op)?;
        let z = self.partition_function();
        let u = &self.u;
        let ou = sparse_mul_dense(op, u);
        let mut acc = c64::zero();
        for (n, &w) in self.boltzmann_weights().iter().enumerate(){
            acc += u.column(n).dotc(&ou.column(n)) * w;
        }
        Ok(acc / z)
    }
}
