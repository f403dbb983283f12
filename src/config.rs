//! Runtime configuration of the exact diagonalization

use serde::{Deserialize, Serialize};

use crate::{EdError, Result};

/// Which eigenpairs of the Hamiltonian are kept for thermal traces
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectrumMode{
    /// Every eigenpair of the Fock space
    Full,
    /// Only the n lowest eigenpairs. Thermal quantities become traces
    /// over their span.
    Lowest(usize)
}

impl Default for SpectrumMode{
    fn default() -> Self{
        SpectrumMode::Full
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdConfig{
    /// Largest accepted number of fundamental modes. The Fock space has 2^max_modes states.
    pub max_modes: usize,
    /// Diagonalize the connected blocks of the Hamiltonian separately
    pub use_blocks: bool,
    pub spectrum: SpectrumMode,
    /// Largest tolerated |H - H^dag| element
    pub hermitian_tol: f64,
    /// Energy differences below this are treated as exact degeneracies
    pub degeneracy_tol: f64,
}

impl Default for EdConfig{
    fn default() -> Self{
        EdConfig{
            max_modes: 14,
            use_blocks: true,
            spectrum: SpectrumMode::Full,
            hermitian_tol: 1.0e-10,
            degeneracy_tol: 1.0e-12,
        }
    }
}

impl EdConfig{
    pub fn with_max_modes(mut self, max_modes: usize) -> Self{
        self.max_modes = max_modes;
        self
    }

    pub fn with_blocks(mut self, use_blocks: bool) -> Self{
        self.use_blocks = use_blocks;
        self
    }

    pub fn with_spectrum(mut self, spectrum: SpectrumMode) -> Self{
        self.spectrum = spectrum;
        self
    }

    pub fn with_hermitian_tol(mut self, tol: f64) -> Self{
        self.hermitian_tol = tol;
        self
    }

    pub fn with_degeneracy_tol(mut self, tol: f64) -> Self{
        self.degeneracy_tol = tol;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self>{
        let cfg: EdConfig = serde_json::from_str(s)
            .map_err(|e| EdError::precondition(format!("invalid configuration: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()>{
        if let SpectrumMode::Lowest(0) = self.spectrum{
            return Err(EdError::precondition("SpectrumMode::Lowest must keep at least one state"));
        }
        if !(self.hermitian_tol >= 0.0) || !(self.degeneracy_tol >= 0.0){
            return Err(EdError::precondition("tolerances must be non-negative"));
        }
        Ok(())
    }
}
