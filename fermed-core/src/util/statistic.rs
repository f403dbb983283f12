use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EdError;

/// Exchange statistics of an operator or of the mesh a correlator lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Fermion,
    Boson,
}

impl Statistic {
    /// The sign picked up under exchange: -1 for fermions, +1 for bosons.
    pub fn xi(self) -> f64 {
        match self {
            Statistic::Fermion => -1.0,
            Statistic::Boson => 1.0,
        }
    }

    pub fn is_fermionic(self) -> bool {
        matches!(self, Statistic::Fermion)
    }
}

impl FromStr for Statistic {
    type Err = EdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fermion" => Ok(Statistic::Fermion),
            "Boson" => Ok(Statistic::Boson),
            other => Err(EdError::precondition(format!("unknown statistic tag '{}'", other))),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Fermion => write!(f, "Fermion"),
            Statistic::Boson => write!(f, "Boson"),
        }
    }
}
