//! Fermionic creation and annihilation operators and the expressions built
//! from them.

use std::fmt;
use std::ops::{Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::algebra::free_algebra::DynFreeAlgebra;
use crate::util::scalar::{c64, real};

/// A fundamental single-particle mode, e.g. `(spin, site)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mode {
    pub block: usize,
    pub index: usize,
}

impl Mode {
    pub fn new(block: usize, index: usize) -> Self {
        Mode { block, index }
    }
}

impl From<(usize, usize)> for Mode {
    fn from(bi: (usize, usize)) -> Self {
        let (block, index) = bi;
        Mode { block, index }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.block, self.index)
    }
}

/// A single ladder operator acting on one mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LadderOp {
    Create(Mode),
    Annihilate(Mode),
}

impl LadderOp {
    pub fn mode(&self) -> Mode {
        match *self {
            LadderOp::Create(m) | LadderOp::Annihilate(m) => m,
        }
    }

    /// Takes `Create` to `Annihilate` and vice-versa.
    pub fn adjoint(self) -> Self {
        match self {
            LadderOp::Create(m) => LadderOp::Annihilate(m),
            LadderOp::Annihilate(m) => LadderOp::Create(m),
        }
    }
}

impl fmt::Display for LadderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LadderOp::Create(m) => write!(f, "c_dag{}", m),
            LadderOp::Annihilate(m) => write!(f, "c{}", m),
        }
    }
}

/// Polynomial in ladder operators with complex coefficients.
pub type OpExpr = DynFreeAlgebra<LadderOp, c64>;

/// Annihilation operator on mode `(block, index)`.
pub fn c(block: usize, index: usize) -> OpExpr {
    OpExpr::element(LadderOp::Annihilate(Mode::new(block, index)))
}

/// Creation operator on mode `(block, index)`.
pub fn c_dag(block: usize, index: usize) -> OpExpr {
    OpExpr::element(LadderOp::Create(Mode::new(block, index)))
}

/// Occupation number operator on mode `(block, index)`.
pub fn n(block: usize, index: usize) -> OpExpr {
    c_dag(block, index) * c(block, index)
}

impl OpExpr {
    /// Hermitian adjoint of the expression.
    pub fn dagger(&self) -> OpExpr {
        self.map_ref(&|l: &LadderOp| OpExpr::element(l.adjoint()), &|t: &c64| t.conj(), true)
    }

    /// Modes referenced anywhere in the expression, in first-seen order.
    pub fn modes(&self) -> Vec<Mode> {
        let mut modes = Vec::new();
        self.for_each_element(&mut |l: &LadderOp| {
            let m = l.mode();
            if !modes.contains(&m) {
                modes.push(m);
            }
        });
        modes
    }
}

impl Mul<c64> for OpExpr {
    type Output = OpExpr;
    fn mul(self, rhs: c64) -> OpExpr {
        self.scale(rhs)
    }
}

impl Mul<f64> for OpExpr {
    type Output = OpExpr;
    fn mul(self, rhs: f64) -> OpExpr {
        self.scale(real(rhs))
    }
}

impl Mul<OpExpr> for c64 {
    type Output = OpExpr;
    fn mul(self, rhs: OpExpr) -> OpExpr {
        rhs.scale(self)
    }
}

impl Mul<OpExpr> for f64 {
    type Output = OpExpr;
    fn mul(self, rhs: OpExpr) -> OpExpr {
        rhs.scale(real(self))
    }
}

impl Neg for OpExpr {
    type Output = OpExpr;
    fn neg(self) -> OpExpr {
        self.scale(real(-1.0))
    }
}

impl Sub for OpExpr {
    type Output = OpExpr;
    fn sub(self, rhs: OpExpr) -> OpExpr {
        self + (-rhs)
    }
}
