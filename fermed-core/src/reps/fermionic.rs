//! Occupation-number representation of fermionic operators on the full Fock space.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::algebra::ladder::{LadderOp, Mode, OpExpr};
use crate::error::{EdError, Result};
use crate::reps::sparse::{self, from_triplets, Op};
use crate::util::scalar::real;

/// Largest number of modes a bitmask basis state can carry
pub const MAX_MODES: usize = 63;

/// A fermionic basis state is an occupation bitmask together with the sign
/// accumulated by the ladder operators applied so far.
/// Bit k holds the occupation of the k-th fundamental mode.
/// An annihilated state is represented by None
///
/// Ladder operators pick up the Jordan-Wigner sign (-1)^(number of occupied
/// modes preceding k), so that the ordering of the fundamental operators fixes
/// the sign convention of every matrix element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FermionicBasisKet{
    b: Option<(u64, i8)>
}

impl FermionicBasisKet{
    pub fn vacuum() -> Self{
        FermionicBasisKet{b: Some((0, 1))}
    }

    pub fn from_occupation(occ: u64) -> Self{
        FermionicBasisKet{b: Some((occ, 1))}
    }

    pub fn is_annihilated(&self) -> bool{
        self.b.is_none()
    }

    /// Occupation bitmask and sign, or None if annihilated
    pub fn state(&self) -> Option<(u64, i8)>{
        self.b
    }

    fn jw_sign(occ: u64, k: usize) -> i8{
        let below = occ & ((1u64 << k) - 1);
        if below.count_ones() % 2 == 0 { 1 } else { -1 }
    }

    /// Apply the creation operator of mode k. Doubly occupying a mode
    /// annihilates the state.
    pub fn raise(&mut self, k: usize){
        if let Some((occ, sign)) = self.b{
            let bit = 1u64 << k;
            self.b = if occ & bit != 0 {
                None
            } else {
                Some((occ | bit, sign * Self::jw_sign(occ, k)))
            };
        }
    }

    /// Apply the annihilation operator of mode k. Lowering an empty mode
    /// annihilates the state.
    pub fn lower(&mut self, k: usize){
        if let Some((occ, sign)) = self.b{
            let bit = 1u64 << k;
            self.b = if occ & bit == 0 {
                None
            } else {
                Some((occ & !bit, sign * Self::jw_sign(occ, k)))
            };
        }
    }
}

/// The ordered list of fundamental modes defining the single-particle basis
#[derive(Clone, Debug)]
pub struct FundamentalOperators{
    modes: Vec<Mode>,
    index: BTreeMap<Mode, usize>
}

impl FundamentalOperators{
    pub fn new(modes: Vec<Mode>) -> Result<Self>{
        let mut index = BTreeMap::new();
        for (k, &m) in modes.iter().enumerate(){
            if index.insert(m, k).is_some(){
                return Err(EdError::precondition(
                    format!("fundamental mode {} listed more than once", m)));
            }
        }
        Ok(FundamentalOperators{modes, index})
    }

    /// Collect the modes of single annihilation operators such as `c(up, 0)`
    pub fn from_expressions(ops: &[OpExpr]) -> Result<Self>{
        let modes = ops.iter().map(|op| match op{
            OpExpr::Element(LadderOp::Annihilate(m)) => Ok(*m),
            other => Err(EdError::precondition(
                format!("fundamental operators must be single annihilators, got {:?}", other)))
        }).collect::<Result<Vec<_>>>()?;
        Self::new(modes)
    }

    pub fn len(&self) -> usize{
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool{
        self.modes.is_empty()
    }

    pub fn modes(&self) -> &[Mode]{
        &self.modes
    }

    pub fn position(&self, m: &Mode) -> Option<usize>{
        self.index.get(m).copied()
    }
}

/// The 2^N occupation-number basis states of N modes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FockBasis{
    n_modes: usize
}

impl FockBasis{
    pub fn new(n_modes: usize) -> Result<Self>{
        if n_modes > MAX_MODES {
            return Err(EdError::precondition(
                format!("{} modes exceed the bitmask basis limit of {}", n_modes, MAX_MODES)));
        }
        Ok(FockBasis{n_modes})
    }

    pub fn n_modes(&self) -> usize{
        self.n_modes
    }

    pub fn dim(&self) -> usize{
        1usize << self.n_modes
    }

    pub fn kets(&self) -> impl Iterator<Item=FermionicBasisKet>{
        (0..self.dim() as u64).map(FermionicBasisKet::from_occupation)
    }

    /// Matrix of a single ladder operator acting on mode k
    fn ladder_matrix(&self, k: usize, create: bool) -> Op{
        let triplets = self.kets().enumerate().filter_map(|(col, mut ket)|{
            if create { ket.raise(k) } else { ket.lower(k) };
            ket.state().map(|(occ, sign)| (occ as usize, col, real(sign as f64)))
        });
        from_triplets(self.dim(), triplets)
    }
}

/// Sparse matrix representation of operator expressions over a fixed,
/// ordered set of fundamental modes
pub struct SparseMatrixRepresentation{
    fundamental_operators: FundamentalOperators,
    basis: FockBasis,
    creation: Vec<Op>,
    annihilation: Vec<Op>
}

impl SparseMatrixRepresentation{
    /// Build the Fock basis and the ladder matrices of every fundamental mode.
    /// `max_modes` bounds the size of the Fock space.
    pub fn new(fundamental_operators: FundamentalOperators, max_modes: usize) -> Result<Self>{
        let n_modes = fundamental_operators.len();
        if n_modes > max_modes{
            return Err(EdError::precondition(
                format!("Fock space of {} modes (dimension 2^{}) exceeds the configured limit of {} modes",
                        n_modes, n_modes, max_modes)));
        }
        let basis = FockBasis::new(n_modes)?;
        let creation: Vec<Op> = (0..n_modes).map(|k| basis.ladder_matrix(k, true)).collect();
        let annihilation: Vec<Op> = (0..n_modes).map(|k| basis.ladder_matrix(k, false)).collect();
        debug!("Fock representation: {} modes, dimension {}", n_modes, basis.dim());

        Ok(SparseMatrixRepresentation{fundamental_operators, basis, creation, annihilation})
    }

    pub fn basis(&self) -> &FockBasis{
        &self.basis
    }

    pub fn fundamental_operators(&self) -> &FundamentalOperators{
        &self.fundamental_operators
    }

    pub fn dim(&self) -> usize{
        self.basis.dim()
    }

    fn mode_position(&self, m: &Mode) -> Result<usize>{
        self.fundamental_operators.position(m).ok_or_else(||
            EdError::precondition(format!("mode {} is not among the fundamental operators", m)))
    }

    pub fn ladder_matrix(&self, l: &LadderOp) -> Result<Op>{
        match l{
            LadderOp::Create(m) => Ok(self.creation[self.mode_position(m)?].clone()),
            LadderOp::Annihilate(m) => Ok(self.annihilation[self.mode_position(m)?].clone())
        }
    }

    /// Sparse matrix of an arbitrary polynomial in the ladder operators
    pub fn sparse_matrix(&self, expr: &OpExpr) -> Result<Op>{
        let expr = expr.clone().simplify();
        let dim = self.dim();
        let op = expr.try_evaluate_ref(
            &|l: &LadderOp| self.ladder_matrix(l),
            &sparse::zero(dim),
            &sparse::identity(dim))?;
        trace!("sparse_matrix: {} non-zero elements", op.nnz());
        Ok(op)
    }

    /// Total particle number operator
    pub fn particle_number_operator(&self) -> Op{
        let dim = self.dim();
        from_triplets(dim, (0..dim).map(|s| (s, s, real((s as u64).count_ones() as f64))))
    }
}
