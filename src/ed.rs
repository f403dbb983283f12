//! Exact diagonalization of operator expressions, filling Green's function
//! containers.

use log::{debug, info};

use fermed_core::reps::dense::DenseOp;
use fermed_core::{FundamentalOperators, Op, OpExpr, SparseMatrixRepresentation};
use fermed_timed::{cube_tetras, enumerate_tau3, square_triangles, SimplexMesh};

use crate::config::EdConfig;
use crate::gf::{GfContainer, GfImTime, GfProduct, ImTimeMesh, MatsubaraMesh, Mesh, ProductGfContainer, TailContainer};
use crate::therm::SparseExactDiagonalization;
use crate::{c64, EdError, Result, Statistic};

/// Target of [`ExactDiagonalization::set_gn_tau`], by number of operators
pub enum GfTauTarget<'a>{
    Two(&'a mut GfImTime),
    Three(&'a mut GfProduct<2>),
    Four(&'a mut GfProduct<3>),
}

pub struct ExactDiagonalization{
    beta: f64,
    rep: SparseMatrixRepresentation,
    ed: SparseExactDiagonalization,
}

fn check_target_shape(shape: [usize; 2]) -> Result<()>{
    if shape != [1, 1]{
        return Err(EdError::precondition(format!("target shape must be [1, 1], got {:?}", shape)));
    }
    Ok(())
}

impl ExactDiagonalization{
    /// `fundamental_operators` are single annihilators `c(block, index)`; their
    /// order fixes the fermionic sign convention of the Fock basis.
    pub fn new(h: &OpExpr, fundamental_operators: &[OpExpr], beta: f64) -> Result<Self>{
        Self::with_config(h, fundamental_operators, beta, EdConfig::default())
    }

    pub fn with_config(h: &OpExpr, fundamental_operators: &[OpExpr], beta: f64, config: EdConfig) -> Result<Self>{
        config.validate()?;
        if !(beta > 0.0 && beta.is_finite()){
            return Err(EdError::precondition(format!("inverse temperature must be positive and finite, got {}", beta)));
        }
        let fops = FundamentalOperators::from_expressions(fundamental_operators)?;
        let rep = SparseMatrixRepresentation::new(fops, config.max_modes)?;
        let h_mat = rep.sparse_matrix(h)?;
        info!("ExactDiagonalization: {} fundamental modes, beta = {}", rep.fundamental_operators().len(), beta);
        let ed = SparseExactDiagonalization::with_config(h_mat, beta, config)?;

        Ok(ExactDiagonalization{beta, rep, ed})
    }

    pub fn beta(&self) -> f64{
        self.beta
    }

    pub fn rep(&self) -> &SparseMatrixRepresentation{
        &self.rep
    }

    pub fn ed(&self) -> &SparseExactDiagonalization{
        &self.ed
    }

    pub fn sparse_matrix(&self, op: &OpExpr) -> Result<Op>{
        self.rep.sparse_matrix(op)
    }

    pub fn expectation_value(&self, op: &OpExpr) -> Result<c64>{
        self.ed.expectation_value(&self.rep.sparse_matrix(op)?)
    }

    pub fn free_energy(&self) -> f64{
        self.ed.free_energy()
    }

    pub fn partition_function(&self) -> f64{
        self.ed.partition_function()
    }

    pub fn density_matrix(&self) -> &DenseOp{
        self.ed.density_matrix()
    }

    pub fn ground_state_energy(&self) -> f64{
        self.ed.ground_state_energy()
    }

    /// Exchange sign of a mesh statistic
    pub fn xi(statistic: Statistic) -> f64{
        statistic.xi()
    }

    fn check_beta(&self, beta: f64) -> Result<()>{
        if beta != self.beta{
            return Err(EdError::precondition(
                format!("mesh beta {} differs from the diagonalization beta {}", beta, self.beta)));
        }
        Ok(())
    }

    /// `G(τ) = -⟨T A(τ) B(0)⟩` on the mesh of `g`, and the tail of its transform
    pub fn set_g2_tau<G>(&self, g: &mut G, op1: &OpExpr, op2: &OpExpr) -> Result<()>
        where G: GfContainer<Mesh=ImTimeMesh> + TailContainer
    {
        self.check_beta(g.mesh().beta())?;
        check_target_shape(g.target_shape())?;
        let a = self.rep.sparse_matrix(op1)?;
        let b = self.rep.sparse_matrix(op2)?;
        let xi = Self::xi(g.mesh().statistic());

        let values = self.ed.tau_greens_function_component(&g.mesh().points(), &a, &b, xi)?;
        let tail = self.ed.high_frequency_tail_coeff_component(&a, &b, xi, g.tail().order_max())?;
        for (i, v) in values.into_iter().enumerate(){
            g.set(i, v);
        }
        Self::write_tail(g, tail)
    }

    /// `G(iω_n)` on the mesh of `g`, and its tail
    pub fn set_g2_iwn<G>(&self, g: &mut G, op1: &OpExpr, op2: &OpExpr) -> Result<()>
        where G: GfContainer<Mesh=MatsubaraMesh> + TailContainer
    {
        self.check_beta(g.mesh().beta())?;
        check_target_shape(g.target_shape())?;
        let a = self.rep.sparse_matrix(op1)?;
        let b = self.rep.sparse_matrix(op2)?;
        let xi = Self::xi(g.mesh().statistic());

        let values = self.ed.frequency_greens_function_component(&g.mesh().points(), &a, &b, xi)?;
        let tail = self.ed.high_frequency_tail_coeff_component(&a, &b, xi, g.tail().order_max())?;
        for (i, v) in values.into_iter().enumerate(){
            g.set(i, v);
        }
        Self::write_tail(g, tail)
    }

    /// Fill the tail of `g` up to its maximal order from the moments of `A`, `B`
    pub fn set_tail<G>(&self, g: &mut G, a: &Op, b: &Op) -> Result<()>
        where G: GfContainer + TailContainer
    {
        self.check_beta(g.mesh().beta())?;
        let xi = Self::xi(g.mesh().statistic());
        let tail = self.ed.high_frequency_tail_coeff_component(a, b, xi, g.tail().order_max())?;
        Self::write_tail(g, tail)
    }

    fn write_tail<G: TailContainer>(g: &mut G, coeffs: Vec<c64>) -> Result<()>{
        for (k, c) in coeffs.into_iter().enumerate(){
            g.tail_mut().set(k + 1, c)?;
        }
        Ok(())
    }

    /// Evaluate the time-ordered correlator of `ops` on every point of the
    /// product mesh of `g`, one kernel call per time-ordering simplex.
    /// The last operator sits at τ = 0. `simplex_mesh` splits the product
    /// grid into simplices. Returns the number of simplices.
    fn set_ordered_tau<const N: usize, G, F>(&self, g: &mut G, ops: &[&OpExpr], simplex_mesh: F) -> Result<usize>
        where G: ProductGfContainer<N>,
              F: FnOnce([&[f64]; N], f64, [Statistic; N]) -> Result<SimplexMesh<N>>
    {
        if ops.len() != N + 1{
            return Err(EdError::precondition(
                format!("a {}-time mesh needs {} operators, got {}", N, N + 1, ops.len())));
        }
        check_target_shape(g.target_shape())?;
        let meshes = *g.meshes();
        for m in meshes.iter(){
            self.check_beta(m.beta())?;
        }

        let eig_ops = ops.iter()
            .map(|op| self.rep.sparse_matrix(op).and_then(|m| self.ed.to_eigenbasis(&m)))
            .collect::<Result<Vec<_>>>()?;
        let points: Vec<Vec<f64>> = meshes.iter().map(|m| m.points()).collect();
        let axes: [&[f64]; N] = std::array::from_fn(|k| points[k].as_slice());
        let statistics: [Statistic; N] = std::array::from_fn(|k| meshes[k].statistic());

        let mut simplices = simplex_mesh(axes, self.beta, statistics)?;
        let mut values: Vec<([usize; N], c64)> = Vec::new();
        for simplex in simplices.by_ref(){
            let mut ordered_ops: Vec<&DenseOp> = simplex.permutation.as_array().iter()
                .map(|&k| &eig_ops[k]).collect();
            ordered_ops.push(&eig_ops[N]);
            let data = self.ed.timeordered_greens_function_eigenbasis(&simplex.ordered_taus(), &ordered_ops)?;
            values.extend(simplex.points.iter().zip(data).map(|(p, d)| (p.index, d * simplex.sign)));
        }
        let n_simplices = simplices.simplices_yielded();
        debug!("{}-point correlator: {} values from {} simplices", N + 1, values.len(), n_simplices);

        for (idx, v) in values{
            g.set(idx, v);
        }
        Ok(n_simplices)
    }

    /// `⟨T O1(τ1) O2(τ2) O3(0)⟩` on a two-time product mesh
    pub fn set_g3_tau<G>(&self, g3: &mut G, op1: &OpExpr, op2: &OpExpr, op3: &OpExpr) -> Result<usize>
        where G: ProductGfContainer<2>
    {
        self.set_ordered_tau::<2, _, _>(g3, &[op1, op2, op3],
            |[t1, t2], beta, stats| square_triangles(t1, t2, beta, stats))
    }

    /// `⟨T O1(τ1) O2(τ2) O3(τ3) O4(0)⟩` on a three-time product mesh
    pub fn set_g4_tau<G>(&self, g4: &mut G, op1: &OpExpr, op2: &OpExpr, op3: &OpExpr, op4: &OpExpr) -> Result<usize>
        where G: ProductGfContainer<3>
    {
        self.set_ordered_tau::<3, _, _>(g4, &[op1, op2, op3, op4],
            |[t1, t2, t3], beta, stats| cube_tetras(t1, t2, t3, beta, stats))
    }

    /// Disconnected two-particle correlator from Wick's theorem,
    /// `g(τ1 - τ2) g(τ3) - g(τ1) g(τ3 - τ2)`, with `g` interpolated linearly
    /// from `g_tau`. At τ3 = τ2 the creator at τ2 counts as the later operator.
    pub fn set_g40_tau<G>(&self, g40: &mut G, g_tau: &GfImTime) -> Result<()>
        where G: ProductGfContainer<3>
    {
        self.check_beta(g_tau.mesh().beta())?;
        check_target_shape(g_tau.target_shape())?;
        check_target_shape(g40.target_shape())?;
        let meshes = *g40.meshes();
        for m in meshes.iter(){
            self.check_beta(m.beta())?;
        }
        let g = g_tau.interpolator()?;

        let (p1, p2, p3) = (meshes[0].points(), meshes[1].points(), meshes[2].points());
        let values: Vec<_> = enumerate_tau3(&p1, &p2, &p3).map(|(idx, [t1, t2, t3])|{
            (idx, g.at(t1 - t2) * g.at(t3) - g.at(t1) * g.at_below(t3 - t2))
        }).collect();
        for (idx, v) in values{
            g40.set(idx, v);
        }
        Ok(())
    }

    /// Dispatch on the number of operators: two fill `G(τ)`, three and four
    /// fill the two- and three-time correlators. Returns the number of
    /// time-ordering simplices evaluated (one for the two-point function).
    pub fn set_gn_tau(&self, target: GfTauTarget<'_>, ops: &[OpExpr]) -> Result<usize>{
        let refs: Vec<&OpExpr> = ops.iter().collect();
        match (refs.as_slice(), target){
            ([a, b], GfTauTarget::Two(g)) => self.set_g2_tau(g, a, b).map(|_| 1),
            ([a, b, c], GfTauTarget::Three(g)) => self.set_g3_tau(g, a, b, c),
            ([a, b, c, d], GfTauTarget::Four(g)) => self.set_g4_tau(g, a, b, c, d),
            (r, _) if !(2..=4).contains(&r.len()) => Err(EdError::unsupported(
                format!("{}-operator correlators are not implemented", r.len()))),
            (r, _) => Err(EdError::precondition(
                format!("target container does not match a {}-operator correlator", r.len()))),
        }
    }
}
