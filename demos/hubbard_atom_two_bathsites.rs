//! Hubbard atom hybridized with two bath sites: single-particle Green's
//! function in imaginary time and frequency, and the two-particle correlator
//! with its disconnected part.

use log::info;

use fermed::gf::{GfContainer, GfImFreq, GfImTime, GfProduct, ImTimeMesh, MatsubaraMesh, Mesh, ProductGfContainer,
                 TailContainer};
use fermed::{c, c_dag, n, EdConfig, ExactDiagonalization, OpExpr, Result, Statistic};

const UP: usize = 0;
const DO: usize = 1;

fn hamiltonian(v1: f64, v2: f64, eps1: f64, eps2: f64, mu: f64, u: f64) -> OpExpr{
    let occ = |site: usize| n(UP, site) + n(DO, site);
    let hop = |a: usize, b: usize| c_dag(UP, a) * c(UP, b) + c_dag(UP, b) * c(UP, a)
        + c_dag(DO, a) * c(DO, b) + c_dag(DO, b) * c(DO, a);
    -mu * occ(0) + eps1 * occ(1) + eps2 * occ(2) + u * n(UP, 0) * n(DO, 0)
        + v1 * hop(0, 1) + v2 * hop(0, 2)
}

fn main() -> Result<()>{
    simple_logger::init_with_level(log::Level::Info).ok();

    let beta = 2.0;
    let h = hamiltonian(2.0, 5.0, 0.0, 4.0, 2.0, 1.0);
    let fops: Vec<OpExpr> = (0..3).flat_map(|site| [c(UP, site), c(DO, site)]).collect();
    let ed = ExactDiagonalization::with_config(&h, &fops, beta, EdConfig::default())?;
    info!("Z = {:.6}, F = {:.6}, E0 = {:.6}", ed.partition_function(), ed.free_energy(), ed.ground_state_energy());
    info!("<n_up n_do> = {:.6}", ed.expectation_value(&(n(UP, 0) * n(DO, 0)))?.re);

    let tau_mesh = ImTimeMesh::new(beta, Statistic::Fermion, 100)?;
    let mut g_tau = GfImTime::new(tau_mesh, [1, 1], 4);
    ed.set_g2_tau(&mut g_tau, &c(UP, 0), &c_dag(UP, 0))?;
    println!("G(tau):");
    for (i, t) in tau_mesh.points().into_iter().enumerate().step_by(11){
        println!("  {:8.4} {:12.8}", t, g_tau.get(i).re);
    }

    let iw_mesh = MatsubaraMesh::new(beta, Statistic::Fermion, 10)?;
    let mut g_iw = GfImFreq::new(iw_mesh, [1, 1], 4);
    ed.set_g2_iwn(&mut g_iw, &c(UP, 0), &c_dag(UP, 0))?;
    println!("G(iw):");
    for (i, z) in iw_mesh.points().into_iter().enumerate(){
        let g = g_iw.get(i);
        println!("  {:8.4} {:12.8} {:12.8}", z.im, g.re, g.im);
    }
    println!("tail: {:?}", g_iw.tail().coefficients());

    let m = ImTimeMesh::new(beta, Statistic::Fermion, 10)?;
    let mut g40 = GfProduct::new([m, m, m], [1, 1]);
    let mut g4 = GfProduct::new([m, m, m], [1, 1]);
    ed.set_g40_tau(&mut g40, &g_tau)?;
    let n_simplices = ed.set_g4_tau(&mut g4, &c(UP, 0), &c_dag(UP, 0), &c(UP, 0), &c_dag(UP, 0))?;
    info!("g4 from {} time orderings", n_simplices);

    let max_connected = g4.data().iter().zip(g40.data().iter())
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    println!("g4(0, 0, 0) = {:.8}", g4.get([0, 0, 0]).re);
    println!("max |g4 - g40| = {:.8}", max_connected);

    Ok(())
}
