#[macro_use]
extern crate approx;

mod common;

use std::f64::consts::PI;

use fermed::gf::{GfContainer, GfImFreq, GfImTime, ImTimeMesh, MatsubaraMesh, Mesh, TailContainer};
use fermed::{c, c64, c_dag, EdError, ExactDiagonalization, GfTauTarget, Statistic};

use common::{BruteForce, HubbardAtom, UP};

fn hubbard_ed() -> (HubbardAtom, ExactDiagonalization){
    let model = HubbardAtom::default();
    let ed = ExactDiagonalization::new(&model.hamiltonian(), &model.fundamental_operators(), model.beta).unwrap();
    (model, ed)
}

#[test]
fn hubbard_atom_g_tau(){
    let (model, ed) = hubbard_ed();
    let mesh = ImTimeMesh::new(model.beta, Statistic::Fermion, 100).unwrap();
    let mut g_tau = GfImTime::new(mesh, [1, 1], 4);
    ed.set_g2_tau(&mut g_tau, &c(UP, 0), &c_dag(UP, 0)).unwrap();

    // Reference from dense propagators over the whole Fock space
    let bf = BruteForce::new(&ed.sparse_matrix(&model.hamiltonian()).unwrap(), model.beta);
    let cm = ed.sparse_matrix(&c(UP, 0)).unwrap();
    let cd = ed.sparse_matrix(&c_dag(UP, 0)).unwrap();
    for (i, t) in mesh.points().into_iter().enumerate(){
        let reference = -bf.time_ordered(&[(cm.clone(), t, true), (cd.clone(), 0.0, true)]);
        assert_abs_diff_eq!(g_tau.get(i), reference, epsilon = 1e-10);
    }

    // G(0) + G(β) = -⟨{c, c†}⟩ = -1
    assert_abs_diff_eq!(g_tau.get(0) + g_tau.get(99), c64::from(-1.0), epsilon = 1e-10);
    assert_abs_diff_eq!(g_tau.tail().coefficient(1).unwrap(), c64::from(1.0), epsilon = 1e-12);
}

#[test]
fn hubbard_atom_antiperiodicity(){
    let (model, ed) = hubbard_ed();
    let beta = model.beta;
    let cm = ed.sparse_matrix(&c(UP, 0)).unwrap();
    let cd = ed.sparse_matrix(&c_dag(UP, 0)).unwrap();
    let taus: Vec<f64> = (0..20).map(|k| beta * k as f64 / 19.0).collect();
    let shifted: Vec<f64> = taus.iter().map(|t| t - beta).collect();
    let g = ed.ed().tau_greens_function_component(&taus, &cm, &cd, -1.0).unwrap();
    let g_shifted = ed.ed().tau_greens_function_component(&shifted, &cm, &cd, -1.0).unwrap();
    for (a, b) in g.iter().zip(g_shifted.iter()){
        // G(τ - β) = -G(τ)
        assert_abs_diff_eq!(*b, -*a, epsilon = 1e-12);
    }
}

/// Simpson rule for ∫_0^β e^{iωτ} G(τ) dτ on an odd number of samples
fn simpson_transform(g: &[c64], beta: f64, omega: f64) -> c64{
    let n = g.len() - 1;
    let h = beta / n as f64;
    let mut acc = c64::new(0.0, 0.0);
    for (k, gk) in g.iter().enumerate(){
        let w = if k == 0 || k == n { 1.0 } else if k % 2 == 1 { 4.0 } else { 2.0 };
        acc += gk * c64::new(0.0, omega * k as f64 * h).exp() * w;
    }
    acc * h / 3.0
}

#[test]
fn hubbard_atom_g_iwn_matches_fourier_transform(){
    let (model, ed) = hubbard_ed();
    let mesh = MatsubaraMesh::new(model.beta, Statistic::Fermion, 10).unwrap();
    let mut g_iwn = GfImFreq::new(mesh, [1, 1], 4);
    ed.set_g2_iwn(&mut g_iwn, &c(UP, 0), &c_dag(UP, 0)).unwrap();

    let fine = ImTimeMesh::new(model.beta, Statistic::Fermion, 4001).unwrap();
    let mut g_tau = GfImTime::new(fine, [1, 1], 0);
    ed.set_g2_tau(&mut g_tau, &c(UP, 0), &c_dag(UP, 0)).unwrap();
    let samples: Vec<c64> = (0..fine.len()).map(|i| g_tau.get(i)).collect();

    for i in 0..mesh.len(){
        let ft = simpson_transform(&samples, model.beta, mesh.omega(i));
        assert_abs_diff_eq!(g_iwn.get(i), ft, epsilon = 1e-6);
        // G(-iω) = G(iω)* for a Hermitian pair c, c†
        assert!(g_iwn.get(i).im < 0.0);
    }
}

#[test]
fn hubbard_atom_density_correlator_is_periodic(){
    let (model, ed) = hubbard_ed();
    let beta = model.beta;
    let nm = ed.sparse_matrix(&fermed::n(UP, 0)).unwrap();
    let taus: Vec<f64> = (0..20).map(|k| beta * k as f64 / 19.0).collect();
    let shifted: Vec<f64> = taus.iter().map(|t| t - beta).collect();
    let chi = ed.ed().tau_greens_function_component(&taus, &nm, &nm, 1.0).unwrap();
    let chi_shifted = ed.ed().tau_greens_function_component(&shifted, &nm, &nm, 1.0).unwrap();
    for (a, b) in chi.iter().zip(chi_shifted.iter()){
        // χ(τ - β) = χ(τ)
        assert_abs_diff_eq!(*b, *a, epsilon = 1e-12);
    }
    // Both ends of [0, β] carry the same value, -⟨n_up⟩
    assert_abs_diff_eq!(chi[0], chi[19], epsilon = 1e-12);
    assert_abs_diff_eq!(chi[0], -ed.expectation_value(&fermed::n(UP, 0)).unwrap(), epsilon = 1e-12);
}

#[test]
fn hubbard_atom_chi_iwn_matches_fourier_transform(){
    let (model, ed) = hubbard_ed();
    let mesh = MatsubaraMesh::new(model.beta, Statistic::Boson, 4).unwrap();
    let mut chi_iwn = GfImFreq::new(mesh, [1, 1], 2);
    ed.set_g2_iwn(&mut chi_iwn, &fermed::n(UP, 0), &fermed::n(UP, 0)).unwrap();

    let fine = ImTimeMesh::new(model.beta, Statistic::Boson, 4001).unwrap();
    let mut chi_tau = GfImTime::new(fine, [1, 1], 0);
    ed.set_g2_tau(&mut chi_tau, &fermed::n(UP, 0), &fermed::n(UP, 0)).unwrap();
    let samples: Vec<c64> = (0..fine.len()).map(|i| chi_tau.get(i)).collect();

    for i in 0..mesh.len(){
        let ft = simpson_transform(&samples, model.beta, mesh.omega(i));
        assert_abs_diff_eq!(chi_iwn.get(i), ft, epsilon = 1e-6);
    }
    // Commutator [n, n] vanishes, so the 1/iν moment does too
    assert_abs_diff_eq!(chi_iwn.tail().coefficient(1).unwrap(), c64::from(0.0), epsilon = 1e-12);
}

#[test]
fn hubbard_atom_tail_matches_large_frequencies(){
    let (model, ed) = hubbard_ed();
    let mesh = MatsubaraMesh::new(model.beta, Statistic::Fermion, 1).unwrap();
    let mut g_iwn = GfImFreq::new(mesh, [1, 1], 5);
    ed.set_g2_iwn(&mut g_iwn, &c(UP, 0), &c_dag(UP, 0)).unwrap();
    let tail = g_iwn.tail();

    let cm = ed.sparse_matrix(&c(UP, 0)).unwrap();
    let cd = ed.sparse_matrix(&c_dag(UP, 0)).unwrap();
    for &n in &[400usize, 1000, 3000]{
        let z = c64::new(0.0, (2 * n + 1) as f64 * PI / model.beta);
        let g = ed.ed().frequency_greens_function_component(&[z], &cm, &cd, -1.0).unwrap()[0];
        let err = (g - tail.evaluate(z)).norm();
        assert!(err * z.norm().powi(5) < 1e6, "tail mismatch {} at n = {}", err, n);
    }
    // Second moment is the static Hartree shift -μ + U⟨n_do⟩
    let n_do = ed.expectation_value(&fermed::n(1, 0)).unwrap();
    assert_abs_diff_eq!(tail.coefficient(2).unwrap(), -model.mu + model.u * n_do, epsilon = 1e-10);
}

#[test]
fn set_tail_from_matrices(){
    let (model, ed) = hubbard_ed();
    let mesh = MatsubaraMesh::new(model.beta, Statistic::Fermion, 2).unwrap();
    let mut g = GfImFreq::new(mesh, [1, 1], 3);
    let cm = ed.sparse_matrix(&c(UP, 0)).unwrap();
    let cd = ed.sparse_matrix(&c_dag(UP, 0)).unwrap();
    ed.set_tail(&mut g, &cm, &cd).unwrap();
    assert_abs_diff_eq!(g.tail().coefficient(1).unwrap(), c64::from(1.0), epsilon = 1e-12);
    assert_eq!(g.get(0), c64::new(0.0, 0.0));
}

#[test]
fn failed_validation_leaves_container_untouched(){
    let (model, ed) = hubbard_ed();
    let wrong_beta = ImTimeMesh::new(model.beta + 1.0, Statistic::Fermion, 10).unwrap();
    let mut g = GfImTime::new(wrong_beta, [1, 1], 2);
    assert!(matches!(ed.set_g2_tau(&mut g, &c(UP, 0), &c_dag(UP, 0)), Err(EdError::PreconditionViolation(_))));
    assert!(g.data().iter().all(|v| *v == c64::new(0.0, 0.0)));

    let mesh = ImTimeMesh::new(model.beta, Statistic::Fermion, 10).unwrap();
    let mut g = GfImTime::new(mesh, [2, 2], 2);
    assert!(ed.set_g2_tau(&mut g, &c(UP, 0), &c_dag(UP, 0)).is_err());

    // Unknown mode fails after validation but before any write
    let mut g = GfImTime::new(mesh, [1, 1], 2);
    assert!(ed.set_g2_tau(&mut g, &c(UP, 5), &c_dag(UP, 0)).is_err());
    assert!(g.data().iter().all(|v| *v == c64::new(0.0, 0.0)));
    assert!(g.tail().coefficients().iter().all(|v| *v == c64::new(0.0, 0.0)));
}

#[test]
fn set_gn_tau_two_operators(){
    let (model, ed) = hubbard_ed();
    let mesh = ImTimeMesh::new(model.beta, Statistic::Fermion, 11).unwrap();
    let mut a = GfImTime::new(mesh, [1, 1], 2);
    let mut b = GfImTime::new(mesh, [1, 1], 2);
    ed.set_g2_tau(&mut a, &c(UP, 0), &c_dag(UP, 0)).unwrap();
    let n = ed.set_gn_tau(GfTauTarget::Two(&mut b), &[c(UP, 0), c_dag(UP, 0)]).unwrap();
    assert_eq!(n, 1);
    assert_eq!(a.data(), b.data());
}
