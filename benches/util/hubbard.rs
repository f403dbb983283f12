#![allow(dead_code)]

use criterion::{BenchmarkId, Criterion};
use rand::prelude::*;
use rand_distr::Normal;

use fermed::gf::{GfImTime, GfProduct, ImTimeMesh};
use fermed::therm::SparseExactDiagonalization;
use fermed::{c, c64, c_dag, n, EdConfig, ExactDiagonalization, OpExpr, Statistic};
use fermed_core::reps::sparse::from_triplets;

const UP: usize = 0;
const DO: usize = 1;

/// Hubbard atom coupled to `n_bath` bath sites, every bath site at energy `eps`
fn hubbard_chain(n_bath: usize, u: f64, mu: f64, v: f64, eps: f64) -> (OpExpr, Vec<OpExpr>){
    let mut h = -mu * (n(UP, 0) + n(DO, 0)) + u * n(UP, 0) * n(DO, 0);
    for site in 1..=n_bath{
        h = h + eps * (n(UP, site) + n(DO, site));
        for s in [UP, DO]{
            h = h + v * (c_dag(s, 0) * c(s, site) + c_dag(s, site) * c(s, 0));
        }
    }
    let fops = (0..=n_bath).flat_map(|site| [c(UP, site), c(DO, site)]).collect();
    (h, fops)
}

fn hubbard_ed(n_bath: usize, beta: f64) -> ExactDiagonalization{
    let (h, fops) = hubbard_chain(n_bath, 1.0, 0.5, 1.5, 0.3);
    ExactDiagonalization::with_config(&h, &fops, beta, EdConfig::default()).unwrap()
}

pub fn bench_random_hermitian_spectrum(c: &mut Criterion){
    let mut group = c.benchmark_group("Spectrum: Random sparse Hermitian");
    let mut r = StdRng::from_rng(thread_rng()).unwrap();
    let dist = Normal::new(0.0, 0.5_f64.sqrt()).unwrap();

    for dim in [16, 64, 256].iter(){
        // Tridiagonal, so a single connected block
        let mut triplets = Vec::new();
        for i in 0..*dim{
            triplets.push((i, i, c64::from(r.sample(dist))));
            if i + 1 < *dim{
                let z = c64::new(r.sample(dist), r.sample(dist));
                triplets.push((i, i + 1, z));
                triplets.push((i + 1, i, z.conj()));
            }
        }
        let h = from_triplets(*dim, triplets);
        group.bench_with_input(BenchmarkId::new("Diagonalize", dim), dim,
            |b, _| b.iter(|| SparseExactDiagonalization::new(h.clone(), 1.0).unwrap()));
    }
}

pub fn bench_hubbard_diagonalize(c: &mut Criterion){
    let mut group = c.benchmark_group("Hubbard atom: Diagonalize");
    for n_bath in [1, 2, 3].iter(){
        group.bench_with_input(BenchmarkId::new("Bath sites", n_bath), n_bath,
            |b, k| b.iter(|| hubbard_ed(*k, 10.0)));
    }
}

pub fn bench_hubbard_g_tau(c: &mut Criterion){
    let ed = hubbard_ed(2, 10.0);
    let mut group = c.benchmark_group("Hubbard atom: G(tau)");
    for n_tau in [100, 1000].iter(){
        let mesh = ImTimeMesh::new(10.0, Statistic::Fermion, *n_tau).unwrap();
        let mut g = GfImTime::new(mesh, [1, 1], 4);
        group.bench_with_input(BenchmarkId::new("Points", n_tau), n_tau,
            |b, _| b.iter(|| ed.set_g2_tau(&mut g, &c(UP, 0), &c_dag(UP, 0)).unwrap()));
    }
}

pub fn bench_hubbard_g4_tau(c: &mut Criterion){
    let ed = hubbard_ed(2, 10.0);
    let mut group = c.benchmark_group("Hubbard atom: g4(tau1, tau2, tau3)");
    for n_tau in [5, 10].iter(){
        let m = ImTimeMesh::new(10.0, Statistic::Fermion, *n_tau).unwrap();
        let mut g4 = GfProduct::new([m, m, m], [1, 1]);
        group.bench_with_input(BenchmarkId::new("Points per axis", n_tau), n_tau,
            |b, _| b.iter(|| ed.set_g4_tau(&mut g4,
                &c(UP, 0), &c_dag(UP, 0), &c(DO, 0), &c_dag(DO, 0)).unwrap()));
    }
}
