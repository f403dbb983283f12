use ndarray::Array1;

/// Boltzmann weights `exp(-beta (E_n - E_0))` of an ascending spectrum
/// and their sum
#[derive(Clone, Debug)]
pub struct GibbsResult{
    pub boltz_weights: Array1<f64>,
    pub partition_z: f64,
}

/// Energies are shifted by the ground state energy before exponentiation, so
/// every weight lies in (0, 1] and the ground state has weight one.
/// Returns the weights together with the shift.
pub fn gibbs_state(energies: &[f64], beta: f64) -> (GibbsResult, f64){
    let e0 = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let mut vals: Array1<f64> = Array1::from(energies.to_vec());
    vals.mapv_inplace(|e| (-beta * (e - e0)).exp());
    let z_partfn = vals.sum();

    (GibbsResult{boltz_weights: vals, partition_z: z_partfn}, e0)
}
