/// Complex scalar used for every operator and correlator value.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex64;

pub fn real(x: f64) -> c64 {
    c64::new(x, 0.0)
}
