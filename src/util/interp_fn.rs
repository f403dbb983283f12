use crate::c64;

/// Linear interpolation of uniformly spaced complex samples on [lo, hi],
/// both ends included, extended to the whole line by f(x - L) = xi f(x),
/// L = hi - lo. xi = -1 is the antiperiodic extension of fermionic functions.
#[derive(Clone, Debug)]
pub struct LinearInterpFn{
    values: Vec<c64>,
    xi: f64,
    lo: f64,
    hi: f64,
    dt: f64
}

impl LinearInterpFn{
    /// Returns None unless there are at least two samples and hi > lo
    pub fn new(values: Vec<c64>, lo: f64, hi: f64, xi: f64) -> Option<Self>{
        let n = values.len();
        if n < 2 || !(hi > lo){
            return None;
        }
        let dt = (hi - lo) / ((n - 1) as f64);

        Some(Self{values, xi, lo, hi, dt})
    }

    fn inside(&self, x: f64) -> c64{
        let k = ((x - self.lo) / self.dt).floor().max(0.0);
        let m = (k as usize).min(self.values.len() - 2);
        let w = (x - self.lo) / self.dt - m as f64;
        let (y0, y1) = (self.values[m], self.values[m+1]);
        y0 * (1.0 - w) + y1 * w
    }

    pub fn at(&self, x: f64) -> c64{
        if x >= self.lo && x <= self.hi{
            return self.inside(x);
        }
        let period = self.hi - self.lo;
        let (shift, n) = if x < self.lo {
            let n = ((self.lo - x) / period).ceil();
            (n * period, n)
        } else {
            let n = ((x - self.hi) / period).ceil();
            (-n * period, n)
        };
        let factor = if (n as i64) % 2 == 0 { 1.0 } else { self.xi };
        self.inside((x + shift).clamp(self.lo, self.hi)) * factor
    }

    /// One-sided limit from below. Differs from [`Self::at`] only at the lower
    /// end, where the left limit is xi f(hi).
    pub fn at_below(&self, x: f64) -> c64{
        if x == self.lo{
            self.values[self.values.len() - 1] * self.xi
        } else {
            self.at(x)
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::util::scalar::real;

    #[test]
    fn test_linear_interp_fn(){
        let li = LinearInterpFn::new(vec![real(0.0), real(1.0), real(4.0)], 0.0, 2.0, 1.0).unwrap();

        assert_eq!(li.at(0.0), real(0.0));
        assert_abs_diff_eq!(li.at(0.9), real(0.9), epsilon=1e-15);
        assert_abs_diff_eq!(li.at(1.5), real(2.5), epsilon=1e-15);
        assert_eq!(li.at(2.0), real(4.0));
        // Periodic: f(-0.5) = f(1.5), f(4.5) = f(0.5)
        assert_abs_diff_eq!(li.at(-0.5), real(2.5), epsilon=1e-15);
        assert_abs_diff_eq!(li.at(4.5), real(0.5), epsilon=1e-15);
        assert!(LinearInterpFn::new(vec![real(1.0)], 0.0, 1.0, 1.0).is_none());
        assert!(LinearInterpFn::new(vec![real(1.0), real(2.0)], 1.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn test_antiperiodic_extension(){
        let li = LinearInterpFn::new(vec![real(-0.75), real(-0.5), real(-0.25)], 0.0, 1.0, -1.0).unwrap();
        assert_abs_diff_eq!(li.at(-0.5), real(0.5), epsilon=1e-15);
        assert_abs_diff_eq!(li.at(-1.0), real(0.75), epsilon=1e-15);
        assert_abs_diff_eq!(li.at(1.25), real(0.625), epsilon=1e-15);
        assert_eq!(li.at(0.0), real(-0.75));
        assert_eq!(li.at_below(0.0), real(0.25));
        assert_eq!(li.at_below(0.5), li.at(0.5));
    }
}
