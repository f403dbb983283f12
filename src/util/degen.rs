use smallvec::SmallVec;

pub type DegenArray = Vec<SmallVec<[usize; 4]>>;

/// Groups of consecutive indices of the ascending sequence `vals` whose
/// values agree within the absolute tolerance `atol`.
/// Only groups with more than one member are returned.
pub fn degeneracy_detect(vals: &[f64], atol: f64) -> DegenArray{
    let n = vals.len();
    let mut degens : DegenArray = Vec::new();

    let mut i = 0;
    while i < n {
        let vi = vals[i];
        let mut di : SmallVec<[usize; 4]> = SmallVec::new();
        di.push(i);

        let mut j = i+1;
        while j < n && (vals[j] - vi).abs() < atol {
            di.push(j);
            j += 1;
        }
        if di.len() > 1 {
            degens.push(di);
        }

        i = j;
    }

    degens
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn test_degeneracy_detect(){
        let vals = [0.0, 1e-14, 0.5, 1.0, 1.0, 1.0 + 1e-13, 2.0];
        let degens = degeneracy_detect(&vals, 1e-12);
        assert_eq!(degens.len(), 2);
        assert_eq!(degens[0].as_slice(), &[0, 1]);
        assert_eq!(degens[1].as_slice(), &[3, 4, 5]);
        assert!(degeneracy_detect(&[], 1e-12).is_empty());
        assert!(degeneracy_detect(&[0.0, 1.0], 1e-12).is_empty());
    }
}
