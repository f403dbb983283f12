//! Partition of an N-dimensional imaginary-time grid into time-ordering simplices.
//!
//! Every grid point `(τ_1, ..., τ_N)` lies in the simplex of the permutation
//! that sorts its times in descending order. All points of one simplex share
//! the same operator ordering, so a time-ordered correlator can be evaluated
//! for the whole simplex in one batched call and scattered back with the
//! permutation's exchange sign.

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use log::{debug, trace};

use fermed_core::{EdError, Result, Statistic};

/// A permutation of N time-dependent operators.
/// `self[k]` is the index of the operator placed at position k of the
/// time-ordered product, latest time first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation<const N: usize>([usize; N]);

impl<const N: usize> Permutation<N>{
    pub fn identity() -> Self{
        let mut p = [0; N];
        for (k, pk) in p.iter_mut().enumerate(){
            *pk = k;
        }
        Permutation(p)
    }

    /// Validate an explicit index array
    pub fn new(p: [usize; N]) -> Result<Self>{
        let mut seen = [false; N];
        for &i in p.iter(){
            if i >= N || seen[i]{
                return Err(EdError::precondition(format!("{:?} is not a permutation of 0..{}", p, N)));
            }
            seen[i] = true;
        }
        Ok(Permutation(p))
    }

    /// The permutation that stable-sorts `taus` in descending order.
    /// Equal times keep their written order.
    pub fn time_ordering(taus: &[f64; N]) -> Self{
        let mut p = Self::identity().0;
        p.sort_by(|&a, &b| taus[b].total_cmp(&taus[a]));
        Permutation(p)
    }

    pub fn as_array(&self) -> &[usize; N]{
        &self.0
    }

    /// Rearrange `xs` into the permuted order
    pub fn apply<T: Copy>(&self, xs: &[T; N]) -> [T; N]{
        let mut out = *xs;
        for (k, &i) in self.0.iter().enumerate(){
            out[k] = xs[i];
        }
        out
    }

    pub fn inverse(&self) -> Self{
        let mut inv = [0; N];
        for (k, &i) in self.0.iter().enumerate(){
            inv[i] = k;
        }
        Permutation(inv)
    }

    /// Pairs of operators whose relative order is swapped
    pub fn inversions(&self) -> impl Iterator<Item=(usize, usize)> + '_{
        (0..N).tuple_combinations()
            .filter(move |&(k, l)| self.0[k] > self.0[l])
            .map(move |(k, l)| (self.0[l], self.0[k]))
    }

    /// Exchange sign of the permutation: every swapped pair of fermionic
    /// operators contributes a factor -1
    pub fn sign(&self, statistics: &[Statistic; N]) -> f64{
        self.inversions()
            .filter(|&(a, b)| statistics[a].is_fermionic() && statistics[b].is_fermionic())
            .fold(1.0, |s, _| -s)
    }

    /// All N! permutations in lexicographic order
    pub fn all() -> impl Iterator<Item=Self>{
        (0..N).permutations(N).map(|v|{
            let mut p = [0; N];
            p.copy_from_slice(&v);
            Permutation(p)
        })
    }
}

impl<const N: usize> fmt::Display for Permutation<N>{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result{
        write!(f, "{:?}", self.0)
    }
}

/// A grid point: its index tuple and its times rearranged into descending order
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimplexPoint<const N: usize>{
    pub index: [usize; N],
    pub taus: [f64; N],
}

/// All grid points sharing one time ordering
#[derive(Clone, Debug)]
pub struct TimeSimplex<const N: usize>{
    pub permutation: Permutation<N>,
    pub sign: f64,
    pub points: Vec<SimplexPoint<N>>,
}

impl<const N: usize> TimeSimplex<N>{
    pub fn len(&self) -> usize{
        self.points.len()
    }

    pub fn is_empty(&self) -> bool{
        self.points.is_empty()
    }

    /// Ordered time tuples of every point, in point order
    pub fn ordered_taus(&self) -> Vec<[f64; N]>{
        self.points.iter().map(|p| p.taus).collect()
    }
}

/// Single-pass enumerator of the non-empty time simplices of a product grid.
///
/// Simplices are yielded in lexicographic permutation order. The number of
/// simplices consumed so far is available from [`SimplexMesh::simplices_yielded`].
pub struct SimplexMesh<const N: usize>{
    statistics: [Statistic; N],
    remaining: std::vec::IntoIter<(Permutation<N>, Vec<SimplexPoint<N>>)>,
    yielded: usize,
}

impl<const N: usize> SimplexMesh<N>{
    /// `axes[k]` are the time points of the k-th operator, all within [0, β].
    /// `statistics[k]` is the exchange statistic of the k-th operator.
    pub fn new(axes: [&[f64]; N], beta: f64, statistics: [Statistic; N]) -> Result<Self>{
        if !(beta > 0.0 && beta.is_finite()){
            return Err(EdError::precondition(format!("inverse temperature must be positive, got {}", beta)));
        }
        for (k, ax) in axes.iter().enumerate(){
            if let Some(t) = ax.iter().find(|&&t| !(0.0..=beta).contains(&t)){
                return Err(EdError::precondition(
                    format!("time {} on axis {} lies outside [0, {}]", t, k, beta)));
            }
        }

        let mut buckets: HashMap<Permutation<N>, Vec<SimplexPoint<N>>> = HashMap::new();
        for (index, raw) in enumerate_product(axes){
            let permutation = Permutation::time_ordering(&raw);
            buckets.entry(permutation).or_default()
                .push(SimplexPoint{index, taus: permutation.apply(&raw)});
        }

        let ordered: Vec<_> = Permutation::all()
            .filter_map(|p| buckets.remove(&p).map(|pts| (p, pts)))
            .collect();
        debug!("SimplexMesh<{}>: {} grid points in {} simplices",
               N, ordered.iter().map(|(_, pts)| pts.len()).sum::<usize>(), ordered.len());

        Ok(SimplexMesh{statistics, remaining: ordered.into_iter(), yielded: 0})
    }

    pub fn simplices_yielded(&self) -> usize{
        self.yielded
    }
}

impl<const N: usize> Iterator for SimplexMesh<N>{
    type Item = TimeSimplex<N>;

    fn next(&mut self) -> Option<TimeSimplex<N>>{
        let (permutation, points) = self.remaining.next()?;
        self.yielded += 1;
        let sign = permutation.sign(&self.statistics);
        trace!("simplex {}: permutation {}, sign {}, {} points", self.yielded, permutation, sign, points.len());
        Some(TimeSimplex{permutation, sign, points})
    }

    fn size_hint(&self) -> (usize, Option<usize>){
        self.remaining.size_hint()
    }
}

impl<const N: usize> ExactSizeIterator for SimplexMesh<N>{}

/// Plain enumeration of a product grid: index tuple and raw time tuple of
/// every point, last axis fastest
pub fn enumerate_product<const N: usize>(axes: [&[f64]; N]) -> impl Iterator<Item=([usize; N], [f64; N])> + '_{
    let ranges: Vec<_> = axes.iter().map(|ax| 0..ax.len()).collect();
    ranges.into_iter().multi_cartesian_product().map(move |idx|{
        let mut index = [0; N];
        index.copy_from_slice(&idx);
        let mut taus = [0.0; N];
        for k in 0..N{
            taus[k] = axes[k][index[k]];
        }
        (index, taus)
    })
}
