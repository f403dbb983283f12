use std::mem;
use std::ops::{Add, AddAssign, Mul, MulAssign};

use num_traits::{One, Zero};

/// Target of a free algebra evaluation.
///
/// Implemented by any representation that can add, multiply and scale
/// by reference, e.g. sparse matrices which do not implement the by-value
/// operator traits.
pub trait AlgebraTarget<T>: Clone {
    fn add_ref(&self, rhs: &Self) -> Self;
    fn mul_ref(&self, rhs: &Self) -> Self;
    fn scale_ref(&self, t: &T) -> Self;
}

/// Symbolic Enum for dynamically representing an algebra generated by the atoms S
/// with scalars T
#[derive(Clone, Debug, PartialEq)]
pub enum DynFreeAlgebra<S: Clone, T: Copy>{
    Zero,
    Unity,
    Element(S),
    Add(Box<DynFreeAlgebra<S, T>>, Box<DynFreeAlgebra<S, T>>),
    Prod(Box<DynFreeAlgebra<S, T>>, Box<DynFreeAlgebra<S, T>>),
    Scale(Box<DynFreeAlgebra<S, T>>, T)
}

/// Allocate an empty instance of the enum and swap its contents with self
fn push_dfa_out<S: Clone, T: Copy>(
         a: &mut DynFreeAlgebra<S, T>) -> Box<DynFreeAlgebra<S, T>>{
    let mut lhs_box = Box::new(DynFreeAlgebra::Zero);
    mem::swap(a, lhs_box.as_mut());
    lhs_box
}

impl<S: Clone, T: Copy> DynFreeAlgebra<S, T>
{
    pub fn element(s: S) -> Self{
        DynFreeAlgebra::Element(s)
    }

    pub fn scale(self, t: T) -> Self{
        DynFreeAlgebra::Scale(Box::new(self), t)
    }

    /// Evaluate the expression by mapping every atom through f
    /// and folding with the algebra operations of A
    pub fn evaluate_ref<F, A>(&self, f: &F, zero: &A, one: &A) -> A
        where F: Fn(&S) -> A,
              A: AlgebraTarget<T>{
        match self{
            DynFreeAlgebra::Zero => zero.clone(),
            DynFreeAlgebra::Unity => one.clone(),
            DynFreeAlgebra::Element(s) => f(s),
            DynFreeAlgebra::Add(a1, a2) =>
                a1.evaluate_ref(f, zero, one).add_ref(&a2.evaluate_ref(f, zero, one)),
            DynFreeAlgebra::Prod(a1, a2) =>
                a1.evaluate_ref(f, zero, one).mul_ref(&a2.evaluate_ref(f, zero, one)),
            DynFreeAlgebra::Scale(a, t) =>
                a.evaluate_ref(f, zero, one).scale_ref(t)
        }
    }

    /// Fallible version of [`Self::evaluate_ref`]; the first atom that fails
    /// to map aborts the evaluation
    pub fn try_evaluate_ref<F, A, E>(&self, f: &F, zero: &A, one: &A) -> Result<A, E>
        where F: Fn(&S) -> Result<A, E>,
              A: AlgebraTarget<T>{
        Ok(match self{
            DynFreeAlgebra::Zero => zero.clone(),
            DynFreeAlgebra::Unity => one.clone(),
            DynFreeAlgebra::Element(s) => f(s)?,
            DynFreeAlgebra::Add(a1, a2) =>
                a1.try_evaluate_ref(f, zero, one)?.add_ref(&a2.try_evaluate_ref(f, zero, one)?),
            DynFreeAlgebra::Prod(a1, a2) =>
                a1.try_evaluate_ref(f, zero, one)?.mul_ref(&a2.try_evaluate_ref(f, zero, one)?),
            DynFreeAlgebra::Scale(a, t) =>
                a.try_evaluate_ref(f, zero, one)?.scale_ref(t)
        })
    }

    /// Visit every atom of the expression
    pub fn for_each_element<F>(&self, f: &mut F)
        where F: FnMut(&S){
        match self{
            DynFreeAlgebra::Element(s) => f(s),
            DynFreeAlgebra::Add(a1, a2) | DynFreeAlgebra::Prod(a1, a2) =>
                { a1.for_each_element(f); a2.for_each_element(f); }
            DynFreeAlgebra::Scale(a, _t) => a.for_each_element(f),
            _ => ()
        }
    }

    /// Structurally map atoms and scalars. Product order is reversed when
    /// `reverse_products` is set, as required for adjoints.
    pub fn map_ref<F, G>(&self, f: &F, g: &G, reverse_products: bool) -> Self
        where F: Fn(&S) -> Self,
              G: Fn(&T) -> T{
        match self{
            DynFreeAlgebra::Zero => DynFreeAlgebra::Zero,
            DynFreeAlgebra::Unity => DynFreeAlgebra::Unity,
            DynFreeAlgebra::Element(s) => f(s),
            DynFreeAlgebra::Add(a1, a2) =>
                DynFreeAlgebra::Add(Box::new(a1.map_ref(f, g, reverse_products)),
                                    Box::new(a2.map_ref(f, g, reverse_products))),
            DynFreeAlgebra::Prod(a1, a2) => {
                let (l, r) = (a1.map_ref(f, g, reverse_products), a2.map_ref(f, g, reverse_products));
                if reverse_products {
                    DynFreeAlgebra::Prod(Box::new(r), Box::new(l))
                } else {
                    DynFreeAlgebra::Prod(Box::new(l), Box::new(r))
                }
            }
            DynFreeAlgebra::Scale(a, t) =>
                DynFreeAlgebra::Scale(Box::new(a.map_ref(f, g, reverse_products)), g(t))
        }
    }
}

impl<S, T> DynFreeAlgebra<S, T>
    where S: Clone, T: Copy + Zero + One + PartialEq
{
    /// Remove zero terms, unit factors and zero scalings
    pub fn simplify(self) -> Self
    {
        match self{
            DynFreeAlgebra::Add(a1, a2) =>{
                match (a1.simplify(), a2.simplify()) {
                    (DynFreeAlgebra::Zero, b) => b,
                    (a, DynFreeAlgebra::Zero) => a,
                    (a, b) => DynFreeAlgebra::Add(Box::new(a), Box::new(b))
                }
            }
            DynFreeAlgebra::Prod(a1, a2) =>{
                match (a1.simplify(), a2.simplify()) {
                    (DynFreeAlgebra::Zero, _) | (_, DynFreeAlgebra::Zero) => DynFreeAlgebra::Zero,
                    (DynFreeAlgebra::Unity, b) => b,
                    (a, DynFreeAlgebra::Unity) => a,
                    (a, b) => DynFreeAlgebra::Prod(Box::new(a), Box::new(b))
                }
            }
            DynFreeAlgebra::Scale(a, t) =>{
                if t.is_zero(){
                    return DynFreeAlgebra::Zero
                };
                match a.simplify() { //Look-ahead at the object for possible rescaling simplifications
                    DynFreeAlgebra::Zero => DynFreeAlgebra::Zero,
                    DynFreeAlgebra::Scale(b, t2) => DynFreeAlgebra::Scale(b, t * t2).simplify(),
                    b => if t.is_one() { b } else { DynFreeAlgebra::Scale(Box::new(b), t) }
                }
            }
            other => other
        }
    }
}

impl<S: Clone, T: Copy> Zero for DynFreeAlgebra<S, T>{
    fn zero() -> Self {
        DynFreeAlgebra::Zero
    }

    fn is_zero(&self) -> bool {
        matches!(self, DynFreeAlgebra::Zero)
    }
}

impl<S: Clone, T: Copy> One for DynFreeAlgebra<S, T>{
    fn one() -> Self {
        DynFreeAlgebra::Unity
    }
}

impl<S: Clone, T: Copy> Default for DynFreeAlgebra<S, T>{
    fn default() -> Self {
        Zero::zero()
    }
}

impl<S: Clone, T: Copy> Add
for DynFreeAlgebra<S, T>{
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output{
        DynFreeAlgebra::Add(Box::new(self), Box::new(rhs))
    }
}

impl<S: Clone, T: Copy> Add<&DynFreeAlgebra<S, T>>
for DynFreeAlgebra<S, T>{
    type Output = Self;
    fn add(self, rhs: &DynFreeAlgebra<S, T>) -> Self::Output{
        DynFreeAlgebra::Add(Box::new(self), Box::new(rhs.clone()))
    }
}

impl<S: Clone, T: Copy> AddAssign
for DynFreeAlgebra<S, T>{
    fn add_assign(&mut self, rhs: Self) {
        let lhs_box = push_dfa_out(self);
        *self = DynFreeAlgebra::Add(lhs_box, Box::new(rhs))
    }
}

impl<S: Clone, T: Copy> Mul
for DynFreeAlgebra<S, T>{
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output{
        DynFreeAlgebra::Prod(Box::new(self), Box::new(rhs))
    }
}

impl<S: Clone, T: Copy> Mul<&DynFreeAlgebra<S, T>>
for DynFreeAlgebra<S, T>{
    type Output = Self;
    fn mul(self, rhs: &DynFreeAlgebra<S, T>) -> Self::Output{
        DynFreeAlgebra::Prod(Box::new(self), Box::new(rhs.clone()))
    }
}

impl<S: Clone, T: Copy> MulAssign
for DynFreeAlgebra<S, T>{
    fn mul_assign(&mut self, rhs: Self) {
        let lhs_box = push_dfa_out(self);
        *self = DynFreeAlgebra::Prod(lhs_box, Box::new(rhs));
    }
}
