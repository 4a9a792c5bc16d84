//! A hyperdual number is a truncated power series in a single infinitesimal, that keeps
//! track of a value and all its derivatives up to a fixed order.
//!
//! The number `c0 + c1*e1 + ... + c(n-1)*e(n-1)` has dimension `n`. The basis elements
//! multiply as `e_j * e_k = C(j + k, k) e_(j+k)`, so that the coefficient `c_k` is
//! the `k`-th derivative. Every term of order `n` or higher is dropped.
//!
//! ```
//! use hyperdual::domains::{float::{NumericalFloatLike, Real}, hyperdual::Hyperdual};
//!
//! // x^3 at x = 2, with derivatives up to order 3
//! let x = Hyperdual::variable(2., 4);
//! let y = x.pow(3);
//! assert_eq!(y.values(), &[8., 12., 12., 6.]);
//!
//! // all derivatives of exp are exp
//! let e = Hyperdual::variable(0.5, 5).exp();
//! for c in e.values() {
//!     assert!((c - 0.5f64.exp()).abs() < 1e-14);
//! }
//! ```

use std::{
    fmt::{Display, Formatter, Write},
    ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::warn;

use super::{
    float::{Complex, NumericalFloatLike, Real},
    AlgebraError,
};
use crate::combinatorics::{basis_power_coefficient, BinomialRow};

/// A truncated power series `c0 + c1*e1 + ... + c(n-1)*e(n-1)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    from = "HyperdualData<T>",
    bound(deserialize = "T: NumericalFloatLike + Deserialize<'de>")
)]
pub struct Hyperdual<T> {
    values: SmallVec<[T; 6]>,
}

/// The serialized form of a [Hyperdual], which is validated by [Hyperdual::new].
#[derive(Deserialize)]
struct HyperdualData<T> {
    values: SmallVec<[T; 6]>,
}

impl<T: NumericalFloatLike> From<HyperdualData<T>> for Hyperdual<T> {
    fn from(data: HyperdualData<T>) -> Self {
        Hyperdual::new(data.values)
    }
}

impl<T: NumericalFloatLike> Hyperdual<T> {
    /// Create a hyperdual number from its coefficients. An empty list yields zero.
    pub fn new(values: impl IntoIterator<Item = T>) -> Hyperdual<T> {
        let mut values: SmallVec<[T; 6]> = values.into_iter().collect();
        if values.is_empty() {
            values.push(T::from(0.));
        }
        Hyperdual { values }
    }

    /// Create the variable `x + 1*e1` of dimension `dim`, for differentiation at `x`.
    pub fn variable(x: T, dim: usize) -> Hyperdual<T> {
        let mut r = Hyperdual::constant(x, dim);
        if dim > 1 {
            r.values[1] = r.values[0].one();
        }
        r
    }

    /// Create the constant `x` of dimension `dim`.
    pub fn constant(x: T, dim: usize) -> Hyperdual<T> {
        let mut values: SmallVec<[T; 6]> = smallvec![x.zero(); dim.max(1)];
        values[0] = x;
        Hyperdual { values }
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn into_values(self) -> SmallVec<[T; 6]> {
        self.values
    }

    /// The number of coefficients.
    #[inline]
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// The order-0 coefficient.
    #[inline]
    pub fn real(&self) -> &T {
        &self.values[0]
    }

    /// Get the coefficient of order `index`, i.e. the `index`-th derivative.
    pub fn get(&self, index: usize) -> Result<&T, AlgebraError> {
        self.values.get(index).ok_or(AlgebraError::IndexOutOfBounds {
            index,
            dim: self.dim(),
        })
    }

    /// Alias of [`Hyperdual::get`].
    #[inline]
    pub fn derivative(&self, order: usize) -> Result<&T, AlgebraError> {
        self.get(order)
    }

    /// Returns true iff all terms of order one and higher are numerically zero.
    pub fn is_real(&self) -> bool {
        self.values[1..].iter().all(|c| c.is_close_to_zero())
    }

    fn is_exactly_real(&self) -> bool {
        self.values[1..].iter().all(|c| *c == c.zero())
    }

    /// Negate all coefficients except the order-0 one.
    pub fn conjugate(&self) -> Self {
        let mut r = self.clone();
        for c in &mut r.values[1..] {
            *c = -c.clone();
        }
        r
    }

    /// Drop the order-0 coefficient and lower the order of all other terms by one.
    /// A number of dimension 1 becomes zero.
    pub fn shift(&self) -> Self {
        Hyperdual::new(self.values[1..].iter().cloned())
    }

    /// Apply `f` to every coefficient.
    pub fn map<U: NumericalFloatLike>(&self, f: impl Fn(&T) -> U) -> Hyperdual<U> {
        Hyperdual::new(self.values.iter().map(f))
    }

    /// Zero-pad the high orders so that the dimension is at least `dim`.
    pub fn pad_to(&mut self, dim: usize) {
        if self.dim() < dim {
            let zero = self.values[0].zero();
            self.values.resize(dim, zero);
        }
    }

    /// Zero-pad the shorter of `self` and `other`, so that both have the same dimension.
    pub fn align_dims(&mut self, other: &mut Self) {
        let dim = self.dim().max(other.dim());
        self.pad_to(dim);
        other.pad_to(dim);
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: &T) -> Self {
        let mut r = self.clone();
        for v in &mut r.values {
            *v *= c;
        }
        r
    }

    /// Divide every coefficient by `c`. Fails if `c` is zero.
    pub fn try_div_coefficient(&self, c: &T) -> Result<Self, AlgebraError> {
        let mut values = SmallVec::with_capacity(self.dim());
        for v in &self.values {
            values.push(v.try_div(c)?);
        }
        Ok(Hyperdual { values })
    }

    /// Raise to the integer power `e`. Negative powers take the power of the reciprocal.
    pub fn try_pow(&self, e: i64) -> Result<Self, AlgebraError> {
        if e < 0 {
            return self.one().try_div(self)?.try_pow(-e);
        }

        let mut base = self.clone();
        let mut res = self.one();
        let mut e = e as u64;
        while e > 0 {
            if e & 1 == 1 {
                res *= &base;
            }
            e >>= 1;
            if e > 0 {
                base = base.clone() * &base;
            }
        }

        Ok(res)
    }

    /// Divide `self` by `rhs`.
    ///
    /// If both order-0 coefficients vanish, the quotient is a removable `0/0` form and is
    /// resolved by dividing the order-shifted numbers, which lowers the dimension of the
    /// result by one. Otherwise the divisor is made real by repeatedly multiplying the
    /// numerator and the divisor by the conjugate of the divisor.
    ///
    /// An order-0 coefficient counts as zero when its magnitude is at most
    /// [ZERO_TOLERANCE](super::float::ZERO_TOLERANCE), independent of the size of the
    /// other coefficients. For example, `[1e-9, 1] / [2e-9, 1]` is treated as `0/0` and
    /// yields `[1]` instead of a quotient with order-0 part `0.5`.
    fn div_impl(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        let mut num = self.clone();
        let mut den = rhs.clone();
        num.align_dims(&mut den);

        if den.values[0].is_close_to_zero() {
            if !num.values[0].is_close_to_zero() || num.dim() == 1 {
                return Err(AlgebraError::DivisionByZero);
            }

            warn!(
                "Indeterminate form 0/0 in hyperdual division: reducing the dimension from {} to {}",
                num.dim(),
                num.dim() - 1
            );
            return num.shift().div_impl(&den.shift());
        }

        // (c + N)(c - N) = c^2 - N^2, so the nilpotent part N vanishes
        // after ceil(log2(dim)) conjugations
        let mut max_conjugations = usize::BITS - (den.dim() - 1).leading_zeros();
        while max_conjugations > 0 && !den.is_exactly_real() {
            let c = den.conjugate();
            num *= &c;
            den *= &c;
            max_conjugations -= 1;
        }

        num.try_div_coefficient(&den.values[0])
    }
}

impl<T: NumericalFloatLike> Index<usize> for Hyperdual<T> {
    type Output = T;

    /// Get the coefficient of order `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than the dimension.
    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> PartialEq for Hyperdual<T> {
    /// Compare two hyperdual numbers, where missing high orders are zero.
    fn eq(&self, other: &Self) -> bool {
        let (long, short) = if self.dim() >= other.dim() {
            (self, other)
        } else {
            (other, self)
        };

        long.values
            .iter()
            .enumerate()
            .all(|(i, c)| match short.values.get(i) {
                Some(s) => c == s,
                None => *c == c.zero(),
            })
    }
}

impl<T: NumericalFloatLike> Display for Hyperdual<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_char('+')?;
            }
            f.write_char('(')?;
            Display::fmt(v, f)?;
            f.write_char(')')?;
            if i > 0 {
                f.write_fmt(format_args!("*e{}", i))?;
            }
        }

        Ok(())
    }
}

impl<T: NumericalFloatLike> From<f64> for Hyperdual<T> {
    #[inline]
    fn from(value: f64) -> Self {
        Hyperdual {
            values: smallvec![T::from(value)],
        }
    }
}

impl<T: NumericalFloatLike> From<BasisHyperdual<T>> for Hyperdual<T> {
    fn from(value: BasisHyperdual<T>) -> Self {
        value.to_hyperdual()
    }
}

impl<T: NumericalFloatLike> Neg for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self::Output {
        for c in &mut self.values {
            *c = -c.clone();
        }
        self
    }
}

impl<T: NumericalFloatLike> Add<&Hyperdual<T>> for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: &Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: NumericalFloatLike> Add for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self + &rhs
    }
}

impl<T: NumericalFloatLike> Add<f64> for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: f64) -> Self::Output {
        self.values[0] = self.values[0].clone() + rhs;
        self
    }
}

impl<T: NumericalFloatLike> Sub<&Hyperdual<T>> for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: &Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<T: NumericalFloatLike> Sub for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self - &rhs
    }
}

impl<T: NumericalFloatLike> Sub<f64> for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: f64) -> Self::Output {
        self.values[0] = self.values[0].clone() - rhs;
        self
    }
}

impl<T: NumericalFloatLike> Mul<&Hyperdual<T>> for Hyperdual<T> {
    type Output = Self;

    /// Multiply using the truncated Leibniz rule
    /// `r[m] = sum_{j+k=m} C(m, k) a[j] b[k]`.
    fn mul(self, rhs: &Self) -> Self::Output {
        let dim = self.dim().max(rhs.dim());
        let zero = self.values[0].zero();

        let mut values = SmallVec::with_capacity(dim);
        for m in 0..dim {
            let mut r = zero.clone();
            for (k, binom) in BinomialRow::new(m).enumerate() {
                if let (Some(a), Some(b)) = (self.values.get(m - k), rhs.values.get(k)) {
                    r += a.clone() * b * binom;
                }
            }
            values.push(r);
        }

        Hyperdual { values }
    }
}

impl<T: NumericalFloatLike> Mul for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self * &rhs
    }
}

impl<T: NumericalFloatLike> Mul<f64> for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn mul(mut self, rhs: f64) -> Self::Output {
        for c in &mut self.values {
            *c = c.clone() * rhs;
        }
        self
    }
}

impl<T: NumericalFloatLike> Mul<&BasisHyperdual<T>> for Hyperdual<T> {
    type Output = Self;

    /// Multiply by the single term `c e_i`: `r[m] = C(m, i) c a[m - i]`.
    fn mul(self, rhs: &BasisHyperdual<T>) -> Self::Output {
        let dim = self.dim().max(rhs.dim);
        let zero = self.values[0].zero();

        let mut values = SmallVec::with_capacity(dim);
        for m in 0..dim {
            let r = match (m.checked_sub(rhs.index), rhs.is_zero()) {
                (Some(j), false) => match self.values.get(j) {
                    Some(a) => {
                        let binom = BinomialRow::new(m).nth(rhs.index).unwrap_or(0.);
                        a.clone() * &rhs.component * binom
                    }
                    None => zero.clone(),
                },
                _ => zero.clone(),
            };
            values.push(r);
        }

        Hyperdual { values }
    }
}

impl<T: NumericalFloatLike> Div<&Hyperdual<T>> for Hyperdual<T> {
    type Output = Self;

    /// Divide two hyperdual numbers.
    ///
    /// # Panics
    ///
    /// Panics if the order-0 coefficient of `rhs` is numerically zero and
    /// the quotient is not a removable `0/0` form.
    #[inline]
    fn div(self, rhs: &Self) -> Self::Output {
        self.div_impl(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> Div for Hyperdual<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self / &rhs
    }
}

impl<T: NumericalFloatLike> Div<f64> for Hyperdual<T> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        self.try_div_coefficient(&T::from(rhs))
            .unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> AddAssign<&Hyperdual<T>> for Hyperdual<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.pad_to(rhs.dim());
        for (s, o) in self.values.iter_mut().zip(&rhs.values) {
            *s += o;
        }
    }
}

impl<T: NumericalFloatLike> AddAssign for Hyperdual<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_assign(&rhs)
    }
}

impl<T: NumericalFloatLike> AddAssign<&BasisHyperdual<T>> for Hyperdual<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &BasisHyperdual<T>) {
        self.pad_to(rhs.dim);
        self.values[rhs.index] += &rhs.component;
    }
}

impl<T: NumericalFloatLike> SubAssign<&Hyperdual<T>> for Hyperdual<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.pad_to(rhs.dim());
        for (s, o) in self.values.iter_mut().zip(&rhs.values) {
            *s -= o;
        }
    }
}

impl<T: NumericalFloatLike> SubAssign for Hyperdual<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_assign(&rhs)
    }
}

impl<T: NumericalFloatLike> MulAssign<&Hyperdual<T>> for Hyperdual<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.clone() * rhs;
    }
}

impl<T: NumericalFloatLike> MulAssign for Hyperdual<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.clone() * &rhs;
    }
}

// A plain real on the left-hand side.

impl Add<Hyperdual<f64>> for f64 {
    type Output = Hyperdual<f64>;

    #[inline]
    fn add(self, rhs: Hyperdual<f64>) -> Self::Output {
        rhs + self
    }
}

impl Sub<Hyperdual<f64>> for f64 {
    type Output = Hyperdual<f64>;

    #[inline]
    fn sub(self, rhs: Hyperdual<f64>) -> Self::Output {
        -(rhs - self)
    }
}

impl Mul<Hyperdual<f64>> for f64 {
    type Output = Hyperdual<f64>;

    #[inline]
    fn mul(self, rhs: Hyperdual<f64>) -> Self::Output {
        rhs * self
    }
}

impl Div<Hyperdual<f64>> for f64 {
    type Output = Hyperdual<f64>;

    /// # Panics
    ///
    /// Panics if the order-0 coefficient of `rhs` is numerically zero.
    #[inline]
    fn div(self, rhs: Hyperdual<f64>) -> Self::Output {
        Hyperdual::constant(self, rhs.dim()) / &rhs
    }
}

impl<T: NumericalFloatLike> NumericalFloatLike for Hyperdual<T> {
    #[inline]
    fn zero(&self) -> Self {
        Hyperdual::constant(self.values[0].zero(), self.dim())
    }

    #[inline]
    fn one(&self) -> Self {
        Hyperdual::constant(self.values[0].one(), self.dim())
    }

    #[inline]
    fn from_usize(&self, a: usize) -> Self {
        Hyperdual::constant(self.values[0].from_usize(a), self.dim())
    }

    /// # Panics
    ///
    /// Panics if `e` is negative and `self` cannot be inverted.
    #[inline]
    fn pow(&self, e: i64) -> Self {
        self.try_pow(e).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Divide `self` by `rhs`, resolving `0/0` forms by lowering the dimension.
    ///
    /// Order-0 coefficients with a magnitude up to
    /// [ZERO_TOLERANCE](super::float::ZERO_TOLERANCE) are considered zero, regardless of
    /// the scale of the operands. Numbers whose order-0 part is that small but nonzero
    /// should be rescaled before dividing.
    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.div_impl(rhs)
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.values[0].norm()
    }
}

impl<T: Real> Real for Hyperdual<T> {
    #[inline]
    fn exp(&self) -> Self {
        exp_bootstrap(self)
    }

    fn sin(&self) -> Self {
        if self.dim() == 1 {
            return Hyperdual::new([self.values[0].sin()]);
        }

        self.exp_i().map(|c| c.im.clone())
    }

    fn cos(&self) -> Self {
        if self.dim() == 1 {
            return Hyperdual::new([self.values[0].cos()]);
        }

        self.exp_i().map(|c| c.re.clone())
    }
}

impl<T: Real> Hyperdual<T> {
    /// Compute `exp(i*self)` in the complexified algebra.
    fn exp_i(&self) -> Hyperdual<Complex<T>> {
        self.map(|c| Complex::new(c.zero(), c.clone())).exp()
    }
}

/// Compute `exp(x)` by splitting `x = c0 + sum_i c_i e_i` into its real part and
/// single-term basis parts, and multiplying the exponentials of all parts.
///
/// Each basis exponential is a finite sum, since `(c_i e_i)^j` vanishes once `i*j`
/// reaches the dimension.
pub fn exp_bootstrap<T: Real>(x: &Hyperdual<T>) -> Hyperdual<T> {
    let dim = x.dim();
    let mut res = Hyperdual::constant(x.values[0].exp(), dim);

    for (i, c) in x.values.iter().enumerate().skip(1) {
        if *c == c.zero() {
            continue;
        }

        res *= &BasisHyperdual::new(i, dim, c.clone()).exp();
    }

    res
}

/// The single term `component * e_index` of a hyperdual number of dimension `dim`.
///
/// Terms whose order reaches the dimension are truncated to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BasisHyperdualData<T>",
    bound(deserialize = "T: NumericalFloatLike + Deserialize<'de>")
)]
pub struct BasisHyperdual<T> {
    index: usize,
    dim: usize,
    component: T,
}

#[derive(Deserialize)]
struct BasisHyperdualData<T> {
    index: usize,
    dim: usize,
    component: T,
}

impl<T: NumericalFloatLike> From<BasisHyperdualData<T>> for BasisHyperdual<T> {
    fn from(data: BasisHyperdualData<T>) -> Self {
        BasisHyperdual::new(data.index, data.dim, data.component)
    }
}

impl<T: NumericalFloatLike> BasisHyperdual<T> {
    /// Create `component * e_index`. If `index >= dim`, the result is zero.
    /// Zero is always stored at index 0.
    pub fn new(index: usize, dim: usize, component: T) -> BasisHyperdual<T> {
        let dim = dim.max(1);
        if index >= dim || component == component.zero() {
            BasisHyperdual {
                index: 0,
                dim,
                component: component.zero(),
            }
        } else {
            BasisHyperdual {
                index,
                dim,
                component,
            }
        }
    }

    /// Create `1 * e_index`.
    pub fn unit(index: usize, dim: usize) -> BasisHyperdual<T> {
        BasisHyperdual::new(index, dim, T::from(1.))
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn component(&self) -> &T {
        &self.component
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.component == self.component.zero()
    }

    pub fn to_hyperdual(&self) -> Hyperdual<T> {
        let mut r = Hyperdual::constant(self.component.zero(), self.dim);
        r += self;
        r
    }

    /// Compute `(c e_i)^p = c^p (p*i)!/(i!)^p e_(p*i)` directly.
    pub fn pow(&self, p: u32) -> Self {
        if p == 0 {
            return BasisHyperdual::new(0, self.dim, self.component.one());
        }

        let index = self.index * p as usize;
        if index >= self.dim {
            return BasisHyperdual::new(0, self.dim, self.component.zero());
        }

        let c = basis_power_coefficient(self.index as u32, p);
        BasisHyperdual::new(index, self.dim, self.component.pow(p as i64) * c)
    }

    /// Divide the component by `c`. Fails if `c` is zero.
    pub fn try_div_coefficient(&self, c: &T) -> Result<Self, AlgebraError> {
        Ok(BasisHyperdual {
            index: self.index,
            dim: self.dim,
            component: self.component.try_div(c)?,
        })
    }

    /// Divide by a hyperdual number, see [`Hyperdual::try_div`](NumericalFloatLike::try_div).
    pub fn try_div(&self, rhs: &Hyperdual<T>) -> Result<Hyperdual<T>, AlgebraError> {
        self.to_hyperdual().div_impl(rhs)
    }
}

impl<T: Real> BasisHyperdual<T> {
    /// Compute the truncated Maclaurin series `sum_{j=0}^{dim/i} (c e_i)^j / j!`.
    pub fn exp(&self) -> Hyperdual<T> {
        if self.index == 0 {
            return Hyperdual::constant(self.component.exp(), self.dim);
        }

        let mut res = Hyperdual::constant(self.component.zero(), self.dim);
        let mut scale = 1.;
        for j in 0..=(self.dim / self.index) as u32 {
            if j > 0 {
                scale *= j as f64;
            }
            res += &(self.pow(j) / scale);
        }

        res
    }

    pub fn sin(&self) -> Hyperdual<T> {
        self.to_hyperdual().sin()
    }

    pub fn cos(&self) -> Hyperdual<T> {
        self.to_hyperdual().cos()
    }
}

impl<T: NumericalFloatLike> Mul<&BasisHyperdual<T>> for BasisHyperdual<T> {
    type Output = Self;

    /// `(a e_i)(b e_j) = C(i + j, j) a b e_(i+j)`
    fn mul(self, rhs: &Self) -> Self::Output {
        let dim = self.dim.max(rhs.dim);
        let index = self.index + rhs.index;
        if index >= dim {
            return BasisHyperdual::new(0, dim, self.component.zero());
        }

        let binom = BinomialRow::new(index).nth(rhs.index).unwrap_or(0.);
        BasisHyperdual::new(index, dim, self.component * &rhs.component * binom)
    }
}

impl<T: NumericalFloatLike> Mul for BasisHyperdual<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self * &rhs
    }
}

impl<T: NumericalFloatLike> Div<f64> for BasisHyperdual<T> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        self.try_div_coefficient(&T::from(rhs))
            .unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> Display for BasisHyperdual<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({})*e{}", self.component, self.index))
    }
}
