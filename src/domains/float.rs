//! Floating-point numbers and the traits that make a number type usable for
//! automatic differentiation.
//!
//! A user function is written once, generically over [`Real`], and can then be
//! evaluated on an `f64`, a [`Dual`](super::dual::Dual) or a
//! [`Hyperdual`](super::hyperdual::Hyperdual):
//!
//! ```
//! use hyperdual::domains::{dual::Dual, float::{NumericalFloatLike, Real}};
//!
//! fn f<T: Real>(x: T) -> T {
//!     x.pow(3) + x.sin()
//! }
//!
//! let plain = f(2.0);
//! let d = f(Dual::variable(2.0));
//! assert_eq!(d.re, plain);
//! assert!((d.im - (12. + 2f64.cos())).abs() < 1e-12);
//! ```

use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use super::AlgebraError;

/// Absolute tolerance below which a value is considered to be numerically zero.
pub const ZERO_TOLERANCE: f64 = 1e-8;

/// A number that supports the field operations, possibly carrying infinitesimal parts.
///
/// Division through the `/` operator panics for the number types of this crate when
/// the divisor is (numerically) zero. Use [`NumericalFloatLike::try_div`] to handle
/// that case.
pub trait NumericalFloatLike:
    PartialEq
    + Clone
    + Debug
    + Display
    + From<f64>
    + Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Div<&'a Self, Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
    /// The additive identity, inheriting the shape of `self`.
    fn zero(&self) -> Self;
    /// The multiplicative identity, inheriting the shape of `self`.
    fn one(&self) -> Self;
    fn from_usize(&self, a: usize) -> Self;
    /// Raise to an integer power. Negative powers divide.
    fn pow(&self, e: i64) -> Self;
    /// Divide `self` by `rhs`, failing instead of producing infinities.
    fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError>;
    /// The magnitude of the leading (real) part.
    fn norm(&self) -> f64;

    #[inline]
    fn is_close_to_zero(&self) -> bool {
        self.norm() <= ZERO_TOLERANCE
    }
}

/// A number on which the elementary functions are defined.
pub trait Real: NumericalFloatLike {
    fn exp(&self) -> Self;
    fn sin(&self) -> Self;
    fn cos(&self) -> Self;
}

impl NumericalFloatLike for f64 {
    #[inline(always)]
    fn zero(&self) -> Self {
        0.
    }

    #[inline(always)]
    fn one(&self) -> Self {
        1.
    }

    #[inline(always)]
    fn from_usize(&self, a: usize) -> Self {
        a as f64
    }

    #[inline]
    fn pow(&self, e: i64) -> Self {
        debug_assert!(e.unsigned_abs() <= i32::MAX as u64);
        self.powi(e as i32)
    }

    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        if *rhs == 0. {
            Err(AlgebraError::DivisionByZero)
        } else {
            Ok(self / rhs)
        }
    }

    #[inline(always)]
    fn norm(&self) -> f64 {
        self.abs()
    }
}

impl Real for f64 {
    #[inline(always)]
    fn exp(&self) -> Self {
        (*self).exp()
    }

    #[inline(always)]
    fn sin(&self) -> Self {
        (*self).sin()
    }

    #[inline(always)]
    fn cos(&self) -> Self {
        (*self).cos()
    }
}

/// A complex number `re + i*im`.
///
/// Only used as a coefficient type of hyperdual numbers, to evaluate
/// `exp(i*x)` when computing sines and cosines.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    #[inline]
    pub const fn new(re: T, im: T) -> Complex<T> {
        Complex { re, im }
    }
}

impl<T: NumericalFloatLike> Complex<T> {
    #[inline]
    pub fn conj(&self) -> Self {
        Complex {
            re: self.re.clone(),
            im: -self.im.clone(),
        }
    }

    #[inline]
    pub fn i(&self) -> Complex<T> {
        Complex {
            re: self.re.zero(),
            im: self.im.one(),
        }
    }

    #[inline]
    pub fn norm_squared(&self) -> T {
        self.re.clone() * &self.re + self.im.clone() * &self.im
    }
}

impl<T: Display> Display for Complex<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("({}+{}i)", self.re, self.im))
    }
}

impl<T: NumericalFloatLike> From<f64> for Complex<T> {
    #[inline]
    fn from(value: f64) -> Self {
        Complex {
            re: T::from(value),
            im: T::from(0.),
        }
    }
}

impl<T: NumericalFloatLike> Neg for Complex<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Complex::new(-self.re, -self.im)
    }
}

impl<T: NumericalFloatLike> Add<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Complex::new(self.re + &rhs.re, self.im + &rhs.im)
    }
}

impl<T: NumericalFloatLike> Add for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self + &rhs
    }
}

impl<T: NumericalFloatLike> Add<f64> for Complex<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self::Output {
        Complex::new(self.re + rhs, self.im)
    }
}

impl<T: NumericalFloatLike> Sub<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Complex::new(self.re - &rhs.re, self.im - &rhs.im)
    }
}

impl<T: NumericalFloatLike> Sub for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self - &rhs
    }
}

impl<T: NumericalFloatLike> Sub<f64> for Complex<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f64) -> Self::Output {
        Complex::new(self.re - rhs, self.im)
    }
}

impl<T: NumericalFloatLike> Mul<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        Complex::new(
            self.re.clone() * &rhs.re - self.im.clone() * &rhs.im,
            self.re * &rhs.im + self.im * &rhs.re,
        )
    }
}

impl<T: NumericalFloatLike> Mul for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self * &rhs
    }
}

impl<T: NumericalFloatLike> Mul<f64> for Complex<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

impl<T: NumericalFloatLike> Div<&Complex<T>> for Complex<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: &Self) -> Self::Output {
        let n = rhs.norm_squared();
        let re = self.re.clone() * &rhs.re + self.im.clone() * &rhs.im;
        let im = self.im * &rhs.re - self.re * &rhs.im;
        Complex::new(re / &n, im / &n)
    }
}

impl<T: NumericalFloatLike> Div for Complex<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self / &rhs
    }
}

impl<T: NumericalFloatLike> Div<f64> for Complex<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Complex::new(self.re / rhs, self.im / rhs)
    }
}

impl<T: NumericalFloatLike> AddAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.re += &rhs.re;
        self.im += &rhs.im;
    }
}

impl<T: NumericalFloatLike> AddAssign for Complex<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_assign(&rhs)
    }
}

impl<T: NumericalFloatLike> SubAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.re -= &rhs.re;
        self.im -= &rhs.im;
    }
}

impl<T: NumericalFloatLike> SubAssign for Complex<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_assign(&rhs)
    }
}

impl<T: NumericalFloatLike> MulAssign<&Complex<T>> for Complex<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.clone() * rhs;
    }
}

impl<T: NumericalFloatLike> MulAssign for Complex<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.clone() * &rhs;
    }
}

impl<T: NumericalFloatLike> NumericalFloatLike for Complex<T> {
    #[inline]
    fn zero(&self) -> Self {
        Complex::new(self.re.zero(), self.im.zero())
    }

    #[inline]
    fn one(&self) -> Self {
        Complex::new(self.re.one(), self.im.zero())
    }

    #[inline]
    fn from_usize(&self, a: usize) -> Self {
        Complex::new(self.re.from_usize(a), self.im.zero())
    }

    fn pow(&self, e: i64) -> Self {
        if e < 0 {
            return (self.one() / self).pow(-e);
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
        res
    }

    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        if rhs.re.norm() == 0. && rhs.im.norm() == 0. {
            Err(AlgebraError::DivisionByZero)
        } else {
            Ok(self.clone() / rhs)
        }
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.re.norm().hypot(self.im.norm())
    }
}

impl<T: Real> Real for Complex<T> {
    /// `exp(a + ib) = exp(a) (cos(b) + i sin(b))`.
    #[inline]
    fn exp(&self) -> Self {
        let r = self.re.exp();
        Complex::new(r.clone() * self.im.cos(), r * self.im.sin())
    }

    #[inline]
    fn sin(&self) -> Self {
        // (exp(iz) - exp(-iz)) / 2i
        let iz = Complex::new(-self.im.clone(), self.re.clone());
        let d = iz.exp() - (-iz).exp();
        Complex::new(d.im * 0.5, -d.re * 0.5)
    }

    #[inline]
    fn cos(&self) -> Self {
        let iz = Complex::new(-self.im.clone(), self.re.clone());
        (iz.exp() + (-iz).exp()) * 0.5
    }
}

#[cfg(test)]
mod test {
    use super::{Complex, NumericalFloatLike, Real};
    use crate::domains::AlgebraError;

    fn approx_eq(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn real_division() {
        assert_eq!(3f64.try_div(&2.), Ok(1.5));
        assert_eq!(3f64.try_div(&0.), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn real_pow() {
        assert_eq!(2f64.pow(10), 1024.);
        assert_eq!(2f64.pow(-2), 0.25);
        assert_eq!(5f64.pow(0), 1.);
    }

    #[test]
    fn complex_arithmetic() {
        let a = Complex::new(1., 2.);
        let b = Complex::new(3., -1.);

        assert_eq!(a * b, Complex::new(5., 5.));
        assert!(approx_eq(a * b / b, a));
        assert_eq!(a.conj(), Complex::new(1., -2.));
        assert_eq!(a.i() * a.i(), Complex::new(-1., 0.));
        assert_eq!(a.pow(2), Complex::new(-3., 4.));
        assert!(approx_eq(a.pow(-1) * a, a.one()));
        assert_eq!(a.try_div(&a.zero()), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn complex_functions() {
        let z = Complex::new(0.3, -0.7);

        // Euler's formula
        let e = Complex::new(0., 1.2).exp();
        assert!(approx_eq(e, Complex::new(1.2f64.cos(), 1.2f64.sin())));

        let s = z.sin();
        let c = z.cos();
        assert!(approx_eq(s * s + c * c, z.one()));

        let x = Complex::new(0.4, 0.);
        assert!(approx_eq(x.sin(), Complex::new(0.4f64.sin(), 0.)));
        assert!(approx_eq(x.cos(), Complex::new(0.4f64.cos(), 0.)));
    }
}
