//! A dual number `re + im*ε` with `ε² = 0` keeps track of a value and its first derivative.
//!
//! ```
//! use hyperdual::domains::{dual::Dual, float::Real};
//!
//! let x = Dual::variable(0.5);
//! let y = x.sin() * x + 1.;
//!
//! assert_eq!(y.re, 0.5f64.sin() * 0.5 + 1.);
//! assert_eq!(y.im, 0.5f64.cos() * 0.5 + 0.5f64.sin());
//! ```

use std::{
    fmt::{Display, Formatter},
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use super::{
    float::{NumericalFloatLike, Real},
    AlgebraError,
};

/// A dual number `re + im*ε`, where `ε² = 0`.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Dual<T> {
    /// The value.
    pub re: T,
    /// The coefficient of the infinitesimal, i.e. the derivative.
    pub im: T,
}

impl<T> Dual<T> {
    #[inline]
    pub const fn new(re: T, im: T) -> Dual<T> {
        Dual { re, im }
    }
}

impl<T: NumericalFloatLike> Dual<T> {
    /// Create a variable `x + 1*ε`, for differentiation at `x`.
    #[inline]
    pub fn variable(x: T) -> Dual<T> {
        let im = x.one();
        Dual { re: x, im }
    }

    /// Create a constant `x + 0*ε`.
    #[inline]
    pub fn constant(x: T) -> Dual<T> {
        let im = x.zero();
        Dual { re: x, im }
    }

    /// Returns true iff the infinitesimal part is numerically zero.
    #[inline]
    pub fn is_real(&self) -> bool {
        self.im.is_close_to_zero()
    }

    /// Multiply both parts by the coefficient `c`.
    #[inline]
    pub fn scale(&self, c: &T) -> Self {
        Dual::new(self.re.clone() * c, self.im.clone() * c)
    }

    /// Divide by a real number `c`. Fails if `c` is zero.
    #[inline]
    pub fn try_div_real(&self, c: &T) -> Result<Self, AlgebraError> {
        Ok(Dual::new(self.re.try_div(c)?, self.im.try_div(c)?))
    }

    /// Compute `k / self = k/re - (k*im/re²)ε`.
    pub fn try_recip_scaled(&self, k: &T) -> Result<Self, AlgebraError> {
        if self.re.is_close_to_zero() {
            return Err(AlgebraError::DivisionByZero);
        }

        let re = k.clone() / &self.re;
        let im = -(k.clone() * &self.im / (self.re.clone() * &self.re));
        Ok(Dual::new(re, im))
    }
}

impl<T: Display> Display for Dual<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} + {}ε", self.re, self.im))
    }
}

impl<T: NumericalFloatLike> From<f64> for Dual<T> {
    #[inline]
    fn from(value: f64) -> Self {
        Dual::constant(T::from(value))
    }
}

impl<T: NumericalFloatLike> Neg for Dual<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Dual::new(-self.re, -self.im)
    }
}

impl<T: NumericalFloatLike> Add<&Dual<T>> for Dual<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &Self) -> Self::Output {
        Dual::new(self.re + &rhs.re, self.im + &rhs.im)
    }
}

impl<T: NumericalFloatLike> Add for Dual<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self + &rhs
    }
}

impl<T: NumericalFloatLike> Add<f64> for Dual<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self::Output {
        Dual::new(self.re + rhs, self.im)
    }
}

impl<T: NumericalFloatLike> Sub<&Dual<T>> for Dual<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &Self) -> Self::Output {
        Dual::new(self.re - &rhs.re, self.im - &rhs.im)
    }
}

impl<T: NumericalFloatLike> Sub for Dual<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self - &rhs
    }
}

impl<T: NumericalFloatLike> Sub<f64> for Dual<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f64) -> Self::Output {
        Dual::new(self.re - rhs, self.im)
    }
}

impl<T: NumericalFloatLike> Mul<&Dual<T>> for Dual<T> {
    type Output = Self;

    /// `(a + bε)(c + dε) = ac + (ad + bc)ε`
    #[inline]
    fn mul(self, rhs: &Self) -> Self::Output {
        let im = self.re.clone() * &rhs.im + self.im * &rhs.re;
        Dual::new(self.re * &rhs.re, im)
    }
}

impl<T: NumericalFloatLike> Mul for Dual<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self * &rhs
    }
}

impl<T: NumericalFloatLike> Mul<f64> for Dual<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Dual::new(self.re * rhs, self.im * rhs)
    }
}

impl<T: NumericalFloatLike> Div<&Dual<T>> for Dual<T> {
    type Output = Self;

    /// Divide two dual numbers.
    ///
    /// # Panics
    ///
    /// Panics if the real part of `rhs` is numerically zero.
    #[inline]
    fn div(self, rhs: &Self) -> Self::Output {
        self.try_div(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> Div for Dual<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self / &rhs
    }
}

impl<T: NumericalFloatLike> Div<f64> for Dual<T> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        self.try_div_real(&T::from(rhs))
            .unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> AddAssign<&Dual<T>> for Dual<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        self.re += &rhs.re;
        self.im += &rhs.im;
    }
}

impl<T: NumericalFloatLike> AddAssign for Dual<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_assign(&rhs)
    }
}

impl<T: NumericalFloatLike> SubAssign<&Dual<T>> for Dual<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        self.re -= &rhs.re;
        self.im -= &rhs.im;
    }
}

impl<T: NumericalFloatLike> SubAssign for Dual<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_assign(&rhs)
    }
}

impl<T: NumericalFloatLike> MulAssign<&Dual<T>> for Dual<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Self) {
        *self = self.clone() * rhs;
    }
}

impl<T: NumericalFloatLike> MulAssign for Dual<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.clone() * &rhs;
    }
}

// A plain real on the left-hand side.

impl Add<Dual<f64>> for f64 {
    type Output = Dual<f64>;

    #[inline]
    fn add(self, rhs: Dual<f64>) -> Self::Output {
        rhs + self
    }
}

impl Sub<Dual<f64>> for f64 {
    type Output = Dual<f64>;

    #[inline]
    fn sub(self, rhs: Dual<f64>) -> Self::Output {
        -(rhs - self)
    }
}

impl Mul<Dual<f64>> for f64 {
    type Output = Dual<f64>;

    #[inline]
    fn mul(self, rhs: Dual<f64>) -> Self::Output {
        rhs * self
    }
}

impl Div<Dual<f64>> for f64 {
    type Output = Dual<f64>;

    /// # Panics
    ///
    /// Panics if the real part of `rhs` is numerically zero.
    #[inline]
    fn div(self, rhs: Dual<f64>) -> Self::Output {
        rhs.try_recip_scaled(&self)
            .unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<T: NumericalFloatLike> NumericalFloatLike for Dual<T> {
    #[inline]
    fn zero(&self) -> Self {
        Dual::new(self.re.zero(), self.im.zero())
    }

    #[inline]
    fn one(&self) -> Self {
        Dual::new(self.re.one(), self.im.zero())
    }

    #[inline]
    fn from_usize(&self, a: usize) -> Self {
        Dual::new(self.re.from_usize(a), self.im.zero())
    }

    /// `x^p = re^p + im*p*re^(p-1)ε`
    #[inline]
    fn pow(&self, e: i64) -> Self {
        if e == 0 {
            return self.one();
        }

        let d = self.im.clone() * (e as f64) * self.re.pow(e - 1);
        Dual::new(self.re.pow(e), d)
    }

    /// Apply the quotient rule `(a + bε)/(c + dε) = a/c + ((bc - ad)/c²)ε`.
    fn try_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        if rhs.re.is_close_to_zero() {
            return Err(AlgebraError::DivisionByZero);
        }

        let re = self.re.clone() / &rhs.re;
        let im = (self.im.clone() * &rhs.re - self.re.clone() * &rhs.im)
            / (rhs.re.clone() * &rhs.re);
        Ok(Dual::new(re, im))
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.re.norm()
    }
}

impl<T: Real> Real for Dual<T> {
    #[inline]
    fn exp(&self) -> Self {
        let e = self.re.exp();
        Dual::new(e.clone(), self.im.clone() * e)
    }

    #[inline]
    fn sin(&self) -> Self {
        Dual::new(self.re.sin(), self.im.clone() * self.re.cos())
    }

    #[inline]
    fn cos(&self) -> Self {
        Dual::new(self.re.cos(), -(self.im.clone() * self.re.sin()))
    }
}
