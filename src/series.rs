//! Taylor series and series solutions of linear ordinary differential equations.
//!
//! Coefficients are stored as derivatives at the center, so that the series reads
//! `c_0 + c_1 (x - a) / 1! + c_2 (x - a)^2 / 2! + ...`.
//!
//! ```
//! use hyperdual::domains::{float::NumericalFloatLike, hyperdual::Hyperdual};
//! use hyperdual::series::{solve_linear_ode, SeriesConfig};
//!
//! // f'' + f = 0, f(0) = 0, f'(0) = 1
//! let zero = |t: &Hyperdual<f64>| t.zero();
//! let one = |t: &Hyperdual<f64>| t.one();
//!
//! let config = SeriesConfig {
//!     num_terms: 6,
//!     ..Default::default()
//! };
//! let s = solve_linear_ode(&[&zero, &one, &zero], &[0., 1.], &config).unwrap();
//! assert_eq!(s.coefficients(), &[0., 1., 0., -1., 0., 1.]);
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    derivative::derivatives,
    domains::{float::Real, hyperdual::Hyperdual},
    solve::SolverError,
};

/// Settings for the construction of Taylor series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesConfig {
    /// The point around which the series is expanded.
    pub center: f64,
    /// The number of terms of the series.
    pub num_terms: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            center: 0.,
            num_terms: 5,
        }
    }
}

/// A truncated Taylor series, whose `i`-th coefficient is the `i`-th derivative at the center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaylorSeries {
    coeffs: Vec<f64>,
    center: f64,
}

impl TaylorSeries {
    pub fn new(coeffs: Vec<f64>, center: f64) -> TaylorSeries {
        TaylorSeries { coeffs, center }
    }

    /// Compute the Taylor series of `f` around `config.center` with `config.num_terms` terms.
    /// Zero terms yield the empty series, without evaluating `f`.
    pub fn from_function<F>(f: F, config: &SeriesConfig) -> TaylorSeries
    where
        F: Fn(Hyperdual<f64>) -> Hyperdual<f64>,
    {
        if config.num_terms == 0 {
            return TaylorSeries::new(vec![], config.center);
        }

        let coeffs = derivatives(f, config.center, config.num_terms - 1);
        TaylorSeries::new(coeffs, config.center)
    }

    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    #[inline]
    pub fn center(&self) -> f64 {
        self.center
    }

    #[inline]
    pub fn num_terms(&self) -> usize {
        self.coeffs.len()
    }

    /// Evaluate the series at `x`. Since the evaluation is generic,
    /// the series can itself be differentiated.
    pub fn evaluate<T: Real>(&self, x: T) -> T {
        let d = x.clone() - self.center;

        let mut res = x.zero();
        let mut fac = 1.;
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                fac *= i as f64;
            }

            if *c != 0. {
                res += d.pow(i as i64) * (c / fac);
            }
        }
        res
    }
}

impl Display for TaylorSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(c0) = self.coeffs.first() else {
            return f.write_str("0");
        };

        write!(f, "{}", c0)?;
        for (i, c) in self.coeffs.iter().enumerate().skip(1) {
            if self.center != 0. {
                write!(f, " + {}(x - {})^{}/{}!", c, self.center, i, i)?;
            } else {
                write!(f, " + {}x^{}/{}!", c, i, i)?;
            }
        }
        Ok(())
    }
}

/// A coefficient function of a linear ordinary differential equation.
pub type CoefficientFunction<'a> = &'a dyn Fn(&Hyperdual<f64>) -> Hyperdual<f64>;

/// Compute a series solution of the linear ordinary differential equation
/// `f^(n) + g_n f^(n-1) + ... + g_2 f' + g_1 f = g_0` around `config.center`,
/// where `coeff_funcs = [g_0, g_1, ..., g_n]` and `initial_values` are
/// `f, f', ..., f^(n-1)` at the center.
///
/// If only `g_0` is given, its Taylor series is returned.
pub fn solve_linear_ode(
    coeff_funcs: &[CoefficientFunction],
    initial_values: &[f64],
    config: &SeriesConfig,
) -> Result<TaylorSeries, SolverError> {
    let Some(g0) = coeff_funcs.first() else {
        return Err(SolverError::ShapeMismatch {
            expected: 1,
            found: 0,
        });
    };

    if coeff_funcs.len() == 1 {
        return Ok(TaylorSeries::from_function(|t| g0(&t), config));
    }

    let order = coeff_funcs.len() - 1;
    if initial_values.len() != order {
        return Err(SolverError::ShapeMismatch {
            expected: order,
            found: initial_values.len(),
        });
    }

    let mut coeffs = initial_values.to_vec();
    if coeffs.len() >= config.num_terms {
        warn!(
            "The number of initial values ({}) is not smaller than the number of terms ({}): returning the initial values only",
            coeffs.len(),
            config.num_terms
        );
        return Ok(TaylorSeries::new(coeffs, config.center));
    }

    for i in 0..config.num_terms - order {
        let t = Hyperdual::variable(config.center, i + 1);

        let mut r = g0(&t);
        for (j, g) in coeff_funcs.iter().enumerate().skip(1) {
            let f = Hyperdual::new(coeffs[j - 1..j + i].iter().copied());
            r -= g(&t) * &f;
        }

        coeffs.push(r.values().get(i).copied().unwrap_or(0.));
    }

    Ok(TaylorSeries::new(coeffs, config.center))
}

#[cfg(test)]
mod test {
    use super::{solve_linear_ode, SeriesConfig, TaylorSeries};
    use crate::{
        derivative::derivative,
        domains::{
            dual::Dual,
            float::{NumericalFloatLike, Real},
            hyperdual::Hyperdual,
        },
        solve::SolverError,
        testing::count_warnings,
    };

    fn exp<T: Real>(x: T) -> T {
        x.exp()
    }

    #[test]
    fn exp_series() {
        let config = SeriesConfig {
            num_terms: 10,
            ..Default::default()
        };
        let s = TaylorSeries::from_function(exp, &config);
        assert_eq!(s.num_terms(), 10);
        assert!(s.coefficients().iter().all(|c| (c - 1.).abs() < 1e-12));
        assert!((s.evaluate(1.) - std::f64::consts::E).abs() < 1e-6);

        // the series can be differentiated
        let d = derivative(|x: Dual<f64>| s.evaluate(x), 0.);
        assert!((d - 1.).abs() < 1e-12);
    }

    #[test]
    fn shifted_center() {
        let config = SeriesConfig {
            center: 1.,
            num_terms: 4,
        };
        let s = TaylorSeries::from_function(|x: Hyperdual<f64>| x.pow(3), &config);
        assert_eq!(s.coefficients(), &[1., 3., 6., 6.]);
        assert_eq!(s.center(), 1.);
        assert!((s.evaluate(2.5) - 2.5f64.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn empty_series() {
        let config = SeriesConfig {
            num_terms: 0,
            ..Default::default()
        };
        let s = TaylorSeries::from_function(exp, &config);
        assert_eq!(s.num_terms(), 0);
        assert_eq!(s.evaluate(2.), 0.);
        assert_eq!(s.to_string(), "0");

        let g0 = |t: &Hyperdual<f64>| t.exp();
        let s = solve_linear_ode(&[&g0], &[], &config).unwrap();
        assert!(s.coefficients().is_empty());
    }

    #[test]
    fn display() {
        let s = TaylorSeries::new(vec![1., 2., 0.5], 0.);
        assert_eq!(s.to_string(), "1 + 2x^1/1! + 0.5x^2/2!");

        let s = TaylorSeries::new(vec![1., 2., 0.5], 1.5);
        assert_eq!(s.to_string(), "1 + 2(x - 1.5)^1/1! + 0.5(x - 1.5)^2/2!");
    }

    #[test]
    fn harmonic_oscillator() {
        // f'' + f = 0, f(0) = 0, f'(0) = 1
        let zero = |t: &Hyperdual<f64>| t.zero();
        let one = |t: &Hyperdual<f64>| t.one();

        let config = SeriesConfig {
            num_terms: 8,
            ..Default::default()
        };
        let s = solve_linear_ode(&[&zero, &one, &zero], &[0., 1.], &config).unwrap();
        assert_eq!(s.coefficients(), &[0., 1., 0., -1., 0., 1., 0., -1.]);
        assert!((s.evaluate(0.3) - 0.3f64.sin()).abs() < 1e-8);
    }

    #[test]
    fn variable_coefficients() {
        // f' - 2 x f = 0, f(0) = 1, solved by exp(x^2)
        let zero = |t: &Hyperdual<f64>| t.zero();
        let g1 = |t: &Hyperdual<f64>| t.clone() * -2.;

        let s = solve_linear_ode(&[&zero, &g1], &[1.], &SeriesConfig::default()).unwrap();
        assert_eq!(s.coefficients(), &[1., 0., 2., 0., 12.]);
    }

    #[test]
    fn inhomogeneous() {
        // f' = exp(x) around 1, f(1) = e
        let g0 = |t: &Hyperdual<f64>| t.exp();
        let zero = |t: &Hyperdual<f64>| t.zero();

        let config = SeriesConfig {
            center: 1.,
            num_terms: 4,
        };
        let s = solve_linear_ode(&[&g0, &zero], &[1f64.exp()], &config).unwrap();
        for c in s.coefficients() {
            assert!((c - 1f64.exp()).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_inputs() {
        let zero = |t: &Hyperdual<f64>| t.zero();
        let one = |t: &Hyperdual<f64>| t.one();
        let config = SeriesConfig {
            num_terms: 2,
            ..Default::default()
        };

        let (s, warnings) =
            count_warnings(|| solve_linear_ode(&[&zero, &one, &zero], &[3., 4.], &config));
        assert_eq!(warnings, 1);
        assert_eq!(s.unwrap().coefficients(), &[3., 4.]);

        let (_, warnings) = count_warnings(|| {
            solve_linear_ode(&[&zero, &one, &zero], &[3., 4.], &SeriesConfig::default())
        });
        assert_eq!(warnings, 0);

        assert_eq!(
            solve_linear_ode(&[&zero, &one, &zero], &[3.], &config),
            Err(SolverError::ShapeMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            solve_linear_ode(&[], &[], &config),
            Err(SolverError::ShapeMismatch {
                expected: 1,
                found: 0
            })
        );

        let cube = |t: &Hyperdual<f64>| t.pow(3);
        let s = solve_linear_ode(&[&cube], &[], &SeriesConfig::default()).unwrap();
        assert_eq!(s.coefficients(), &[0., 0., 0., 6., 0.]);
    }

    #[test]
    fn serialize() {
        let s = TaylorSeries::new(vec![1., 2.], 0.5);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"coeffs":[1.0,2.0],"center":0.5}"#);
        assert_eq!(serde_json::from_str::<TaylorSeries>(&json).unwrap(), s);
    }
}
