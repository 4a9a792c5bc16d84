//! Combinatorial constants of the hyperdual multiplication rule.
//!
//! In the hyperdual algebra `e_j * e_k = C(j + k, k) e_(j+k)`, so the
//! constants that appear are binomial and multinomial coefficients. They are
//! computed exactly with arbitrary-precision integers and only rounded at the end.

use rug::{ops::Pow, Integer};

/// Compute `n!` exactly.
pub fn factorial(n: u32) -> Integer {
    Integer::from(Integer::factorial(n))
}

/// Compute the binomial coefficient `C(n, k)` exactly.
pub fn binomial(n: u32, k: u32) -> Integer {
    Integer::from(Integer::binomial_u(n, k))
}

/// Compute the coefficient `(p*index)! / (index!)^p` of `e_index^p = c e_(p*index)`.
pub fn basis_power_coefficient(index: u32, p: u32) -> f64 {
    let num = factorial(p * index);
    let den = factorial(index).pow(p);
    (num / den).to_f64()
}

/// An iterator over the row `C(n, 0), C(n, 1), ..., C(n, n)` of Pascal's triangle.
///
/// The entries are built with the recurrence `C(n, k + 1) = C(n, k) (n - k) / (k + 1)`,
/// which is exact in `f64` as long as the entries fit in the mantissa.
pub struct BinomialRow {
    n: usize,
    k: usize,
    current: f64,
}

impl BinomialRow {
    pub fn new(n: usize) -> BinomialRow {
        BinomialRow {
            n,
            k: 0,
            current: 1.,
        }
    }
}

impl Iterator for BinomialRow {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.k > self.n {
            return None;
        }

        let r = self.current;
        self.current = self.current * (self.n - self.k) as f64 / (self.k + 1) as f64;
        self.k += 1;
        Some(r)
    }
}

#[cfg(test)]
mod test {
    use super::{basis_power_coefficient, binomial, factorial, BinomialRow};

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(20), 2432902008176640000u64);
    }

    #[test]
    fn binomial_row() {
        let row: Vec<_> = BinomialRow::new(6).collect();
        assert_eq!(row, vec![1., 6., 15., 20., 15., 6., 1.]);

        for n in 0..30u32 {
            for (k, c) in BinomialRow::new(n as usize).enumerate() {
                assert_eq!(c, binomial(n, k as u32).to_f64());
            }
        }
    }

    #[test]
    fn basis_powers() {
        // e1^p = p! e_p
        assert_eq!(basis_power_coefficient(1, 4), 24.);
        // e2^2 = 4!/(2!2!) e4
        assert_eq!(basis_power_coefficient(2, 2), 6.);
        // e2^3 = 6!/(2!)^3 e6
        assert_eq!(basis_power_coefficient(2, 3), 90.);
        assert_eq!(basis_power_coefficient(3, 0), 1.);
        assert_eq!(basis_power_coefficient(0, 5), 1.);
    }
}
