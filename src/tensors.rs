//! Dense linear algebra.

pub mod matrix;
