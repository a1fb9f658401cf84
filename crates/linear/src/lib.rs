//! Sparse linear combinations of basis elements with coefficients in a commutative ring.
//!
//! This is the free module machinery underneath the `lie` and `pbw` crates. Elements are stored as
//! a map from basis element to coefficient, and zero coefficients are never stored.

#![allow(clippy::many_single_char_names)]

mod combination;
pub mod matrix;
mod scalar;

pub use combination::LinearCombination;
pub use num_traits::{One, Zero};
pub use scalar::{from_integer, Field, Scalar};
