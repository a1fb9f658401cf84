//! Computations in the universal enveloping algebra `U(g)` of a Lie algebra `g`, using the
//! Poincaré–Birkhoff–Witt basis.
//!
//! Fix an ordered basis `b_1 < ... < b_n` of `g`. The PBW theorem says that the ordered monomials
//! `b_1^{e_1} ... b_n^{e_n}` form a basis of `U(g)`. An element of `U(g)` is thus a
//! [`PbwElement`], a linear combination of [`Monomial`]s, and the product of two monomials is
//! brought back into this form by commuting generators past each other using
//! `yx = xy + [y, x]`. This is implemented by [`PbwBasis::product_on_basis`].
//!
//! # Example
//! ```
//! use std::sync::Arc;
//!
//! use lie::classical;
//! use num_rational::Rational64;
//! use pbw::PbwBasis;
//!
//! let pbw = PbwBasis::new(Arc::new(classical::sl2::<Rational64>()));
//! let x = pbw.evaluate("F*E").unwrap();
//! assert_eq!(pbw.element_to_string(&x), "E*F - H");
//! ```
//!
//! The order of the basis is given by a [`BasisOrder`]. Lie algebras described by JSON files can
//! be loaded with [`utils::construct`].

#![allow(clippy::many_single_char_names)]
#![warn(clippy::default_trait_access)]
#![warn(clippy::if_not_else)]
#![warn(clippy::needless_continue)]
#![warn(clippy::redundant_closure_for_method_calls)]

mod action;
mod basis_key;
mod casimir;
mod error;
mod evaluator;
mod monomial;
pub mod parser;
mod pbw_basis;
pub mod utils;

pub use basis_key::{BasisKey, BasisOrder, Key};
pub use error::{PbwError, Result};
pub use monomial::Monomial;
pub use pbw_basis::{PbwBasis, PbwElement};
