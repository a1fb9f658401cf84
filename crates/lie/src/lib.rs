//! Lie algebras over a commutative ring, described by a choice of basis together with the bracket
//! of any two basis elements.
//!
//! Elements are [`LinearCombination`]s of basis elements. The finite dimensional algebras that
//! appear in practice are usually given by their structure constants, see [`StructureConstants`],
//! which can be read from JSON. A few families (`gl_n`, Heisenberg algebras, the Witt algebra) are
//! implemented directly, since some of them are infinite dimensional.
//!
//! [`LinearCombination`]: linear::LinearCombination

#![allow(clippy::many_single_char_names)]

mod algebra;
pub mod classical;
mod error;
mod heisenberg;
mod killing;
pub mod module;
mod parse;
mod structure_constants;
mod witt;

pub use algebra::{Dimension, LieAlgebra, LieElement};
pub use error::{ActionError, BracketError, JacobiFailedError, RepresentationFailedRelationError};
pub use heisenberg::{Heisenberg, HeisenbergIndex};
pub use killing::killing_form;
pub use parse::parse_combination;
pub use structure_constants::StructureConstants;
pub use witt::Witt;
