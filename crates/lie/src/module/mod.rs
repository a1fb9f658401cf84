//! Representations of Lie algebras.
//!
//! A representation is specified by the action of a single basis element of the Lie algebra on
//! an element of the module. The action of the universal enveloping algebra is built from this by
//! the `pbw` crate.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use linear::LinearCombination;

use crate::{ActionError, LieAlgebra};

mod adjoint;
mod finite_dimensional;

pub use adjoint::AdjointRepresentation;
pub use finite_dimensional::FiniteDimensionalRepresentation;

/// An element of the representation `M` of `L`.
pub type RepresentationElement<M, L> =
    LinearCombination<<M as Representation<L>>::Index, <L as LieAlgebra>::Coefficient>;

/// A left representation of the Lie algebra `L`, i.e. a module with `[x, y] v = x (y v) - y (x v)`.
pub trait Representation<L: LieAlgebra>: fmt::Display + Send + Sync {
    type Index: Clone + Eq + Hash + Ord + fmt::Debug;

    fn lie_algebra(&self) -> Arc<L>;

    /// Computes `generator · v`.
    fn apply_generator(
        &self,
        generator: &L::Index,
        v: &LinearCombination<Self::Index, L::Coefficient>,
    ) -> Result<LinearCombination<Self::Index, L::Coefficient>, ActionError>;

    fn basis_element_to_string(&self, x: &Self::Index) -> String;

    fn element_to_string(&self, v: &LinearCombination<Self::Index, L::Coefficient>) -> String {
        v.to_string_by(|k| k.clone(), |k| Some(self.basis_element_to_string(k)))
    }
}

/// A representation on which `L` also acts from the right, with
/// `v [x, y] = (v x) y - (v y) x`.
pub trait RightRepresentation<L: LieAlgebra>: Representation<L> {
    /// Computes `v · generator`.
    fn apply_generator_right(
        &self,
        v: &LinearCombination<Self::Index, L::Coefficient>,
        generator: &L::Index,
    ) -> Result<LinearCombination<Self::Index, L::Coefficient>, ActionError>;
}
