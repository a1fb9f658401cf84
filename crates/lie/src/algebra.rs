use std::fmt;
use std::hash::Hash;

use linear::{LinearCombination, Scalar};

/// An element of the Lie algebra `L`, written in its basis.
pub type LieElement<L> =
    LinearCombination<<L as LieAlgebra>::Index, <L as LieAlgebra>::Coefficient>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dimension {
    Finite(usize),
    Infinite,
}

impl Dimension {
    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

/// A Lie algebra over the ring `Self::Coefficient`, equipped with a basis indexed by
/// `Self::Index`. The algebra is determined by the bracket of pairs of basis elements, which
/// should be antisymmetric and satisfy the Jacobi identity.
///
/// Finite dimensional algebras additionally come with an ordering of their basis, returned by
/// [`LieAlgebra::basis`]. This is the default ordering used when forming PBW monomials.
pub trait LieAlgebra: fmt::Display + Send + Sync + 'static {
    type Index: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync + 'static;
    type Coefficient: Scalar;

    fn dimension(&self) -> Dimension;

    /// The basis in its declared order, or `None` if the algebra is infinite dimensional.
    fn basis(&self) -> Option<&[Self::Index]>;

    /// Whether `x` indexes a basis element of the algebra.
    fn contains(&self, x: &Self::Index) -> bool {
        match self.basis() {
            Some(basis) => basis.contains(x),
            None => true,
        }
    }

    /// Computes `[x, y]`. This fails if either argument is not a basis element.
    fn bracket_on_basis(
        &self,
        x: &Self::Index,
        y: &Self::Index,
    ) -> Result<LinearCombination<Self::Index, Self::Coefficient>, crate::BracketError>;

    /// The bilinear extension of [`LieAlgebra::bracket_on_basis`].
    fn bracket(
        &self,
        x: &LinearCombination<Self::Index, Self::Coefficient>,
        y: &LinearCombination<Self::Index, Self::Coefficient>,
    ) -> Result<LinearCombination<Self::Index, Self::Coefficient>, crate::BracketError> {
        let mut result = LinearCombination::zero();
        for (a, c) in x.iter() {
            for (b, d) in y.iter() {
                result.add_scaled(&self.bracket_on_basis(a, b)?, &(c.clone() * d.clone()));
            }
        }
        Ok(result)
    }

    fn basis_element_to_string(&self, x: &Self::Index) -> String {
        format!("{x:?}")
    }

    /// The inverse of [`LieAlgebra::basis_element_to_string`]. Returns `None` if `name` does not
    /// name a basis element.
    fn basis_element_from_string(&self, name: &str) -> Option<Self::Index>;

    /// Prints `x` with its terms in the order of the declared basis.
    fn element_to_string(&self, x: &LinearCombination<Self::Index, Self::Coefficient>) -> String {
        let basis = self.basis();
        x.to_string_by(
            |k| {
                let position = basis.and_then(|b| b.iter().position(|y| y == k));
                (position, k.clone())
            },
            |k| Some(self.basis_element_to_string(k)),
        )
    }
}
