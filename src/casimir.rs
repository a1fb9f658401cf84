use lie::{killing_form, LieAlgebra};
use linear::matrix::{self, InverseError};
use linear::{Field, Zero};

use crate::{PbwBasis, PbwElement, PbwError, Result};

impl<L: LieAlgebra> PbwBasis<L>
where
    L::Coefficient: Field,
{
    /// The quadratic Casimir element `Σ κ^{ij} b_i b_j`, where `κ^{ij}` is the inverse of the
    /// matrix of the Killing form in the basis `b_i`. This lies in the center of the enveloping
    /// algebra.
    ///
    /// The Lie algebra must be finite dimensional with nondegenerate Killing form.
    pub fn casimir_element(&self) -> Result<PbwElement<L>> {
        self.casimir_element_of_order(2)
    }

    /// The Casimir element of degree `order`. Only the quadratic one is available, and any other
    /// order is [`PbwError::UnsupportedCasimirOrder`].
    #[tracing::instrument(skip(self), fields(algebra = %self.lie_algebra()))]
    pub fn casimir_element_of_order(&self, order: u32) -> Result<PbwElement<L>> {
        let basis = self.finite_basis()?;
        if order != 2 {
            return Err(PbwError::UnsupportedCasimirOrder { order });
        }
        let form = killing_form(&**self.lie_algebra(), basis)?;
        let inverse = matrix::inverse(&form).map_err(|e| match e {
            InverseError::Singular => PbwError::DegenerateKillingForm {
                algebra: self.lie_algebra().to_string(),
            },
            InverseError::NotInvertible { pivot } => PbwError::NonInvertibleCoefficient {
                algebra: self.lie_algebra().to_string(),
                pivot,
            },
        })?;

        let mut result = self.zero();
        for (x, row) in basis.iter().zip(&inverse) {
            for (y, c) in basis.iter().zip(row) {
                if c.is_zero() {
                    continue;
                }
                result.add_scaled(&self.multiply(&self.lift(x), &self.lift(y))?, c);
            }
        }
        tracing::debug!(terms = result.len(), "computed Casimir element");
        Ok(result)
    }
}
