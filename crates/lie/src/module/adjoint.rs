use std::fmt;
use std::sync::Arc;

use linear::LinearCombination;

use super::{Representation, RightRepresentation};
use crate::{ActionError, LieAlgebra};

/// `L` acting on itself by the bracket, `x · v = [x, v]` and `v · x = [v, x]`.
pub struct AdjointRepresentation<L> {
    lie_algebra: Arc<L>,
}

impl<L: LieAlgebra> AdjointRepresentation<L> {
    pub fn new(lie_algebra: Arc<L>) -> Self {
        Self { lie_algebra }
    }
}

impl<L: LieAlgebra> fmt::Display for AdjointRepresentation<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "adjoint representation of {}", self.lie_algebra)
    }
}

impl<L: LieAlgebra> Representation<L> for AdjointRepresentation<L> {
    type Index = L::Index;

    fn lie_algebra(&self) -> Arc<L> {
        Arc::clone(&self.lie_algebra)
    }

    fn apply_generator(
        &self,
        generator: &L::Index,
        v: &LinearCombination<L::Index, L::Coefficient>,
    ) -> Result<LinearCombination<L::Index, L::Coefficient>, ActionError> {
        Ok(self
            .lie_algebra
            .bracket(&LinearCombination::monomial(generator.clone()), v)?)
    }

    fn basis_element_to_string(&self, x: &L::Index) -> String {
        self.lie_algebra.basis_element_to_string(x)
    }

    fn element_to_string(&self, v: &LinearCombination<L::Index, L::Coefficient>) -> String {
        self.lie_algebra.element_to_string(v)
    }
}

impl<L: LieAlgebra> RightRepresentation<L> for AdjointRepresentation<L> {
    fn apply_generator_right(
        &self,
        v: &LinearCombination<L::Index, L::Coefficient>,
        generator: &L::Index,
    ) -> Result<LinearCombination<L::Index, L::Coefficient>, ActionError> {
        Ok(self
            .lie_algebra
            .bracket(v, &LinearCombination::monomial(generator.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classical;

    #[test]
    fn test_adjoint() {
        let sl2 = Arc::new(classical::sl2::<i64>());
        let adjoint = AdjointRepresentation::new(Arc::clone(&sl2));
        let v = |name: &str| LinearCombination::monomial(name.to_string());

        let left = adjoint.apply_generator(&"E".to_string(), &v("F")).unwrap();
        assert_eq!(adjoint.element_to_string(&left), "H");
        let right = adjoint.apply_generator_right(&v("F"), &"E".to_string()).unwrap();
        assert_eq!(adjoint.element_to_string(&right), "-H");

        let w = v("E") + &v("H");
        let left = adjoint.apply_generator(&"H".to_string(), &w).unwrap();
        assert_eq!(adjoint.element_to_string(&left), "2*E");

        assert!(matches!(
            adjoint.apply_generator(&"X".to_string(), &w),
            Err(ActionError::Bracket(_))
        ));
    }
}
