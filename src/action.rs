use std::sync::Arc;

use lie::module::{Representation, RepresentationElement, RightRepresentation};
use lie::LieAlgebra;

use crate::{PbwBasis, PbwElement, PbwError, Result};

impl<L: LieAlgebra> PbwBasis<L> {
    fn check_module<M: Representation<L>>(&self, module: &M) -> Result<()> {
        if Arc::ptr_eq(self.lie_algebra(), &module.lie_algebra()) {
            Ok(())
        } else {
            Err(PbwError::IncompatibleAlgebras {
                domain: self.to_string(),
                codomain: module.to_string(),
            })
        }
    }

    /// Computes `x · v`. A monomial `b_1 ... b_k` acts by `b_1 · (b_2 · (... (b_k · v)))`.
    pub fn act_on<M: Representation<L>>(
        &self,
        module: &M,
        x: &PbwElement<L>,
        v: &RepresentationElement<M, L>,
    ) -> Result<RepresentationElement<M, L>> {
        self.check_module(module)?;
        let mut result = RepresentationElement::<M, L>::zero();
        for (m, c) in x.iter() {
            let mut w = v.clone();
            for (g, e) in m.sorted_items(self.basis_key())?.into_iter().rev() {
                for _ in 0..e {
                    w = module.apply_generator(g, &w)?;
                }
            }
            result.add_scaled(&w, c);
        }
        Ok(result)
    }

    /// Computes `v · x`. A monomial `b_1 ... b_k` acts by `((v · b_1) · b_2) ... · b_k`.
    pub fn act_on_right<M: RightRepresentation<L>>(
        &self,
        module: &M,
        v: &RepresentationElement<M, L>,
        x: &PbwElement<L>,
    ) -> Result<RepresentationElement<M, L>> {
        self.check_module(module)?;
        let mut result = RepresentationElement::<M, L>::zero();
        for (m, c) in x.iter() {
            let mut w = v.clone();
            for (g, e) in m.sorted_items(self.basis_key())? {
                for _ in 0..e {
                    w = module.apply_generator_right(&w, g)?;
                }
            }
            result.add_scaled(&w, c);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lie::classical;
    use lie::module::{AdjointRepresentation, FiniteDimensionalRepresentation};
    use lie::StructureConstants;
    use linear::LinearCombination;
    use num_rational::Rational64;
    use serde_json::json;

    type Sl2 = StructureConstants<Rational64>;

    fn standard(sl2: &Arc<Sl2>) -> FiniteDimensionalRepresentation<Sl2> {
        let json = json!({
            "name": "V(1)",
            "basis": ["v0", "v1"],
            "actions": ["E v1 = v0", "F v0 = v1", "H v0 = v0", "H v1 = -1 v1"]
        });
        FiniteDimensionalRepresentation::from_json(Arc::clone(sl2), &json).unwrap()
    }

    #[test]
    fn test_act_on_standard() {
        let sl2 = Arc::new(classical::sl2());
        let pbw = PbwBasis::new(Arc::clone(&sl2));
        let module = standard(&sl2);
        let v0 = LinearCombination::monomial(0);
        let v1 = LinearCombination::monomial(1);

        let ef = pbw.evaluate("E*F").unwrap();
        assert_eq!(pbw.act_on(&module, &ef, &v0).unwrap(), v0);
        assert!(pbw.act_on(&module, &ef, &v1).unwrap().is_zero());

        let fe = pbw.evaluate("F*E").unwrap();
        assert_eq!(pbw.act_on(&module, &fe, &v1).unwrap(), v1);
        assert_eq!(pbw.act_on(&module, &pbw.one(), &v1).unwrap(), v1);

        let casimir = pbw.casimir_element().unwrap();
        for v in [&v0, &v1] {
            assert_eq!(
                pbw.act_on(&module, &casimir, v).unwrap(),
                v.scale(&Rational64::new(3, 8))
            );
        }
    }

    #[test]
    fn test_act_on_adjoint() {
        let sl2 = Arc::new(classical::sl2::<Rational64>());
        let pbw = PbwBasis::new(Arc::clone(&sl2));
        let adjoint = AdjointRepresentation::new(Arc::clone(&sl2));
        let casimir = pbw.casimir_element().unwrap();
        for g in ["E", "F", "H"] {
            let v = LinearCombination::monomial(g.to_string());
            assert_eq!(pbw.act_on(&adjoint, &casimir, &v).unwrap(), v);
            assert_eq!(pbw.act_on_right(&adjoint, &v, &casimir).unwrap(), v);
        }

        // E*F acts by ad E ad F on the left and by ad F ad E on the right.
        let ef = pbw.evaluate("E*F").unwrap();
        let e = LinearCombination::monomial("E".to_string());
        assert_eq!(
            adjoint.element_to_string(&pbw.act_on(&adjoint, &ef, &e).unwrap()),
            "2*E"
        );
        assert!(pbw.act_on_right(&adjoint, &e, &ef).unwrap().is_zero());
    }

    #[test]
    fn test_incompatible() {
        let pbw = PbwBasis::new(Arc::new(classical::sl2::<Rational64>()));
        let other = Arc::new(classical::sl2::<Rational64>());
        let module = standard(&other);
        assert!(matches!(
            pbw.act_on(&module, &pbw.one(), &LinearCombination::monomial(0)),
            Err(PbwError::IncompatibleAlgebras { .. })
        ));
    }
}
