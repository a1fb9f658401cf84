use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use itertools::Itertools;
use lie::{LieAlgebra, LieElement};
use linear::{LinearCombination, One};

use crate::{BasisKey, BasisOrder, Key, Monomial, PbwError, Result};

/// An element of the universal enveloping algebra of `L`, written in the PBW basis.
pub type PbwElement<L> =
    LinearCombination<Monomial<<L as LieAlgebra>::Index>, <L as LieAlgebra>::Coefficient>;

type ProductCache<L> = DashMap<
    (Monomial<<L as LieAlgebra>::Index>, Monomial<<L as LieAlgebra>::Index>),
    Arc<PbwElement<L>>,
>;

/// The universal enveloping algebra `U(g)` of a Lie algebra `g`, with the
/// Poincaré–Birkhoff–Witt basis of ordered monomials in a basis of `g`.
///
/// The order of the generators in a monomial is determined by a [`BasisKey`], which by default
/// orders the generators as in [`LieAlgebra::basis`]. Products of monomials are reduced to this
/// basis by repeatedly applying `yx = xy + [y, x]` whenever `y` comes after `x`. The products of
/// pairs of monomials are cached, so that reducing the same product twice is cheap.
pub struct PbwBasis<L: LieAlgebra> {
    lie_algebra: Arc<L>,
    basis_key: BasisKey<L>,
    products: ProductCache<L>,
}

impl<L: LieAlgebra> fmt::Display for PbwBasis<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Universal enveloping algebra of {} in the Poincare-Birkhoff-Witt basis",
            self.lie_algebra
        )
    }
}

/// Two PBW bases are equal if they are over the same Lie algebra (as an object) and use the same
/// order.
impl<L: LieAlgebra> PartialEq for PbwBasis<L> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.lie_algebra, &other.lie_algebra)
            && self.basis_key.order() == other.basis_key.order()
    }
}

impl<L: LieAlgebra> PbwBasis<L> {
    /// The PBW basis ordered by the declared basis of `lie_algebra`, or by the order on
    /// `L::Index` if it is infinite dimensional.
    pub fn new(lie_algebra: Arc<L>) -> Self {
        tracing::debug!(algebra = %lie_algebra, "constructing PBW basis");
        Self {
            basis_key: BasisKey::declared(Arc::clone(&lie_algebra)),
            lie_algebra,
            products: DashMap::new(),
        }
    }

    pub fn with_order(lie_algebra: Arc<L>, order: BasisOrder<L::Index>) -> Result<Self> {
        tracing::debug!(algebra = %lie_algebra, ?order, "constructing PBW basis");
        Ok(Self {
            basis_key: BasisKey::new(Arc::clone(&lie_algebra), order)?,
            lie_algebra,
            products: DashMap::new(),
        })
    }

    pub fn lie_algebra(&self) -> &Arc<L> {
        &self.lie_algebra
    }

    pub fn basis_key(&self) -> &BasisKey<L> {
        &self.basis_key
    }

    /// The number of cached products of pairs of monomials.
    pub fn cached_products(&self) -> usize {
        self.products.len()
    }

    pub fn one_basis(&self) -> Monomial<L::Index> {
        Monomial::one()
    }

    pub fn one(&self) -> PbwElement<L> {
        LinearCombination::monomial(Monomial::one())
    }

    pub fn zero(&self) -> PbwElement<L> {
        LinearCombination::zero()
    }

    pub fn monomial(&self, m: Monomial<L::Index>) -> PbwElement<L> {
        LinearCombination::monomial(m)
    }

    /// `c` times the identity.
    pub fn scalar(&self, c: L::Coefficient) -> PbwElement<L> {
        LinearCombination::term(Monomial::one(), c)
    }

    /// The image of the basis element `g` of the Lie algebra, i.e. the monomial `g`.
    pub fn lift(&self, g: &L::Index) -> PbwElement<L> {
        self.monomial(Monomial::gen(g.clone()))
    }

    pub fn lift_element(&self, x: &LieElement<L>) -> PbwElement<L> {
        x.map_support(|g| Monomial::gen(g.clone()))
    }

    /// The inverse of [`PbwBasis::lift_element`]. This fails unless every monomial of `u` has
    /// degree one.
    pub fn retract(&self, u: &PbwElement<L>) -> Result<LieElement<L>> {
        u.try_map_support(|m| match m.iter().exactly_one() {
            Ok((g, 1)) => Ok(g.clone()),
            _ => Err(PbwError::NotInImage {
                element: self.element_to_string(u),
            }),
        })
    }

    /// The lifts of the basis elements of the Lie algebra, which generate the enveloping algebra.
    pub fn algebra_generators(&self) -> Result<Vec<(L::Index, PbwElement<L>)>> {
        let basis = self.finite_basis()?;
        Ok(basis.iter().map(|g| (g.clone(), self.lift(g))).collect())
    }

    pub(crate) fn finite_basis(&self) -> Result<&[L::Index]> {
        self.lie_algebra
            .basis()
            .ok_or_else(|| PbwError::InfiniteDimension {
                algebra: self.lie_algebra.to_string(),
            })
    }

    pub fn degree_on_basis(&self, m: &Monomial<L::Index>) -> u32 {
        m.degree()
    }

    /// The largest degree of a monomial in `x`, or `None` if `x` is zero.
    pub fn maximal_degree(&self, x: &PbwElement<L>) -> Option<u32> {
        x.support().map(Monomial::degree).max()
    }

    /// The sum of the terms of `x` of degree `degree`.
    pub fn homogeneous_component(&self, x: &PbwElement<L>, degree: u32) -> PbwElement<L> {
        x.iter()
            .filter(|(m, _)| m.degree() == degree)
            .map(|(m, c)| (m.clone(), c.clone()))
            .collect()
    }

    /// Divides `lhs` by `rhs` as monomials.
    pub fn divide(
        &self,
        lhs: &Monomial<L::Index>,
        rhs: &Monomial<L::Index>,
    ) -> Result<Monomial<L::Index>> {
        lhs.checked_div(rhs)
            .ok_or_else(|| PbwError::InvalidDivision {
                dividend: self.monomial_to_string(lhs),
                divisor: self.monomial_to_string(rhs),
            })
    }

    /// Computes the product of two monomials in the PBW basis.
    pub fn product_on_basis(
        &self,
        lhs: &Monomial<L::Index>,
        rhs: &Monomial<L::Index>,
    ) -> Result<Arc<PbwElement<L>>> {
        if lhs.is_one() {
            return Ok(Arc::new(self.monomial(rhs.clone())));
        }
        if rhs.is_one() {
            return Ok(Arc::new(self.monomial(lhs.clone())));
        }

        let key = (lhs.clone(), rhs.clone());
        if let Some(result) = self.products.get(&key) {
            return Ok(Arc::clone(&result));
        }

        let result = self.reduce(lhs, rhs)?;
        debug_assert!(
            result
                .support()
                .all(|m| m.degree() <= lhs.degree() + rhs.degree()),
            "product of monomials increased the degree"
        );
        Ok(Arc::clone(
            self.products.entry(key).or_insert(Arc::new(result)).value(),
        ))
    }

    fn reduce(
        &self,
        lhs: &Monomial<L::Index>,
        rhs: &Monomial<L::Index>,
    ) -> Result<PbwElement<L>> {
        let (Some(trail), Some(lead)) = (
            lhs.trailing_support(&self.basis_key)?,
            rhs.leading_support(&self.basis_key)?,
        ) else {
            return Ok(self.monomial(lhs * rhs));
        };
        if self.basis_key.key(trail)? <= self.basis_key.key(lead)? {
            return Ok(self.monomial(lhs * rhs));
        }

        tracing::trace!(
            lhs = %self.monomial_to_string(lhs),
            rhs = %self.monomial_to_string(rhs),
            "commuting {} past {}",
            self.lie_algebra.basis_element_to_string(trail),
            self.lie_algebra.basis_element_to_string(lead)
        );

        // trail * lead = lead * trail + [trail, lead]
        let mut terms = self.lift_element(&self.lie_algebra.bracket_on_basis(trail, lead)?);
        terms.add_basis_element(
            Monomial::gen(lead.clone()) * Monomial::gen(trail.clone()),
            L::Coefficient::one(),
        );

        let head = self.divide(lhs, &Monomial::gen(trail.clone()))?;
        let tail = self.divide(rhs, &Monomial::gen(lead.clone()))?;
        let result = self.multiply(&self.monomial(head), &terms)?;
        self.multiply(&result, &self.monomial(tail))
    }

    /// The product of two elements, the bilinear extension of [`PbwBasis::product_on_basis`].
    pub fn multiply(&self, a: &PbwElement<L>, b: &PbwElement<L>) -> Result<PbwElement<L>> {
        let mut result = self.zero();
        for (m, c) in a.iter() {
            for (n, d) in b.iter() {
                result.add_scaled(&*self.product_on_basis(m, n)?, &(c.clone() * d.clone()));
            }
        }
        Ok(result)
    }

    pub fn pow(&self, a: &PbwElement<L>, exponent: u32) -> Result<PbwElement<L>> {
        let mut result = self.one();
        for _ in 0..exponent {
            result = self.multiply(&result, a)?;
        }
        Ok(result)
    }

    /// `ab - ba`.
    pub fn commutator(&self, a: &PbwElement<L>, b: &PbwElement<L>) -> Result<PbwElement<L>> {
        Ok(self.multiply(a, b)? - &self.multiply(b, a)?)
    }

    /// Converts an element of another PBW basis of the same Lie algebra into this basis. The
    /// monomials of `x` are multiplied out in the order of `other`.
    pub fn convert_from(&self, other: &Self, x: &PbwElement<L>) -> Result<PbwElement<L>> {
        if !Arc::ptr_eq(&self.lie_algebra, &other.lie_algebra) {
            return Err(PbwError::IncompatibleAlgebras {
                domain: other.to_string(),
                codomain: self.to_string(),
            });
        }
        if self == other {
            return Ok(x.clone());
        }
        let mut result = self.zero();
        for (m, c) in x.iter() {
            let mut product = self.one();
            for (g, e) in m.sorted_items(&other.basis_key)? {
                product = self.multiply(&product, &self.monomial(Monomial::power(g.clone(), e)))?;
            }
            result.add_scaled(&product, c);
        }
        Ok(result)
    }

    /// The sort key used to display elements: higher degree monomials come first, and monomials
    /// of the same degree are ordered lexicographically by the keys of their generators.
    #[allow(clippy::type_complexity)]
    fn display_key(
        &self,
        m: &Monomial<L::Index>,
    ) -> (Reverse<u32>, Vec<(Option<i64>, Option<L::Index>)>) {
        let word = self
            .sorted_generators(m)
            .into_iter()
            .flat_map(|(g, e)| {
                let key = match self.basis_key.key(g) {
                    Ok(Key::Rank(r)) => (Some(r), None),
                    Ok(Key::Index(g)) => (None, Some(g.clone())),
                    Err(_) => (None, None),
                };
                std::iter::repeat(key).take(e as usize)
            })
            .collect();
        (Reverse(m.degree()), word)
    }

    /// The generators of `m` sorted by the basis key. Generators without a key come first.
    fn sorted_generators<'a>(&self, m: &'a Monomial<L::Index>) -> Vec<(&'a L::Index, u32)> {
        m.iter()
            .sorted_by_cached_key(|&(g, _)| self.basis_key.key(g).ok())
            .collect()
    }

    pub fn monomial_to_string(&self, m: &Monomial<L::Index>) -> String {
        if m.is_one() {
            return "1".to_string();
        }
        self.sorted_generators(m)
            .into_iter()
            .map(|(g, e)| {
                let name = self.lie_algebra.basis_element_to_string(g);
                if e == 1 {
                    name
                } else {
                    format!("{name}^{e}")
                }
            })
            .join("*")
    }

    pub fn element_to_string(&self, x: &PbwElement<L>) -> String {
        x.to_string_by(
            |m| self.display_key(m),
            |m| (!m.is_one()).then(|| self.monomial_to_string(m)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use lie::{classical, BracketError, StructureConstants};
    use num_rational::Rational64;
    use proptest::prelude::*;

    type Sl2 = StructureConstants<Rational64>;

    fn sl2() -> PbwBasis<Sl2> {
        PbwBasis::new(Arc::new(classical::sl2()))
    }

    fn lift(pbw: &PbwBasis<Sl2>, name: &str) -> PbwElement<Sl2> {
        pbw.lift(&name.to_string())
    }

    fn product(pbw: &PbwBasis<Sl2>, names: &[&str]) -> PbwElement<Sl2> {
        names.iter().fold(pbw.one(), |acc, name| {
            pbw.multiply(&acc, &lift(pbw, name)).unwrap()
        })
    }

    fn monomial(powers: &[(&str, u32)]) -> Monomial<String> {
        powers.iter().map(|&(g, e)| (g.to_string(), e)).collect()
    }

    #[test]
    fn test_sl2_products() {
        let pbw = sl2();
        let check = |names: &[&str], output: expect_test::Expect| {
            output.assert_eq(&pbw.element_to_string(&product(&pbw, names)));
        };
        check(&["E", "F"], expect![[r#"E*F"#]]);
        check(&["F", "E"], expect![[r#"E*F - H"#]]);
        check(&["H", "E"], expect![[r#"E*H + 2*E"#]]);
        check(&["H", "F"], expect![[r#"F*H - 2*F"#]]);
        check(&["H", "F", "E"], expect![[r#"E*F*H - H^2"#]]);
        check(
            &["E", "F", "H", "E"],
            expect![[r#"E^2*F*H + 2*E^2*F - E*H^2 - 2*E*H"#]],
        );
        check(
            &["H", "H", "F", "F"],
            expect![[r#"F^2*H^2 - 8*F^2*H + 16*F^2"#]],
        );
        check(&[], expect![[r#"1"#]]);
    }

    #[test]
    fn test_product_on_basis() {
        let pbw = sl2();
        let lhs = monomial(&[("E", 1), ("H", 2)]);
        let rhs = monomial(&[("F", 1)]);
        let result = pbw.product_on_basis(&lhs, &rhs).unwrap();
        assert_eq!(result.coefficient(&(&lhs * &rhs)), Rational64::from_integer(1));
        assert!(result.support().all(|m| m.degree() <= 4));

        let sorted = pbw
            .product_on_basis(&monomial(&[("E", 1)]), &monomial(&[("F", 2), ("H", 1)]))
            .unwrap();
        assert_eq!(*sorted, pbw.monomial(monomial(&[("E", 1), ("F", 2), ("H", 1)])));
    }

    #[test]
    fn test_identity() {
        let pbw = sl2();
        let x = product(&pbw, &["F", "H", "E"]) + &lift(&pbw, "H");
        assert_eq!(pbw.multiply(&pbw.one(), &x).unwrap(), x);
        assert_eq!(pbw.multiply(&x, &pbw.one()).unwrap(), x);
        assert!(pbw.multiply(&x, &pbw.zero()).unwrap().is_zero());
        assert_eq!(pbw.one_basis(), Monomial::one());
    }

    #[test]
    fn test_cache() {
        let pbw = sl2();
        let lhs = monomial(&[("F", 1), ("H", 1)]);
        let rhs = monomial(&[("E", 2)]);
        assert_eq!(pbw.cached_products(), 0);
        let first = pbw.product_on_basis(&lhs, &rhs).unwrap();
        let cached = pbw.cached_products();
        assert!(cached > 0);
        let second = pbw.product_on_basis(&lhs, &rhs).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(pbw.cached_products(), cached);

        // A fresh instance has its own cache, and computes the same answer.
        let other = sl2();
        assert_eq!(*other.product_on_basis(&lhs, &rhs).unwrap(), *first);
    }

    #[test]
    fn test_degree() {
        let pbw = sl2();
        let x = product(&pbw, &["H", "F", "E"]);
        assert_eq!(pbw.maximal_degree(&x), Some(3));
        assert_eq!(pbw.maximal_degree(&pbw.zero()), None);
        assert_eq!(pbw.maximal_degree(&pbw.one()), Some(0));
        expect![[r#"-H^2"#]].assert_eq(&pbw.element_to_string(&pbw.homogeneous_component(&x, 2)));
        assert!(pbw.homogeneous_component(&x, 1).is_zero());
        assert_eq!(pbw.degree_on_basis(&monomial(&[("E", 2), ("H", 1)])), 3);
    }

    #[test]
    fn test_lift_and_retract() {
        let pbw = sl2();
        let sl2 = Arc::clone(pbw.lie_algebra());
        let x: LieElement<Sl2> = [
            ("E".to_string(), Rational64::new(1, 2)),
            ("H".to_string(), Rational64::from_integer(-3)),
        ]
        .into_iter()
        .collect();
        let lifted = pbw.lift_element(&x);
        assert_eq!(pbw.element_to_string(&lifted), "1/2*E - 3*H");
        assert_eq!(pbw.retract(&lifted).unwrap(), x);
        assert!(pbw.retract(&pbw.zero()).unwrap().is_zero());

        assert!(matches!(
            pbw.retract(&pbw.one()),
            Err(PbwError::NotInImage { .. })
        ));
        assert!(matches!(
            pbw.retract(&product(&pbw, &["E", "F"])),
            Err(PbwError::NotInImage { .. })
        ));

        // lift is injective on the basis
        let generators = pbw.algebra_generators().unwrap();
        assert_eq!(generators.len(), 3);
        for (i, (_, a)) in generators.iter().enumerate() {
            for (_, b) in &generators[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(sl2.basis().unwrap().len(), generators.len());
    }

    #[test]
    fn test_commutator_and_pow() {
        let pbw = sl2();
        let e = lift(&pbw, "E");
        let f = lift(&pbw, "F");
        expect![[r#"H"#]].assert_eq(&pbw.element_to_string(&pbw.commutator(&e, &f).unwrap()));
        let ef = e.clone() + &f;
        expect![[r#"E^2 + 2*E*F + F^2 - H"#]]
            .assert_eq(&pbw.element_to_string(&pbw.pow(&ef, 2).unwrap()));
        assert_eq!(pbw.pow(&ef, 0).unwrap(), pbw.one());
    }

    #[test]
    fn test_display() {
        let pbw = sl2();
        assert_eq!(
            pbw.to_string(),
            "Universal enveloping algebra of sl2 in the Poincare-Birkhoff-Witt basis"
        );
        assert_eq!(pbw.element_to_string(&pbw.zero()), "0");
        assert_eq!(pbw.element_to_string(&pbw.scalar(Rational64::new(-1, 2))), "-1/2");
        assert_eq!(pbw.monomial_to_string(&pbw.one_basis()), "1");
        let x = pbw.monomial(monomial(&[("H", 1), ("E", 2), ("F", 1)]));
        assert_eq!(pbw.element_to_string(&x), "E^2*F*H");
    }

    #[test]
    fn test_invalid_division() {
        let pbw = sl2();
        let err = pbw
            .divide(&monomial(&[("E", 1)]), &monomial(&[("E", 2)]))
            .unwrap_err();
        assert_eq!(
            err,
            PbwError::InvalidDivision {
                dividend: "E".to_string(),
                divisor: "E^2".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_generator() {
        let pbw = sl2();
        let x = pbw.multiply(&lift(&pbw, "X"), &lift(&pbw, "E"));
        assert!(matches!(x, Err(PbwError::UnindexedKey { .. })));
    }

    #[test]
    fn test_bracket_error_propagates() {
        // The natural order compares indices directly, so an unknown generator only fails once
        // its bracket is needed.
        let pbw = PbwBasis::with_order(Arc::new(classical::sl2::<Rational64>()), BasisOrder::Natural)
            .unwrap();
        let x = pbw.multiply(&lift(&pbw, "X"), &lift(&pbw, "E"));
        assert!(matches!(
            x,
            Err(PbwError::Bracket(BracketError::UnknownGenerator { ref generator, .. })) if generator == "X"
        ));

        // Already in order, so no bracket is taken.
        assert!(pbw.multiply(&lift(&pbw, "E"), &lift(&pbw, "X")).is_ok());
    }

    #[test]
    fn test_equality() {
        let lie = Arc::new(classical::sl2::<Rational64>());
        let a = PbwBasis::new(Arc::clone(&lie));
        let b = PbwBasis::with_order(Arc::clone(&lie), BasisOrder::Declared).unwrap();
        let c = PbwBasis::with_order(Arc::clone(&lie), BasisOrder::Reversed).unwrap();
        assert!(a == b);
        assert!(a != c);
        assert!(a != sl2());
    }

    fn arb_monomial_in(names: &'static [&'static str]) -> impl Strategy<Value = Monomial<String>> {
        proptest::collection::vec((0..names.len(), 0..3u32), 0..3).prop_map(move |powers| {
            powers
                .into_iter()
                .map(|(i, e)| (names[i].to_string(), e))
                .collect()
        })
    }

    fn arb_monomial() -> impl Strategy<Value = Monomial<String>> {
        arb_monomial_in(&["E", "F", "H"])
    }

    fn arb_gl2_monomial() -> impl Strategy<Value = Monomial<String>> {
        arb_monomial_in(&["E00", "E01", "E10", "E11"])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_associative(a in arb_monomial(), b in arb_monomial(), c in arb_monomial()) {
            let pbw = sl2();
            let (a, b, c) = (pbw.monomial(a), pbw.monomial(b), pbw.monomial(c));
            let left = pbw.multiply(&pbw.multiply(&a, &b).unwrap(), &c).unwrap();
            let right = pbw.multiply(&a, &pbw.multiply(&b, &c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn test_associative_gl2(a in arb_gl2_monomial(), b in arb_gl2_monomial(), c in arb_gl2_monomial()) {
            let pbw = PbwBasis::new(Arc::new(classical::gl::<Rational64>(2)));
            let (a, b, c) = (pbw.monomial(a), pbw.monomial(b), pbw.monomial(c));
            let left = pbw.multiply(&pbw.multiply(&a, &b).unwrap(), &c).unwrap();
            let right = pbw.multiply(&a, &pbw.multiply(&b, &c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn test_sorted_term_present(a in arb_monomial(), b in arb_monomial()) {
            let pbw = sl2();
            let result = pbw.product_on_basis(&a, &b).unwrap();
            prop_assert_eq!(result.coefficient(&(&a * &b)), Rational64::from_integer(1));
            let degree = a.degree() + b.degree();
            prop_assert!(result.support().all(|m| m.degree() <= degree));
        }
    }
}
