//! Monomials in the PBW basis, as multisets of generators.

use std::collections::BTreeMap;
use std::ops::Mul;

use lie::LieAlgebra;

use crate::{BasisKey, Key, Result};

/// A commutative monomial `b_1^{e_1} ... b_n^{e_n}` in the generators of a Lie algebra. Only
/// positive exponents are stored, and the empty monomial is the identity.
///
/// A monomial itself carries no order on its generators. The order in which they are written is
/// determined by a [`BasisKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial<I> {
    exponents: BTreeMap<I, u32>,
}

impl<I> Default for Monomial<I> {
    fn default() -> Self {
        Self {
            exponents: BTreeMap::new(),
        }
    }
}

impl<I: Clone + Ord> Monomial<I> {
    pub fn one() -> Self {
        Self::default()
    }

    pub fn gen(g: I) -> Self {
        Self::power(g, 1)
    }

    pub fn power(g: I, exponent: u32) -> Self {
        let mut result = Self::one();
        if exponent > 0 {
            result.exponents.insert(g, exponent);
        }
        result
    }

    pub fn is_one(&self) -> bool {
        self.exponents.is_empty()
    }

    /// The total degree, i.e. the sum of the exponents.
    pub fn degree(&self) -> u32 {
        self.exponents.values().sum()
    }

    pub fn exponent(&self, g: &I) -> u32 {
        self.exponents.get(g).copied().unwrap_or(0)
    }

    /// Iterate over the generators and their exponents, in the order of `I`.
    pub fn iter(&self) -> impl Iterator<Item = (&I, u32)> + '_ {
        self.exponents.iter().map(|(g, &e)| (g, e))
    }

    pub fn generators(&self) -> impl Iterator<Item = &I> + '_ {
        self.exponents.keys()
    }

    /// Divides by `other`. Returns `None` unless every exponent of `other` is bounded by the
    /// corresponding exponent of `self`.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        let mut result = self.clone();
        for (g, &e) in &other.exponents {
            let current = result.exponents.get_mut(g)?;
            *current = current.checked_sub(e)?;
            if *current == 0 {
                result.exponents.remove(g);
            }
        }
        Some(result)
    }

    fn extremal_support<'a, L>(
        &'a self,
        basis_key: &BasisKey<L>,
        replace: impl Fn(&Key<'a, I>, &Key<'a, I>) -> bool,
    ) -> Result<Option<&'a I>>
    where
        L: LieAlgebra<Index = I>,
    {
        let mut best: Option<(&I, Key<'_, I>)> = None;
        for g in self.generators() {
            let key = basis_key.key(g)?;
            if best.as_ref().map_or(true, |(_, b)| replace(&key, b)) {
                best = Some((g, key));
            }
        }
        Ok(best.map(|(g, _)| g))
    }

    /// The generator with the smallest key, i.e. the first generator when written in order.
    pub fn leading_support<'a, L>(&'a self, basis_key: &BasisKey<L>) -> Result<Option<&'a I>>
    where
        L: LieAlgebra<Index = I>,
    {
        self.extremal_support(basis_key, |new, best| new < best)
    }

    /// The generator with the largest key, i.e. the last generator when written in order.
    pub fn trailing_support<'a, L>(&'a self, basis_key: &BasisKey<L>) -> Result<Option<&'a I>>
    where
        L: LieAlgebra<Index = I>,
    {
        self.extremal_support(basis_key, |new, best| new > best)
    }

    /// The generators and their exponents, sorted by `basis_key`.
    pub fn sorted_items<'a, L>(&'a self, basis_key: &BasisKey<L>) -> Result<Vec<(&'a I, u32)>>
    where
        L: LieAlgebra<Index = I>,
    {
        let mut items = self
            .iter()
            .map(|(g, e)| basis_key.key(g).map(|key| (key, g, e)))
            .collect::<Result<Vec<_>>>()?;
        items.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(items.into_iter().map(|(_, g, e)| (g, e)).collect())
    }
}

impl<I: Clone + Ord> Mul for &Monomial<I> {
    type Output = Monomial<I>;

    fn mul(self, other: Self) -> Monomial<I> {
        let mut result = self.clone();
        for (g, &e) in &other.exponents {
            *result.exponents.entry(g.clone()).or_insert(0) += e;
        }
        result
    }
}

impl<I: Clone + Ord> Mul for Monomial<I> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        &self * &other
    }
}

impl<I: Clone + Ord> FromIterator<(I, u32)> for Monomial<I> {
    /// Multiplies the given powers together.
    fn from_iter<T: IntoIterator<Item = (I, u32)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(g, e)| Self::power(g, e))
            .fold(Self::one(), |acc, m| acc * m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BasisOrder;
    use lie::classical;
    use std::sync::Arc;

    type M = Monomial<char>;

    fn m(powers: &[(char, u32)]) -> M {
        powers.iter().copied().collect()
    }

    #[test]
    fn test_multiply() {
        assert_eq!(m(&[('a', 1)]) * m(&[('a', 2), ('b', 1)]), m(&[('a', 3), ('b', 1)]));
        assert_eq!(m(&[('a', 1)]) * M::one(), m(&[('a', 1)]));
        assert_eq!(M::power('a', 0), M::one());
        assert_eq!(m(&[('a', 2), ('c', 3)]).degree(), 5);
        assert_eq!(m(&[('a', 2), ('c', 3)]).exponent(&'b'), 0);
    }

    #[test]
    fn test_divide() {
        let x = m(&[('a', 2), ('b', 1)]);
        assert_eq!(x.checked_div(&m(&[('b', 1)])), Some(m(&[('a', 2)])));
        assert_eq!(x.checked_div(&x), Some(M::one()));
        assert_eq!(x.checked_div(&m(&[('a', 3)])), None);
        assert_eq!(x.checked_div(&m(&[('c', 1)])), None);
    }

    #[test]
    fn test_supports() {
        let sl2 = Arc::new(classical::sl2::<i64>());
        let declared = BasisKey::declared(Arc::clone(&sl2));
        let reversed = BasisKey::new(sl2, BasisOrder::Reversed).unwrap();
        let x: Monomial<String> = [("H".to_string(), 1), ("E".to_string(), 2), ("F".to_string(), 1)]
            .into_iter()
            .collect();

        assert_eq!(x.leading_support(&declared).unwrap().unwrap(), "E");
        assert_eq!(x.trailing_support(&declared).unwrap().unwrap(), "H");
        assert_eq!(x.leading_support(&reversed).unwrap().unwrap(), "H");
        assert_eq!(x.trailing_support(&reversed).unwrap().unwrap(), "E");
        assert_eq!(Monomial::<String>::one().leading_support(&declared).unwrap(), None);

        let items: Vec<_> = x
            .sorted_items(&reversed)
            .unwrap()
            .into_iter()
            .map(|(g, e)| (g.as_str(), e))
            .collect();
        assert_eq!(items, [("H", 1), ("F", 1), ("E", 2)]);
    }
}
