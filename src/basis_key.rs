//! Total orders on the basis of a Lie algebra, used to sort the generators of a PBW monomial.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use lie::LieAlgebra;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap as HashMap;

use crate::{PbwError, Result};

/// A choice of total order on the basis of a Lie algebra.
pub enum BasisOrder<I> {
    /// The position in [`LieAlgebra::basis`]. Infinite dimensional algebras have no declared
    /// basis, and fall back to [`BasisOrder::Natural`].
    Declared,
    /// The reverse of [`BasisOrder::Declared`]. Only available for finite dimensional algebras.
    Reversed,
    /// The order given by the `Ord` implementation of the index.
    Natural,
    /// A caller-supplied sort key, which must be injective on the basis.
    Custom(Arc<dyn Fn(&I) -> i64 + Send + Sync>),
}

impl<I> BasisOrder<I> {
    pub fn custom(f: impl Fn(&I) -> i64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }
}

impl<I> Clone for BasisOrder<I> {
    fn clone(&self) -> Self {
        match self {
            Self::Declared => Self::Declared,
            Self::Reversed => Self::Reversed,
            Self::Natural => Self::Natural,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<I> fmt::Debug for BasisOrder<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => write!(f, "Declared"),
            Self::Reversed => write!(f, "Reversed"),
            Self::Natural => write!(f, "Natural"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Custom orders are equal only if they are the same function.
impl<I> PartialEq for BasisOrder<I> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Declared, Self::Declared)
            | (Self::Reversed, Self::Reversed)
            | (Self::Natural, Self::Natural) => true,
            (Self::Custom(f), Self::Custom(g)) => Arc::ptr_eq(f, g),
            _ => false,
        }
    }
}

/// The sort key of a generator. All keys produced by a single [`BasisKey`] are of the same
/// variant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key<'a, I> {
    Rank(i64),
    Index(&'a I),
}

/// Computes the sort keys of the generators of a Lie algebra under a [`BasisOrder`].
pub struct BasisKey<L: LieAlgebra> {
    lie_algebra: Arc<L>,
    order: BasisOrder<L::Index>,
    ranks: OnceCell<HashMap<L::Index, i64>>,
}

impl<L: LieAlgebra> BasisKey<L> {
    pub fn declared(lie_algebra: Arc<L>) -> Self {
        Self {
            lie_algebra,
            order: BasisOrder::Declared,
            ranks: OnceCell::new(),
        }
    }

    /// This fails if `order` is [`BasisOrder::Reversed`] and the algebra is infinite
    /// dimensional, or if a custom key takes the same value on two basis elements.
    pub fn new(lie_algebra: Arc<L>, order: BasisOrder<L::Index>) -> Result<Self> {
        match (&order, lie_algebra.basis()) {
            (BasisOrder::Reversed, None) => {
                return Err(PbwError::InfiniteDimension {
                    algebra: lie_algebra.to_string(),
                })
            }
            (BasisOrder::Custom(f), Some(basis)) => {
                let mut seen: HashMap<i64, &L::Index> = HashMap::default();
                for g in basis {
                    let key = f(g);
                    if let Some(other) = seen.insert(key, g) {
                        return Err(PbwError::DuplicateKey {
                            first: lie_algebra.basis_element_to_string(other),
                            second: lie_algebra.basis_element_to_string(g),
                            key,
                        });
                    }
                }
            }
            _ => (),
        }
        Ok(Self {
            lie_algebra,
            order,
            ranks: OnceCell::new(),
        })
    }

    pub fn order(&self) -> &BasisOrder<L::Index> {
        &self.order
    }

    /// The position of each basis element in the declared basis. Only called when the basis is
    /// finite.
    fn ranks(&self, basis: &[L::Index]) -> &HashMap<L::Index, i64> {
        self.ranks.get_or_init(|| {
            tracing::debug!(algebra = %self.lie_algebra, "building basis ranks");
            basis
                .iter()
                .enumerate()
                .map(|(i, g)| (g.clone(), i as i64))
                .collect()
        })
    }

    fn rank(&self, basis: &[L::Index], g: &L::Index) -> Result<i64> {
        self.ranks(basis)
            .get(g)
            .copied()
            .ok_or_else(|| PbwError::UnindexedKey {
                generator: self.lie_algebra.basis_element_to_string(g),
                algebra: self.lie_algebra.to_string(),
            })
    }

    pub fn key<'a>(&self, g: &'a L::Index) -> Result<Key<'a, L::Index>> {
        Ok(match (&self.order, self.lie_algebra.basis()) {
            (BasisOrder::Declared, Some(basis)) => Key::Rank(self.rank(basis, g)?),
            (BasisOrder::Reversed, Some(basis)) => Key::Rank(-self.rank(basis, g)?),
            (BasisOrder::Custom(f), _) => Key::Rank(f(g)),
            // Reversed is rejected on construction for infinite algebras.
            (BasisOrder::Declared | BasisOrder::Reversed | BasisOrder::Natural, _) => Key::Index(g),
        })
    }

    pub fn cmp(&self, a: &L::Index, b: &L::Index) -> Result<Ordering> {
        Ok(self.key(a)?.cmp(&self.key(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lie::{classical, Heisenberg, HeisenbergIndex, StructureConstants, Witt};

    fn sl2() -> Arc<StructureConstants<i64>> {
        Arc::new(classical::sl2())
    }

    fn g(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn test_declared() {
        let key = BasisKey::declared(sl2());
        assert_eq!(key.key(&g("E")).unwrap(), Key::Rank(0));
        assert_eq!(key.key(&g("H")).unwrap(), Key::Rank(2));
        assert_eq!(key.cmp(&g("F"), &g("E")).unwrap(), Ordering::Greater);
        assert!(matches!(
            key.key(&g("X")),
            Err(PbwError::UnindexedKey { .. })
        ));
    }

    #[test]
    fn test_reversed() {
        let key = BasisKey::new(sl2(), BasisOrder::Reversed).unwrap();
        assert_eq!(key.cmp(&g("F"), &g("E")).unwrap(), Ordering::Less);
        assert_eq!(key.cmp(&g("H"), &g("F")).unwrap(), Ordering::Less);

        let witt = Arc::new(Witt::<i64>::new());
        assert!(matches!(
            BasisKey::new(witt, BasisOrder::Reversed),
            Err(PbwError::InfiniteDimension { .. })
        ));
    }

    #[test]
    fn test_infinite_declared_is_natural() {
        let key = BasisKey::declared(Arc::new(Heisenberg::<i64>::infinite()));
        assert_eq!(
            key.cmp(&HeisenbergIndex::Q(1), &HeisenbergIndex::P(5)).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            key.cmp(&HeisenbergIndex::Z, &HeisenbergIndex::Q(7)).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_custom() {
        let order = BasisOrder::custom(|x: &String| match x.as_str() {
            "H" => 0,
            "E" => 1,
            _ => 2,
        });
        let key = BasisKey::new(sl2(), order.clone()).unwrap();
        assert_eq!(key.cmp(&g("H"), &g("E")).unwrap(), Ordering::Less);
        assert_eq!(key.order(), &order);
        assert_ne!(key.order(), &BasisOrder::custom(|_: &String| 0));

        let err = BasisKey::new(sl2(), BasisOrder::custom(|_: &String| 0))
            .err()
            .unwrap();
        assert_eq!(
            err,
            PbwError::DuplicateKey {
                first: g("E"),
                second: g("F"),
                key: 0
            }
        );
    }

    #[test]
    fn test_custom_infinite() {
        let key = BasisKey::new(
            Arc::new(Witt::<i64>::new()),
            BasisOrder::custom(|&i: &i64| -i),
        )
        .unwrap();
        assert_eq!(key.cmp(&3, &2).unwrap(), Ordering::Less);
    }
}
