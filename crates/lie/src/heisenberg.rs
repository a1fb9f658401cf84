use std::fmt;
use std::marker::PhantomData;

use linear::{LinearCombination, Scalar};

use crate::{BracketError, Dimension, LieAlgebra};

/// A basis element of a Heisenberg algebra. The `p_i` and `q_i` are indexed from 1.
///
/// The derived order puts every `p_i` before every `q_j`, and `z` last.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeisenbergIndex {
    P(usize),
    Q(usize),
    Z,
}

/// The Heisenberg algebra with basis `p_i, q_i, z`, where `[p_i, q_j] = δ_ij z` and all other
/// brackets of basis elements vanish. The rank is either finite or countably infinite.
pub struct Heisenberg<R> {
    rank: Option<usize>,
    basis: Option<Vec<HeisenbergIndex>>,
    _coefficient: PhantomData<R>,
}

impl<R> Heisenberg<R> {
    pub fn new(rank: usize) -> Self {
        let basis = (1..=rank)
            .map(HeisenbergIndex::P)
            .chain((1..=rank).map(HeisenbergIndex::Q))
            .chain(std::iter::once(HeisenbergIndex::Z))
            .collect();
        Self {
            rank: Some(rank),
            basis: Some(basis),
            _coefficient: PhantomData,
        }
    }

    pub fn infinite() -> Self {
        Self {
            rank: None,
            basis: None,
            _coefficient: PhantomData,
        }
    }

    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    fn in_range(&self, i: usize) -> bool {
        i >= 1 && self.rank.map_or(true, |n| i <= n)
    }
}

impl<R> fmt::Display for Heisenberg<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(n) => write!(f, "Heisenberg algebra of rank {n}"),
            None => write!(f, "Heisenberg algebra of infinite rank"),
        }
    }
}

impl<R: Scalar> LieAlgebra for Heisenberg<R> {
    type Index = HeisenbergIndex;
    type Coefficient = R;

    fn dimension(&self) -> Dimension {
        match self.rank {
            Some(n) => Dimension::Finite(2 * n + 1),
            None => Dimension::Infinite,
        }
    }

    fn basis(&self) -> Option<&[HeisenbergIndex]> {
        self.basis.as_deref()
    }

    fn contains(&self, x: &HeisenbergIndex) -> bool {
        match *x {
            HeisenbergIndex::P(i) | HeisenbergIndex::Q(i) => self.in_range(i),
            HeisenbergIndex::Z => true,
        }
    }

    fn bracket_on_basis(
        &self,
        x: &HeisenbergIndex,
        y: &HeisenbergIndex,
    ) -> Result<LinearCombination<HeisenbergIndex, R>, BracketError> {
        for g in [x, y] {
            if !self.contains(g) {
                return Err(BracketError::UnknownGenerator {
                    generator: self.basis_element_to_string(g),
                    algebra: self.to_string(),
                });
            }
        }
        Ok(match (*x, *y) {
            (HeisenbergIndex::P(i), HeisenbergIndex::Q(j)) if i == j => {
                LinearCombination::monomial(HeisenbergIndex::Z)
            }
            (HeisenbergIndex::Q(i), HeisenbergIndex::P(j)) if i == j => {
                LinearCombination::term(HeisenbergIndex::Z, -R::one())
            }
            _ => LinearCombination::zero(),
        })
    }

    fn basis_element_to_string(&self, x: &HeisenbergIndex) -> String {
        match x {
            HeisenbergIndex::P(i) => format!("p{i}"),
            HeisenbergIndex::Q(i) => format!("q{i}"),
            HeisenbergIndex::Z => "z".to_string(),
        }
    }

    fn basis_element_from_string(&self, name: &str) -> Option<HeisenbergIndex> {
        let index = |rest: &str| rest.parse::<usize>().ok();
        let x = if name == "z" {
            HeisenbergIndex::Z
        } else if let Some(rest) = name.strip_prefix('p') {
            HeisenbergIndex::P(index(rest)?)
        } else {
            HeisenbergIndex::Q(index(name.strip_prefix('q')?)?)
        };
        self.contains(&x).then_some(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HeisenbergIndex::*;

    #[test]
    fn test_finite() {
        let h = Heisenberg::<i64>::new(2);
        assert_eq!(h.dimension(), Dimension::Finite(5));
        assert_eq!(h.basis().unwrap(), [P(1), P(2), Q(1), Q(2), Z]);
        assert_eq!(
            h.bracket_on_basis(&P(2), &Q(2)).unwrap(),
            LinearCombination::monomial(Z)
        );
        assert_eq!(
            h.bracket_on_basis(&Q(1), &P(1)).unwrap(),
            LinearCombination::term(Z, -1)
        );
        assert!(h.bracket_on_basis(&P(1), &Q(2)).unwrap().is_zero());
        assert!(h.bracket_on_basis(&P(1), &Z).unwrap().is_zero());
        assert!(h.bracket_on_basis(&P(3), &Q(3)).is_err());
        assert_eq!(h.basis_element_from_string("q2"), Some(Q(2)));
        assert_eq!(h.basis_element_from_string("q3"), None);
        assert_eq!(h.basis_element_from_string("p0"), None);
    }

    #[test]
    fn test_infinite() {
        let h = Heisenberg::<i64>::infinite();
        assert_eq!(h.dimension(), Dimension::Infinite);
        assert!(h.basis().is_none());
        assert_eq!(
            h.bracket_on_basis(&P(100), &Q(100)).unwrap(),
            LinearCombination::monomial(Z)
        );
        assert_eq!(h.basis_element_from_string("p17"), Some(P(17)));
        assert_eq!(h.basis_element_to_string(&Q(17)), "q17");
        assert_eq!(h.to_string(), "Heisenberg algebra of infinite rank");
    }
}
