use std::fmt;
use std::marker::PhantomData;

use linear::{from_integer, LinearCombination, Scalar};

use crate::{BracketError, Dimension, LieAlgebra};

/// The Lie algebra of regular vector fields on the punctured line, with basis `d[i]`
/// (`i ∈ Z`) and `[d_i, d_j] = (i - j) d_{i + j}`.
pub struct Witt<R> {
    _coefficient: PhantomData<R>,
}

impl<R> Witt<R> {
    pub fn new() -> Self {
        Self {
            _coefficient: PhantomData,
        }
    }
}

impl<R> Default for Witt<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Display for Witt<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The Lie algebra of regular vector fields")
    }
}

impl<R: Scalar> LieAlgebra for Witt<R> {
    type Index = i64;
    type Coefficient = R;

    fn dimension(&self) -> Dimension {
        Dimension::Infinite
    }

    fn basis(&self) -> Option<&[i64]> {
        None
    }

    fn bracket_on_basis(
        &self,
        &i: &i64,
        &j: &i64,
    ) -> Result<LinearCombination<i64, R>, BracketError> {
        let overflow = || BracketError::IndexOverflow {
            lhs: self.basis_element_to_string(&i),
            rhs: self.basis_element_to_string(&j),
            algebra: self.to_string(),
        };
        let index = i.checked_add(j).ok_or_else(overflow)?;
        let coefficient = i.checked_sub(j).ok_or_else(overflow)?;
        Ok(LinearCombination::term(index, from_integer(coefficient)))
    }

    fn basis_element_to_string(&self, i: &i64) -> String {
        format!("d[{i}]")
    }

    fn basis_element_from_string(&self, name: &str) -> Option<i64> {
        name.strip_prefix("d[")?.strip_suffix(']')?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket() {
        let witt = Witt::<i64>::new();
        assert_eq!(
            witt.element_to_string(&witt.bracket_on_basis(&3, &2).unwrap()),
            "d[5]"
        );
        assert_eq!(
            witt.element_to_string(&witt.bracket_on_basis(&-2, &1).unwrap()),
            "-3*d[-1]"
        );
        assert!(witt.bracket_on_basis(&4, &4).unwrap().is_zero());
    }

    #[test]
    fn test_bracket_out_of_range() {
        let witt = Witt::<i64>::new();
        assert!(matches!(
            witt.bracket_on_basis(&i64::MAX, &1),
            Err(BracketError::IndexOverflow { .. })
        ));
        assert!(matches!(
            witt.bracket_on_basis(&i64::MIN, &1),
            Err(BracketError::IndexOverflow { .. })
        ));
        assert!(matches!(
            witt.bracket_on_basis(&0, &i64::MIN),
            Err(BracketError::IndexOverflow { .. })
        ));
        assert_eq!(
            witt.element_to_string(&witt.bracket_on_basis(&(i64::MAX - 1), &1).unwrap()),
            format!("{}*d[{}]", i64::MAX - 2, i64::MAX)
        );
    }

    #[test]
    fn test_names() {
        let witt = Witt::<i64>::new();
        assert_eq!(witt.basis_element_from_string("d[-3]"), Some(-3));
        assert_eq!(witt.basis_element_from_string("d3"), None);
        assert_eq!(witt.basis_element_to_string(&0), "d[0]");
    }
}
