use std::fmt;
use std::ops::{Div, Neg, Sub};

use num_traits::{One, Zero};

/// A commutative ring that can serve as the coefficients of a [`LinearCombination`].
///
/// This is implemented for everything that has the relevant arithmetic, e.g. `i64`, `Rational64`
/// and `BigRational`.
///
/// [`LinearCombination`]: crate::LinearCombination
pub trait Scalar:
    Clone
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Zero
    + One
    + Neg<Output = Self>
    + Sub<Output = Self>
    + Send
    + Sync
    + 'static
{
}

impl<T> Scalar for T where
    T: Clone
        + PartialEq
        + fmt::Debug
        + fmt::Display
        + Zero
        + One
        + Neg<Output = Self>
        + Sub<Output = Self>
        + Send
        + Sync
        + 'static
{
}

/// A [`Scalar`] with a division operation.
///
/// Integer types also satisfy the bounds, with truncating division, so callers that need a true
/// inverse should go through [`Field::reciprocal`]. Division by zero is a programming error and
/// may panic.
pub trait Field: Scalar + Div<Output = Self> {
    /// The multiplicative inverse of `self`, or `None` if `self` is zero or division does not
    /// actually invert it in this ring.
    fn reciprocal(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let inverse = Self::one() / self.clone();
        (inverse.clone() * self.clone() == Self::one()).then_some(inverse)
    }
}

impl<T> Field for T where T: Scalar + Div<Output = Self> {}

/// The image of the integer `n` in the ring `R`.
///
/// This only uses the additive structure of `R`, so it makes sense in any characteristic.
pub fn from_integer<R: Scalar>(n: i64) -> R {
    let mut result = R::zero();
    let mut power = R::one();
    let mut remaining = n.unsigned_abs();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result + power.clone();
        }
        remaining >>= 1;
        if remaining > 0 {
            power = power.clone() + power;
        }
    }
    if n < 0 {
        -result
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::Rational64;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(-1)]
    #[case(6)]
    #[case(-13)]
    #[case(1024)]
    #[case(i64::MAX)]
    #[case(i64::MIN + 1)]
    fn test_from_integer(#[case] n: i64) {
        assert_eq!(from_integer::<i64>(n), n);
        assert_eq!(from_integer::<Rational64>(n), Rational64::from_integer(n));
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(Rational64::new(-3, 4).reciprocal(), Some(Rational64::new(-4, 3)));
        assert_eq!(Rational64::from_integer(0).reciprocal(), None);
        assert_eq!(1i64.reciprocal(), Some(1));
        assert_eq!((-1i64).reciprocal(), Some(-1));
        assert_eq!(4i64.reciprocal(), None);
        assert_eq!(0i64.reciprocal(), None);
    }
}
