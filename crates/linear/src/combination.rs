use std::fmt;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;

use crate::Scalar;

/// A finite formal linear combination $\sum_i c_i k_i$ of basis elements $k_i$ with coefficients
/// $c_i$ in a commutative ring.
///
/// Zero coefficients are never stored, so two combinations are equal exactly when their maps of
/// nonzero coefficients agree. There is no canonical order on the terms; functions that need one
/// (e.g. for printing) take a sort key.
#[derive(Clone, Debug)]
pub struct LinearCombination<K, R> {
    terms: HashMap<K, R>,
}

impl<K: Eq + Hash, R: PartialEq> PartialEq for LinearCombination<K, R> {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl<K: Eq + Hash, R: Eq> Eq for LinearCombination<K, R> {}

impl<K, R> Default for LinearCombination<K, R> {
    fn default() -> Self {
        Self {
            terms: HashMap::default(),
        }
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> LinearCombination<K, R> {
    pub fn zero() -> Self {
        Self::default()
    }

    /// The basis element `k` with coefficient one.
    pub fn monomial(k: K) -> Self {
        Self::term(k, R::one())
    }

    pub fn term(k: K, coeff: R) -> Self {
        let mut result = Self::zero();
        result.add_basis_element(k, coeff);
        result
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The number of basis elements with nonzero coefficient.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coefficient(&self, k: &K) -> R {
        self.terms.get(k).cloned().unwrap_or_else(R::zero)
    }

    pub fn contains(&self, k: &K) -> bool {
        self.terms.contains_key(k)
    }

    /// Iterate over the terms with nonzero coefficient, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &R)> + '_ {
        self.terms.iter()
    }

    pub fn support(&self) -> impl Iterator<Item = &K> + '_ {
        self.terms.keys()
    }

    pub fn into_terms(self) -> impl Iterator<Item = (K, R)> {
        self.terms.into_iter()
    }

    /// Adds `coeff * k` to `self`.
    pub fn add_basis_element(&mut self, k: K, coeff: R) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.get_mut(&k) {
            Some(c) => {
                *c = c.clone() + coeff;
                if c.is_zero() {
                    self.terms.remove(&k);
                }
            }
            None => {
                self.terms.insert(k, coeff);
            }
        }
    }

    /// Adds `coeff * other` to `self`.
    pub fn add_scaled(&mut self, other: &Self, coeff: &R) {
        if coeff.is_zero() {
            return;
        }
        for (k, c) in other.iter() {
            self.add_basis_element(k.clone(), coeff.clone() * c.clone());
        }
    }

    pub fn scale(&self, coeff: &R) -> Self {
        let mut result = Self::zero();
        result.add_scaled(self, coeff);
        result
    }

    /// Apply `f` to every basis element, collecting like terms in the image.
    pub fn map_support<K2: Clone + Eq + Hash>(
        &self,
        mut f: impl FnMut(&K) -> K2,
    ) -> LinearCombination<K2, R> {
        self.iter().map(|(k, c)| (f(k), c.clone())).collect()
    }

    /// Like [`LinearCombination::map_support`], but `f` may fail.
    pub fn try_map_support<K2: Clone + Eq + Hash, E>(
        &self,
        mut f: impl FnMut(&K) -> Result<K2, E>,
    ) -> Result<LinearCombination<K2, R>, E> {
        let mut result = LinearCombination::zero();
        for (k, c) in self.iter() {
            result.add_basis_element(f(k)?, c.clone());
        }
        Ok(result)
    }

    /// The terms of `self` sorted by `key`.
    pub fn sorted_terms_by<T: Ord>(&self, mut key: impl FnMut(&K) -> T) -> Vec<(&K, &R)> {
        self.iter()
            .sorted_by_cached_key(|(k, _)| key(*k))
            .collect()
    }

    /// Converts the combination into a string, listing terms in the order given by `key`.
    ///
    /// `name` gives the string of a basis element, and should return `None` for the unit, which
    /// is then printed as its coefficient alone.
    pub fn to_string_by<T: Ord>(
        &self,
        key: impl FnMut(&K) -> T,
        mut name: impl FnMut(&K) -> Option<String>,
    ) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let one = R::one();
        let minus_one = -R::one();
        let mut result = String::new();
        for (idx, (k, c)) in self.sorted_terms_by(key).into_iter().enumerate() {
            let term = match name(k) {
                None => c.to_string(),
                Some(s) if *c == one => s,
                Some(s) if *c == minus_one => format!("-{s}"),
                Some(s) => format!("{c}*{s}"),
            };
            if idx == 0 {
                result.push_str(&term);
            } else if let Some(rest) = term.strip_prefix('-') {
                result.push_str(" - ");
                result.push_str(rest);
            } else {
                result.push_str(" + ");
                result.push_str(&term);
            }
        }
        result
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> FromIterator<(K, R)> for LinearCombination<K, R> {
    /// Sums the given terms.
    fn from_iter<T: IntoIterator<Item = (K, R)>>(iter: T) -> Self {
        let mut result = Self::zero();
        result.extend(iter);
        result
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> Extend<(K, R)> for LinearCombination<K, R> {
    fn extend<T: IntoIterator<Item = (K, R)>>(&mut self, iter: T) {
        for (k, c) in iter {
            self.add_basis_element(k, c);
        }
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> AddAssign<&LinearCombination<K, R>>
    for LinearCombination<K, R>
{
    fn add_assign(&mut self, other: &Self) {
        self.add_scaled(other, &R::one());
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> SubAssign<&LinearCombination<K, R>>
    for LinearCombination<K, R>
{
    fn sub_assign(&mut self, other: &Self) {
        self.add_scaled(other, &-R::one());
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> Add<&LinearCombination<K, R>>
    for LinearCombination<K, R>
{
    type Output = Self;

    fn add(mut self, other: &Self) -> Self {
        self += other;
        self
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> Add for LinearCombination<K, R> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self + &other
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> Sub<&LinearCombination<K, R>>
    for LinearCombination<K, R>
{
    type Output = Self;

    fn sub(mut self, other: &Self) -> Self {
        self -= other;
        self
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> Sub for LinearCombination<K, R> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self - &other
    }
}

impl<K: Clone + Eq + Hash, R: Scalar> Neg for LinearCombination<K, R> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            terms: self.terms.into_iter().map(|(k, c)| (k, -c)).collect(),
        }
    }
}

impl<K: Clone + Eq + Hash + Ord + fmt::Display, R: Scalar> fmt::Display
    for LinearCombination<K, R>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = self.to_string_by(|k| k.clone(), |k| Some(k.to_string()));
        write!(f, "{s}")
    }
}
