use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use linear::{LinearCombination, Scalar};

/// Parses a linear combination such as `2 E - F + 1/2*H`, where `lookup` resolves the name of a
/// basis element. A coefficient is separated from its basis element by a space or `*`, and `0`
/// denotes the zero combination.
pub fn parse_combination<K, R>(
    s: &str,
    mut lookup: impl FnMut(&str) -> anyhow::Result<K>,
) -> anyhow::Result<LinearCombination<K, R>>
where
    K: Clone + Eq + Hash,
    R: Scalar + FromStr,
    R::Err: Display,
{
    let s = s.trim();
    let mut result = LinearCombination::zero();
    if s == "0" {
        return Ok(result);
    }
    let normalized = s.replace(" - ", " + -");
    for item in normalized.split(" + ") {
        let item = item.trim();
        if item.is_empty() {
            return Err(anyhow!("Empty term in {s:?}"));
        }
        let (coeff, name) = match item.split_once([' ', '*']) {
            Some((coeff, name)) => (
                coeff
                    .trim()
                    .parse::<R>()
                    .map_err(|e| anyhow!("Invalid coefficient {coeff:?}: {e}"))?,
                name.trim(),
            ),
            None => match item.strip_prefix('-') {
                Some(name) => (-R::one(), name),
                None => (R::one(), item),
            },
        };
        let k = lookup(name).with_context(|| format!("Failed to parse term {item:?}"))?;
        result.add_basis_element(k, coeff);
    }
    Ok(result)
}
