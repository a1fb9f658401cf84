use std::fmt::{self, Display};
use std::str::FromStr;

use anyhow::{anyhow, Context};
use itertools::Itertools;
use linear::{LinearCombination, Scalar};
use rustc_hash::FxHashMap as HashMap;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{BracketError, Dimension, JacobiFailedError, LieAlgebra};

/// A finite dimensional Lie algebra with a basis of named elements, determined by its structure
/// constants. Only the brackets `[b_i, b_j]` with `i < j` are stored; the rest follow from
/// antisymmetry, and brackets that were never set are zero.
#[derive(Clone, Debug)]
pub struct StructureConstants<R> {
    name: String,
    basis: Vec<String>,
    basis_to_index: HashMap<String, usize>,
    brackets: HashMap<(usize, usize), LinearCombination<String, R>>,
}

#[derive(Deserialize, Debug)]
struct StructureConstantsJson {
    #[serde(default)]
    name: String,
    basis: Vec<String>,
    #[serde(default)]
    brackets: Vec<String>,
}

impl<R: Scalar> Display for StructureConstants<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(
                f,
                "Lie algebra on {} generators ({})",
                self.basis.len(),
                self.basis.iter().format(", ")
            )
        } else {
            f.write_str(&self.name)
        }
    }
}

impl<R: Scalar> StructureConstants<R> {
    /// The abelian Lie algebra with the given basis. Brackets are added with
    /// [`StructureConstants::set_bracket`].
    pub fn new(name: impl Into<String>, basis: Vec<String>) -> anyhow::Result<Self> {
        let mut basis_to_index = HashMap::default();
        for (i, b) in basis.iter().enumerate() {
            if basis_to_index.insert(b.clone(), i).is_some() {
                return Err(anyhow!("Duplicate basis element {b}"));
            }
            if !b.starts_with(|c: char| c.is_ascii_alphabetic())
                || !b.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(anyhow!("Invalid basis element name {b:?}"));
            }
        }
        Ok(Self {
            name: name.into(),
            basis,
            basis_to_index,
            brackets: HashMap::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn index_of(&self, x: &str) -> Result<usize, BracketError> {
        self.basis_to_index
            .get(x)
            .copied()
            .ok_or_else(|| BracketError::UnknownGenerator {
                generator: x.to_string(),
                algebra: self.to_string(),
            })
    }

    /// Sets `[x, y] = value`, and hence `[y, x] = -value`.
    pub fn set_bracket(
        &mut self,
        x: &str,
        y: &str,
        value: LinearCombination<String, R>,
    ) -> anyhow::Result<()> {
        let i = self.index_of(x)?;
        let j = self.index_of(y)?;
        for k in value.support() {
            self.index_of(k)?;
        }
        if i == j {
            if !value.is_zero() {
                return Err(anyhow!("[{x}, {x}] must be zero"));
            }
            return Ok(());
        }
        self.insert_bracket(i, j, value);
        Ok(())
    }

    /// Sets `[b_i, b_j] = value` without validating the support of `value`.
    pub(crate) fn insert_bracket(&mut self, i: usize, j: usize, value: LinearCombination<String, R>) {
        let (key, value) = if i < j {
            ((i, j), value)
        } else {
            ((j, i), -value)
        };
        if value.is_zero() {
            self.brackets.remove(&key);
        } else {
            self.brackets.insert(key, value);
        }
    }

    /// Checks the Jacobi identity on every triple of distinct basis elements.
    pub fn check_jacobi(&self) -> Result<(), JacobiFailedError> {
        for (x, y, z) in self.basis.iter().tuple_combinations() {
            let jacobi = |a: &String, b: &String, c: &String| -> Result<_, BracketError> {
                let inner = self.bracket_on_basis(b, c)?;
                self.bracket(&LinearCombination::monomial(a.clone()), &inner)
            };
            let value = [jacobi(x, y, z), jacobi(y, z, x), jacobi(z, x, y)]
                .into_iter()
                .fold_ok(LinearCombination::zero(), |acc, term| acc + &term)
                .map_err(|e| JacobiFailedError {
                    relation: format!("[{x}, [{y}, {z}]]"),
                    value: e.to_string(),
                })?;
            if !value.is_zero() {
                return Err(JacobiFailedError {
                    relation: format!("[{x}, [{y}, {z}]] + [{y}, [{z}, {x}]] + [{z}, [{x}, {y}]]"),
                    value: self.element_to_string(&value),
                });
            }
        }
        Ok(())
    }
}

impl<R: Scalar + FromStr> StructureConstants<R>
where
    R::Err: Display,
{
    /// Parses a bracket of the form `[E, F] = H - 2 F` and records it.
    pub fn parse_bracket(&mut self, entry: &str) -> anyhow::Result<()> {
        let (lhs, rhs) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Bracket {entry:?} has no '='"))?;
        let (x, y) = lhs
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .and_then(|s| s.split_once(','))
            .ok_or_else(|| anyhow!("Expected [x, y] on the left of {entry:?}"))?;
        let value = crate::parse_combination(rhs, |name| {
            self.index_of(name)?;
            Ok(name.to_string())
        })?;
        self.set_bracket(x.trim(), y.trim(), value)
    }

    /// Reads an algebra from JSON of the form
    ///
    /// ```json
    /// { "name": "sl2", "basis": ["E", "F", "H"],
    ///   "brackets": ["[E, F] = H", "[H, E] = 2 E", "[H, F] = -2 F"] }
    /// ```
    ///
    /// and checks the Jacobi identity.
    pub fn from_json(json: &Value) -> anyhow::Result<Self> {
        let parsed = StructureConstantsJson::deserialize(json)?;
        let mut result = Self::new(parsed.name, parsed.basis)?;
        for entry in &parsed.brackets {
            result
                .parse_bracket(entry)
                .with_context(|| format!("Failed to parse bracket: {entry}"))?;
        }
        result.check_jacobi()?;
        tracing::debug!(
            name = %result,
            dimension = result.basis.len(),
            brackets = result.brackets.len(),
            "loaded structure constants"
        );
        Ok(result)
    }

    pub fn to_json(&self, json: &mut Value) {
        json["name"] = Value::String(self.name.clone());
        json["type"] = Value::from("structure constants");
        json["basis"] = json!(self.basis);
        json["brackets"] = self
            .brackets
            .iter()
            .sorted_by_key(|(key, _)| **key)
            .map(|(&(i, j), value)| {
                Value::String(format!(
                    "[{}, {}] = {}",
                    self.basis[i],
                    self.basis[j],
                    self.element_to_string(value)
                ))
            })
            .collect();
    }
}

impl<R: Scalar> LieAlgebra for StructureConstants<R> {
    type Index = String;
    type Coefficient = R;

    fn dimension(&self) -> Dimension {
        Dimension::Finite(self.basis.len())
    }

    fn basis(&self) -> Option<&[String]> {
        Some(&self.basis)
    }

    fn contains(&self, x: &String) -> bool {
        self.basis_to_index.contains_key(x)
    }

    fn bracket_on_basis(
        &self,
        x: &String,
        y: &String,
    ) -> Result<LinearCombination<String, R>, BracketError> {
        let i = self.index_of(x)?;
        let j = self.index_of(y)?;
        Ok(match i.cmp(&j) {
            std::cmp::Ordering::Less => self.brackets.get(&(i, j)).cloned().unwrap_or_default(),
            std::cmp::Ordering::Greater => self
                .brackets
                .get(&(j, i))
                .map(|v| -v.clone())
                .unwrap_or_default(),
            std::cmp::Ordering::Equal => LinearCombination::zero(),
        })
    }

    fn basis_element_to_string(&self, x: &String) -> String {
        x.clone()
    }

    fn basis_element_from_string(&self, name: &str) -> Option<String> {
        self.basis_to_index
            .contains_key(name)
            .then(|| name.to_string())
    }
}
