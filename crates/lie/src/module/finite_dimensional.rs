use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use itertools::Itertools;
use linear::LinearCombination;
use rustc_hash::FxHashMap as HashMap;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Representation;
use crate::{ActionError, LieAlgebra, RepresentationFailedRelationError};

/// A finite dimensional representation, given by the matrices of the basis elements of `L`.
///
/// The basis vectors of the module are named and indexed by `usize`. Generators whose action was
/// never set act by zero.
pub struct FiniteDimensionalRepresentation<L: LieAlgebra> {
    lie_algebra: Arc<L>,
    name: String,
    basis: Vec<String>,
    basis_to_index: HashMap<String, usize>,
    /// `actions[g][i]` is `g · v_i`.
    actions: HashMap<L::Index, Vec<LinearCombination<usize, L::Coefficient>>>,
}

#[derive(Deserialize, Debug)]
struct RepresentationJson {
    #[serde(default)]
    name: String,
    basis: Vec<String>,
    #[serde(default)]
    actions: Vec<String>,
}

impl<L: LieAlgebra> Display for FiniteDimensionalRepresentation<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(
                f,
                "representation of {} on {}",
                self.lie_algebra,
                self.basis.iter().format(", ")
            )
        } else {
            f.write_str(&self.name)
        }
    }
}

impl<L: LieAlgebra> FiniteDimensionalRepresentation<L> {
    /// The trivial representation on the given basis.
    pub fn new(lie_algebra: Arc<L>, name: String, basis: Vec<String>) -> anyhow::Result<Self> {
        let mut basis_to_index = HashMap::default();
        for (i, b) in basis.iter().enumerate() {
            if basis_to_index.insert(b.clone(), i).is_some() {
                return Err(anyhow!("Duplicate basis element {b}"));
            }
        }
        Ok(Self {
            lie_algebra,
            name,
            basis,
            basis_to_index,
            actions: HashMap::default(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    pub fn basis_element_from_string(&self, name: &str) -> Option<usize> {
        self.basis_to_index.get(name).copied()
    }

    /// Sets `generator · v_input = output`.
    pub fn set_action(
        &mut self,
        generator: L::Index,
        input: usize,
        output: LinearCombination<usize, L::Coefficient>,
    ) {
        assert!(input < self.dimension());
        assert!(output.support().all(|&i| i < self.dimension()));
        let dimension = self.dimension();
        self.actions
            .entry(generator)
            .or_insert_with(|| vec![LinearCombination::zero(); dimension])[input] = output;
    }

    pub fn action(
        &self,
        generator: &L::Index,
        input: usize,
    ) -> LinearCombination<usize, L::Coefficient> {
        self.actions
            .get(generator)
            .map(|table| table[input].clone())
            .unwrap_or_default()
    }

    /// The generators whose relations are checked by
    /// [`FiniteDimensionalRepresentation::check_validity`]. For infinite dimensional algebras
    /// this is only the generators with a nonzero action.
    fn relevant_generators(&self) -> Vec<L::Index> {
        match self.lie_algebra.basis() {
            Some(basis) => basis.to_vec(),
            None => self.actions.keys().cloned().sorted().collect(),
        }
    }

    /// Checks that `[x, y] v = x (y v) - y (x v)` for every pair of generators and basis vector.
    pub fn check_validity(&self) -> Result<(), RepresentationFailedRelationError> {
        let generators = self.relevant_generators();
        for (x, y) in generators.iter().tuple_combinations() {
            let x_name = self.lie_algebra.basis_element_to_string(x);
            let y_name = self.lie_algebra.basis_element_to_string(y);
            for (i, v_name) in self.basis.iter().enumerate() {
                let relation = format!("[{x_name}, {y_name}] {v_name} - {x_name} {y_name} {v_name} + {y_name} {x_name} {v_name}");
                let value = self.relation_value(x, y, i).map_err(|e| {
                    RepresentationFailedRelationError {
                        relation: relation.clone(),
                        value: e.to_string(),
                    }
                })?;
                if !value.is_zero() {
                    return Err(RepresentationFailedRelationError {
                        relation,
                        value: self.element_to_string(&value),
                    });
                }
            }
        }
        Ok(())
    }

    fn relation_value(
        &self,
        x: &L::Index,
        y: &L::Index,
        input: usize,
    ) -> Result<LinearCombination<usize, L::Coefficient>, ActionError> {
        let v = LinearCombination::monomial(input);
        let mut result = self.apply_generator(x, &self.apply_generator(y, &v)?)?;
        result -= &self.apply_generator(y, &self.apply_generator(x, &v)?)?;
        for (k, c) in self.lie_algebra.bracket_on_basis(x, y)?.iter() {
            result.add_scaled(&self.apply_generator(k, &v)?, &-c.clone());
        }
        Ok(result)
    }
}

impl<L: LieAlgebra> FiniteDimensionalRepresentation<L>
where
    L::Coefficient: FromStr,
    <L::Coefficient as FromStr>::Err: Display,
{
    /// Parses an action of the form `E v1 = v0 - 2 v1`.
    pub fn parse_action(&mut self, entry: &str, overwrite: bool) -> anyhow::Result<()> {
        let (lhs, rhs) = entry
            .split_once(" = ")
            .ok_or_else(|| anyhow!("Invalid action: {entry}"))?;
        let (generator, input) = lhs
            .trim()
            .rsplit_once(' ')
            .ok_or_else(|| anyhow!("Invalid action: {entry}"))?;
        let generator = self
            .lie_algebra
            .basis_element_from_string(generator.trim())
            .ok_or_else(|| anyhow!("Invalid Lie algebra element: {generator}"))?;
        let input = self
            .basis_element_from_string(input)
            .ok_or_else(|| anyhow!("Invalid basis element: {input}"))?;
        let output = crate::parse_combination(rhs, |name| {
            self.basis_element_from_string(name)
                .ok_or_else(|| anyhow!("Invalid basis element: {name}"))
        })?;

        if !overwrite && !self.action(&generator, input).is_zero() {
            return Err(anyhow!("Action {lhs} is already set"));
        }
        self.set_action(generator, input, output);
        Ok(())
    }

    /// Reads a representation from JSON of the form
    ///
    /// ```json
    /// { "name": "V(1)", "basis": ["v0", "v1"],
    ///   "actions": ["E v1 = v0", "F v0 = v1", "H v0 = v0", "H v1 = -1 v1"] }
    /// ```
    pub fn from_json(lie_algebra: Arc<L>, json: &Value) -> anyhow::Result<Self> {
        let parsed = RepresentationJson::deserialize(json)?;
        let mut result = Self::new(lie_algebra, parsed.name, parsed.basis)?;
        for action in &parsed.actions {
            result
                .parse_action(action, false)
                .with_context(|| format!("Failed to parse action: {action}"))?;
        }
        result.check_validity()?;
        tracing::debug!(name = %result, dimension = result.dimension(), "loaded representation");
        Ok(result)
    }

    pub fn to_json(&self, json: &mut Value) {
        if !self.name.is_empty() {
            json["name"] = Value::String(self.name.clone());
        }
        json["type"] = Value::from("finite dimensional representation");
        json["basis"] = json!(self.basis);
        json["actions"] = self
            .actions
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .flat_map(|(g, table)| {
                table
                    .iter()
                    .enumerate()
                    .filter(|(_, output)| !output.is_zero())
                    .map(move |(i, output)| {
                        Value::String(format!(
                            "{} {} = {}",
                            self.lie_algebra.basis_element_to_string(g),
                            self.basis[i],
                            self.element_to_string(output)
                        ))
                    })
            })
            .collect();
    }
}

impl<L: LieAlgebra> Representation<L> for FiniteDimensionalRepresentation<L> {
    type Index = usize;

    fn lie_algebra(&self) -> Arc<L> {
        Arc::clone(&self.lie_algebra)
    }

    fn apply_generator(
        &self,
        generator: &L::Index,
        v: &LinearCombination<usize, L::Coefficient>,
    ) -> Result<LinearCombination<usize, L::Coefficient>, ActionError> {
        if !self.lie_algebra.contains(generator) {
            return Err(ActionError::UnknownGenerator {
                generator: self.lie_algebra.basis_element_to_string(generator),
                module: self.to_string(),
            });
        }
        let mut result = LinearCombination::zero();
        let table = self.actions.get(generator);
        for (&i, c) in v.iter() {
            if i >= self.dimension() {
                return Err(ActionError::UnknownBasisElement {
                    element: i.to_string(),
                    module: self.to_string(),
                });
            }
            if let Some(table) = table {
                result.add_scaled(&table[i], c);
            }
        }
        Ok(result)
    }

    fn basis_element_to_string(&self, &i: &usize) -> String {
        self.basis[i].clone()
    }
}
