use anyhow::anyhow;
use lie::LieAlgebra;
use linear::from_integer;

use crate::parser::{parse_element, ElementNode};
use crate::{PbwBasis, PbwElement};

impl<L: LieAlgebra> PbwBasis<L> {
    /// Parses and evaluates an expression such as `F*E - [E, H]^2`, with generators named by
    /// [`LieAlgebra::basis_element_from_string`].
    pub fn evaluate(&self, input: &str) -> anyhow::Result<PbwElement<L>> {
        self.evaluate_node(&parse_element(input)?)
    }

    pub fn evaluate_node(&self, node: &ElementNode) -> anyhow::Result<PbwElement<L>> {
        Ok(match node {
            ElementNode::Sum(a, b) => self.evaluate_node(a)? + &self.evaluate_node(b)?,
            ElementNode::Product(a, b) => {
                self.multiply(&self.evaluate_node(a)?, &self.evaluate_node(b)?)?
            }
            ElementNode::Power(a, n) => self.pow(&self.evaluate_node(a)?, *n)?,
            ElementNode::Commutator(a, b) => {
                self.commutator(&self.evaluate_node(a)?, &self.evaluate_node(b)?)?
            }
            ElementNode::Generator(name) => {
                let g = self
                    .lie_algebra()
                    .basis_element_from_string(name)
                    .ok_or_else(|| anyhow!("Unknown generator {name} of {}", self.lie_algebra()))?;
                self.lift(&g)
            }
            ElementNode::Scalar(n) => self.scalar(from_integer(*n)),
        })
    }
}
