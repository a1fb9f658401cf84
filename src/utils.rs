//! Loading Lie algebras from JSON files and setting up logging.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use lie::StructureConstants;
use num_rational::BigRational;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::{BasisOrder, PbwBasis};

const STATIC_LIE_ALGEBRAS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/lie_algebras");

/// The PBW basis produced by [`construct`].
pub type RationalPbwBasis = PbwBasis<StructureConstants<BigRational>>;

/// Log to stderr, filtered by `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

/// Which of the orders of the declared basis to use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderName {
    #[default]
    Declared,
    Reversed,
}

impl FromStr for OrderName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "declared" => Ok(Self::Declared),
            "reversed" => Ok(Self::Reversed),
            _ => Err(anyhow!("Invalid order: {s}. Must be declared or reversed")),
        }
    }
}

impl<I> From<OrderName> for BasisOrder<I> {
    fn from(order: OrderName) -> Self {
        match order {
            OrderName::Declared => Self::Declared,
            OrderName::Reversed => Self::Reversed,
        }
    }
}

/// A config object specifies how a PBW basis should be constructed.
#[derive(Clone, Debug)]
pub struct Config {
    /// The json description of the Lie algebra
    pub lie_algebra: Value,
    pub order: OrderName,
}

impl TryFrom<&str> for Config {
    type Error = anyhow::Error;

    fn try_from(config: &str) -> Result<Self, Self::Error> {
        let (name, order) = match config.split_once('@') {
            Some((name, order)) => (name, order.parse()?),
            None => (config, OrderName::Declared),
        };
        Ok(Self {
            lie_algebra: load_lie_algebra_json(name)?,
            order,
        })
    }
}

impl TryFrom<(&str, OrderName)> for Config {
    type Error = anyhow::Error;

    fn try_from((name, order): (&str, OrderName)) -> Result<Self, Self::Error> {
        Ok(Self {
            lie_algebra: load_lie_algebra_json(name)?,
            order,
        })
    }
}

impl From<(Value, OrderName)> for Config {
    fn from((lie_algebra, order): (Value, OrderName)) -> Self {
        Self { lie_algebra, order }
    }
}

/// Reads the JSON description of a Lie algebra. Files named `{name}.json` are searched for in the
/// current directory, `$CWD/lie_algebras` and the `lie_algebras` directory of this crate.
pub fn load_lie_algebra_json(name: &str) -> anyhow::Result<Value> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let relative_dir = current_dir.join("lie_algebras");

    for path in [current_dir, relative_dir, PathBuf::from(STATIC_LIE_ALGEBRAS_PATH)] {
        let mut path = path.join(name);
        path.set_extension("json");
        if let Ok(s) = std::fs::read_to_string(&path) {
            tracing::debug!(path = %path.display(), "loading Lie algebra");
            return serde_json::from_str(&s)
                .with_context(|| format!("Failed to parse {}", path.display()));
        }
    }
    Err(anyhow!("Lie algebra file '{name}' not found on path"))
}

/// This constructs the PBW basis of a Lie algebra described by `config`.
///
/// # Arguments
///  - `config`: A description of the Lie algebra and the order. This is anything that converts
///    into a [`Config`]. In practice, we can supply
///     - A [`Config`] object itself
///     - `(json, order)`: a [`serde_json::Value`] describing the Lie algebra and an
///       [`OrderName`].
///     - `(name, order)`: the name of a Lie algebra file, see [`load_lie_algebra_json`].
///     - A single `&str` of the form `name@order`, where `order` is `declared` or `reversed`.
///       The order may be omitted, in which case it is `declared`.
pub fn construct<T, E>(config: T) -> anyhow::Result<RationalPbwBasis>
where
    anyhow::Error: From<E>,
    T: TryInto<Config, Error = E>,
{
    let Config { lie_algebra, order } = config.try_into()?;
    match lie_algebra["type"].as_str() {
        None | Some("structure constants") => (),
        Some(t) => return Err(anyhow!("Unsupported Lie algebra type: {t}")),
    }
    let lie_algebra = StructureConstants::from_json(&lie_algebra)?;
    Ok(PbwBasis::with_order(Arc::new(lie_algebra), order.into())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("sl2", "E*F - H")]
    #[case("sl2@declared", "E*F - H")]
    #[case("sl2@reversed", "F*E")]
    fn test_construct(#[case] algebra: &str, #[case] output: &str) {
        let pbw = construct(algebra).unwrap();
        assert_eq!(pbw.element_to_string(&pbw.evaluate("F*E").unwrap()), output);
    }

    #[test]
    fn test_construct_from_json() {
        let json = json!({
            "name": "heisenberg",
            "basis": ["p", "q", "z"],
            "brackets": ["[p, q] = z"]
        });
        let pbw = construct((json, OrderName::Reversed)).unwrap();
        assert_eq!(
            pbw.element_to_string(&pbw.evaluate("p*q").unwrap()),
            "q*p + z"
        );
    }

    #[rstest]
    #[case("sl2@sideways")]
    #[case("not_a_lie_algebra")]
    fn test_construct_errors(#[case] algebra: &str) {
        assert!(construct(algebra).is_err());
    }

    #[test]
    fn test_unsupported_type() {
        let json = json!({ "type": "finite dimensional module", "basis": ["x"] });
        assert!(construct((json, OrderName::Declared)).is_err());
    }

    #[test]
    fn test_bundled_algebras() {
        for name in ["sl2", "so3", "gl2", "heisenberg3"] {
            let json = load_lie_algebra_json(name).unwrap();
            StructureConstants::<BigRational>::from_json(&json).unwrap();
        }
    }
}
