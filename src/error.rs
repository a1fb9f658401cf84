use lie::{ActionError, BracketError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PbwError {
    #[error("{generator} is not a basis element of {algebra}")]
    UnindexedKey { generator: String, algebra: String },
    #[error("{divisor} does not divide {dividend}")]
    InvalidDivision { dividend: String, divisor: String },
    #[error(transparent)]
    Bracket(#[from] BracketError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("{element} is not in the image of the Lie algebra")]
    NotInImage { element: String },
    #[error("{algebra} must be finite dimensional")]
    InfiniteDimension { algebra: String },
    #[error("{first} and {second} have the same sort key {key}")]
    DuplicateKey {
        first: String,
        second: String,
        key: i64,
    },
    #[error("the Killing form of {algebra} is degenerate")]
    DegenerateKillingForm { algebra: String },
    #[error("the Killing form of {algebra} cannot be inverted over its coefficients: {pivot} is not a unit")]
    NonInvertibleCoefficient { algebra: String, pivot: String },
    #[error("only the quadratic Casimir element is available, not order {order}")]
    UnsupportedCasimirOrder { order: u32 },
    #[error("cannot convert between PBW bases of {domain} and {codomain}")]
    IncompatibleAlgebras { domain: String, codomain: String },
}

pub type Result<T> = std::result::Result<T, PbwError>;
